//! The closed set of integrations the application can connect to.
//!
//! Every integration is a variant of [`IntegrationKind`]. Names coming from
//! the outside (select controls, server function arguments) are parsed with
//! [`FromStr`]; anything outside the set is rejected with
//! [`UnknownIntegration`] rather than silently ignored.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An integration the backend knows how to authorize and load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IntegrationKind {
    Notion,
    Airtable,
    Hubspot,
}

impl IntegrationKind {
    /// All integrations, in the order they are offered to the user.
    pub const ALL: [IntegrationKind; 3] = [Self::Notion, Self::Airtable, Self::Hubspot];

    /// Human-readable name, also used as the serialized form.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Notion => "Notion",
            Self::Airtable => "Airtable",
            Self::Hubspot => "Hubspot",
        }
    }

    /// Lowercased path segment used in backend URLs.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Notion => "notion",
            Self::Airtable => "airtable",
            Self::Hubspot => "hubspot",
        }
    }

    /// Window name for the authorization popup.
    ///
    /// Distinct per integration so two flows never reuse one popup.
    #[must_use]
    pub const fn popup_name(self) -> &'static str {
        match self {
            Self::Notion => "notion_authorization",
            Self::Airtable => "airtable_authorization",
            Self::Hubspot => "hubspot_authorization",
        }
    }
}

impl fmt::Display for IntegrationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Error returned when a name does not match any [`IntegrationKind`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownIntegration {
    /// The name that failed to parse.
    pub name: String,
}

impl fmt::Display for UnknownIntegration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown integration: {}", self.name)
    }
}

impl std::error::Error for UnknownIntegration {}

impl FromStr for IntegrationKind {
    type Err = UnknownIntegration;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.display_name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownIntegration {
                name: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_display_name() {
        for kind in IntegrationKind::ALL {
            let parsed: IntegrationKind = kind.display_name().parse().expect("should parse");
            assert_eq!(parsed, kind);
        }
    }

    #[test]
    fn parse_ignores_case_and_whitespace() {
        assert_eq!(
            " hubspot ".parse::<IntegrationKind>(),
            Ok(IntegrationKind::Hubspot)
        );
        assert_eq!("NOTION".parse::<IntegrationKind>(), Ok(IntegrationKind::Notion));
    }

    #[test]
    fn unknown_names_are_rejected() {
        let err = "Salesforce".parse::<IntegrationKind>().unwrap_err();
        assert_eq!(err.name, "Salesforce");
        assert_eq!(err.to_string(), "Unknown integration: Salesforce");

        assert!("".parse::<IntegrationKind>().is_err());
    }

    #[test]
    fn slug_is_lowercased_display_name() {
        for kind in IntegrationKind::ALL {
            assert_eq!(kind.slug(), kind.display_name().to_lowercase());
        }
    }

    #[test]
    fn serializes_as_display_name() {
        let json = serde_json::to_string(&IntegrationKind::Airtable).expect("serialize");
        assert_eq!(json, "\"Airtable\"");
    }
}
