//! Error handling foundation for copper-kite.
//!
//! This module provides only the `Result` type alias using rootcause.
//! Each crate defines its own domain-specific error types in its own
//! error module and wraps them in a `Report` as they propagate.

use rootcause::Report;

/// A Result type alias using rootcause's Report for error handling.
pub type Result<T, C = ()> = std::result::Result<T, Report<C>>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::{IntegrationKind, UnknownIntegration};

    #[test]
    fn result_type_works() {
        let ok: Result<i32> = Ok(42);
        assert_eq!(ok.expect("should be ok"), 42);
    }

    #[test]
    fn typed_report_keeps_context() {
        fn parse(name: &str) -> Result<IntegrationKind, UnknownIntegration> {
            Ok(name.parse()?)
        }

        let report = parse("Dropbox").unwrap_err();
        assert_eq!(report.current_context().name, "Dropbox");
    }
}
