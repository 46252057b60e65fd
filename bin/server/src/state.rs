//! UI state for the integration page, kept free of Leptos so it can be
//! tested without a browser.
//!
//! Components hold these structs in signals and call the methods from
//! event handlers. Everything the view shows (labels, disabled flags,
//! summaries) is derived here.

use copper_kite_core::{
    Identity, IntegrationKind, IntegrationParams, LoadedItem, UnknownIntegration, load_summary,
};

/// State owned by the integration form: identity, selection, and the
/// result of the last completed authorization.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IntegrationFormState {
    pub identity: Identity,
    pub selection: Option<IntegrationKind>,
    pub params: Option<IntegrationParams>,
}

impl IntegrationFormState {
    /// Creates form state with the given identity and nothing selected.
    #[must_use]
    pub fn new(identity: Identity) -> Self {
        Self {
            identity,
            selection: None,
            params: None,
        }
    }

    /// Selects an integration by name. An empty name clears the selection.
    ///
    /// Unknown names clear the selection and return an error. Previously
    /// obtained params are kept either way.
    pub fn select(&mut self, name: &str) -> Result<(), UnknownIntegration> {
        if name.trim().is_empty() {
            self.selection = None;
            return Ok(());
        }

        match name.parse() {
            Ok(kind) => {
                self.selection = Some(kind);
                Ok(())
            }
            Err(e) => {
                self.selection = None;
                Err(e)
            }
        }
    }

    /// Records the result of an authorization flow.
    pub fn set_params(&mut self, params: IntegrationParams) {
        self.params = Some(params);
    }

    /// The authorization panel to render, if any.
    #[must_use]
    pub fn active_panel(&self) -> Option<IntegrationKind> {
        self.selection
    }

    /// What the data loader should be rendered with, if anything.
    #[must_use]
    pub fn data_view(&self) -> Option<IntegrationParams> {
        self.params.clone()
    }
}

/// Connection status shown by an authorization panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelStatus {
    Disconnected,
    Connecting,
    Connected,
}

impl PanelStatus {
    /// Derives the status of the panel for `kind`.
    ///
    /// A panel is connected when the shared params hold credentials for its
    /// own integration; credentials for another integration do not count.
    #[must_use]
    pub fn resolve(
        kind: IntegrationKind,
        connecting: bool,
        params: Option<&IntegrationParams>,
    ) -> Self {
        if params.is_some_and(|p| p.kind == kind) {
            Self::Connected
        } else if connecting {
            Self::Connecting
        } else {
            Self::Disconnected
        }
    }

    /// Label of the connect button.
    #[must_use]
    pub fn button_label(self, kind: IntegrationKind) -> String {
        match self {
            Self::Disconnected => format!("Connect to {kind}"),
            Self::Connecting => "Connecting...".to_string(),
            Self::Connected => format!("{kind} Connected"),
        }
    }

    /// Whether the connect button accepts clicks.
    #[must_use]
    pub fn can_connect(self) -> bool {
        self == Self::Disconnected
    }
}

/// State of the data loader: `idle -> loading -> idle`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataLoaderState {
    loading: bool,
    loaded: Option<Vec<LoadedItem>>,
}

impl DataLoaderState {
    /// Enters the loading state.
    ///
    /// Returns `false` and changes nothing if a load is already in flight.
    pub fn begin_load(&mut self) -> bool {
        if self.loading {
            return false;
        }
        self.loading = true;
        true
    }

    /// Leaves the loading state with the outcome of the request.
    ///
    /// Success replaces the loaded items. Failure keeps them and returns
    /// the message to show the user.
    pub fn finish_load(&mut self, outcome: Result<Vec<LoadedItem>, String>) -> Option<String> {
        self.loading = false;
        match outcome {
            Ok(items) => {
                self.loaded = Some(items);
                None
            }
            Err(message) => Some(message),
        }
    }

    /// Discards loaded items.
    pub fn clear(&mut self) {
        self.loaded = None;
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn loaded(&self) -> Option<&[LoadedItem]> {
        self.loaded.as_deref()
    }

    #[must_use]
    pub fn can_load(&self) -> bool {
        !self.loading
    }

    #[must_use]
    pub fn can_clear(&self) -> bool {
        self.loaded.is_some()
    }

    /// Label of the load button.
    #[must_use]
    pub fn load_label(&self) -> &'static str {
        if self.loading { "Loading..." } else { "Load Data" }
    }

    /// Summary line for the loaded items, if any are loaded.
    #[must_use]
    pub fn summary(&self, kind: IntegrationKind) -> Option<String> {
        self.loaded
            .as_ref()
            .map(|items| load_summary(items.len(), kind.display_name()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use copper_kite_core::Credentials;
    use serde_json::json;

    fn params(kind: IntegrationKind) -> IntegrationParams {
        IntegrationParams::new(kind, Credentials::new(json!({ "access_token": "t" })))
    }

    fn item(id: &str) -> LoadedItem {
        LoadedItem::new(id)
    }

    #[test]
    fn form_starts_with_default_identity_and_nothing_selected() {
        let state = IntegrationFormState::default();
        assert_eq!(state.identity, Identity::new("TestUser", "TestOrg"));
        assert_eq!(state.active_panel(), None);
        assert_eq!(state.data_view(), None);
    }

    #[test]
    fn selecting_each_kind_activates_exactly_that_panel() {
        let mut state = IntegrationFormState::default();
        for kind in IntegrationKind::ALL {
            state.select(kind.display_name()).expect("known integration");
            assert_eq!(state.active_panel(), Some(kind));
        }
    }

    #[test]
    fn selecting_unknown_name_is_rejected() {
        let mut state = IntegrationFormState::default();
        state.select("Notion").expect("known integration");

        let err = state.select("Dropbox").unwrap_err();
        assert_eq!(err.name, "Dropbox");
        assert_eq!(state.active_panel(), None);
    }

    #[test]
    fn empty_selection_clears() {
        let mut state = IntegrationFormState::default();
        state.select("Airtable").expect("known integration");
        state.select("").expect("empty clears");
        assert_eq!(state.active_panel(), None);
    }

    #[test]
    fn data_view_appears_once_params_are_set() {
        let mut state = IntegrationFormState::default();
        state.select("Hubspot").expect("known integration");
        assert_eq!(state.data_view(), None);

        state.set_params(params(IntegrationKind::Hubspot));
        let view = state.data_view().expect("data view");
        assert_eq!(view.kind, IntegrationKind::Hubspot);
    }

    #[test]
    fn changing_selection_keeps_previous_params() {
        let mut state = IntegrationFormState::default();
        state.select("Notion").expect("known integration");
        state.set_params(params(IntegrationKind::Notion));

        state.select("Airtable").expect("known integration");
        assert_eq!(state.active_panel(), Some(IntegrationKind::Airtable));
        assert_eq!(
            state.data_view().map(|p| p.kind),
            Some(IntegrationKind::Notion)
        );
    }

    #[test]
    fn panel_status_resolution() {
        let notion = params(IntegrationKind::Notion);

        assert_eq!(
            PanelStatus::resolve(IntegrationKind::Notion, false, None),
            PanelStatus::Disconnected
        );
        assert_eq!(
            PanelStatus::resolve(IntegrationKind::Notion, true, None),
            PanelStatus::Connecting
        );
        assert_eq!(
            PanelStatus::resolve(IntegrationKind::Notion, false, Some(&notion)),
            PanelStatus::Connected
        );
        assert_eq!(
            PanelStatus::resolve(IntegrationKind::Airtable, false, Some(&notion)),
            PanelStatus::Disconnected
        );
    }

    #[test]
    fn panel_labels() {
        let kind = IntegrationKind::Hubspot;
        assert_eq!(PanelStatus::Disconnected.button_label(kind), "Connect to Hubspot");
        assert_eq!(PanelStatus::Connecting.button_label(kind), "Connecting...");
        assert_eq!(PanelStatus::Connected.button_label(kind), "Hubspot Connected");
        assert!(PanelStatus::Disconnected.can_connect());
        assert!(!PanelStatus::Connecting.can_connect());
        assert!(!PanelStatus::Connected.can_connect());
    }

    #[test]
    fn load_control_is_disabled_while_loading() {
        let mut state = DataLoaderState::default();
        assert!(state.can_load());
        assert_eq!(state.load_label(), "Load Data");

        assert!(state.begin_load());
        assert!(!state.can_load());
        assert_eq!(state.load_label(), "Loading...");
        assert!(!state.begin_load());

        state.finish_load(Ok(vec![item("1")]));
        assert!(state.can_load());
        assert_eq!(state.load_label(), "Load Data");
    }

    #[test]
    fn load_control_is_re_enabled_after_failure() {
        let mut state = DataLoaderState::default();
        state.begin_load();

        let message = state.finish_load(Err("Invalid token".to_string()));
        assert_eq!(message.as_deref(), Some("Invalid token"));
        assert!(state.can_load());
        assert!(!state.is_loading());
    }

    #[test]
    fn failure_keeps_previous_items() {
        let mut state = DataLoaderState::default();
        state.begin_load();
        state.finish_load(Ok(vec![item("1"), item("2")]));

        state.begin_load();
        state.finish_load(Err("Failed to load data.".to_string()));
        assert_eq!(state.loaded().map(<[LoadedItem]>::len), Some(2));
    }

    #[test]
    fn success_replaces_items() {
        let mut state = DataLoaderState::default();
        state.begin_load();
        state.finish_load(Ok(vec![item("1"), item("2")]));
        state.begin_load();
        state.finish_load(Ok(vec![item("3")]));

        let loaded = state.loaded().expect("loaded");
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id, "3");
    }

    #[test]
    fn summary_reflects_loaded_items() {
        let mut state = DataLoaderState::default();
        assert_eq!(state.summary(IntegrationKind::Notion), None);

        state.begin_load();
        state.finish_load(Ok(vec![item("1")]));
        assert_eq!(
            state.summary(IntegrationKind::Notion).as_deref(),
            Some("Loaded 1 item from Notion")
        );

        state.begin_load();
        state.finish_load(Ok(Vec::new()));
        assert_eq!(
            state.summary(IntegrationKind::Notion).as_deref(),
            Some("Loaded 0 items from Notion")
        );
        assert_eq!(state.loaded(), Some(&[][..]));
    }

    #[test]
    fn clear_empties_and_disables_itself() {
        let mut state = DataLoaderState::default();
        assert!(!state.can_clear());

        state.begin_load();
        state.finish_load(Ok(vec![item("1")]));
        assert!(state.can_clear());

        state.clear();
        assert_eq!(state.loaded(), None);
        assert!(!state.can_clear());
    }
}
