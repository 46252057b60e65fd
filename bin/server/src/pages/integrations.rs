//! Integrations page: connect an integration, then browse its data.

mod authorization;
mod data_form;
mod server;

pub use authorization::AuthorizationPanel;
pub use data_form::DataForm;
pub use server::{
    authorize_integration, fetch_integration_credentials, get_identity_defaults,
    load_integration_data,
};

use crate::browser;
use crate::state::IntegrationFormState;
use copper_kite_core::{Identity, IntegrationKind, IntegrationParams};
use leptos::prelude::*;

/// Integrations page.
#[component]
pub fn IntegrationsPage() -> impl IntoView {
    let defaults = Resource::new(|| (), |_| get_identity_defaults());

    view! {
        <div class="integrations-page">
            <Suspense fallback=move || view! { <p>"Loading..."</p> }>
                {move || {
                    defaults.get().map(|result| {
                        let identity = result.unwrap_or_default();
                        view! { <IntegrationForm initial=identity/> }
                    })
                }}
            </Suspense>
        </div>
    }
}

/// Identity and integration selection, the selected integration's
/// authorization panel, and the data loader once credentials exist.
#[component]
pub fn IntegrationForm(initial: Identity) -> impl IntoView {
    let state = RwSignal::new(IntegrationFormState::new(initial));

    // Memos so typing in the identity fields does not rebuild the panels.
    let active_panel = Memo::new(move |_| state.with(|s| s.active_panel()));
    let data_view = Memo::new(move |_| state.with(|s| s.data_view()));
    let identity = Signal::derive(move || state.with(|s| s.identity.clone()));
    let params = Signal::derive(move || state.with(|s| s.params.clone()));
    let on_authorized = Callback::new(move |params: IntegrationParams| {
        state.update(|s| s.set_params(params));
    });

    let on_select = move |ev: leptos::ev::Event| {
        let name = event_target_value(&ev);
        let mut rejected = None;
        state.update(|s| rejected = s.select(&name).err());
        if let Some(err) = rejected {
            browser::alert(&err.to_string());
        }
    };

    view! {
        <section class="card connect-card">
            <h2>"Connect an Integration"</h2>
            <div class="form-group">
                <label for="user">"User"</label>
                <input
                    id="user"
                    type="text"
                    prop:value=move || state.with(|s| s.identity.user.clone())
                    on:input=move |ev| state.update(|s| s.identity.user = event_target_value(&ev))
                />
            </div>
            <div class="form-group">
                <label for="org">"Organization"</label>
                <input
                    id="org"
                    type="text"
                    prop:value=move || state.with(|s| s.identity.org.clone())
                    on:input=move |ev| state.update(|s| s.identity.org = event_target_value(&ev))
                />
            </div>
            <div class="form-group">
                <label for="integration-type">"Integration Type"</label>
                <select id="integration-type" on:change=on_select>
                    <option value="" selected=move || active_panel.get().is_none()>
                        "Select an integration"
                    </option>
                    {IntegrationKind::ALL
                        .into_iter()
                        .map(|kind| {
                            view! {
                                <option
                                    value=kind.display_name()
                                    selected=move || active_panel.get() == Some(kind)
                                >
                                    {kind.display_name()}
                                </option>
                            }
                        })
                        .collect_view()}
                </select>
            </div>
        </section>

        {move || {
            active_panel
                .get()
                .map(|kind| {
                    view! {
                        <AuthorizationPanel
                            kind=kind
                            identity=identity
                            params=params
                            on_authorized=on_authorized
                        />
                    }
                })
        }}

        {move || {
            data_view
                .get()
                .map(|params| {
                    view! { <DataForm kind=params.kind credentials=params.credentials/> }
                })
        }}
    }
}
