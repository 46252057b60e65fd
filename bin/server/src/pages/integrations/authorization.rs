//! Authorization panel shown for the selected integration.
//!
//! The flow is the same for every integration: ask the backend for the
//! provider URL, open it in a popup, wait for the popup to close, then
//! collect the stored credentials and hand them to the parent.

use super::server::{authorize_integration, fetch_integration_credentials};
use crate::browser;
use crate::error::{AUTHORIZATION_FAILED, POPUP_BLOCKED, user_message};
use crate::state::PanelStatus;
use copper_kite_core::{Identity, IntegrationKind, IntegrationParams};
use leptos::prelude::*;
use leptos::task::spawn_local;

/// Connect button and status for one integration.
#[component]
pub fn AuthorizationPanel(
    kind: IntegrationKind,
    identity: Signal<Identity>,
    params: Signal<Option<IntegrationParams>>,
    on_authorized: Callback<IntegrationParams>,
) -> impl IntoView {
    let (connecting, set_connecting) = signal(false);
    let status = Memo::new(move |_| {
        params.with(|p| PanelStatus::resolve(kind, connecting.get(), p.as_ref()))
    });

    let collect = move |user: String, org: String| {
        spawn_local(async move {
            match fetch_integration_credentials(kind.display_name().to_string(), user, org).await
            {
                Ok(credentials) => {
                    on_authorized.run(IntegrationParams::new(kind, credentials));
                }
                Err(e) => {
                    browser::alert(&user_message(&e, AUTHORIZATION_FAILED));
                }
            }
            set_connecting.set(false);
        });
    };

    let on_connect = move |_| {
        if !status.get_untracked().can_connect() {
            return;
        }
        set_connecting.set(true);
        let Identity { user, org } = identity.get_untracked();

        spawn_local(async move {
            let url = match authorize_integration(
                kind.display_name().to_string(),
                user.clone(),
                org.clone(),
            )
            .await
            {
                Ok(url) => url,
                Err(e) => {
                    browser::alert(&user_message(&e, AUTHORIZATION_FAILED));
                    set_connecting.set(false);
                    return;
                }
            };

            let opened = browser::open_popup_until_closed(&url, kind.popup_name(), move || {
                collect(user.clone(), org.clone());
            });
            if !opened {
                browser::alert(POPUP_BLOCKED);
                set_connecting.set(false);
            }
        });
    };

    view! {
        <section class="card authorization-panel">
            <h2>{format!("{kind} Integration")}</h2>
            <p class="help">
                {move || match status.get() {
                    PanelStatus::Connected => format!("{kind} is connected. Load its data below."),
                    PanelStatus::Connecting => format!("Finish signing in to {kind} in the popup window."),
                    PanelStatus::Disconnected => format!("Authorize access to your {kind} workspace."),
                }}
            </p>
            <button
                class=move || {
                    if status.get() == PanelStatus::Connected {
                        "primary-btn connected"
                    } else {
                        "primary-btn"
                    }
                }
                on:click=on_connect
                disabled=move || !status.get().can_connect()
            >
                {move || status.get().button_label(kind)}
            </button>
        </section>
    }
}
