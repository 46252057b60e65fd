//! Data loader for a connected integration.

use super::server::load_integration_data;
use crate::browser;
use crate::error::{LOAD_FAILED, user_message};
use crate::state::DataLoaderState;
use copper_kite_core::{Credentials, IntegrationKind, LoadedItem};
use leptos::prelude::*;
use leptos::task::spawn_local;

/// Loads and displays the records of `kind` using `credentials`.
#[component]
pub fn DataForm(kind: IntegrationKind, credentials: Credentials) -> impl IntoView {
    let state = RwSignal::new(DataLoaderState::default());
    let credentials_json = StoredValue::new(credentials.to_json_string());
    // Only the loaded items drive the grid, not the loading flag.
    let loaded = Memo::new(move |_| {
        state.with(|s| s.summary(kind).zip(s.loaded().map(<[LoadedItem]>::to_vec)))
    });

    let on_load = move |_| {
        let mut started = false;
        state.update(|s| started = s.begin_load());
        if !started {
            return;
        }

        let credentials_json = credentials_json.get_value();
        spawn_local(async move {
            let outcome = load_integration_data(kind.display_name().to_string(), credentials_json)
                .await
                .map_err(|e| user_message(&e, LOAD_FAILED));

            let mut failure = None;
            state.update(|s| failure = s.finish_load(outcome));
            if let Some(message) = failure {
                browser::alert(&message);
            }
        });
    };

    view! {
        <section class="card data-form">
            <h2>{format!("{kind} Data Loader")}</h2>
            <div class="button-row">
                <button
                    class="primary-btn"
                    on:click=on_load
                    disabled=move || !state.with(|s| s.can_load())
                >
                    {move || state.with(|s| s.load_label())}
                </button>
                <button
                    class="secondary-btn"
                    on:click=move |_| state.update(|s| s.clear())
                    disabled=move || !state.with(|s| s.can_clear())
                >
                    "Clear Data"
                </button>
            </div>

            {move || {
                loaded
                    .get()
                    .map(|(summary, items)| {
                        view! {
                            <hr/>
                            <h3 class="load-summary">{summary}</h3>
                            <div class="item-grid">
                                {items
                                    .into_iter()
                                    .map(|item| view! { <ItemCard item=item/> })
                                    .collect_view()}
                            </div>
                        }
                    })
            }}
        </section>
    }
}

/// A single loaded record.
#[component]
fn ItemCard(item: LoadedItem) -> impl IntoView {
    let source = item
        .display_source()
        .map(|source| view! { <p class="item-meta">"Source: " {source.to_string()}</p> });
    let link = item.link().map(|url| {
        view! {
            <a class="item-link" href=url.to_string() target="_blank" rel="noopener noreferrer">
                "Open"
            </a>
        }
    });

    view! {
        <div class="item-card">
            <p class="item-id">{item.id.clone()}</p>
            <h4 class="item-name">{item.display_name().to_string()}</h4>
            <p class="item-meta">"Type: " <strong>{item.display_type().to_string()}</strong></p>
            <p class="item-meta">"Created: " {item.display_created().to_string()}</p>
            <p class="item-meta">"Updated: " {item.display_updated().to_string()}</p>
            {source}
            {link}
        </div>
    }
}
