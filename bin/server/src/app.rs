//! Main Leptos application component and routing.

use crate::pages::IntegrationsPage;
use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::{
    components::{Route, Router, Routes},
    path,
};

/// The main application component.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text="copper-kite"/>
        <Router>
            <Header/>
            <main class="container">
                <Routes fallback=|| "Page not found.".into_view()>
                    <Route path=path!("/") view=IntegrationsPage/>
                </Routes>
            </main>
        </Router>
    }
}

/// Header component.
#[component]
fn Header() -> impl IntoView {
    view! {
        <header class="header">
            <div class="header-left">
                <a href="/" class="logo">"copper-kite"</a>
            </div>
        </header>
    }
}
