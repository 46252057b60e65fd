#[cfg(feature = "ssr")]
#[tokio::main]
async fn main() {
    use axum::{Extension, Router};
    use copper_kite_integration::BackendClient;
    use copper_kite_server::{app::App, config::ServerConfig, server_helpers::SharedBackend};
    use leptos::prelude::*;
    use leptos_axum::{LeptosRoutes, generate_route_list};
    use tower_http::services::ServeDir;
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration from environment
    let config = ServerConfig::from_env().expect("failed to load configuration");
    tracing::info!("Loaded configuration");

    let backend = BackendClient::new(&config.backend).expect("failed to build backend client");
    tracing::info!(
        base_url = %backend.base_url(),
        timeout_seconds = config.backend.timeout_seconds,
        "Configured integration backend"
    );

    let conf = get_configuration(None).expect("failed to get leptos configuration");
    let leptos_options = conf.leptos_options;
    let addr = leptos_options.site_addr;
    let routes = generate_route_list(App);

    let app = Router::new()
        .leptos_routes(&leptos_options, routes, {
            let leptos_options = leptos_options.clone();
            move || shell(leptos_options.clone())
        })
        .fallback(leptos_axum::file_and_error_handler(shell))
        .nest_service("/pkg", ServeDir::new("target/site/pkg"))
        // Backend client and identity defaults are request extensions for server functions
        .layer(Extension(SharedBackend::new(backend)))
        .layer(Extension(config.identity))
        .with_state(leptos_options);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind to address");

    tracing::info!("listening on http://{}", addr);

    axum::serve(listener, app.into_make_service())
        .await
        .expect("server error");
}

#[cfg(feature = "ssr")]
fn shell(options: leptos::prelude::LeptosOptions) -> impl leptos::prelude::IntoView {
    use copper_kite_server::app::App;
    use leptos::prelude::*;
    use leptos_meta::*;

    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <link rel="stylesheet" href="/pkg/copper-kite.css"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

#[cfg(not(feature = "ssr"))]
fn main() {
    // This main function is only used for WASM builds
    // The actual hydration happens in lib.rs
}
