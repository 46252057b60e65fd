//! Browser APIs used by the components.
//!
//! Only the hydrated build talks to the browser; the server build gets
//! no-op versions so components compile unchanged for SSR.

/// How often an authorization popup is checked for being closed.
pub const POPUP_POLL_INTERVAL_MS: u64 = 200;

/// Shows a blocking alert.
#[cfg(feature = "hydrate")]
pub fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(message);
    }
}

#[cfg(not(feature = "hydrate"))]
pub fn alert(_message: &str) {}

/// Opens `url` in a popup named `name` and runs `on_closed` once the user
/// closes it.
///
/// Returns `false` if the popup could not be opened (e.g. blocked), in
/// which case `on_closed` never runs.
#[cfg(feature = "hydrate")]
pub fn open_popup_until_closed(url: &str, name: &str, on_closed: impl Fn() + 'static) -> bool {
    use leptos::leptos_dom::helpers::{IntervalHandle, set_interval_with_handle};
    use std::cell::Cell;
    use std::rc::Rc;
    use std::time::Duration;

    let Some(window) = web_sys::window() else {
        return false;
    };
    let popup = match window.open_with_url_and_target_and_features(url, name, "width=600,height=600")
    {
        Ok(Some(popup)) => popup,
        _ => return false,
    };

    let handle: Rc<Cell<Option<IntervalHandle>>> = Rc::new(Cell::new(None));
    let tick_handle = Rc::clone(&handle);
    let watched = popup.clone();
    let interval = set_interval_with_handle(
        move || {
            if watched.closed().unwrap_or(true)
                && let Some(interval) = tick_handle.take()
            {
                interval.clear();
                on_closed();
            }
        },
        Duration::from_millis(POPUP_POLL_INTERVAL_MS),
    );

    match interval {
        Ok(interval) => {
            handle.set(Some(interval));
            true
        }
        Err(_) => {
            let _ = popup.close();
            false
        }
    }
}

#[cfg(not(feature = "hydrate"))]
pub fn open_popup_until_closed(_url: &str, _name: &str, _on_closed: impl Fn() + 'static) -> bool {
    false
}
