use super::Navigator;

/// Moves the current page with `window.location`.
#[derive(Debug, Clone, Copy, Default)]
pub struct WindowNavigator;

impl Navigator for WindowNavigator {
    fn navigate(&self, route: &str) {
        if let Err(err) = gloo::utils::window().location().set_href(route) {
            log::error!("failed to navigate to {}: {:?}", route, err);
        }
    }
}

impl WindowNavigator {
    pub fn current_path() -> String {
        gloo::utils::window()
            .location()
            .pathname()
            .unwrap_or_default()
    }
}
