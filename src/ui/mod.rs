pub mod navigator;
pub use self::navigator::*;

pub mod weui;
pub use self::weui::*;

/// User-facing messages.
pub trait Notifier {
    /// Short non-blocking banner; the default error display.
    fn top_tips(&self, message: &str);
    /// Acknowledgeable message; `on_close` runs once it goes away.
    fn toast(&self, message: &str, on_close: Box<dyn FnOnce()>);
}

pub trait Navigator {
    fn navigate(&self, route: &str);
}
