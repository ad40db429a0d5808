use js_sys::{Object, Reflect};
use wasm_bindgen::prelude::*;

use super::Notifier;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = weui, js_name = topTips)]
    fn weui_top_tips(message: &str);

    #[wasm_bindgen(js_namespace = weui, js_name = toast)]
    fn weui_toast(message: &str, options: &JsValue);
}

/// Notifications through the page's `weui` global.
#[derive(Debug, Clone, Copy, Default)]
pub struct WeuiNotifier;

impl Notifier for WeuiNotifier {
    fn top_tips(&self, message: &str) {
        weui_top_tips(message);
    }

    fn toast(&self, message: &str, on_close: Box<dyn FnOnce()>) {
        let options = Object::new();
        let callback = Closure::once_into_js(move || on_close());
        if let Err(err) = Reflect::set(&options, &JsValue::from_str("callback"), &callback) {
            log::warn!("toast callback not attached: {:?}", err);
        }
        weui_toast(message, &options);
    }
}
