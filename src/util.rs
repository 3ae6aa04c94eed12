// Small helpers shared by the components

use wasm_bindgen::JsValue;

pub fn format_zoom(scale: f64) -> String {
    format!("{}%", (scale * 100.0).round() as i64)
}

pub fn clog(msg: &str) {
    web_sys::console::log_1(&JsValue::from_str(msg));
}

/// Seed for a session without a configured one.
pub fn random_seed() -> u64 {
    let hi = (js_sys::Math::random() * u32::MAX as f64) as u64;
    let lo = js_sys::Date::now() as u64;
    (hi << 32) ^ lo
}
