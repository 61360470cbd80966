//! Formatting helpers: color codes, escaping, tooltips, time of day.

use js_sys::{Date, Function, Object, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use wt_api_types::{Timestamp, WishColor};

/// Color name → CSS color code, white for names outside the palette.
pub fn color_code(name: &str) -> &'static str {
    WishColor::from(name).code()
}

/// Escape text for insertion into markup.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

const TOOLTIP_MAX_CHARS: usize = 50;
const TOOLTIP_KEEP_CHARS: usize = 47;

/// Ornament hover text: long wishes are cut to 47 characters plus `...`.
pub fn tooltip_text(text: &str) -> String {
    if text.chars().count() > TOOLTIP_MAX_CHARS {
        let head: String = text.chars().take(TOOLTIP_KEEP_CHARS).collect();
        format!("{head}...")
    } else {
        text.to_owned()
    }
}

/// Short localized time of day (`hour: 2-digit, minute: 2-digit`).
///
/// Browser only: goes through `Date.prototype.toLocaleTimeString`.
pub fn format_time(created_at: &Timestamp, locale: &str) -> String {
    let date = match created_at {
        Timestamp::Text(raw) => Date::new(&JsValue::from_str(raw)),
        numeric => Date::new(&JsValue::from_f64(
            numeric.as_epoch_millis().unwrap_or_default(),
        )),
    };

    let options = Object::new();
    let _ = Reflect::set(&options, &JsValue::from_str("hour"), &JsValue::from_str("2-digit"));
    let _ = Reflect::set(&options, &JsValue::from_str("minute"), &JsValue::from_str("2-digit"));

    Reflect::get(&date, &JsValue::from_str("toLocaleTimeString"))
        .ok()
        .and_then(|f| f.dyn_into::<Function>().ok())
        .and_then(|f| f.call2(&date, &JsValue::from_str(locale), &options).ok())
        .and_then(|v| v.as_string())
        .unwrap_or_else(|| String::from(date.to_locale_time_string(locale)))
}
