//! DOM element bindings.
//!
//! All board elements are resolved once at startup. A missing required
//! element aborts start-up with an error naming the id.

use wasm_bindgen::prelude::*;
use web_sys::{Element, HtmlButtonElement, HtmlElement, HtmlTextAreaElement};

// ── Helpers ──

pub fn by_id(id: &str) -> Option<Element> {
    gloo_utils::document().get_element_by_id(id)
}

pub fn by_id_typed<T: JsCast>(id: &str) -> Option<T> {
    by_id(id).and_then(|e| e.dyn_into::<T>().ok())
}

pub fn query(selector: &str) -> Option<Element> {
    gloo_utils::document().query_selector(selector).ok()?
}

pub fn create_html(tag: &str) -> Option<HtmlElement> {
    gloo_utils::document()
        .create_element(tag)
        .ok()
        .and_then(|e| e.dyn_into::<HtmlElement>().ok())
}

pub fn set_text(el: &Element, text: &str) {
    el.set_text_content(Some(text));
}

pub fn set_style(el: &HtmlElement, property: &str, value: &str) {
    let _ = el.style().set_property(property, value);
}

pub fn add_class(el: &Element, cls: &str) {
    let _ = el.class_list().add_1(cls);
}

pub fn remove_class(el: &Element, cls: &str) {
    let _ = el.class_list().remove_1(cls);
}

// ── Elements struct ──

/// Element references used by the board.
/// Clone-friendly (all inner types are reference-counted via JS GC).
#[derive(Clone)]
pub struct Elements {
    // Wish form
    pub wish_text: HtmlTextAreaElement,
    pub char_count: Element,
    pub add_wish_btn: HtmlButtonElement,

    // Wish list and tree
    pub wishes_list: Element,
    pub balls_container: Element,
    pub refresh_wishes: HtmlElement,

    // Cracker
    pub pull_cracker_btn: HtmlButtonElement,
    pub prediction_box: Element,
    pub prediction_text: Element,
    pub prediction_color: HtmlElement,
    pub close_prediction: HtmlElement,

    // Status
    pub message: Element,
    pub wish_count: Element,

    /// Optional; the page just has no snow without it.
    pub snowflakes: Option<Element>,
}

macro_rules! get_el {
    ($id:expr) => {
        by_id($id).ok_or_else(|| JsValue::from_str(&format!("missing element #{}", $id)))?
    };
}

macro_rules! get_typed {
    ($ty:ty, $id:expr) => {
        by_id_typed::<$ty>($id).ok_or_else(|| {
            JsValue::from_str(&format!(
                "missing {} #{}",
                stringify!($ty),
                $id
            ))
        })?
    };
}

impl Elements {
    /// Resolve all DOM references. Call once the document is parsed.
    pub fn bind() -> Result<Elements, JsValue> {
        Ok(Elements {
            wish_text: get_typed!(HtmlTextAreaElement, "wish-text"),
            char_count: get_el!("char-count"),
            add_wish_btn: get_typed!(HtmlButtonElement, "add-wish-btn"),

            wishes_list: get_el!("wishes-list"),
            balls_container: get_el!("balls-container"),
            refresh_wishes: get_typed!(HtmlElement, "refresh-wishes"),

            pull_cracker_btn: get_typed!(HtmlButtonElement, "pull-cracker-btn"),
            prediction_box: get_el!("prediction-box"),
            prediction_text: get_el!("prediction-text"),
            prediction_color: get_typed!(HtmlElement, "prediction-color"),
            close_prediction: get_typed!(HtmlElement, "close-prediction"),

            message: get_el!("message"),
            wish_count: get_el!("wish-count"),

            snowflakes: query(".snowflakes"),
        })
    }
}
