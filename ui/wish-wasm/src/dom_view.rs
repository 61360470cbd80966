//! `WishView` for the real page.
//!
//! Every deferred transition is a `Timeout` owned here. Dropping a `Timeout`
//! cancels it, so clearing `ornament_tasks` on a re-render discards pending
//! work for ornaments that no longer exist, and storing a new message timer
//! cancels the previous one. Fired ornament timers are pruned whenever a new
//! one is scheduled.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use wasm_bindgen_futures::JsFuture;
use web_sys::{HtmlAudioElement, HtmlElement};
use wt_api_types::{Prediction, Wish};

use crate::dom::{self, Elements};
use crate::error::ApiError;
use crate::format::format_time;
use crate::markup::{NEW_ORNAMENT_ICON, ORNAMENT_ICON, ornament_color_class, wish_item_html};
use crate::ornament::{
    NEW_BADGE_MS, NEW_BADGE_TEXT, NewOrnament, OrnamentPlacement, POP_DELAY_MS, POP_END_TRANSFORM,
    POP_START_TRANSFORM, POP_TRANSITION, SETTLE_MS,
};
use crate::snow::Snowflake;
use crate::view::{Control, MESSAGE_CLEAR_MS, MessageKind, SoundCue, WishView};

const SPINNER_ICON: &str = r#"<i class="fas fa-spinner fa-spin"></i>"#;

const BADGE_STYLE: [(&str, &str); 11] = [
    ("position", "absolute"),
    ("top", "-25px"),
    ("left", "50%"),
    ("transform", "translateX(-50%)"),
    ("background", "rgba(255, 255, 255, 0.9)"),
    ("color", "#333"),
    ("padding", "2px 8px"),
    ("border-radius", "10px"),
    ("font-size", "10px"),
    ("white-space", "nowrap"),
    ("pointer-events", "none"),
];

/// A scheduled ornament transition and whether it has run yet.
struct OrnamentTask {
    fired: Rc<Cell<bool>>,
    _timer: Timeout,
}

pub struct DomView {
    els: Elements,
    locale: String,
    ornament_tasks: RefCell<Vec<OrnamentTask>>,
    message_clear: RefCell<Option<Timeout>>,
    idle_labels: RefCell<HashMap<Control, String>>,
}

impl DomView {
    pub fn new(els: Elements, locale: &str) -> Self {
        Self {
            els,
            locale: locale.to_owned(),
            ornament_tasks: RefCell::new(Vec::new()),
            message_clear: RefCell::new(None),
            idle_labels: RefCell::new(HashMap::new()),
        }
    }

    fn button(&self, control: Control) -> &web_sys::HtmlButtonElement {
        match control {
            Control::Submit => &self.els.add_wish_btn,
            Control::Prediction => &self.els.pull_cracker_btn,
        }
    }

    fn ball(&self, color_class: &str, icon: &str, tooltip: &str) -> Option<HtmlElement> {
        let ball = dom::create_html("div")?;
        ball.set_class_name(&format!("ball {color_class}"));
        ball.set_inner_html(icon);
        ball.set_title(tooltip);
        Some(ball)
    }

    fn schedule(&self, millis: u32, task: impl FnOnce() + 'static) {
        let fired = Rc::new(Cell::new(false));
        let mark = Rc::clone(&fired);
        let timer = Timeout::new(millis, move || {
            mark.set(true);
            task();
        });

        let mut tasks = self.ornament_tasks.borrow_mut();
        tasks.retain(|t| !t.fired.get());
        tasks.push(OrnamentTask {
            fired,
            _timer: timer,
        });
    }

    /// Ornament transitions scheduled but not yet run.
    pub fn pending_ornament_tasks(&self) -> usize {
        let mut tasks = self.ornament_tasks.borrow_mut();
        tasks.retain(|t| !t.fired.get());
        tasks.len()
    }
}

impl WishView for DomView {
    fn wish_text(&self) -> String {
        self.els.wish_text.value()
    }

    fn reset_wish_input(&self) {
        self.els.wish_text.set_value("");
    }

    fn set_char_count(&self, count: usize) {
        dom::set_text(&self.els.char_count, &count.to_string());
    }

    fn set_busy(&self, control: Control, busy: bool) {
        let button = self.button(control);
        let mut labels = self.idle_labels.borrow_mut();
        if busy {
            labels
                .entry(control)
                .or_insert_with(|| button.inner_html());
            button.set_inner_html(&format!("{SPINNER_ICON} {}", control.busy_label()));
        } else if let Some(label) = labels.remove(&control) {
            button.set_inner_html(&label);
        }
        button.set_disabled(busy);
    }

    fn render_wish_list(&self, wishes: &[Wish]) {
        let html: String = wishes
            .iter()
            .map(|wish| wish_item_html(wish, &format_time(&wish.created_at, &self.locale)))
            .collect();
        self.els.wishes_list.set_inner_html(&html);
    }

    fn render_tree_ornaments(&self, placements: &[OrnamentPlacement]) {
        self.ornament_tasks.borrow_mut().clear();
        self.els.balls_container.set_inner_html("");

        for placement in placements {
            let class = format!("{} new-ball", ornament_color_class(&placement.color));
            let Some(ball) = self.ball(&class, ORNAMENT_ICON, &placement.tooltip) else {
                continue;
            };
            dom::set_style(&ball, "top", &format!("{}%", placement.position.top));
            dom::set_style(&ball, "left", &format!("{}%", placement.position.left));
            dom::set_style(&ball, "transform", &placement.transform());
            dom::set_style(&ball, "animation-delay", &placement.animation_delay());
            let _ = self.els.balls_container.append_child(&ball);

            self.schedule(SETTLE_MS, move || dom::remove_class(&ball, "new-ball"));
        }
    }

    fn append_new_ornament(&self, ornament: &NewOrnament) {
        let class = ornament_color_class(&ornament.color);
        let Some(ball) = self.ball(&class, NEW_ORNAMENT_ICON, &ornament.tooltip) else {
            return;
        };
        dom::set_style(&ball, "top", &format!("{:.2}%", ornament.top));
        dom::set_style(&ball, "left", &format!("{:.2}%", ornament.left));
        dom::set_style(&ball, "transform", POP_START_TRANSFORM);
        let _ = self.els.balls_container.append_child(&ball);

        if let Some(badge) = dom::create_html("div") {
            badge.set_class_name("ball-message");
            badge.set_text_content(Some(NEW_BADGE_TEXT));
            for (property, value) in BADGE_STYLE {
                dom::set_style(&badge, property, value);
            }
            let _ = ball.append_child(&badge);
            self.schedule(NEW_BADGE_MS, move || badge.remove());
        }

        self.schedule(POP_DELAY_MS, move || {
            dom::set_style(&ball, "transition", POP_TRANSITION);
            dom::set_style(&ball, "transform", POP_END_TRANSFORM);
        });
    }

    fn show_prediction(&self, prediction: &Prediction) {
        dom::set_text(&self.els.prediction_text, &prediction.text);
        self.els.prediction_color.set_class_name("color-badge");
        dom::set_style(
            &self.els.prediction_color,
            "background-color",
            prediction.color.code(),
        );
        dom::remove_class(&self.els.prediction_box, "hidden");
    }

    fn hide_prediction(&self) {
        dom::add_class(&self.els.prediction_box, "hidden");
    }

    fn set_wish_count(&self, total: u64) {
        dom::set_text(&self.els.wish_count, &total.to_string());
    }

    fn show_message(&self, text: &str, kind: MessageKind) {
        let el = self.els.message.clone();
        dom::set_text(&el, text);
        el.set_class_name(&format!("message {}", kind.class()));

        let clear = Timeout::new(MESSAGE_CLEAR_MS, move || {
            el.set_text_content(Some(""));
            el.set_class_name("message");
        });
        *self.message_clear.borrow_mut() = Some(clear);
    }

    fn start_snow(&self, flakes: &[Snowflake]) {
        let Some(container) = &self.els.snowflakes else {
            return;
        };
        for flake in flakes {
            let Some(el) = dom::create_html("div") else {
                continue;
            };
            el.set_class_name("snowflake");
            let size = format!("{:.2}px", flake.size_px);
            dom::set_style(&el, "width", &size);
            dom::set_style(&el, "height", &size);
            dom::set_style(&el, "left", &format!("{:.2}vw", flake.left_vw));
            dom::set_style(&el, "top", &format!("{:.2}px", flake.top_px));
            dom::set_style(&el, "animation", &flake.animation());
            dom::set_style(&el, "opacity", &format!("{:.2}", flake.opacity));
            let _ = container.append_child(&el);
        }
    }

    fn play_sound(&self, cue: SoundCue) {
        let audio = match HtmlAudioElement::new_with_src(cue.url()) {
            Ok(audio) => audio,
            Err(e) => {
                gloo_console::log!("sound unavailable:", e);
                return;
            }
        };
        audio.set_volume(SoundCue::VOLUME);
        match audio.play() {
            Ok(promise) => wasm_bindgen_futures::spawn_local(async move {
                if JsFuture::from(promise).await.is_err() {
                    gloo_console::log!("sound autoplay blocked");
                }
            }),
            Err(e) => gloo_console::log!("sound playback failed:", e),
        }
    }

    fn log_error(&self, operation: &str, error: &ApiError) {
        gloo_console::error!(format!("{operation} failed: {error}"));
    }
}
