//! Event binding.
//!
//! Wires the page controls to the board. Async work is handed to the board's
//! `spawn_*` helpers; synchronous handlers call straight through.

use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Event, KeyboardEvent, MouseEvent};

use crate::PageBoard;
use crate::dom::Elements;

/// Attach a handler that gets its own clone of the board.
macro_rules! listen {
    ($target:expr, $event:literal, $board:expr, |$b:ident, $e:ident: $ty:ty| $body:block) => {{
        let $b = Rc::clone($board);
        let cb = Closure::wrap(Box::new(move |$e: $ty| $body) as Box<dyn FnMut($ty)>);
        $target.add_event_listener_with_callback($event, cb.as_ref().unchecked_ref())?;
        cb.forget();
    }};
}

/// Bind all board listeners. Call once after init.
pub fn bind_events(els: &Elements, board: &Rc<PageBoard>) -> Result<(), JsValue> {
    // ── Wish form ──
    listen!(els.add_wish_btn, "click", board, |board, _event: MouseEvent| {
        board.spawn_submit();
    });
    listen!(els.wish_text, "keydown", board, |board, event: KeyboardEvent| {
        if event.ctrl_key() && event.key() == "Enter" {
            board.spawn_submit();
        }
    });
    listen!(els.wish_text, "input", board, |board, _event: Event| {
        board.on_wish_input();
    });

    // ── Cracker ──
    listen!(els.pull_cracker_btn, "click", board, |board, _event: MouseEvent| {
        board.spawn_prediction();
    });
    listen!(els.close_prediction, "click", board, |board, _event: MouseEvent| {
        board.close_prediction();
    });

    // ── List ──
    listen!(els.refresh_wishes, "click", board, |board, _event: MouseEvent| {
        board.spawn_load_wishes();
    });

    Ok(())
}
