//! Wish Tree board, compiled to WASM.
//!
//! Visitors hang wishes on a decorated tree, read the latest ones, and pull a
//! cracker for a random prediction. The browser pieces (`dom`, `dom_view`,
//! `events`, `api::HttpWishApi`) sit around a `WishBoard` that only talks to
//! the `WishApi` and `WishView` traits, so its behaviour is tested natively.

pub mod api;
pub mod board;
pub mod config;
pub mod dom;
pub mod dom_view;
pub mod error;
pub mod events;
pub mod format;
pub mod markup;
pub mod ornament;
pub mod snow;
pub mod state;
pub mod view;

use std::rc::Rc;

use gloo_timers::callback::Interval;
use wasm_bindgen::prelude::*;

use crate::api::HttpWishApi;
use crate::board::{Host, WishBoard};
use crate::config::BoardConfig;
use crate::dom_view::DomView;

/// The board as it runs on the page.
pub type PageBoard = WishBoard<HttpWishApi, DomView>;

/// WASM entry point – called automatically when the module is instantiated.
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    // Improve panic messages in the browser console
    console_error_panic_hook::set_once();

    init()
}

fn init() -> Result<(), JsValue> {
    let els = dom::Elements::bind()?;
    let config = BoardConfig::from_document();

    let view = DomView::new(els.clone(), &config.locale);
    let api = HttpWishApi::new(&config.api_base);
    let board = WishBoard::new(api, view, Host::browser(), config.recent_limit);

    board.start();
    events::bind_events(&els, &board)?;

    // Counter refresh runs for the life of the page.
    let ticker = Rc::clone(&board);
    Interval::new(config.stats_refresh_ms, move || ticker.spawn_load_stats()).forget();

    gloo_console::log!(format!("wish board ready, api at {}", config.api_base));
    Ok(())
}
