//! Board controller: the four backend operations and what each does to the page.
//!
//! Loads are independent. Nothing is deduplicated or cancelled, so two
//! overlapping list loads both land and the later one to resolve wins.
//! Submitting and pulling a prediction run one at a time: a trigger that
//! arrives while the same action is in flight is ignored.

use std::cell::Cell;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;

use wt_api_types::validate_wish_text;

use crate::api::WishApi;
use crate::ornament::{NewOrnament, place_ornaments};
use crate::snow::{SNOWFLAKE_COUNT, snowfall};
use crate::state::WishState;
use crate::view::{Busy, Control, MessageKind, SoundCue, WishView};

pub const WISH_ADDED_MESSAGE: &str = "Ornament added to the tree!";
pub const ADD_FAILED_MESSAGE: &str = "Could not add the wish";
pub const CONNECTION_FAILED_MESSAGE: &str = "Could not reach the server";
pub const LOAD_FAILED_MESSAGE: &str = "Could not load wishes";
pub const PREDICTION_FAILED_MESSAGE: &str = "Could not get a prediction";

pub type LocalTask = Pin<Box<dyn Future<Output = ()>>>;

/// Environment hooks: where background work runs and where randomness comes from.
pub struct Host {
    spawn: Box<dyn Fn(LocalTask)>,
    random: Box<dyn Fn() -> f64>,
}

impl Host {
    pub fn new(spawn: impl Fn(LocalTask) + 'static, random: impl Fn() -> f64 + 'static) -> Self {
        Self {
            spawn: Box::new(spawn),
            random: Box::new(random),
        }
    }

    pub fn browser() -> Self {
        Self::new(
            |task| wasm_bindgen_futures::spawn_local(task),
            js_sys::Math::random,
        )
    }

    fn spawn(&self, task: impl Future<Output = ()> + 'static) {
        (self.spawn)(Box::pin(task));
    }

    fn random(&self) -> f64 {
        (self.random)()
    }
}

/// Claim on a one-at-a-time action; released on drop.
struct InFlight<'a>(&'a Cell<bool>);

impl<'a> InFlight<'a> {
    fn claim(flag: &'a Cell<bool>) -> Option<Self> {
        if flag.replace(true) {
            None
        } else {
            Some(Self(flag))
        }
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

pub struct WishBoard<A, V> {
    api: A,
    view: V,
    state: WishState,
    host: Host,
    recent_limit: usize,
    submitting: Cell<bool>,
    pulling: Cell<bool>,
}

impl<A, V> WishBoard<A, V>
where
    A: WishApi + 'static,
    V: WishView + 'static,
{
    pub fn new(api: A, view: V, host: Host, recent_limit: usize) -> Rc<Self> {
        Rc::new(Self {
            api,
            view,
            state: WishState::new(),
            host,
            recent_limit,
            submitting: Cell::new(false),
            pulling: Cell::new(false),
        })
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn state(&self) -> &WishState {
        &self.state
    }

    /// Initial load plus the snow. Runs once per page.
    pub fn start(self: &Rc<Self>) {
        self.spawn_refresh();
        let flakes = snowfall(SNOWFLAKE_COUNT, || self.host.random());
        self.view.start_snow(&flakes);
    }

    pub fn spawn_refresh(self: &Rc<Self>) {
        self.spawn_load_wishes();
        self.spawn_load_stats();
    }

    pub fn spawn_load_wishes(self: &Rc<Self>) {
        let board = Rc::clone(self);
        self.host.spawn(async move { board.load_wishes().await });
    }

    pub fn spawn_load_stats(self: &Rc<Self>) {
        let board = Rc::clone(self);
        self.host.spawn(async move { board.load_stats().await });
    }

    pub fn spawn_submit(self: &Rc<Self>) {
        let board = Rc::clone(self);
        self.host.spawn(async move { board.submit_wish().await });
    }

    pub fn spawn_prediction(self: &Rc<Self>) {
        let board = Rc::clone(self);
        self.host.spawn(async move { board.pull_prediction().await });
    }

    pub async fn load_wishes(&self) {
        match self.api.recent_wishes(self.recent_limit).await {
            Ok(wishes) => {
                self.state.replace(wishes);
                self.render_snapshot();
            }
            Err(err) => {
                self.view.log_error("load wishes", &err);
                let text = err.user_message(LOAD_FAILED_MESSAGE, LOAD_FAILED_MESSAGE);
                self.view.show_message(&text, MessageKind::Error);
            }
        }
    }

    /// The counter is secondary: failures only reach the console.
    pub async fn load_stats(&self) {
        match self.api.stats().await {
            Ok(total) => self.view.set_wish_count(total),
            Err(err) => self.view.log_error("load stats", &err),
        }
    }

    pub async fn submit_wish(self: &Rc<Self>) {
        let Some(_claim) = InFlight::claim(&self.submitting) else {
            return;
        };
        let raw = self.view.wish_text();
        let text = match validate_wish_text(&raw) {
            Ok(text) => text.to_owned(),
            Err(err) => {
                self.view.show_message(&err.to_string(), MessageKind::Error);
                return;
            }
        };

        let _busy = Busy::hold(&self.view, Control::Submit);
        match self.api.add_wish(&text).await {
            Ok(added) => {
                self.view.reset_wish_input();
                self.view.set_char_count(0);

                let ornament =
                    NewOrnament::for_wish(&added.wish, self.host.random(), self.host.random());
                self.view.append_new_ornament(&ornament);

                self.spawn_refresh();

                let message = added
                    .message
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or_else(|| WISH_ADDED_MESSAGE.to_owned());
                self.view.show_message(&message, MessageKind::Success);
                self.view.play_sound(SoundCue::WishAdded);
            }
            Err(err) => {
                self.view.log_error("add wish", &err);
                let text = err.user_message(CONNECTION_FAILED_MESSAGE, ADD_FAILED_MESSAGE);
                self.view.show_message(&text, MessageKind::Error);
            }
        }
    }

    pub async fn pull_prediction(&self) {
        let Some(_claim) = InFlight::claim(&self.pulling) else {
            return;
        };
        let _busy = Busy::hold(&self.view, Control::Prediction);
        match self.api.random_prediction().await {
            Ok(prediction) => {
                self.view.show_prediction(&prediction);
                self.view.play_sound(SoundCue::CrackerPulled);
            }
            Err(err) => {
                self.view.log_error("pull prediction", &err);
                let text = err.user_message(PREDICTION_FAILED_MESSAGE, PREDICTION_FAILED_MESSAGE);
                self.view.show_message(&text, MessageKind::Error);
            }
        }
    }

    pub fn close_prediction(&self) {
        self.view.hide_prediction();
    }

    /// Counter shows the raw length, surrounding whitespace included.
    pub fn on_wish_input(&self) {
        let count = self.view.wish_text().chars().count();
        self.view.set_char_count(count);
    }

    fn render_snapshot(&self) {
        let wishes = self.state.snapshot();
        self.view.render_wish_list(&wishes);
        self.view.render_tree_ornaments(&place_ornaments(&wishes));
    }
}
