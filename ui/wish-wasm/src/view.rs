//! The page surface the board draws on.
//!
//! `WishBoard` only ever talks to a `WishView`; `DomView` is the browser
//! implementation and tests use a recording one.

use wt_api_types::{Prediction, Wish};

use crate::error::ApiError;
use crate::ornament::{NewOrnament, OrnamentPlacement};
use crate::snow::Snowflake;

pub const MESSAGE_CLEAR_MS: u32 = 5000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Success,
    Error,
}

impl MessageKind {
    pub fn class(self) -> &'static str {
        match self {
            MessageKind::Info => "info",
            MessageKind::Success => "success",
            MessageKind::Error => "error",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SoundCue {
    WishAdded,
    CrackerPulled,
}

impl SoundCue {
    pub const VOLUME: f64 = 0.3;

    pub fn url(self) -> &'static str {
        match self {
            SoundCue::WishAdded => {
                "https://assets.mixkit.co/sfx/preview/mixkit-magic-sparkles-300.mp3"
            }
            SoundCue::CrackerPulled => {
                "https://assets.mixkit.co/sfx/preview/mixkit-party-horn-sound-2927.mp3"
            }
        }
    }
}

/// Controls that are locked while their request is in flight.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Control {
    Submit,
    Prediction,
}

impl Control {
    pub fn busy_label(self) -> &'static str {
        match self {
            Control::Submit => "Adding...",
            Control::Prediction => "Pulling...",
        }
    }
}

pub trait WishView {
    /// Raw, untrimmed contents of the wish input.
    fn wish_text(&self) -> String;
    fn reset_wish_input(&self);
    fn set_char_count(&self, count: usize);
    fn set_busy(&self, control: Control, busy: bool);

    fn render_wish_list(&self, wishes: &[Wish]);
    fn render_tree_ornaments(&self, placements: &[OrnamentPlacement]);
    fn append_new_ornament(&self, ornament: &NewOrnament);

    fn show_prediction(&self, prediction: &Prediction);
    fn hide_prediction(&self);
    fn set_wish_count(&self, total: u64);

    fn show_message(&self, text: &str, kind: MessageKind);
    fn start_snow(&self, flakes: &[Snowflake]);
    fn play_sound(&self, cue: SoundCue);

    /// Console-only diagnostics.
    fn log_error(&self, operation: &str, error: &ApiError);
}

/// Holds a control in its busy state; dropping the guard restores it, on
/// every exit path.
pub struct Busy<'a, V: WishView + ?Sized> {
    view: &'a V,
    control: Control,
}

impl<'a, V: WishView + ?Sized> Busy<'a, V> {
    pub fn hold(view: &'a V, control: Control) -> Self {
        view.set_busy(control, true);
        Self { view, control }
    }
}

impl<V: WishView + ?Sized> Drop for Busy<'_, V> {
    fn drop(&mut self) {
        self.view.set_busy(self.control, false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_kinds_map_to_css_classes() {
        assert_eq!(MessageKind::Info.class(), "info");
        assert_eq!(MessageKind::Success.class(), "success");
        assert_eq!(MessageKind::Error.class(), "error");
    }

    #[test]
    fn sound_cues_have_distinct_sources() {
        assert_ne!(SoundCue::WishAdded.url(), SoundCue::CrackerPulled.url());
        assert!(SoundCue::CrackerPulled.url().ends_with(".mp3"));
    }

    #[test]
    fn busy_labels() {
        assert_eq!(Control::Submit.busy_label(), "Adding...");
        assert_eq!(Control::Prediction.busy_label(), "Pulling...");
    }
}
