//! Ornament placement on the tree graphic.
//!
//! Slot `i` of `ORNAMENT_POSITIONS` always holds the `i`-th wish of the list;
//! wishes past the last slot appear only in the text list.

use wt_api_types::{Wish, WishColor};

use crate::format::tooltip_text;

/// Slot coordinates, in percent of the ornament region.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrnamentPosition {
    pub top: f64,
    pub left: f64,
}

const fn slot(top: f64, left: f64) -> OrnamentPosition {
    OrnamentPosition { top, left }
}

pub const ORNAMENT_POSITIONS: [OrnamentPosition; 14] = [
    slot(15.0, 50.0),
    slot(25.0, 40.0),
    slot(25.0, 60.0),
    slot(35.0, 35.0),
    slot(35.0, 65.0),
    slot(45.0, 45.0),
    slot(45.0, 55.0),
    slot(55.0, 30.0),
    slot(55.0, 70.0),
    slot(65.0, 50.0),
    slot(75.0, 40.0),
    slot(75.0, 60.0),
    slot(85.0, 35.0),
    slot(85.0, 65.0),
];

const ROTATION_STEP_DEG: u32 = 25;
const DELAY_STEP_MS: u32 = 100;

/// The entrance class is dropped this long after an ornament is placed.
pub const SETTLE_MS: u32 = 500;

/// Pause before the pop transition starts, so the zero-scale frame is painted.
pub const POP_DELAY_MS: u32 = 10;
pub const POP_TRANSITION: &str = "transform 0.5s cubic-bezier(0.68, -0.55, 0.27, 1.55)";
pub const POP_START_TRANSFORM: &str = "translate(-50%, -50%) scale(0)";
pub const POP_END_TRANSFORM: &str = "translate(-50%, -50%) scale(1) rotate(360deg)";

pub const NEW_BADGE_TEXT: &str = "New!";
pub const NEW_BADGE_MS: u32 = 2000;

const NEW_TOP_RANGE: (f64, f64) = (85.0, 10.0);
const NEW_LEFT_RANGE: (f64, f64) = (35.0, 30.0);

#[derive(Clone, Debug, PartialEq)]
pub struct OrnamentPlacement {
    pub slot: usize,
    pub position: OrnamentPosition,
    pub color: WishColor,
    pub rotation_deg: u32,
    pub delay_ms: u32,
    pub tooltip: String,
}

impl OrnamentPlacement {
    pub fn transform(&self) -> String {
        format!("translate(-50%, -50%) rotate({}deg)", self.rotation_deg)
    }

    pub fn animation_delay(&self) -> String {
        format!("{}ms", self.delay_ms)
    }
}

/// Lay the first wishes onto the fixed slots, in list order.
pub fn place_ornaments(wishes: &[Wish]) -> Vec<OrnamentPlacement> {
    wishes
        .iter()
        .zip(ORNAMENT_POSITIONS.iter())
        .enumerate()
        .map(|(index, (wish, position))| {
            let step = index as u32;
            OrnamentPlacement {
                slot: index,
                position: *position,
                color: wish.color.clone(),
                rotation_deg: step * ROTATION_STEP_DEG,
                delay_ms: step * DELAY_STEP_MS,
                tooltip: tooltip_text(&wish.text),
            }
        })
        .collect()
}

/// The ornament shown right after a successful submission, before the list
/// is re-fetched.
#[derive(Clone, Debug, PartialEq)]
pub struct NewOrnament {
    pub top: f64,
    pub left: f64,
    pub color: WishColor,
    pub tooltip: String,
}

impl NewOrnament {
    /// `top_unit` and `left_unit` are uniform samples from `[0, 1)`.
    pub fn for_wish(wish: &Wish, top_unit: f64, left_unit: f64) -> Self {
        let unit = |v: f64| v.clamp(0.0, 1.0);
        Self {
            top: NEW_TOP_RANGE.0 + unit(top_unit) * NEW_TOP_RANGE.1,
            left: NEW_LEFT_RANGE.0 + unit(left_unit) * NEW_LEFT_RANGE.1,
            color: wish.color.clone(),
            tooltip: wish.text.clone(),
        }
    }
}
