//! Markup strings for the list region and ornaments.

use wt_api_types::{Wish, WishColor};

use crate::format::escape_html;

pub const ORNAMENT_ICON: &str = r#"<i class="fas fa-star"></i>"#;
pub const NEW_ORNAMENT_ICON: &str = r#"<i class="fas fa-heart"></i>"#;

/// One entry of the wish list. `time` is the already formatted time of day.
pub fn wish_item_html(wish: &Wish, time: &str) -> String {
    format!(
        r#"<div class="wish-item"><div class="wish-text">{}</div><div class="wish-meta"><span class="wish-color"><i class="fas fa-circle" style="color: {}"></i> {}</span><span class="wish-time">{}</span></div></div>"#,
        escape_html(&wish.text),
        wish.color.code(),
        escape_html(wish.color.name()),
        escape_html(time),
    )
}

/// CSS class carrying the ornament color. Names outside the palette share one class.
pub fn ornament_color_class(color: &WishColor) -> String {
    match color {
        WishColor::Other(_) => "ball-other".to_owned(),
        named => format!("ball-{}", named.name()),
    }
}
