use serde::{Deserialize, Serialize};
use std::fmt;

/// Longest accepted wish, counted in characters after trimming.
pub const MAX_WISH_CHARS: usize = 200;

/// Number of wishes the board asks for when it (re)loads the list.
pub const DEFAULT_RECENT_LIMIT: usize = 20;

/// Ornament color tag. Names outside the palette are kept verbatim so a newer
/// backend cannot break decoding of older clients.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum WishColor {
    Red,
    Blue,
    Gold,
    Silver,
    Green,
    Purple,
    Other(String),
}

impl WishColor {
    pub const PALETTE: [WishColor; 6] = [
        WishColor::Red,
        WishColor::Blue,
        WishColor::Gold,
        WishColor::Silver,
        WishColor::Green,
        WishColor::Purple,
    ];

    pub fn name(&self) -> &str {
        match self {
            WishColor::Red => "red",
            WishColor::Blue => "blue",
            WishColor::Gold => "gold",
            WishColor::Silver => "silver",
            WishColor::Green => "green",
            WishColor::Purple => "purple",
            WishColor::Other(name) => name,
        }
    }

    /// Display color code; unknown names render white.
    pub fn code(&self) -> &'static str {
        match self {
            WishColor::Red => "#ff3333",
            WishColor::Blue => "#3399ff",
            WishColor::Gold => "#ffcc00",
            WishColor::Silver => "#cccccc",
            WishColor::Green => "#33cc33",
            WishColor::Purple => "#cc33ff",
            WishColor::Other(_) => "#ffffff",
        }
    }
}

impl From<String> for WishColor {
    fn from(name: String) -> Self {
        match name.as_str() {
            "red" => WishColor::Red,
            "blue" => WishColor::Blue,
            "gold" => WishColor::Gold,
            "silver" => WishColor::Silver,
            "green" => WishColor::Green,
            "purple" => WishColor::Purple,
            _ => WishColor::Other(name),
        }
    }
}

impl From<&str> for WishColor {
    fn from(name: &str) -> Self {
        WishColor::from(name.to_owned())
    }
}

impl From<WishColor> for String {
    fn from(color: WishColor) -> Self {
        match color {
            WishColor::Other(name) => name,
            named => named.name().to_owned(),
        }
    }
}

impl fmt::Display for WishColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Creation time as sent by the backend: epoch milliseconds (whole or
/// fractional), or a date string (e.g. an SQL `CURRENT_TIMESTAMP`) that the
/// browser parses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Timestamp {
    EpochMillis(i64),
    FractionalMillis(f64),
    Text(String),
}

impl Timestamp {
    /// Milliseconds since the epoch, when the timestamp is numeric.
    pub fn as_epoch_millis(&self) -> Option<f64> {
        match self {
            Timestamp::EpochMillis(ms) => Some(*ms as f64),
            Timestamp::FractionalMillis(ms) => Some(*ms),
            Timestamp::Text(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wish {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub text: String,
    pub color: WishColor,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prediction {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub text: String,
    pub color: WishColor,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddWishRequest {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecentWishesQuery {
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecentWishesResponse {
    pub wishes: Vec<Wish>,
    #[serde(default)]
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsResponse {
    pub total_wishes: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddWishResponse {
    pub wish: Wish,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionResponse {
    pub prediction: Prediction,
}

/// Every `/api` body carries a boolean `success` next to its payload fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(flatten)]
    pub payload: T,
}

impl<T> Envelope<T> {
    pub fn ok(payload: T) -> Self {
        Self {
            success: true,
            payload,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WishTextError {
    #[error("Enter the text of your wish")]
    Empty,
    #[error("Wish is too long (max {max} characters)", max = MAX_WISH_CHARS)]
    TooLong { chars: usize },
}

/// Trim a raw wish and check it against the length limits.
pub fn validate_wish_text(raw: &str) -> Result<&str, WishTextError> {
    let text = raw.trim();
    if text.is_empty() {
        return Err(WishTextError::Empty);
    }
    let chars = text.chars().count();
    if chars > MAX_WISH_CHARS {
        return Err(WishTextError::TooLong { chars });
    }
    Ok(text)
}
