//! Falling snow particles. Cosmetic only.

pub const SNOWFLAKE_COUNT: usize = 50;

#[derive(Clone, Debug, PartialEq)]
pub struct Snowflake {
    pub size_px: f64,
    pub left_vw: f64,
    pub top_px: f64,
    pub duration_s: f64,
    pub delay_s: f64,
    pub opacity: f64,
}

impl Snowflake {
    /// Build one flake from a source of uniform samples in `[0, 1)`.
    pub fn random(mut next: impl FnMut() -> f64) -> Self {
        Self {
            size_px: next() * 5.0 + 2.0,
            left_vw: next() * 100.0,
            top_px: -next() * 100.0,
            duration_s: next() * 5.0 + 5.0,
            delay_s: next() * 5.0,
            opacity: next() * 0.5 + 0.3,
        }
    }

    /// CSS `animation` shorthand; each flake loops on its own schedule.
    pub fn animation(&self) -> String {
        format!(
            "fall {:.2}s linear {:.2}s infinite",
            self.duration_s, self.delay_s
        )
    }
}

pub fn snowfall(count: usize, mut next: impl FnMut() -> f64) -> Vec<Snowflake> {
    (0..count).map(|_| Snowflake::random(&mut next)).collect()
}
