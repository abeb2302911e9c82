//! Visibility-triggered effects: reveal-on-scroll and numeric count-ups.
//!
//! Both are one-shot. An element animates the first time it crosses its
//! visibility threshold and is then unobserved, so scrolling back past it
//! never replays the effect.

/// Class added to revealed elements.
pub const REVEAL_CLASS: &str = "animate";

/// Ease-out cubic, `1 - (1 - p)^3`, with `p` clamped to `[0, 1]`.
pub fn ease_out_cubic(progress: f64) -> f64 {
    let p = progress.clamp(0.0, 1.0);
    1.0 - (1.0 - p).powi(3)
}

/// Parse a `data-target` value the way the markup writes it: optional
/// surrounding whitespace, an optional sign, then digits. Anything after the
/// leading integer (`"150+"`, `"98%"`) is ignored.
pub fn parse_target(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (sign, digits) = match s.as_bytes().first() {
        Some(b'-') => (-1, &s[1..]),
        Some(b'+') => (1, &s[1..]),
        _ => (1, s),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}

/// One step of a running count-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CounterFrame {
    pub value: i64,
    pub done: bool,
}

/// A count-up from 0 to `target` over `duration_ms`, driven by frame times.
#[derive(Debug, Clone, Copy)]
pub struct CounterAnimation {
    target: i64,
    duration_ms: f64,
    start_ms: f64,
}

impl CounterAnimation {
    pub fn new(target: i64, duration_ms: u32, start_ms: f64) -> Self {
        Self {
            target,
            duration_ms: f64::from(duration_ms.max(1)),
            start_ms,
        }
    }

    pub fn target(&self) -> i64 {
        self.target
    }

    /// Displayed value at `now_ms`. The final frame is pinned to the exact
    /// target so rounding can never leave it short.
    pub fn frame(&self, now_ms: f64) -> CounterFrame {
        let progress = ((now_ms - self.start_ms) / self.duration_ms).clamp(0.0, 1.0);
        if progress >= 1.0 {
            return CounterFrame {
                value: self.target,
                done: true,
            };
        }
        let value = (self.target as f64 * ease_out_cubic(progress)).floor() as i64;
        CounterFrame { value, done: false }
    }
}
