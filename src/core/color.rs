//! Three-anchor colour ramp used by the stat counters.
//!
//! Progress moves red → yellow (at the halfway mark) → green.  Each channel is
//! interpolated and rounded on its own, so intermediate colours may sit one
//! unit off a jointly-rounded blend.

use std::fmt;

/// An 8-bit-per-channel colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Channel-wise linear blend towards `other`; `t = 0` is `self`, `t = 1` is `other`.
    pub fn lerp(self, other: Rgb, t: f64) -> Rgb {
        Rgb {
            r: lerp_channel(self.r, other.r, t),
            g: lerp_channel(self.g, other.g, t),
            b: lerp_channel(self.b, other.b, t),
        }
    }
}

/// CSS functional notation, e.g. `rgb(239, 68, 68)`.
impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

/// `#EF4444`
pub const RED: Rgb = Rgb::new(239, 68, 68);
/// `#F59E0B`
pub const YELLOW: Rgb = Rgb::new(245, 158, 11);
/// `#10B981`
pub const GREEN: Rgb = Rgb::new(16, 185, 129);

/// Colour for a counter at `progress` (raw time progress, not eased).
pub fn interpolate_color(progress: f64) -> Rgb {
    if progress < 0.5 {
        RED.lerp(YELLOW, progress * 2.0)
    } else {
        YELLOW.lerp(GREEN, (progress - 0.5) * 2.0)
    }
}

fn lerp_channel(from: u8, to: u8, t: f64) -> u8 {
    let from = f64::from(from);
    let to = f64::from(to);
    js_round(from + (to - from) * t).clamp(0.0, 255.0) as u8
}

/// Round half towards positive infinity (`Math.round` semantics).
pub(crate) fn js_round(x: f64) -> f64 {
    (x + 0.5).floor()
}
