//! Page scroll with exponential ease-out.
//!
//! The scroll position chases a target row.  Each frame it closes a fixed
//! fraction of the remaining distance, so long jumps start fast and settle
//! gently; once within half a row it snaps onto the target.

/// Animated vertical scroll position, in page rows.
#[derive(Debug, Clone)]
pub struct SmoothScroll {
    position: f64,
    target: f64,
    /// Damping: `gap *= (1 - speed)` each frame.  Good range: 0.2–0.45 at 60 fps.
    speed: f64,
    /// Largest valid target (page height minus viewport height).
    max: f64,
}

impl SmoothScroll {
    pub fn new(speed: f64) -> Self {
        Self {
            position: 0.0,
            target: 0.0,
            speed: speed.clamp(0.05, 0.95),
            max: 0.0,
        }
    }

    /// Update the scroll limit after a relayout; pulls position and target
    /// back inside the page.
    pub fn set_max(&mut self, max: u32) {
        self.max = f64::from(max);
        self.target = self.target.min(self.max);
        self.position = self.position.min(self.max);
    }

    /// Animate towards `row`.
    pub fn scroll_to(&mut self, row: u32) {
        self.target = f64::from(row).clamp(0.0, self.max);
    }

    /// Move the target by `delta` rows.
    pub fn scroll_by(&mut self, delta: i64) {
        let next = self.target + delta as f64;
        self.target = next.clamp(0.0, self.max);
    }

    /// Close part of the gap.  Call once per frame.
    pub fn tick(&mut self) {
        let gap = self.target - self.position;
        if gap.abs() < 0.5 {
            self.position = self.target;
        } else {
            self.position += gap * self.speed;
        }
    }

    /// First visible page row.
    pub fn row(&self) -> u32 {
        self.position.round().max(0.0) as u32
    }

    /// Where the scroll is heading.
    pub fn target_row(&self) -> u32 {
        self.target.round().max(0.0) as u32
    }

    pub fn is_animating(&self) -> bool {
        self.position != self.target
    }
}
