//! Stat counters that count up from 0 to a target with a colour ramp.
//!
//! A [`Counter`] is triggered at most once (the first time it scrolls into
//! view) and then advanced every frame by the [`CounterAnimator`] until its
//! fixed time budget runs out.  The last frame writes the exact target and the
//! end colour so no easing residue is left on screen.

use std::time::Duration;

use super::color::{interpolate_color, Rgb, GREEN, RED};
use super::easing::ease_out_cubic;
use super::format::format_number;
use super::scheduler::{FrameScheduler, FrameStatus};

/// Run time of every counter animation.
pub const COUNTER_DURATION: Duration = Duration::from_millis(2500);

// ───────────────────────────────────────── attributes ────────

/// Static description of a counter, read from the page's `data-*` attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct CounterSpec {
    pub target: f64,
    pub prefix: String,
    pub suffix: String,
}

impl CounterSpec {
    pub fn new(target: f64, prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
        Self {
            target,
            prefix: prefix.into(),
            suffix: suffix.into(),
        }
    }

    /// Build from raw attribute values.  A missing or non-numeric target
    /// becomes `NaN` and the counter will render `NaN`.
    pub fn from_attrs(target: Option<&str>, prefix: Option<&str>, suffix: Option<&str>) -> Self {
        Self::new(
            target.map_or(f64::NAN, parse_float),
            prefix.unwrap_or_default(),
            suffix.unwrap_or_default(),
        )
    }
}

/// Lenient float parse: skips leading whitespace and reads the longest
/// numeric prefix (`"42px"` → 42).  Anything else is `NaN`.
pub fn parse_float(raw: &str) -> f64 {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    if s[end..].starts_with("Infinity") {
        return if s.starts_with('-') { f64::NEG_INFINITY } else { f64::INFINITY };
    }

    let digits_from = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let int_end = digits_from(end);
    let mut mantissa_end = int_end;
    if bytes.get(int_end) == Some(&b'.') {
        mantissa_end = digits_from(int_end + 1);
    }
    // Need at least one digit somewhere in the mantissa.
    let has_digits = int_end > end || mantissa_end > int_end + 1;
    if !has_digits {
        return f64::NAN;
    }
    end = mantissa_end;

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_end = digits_from(exp);
        if exp_end > exp {
            end = exp_end;
        }
    }

    s[..end].trim_end_matches('.').parse().unwrap_or(f64::NAN)
}

// ───────────────────────────────────────── counter ───────────

/// Live animation state of one counter.
#[derive(Debug, Clone)]
pub struct Counter {
    spec: CounterSpec,
    started: bool,
    finished: bool,
    start_time: Option<Duration>,
    progress: f64,
    value: f64,
    color: Rgb,
}

impl Counter {
    pub fn new(spec: CounterSpec) -> Self {
        Self {
            spec,
            started: false,
            finished: false,
            start_time: None,
            progress: 0.0,
            value: 0.0,
            color: RED,
        }
    }

    /// Start the animation at `now`.  Returns `false` (and changes nothing)
    /// if this counter has already been started.
    pub fn trigger(&mut self, now: Duration) -> bool {
        if self.started {
            return false;
        }
        self.started = true;
        self.start_time = Some(now);
        true
    }

    /// Advance to the frame at `now`.
    pub fn on_frame(&mut self, now: Duration) -> FrameStatus {
        let Some(start) = self.start_time else {
            return FrameStatus::Done;
        };
        if self.finished {
            return FrameStatus::Done;
        }

        let elapsed = now.saturating_sub(start);
        let progress = (elapsed.as_secs_f64() / COUNTER_DURATION.as_secs_f64()).clamp(0.0, 1.0);
        // Frames can arrive out of order across resumes; never move backwards.
        self.progress = self.progress.max(progress);

        if self.progress < 1.0 {
            self.value = self.spec.target * ease_out_cubic(self.progress);
            self.color = interpolate_color(self.progress);
            FrameStatus::Pending
        } else {
            self.value = self.spec.target;
            self.color = GREEN;
            self.finished = true;
            FrameStatus::Done
        }
    }

    /// Current on-screen text.
    pub fn text(&self) -> String {
        format_number(self.value, self.spec.target, &self.spec.prefix, &self.spec.suffix)
    }

    pub fn spec(&self) -> &CounterSpec {
        &self.spec
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn finished(&self) -> bool {
        self.finished
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn color(&self) -> Rgb {
        self.color
    }
}

// ───────────────────────────────────────── animator ──────────

/// Owns every counter on the page and drives them through the frame scheduler.
#[derive(Debug, Default)]
pub struct CounterAnimator {
    counters: Vec<Counter>,
    scheduler: FrameScheduler<usize>,
}

impl CounterAnimator {
    pub fn new(specs: impl IntoIterator<Item = CounterSpec>) -> Self {
        Self {
            counters: specs.into_iter().map(Counter::new).collect(),
            scheduler: FrameScheduler::new(),
        }
    }

    /// Counter `index` became visible.  Only the first call per counter
    /// starts anything.
    pub fn trigger(&mut self, index: usize, now: Duration) -> bool {
        let Some(counter) = self.counters.get_mut(index) else {
            return false;
        };
        if !counter.trigger(now) {
            return false;
        }
        tracing::debug!(index, target = counter.spec().target, "counter started");
        self.scheduler.request(index);
        true
    }

    /// Advance every running counter to `now`.
    pub fn run_frame(&mut self, now: Duration) {
        let counters = &mut self.counters;
        self.scheduler.run_frame(now, |index, now| {
            let status = counters[index].on_frame(now);
            if status == FrameStatus::Done {
                tracing::debug!(index, text = %counters[index].text(), "counter finished");
            }
            status
        });
    }

    pub fn is_animating(&self) -> bool {
        self.scheduler.is_busy()
    }

    pub fn counters(&self) -> &[Counter] {
        &self.counters
    }

    pub fn get(&self, index: usize) -> Option<&Counter> {
        self.counters.get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    /// Drive `animator` at 60 fps from `from` until it settles.
    fn run_to_end(animator: &mut CounterAnimator, from: Duration) -> u32 {
        let mut frames = 0;
        let mut now = from;
        while animator.is_animating() {
            now += ms(16);
            animator.run_frame(now);
            frames += 1;
            assert!(frames < 1000, "animation never settled");
        }
        frames
    }

    #[test]
    fn final_frame_is_exact() {
        for target in [1.0, 87.0, 4200.0, 12_345.678, 2_500_000.0, 3.3] {
            let spec = CounterSpec::new(target, "", "");
            let mut c = Counter::new(spec);
            c.trigger(ms(0));
            assert_eq!(c.on_frame(ms(2499)), FrameStatus::Pending);
            assert_eq!(c.on_frame(ms(2500)), FrameStatus::Done);
            assert_eq!(c.value(), target);
            assert_eq!(c.color(), GREEN);
            assert_eq!(c.text(), format_number(target, target, "", ""));
        }
    }

    #[test]
    fn value_eases_while_color_tracks_raw_time() {
        let mut c = Counter::new(CounterSpec::new(1000.0, "", ""));
        c.trigger(ms(0));
        c.on_frame(ms(1250));
        assert_eq!(c.progress(), 0.5);
        assert_eq!(c.value(), 1000.0 * 0.875);
        assert_eq!(c.color(), interpolate_color(0.5));
    }

    #[test]
    fn frames_before_start_clamp_to_zero() {
        let mut c = Counter::new(CounterSpec::new(50.0, "", "%"));
        c.trigger(ms(100));
        assert_eq!(c.on_frame(ms(90)), FrameStatus::Pending);
        assert_eq!(c.value(), 0.0);
        assert_eq!(c.color(), RED);
        assert_eq!(c.text(), "0%");
    }

    #[test]
    fn second_trigger_is_ignored() {
        let mut animator = CounterAnimator::new([CounterSpec::new(10.0, "", "")]);
        assert!(animator.trigger(0, ms(0)));
        animator.run_frame(ms(1000));
        assert!(!animator.trigger(0, ms(1000)));
        // Start time was not reset by the ignored trigger.
        animator.run_frame(ms(2500));
        assert!(animator.get(0).is_some_and(Counter::finished));
        assert!(!animator.is_animating());
    }

    #[test]
    fn counters_run_independently() {
        let mut animator = CounterAnimator::new([
            CounterSpec::new(100.0, "", ""),
            CounterSpec::new(200.0, "", ""),
        ]);
        animator.trigger(0, ms(0));
        animator.run_frame(ms(1000));
        animator.trigger(1, ms(1000));
        animator.run_frame(ms(2600));
        assert!(animator.counters()[0].finished());
        assert!(!animator.counters()[1].finished());
        run_to_end(&mut animator, ms(2600));
        assert_eq!(animator.counters()[1].value(), 200.0);
    }

    #[test]
    fn out_of_range_index_is_ignored() {
        let mut animator = CounterAnimator::new([]);
        assert!(!animator.trigger(3, ms(0)));
        assert!(!animator.is_animating());
    }

    #[test]
    fn millions_with_prefix_end_to_end() {
        let spec = CounterSpec::from_attrs(Some("1000000"), Some("$"), None);
        let mut animator = CounterAnimator::new([spec]);
        animator.trigger(0, ms(0));
        let frames = run_to_end(&mut animator, ms(0));
        assert!(frames >= 150);
        let c = &animator.counters()[0];
        assert_eq!(c.text(), "$1.0M");
        assert_eq!(c.color(), GREEN);
    }

    #[test]
    fn missing_target_renders_nan() {
        let spec = CounterSpec::from_attrs(None, Some("$"), None);
        assert!(spec.target.is_nan());
        let mut c = Counter::new(spec);
        c.trigger(ms(0));
        c.on_frame(ms(2500));
        assert_eq!(c.text(), "$NaN");
        // colour is time-driven and still completes
        assert_eq!(c.color(), GREEN);
    }

    #[test]
    fn parse_float_reads_numeric_prefix() {
        assert_eq!(parse_float("1000000"), 1_000_000.0);
        assert_eq!(parse_float("  42px"), 42.0);
        assert_eq!(parse_float("-3.5e2x"), -350.0);
        assert_eq!(parse_float(".5"), 0.5);
        assert_eq!(parse_float("5."), 5.0);
        assert_eq!(parse_float("7e"), 7.0);
        assert_eq!(parse_float("Infinity"), f64::INFINITY);
        assert!(parse_float("abc").is_nan());
        assert!(parse_float("").is_nan());
        assert!(parse_float(".").is_nan());
        assert!(parse_float("-").is_nan());
    }
}
