//! Easing curves shared by the counter and fade-in animations.

/// Cubic ease-out: fast start, decelerating approach with zero slope at `t = 1`.
///
/// Input is expected in `[0, 1]`; values outside are not clamped.
pub fn ease_out_cubic(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(3)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_are_exact() {
        assert_eq!(ease_out_cubic(0.0), 0.0);
        assert_eq!(ease_out_cubic(1.0), 1.0);
    }

    #[test]
    fn monotonic_over_unit_interval() {
        let mut prev = ease_out_cubic(0.0);
        for i in 1..=1000 {
            let v = ease_out_cubic(i as f64 / 1000.0);
            assert!(v >= prev, "dropped at step {i}: {v} < {prev}");
            prev = v;
        }
    }

    #[test]
    fn decelerates_near_the_end() {
        let early = ease_out_cubic(0.1) - ease_out_cubic(0.0);
        let late = ease_out_cubic(1.0) - ease_out_cubic(0.9);
        assert!(early > late);
        assert!(late < 1e-2);
    }
}
