//! Fade-in on first view for content cards.

use std::time::Duration;

use super::easing::ease_out_cubic;

/// How long a card takes to go from hidden to fully shown.
pub const FADE_DURATION: Duration = Duration::from_millis(600);

/// Hidden until revealed, then fades in once and stays visible.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FadeIn {
    revealed_at: Option<Duration>,
}

impl FadeIn {
    /// Start fading in at `now`.  Later calls are ignored.
    pub fn reveal(&mut self, now: Duration) -> bool {
        if self.revealed_at.is_some() {
            return false;
        }
        self.revealed_at = Some(now);
        true
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed_at.is_some()
    }

    /// 0.0 (hidden) to 1.0 (fully shown).
    pub fn opacity(&self, now: Duration) -> f64 {
        match self.revealed_at {
            None => 0.0,
            Some(at) => {
                let t = now.saturating_sub(at).as_secs_f64() / FADE_DURATION.as_secs_f64();
                ease_out_cubic(t.min(1.0))
            }
        }
    }

    /// `true` while the fade is still in progress at `now`.
    pub fn is_fading(&self, now: Duration) -> bool {
        self.revealed_at
            .is_some_and(|at| now.saturating_sub(at) < FADE_DURATION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hidden_until_revealed() {
        let fade = FadeIn::default();
        assert_eq!(fade.opacity(Duration::from_secs(10)), 0.0);
        assert!(!fade.is_fading(Duration::ZERO));
    }

    #[test]
    fn fades_in_once() {
        let mut fade = FadeIn::default();
        let t0 = Duration::from_millis(1000);
        assert!(fade.reveal(t0));
        assert!(!fade.reveal(t0 + Duration::from_millis(300)));

        let mid = fade.opacity(t0 + Duration::from_millis(300));
        assert!(mid > 0.0 && mid < 1.0);
        assert!(fade.is_fading(t0 + Duration::from_millis(300)));

        assert_eq!(fade.opacity(t0 + FADE_DURATION), 1.0);
        assert!(!fade.is_fading(t0 + FADE_DURATION));
    }
}
