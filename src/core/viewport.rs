//! Viewport intersection: which page elements are on screen.
//!
//! Elements live in page-row coordinates.  An observer is polled with the
//! current viewport after every scroll step and reports elements whose
//! visibility flipped since the last poll.

/// Vertical extent of an element, in page rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Bounds {
    pub top: u32,
    pub height: u32,
}

impl Bounds {
    pub fn new(top: u32, height: u32) -> Self {
        Self { top, height }
    }

    pub fn bottom(&self) -> u32 {
        self.top.saturating_add(self.height)
    }
}

/// The visible window onto the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    /// First visible page row (the scroll position).
    pub top: u32,
    pub height: u32,
}

/// When an element counts as visible.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionPolicy {
    /// Fraction of the element that must be inside the (shrunk) viewport.
    pub threshold: f64,
    /// Rows trimmed off the bottom of the viewport, so elements register a
    /// little after they peek in.
    pub bottom_margin: u32,
}

/// Stat counters: 30 % visible, bottom edge pulled in ~100 px.
pub const COUNTER_POLICY: IntersectionPolicy = IntersectionPolicy {
    threshold: 0.3,
    bottom_margin: 2,
};

/// Fade-in cards: 10 % visible, bottom edge pulled in ~50 px.
pub const FADE_IN_POLICY: IntersectionPolicy = IntersectionPolicy {
    threshold: 0.1,
    bottom_margin: 1,
};

impl IntersectionPolicy {
    /// Fraction of `bounds` inside `viewport` after applying the margin.
    pub fn ratio(&self, bounds: Bounds, viewport: Viewport) -> f64 {
        let root_top = viewport.top;
        let root_bottom = viewport
            .top
            .saturating_add(viewport.height.saturating_sub(self.bottom_margin));

        if bounds.height == 0 {
            return if (root_top..root_bottom).contains(&bounds.top) { 1.0 } else { 0.0 };
        }

        let lo = bounds.top.max(root_top);
        let hi = bounds.bottom().min(root_bottom);
        f64::from(hi.saturating_sub(lo)) / f64::from(bounds.height)
    }

    pub fn is_visible(&self, bounds: Bounds, viewport: Viewport) -> bool {
        let ratio = self.ratio(bounds, viewport);
        ratio > 0.0 && ratio >= self.threshold
    }
}

/// A visibility flip reported by [`ViewportObserver::poll`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibilityChanged<K> {
    pub element: K,
    pub visible: bool,
    pub ratio: f64,
}

/// Source of "element became visible / hidden" notifications.
pub trait ViewportObserver<K> {
    /// Start watching `element`, or update its bounds after a relayout.
    fn subscribe(&mut self, element: K, bounds: Bounds);

    /// Report every change since the last poll.  A freshly subscribed
    /// element always reports once, visible or not.
    fn poll(&mut self, viewport: Viewport) -> Vec<VisibilityChanged<K>>;
}

#[derive(Debug, Clone)]
struct Watched<K> {
    element: K,
    bounds: Bounds,
    /// `None` until the first poll after subscribing.
    visible: Option<bool>,
}

/// Row-based [`ViewportObserver`] using a fixed [`IntersectionPolicy`].
#[derive(Debug, Clone)]
pub struct IntersectionObserver<K> {
    policy: IntersectionPolicy,
    watched: Vec<Watched<K>>,
}

impl<K: Copy + PartialEq> IntersectionObserver<K> {
    pub fn new(policy: IntersectionPolicy) -> Self {
        Self {
            policy,
            watched: Vec::new(),
        }
    }
}

impl<K: Copy + PartialEq> ViewportObserver<K> for IntersectionObserver<K> {
    fn subscribe(&mut self, element: K, bounds: Bounds) {
        if let Some(w) = self.watched.iter_mut().find(|w| w.element == element) {
            w.bounds = bounds;
            return;
        }
        self.watched.push(Watched {
            element,
            bounds,
            visible: None,
        });
    }

    fn poll(&mut self, viewport: Viewport) -> Vec<VisibilityChanged<K>> {
        let policy = self.policy;
        let mut changes = Vec::new();
        for w in &mut self.watched {
            let ratio = policy.ratio(w.bounds, viewport);
            let visible = ratio > 0.0 && ratio >= policy.threshold;
            if w.visible != Some(visible) {
                w.visible = Some(visible);
                changes.push(VisibilityChanged {
                    element: w.element,
                    visible,
                    ratio,
                });
            }
        }
        changes
    }
}
