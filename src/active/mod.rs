//! Tracks which heading of a table of contents is currently "in view".
//!
//! The tracker is written against [`VisibilityNotifier`], the capability of
//! watching elements by id and reporting when they enter or leave the
//! observation region. [`viewport::Viewport`] implements it geometrically.

pub mod viewport;

/// Grows (positive) or shrinks (negative) each side of the observation
/// region, as a percentage of the viewport size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RootMargin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl RootMargin {
    /// `0% 0% -80% 0%`: only the top fifth of the viewport counts, so the
    /// heading closest to the top wins.
    pub const TOP_FIFTH: RootMargin = RootMargin {
        top: 0.0,
        right: 0.0,
        bottom: -80.0,
        left: 0.0,
    };
}

impl Default for RootMargin {
    fn default() -> Self {
        RootMargin::TOP_FIFTH
    }
}

/// A visibility change reported for one observed element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntersectionEntry {
    pub id: String,
    pub is_intersecting: bool,
}

impl IntersectionEntry {
    pub fn new(id: impl Into<String>, is_intersecting: bool) -> Self {
        IntersectionEntry {
            id: id.into(),
            is_intersecting,
        }
    }
}

pub trait VisibilityNotifier {
    /// Start watching the element with this id. Returns `false` when no
    /// such element exists.
    fn observe(&mut self, id: &str, margin: RootMargin) -> bool;

    /// Stop watching the element with this id.
    fn unobserve(&mut self, id: &str);
}

/// Keeps the id of the topmost visible heading among a set of ids.
pub struct ActiveItemTracker<N: VisibilityNotifier> {
    notifier: N,
    margin: RootMargin,
    /// Ids currently observed, in the order they were requested
    observed: Vec<String>,
    active: Option<String>,
}

impl<N: VisibilityNotifier> ActiveItemTracker<N> {
    pub fn new(notifier: N) -> Self {
        Self::with_margin(notifier, RootMargin::default())
    }

    pub fn with_margin(notifier: N, margin: RootMargin) -> Self {
        ActiveItemTracker {
            notifier,
            margin,
            observed: Vec::new(),
            active: None,
        }
    }

    /// Replace the set of observed ids. Every previous observation is
    /// dropped before the new ones are registered.
    pub fn set_items<S: AsRef<str>>(&mut self, ids: &[S]) {
        self.teardown();

        if ids.is_empty() {
            self.active = None;
            return;
        }

        for id in ids {
            let id = id.as_ref();
            if self.observed.iter().any(|seen| seen == id) {
                continue;
            }
            if self.notifier.observe(id, self.margin) {
                self.observed.push(id.to_string());
            } else {
                tracing::trace!(id, "no element to observe");
            }
        }
        tracing::debug!(
            requested = ids.len(),
            observed = self.observed.len(),
            "observing headings"
        );
    }

    /// Feed one batch of intersection entries. The first intersecting entry
    /// for an observed id becomes active; a batch without one leaves the
    /// active id as it was.
    pub fn handle(&mut self, entries: &[IntersectionEntry]) -> Option<&str> {
        let visible = entries
            .iter()
            .find(|entry| entry.is_intersecting && self.is_observed(&entry.id));

        if let Some(entry) = visible {
            if self.active.as_deref() != Some(entry.id.as_str()) {
                tracing::trace!(id = %entry.id, "active heading changed");
            }
            self.active = Some(entry.id.clone());
        }
        self.active()
    }

    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn observed(&self) -> &[String] {
        &self.observed
    }

    pub fn is_observed(&self, id: &str) -> bool {
        self.observed.iter().any(|observed| observed == id)
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn notifier_mut(&mut self) -> &mut N {
        &mut self.notifier
    }

    /// Stop observing everything. The last active id is kept.
    pub fn deactivate(&mut self) {
        self.teardown();
    }

    fn teardown(&mut self) {
        for id in self.observed.drain(..) {
            self.notifier.unobserve(&id);
        }
    }
}

impl<N: VisibilityNotifier> Drop for ActiveItemTracker<N> {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::BTreeSet;
    use std::rc::Rc;

    /// Records observe/unobserve calls; only ids in `elements` exist.
    #[derive(Default, Clone)]
    struct Recorder {
        elements: BTreeSet<String>,
        watching: Rc<RefCell<BTreeSet<String>>>,
        margins: Rc<RefCell<Vec<RootMargin>>>,
    }

    impl Recorder {
        fn with_elements(ids: &[&str]) -> Self {
            Recorder {
                elements: ids.iter().map(|s| s.to_string()).collect(),
                ..Default::default()
            }
        }
    }

    impl VisibilityNotifier for Recorder {
        fn observe(&mut self, id: &str, margin: RootMargin) -> bool {
            if !self.elements.contains(id) {
                return false;
            }
            self.margins.borrow_mut().push(margin);
            assert!(self.watching.borrow_mut().insert(id.to_string()), "observed twice: {id}");
            true
        }

        fn unobserve(&mut self, id: &str) {
            assert!(self.watching.borrow_mut().remove(id), "not observed: {id}");
        }
    }

    fn entry(id: &str, is_intersecting: bool) -> IntersectionEntry {
        IntersectionEntry::new(id, is_intersecting)
    }

    #[test]
    fn test_first_intersecting_entry_wins() {
        let mut tracker = ActiveItemTracker::new(Recorder::with_elements(&["intro", "usage", "faq"]));
        tracker.set_items(&["intro", "usage", "faq"]);
        assert_eq!(tracker.active(), None);

        tracker.handle(&[entry("intro", false), entry("usage", true), entry("faq", false)]);
        assert_eq!(tracker.active(), Some("usage"));

        tracker.handle(&[entry("faq", true), entry("intro", true)]);
        assert_eq!(tracker.active(), Some("faq"));
    }

    #[test]
    fn test_no_reset_when_nothing_intersects() {
        let mut tracker = ActiveItemTracker::new(Recorder::with_elements(&["intro", "usage", "faq"]));
        tracker.set_items(&["intro", "usage", "faq"]);
        tracker.handle(&[entry("usage", true)]);

        tracker.handle(&[entry("usage", false), entry("intro", false)]);
        assert_eq!(tracker.active(), Some("usage"));
        tracker.handle(&[]);
        assert_eq!(tracker.active(), Some("usage"));

        tracker.handle(&[entry("intro", true)]);
        assert_eq!(tracker.active(), Some("intro"));
    }

    #[test]
    fn test_changing_ids_tears_down_old_observations() {
        let recorder = Recorder::with_elements(&["a", "b", "c"]);
        let watching = recorder.watching.clone();
        let mut tracker = ActiveItemTracker::new(recorder);

        tracker.set_items(&["a", "b"]);
        assert_eq!(watching.borrow().len(), 2);

        tracker.set_items(&["c"]);
        assert_eq!(*watching.borrow(), BTreeSet::from(["c".to_string()]));

        tracker.handle(&[entry("a", true)]);
        assert_eq!(tracker.active(), None);

        tracker.handle(&[entry("a", true), entry("c", true)]);
        assert_eq!(tracker.active(), Some("c"));
    }

    #[test]
    fn test_missing_elements_are_skipped() {
        let mut tracker = ActiveItemTracker::new(Recorder::with_elements(&["present"]));
        tracker.set_items(&["missing", "present", "present"]);
        assert_eq!(tracker.observed(), ["present".to_string()]);
    }

    #[test]
    fn test_empty_ids_observe_nothing() {
        let recorder = Recorder::with_elements(&["a"]);
        let watching = recorder.watching.clone();
        let mut tracker = ActiveItemTracker::new(recorder);
        tracker.set_items(&["a"]);
        tracker.handle(&[entry("a", true)]);

        tracker.set_items::<&str>(&[]);
        assert!(watching.borrow().is_empty());
        assert_eq!(tracker.active(), None);
    }

    #[test]
    fn test_margin_and_drop_teardown() {
        let recorder = Recorder::with_elements(&["a", "b"]);
        let watching = recorder.watching.clone();
        let margins = recorder.margins.clone();
        {
            let mut tracker = ActiveItemTracker::new(recorder);
            tracker.set_items(&["a", "b"]);
            assert_eq!(watching.borrow().len(), 2);
        }
        assert!(watching.borrow().is_empty());
        assert!(margins.borrow().iter().all(|m| *m == RootMargin::TOP_FIFTH));
    }

    #[test]
    fn test_deactivate_keeps_last_active() {
        let recorder = Recorder::with_elements(&["a"]);
        let watching = recorder.watching.clone();
        let mut tracker = ActiveItemTracker::new(recorder);
        tracker.set_items(&["a"]);
        tracker.handle(&[entry("a", true)]);
        tracker.deactivate();
        assert!(watching.borrow().is_empty());
        assert_eq!(tracker.active(), Some("a"));
    }
}
