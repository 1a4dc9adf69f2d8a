use std::collections::HashMap;

use crate::active::{IntersectionEntry, RootMargin, VisibilityNotifier};

/// Vertical extent of an element in document coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Span {
    pub top: f64,
    pub height: f64,
}

struct Watched {
    id: String,
    margin: RootMargin,
    /// Last reported state; `None` until the initial report is delivered
    reported: Option<bool>,
}

/// A scrollable viewport over a column of elements.
///
/// Behaves like an intersection observer: newly observed elements get an
/// initial report, later reports only carry elements whose state changed,
/// in observation order.
pub struct Viewport {
    height: f64,
    scroll: f64,
    elements: HashMap<String, Span>,
    watched: Vec<Watched>,
}

impl Viewport {
    pub fn new(height: f64) -> Self {
        Viewport {
            height,
            scroll: 0.0,
            elements: HashMap::new(),
            watched: Vec::new(),
        }
    }

    pub fn insert(&mut self, id: impl Into<String>, span: Span) {
        self.elements.insert(id.into(), span);
    }

    pub fn scroll(&self) -> f64 {
        self.scroll
    }

    pub fn is_watching(&self, id: &str) -> bool {
        self.watched.iter().any(|w| w.id == id)
    }

    /// Scroll to `offset` and report every pending visibility change.
    pub fn scroll_to(&mut self, offset: f64) -> Vec<IntersectionEntry> {
        self.scroll = offset.max(0.0);
        self.take_changes()
    }

    /// Visibility changes not yet reported, including initial reports.
    pub fn take_changes(&mut self) -> Vec<IntersectionEntry> {
        let mut changes = Vec::new();
        for watched in &mut self.watched {
            let Some(span) = self.elements.get(&watched.id) else {
                continue;
            };
            let now = intersects(*span, self.scroll, self.height, watched.margin);
            if watched.reported != Some(now) {
                watched.reported = Some(now);
                changes.push(IntersectionEntry::new(watched.id.clone(), now));
            }
        }
        changes
    }
}

/// Whether `span` overlaps the observation region: the visible window
/// `[scroll, scroll + height]` with each edge moved by its margin.
fn intersects(span: Span, scroll: f64, height: f64, margin: RootMargin) -> bool {
    let region_top = scroll - height * margin.top / 100.0;
    let region_bottom = scroll + height + height * margin.bottom / 100.0;
    if region_bottom <= region_top {
        return false;
    }
    span.top < region_bottom && span.top + span.height > region_top
}

impl VisibilityNotifier for Viewport {
    fn observe(&mut self, id: &str, margin: RootMargin) -> bool {
        if !self.elements.contains_key(id) {
            return false;
        }
        if !self.is_watching(id) {
            self.watched.push(Watched {
                id: id.to_string(),
                margin,
                reported: None,
            });
        }
        true
    }

    fn unobserve(&mut self, id: &str) {
        self.watched.retain(|w| w.id != id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::active::ActiveItemTracker;

    fn line(top: f64) -> Span {
        Span { top, height: 1.0 }
    }

    fn page() -> Viewport {
        let mut viewport = Viewport::new(100.0);
        viewport.insert("intro", line(0.0));
        viewport.insert("usage", line(50.0));
        viewport.insert("faq", line(120.0));
        viewport
    }

    #[test]
    fn test_region_is_top_fifth() {
        let m = RootMargin::TOP_FIFTH;
        assert!(intersects(line(10.0), 0.0, 100.0, m));
        assert!(!intersects(line(25.0), 0.0, 100.0, m));
        assert!(intersects(line(25.0), 10.0, 100.0, m));
        assert!(!intersects(line(5.0), 10.0, 100.0, m));
    }

    #[test]
    fn test_initial_and_changed_reports() {
        let mut viewport = page();
        assert!(viewport.observe("intro", RootMargin::TOP_FIFTH));
        assert!(viewport.observe("usage", RootMargin::TOP_FIFTH));
        assert!(!viewport.observe("missing", RootMargin::TOP_FIFTH));

        assert_eq!(
            viewport.take_changes(),
            vec![
                IntersectionEntry::new("intro", true),
                IntersectionEntry::new("usage", false)
            ]
        );
        assert!(viewport.take_changes().is_empty());

        assert_eq!(
            viewport.scroll_to(45.0),
            vec![
                IntersectionEntry::new("intro", false),
                IntersectionEntry::new("usage", true)
            ]
        );
    }

    #[test]
    fn test_tracker_follows_scrolling() {
        let mut tracker = ActiveItemTracker::new(page());
        tracker.set_items(&["intro", "usage", "faq"]);

        let changes = tracker.notifier_mut().take_changes();
        assert_eq!(tracker.handle(&changes), Some("intro"));

        let changes = tracker.notifier_mut().scroll_to(45.0);
        assert_eq!(tracker.handle(&changes), Some("usage"));

        // Between headings nothing intersects; the last heading stays active
        let changes = tracker.notifier_mut().scroll_to(80.0);
        assert_eq!(tracker.handle(&changes), Some("usage"));

        let changes = tracker.notifier_mut().scroll_to(110.0);
        assert_eq!(tracker.handle(&changes), Some("faq"));
    }

    #[test]
    fn test_unobserved_elements_are_not_reported() {
        let mut tracker = ActiveItemTracker::new(page());
        tracker.set_items(&["intro", "usage"]);
        tracker.set_items(&["faq"]);
        assert!(!tracker.notifier().is_watching("intro"));

        let changes = tracker.notifier_mut().take_changes();
        assert_eq!(changes, vec![IntersectionEntry::new("faq", false)]);
        assert_eq!(tracker.handle(&changes), None);
    }
}
