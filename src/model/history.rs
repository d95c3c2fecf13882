//! Navigation history with a synthetic entry for the detail overlay
//!
//! The stack always holds the root page entry. Opening the detail overlay
//! pushes one marker; the marker is consumed either by the app dismissing
//! the overlay or by a physical back navigation, never by both.

/// An entry on the navigation stack
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HistoryEntry {
    Page,
    DetailOverlay { id: String },
}

/// Result of a physical back navigation
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BackOutcome {
    /// The overlay marker was on top; the caller must hide the overlay
    OverlayClosed,
    /// Nothing above the root page; nothing happened
    AtRoot,
}

#[derive(Clone, Debug)]
pub struct NavigationHistory {
    entries: Vec<HistoryEntry>,
    overlay_live: bool,
}

impl NavigationHistory {
    pub fn new() -> Self {
        Self {
            entries: vec![HistoryEntry::Page],
            overlay_live: false,
        }
    }

    pub fn depth(&self) -> usize {
        self.entries.len()
    }

    pub fn is_overlay_live(&self) -> bool {
        self.overlay_live
    }

    pub fn top(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }

    /// Push the overlay marker. Returns false when one is already live.
    pub fn push_overlay(&mut self, id: &str) -> bool {
        if self.overlay_live {
            if let Some(HistoryEntry::DetailOverlay { id: live_id }) = self.entries.last_mut() {
                *live_id = id.to_string();
            }
            return false;
        }
        self.entries.push(HistoryEntry::DetailOverlay { id: id.to_string() });
        self.overlay_live = true;
        true
    }

    /// App-initiated close (close control, backdrop, escape): pops the marker.
    /// Returns false when no overlay was live.
    pub fn dismiss_overlay(&mut self) -> bool {
        if !self.overlay_live {
            return false;
        }
        self.overlay_live = false;
        if matches!(self.entries.last(), Some(HistoryEntry::DetailOverlay { .. })) {
            self.entries.pop();
        }
        true
    }

    /// Physical back navigation. The root entry is never popped.
    pub fn back(&mut self) -> BackOutcome {
        if self.entries.len() <= 1 {
            return BackOutcome::AtRoot;
        }
        let popped = self.entries.pop();
        match popped {
            Some(HistoryEntry::DetailOverlay { .. }) if self.overlay_live => {
                self.overlay_live = false;
                BackOutcome::OverlayClosed
            }
            _ => BackOutcome::AtRoot,
        }
    }
}

impl Default for NavigationHistory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dismiss_restores_depth() {
        let mut history = NavigationHistory::new();
        let before = history.depth();
        assert!(history.push_overlay("tt0372784"));
        assert_eq!(history.depth(), before + 1);
        assert!(history.dismiss_overlay());
        assert_eq!(history.depth(), before);
        assert!(!history.is_overlay_live());
    }

    #[test]
    fn back_consumes_marker_once() {
        let mut history = NavigationHistory::new();
        let before = history.depth();
        history.push_overlay("tt0372784");
        assert_eq!(history.back(), BackOutcome::OverlayClosed);
        assert_eq!(history.depth(), before);
        // a second dismiss must not pop the root page
        assert!(!history.dismiss_overlay());
        assert_eq!(history.depth(), before);
    }

    #[test]
    fn only_one_marker_is_live() {
        let mut history = NavigationHistory::new();
        assert!(history.push_overlay("tt1"));
        assert!(!history.push_overlay("tt2"));
        assert_eq!(history.depth(), 2);
        assert_eq!(
            history.top(),
            Some(&HistoryEntry::DetailOverlay { id: "tt2".into() })
        );
    }

    #[test]
    fn back_at_root_is_noop() {
        let mut history = NavigationHistory::new();
        assert_eq!(history.back(), BackOutcome::AtRoot);
        assert_eq!(history.depth(), 1);
        assert_eq!(history.top(), Some(&HistoryEntry::Page));
    }
}
