//! Unsaved-changes guard
//!
//! While the form is dirty and no save has succeeded, close / navigate /
//! reset are held behind a confirmation. At most one action waits at a
//! time; a newer request replaces it.

/// Action the user tried to take
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardedAction {
    /// Tab or window close
    Close,
    /// In-app navigation to a route
    Navigate(String),
    /// Restore the last-normalized values
    Reset,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Proceed(GuardedAction),
    ConfirmRequired,
}

#[derive(Debug, Clone, Default)]
pub struct UnsavedChangesGuard {
    pending: Option<GuardedAction>,
    saved: bool,
}

impl UnsavedChangesGuard {
    pub fn new() -> Self {
        Self::default()
    }

    fn armed(&self, dirty: bool) -> bool {
        dirty && !self.saved
    }

    pub fn request(&mut self, action: GuardedAction, dirty: bool) -> GuardDecision {
        if !self.armed(dirty) {
            return GuardDecision::Proceed(action);
        }
        tracing::debug!(?action, "Unsaved changes, confirmation required");
        self.pending = Some(action);
        GuardDecision::ConfirmRequired
    }

    /// The user confirmed; hands back the held action
    pub fn confirm(&mut self) -> Option<GuardedAction> {
        self.pending.take()
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn pending(&self) -> Option<&GuardedAction> {
        self.pending.as_ref()
    }

    /// Native unload prevention
    pub fn should_prevent_unload(&self, dirty: bool) -> bool {
        self.armed(dirty)
    }

    pub fn mark_saved(&mut self) {
        self.saved = true;
        self.pending = None;
    }

    /// Re-arm after the user starts editing a saved form again
    pub fn rearm(&mut self) {
        self.saved = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_form_proceeds() {
        let mut guard = UnsavedChangesGuard::new();
        assert_eq!(
            guard.request(GuardedAction::Reset, false),
            GuardDecision::Proceed(GuardedAction::Reset)
        );
        assert!(!guard.should_prevent_unload(false));
    }

    #[test]
    fn test_dirty_form_defers_until_confirmed() {
        let mut guard = UnsavedChangesGuard::new();
        let nav = GuardedAction::Navigate("/dashboard".into());
        assert_eq!(guard.request(nav.clone(), true), GuardDecision::ConfirmRequired);
        assert!(guard.should_prevent_unload(true));
        assert_eq!(guard.confirm(), Some(nav));
        assert_eq!(guard.confirm(), None);
    }

    #[test]
    fn test_cancel_drops_pending() {
        let mut guard = UnsavedChangesGuard::new();
        guard.request(GuardedAction::Close, true);
        guard.cancel();
        assert!(guard.pending().is_none());
        assert_eq!(guard.confirm(), None);
    }

    #[test]
    fn test_saved_form_is_not_guarded() {
        let mut guard = UnsavedChangesGuard::new();
        guard.request(GuardedAction::Close, true);
        guard.mark_saved();
        assert!(guard.pending().is_none());
        assert!(!guard.should_prevent_unload(true));
        assert_eq!(
            guard.request(GuardedAction::Close, true),
            GuardDecision::Proceed(GuardedAction::Close)
        );

        guard.rearm();
        assert!(guard.should_prevent_unload(true));
    }
}
