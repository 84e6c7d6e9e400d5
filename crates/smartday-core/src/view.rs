//! View navigation state machine.
//!
//! Tracks which of the two main content views (chat, map) is active, which
//! nav items are highlighted, and the sidebar collapse/lock state. The
//! navigator is pure state: rendering reads it, input events drive it, and
//! the only cross-component signal is the "map needs lazy initialization"
//! result of [`ViewNavigator::select_map`].

use serde::{Deserialize, Serialize};

/// The two mutually exclusive main content views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActiveView {
    Chat,
    Map,
}

/// Sidebar and main-view state.
///
/// Initial state: chat active, map inactive, sidebar expanded and unlocked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewNavigator {
    map_active: bool,
    chat_nav_active: bool,
    map_nav_active: bool,
    sidebar_locked: bool,
    sidebar_collapsed: bool,
}

impl Default for ViewNavigator {
    fn default() -> Self {
        Self {
            map_active: false,
            chat_nav_active: true,
            map_nav_active: false,
            sidebar_locked: false,
            sidebar_collapsed: false,
        }
    }
}

impl ViewNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// The currently active main view.
    pub fn active_view(&self) -> ActiveView {
        if self.map_active {
            ActiveView::Map
        } else {
            ActiveView::Chat
        }
    }

    /// Whether the map container is shown.
    pub fn map_visible(&self) -> bool {
        self.map_active
    }

    /// Nav item highlight states.
    pub fn chat_nav_active(&self) -> bool {
        self.chat_nav_active
    }

    pub fn map_nav_active(&self) -> bool {
        self.map_nav_active
    }

    pub fn sidebar_collapsed(&self) -> bool {
        self.sidebar_collapsed
    }

    pub fn sidebar_locked(&self) -> bool {
        self.sidebar_locked
    }

    /// Flips the lock. Collapse state is left as-is; only the pointer rules
    /// below move it, and only while unlocked.
    pub fn toggle_lock(&mut self) {
        self.sidebar_locked = !self.sidebar_locked;
    }

    /// Pointer entered the sidebar: expand unless locked.
    pub fn pointer_enter(&mut self) {
        if !self.sidebar_locked {
            self.sidebar_collapsed = false;
        }
    }

    /// Pointer left the sidebar: collapse unless locked, and never while the
    /// map is active (the map must stay visible).
    pub fn pointer_leave(&mut self) {
        if !self.sidebar_locked && !self.map_active {
            self.sidebar_collapsed = true;
        }
    }

    /// Activates the chat view. Idempotent.
    pub fn select_chat(&mut self) {
        self.map_active = false;
        self.chat_nav_active = true;
        self.map_nav_active = false;
    }

    /// Toggles the map view.
    ///
    /// Inactive → active: the map container is shown, the map nav item takes
    /// the highlight, and the caller must run lazy map initialization
    /// (returns `true`). Active → inactive: the container is hidden and the
    /// chat nav item becomes active again (returns `false`).
    pub fn select_map(&mut self) -> bool {
        let was_active = self.map_active;
        self.map_active = !was_active;
        self.map_nav_active = !was_active;
        self.chat_nav_active = was_active;
        !was_active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_state_is_chat_expanded_unlocked() {
        let nav = ViewNavigator::new();
        assert_eq!(nav.active_view(), ActiveView::Chat);
        assert!(nav.chat_nav_active());
        assert!(!nav.map_nav_active());
        assert!(!nav.sidebar_collapsed());
        assert!(!nav.sidebar_locked());
        assert!(!nav.map_visible());
    }

    #[test]
    fn select_map_twice_round_trips_nav_state() {
        let mut nav = ViewNavigator::new();
        let initial = nav;

        assert!(nav.select_map());
        assert_eq!(nav.active_view(), ActiveView::Map);
        assert!(nav.map_nav_active());
        assert!(!nav.chat_nav_active());

        assert!(!nav.select_map());
        assert_eq!(nav, initial);
    }

    #[test]
    fn select_chat_is_idempotent() {
        let mut nav = ViewNavigator::new();
        nav.select_map();
        nav.select_chat();
        let once = nav;
        nav.select_chat();
        assert_eq!(nav, once);
        assert!(!nav.map_visible());
    }

    #[test]
    fn pointer_leave_keeps_sidebar_open_while_map_active() {
        let mut nav = ViewNavigator::new();
        nav.select_map();
        nav.pointer_leave();
        assert!(!nav.sidebar_collapsed());

        nav.select_chat();
        nav.pointer_leave();
        assert!(nav.sidebar_collapsed());

        nav.pointer_enter();
        assert!(!nav.sidebar_collapsed());
    }

    #[test]
    fn lock_suppresses_pointer_rules_without_moving_the_sidebar() {
        let mut nav = ViewNavigator::new();
        nav.pointer_leave();
        assert!(nav.sidebar_collapsed());

        nav.toggle_lock();
        assert!(nav.sidebar_locked());
        assert!(nav.sidebar_collapsed());

        nav.pointer_enter();
        assert!(nav.sidebar_collapsed());
        nav.pointer_leave();
        assert!(nav.sidebar_collapsed());

        nav.toggle_lock();
        nav.pointer_enter();
        assert!(!nav.sidebar_collapsed());
    }
}
