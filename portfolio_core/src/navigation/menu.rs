use serde::{Deserialize, Serialize};

use crate::ui::MenuState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MenuEvent {
    HamburgerClicked,
    LinkClicked,
    OutsideClicked,
    EscapePressed,
    /// Viewport width once resizing has settled.
    Resized { width: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuUpdate {
    pub state: MenuState,
    pub focus_hamburger: bool,
}

/// Open/closed state of the mobile navigation menu.
#[derive(Debug, Clone)]
pub struct MobileMenu {
    open: bool,
    breakpoint: u32,
}

impl MobileMenu {
    pub fn new(breakpoint: u32) -> Self {
        Self {
            open: false,
            breakpoint,
        }
    }

    pub fn state(&self) -> MenuState {
        MenuState::new(self.open)
    }

    /// Returns the update to apply, or `None` when the event changes nothing.
    pub fn handle(&mut self, event: MenuEvent) -> Option<MenuUpdate> {
        let (open, focus_hamburger) = match event {
            MenuEvent::HamburgerClicked => (!self.open, false),
            MenuEvent::LinkClicked | MenuEvent::OutsideClicked => (false, false),
            MenuEvent::EscapePressed if self.open => (false, true),
            MenuEvent::EscapePressed => return None,
            MenuEvent::Resized { width } if width > self.breakpoint => (false, false),
            MenuEvent::Resized { .. } => return None,
        };

        if open == self.open {
            return None;
        }

        self.open = open;
        Some(MenuUpdate {
            state: self.state(),
            focus_hamburger,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hamburger_toggles() {
        let mut menu = MobileMenu::new(600);

        let opened = menu.handle(MenuEvent::HamburgerClicked).unwrap();
        assert!(opened.state.open && opened.state.body_scroll_locked && opened.state.aria_expanded);

        let closed = menu.handle(MenuEvent::HamburgerClicked).unwrap();
        assert_eq!(closed.state, MenuState::new(false));
        assert!(!menu.state().open);
    }

    #[test]
    fn test_link_and_outside_clicks_close() {
        let mut menu = MobileMenu::new(600);
        assert_eq!(menu.handle(MenuEvent::OutsideClicked), None);

        menu.handle(MenuEvent::HamburgerClicked);
        assert!(!menu.handle(MenuEvent::LinkClicked).unwrap().state.open);

        menu.handle(MenuEvent::HamburgerClicked);
        assert!(!menu.handle(MenuEvent::OutsideClicked).unwrap().state.open);
    }

    #[test]
    fn test_escape_only_when_open() {
        let mut menu = MobileMenu::new(600);
        assert_eq!(menu.handle(MenuEvent::EscapePressed), None);

        menu.handle(MenuEvent::HamburgerClicked);
        let update = menu.handle(MenuEvent::EscapePressed).unwrap();
        assert!(!update.state.open);
        assert!(update.focus_hamburger);
    }

    #[test]
    fn test_resize_closes_above_breakpoint() {
        let mut menu = MobileMenu::new(600);
        menu.handle(MenuEvent::HamburgerClicked);

        assert_eq!(menu.handle(MenuEvent::Resized { width: 600 }), None);
        assert!(menu.state().open);

        assert!(!menu.handle(MenuEvent::Resized { width: 601 }).unwrap().state.open);
    }
}
