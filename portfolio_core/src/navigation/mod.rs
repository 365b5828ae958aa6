//! Navigation state: mobile menu, smooth-scroll targets and the scroll spy

pub mod menu;
pub mod scroll;

pub use menu::{MenuEvent, MenuUpdate, MobileMenu};
pub use scroll::{ScrollSpy, Section};

use parking_lot::Mutex;
use std::sync::Arc;
use tracing::debug;

use crate::config::NavigationConfig;
use crate::ui::{MenuState, NavSignal, NavigationUi};
use crate::util::Debouncer;

struct NavState {
    menu: MobileMenu,
    spy: ScrollSpy,
    active: Option<String>,
    elevated: bool,
}

#[derive(Clone)]
pub struct Navigation {
    state: Arc<Mutex<NavState>>,
    ui: Arc<dyn NavigationUi>,
    resize: Debouncer,
}

impl Navigation {
    pub fn new(config: &NavigationConfig, ui: Arc<dyn NavigationUi>) -> Self {
        let state = NavState {
            menu: MobileMenu::new(config.mobile_breakpoint),
            spy: ScrollSpy::new(config),
            active: None,
            elevated: false,
        };

        Self {
            state: Arc::new(Mutex::new(state)),
            ui,
            resize: Debouncer::new(config.resize_debounce()),
        }
    }

    pub fn set_layout(&self, sections: Vec<Section>) {
        let mut state = self.state.lock();
        state.spy.set_sections(sections);
        debug!("Layout updated with {} sections", state.spy.sections().len());
    }

    pub fn on_hamburger_click(&self) {
        self.apply_menu(MenuEvent::HamburgerClicked);
    }

    pub fn on_outside_click(&self) {
        self.apply_menu(MenuEvent::OutsideClicked);
    }

    pub fn on_key_down(&self, key: &str) {
        if key == "Escape" {
            self.apply_menu(MenuEvent::EscapePressed);
        }
    }

    /// Closes the menu and scrolls to the linked section when it is known.
    pub fn on_link_click(&self, target: &str) {
        self.apply_menu(MenuEvent::LinkClicked);

        let top = self.state.lock().spy.scroll_target(target);
        match top {
            Some(top) => self.ui.nav_signal(NavSignal::ScrollTo { top }),
            None => debug!("No section for link target {}", target),
        }
    }

    pub fn on_logo_click(&self) {
        self.ui.nav_signal(NavSignal::ScrollTo { top: 0.0 });
    }

    pub fn on_scroll(&self, scroll_y: f64) {
        let mut signals = Vec::new();
        {
            let mut state = self.state.lock();

            let active = state.spy.active_section(scroll_y).map(|s| s.id.clone());
            if let Some(section) = active {
                if state.active.as_deref() != Some(section.as_str()) {
                    state.active = Some(section.clone());
                    signals.push(NavSignal::ActiveLinkChanged { section });
                }
            }

            let elevated = state.spy.is_elevated(scroll_y);
            if elevated != state.elevated {
                state.elevated = elevated;
                signals.push(NavSignal::NavbarElevated { elevated });
            }
        }

        for signal in signals {
            self.ui.nav_signal(signal);
        }
    }

    /// Debounced; only the last width of a burst is acted on. Must be called
    /// from within a tokio runtime.
    pub fn on_resize(&self, width: u32) {
        let state = self.state.clone();
        let ui = self.ui.clone();
        self.resize.call(move || {
            let update = state.lock().menu.handle(MenuEvent::Resized { width });
            Self::emit_menu(ui.as_ref(), update);
        });
    }

    pub fn menu_state(&self) -> MenuState {
        self.state.lock().menu.state()
    }

    pub fn active_section(&self) -> Option<String> {
        self.state.lock().active.clone()
    }

    fn apply_menu(&self, event: MenuEvent) {
        let update = self.state.lock().menu.handle(event);
        Self::emit_menu(self.ui.as_ref(), update);
    }

    fn emit_menu(ui: &dyn NavigationUi, update: Option<MenuUpdate>) {
        let Some(update) = update else {
            return;
        };

        ui.nav_signal(NavSignal::MenuChanged(update.state));
        if update.focus_hamburger {
            ui.nav_signal(NavSignal::FocusHamburger);
        }
    }
}
