use serde::{Deserialize, Serialize};

use crate::config::NavigationConfig;

/// Page section geometry as reported by the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub id: String,
    pub top: f64,
    pub height: f64,
}

impl Section {
    fn contains(&self, position: f64) -> bool {
        position >= self.top && position < self.top + self.height
    }
}

/// Maps scroll offsets to the section whose nav link is highlighted.
#[derive(Debug, Clone)]
pub struct ScrollSpy {
    sections: Vec<Section>,
    navbar_offset: f64,
    active_offset: f64,
    elevated_threshold: f64,
}

impl ScrollSpy {
    pub fn new(config: &NavigationConfig) -> Self {
        Self {
            sections: Vec::new(),
            navbar_offset: config.navbar_offset,
            active_offset: config.active_offset,
            elevated_threshold: config.elevated_threshold,
        }
    }

    pub fn set_sections(&mut self, sections: Vec<Section>) {
        self.sections = sections;
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn active_section(&self, scroll_y: f64) -> Option<&Section> {
        let position = scroll_y + self.active_offset;
        self.sections.iter().find(|s| s.contains(position))
    }

    /// Scroll offset that brings a section just below the fixed navbar.
    /// Accepts `about` or an anchor like `#about`.
    pub fn scroll_target(&self, target: &str) -> Option<f64> {
        let id = target.strip_prefix('#').unwrap_or(target);
        self.sections
            .iter()
            .find(|s| s.id == id)
            .map(|s| s.top - self.navbar_offset)
    }

    pub fn is_elevated(&self, scroll_y: f64) -> bool {
        scroll_y > self.elevated_threshold
    }
}
