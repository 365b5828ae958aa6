use serde::{Deserialize, Serialize};

use crate::navigation::Section;

/// Input events produced by the page.
///
/// Field names stay strings here; an unknown one is rejected when the
/// event is dispatched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum SiteEvent {
    FieldBlur { field: String, value: String },
    FieldInput { field: String, value: String },
    Submit,
    Reset,
    Layout { sections: Vec<Section> },
    Scroll { y: f64 },
    HamburgerClick,
    LinkClick { target: String },
    OutsideClick,
    KeyDown { key: String },
    Resize { width: u32 },
    LogoClick,
}

impl SiteEvent {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
