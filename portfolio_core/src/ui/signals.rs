use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::validation::{FieldName, Validity};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldVisual {
    Neutral,
    Valid,
    Invalid,
}

impl From<Validity> for FieldVisual {
    fn from(validity: Validity) -> Self {
        match validity {
            Validity::Unvalidated => FieldVisual::Neutral,
            Validity::Valid => FieldVisual::Valid,
            Validity::Invalid => FieldVisual::Invalid,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Failure,
}

/// A transient banner reporting a submission outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: Uuid,
    pub text: String,
    pub kind: NotificationKind,
    pub shown_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(text: impl Into<String>, kind: NotificationKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            kind,
            shown_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum UiSignal {
    FieldVisual {
        field: FieldName,
        input_id: String,
        visual: FieldVisual,
    },
    FieldError {
        field: FieldName,
        error_id: String,
        message: String,
    },
    SubmitBusy {
        busy: bool,
        label: String,
    },
    BannerShown(Notification),
    BannerDismissed {
        id: Uuid,
    },
    FormReset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MenuState {
    pub open: bool,
    pub body_scroll_locked: bool,
    pub aria_expanded: bool,
}

impl MenuState {
    pub fn new(open: bool) -> Self {
        Self {
            open,
            body_scroll_locked: open,
            aria_expanded: open,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum NavSignal {
    MenuChanged(MenuState),
    FocusHamburger,
    ScrollTo { top: f64 },
    ActiveLinkChanged { section: String },
    NavbarElevated { elevated: bool },
}
