use parking_lot::Mutex;
use serde::Serialize;
use std::io::Write;
use tracing::warn;

use super::{FormUi, NavSignal, NavigationUi, UiSignal};

/// Keeps every signal in memory. Used for headless runs and tests.
#[derive(Debug, Default)]
pub struct RecordingUi {
    form: Mutex<Vec<UiSignal>>,
    nav: Mutex<Vec<NavSignal>>,
}

impl RecordingUi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn form_signals(&self) -> Vec<UiSignal> {
        self.form.lock().clone()
    }

    pub fn nav_signals(&self) -> Vec<NavSignal> {
        self.nav.lock().clone()
    }

    pub fn take_form_signals(&self) -> Vec<UiSignal> {
        std::mem::take(&mut *self.form.lock())
    }

    pub fn take_nav_signals(&self) -> Vec<NavSignal> {
        std::mem::take(&mut *self.nav.lock())
    }
}

impl FormUi for RecordingUi {
    fn form_signal(&self, signal: UiSignal) {
        self.form.lock().push(signal);
    }
}

impl NavigationUi for RecordingUi {
    fn nav_signal(&self, signal: NavSignal) {
        self.nav.lock().push(signal);
    }
}

/// Writes each signal as one JSON object per line.
pub struct JsonLinesUi<W> {
    writer: Mutex<W>,
}

impl<W: Write + Send> JsonLinesUi<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }

    fn write_line<T: Serialize>(&self, signal: &T) {
        let mut writer = self.writer.lock();
        let result = serde_json::to_writer(&mut *writer, signal)
            .map_err(std::io::Error::from)
            .and_then(|_| writer.write_all(b"\n"))
            .and_then(|_| writer.flush());

        if let Err(e) = result {
            warn!("Failed to write UI signal: {}", e);
        }
    }
}

impl<W: Write + Send> FormUi for JsonLinesUi<W> {
    fn form_signal(&self, signal: UiSignal) {
        self.write_line(&signal);
    }
}

impl<W: Write + Send> NavigationUi for JsonLinesUi<W> {
    fn nav_signal(&self, signal: NavSignal) {
        self.write_line(&signal);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_lines_output() {
        let ui = JsonLinesUi::new(Vec::new());
        ui.form_signal(UiSignal::FormReset);
        ui.nav_signal(NavSignal::ScrollTo { top: 0.0 });

        let output = String::from_utf8(ui.into_inner()).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], r#"{"type":"FormReset"}"#);

        let nav: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(nav["type"], "ScrollTo");
        assert_eq!(nav["data"]["top"], 0.0);
    }

    #[test]
    fn test_recording_ui_take() {
        let ui = RecordingUi::new();
        ui.form_signal(UiSignal::FormReset);
        assert_eq!(ui.take_form_signals(), vec![UiSignal::FormReset]);
        assert!(ui.form_signals().is_empty());
    }
}
