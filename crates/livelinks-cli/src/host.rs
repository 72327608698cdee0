use std::borrow::Cow;

use livelinks_engine::{
    Affordance, EditorFocus, ModeSwitchButton, Navigator, PointerAffordancePort, SelectionRange,
};

/// A stand-in editor that records what the engine asked of it.
#[derive(Debug, Default)]
pub struct ConsoleHost {
    text: String,
    pub selection: Vec<SelectionRange>,
    pub events: Vec<String>,
}

impl ConsoleHost {
    pub fn new(text: String) -> Self {
        Self {
            text,
            ..Self::default()
        }
    }

    /// Drains the recorded events.
    pub fn take_events(&mut self) -> Vec<String> {
        std::mem::take(&mut self.events)
    }
}

impl Navigator for ConsoleHost {
    fn navigate_internal(&mut self, destination: &str) {
        self.events.push(format!("open note {destination}"));
    }

    fn navigate_external(&mut self, destination: &str) {
        self.events.push(format!("open url {destination}"));
    }
}

impl PointerAffordancePort for ConsoleHost {
    fn set_affordance(&mut self, affordance: Affordance) {
        let name = match affordance {
            Affordance::TextCursor => "text cursor",
            Affordance::LinkPointer => "link pointer",
        };
        self.events.push(format!("pointer: {name}"));
    }
}

impl EditorFocus for ConsoleHost {
    fn text(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.text)
    }

    fn place_cursor(&mut self, offset: usize) {
        self.selection = vec![SelectionRange::caret(offset)];
        self.events.push(format!("cursor at {offset}"));
    }

    fn blur(&mut self) {
        self.events.push("editor blurred".to_string());
    }
}

/// The editing/reading toggle; only its visibility matters here.
#[derive(Debug, Default)]
pub struct ConsoleButton {
    pub hidden: bool,
}

impl ModeSwitchButton for ConsoleButton {
    fn set_hidden(&mut self, hidden: bool) {
        self.hidden = hidden;
    }
}
