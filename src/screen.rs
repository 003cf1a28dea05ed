//! Display-agnostic render output.
//!
//! Stage handlers produce a [`Screen`]; the TUI and the text mode each draw it
//! their own way. Screens are plain data so that two renders of the same
//! state compare equal.

use crate::model::Stage;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tone {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub tone: Tone,
    pub text: String,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            tone: Tone::Info,
            text: text.into(),
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self {
            tone: Tone::Success,
            text: text.into(),
        }
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self {
            tone: Tone::Warning,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            tone: Tone::Error,
            text: text.into(),
        }
    }
}

/// Display-only indicator tile. Values are illustrative, never measured.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metric {
    pub label: String,
    pub value: String,
    pub delta: String,
}

impl Metric {
    pub fn new(label: &str, value: &str, delta: &str) -> Self {
        Self {
            label: label.to_string(),
            value: value.to_string(),
            delta: delta.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CheckState {
    Done,
    Pending,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Section {
    Notice(Notice),
    Heading(String),
    Text(Vec<String>),
    Checklist(Vec<(CheckState, String)>),
    Metrics(Vec<Metric>),
    /// `done` of `total` steps, with the caption of the current step.
    Progress {
        done: usize,
        total: usize,
        caption: String,
    },
    Code(String),
    Celebration(Vec<String>),
}

impl Section {
    pub fn text<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Section::Text(lines.into_iter().map(Into::into).collect())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Field {
    Number { label: String, min: u8, max: u8 },
    Text { label: String },
}

/// Button kinds a presentation layer can trigger. Payload-carrying actions
/// are assembled from the button and the field contents in `input`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    Begin,
    Verify,
    Retrieve,
    Read,
    Answer,
    Accept,
    Ponder,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Button {
    pub key: char,
    pub label: String,
    pub command: Command,
}

impl Button {
    pub fn new(key: char, label: &str, command: Command) -> Self {
        Self {
            key,
            label: label.to_string(),
            command,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Controls {
    pub field: Option<Field>,
    pub buttons: Vec<Button>,
}

impl Controls {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn button(button: Button) -> Self {
        Self {
            field: None,
            buttons: vec![button],
        }
    }

    /// Button triggered by Enter / an empty line.
    pub fn primary(&self) -> Option<&Button> {
        self.buttons.first()
    }

    pub fn by_key(&self, key: char) -> Option<&Button> {
        let key = key.to_ascii_lowercase();
        self.buttons.iter().find(|b| b.key == key)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Screen {
    pub stage: Stage,
    pub title: String,
    pub sections: Vec<Section>,
    pub controls: Controls,
}

impl Screen {
    pub fn new(stage: Stage, title: &str) -> Self {
        Self {
            stage,
            title: title.to_string(),
            sections: Vec::new(),
            controls: Controls::none(),
        }
    }

    pub fn with(mut self, section: Section) -> Self {
        self.sections.push(section);
        self
    }

    pub fn with_controls(mut self, controls: Controls) -> Self {
        self.controls = controls;
        self
    }

    pub fn progress(&self) -> Option<(usize, usize)> {
        self.sections.iter().find_map(|s| match s {
            Section::Progress { done, total, .. } => Some((*done, *total)),
            _ => None,
        })
    }
}
