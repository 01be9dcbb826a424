//! Text annotation (sticky note)

use crate::annotations::annotation::FieldReader;
use crate::annotations::MarkupInfo;
use crate::error::Result;
use crate::objects::{Dictionary, Object};

/// Standard icons for text annotations
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Icon {
    Comment,
    Key,
    /// Viewer default
    #[default]
    Note,
    Help,
    NewParagraph,
    Paragraph,
    Insert,
}

impl Icon {
    pub fn pdf_name(&self) -> &'static str {
        match self {
            Icon::Comment => "Comment",
            Icon::Key => "Key",
            Icon::Note => "Note",
            Icon::Help => "Help",
            Icon::NewParagraph => "NewParagraph",
            Icon::Paragraph => "Paragraph",
            Icon::Insert => "Insert",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextAnnotation {
    pub markup: MarkupInfo,
    /// Initially open (Open)
    pub open: Option<bool>,
    /// Icon name (Name); viewers may define names beyond [`Icon`]
    pub icon: Option<String>,
    /// State model, e.g. Review or Marked (StateModel)
    pub state_model: Option<Vec<u8>>,
    /// State within the model (State)
    pub state: Option<Vec<u8>>,
}

impl TextAnnotation {
    pub fn with_icon(mut self, icon: Icon) -> Self {
        self.icon = Some(icon.pdf_name().to_string());
        self
    }

    pub fn with_state(mut self, state_model: &str, state: &str) -> Self {
        self.state_model = Some(state_model.as_bytes().to_vec());
        self.state = Some(state.as_bytes().to_vec());
        self
    }

    pub(crate) fn extract(fields: &mut FieldReader<'_>) -> Result<Self> {
        Ok(Self {
            markup: MarkupInfo::extract(fields)?,
            open: fields.take_bool("Open")?,
            icon: fields.take_name("Name")?,
            state_model: fields.take_string("StateModel")?,
            state: fields.take_string("State")?,
        })
    }

    pub(crate) fn write_entries(&self, dict: &mut Dictionary) {
        self.markup.write_entries(dict);
        if let Some(open) = self.open {
            dict.set("Open", open);
        }
        if let Some(icon) = &self.icon {
            dict.set("Name", Object::name(icon.as_str()));
        }
        if let Some(model) = &self.state_model {
            dict.set("StateModel", Object::String(model.clone()));
        }
        if let Some(state) = &self.state {
            dict.set("State", Object::String(state.clone()));
        }
    }
}
