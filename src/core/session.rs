/// Form session — state carried between the "generate" and "save" actions
/// of the form front end.
///
/// One session per visitor; nothing is shared between sessions.

use chrono::NaiveDateTime;
use std::path::PathBuf;
use thiserror::Error;

use crate::core::filler::{fill, Inputs, Story};
use crate::core::persist::{story_file_name, PersistError, StoryPersister};
use crate::core::template::Template;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("no template selected")]
    NoTemplate,
    #[error("nothing to save; generate a story first")]
    NothingToSave,
    #[error(transparent)]
    Persist(#[from] PersistError),
}

/// A story together with the template name it was generated from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedStory {
    pub story: Story,
    pub template_name: String,
}

#[derive(Debug, Clone, Default)]
pub struct FormSession {
    template: Option<Template>,
    generated: Option<GeneratedStory>,
}

impl FormSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Switch templates. Any previously generated story is dropped.
    pub fn select(&mut self, template: Template) {
        self.template = Some(template);
        self.generated = None;
    }

    pub fn template(&self) -> Option<&Template> {
        self.template.as_ref()
    }

    /// Placeholder names to render as form fields.
    pub fn fields(&self) -> Vec<&str> {
        self.template
            .as_ref()
            .map(|t| t.placeholders())
            .unwrap_or_default()
    }

    /// Fill the selected template with the submitted values.
    ///
    /// Submitted values are taken as-is; blank fields are not re-prompted
    /// and unsubmitted fields stay as their `<name>` token.
    pub fn generate(&mut self, inputs: &Inputs) -> Result<&Story, SessionError> {
        let template = self.template.as_ref().ok_or(SessionError::NoTemplate)?;
        let story = fill(template, inputs);
        let template_name = template.name.clone().unwrap_or_else(|| "story".to_string());

        let generated = self.generated.insert(GeneratedStory {
            story,
            template_name,
        });
        Ok(&generated.story)
    }

    pub fn generated(&self) -> Option<&GeneratedStory> {
        self.generated.as_ref()
    }

    /// Persist the last generated story.
    pub fn save(&self, persister: &StoryPersister) -> Result<PathBuf, SessionError> {
        let generated = self.generated.as_ref().ok_or(SessionError::NothingToSave)?;
        Ok(persister.persist(&generated.story.plain, &generated.template_name)?)
    }

    /// File name a download of the last story would carry at `now`.
    pub fn saved_file_name(&self, now: NaiveDateTime) -> Result<String, SessionError> {
        let generated = self.generated.as_ref().ok_or(SessionError::NothingToSave)?;
        Ok(story_file_name(&generated.template_name, now))
    }
}
