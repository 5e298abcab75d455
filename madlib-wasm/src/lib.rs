//! WASM bindings for madlib-engine — powers the form front end.
//!
//! The page keeps one `MadlibForm` per visitor: pick a template, render a
//! text field per placeholder, generate, then save. Browsers cannot write
//! to the save directory, so `save` hands back the file name and plain text
//! for the page to offer as a download.

use wasm_bindgen::prelude::*;

use madlib_engine::core::filler::Inputs;
use madlib_engine::core::session::FormSession;
use madlib_engine::core::template::Template;

// ---------------------------------------------------------------------------
// Embedded templates — compiled into the WASM binary
// ---------------------------------------------------------------------------
mod data {
    pub const TEMPLATES: &[(&str, &str)] = &[
        ("adventure.txt", include_str!("../../templates/adventure.txt")),
        ("space.txt", include_str!("../../templates/space.txt")),
        ("zoo.txt", include_str!("../../templates/zoo.txt")),
    ];
}

// ---------------------------------------------------------------------------
// JSON helper types for communication across the WASM boundary
// ---------------------------------------------------------------------------
#[derive(serde::Serialize)]
struct SavedStory {
    file_name: String,
    text: String,
}

fn lookup(name: &str) -> Option<&'static str> {
    data::TEMPLATES
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, body)| *body)
}

fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<String, JsError> {
    serde_json::to_string(value).map_err(|e| JsError::new(&format!("Serialization error: {e}")))
}

/// One visitor's form state.
#[wasm_bindgen]
pub struct MadlibForm {
    session: FormSession,
}

#[wasm_bindgen]
impl MadlibForm {
    #[wasm_bindgen(constructor)]
    pub fn new() -> MadlibForm {
        MadlibForm {
            session: FormSession::new(),
        }
    }

    /// Return JSON array of template names for the dropdown.
    pub fn templates() -> String {
        let names: Vec<&str> = data::TEMPLATES.iter().map(|(n, _)| *n).collect();
        serde_json::to_string(&names).unwrap_or_else(|_| "[]".to_string())
    }

    /// Select a template by name. Clears any generated story.
    pub fn select(&mut self, name: &str) -> Result<(), JsError> {
        let body = lookup(name).ok_or_else(|| JsError::new(&format!("Unknown template: {name}")))?;
        self.session.select(Template::parse(body).with_name(name));
        Ok(())
    }

    /// Return JSON array of placeholder names, one text field each.
    ///
    /// An empty array means the template has nothing to fill in.
    pub fn fields(&self) -> Result<String, JsError> {
        to_json(&self.session.fields())
    }

    /// Generate the story from a JSON object of field values.
    ///
    /// Expected JSON shape:
    /// ```json
    /// { "noun": "hat", "adjective": "green" }
    /// ```
    pub fn generate(&mut self, inputs_json: &str) -> Result<String, JsError> {
        let values: std::collections::HashMap<String, String> = serde_json::from_str(inputs_json)
            .map_err(|e| JsError::new(&format!("Invalid inputs JSON: {e}")))?;
        let inputs: Inputs = values.into_iter().collect();
        let story = self
            .session
            .generate(&inputs)
            .map_err(|e| JsError::new(&e.to_string()))?;
        Ok(story.plain.clone())
    }

    /// Whether `save` is available.
    pub fn can_save(&self) -> bool {
        self.session.generated().is_some()
    }

    /// Return JSON `{ "file_name": ..., "text": ... }` for the last story.
    pub fn save(&self) -> Result<String, JsError> {
        let now = chrono::Local::now().naive_local();
        let file_name = self
            .session
            .saved_file_name(now)
            .map_err(|e| JsError::new(&e.to_string()))?;
        let text = self
            .session
            .generated()
            .map(|g| g.story.plain.clone())
            .unwrap_or_default();
        to_json(&SavedStory { file_name, text })
    }
}

impl Default for MadlibForm {
    fn default() -> Self {
        Self::new()
    }
}
