/// Template filling — substituting collected words into a template.
///
/// One pass produces both the on-screen story (values wrapped in an
/// emphasis marker) and the plain story that gets saved.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::template::{Segment, Template};

/// Marker pair wrapped around substituted values in the display story.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Emphasis {
    pub open: String,
    pub close: String,
}

impl Emphasis {
    pub fn none() -> Self {
        Self {
            open: String::new(),
            close: String::new(),
        }
    }

    /// ANSI bold on / reset.
    pub fn bold() -> Self {
        Self {
            open: "\x1b[1m".to_string(),
            close: "\x1b[0m".to_string(),
        }
    }
}

impl Default for Emphasis {
    fn default() -> Self {
        Self::bold()
    }
}

/// Words collected from the user, keyed by placeholder name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inputs {
    values: FxHashMap<String, String>,
}

impl Inputs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, placeholder: impl Into<String>, value: impl Into<String>) {
        self.values.insert(placeholder.into(), value.into());
    }

    pub fn get(&self, placeholder: &str) -> Option<&str> {
        self.values.get(placeholder).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Whether every placeholder of `template` has a value.
    pub fn is_complete_for(&self, template: &Template) -> bool {
        template
            .placeholders()
            .iter()
            .all(|name| self.values.contains_key(*name))
    }

    /// Placeholders of `template` that have no value yet, in order.
    pub fn missing_for<'t>(&self, template: &'t Template) -> Vec<&'t str> {
        template
            .placeholders()
            .into_iter()
            .filter(|name| !self.values.contains_key(*name))
            .collect()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Inputs {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut inputs = Inputs::new();
        for (k, v) in iter {
            inputs.insert(k, v);
        }
        inputs
    }
}

/// A finished story in its two representations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Story {
    /// For the screen, with emphasis markers around each filled word.
    pub display: String,
    /// For saving, no markup.
    pub plain: String,
}

/// Fill a template without emphasis; `display` and `plain` are identical.
pub fn fill(template: &Template, inputs: &Inputs) -> Story {
    fill_with(template, inputs, &Emphasis::none())
}

/// Fill a template, wrapping substituted words in `emphasis` for display.
///
/// A placeholder with no value is left as its original `<name>` token in
/// both representations. Front ends that collect every placeholder before
/// filling never hit this.
pub fn fill_with(template: &Template, inputs: &Inputs, emphasis: &Emphasis) -> Story {
    let mut display = String::new();
    let mut plain = String::new();

    for segment in &template.segments {
        match segment {
            Segment::Literal(text) => {
                display.push_str(text);
                plain.push_str(text);
            }
            Segment::Placeholder(name) => match inputs.get(name) {
                Some(value) => {
                    display.push_str(&emphasis.open);
                    display.push_str(value);
                    display.push_str(&emphasis.close);
                    plain.push_str(value);
                }
                None => {
                    let token = format!("<{}>", name);
                    display.push_str(&token);
                    plain.push_str(&token);
                }
            },
        }
    }

    Story { display, plain }
}
