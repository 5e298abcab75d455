//! Madlib Engine — fill-in-the-blanks story generation.
//!
//! Loads text templates with `<placeholder>` blanks, collects a word for
//! each blank, substitutes them back in and saves the finished story to a
//! timestamped file. Shared by the terminal front end and the form (WASM)
//! front end.

pub mod core;

pub use crate::core::filler::{fill, fill_with, Emphasis, Inputs, Story};
pub use crate::core::persist::StoryPersister;
pub use crate::core::template::{extract, Template};
pub use crate::core::validation::{validate, ValidationRules};
