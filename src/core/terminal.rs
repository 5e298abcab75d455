/// Terminal flow — menu, prompts and save confirmation over any line reader.
///
/// Generic over the reader and writer so the same flow runs on
/// stdin/stdout and on in-memory buffers.

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use thiserror::Error;

use crate::core::config::Config;
use crate::core::filler::{fill_with, Emphasis, Inputs, Story};
use crate::core::library::{LibraryError, TemplateLibrary};
use crate::core::persist::{base_name, PersistError, StoryPersister};
use crate::core::template::Template;
use crate::core::validation::{Rejection, ValidationRules};

#[derive(Debug, Error)]
pub enum FlowError {
    #[error("input closed")]
    InputClosed,
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error(transparent)]
    Library(#[from] LibraryError),
    #[error(transparent)]
    Persist(#[from] PersistError),
}

impl FlowError {
    /// Errors that end the whole session rather than the current round.
    pub fn is_fatal(&self) -> bool {
        matches!(self, FlowError::InputClosed | FlowError::Io(_))
    }
}

/// How a single round ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoundOutcome {
    /// Story shown; `saved` holds the file path if the user chose to save.
    Finished { story: Story, saved: Option<PathBuf> },
    /// The template had no placeholders.
    NothingToFill,
}

pub struct TerminalFlow<R, W> {
    input: R,
    output: W,
    library: TemplateLibrary,
    rules: ValidationRules,
    emphasis: Emphasis,
    persister: StoryPersister,
    rng: StdRng,
}

impl<R: BufRead, W: Write> TerminalFlow<R, W> {
    pub fn new(input: R, output: W, config: &Config) -> Self {
        Self {
            input,
            output,
            library: config.library(),
            rules: config.validation_rules(),
            emphasis: config.emphasis.clone(),
            persister: config.persister(),
            rng: StdRng::from_entropy(),
        }
    }

    /// Fix the random template choice, for reproducible runs.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Read one line. `None` means the line was not valid UTF-8 and has
    /// been discarded.
    fn read_line(&mut self) -> Result<Option<String>, FlowError> {
        let mut buf = Vec::new();
        if self.input.read_until(b'\n', &mut buf)? == 0 {
            return Err(FlowError::InputClosed);
        }
        match String::from_utf8(buf) {
            Ok(line) => Ok(Some(line.trim_end_matches(['\r', '\n']).to_string())),
            Err(_) => Ok(None),
        }
    }

    fn prompt(&mut self, text: &str) -> Result<String, FlowError> {
        loop {
            write!(self.output, "{}", text)?;
            self.output.flush()?;
            match self.read_line()? {
                Some(line) => return Ok(line),
                None => {
                    log::warn!("discarded input line that was not valid UTF-8");
                    writeln!(self.output, "  Invalid input: {}.", Rejection::NotText)?;
                }
            }
        }
    }

    /// Ask a yes/no question until answered.
    pub fn confirm(&mut self, question: &str) -> Result<bool, FlowError> {
        loop {
            let answer = self.prompt(&format!("{} (y/n): ", question))?;
            match answer.trim().to_lowercase().as_str() {
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                _ => writeln!(self.output, "Please answer y or n.")?,
            }
        }
    }

    /// Show the numbered template menu and return the chosen file name.
    pub fn choose_template(&mut self) -> Result<String, FlowError> {
        let names = self.library.list()?;

        writeln!(self.output, "\nAvailable templates:")?;
        for (i, name) in names.iter().enumerate() {
            writeln!(self.output, "  {}. {}", i + 1, base_name(name))?;
        }
        let random_choice = names.len() + 1;
        writeln!(self.output, "  {}. Surprise me", random_choice)?;

        loop {
            let raw = self.prompt("Choose a template: ")?;
            match raw.trim().parse::<usize>() {
                Ok(n) if (1..=names.len()).contains(&n) => return Ok(names[n - 1].clone()),
                Ok(n) if n == random_choice => {
                    let name = self.library.choose_random(&mut self.rng)?;
                    writeln!(self.output, "Picked '{}'.", base_name(&name))?;
                    return Ok(name);
                }
                _ => writeln!(
                    self.output,
                    "Please enter a number from 1 to {}.",
                    random_choice
                )?,
            }
        }
    }

    /// Prompt for every placeholder, re-asking until each answer passes
    /// its validation rule.
    pub fn collect_inputs(&mut self, template: &Template) -> Result<Inputs, FlowError> {
        let mut inputs = Inputs::new();
        for placeholder in template.placeholders() {
            loop {
                let raw = self.prompt(&format!("Enter a {}: ", placeholder))?;
                match self.rules.check(&raw, placeholder) {
                    Ok(()) => {
                        inputs.insert(placeholder, raw.trim());
                        break;
                    }
                    Err(rejection) => {
                        log::warn!("rejected input for '{}': {}", placeholder, rejection);
                        writeln!(self.output, "  Invalid input: {}.", rejection)?;
                    }
                }
            }
        }
        Ok(inputs)
    }

    /// Load a template, fill it in, show the story and offer to save it.
    pub fn play_round(&mut self, template_name: &str) -> Result<RoundOutcome, FlowError> {
        let template = self.library.load(template_name)?;
        if !template.is_fillable() {
            writeln!(
                self.output,
                "'{}' has nothing to fill in.",
                base_name(template_name)
            )?;
            return Ok(RoundOutcome::NothingToFill);
        }

        let inputs = self.collect_inputs(&template)?;
        debug_assert!(inputs.is_complete_for(&template));
        let story = fill_with(&template, &inputs, &self.emphasis);

        writeln!(self.output, "\n--- Your Story ---")?;
        writeln!(self.output, "{}", story.display)?;
        writeln!(self.output, "--- End ---\n")?;

        let saved = if self.confirm("Save this story?")? {
            let path = self.persister.persist(&story.plain, template_name)?;
            writeln!(self.output, "Story saved to: {}", path.display())?;
            Some(path)
        } else {
            None
        };

        Ok(RoundOutcome::Finished { story, saved })
    }

    /// Run rounds until the user declines both replay and restart.
    ///
    /// A round that fails on a missing template or a failed save is reported
    /// and the flow carries on. Closed input and output errors end the run.
    pub fn run(&mut self) -> Result<(), FlowError> {
        loop {
            let template_name = match self.choose_template() {
                Ok(name) => name,
                Err(FlowError::Library(LibraryError::NoTemplates(dir))) => {
                    writeln!(self.output, "No templates found in '{}'.", dir.display())?;
                    return Ok(());
                }
                Err(e) => return Err(e),
            };

            loop {
                match self.play_round(&template_name) {
                    Ok(_) => {}
                    Err(e) if e.is_fatal() => return Err(e),
                    Err(e) => {
                        log::warn!("round failed: {}", e);
                        writeln!(self.output, "Something went wrong: {}", e)?;
                    }
                }
                if !self.confirm("Play again with the same template?")? {
                    break;
                }
            }

            if !self.confirm("Pick a new template?")? {
                writeln!(self.output, "Goodbye!")?;
                return Ok(());
            }
        }
    }
}
