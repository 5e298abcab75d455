/// Input validation — per-placeholder word rules for the terminal flow.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A predicate applied to trimmed user input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rule {
    /// Only ASCII decimal digits.
    Digits,
    /// Lower-cased input must end with the given suffix.
    Suffix(String),
}

impl Rule {
    fn accepts(&self, trimmed: &str) -> bool {
        match self {
            Rule::Digits => trimmed.chars().all(|c| c.is_ascii_digit()),
            Rule::Suffix(suffix) => trimmed.to_lowercase().ends_with(&suffix.to_lowercase()),
        }
    }
}

/// Why an input was turned down, phrased for the person typing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    Empty,
    /// The line could not be decoded as text.
    NotText,
    NotANumber,
    MissingSuffix(String),
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::Empty => write!(f, "please enter something"),
            Rejection::NotText => write!(f, "please type plain text"),
            Rejection::NotANumber => write!(f, "please enter a whole number using digits only"),
            Rejection::MissingSuffix(suffix) => write!(f, "the word must end in \"{}\"", suffix),
        }
    }
}

/// Table of rules keyed by normalized placeholder name.
///
/// Names are lower-cased on insert and on lookup, so `<Number>` and
/// `<number>` share a rule. Whitespace is significant: `<number >` has no
/// rule. Placeholders without an entry accept any non-blank input.
#[derive(Debug, Clone)]
pub struct ValidationRules {
    rules: FxHashMap<String, Rule>,
}

impl Default for ValidationRules {
    fn default() -> Self {
        let mut rules = Self::empty();
        rules.insert("number", Rule::Digits);
        rules.insert("verb ending in -ing", Rule::Suffix("ing".to_string()));
        rules
    }
}

fn normalize(name: &str) -> String {
    name.to_lowercase()
}

impl ValidationRules {
    /// A table with no rules; only blank input is rejected.
    pub fn empty() -> Self {
        Self {
            rules: FxHashMap::default(),
        }
    }

    /// Add or replace the rule for a placeholder name.
    pub fn insert(&mut self, name: &str, rule: Rule) {
        self.rules.insert(normalize(name), rule);
    }

    /// Merge rules in; entries from `other` replace existing ones.
    pub fn extend<I>(&mut self, other: I)
    where
        I: IntoIterator<Item = (String, Rule)>,
    {
        for (name, rule) in other {
            self.insert(&name, rule);
        }
    }

    pub fn rule_for(&self, placeholder: &str) -> Option<&Rule> {
        self.rules.get(&normalize(placeholder))
    }

    /// Check raw input against the rule for `placeholder`.
    pub fn check(&self, raw: &str, placeholder: &str) -> Result<(), Rejection> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(Rejection::Empty);
        }

        match self.rule_for(placeholder) {
            Some(rule) if !rule.accepts(trimmed) => Err(match rule {
                Rule::Digits => Rejection::NotANumber,
                Rule::Suffix(suffix) => Rejection::MissingSuffix(suffix.clone()),
            }),
            _ => Ok(()),
        }
    }

    pub fn validate(&self, raw: &str, placeholder: &str) -> bool {
        self.check(raw, placeholder).is_ok()
    }
}

/// Validate with the built-in rule table.
pub fn validate(raw: &str, placeholder: &str) -> bool {
    ValidationRules::default().validate(raw, placeholder)
}
