/// Story templates — parsing bracketed placeholders out of raw text.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

/// A segment of a parsed template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Segment {
    /// Literal text, emitted as-is.
    Literal(String),
    /// A named blank: `<name>`.
    Placeholder(String),
}

/// A parsed template: the source text split into literal and placeholder segments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    /// File name the template was loaded from, if any.
    pub name: Option<String>,
    pub segments: Vec<Segment>,
}

impl Template {
    /// Parse template text into segments.
    ///
    /// A placeholder is `<` followed by one or more characters that are not
    /// `>`, closed by the first `>`. Anything else is literal:
    /// - `<>` is literal text
    /// - a `<` with no later `>` is literal text
    /// - names may contain `<` and line breaks (`<<a>` names `<a`)
    ///
    /// Parsing never fails; a template with no placeholders is still valid.
    pub fn parse(input: &str) -> Template {
        let mut segments = Vec::new();
        let mut literal_buf = String::new();
        let chars: Vec<char> = input.chars().collect();
        let len = chars.len();
        let mut i = 0;
        // Index of the next `>` at or after the last search start; `None`
        // once no `>` remains, so later `<` are not rescanned.
        let mut next_close: Option<usize> = None;
        let mut searched = false;

        while i < len {
            if chars[i] != '<' {
                literal_buf.push(chars[i]);
                i += 1;
                continue;
            }

            // Find the closing bracket
            let start = i + 1;
            let stale = match next_close {
                Some(close) => close < start,
                None => !searched,
            };
            if stale {
                next_close = chars[start..]
                    .iter()
                    .position(|&c| c == '>')
                    .map(|offset| start + offset);
                searched = true;
            }

            match next_close {
                Some(end) if end > start => {
                    if !literal_buf.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal_buf)));
                    }
                    let name: String = chars[start..end].iter().collect();
                    segments.push(Segment::Placeholder(name));
                    i = end + 1;
                }
                _ => {
                    // `<>` or an unclosed `<`
                    literal_buf.push('<');
                    i += 1;
                }
            }
        }

        if !literal_buf.is_empty() {
            segments.push(Segment::Literal(literal_buf));
        }

        log::debug!("parsed template into {} segments", segments.len());
        Template {
            name: None,
            segments,
        }
    }

    /// Attach the file name the template came from.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Unique placeholder names in first-occurrence order.
    pub fn placeholders(&self) -> Vec<&str> {
        let mut seen = FxHashSet::default();
        self.segments
            .iter()
            .filter_map(|segment| match segment {
                Segment::Placeholder(name) => Some(name.as_str()),
                Segment::Literal(_) => None,
            })
            .filter(|name| seen.insert(*name))
            .collect()
    }

    /// Whether the template has anything to fill in.
    pub fn is_fillable(&self) -> bool {
        self.segments
            .iter()
            .any(|s| matches!(s, Segment::Placeholder(_)))
    }

    /// Whether some `<` in the text has no `>` anywhere after it.
    ///
    /// `<>` is literal but balanced, so it does not count.
    pub fn has_unclosed_bracket(&self) -> bool {
        let mut open_pending = false;
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => {
                    for c in text.chars() {
                        match c {
                            '<' => open_pending = true,
                            '>' => open_pending = false,
                            _ => {}
                        }
                    }
                }
                // A placeholder ends in `>`, closing any earlier `<`
                Segment::Placeholder(_) => open_pending = false,
            }
        }
        open_pending
    }

    /// Reassemble the original source text.
    pub fn source(&self) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Placeholder(name) => {
                    out.push('<');
                    out.push_str(name);
                    out.push('>');
                }
            }
        }
        out
    }
}

/// Extract the unique placeholder names from template text, in
/// first-occurrence order.
pub fn extract(template_text: &str) -> Vec<String> {
    Template::parse(template_text)
        .placeholders()
        .into_iter()
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_literal_only() {
        let t = Template::parse("Hello, world.");
        assert_eq!(
            t.segments,
            vec![Segment::Literal("Hello, world.".to_string())]
        );
        assert!(!t.is_fillable());
    }

    #[test]
    fn parse_placeholder() {
        let t = Template::parse("The <animal> ran.");
        assert_eq!(t.segments.len(), 3);
        assert_eq!(t.segments[1], Segment::Placeholder("animal".to_string()));
    }

    #[test]
    fn parse_name_with_spaces() {
        let t = Template::parse("I was <verb ending in -ing> all day.");
        assert_eq!(t.placeholders(), vec!["verb ending in -ing"]);
    }

    #[test]
    fn empty_brackets_are_literal() {
        let t = Template::parse("a <> b");
        assert_eq!(t.segments, vec![Segment::Literal("a <> b".to_string())]);
    }

    #[test]
    fn unclosed_bracket_is_literal() {
        let t = Template::parse("2 > 1 and <noun> < 3");
        assert_eq!(t.placeholders(), vec!["noun"]);
        assert_eq!(t.source(), "2 > 1 and <noun> < 3");
    }

    #[test]
    fn stray_open_bracket_runs_to_next_close() {
        let t = Template::parse("1 < 2 and <noun>");
        assert_eq!(t.placeholders(), vec![" 2 and <noun"]);
    }

    #[test]
    fn many_unclosed_brackets_stay_literal() {
        let text = format!("<a> {}", "< ".repeat(200_000));
        let t = Template::parse(&text);
        assert_eq!(t.placeholders(), vec!["a"]);
        assert_eq!(t.segments.len(), 2);
        assert_eq!(t.source(), text);
    }

    #[test]
    fn close_found_after_unclosed_run_is_reused() {
        let t = Template::parse("<< <b> < <c>");
        assert_eq!(t.placeholders(), vec!["< <b", " <c"]);
    }

    #[test]
    fn unclosed_bracket_detection() {
        assert!(!Template::parse("a <> b").has_unclosed_bracket());
        assert!(!Template::parse("x <noun> y").has_unclosed_bracket());
        assert!(!Template::parse("2 > 1").has_unclosed_bracket());
        assert!(Template::parse("<noun> < 3").has_unclosed_bracket());
        assert!(Template::parse("a < b").has_unclosed_bracket());
    }

    #[test]
    fn leading_bracket_joins_name() {
        // The name runs from the first `<` to the first `>`.
        let t = Template::parse("<<a>");
        assert_eq!(t.placeholders(), vec!["<a"]);
    }

    #[test]
    fn name_may_span_lines() {
        let t = Template::parse("<first\nsecond>");
        assert_eq!(t.placeholders(), vec!["first\nsecond"]);
    }

    #[test]
    fn dedup_preserves_first_occurrence() {
        assert_eq!(extract("<a> then <b> then <a>"), vec!["a", "b"]);
    }

    #[test]
    fn placeholders_are_case_sensitive() {
        assert_eq!(extract("<Noun> <noun>"), vec!["Noun", "noun"]);
    }

    #[test]
    fn extraction_is_idempotent() {
        let text = "<x> <y> <x> <z>";
        assert_eq!(extract(text), extract(text));
    }

    #[test]
    fn no_matches_yields_empty() {
        assert!(extract("Nothing to see here.").is_empty());
        assert!(extract("").is_empty());
    }

    #[test]
    fn source_round_trips() {
        let text = "The <animal> jumped over the <adjective> fence.";
        assert_eq!(Template::parse(text).source(), text);
    }

    #[test]
    fn template_serde_roundtrip() {
        let t = Template::parse("A <noun>.").with_name("a.txt");
        let serialized = ron::to_string(&t).unwrap();
        let deserialized: Template = ron::from_str(&serialized).unwrap();
        assert_eq!(deserialized, t);
    }
}
