/// Template loading, extraction and filling against fixture files.

use madlib_engine::core::config::Config;
use madlib_engine::core::filler::{fill, Inputs};
use madlib_engine::core::library::{LibraryError, TemplateLibrary};
use madlib_engine::core::template::extract;

fn fixtures() -> TemplateLibrary {
    TemplateLibrary::new("tests/fixtures", &["txt".to_string()])
}

#[test]
fn fixture_library_lists_txt_only() {
    let names = fixtures().list().unwrap();
    assert_eq!(names, vec!["empty.txt", "fence.txt", "repeat.txt"]);
}

#[test]
fn fence_scenario() {
    let template = fixtures().load("fence.txt").unwrap();
    assert_eq!(template.placeholders(), vec!["animal", "adjective"]);

    let inputs: Inputs = [("animal", "fox"), ("adjective", "lazy")].into_iter().collect();
    let story = fill(&template, &inputs);
    assert_eq!(story.plain.trim_end(), "The fox jumped over the lazy fence.");
}

#[test]
fn repeated_placeholders_extracted_once() {
    let template = fixtures().load("repeat.txt").unwrap();
    assert_eq!(template.placeholders(), vec!["name", "friend"]);
}

#[test]
fn complete_fill_leaves_no_tokens() {
    let library = fixtures();
    for name in library.list().unwrap() {
        let template = library.load(&name).unwrap();
        let placeholders = template.placeholders();
        let inputs: Inputs = placeholders
            .iter()
            .enumerate()
            .map(|(i, p)| (p.to_string(), format!("word{}", i)))
            .collect();

        let story = fill(&template, &inputs);
        for (i, p) in placeholders.iter().enumerate() {
            assert!(
                !story.plain.contains(&format!("<{}>", p)),
                "{}: token <{}> survived",
                name,
                p
            );
            assert!(story.plain.contains(&format!("word{}", i)));
        }
    }
}

#[test]
fn partial_fill_passes_missing_token_through() {
    let template = fixtures().load("repeat.txt").unwrap();
    let inputs: Inputs = [("name", "Ada")].into_iter().collect();
    let story = fill(&template, &inputs);
    assert_eq!(story.plain.matches("Ada").count(), 3);
    assert_eq!(story.plain.matches("<friend>").count(), 2);
}

#[test]
fn template_without_placeholders_is_reported_not_filled() {
    let template = fixtures().load("empty.txt").unwrap();
    assert!(!template.is_fillable());
    assert!(extract(&template.source()).is_empty());
}

#[test]
fn unreadable_template_is_io_error() {
    let err = fixtures().load("missing.txt").unwrap_err();
    assert!(matches!(err, LibraryError::Io { .. }));
    assert!(err.to_string().contains("missing.txt"));
}

#[test]
fn bundled_templates_are_fillable() {
    let library = Config::default().library();
    let names = library.list().unwrap();
    assert!(!names.is_empty());
    for name in names {
        let template = library.load(&name).unwrap();
        assert!(template.is_fillable(), "{} has no blanks", name);
    }
}
