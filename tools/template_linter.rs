/// Template Linter — checks story templates for blanks that won't work.
///
/// Usage: template_linter <templates_dir> [--ext <extension>]

use madlib_engine::core::library::{LibraryError, TemplateLibrary};
use madlib_engine::core::template::Template;
use std::process;

fn main() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        println!("Usage: template_linter <templates_dir> [--ext <extension>]");
        process::exit(0);
    }

    let templates_dir = &args[1];
    let mut extensions = Vec::new();

    let mut i = 2;
    while i < args.len() {
        if args[i] == "--ext" && i + 1 < args.len() {
            i += 1;
            extensions.push(args[i].clone());
        }
        i += 1;
    }
    if extensions.is_empty() {
        extensions.push("txt".to_string());
    }

    let library = TemplateLibrary::new(templates_dir, &extensions);
    let names = match library.list() {
        Ok(names) => names,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            process::exit(1);
        }
    };

    println!("Found {} templates", names.len());

    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    for name in &names {
        match library.load(name) {
            Ok(template) => lint_template(name, &template, &mut warnings),
            Err(LibraryError::Io { path, source }) => {
                errors.push(format!("'{}' could not be read: {}", path.display(), source))
            }
            Err(e) => errors.push(format!("'{}': {}", name, e)),
        }
    }

    println!("\n=== Template Lint Report ===\n");

    if errors.is_empty() && warnings.is_empty() {
        println!("All checks passed!");
    }

    for warning in &warnings {
        println!("WARNING: {}", warning);
    }

    for error in &errors {
        println!("ERROR: {}", error);
    }

    println!(
        "\nSummary: {} errors, {} warnings",
        errors.len(),
        warnings.len()
    );

    if errors.is_empty() {
        process::exit(0);
    } else {
        process::exit(1);
    }
}

fn lint_template(name: &str, template: &Template, warnings: &mut Vec<String>) {
    if !template.is_fillable() {
        warnings.push(format!("'{}' has no placeholders", name));
    }

    if template.has_unclosed_bracket() {
        warnings.push(format!("'{}' contains an unmatched '<'", name));
    }

    for placeholder in template.placeholders() {
        if placeholder.trim() != placeholder {
            warnings.push(format!(
                "'{}' placeholder '<{}>' has leading or trailing whitespace",
                name, placeholder
            ));
        }
        if placeholder.contains('<') || placeholder.contains('\n') {
            warnings.push(format!(
                "'{}' placeholder '<{}>' spans a stray '<' or a line break",
                name, placeholder
            ));
        }
    }
}
