//! Informational commands: template listings and usage examples.

use console::style;
use std::fmt::Write;

use crate::templates::{PROPERTY_CATEGORY, TemplateCatalog, TemplateDescriptor};

/// Render `list templates`
pub fn list_templates(catalog: &TemplateCatalog) -> String {
    let generators = catalog.generators();
    let properties = catalog.properties();
    let mut output = String::new();

    if generators.is_empty() && properties.is_empty() {
        let _ = writeln!(output, "{}", style("No templates found.").yellow());
        output.push_str(&custom_layout_hint());
        return output;
    }

    let _ = writeln!(output, "{}", style("Available generators:").green());
    push_split(&mut output, &generators);

    if !properties.is_empty() {
        let _ = writeln!(output, "\n{}", style("Available property templates:").green());
        push_split(&mut output, &properties);
    }
    output
}

/// Render `list types`
pub fn list_types(catalog: &TemplateCatalog) -> String {
    let (builtin, custom) = catalog.template_types();
    let mut output = String::new();

    if builtin.is_empty() && custom.is_empty() {
        let _ = writeln!(output, "{}", style("No template types found.").yellow());
        return output;
    }

    let _ = writeln!(output, "{}", style("Available template types:").green());
    push_section(&mut output, "Built-in", builtin.iter().copied());
    push_section(&mut output, "Custom", custom.iter().copied());
    let _ = writeln!(
        output,
        "{}",
        style("\n💡 To create custom template types, add directories to your project's templates/ folder")
            .dim()
    );
    output
}

/// Render `custom:list`
pub fn list_custom(catalog: &TemplateCatalog) -> String {
    let custom = catalog.custom_generators();
    let mut output = String::new();

    if custom.is_empty() {
        let _ = writeln!(output, "{}", style("No custom templates found.").yellow());
        output.push_str(&custom_layout_hint());
        return output;
    }

    let _ = writeln!(output, "{}", style("Available custom templates:").green());
    for descriptor in custom {
        let _ = writeln!(output, "    - {}", descriptor.short_id());
    }
    let _ = writeln!(
        output,
        "{}",
        style("\n💡 Run one with: hexogen custom <category/name>").dim()
    );
    output
}

/// Render `help`
pub fn usage_examples() -> String {
    let mut output = String::new();
    let _ = writeln!(output, "{}", style("\nHexogen CLI Usage Examples:").cyan());

    let sections: [(&str, &[&str]); 3] = [
        (
            "Simplified Commands (Recommended):",
            &[
                "hexogen resource",
                "hexogen resource User --schema ./schemas/user.json",
                "hexogen resource --no-prettier",
                "hexogen subentity",
                "hexogen versioned",
                "hexogen add property",
                "hexogen list templates",
                "hexogen list types",
            ],
        ),
        (
            "Advanced Commands (For Power Users):",
            &[
                "hexogen g resource",
                "hexogen g subentity",
                "hexogen g versioned",
                "hexogen g custom:my-generator",
                "hexogen g custom:migration/create-table",
            ],
        ),
        (
            "Custom Templates:",
            &[
                "hexogen custom:list",
                "hexogen custom test/unit-test --name User",
                "hexogen custom migration/create-table --schema ./schemas/user.json",
            ],
        ),
    ];

    for (title, commands) in sections {
        let _ = writeln!(output, "{}", style(format!("\n{title}")).green());
        for command in commands {
            let _ = writeln!(output, "  $ {command}");
        }
    }
    let _ = writeln!(output, "\n  $ hexogen help");
    output
}

/// Built-in then custom entries, each under its own header when non-empty
fn push_split(output: &mut String, descriptors: &[&TemplateDescriptor]) {
    let (custom, builtin): (Vec<&&TemplateDescriptor>, Vec<&&TemplateDescriptor>) = descriptors.iter().partition(|d| d.is_custom());
    push_section(output, "Built-in", builtin.iter().map(|d| label(d)));
    push_section(output, "Custom", custom.iter().map(|d| label(d)));
}

/// Property templates are listed by bare name; the section already says what they are
fn label(descriptor: &TemplateDescriptor) -> String {
    if descriptor.category == PROPERTY_CATEGORY {
        descriptor.name.clone()
    } else if descriptor.is_custom() {
        descriptor.short_id()
    } else {
        descriptor.id()
    }
}

fn push_section<I, S>(output: &mut String, title: &str, items: I)
where
    I: IntoIterator<Item = S>,
    S: std::fmt::Display,
{
    let mut items = items.into_iter().peekable();
    if items.peek().is_none() {
        return;
    }
    let _ = writeln!(output, "{}", style(format!("  {title}:")).cyan());
    for item in items {
        let _ = writeln!(output, "    - {item}");
    }
}

fn custom_layout_hint() -> String {
    let lines = [
        "💡 To add custom templates, create a templates/ directory in your project:",
        "   templates/",
        "   ├── generate/",
        "   ├── generate-sub-entity/",
        "   ├── generate-version/",
        "   └── property/",
    ];
    lines
        .iter()
        .map(|line| format!("{}\n", style(line).dim()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    fn make(root: &Path, ids: &[&str]) {
        for id in ids {
            fs::create_dir_all(root.join(id)).unwrap();
        }
    }

    fn fixture(builtin: &[&str], custom: &[&str]) -> (tempfile::TempDir, TemplateCatalog) {
        let dir = tempdir().unwrap();
        make(&dir.path().join("pkg"), builtin);
        make(&dir.path().join("app"), custom);
        let catalog =
            TemplateCatalog::discover(&dir.path().join("pkg"), &dir.path().join("app")).unwrap();
        (dir, catalog)
    }

    const BUILTINS: [&str; 4] = [
        "generate/relational-resource",
        "generate-sub-entity/relational-resource",
        "generate-version/add-to-relational-resource",
        "property/add-to-relational-resource",
    ];

    #[test]
    fn test_list_templates_without_custom_section() {
        let (_dir, catalog) = fixture(&BUILTINS, &[]);
        let output = console::strip_ansi_codes(&list_templates(&catalog)).to_string();

        assert!(output.contains("Available generators:"));
        assert!(output.contains("    - relational-resource\n"));
        assert!(output.contains("    - generate-version/add-to-relational-resource\n"));
        assert!(output.contains("Available property templates:"));
        assert!(output.contains("    - add-to-relational-resource\n"));
        assert!(!output.contains("property/add-to-relational-resource"));
        assert!(!output.to_lowercase().contains("custom"));
    }

    #[test]
    fn test_list_templates_with_custom_section() {
        let (_dir, catalog) = fixture(&BUILTINS, &["migration/create-table", "property/enum"]);
        let output = console::strip_ansi_codes(&list_templates(&catalog)).to_string();

        assert_eq!(output.matches("  Custom:").count(), 2);
        assert!(output.contains("    - migration/create-table\n"));
        assert!(output.contains("    - enum\n"));
        assert!(!output.contains("property/enum"));
    }

    #[test]
    fn test_list_templates_empty_shows_hint() {
        let (_dir, catalog) = fixture(&[], &[]);
        let output = list_templates(&catalog);
        assert!(output.contains("No templates found."));
        assert!(output.contains("templates/"));
    }

    #[test]
    fn test_list_types() {
        let (_dir, catalog) = fixture(&BUILTINS, &["seed/users"]);
        let output = console::strip_ansi_codes(&list_types(&catalog)).to_string();

        assert!(output.contains("  Built-in:\n    - generate\n"));
        assert!(output.contains("  Custom:\n    - seed\n"));
    }

    #[test]
    fn test_list_custom() {
        let (_dir, catalog) = fixture(&BUILTINS, &["test/unit-test", "generate/my-generator"]);
        let output = list_custom(&catalog);
        assert!(output.contains("    - my-generator\n"));
        assert!(output.contains("    - test/unit-test\n"));
        assert!(!output.contains("relational-resource"));

        let (_empty_dir, empty) = fixture(&BUILTINS, &[]);
        assert!(list_custom(&empty).contains("No custom templates found."));
    }

    #[test]
    fn test_usage_examples() {
        let output = usage_examples();
        assert!(output.contains("$ hexogen resource"));
        assert!(output.contains("$ hexogen custom:list"));
        assert!(output.contains("$ hexogen help"));
    }
}
