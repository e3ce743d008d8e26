//! Output formatting utilities

use console::{style, Style};

use verstamp_core::ReplacementResult;

/// Print a success message
pub fn success(message: &str) {
    println!("{} {}", style("✓").green().bold(), message);
}

/// Print an error message
pub fn error(message: &str) {
    eprintln!("{} {}", style("✗").red().bold(), message);
}

/// Print a warning message
pub fn warning(message: &str) {
    println!("{} {}", style("!").yellow().bold(), message);
}

/// Print an info message
pub fn info(message: &str) {
    println!("{} {}", style("→").blue(), message);
}

/// Create a styled header
pub fn header(text: &str) -> String {
    style(text).bold().to_string()
}

/// Style for version numbers
pub fn version_style() -> Style {
    Style::new().green().bold()
}

/// Style for paths
pub fn path_style() -> Style {
    Style::new().cyan()
}

/// One line describing a replacement result
pub fn result_line(result: &ReplacementResult) -> String {
    let marker = if result.changed {
        style("✓").green().bold()
    } else {
        style("=").dim()
    };
    format!(
        "  {} {} ({} match{}, {} replaced)",
        marker,
        path_style().apply_to(result.file.display()),
        result.match_count,
        if result.match_count == 1 { "" } else { "es" },
        result.replacement_count
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_line_pluralizes() {
        console::set_colors_enabled(false);
        let one = result_line(&ReplacementResult::new("types.go", 1, 1));
        assert!(one.contains("types.go (1 match, 1 replaced)"));

        let two = result_line(&ReplacementResult::new("README.md", 2, 0));
        assert!(two.contains("README.md (2 matches, 0 replaced)"));
    }
}
