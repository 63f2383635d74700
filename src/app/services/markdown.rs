use std::fs;
use std::path::Path;

use pulldown_cmark::{Options, Parser, html};

use crate::app::infrastructure::error::Result;

/// README shown on the demo page unless settings point elsewhere.
pub const BUNDLED_README: &str = include_str!("../../../README.md");

/// Fixed document used by the theme gallery.
pub const THEMES_DOCUMENT: &str = include_str!("../../../docs/themes.md");

/// Marker separating the header (logo, badges) from the body of a README.
pub const DIVIDER: &str = "<!--dividing-->";

/// Drop everything up to and including the last divider.
pub fn strip_preamble(document: &str) -> &str {
    match document.rfind(DIVIDER) {
        Some(idx) => &document[idx + DIVIDER.len()..],
        None => document,
    }
}

/// Render markdown text to raw HTML.
pub fn render_markdown(text: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let parser = Parser::new_ext(text, options);
    let mut html_output = String::new();
    html::push_html(&mut html_output, parser);

    html_output
}

/// Wrap HTML in HelpView-compatible font tags.
pub fn wrap_html_for_helpview(html: &str) -> String {
    format!("<font face=\"Helvetica\" size=\"4\">{}</font>", html)
}

/// README body as HelpView markup.
pub fn render_readme(readme: &str) -> String {
    wrap_html_for_helpview(&render_markdown(strip_preamble(readme)))
}

/// Load the README to show, falling back to the bundled one.
pub fn load_readme(path: Option<&Path>) -> String {
    match path.map(read_document) {
        Some(Ok(text)) => text,
        Some(Err(e)) => {
            log::warn!("Failed to read README override: {}. Using bundled README.", e);
            BUNDLED_README.to_string()
        }
        None => BUNDLED_README.to_string(),
    }
}

fn read_document(path: &Path) -> Result<String> {
    Ok(fs::read_to_string(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_preamble_removes_header() {
        let doc = "<p>logo</p>\n<!--dividing-->\n# Body\n";
        assert_eq!(strip_preamble(doc), "\n# Body\n");
    }

    #[test]
    fn test_strip_preamble_uses_last_divider() {
        let doc = "a<!--dividing-->b<!--dividing-->c";
        assert_eq!(strip_preamble(doc), "c");
    }

    #[test]
    fn test_strip_preamble_without_divider() {
        let doc = "# Title\nNo divider here.";
        assert_eq!(strip_preamble(doc), doc);
    }

    #[test]
    fn test_render_markdown_features() {
        let html = render_markdown("# Title\n\n~~old~~\n\n| a | b |\n|---|---|\n| 1 | 2 |\n");
        assert!(html.contains("<h1>Title</h1>"));
        assert!(html.contains("<del>old</del>"));
        assert!(html.contains("<table>"));
    }

    #[test]
    fn test_render_readme_wraps_body_only() {
        let html = render_readme("HEADER\n<!--dividing-->\n\nBody text\n");
        assert!(html.starts_with("<font face=\"Helvetica\""));
        assert!(html.contains("Body text"));
        assert!(!html.contains("HEADER"));
    }

    #[test]
    fn test_bundled_documents_render() {
        assert!(BUNDLED_README.contains(DIVIDER));
        assert!(!render_readme(BUNDLED_README).is_empty());
        assert!(render_markdown(THEMES_DOCUMENT).contains("<h"));
    }

    #[test]
    fn test_load_readme_override() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("README.md");
        fs::write(&path, "# Custom").unwrap();
        assert_eq!(load_readme(Some(path.as_path())), "# Custom");
    }

    #[test]
    fn test_load_readme_missing_override() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.md");
        assert_eq!(load_readme(Some(path.as_path())), BUNDLED_README);
        assert_eq!(load_readme(None), BUNDLED_README);
    }
}
