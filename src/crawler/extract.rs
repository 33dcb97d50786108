//! Text extraction from rendered HTML
//!
//! The fetch capability returns extracted text, not raw markup. This is
//! deliberately plain: visible text of the `<body>`, one trimmed line
//! per text node, script/style/noscript contents dropped.

use scraper::{ElementRef, Html, Selector};

/// Extracts the visible text content from a rendered HTML document
///
/// Falls back to an empty string when the document has no body.
pub fn extract_text(html: &str) -> String {
    let document = Html::parse_document(html);

    let Some(body_selector) = Selector::parse("body").ok() else {
        return String::new();
    };

    let Some(body) = document.select(&body_selector).next() else {
        return String::new();
    };

    collect_text(body)
}

/// Walks the element's subtree collecting text nodes, skipping the
/// contents of non-visible elements.
fn collect_text(root: ElementRef) -> String {
    let mut lines = Vec::new();

    for node in root.descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };

        let hidden_parent = node
            .parent()
            .and_then(|parent| parent.value().as_element())
            .map(|element| matches!(element.name(), "script" | "style" | "noscript"))
            .unwrap_or(false);
        if hidden_parent {
            continue;
        }

        let trimmed = text.trim();
        if !trimmed.is_empty() {
            lines.push(trimmed.to_string());
        }
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_body_text() {
        let html = r#"<html><head><title>T</title></head>
<body><h1>Heading</h1><p>First paragraph.</p></body></html>"#;
        assert_eq!(extract_text(html), "Heading\nFirst paragraph.");
    }

    #[test]
    fn test_skips_script_and_style_contents() {
        let html = r#"<html><body>
<p>Visible</p>
<script>var hidden = 1;</script>
<style>p { color: red; }</style>
</body></html>"#;
        assert_eq!(extract_text(html), "Visible");
    }

    #[test]
    fn test_ignores_head_only_text() {
        let html = "<html><head><title>Only a title</title></head><body></body></html>";
        assert_eq!(extract_text(html), "");
    }

    #[test]
    fn test_nested_elements_flatten_in_order() {
        let html = "<html><body><div><span>a</span><div><span>b</span></div></div></body></html>";
        assert_eq!(extract_text(html), "a\nb");
    }
}
