//! Procedure text markup sanitizing
//!
//! The editor in the front end produces small inline HTML fragments
//! (bold/italic/underline, font size and colour). Stored text is reduced to
//! that vocabulary so it can be rendered with `innerHTML` safely.

use scraper::{ElementRef, Html, Node};

/// Elements kept as-is (minus disallowed attributes)
const ALLOWED_ELEMENTS: &[&str] = &[
    "b", "strong", "i", "em", "u", "br", "p", "div", "span", "font", "ul", "ol", "li",
];

/// Elements removed together with everything inside them
const DROPPED_WITH_CONTENT: &[&str] = &[
    "script", "style", "iframe", "object", "embed", "template", "noscript", "svg", "math",
    "textarea", "select", "title",
];

const ALLOWED_STYLE_PROPERTIES: &[&str] = &[
    "color",
    "background-color",
    "font-size",
    "font-weight",
    "font-style",
    "text-decoration",
];

const CSS_COLOR_FUNCTIONS: &[&str] = &["rgb(", "rgba(", "hsl(", "hsla("];

/// Reduce `input` to the allowed inline markup.
///
/// Text is escaped, unknown elements are unwrapped (their text survives),
/// and only presentational attributes with plain values are kept.
pub fn sanitize(input: &str) -> String {
    let fragment = Html::parse_fragment(input);
    let mut out = String::with_capacity(input.len());
    write_children(fragment.root_element(), &mut out);
    out
}

/// Visible text of a fragment, tags removed
pub fn plain_text(input: &str) -> String {
    let fragment = Html::parse_fragment(&sanitize(input));
    fragment.root_element().text().collect()
}

/// True when the fragment renders no visible characters
pub fn is_blank(input: &str) -> bool {
    plain_text(input).chars().all(char::is_whitespace)
}

fn write_children(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        if let Some(child_element) = ElementRef::wrap(child) {
            write_element(child_element, out);
        } else if let Node::Text(text) = child.value() {
            escape_into(text, out);
        }
        // Comments, doctypes and processing instructions are dropped
    }
}

fn write_element(element: ElementRef<'_>, out: &mut String) {
    let name = element.value().name();

    if DROPPED_WITH_CONTENT.contains(&name) {
        return;
    }

    if !ALLOWED_ELEMENTS.contains(&name) {
        write_children(element, out);
        return;
    }

    out.push('<');
    out.push_str(name);

    if let Some(style) = element.value().attr("style").and_then(sanitize_style) {
        push_attr(out, "style", &style);
    }

    if name == "font" {
        if let Some(color) = element.value().attr("color") {
            if is_safe_css_value(color) {
                push_attr(out, "color", color.trim());
            }
        }
        if let Some(size) = element.value().attr("size") {
            let size = size.trim();
            if !size.is_empty() && size.len() <= 2 && size.chars().all(|c| c.is_ascii_digit()) {
                push_attr(out, "size", size);
            }
        }
    }

    out.push('>');

    if name == "br" {
        return;
    }

    write_children(element, out);
    out.push_str("</");
    out.push_str(name);
    out.push('>');
}

fn push_attr(out: &mut String, name: &str, value: &str) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    escape_into(value, out);
    out.push('"');
}

/// Keep only allow-listed declarations with plain values
fn sanitize_style(style: &str) -> Option<String> {
    let declarations: Vec<String> = style
        .split(';')
        .filter_map(|declaration| {
            let (property, value) = declaration.split_once(':')?;
            let property = property.trim().to_ascii_lowercase();
            let value = value.trim();
            if ALLOWED_STYLE_PROPERTIES.contains(&property.as_str()) && is_safe_css_value(value) {
                Some(format!("{}: {}", property, value))
            } else {
                None
            }
        })
        .collect();

    if declarations.is_empty() {
        None
    } else {
        Some(declarations.join("; "))
    }
}

fn is_safe_css_value(value: &str) -> bool {
    let value = value.trim().to_ascii_lowercase();
    if value.is_empty() || value.len() > 64 {
        return false;
    }

    if value.contains('(') {
        return CSS_COLOR_FUNCTIONS.iter().any(|func| {
            value
                .strip_prefix(func)
                .and_then(|rest| rest.strip_suffix(')'))
                .is_some_and(|args| {
                    args.chars()
                        .all(|c| c.is_ascii_digit() || matches!(c, ',' | ' ' | '.' | '%'))
                })
        });
    }

    value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '#' | '%' | '.' | ',' | '-' | ' '))
}

fn escape_into(text: &str, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_passes_through() {
        assert_eq!(sanitize("Contato inicial"), "Contato inicial");
        assert_eq!(sanitize("Análise de requisitos"), "Análise de requisitos");
    }

    #[test]
    fn test_editor_markup_is_kept() {
        assert_eq!(sanitize("<b>Step</b> <i>one</i>"), "<b>Step</b> <i>one</i>");
        assert_eq!(
            sanitize(r##"<font color="#ff0000" size="5">red</font>"##),
            r##"<font color="#ff0000" size="5">red</font>"##
        );
        assert_eq!(
            sanitize(r#"<span style="color: rgb(255, 0, 0); font-size: 18px">x</span>"#),
            r#"<span style="color: rgb(255, 0, 0); font-size: 18px">x</span>"#
        );
        assert_eq!(sanitize("line<br>next"), "line<br>next");
    }

    #[test]
    fn test_scripts_and_handlers_are_removed() {
        assert_eq!(sanitize("ok<script>alert(1)</script>"), "ok");
        assert_eq!(
            sanitize(r#"<b onclick="alert(1)">bold</b>"#),
            "<b>bold</b>"
        );
        assert_eq!(
            sanitize(r#"<a href="javascript:alert(1)">link</a>"#),
            "link"
        );
        assert_eq!(sanitize(r#"<img src=x onerror="alert(1)">"#), "");
    }

    #[test]
    fn test_unsafe_style_values_are_dropped() {
        assert_eq!(
            sanitize(r#"<span style="background-color: url(http://evil)">x</span>"#),
            "<span>x</span>"
        );
        assert_eq!(
            sanitize(r#"<span style="position: fixed; color: blue">x</span>"#),
            r#"<span style="color: blue">x</span>"#
        );
        assert_eq!(
            sanitize(r#"<font color="expression(alert(1))">x</font>"#),
            "<font>x</font>"
        );
    }

    #[test]
    fn test_text_is_escaped() {
        assert_eq!(sanitize("a &amp; b"), "a &amp; b");
        assert_eq!(sanitize("1 < 2"), "1 &lt; 2");
    }

    #[test]
    fn test_blank_detection() {
        assert!(is_blank(""));
        assert!(is_blank("   "));
        assert!(is_blank("<b> </b><br>"));
        assert!(is_blank("&nbsp;"));
        assert!(is_blank("<script>x</script>"));
        assert!(!is_blank("<i>x</i>"));
        assert_eq!(plain_text("<b>Step</b> 1"), "Step 1");
    }
}
