//! Visibility rules and text collection for DOM elements.

use scraper::{ElementRef, Node};

/// Elements whose content never renders as page text.
const HIDDEN_TAGS: [&str; 8] = [
    "script", "style", "noscript", "template", "svg", "head", "iframe", "object",
];

/// Whether the element itself is hidden, ignoring ancestors.
fn hidden_self(element: &ElementRef<'_>) -> bool {
    let el = element.value();
    if HIDDEN_TAGS.contains(&el.name()) {
        return true;
    }
    if el.attr("hidden").is_some() {
        return true;
    }
    if el
        .attr("aria-hidden")
        .is_some_and(|v| v.trim().eq_ignore_ascii_case("true"))
    {
        return true;
    }
    if el.name() == "input" && el.attr("type").is_some_and(|t| t.eq_ignore_ascii_case("hidden")) {
        return true;
    }
    el.attr("style").is_some_and(|style| {
        let style: String = style
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_lowercase();
        style.contains("display:none") || style.contains("visibility:hidden")
    })
}

/// An element is visible when neither it nor any ancestor is hidden.
pub fn is_visible(element: &ElementRef<'_>) -> bool {
    if hidden_self(element) {
        return false;
    }
    !element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .any(|ancestor| hidden_self(&ancestor))
}

/// Text of the element and its visible descendants, whitespace-collapsed.
///
/// Only descendants are filtered here; call [`is_visible`] for the element itself.
pub fn visible_text(element: &ElementRef<'_>) -> String {
    let mut raw = String::new();
    push_text(element, &mut raw);
    collapse_whitespace(&raw)
}

fn push_text(element: &ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(el) => {
                if el.name() == "br" {
                    out.push(' ');
                    continue;
                }
                if let Some(child_el) = ElementRef::wrap(child) {
                    if !hidden_self(&child_el) {
                        push_text(&child_el, out);
                    }
                }
            }
            _ => {}
        }
    }
}

/// Collapse runs of whitespace into single spaces and trim the ends.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::{Html, Selector};

    fn first<'a>(doc: &'a Html, selector: &str) -> ElementRef<'a> {
        let sel = Selector::parse(selector).unwrap();
        doc.select(&sel).next().unwrap()
    }

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("  a \n\t b  c "), "a b c");
        assert_eq!(collapse_whitespace("   "), "");
    }

    #[test]
    fn test_hidden_attribute_and_aria() {
        let doc = Html::parse_document(
            r#"<div hidden><p id="a">x</p></div><p id="b" aria-hidden="TRUE">y</p><p id="c">z</p>"#,
        );
        assert!(!is_visible(&first(&doc, "#a")));
        assert!(!is_visible(&first(&doc, "#b")));
        assert!(is_visible(&first(&doc, "#c")));
    }

    #[test]
    fn test_inline_style_hidden() {
        let doc = Html::parse_document(
            r#"<section style="display: none"><p id="a">x</p></section>
               <p id="b" style="color:red; Visibility : hidden">y</p>
               <p id="c" style="display:block">z</p>"#,
        );
        assert!(!is_visible(&first(&doc, "#a")));
        assert!(!is_visible(&first(&doc, "#b")));
        assert!(is_visible(&first(&doc, "#c")));
    }

    #[test]
    fn test_visible_text_skips_hidden_descendants() {
        let doc = Html::parse_document(
            r#"<p id="p">Fast <b>and</b> simple<span hidden> secret</span><script>var x=1;</script><br>pricing</p>"#,
        );
        assert_eq!(visible_text(&first(&doc, "#p")), "Fast and simple pricing");
    }
}
