use scraper::{node::Node, ElementRef, Html, Selector};

use crate::selectors::BODY_SELECTOR;

const INVISIBLE_TAGS: [&str; 5] = ["script", "style", "noscript", "template", "head"];

/// `content` attribute of the first matching meta tag that has a non-blank one.
pub(super) fn meta_content(doc: &Html, selector: &Selector) -> Option<String> {
    doc.select(selector)
        .filter_map(|el| el.value().attr("content"))
        .map(str::trim)
        .find(|c| !c.is_empty())
        .map(str::to_string)
}

/// Concatenated text of an element and its descendants.
pub(super) fn element_text(el: &ElementRef) -> String {
    el.text().collect::<String>()
}

/// Text a visitor would see: body text minus scripts and styles.
pub(super) fn visible_text(doc: &Html) -> String {
    let mut out = String::new();
    match doc.select(&BODY_SELECTOR).next() {
        Some(body) => collect_visible(&body, &mut out),
        None => collect_visible(&doc.root_element(), &mut out),
    }
    out
}

fn collect_visible(el: &ElementRef, out: &mut String) {
    for child in el.children() {
        match child.value() {
            Node::Text(text) => {
                out.push_str(text);
                out.push(' ');
            }
            Node::Element(e) if INVISIBLE_TAGS.contains(&e.name()) => {}
            Node::Element(_) => {
                if let Some(child_el) = ElementRef::wrap(child) {
                    collect_visible(&child_el, out);
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selectors::OG_TITLE_SELECTOR;

    #[test]
    fn visible_text_skips_scripts_and_styles() {
        let doc = Html::parse_document(
            r#"<html><head><title>T</title></head><body>
                <p>보이는 글</p><script>var price = "99,000원";</script>
                <style>.a{}</style><div>끝</div></body></html>"#,
        );
        let text = visible_text(&doc);
        assert!(text.contains("보이는 글"));
        assert!(text.contains("끝"));
        assert!(!text.contains("99,000"));
    }

    #[test]
    fn meta_content_skips_blank_values() {
        let doc = Html::parse_document(
            r#"<meta property="og:title" content="  "><meta property="og:title" content="Real">"#,
        );
        assert_eq!(meta_content(&doc, &OG_TITLE_SELECTOR).as_deref(), Some("Real"));
    }
}
