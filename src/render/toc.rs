//! Table-of-contents navigation markup.

use super::escape::escape_html;
use crate::headings::HeadingDescriptor;

/// Left padding in pixels for a TOC entry; level 2 entries sit at 12px.
pub fn toc_indent(level: u8) -> u32 {
    (u32::from(level) * 12).saturating_sub(12)
}

/// Render a navigation list linking to each heading anchor.
///
/// Returns an empty string when there are no headings.
pub fn render_toc_html(headings: &[HeadingDescriptor]) -> String {
    if headings.is_empty() {
        return String::new();
    }

    let mut out = String::from(r#"<nav class="toc"><ul>"#);
    for heading in headings {
        out.push_str(&format!(
            r##"<li style="padding-left: {}px"><a href="#{}">{}</a></li>"##,
            toc_indent(heading.level),
            escape_html(&heading.id),
            escape_html(&heading.text)
        ));
    }
    out.push_str("</ul></nav>");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn heading(id: &str, level: u8, text: &str) -> HeadingDescriptor {
        HeadingDescriptor {
            id: id.into(),
            level,
            text: text.into(),
        }
    }

    #[test]
    fn test_indent_by_level() {
        assert_eq!(toc_indent(1), 0);
        assert_eq!(toc_indent(2), 12);
        assert_eq!(toc_indent(3), 24);
        assert_eq!(toc_indent(6), 60);
    }

    #[test]
    fn test_empty_toc() {
        assert_eq!(render_toc_html(&[]), "");
    }

    #[test]
    fn test_toc_entries() {
        let html = render_toc_html(&[
            heading("intro", 2, "Intro"),
            heading("q-a", 3, "Q & A"),
        ]);
        assert_eq!(
            html,
            concat!(
                r#"<nav class="toc"><ul>"#,
                r##"<li style="padding-left: 12px"><a href="#intro">Intro</a></li>"##,
                r##"<li style="padding-left: 24px"><a href="#q-a">Q &amp; A</a></li>"##,
                "</ul></nav>"
            )
        );
    }
}
