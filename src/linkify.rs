use regex::Regex;

use crate::entities::encode_entities;
use crate::error::Result;
use crate::sanitizer::Sanitizer;

lazy_static! {
    // Links can't end in punctuation that usually closes a sentence or a bracket.
    static ref LINK: Regex =
        Regex::new(r"((ftp|https?)://|(mailto:)?[A-Za-z0-9._%+-]+@)\S*[^\s.;,(){}<>]").unwrap();
}

/// Escapes `text` and wraps every `http`, `https`, `ftp` and `mailto` URL and every bare email
/// address in an anchor. `target`, when given, is set on every anchor.
///
/// The assembled markup is run through `sanitizer` before it is returned, so a link whose
/// URI the sanitizer rejects is left as an anchor without `href`.
pub fn linkify(sanitizer: &Sanitizer, text: &str, target: Option<&str>) -> Result<String> {
    if text.is_empty() {
        return Ok(String::new());
    }

    let mut html = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(captures) = LINK.captures(rest) {
        let link = match captures.get(0) {
            Some(link) => link,
            None => break,
        };
        let scheme = captures.get(2);
        let mailto = captures.get(3);

        let href = if scheme.is_none() && mailto.is_none() {
            format!("mailto:{}", link.as_str())
        } else {
            link.as_str().to_string()
        };
        let label = link.as_str().trim_start_matches("mailto:");

        html.push_str(&sanitizer.sanitize_text(&rest[..link.start()]));
        push_anchor(&mut html, sanitizer, &href, label, target);
        rest = &rest[link.end()..];
    }
    html.push_str(&sanitizer.sanitize_text(rest));

    sanitizer.sanitize(&html)
}

fn push_anchor(
    html: &mut String,
    sanitizer: &Sanitizer,
    href: &str,
    label: &str,
    target: Option<&str>,
) {
    html.push_str("<a ");
    if let Some(target) = target {
        html.push_str("target=\"");
        html.push_str(&encode_entities(target));
        html.push_str("\" ");
    }
    html.push_str("href=\"");
    html.push_str(&encode_entities(href));
    html.push_str("\">");
    html.push_str(&sanitizer.sanitize_text(label));
    html.push_str("</a>");
}
