use html5ever::LocalName;
use regex::Regex;

use crate::config::SanitizerConfig;
use crate::entities::decode_entities;
use crate::error::{Error, Result};

lazy_static! {
    static ref START_TAG: Regex = Regex::new(
        r#"^<\s*([A-Za-z0-9_:-]+)((?:\s+[A-Za-z0-9_:-]+(?:\s*=\s*(?:"[^"]*"|'[^']*'|[^>\s]+))?)*)\s*(/?)\s*>"#
    )
    .unwrap();
    static ref END_TAG: Regex = Regex::new(r"^<\s*/\s*([A-Za-z0-9_:-]+)[^>]*>").unwrap();
    static ref BEGIN_END_TAG: Regex = Regex::new(r"^<\s*/").unwrap();
    static ref ANY_END_TAG: Regex = Regex::new(r"<\s*/\s*([A-Za-z0-9_:-]+)[^>]*>").unwrap();
    static ref ATTRIBUTE: Regex = Regex::new(
        r#"([A-Za-z0-9_:-]+)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^>\s]+)))?"#
    )
    .unwrap();
    static ref DOCTYPE: Regex = Regex::new(r"(?i)^<!DOCTYPE[^>]*>").unwrap();
    static ref COMMENT: Regex = Regex::new(r"(?s)<!--(.*?)-->").unwrap();
    static ref CDATA: Regex = Regex::new(r"(?s)<!\[CDATA\[(.*?)]]>").unwrap();
}

/// An attribute as written in the markup. The value has its entities decoded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

impl Attribute {
    pub fn new(name: &str, value: &str) -> Attribute {
        Attribute {
            name: name.to_string(),
            value: value.to_string(),
        }
    }
}

/// Receives the structural events found by [`tokenize`]. Every method defaults to doing nothing.
pub trait TokenHandler {
    /// `self_closing` is set for void elements and for tags written with a trailing `/`.
    fn start_tag(&mut self, _name: &LocalName, _attributes: &[Attribute], _self_closing: bool) {}

    fn end_tag(&mut self, _name: &LocalName) {}

    /// Text with its character references already decoded.
    fn text(&mut self, _text: &str) {}

    fn comment(&mut self, _text: &str) {}
}

/// Tokenizes `html`, reporting every event to `handler`.
///
/// Fails with [`Error::Parse`] when some remaining input can't be consumed at all, such as a
/// `<` that starts neither a tag nor a comment.
pub fn tokenize<H>(html: &str, config: &SanitizerConfig, handler: &mut H) -> Result<()>
where
    H: TokenHandler + ?Sized,
{
    Tokenizer {
        config,
        handler,
        stack: Vec::new(),
    }
    .run(html)
}

struct Tokenizer<'a, H: ?Sized> {
    config: &'a SanitizerConfig,
    handler: &'a mut H,
    stack: Vec<LocalName>,
}

impl<'a, H> Tokenizer<'a, H>
where
    H: TokenHandler + ?Sized,
{
    fn run(&mut self, html: &str) -> Result<()> {
        let mut rest = html;

        while !rest.is_empty() {
            let special = self
                .stack
                .last()
                .filter(|name| self.config.is_special_element(name))
                .cloned();

            let remaining = match special {
                Some(name) => self.special_content(rest, &name),
                None => self.markup(rest),
            };

            if remaining.len() == rest.len() {
                return Err(Error::Parse {
                    fragment: rest.to_string(),
                });
            }
            rest = remaining;
        }

        self.close(None);
        Ok(())
    }

    // Comment, doctype, end tag and start tag are tried in that order; whatever none of
    // them consumes is text up to the next `<`.
    fn markup<'i>(&mut self, input: &'i str) -> &'i str {
        if input.starts_with("<!--") {
            if let Some(rest) = self.comment(input) {
                return rest;
            }
        } else if let Some(doctype) = DOCTYPE.find(input) {
            return &input[doctype.end()..];
        } else if BEGIN_END_TAG.is_match(input) {
            if let Some(rest) = self.end_tag(input) {
                return rest;
            }
        } else if input.starts_with('<') {
            if let Some(rest) = self.start_tag(input) {
                return rest;
            }
        }

        self.text(input)
    }

    /// A `--` inside a comment is only accepted as part of the closing `-->`.
    fn comment<'i>(&mut self, input: &'i str) -> Option<&'i str> {
        let end = input[4..].find("--")? + 4;
        if !input[end..].starts_with("-->") {
            return None;
        }
        self.handler.comment(&input[4..end]);
        Some(&input[end + 3..])
    }

    fn end_tag<'i>(&mut self, input: &'i str) -> Option<&'i str> {
        let captures = END_TAG.captures(input)?;
        let name = LocalName::from(&*captures[1].to_ascii_lowercase());
        self.close(Some(&name));
        Some(&input[captures[0].len()..])
    }

    fn start_tag<'i>(&mut self, input: &'i str) -> Option<&'i str> {
        let captures = START_TAG.captures(input)?;
        let name = LocalName::from(&*captures[1].to_ascii_lowercase());

        // Inline elements can't contain blocks.
        if self.config.block_elements.contains(&name) {
            while let Some(top) = self.innermost_valid_element() {
                if !self.config.inline_elements.contains(&top) {
                    break;
                }
                self.close(Some(&top));
            }
        }

        if self.config.optional_end_tag_elements.contains(&name)
            && self.innermost_valid_element().as_ref() == Some(&name)
        {
            self.close(Some(&name));
        }

        // A trailing `/` doesn't stop a special element's content from being opaque.
        let self_closing = self.config.void_elements.contains(&name)
            || (!captures[3].is_empty() && !self.config.is_special_element(&name));
        if !self_closing {
            self.stack.push(name.clone());
        }

        let attributes = parse_attributes(&captures[2]);
        self.handler.start_tag(&name, &attributes, self_closing);

        Some(&input[captures[0].len()..])
    }

    fn text<'i>(&mut self, input: &'i str) -> &'i str {
        let end = input.find('<').unwrap_or(input.len());
        if end > 0 {
            self.handler.text(&decode_entities(&input[..end]));
        }
        &input[end..]
    }

    /// Consumes everything up to the end tag of the special element `name`. Comment and
    /// CDATA markers are removed from the content. A special element that is never closed
    /// runs to the end of the input.
    fn special_content<'i>(&mut self, input: &'i str, name: &LocalName) -> &'i str {
        let end_tag = ANY_END_TAG
            .captures_iter(input)
            .find(|captures| captures[1].eq_ignore_ascii_case(name))
            .and_then(|captures| captures.get(0));

        let (content, rest) = match end_tag {
            Some(end_tag) => (&input[..end_tag.start()], &input[end_tag.end()..]),
            None => (input, ""),
        };

        let content = COMMENT.replace_all(content, "$1");
        let content = CDATA.replace_all(&content, "$1");
        if !content.is_empty() {
            self.handler.text(&decode_entities(&content));
        }

        self.close(Some(name));
        rest
    }

    /// Elements outside the whitelist never reach the output, so implicit closing looks
    /// through them.
    fn innermost_valid_element(&self) -> Option<LocalName> {
        self.stack
            .iter()
            .rev()
            .find(|open| self.config.is_valid_element(open))
            .cloned()
    }

    /// Closes the nearest open `name` and everything opened after it, innermost first.
    /// With no name, closes every open element.
    fn close(&mut self, name: Option<&LocalName>) {
        let position = match name {
            Some(name) => match self.stack.iter().rposition(|open| open == name) {
                Some(position) => position,
                None => return,
            },
            None => 0,
        };

        for open in self.stack[position..].iter().rev() {
            self.handler.end_tag(open);
        }
        self.stack.truncate(position);
    }
}

fn parse_attributes(source: &str) -> Vec<Attribute> {
    ATTRIBUTE
        .captures_iter(source)
        .map(|captures| {
            let value = (2..=4)
                .filter_map(|group| captures.get(group))
                .map(|value| value.as_str())
                .find(|value| !value.is_empty())
                .unwrap_or("");
            Attribute {
                name: captures[1].to_string(),
                value: decode_entities(value),
            }
        })
        .collect()
}
