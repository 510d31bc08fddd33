use html5ever::LocalName;

use crate::config::SanitizerConfig;
use crate::error::Result;
use crate::tokenizer::{tokenize, Attribute, TokenHandler};

struct TextCollector<'a> {
    config: &'a SanitizerConfig,
    text: String,
    ignoring: Option<LocalName>,
}

impl<'a> TokenHandler for TextCollector<'a> {
    fn start_tag(&mut self, name: &LocalName, _attributes: &[Attribute], _self_closing: bool) {
        if self.ignoring.is_none() && self.config.is_special_element(name) {
            self.ignoring = Some(name.clone());
        }
    }

    fn end_tag(&mut self, name: &LocalName) {
        if self.ignoring.as_ref() == Some(name) {
            self.ignoring = None;
        }
    }

    fn text(&mut self, text: &str) {
        if self.ignoring.is_none() {
            self.text.push_str(text);
        }
    }
}

/// The decoded text of `html`, without markup and without the content of special elements.
pub fn plain_text(html: &str, config: &SanitizerConfig) -> Result<String> {
    let mut collector = TextCollector {
        config,
        text: String::new(),
        ignoring: None,
    };
    tokenize(html, config, &mut collector)?;
    Ok(collector.text)
}

/// Number of characters in the [`plain_text`] of `html`.
pub fn text_length(html: &str, config: &SanitizerConfig) -> Result<usize> {
    Ok(plain_text(html, config)?.chars().count())
}
