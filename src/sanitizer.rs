use std::borrow::Cow;
use std::io::{Read, Write};

use html5ever::LocalName;
use log::{debug, warn};

use crate::config::SanitizerConfig;
use crate::css_parser::valid_styles;
use crate::entities::encode_entities;
use crate::error::Result;
use crate::tokenizer::{tokenize, Attribute, TokenHandler};
use crate::uri::UriValidator;

/// Sanitizes untrusted HTML fragments against a [`SanitizerConfig`].
///
/// Every call works on its own buffers, so one `Sanitizer` can be shared between threads as
/// long as its URI validator can.
pub struct Sanitizer<'a> {
    config: &'a SanitizerConfig,
    uri_validator: &'a dyn UriValidator,
}

impl<'a> Sanitizer<'a> {
    pub fn new(config: &'a SanitizerConfig, uri_validator: &'a dyn UriValidator) -> Sanitizer<'a> {
        Sanitizer {
            config,
            uri_validator,
        }
    }

    pub fn config(&self) -> &'a SanitizerConfig {
        self.config
    }

    /// Returns `html` with everything outside the whitelist removed and all text escaped.
    pub fn sanitize(&self, html: &str) -> Result<String> {
        let mut output = String::with_capacity(html.len());
        let mut writer = SanitizeWriter::new(self.config, self.uri_validator, &mut output);
        tokenize(html, self.config, &mut writer)?;
        Ok(output)
    }

    /// Like [`Sanitizer::sanitize`], but falls back to `previous` (or an empty string) when
    /// `html` can't be parsed.
    ///
    /// A special element left open, as in `<p>ok</p><script>alert(1)`, is not a parse
    /// error: its content runs to the end of the input and is dropped, so the sanitized
    /// prefix is returned instead of `previous`.
    pub fn sanitize_or(&self, html: &str, previous: Option<&str>) -> String {
        match self.sanitize(html) {
            Ok(safe) => safe,
            Err(error) => {
                warn!("keeping previous value: {}", error);
                previous.unwrap_or_default().to_string()
            }
        }
    }

    /// Escapes `text` for use as element content without looking for any markup in it.
    pub fn sanitize_text(&self, text: &str) -> String {
        let mut output = String::with_capacity(text.len());
        SanitizeWriter::new(self.config, self.uri_validator, &mut output).text(text);
        output
    }

    /// Reads a UTF-8 fragment from `input` and writes its sanitized form to `output`.
    pub fn sanitize_fragment(&self, input: &mut impl Read, output: &mut impl Write) -> Result<()> {
        let mut bytes = Vec::new();
        input.read_to_end(&mut bytes)?;
        let html = String::from_utf8(bytes)?;
        output.write_all(self.sanitize(&html)?.as_bytes())?;
        Ok(())
    }
}

/// A [`TokenHandler`] that writes the whitelisted part of the token stream to a string.
///
/// Elements outside the whitelist are dropped but their text is kept. Special elements are
/// dropped together with their content.
pub struct SanitizeWriter<'a> {
    config: &'a SanitizerConfig,
    uri_validator: &'a dyn UriValidator,
    output: &'a mut String,
    ignoring: Option<LocalName>,
}

impl<'a> SanitizeWriter<'a> {
    pub fn new(
        config: &'a SanitizerConfig,
        uri_validator: &'a dyn UriValidator,
        output: &'a mut String,
    ) -> SanitizeWriter<'a> {
        SanitizeWriter {
            config,
            uri_validator,
            output,
            ignoring: None,
        }
    }

    fn normalize_attributes(&self, attributes: &[Attribute]) -> Vec<(LocalName, String)> {
        let mut normalized: Vec<(LocalName, String)> = Vec::with_capacity(attributes.len());
        for attribute in attributes {
            let name = LocalName::from(&*attribute.name.to_ascii_lowercase());
            // The first occurrence of a repeated attribute wins.
            if normalized.iter().any(|(seen, _)| *seen == name) {
                continue;
            }
            normalized.push((name, attribute.value.clone()));
        }

        if self.config.align_to_text_align {
            fold_align_into_style(&mut normalized);
        }
        normalized
    }

    fn attribute_value<'v>(
        &self,
        element: &LocalName,
        attributes: &[(LocalName, String)],
        name: &LocalName,
        value: &'v str,
    ) -> Option<Cow<'v, str>> {
        if *name == local_name!("style") {
            let styles = valid_styles(value);
            if !styles.is_empty() {
                return Some(Cow::Owned(styles));
            }
        }

        if self
            .config
            .allows_custom_attribute(element, attributes, name, value)
        {
            return Some(Cow::Borrowed(value));
        }

        if !self.config.allowed_attributes.contains(name) {
            return None;
        }
        if !self.config.uri_attributes.contains(name) {
            return Some(Cow::Borrowed(value));
        }

        let is_image = (*element == local_name!("img") && *name == local_name!("src"))
            || *name == local_name!("background");
        if self.uri_validator.is_safe(value, is_image) {
            Some(Cow::Borrowed(value))
        } else {
            None
        }
    }
}

impl<'a> TokenHandler for SanitizeWriter<'a> {
    fn start_tag(&mut self, name: &LocalName, attributes: &[Attribute], self_closing: bool) {
        let name = LocalName::from(&*name.to_ascii_lowercase());

        if self.ignoring.is_none() && self.config.is_special_element(&name) {
            debug!("element dropped with its content: <{}>", name);
            self.ignoring = Some(name.clone());
        }
        if self.ignoring.is_some() {
            return;
        }
        if !self.config.is_valid_element(&name) {
            debug!("element dropped: <{}>", name);
            return;
        }

        let attributes = self.normalize_attributes(attributes);
        let mut tag = String::new();
        tag.push('<');
        tag.push_str(&name);
        for (key, value) in attributes.iter() {
            match self.attribute_value(&name, &attributes, key, value) {
                Some(value) => {
                    tag.push(' ');
                    tag.push_str(key);
                    tag.push_str("=\"");
                    tag.push_str(&encode_entities(&value));
                    tag.push('"');
                }
                None => debug!("attribute dropped: <{} {}={:?}>", name, key, value),
            }
        }
        tag.push_str(if self_closing { "/>" } else { ">" });
        self.output.push_str(&tag);
    }

    fn end_tag(&mut self, name: &LocalName) {
        let name = LocalName::from(&*name.to_ascii_lowercase());

        if self.ignoring.is_none() && self.config.is_valid_element(&name) {
            self.output.push_str("</");
            self.output.push_str(&name);
            self.output.push('>');
        }
        if self.ignoring.as_ref() == Some(&name) {
            self.ignoring = None;
        }
    }

    fn text(&mut self, text: &str) {
        if self.ignoring.is_none() {
            self.output.push_str(&encode_entities(text));
        }
    }
}

/// Replaces a legacy `align` attribute with a `text-align` declaration on the `style`
/// attribute. The declaration is validated later along with the rest of the style.
fn fold_align_into_style(attributes: &mut Vec<(LocalName, String)>) {
    let position = match attributes
        .iter()
        .position(|(name, _)| *name == local_name!("align"))
    {
        Some(position) => position,
        None => return,
    };
    let (_, align) = attributes.remove(position);
    let align = align.trim();
    if align.is_empty() || align.contains(|c: char| c == ';' || c == ':') {
        return;
    }

    let declaration = format!("text-align: {};", align);
    match attributes
        .iter_mut()
        .find(|(name, _)| *name == local_name!("style"))
    {
        Some((_, style)) => {
            if !style.trim().is_empty() && !style.trim_end().ends_with(';') {
                style.push(';');
            }
            style.push_str(&declaration);
        }
        None => attributes.push((local_name!("style"), declaration)),
    }
}
