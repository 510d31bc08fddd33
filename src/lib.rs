#![warn(clippy::all)]
#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate html5ever;
#[macro_use]
extern crate maplit;

#[macro_use]
mod css_property {
    include!(concat!(env!("OUT_DIR"), "/css_property.rs"));
}

pub mod config;
pub mod css_parser;
pub mod entities;
mod error;
pub mod linkify;
pub mod sanitizer;
pub mod text;
pub mod tokenizer;
pub mod uri;

pub use crate::config::{SanitizerConfig, DEFAULT_CONFIG};
pub use crate::css_parser::valid_styles;
pub use crate::entities::{decode_entities, encode_entities};
pub use crate::error::{Error, Result};
pub use crate::sanitizer::{SanitizeWriter, Sanitizer};
pub use crate::tokenizer::{tokenize, Attribute, TokenHandler};
pub use crate::uri::{UriPolicy, UriValidator};

lazy_static! {
    static ref DEFAULT_URI_POLICY: UriPolicy = UriPolicy::default();
}

/// A sanitizer using [`DEFAULT_CONFIG`] and the default [`UriPolicy`].
pub fn default_sanitizer() -> Sanitizer<'static> {
    Sanitizer::new(&DEFAULT_CONFIG, &*DEFAULT_URI_POLICY)
}

pub fn sanitize_html(html: &str) -> Result<String> {
    default_sanitizer().sanitize(html)
}

pub fn sanitize_text(text: &str) -> String {
    default_sanitizer().sanitize_text(text)
}

pub fn linkify(text: &str, target: Option<&str>) -> Result<String> {
    linkify::linkify(&default_sanitizer(), text, target)
}
