use std::collections::HashSet;

use log::debug;
use url::{ParseError, Url};

/// Decides whether a URI-bearing attribute value may be kept.
///
/// `is_image` is set for image sources and `background` attributes.
pub trait UriValidator {
    fn is_safe(&self, uri: &str, is_image: bool) -> bool;
}

impl<F> UriValidator for F
where
    F: Fn(&str, bool) -> bool,
{
    fn is_safe(&self, uri: &str, is_image: bool) -> bool {
        self(uri, is_image)
    }
}

/// Scheme whitelists for links and for images.
///
/// Relative references carry no scheme and are always accepted. `data:` URIs are accepted in
/// image context when their media type is an image.
#[derive(Clone, Debug)]
pub struct UriPolicy {
    pub link_protocols: HashSet<&'static str>,
    pub image_protocols: HashSet<&'static str>,
    pub allow_data_images: bool,
}

impl Default for UriPolicy {
    fn default() -> UriPolicy {
        UriPolicy {
            link_protocols: hashset! {"ftp", "http", "https", "mailto", "tel", "file"},
            image_protocols: hashset! {"ftp", "http", "https", "file", "blob"},
            allow_data_images: true,
        }
    }
}

impl UriValidator for UriPolicy {
    fn is_safe(&self, uri: &str, is_image: bool) -> bool {
        let uri = uri.trim_start();
        let url = match Url::parse(uri) {
            Ok(url) => url,
            Err(ParseError::RelativeUrlWithoutBase) => return true,
            Err(error) => {
                debug!("uri rejected ({}): {:?}", error, uri);
                return false;
            }
        };

        let scheme = url.scheme();
        let safe = if is_image {
            self.image_protocols.contains(scheme)
                || (self.allow_data_images && scheme == "data" && is_image_data(url.path()))
        } else {
            self.link_protocols.contains(scheme)
        };
        if !safe {
            debug!("uri rejected (scheme {:?}): {:?}", scheme, uri);
        }
        safe
    }
}

fn is_image_data(path: &str) -> bool {
    path.get(..6)
        .map_or(false, |media_type| media_type.eq_ignore_ascii_case("image/"))
}
