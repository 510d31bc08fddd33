use std::collections::HashSet;

use html5ever::LocalName;

pub mod default;

pub use self::default::DEFAULT_CONFIG;

/// Element and attribute tables consulted while tokenizing and writing.
#[derive(Clone, Debug)]
pub struct SanitizerConfig {
    /// Elements that never have children.
    pub void_elements: HashSet<LocalName>,
    /// Elements that close any open inline elements when they start.
    pub block_elements: HashSet<LocalName>,
    pub inline_elements: HashSet<LocalName>,
    /// Elements a browser closes implicitly when a sibling of the same kind starts.
    pub optional_end_tag_elements: HashSet<LocalName>,
    /// Elements whose content is scanned as literal text and never written.
    pub special_elements: HashSet<LocalName>,
    /// Attributes whose value must be approved by the URI validator.
    pub uri_attributes: HashSet<LocalName>,
    /// Attributes allowed on any valid element. Includes `uri_attributes`.
    pub allowed_attributes: HashSet<LocalName>,
    pub custom_attribute_rules: Vec<CustomAttributeRule>,
    /// Rewrite a legacy `align` attribute as a `text-align` style declaration.
    pub align_to_text_align: bool,
}

impl SanitizerConfig {
    /// Every element that may appear in the output.
    pub fn is_valid_element(&self, name: &LocalName) -> bool {
        self.void_elements.contains(name)
            || self.block_elements.contains(name)
            || self.inline_elements.contains(name)
            || self.optional_end_tag_elements.contains(name)
    }

    pub fn is_special_element(&self, name: &LocalName) -> bool {
        self.special_elements.contains(name)
    }

    /// Whether one of the custom rules admits `attribute` with `value` on `element`, given
    /// the element's full (lowercased) attribute list.
    pub fn allows_custom_attribute(
        &self,
        element: &LocalName,
        attributes: &[(LocalName, String)],
        attribute: &LocalName,
        value: &str,
    ) -> bool {
        self.custom_attribute_rules
            .iter()
            .any(|rule| rule.allows(element, attributes, attribute, value))
    }
}

/// Admits attributes on one element only while a marker attribute with a non-empty value
/// is present on it.
#[derive(Clone, Debug)]
pub struct CustomAttributeRule {
    pub element: LocalName,
    pub marker: LocalName,
    /// Attributes admitted with any value.
    pub attributes: HashSet<LocalName>,
    /// Attributes admitted only with exactly this value.
    pub fixed_values: Vec<(LocalName, &'static str)>,
}

impl CustomAttributeRule {
    fn allows(
        &self,
        element: &LocalName,
        attributes: &[(LocalName, String)],
        attribute: &LocalName,
        value: &str,
    ) -> bool {
        if *element != self.element {
            return false;
        }
        let marked = attributes
            .iter()
            .any(|(name, marker_value)| *name == self.marker && !marker_value.is_empty());
        if !marked {
            return false;
        }
        self.attributes.contains(attribute)
            || self
                .fixed_values
                .iter()
                .any(|(name, fixed)| name == attribute && *fixed == value)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn attrs(pairs: &[(&str, &str)]) -> Vec<(LocalName, String)> {
        pairs
            .iter()
            .map(|(name, value)| (LocalName::from(*name), value.to_string()))
            .collect()
    }

    #[test]
    fn valid_elements_are_the_union_of_all_partitions() {
        let config = &*DEFAULT_CONFIG;
        for name in ["br", "div", "span", "li", "rt", "img"].iter() {
            assert!(config.is_valid_element(&LocalName::from(*name)), "{}", name);
        }
        for name in ["iframe", "form", "style", "object", "svg"].iter() {
            assert!(!config.is_valid_element(&LocalName::from(*name)), "{}", name);
        }
    }

    #[test]
    fn partitions_overlap() {
        let config = &*DEFAULT_CONFIG;
        let li = LocalName::from("li");
        assert!(config.optional_end_tag_elements.contains(&li));
        assert!(config.block_elements.contains(&li));
        let del = LocalName::from("del");
        assert!(config.block_elements.contains(&del));
        assert!(config.inline_elements.contains(&del));
    }

    #[test]
    fn uri_attributes_are_allowed_attributes() {
        let config = &*DEFAULT_CONFIG;
        assert!(config.uri_attributes.is_subset(&config.allowed_attributes));
    }

    #[test]
    fn video_placeholder_rule_requires_marker() {
        let config = &*DEFAULT_CONFIG;
        let img = LocalName::from("img");
        let marked = attrs(&[("ta-insert-video", "http://example.com/v"), ("frameborder", "0")]);
        let unmarked = attrs(&[("frameborder", "0")]);
        let frameborder = LocalName::from("frameborder");

        assert!(config.allows_custom_attribute(&img, &marked, &frameborder, "0"));
        assert!(!config.allows_custom_attribute(&img, &unmarked, &frameborder, "0"));
        assert!(!config.allows_custom_attribute(
            &LocalName::from("div"),
            &marked,
            &frameborder,
            "0"
        ));
    }

    #[test]
    fn video_placeholder_rule_fixes_contenteditable_value() {
        let config = &*DEFAULT_CONFIG;
        let img = LocalName::from("img");
        let marked = attrs(&[("ta-insert-video", "v")]);
        let contenteditable = LocalName::from("contenteditable");

        assert!(config.allows_custom_attribute(&img, &marked, &contenteditable, "false"));
        assert!(!config.allows_custom_attribute(&img, &marked, &contenteditable, "true"));
    }
}
