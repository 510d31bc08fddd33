use std::collections::HashSet;

use html5ever::LocalName;

use super::{CustomAttributeRule, SanitizerConfig};

lazy_static! {
    pub static ref VOID_ELEMENTS: HashSet<LocalName> = hashset! {
        local_name!("area"),
        local_name!("br"),
        local_name!("col"),
        local_name!("hr"),
        local_name!("img"),
        local_name!("wbr"),
    };
    pub static ref OPTIONAL_END_TAG_BLOCK_ELEMENTS: HashSet<LocalName> = hashset! {
        local_name!("colgroup"),
        local_name!("dd"),
        local_name!("dt"),
        local_name!("li"),
        local_name!("p"),
        local_name!("tbody"),
        local_name!("td"),
        local_name!("tfoot"),
        local_name!("th"),
        local_name!("thead"),
        local_name!("tr"),
    };
    pub static ref OPTIONAL_END_TAG_INLINE_ELEMENTS: HashSet<LocalName> = hashset! {
        local_name!("rp"),
        local_name!("rt"),
    };
    pub static ref BLOCK_ELEMENTS: HashSet<LocalName> = OPTIONAL_END_TAG_BLOCK_ELEMENTS
        .union(&hashset! {
            local_name!("address"),
            local_name!("article"),
            local_name!("aside"),
            local_name!("blockquote"),
            local_name!("caption"),
            local_name!("center"),
            local_name!("del"),
            local_name!("dir"),
            local_name!("div"),
            local_name!("dl"),
            local_name!("figure"),
            local_name!("figcaption"),
            local_name!("footer"),
            local_name!("h1"),
            local_name!("h2"),
            local_name!("h3"),
            local_name!("h4"),
            local_name!("h5"),
            local_name!("h6"),
            local_name!("header"),
            local_name!("hgroup"),
            local_name!("hr"),
            local_name!("ins"),
            local_name!("map"),
            local_name!("menu"),
            local_name!("nav"),
            local_name!("ol"),
            local_name!("pre"),
            local_name!("script"),
            local_name!("section"),
            local_name!("table"),
            local_name!("ul"),
        })
        .cloned()
        .collect();
    pub static ref INLINE_ELEMENTS: HashSet<LocalName> = OPTIONAL_END_TAG_INLINE_ELEMENTS
        .union(&hashset! {
            local_name!("a"),
            local_name!("abbr"),
            LocalName::from("acronym"),
            local_name!("b"),
            LocalName::from("bdi"),
            local_name!("bdo"),
            local_name!("big"),
            local_name!("br"),
            local_name!("cite"),
            local_name!("code"),
            local_name!("del"),
            local_name!("dfn"),
            local_name!("em"),
            local_name!("font"),
            local_name!("i"),
            local_name!("img"),
            local_name!("ins"),
            local_name!("kbd"),
            local_name!("label"),
            local_name!("map"),
            LocalName::from("mark"),
            local_name!("q"),
            local_name!("ruby"),
            local_name!("s"),
            local_name!("samp"),
            local_name!("small"),
            local_name!("span"),
            local_name!("strike"),
            local_name!("strong"),
            local_name!("sub"),
            local_name!("sup"),
            LocalName::from("time"),
            local_name!("tt"),
            local_name!("u"),
            local_name!("var"),
        })
        .cloned()
        .collect();
    pub static ref SPECIAL_ELEMENTS: HashSet<LocalName> = hashset! {
        local_name!("script"),
        local_name!("style"),
    };
    pub static ref URI_ATTRIBUTES: HashSet<LocalName> = hashset! {
        local_name!("background"),
        local_name!("cite"),
        local_name!("href"),
        local_name!("longdesc"),
        local_name!("src"),
        local_name!("usemap"),
    };
    pub static ref ALLOWED_ATTRIBUTES: HashSet<LocalName> = URI_ATTRIBUTES
        .union(&hashset! {
            local_name!("abbr"),
            local_name!("align"),
            local_name!("alt"),
            LocalName::from("axis"),
            local_name!("bgcolor"),
            local_name!("border"),
            local_name!("cellpadding"),
            local_name!("cellspacing"),
            local_name!("class"),
            local_name!("clear"),
            local_name!("color"),
            local_name!("cols"),
            local_name!("colspan"),
            LocalName::from("compact"),
            local_name!("coords"),
            local_name!("dir"),
            local_name!("face"),
            local_name!("headers"),
            local_name!("height"),
            local_name!("hreflang"),
            local_name!("hspace"),
            local_name!("ismap"),
            local_name!("lang"),
            LocalName::from("language"),
            LocalName::from("nohref"),
            local_name!("nowrap"),
            local_name!("rel"),
            LocalName::from("rev"),
            local_name!("rows"),
            local_name!("rowspan"),
            local_name!("rules"),
            local_name!("scope"),
            LocalName::from("scrolling"),
            local_name!("shape"),
            local_name!("size"),
            local_name!("span"),
            local_name!("start"),
            local_name!("summary"),
            local_name!("target"),
            local_name!("title"),
            local_name!("type"),
            local_name!("valign"),
            local_name!("value"),
            local_name!("vspace"),
            local_name!("width"),
        })
        .cloned()
        .collect();
    /// The editor stands an `img` in for an embedded video while editing; the iframe
    /// attributes ride along on the placeholder.
    pub static ref VIDEO_PLACEHOLDER_RULE: CustomAttributeRule = CustomAttributeRule {
        element: local_name!("img"),
        marker: LocalName::from("ta-insert-video"),
        attributes: hashset! {
            LocalName::from("ta-insert-video"),
            LocalName::from("allowfullscreen"),
            LocalName::from("frameborder"),
        },
        fixed_values: vec![(LocalName::from("contenteditable"), "false")],
    };
    pub static ref DEFAULT_CONFIG: SanitizerConfig = SanitizerConfig {
        void_elements: VOID_ELEMENTS.clone(),
        block_elements: BLOCK_ELEMENTS.clone(),
        inline_elements: INLINE_ELEMENTS.clone(),
        optional_end_tag_elements: OPTIONAL_END_TAG_BLOCK_ELEMENTS
            .union(&OPTIONAL_END_TAG_INLINE_ELEMENTS)
            .cloned()
            .collect(),
        special_elements: SPECIAL_ELEMENTS.clone(),
        uri_attributes: URI_ATTRIBUTES.clone(),
        allowed_attributes: ALLOWED_ATTRIBUTES.clone(),
        custom_attribute_rules: vec![VIDEO_PLACEHOLDER_RULE.clone()],
        align_to_text_align: true,
    };
}
