use std::borrow::Cow;

/// Decodes every character reference in `value`.
///
/// Surrounding whitespace is kept exactly as given; only the interior is decoded.
pub fn decode_entities(value: &str) -> String {
    if value.is_empty() {
        return String::new();
    }

    let content = value.trim();
    if content.is_empty() {
        return value.to_string();
    }

    let start = value.len() - value.trim_start().len();
    let end = start + content.len();

    let mut decoded = String::with_capacity(value.len());
    decoded.push_str(&value[..start]);
    decoded.push_str(&html_escape::decode_html_entities(content));
    decoded.push_str(&value[end..]);
    decoded
}

/// Escapes `value` so it can be placed in element content or a double-quoted attribute value.
///
/// `&`, `<` and `>` become named references. Characters outside the astral planes are
/// written as numeric references when they are unsafe (see [`is_unsafe_code_point`]), as
/// is `"`. Astral characters are always written as numeric references to their code point.
pub fn encode_entities(value: &str) -> Cow<str> {
    if !value.chars().any(needs_escape) {
        return Cow::Borrowed(value);
    }

    let mut encoded = String::with_capacity(value.len() + 16);
    for c in value.chars() {
        match c {
            '&' => encoded.push_str("&amp;"),
            '<' => encoded.push_str("&lt;"),
            '>' => encoded.push_str("&gt;"),
            c if needs_numeric_reference(c) => {
                encoded.push_str("&#");
                encoded.push_str(&u32::from(c).to_string());
                encoded.push(';');
            }
            c => encoded.push(c),
        }
    }
    Cow::Owned(encoded)
}

fn needs_escape(c: char) -> bool {
    matches!(c, '&' | '<' | '>') || needs_numeric_reference(c)
}

fn needs_numeric_reference(c: char) -> bool {
    // Printable ASCII other than `"` passes through untouched.
    if c == ' ' || c == '!' || ('#'..='~').contains(&c) {
        return false;
    }
    u32::from(c) > 0xFFFF || is_unsafe_code_point(u32::from(c))
}

/// Control, formatting and bidi characters that must never reach the output literally.
pub fn is_unsafe_code_point(c: u32) -> bool {
    c <= 159
        || c == 173
        || (1536..=1540).contains(&c)
        || c == 1807
        || c == 6068
        || c == 6069
        || (8204..=8207).contains(&c)
        || (8232..=8239).contains(&c)
        || (8288..=8303).contains(&c)
        || c == 65279
        || (65520..=65535).contains(&c)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn decode_empty() {
        assert_eq!(decode_entities(""), "");
    }

    #[test]
    fn decode_named_and_numeric() {
        assert_eq!(decode_entities("a &amp; b &lt;c&gt;"), "a & b <c>");
        assert_eq!(decode_entities("&#34;&#x27;&#xA9;"), "\"'\u{a9}");
    }

    #[test]
    fn decode_preserves_surrounding_whitespace() {
        assert_eq!(decode_entities("  &amp;x \n"), "  &x \n");
        assert_eq!(decode_entities(" \t "), " \t ");
    }

    #[test]
    fn encode_leaves_safe_text_borrowed() {
        assert!(matches!(encode_entities("plain text!"), Cow::Borrowed(_)));
    }

    #[test]
    fn encode_ampersand_and_brackets() {
        assert_eq!(encode_entities("<a&b>"), "&lt;a&amp;b&gt;");
        assert_eq!(encode_entities("&#34;"), "&amp;#34;");
    }

    #[test]
    fn encode_quote_and_controls() {
        assert_eq!(encode_entities("say \"hi\"\n"), "say &#34;hi&#34;&#10;");
        assert_eq!(encode_entities("\u{200e}\u{feff}"), "&#8206;&#65279;");
    }

    #[test]
    fn encode_astral_as_single_reference() {
        // U+1F600 is the pair D83D DE00 in UTF-16.
        assert_eq!(encode_entities("\u{1F600}"), "&#128512;");
    }

    #[test]
    fn encode_keeps_multilingual_text() {
        assert_eq!(encode_entities("caf\u{e9} \u{65e5}\u{672c}"), "caf\u{e9} \u{65e5}\u{672c}");
    }

    #[test]
    fn decode_reverses_encode() {
        let samples = [
            "",
            "plain",
            "a < b && c > d",
            "quotes \" and ' apostrophes",
            "&amp; literally",
            "emoji \u{1F600} and accents \u{e9}\u{fc}",
            "line\nbreak\ttab",
        ];
        for sample in samples.iter() {
            assert_eq!(decode_entities(&encode_entities(sample)), *sample);
        }
    }
}
