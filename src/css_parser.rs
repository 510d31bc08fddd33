use cssparser::{CowRcStr, ParseError, Parser, ParserInput, Token};
use log::debug;

use crate::css_property::CssProperty;

type CssParseError<'i> = ParseError<'i, ()>;

/// Returns the allowed declarations of `style` as `property: value;` pairs, in input order.
///
/// Declarations that don't split into exactly one property and one value, properties not
/// in the allowed set, and values of the wrong shape are dropped.
pub fn valid_styles(style: &str) -> String {
    let mut result = String::new();

    for declaration in style.split(';') {
        let parts: Vec<&str> = declaration.split(':').collect();
        if parts.len() != 2 {
            if !declaration.trim().is_empty() {
                debug!("style declaration dropped: {:?}", declaration);
            }
            continue;
        }

        let property = parts[0].trim().to_lowercase();
        let value = parts[1].trim().to_lowercase();
        if is_allowed_declaration(&property, &value) {
            result.push_str(&property);
            result.push_str(": ");
            result.push_str(&value);
            result.push(';');
        } else {
            debug!("style declaration dropped: {}: {}", property, value);
        }
    }

    result
}

fn is_allowed_declaration(property: &str, value: &str) -> bool {
    if value.is_empty() || !value.chars().all(is_value_char) {
        return false;
    }

    match CssProperty::from(property) {
        css_property!("color") => is_color(value),
        css_property!("text-align") => matches!(value, "left" | "right" | "center" | "justify"),
        css_property!("float") => matches!(value, "left" | "right" | "none"),
        css_property!("width") | css_property!("height") => is_length(value),
        _ => false,
    }
}

// Keeps comments, escapes, strings, urls and signs out before tokenizing.
fn is_value_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '#' | '%' | ',' | '.' | '(' | ')' | ' ')
}

fn parse_value<'i, F>(value: &'i str, parse: F) -> bool
where
    F: for<'t> FnOnce(&mut Parser<'i, 't>) -> Result<(), CssParseError<'i>>,
{
    let mut input = ParserInput::new(value);
    let mut parser = Parser::new(&mut input);
    parser.parse_entirely(parse).is_ok()
}

/// `rgb()`, `rgba()`, `hsl()` or `hsla()` over plain numbers, a 3 or 6 digit hex color, or
/// a bare color name.
fn is_color(value: &str) -> bool {
    parse_value(value, |parser| {
        let token = parser.next()?.clone();
        match token {
            Token::Function(ref name) if is_color_function(name) => {
                parser.parse_nested_block(|arguments| {
                    while !arguments.is_exhausted() {
                        let plain = matches!(
                            arguments.next()?,
                            Token::Number {
                                has_sign: false,
                                ..
                            } | Token::Percentage {
                                has_sign: false,
                                ..
                            } | Token::Comma
                        );
                        if !plain {
                            return Err(arguments.new_custom_error(()));
                        }
                    }
                    Ok(())
                })
            }
            Token::Hash(ref digits) | Token::IDHash(ref digits) if is_hex_color(digits) => Ok(()),
            Token::Ident(ref name) if name.chars().all(|c| c.is_ascii_alphabetic()) => Ok(()),
            _ => Err(parser.new_custom_error(())),
        }
    })
}

fn is_color_function(name: &CowRcStr) -> bool {
    matches!(&**name, "rgb" | "rgba" | "hsl" | "hsla")
}

fn is_hex_color(digits: &str) -> bool {
    (digits.len() == 3 || digits.len() == 6) && digits.chars().all(|c| c.is_ascii_hexdigit())
}

/// A non-negative quantity in `px`, `em`, `rem` or `%`.
fn is_length(value: &str) -> bool {
    parse_value(value, |parser| {
        let token = parser.next()?.clone();
        match token {
            Token::Dimension {
                has_sign: false,
                ref unit,
                ..
            } if matches!(&**unit, "px" | "em" | "rem") => Ok(()),
            Token::Percentage {
                has_sign: false, ..
            } => Ok(()),
            _ => Err(parser.new_custom_error(())),
        }
    })
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn keeps_allowed_declarations_in_order() {
        assert_eq!(
            valid_styles("color:red;width:10px;behavior:evil"),
            "color: red;width: 10px;"
        );
    }

    #[test]
    fn normalizes_case_and_whitespace() {
        assert_eq!(
            valid_styles("  COLOR : Blue ; Text-Align:CENTER"),
            "color: blue;text-align: center;"
        );
    }

    #[test]
    fn color_functions() {
        assert_eq!(valid_styles("color: rgb(1, 2, 3)"), "color: rgb(1, 2, 3);");
        assert_eq!(
            valid_styles("color: rgba(10%, 20%, 30%, 0.5)"),
            "color: rgba(10%, 20%, 30%, 0.5);"
        );
        assert_eq!(valid_styles("color: hsl(120, 50%, 50%)"), "color: hsl(120, 50%, 50%);");
        assert_eq!(valid_styles("color: hsla(1,2%,3%,.4)"), "color: hsla(1,2%,3%,.4);");
        assert_eq!(valid_styles("color: rgb(-1, 2, 3)"), "");
        assert_eq!(valid_styles("color: rgb(a, 2, 3)"), "");
        assert_eq!(valid_styles("color: calc(1)"), "");
        assert_eq!(valid_styles("color: expression(alert(1))"), "");
    }

    #[test]
    fn hex_colors() {
        assert_eq!(valid_styles("color:#FFF"), "color: #fff;");
        assert_eq!(valid_styles("color:#a0b1c2"), "color: #a0b1c2;");
        assert_eq!(valid_styles("color:#123"), "color: #123;");
        assert_eq!(valid_styles("color:#abcd"), "");
        assert_eq!(valid_styles("color:#ggg"), "");
    }

    #[test]
    fn named_colors() {
        assert_eq!(valid_styles("color: rebeccapurple"), "color: rebeccapurple;");
        assert_eq!(valid_styles("color: red blue"), "");
        assert_eq!(valid_styles("color: red1"), "");
        assert_eq!(valid_styles("color:"), "");
    }

    #[test]
    fn text_align_and_float() {
        assert_eq!(valid_styles("text-align: justify"), "text-align: justify;");
        assert_eq!(valid_styles("text-align: start"), "");
        assert_eq!(valid_styles("float: none"), "float: none;");
        assert_eq!(valid_styles("float: center"), "");
    }

    #[test]
    fn lengths() {
        assert_eq!(valid_styles("width: 10px; height: 2.5em"), "width: 10px;height: 2.5em;");
        assert_eq!(valid_styles("width: 1rem"), "width: 1rem;");
        assert_eq!(valid_styles("height: 50%"), "height: 50%;");
        assert_eq!(valid_styles("width: 10"), "");
        assert_eq!(valid_styles("width: 10pt"), "");
        assert_eq!(valid_styles("width: px"), "");
        assert_eq!(valid_styles("width: 10px 20px"), "");
    }

    #[test]
    fn drops_malformed_pairs() {
        assert_eq!(valid_styles("color"), "");
        assert_eq!(valid_styles("color:red:blue"), "");
        assert_eq!(valid_styles(";;color:red;;"), "color: red;");
        assert_eq!(valid_styles("background: url(javascript:alert(1))"), "");
    }

    #[test]
    fn rejects_comments_and_escapes() {
        assert_eq!(valid_styles("color: red/**/"), "");
        assert_eq!(valid_styles("color: \\72 ed"), "");
        assert_eq!(valid_styles("width: 10px !important"), "");
    }
}
