//! XML safety helpers shared by both conversion directions.

use crate::model::PropertyValue;

pub const BPMN_MODEL_NS: &str = "http://www.omg.org/spec/BPMN/20100524/MODEL";
pub const BPMN_DI_NS: &str = "http://www.omg.org/spec/BPMN/20100524/DI";
pub const DC_NS: &str = "http://www.omg.org/spec/DD/20100524/DC";
pub const DI_NS: &str = "http://www.omg.org/spec/DD/20100524/DI";
pub const SIMSAM_NS: &str = "http://simsam.process/extension";
pub const XSI_NS: &str = "http://www.w3.org/2001/XMLSchema-instance";

const FALLBACK_ID: &str = "element_1";

fn is_id_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || matches!(ch, '_' | '.' | '-')
}

/// Turns an arbitrary string into a valid XML id matching `[A-Za-z_][A-Za-z0-9_.-]*`.
///
/// Every unsupported character becomes `_`; ids starting with a digit, `.` or `-` get an `el_`
/// prefix. Empty input yields `element_1`. Idempotent.
pub fn make_xml_safe_id(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return FALLBACK_ID.to_string();
    }

    let mut out = String::with_capacity(trimmed.len() + 3);
    for ch in trimmed.chars() {
        out.push(if is_id_char(ch) { ch } else { '_' });
    }
    if out
        .chars()
        .next()
        .is_some_and(|c| !(c.is_ascii_alphabetic() || c == '_'))
    {
        out.insert_str(0, "el_");
    }
    out
}

fn is_dropped_control(ch: char) -> bool {
    matches!(ch, '\u{0000}'..='\u{0008}' | '\u{000B}' | '\u{000C}' | '\u{000E}'..='\u{001F}' | '\u{007F}')
}

/// Escapes text for use inside an XML attribute or text node.
///
/// Line breaks and tabs collapse to spaces, other control characters are removed, and the
/// result is trimmed. Not idempotent for `&`: escaping twice yields `&amp;amp;`.
pub fn escape_xml_thoroughly(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                out.push(' ');
            }
            '\n' | '\t' => out.push(' '),
            c if is_dropped_control(c) => {}
            c => out.push(c),
        }
    }
    out.trim().to_string()
}

/// Restores a scalar type from the textual form of a `simsam:property` value.
///
/// `true`/`false` (any case) become booleans, `none`/`null` become null, text containing a `.`
/// is tried as a float and anything else as an integer. Text that parses as neither is kept
/// verbatim, so a string that merely looks numeric or boolean does not survive a round trip as a
/// string.
pub fn parse_property_value(raw: &str) -> PropertyValue {
    let v = raw.trim();
    match v.to_ascii_lowercase().as_str() {
        "true" => return PropertyValue::Bool(true),
        "false" => return PropertyValue::Bool(false),
        "none" | "null" => return PropertyValue::Null,
        _ => {}
    }

    if v.contains('.') {
        if let Some(f) = v.parse::<f64>().ok().filter(|f| f.is_finite()) {
            return PropertyValue::Float(f);
        }
    } else if let Ok(i) = v.parse::<i64>() {
        return PropertyValue::Integer(i);
    } else if let Ok(u) = v.parse::<u64>() {
        return PropertyValue::Unsigned(u);
    }
    PropertyValue::String(raw.to_string())
}
