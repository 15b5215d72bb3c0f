//! Value classification
//!
//! A datatype tag is resolved once into a closed [`Datatype`] and each row
//! into a [`ValueKind`], which the extractor then dispatches on exhaustively.

use crate::types::ResultRow;
use regex::Regex;
use std::sync::LazyLock;
use wikimeta_domain::PropertyValue;

/// Trailing entity identifier of a value URI, e.g. `.../entity/Q5`
static ENTITY_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Q(\d+)$").expect("entity suffix pattern is valid"));

/// Datatype families the classifier recognizes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Datatype {
    /// `xsd:string` and `rdf:langString`
    String,
    /// `xsd:integer` and its derived integer types
    Integer,
    /// `xsd:decimal`, `xsd:double`, `xsd:float`
    Decimal,
    /// `xsd:dateTime`, `xsd:date` and other calendar types
    Date,
    /// Absent or unknown tag; not a primitive
    Unrecognized,
}

impl Datatype {
    /// Classify a datatype URI by its local name
    pub fn from_tag(tag: Option<&str>) -> Self {
        let Some(tag) = tag else {
            return Datatype::Unrecognized;
        };
        let local = tag.rsplit(|c: char| c == '#' || c == '/').next().unwrap_or(tag);

        match local {
            "string" | "langString" => Datatype::String,
            "integer" | "int" | "long" | "short" | "byte" | "nonNegativeInteger"
            | "positiveInteger" | "negativeInteger" | "nonPositiveInteger" | "unsignedLong"
            | "unsignedInt" | "unsignedShort" | "unsignedByte" => Datatype::Integer,
            "decimal" | "double" | "float" => Datatype::Decimal,
            "dateTime" | "date" | "time" | "gYear" | "gYearMonth" | "dateTimeStamp" => {
                Datatype::Date
            }
            _ => Datatype::Unrecognized,
        }
    }
}

/// Parse an integer literal; malformed input falls back to a decimal parse
/// and finally to a NaN sentinel
pub fn parse_integer(raw: &str) -> PropertyValue {
    match raw.trim().parse::<i64>() {
        Ok(value) => PropertyValue::Integer(value),
        Err(_) => parse_decimal(raw),
    }
}

/// Parse a decimal literal; malformed input yields a NaN sentinel
pub fn parse_decimal(raw: &str) -> PropertyValue {
    PropertyValue::Decimal(raw.trim().parse::<f64>().unwrap_or(f64::NAN))
}

/// Coerce a raw value according to its datatype tag
///
/// Returns `None` when the tag is absent or unrecognized and the value needs
/// further inspection (cross-reference or label).
///
/// # Examples
///
/// ```
/// use wikimeta_extractor::coerce_primitive;
/// use wikimeta_domain::PropertyValue;
///
/// let tag = "http://www.w3.org/2001/XMLSchema#integer";
/// assert_eq!(coerce_primitive(Some(tag), "7"), Some(PropertyValue::Integer(7)));
/// assert_eq!(coerce_primitive(None, "7"), None);
/// ```
pub fn coerce_primitive(tag: Option<&str>, raw: &str) -> Option<PropertyValue> {
    match Datatype::from_tag(tag) {
        Datatype::String => Some(PropertyValue::Text(raw.to_string())),
        Datatype::Integer => Some(parse_integer(raw)),
        Datatype::Decimal => Some(parse_decimal(raw)),
        Datatype::Date => Some(PropertyValue::Date(raw.to_string())),
        Datatype::Unrecognized => None,
    }
}

/// Digit run of a trailing `Q<digits>` identifier
pub fn entity_suffix(raw: &str) -> Option<&str> {
    ENTITY_SUFFIX
        .captures(raw)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// How a row's value is resolved, in precedence order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueKind {
    /// A normalized quantity is present and used verbatim
    Normalized(String),
    /// Date or time literal
    Date,
    /// Decimal literal
    Decimal,
    /// Integer literal
    Integer,
    /// Plain or language-tagged string
    String,
    /// Another entity with a resolved label; carries the identifier digits
    Reference {
        /// Digits following the `Q`
        digits: String,
        /// Resolved label of the referenced entity
        label: String,
    },
    /// Anything else: fall back to the resolved label, if any
    Label(Option<String>),
}

/// Decide how a row's value must be resolved
pub fn classify(row: &ResultRow) -> ValueKind {
    if let Some(normalized) = row.normalized_value.as_deref() {
        return ValueKind::Normalized(normalized.to_string());
    }

    match Datatype::from_tag(row.value_type.as_deref()) {
        Datatype::Date => return ValueKind::Date,
        Datatype::Decimal => return ValueKind::Decimal,
        Datatype::Integer => return ValueKind::Integer,
        Datatype::String => return ValueKind::String,
        Datatype::Unrecognized => {}
    }

    match (entity_suffix(&row.value), row.value_label.as_deref()) {
        (Some(digits), Some(label)) => ValueKind::Reference {
            digits: digits.to_string(),
            label: label.to_string(),
        },
        (_, label) => ValueKind::Label(label.map(str::to_string)),
    }
}
