use crate::content::model::{ContentValue, SectionBody, StructuredDocument};
use indexmap::IndexMap;
use serde_json::{Map, Value};
use thiserror::Error;

/// Structured decoding of a channel value failed. Never leaves this module.
#[derive(Debug, Error)]
#[error("decode failure: {0}")]
struct DecodeFailure(#[from] serde_json::Error);

/// Anything `parse` accepts: raw JSON, raw text, or an already-typed value.
pub trait IntoContentValue {
    fn into_content_value(self) -> ContentValue;
}

impl IntoContentValue for &Value {
    fn into_content_value(self) -> ContentValue {
        match self {
            Value::Null => ContentValue::empty(),
            Value::String(s) => parse_text(s),
            Value::Object(_) | Value::Array(_) => from_decoded(self),
            scalar => ContentValue::PlainText(scalar.to_string()),
        }
    }
}

impl IntoContentValue for Option<&Value> {
    fn into_content_value(self) -> ContentValue {
        match self {
            Some(v) => v.into_content_value(),
            None => ContentValue::empty(),
        }
    }
}

impl IntoContentValue for &str {
    fn into_content_value(self) -> ContentValue {
        parse_text(self)
    }
}

impl IntoContentValue for ContentValue {
    fn into_content_value(self) -> ContentValue {
        self
    }
}

impl IntoContentValue for &ContentValue {
    fn into_content_value(self) -> ContentValue {
        self.clone()
    }
}

/// Turn a raw channel value into a typed one. Total: malformed input becomes plain text.
pub fn parse<T: IntoContentValue>(value: T) -> ContentValue {
    value.into_content_value()
}

fn parse_text(s: &str) -> ContentValue {
    if !looks_structured(s) {
        return ContentValue::PlainText(s.to_string());
    }
    match decode(s) {
        Ok(decoded) => from_decoded(&decoded),
        Err(e) => {
            log::debug!("keeping channel value as plain text: {}", e);
            ContentValue::PlainText(s.to_string())
        }
    }
}

fn looks_structured(s: &str) -> bool {
    matches!(s.trim_start().chars().next(), Some('{') | Some('['))
}

fn decode(s: &str) -> Result<Value, DecodeFailure> {
    Ok(serde_json::from_str(s)?)
}

fn from_decoded(decoded: &Value) -> ContentValue {
    match decoded {
        Value::Object(map) => ContentValue::StructuredDocument(document_from_map(map)),
        Value::String(s) => ContentValue::PlainText(s.clone()),
        other => ContentValue::PlainText(
            serde_json::to_string_pretty(other).unwrap_or_else(|_| other.to_string()),
        ),
    }
}

fn document_from_map(map: &Map<String, Value>) -> StructuredDocument {
    let mut sections = IndexMap::with_capacity(map.len());
    for (title, value) in map {
        sections.insert(title.clone(), section_body(value));
    }
    StructuredDocument::new(sections, map.clone())
}

fn section_body(value: &Value) -> SectionBody {
    match value {
        Value::Array(items) => SectionBody::List(items.iter().map(display_string).collect()),
        Value::Object(entries) => SectionBody::FlatMap(
            entries
                .iter()
                .map(|(k, v)| (k.clone(), display_string(v)))
                .collect(),
        ),
        other => SectionBody::Text(display_string(other)),
    }
}

/// Display text for a leaf. Anything nested deeper is shown as compact JSON.
pub fn display_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        nested => nested.to_string(),
    }
}
