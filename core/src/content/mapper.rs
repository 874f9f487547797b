use crate::content::model::{
    CanonicalContentModel, Channel, ChannelSlot, ChannelSlots, RawContentRecord,
    DEFAULT_BRAND_LABEL,
};
use crate::content::parser::parse;
use crate::error::{CoreError, CoreResult};
use serde_json::Value;
use std::path::Path;

const ID_KEYS: &[&str] = &["id", "Id", "_id"];
const GENERATED_AT_KEYS: &[&str] = &["generated_at", "Generated At"];
const TREND_KEYS: &[&str] = &["trend", "Trend"];
const BRAND_LABEL_KEYS: &[&str] = &["brand_name", "Brand Name"];
const BRAND_ID_KEYS: &[&str] = &["brand_id", "Brand ID"];
const EMBEDDED_BRAND_KEY: &str = "brand";

/// First candidate key present on the record. An empty string counts as present.
pub fn resolve_key<'r>(
    raw: &'r RawContentRecord,
    candidates: &[&'static str],
) -> Option<(&'static str, &'r Value)> {
    candidates
        .iter()
        .find_map(|k| raw.get(k).map(|v| (*k, v)))
}

/// Build the canonical model for one edit session.
///
/// `None` or an empty record is `MissingRecord`; the caller shows its "not found" state.
pub fn normalize(raw: Option<&RawContentRecord>) -> CoreResult<CanonicalContentModel> {
    let raw = match raw {
        Some(r) if !r.is_empty() => r,
        _ => return Err(CoreError::MissingRecord),
    };

    let mut channels = ChannelSlots::default();
    for channel in Channel::ALL {
        if let Some((key, value)) = resolve_key(raw, channel.raw_keys()) {
            log::debug!("channel {:?} read from key {:?}", channel, key);
            *channels.get_mut(channel) = ChannelSlot {
                value: parse(value),
                source_key: Some(key),
                raw: Some(value.clone()),
            };
        }
    }

    let id = resolve_key(raw, ID_KEYS).and_then(|(_, v)| scalar_text(v));
    let generated_at = resolve_key(raw, GENERATED_AT_KEYS).and_then(|(_, v)| scalar_text(v));
    let trend = resolve_key(raw, TREND_KEYS).and_then(|(_, v)| scalar_text(v));

    Ok(CanonicalContentModel::new(
        id,
        brand_id(raw),
        brand_label(raw),
        trend,
        generated_at,
        channels,
    ))
}

/// Read a raw record from a JSON file and normalize it.
pub fn normalize_file(path: impl AsRef<Path>) -> CoreResult<CanonicalContentModel> {
    let text = std::fs::read_to_string(path)?;
    if text.trim().is_empty() {
        return Err(CoreError::MissingRecord);
    }
    let raw = RawContentRecord::from_json_str(&text)?;
    normalize(Some(&raw))
}

fn brand_label(raw: &RawContentRecord) -> String {
    let label = match resolve_key(raw, BRAND_LABEL_KEYS) {
        Some((_, v)) => scalar_text(v),
        None => match raw.get(EMBEDDED_BRAND_KEY) {
            Some(Value::String(s)) => Some(s.clone()),
            Some(Value::Object(brand)) => brand
                .get("name")
                .and_then(|v| v.as_str())
                .map(|s| s.to_string()),
            _ => None,
        },
    };
    label
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_BRAND_LABEL.to_string())
}

fn brand_id(raw: &RawContentRecord) -> Option<String> {
    if let Some((_, v)) = resolve_key(raw, BRAND_ID_KEYS) {
        return scalar_text(v);
    }
    match raw.get(EMBEDDED_BRAND_KEY) {
        Some(Value::Object(brand)) => brand.get("id").and_then(scalar_text),
        _ => None,
    }
}

fn scalar_text(v: &Value) -> Option<String> {
    match v {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
