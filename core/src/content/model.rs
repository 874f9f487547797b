use crate::error::{CoreError, CoreResult};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeSet;

/// Label shown when a record carries no usable brand name.
pub const DEFAULT_BRAND_LABEL: &str = "Brand";

/// One generated-content channel. Every canonical model carries exactly one slot per channel.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Channel {
    Tweet,
    FacebookPost,
    YoutubeScript,
    TiktokScript,
}

impl Channel {
    pub const ALL: [Channel; 4] = [
        Channel::Tweet,
        Channel::FacebookPost,
        Channel::YoutubeScript,
        Channel::TiktokScript,
    ];

    /// Key spelling the backend expects on update requests.
    pub fn backend_key(self) -> &'static str {
        match self {
            Channel::Tweet => "tweet",
            Channel::FacebookPost => "facebook_post",
            Channel::YoutubeScript => "youtube_script",
            Channel::TiktokScript => "tiktok_script",
        }
    }

    /// Candidate raw-record keys, highest precedence first.
    pub fn raw_keys(self) -> &'static [&'static str] {
        match self {
            Channel::Tweet => &["tweet", "Tweet"],
            Channel::FacebookPost => &["facebook_post", "Facebook Post"],
            Channel::YoutubeScript => &["youtube_script", "YouTube Script"],
            Channel::TiktokScript => &["tiktok_script", "TikTok Script"],
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Channel::Tweet => "Tweet",
            Channel::FacebookPost => "Facebook Post",
            Channel::YoutubeScript => "YouTube Script",
            Channel::TiktokScript => "TikTok Script",
        }
    }

    /// Accepts either the backend key or any of the raw spellings.
    pub fn from_key(key: &str) -> Option<Channel> {
        Channel::ALL
            .into_iter()
            .find(|c| c.backend_key() == key || c.raw_keys().contains(&key))
    }
}

/// Body of one section in a structured document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum SectionBody {
    Text(String),
    List(Vec<String>),
    /// One nesting level only; values are already display strings.
    FlatMap(IndexMap<String, String>),
}

/// A decoded multi-section content value.
///
/// `source` is the JSON object the sections were derived from. It is what gets persisted
/// when the channel is saved without being edited, so nesting and key order survive exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructuredDocument {
    sections: IndexMap<String, SectionBody>,
    source: Map<String, Value>,
}

impl StructuredDocument {
    pub(crate) fn new(sections: IndexMap<String, SectionBody>, source: Map<String, Value>) -> Self {
        Self { sections, source }
    }

    pub fn sections(&self) -> &IndexMap<String, SectionBody> {
        &self.sections
    }

    pub fn section(&self, title: &str) -> Option<&SectionBody> {
        self.sections.get(title)
    }

    pub fn source(&self) -> &Map<String, Value> {
        &self.source
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentValue {
    PlainText(String),
    StructuredDocument(StructuredDocument),
}

impl ContentValue {
    pub fn empty() -> Self {
        ContentValue::PlainText(String::new())
    }

    pub fn is_empty(&self) -> bool {
        match self {
            ContentValue::PlainText(s) => s.is_empty(),
            ContentValue::StructuredDocument(doc) => doc.is_empty(),
        }
    }

    pub fn as_plain_text(&self) -> Option<&str> {
        match self {
            ContentValue::PlainText(s) => Some(s),
            ContentValue::StructuredDocument(_) => None,
        }
    }

    pub fn as_document(&self) -> Option<&StructuredDocument> {
        match self {
            ContentValue::StructuredDocument(doc) => Some(doc),
            ContentValue::PlainText(_) => None,
        }
    }

    /// JSON form sent to the backend: a string, or the original decoded object.
    pub fn to_json(&self) -> Value {
        match self {
            ContentValue::PlainText(s) => Value::String(s.clone()),
            ContentValue::StructuredDocument(doc) => Value::Object(doc.source.clone()),
        }
    }
}

impl Default for ContentValue {
    fn default() -> Self {
        ContentValue::empty()
    }
}

/// A content record exactly as the listing endpoint returned it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct RawContentRecord(Map<String, Value>);

impl RawContentRecord {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    pub fn from_value(value: Value) -> CoreResult<Self> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            Value::Null => Err(CoreError::MissingRecord),
            other => Err(CoreError::InvalidInput(format!(
                "content record must be a JSON object, got {}",
                json_kind(&other)
            ))),
        }
    }

    pub fn from_json_str(json_str: &str) -> CoreResult<Self> {
        let raw: Value = serde_json::from_str(json_str)
            .map_err(|e| CoreError::InvalidInput(format!("Failed to parse content record: {}", e)))?;
        Self::from_value(raw)
    }

    /// Value under `key`, treating JSON `null` as missing.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key).filter(|v| !v.is_null())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChannelSlot {
    pub value: ContentValue,
    /// Raw key the value was read from; `None` when the channel was never generated.
    pub source_key: Option<&'static str>,
    /// Value exactly as it appeared on the raw record.
    pub raw: Option<Value>,
}

impl ChannelSlot {
    pub fn is_generated(&self) -> bool {
        self.source_key.is_some()
    }

    /// JSON to persist when the user has not edited this channel.
    pub fn unedited_json(&self) -> Value {
        match (&self.value, &self.raw) {
            (ContentValue::StructuredDocument(_), _) => self.value.to_json(),
            (ContentValue::PlainText(_), Some(raw)) => raw.clone(),
            (ContentValue::PlainText(_), None) => self.value.to_json(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChannelSlots {
    pub tweet: ChannelSlot,
    pub facebook_post: ChannelSlot,
    pub youtube_script: ChannelSlot,
    pub tiktok_script: ChannelSlot,
}

impl ChannelSlots {
    pub fn get(&self, channel: Channel) -> &ChannelSlot {
        match channel {
            Channel::Tweet => &self.tweet,
            Channel::FacebookPost => &self.facebook_post,
            Channel::YoutubeScript => &self.youtube_script,
            Channel::TiktokScript => &self.tiktok_script,
        }
    }

    pub fn get_mut(&mut self, channel: Channel) -> &mut ChannelSlot {
        match channel {
            Channel::Tweet => &mut self.tweet,
            Channel::FacebookPost => &mut self.facebook_post,
            Channel::YoutubeScript => &mut self.youtube_script,
            Channel::TiktokScript => &mut self.tiktok_script,
        }
    }
}

/// Normalized, editable form of one content record. Lives only for one edit session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalContentModel {
    pub id: Option<String>,
    pub brand_id: Option<String>,
    pub brand_label: String,
    pub trend: Option<String>,
    pub generated_at: Option<String>,
    pub channels: ChannelSlots,
    edited: BTreeSet<Channel>,
}

impl CanonicalContentModel {
    pub fn new(
        id: Option<String>,
        brand_id: Option<String>,
        brand_label: String,
        trend: Option<String>,
        generated_at: Option<String>,
        channels: ChannelSlots,
    ) -> Self {
        Self {
            id,
            brand_id,
            brand_label,
            trend,
            generated_at,
            channels,
            edited: BTreeSet::new(),
        }
    }

    pub fn channel(&self, channel: Channel) -> &ContentValue {
        &self.channels.get(channel).value
    }

    /// Replace a channel with user-edited text. Structured channels are downgraded to plain text.
    pub fn set_channel_text(&mut self, channel: Channel, text: impl Into<String>) {
        self.channels.get_mut(channel).value = ContentValue::PlainText(text.into());
        self.edited.insert(channel);
    }

    pub fn is_edited(&self, channel: Channel) -> bool {
        self.edited.contains(&channel)
    }

    pub fn edited_channels(&self) -> impl Iterator<Item = Channel> + '_ {
        self.edited.iter().copied()
    }

    pub fn has_unsaved_edits(&self) -> bool {
        !self.edited.is_empty()
    }

    pub(crate) fn mark_saved(&mut self, channels: &[Channel]) {
        for c in channels {
            self.edited.remove(c);
        }
    }

    /// `generated_at` parsed as RFC 3339, if it is one.
    pub fn generated_at_utc(&self) -> Option<time::OffsetDateTime> {
        let raw = self.generated_at.as_deref()?;
        time::OffsetDateTime::parse(raw, &time::format_description::well_known::Rfc3339)
            .ok()
            .map(|t| t.to_offset(time::UtcOffset::UTC))
    }
}
