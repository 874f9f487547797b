use crate::content::model::{CanonicalContentModel, Channel};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Body of the content-update request, keyed by backend channel names.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct UpdatePayload(Map<String, Value>);

impl UpdatePayload {
    pub fn get(&self, channel: Channel) -> Option<&Value> {
        self.0.get(channel.backend_key())
    }

    pub fn channels(&self) -> Vec<Channel> {
        self.0.keys().filter_map(|k| Channel::from_key(k)).collect()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_json(&self) -> &Map<String, Value> {
        &self.0
    }

    fn insert(&mut self, channel: Channel, value: Value) {
        self.0.insert(channel.backend_key().to_string(), value);
    }
}

/// Partial update: only channels edited this session, always as plain strings.
pub fn to_update_request(model: &CanonicalContentModel) -> UpdatePayload {
    let mut out = UpdatePayload::default();
    for channel in Channel::ALL {
        if model.is_edited(channel) {
            out.insert(channel, Value::String(edited_text(model, channel)));
        }
    }
    out
}

/// Every generated or edited channel. Unedited documents go back as their decoded object,
/// other unedited channels exactly as the record carried them.
pub fn to_full_update_request(model: &CanonicalContentModel) -> UpdatePayload {
    let mut out = UpdatePayload::default();
    for channel in Channel::ALL {
        if model.is_edited(channel) {
            out.insert(channel, Value::String(edited_text(model, channel)));
        } else if model.channels.get(channel).is_generated() {
            out.insert(channel, model.channels.get(channel).unedited_json());
        }
    }
    out
}

fn edited_text(model: &CanonicalContentModel, channel: Channel) -> String {
    model
        .channel(channel)
        .as_plain_text()
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::mapper::normalize;
    use crate::content::model::RawContentRecord;
    use serde_json::json;

    fn model(v: Value) -> CanonicalContentModel {
        normalize(Some(&RawContentRecord::from_value(v).unwrap())).unwrap()
    }

    #[test]
    fn untouched_model_sends_nothing() {
        let m = model(json!({"tweet": "Hi"}));
        assert!(to_update_request(&m).is_empty());
    }

    #[test]
    fn uses_backend_keys_whatever_the_source_spelling() {
        let mut m = model(json!({"TikTok Script": "old"}));
        m.set_channel_text(Channel::TiktokScript, "new");
        let payload = to_update_request(&m);
        assert_eq!(serde_json::to_value(&payload).unwrap(), json!({"tiktok_script": "new"}));
    }

    #[test]
    fn full_update_round_trips_unedited_documents() {
        let mut m = model(json!({
            "tweet": "Hi",
            "Facebook Post": "{\"Hook\": \"Q?\", \"Beats\": {\"b\": [1, {\"x\": 2}]}, \"A\": 1}"
        }));
        m.set_channel_text(Channel::Tweet, "Hello");
        let payload = to_full_update_request(&m);
        assert_eq!(payload.len(), 2);
        assert_eq!(payload.get(Channel::Tweet), Some(&json!("Hello")));
        let body = serde_json::to_string(payload.get(Channel::FacebookPost).unwrap()).unwrap();
        assert_eq!(body, r#"{"Hook":"Q?","Beats":{"b":[1,{"x":2}]},"A":1}"#);
    }

    #[test]
    fn full_update_keeps_unedited_plain_values_as_received() {
        let m = model(json!({
            "id": "1",
            "youtube_script": ["beat 1", "beat 2"],
            "tweet": 42,
            "facebook_post": "[1, 2]",
            "TikTok Script": "{broken"
        }));
        let payload = to_full_update_request(&m);
        assert_eq!(payload.get(Channel::YoutubeScript), Some(&json!(["beat 1", "beat 2"])));
        assert_eq!(payload.get(Channel::Tweet), Some(&json!(42)));
        assert_eq!(payload.get(Channel::FacebookPost), Some(&json!("[1, 2]")));
        assert_eq!(payload.get(Channel::TiktokScript), Some(&json!("{broken")));
    }

    #[test]
    fn edited_document_is_downgraded() {
        let mut m = model(json!({"youtube_script": {"Intro": "Hey"}}));
        m.set_channel_text(Channel::YoutubeScript, "Plain now");
        let payload = to_full_update_request(&m);
        assert_eq!(payload.get(Channel::YoutubeScript), Some(&json!("Plain now")));
        assert_eq!(payload.channels(), vec![Channel::YoutubeScript]);
    }
}
