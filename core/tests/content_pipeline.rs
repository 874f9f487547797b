use content_core::content::mapper::{normalize, normalize_file};
use content_core::content::model::{Channel, ContentValue, RawContentRecord, SectionBody};
use content_core::content::parser::parse;
use content_core::content::render::{render, DisplayBody, DisplayNode};
use serde_json::json;
use std::io::Write;

#[test]
fn mixed_shape_record_normalizes_and_parses() {
    let raw = RawContentRecord::from_value(json!({
        "tweet": "Hi",
        "Facebook Post": {"Hook": "Did you know?", "Body": "..."}
    }))
    .unwrap();
    let model = normalize(Some(&raw)).unwrap();

    assert_eq!(
        model.channel(Channel::Tweet),
        &ContentValue::PlainText("Hi".to_string())
    );
    let doc = model.channel(Channel::FacebookPost).as_document().unwrap();
    let titles: Vec<&String> = doc.sections().keys().collect();
    assert_eq!(titles, vec!["Hook", "Body"]);
    assert_eq!(
        doc.section("Hook"),
        Some(&SectionBody::Text("Did you know?".to_string()))
    );
    assert_eq!(doc.section("Body"), Some(&SectionBody::Text("...".to_string())));
}

#[test]
fn encoded_string_and_decoded_object_agree() {
    let x = json!({"Scene 3": ["c", "b", "a"], "Scene 1": {"shot": "close", "len": 4}});
    let from_string = parse(x.to_string().as_str());
    let from_object = parse(&x);
    assert_eq!(from_string, from_object);

    match render(&from_string) {
        DisplayNode::Document(blocks) => {
            assert_eq!(blocks[0].label, "Scene 3");
            assert_eq!(
                blocks[0].body,
                DisplayBody::Bullets(vec!["c".into(), "b".into(), "a".into()])
            );
            assert_eq!(
                blocks[1].body,
                DisplayBody::KeyValues(vec![
                    ("shot".into(), "close".into()),
                    ("len".into(), "4".into())
                ])
            );
        }
        other => panic!("expected document, got {:?}", other),
    }
}

#[test]
fn parse_is_idempotent_over_typed_values() {
    for raw in ["Hello world", "{not valid json", r#"{"a": [1, 2]}"#, "[true]"] {
        let once = parse(raw);
        assert_eq!(parse(once.clone()), once);
    }
}

#[test]
fn record_loads_from_file() {
    let mut f = tempfile::NamedTempFile::new().unwrap();
    write!(
        f,
        "{}",
        json!({"_id": "x9", "YouTube Script": "{\"Intro\": \"Hey\"}", "trend": "AI agents"})
    )
    .unwrap();
    let model = normalize_file(f.path()).unwrap();
    assert_eq!(model.id.as_deref(), Some("x9"));
    assert_eq!(model.trend.as_deref(), Some("AI agents"));
    assert!(model.channel(Channel::YoutubeScript).as_document().is_some());
}

#[test]
fn empty_file_is_missing_record() {
    let f = tempfile::NamedTempFile::new().unwrap();
    assert!(normalize_file(f.path()).unwrap_err().is_missing_record());
}
