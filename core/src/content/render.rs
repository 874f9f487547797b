use crate::content::model::{ChannelSlot, ContentValue, SectionBody};
use serde::Serialize;

pub const NO_CONTENT_PLACEHOLDER: &str = "No content available";
pub const NOT_GENERATED_LABEL: &str = "Not generated";

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "kind", content = "data")]
pub enum DisplayNode {
    /// Channel was never generated for this record.
    NotGenerated,
    /// Channel exists but holds nothing.
    Placeholder(&'static str),
    /// Shown verbatim; whitespace and line breaks are significant.
    Preformatted(String),
    Document(Vec<DisplayBlock>),
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DisplayBlock {
    pub label: String,
    pub body: DisplayBody,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "kind", content = "data")]
pub enum DisplayBody {
    Paragraph(String),
    Bullets(Vec<String>),
    KeyValues(Vec<(String, String)>),
}

/// Display tree for one channel value. Sections, items and entries keep their stored order.
pub fn render(value: &ContentValue) -> DisplayNode {
    match value {
        ContentValue::PlainText(s) if s.is_empty() => DisplayNode::Placeholder(NO_CONTENT_PLACEHOLDER),
        ContentValue::PlainText(s) => DisplayNode::Preformatted(s.clone()),
        ContentValue::StructuredDocument(doc) if doc.is_empty() => {
            DisplayNode::Placeholder(NO_CONTENT_PLACEHOLDER)
        }
        ContentValue::StructuredDocument(doc) => DisplayNode::Document(
            doc.sections()
                .iter()
                .map(|(label, body)| DisplayBlock {
                    label: label.clone(),
                    body: render_section(body),
                })
                .collect(),
        ),
    }
}

/// Like `render`, but a slot no raw key filled stays distinct from an empty one.
/// `edited` slots always render their current value.
pub fn render_slot(slot: &ChannelSlot, edited: bool) -> DisplayNode {
    if !slot.is_generated() && !edited {
        return DisplayNode::NotGenerated;
    }
    render(&slot.value)
}

fn render_section(body: &SectionBody) -> DisplayBody {
    match body {
        SectionBody::Text(s) => DisplayBody::Paragraph(s.clone()),
        SectionBody::List(items) => DisplayBody::Bullets(items.clone()),
        SectionBody::FlatMap(entries) => DisplayBody::KeyValues(
            entries
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        ),
    }
}

pub fn render_markdown(title: &str, node: &DisplayNode) -> String {
    let mut out = Vec::new();
    out.push(format!("# {}", title));
    out.push("".to_string());
    match node {
        DisplayNode::NotGenerated => out.push(format!("_{}_", NOT_GENERATED_LABEL)),
        DisplayNode::Placeholder(msg) => out.push(format!("_{}_", msg)),
        DisplayNode::Preformatted(text) => {
            out.push("```".to_string());
            out.push(text.clone());
            out.push("```".to_string());
        }
        DisplayNode::Document(blocks) => {
            for (idx, block) in blocks.iter().enumerate() {
                if idx > 0 {
                    out.push("".to_string());
                }
                out.push(format!("## {}", block.label));
                out.push("".to_string());
                match &block.body {
                    DisplayBody::Paragraph(text) => out.push(text.clone()),
                    DisplayBody::Bullets(items) => {
                        for item in items {
                            out.push(format!("- {}", item));
                        }
                    }
                    DisplayBody::KeyValues(entries) => {
                        for (k, v) in entries {
                            out.push(format!("{}: {}", k, v));
                        }
                    }
                }
            }
        }
    }
    out.push("".to_string());
    out.join("\n")
}
