use crate::content::model::{Channel, ContentValue};
use crate::error::CoreResult;
use std::time::{Duration, Instant};

/// How long the "copied" acknowledgment stays visible.
pub const COPY_ACK_WINDOW: Duration = Duration::from_secs(2);

/// Destination for copy actions (the system clipboard in the app, a buffer in tests).
pub trait ClipboardSink {
    fn write_text(&mut self, text: &str) -> CoreResult<()>;
}

impl ClipboardSink for String {
    fn write_text(&mut self, text: &str) -> CoreResult<()> {
        self.clear();
        self.push_str(text);
        Ok(())
    }
}

/// Text placed on the clipboard for a value: plain text verbatim, documents as indented JSON.
pub fn clipboard_text(value: &ContentValue) -> String {
    match value {
        ContentValue::PlainText(s) => s.clone(),
        ContentValue::StructuredDocument(_) => {
            let json = value.to_json();
            serde_json::to_string_pretty(&json).unwrap_or_else(|_| json.to_string())
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyTarget {
    Channel(Channel),
    /// Free text such as the trend label.
    Text,
}

#[derive(Debug, Clone, Default)]
pub struct CopyAcknowledgement {
    last: Option<(CopyTarget, Instant)>,
}

impl CopyAcknowledgement {
    pub fn arm(&mut self, target: CopyTarget, now: Instant) {
        self.last = Some((target, now));
    }

    pub fn is_showing(&self, target: CopyTarget, now: Instant) -> bool {
        match self.last {
            Some((t, at)) => t == target && now.saturating_duration_since(at) < COPY_ACK_WINDOW,
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.last = None;
    }
}
