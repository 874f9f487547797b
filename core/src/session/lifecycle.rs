use serde::{Deserialize, Serialize};

#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SaveState {
    IDLE,
    SAVING,
    SAVED,
    FAILED,
}

pub fn valid_transition(from: SaveState, to: SaveState) -> bool {
    use SaveState::*;
    match (from, to) {
        (IDLE, SAVING) => true,
        (SAVED, SAVING) => true,
        (FAILED, SAVING) => true,
        (SAVING, SAVED) => true,
        (SAVING, FAILED) => true,
        _ => false,
    }
}

#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum NoticeLevel {
    INFO,
    ERROR,
}

/// Non-blocking message for the user (toast-style).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Notice {
    pub ts_utc: String,
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self::at_now(NoticeLevel::INFO, message.into())
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::at_now(NoticeLevel::ERROR, message.into())
    }

    fn at_now(level: NoticeLevel, message: String) -> Self {
        Self {
            ts_utc: now_rfc3339_utc(),
            level,
            message,
        }
    }
}

fn now_rfc3339_utc() -> String {
    time::OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::{valid_transition, Notice, NoticeLevel, SaveState};

    #[test]
    fn save_lifecycle_allows_retry_only_after_settling() {
        assert!(valid_transition(SaveState::IDLE, SaveState::SAVING));
        assert!(valid_transition(SaveState::FAILED, SaveState::SAVING));
        assert!(!valid_transition(SaveState::SAVING, SaveState::SAVING));
        assert!(!valid_transition(SaveState::IDLE, SaveState::SAVED));
    }

    #[test]
    fn notices_are_timestamped() {
        let n = Notice::error("save failed");
        assert_eq!(n.level, NoticeLevel::ERROR);
        assert!(n.ts_utc.ends_with('Z'));
    }
}
