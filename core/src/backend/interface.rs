use crate::content::persist::UpdatePayload;
use crate::error::{CoreError, CoreResult};

/// Transport for persisting edits. The edit session only talks to the backend through this.
pub trait ContentBackend {
    /// `PUT` the payload for content `id`. Any non-success outcome is `CoreError::SaveFailure`.
    fn update_content(&self, id: &str, payload: &UpdatePayload) -> CoreResult<()>;
}

impl<B: ContentBackend + ?Sized> ContentBackend for &B {
    fn update_content(&self, id: &str, payload: &UpdatePayload) -> CoreResult<()> {
        (**self).update_content(id, payload)
    }
}

/// Map a non-success HTTP status to the user-facing save error.
pub fn classify_save_status(status: u16) -> CoreError {
    let message = match status {
        401 | 403 => "not authorized; sign in again and retry",
        404 => "content no longer exists",
        408 | 504 => "backend timed out",
        400..=499 => "backend rejected the update",
        500..=599 => "backend error",
        _ => "unexpected response",
    };
    CoreError::save_failure(Some(status), message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unauthorized_is_a_plain_save_failure() {
        match classify_save_status(401) {
            CoreError::SaveFailure { status, message } => {
                assert_eq!(status, Some(401));
                assert!(message.contains("not authorized"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn status_appears_in_display() {
        let err = classify_save_status(503);
        assert_eq!(err.to_string(), "save failed (HTTP 503): backend error");
    }
}
