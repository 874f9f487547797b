use crate::backend::interface::ContentBackend;
use crate::content::clipboard::{clipboard_text, ClipboardSink, CopyAcknowledgement, CopyTarget};
use crate::content::mapper::normalize;
use crate::content::model::{CanonicalContentModel, Channel, RawContentRecord};
use crate::content::persist::{to_full_update_request, to_update_request, UpdatePayload};
use crate::content::render::{render_slot, DisplayNode};
use crate::error::{CoreError, CoreResult};
use crate::session::lifecycle::{valid_transition, Notice, SaveState};
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved { channels: usize },
    NothingToSave,
}

/// State owned by one open content editor.
pub struct EditSession {
    model: CanonicalContentModel,
    state: SaveState,
    notice: Option<Notice>,
    copied: CopyAcknowledgement,
}

impl EditSession {
    pub fn open(raw: Option<&RawContentRecord>) -> CoreResult<Self> {
        let model = normalize(raw)?;
        Ok(Self {
            model,
            state: SaveState::IDLE,
            notice: None,
            copied: CopyAcknowledgement::default(),
        })
    }

    pub fn model(&self) -> &CanonicalContentModel {
        &self.model
    }

    pub fn state(&self) -> SaveState {
        self.state
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    pub fn render(&self, channel: Channel) -> DisplayNode {
        render_slot(self.model.channels.get(channel), self.model.is_edited(channel))
    }

    /// Every generated channel, with unedited values exactly as received.
    pub fn full_update_request(&self) -> UpdatePayload {
        to_full_update_request(&self.model)
    }

    pub fn edit(&mut self, channel: Channel, text: impl Into<String>) {
        self.model.set_channel_text(channel, text);
    }

    /// Copy the current value of a channel, structured or not.
    pub fn copy(
        &mut self,
        channel: Channel,
        sink: &mut impl ClipboardSink,
        now: Instant,
    ) -> CoreResult<()> {
        sink.write_text(&clipboard_text(self.model.channel(channel)))?;
        self.copied.arm(CopyTarget::Channel(channel), now);
        Ok(())
    }

    pub fn copy_text(
        &mut self,
        text: &str,
        sink: &mut impl ClipboardSink,
        now: Instant,
    ) -> CoreResult<()> {
        sink.write_text(text)?;
        self.copied.arm(CopyTarget::Text, now);
        Ok(())
    }

    pub fn is_copied(&self, target: CopyTarget, now: Instant) -> bool {
        self.copied.is_showing(target, now)
    }

    /// Persist edited channels. On failure the model and its pending edits are left as they were.
    pub fn save(&mut self, backend: &impl ContentBackend) -> CoreResult<SaveOutcome> {
        let payload = to_update_request(&self.model);
        if payload.is_empty() {
            return Ok(SaveOutcome::NothingToSave);
        }
        self.transition(SaveState::SAVING)?;

        let result = match self.model.id.as_deref() {
            Some(id) => backend.update_content(id, &payload),
            None => Err(CoreError::save_failure(None, "content has no identifier")),
        };

        match result {
            Ok(()) => {
                let channels = payload.channels();
                self.model.mark_saved(&channels);
                self.transition(SaveState::SAVED)?;
                log::info!(
                    "saved {} channel(s) for content {}",
                    channels.len(),
                    self.model.id.as_deref().unwrap_or_default()
                );
                self.notice = Some(Notice::info("Content saved"));
                Ok(SaveOutcome::Saved {
                    channels: channels.len(),
                })
            }
            Err(e) => {
                log::warn!("content save failed: {}", e);
                self.transition(SaveState::FAILED)?;
                self.notice = Some(Notice::error(e.to_string()));
                Err(e)
            }
        }
    }

    fn transition(&mut self, to: SaveState) -> CoreResult<()> {
        if !valid_transition(self.state, to) {
            return Err(CoreError::InvalidInput(format!(
                "invalid save state transition {:?} -> {:?}",
                self.state, to
            )));
        }
        self.state = to;
        Ok(())
    }
}
