use serde::Deserialize;
use crate::error::{ErrorMessage, MAX_EMAIL_LENGTH, MAX_NAME_LENGTH};

/// Fields posted by the comment form. Absent fields read as empty strings
/// so they fail validation with their own message.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CommentSubmission {
    pub slug: String,
    pub name: String,
    pub email: String,
    #[serde(rename = "replyTo")]
    pub reply_to: String,
    pub comment: String,
}

// Lengths are measured in UTF-16 code units, the unit the comment form counts in.
fn utf16_len(value: &str) -> usize {
    value.encode_utf16().count()
}

impl CommentSubmission {
    /// Checks run in order and the first failure is returned.
    pub fn validate(&self) -> Result<(), ErrorMessage> {
        if self.slug.trim().is_empty() {
            return Err(ErrorMessage::EmptySlug);
        }
        if self.name.trim().is_empty() {
            return Err(ErrorMessage::EmptyName);
        }
        if self.email.trim().is_empty() {
            return Err(ErrorMessage::EmptyEmail);
        }
        if self.comment.trim().is_empty() {
            return Err(ErrorMessage::EmptyComment);
        }
        if utf16_len(&self.name) > MAX_NAME_LENGTH {
            return Err(ErrorMessage::ExceededMaxNameLength(MAX_NAME_LENGTH));
        }
        if utf16_len(&self.email) > MAX_EMAIL_LENGTH {
            return Err(ErrorMessage::ExceededMaxEmailLength(MAX_EMAIL_LENGTH));
        }
        Ok(())
    }
}
