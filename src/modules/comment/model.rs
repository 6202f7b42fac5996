use base64::{Engine, engine::general_purpose::STANDARD};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};
use uuid::Uuid;
use crate::{
    github::{Committer, CreateFileRequest},
    modules::comment::dto::CommentSubmission,
    utils::hash::md5_hex,
};

const COMMENTS_DIR: &str = "data/comments";
const COMMITTER_NAME: &str = "Monalisa Octocat";
const COMMITTER_EMAIL: &str = "octocat@github.com";

/// One accepted comment, exactly as it is written to the repository.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommentRecord {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
    /// MD5 of the submitted address, for Gravatar.
    pub email: String,
    /// Kept for reply notifications.
    pub email_real: String,
    pub reply_to: String,
    pub comment: String,
    #[serde(serialize_with = "serialize_iso_millis")]
    pub date: DateTime<Utc>,
}

fn serialize_iso_millis<S: Serializer>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&date.to_rfc3339_opts(SecondsFormat::Millis, true))
}

impl CommentRecord {
    pub fn new(submission: &CommentSubmission) -> Self {
        Self::with_identity(submission, Uuid::now_v7(), Utc::now())
    }

    pub fn with_identity(submission: &CommentSubmission, id: Uuid, date: DateTime<Utc>) -> Self {
        Self {
            id,
            name: submission.name.clone(),
            email: md5_hex(&submission.email),
            email_real: submission.email.clone(),
            reply_to: submission.reply_to.clone(),
            comment: submission.comment.clone(),
            date,
        }
    }

    /// UUIDv7 ids start with the creation millisecond, so the filename stays
    /// time-sortable and two writes in the same millisecond never collide.
    pub fn filename(&self) -> String {
        format!("comment-{}.json", self.id)
    }

    pub fn storage_path(&self, slug: &str) -> String {
        format!("{}/{}/{}", COMMENTS_DIR, slug, self.filename())
    }

    pub fn commit_request(&self, slug: &str) -> Result<CreateFileRequest, serde_json::Error> {
        let json = serde_json::to_vec(self)?;
        Ok(CreateFileRequest {
            message: format!("New comment in {} by {}", slug, self.name),
            comitter: Committer {
                name: COMMITTER_NAME.to_string(),
                email: COMMITTER_EMAIL.to_string(),
            },
            content: STANDARD.encode(json),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn submission() -> CommentSubmission {
        CommentSubmission {
            slug: "hello-world".to_string(),
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            reply_to: "0190a1b2-0000-7000-8000-000000000000".to_string(),
            comment: "<b>Nice</b> post!".to_string(),
        }
    }

    #[test]
    fn test_record_fields() {
        let record = CommentRecord::new(&submission());
        assert_eq!(record.name, "Ada");
        assert_eq!(record.email, md5_hex("ada@example.com"));
        assert_eq!(record.email_real, "ada@example.com");
        assert_eq!(record.reply_to, "0190a1b2-0000-7000-8000-000000000000");
        assert_eq!(record.comment, "<b>Nice</b> post!");
        assert_eq!(record.id.get_version_num(), 7);
    }

    #[test]
    fn test_same_email_same_hash() {
        let first = CommentRecord::new(&submission());
        let second = CommentRecord::new(&submission());
        assert_eq!(first.email, second.email);
    }

    #[test]
    fn test_ids_and_filenames_are_distinct_and_ordered() {
        let records: Vec<CommentRecord> = (0..100).map(|_| CommentRecord::new(&submission())).collect();
        for pair in records.windows(2) {
            assert!(pair[0].id < pair[1].id);
            assert_ne!(pair[0].filename(), pair[1].filename());
        }
    }

    #[test]
    fn test_serialized_shape() {
        let date = Utc.with_ymd_and_hms(2025, 3, 1, 12, 30, 0).unwrap();
        let id = Uuid::nil();
        let record = CommentRecord::with_identity(&submission(), id, date);
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["_id"], "00000000-0000-0000-0000-000000000000");
        assert_eq!(value["date"], "2025-03-01T12:30:00.000Z");
        assert_eq!(value["email_real"], "ada@example.com");
        assert!(value.get("id").is_none());
    }

    #[test]
    fn test_storage_path() {
        let record = CommentRecord::with_identity(&submission(), Uuid::nil(), Utc::now());
        assert_eq!(
            record.storage_path("hello-world"),
            "data/comments/hello-world/comment-00000000-0000-0000-0000-000000000000.json"
        );
    }

    #[test]
    fn test_slug_is_used_as_submitted() {
        let record = CommentRecord::with_identity(&submission(), Uuid::nil(), Utc::now());
        assert_eq!(
            record.storage_path(" hello-world "),
            "data/comments/ hello-world /comment-00000000-0000-0000-0000-000000000000.json"
        );
        let request = record.commit_request(" hello-world ").unwrap();
        assert_eq!(request.message, "New comment in  hello-world  by Ada");
    }

    #[test]
    fn test_commit_request_content_decodes_to_record() {
        let record = CommentRecord::new(&submission());
        let request = record.commit_request("hello-world").unwrap();
        assert_eq!(request.message, "New comment in hello-world by Ada");
        assert_eq!(request.comitter.email, "octocat@github.com");
        let decoded = STANDARD.decode(&request.content).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&decoded).unwrap();
        assert_eq!(value, serde_json::to_value(&record).unwrap());
    }
}
