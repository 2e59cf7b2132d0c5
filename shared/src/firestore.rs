//! Firestore v1 REST document shapes for note records.
//!
//! Records are validated here: a document missing `userId`, `content` or
//! `timestamp`, or carrying one of them with the wrong value type, is rejected
//! instead of being rendered half-filled.

use std::collections::BTreeMap;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::constants::{FIELD_CONTENT, FIELD_CREATED, FIELD_OWNER};
use crate::error::ServiceError;
use crate::types::{NoteRecord, RecordId, StoredNote};

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub fields: BTreeMap<String, Value>,
}

impl Document {
    /// Last path segment of `projects/../documents/<collection>/<id>`.
    pub fn record_id(&self) -> Result<RecordId, ServiceError> {
        self.name
            .rsplit('/')
            .next()
            .filter(|id| !id.is_empty())
            .map(RecordId::new)
            .ok_or_else(|| ServiceError::Decode("document without a name".to_string()))
    }

    fn string_field(&self, field: &str) -> Result<&str, ServiceError> {
        self.fields
            .get(field)
            .and_then(|v| v.get("stringValue"))
            .and_then(Value::as_str)
            .ok_or_else(|| ServiceError::Decode(format!("field `{field}` missing or not a string")))
    }

    fn timestamp_field(&self, field: &str) -> Result<DateTime<Utc>, ServiceError> {
        let raw = self
            .fields
            .get(field)
            .and_then(|v| v.get("timestampValue"))
            .and_then(Value::as_str)
            .ok_or_else(|| ServiceError::Decode(format!("field `{field}` missing or not a timestamp")))?;
        DateTime::parse_from_rfc3339(raw)
            .map(|t| t.with_timezone(&Utc))
            .map_err(|err| ServiceError::Decode(format!("field `{field}`: {err}")))
    }

    pub fn note_record(&self) -> Result<NoteRecord, ServiceError> {
        Ok(NoteRecord {
            owner_id: self.string_field(FIELD_OWNER)?.to_string(),
            content: self.string_field(FIELD_CONTENT)?.to_string(),
            created_at: self.timestamp_field(FIELD_CREATED)?,
        })
    }

    pub fn stored_note(&self) -> Result<StoredNote, ServiceError> {
        Ok(StoredNote {
            id: self.record_id()?,
            record: self.note_record()?,
        })
    }
}

/// Body for `createDocument`.
pub fn encode_record(record: &NoteRecord) -> Value {
    json!({
        "fields": {
            FIELD_OWNER: { "stringValue": record.owner_id },
            FIELD_CONTENT: { "stringValue": record.content },
            FIELD_CREATED: { "timestampValue": record.created_at.to_rfc3339_opts(SecondsFormat::Millis, true) },
        }
    })
}

/// Body for `documents:runQuery` selecting `field == value` in `collection`.
pub fn equality_query(collection: &str, field: &str, value: &str) -> Value {
    json!({
        "structuredQuery": {
            "from": [{ "collectionId": collection }],
            "where": {
                "fieldFilter": {
                    "field": { "fieldPath": field },
                    "op": "EQUAL",
                    "value": { "stringValue": value },
                }
            }
        }
    })
}

#[derive(Debug, Deserialize)]
struct QueryItem {
    #[serde(default)]
    document: Option<Document>,
    #[serde(default)]
    error: Option<StatusDetail>,
}

/// Decodes a `runQuery` reply. Items without a document only carry read
/// metadata and are skipped.
pub fn decode_query(body: &str) -> Result<Vec<StoredNote>, ServiceError> {
    let items: Vec<QueryItem> =
        serde_json::from_str(body).map_err(|err| ServiceError::Decode(format!("runQuery reply: {err}")))?;
    let mut notes = Vec::with_capacity(items.len());
    for item in items {
        if let Some(status) = item.error {
            return Err(status.into_error());
        }
        if let Some(document) = item.document {
            notes.push(document.stored_note()?);
        }
    }
    Ok(notes)
}

pub fn decode_document(body: &str) -> Result<Document, ServiceError> {
    serde_json::from_str(body).map_err(|err| ServiceError::Decode(format!("document: {err}")))
}

#[derive(Debug, Deserialize)]
struct StatusDetail {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: String,
}

impl StatusDetail {
    fn into_error(self) -> ServiceError {
        let code = if self.status.is_empty() {
            "unknown".to_string()
        } else {
            self.status.to_lowercase().replace('_', "-")
        };
        ServiceError::store(code, self.message)
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ErrorReply {
    Single { error: StatusDetail },
    Batch(Vec<ErrorReply>),
}

/// Turns a failed Firestore reply into a [`ServiceError`].
pub fn decode_error(status: u16, body: &str) -> ServiceError {
    let mut reply = serde_json::from_str::<ErrorReply>(body).ok();
    while let Some(ErrorReply::Batch(mut batch)) = reply {
        reply = if batch.is_empty() { None } else { Some(batch.remove(0)) };
    }
    match reply {
        Some(ErrorReply::Single { error }) => error.into_error(),
        _ => ServiceError::Network(format!("document store returned status {status}")),
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    const DOC: &str = r#"{
        "name": "projects/p/databases/(default)/documents/userData/AbC123",
        "fields": {
            "userId": {"stringValue": "u1"},
            "content": {"stringValue": "hello"},
            "timestamp": {"timestampValue": "2024-03-01T10:20:30.123Z"}
        },
        "createTime": "2024-03-01T10:20:30.200Z",
        "updateTime": "2024-03-01T10:20:30.200Z"
    }"#;

    #[test]
    fn decodes_document() {
        let note = decode_document(DOC).unwrap().stored_note().unwrap();
        assert_eq!(note.id.as_str(), "AbC123");
        assert_eq!(note.record.owner_id, "u1");
        assert_eq!(note.record.content, "hello");
        assert_eq!(note.record.created_at.timestamp_millis(), 1709288430123);
    }

    #[test]
    fn rejects_mistyped_field() {
        let body = r#"{"name": "a/b/userData/x", "fields": {
            "userId": {"stringValue": "u1"},
            "content": {"integerValue": "5"},
            "timestamp": {"timestampValue": "2024-03-01T10:20:30Z"}
        }}"#;
        let err = decode_document(body).unwrap().note_record().unwrap_err();
        assert!(matches!(err, ServiceError::Decode(msg) if msg.contains("content")));
    }

    #[test]
    fn rejects_missing_timestamp() {
        let body = r#"{"name": "a/b/userData/x", "fields": {
            "userId": {"stringValue": "u1"},
            "content": {"stringValue": "c"}
        }}"#;
        assert!(decode_document(body).unwrap().stored_note().is_err());
    }

    #[test]
    fn encodes_record() {
        let record = NoteRecord {
            owner_id: "u1".into(),
            content: "hi".into(),
            created_at: Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap(),
        };
        let body = encode_record(&record);
        assert_eq!(body["fields"]["userId"]["stringValue"], "u1");
        assert_eq!(body["fields"]["content"]["stringValue"], "hi");
        assert_eq!(body["fields"]["timestamp"]["timestampValue"], "2024-01-02T03:04:05.000Z");
    }

    #[test]
    fn query_shape() {
        let body = equality_query("userData", "userId", "u1");
        let filter = &body["structuredQuery"]["where"]["fieldFilter"];
        assert_eq!(body["structuredQuery"]["from"][0]["collectionId"], "userData");
        assert_eq!(filter["field"]["fieldPath"], "userId");
        assert_eq!(filter["op"], "EQUAL");
        assert_eq!(filter["value"]["stringValue"], "u1");
    }

    #[test]
    fn empty_query_reply() {
        let body = r#"[{"readTime": "2024-03-01T10:20:30.200Z"}]"#;
        assert!(decode_query(body).unwrap().is_empty());
    }

    #[test]
    fn query_reply_with_documents() {
        let body = format!(r#"[{{"document": {DOC}, "readTime": "2024-03-01T10:20:31Z"}}]"#);
        let notes = decode_query(&body).unwrap();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].record.content, "hello");
    }

    #[test]
    fn error_replies() {
        let single = r#"{"error": {"code": 403, "message": "Missing or insufficient permissions.", "status": "PERMISSION_DENIED"}}"#;
        let err = decode_error(403, single);
        assert_eq!(err.code(), Some("permission-denied"));
        assert_eq!(err.to_string(), "Missing or insufficient permissions.");

        let batch = r#"[{"error": {"code": 400, "message": "bad query", "status": "INVALID_ARGUMENT"}}]"#;
        assert_eq!(decode_error(400, batch).code(), Some("invalid-argument"));

        assert!(matches!(decode_error(500, "oops"), ServiceError::Network(_)));
    }
}
