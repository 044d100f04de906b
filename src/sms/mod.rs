//! Message log records.
//!
//! The log is a list kept newest first. Records are created once and never edited;
//! "sending" in this console only fabricates an outbound record with status `sent`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Outbound,
    /// Accepted when reading a log, never produced.
    Inbound,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageStatus {
    Sent,
    Delivered,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageRecord {
    /// Unix milliseconds at creation, bumped to stay unique within the log.
    pub id: i64,
    pub direction: Direction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipient: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender: Option<String>,
    pub message: String,
    #[serde(default)]
    pub sim_port: u8,
    pub status: MessageStatus,
    pub timestamp: DateTime<Utc>,
}

impl MessageRecord {
    /// Outbound record for a simulated send.
    pub fn outbound_sent(
        id: i64,
        recipient: &str,
        message: &str,
        sim_port: u8,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            direction: Direction::Outbound,
            recipient: Some(recipient.to_string()),
            sender: None,
            message: message.to_string(),
            sim_port,
            status: MessageStatus::Sent,
            timestamp,
        }
    }

    /// The other party: recipient for outbound, sender for inbound.
    pub fn counterpart(&self) -> &str {
        let party = match self.direction {
            Direction::Outbound => self.recipient.as_deref(),
            Direction::Inbound => self.sender.as_deref(),
        };
        party.unwrap_or("")
    }
}

/// Id for a record created at `now`, given the current newest record.
pub fn next_id(now: DateTime<Utc>, newest: Option<&MessageRecord>) -> i64 {
    let candidate = now.timestamp_millis();
    match newest {
        Some(prev) if prev.id >= candidate => prev.id + 1,
        _ => candidate,
    }
}

/// Return a new log with `record` in front; the input is left untouched.
pub fn prepend(log: &[MessageRecord], record: MessageRecord) -> Vec<MessageRecord> {
    let mut out = Vec::with_capacity(log.len() + 1);
    out.push(record);
    out.extend_from_slice(log);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(ms: i64) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(ms).unwrap()
    }

    #[test]
    fn ids_stay_unique_within_a_millisecond() {
        let first = MessageRecord::outbound_sent(next_id(at(1_000), None), "1", "a", 0, at(1_000));
        assert_eq!(first.id, 1_000);
        assert_eq!(next_id(at(1_000), Some(&first)), 1_001);
        assert_eq!(next_id(at(999), Some(&first)), 1_001);
        assert_eq!(next_id(at(5_000), Some(&first)), 5_000);
    }

    #[test]
    fn prepend_puts_new_record_first() {
        let a = MessageRecord::outbound_sent(1, "1", "a", 0, at(1));
        let b = MessageRecord::outbound_sent(2, "2", "b", 0, at(2));
        let log = prepend(&[a.clone()], b.clone());
        assert_eq!(log, vec![b, a]);
    }

    #[test]
    fn json_shape_matches_stored_log() {
        let rec = MessageRecord::outbound_sent(1_700_000_000_000, "0697040852", "Hi", 2, at(1_700_000_000_000));
        let json = serde_json::to_value(&rec).unwrap();
        assert_eq!(json["direction"], "outbound");
        assert_eq!(json["status"], "sent");
        assert_eq!(json["simPort"], 2);
        assert_eq!(json["recipient"], "0697040852");
        assert!(json.get("sender").is_none());
        assert_eq!(json["timestamp"], "2023-11-14T22:13:20Z");
    }

    #[test]
    fn inbound_records_load() {
        let rec: MessageRecord = serde_json::from_str(
            r#"{"id":5,"direction":"inbound","sender":"+355","message":"yo","simPort":1,"status":"delivered","timestamp":"2024-01-01T00:00:00.000Z"}"#,
        )
        .unwrap();
        assert_eq!(rec.direction, Direction::Inbound);
        assert_eq!(rec.counterpart(), "+355");
        assert_eq!(rec.status, MessageStatus::Delivered);
    }
}
