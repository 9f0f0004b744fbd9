//! Canonical record shapes for the occurrence, message and history tables.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Sentinel value the device writes when a message carries no image.
pub const NO_IMAGE_SENTINEL: &str = "<NA>";

/// A single detected-species event with timestamp and feeder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OccurrenceRecord {
    /// Feeder that reported the detection
    pub feeder_name: String,
    /// Raw model output label, format `"<index> <scientific> (<common>)"`
    pub species: String,
    /// Event timestamp in the device's local time zone
    pub timestamp: NaiveDateTime,
    /// Fractional hour of day in [0, 24): `hour + minute / 60`
    pub hour: f64,
    /// Fractional day key used for multi-day trend plotting:
    /// `day + hour / 100 + minute / 100 / 60`
    pub day_hour: f64,
    /// Common name parsed out of the species label, never empty for a
    /// non-empty label
    pub common_name: String,
}

impl OccurrenceRecord {
    /// Calendar-date portion of the event timestamp.
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }
}

/// Kind of event the device emitted with a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageKind {
    /// Species possibly present, static photo taken
    Possible,
    /// Species identified and counted, animation captured
    Spotted,
    /// Free-text device log line
    Message,
}

impl MessageKind {
    /// Internal vocabulary as written in the snapshot files.
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageKind::Possible => "possible",
            MessageKind::Spotted => "spotted",
            MessageKind::Message => "message",
        }
    }

    /// Parse the internal vocabulary used in message snapshots.
    pub fn from_snapshot_value(value: &str) -> Result<Self> {
        match value {
            "possible" => Ok(MessageKind::Possible),
            "spotted" => Ok(MessageKind::Spotted),
            "message" => Ok(MessageKind::Message),
            other => Err(Error::Schema(format!("unknown message type '{}'", other))),
        }
    }

    /// Translate a presentation-facing kind label to the internal vocabulary.
    ///
    /// The fixed lookup is `Animated -> spotted`, `Static -> possible`,
    /// `message -> message`. Any other label is a contract violation.
    pub fn from_display_label(label: &str) -> Result<Self> {
        match label {
            "Animated" => Ok(MessageKind::Spotted),
            "Static" => Ok(MessageKind::Possible),
            "message" => Ok(MessageKind::Message),
            other => Err(Error::UnmappedKindLabel(other.to_string())),
        }
    }
}

/// A device-emitted event, optionally carrying an image reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageRecord {
    /// Feeder that emitted the event
    pub feeder_name: String,
    /// Event sequence number; zero marks a synthetic heartbeat
    pub event_num: i64,
    /// Kind of event
    pub kind: MessageKind,
    /// Event timestamp in the device's local time zone
    pub timestamp: NaiveDateTime,
    /// Free-text message body
    pub message: String,
    /// Raw image file name; empty or [`NO_IMAGE_SENTINEL`] means no image
    pub image_name: String,
    /// Common name parsed out of the message text
    pub common_name: String,
}

impl MessageRecord {
    /// Calendar-date portion of the event timestamp.
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }

    /// Synthetic heartbeat events never reach the merged table.
    pub fn is_heartbeat(&self) -> bool {
        self.event_num == 0
    }

    /// Whether the record references an actual image file.
    pub fn has_image(&self) -> bool {
        !self.image_name.is_empty() && self.image_name != NO_IMAGE_SENTINEL
    }
}

/// One row of the cumulative daily-count history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub common_name: String,
    /// Observation count for that species on that day
    pub count: i64,
    /// Monotonic day key derived from year/month/day, used as the
    /// long-range trend plotting axis
    pub day_key: NaiveDate,
}
