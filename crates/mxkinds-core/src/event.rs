//! Typed views over the type strings of a Matrix event.
//!
//! An event carries two type strings: the wire type, as literally received
//! from the homeserver, and the logical type, which differs from the wire
//! type once an `m.room.encrypted` envelope has been decrypted. Both are
//! classified with [`EventType::classify`].

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::event_type::EventType;
use crate::membership::Membership;
use crate::message_type::MessageType;

/// Identifier used when an event has no type string at all.
pub const UNKNOWN_EVENT_TYPE: &str = "unknown";

/// Anything that owns the raw type strings of an event.
///
/// Implementors only supply the two strings. The typed views are provided,
/// and both fall back to `EventType::Custom("unknown")` when the source is
/// absent.
pub trait EventTypeSource {
    /// The logical (decrypted, if necessary) type string.
    fn type_source(&self) -> Option<&str>;

    /// The type string as received, possibly an encrypted envelope.
    fn wire_type_source(&self) -> Option<&str>;

    /// The logical event type.
    ///
    /// If the event is encrypted and could not be decrypted this stays
    /// [`EventType::RoomEncrypted`].
    fn event_type(&self) -> EventType {
        classify_or_unknown(self.type_source())
    }

    /// The event type as received from the homeserver.
    fn wire_type(&self) -> EventType {
        classify_or_unknown(self.wire_type_source())
    }
}

fn classify_or_unknown(source: Option<&str>) -> EventType {
    match source {
        Some(identifier) => EventType::classify(identifier),
        None => EventType::Custom(UNKNOWN_EVENT_TYPE.to_string()),
    }
}

/// The clear-text payload of a decrypted event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DecryptedPayload {
    /// Type of the clear event.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub event_type: Option<String>,

    /// Content of the clear event.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Value>,
}

/// A minimal event as received from the homeserver.
///
/// Only the fields needed to classify the event are kept; anything else in
/// the JSON is ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawEvent {
    /// The type as received.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub wire_type: Option<String>,

    /// The content as received.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Value>,

    /// The clear event, once an encrypted event has been decrypted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decrypted: Option<DecryptedPayload>,
}

impl RawEvent {
    /// Creates an event with the given wire type and no content.
    pub fn new(wire_type: impl Into<String>) -> Self {
        Self {
            wire_type: Some(wire_type.into()),
            ..Default::default()
        }
    }

    /// Sets the content.
    #[must_use]
    pub fn with_content(mut self, content: Value) -> Self {
        self.content = Some(content);
        self
    }

    /// Attaches the clear event produced by decryption.
    #[must_use]
    pub fn with_decrypted(mut self, event_type: impl Into<String>, content: Value) -> Self {
        self.decrypted = Some(DecryptedPayload {
            event_type: Some(event_type.into()),
            content: Some(content),
        });
        self
    }

    /// Returns true if the event arrived as an encrypted envelope.
    pub fn is_encrypted(&self) -> bool {
        matches!(self.wire_type(), EventType::RoomEncrypted)
    }

    /// Returns the content of the clear event when decrypted, otherwise
    /// the content as received.
    pub fn effective_content(&self) -> Option<&Value> {
        self.decrypted
            .as_ref()
            .and_then(|clear| clear.content.as_ref())
            .or(self.content.as_ref())
    }

    /// The `msgtype` of the effective content, if it has one.
    pub fn msgtype(&self) -> Option<MessageType> {
        self.content_str("msgtype").map(MessageType::classify)
    }

    /// The `membership` of the effective content, if it has one.
    pub fn membership(&self) -> Option<Membership> {
        self.content_str("membership").map(Membership::from_wire)
    }

    fn content_str(&self, key: &str) -> Option<&str> {
        self.effective_content()?.get(key)?.as_str()
    }
}

impl EventTypeSource for RawEvent {
    fn type_source(&self) -> Option<&str> {
        self.decrypted
            .as_ref()
            .and_then(|clear| clear.event_type.as_deref())
            .or(self.wire_type.as_deref())
    }

    fn wire_type_source(&self) -> Option<&str> {
        self.wire_type.as_deref()
    }
}
