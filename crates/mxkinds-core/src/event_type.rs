//! Matrix event types.
//!
//! Event types are exchanged with the homeserver as strings. The types defined
//! by the Matrix specification are listed as variants of [`EventType`] to ease
//! type handling. Any other type, including custom events outside of the
//! specification, is preserved verbatim in [`EventType::Custom`].

use std::convert::Infallible;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Native event type code of the underlying client library.
///
/// Known types are numbered in [`EventType::KNOWN`] order; everything else
/// shares [`EventTypeCode::CUSTOM`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct EventTypeCode(pub u32);

impl EventTypeCode {
    pub const CUSTOM: Self = Self(1000);
}

impl fmt::Display for EventTypeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// The type of a Matrix event.
///
/// Two values are equal when their [`identifier`](Self::identifier) is equal,
/// so `EventType::Custom("m.room.message".into())` equals
/// [`EventType::RoomMessage`].
#[derive(Debug, Clone)]
pub enum EventType {
    /// `m.room.name`
    RoomName,
    /// `m.room.topic`
    RoomTopic,
    /// `m.room.avatar`
    RoomAvatar,
    /// `m.room.member`
    RoomMember,
    /// `m.room.create`
    RoomCreate,
    /// `m.room.join_rules`
    RoomJoinRules,
    /// `m.room.power_levels`
    RoomPowerLevels,
    /// `m.room.aliases`
    RoomAliases,
    /// `m.room.canonical_alias`
    RoomCanonicalAlias,
    /// `m.room.encrypted`, the envelope of an end-to-end encrypted event.
    RoomEncrypted,
    /// `m.room.encryption`
    RoomEncryption,
    /// `m.room.guest_access`
    RoomGuestAccess,
    /// `m.room.history_visibility`
    RoomHistoryVisibility,
    /// `m.room_key`
    RoomKey,
    /// `m.forwarded_room_key`
    RoomForwardedKey,
    /// `m.room_key_request`
    RoomKeyRequest,
    /// `m.room.message`
    RoomMessage,
    /// `m.room.message.feedback`
    RoomMessageFeedback,
    /// `m.room.redaction`
    RoomRedaction,
    /// `m.room.third_party_invite`
    RoomThirdPartyInvite,
    /// `m.tag`
    RoomTag,
    /// `m.presence`
    Presence,
    /// `m.typing`
    Typing,
    /// `m.new_device`
    NewDevice,
    /// `m.call.invite`
    CallInvite,
    /// `m.call.candidates`
    CallCandidates,
    /// `m.call.answer`
    CallAnswer,
    /// `m.call.hangup`
    CallHangup,
    /// `m.receipt`
    Receipt,
    /// `m.fully_read`
    ReadMarker,
    /// Any event type not listed above.
    Custom(String),
}

impl EventType {
    /// Every known event type, in declaration order.
    ///
    /// [`classify`](Self::classify) scans this table front to back and the
    /// first match wins.
    pub const KNOWN: &'static [EventType] = &[
        Self::RoomName,
        Self::RoomTopic,
        Self::RoomAvatar,
        Self::RoomMember,
        Self::RoomCreate,
        Self::RoomJoinRules,
        Self::RoomPowerLevels,
        Self::RoomAliases,
        Self::RoomCanonicalAlias,
        Self::RoomEncrypted,
        Self::RoomEncryption,
        Self::RoomGuestAccess,
        Self::RoomHistoryVisibility,
        Self::RoomKey,
        Self::RoomForwardedKey,
        Self::RoomKeyRequest,
        Self::RoomMessage,
        Self::RoomMessageFeedback,
        Self::RoomRedaction,
        Self::RoomThirdPartyInvite,
        Self::RoomTag,
        Self::Presence,
        Self::Typing,
        Self::NewDevice,
        Self::CallInvite,
        Self::CallCandidates,
        Self::CallAnswer,
        Self::CallHangup,
        Self::Receipt,
        Self::ReadMarker,
    ];

    /// Classifies a wire identifier.
    ///
    /// Comparison is byte-exact. Identifiers that match no known type are
    /// returned as [`EventType::Custom`] holding the original string.
    pub fn classify(identifier: &str) -> Self {
        match Self::find_known(identifier) {
            Some(known) => known.clone(),
            None => Self::custom(identifier.to_owned()),
        }
    }

    fn custom(identifier: String) -> Self {
        tracing::trace!(identifier = %identifier, "unrecognised event type kept as custom");
        Self::Custom(identifier)
    }

    fn find_known(identifier: &str) -> Option<&'static EventType> {
        Self::KNOWN
            .iter()
            .find(|known| known.identifier() == identifier)
    }

    /// Returns the identifier used on the wire for this event type.
    pub fn identifier(&self) -> &str {
        match self {
            Self::RoomName => "m.room.name",
            Self::RoomTopic => "m.room.topic",
            Self::RoomAvatar => "m.room.avatar",
            Self::RoomMember => "m.room.member",
            Self::RoomCreate => "m.room.create",
            Self::RoomJoinRules => "m.room.join_rules",
            Self::RoomPowerLevels => "m.room.power_levels",
            Self::RoomAliases => "m.room.aliases",
            Self::RoomCanonicalAlias => "m.room.canonical_alias",
            Self::RoomEncrypted => "m.room.encrypted",
            Self::RoomEncryption => "m.room.encryption",
            Self::RoomGuestAccess => "m.room.guest_access",
            Self::RoomHistoryVisibility => "m.room.history_visibility",
            Self::RoomKey => "m.room_key",
            Self::RoomForwardedKey => "m.forwarded_room_key",
            Self::RoomKeyRequest => "m.room_key_request",
            Self::RoomMessage => "m.room.message",
            Self::RoomMessageFeedback => "m.room.message.feedback",
            Self::RoomRedaction => "m.room.redaction",
            Self::RoomThirdPartyInvite => "m.room.third_party_invite",
            Self::RoomTag => "m.tag",
            Self::Presence => "m.presence",
            Self::Typing => "m.typing",
            Self::NewDevice => "m.new_device",
            Self::CallInvite => "m.call.invite",
            Self::CallCandidates => "m.call.candidates",
            Self::CallAnswer => "m.call.answer",
            Self::CallHangup => "m.call.hangup",
            Self::Receipt => "m.receipt",
            Self::ReadMarker => "m.fully_read",
            Self::Custom(identifier) => identifier,
        }
    }

    /// Returns the native code for this event type.
    ///
    /// The mapping is lossy: every custom type gives
    /// [`EventTypeCode::CUSTOM`].
    pub fn code(&self) -> EventTypeCode {
        let identifier = self.identifier();
        Self::KNOWN
            .iter()
            .position(|known| known.identifier() == identifier)
            .and_then(|index| u32::try_from(index).ok())
            .map_or(EventTypeCode::CUSTOM, EventTypeCode)
    }

    /// Returns true if the identifier matched no known event type.
    ///
    /// A `Custom` value built by hand from a known identifier is not custom.
    pub fn is_custom(&self) -> bool {
        Self::find_known(self.identifier()).is_none()
    }

    /// Returns true for the `m.room.*` kinds that carry room state.
    pub fn is_state_event(&self) -> bool {
        match Self::find_known(self.identifier()) {
            Some(known) => matches!(
                known,
                Self::RoomName
                    | Self::RoomTopic
                    | Self::RoomAvatar
                    | Self::RoomMember
                    | Self::RoomCreate
                    | Self::RoomJoinRules
                    | Self::RoomPowerLevels
                    | Self::RoomAliases
                    | Self::RoomCanonicalAlias
                    | Self::RoomEncryption
                    | Self::RoomGuestAccess
                    | Self::RoomHistoryVisibility
                    | Self::RoomThirdPartyInvite
            ),
            None => false,
        }
    }
}

impl PartialEq for EventType {
    fn eq(&self, other: &Self) -> bool {
        self.identifier() == other.identifier()
    }
}

impl Eq for EventType {}

impl Hash for EventType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identifier().hash(state);
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())
    }
}

impl From<&str> for EventType {
    fn from(identifier: &str) -> Self {
        Self::classify(identifier)
    }
}

impl From<String> for EventType {
    fn from(identifier: String) -> Self {
        match Self::find_known(&identifier) {
            Some(known) => known.clone(),
            None => Self::custom(identifier),
        }
    }
}

impl FromStr for EventType {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::classify(s))
    }
}

impl Serialize for EventType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.identifier())
    }
}

impl<'de> Deserialize<'de> for EventType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::from)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::tracing::capture::capture_logs;

    #[test]
    fn classifies_room_message() {
        let ty = EventType::classify("m.room.message");
        assert!(matches!(ty, EventType::RoomMessage));
        assert_eq!(EventType::RoomMessage.identifier(), "m.room.message");
    }

    #[test]
    fn keeps_unknown_identifiers_as_custom() {
        let ty = EventType::classify("org.example.custom.event");
        assert!(matches!(ty, EventType::Custom(ref s) if s == "org.example.custom.event"));
        assert_eq!(ty.identifier(), "org.example.custom.event");
        assert!(ty.is_custom());
    }

    #[test]
    fn comparison_is_case_sensitive() {
        let ty = EventType::classify("M.Room.Message");
        assert!(matches!(ty, EventType::Custom(_)));
    }

    #[test]
    fn empty_identifier_is_custom() {
        let ty = EventType::classify("");
        assert!(matches!(ty, EventType::Custom(ref s) if s.is_empty()));
    }

    #[test]
    fn every_known_type_round_trips() {
        for known in EventType::KNOWN {
            let classified = EventType::classify(known.identifier());
            assert_eq!(&classified, known);
            assert!(!classified.is_custom(), "{known:?} classified as custom");
            assert_eq!(
                std::mem::discriminant(&classified),
                std::mem::discriminant(known)
            );
        }
    }

    #[test]
    fn known_identifiers_are_unique() {
        let identifiers: HashSet<&str> =
            EventType::KNOWN.iter().map(EventType::identifier).collect();
        assert_eq!(identifiers.len(), EventType::KNOWN.len());
    }

    #[test]
    fn reclassifying_is_idempotent() {
        for input in ["m.typing", "com.example.thing", "", "m.room.encrypted"] {
            let once = EventType::classify(input);
            let twice = EventType::classify(once.identifier());
            assert_eq!(once.identifier(), twice.identifier());
            assert_eq!(once.identifier(), input);
        }
    }

    #[test]
    fn equality_and_hash_follow_identifier() {
        let custom = EventType::Custom("m.room.message".to_string());
        assert_eq!(custom, EventType::RoomMessage);
        assert!(!custom.is_custom());

        let mut set = HashSet::new();
        set.insert(EventType::RoomMessage);
        assert!(set.contains(&custom));
        set.insert(custom);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn from_string_reuses_known_variant() {
        let ty = EventType::from("m.receipt".to_string());
        assert!(matches!(ty, EventType::Receipt));

        let ty: EventType = "x.y".parse().unwrap();
        assert_eq!(ty, EventType::Custom("x.y".into()));
    }

    #[test]
    fn state_events() {
        assert!(EventType::RoomMember.is_state_event());
        assert!(EventType::Custom("m.room.topic".into()).is_state_event());
        assert!(!EventType::RoomMessage.is_state_event());
        assert!(!EventType::RoomEncrypted.is_state_event());
        assert!(!EventType::classify("m.room.pinned").is_state_event());
    }

    #[test]
    fn serde_uses_bare_identifier() {
        let json = serde_json::to_string(&EventType::ReadMarker).unwrap();
        assert_eq!(json, "\"m.fully_read\"");

        let ty: EventType = serde_json::from_str("\"m.call.hangup\"").unwrap();
        assert!(matches!(ty, EventType::CallHangup));

        let ty: EventType = serde_json::from_str("\"io.element.widgets\"").unwrap();
        assert_eq!(ty, EventType::Custom("io.element.widgets".into()));
    }

    #[test]
    fn native_codes_follow_table_order() {
        assert_eq!(EventType::RoomName.code(), EventTypeCode(0));
        assert_eq!(EventType::RoomMessage.code(), EventTypeCode(16));
        assert_eq!(EventType::ReadMarker.code(), EventTypeCode(29));
        assert_eq!(EventType::Custom("m.typing".into()).code(), EventType::Typing.code());
        assert_eq!(EventType::classify("com.example.x").code(), EventTypeCode::CUSTOM);

        let codes: HashSet<EventTypeCode> = EventType::KNOWN.iter().map(EventType::code).collect();
        assert_eq!(codes.len(), EventType::KNOWN.len());
        assert!(!codes.contains(&EventTypeCode::CUSTOM));
    }

    #[test]
    fn custom_fallback_is_logged_on_every_path() {
        let (ty, logs) = capture_logs(|| EventType::classify("org.example.a"));
        assert!(ty.is_custom());
        assert!(logs.contains("org.example.a"), "classify not logged: {logs}");

        let (ty, logs) = capture_logs(|| {
            serde_json::from_str::<EventType>("\"org.example.b\"").unwrap()
        });
        assert!(ty.is_custom());
        assert!(logs.contains("org.example.b"), "deserialize not logged: {logs}");

        let (_, logs) = capture_logs(|| EventType::from("m.presence".to_string()));
        assert!(logs.is_empty(), "known type logged: {logs}");
    }

    #[test]
    fn display_matches_identifier() {
        assert_eq!(EventType::RoomForwardedKey.to_string(), "m.forwarded_room_key");
        assert_eq!(EventType::Custom("a.b".into()).to_string(), "a.b");
    }
}
