//! Message types carried in the `msgtype` field of `m.room.message` content.

use std::convert::Infallible;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// The type of a room message.
///
/// Equality and hashing use the wire identifier only.
#[derive(Debug, Clone)]
pub enum MessageType {
    /// Plain text message (`m.text`).
    Text,
    /// Emote message (`m.emote`).
    Emote,
    /// Notice message (`m.notice`), usually sent by bots.
    Notice,
    /// `m.image`
    Image,
    /// `m.audio`
    Audio,
    /// `m.video`
    Video,
    /// `m.location`
    Location,
    /// `m.file`
    File,
    /// Any message type not listed above.
    Custom(String),
}

impl MessageType {
    /// Every known message type, in declaration order.
    pub const KNOWN: &'static [MessageType] = &[
        Self::Text,
        Self::Emote,
        Self::Notice,
        Self::Image,
        Self::Audio,
        Self::Video,
        Self::Location,
        Self::File,
    ];

    /// Classifies a `msgtype` value, keeping unmatched input as
    /// [`MessageType::Custom`].
    pub fn classify(identifier: &str) -> Self {
        match Self::find_known(identifier) {
            Some(known) => known.clone(),
            None => Self::custom(identifier.to_owned()),
        }
    }

    fn custom(identifier: String) -> Self {
        tracing::trace!(identifier = %identifier, "unrecognised message type kept as custom");
        Self::Custom(identifier)
    }

    fn find_known(identifier: &str) -> Option<&'static MessageType> {
        Self::KNOWN
            .iter()
            .find(|known| known.identifier() == identifier)
    }

    /// Returns the `msgtype` value used on the wire.
    pub fn identifier(&self) -> &str {
        match self {
            Self::Text => "m.text",
            Self::Emote => "m.emote",
            Self::Notice => "m.notice",
            Self::Image => "m.image",
            Self::Audio => "m.audio",
            Self::Video => "m.video",
            Self::Location => "m.location",
            Self::File => "m.file",
            Self::Custom(identifier) => identifier,
        }
    }

    /// Returns true if the identifier matched no known message type.
    pub fn is_custom(&self) -> bool {
        Self::find_known(self.identifier()).is_none()
    }

    /// Returns true for messages that reference uploaded media.
    pub fn is_media(&self) -> bool {
        matches!(
            Self::find_known(self.identifier()),
            Some(Self::Image | Self::Audio | Self::Video | Self::File)
        )
    }
}

impl PartialEq for MessageType {
    fn eq(&self, other: &Self) -> bool {
        self.identifier() == other.identifier()
    }
}

impl Eq for MessageType {}

impl Hash for MessageType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identifier().hash(state);
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())
    }
}

impl From<&str> for MessageType {
    fn from(identifier: &str) -> Self {
        Self::classify(identifier)
    }
}

impl From<String> for MessageType {
    fn from(identifier: String) -> Self {
        match Self::find_known(&identifier) {
            Some(known) => known.clone(),
            None => Self::custom(identifier),
        }
    }
}

impl FromStr for MessageType {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::classify(s))
    }
}

impl Serialize for MessageType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.identifier())
    }
}

impl<'de> Deserialize<'de> for MessageType {
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
    fn known_types_round_trip() {
        for known in MessageType::KNOWN {
            let classified = MessageType::classify(known.identifier());
            assert_eq!(
                std::mem::discriminant(&classified),
                std::mem::discriminant(known)
            );
        }
    }

    #[test]
    fn known_table_snapshot() {
        let table = MessageType::KNOWN
            .iter()
            .map(|ty| format!("{ty:?} = {ty}"))
            .collect::<Vec<_>>()
            .join("\n");
        insta::assert_snapshot!(table, @r"
        Text = m.text
        Emote = m.emote
        Notice = m.notice
        Image = m.image
        Audio = m.audio
        Video = m.video
        Location = m.location
        File = m.file
        ");
    }

    #[test]
    fn custom_is_preserved() {
        let ty = MessageType::classify("org.matrix.msc3381.poll.start");
        assert_eq!(ty.identifier(), "org.matrix.msc3381.poll.start");
        assert!(ty.is_custom());
        assert!(!ty.is_media());
    }

    #[test]
    fn custom_with_known_identifier_equals_known() {
        let mut set = HashSet::new();
        set.insert(MessageType::Custom("m.notice".into()));
        assert!(set.contains(&MessageType::Notice));
        assert_eq!(MessageType::Custom("m.notice".into()), MessageType::Notice);
    }

    #[test]
    fn media_types() {
        assert!(MessageType::Image.is_media());
        assert!(MessageType::File.is_media());
        assert!(!MessageType::Text.is_media());
        assert!(!MessageType::Location.is_media());
    }

    #[test]
    fn deserialized_custom_type_is_logged() {
        let (ty, logs) = capture_logs(|| {
            serde_json::from_str::<MessageType>("\"m.sticker\"").unwrap()
        });
        assert_eq!(ty, MessageType::Custom("m.sticker".into()));
        assert!(logs.contains("unrecognised message type"), "{logs}");
        assert!(logs.contains("m.sticker"), "{logs}");
    }

    #[test]
    fn serde_roundtrip() {
        let types = vec![MessageType::Emote, MessageType::Custom("x.sticker".into())];
        let json = serde_json::to_string(&types).unwrap();
        assert_eq!(json, r#"["m.emote","x.sticker"]"#);

        let parsed: Vec<MessageType> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, types);
    }
}
