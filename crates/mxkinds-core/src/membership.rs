//! Room membership states.
//!
//! Membership reaches this crate in two shapes: the bounded native code used
//! by the client library ([`MembershipCode`]) and the `membership` string of
//! an `m.room.member` event. Both resolve to [`Membership`], with
//! [`Membership::Unknown`] as the fallback for anything unrecognised.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Native membership code as exposed by the underlying client library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct MembershipCode(pub u32);

impl MembershipCode {
    /// Sentinel for a membership the client library could not determine.
    pub const UNKNOWN: Self = Self(0);
    pub const INVITE: Self = Self(1);
    pub const JOIN: Self = Self(2);
    pub const LEAVE: Self = Self(3);
    pub const BAN: Self = Self(4);
}

impl From<u32> for MembershipCode {
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}

impl From<MembershipCode> for u32 {
    fn from(code: MembershipCode) -> Self {
        code.0
    }
}

impl fmt::Display for MembershipCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Membership of a user in a room.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Membership {
    /// The membership could not be determined.
    #[default]
    Unknown,
    Invite,
    Join,
    Leave,
    Ban,
}

impl Membership {
    /// Every membership state, in the order codes are matched.
    pub const ALL: [Membership; 5] = [
        Self::Unknown,
        Self::Invite,
        Self::Join,
        Self::Leave,
        Self::Ban,
    ];

    /// Resolves a native code. Codes outside the known table map to
    /// [`Membership::Unknown`].
    pub fn from_code(code: MembershipCode) -> Self {
        match Self::ALL.iter().find(|membership| membership.code() == code) {
            Some(membership) => *membership,
            None => {
                tracing::trace!(%code, "unrecognised membership code");
                Self::Unknown
            }
        }
    }

    /// Returns the native code for this membership.
    pub fn code(self) -> MembershipCode {
        match self {
            Self::Unknown => MembershipCode::UNKNOWN,
            Self::Invite => MembershipCode::INVITE,
            Self::Join => MembershipCode::JOIN,
            Self::Leave => MembershipCode::LEAVE,
            Self::Ban => MembershipCode::BAN,
        }
    }

    /// Resolves the `membership` value of an `m.room.member` event.
    ///
    /// Unmatched strings (including `"unknown"` itself) give
    /// [`Membership::Unknown`].
    pub fn from_wire(value: &str) -> Self {
        match value {
            "invite" => Self::Invite,
            "join" => Self::Join,
            "leave" => Self::Leave,
            "ban" => Self::Ban,
            other => {
                tracing::trace!(membership = other, "unrecognised membership string");
                Self::Unknown
            }
        }
    }

    /// Returns the `membership` string for this state.
    pub fn as_wire_str(self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Invite => "invite",
            Self::Join => "join",
            Self::Leave => "leave",
            Self::Ban => "ban",
        }
    }
}

impl From<MembershipCode> for Membership {
    fn from(code: MembershipCode) -> Self {
        Self::from_code(code)
    }
}

impl From<Membership> for MembershipCode {
    fn from(membership: Membership) -> Self {
        membership.code()
    }
}

impl fmt::Display for Membership {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire_str())
    }
}

impl Serialize for Membership {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_wire_str())
    }
}

impl<'de> Deserialize<'de> for Membership {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Ok(Self::from_wire(&value))
    }
}
