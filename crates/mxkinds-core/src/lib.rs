//! Typed Matrix event types, message types and membership states.
//!
//! Matrix identifies these kinds with strings (or, for membership, a native
//! code) on the wire. Each kind here is an enum with one variant per value the
//! Matrix specification defines and a fallback for everything else, so
//! classification never fails and never loses the original input.
//!
//! ```rust
//! use mxkinds_core::{EventType, Membership, MembershipCode};
//!
//! assert_eq!(EventType::classify("m.room.message"), EventType::RoomMessage);
//! assert_eq!(EventType::RoomMessage.identifier(), "m.room.message");
//!
//! let custom = EventType::classify("org.example.custom.event");
//! assert_eq!(custom.identifier(), "org.example.custom.event");
//!
//! assert_eq!(Membership::from_code(MembershipCode::JOIN), Membership::Join);
//! assert_eq!(Membership::from_code(MembershipCode(99)), Membership::Unknown);
//! ```

pub mod event;
pub mod event_type;
pub mod membership;
pub mod message_type;
pub mod tracing;

pub use event::{DecryptedPayload, EventTypeSource, RawEvent, UNKNOWN_EVENT_TYPE};
pub use event_type::{EventType, EventTypeCode};
pub use membership::{Membership, MembershipCode};
pub use message_type::MessageType;
pub use tracing::{
    init_tracing, TracingConfig, TracingError, TracingHandle, TracingOutputFormat, DEBUG_DIRECTIVE,
};
