//! Rendering of command results as text or JSON.

use std::io::Write;

use serde::Serialize;

use mxkinds_core::{EventType, EventTypeSource, Membership, MessageType, RawEvent};

use crate::config::OutputFormat;
use crate::error::CliResult;

/// Rows that can be written as text lines or as a JSON array.
pub trait Render: Serialize {
    fn to_text(&self) -> String;
}

/// Result of classifying one input value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Classification {
    /// The value as given on the command line.
    pub input: String,
    /// The resolved identifier.
    pub identifier: String,
    /// Variant name, e.g. `RoomMessage`, `Custom` or `Unknown`.
    pub variant: String,
    /// True when the input fell through to the custom/unknown case.
    pub fallback: bool,
    /// Native code, membership only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<u32>,
}

impl Classification {
    pub fn event_type(input: &str) -> Self {
        let ty = EventType::classify(input);
        Self {
            input: input.to_string(),
            identifier: ty.identifier().to_string(),
            variant: variant_name(&ty, ty.is_custom()),
            fallback: ty.is_custom(),
            code: None,
        }
    }

    pub fn message_type(input: &str) -> Self {
        let ty = MessageType::classify(input);
        Self {
            input: input.to_string(),
            identifier: ty.identifier().to_string(),
            variant: variant_name(&ty, ty.is_custom()),
            fallback: ty.is_custom(),
            code: None,
        }
    }

    /// Integers are read as native codes, anything else as the
    /// `membership` string of a member event.
    pub fn membership(input: &str) -> Self {
        let membership = match input.parse::<u32>() {
            Ok(raw) => Membership::from_code(raw.into()),
            Err(_) => Membership::from_wire(input),
        };
        Self {
            input: input.to_string(),
            identifier: membership.as_wire_str().to_string(),
            variant: format!("{membership:?}"),
            fallback: membership == Membership::Unknown,
            code: Some(membership.code().into()),
        }
    }
}

impl Render for Classification {
    fn to_text(&self) -> String {
        let mut line = format!("{} => {}", self.input, self.variant);
        if self.fallback || self.identifier != self.input {
            line.push_str(&format!(" ({})", self.identifier));
        }
        if let Some(code) = self.code {
            line.push_str(&format!(" [code {code}]"));
        }
        line
    }
}

// The custom payload is already shown as the identifier.
fn variant_name(ty: &impl std::fmt::Debug, custom: bool) -> String {
    if custom {
        "Custom".to_string()
    } else {
        format!("{ty:?}")
    }
}

/// Typed views of one event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventSummary {
    pub wire_type: String,
    #[serde(rename = "type")]
    pub event_type: String,
    pub encrypted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub msgtype: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub membership: Option<String>,
}

impl From<&RawEvent> for EventSummary {
    fn from(event: &RawEvent) -> Self {
        Self {
            wire_type: event.wire_type().to_string(),
            event_type: event.event_type().to_string(),
            encrypted: event.is_encrypted(),
            msgtype: event.msgtype().map(|ty| ty.to_string()),
            membership: event.membership().map(|m| m.to_string()),
        }
    }
}

impl Render for EventSummary {
    fn to_text(&self) -> String {
        let mut line = format!("wire_type={} type={}", self.wire_type, self.event_type);
        if let Some(ref msgtype) = self.msgtype {
            line.push_str(&format!(" msgtype={msgtype}"));
        }
        if let Some(ref membership) = self.membership {
            line.push_str(&format!(" membership={membership}"));
        }
        line
    }
}

/// One row of a known-values table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KnownEntry {
    pub variant: String,
    pub identifier: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<u32>,
}

impl Render for KnownEntry {
    fn to_text(&self) -> String {
        match self.code {
            Some(code) => format!("{} = {} [code {code}]", self.variant, self.identifier),
            None => format!("{} = {}", self.variant, self.identifier),
        }
    }
}

/// Writes rows in the requested format.
pub fn write_rows<W: Write, R: Render>(
    out: &mut W,
    rows: &[R],
    format: OutputFormat,
) -> CliResult<()> {
    match format {
        OutputFormat::Text => {
            for row in rows {
                writeln!(out, "{}", row.to_text())?;
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, rows)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render<R: Render>(rows: &[R], format: OutputFormat) -> String {
        let mut out = Vec::new();
        write_rows(&mut out, rows, format).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn event_type_text() {
        let rows = [
            Classification::event_type("m.room.message"),
            Classification::event_type("org.example.custom.event"),
        ];
        insta::assert_snapshot!(render(&rows, OutputFormat::Text), @r"
        m.room.message => RoomMessage
        org.example.custom.event => Custom (org.example.custom.event)
        ");
    }

    #[test]
    fn membership_text() {
        let rows = [
            Classification::membership("2"),
            Classification::membership("ban"),
            Classification::membership("77"),
        ];
        insta::assert_snapshot!(render(&rows, OutputFormat::Text), @r"
        2 => Join (join) [code 2]
        ban => Ban [code 4]
        77 => Unknown (unknown) [code 0]
        ");
    }

    #[test]
    fn message_type_json() {
        let rows = [Classification::message_type("m.video")];
        insta::assert_snapshot!(render(&rows, OutputFormat::Json), @r#"
        [
          {
            "input": "m.video",
            "identifier": "m.video",
            "variant": "Video",
            "fallback": false
          }
        ]
        "#);
    }

    #[test]
    fn event_summary_of_decrypted_message() {
        let event = RawEvent::new("m.room.encrypted")
            .with_decrypted("m.room.message", serde_json::json!({ "msgtype": "m.notice" }));
        let summary = EventSummary::from(&event);
        assert_eq!(summary.wire_type, "m.room.encrypted");
        assert_eq!(summary.event_type, "m.room.message");
        assert!(summary.encrypted);
        assert_eq!(
            summary.to_text(),
            "wire_type=m.room.encrypted type=m.room.message msgtype=m.notice"
        );
    }

    #[test]
    fn known_entry_text() {
        let entry = KnownEntry {
            variant: "Leave".into(),
            identifier: "leave".into(),
            code: Some(3),
        };
        assert_eq!(entry.to_text(), "Leave = leave [code 3]");
    }
}
