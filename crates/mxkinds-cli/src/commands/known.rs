//! Listing of the known-value tables.

use std::io::Write;

use mxkinds_core::{EventType, Membership, MessageType};

use crate::cli::Domain;
use crate::config::OutputFormat;
use crate::error::CliResult;
use crate::output::{KnownEntry, write_rows};

/// Returns the known values of a domain in table order.
pub fn entries(domain: Domain) -> Vec<KnownEntry> {
    match domain {
        Domain::Event => EventType::KNOWN
            .iter()
            .map(|ty| KnownEntry {
                variant: format!("{ty:?}"),
                identifier: ty.identifier().to_string(),
                code: None,
            })
            .collect(),
        Domain::Msgtype => MessageType::KNOWN
            .iter()
            .map(|ty| KnownEntry {
                variant: format!("{ty:?}"),
                identifier: ty.identifier().to_string(),
                code: None,
            })
            .collect(),
        Domain::Membership => Membership::ALL
            .iter()
            .map(|membership| KnownEntry {
                variant: format!("{membership:?}"),
                identifier: membership.as_wire_str().to_string(),
                code: Some(membership.code().into()),
            })
            .collect(),
    }
}

/// Print the known values of a domain.
pub fn run<W: Write>(out: &mut W, domain: Domain, format: OutputFormat) -> CliResult<()> {
    write_rows(out, &entries(domain), format)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn membership_table() {
        let mut out = Vec::new();
        run(&mut out, Domain::Membership, OutputFormat::Text).unwrap();
        insta::assert_snapshot!(String::from_utf8(out).unwrap(), @r"
        Unknown = unknown [code 0]
        Invite = invite [code 1]
        Join = join [code 2]
        Leave = leave [code 3]
        Ban = ban [code 4]
        ");
    }

    #[test]
    fn event_table_matches_known_list() {
        let entries = entries(Domain::Event);
        assert_eq!(entries.len(), EventType::KNOWN.len());
        assert_eq!(entries[0].variant, "RoomName");
        assert_eq!(entries[0].identifier, "m.room.name");
        let last = entries.last().unwrap();
        assert_eq!(last.variant, "ReadMarker");
        assert_eq!(last.identifier, "m.fully_read");
    }

    #[test]
    fn msgtype_table_has_no_codes() {
        assert!(entries(Domain::Msgtype).iter().all(|entry| entry.code.is_none()));
    }
}
