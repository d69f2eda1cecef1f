//! ICS text generation.

use chrono::{DateTime, Utc};

use crate::constants::EVENT_STATUS;
use crate::error::InviteResult;
use crate::event::{InviteEvent, RequiredFields};

use super::escape::escape_text;

const ATTENDEE_PARAMS: &str =
    "CUTYPE=INDIVIDUAL;ROLE=REQ-PARTICIPANT;PARTSTAT=NEEDS-ACTION;RSVP=TRUE";

/// Format a timestamp as an iCalendar UTC DATE-TIME (`YYYYMMDDTHHMMSSZ`).
///
/// Only years 0000 through 9999 fit the fixed width.
pub fn format_utc(dt: &DateTime<Utc>) -> String {
    dt.format("%Y%m%dT%H%M%SZ").to_string()
}

/// Generate the .ics content for an invitation.
///
/// `now` is used for DTSTAMP, CREATED and LAST-MODIFIED. Lines are
/// CRLF-terminated and never folded. Validation and UID derivation run
/// before anything is written, so an error never leaves partial output.
pub fn generate_ics(event: &InviteEvent, now: DateTime<Utc>) -> InviteResult<String> {
    let RequiredFields {
        organizer,
        start,
        end,
    } = event.required_fields()?;
    let uid = event.uid()?;

    let stamp = format_utc(&now);
    let mut ics = String::with_capacity(512 + event.attendees().len() * 160);

    push_line(&mut ics, "BEGIN:VCALENDAR");
    push_line(
        &mut ics,
        &format!("PRODID:-//{}//EN", event.product_id().unwrap_or_default()),
    );
    push_line(&mut ics, &format!("VERSION:{}", event.version()));
    push_line(&mut ics, &format!("CALSCALE:{}", event.calscale()));
    push_line(&mut ics, &format!("METHOD:{}", event.method()));
    push_line(&mut ics, "BEGIN:VEVENT");
    push_line(&mut ics, &format!("DTSTART:{}", format_utc(start)));
    push_line(&mut ics, &format!("DTEND:{}", format_utc(end)));
    push_line(&mut ics, &format!("DTSTAMP:{stamp}"));
    push_line(&mut ics, &format!("ORGANIZER:mailto:{organizer}"));
    push_line(&mut ics, &format!("UID:{uid}"));

    // ATTENDEE (one line each, insertion order)
    for attendee in event.attendees() {
        push_line(
            &mut ics,
            &format!("ATTENDEE;{ATTENDEE_PARAMS};CN={attendee};X-NUM-GUESTS=0:mailto:{attendee}"),
        );
    }

    push_line(&mut ics, &format!("CREATED:{stamp}"));
    push_line(
        &mut ics,
        &format!("DESCRIPTION:{}", escape_text(event.description().unwrap_or_default())),
    );
    push_line(&mut ics, &format!("LAST-MODIFIED:{stamp}"));
    push_line(
        &mut ics,
        &format!("LOCATION:{}", escape_text(event.location().unwrap_or_default())),
    );
    push_line(&mut ics, &format!("SEQUENCE:{}", event.sequence()));
    push_line(&mut ics, &format!("STATUS:{EVENT_STATUS}"));
    push_line(
        &mut ics,
        &format!("SUMMARY:{}", escape_text(event.summary().unwrap_or_default())),
    );
    push_line(&mut ics, &format!("TRANSP:{}", event.transparency()));
    push_line(&mut ics, "END:VEVENT");
    push_line(&mut ics, "END:VCALENDAR");

    Ok(ics)
}

fn push_line(ics: &mut String, line: &str) {
    ics.push_str(line);
    ics.push_str("\r\n");
}
