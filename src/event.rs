//! The invitation document.
//!
//! An [`InviteEvent`] is built up through chainable setters, then rendered
//! any number of times. Rendering never mutates the event; the three
//! "now" stamps (DTSTAMP, CREATED, LAST-MODIFIED) are taken per render.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::InviteDefaults;
use crate::date::parse_timestamp;
use crate::error::{DateField, InviteError, InviteResult, RequiredField};
use crate::ics::generate_ics;
use crate::uid::{UidSource, UuidSource};

/// A single-event calendar invitation (VCALENDAR + VEVENT, METHOD:REQUEST).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InviteEvent {
    product_id: Option<String>,
    version: String,
    calscale: String,
    method: String,
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
    organizer: Option<String>,
    /// Local part of the UID; the domain comes from the organizer
    uid_local_part: String,
    attendees: Vec<String>,
    description: Option<String>,
    location: Option<String>,
    sequence: u32,
    summary: Option<String>,
    /// OPAQUE (blocks time) or TRANSPARENT (shows as free)
    transparency: String,
}

/// The fields rendering can't do without, borrowed from a validated event.
pub(crate) struct RequiredFields<'a> {
    pub organizer: &'a str,
    pub start: &'a DateTime<Utc>,
    pub end: &'a DateTime<Utc>,
}

impl Default for InviteEvent {
    fn default() -> Self {
        Self::new()
    }
}

impl InviteEvent {
    /// New event with a random UUID as the UID local part.
    pub fn new() -> Self {
        Self::with_uid_source(&UuidSource)
    }

    pub fn with_uid_source(source: &dyn UidSource) -> Self {
        Self::from_defaults(&InviteDefaults::default(), source)
    }

    /// New event whose calendar-level properties come from `defaults`.
    pub fn from_defaults(defaults: &InviteDefaults, source: &dyn UidSource) -> Self {
        InviteEvent {
            product_id: defaults.product_id.clone(),
            version: defaults.version.clone(),
            calscale: defaults.calscale.clone(),
            method: defaults.method.clone(),
            start: None,
            end: None,
            organizer: None,
            uid_local_part: source.next_local_part(),
            attendees: Vec::new(),
            description: None,
            location: None,
            sequence: 0,
            summary: None,
            transparency: defaults.transparency.clone(),
        }
    }

    // Calendar-level properties

    pub fn product_id(&self) -> Option<&str> {
        self.product_id.as_deref()
    }

    pub fn set_product_id(&mut self, product_id: impl Into<String>) -> &mut Self {
        self.product_id = Some(product_id.into());
        self
    }

    pub fn clear_product_id(&mut self) -> &mut Self {
        self.product_id = None;
        self
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn set_version(&mut self, version: impl Into<String>) -> &mut Self {
        self.version = version.into();
        self
    }

    pub fn calscale(&self) -> &str {
        &self.calscale
    }

    pub fn set_calscale(&mut self, calscale: impl Into<String>) -> &mut Self {
        self.calscale = calscale.into();
        self
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn set_method(&mut self, method: impl Into<String>) -> &mut Self {
        self.method = method.into();
        self
    }

    // Timing

    pub fn start(&self) -> Option<&DateTime<Utc>> {
        self.start.as_ref()
    }

    /// Rendering assumes a four-digit year (0000 to 9999); chrono prints
    /// other years with a sign or extra digits, which no longer fits
    /// `YYYYMMDDTHHMMSSZ`.
    pub fn set_start(&mut self, start: DateTime<Utc>) -> &mut Self {
        self.start = Some(start);
        self
    }

    /// Parse `input` and use it as the start time.
    ///
    /// On failure the current start time is left untouched.
    pub fn set_start_str(&mut self, input: &str) -> InviteResult<&mut Self> {
        let start = parse_timestamp(DateField::Start, input)?;
        Ok(self.set_start(start))
    }

    pub fn clear_start(&mut self) -> &mut Self {
        self.start = None;
        self
    }

    pub fn end(&self) -> Option<&DateTime<Utc>> {
        self.end.as_ref()
    }

    /// Same four-digit year limit as [`InviteEvent::set_start`].
    pub fn set_end(&mut self, end: DateTime<Utc>) -> &mut Self {
        self.end = Some(end);
        self
    }

    /// Parse `input` and use it as the end time.
    ///
    /// On failure the current end time is left untouched.
    pub fn set_end_str(&mut self, input: &str) -> InviteResult<&mut Self> {
        let end = parse_timestamp(DateField::End, input)?;
        Ok(self.set_end(end))
    }

    pub fn clear_end(&mut self) -> &mut Self {
        self.end = None;
        self
    }

    // Participants

    pub fn organizer(&self) -> Option<&str> {
        self.organizer.as_deref()
    }

    pub fn set_organizer(&mut self, email: impl Into<String>) -> &mut Self {
        self.organizer = Some(email.into());
        self
    }

    pub fn clear_organizer(&mut self) -> &mut Self {
        self.organizer = None;
        self
    }

    pub fn attendees(&self) -> &[String] {
        &self.attendees
    }

    /// Replace all attendees.
    pub fn set_attendees<I, S>(&mut self, attendees: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.attendees = attendees.into_iter().map(Into::into).collect();
        self
    }

    /// Append one attendee. Duplicates are kept.
    pub fn add_attendee(&mut self, email: impl Into<String>) -> &mut Self {
        self.attendees.push(email.into());
        self
    }

    // Identity

    /// Full UID: `<local part>@<organizer domain>`.
    ///
    /// Derived on every call so it always tracks the current organizer.
    /// The domain is the second `@`-separated segment of the organizer.
    pub fn uid(&self) -> InviteResult<String> {
        let organizer = self
            .organizer
            .as_deref()
            .ok_or(InviteError::InvalidOrganizer(None))?;

        match organizer.split('@').nth(1) {
            Some(domain) if !domain.is_empty() => {
                Ok(format!("{}@{}", self.uid_local_part, domain))
            }
            _ => Err(InviteError::InvalidOrganizer(Some(organizer.to_string()))),
        }
    }

    pub fn uid_local_part(&self) -> &str {
        &self.uid_local_part
    }

    pub fn set_uid_local_part(&mut self, local_part: impl Into<String>) -> &mut Self {
        self.uid_local_part = local_part.into();
        self
    }

    // Descriptive text

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn set_description(&mut self, description: impl Into<String>) -> &mut Self {
        self.description = Some(description.into());
        self
    }

    pub fn clear_description(&mut self) -> &mut Self {
        self.description = None;
        self
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    pub fn set_location(&mut self, location: impl Into<String>) -> &mut Self {
        self.location = Some(location.into());
        self
    }

    pub fn clear_location(&mut self) -> &mut Self {
        self.location = None;
        self
    }

    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    pub fn set_summary(&mut self, summary: impl Into<String>) -> &mut Self {
        self.summary = Some(summary.into());
        self
    }

    pub fn clear_summary(&mut self) -> &mut Self {
        self.summary = None;
        self
    }

    // Scheduling metadata

    pub fn sequence(&self) -> u32 {
        self.sequence
    }

    pub fn set_sequence(&mut self, sequence: u32) -> &mut Self {
        self.sequence = sequence;
        self
    }

    pub fn transparency(&self) -> &str {
        &self.transparency
    }

    pub fn set_transparency(&mut self, transparency: impl Into<String>) -> &mut Self {
        self.transparency = transparency.into();
        self
    }

    // Validation & rendering

    /// Check that organizer, start and end are set, reporting the first
    /// missing one in that order. An empty organizer counts as missing.
    pub fn validate(&self) -> InviteResult<()> {
        self.required_fields().map(|_| ())
    }

    pub(crate) fn required_fields(&self) -> InviteResult<RequiredFields<'_>> {
        let organizer = self
            .organizer
            .as_deref()
            .filter(|o| !o.is_empty())
            .ok_or(InviteError::MissingRequiredField(RequiredField::Organizer))?;
        let start = self
            .start
            .as_ref()
            .ok_or(InviteError::MissingRequiredField(RequiredField::Start))?;
        let end = self
            .end
            .as_ref()
            .ok_or(InviteError::MissingRequiredField(RequiredField::End))?;

        Ok(RequiredFields {
            organizer,
            start,
            end,
        })
    }

    /// Render the invitation as .ics text, stamped with the current time.
    pub fn render(&self) -> InviteResult<String> {
        self.render_at(Utc::now())
    }

    /// Render with an explicit "now" for DTSTAMP, CREATED and LAST-MODIFIED.
    #[tracing::instrument(skip(self), fields(uid = %self.uid_local_part, attendees = self.attendees.len()))]
    pub fn render_at(&self, now: DateTime<Utc>) -> InviteResult<String> {
        let ics = generate_ics(self, now).inspect_err(|e| {
            tracing::debug!(error = %e, "invitation not rendered");
        })?;
        tracing::debug!(bytes = ics.len(), "rendered invitation");
        Ok(ics)
    }

    /// Suggested attachment file name.
    pub fn file_name(&self) -> String {
        format!("invite-{}.ics", self.uid_local_part)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::uid::{CounterSource, FixedSource};
    use chrono::TimeZone;
    use proptest::prelude::*;

    fn at(h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, h, 0, 0).unwrap()
    }

    fn make_valid_event() -> InviteEvent {
        let mut event = InviteEvent::with_uid_source(&FixedSource("fixed".into()));
        event
            .set_organizer("mail@example.com")
            .set_start(at(9))
            .set_end(at(10));
        event
    }

    #[test]
    fn fresh_event_has_builtin_defaults() {
        let event = InviteEvent::new();

        assert_eq!(event.product_id(), None);
        assert_eq!(event.version(), "2.0");
        assert_eq!(event.calscale(), "GREGORIAN");
        assert_eq!(event.method(), "REQUEST");
        assert_eq!(event.transparency(), "OPAQUE");
        assert_eq!(event.sequence(), 0);
        assert!(event.attendees().is_empty());
        assert!(!event.uid_local_part().is_empty());
    }

    #[test]
    fn each_construction_draws_a_new_local_part() {
        let source = CounterSource::new("inv");

        let a = InviteEvent::with_uid_source(&source);
        let b = InviteEvent::with_uid_source(&source);

        assert_eq!(a.uid_local_part(), "inv-1");
        assert_eq!(b.uid_local_part(), "inv-2");
    }

    #[test]
    fn from_defaults_applies_configured_values() {
        let defaults = InviteDefaults {
            product_id: Some("Acme//Planner".into()),
            transparency: "TRANSPARENT".into(),
            ..InviteDefaults::default()
        };

        let event = InviteEvent::from_defaults(&defaults, &FixedSource("x".into()));

        assert_eq!(event.product_id(), Some("Acme//Planner"));
        assert_eq!(event.transparency(), "TRANSPARENT");
        assert_eq!(event.method(), "REQUEST");
    }

    #[test]
    fn uid_uses_organizer_domain() {
        let event = make_valid_event();
        assert_eq!(event.uid().unwrap(), "fixed@example.com");
    }

    #[test]
    fn uid_tracks_organizer_changes() {
        let mut event = make_valid_event();
        event.set_organizer("boss@corp.example");

        assert_eq!(event.uid().unwrap(), "fixed@corp.example");
    }

    #[test]
    fn uid_uses_second_segment_when_organizer_has_several_ats() {
        let mut event = make_valid_event();
        event.set_organizer("a@b@c");

        assert_eq!(event.uid().unwrap(), "fixed@b");
    }

    #[test]
    fn uid_without_organizer_is_invalid() {
        let event = InviteEvent::new();
        assert!(matches!(event.uid(), Err(InviteError::InvalidOrganizer(None))));
    }

    #[test]
    fn uid_without_domain_is_invalid() {
        let mut event = make_valid_event();

        event.set_organizer("nobody");
        assert!(matches!(event.uid(), Err(InviteError::InvalidOrganizer(Some(_)))));

        event.set_organizer("nobody@");
        assert!(matches!(event.uid(), Err(InviteError::InvalidOrganizer(Some(_)))));
    }

    #[test]
    fn explicit_local_part_overrides_generated_one() {
        let mut event = make_valid_event();
        event.set_uid_local_part("meeting-42");

        assert_eq!(event.uid_local_part(), "meeting-42");
        assert_eq!(event.uid().unwrap(), "meeting-42@example.com");
    }

    #[test]
    fn validation_reports_first_missing_field_in_order() {
        let mut event = InviteEvent::new();
        assert!(matches!(
            event.validate(),
            Err(InviteError::MissingRequiredField(RequiredField::Organizer))
        ));

        event.set_organizer("mail@example.com");
        assert!(matches!(
            event.validate(),
            Err(InviteError::MissingRequiredField(RequiredField::Start))
        ));

        event.set_start(at(9));
        assert!(matches!(
            event.validate(),
            Err(InviteError::MissingRequiredField(RequiredField::End))
        ));

        event.set_end(at(10));
        assert!(event.validate().is_ok());
    }

    #[test]
    fn empty_organizer_counts_as_missing() {
        let mut event = make_valid_event();
        event.set_organizer("");

        assert!(matches!(
            event.render(),
            Err(InviteError::MissingRequiredField(RequiredField::Organizer))
        ));
    }

    #[test]
    fn validation_is_rerun_on_every_render() {
        let mut event = make_valid_event();
        assert!(event.render().is_ok());

        event.clear_start();
        assert!(matches!(
            event.render(),
            Err(InviteError::MissingRequiredField(RequiredField::Start))
        ));

        event.set_start(at(9));
        assert!(event.render().is_ok());
    }

    #[test]
    fn string_setters_store_parsed_timestamp() {
        let mut event = InviteEvent::new();
        event
            .set_start_str("2025-06-01 09:00")
            .unwrap()
            .set_end_str("2025-06-01T10:00:00Z")
            .unwrap();

        assert_eq!(event.start(), Some(&at(9)));
        assert_eq!(event.end(), Some(&at(10)));
    }

    #[test]
    fn malformed_string_leaves_field_untouched() {
        let mut event = make_valid_event();

        let err = event.set_end_str("").unwrap_err();

        assert!(matches!(err, InviteError::MalformedDate { field: DateField::End, .. }));
        assert_eq!(event.end(), Some(&at(10)));
    }

    #[test]
    fn set_attendees_replaces_and_add_attendee_appends() {
        let mut event = InviteEvent::new();
        event
            .add_attendee("old@example.com")
            .set_attendees(["a@example.com", "b@example.com"])
            .add_attendee("a@example.com");

        assert_eq!(
            event.attendees(),
            ["a@example.com", "b@example.com", "a@example.com"]
        );
    }

    #[test]
    fn render_does_not_mutate_event() {
        let event = make_valid_event();
        let before = event.clone();

        event.render().unwrap();
        event.render().unwrap();

        assert_eq!(event, before);
    }

    #[test]
    fn render_at_is_deterministic() {
        let event = make_valid_event();

        assert_eq!(event.render_at(at(8)).unwrap(), event.render_at(at(8)).unwrap());
    }

    #[test]
    fn file_name_uses_local_part() {
        assert_eq!(make_valid_event().file_name(), "invite-fixed.ics");
    }

    #[test]
    fn event_survives_serde_round_trip() {
        let mut event = make_valid_event();
        event.set_summary("Standup").add_attendee("x@example.com");

        let json = serde_json::to_string(&event).unwrap();
        let restored: InviteEvent = serde_json::from_str(&json).unwrap();

        assert_eq!(restored, event);
    }

    proptest! {
        #[test]
        fn missing_required_field_always_blocks_render(
            has_organizer: bool,
            has_start: bool,
            has_end: bool
        ) {
            prop_assume!(!(has_organizer && has_start && has_end));

            let mut event = make_valid_event();
            if !has_organizer {
                event.clear_organizer();
            }
            if !has_start {
                event.clear_start();
            }
            if !has_end {
                event.clear_end();
            }

            let is_missing_field = matches!(event.render(), Err(InviteError::MissingRequiredField(_)));
            prop_assert!(is_missing_field);
        }

        #[test]
        fn valid_events_are_framed_by_vcalendar(
            local in "[a-z0-9]{1,12}",
            domain in "[a-z]{1,10}\\.[a-z]{2,4}",
            sequence in 0u32..1000
        ) {
            let mut event = make_valid_event();
            event
                .set_organizer(format!("{local}@{domain}"))
                .set_sequence(sequence);

            let ics = event.render().unwrap();
            prop_assert!(ics.starts_with("BEGIN:VCALENDAR\r\n"));
            prop_assert!(ics.ends_with("END:VCALENDAR\r\n"));
            let sequence_line = format!("\r\nSEQUENCE:{sequence}\r\n");
            prop_assert!(ics.contains(&sequence_line));
            let uid_suffix = format!("@{domain}\r\n");
            prop_assert!(ics.contains(&uid_suffix));
        }
    }
}
