use chrono::Duration;
use icalendar::{Calendar, Component, Event, EventLike};
use tracing::warn;

use crate::classifier::meeting_instant;
use crate::models::Meeting;

#[derive(Clone, Default)]
pub struct ICalExporter;

impl ICalExporter {
    pub fn new() -> Self {
        Self
    }

    pub fn generate(&self, meetings: &[Meeting]) -> Vec<u8> {
        if meetings.is_empty() {
            return Vec::new();
        }

        let mut calendar = Calendar::new();
        calendar.name("Meeting Board");
        let mut exported = 0usize;

        for meeting in meetings {
            let start = match meeting_instant(meeting) {
                Ok(start) => start,
                Err(err) => {
                    warn!(meeting_id = %meeting.id, error = %err, "skipping meeting in iCal export");
                    continue;
                }
            };
            let length = if meeting.duration > 0 {
                Duration::minutes(i64::from(meeting.duration))
            } else {
                Duration::hours(1)
            };
            let Some(end) = start.checked_add_signed(length) else {
                warn!(meeting_id = %meeting.id, "meeting ends beyond the calendar range, skipping");
                continue;
            };

            let mut event = Event::new();
            event.summary(&meeting.title);
            event.starts(start);
            event.ends(end);
            if let Some(platform) = &meeting.platform {
                event.location(platform);
            }
            if let Some(link) = &meeting.meeting_url {
                event.url(link.as_str());
            }

            let mut description = format!("Attendees: {}", meeting.attendees.join(", "));
            if let Some(platform) = &meeting.platform {
                description.push_str(&format!("\nPlatform: {platform}"));
            }
            if let Some(notes) = &meeting.description {
                description.push_str(&format!("\n{notes}"));
            }
            event.description(&description);
            event.uid(&format!("{}-meeting-board", meeting.id));
            calendar.push(event);
            exported += 1;
        }

        if exported == 0 {
            return Vec::new();
        }
        calendar.to_string().into_bytes()
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn meeting(id: &str, start_time: &str, duration: u32) -> Meeting {
        Meeting {
            id: id.to_string(),
            title: "Renewal negotiation".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            start_time: start_time.to_string(),
            duration,
            attendees: vec!["Dana".to_string(), "Globex".to_string()],
            platform: Some("Zoom".to_string()),
            meeting_url: None,
            description: None,
        }
    }

    #[test]
    fn test_generate_single_meeting() {
        let exporter = ICalExporter::new();
        let bytes = exporter.generate(&[meeting("m-1", "2:30 PM", 45)]);
        let body = String::from_utf8(bytes).unwrap();
        assert!(body.contains("BEGIN:VEVENT"));
        assert!(body.contains("Renewal negotiation"));
        assert!(body.contains("20240102T143000"));
        assert!(body.contains("20240102T151500"));
        assert!(body.contains("m-1-meeting-board"));
    }

    #[test]
    fn test_generate_skips_unparseable_times() {
        let exporter = ICalExporter::new();
        let bytes = exporter.generate(&[meeting("ok", "9:00 AM", 0), meeting("bad", "9am", 30)]);
        let body = String::from_utf8(bytes).unwrap();
        assert_eq!(body.matches("BEGIN:VEVENT").count(), 1);
        assert!(body.contains("20240102T100000"));
    }

    #[test]
    fn test_generate_nothing_exportable() {
        let exporter = ICalExporter::new();
        assert!(exporter.generate(&[meeting("bad", "9am", 30)]).is_empty());
    }

    #[test]
    fn test_generate_skips_meeting_ending_past_calendar_range() {
        let exporter = ICalExporter::new();
        let mut edge = meeting("edge", "11:00 PM", 120);
        edge.date = NaiveDate::MAX;
        assert!(exporter.generate(&[edge.clone()]).is_empty());

        let body = String::from_utf8(exporter.generate(&[edge, meeting("ok", "9:00 AM", 30)])).unwrap();
        assert_eq!(body.matches("BEGIN:VEVENT").count(), 1);
        assert!(body.contains("ok-meeting-board"));
    }

    #[test]
    fn test_generate_empty() {
        let exporter = ICalExporter::new();
        assert!(exporter.generate(&[]).is_empty());
    }
}
