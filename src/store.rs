use std::path::Path;

use chrono::{Duration, NaiveDate};
use thiserror::Error;
use tracing::info;
use url::Url;

use crate::models::Meeting;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read meetings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("meetings file is not a valid meeting list: {0}")]
    Json(#[from] serde_json::Error),
}

/// Read-only set of meetings the board is rendered from.
#[derive(Debug, Clone, Default)]
pub struct MeetingStore {
    meetings: Vec<Meeting>,
}

impl MeetingStore {
    pub fn new(meetings: Vec<Meeting>) -> Self {
        Self { meetings }
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let body = std::fs::read_to_string(path)?;
        let meetings: Vec<Meeting> = serde_json::from_str(&body)?;
        info!(count = meetings.len(), path = %path.display(), "loaded meetings");
        Ok(Self::new(meetings))
    }

    /// Sample meetings spread around `today`, for running the board without a data file.
    pub fn demo(today: NaiveDate) -> Self {
        let entry = |id: &str,
                     title: &str,
                     day_offset: i64,
                     start_time: &str,
                     duration: u32,
                     attendees: &[&str],
                     platform: &str,
                     link: Option<&str>| Meeting {
            id: id.to_string(),
            title: title.to_string(),
            date: today + Duration::days(day_offset),
            start_time: start_time.to_string(),
            duration,
            attendees: attendees.iter().map(|a| a.to_string()).collect(),
            platform: Some(platform.to_string()),
            meeting_url: link.and_then(|l| Url::parse(l).ok()),
            description: None,
        };

        Self::new(vec![
            entry(
                "m-101",
                "Quarterly pipeline review",
                -1,
                "2:00 PM",
                60,
                &["Dana Whitfield", "Priya Raman"],
                "Zoom",
                Some("https://zoom.us/j/1010101010"),
            ),
            entry(
                "m-102",
                "Daily standup",
                0,
                "9:00 AM",
                15,
                &["Team"],
                "Google Meet",
                Some("https://meet.google.com/abc-defg-hij"),
            ),
            entry(
                "m-103",
                "Acme onboarding call",
                0,
                "11:30 AM",
                45,
                &["Leo Park", "Acme Corp"],
                "Zoom",
                Some("https://zoom.us/j/2020202020"),
            ),
            entry(
                "m-104",
                "Design critique",
                0,
                "3:00 PM",
                30,
                &["Mara Okafor", "Sam Lee"],
                "In person",
                None,
            ),
            entry(
                "m-105",
                "Renewal negotiation",
                1,
                "10:00 AM",
                60,
                &["Globex Legal", "Dana Whitfield"],
                "Microsoft Teams",
                Some("https://teams.microsoft.com/l/meetup-join/105"),
            ),
            entry(
                "m-106",
                "Roadmap planning",
                6,
                "1:00 PM",
                90,
                &["Product", "Engineering"],
                "Google Meet",
                Some("https://meet.google.com/xyz-uvwx-rst"),
            ),
        ])
    }

    pub fn meetings(&self) -> &[Meeting] {
        &self.meetings
    }

    pub fn get(&self, id: &str) -> Option<&Meeting> {
        self.meetings.iter().find(|m| m.id == id)
    }

    pub fn len(&self) -> usize {
        self.meetings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meetings.is_empty()
    }
}
