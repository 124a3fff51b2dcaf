use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use url::Url;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct Meeting {
    pub id: String,
    pub title: String,
    #[schema(value_type = String, format = "date", example = "2024-01-01")]
    pub date: NaiveDate,
    /// 12-hour clock with AM/PM suffix, e.g. `10:45 AM`.
    #[schema(example = "10:45 AM")]
    pub start_time: String,
    /// Minutes.
    #[serde(default)]
    pub duration: u32,
    #[serde(default)]
    pub attendees: Vec<String>,
    #[serde(default)]
    pub platform: Option<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>, format = "uri")]
    pub meeting_url: Option<Url>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct RejectedMeeting {
    pub meeting: Meeting,
    pub reason: String,
}

/// Meetings bucketed by their start relative to a reference time.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct Classification {
    pub past_today: Vec<Meeting>,
    pub past_older: Vec<Meeting>,
    pub up_next: Option<Meeting>,
    pub later: Vec<Meeting>,
    pub rejected: Vec<RejectedMeeting>,
}

impl Classification {
    pub fn len(&self) -> usize {
        self.past_today.len()
            + self.past_older.len()
            + usize::from(self.up_next.is_some())
            + self.later.len()
            + self.rejected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct MeetingView {
    #[serde(flatten)]
    pub meeting: Meeting,
    pub countdown: String,
    pub imminent: bool,
    pub in_progress: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct MeetingBoard {
    #[schema(value_type = String, format = "date-time", example = "2024-01-01T10:00:00")]
    pub now: NaiveDateTime,
    pub past_today: Vec<MeetingView>,
    pub past_older: Vec<MeetingView>,
    pub up_next: Option<MeetingView>,
    pub later: Vec<MeetingView>,
    pub rejected: Vec<RejectedMeeting>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ClassifyRequest {
    pub meetings: Vec<Meeting>,
    #[schema(value_type = String, format = "date-time", example = "2024-01-01T10:00:00")]
    pub now: NaiveDateTime,
}
