//! Buckets meetings into past / up next / later relative to a reference time
//! and renders the countdown text shown on the board.

use chrono::{Duration, NaiveDateTime};
use tracing::debug;

use crate::clock::{ClockError, parse_start_time};
use crate::models::{Classification, Meeting, MeetingBoard, MeetingView, RejectedMeeting};

/// Minutes before the start during which a meeting counts as imminent.
pub const IMMINENT_BEFORE_MIN: i64 = 15;
/// Minutes after the start during which a meeting still counts as imminent.
pub const IMMINENT_AFTER_MIN: i64 = 30;

/// The absolute start of a meeting: its date combined with its parsed start time.
pub fn meeting_instant(meeting: &Meeting) -> Result<NaiveDateTime, ClockError> {
    let time = parse_start_time(&meeting.start_time)?;
    Ok(meeting.date.and_time(time))
}

pub fn classify(meetings: &[Meeting], now: NaiveDateTime) -> Classification {
    let today = now.date();
    let mut result = Classification::default();
    let mut future: Vec<(NaiveDateTime, &Meeting)> = Vec::new();

    for meeting in meetings {
        let instant = match meeting_instant(meeting) {
            Ok(instant) => instant,
            Err(err) => {
                debug!(meeting_id = %meeting.id, error = %err, "rejecting meeting");
                result.rejected.push(RejectedMeeting {
                    meeting: meeting.clone(),
                    reason: err.to_string(),
                });
                continue;
            }
        };

        if instant <= now {
            if meeting.date == today {
                result.past_today.push(meeting.clone());
            } else {
                result.past_older.push(meeting.clone());
            }
        } else {
            future.push((instant, meeting));
        }
    }

    future.sort_by_key(|(instant, _)| *instant);
    let mut future = future.into_iter().map(|(_, meeting)| meeting.clone());
    result.up_next = future.next();
    result.later = future.collect();
    result
}

/// Whole minutes from `now` until the meeting starts, rounded down.
fn minutes_until(instant: NaiveDateTime, now: NaiveDateTime) -> i64 {
    (instant - now).num_seconds().div_euclid(60)
}

pub fn countdown(meeting: &Meeting, now: NaiveDateTime) -> Result<String, ClockError> {
    let instant = meeting_instant(meeting)?;
    let diff_minutes = minutes_until(instant, now);
    let diff_days = (meeting.date - now.date()).num_days();

    let text = if diff_minutes < 1 {
        "Starting now".to_string()
    } else if diff_minutes < 60 {
        format!("In {diff_minutes} min ({})", meeting.start_time)
    } else if diff_days == 0 {
        format!("In {}h ({})", diff_minutes / 60, meeting.start_time)
    } else if diff_days == 1 {
        format!("Tomorrow ({})", meeting.start_time)
    } else {
        format!("In {diff_days} days")
    };
    Ok(text)
}

pub fn is_imminent(meeting: &Meeting, now: NaiveDateTime) -> Result<bool, ClockError> {
    let diff_minutes = minutes_until(meeting_instant(meeting)?, now);
    Ok((-IMMINENT_AFTER_MIN..=IMMINENT_BEFORE_MIN).contains(&diff_minutes))
}

pub fn is_in_progress(meeting: &Meeting, now: NaiveDateTime) -> Result<bool, ClockError> {
    let start = meeting_instant(meeting)?;
    // An end past the calendar's range leaves the meeting open-ended.
    let end = start.checked_add_signed(Duration::minutes(i64::from(meeting.duration)));
    Ok(start <= now && end.is_none_or(|end| now < end))
}

fn view(meeting: Meeting, now: NaiveDateTime) -> Result<MeetingView, ClockError> {
    Ok(MeetingView {
        countdown: countdown(&meeting, now)?,
        imminent: is_imminent(&meeting, now)?,
        in_progress: is_in_progress(&meeting, now)?,
        meeting,
    })
}

/// Classifies `meetings` and attaches countdown text and flags to each bucketed meeting.
pub fn build_board(meetings: &[Meeting], now: NaiveDateTime) -> MeetingBoard {
    let classification = classify(meetings, now);
    let mut rejected = classification.rejected;

    let mut views = |bucket: Vec<Meeting>| -> Vec<MeetingView> {
        bucket
            .into_iter()
            .filter_map(|meeting| match view(meeting.clone(), now) {
                Ok(view) => Some(view),
                Err(err) => {
                    rejected.push(RejectedMeeting {
                        meeting,
                        reason: err.to_string(),
                    });
                    None
                }
            })
            .collect()
    };

    let past_today = views(classification.past_today);
    let past_older = views(classification.past_older);
    let up_next = views(classification.up_next.into_iter().collect()).pop();
    let later = views(classification.later);

    MeetingBoard {
        now,
        past_today,
        past_older,
        up_next,
        later,
        rejected,
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    fn meeting(id: &str, date: (i32, u32, u32), start_time: &str) -> Meeting {
        Meeting {
            id: id.to_string(),
            title: format!("Meeting {id}"),
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            start_time: start_time.to_string(),
            duration: 30,
            attendees: vec![],
            platform: None,
            meeting_url: None,
            description: None,
        }
    }

    fn now() -> NaiveDateTime {
        at(2024, 1, 1, 10, 0, 0)
    }

    fn ids(meetings: &[Meeting]) -> Vec<&str> {
        meetings.iter().map(|m| m.id.as_str()).collect()
    }

    #[test]
    fn test_classify_partitions_every_meeting_once() {
        let meetings = vec![
            meeting("late", (2024, 1, 3), "4:00 PM"),
            meeting("morning", (2024, 1, 1), "8:00 AM"),
            meeting("yesterday", (2023, 12, 31), "2:00 PM"),
            meeting("soon", (2024, 1, 1), "10:30 AM"),
            meeting("tonight", (2024, 1, 1), "7:00 PM"),
            meeting("broken", (2024, 1, 1), "7 PM"),
        ];
        let result = classify(&meetings, now());

        assert_eq!(result.len(), meetings.len());
        assert_eq!(ids(&result.past_today), vec!["morning"]);
        assert_eq!(ids(&result.past_older), vec!["yesterday"]);
        assert_eq!(result.up_next.as_ref().unwrap().id, "soon");
        assert_eq!(ids(&result.later), vec!["tonight", "late"]);
        assert_eq!(result.rejected.len(), 1);
        assert_eq!(result.rejected[0].meeting.id, "broken");

        let mut seen: Vec<&str> = ids(&result.past_today);
        seen.extend(ids(&result.past_older));
        seen.extend(result.up_next.iter().map(|m| m.id.as_str()));
        seen.extend(ids(&result.later));
        seen.extend(result.rejected.iter().map(|r| r.meeting.id.as_str()));
        seen.sort();
        let mut expected = ids(&meetings);
        expected.sort();
        assert_eq!(seen, expected);
    }

    #[test]
    fn test_later_is_ascending_after_up_next() {
        let meetings = vec![
            meeting("c", (2024, 1, 2), "9:00 AM"),
            meeting("a", (2024, 1, 1), "11:00 AM"),
            meeting("d", (2024, 2, 1), "12:00 AM"),
            meeting("b", (2024, 1, 1), "1:00 PM"),
        ];
        let result = classify(&meetings, now());
        let up_next = meeting_instant(result.up_next.as_ref().unwrap()).unwrap();
        let later: Vec<NaiveDateTime> = result
            .later
            .iter()
            .map(|m| meeting_instant(m).unwrap())
            .collect();

        assert!(later.windows(2).all(|w| w[0] < w[1]));
        assert!(later.iter().all(|instant| up_next <= *instant));
        assert_eq!(ids(&result.later), vec!["b", "c", "d"]);
    }

    #[test]
    fn test_meeting_at_now_is_past_today() {
        let meetings = vec![meeting("now", (2024, 1, 1), "10:00 AM")];
        let result = classify(&meetings, now());
        assert_eq!(ids(&result.past_today), vec!["now"]);
        assert!(result.up_next.is_none());
    }

    #[test]
    fn test_empty_and_one_sided_inputs() {
        let result = classify(&[], now());
        assert!(result.is_empty());
        assert!(result.up_next.is_none());

        let future = vec![
            meeting("x", (2024, 1, 1), "11:00 AM"),
            meeting("y", (2024, 1, 1), "12:00 PM"),
        ];
        let result = classify(&future, now());
        assert!(result.past_today.is_empty() && result.past_older.is_empty());
        assert_eq!(result.up_next.unwrap().id, "x");
        assert_eq!(ids(&result.later), vec!["y"]);

        let past = vec![meeting("p", (2023, 12, 1), "11:00 AM")];
        let result = classify(&past, now());
        assert!(result.up_next.is_none() && result.later.is_empty());
        assert_eq!(ids(&result.past_older), vec!["p"]);
    }

    #[test]
    fn test_countdown_thresholds() {
        let now = now();
        let mut starting = meeting("s", (2024, 1, 1), "10:00 AM");
        // half a minute ahead still reads as starting
        assert_eq!(
            countdown(&starting, now - Duration::seconds(30)).unwrap(),
            "Starting now"
        );
        starting.start_time = "10:01 AM".into();
        assert_eq!(
            countdown(&starting, at(2024, 1, 1, 10, 0, 30)).unwrap(),
            "Starting now"
        );

        let cases = [
            (meeting("m", (2024, 1, 1), "10:45 AM"), "In 45 min (10:45 AM)"),
            (meeting("h", (2024, 1, 1), "6:00 PM"), "In 8h (6:00 PM)"),
            (meeting("t", (2024, 1, 2), "9:00 AM"), "Tomorrow (9:00 AM)"),
            (meeting("d", (2024, 1, 5), "9:00 AM"), "In 4 days"),
        ];
        for (meeting, expected) in cases {
            assert_eq!(countdown(&meeting, now).unwrap(), expected);
        }
    }

    #[test]
    fn test_countdown_crossing_midnight_under_an_hour() {
        let meeting = meeting("m", (2024, 1, 2), "12:10 AM");
        let now = at(2024, 1, 1, 23, 50, 0);
        assert_eq!(countdown(&meeting, now).unwrap(), "In 20 min (12:10 AM)");
    }

    #[test]
    fn test_imminent_window() {
        let now = now();
        let cases = [
            ("10:10 AM", true),
            ("10:20 AM", false),
            ("9:40 AM", true),
            ("9:20 AM", false),
            ("10:15 AM", true),
            ("9:30 AM", true),
        ];
        for (start, expected) in cases {
            let m = meeting("i", (2024, 1, 1), start);
            assert_eq!(is_imminent(&m, now).unwrap(), expected, "{start}");
        }
    }

    #[test]
    fn test_in_progress_uses_duration() {
        let m = meeting("p", (2024, 1, 1), "9:45 AM");
        assert!(is_in_progress(&m, now()).unwrap());
        assert!(!is_in_progress(&m, at(2024, 1, 1, 10, 15, 0)).unwrap());
        assert!(!is_in_progress(&m, at(2024, 1, 1, 9, 0, 0)).unwrap());
    }

    #[test]
    fn test_in_progress_at_end_of_calendar() {
        let mut m = meeting("edge", (2024, 1, 1), "11:00 PM");
        m.date = NaiveDate::MAX;
        m.duration = 120;
        let start = meeting_instant(&m).unwrap();
        assert!(!is_in_progress(&m, now()).unwrap());
        assert!(is_in_progress(&m, start + Duration::minutes(30)).unwrap());

        let board = build_board(&[m], now());
        assert_eq!(board.up_next.unwrap().meeting.id, "edge");
        assert!(board.rejected.is_empty());
    }

    #[test]
    fn test_single_meeting_helpers_report_bad_time() {
        let m = meeting("bad", (2024, 1, 1), "25:00");
        assert!(countdown(&m, now()).is_err());
        assert!(is_imminent(&m, now()).is_err());
    }

    #[test]
    fn test_build_board_attaches_views() {
        let meetings = vec![
            meeting("soon", (2024, 1, 1), "10:10 AM"),
            meeting("later", (2024, 1, 2), "9:00 AM"),
            meeting("bad", (2024, 1, 1), "noon"),
        ];
        let board = build_board(&meetings, now());
        let up_next = board.up_next.unwrap();
        assert_eq!(up_next.meeting.id, "soon");
        assert_eq!(up_next.countdown, "In 10 min (10:10 AM)");
        assert!(up_next.imminent);
        assert!(!up_next.in_progress);
        assert_eq!(board.later[0].countdown, "Tomorrow (9:00 AM)");
        assert_eq!(board.rejected.len(), 1);
    }
}
