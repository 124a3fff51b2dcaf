use chrono::NaiveTime;
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

static START_TIME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(\d{1,2}):(\d{2})\s*([AaPp][Mm])\s*$").expect("regex compiles")
});

static HAS_PERIOD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)[ap]m\s*$").expect("regex compiles"));

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClockError {
    #[error("start time {0:?} is missing an AM/PM suffix")]
    MissingPeriod(String),
    #[error("start time {0:?} is not in h:mm AM/PM form")]
    Malformed(String),
    #[error("hour {0} is outside 1-12")]
    HourOutOfRange(u32),
    #[error("minute {0} is outside 0-59")]
    MinuteOutOfRange(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Am,
    Pm,
}

/// A start time as written on the board, e.g. `9:30 AM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TwelveHourTime {
    pub hour12: u32,
    pub minute: u32,
    pub period: Period,
}

impl TwelveHourTime {
    pub fn parse(text: &str) -> Result<Self, ClockError> {
        let Some(caps) = START_TIME.captures(text) else {
            if !HAS_PERIOD.is_match(text) {
                return Err(ClockError::MissingPeriod(text.to_string()));
            }
            return Err(ClockError::Malformed(text.to_string()));
        };

        let hour12 = caps[1]
            .parse::<u32>()
            .map_err(|_| ClockError::Malformed(text.to_string()))?;
        let minute = caps[2]
            .parse::<u32>()
            .map_err(|_| ClockError::Malformed(text.to_string()))?;
        let period = if caps[3].eq_ignore_ascii_case("pm") {
            Period::Pm
        } else {
            Period::Am
        };

        if !(1..=12).contains(&hour12) {
            return Err(ClockError::HourOutOfRange(hour12));
        }
        if minute > 59 {
            return Err(ClockError::MinuteOutOfRange(minute));
        }

        Ok(Self {
            hour12,
            minute,
            period,
        })
    }

    pub fn hour24(&self) -> u32 {
        match (self.period, self.hour12) {
            (Period::Pm, h) if h != 12 => h + 12,
            (Period::Am, 12) => 0,
            (_, h) => h,
        }
    }

    pub fn to_naive_time(&self) -> NaiveTime {
        // hour24 is 0-23 and minute 0-59 once parsed
        NaiveTime::from_hms_opt(self.hour24(), self.minute, 0).unwrap_or(NaiveTime::MIN)
    }
}

/// Parses a 12-hour `h:mm AM/PM` string into a wall-clock time.
pub fn parse_start_time(text: &str) -> Result<NaiveTime, ClockError> {
    TwelveHourTime::parse(text).map(|t| t.to_naive_time())
}
