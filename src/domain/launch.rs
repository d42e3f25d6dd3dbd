//! Launch countdown state machine.
//!
//! The clock never reads the system time itself. Callers feed it `now`
//! on every tick, which keeps the transition testable with synthetic
//! instants.

use chrono::{DateTime, NaiveTime, TimeDelta, TimeZone, Utc};

const MILLIS_PER_SECOND: i64 = 1_000;
const MILLIS_PER_MINUTE: i64 = 60 * MILLIS_PER_SECOND;
const MILLIS_PER_HOUR: i64 = 60 * MILLIS_PER_MINUTE;
const MILLIS_PER_DAY: i64 = 24 * MILLIS_PER_HOUR;

/// Whether purchasing is open yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchState {
    PreLaunch,
    Launched,
}

/// Whole days, hours, minutes and seconds left until launch.
///
/// # Examples
///
/// ```
/// use launchshop::domain::Countdown;
///
/// let countdown = Countdown::from_millis(90_061_000);
/// assert_eq!(countdown.labels(), ["1", "01", "01", "01"]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl Countdown {
    pub fn from_millis(remaining: i64) -> Self {
        let remaining = remaining.max(0);
        Self {
            days: remaining / MILLIS_PER_DAY,
            hours: (remaining % MILLIS_PER_DAY) / MILLIS_PER_HOUR,
            minutes: (remaining % MILLIS_PER_HOUR) / MILLIS_PER_MINUTE,
            seconds: (remaining % MILLIS_PER_MINUTE) / MILLIS_PER_SECOND,
        }
    }

    /// Display strings: days unpadded, the rest zero-padded to two digits.
    pub fn labels(&self) -> [String; 4] {
        [
            self.days.to_string(),
            format!("{:02}", self.hours),
            format!("{:02}", self.minutes),
            format!("{:02}", self.seconds),
        ]
    }
}

/// Result of a single tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickOutcome {
    pub state: LaunchState,
    /// Present only while the launch is still ahead.
    pub countdown: Option<Countdown>,
    /// True on exactly one tick: the one that crossed the target.
    pub just_launched: bool,
}

/// One-way `PreLaunch -> Launched` state machine.
#[derive(Debug, Clone)]
pub struct LaunchClock {
    target: DateTime<Utc>,
    state: LaunchState,
}

impl LaunchClock {
    /// Targets local midnight at the start of the day after `now`.
    pub fn starting_at<Tz: TimeZone>(now: &DateTime<Tz>) -> Self {
        Self::with_target(next_local_midnight(now))
    }

    pub fn with_target(target: DateTime<Utc>) -> Self {
        Self {
            target,
            state: LaunchState::PreLaunch,
        }
    }

    pub fn target(&self) -> DateTime<Utc> {
        self.target
    }

    pub fn state(&self) -> LaunchState {
        self.state
    }

    pub fn is_launched(&self) -> bool {
        self.state == LaunchState::Launched
    }

    /// Milliseconds from `now` until the target; zero or negative once passed.
    pub fn remaining_millis<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> i64 {
        (self.target - now.with_timezone(&Utc)).num_milliseconds()
    }

    pub fn tick<Tz: TimeZone>(&mut self, now: &DateTime<Tz>) -> TickOutcome {
        if self.is_launched() {
            return TickOutcome {
                state: LaunchState::Launched,
                countdown: None,
                just_launched: false,
            };
        }

        let remaining = self.remaining_millis(now);
        if remaining > 0 {
            return TickOutcome {
                state: LaunchState::PreLaunch,
                countdown: Some(Countdown::from_millis(remaining)),
                just_launched: false,
            };
        }

        self.state = LaunchState::Launched;
        TickOutcome {
            state: LaunchState::Launched,
            countdown: None,
            just_launched: true,
        }
    }
}

/// Local midnight of the calendar day after `now`, in UTC.
///
/// When a DST shift skips midnight, the first valid local instant of the
/// next day is used instead.
pub fn next_local_midnight<Tz: TimeZone>(now: &DateTime<Tz>) -> DateTime<Utc> {
    let tz = now.timezone();
    let today = now.date_naive();
    let tomorrow = today.succ_opt().unwrap_or(today);
    let mut candidate = tomorrow.and_time(NaiveTime::MIN);

    for _ in 0..24 {
        if let Some(local) = tz.from_local_datetime(&candidate).earliest() {
            return local.with_timezone(&Utc);
        }
        candidate += TimeDelta::hours(1);
    }
    Utc.from_utc_datetime(&tomorrow.and_time(NaiveTime::MIN))
}
