use alloc::format;
use alloc::string::{String, ToString};
use core::time::Duration;
use serde::{Deserialize, Serialize};

/// Largest number of seconds the watch can show.
pub const MAX_TIME: u16 = 999;

/// Placeholder shown where no time is available.
pub const NO_TIME: &str = "_ _ _";

fn pad_time(seconds: u16) -> String {
    format!("{:03}", seconds.min(MAX_TIME))
}

/// Elapsed play time, only advancing while active.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Watch {
    elapsed: Duration,
    active: bool,
}

impl Watch {
    pub const fn new() -> Self {
        Self {
            elapsed: Duration::ZERO,
            active: false,
        }
    }

    pub fn update(&mut self, dt: Duration) {
        if self.active {
            self.elapsed = self.elapsed.saturating_add(dt);
        }
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Back to zero and stopped
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Whole seconds elapsed, capped at [`MAX_TIME`]
    pub fn seconds(&self) -> u16 {
        self.elapsed.as_secs().min(u64::from(MAX_TIME)) as u16
    }

    pub fn display(&self) -> String {
        pad_time(self.seconds())
    }
}

/// Fastest winning time, persisted as a newline-terminated decimal integer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BestTime(u16);

impl BestTime {
    pub fn new(seconds: u16) -> Option<Self> {
        (seconds <= MAX_TIME).then_some(Self(seconds))
    }

    pub const fn seconds(self) -> u16 {
        self.0
    }

    /// Reads the first line of a stored record, `None` when it is missing or malformed.
    pub fn parse_record(record: &str) -> Option<Self> {
        let line = record.lines().next()?;
        let seconds: i64 = line.trim().parse().ok()?;
        u16::try_from(seconds).ok().and_then(Self::new)
    }

    pub fn to_record(self) -> String {
        let mut record = self.0.to_string();
        record.push('\n');
        record
    }

    pub fn display(self) -> String {
        pad_time(self.0)
    }

    /// Whether a finished run of `seconds` replaces `current` as the best time.
    pub fn improves(current: Option<Self>, seconds: u16) -> Option<Self> {
        let candidate = Self::new(seconds.min(MAX_TIME))?;
        match current {
            Some(best) if best <= candidate => None,
            _ => Some(candidate),
        }
    }
}

pub fn display_best_time(best: Option<BestTime>) -> String {
    best.map_or_else(|| NO_TIME.to_string(), BestTime::display)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn watch_only_runs_while_active() {
        let mut watch = Watch::new();
        watch.update(Duration::from_secs(5));
        assert_eq!(watch.seconds(), 0);

        watch.set_active(true);
        watch.update(Duration::from_millis(1500));
        watch.update(Duration::from_millis(700));
        assert_eq!(watch.seconds(), 2);
        assert_eq!(watch.display(), "002");

        watch.set_active(false);
        watch.update(Duration::from_secs(60));
        assert_eq!(watch.seconds(), 2);
    }

    #[test]
    fn watch_display_caps_at_max_time() {
        let mut watch = Watch::new();
        watch.set_active(true);
        watch.update(Duration::from_secs(5000));
        assert_eq!(watch.seconds(), MAX_TIME);
        assert_eq!(watch.display(), "999");
    }

    #[test]
    fn watch_reset_stops_and_zeroes() {
        let mut watch = Watch::new();
        watch.set_active(true);
        watch.update(Duration::from_secs(42));
        watch.reset();
        assert!(!watch.is_active());
        assert_eq!(watch.display(), "000");
    }

    #[test]
    fn best_time_record_format() {
        let best = BestTime::new(42).unwrap();
        assert_eq!(best.to_record(), "42\n");
        assert_eq!(best.display(), "042");
        assert_eq!(BestTime::parse_record("42\n"), Some(best));
        assert_eq!(BestTime::parse_record(" 7 \r\nignored"), BestTime::new(7));
        assert_eq!(BestTime::parse_record("0"), BestTime::new(0));
    }

    #[test]
    fn malformed_records_mean_no_best_time() {
        assert_eq!(BestTime::parse_record(""), None);
        assert_eq!(BestTime::parse_record("\n"), None);
        assert_eq!(BestTime::parse_record("abc\n"), None);
        assert_eq!(BestTime::parse_record("-1\n"), None);
        assert_eq!(BestTime::parse_record("1000\n"), None);
        assert_eq!(display_best_time(None), NO_TIME);
    }

    #[test]
    fn only_faster_runs_improve_the_best_time() {
        let best = BestTime::new(30);
        assert_eq!(BestTime::improves(None, 50), BestTime::new(50));
        assert_eq!(BestTime::improves(best, 29), BestTime::new(29));
        assert_eq!(BestTime::improves(best, 30), None);
        assert_eq!(BestTime::improves(best, 31), None);
    }
}
