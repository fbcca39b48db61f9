//! Session uptime, derived from a start timestamp captured once.

use chrono::{DateTime, Local};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UptimeClock {
    started_at: DateTime<Local>,
}

impl UptimeClock {
    pub fn new(started_at: DateTime<Local>) -> Self {
        Self { started_at }
    }

    /// `h:mm:ss` from one hour on, `mm:ss` before. Clamped at zero if the
    /// wall clock moved backwards.
    pub fn elapsed(&self, now: DateTime<Local>) -> String {
        let secs = (now - self.started_at).num_seconds().max(0);
        let h = secs / 3600;
        let m = (secs % 3600) / 60;
        let s = secs % 60;
        if h > 0 {
            format!("{h}:{m:02}:{s:02}")
        } else {
            format!("{m:02}:{s:02}")
        }
    }
}

/// Wall-clock time shown in the footer.
pub fn wall_clock(now: DateTime<Local>) -> String {
    now.format("%H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn start() -> DateTime<Local> {
        Local
            .with_ymd_and_hms(2026, 3, 1, 9, 0, 0)
            .single()
            .expect("unambiguous local time")
    }

    #[test]
    fn under_an_hour() {
        let clock = UptimeClock::new(start());
        assert_eq!(clock.elapsed(start()), "00:00");
        assert_eq!(clock.elapsed(start() + Duration::seconds(65)), "01:05");
        assert_eq!(clock.elapsed(start() + Duration::seconds(3599)), "59:59");
    }

    #[test]
    fn hours_drop_padding() {
        let clock = UptimeClock::new(start());
        assert_eq!(clock.elapsed(start() + Duration::seconds(3600)), "1:00:00");
        assert_eq!(
            clock.elapsed(start() + Duration::seconds(26 * 3600 + 61)),
            "26:01:01"
        );
    }

    #[test]
    fn backwards_clock_clamps() {
        let clock = UptimeClock::new(start());
        assert_eq!(clock.elapsed(start() - Duration::seconds(30)), "00:00");
    }

    #[test]
    fn wall_clock_format() {
        assert_eq!(wall_clock(start() + Duration::seconds(7)), "09:00:07");
    }
}
