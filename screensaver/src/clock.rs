//! Live-clock text and the once-per-second regeneration signal.

#[cfg(test)]
#[path = "clock_test.rs"]
mod clock_test;

use serde::Serialize;

/// A local wall-clock reading, as supplied by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ClockTime {
    /// `0..24`
    pub hours: u8,
    pub minutes: u8,
    pub seconds: u8,
}

impl ClockTime {
    #[must_use]
    pub fn new(hours: u8, minutes: u8, seconds: u8) -> Self {
        Self { hours: hours % 24, minutes: minutes % 60, seconds: seconds % 60 }
    }

    fn twelve_hour(self) -> (u8, &'static str) {
        let meridiem = if self.hours >= 12 { "PM" } else { "AM" };
        let hour = match self.hours % 12 {
            0 => 12,
            h => h,
        };
        (hour, meridiem)
    }

    /// Text extruded in clock mode, e.g. `3:07:09 PM`.
    #[must_use]
    pub fn display_text(self) -> String {
        let (hour, meridiem) = self.twelve_hour();
        format!("{hour}:{:02}:{:02} {meridiem}", self.minutes, self.seconds)
    }

    /// Taskbar clock text, e.g. `3:07 PM`.
    #[must_use]
    pub fn taskbar_text(self) -> String {
        let (hour, meridiem) = self.twelve_hour();
        format!("{hour}:{:02} {meridiem}", self.minutes)
    }
}

/// Tracks the last clock reading that produced text.
///
/// [`ClockWatcher::observe`] answers `true` once per distinct calendar second,
/// however many ticks land inside it.
#[derive(Debug, Clone, Default)]
pub struct ClockWatcher {
    last: Option<ClockTime>,
}

impl ClockWatcher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `now`; `true` when the text needs regenerating.
    pub fn observe(&mut self, now: ClockTime) -> bool {
        if self.last == Some(now) {
            return false;
        }
        self.last = Some(now);
        true
    }

    /// Forget the last reading so the next observation regenerates.
    pub fn reset(&mut self) {
        self.last = None;
    }
}
