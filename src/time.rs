//! Frame timing and the simulated calendar.
//!
//! Two clocks live here:
//!
//! - [`Time`] measures real frames: delta, frame count and FPS. The window loop
//!   owns one.
//! - [`SimulationClock`] holds the simulated date that orbits are evaluated at.
//!   It moves forward with real time multiplied by a scale, and can be set from
//!   user-entered text.
//!
//! # Example
//!
//! ```
//! use spacecast::time::{parse_date, SimulationClock};
//!
//! let mut clock = SimulationClock::new(parse_date("12/26/2012").unwrap());
//! assert!(!clock.set_from_str("not a date"));
//! assert_eq!(clock.date().format("%Y-%m-%d").to_string(), "2012-12-26");
//! ```

use std::time::{Duration, Instant};

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use crate::error::DateParseError;

/// Longest real frame delta fed into the simulation.
pub const MAX_FRAME_DELTA: Duration = Duration::from_millis(200);

/// Real-time frame tracking.
#[derive(Debug)]
pub struct Time {
    last_frame: Instant,
    delta: Duration,
    frame_count: u64,
    fps: f32,
    fps_frame_count: u64,
    fps_update_time: Instant,
    fps_update_interval: Duration,
}

impl Time {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            last_frame: now,
            delta: Duration::ZERO,
            frame_count: 0,
            fps: 0.0,
            fps_frame_count: 0,
            fps_update_time: now,
            fps_update_interval: Duration::from_millis(500),
        }
    }

    /// Advance one frame and return the real time since the previous one,
    /// clamped to [`MAX_FRAME_DELTA`].
    pub fn update(&mut self) -> Duration {
        let now = Instant::now();
        self.delta = now.duration_since(self.last_frame).min(MAX_FRAME_DELTA);
        self.last_frame = now;
        self.frame_count += 1;

        let fps_elapsed = now.duration_since(self.fps_update_time);
        if fps_elapsed >= self.fps_update_interval {
            let frames_since = self.frame_count - self.fps_frame_count;
            self.fps = frames_since as f32 / fps_elapsed.as_secs_f32();
            self.fps_frame_count = self.frame_count;
            self.fps_update_time = now;
        }

        self.delta
    }

    #[inline]
    pub fn delta(&self) -> Duration {
        self.delta
    }

    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }
}

impl Default for Time {
    fn default() -> Self {
        Self::new()
    }
}

/// The simulated date.
///
/// `time_scale` is simulated seconds per real second. Zero freezes the date;
/// explicit date entry still works while frozen.
#[derive(Debug, Clone)]
pub struct SimulationClock {
    date: DateTime<Utc>,
    time_scale: f64,
    paused: bool,
}

impl SimulationClock {
    /// A clock at `date` running at real speed.
    pub fn new(date: DateTime<Utc>) -> Self {
        Self {
            date,
            time_scale: 1.0,
            paused: false,
        }
    }

    /// A clock at the current wall-clock time.
    pub fn now() -> Self {
        Self::new(Utc::now())
    }

    pub fn with_time_scale(mut self, scale: f64) -> Self {
        self.set_time_scale(scale);
        self
    }

    #[inline]
    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    pub fn set_date(&mut self, date: DateTime<Utc>) {
        log::debug!("Simulated date set to {}", date);
        self.date = date;
    }

    /// Parse `input` and jump to it. Returns `false` and keeps the current date
    /// when the text does not parse.
    pub fn set_from_str(&mut self, input: &str) -> bool {
        match parse_date(input) {
            Ok(date) => {
                self.set_date(date);
                true
            }
            Err(e) => {
                log::debug!("{}", e);
                false
            }
        }
    }

    #[inline]
    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }

    /// Negative and non-finite scales clamp to zero.
    pub fn set_time_scale(&mut self, scale: f64) {
        self.time_scale = if scale.is_finite() { scale.max(0.0) } else { 0.0 };
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    /// Move the date forward by `real_dt` scaled by the time scale.
    pub fn advance(&mut self, real_dt: Duration) {
        if self.paused || self.time_scale == 0.0 {
            return;
        }
        let simulated_ms = (real_dt.as_secs_f64() * 1000.0 * self.time_scale).round();
        if simulated_ms.abs() < i64::MAX as f64 {
            if let Some(next) = self
                .date
                .checked_add_signed(chrono::Duration::milliseconds(simulated_ms as i64))
            {
                self.date = next;
            }
        }
    }
}

impl Default for SimulationClock {
    fn default() -> Self {
        Self::now()
    }
}

/// Parse a user-entered date.
///
/// Accepts `MM/DD/YYYY`, `YYYY-MM-DD` (both taken as midnight UTC) and full
/// RFC 3339 timestamps. Surrounding whitespace is ignored.
pub fn parse_date(input: &str) -> Result<DateTime<Utc>, DateParseError> {
    let trimmed = input.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc));
    }
    ["%m/%d/%Y", "%Y-%m-%d"]
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
        .ok_or_else(|| DateParseError {
            input: input.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_time_update_counts_frames() {
        let mut time = Time::new();
        thread::sleep(Duration::from_millis(5));
        let dt = time.update();
        assert!(dt > Duration::ZERO);
        assert_eq!(time.frame(), 1);
    }

    #[test]
    fn test_time_delta_is_clamped() {
        let mut time = Time::new();
        thread::sleep(Duration::from_millis(250));
        assert_eq!(time.update(), MAX_FRAME_DELTA);
    }

    #[test]
    fn test_parse_date_formats() {
        let expected = Utc.with_ymd_and_hms(2012, 12, 26, 0, 0, 0).unwrap();
        assert_eq!(parse_date("12/26/2012").unwrap(), expected);
        assert_eq!(parse_date(" 2012-12-26 ").unwrap(), expected);
        assert_eq!(parse_date("2012-12-26T00:00:00Z").unwrap(), expected);
        assert_eq!(
            parse_date("2012-12-26T02:00:00+02:00").unwrap(),
            expected
        );
    }

    #[test]
    fn test_parse_date_rejects_garbage() {
        for bad in ["", "yesterday", "13/45/2012", "2012-02-30"] {
            let err = parse_date(bad).unwrap_err();
            assert_eq!(err.input, bad);
        }
    }

    #[test]
    fn test_invalid_entry_keeps_date() {
        let start = Utc.with_ymd_and_hms(1999, 5, 1, 0, 0, 0).unwrap();
        let mut clock = SimulationClock::new(start);
        assert!(!clock.set_from_str("31/31/31"));
        assert_eq!(clock.date(), start);
        assert!(clock.set_from_str("2024-01-01"));
        assert_ne!(clock.date(), start);
    }

    #[test]
    fn test_advance_scales_real_time() {
        let start = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        let mut clock = SimulationClock::new(start).with_time_scale(86_400.0);
        clock.advance(Duration::from_secs(1));
        assert_eq!(clock.date(), start + chrono::Duration::days(1));

        clock.toggle_pause();
        clock.advance(Duration::from_secs(1));
        assert_eq!(clock.date(), start + chrono::Duration::days(1));
    }

    #[test]
    fn test_time_scale_clamps() {
        let mut clock = SimulationClock::now();
        clock.set_time_scale(-3.0);
        assert_eq!(clock.time_scale(), 0.0);
        clock.set_time_scale(f64::NAN);
        assert_eq!(clock.time_scale(), 0.0);
    }
}
