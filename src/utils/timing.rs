//! Wall-clock timing for command summaries

use serde::Serialize;
use std::time::{Duration, Instant};

/// Stopwatch started on construction
#[derive(Debug, Clone, Copy)]
pub struct Timer {
    start: Instant,
}

impl Timer {
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Elapsed time, then restart
    pub fn lap(&mut self) -> Duration {
        let now = Instant::now();
        let lap = now - self.start;
        self.start = now;
        lap
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::start()
    }
}

/// Human readable duration: `< 1ms`, `456ms`, `1.23s` or `2m 05s`
pub fn format_duration(duration: Duration) -> String {
    let millis = duration.as_millis();

    if millis == 0 {
        "< 1ms".to_string()
    } else if millis < 1000 {
        format!("{millis}ms")
    } else if duration.as_secs() < 60 {
        format!("{:.2}s", duration.as_secs_f64())
    } else {
        let secs = duration.as_secs();
        format!("{}m {:02}s", secs / 60, secs % 60)
    }
}

/// Phase durations of one batch command
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunTiming {
    #[serde(serialize_with = "as_millis")]
    pub discovery: Duration,
    #[serde(serialize_with = "as_millis")]
    pub processing: Duration,
}

impl RunTiming {
    pub fn total(&self) -> Duration {
        self.discovery + self.processing
    }
}

fn as_millis<S: serde::Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(duration.as_millis() as u64)
}
