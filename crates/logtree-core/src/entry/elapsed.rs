use std::time::{Duration, Instant};

use serde::{Serialize, Serializer};

use super::{Entry, Metric};

/// Accumulated wall-clock time. Serializes as fractional seconds.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Accumulated(pub Duration);

impl Serialize for Accumulated {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_f64(self.0.as_secs_f64())
    }
}

impl Metric for Accumulated {
    const KIND: &'static str = "elapsed";
}

pub type Elapsed = Entry<Accumulated>;

impl Entry<Accumulated> {
    /// Start a timed region; it ends when the returned guard drops.
    pub fn time(&self) -> Timer<'_> {
        Timer {
            entry: self,
            start: Instant::now(),
        }
    }

    /// Time `f`, whether it returns or unwinds.
    pub fn time_fn<T>(&self, f: impl FnOnce() -> T) -> T {
        let _timer = self.time();
        f()
    }

    pub fn total(&self) -> Duration {
        self.update(|a| a.0)
    }
}

/// Open timed region of an [`Elapsed`] entry.
#[must_use = "the timed region ends as soon as the timer is dropped"]
pub struct Timer<'a> {
    entry: &'a Elapsed,
    start: Instant,
}

impl Drop for Timer<'_> {
    fn drop(&mut self) {
        let spent = self.start.elapsed();
        self.entry.update(|a| a.0 += spent);
    }
}
