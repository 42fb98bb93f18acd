//! Identifier and time-label generation for timeline entries.
//!
//! The reducer never creates ids on its own; callers hand it a [`Stamper`] so
//! tests and journal replay can use deterministic ids.

use chrono::Utc;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stamp {
    pub id: String,
    pub time: String,
}

pub trait Stamper {
    fn stamp(&mut self) -> Stamp;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TimeLabel {
    /// Relative label, always "Now".
    #[default]
    Now,
    /// Wall-clock `HH:MM` in UTC.
    WallClock,
}

/// Random v4 ids.
#[derive(Debug, Clone, Default)]
pub struct UuidStamper {
    label: TimeLabel,
}

impl UuidStamper {
    pub fn new(label: TimeLabel) -> Self {
        Self { label }
    }
}

impl Stamper for UuidStamper {
    fn stamp(&mut self) -> Stamp {
        let time = match self.label {
            TimeLabel::Now => "Now".to_string(),
            TimeLabel::WallClock => Utc::now().format("%H:%M").to_string(),
        };
        Stamp {
            id: uuid::Uuid::new_v4().to_string(),
            time,
        }
    }
}

/// Monotonic `evt-<n>` ids with a fixed time label.
#[derive(Debug, Clone)]
pub struct SequenceStamper {
    prefix: String,
    next: u64,
    time: String,
}

impl SequenceStamper {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 1,
            time: "Now".to_string(),
        }
    }

    pub fn with_time(mut self, time: impl Into<String>) -> Self {
        self.time = time.into();
        self
    }

    pub fn issued(&self) -> u64 {
        self.next - 1
    }
}

impl Default for SequenceStamper {
    fn default() -> Self {
        Self::new("evt")
    }
}

impl Stamper for SequenceStamper {
    fn stamp(&mut self) -> Stamp {
        let id = format!("{}-{}", self.prefix, self.next);
        self.next += 1;
        Stamp {
            id,
            time: self.time.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_stamper() {
        let mut stamper = SequenceStamper::new("t").with_time("08:00");
        assert_eq!(stamper.stamp().id, "t-1");
        let second = stamper.stamp();
        assert_eq!(second.id, "t-2");
        assert_eq!(second.time, "08:00");
        assert_eq!(stamper.issued(), 2);
    }

    #[test]
    fn test_uuid_stamper_unique() {
        let mut stamper = UuidStamper::default();
        let a = stamper.stamp();
        let b = stamper.stamp();
        assert_ne!(a.id, b.id);
        assert_eq!(a.time, "Now");
    }
}
