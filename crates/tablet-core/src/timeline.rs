use crate::types::{TimelineEvent, Tone};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

pub const TIMELINE_CAPACITY: usize = 10;

/// Newest-first activity log. Pushing an eleventh entry evicts the oldest.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timeline {
    entries: VecDeque<TimelineEvent>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a timeline from entries already ordered newest-first.
    pub fn from_entries(entries: Vec<TimelineEvent>) -> Self {
        let mut entries: VecDeque<TimelineEvent> = entries.into();
        entries.truncate(TIMELINE_CAPACITY);
        Self { entries }
    }

    pub fn push(&mut self, event: TimelineEvent) {
        self.entries.push_front(event);
        self.entries.truncate(TIMELINE_CAPACITY);
    }

    pub fn latest(&self) -> Option<&TimelineEvent> {
        self.entries.front()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TimelineEvent> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn count_by_tone(&self, tone: Tone) -> usize {
        self.entries.iter().filter(|e| e.tone == tone).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(n: usize) -> TimelineEvent {
        TimelineEvent {
            id: format!("evt-{}", n),
            time: "Now".to_string(),
            label: "Test".to_string(),
            description: format!("entry {}", n),
            tone: Tone::Info,
        }
    }

    #[test]
    fn test_push_prepends() {
        let mut timeline = Timeline::new();
        timeline.push(entry(1));
        timeline.push(entry(2));

        assert_eq!(timeline.len(), 2);
        assert_eq!(timeline.latest().map(|e| e.id.as_str()), Some("evt-2"));
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let mut timeline = Timeline::new();
        for n in 1..=11 {
            timeline.push(entry(n));
        }

        assert_eq!(timeline.len(), TIMELINE_CAPACITY);
        assert_eq!(timeline.latest().map(|e| e.id.as_str()), Some("evt-11"));
        assert!(timeline.iter().all(|e| e.id != "evt-1"));
    }

    #[test]
    fn test_from_entries_truncates() {
        let timeline = Timeline::from_entries((0..15).map(entry).collect());
        assert_eq!(timeline.len(), TIMELINE_CAPACITY);
        assert_eq!(timeline.latest().map(|e| e.id.as_str()), Some("evt-0"));
    }
}
