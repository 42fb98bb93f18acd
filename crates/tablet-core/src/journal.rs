//! NDJSON journal of applied events, and replay of a journal through the reducer.

use crate::error::{Result, TabletError};
use crate::event::Event;
use crate::reducer::apply;
use crate::stamp::SequenceStamper;
use crate::state::AppState;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordedEvent {
    pub ts: DateTime<Utc>,
    pub event: Event,
}

pub struct Recorder {
    writer: Option<BufWriter<File>>,
    path: PathBuf,
    written: u64,
}

impl Recorder {
    /// Opens `path` for appending, creating parent directories as needed.
    pub fn new(path: PathBuf) -> Result<Self> {
        let io_err = |source| TabletError::JournalIo {
            path: path.clone(),
            source,
        };
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(io_err)?;
            }
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(io_err)?;

        Ok(Self {
            writer: Some(BufWriter::new(file)),
            path,
            written: 0,
        })
    }

    pub fn record(&mut self, event: &Event) -> Result<()> {
        if let Some(writer) = &mut self.writer {
            let entry = RecordedEvent {
                ts: Utc::now(),
                event: event.clone(),
            };
            let json = serde_json::to_string(&entry)?;
            writeln!(writer, "{}", json)
                .and_then(|_| writer.flush())
                .map_err(|source| TabletError::JournalIo {
                    path: self.path.clone(),
                    source,
                })?;
            self.written += 1;
        }
        Ok(())
    }

    pub fn close(&mut self) -> Result<()> {
        if let Some(writer) = &mut self.writer {
            writer.flush().map_err(|source| TabletError::JournalIo {
                path: self.path.clone(),
                source,
            })?;
        }
        self.writer = None;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn written(&self) -> u64 {
        self.written
    }
}

impl Drop for Recorder {
    fn drop(&mut self) {
        let _ = self.close();
    }
}

pub fn read_journal(path: &Path) -> Result<Vec<RecordedEvent>> {
    let file = File::open(path).map_err(|source| TabletError::JournalIo {
        path: path.to_path_buf(),
        source,
    })?;

    let mut events = Vec::new();
    for (idx, line) in BufReader::new(file).lines().enumerate() {
        let line = line.map_err(|source| TabletError::JournalIo {
            path: path.to_path_buf(),
            source,
        })?;
        if line.trim().is_empty() {
            continue;
        }
        let entry: RecordedEvent = serde_json::from_str(&line).map_err(|source| {
            TabletError::JournalParse {
                line: idx + 1,
                source,
            }
        })?;
        events.push(entry);
    }
    Ok(events)
}

pub struct Replayer {
    events: Vec<RecordedEvent>,
    position: usize,
    stamper: SequenceStamper,
}

impl Replayer {
    pub fn from_path(path: &Path) -> Result<Self> {
        Ok(Self::new(read_journal(path)?))
    }

    pub fn new(events: Vec<RecordedEvent>) -> Self {
        Self {
            events,
            position: 0,
            stamper: SequenceStamper::new("replay"),
        }
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Applies the next recorded event; `None` once the journal is exhausted.
    pub fn step(&mut self, state: &AppState) -> Option<AppState> {
        let entry = self.events.get(self.position)?;
        self.position += 1;
        Some(apply(state, &entry.event, &mut self.stamper))
    }

    pub fn run(mut self, initial: AppState) -> AppState {
        let mut state = initial;
        while let Some(next) = self.step(&state) {
            state = next;
        }
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use crate::types::CaseStatus;

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "tablet-journal-{}-{}.ndjson",
            name,
            uuid::Uuid::new_v4()
        ))
    }

    #[test]
    fn test_record_then_replay() {
        let path = scratch_path("replay");
        {
            let mut recorder = Recorder::new(path.clone()).unwrap();
            recorder
                .record(&Event::ToggleCaseStatus {
                    case_id: "EXP-2077".to_string(),
                })
                .unwrap();
            recorder
                .record(&Event::LookupQuery {
                    name: "Sofia Mendez".to_string(),
                })
                .unwrap();
            assert_eq!(recorder.written(), 2);
        }

        let replayer = Replayer::from_path(&path).unwrap();
        assert_eq!(replayer.len(), 2);
        let state = replayer.run(fixtures::initial_state());

        assert_eq!(state.case("EXP-2077").unwrap().status, CaseStatus::Active);
        assert_eq!(state.timeline().len(), 5);
        assert_eq!(state.timeline().latest().unwrap().id, "replay-2");

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_malformed_line_reports_number() {
        let path = scratch_path("bad");
        std::fs::write(&path, "{\"ts\":\"2024-01-01T00:00:00Z\",\"event\":{\"type\":\"finalize_report\"}}\n\nnot json\n").unwrap();

        match read_journal(&path) {
            Err(TabletError::JournalParse { line, .. }) => assert_eq!(line, 3),
            other => panic!("expected parse error, got {:?}", other.map(|e| e.len())),
        }

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_missing_journal() {
        let err = read_journal(Path::new("/nonexistent/tablet/journal.ndjson")).unwrap_err();
        assert!(matches!(err, TabletError::JournalIo { .. }));
    }
}
