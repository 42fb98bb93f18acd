use crate::metrics;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tablet_core::{apply, AppState, Capability, Event, Recorder, UuidStamper};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

struct Session {
    state: AppState,
    stamper: UuidStamper,
    recorder: Option<Recorder>,
    applied: u64,
}

/// Result of feeding one event to the shared session.
#[derive(Debug, Clone, Serialize)]
pub struct Dispatched {
    pub changed: bool,
    pub state: AppState,
}

/// Session state owned by the hosting shell. The core itself is pure; this is
/// the single place a new snapshot replaces the old one.
#[derive(Clone)]
pub struct SharedState {
    session: Arc<RwLock<Session>>,
    pub start_time: Instant,
}

impl SharedState {
    pub fn new(initial: AppState, stamper: UuidStamper, recorder: Option<Recorder>) -> Self {
        metrics::update_state_gauges(&initial);
        Self {
            session: Arc::new(RwLock::new(Session {
                state: initial,
                stamper,
                recorder,
                applied: 0,
            })),
            start_time: Instant::now(),
        }
    }

    pub async fn snapshot(&self) -> AppState {
        self.session.read().await.state.clone()
    }

    pub async fn capability(&self) -> Capability {
        self.session.read().await.state.capability()
    }

    pub async fn dispatch(&self, event: Event) -> Dispatched {
        let mut session = self.session.write().await;
        let Session {
            state,
            stamper,
            recorder,
            applied,
        } = &mut *session;

        let next = apply(state, &event, stamper);
        let changed = next != *state;
        *applied += 1;

        metrics::record_event(event.kind());
        if !changed {
            metrics::record_noop();
            debug!(kind = event.kind(), "event left state unchanged");
        } else if matches!(event, Event::FinalizeReport) {
            metrics::record_report_finalized();
            info!("report finalized: {}", next.timeline().latest().map(|e| e.description.as_str()).unwrap_or(""));
        }

        if let Some(rec) = recorder.as_mut() {
            if let Err(e) = rec.record(&event) {
                warn!("Disabling journal after write failure: {}", e);
                *recorder = None;
            }
        }

        *state = next.clone();
        metrics::update_state_gauges(&next);

        Dispatched {
            changed,
            state: next,
        }
    }

    pub async fn applied_count(&self) -> u64 {
        self.session.read().await.applied
    }

    pub async fn recording_path(&self) -> Option<PathBuf> {
        self.session
            .read()
            .await
            .recorder
            .as_ref()
            .map(|r| r.path().to_path_buf())
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
