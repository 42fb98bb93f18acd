use anyhow::Context;
use std::net::SocketAddr;
use std::path::PathBuf;
use tablet_core::{fixtures, AppState, Recorder, TimeLabel, UuidStamper};

/// Settings shared by every command that hosts a live session.
#[derive(Debug, Clone, Default)]
pub struct SessionConfig {
    pub record: Option<PathBuf>,
    pub basic: bool,
    pub wall_clock: bool,
}

impl SessionConfig {
    pub fn initial_state(&self) -> AppState {
        if self.basic {
            fixtures::initial_basic_state()
        } else {
            fixtures::initial_state()
        }
    }

    pub fn stamper(&self) -> UuidStamper {
        let label = if self.wall_clock {
            TimeLabel::WallClock
        } else {
            TimeLabel::Now
        };
        UuidStamper::new(label)
    }

    pub fn open_recorder(&self) -> anyhow::Result<Option<Recorder>> {
        self.record
            .as_ref()
            .map(|path| {
                Recorder::new(path.clone())
                    .with_context(|| format!("Failed to open journal {}", path.display()))
            })
            .transpose()
    }
}

#[derive(Debug, Clone)]
pub struct ServeConfig {
    pub http: SocketAddr,
    pub session: SessionConfig,
}

impl ServeConfig {
    pub fn new(http: &str, session: SessionConfig) -> anyhow::Result<Self> {
        let http = http
            .parse()
            .with_context(|| format!("Invalid HTTP address '{}'", http))?;
        Ok(Self { http, session })
    }
}

#[derive(Debug, Clone, Default)]
pub struct TuiConfig {
    pub session: SessionConfig,
}

#[cfg(test)]
mod tests {
    use super::*;
    use tablet_core::Capability;

    #[test]
    fn test_basic_flag_selects_capability() {
        let session = SessionConfig {
            basic: true,
            ..Default::default()
        };
        assert_eq!(session.initial_state().capability(), Capability::Basic);
        assert_eq!(
            SessionConfig::default().initial_state().capability(),
            Capability::Extended
        );
    }

    #[test]
    fn test_bad_http_address() {
        assert!(ServeConfig::new("not-an-addr", SessionConfig::default()).is_err());
        let config = ServeConfig::new("127.0.0.1:9000", SessionConfig::default()).unwrap();
        assert_eq!(config.http.port(), 9000);
    }

    #[test]
    fn test_no_record_means_no_recorder() {
        assert!(SessionConfig::default().open_recorder().unwrap().is_none());
    }
}
