use crate::config::SessionConfig;
use crate::entry::build_entry;
use crate::error::{Error, Result};
use crate::flow::Flow;
use crate::pages::{PageAssignment, PageTracker};
use crate::timing::TimingLedger;
use harlog_core::har::{Har, HarLog, HarWriter, Page};
use std::fmt;

/// Lifecycle of one capture session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Uninitialized,
    Active,
    Finalized,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match self {
            SessionState::Uninitialized => "uninitialized",
            SessionState::Active => "active",
            SessionState::Finalized => "finalized",
        };
        f.write_str(state)
    }
}

/// One capture session: owns the HAR accumulator and all grouping state, and
/// adapts the host proxy's lifecycle events onto them.
///
/// The host drives it through `on_start`, then `on_response` once per
/// completed flow, then `on_shutdown`. Events out of order are rejected.
/// The session is a plain owned value; a host that dispatches events
/// concurrently must serialize access to it (one mutex or one consumer
/// task), since page numbering and log order depend on arrival order.
#[derive(Debug)]
pub struct Session {
    state: SessionState,
    config: SessionConfig,
    log: HarLog,
    ledger: TimingLedger,
    pages: PageTracker,
}

impl Session {
    pub fn new(config: SessionConfig) -> Self {
        let log = HarLog::new(config.creator.clone());
        let pages = PageTracker::new(config.page_prefix.clone(), config.always_new_page.clone());
        Self {
            state: SessionState::Uninitialized,
            config,
            log,
            ledger: TimingLedger::new(),
            pages,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn log(&self) -> &HarLog {
        &self.log
    }

    /// Host startup event: activate the session with a fresh log and cleared
    /// grouping state. Calling it again on an active session restarts the
    /// capture; a finalized session cannot be restarted.
    pub fn on_start(&mut self) -> Result<()> {
        if self.state == SessionState::Finalized {
            return Err(Error::InvalidState {
                event: "start",
                state: self.state,
            });
        }

        self.log.reset();
        self.ledger.clear();
        self.pages.clear();
        self.state = SessionState::Active;
        tracing::info!("Capture session started");
        Ok(())
    }

    /// Host response-complete event: record one finished flow. The host
    /// guarantees both request and response are fully materialized.
    pub fn on_response(&mut self, flow: &Flow) -> Result<()> {
        if self.state != SessionState::Active {
            return Err(Error::InvalidState {
                event: "response",
                state: self.state,
            });
        }

        let timings = self.ledger.timings_for(flow);
        let mut entry = build_entry(flow, timings);

        let referer = flow.request.header("referer");
        match self.pages.assign(&flow.request.url, referer) {
            PageAssignment::NewPage(id) => {
                self.log.add_page(Page {
                    started_date_time: entry.started_date_time.clone(),
                    id: id.clone(),
                    title: flow.request.url.clone(),
                });
                entry.page_ref = Some(id);
            }
            PageAssignment::Existing(id) => entry.page_ref = Some(id),
            PageAssignment::Unassigned => {}
        }

        tracing::debug!(
            "Recorded {} {} ({} entries)",
            flow.request.method,
            flow.request.url,
            self.log.entry_count() + 1
        );
        self.log.add_entry(entry);
        Ok(())
    }

    /// Host shutdown event: finalize the session and serialize the log, full
    /// and compressed. No further events are accepted afterwards.
    pub fn on_shutdown(&mut self) -> Result<ShutdownReport> {
        if self.state != SessionState::Active {
            return Err(Error::InvalidState {
                event: "shutdown",
                state: self.state,
            });
        }

        self.state = SessionState::Finalized;

        let har = self.log.as_har().clone();
        let json = HarWriter::serialize(&har)?;
        let compressed = HarWriter::serialize_compressed(&har)?;

        tracing::info!(
            "Capture session finalized: {} pages, {} entries, {} bytes ({} compressed)",
            har.log.pages.len(),
            har.log.entries.len(),
            json.len(),
            compressed.len()
        );

        Ok(ShutdownReport {
            har,
            json,
            compressed,
        })
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }
}

/// Final output of a session: the accumulated log plus both encodings.
#[derive(Debug, Clone)]
pub struct ShutdownReport {
    pub har: Har,
    pub json: Vec<u8>,
    pub compressed: Vec<u8>,
}

impl ShutdownReport {
    /// Compressed size as a percentage of the uncompressed size.
    pub fn compression_rate(&self) -> f64 {
        if self.json.is_empty() {
            return 0.0;
        }
        100.0 * self.compressed.len() as f64 / self.json.len() as f64
    }
}

impl fmt::Display for ShutdownReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "HAR log finished with {} bytes ({} bytes compressed)",
            self.json.len(),
            self.compressed.len()
        )?;
        write!(f, "Compression rate is {:.1}%", self.compression_rate())
    }
}
