// HAR extraction add-on: consumes proxy lifecycle events and accumulates
// a HAR log with per-phase timings and referrer-based page groupings.

pub mod config;
pub mod entry;
pub mod error;
pub mod flow;
pub mod pages;
pub mod session;
pub mod timing;

pub use config::SessionConfig;
pub use error::{Error, Result};
pub use flow::{Flow, FlowRequest, FlowResponse, ServerConn};
pub use pages::{PageAssignment, PageTracker};
pub use session::{Session, SessionState, ShutdownReport};
pub use timing::TimingLedger;
