use crate::flow::Flow;
use harlog_core::har::{Timings, UNMEASURED};
use std::collections::HashSet;

/// Derives per-phase HAR timings from a flow's raw timestamps.
///
/// Connect and ssl setup time belong to the connection, not the exchange, so
/// each is charged to the first flow observed on a given connection and
/// reported as unmeasured (-1) for every later flow reusing it. The two
/// phases are tracked independently.
#[derive(Debug, Default)]
pub struct TimingLedger {
    seen_connect: HashSet<u64>,
    seen_ssl: HashSet<u64>,
}

impl TimingLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget all charged connections.
    pub fn clear(&mut self) {
        self.seen_connect.clear();
        self.seen_ssl.clear();
    }

    /// Compute the timing breakdown for one flow, charging connection-level
    /// phases if this is the first flow seen on its connection.
    pub fn timings_for(&mut self, flow: &Flow) -> Timings {
        let conn = &flow.server_conn;

        let mut connect = UNMEASURED;
        if !self.seen_connect.contains(&conn.id)
            && let (Some(start), Some(tcp_setup)) = (conn.timestamp_start, conn.timestamp_tcp_setup)
        {
            connect = millis(tcp_setup - start);
            self.seen_connect.insert(conn.id);
        }

        let mut ssl = UNMEASURED;
        if !self.seen_ssl.contains(&conn.id)
            && let (Some(tcp_setup), Some(ssl_setup)) =
                (conn.timestamp_tcp_setup, conn.timestamp_ssl_setup)
        {
            ssl = millis(ssl_setup - tcp_setup);
            self.seen_ssl.insert(conn.id);
        }

        Timings {
            send: millis(flow.request.timestamp_end - flow.request.timestamp_start),
            wait: millis(flow.response.timestamp_start - flow.request.timestamp_end),
            receive: millis(flow.response.timestamp_end - flow.response.timestamp_start),
            connect,
            ssl,
        }
    }
}

/// Fractional seconds to integer milliseconds, truncated.
fn millis(seconds: f64) -> i64 {
    (seconds * 1000.0) as i64
}
