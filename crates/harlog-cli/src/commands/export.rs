use anyhow::Result;
use harlog_addon::{Flow, Session, SessionConfig};
use harlog_core::har::HarWriter;
use std::fs;
use std::path::Path;

pub fn execute(flows_path: &Path, output: &Path, pretty: bool) -> Result<()> {
    tracing::info!("Replaying flow dump: {}", flows_path.display());

    let flows = read_flows(flows_path)?;
    println!("📼 Loaded {} flows from {}", flows.len(), flows_path.display());

    let mut session = Session::new(SessionConfig::default());
    session.on_start()?;
    for flow in &flows {
        session.on_response(flow)?;
    }
    let report = session.on_shutdown()?;

    fs::write(output, &report.json)?;

    if pretty {
        let pretty_json = HarWriter::serialize_pretty(&report.har)?;
        println!("{}", String::from_utf8_lossy(&pretty_json));
    }

    println!(
        "📊 Captured {} entries across {} pages",
        report.har.log.entries.len(),
        report.har.log.pages.len()
    );
    println!("{report}");
    println!("✅ HAR file written to: {}", output.display());

    Ok(())
}

/// Read a flow dump: a JSON array of flows as recorded by the host proxy.
pub fn read_flows(path: &Path) -> Result<Vec<Flow>> {
    let data = fs::read(path)?;
    let flows: Vec<Flow> = serde_json::from_slice(&data)?;
    Ok(flows)
}
