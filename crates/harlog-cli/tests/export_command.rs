use harlog_cli::commands::export;
use harlog_core::har::{HarReader, UNMEASURED};
use std::fs;

/// Two flows on one connection: a page load and a referred sub-resource.
/// This pins the on-disk flow dump format the export command consumes.
const FLOW_DUMP: &str = r#"[
  {
    "request": {
      "method": "GET",
      "url": "https://example.com/",
      "http_version": [1, 1],
      "headers": [["Host", "example.com"]],
      "body_size": 0,
      "timestamp_start": 1700000000.0,
      "timestamp_end": 1700000000.25
    },
    "response": {
      "status": 200,
      "reason": "OK",
      "http_version": [1, 1],
      "headers": [["Content-Type", "text/html"]],
      "body_size": 120,
      "timestamp_start": 1700000000.5,
      "timestamp_end": 1700000000.75
    },
    "server_conn": {
      "id": 1,
      "timestamp_start": 1699999999.0,
      "timestamp_tcp_setup": 1699999999.5
    }
  },
  {
    "request": {
      "method": "GET",
      "url": "https://example.com/style.css",
      "http_version": [1, 1],
      "headers": [
        ["Host", "example.com"],
        ["Referer", "https://example.com/"]
      ],
      "body_size": 0,
      "timestamp_start": 1700000001.0,
      "timestamp_end": 1700000001.25
    },
    "response": {
      "status": 200,
      "reason": "OK",
      "http_version": [1, 1],
      "headers": [["Content-Type", "text/css"]],
      "body_size": 40,
      "timestamp_start": 1700000001.5,
      "timestamp_end": 1700000001.75
    },
    "server_conn": {
      "id": 1,
      "timestamp_start": 1699999999.0,
      "timestamp_tcp_setup": 1699999999.5
    }
  }
]"#;

#[test]
fn export_groups_referred_flows_into_one_page() {
    let dir = tempfile::tempdir().unwrap();
    let flows_path = dir.path().join("flows.json");
    let har_path = dir.path().join("capture.har");
    fs::write(&flows_path, FLOW_DUMP).unwrap();

    export::execute(&flows_path, &har_path, false).unwrap();

    let har = HarReader::from_file(&har_path).unwrap();
    HarReader::validate(&har).unwrap();

    assert_eq!(har.log.version, "1.2");
    assert_eq!(har.log.pages.len(), 1);
    assert_eq!(har.log.pages[0].title, "https://example.com/");
    assert_eq!(har.log.entries.len(), 2);

    let page_id = &har.log.pages[0].id;
    assert_eq!(har.log.entries[0].page_ref.as_ref(), Some(page_id));
    assert_eq!(har.log.entries[1].page_ref.as_ref(), Some(page_id));
}

#[test]
fn export_charges_connect_only_on_first_flow() {
    let dir = tempfile::tempdir().unwrap();
    let flows_path = dir.path().join("flows.json");
    let har_path = dir.path().join("capture.har");
    fs::write(&flows_path, FLOW_DUMP).unwrap();

    export::execute(&flows_path, &har_path, false).unwrap();
    let har = HarReader::from_file(&har_path).unwrap();

    let first = &har.log.entries[0].timings;
    let second = &har.log.entries[1].timings;
    assert_eq!(first.connect, 500);
    assert_eq!(second.connect, UNMEASURED);
    // No ssl setup was observed on this connection at all.
    assert_eq!(first.ssl, UNMEASURED);
    assert_eq!(second.ssl, UNMEASURED);

    assert_eq!(first.send, 250);
    assert_eq!(first.wait, 250);
    assert_eq!(first.receive, 250);
    assert_eq!(har.log.entries[0].time, 1250);
    assert_eq!(har.log.entries[1].time, 750);
}

#[test]
fn read_flows_rejects_malformed_dump() {
    let dir = tempfile::tempdir().unwrap();
    let flows_path = dir.path().join("flows.json");
    fs::write(&flows_path, "{\"not\": \"a flow dump\"}").unwrap();

    assert!(export::read_flows(&flows_path).is_err());
}
