use super::types::Har;
use crate::{Error, Result};
use flate2::read::GzDecoder;
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

pub struct HarReader;

impl HarReader {
    /// Read and parse a HAR file from the given path
    pub fn from_file(path: &Path) -> Result<Har> {
        tracing::debug!("Reading HAR file from: {}", path.display());

        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let har: Har = serde_json::from_reader(reader)?;

        tracing::info!(
            "Parsed HAR file with {} entries",
            har.log.entries.len()
        );

        Ok(har)
    }

    /// Parse a HAR log from its canonical JSON bytes
    pub fn from_slice(bytes: &[u8]) -> Result<Har> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Parse a HAR log from its gzip-compressed encoding
    pub fn from_compressed(bytes: &[u8]) -> Result<Har> {
        let mut decoder = GzDecoder::new(bytes);
        let mut json = Vec::new();
        decoder.read_to_end(&mut json)?;
        Self::from_slice(&json)
    }

    /// Validate that a HAR structure is well-formed: a non-empty version and
    /// every entry's pageref naming a page present in the same log.
    pub fn validate(har: &Har) -> Result<()> {
        if har.log.version.is_empty() {
            return Err(Error::InvalidStructure("Missing HAR version".to_string()));
        }

        let page_ids: HashSet<&str> = har.log.pages.iter().map(|p| p.id.as_str()).collect();
        for (idx, entry) in har.log.entries.iter().enumerate() {
            if let Some(page_ref) = &entry.page_ref
                && !page_ids.contains(page_ref.as_str())
            {
                return Err(Error::InvalidStructure(format!(
                    "Entry {} references unknown page {}",
                    idx, page_ref
                )));
            }
        }

        tracing::debug!("HAR structure is valid");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::har::{Cache, Content, Creator, Entry, Log, Page, Request, Response, Timings, UNMEASURED};

    fn minimal_entry(page_ref: Option<&str>) -> Entry {
        Entry {
            started_date_time: "2026-01-01T00:00:00.000Z".to_string(),
            time: 0,
            request: Request {
                method: "GET".to_string(),
                url: "https://example.com/".to_string(),
                http_version: "1.1".to_string(),
                cookies: vec![],
                headers: vec![],
                query_string: vec![],
                headers_size: 0,
                body_size: 0,
            },
            response: Response {
                status: 200,
                status_text: "OK".to_string(),
                http_version: "1.1".to_string(),
                cookies: vec![],
                headers: vec![],
                content: Content {
                    size: 0,
                    compression: 0,
                    mime_type: String::new(),
                },
                redirect_url: String::new(),
                headers_size: 0,
                body_size: 0,
            },
            cache: Cache {},
            timings: Timings {
                send: 0,
                wait: 0,
                receive: 0,
                connect: UNMEASURED,
                ssl: UNMEASURED,
            },
            page_ref: page_ref.map(String::from),
        }
    }

    fn har_with(pages: Vec<Page>, entries: Vec<Entry>) -> Har {
        Har {
            log: Log {
                version: "1.2".to_string(),
                creator: Creator {
                    name: "test".to_string(),
                    version: "1.0".to_string(),
                    comment: String::new(),
                },
                pages,
                entries,
            },
        }
    }

    #[test]
    fn parse_minimal_log() {
        let har_json = r#"{
            "log": {
                "version": "1.2",
                "creator": {"name": "test", "version": "1.0", "comment": ""},
                "pages": [],
                "entries": []
            }
        }"#;

        let har = HarReader::from_slice(har_json.as_bytes()).unwrap();
        assert_eq!(har.log.version, "1.2");
        assert!(har.log.entries.is_empty());
    }

    #[test]
    fn validate_rejects_dangling_pageref() {
        let har = har_with(vec![], vec![minimal_entry(Some("autopage_1"))]);
        assert!(HarReader::validate(&har).is_err());
    }

    #[test]
    fn validate_accepts_resolved_pageref() {
        let page = Page {
            started_date_time: "2026-01-01T00:00:00.000Z".to_string(),
            id: "autopage_1".to_string(),
            title: "https://example.com/".to_string(),
        };
        let har = har_with(vec![page], vec![minimal_entry(Some("autopage_1"))]);
        assert!(HarReader::validate(&har).is_ok());
    }

    #[test]
    fn validate_ignores_entries_without_pageref() {
        let har = har_with(vec![], vec![minimal_entry(None)]);
        assert!(HarReader::validate(&har).is_ok());
    }
}
