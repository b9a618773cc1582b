use super::types::{Creator, Entry, Har, Log, Page};

/// Append-only, resettable accumulator for a single HAR log.
///
/// Pages and entries are appended in arrival order; the accumulator does no
/// de-duplication, so callers must not add the same page id twice.
#[derive(Debug, Clone)]
pub struct HarLog {
    har: Har,
}

impl HarLog {
    /// Create an empty log stamped with the given creator metadata.
    pub fn new(creator: Creator) -> Self {
        Self {
            har: Har {
                log: Log {
                    version: "1.2".to_string(),
                    creator,
                    pages: Vec::new(),
                    entries: Vec::new(),
                },
            },
        }
    }

    /// Discard all pages and entries, keeping the creator metadata.
    pub fn reset(&mut self) {
        let creator = self.har.log.creator.clone();
        *self = Self::new(creator);
        tracing::debug!("HAR log reset");
    }

    pub fn add_page(&mut self, page: Page) {
        self.har.log.pages.push(page);
    }

    pub fn add_entry(&mut self, entry: Entry) {
        self.har.log.entries.push(entry);
    }

    pub fn page_count(&self) -> usize {
        self.har.log.pages.len()
    }

    pub fn entry_count(&self) -> usize {
        self.har.log.entries.len()
    }

    pub fn as_har(&self) -> &Har {
        &self.har
    }

    pub fn into_har(self) -> Har {
        self.har
    }
}
