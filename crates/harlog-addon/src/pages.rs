use std::collections::HashMap;

/// Outcome of grouping one exchange into a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageAssignment {
    /// The exchange starts a new page with this freshly allocated id.
    NewPage(String),
    /// The exchange belongs to an already known page.
    Existing(String),
    /// The referrer was present but never observed; the entry gets no
    /// pageref at all.
    Unassigned,
}

/// Referrer-based page grouping.
///
/// A URL from the always-new-page list, or any request without a referrer,
/// starts a new page. A request whose referrer maps to a known page joins
/// that page, and its own URL inherits the mapping so deeper referrer chains
/// keep resolving.
#[derive(Debug)]
pub struct PageTracker {
    prefix: String,
    always_new_page: Vec<String>,
    page_ref: HashMap<String, String>,
    page_count: u64,
}

impl PageTracker {
    pub fn new(prefix: impl Into<String>, always_new_page: Vec<String>) -> Self {
        Self {
            prefix: prefix.into(),
            always_new_page,
            page_ref: HashMap::new(),
            page_count: 0,
        }
    }

    /// Forget all URL mappings and restart page numbering.
    pub fn clear(&mut self) {
        self.page_ref.clear();
        self.page_count = 0;
    }

    /// Decide the page for one exchange. Checks run in order: the
    /// always-new-page list / missing referrer first, then referrer lookup;
    /// first match wins.
    pub fn assign(&mut self, url: &str, referer: Option<&str>) -> PageAssignment {
        if self.always_new_page.iter().any(|page_url| page_url == url) || referer.is_none() {
            self.page_count += 1;
            let id = format!("{}_{}", self.prefix, self.page_count);
            self.page_ref.insert(url.to_string(), id.clone());
            tracing::debug!("New page {} for {}", id, url);
            return PageAssignment::NewPage(id);
        }

        let referer = referer.unwrap_or_default();
        if let Some(id) = self.page_ref.get(referer).cloned() {
            // Propagate so this URL's own descendants resolve too.
            self.page_ref.insert(url.to_string(), id.clone());
            return PageAssignment::Existing(id);
        }

        PageAssignment::Unassigned
    }
}
