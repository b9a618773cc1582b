use harlog_core::har::Creator;

/// Add-on configuration, owned by the session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// URLs that always open a new page, even when they carry a referrer.
    pub always_new_page: Vec<String>,
    /// Prefix for generated page ids ("<prefix>_<n>").
    pub page_prefix: String,
    /// Creator metadata stamped on the log.
    pub creator: Creator,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            always_new_page: vec!["https://github.com/".to_string()],
            page_prefix: "autopage".to_string(),
            creator: Creator {
                name: "harlog".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                comment: String::new(),
            },
        }
    }
}
