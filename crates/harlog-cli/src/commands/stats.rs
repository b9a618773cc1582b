use anyhow::Result;
use harlog_core::har::{Har, HarReader};
use std::path::Path;

/// Summary statistics over one HAR log.
#[derive(Debug)]
pub struct HarStats {
    pub entries: usize,
    pub pages: usize,
    pub unassigned_entries: usize,
    pub total_response_bytes: u64,
    /// Entry count per page, in page order: (page id, title, count).
    pub entries_per_page: Vec<(String, String, usize)>,
}

pub fn execute(file: &Path) -> Result<()> {
    tracing::info!("Reading HAR file: {}", file.display());

    let har = HarReader::from_file(file)?;
    HarReader::validate(&har)?;
    let stats = collect(&har);

    println!("📄 {}", file.display());
    println!("  Entries: {}", stats.entries);
    println!("  Pages: {}", stats.pages);
    println!("  Response bytes: {}", stats.total_response_bytes);
    for (id, title, count) in &stats.entries_per_page {
        println!("  {} ({}): {} entries", id, title, count);
    }
    if stats.unassigned_entries > 0 {
        println!("  Entries without a page: {}", stats.unassigned_entries);
    }

    Ok(())
}

pub fn collect(har: &Har) -> HarStats {
    let entries = &har.log.entries;

    let total_response_bytes: u64 = entries
        .iter()
        .map(|e| e.response.body_size.max(0) as u64)
        .sum();

    let entries_per_page: Vec<(String, String, usize)> = har
        .log
        .pages
        .iter()
        .map(|page| {
            let count = entries
                .iter()
                .filter(|e| e.page_ref.as_deref() == Some(page.id.as_str()))
                .count();
            (page.id.clone(), page.title.clone(), count)
        })
        .collect();

    let unassigned_entries = entries.iter().filter(|e| e.page_ref.is_none()).count();

    HarStats {
        entries: entries.len(),
        pages: har.log.pages.len(),
        unassigned_entries,
        total_response_bytes,
        entries_per_page,
    }
}
