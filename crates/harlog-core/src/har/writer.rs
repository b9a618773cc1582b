use super::types::Har;
use crate::Result;
use flate2::Compression;
use flate2::write::GzEncoder;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

pub struct HarWriter;

impl HarWriter {
    /// Canonical JSON encoding of the full log.
    pub fn serialize(har: &Har) -> Result<Vec<u8>> {
        let bytes = serde_json::to_vec(har)?;
        tracing::debug!("Serialized HAR log ({} bytes)", bytes.len());
        Ok(bytes)
    }

    /// Pretty-printed JSON encoding, for operator inspection.
    pub fn serialize_pretty(har: &Har) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec_pretty(har)?)
    }

    /// Gzip-compressed canonical encoding. Decompressing and decoding yields
    /// the same logical content as [`HarWriter::serialize`].
    pub fn serialize_compressed(har: &Har) -> Result<Vec<u8>> {
        let json = Self::serialize(har)?;
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(&json)?;
        let bytes = encoder.finish()?;
        tracing::debug!("Compressed HAR log ({} bytes)", bytes.len());
        Ok(bytes)
    }

    /// Write the pretty-printed log to a file.
    pub fn to_file(har: &Har, path: &Path) -> Result<()> {
        tracing::debug!("Writing HAR file to: {}", path.display());

        let file = File::create(path)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, har)?;

        tracing::info!(
            "Wrote HAR file with {} entries to {}",
            har.log.entries.len(),
            path.display()
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::har::{Creator, HarReader, Log};

    fn empty_har() -> Har {
        Har {
            log: Log {
                version: "1.2".to_string(),
                creator: Creator {
                    name: "test".to_string(),
                    version: "1.0".to_string(),
                    comment: String::new(),
                },
                pages: vec![],
                entries: vec![],
            },
        }
    }

    #[test]
    fn serialize_contains_version_and_creator() {
        let bytes = HarWriter::serialize(&empty_har()).unwrap();
        let json = String::from_utf8(bytes).unwrap();
        assert!(json.contains("\"version\":\"1.2\""));
        assert!(json.contains("\"creator\""));
    }

    #[test]
    fn compressed_round_trips_to_same_structure() {
        let har = empty_har();
        let full = HarWriter::serialize(&har).unwrap();
        let compressed = HarWriter::serialize_compressed(&har).unwrap();

        let from_full = HarReader::from_slice(&full).unwrap();
        let from_compressed = HarReader::from_compressed(&compressed).unwrap();
        assert_eq!(from_full, from_compressed);
    }
}
