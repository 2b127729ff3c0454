//! Format selection and corpus load/save entry points
//!
//! The on-disk format is resolved exactly once, at this boundary: from the
//! file extension (`.xml`, `.json`, `.pkl`) or from an explicit format name
//! when the caller reads a stream. The codec modules never sniff anything.
//! An unrecognized extension or name fails before any output file exists.

use crate::corpus::Corpus;
use crate::{binary, json, xml};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use thiserror::Error;

/// Error raised while loading or saving a corpus
#[derive(Debug, Error)]
pub enum CodecError {
    /// Unrecognized file extension or format name
    #[error("unsupported format: {0} (expected xml, json or pkl)")]
    UnsupportedFormat(String),

    /// A loaded record lacks one of its required fields
    #[error("malformed record: missing field `{field}` in {context}")]
    MissingField { field: &'static str, context: &'static str },

    /// Structurally invalid input for the selected format
    #[error("malformed {format} corpus: {message}")]
    Malformed { format: &'static str, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML error: {0}")]
    Xml(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("binary codec error: {0}")]
    Binary(String),
}

/// Supported on-disk corpus formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Xml,
    Json,
    Binary,
}

impl Format {
    /// Resolve a format from a file extension, case-insensitively
    pub fn from_path(path: &Path) -> Result<Self, CodecError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| CodecError::UnsupportedFormat(path.display().to_string()))?;
        Self::from_name(&ext.to_ascii_lowercase())
            .map_err(|_| CodecError::UnsupportedFormat(path.display().to_string()))
    }

    /// Resolve a format from an explicit name (`xml`, `json` or `pkl`)
    pub fn from_name(name: &str) -> Result<Self, CodecError> {
        match name {
            "xml" => Ok(Format::Xml),
            "json" => Ok(Format::Json),
            "pkl" => Ok(Format::Binary),
            other => Err(CodecError::UnsupportedFormat(other.to_string())),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Format::Xml => "xml",
            Format::Json => "json",
            Format::Binary => "pkl",
        }
    }
}

/// Decode a corpus from a reader in the given format
pub fn read_corpus<R: BufRead>(reader: R, format: Format) -> Result<Corpus, CodecError> {
    let corpus = match format {
        Format::Xml => xml::read_xml(reader)?,
        Format::Json => json::read_json(reader)?,
        Format::Binary => binary::read_binary(reader)?,
    };
    tracing::debug!(format = format.name(), groups = corpus.items.len(), "corpus decoded");
    Ok(corpus)
}

/// Encode a corpus to a writer in the given format
pub fn write_corpus<W: Write>(corpus: &Corpus, writer: W, format: Format) -> Result<(), CodecError> {
    match format {
        Format::Xml => xml::write_xml(corpus, writer),
        Format::Json => json::write_json(corpus, writer),
        Format::Binary => binary::write_binary(corpus, writer),
    }
}

/// Load a corpus from a file, resolving the format from its extension
pub fn load_corpus(path: &Path) -> Result<Corpus, CodecError> {
    let format = Format::from_path(path)?;
    let reader = BufReader::new(File::open(path)?);
    let corpus = read_corpus(reader, format)?;
    tracing::info!(path = %path.display(), items = corpus.len(), "corpus loaded");
    Ok(corpus)
}

/// Save a corpus to a file, resolving the format from its extension.
///
/// The format is resolved before the file is created, so an unsupported
/// extension never leaves a partial file behind.
pub fn save_corpus(corpus: &Corpus, path: &Path) -> Result<(), CodecError> {
    let format = Format::from_path(path)?;
    let mut writer = BufWriter::new(File::create(path)?);
    write_corpus(corpus, &mut writer, format)?;
    writer.flush()?;
    tracing::info!(path = %path.display(), items = corpus.len(), "corpus saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::{Item, Token};

    fn sample_corpus() -> Corpus {
        Corpus {
            items: vec![vec![Item {
                source: "2024/sports.xml".to_string(),
                title: "Le chat".to_string(),
                description: "Le chat mange la souris".to_string(),
                category: vec!["Animaux".to_string(), "Sport".to_string()],
                pub_date: "2024-03-01".to_string(),
                analysis: vec![
                    Token::new("chat", "chat", "NOUN", "mange", "VERB", "nsubj"),
                    Token::new("mange", "manger", "VERB", "", "", "root"),
                ],
            }]],
        }
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(Format::from_path(Path::new("corpus.xml")).unwrap(), Format::Xml);
        assert_eq!(Format::from_path(Path::new("dir/corpus.JSON")).unwrap(), Format::Json);
        assert_eq!(Format::from_path(Path::new("corpus.pkl")).unwrap(), Format::Binary);
    }

    #[test]
    fn test_format_from_path_rejects_unknown() {
        let err = Format::from_path(Path::new("corpus.csv")).unwrap_err();
        assert!(matches!(err, CodecError::UnsupportedFormat(_)));
        assert!(Format::from_path(Path::new("corpus")).is_err());
    }

    #[test]
    fn test_format_from_name() {
        assert_eq!(Format::from_name("xml").unwrap(), Format::Xml);
        assert_eq!(Format::from_name("json").unwrap(), Format::Json);
        assert_eq!(Format::from_name("pkl").unwrap(), Format::Binary);
        assert!(Format::from_name("yaml").is_err());
    }

    #[test]
    fn test_stream_round_trip_all_formats() {
        let corpus = sample_corpus();
        for format in [Format::Xml, Format::Json, Format::Binary] {
            let mut buf = Vec::new();
            write_corpus(&corpus, &mut buf, format).unwrap();
            let back = read_corpus(buf.as_slice(), format).unwrap();
            assert_eq!(back, corpus, "round-trip failed for {}", format.name());
        }
    }
}
