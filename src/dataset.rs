//! Loading the AllPrintings dataset from disk.
//!
//! The whole file is parsed before anything is returned, so a caller either
//! gets a complete [`AllPrintings`] or a [`DeckCheckError::Dataset`]; partial
//! loads are never exposed. Files ending in `.gz` are decompressed on the fly.

use std::fs;
use std::io::{BufReader, Read};
use std::path::Path;

use flate2::read::GzDecoder;

use crate::error::{DeckCheckError, Result};
use crate::models::AllPrintings;

/// Read and parse an AllPrintings file (`.json` or `.json.gz`).
pub fn load_all_printings<P: AsRef<Path>>(path: P) -> Result<AllPrintings> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(DeckCheckError::Dataset(format!(
            "dataset file {} does not exist",
            path.display()
        )));
    }

    tracing::info!(path = %path.display(), "loading card dataset");
    let file = fs::File::open(path).map_err(|e| {
        DeckCheckError::Dataset(format!("cannot open {}: {}", path.display(), e))
    })?;
    let reader = BufReader::new(file);

    let parsed = if path.extension().and_then(|e| e.to_str()) == Some("gz") {
        parse_reader(BufReader::new(GzDecoder::new(reader)))
    } else {
        parse_reader(reader)
    };

    let dataset = parsed.map_err(|e| match e {
        DeckCheckError::Dataset(msg) => {
            DeckCheckError::Dataset(format!("{}: {}", path.display(), msg))
        }
        other => other,
    })?;

    tracing::info!(
        sets = dataset.data.len(),
        cards = dataset.card_count(),
        version = dataset.meta.as_ref().map(|m| m.version.as_str()).unwrap_or(""),
        "card dataset loaded"
    );
    Ok(dataset)
}

/// Parse an AllPrintings document from any reader.
pub fn parse_reader<R: Read>(reader: R) -> Result<AllPrintings> {
    serde_json::from_reader(reader)
        .map_err(|e| DeckCheckError::Dataset(format!("malformed AllPrintings document: {e}")))
}

/// Parse an AllPrintings document held in memory.
pub fn parse_str(contents: &str) -> Result<AllPrintings> {
    parse_reader(contents.as_bytes())
}
