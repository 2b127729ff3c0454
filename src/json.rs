//! JSON corpus codec
//!
//! The top level is an object mapping synthetic per-group keys `"file_1"`,
//! `"file_2"`, ... (1-indexed in traversal order) to arrays of item
//! records. Item and token records use the same field names as the XML
//! layout; `analysis` is null for unannotated items. Decoding follows the
//! object's own key order, so group order survives the round-trip, and a
//! record missing a required key is rejected rather than defaulted.

use crate::corpus::{Corpus, Item};
use crate::format::CodecError;
use serde_json::{Map, Value};
use std::io::{Read, Write};

/// Encode a corpus as a pretty-printed group-keyed JSON object
pub fn write_json<W: Write>(corpus: &Corpus, writer: W) -> Result<(), CodecError> {
    let mut groups = Map::with_capacity(corpus.items.len());
    for (i, group) in corpus.items.iter().enumerate() {
        groups.insert(format!("file_{}", i + 1), serde_json::to_value(group)?);
    }
    serde_json::to_writer_pretty(writer, &Value::Object(groups))?;
    Ok(())
}

/// Decode a corpus from a group-keyed JSON object
pub fn read_json<R: Read>(reader: R) -> Result<Corpus, CodecError> {
    let value: Value = serde_json::from_reader(reader)?;
    let groups = match value {
        Value::Object(groups) => groups,
        _ => {
            return Err(CodecError::Malformed {
                format: "json",
                message: "top level must be an object of item groups".to_string(),
            });
        }
    };

    let mut corpus = Corpus::new();
    for (_key, group_value) in groups {
        let group: Vec<Item> = serde_json::from_value(group_value)?;
        corpus.items.push(group);
    }
    Ok(corpus)
}
