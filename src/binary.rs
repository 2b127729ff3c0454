//! Binary corpus codec
//!
//! Direct serialization of the in-memory corpus over its serde
//! representation, using bincode's standard configuration. Decoding is
//! fully typed: tokens come back as `Token` values or the decode fails,
//! so no post-load fix-up pass is needed.

use crate::corpus::Corpus;
use crate::format::CodecError;
use std::io::{Read, Write};

fn bin_err(e: impl std::fmt::Display) -> CodecError {
    CodecError::Binary(e.to_string())
}

/// Encode a corpus to its binary representation
pub fn write_binary<W: Write>(corpus: &Corpus, mut writer: W) -> Result<(), CodecError> {
    bincode::serde::encode_into_std_write(corpus, &mut writer, bincode::config::standard())
        .map_err(bin_err)?;
    Ok(())
}

/// Decode a corpus from its binary representation
pub fn read_binary<R: Read>(mut reader: R) -> Result<Corpus, CodecError> {
    bincode::serde::decode_from_std_read(&mut reader, bincode::config::standard()).map_err(bin_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::{Item, Token};

    #[test]
    fn test_round_trip() {
        let corpus = Corpus {
            items: vec![vec![Item {
                source: "2024/sports.xml".to_string(),
                title: "Le chat".to_string(),
                description: "Le chat mange la souris".to_string(),
                category: vec!["Animaux".to_string()],
                pub_date: "2024-03-01".to_string(),
                analysis: vec![
                    Token::new("chat", "chat", "NOUN", "mange", "VERB", "nsubj"),
                    Token::new("mange", "manger", "VERB", "", "", "root"),
                ],
            }]],
        };

        let mut buf = Vec::new();
        write_binary(&corpus, &mut buf).unwrap();
        let back = read_binary(buf.as_slice()).unwrap();

        assert_eq!(back, corpus);
    }

    #[test]
    fn test_truncated_input_is_rejected() {
        // a length prefix with no payload behind it
        let buf = [0xFFu8, 0xFF, 0xFF];
        assert!(matches!(read_binary(&buf[..]), Err(CodecError::Binary(_))));
    }
}
