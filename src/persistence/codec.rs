//! Text codecs for ordered record sequences.

use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{Deserialize, Serialize};

use crate::error::PersistenceError;
use crate::Record;

/// On-disk representation of a record sequence. Both variants produce text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Codec {
    /// Pretty-printed JSON array, one object per record.
    #[default]
    Json,
    /// bitcode binary payload wrapped in standard base64.
    Bitcode,
}

/// Serialize `records` in order.
pub fn serialize<R: Record>(records: &[R], codec: Codec) -> Result<String, PersistenceError> {
    match codec {
        Codec::Json => serde_json::to_string_pretty(records)
            .map_err(|e| PersistenceError::Encode(e.to_string())),
        Codec::Bitcode => {
            let bytes =
                bitcode::serialize(&records).map_err(|e| PersistenceError::Encode(e.to_string()))?;
            Ok(STANDARD.encode(bytes))
        }
    }
}

/// Deserialize a sequence written by [`serialize`] with the same codec.
///
/// Empty (or whitespace-only) text yields an empty sequence.
pub fn deserialize<R: Record>(text: &str, codec: Codec) -> Result<Vec<R>, PersistenceError> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(Vec::new());
    }

    match codec {
        Codec::Json => {
            serde_json::from_str(text).map_err(|e| PersistenceError::Decode(e.to_string()))
        }
        Codec::Bitcode => {
            let bytes = STANDARD
                .decode(text)
                .map_err(|e| PersistenceError::Decode(e.to_string()))?;
            bitcode::deserialize(&bytes).map_err(|e| PersistenceError::Decode(e.to_string()))
        }
    }
}
