//! Export and import of opaque transfer strings.
//!
//! A transfer string carries `{version, exportedAt, gameData}` as JSON,
//! XORed with a fixed key stream and hex-encoded, followed by eight hex
//! digits of the CRC-32 of the plaintext. The obfuscation only keeps save
//! files from being edited by hand; it is not encryption.
//!
//! Import and metadata extraction return `None` on any failure and log the
//! cause at debug level.

use chrono::Utc;
use nightshift_types::{GameState, REQUIRED_SAVE_KEYS};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::TransferError;

/// Version written into every export.
pub const EXPORT_VERSION: &str = "1.0.0";

/// Hex digits of the trailing checksum.
const CHECKSUM_HEX_LEN: usize = 8;

/// Seed of the obfuscation key stream.
const KEY_SEED: u32 = 0x4E53_4654;

/// Metadata recoverable from a transfer string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportMetadata {
    /// Export format version.
    pub version: String,
    /// Epoch milliseconds of the export.
    pub exported_at: i64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Envelope<'a> {
    version: &'a str,
    exported_at: i64,
    game_data: &'a GameState,
}

/// Xorshift32 byte stream.
struct KeyStream(u32);

impl Iterator for KeyStream {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.0 = x;
        Some((x >> 24) as u8)
    }
}

fn obfuscate(bytes: &[u8]) -> Vec<u8> {
    bytes
        .iter()
        .zip(KeyStream(KEY_SEED))
        .map(|(b, k)| b ^ k)
        .collect()
}

fn hex_digit(nibble: u8) -> char {
    char::from_digit(u32::from(nibble & 0x0f), 16).unwrap_or('0')
}

fn to_hex(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        out.push(hex_digit(b >> 4));
        out.push(hex_digit(*b));
    }
    out
}

fn nibble(c: u8) -> Option<u8> {
    char::from(c).to_digit(16).map(|d| d as u8)
}

fn from_hex(hex: &str) -> Result<Vec<u8>, TransferError> {
    if hex.len() % 2 != 0 {
        return Err(TransferError::InvalidHex);
    }
    hex.as_bytes()
        .chunks_exact(2)
        .map(|pair| match *pair {
            [hi, lo] => match (nibble(hi), nibble(lo)) {
                (Some(h), Some(l)) => Ok((h << 4) | l),
                _ => Err(TransferError::InvalidHex),
            },
            _ => Err(TransferError::InvalidHex),
        })
        .collect()
}

/// Reverse the encoding and verify the checksum, yielding the plaintext.
fn decode_payload(input: &str) -> Result<Vec<u8>, TransferError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(TransferError::Empty);
    }
    if !input.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(TransferError::InvalidHex);
    }
    let split = input
        .len()
        .checked_sub(CHECKSUM_HEX_LEN)
        .filter(|n| *n > 0)
        .ok_or(TransferError::Truncated)?;
    let (body, checksum) = input.split_at_checked(split).ok_or(TransferError::Truncated)?;

    let expected = u32::from_str_radix(checksum, 16)
        .ok()
        .ok_or(TransferError::InvalidHex)?;
    let plain = obfuscate(&from_hex(body)?);
    let found = crc32fast::hash(&plain);
    if found != expected {
        return Err(TransferError::ChecksumMismatch { expected, found });
    }
    Ok(plain)
}

/// Encode `state` into a transfer string stamped `exported_at`.
pub fn export_game_data_at(state: &GameState, exported_at: i64) -> Result<String, TransferError> {
    let envelope = Envelope {
        version: EXPORT_VERSION,
        exported_at,
        game_data: state,
    };
    let plain = serde_json::to_vec(&envelope)?;
    let checksum = crc32fast::hash(&plain);
    let mut out = to_hex(&obfuscate(&plain));
    out.push_str(&format!("{checksum:08x}"));
    Ok(out)
}

/// Encode `state` into a transfer string stamped with the current time.
pub fn export_game_data(state: &GameState) -> Result<String, TransferError> {
    export_game_data_at(state, Utc::now().timestamp_millis())
}

/// Decode a transfer string into a state, validating the required keys.
pub fn decode_game_data(input: &str) -> Result<GameState, TransferError> {
    let plain = decode_payload(input)?;
    let mut envelope: Value = serde_json::from_slice(&plain)?;
    let game_data = envelope
        .get_mut("gameData")
        .map(Value::take)
        .ok_or(TransferError::MissingKey("gameData"))?;
    if let Some(missing) = REQUIRED_SAVE_KEYS
        .iter()
        .find(|key| game_data.get(**key).is_none())
    {
        return Err(TransferError::MissingKey(*missing));
    }
    Ok(serde_json::from_value(game_data)?)
}

/// Decode a transfer string, or `None` if it is not a valid export.
pub fn import_game_data(input: &str) -> Option<GameState> {
    match decode_game_data(input) {
        Ok(state) => Some(state),
        Err(e) => {
            debug!(error = %e, "Import rejected");
            None
        }
    }
}

/// Recover `{version, exportedAt}` without building the state.
pub fn get_export_metadata(input: &str) -> Option<ExportMetadata> {
    let plain = match decode_payload(input) {
        Ok(p) => p,
        Err(e) => {
            debug!(error = %e, "Metadata rejected");
            return None;
        }
    };
    match serde_json::from_slice::<ExportMetadata>(&plain) {
        Ok(meta) => Some(meta),
        Err(e) => {
            debug!(error = %e, "Metadata missing from payload");
            None
        }
    }
}
