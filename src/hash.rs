use log::debug;
use sha2::{Digest, Sha256};

/// SHA-256 output.
pub type Hash = [u8; 32];

/// Digest over `previous_hash || payload || decimal(timestamp)`.
///
/// The timestamp is rendered in base 10 with a leading `-` when negative, so
/// any other implementation using the same byte layout produces the same hash.
pub fn block_digest(previous_hash: &[u8], payload: &[u8], timestamp: i64) -> Hash {
    let mut hasher = Sha256::new();
    hasher.update(previous_hash);
    hasher.update(payload);
    hasher.update(timestamp.to_string().as_bytes());
    let hash: Hash = hasher.finalize().into();
    debug!("Computed block hash {}", to_hex(&hash));
    hash
}

/// Lowercase hex, the form hashes are shown in.
pub fn to_hex(bytes: &[u8]) -> String {
    hex::encode(bytes)
}
