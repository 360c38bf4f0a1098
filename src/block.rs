use std::fmt;

use serde_derive::{Deserialize, Serialize};

use crate::clock::{Clock, SystemClock};
use crate::hash::{block_digest, to_hex, Hash};

/// One ledger entry. The hash is computed once in the constructor and the
/// fields have no setters, so a block built here always verifies. Blocks that
/// arrive through deserialization may not, which is what `verify` is for.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Block {
    timestamp: i64,
    #[serde(with = "hex")]
    payload: Vec<u8>,
    #[serde(with = "hex")]
    previous_hash: Vec<u8>,
    #[serde(with = "hex")]
    hash: Hash,
}

impl Block {
    /// Builds a block stamped with the current wall-clock time.
    pub fn new(payload: impl Into<Vec<u8>>, previous_hash: impl Into<Vec<u8>>) -> Self {
        Self::with_timestamp(payload, previous_hash, SystemClock.now())
    }

    pub fn with_timestamp(
        payload: impl Into<Vec<u8>>,
        previous_hash: impl Into<Vec<u8>>,
        timestamp: i64,
    ) -> Self {
        let payload = payload.into();
        let previous_hash = previous_hash.into();
        let hash = block_digest(&previous_hash, &payload, timestamp);
        Block {
            timestamp,
            payload,
            previous_hash,
            hash,
        }
    }

    /// First block of a chain: empty previous hash, `marker` as payload.
    pub fn genesis(marker: impl Into<Vec<u8>>, timestamp: i64) -> Self {
        Self::with_timestamp(marker, Vec::<u8>::new(), timestamp)
    }

    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    pub fn previous_hash(&self) -> &[u8] {
        &self.previous_hash
    }

    pub fn hash(&self) -> &Hash {
        &self.hash
    }

    pub fn hash_hex(&self) -> String {
        to_hex(&self.hash)
    }

    pub fn previous_hash_hex(&self) -> String {
        to_hex(&self.previous_hash)
    }

    pub fn is_genesis(&self) -> bool {
        self.previous_hash.is_empty()
    }

    /// Recomputes the hash from the stored fields. Never touches `self.hash`.
    pub fn compute_hash(&self) -> Hash {
        block_digest(&self.previous_hash, &self.payload, self.timestamp)
    }

    /// True if the stored hash matches the block's own fields. Linkage to the
    /// neighbouring blocks is checked by `Chain::verify`, not here.
    pub fn verify(&self) -> bool {
        self.compute_hash() == self.hash
    }

    /// Whether `self` directly follows `previous`.
    pub fn links_to(&self, previous: &Block) -> bool {
        self.previous_hash.as_slice() == previous.hash.as_slice()
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Previous hash: {}", self.previous_hash_hex())?;
        writeln!(f, "Data: {}", String::from_utf8_lossy(&self.payload))?;
        write!(f, "Hash: {}", self.hash_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_set_at_construction() {
        let block = Block::with_timestamp("data", vec![1u8, 2, 3], 1_000);
        assert_eq!(block.hash(), &block_digest(&[1, 2, 3], b"data", 1_000));
        assert!(block.verify());
    }

    #[test]
    fn test_compute_hash_is_idempotent() {
        let block = Block::with_timestamp("data", vec![9u8; 32], 55);
        assert_eq!(block.compute_hash(), block.compute_hash());
        assert_eq!(&block.compute_hash(), block.hash());
    }

    #[test]
    fn test_empty_payload_and_previous_hash_allowed() {
        let block = Block::with_timestamp(Vec::<u8>::new(), Vec::<u8>::new(), 0);
        assert!(block.payload().is_empty());
        assert!(block.is_genesis());
        assert!(block.verify());
    }

    #[test]
    fn test_genesis() {
        let block = Block::genesis("Genesis Block: ", 10);
        assert!(block.is_genesis());
        assert_eq!(block.payload(), b"Genesis Block: ");
        assert_eq!(block.timestamp(), 10);
    }

    #[test]
    fn test_new_uses_wall_clock() {
        let before = SystemClock.now();
        let block = Block::new("now", Vec::<u8>::new());
        let after = SystemClock.now();
        assert!(block.timestamp() >= before && block.timestamp() <= after);
    }

    #[test]
    fn test_tampered_payload_fails_verify() {
        let mut block = Block::with_timestamp("Send 50 DOGE to Andy", vec![7u8; 32], 1);
        block.payload = b"Send 5000 DOGE to Andy".to_vec();
        assert!(!block.verify());
    }

    #[test]
    fn test_tampered_timestamp_fails_verify() {
        let mut block = Block::with_timestamp("x", vec![7u8; 32], 1);
        block.timestamp = 2;
        assert!(!block.verify());
    }

    #[test]
    fn test_tampered_previous_hash_fails_verify() {
        let mut block = Block::with_timestamp("x", vec![7u8; 32], 1);
        block.previous_hash[0] ^= 1;
        assert!(!block.verify());
    }

    #[test]
    fn test_links_to() {
        let first = Block::genesis("g", 1);
        let second = Block::with_timestamp("b", first.hash().to_vec(), 2);
        assert!(second.links_to(&first));
        assert!(!first.links_to(&second));
    }

    #[test]
    fn test_display() {
        let block = Block::with_timestamp("hi", vec![0xabu8, 0xcd], 3);
        let text = block.to_string();
        assert!(text.starts_with("Previous hash: abcd\nData: hi\nHash: "));
        assert!(text.ends_with(&block.hash_hex()));
    }

    #[test]
    fn test_json_uses_hex() {
        let block = Block::with_timestamp("hi", vec![0xabu8], 3);
        let json = serde_json::to_value(&block).unwrap();
        assert_eq!(json["payload"], "6869");
        assert_eq!(json["previous_hash"], "ab");
        assert_eq!(json["hash"], block.hash_hex());
        assert_eq!(json["timestamp"], 3);
    }
}
