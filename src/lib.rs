//! Hash-linked append-only ledger.
//!
//! Every block stores the SHA-256 of its predecessor, so changing any
//! recorded block is detectable with [`Blockchain::verify`].

pub mod block;
pub mod blockchain;
pub mod clock;
pub mod config;
pub mod error;
pub mod hash;
pub mod policy;
pub mod shared;

pub use block::Block;
pub use blockchain::{verify_blocks, Blockchain, BlockchainBuilder};
pub use clock::{Clock, FixedClock, ManualClock, SystemClock};
pub use config::ChainConfig;
pub use error::{ChainError, IntegrityViolation, Result};
pub use hash::{block_digest, to_hex, Hash};
pub use policy::{AcceptAll, MaxPayloadSize, NonEmpty, PayloadPolicy, Rejection};
pub use shared::SharedBlockchain;

/// A fresh chain holding only the genesis block.
pub fn new_chain() -> Blockchain {
    Blockchain::new()
}
