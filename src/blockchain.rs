use std::fmt;

use log::{info, warn};

use crate::block::Block;
use crate::clock::{Clock, SystemClock};
use crate::config::ChainConfig;
use crate::error::{ChainError, IntegrityViolation, Result};
use crate::policy::{AcceptAll, MaxPayloadSize, PayloadPolicy};

/// Append-only sequence of blocks, starting with a genesis block.
///
/// There is no way to remove or edit a block once it is in the chain.
/// `append` takes `&mut self`; use `SharedBlockchain` when several threads
/// need to append.
pub struct Blockchain {
    blocks: Vec<Block>,
    clock: Box<dyn Clock>,
    policy: Box<dyn PayloadPolicy>,
}

impl Blockchain {
    /// Genesis with the default marker, wall-clock time, no payload limits.
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn with_config(config: ChainConfig) -> Self {
        Self::builder().config(config).build()
    }

    pub fn builder() -> BlockchainBuilder {
        BlockchainBuilder::default()
    }

    /// Adopts an existing block sequence, e.g. one received from elsewhere,
    /// provided it passes `verify_blocks`. Further appends use the wall clock
    /// and accept any payload.
    pub fn from_blocks(blocks: Vec<Block>) -> Result<Self> {
        verify_blocks(&blocks)?;
        Ok(Blockchain {
            blocks,
            clock: Box::new(SystemClock),
            policy: Box::new(AcceptAll),
        })
    }

    /// Links a new block to the current tip and returns it.
    pub fn append(&mut self, payload: impl Into<Vec<u8>>) -> Result<&Block> {
        let payload = payload.into();
        if let Err(rejection) = self.policy.check(&payload) {
            warn!("Rejected payload of {} bytes: {}", payload.len(), rejection.0);
            return Err(ChainError::PayloadRejected { reason: rejection.0 });
        }

        let previous_hash = self.latest_block().hash().to_vec();
        let block = Block::with_timestamp(payload, previous_hash, self.clock.now());
        info!("Block {} added: {}", self.blocks.len(), block.hash_hex());
        self.blocks.push(block);
        Ok(self.latest_block())
    }

    pub fn latest_block(&self) -> &Block {
        // The genesis block is pushed in the builder and never removed.
        &self.blocks[self.blocks.len() - 1]
    }

    pub fn genesis(&self) -> &Block {
        &self.blocks[0]
    }

    pub fn get(&self, index: usize) -> Option<&Block> {
        self.blocks.get(index)
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Block> {
        self.blocks.iter()
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Always false: a chain holds at least its genesis block.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Checks every stored hash and every link, reporting the first failure.
    pub fn verify(&self) -> Result<()> {
        verify_blocks(&self.blocks)
    }

    pub fn is_valid(&self) -> bool {
        self.verify().is_ok()
    }
}

impl Default for Blockchain {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Blockchain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Blockchain").field("blocks", &self.blocks).finish()
    }
}

impl<'a> IntoIterator for &'a Blockchain {
    type Item = &'a Block;
    type IntoIter = std::slice::Iter<'a, Block>;

    fn into_iter(self) -> Self::IntoIter {
        self.blocks.iter()
    }
}

/// Validates a block sequence as a chain: the first block must be a genesis
/// block, each block must match its own hash, and each non-genesis block must
/// point at its predecessor's stored hash.
pub fn verify_blocks(blocks: &[Block]) -> Result<()> {
    let genesis = match blocks.first() {
        Some(block) => block,
        None => return Err(violation(0, IntegrityViolation::Empty)),
    };
    if !genesis.is_genesis() {
        return Err(violation(0, IntegrityViolation::MalformedGenesis));
    }

    for (index, block) in blocks.iter().enumerate() {
        if !block.verify() {
            return Err(violation(index, IntegrityViolation::HashMismatch));
        }
        if index > 0 && !block.links_to(&blocks[index - 1]) {
            return Err(violation(index, IntegrityViolation::BrokenLink));
        }
    }
    Ok(())
}

fn violation(index: usize, kind: IntegrityViolation) -> ChainError {
    warn!("Integrity violation at block {}: {}", index, kind);
    ChainError::integrity(index, kind)
}

/// Configures clock, payload policy and genesis marker before the genesis
/// block is created.
pub struct BlockchainBuilder {
    config: ChainConfig,
    clock: Box<dyn Clock>,
    policy: Option<Box<dyn PayloadPolicy>>,
}

impl Default for BlockchainBuilder {
    fn default() -> Self {
        Self {
            config: ChainConfig::default(),
            clock: Box::new(SystemClock),
            policy: None,
        }
    }
}

impl BlockchainBuilder {
    pub fn config(mut self, config: ChainConfig) -> Self {
        self.config = config;
        self
    }

    pub fn genesis_marker(mut self, marker: impl Into<String>) -> Self {
        self.config.genesis_marker = marker.into();
        self
    }

    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Overrides any limit taken from `ChainConfig::max_payload_size`.
    pub fn policy(mut self, policy: impl PayloadPolicy + 'static) -> Self {
        self.policy = Some(Box::new(policy));
        self
    }

    pub fn build(self) -> Blockchain {
        let policy = match (self.policy, self.config.max_payload_size) {
            (Some(policy), _) => policy,
            (None, Some(limit)) => Box::new(MaxPayloadSize(limit)),
            (None, None) => Box::new(AcceptAll),
        };
        let genesis = Block::genesis(self.config.genesis_marker, self.clock.now());
        info!("Genesis block created: {}", genesis.hash_hex());
        Blockchain {
            blocks: vec![genesis],
            clock: self.clock,
            policy,
        }
    }
}
