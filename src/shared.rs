use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::block::Block;
use crate::blockchain::Blockchain;
use crate::error::Result;
use crate::hash::Hash;

/// Cloneable handle to a chain shared between threads.
///
/// `append` holds the lock across reading the tip, building the block and
/// pushing it, so two writers can never link to the same tip.
#[derive(Debug, Clone)]
pub struct SharedBlockchain {
    inner: Arc<Mutex<Blockchain>>,
}

impl SharedBlockchain {
    pub fn new(chain: Blockchain) -> Self {
        Self {
            inner: Arc::new(Mutex::new(chain)),
        }
    }

    // A panicking holder cannot leave a half-pushed block behind, so the
    // chain behind a poisoned lock is still consistent.
    fn lock(&self) -> MutexGuard<'_, Blockchain> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn append(&self, payload: impl Into<Vec<u8>>) -> Result<Block> {
        let mut chain = self.lock();
        let block = chain.append(payload)?.clone();
        Ok(block)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn tip_hash(&self) -> Hash {
        *self.lock().latest_block().hash()
    }

    pub fn verify(&self) -> Result<()> {
        self.lock().verify()
    }

    /// Copy of the blocks as they stand right now.
    pub fn snapshot(&self) -> Vec<Block> {
        self.lock().blocks().to_vec()
    }

    /// Runs `f` against the chain while holding the lock.
    pub fn with_chain<R>(&self, f: impl FnOnce(&Blockchain) -> R) -> R {
        f(&self.lock())
    }
}

impl From<Blockchain> for SharedBlockchain {
    fn from(chain: Blockchain) -> Self {
        Self::new(chain)
    }
}
