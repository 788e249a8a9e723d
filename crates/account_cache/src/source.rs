use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::SourceError;

/// Snapshot of an on-chain account as returned by a backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawAccount {
    /// Program that owns the account.
    pub owner: String,
    /// Raw account data bytes.
    pub data: Vec<u8>,
    /// Slot the snapshot was taken at.
    pub slot: u64,
}

/// Backend capable of loading account snapshots.
#[async_trait]
pub trait AccountSource: Send + Sync + 'static {
    /// Load the account at `address`, or `None` if no such account exists.
    async fn load(&self, address: &str) -> Result<Option<RawAccount>, SourceError>;
}
