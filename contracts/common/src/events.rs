//! Protocol Events for the ShareVault Executor
//!
//! Events are emitted by the ledger, the pool, the engine and the guard
//! and can be indexed off-chain. Events emitted inside an atomic boundary
//! that aborts are discarded together with the state they describe.

use crate::types::Address;
use crate::Vec;
use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

/// Event types for indexing and filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
#[borsh(use_discriminant = true)]
#[repr(u8)]
pub enum EventType {
    // Token Events (0x01 - 0x1F)
    TokenCreated = 0x01,
    Transfer = 0x02,
    Approval = 0x03,
    Mint = 0x04,
    Burn = 0x05,
    TransferRejected = 0x06,

    // Share Pool Events (0x20 - 0x3F)
    PoolEntered = 0x20,
    PoolLeft = 0x21,

    // Conversion Engine Events (0x40 - 0x5F)
    EngineDeployed = 0x40,
    VaultEntered = 0x41,
    VaultLeft = 0x42,

    // Slippage Guard Events (0x60 - 0x7F)
    SnwapSettled = 0x60,
}

/// Main event enum containing all possible protocol events
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub enum ShareVaultEvent {
    // ============ Token Events ============

    /// Emitted when a token is registered in the ledger
    TokenCreated {
        token: Address,
        minter: Address,
        decimals: u8,
        block_height: u64,
    },

    /// Emitted on token transfer
    Transfer {
        token: Address,
        from: Address,
        to: Address,
        amount: u64,
        block_height: u64,
    },

    /// Emitted when an allowance is set
    Approval {
        token: Address,
        owner: Address,
        spender: Address,
        amount: u64,
        block_height: u64,
    },

    /// Emitted when tokens are minted
    Mint {
        token: Address,
        to: Address,
        amount: u64,
        new_total_supply: u64,
        block_height: u64,
    },

    /// Emitted when tokens are burned
    Burn {
        token: Address,
        from: Address,
        amount: u64,
        new_total_supply: u64,
        block_height: u64,
    },

    /// Emitted when a flag-returning token refuses a transfer
    TransferRejected {
        token: Address,
        from: Address,
        to: Address,
        amount: u64,
        block_height: u64,
    },

    // ============ Share Pool Events ============

    /// Emitted when asset enters the pool
    PoolEntered {
        pool: Address,
        account: Address,
        asset_in: u64,
        shares_minted: u64,
        block_height: u64,
    },

    /// Emitted when shares leave the pool
    PoolLeft {
        pool: Address,
        account: Address,
        shares_burned: u64,
        asset_out: u64,
        block_height: u64,
    },

    // ============ Conversion Engine Events ============

    /// Emitted once when an engine is deployed and approves its pool
    EngineDeployed {
        engine: Address,
        asset: Address,
        pool: Address,
        block_height: u64,
    },

    /// Emitted when the engine deposits and forwards shares
    VaultEntered {
        engine: Address,
        recipient: Address,
        asset_in: u64,
        shares_out: u64,
        block_height: u64,
    },

    /// Emitted when the engine redeems and forwards asset
    VaultLeft {
        engine: Address,
        recipient: Address,
        shares_in: u64,
        asset_out: u64,
        block_height: u64,
    },

    // ============ Slippage Guard Events ============

    /// Emitted when a guarded request passes its minimum-output check
    SnwapSettled {
        guard: Address,
        caller: Address,
        recipient: Address,
        token_out: Address,
        amount_out: u64,
        min_amount_out: u64,
        block_height: u64,
    },
}

impl ShareVaultEvent {
    /// Get the event type for filtering
    pub fn event_type(&self) -> EventType {
        match self {
            Self::TokenCreated { .. } => EventType::TokenCreated,
            Self::Transfer { .. } => EventType::Transfer,
            Self::Approval { .. } => EventType::Approval,
            Self::Mint { .. } => EventType::Mint,
            Self::Burn { .. } => EventType::Burn,
            Self::TransferRejected { .. } => EventType::TransferRejected,
            Self::PoolEntered { .. } => EventType::PoolEntered,
            Self::PoolLeft { .. } => EventType::PoolLeft,
            Self::EngineDeployed { .. } => EventType::EngineDeployed,
            Self::VaultEntered { .. } => EventType::VaultEntered,
            Self::VaultLeft { .. } => EventType::VaultLeft,
            Self::SnwapSettled { .. } => EventType::SnwapSettled,
        }
    }

    /// Get the block height when event occurred
    pub fn block_height(&self) -> u64 {
        match self {
            Self::TokenCreated { block_height, .. }
            | Self::Transfer { block_height, .. }
            | Self::Approval { block_height, .. }
            | Self::Mint { block_height, .. }
            | Self::Burn { block_height, .. }
            | Self::TransferRejected { block_height, .. }
            | Self::PoolEntered { block_height, .. }
            | Self::PoolLeft { block_height, .. }
            | Self::EngineDeployed { block_height, .. }
            | Self::VaultEntered { block_height, .. }
            | Self::VaultLeft { block_height, .. }
            | Self::SnwapSettled { block_height, .. } => *block_height,
        }
    }

    /// Serialize event to bytes for storage/transmission
    pub fn to_bytes(&self) -> Vec<u8> {
        borsh::to_vec(self).unwrap_or_default()
    }

    /// Deserialize event from bytes
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        borsh::from_slice(bytes).ok()
    }
}

/// Event log for collecting multiple events during execution
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<ShareVaultEvent>,
}

impl EventLog {
    /// Create a new empty event log
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Emit an event (add to log)
    pub fn emit(&mut self, event: ShareVaultEvent) {
        self.events.push(event);
    }

    /// Get all events
    pub fn events(&self) -> &[ShareVaultEvent] {
        &self.events
    }

    /// Filter events by type
    pub fn filter_by_type(&self, event_type: EventType) -> Vec<&ShareVaultEvent> {
        self.events
            .iter()
            .filter(|e| e.event_type() == event_type)
            .collect()
    }

    /// Most recent event, if any
    pub fn last(&self) -> Option<&ShareVaultEvent> {
        self.events.last()
    }

    /// Drop every event past `len` (used on rollback)
    pub fn truncate(&mut self, len: usize) {
        self.events.truncate(len);
    }

    /// Get number of events
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// True when no events were emitted
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
