//! Core Types for the ShareVault Executor
//!
//! Fundamental data structures shared by the pool, the conversion engine
//! and the slippage guard.

use crate::constants::{engine, ratio::RATIO_PRECISION};
use crate::errors::{ShareVaultError, ShareVaultResult};
use crate::Vec;
use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

/// Type alias for addresses (32-byte hash). Tokens, pools, engines,
/// guards and end users all live in the same address space.
pub type Address = [u8; 32];

/// The zero address (never a valid holder or contract)
pub const ZERO_ADDRESS: Address = [0u8; 32];

// ============ Amounts ============

/// Input amount for a conversion.
///
/// The wire convention overloads `0` as "use everything the engine holds";
/// in code the two cases are distinct variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub enum AmountIn {
    /// Convert exactly this many units
    Exact(u64),
    /// Convert the engine's entire balance of the input token
    FullBalance,
}

impl AmountIn {
    /// Map a raw wire amount to a tagged amount (`0` is the full-balance sentinel)
    pub fn from_raw(raw: u64) -> Self {
        if raw == 0 {
            Self::FullBalance
        } else {
            Self::Exact(raw)
        }
    }

    /// Map back to the raw wire convention
    pub fn to_raw(self) -> u64 {
        match self {
            Self::Exact(amount) => amount,
            Self::FullBalance => 0,
        }
    }

    /// Resolve against the amount of `token` currently held
    pub fn resolve(self, token: Address, held: u64) -> ShareVaultResult<u64> {
        match self {
            Self::Exact(0) => Err(ShareVaultError::ZeroAmount),
            Self::Exact(amount) => Ok(amount),
            Self::FullBalance if held == 0 => Err(ShareVaultError::InsufficientFunds {
                token,
                available: held,
            }),
            Self::FullBalance => Ok(held),
        }
    }
}

// ============ Pool Types ============

/// Point-in-time view of a share pool's accounting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub struct PoolSnapshot {
    /// Outstanding shares
    pub total_shares: u64,
    /// Asset held by the pool
    pub reserve: u64,
}

impl PoolSnapshot {
    pub fn new(total_shares: u64, reserve: u64) -> Self {
        Self { total_shares, reserve }
    }

    /// True when either side is empty and deposits mint 1:1
    pub fn is_bootstrap(&self) -> bool {
        self.total_shares == 0 || self.reserve == 0
    }

    /// `total_shares / reserve` scaled by `RATIO_PRECISION`, `None` in bootstrap
    pub fn ratio(&self) -> Option<u128> {
        if self.is_bootstrap() {
            return None;
        }
        (self.total_shares as u128)
            .checked_mul(RATIO_PRECISION)
            .map(|scaled| scaled / self.reserve as u128)
    }
}

// ============ Engine Types ============

/// How much of a measured delta the engine forwards to the recipient
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub enum ForwardPolicy {
    /// Forward the whole measured delta (no dust left behind)
    #[default]
    FullDelta,
    /// Keep one unit of the delta on the engine. Alternate, unconfirmed
    /// behavior; breaks the no-dust guarantee by exactly that unit.
    WithholdOneUnit,
}

impl ForwardPolicy {
    /// Amount to forward out of a measured delta
    pub fn forwardable(&self, delta: u64) -> u64 {
        match self {
            Self::FullDelta => delta,
            Self::WithholdOneUnit => delta.saturating_sub(engine::WITHHELD_UNIT),
        }
    }
}

/// A call into the conversion engine, carried as an opaque payload by the guard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineCall {
    /// Deposit asset into the pool and forward the minted shares
    EnterShareVault { amount_in: AmountIn, recipient: Address },
    /// Redeem shares from the pool and forward the released asset
    LeaveShareVault { amount_in: AmountIn, recipient: Address },
}

#[derive(BorshSerialize, BorshDeserialize)]
struct EngineCallArgs {
    amount_in: AmountIn,
    recipient: Address,
}

impl EngineCall {
    /// Op code byte leading the encoded payload
    pub fn op_code(&self) -> u8 {
        match self {
            Self::EnterShareVault { .. } => engine::OP_ENTER_SHARE_VAULT,
            Self::LeaveShareVault { .. } => engine::OP_LEAVE_SHARE_VAULT,
        }
    }

    /// Encode as `[op_code] ++ borsh(args)`
    pub fn encode(&self) -> Vec<u8> {
        let (Self::EnterShareVault { amount_in, recipient }
        | Self::LeaveShareVault { amount_in, recipient }) = *self;
        let args = borsh::to_vec(&EngineCallArgs { amount_in, recipient }).unwrap_or_default();
        let mut payload = Vec::with_capacity(1 + args.len());
        payload.push(self.op_code());
        payload.extend_from_slice(&args);
        payload
    }

    /// Decode a payload produced by `encode`
    pub fn decode(payload: &[u8]) -> ShareVaultResult<Self> {
        let (op, rest) = payload.split_first().ok_or(ShareVaultError::InvalidPayload)?;
        let args: EngineCallArgs =
            borsh::from_slice(rest).map_err(|_| ShareVaultError::InvalidPayload)?;

        match *op {
            engine::OP_ENTER_SHARE_VAULT => Ok(Self::EnterShareVault {
                amount_in: args.amount_in,
                recipient: args.recipient,
            }),
            engine::OP_LEAVE_SHARE_VAULT => Ok(Self::LeaveShareVault {
                amount_in: args.amount_in,
                recipient: args.recipient,
            }),
            _ => Err(ShareVaultError::InvalidPayload),
        }
    }
}

// ============ Guard Types ============

/// A guarded conversion request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub struct SnwapRequest {
    /// Token moved from the caller to the target
    pub token_in: Address,
    /// Amount of `token_in` to move (0 skips the move)
    pub amount_in: u64,
    /// Account whose `token_out` balance is measured
    pub recipient: Address,
    /// Token whose balance increase is the output
    pub token_out: Address,
    /// Smallest acceptable output
    pub min_amount_out: u64,
    /// Contract receiving the funds and the payload
    pub target: Address,
    /// Opaque call data for the target
    pub payload: Vec<u8>,
}

/// Progress of a guarded request
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub enum SnwapStage {
    #[default]
    Pending,
    FundsMoved,
    TargetInvoked,
    Verified,
}

/// Outcome of a guarded request that passed verification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub struct SnwapReceipt {
    /// Amount of `token_in` moved to the target
    pub amount_in: u64,
    /// Measured increase of the recipient's `token_out` balance
    pub amount_out: u64,
    /// Final stage reached
    pub stage: SnwapStage,
}

// ============ Helper Functions ============

/// Generate a deterministic contract/account address
pub fn derive_address(label: &[u8], nonce: u64) -> Address {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(label);
    hasher.update(nonce.to_le_bytes());
    let result = hasher.finalize();
    let mut address = [0u8; 32];
    address.copy_from_slice(&result);
    address
}
