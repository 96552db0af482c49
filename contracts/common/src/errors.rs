//! Error Types for the ShareVault Executor
//!
//! Typed errors carry the structured payload a caller needs to diagnose
//! an aborted operation. Every failure is terminal for the enclosing
//! atomic operation: the ledger rolls back and only the error survives.

use crate::types::Address;

/// Result type alias for ShareVault operations
pub type ShareVaultResult<T> = Result<T, ShareVaultError>;

/// Main error enum for all executor, pool, guard and ledger errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShareVaultError {
    // ============ Conversion Engine Errors ============
    /// The full-balance sentinel resolved to nothing usable
    InsufficientFunds { token: Address, available: u64 },

    /// A token transfer or transfer-from returned a failure flag
    UnderlyingTransferFailure {
        token: Address,
        from: Address,
        to: Address,
        amount: u64,
    },

    /// Call payload could not be decoded
    InvalidPayload,

    // ============ Slippage Guard Errors ============
    /// Measured output fell below the requested minimum.
    /// Carries the output token and the amount actually achieved.
    MinimalOutputBalanceViolation {
        token: Address,
        actual_amount_out: u64,
    },

    /// Request target does not match the invoked call target
    TargetMismatch { expected: Address, actual: Address },

    // ============ Share Pool Errors ============
    /// Redemption against a pool with no outstanding shares
    EmptyPool { pool: Address },

    // ============ Ledger Errors ============
    /// Token is not registered in the ledger
    TokenNotFound { token: Address },

    /// Token address is already registered
    TokenAlreadyExists { token: Address },

    /// Holder balance too small
    InsufficientBalance { available: u64, requested: u64 },

    /// Spender allowance too small
    InsufficientAllowance { available: u64, requested: u64 },

    /// Transfer aborted by a reverting token
    TransferFailed { token: Address, from: Address, to: Address, amount: u64 },

    /// Mint not authorized
    MintUnauthorized { caller: Address },

    /// Burn not authorized
    BurnUnauthorized { caller: Address },

    // ============ Amount Errors ============
    /// Zero amount not allowed
    ZeroAmount,

    // ============ Math Errors ============
    /// Arithmetic overflow occurred
    Overflow,

    /// Arithmetic underflow occurred
    Underflow,

    /// Division by zero
    DivisionByZero,

    // ============ Input Validation Errors ============
    /// Invalid address (e.g., zero address)
    InvalidAddress {
        /// Description of why the address is invalid
        reason: &'static str,
    },
}

impl ShareVaultError {
    /// Returns a human-readable error code for logging/debugging
    pub fn code(&self) -> &'static str {
        match self {
            Self::InsufficientFunds { .. } => "E200_INSUFFICIENT_FUNDS",
            Self::UnderlyingTransferFailure { .. } => "E201_UNDERLYING_TRANSFER",
            Self::InvalidPayload => "E203_INVALID_PAYLOAD",
            Self::MinimalOutputBalanceViolation { .. } => "E210_MIN_OUTPUT",
            Self::TargetMismatch { .. } => "E211_TARGET_MISMATCH",
            Self::EmptyPool { .. } => "E220_EMPTY_POOL",
            Self::TokenNotFound { .. } => "E230_TOKEN_NOT_FOUND",
            Self::TokenAlreadyExists { .. } => "E231_TOKEN_EXISTS",
            Self::InsufficientBalance { .. } => "E232_INSUFFICIENT_BALANCE",
            Self::InsufficientAllowance { .. } => "E233_INSUFFICIENT_ALLOWANCE",
            Self::TransferFailed { .. } => "E234_TRANSFER_FAILED",
            Self::MintUnauthorized { .. } => "E235_MINT_UNAUTH",
            Self::BurnUnauthorized { .. } => "E236_BURN_UNAUTH",
            Self::ZeroAmount => "E240_ZERO_AMOUNT",
            Self::Overflow => "E250_OVERFLOW",
            Self::Underflow => "E251_UNDERFLOW",
            Self::DivisionByZero => "E252_DIV_ZERO",
            Self::InvalidAddress { .. } => "E260_INVALID_ADDRESS",
        }
    }

    /// Returns true if this error is recoverable (user can fix it)
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::InsufficientFunds { .. } => true, // Fund the engine first
            Self::InsufficientBalance { .. } => true,
            Self::InsufficientAllowance { .. } => true, // Approve the spender
            Self::MinimalOutputBalanceViolation { .. } => true, // Retry with a fresh quote
            _ => false,
        }
    }
}
