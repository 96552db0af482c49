//! ShareVault Common Library
//!
//! Shared types, constants, math, events and the journaled token ledger
//! used by the share pool, the conversion engine and the slippage guard.
//!
//! ## Execution Model
//!
//! - **Ledger**: every token balance, allowance and supply lives in one
//!   `Ledger`; contracts are stateless handles that read and write it
//! - **Atomicity**: `Ledger::atomic` runs a unit of work against an undo
//!   journal, so a failure anywhere restores every touched value
//! - **Delta accounting**: effects of an external call are measured as the
//!   difference between balance snapshots taken right before and after it
//! - **Floor math**: all share/asset conversion truncates toward zero
//!
//! This crate is `no_std` compatible when built without the `std` feature.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

// Re-export collections for submodules based on feature
#[cfg(not(feature = "std"))]
pub use alloc::{collections::BTreeMap, vec::Vec};
#[cfg(feature = "std")]
pub use std::{collections::BTreeMap, vec::Vec};

pub mod constants;
pub mod errors;
pub mod types;
pub mod math;
pub mod events;
pub mod ledger;
pub mod token_ops;
pub mod interfaces;

// Re-exports for convenience
pub use errors::*;
pub use types::*;
pub use math::*;
pub use events::*;
pub use ledger::{FailureMode, Ledger, TokenConfig};
pub use token_ops::TokenHandle;
pub use interfaces::{CallTarget, SharePool};
