//! Token Operations Module
//!
//! Caller-side handle for a fungible token registered in the ledger.
//! Mirrors the external token interface (balance query, transfer,
//! transfer-from, approve) and turns a `false` result flag into a typed
//! `UnderlyingTransferFailure` where the caller requires success.

use crate::errors::{ShareVaultError, ShareVaultResult};
use crate::ledger::Ledger;
use crate::types::Address;
use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

/// Handle to a token by address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub struct TokenHandle {
    address: Address,
}

impl TokenHandle {
    pub fn new(address: Address) -> Self {
        Self { address }
    }

    /// Token contract address
    pub fn address(&self) -> Address {
        self.address
    }

    pub fn balance_of(&self, ledger: &Ledger, holder: Address) -> u64 {
        ledger.balance_of(self.address, holder)
    }

    pub fn total_supply(&self, ledger: &Ledger) -> ShareVaultResult<u64> {
        ledger.total_supply(self.address)
    }

    pub fn allowance(&self, ledger: &Ledger, owner: Address, spender: Address) -> u64 {
        ledger.allowance(self.address, owner, spender)
    }

    /// Transfer from `caller`; returns the token's success flag
    pub fn transfer(
        &self,
        ledger: &mut Ledger,
        caller: Address,
        to: Address,
        amount: u64,
    ) -> ShareVaultResult<bool> {
        ledger.transfer(self.address, caller, to, amount)
    }

    /// Transfer `from` -> `to` spending `caller`'s allowance; returns the success flag
    pub fn transfer_from(
        &self,
        ledger: &mut Ledger,
        caller: Address,
        from: Address,
        to: Address,
        amount: u64,
    ) -> ShareVaultResult<bool> {
        ledger.transfer_from(self.address, caller, from, to, amount)
    }

    /// Approve `spender` on behalf of `caller`; returns the success flag
    pub fn approve(
        &self,
        ledger: &mut Ledger,
        caller: Address,
        spender: Address,
        amount: u64,
    ) -> ShareVaultResult<bool> {
        ledger.approve(self.address, caller, spender, amount)
    }

    /// Transfer that must succeed
    pub fn safe_transfer(
        &self,
        ledger: &mut Ledger,
        caller: Address,
        to: Address,
        amount: u64,
    ) -> ShareVaultResult<()> {
        let ok = self.transfer(ledger, caller, to, amount)?;
        self.require_success(ok, caller, to, amount)
    }

    /// Transfer-from that must succeed
    pub fn safe_transfer_from(
        &self,
        ledger: &mut Ledger,
        caller: Address,
        from: Address,
        to: Address,
        amount: u64,
    ) -> ShareVaultResult<()> {
        let ok = self.transfer_from(ledger, caller, from, to, amount)?;
        self.require_success(ok, from, to, amount)
    }

    /// Map a `false` flag to `UnderlyingTransferFailure`
    pub fn require_success(
        &self,
        ok: bool,
        from: Address,
        to: Address,
        amount: u64,
    ) -> ShareVaultResult<()> {
        if ok {
            Ok(())
        } else {
            Err(ShareVaultError::UnderlyingTransferFailure {
                token: self.address,
                from,
                to,
                amount,
            })
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
