//! Contract Interfaces
//!
//! Seams between the executor and the components it talks to. The engine
//! is written against `SharePool`; the guard reaches its target through
//! `CallTarget` with an opaque payload.

use crate::errors::ShareVaultResult;
use crate::ledger::Ledger;
use crate::token_ops::TokenHandle;
use crate::types::{Address, PoolSnapshot};

/// A pool that holds an asset reserve and mints/burns shares against it
pub trait SharePool {
    /// Pool contract address (holds the reserve)
    fn address(&self) -> Address;

    /// Share token minted by the pool
    fn share_token(&self) -> TokenHandle;

    /// Asset token backing the shares
    fn underlying_asset(&self) -> TokenHandle;

    /// Outstanding shares
    fn total_supply(&self, ledger: &Ledger) -> ShareVaultResult<u64> {
        self.share_token().total_supply(ledger)
    }

    /// Asset balance held at the pool address
    fn reserve_balance(&self, ledger: &Ledger) -> u64 {
        self.underlying_asset().balance_of(ledger, self.address())
    }

    /// Live `(total_shares, reserve)` pair
    fn snapshot(&self, ledger: &Ledger) -> ShareVaultResult<PoolSnapshot> {
        Ok(PoolSnapshot::new(
            self.total_supply(ledger)?,
            self.reserve_balance(ledger),
        ))
    }

    /// Pull `asset_amount` from `caller` and mint shares to it.
    /// The returned share count is informational only.
    fn enter(
        &self,
        ledger: &mut Ledger,
        caller: Address,
        asset_amount: u64,
    ) -> ShareVaultResult<u64>;

    /// Burn `share_amount` from `caller` and pay out reserve.
    /// The returned asset amount is informational only.
    fn leave(
        &self,
        ledger: &mut Ledger,
        caller: Address,
        share_amount: u64,
    ) -> ShareVaultResult<u64>;
}

/// A contract the guard can route funds and a payload into
pub trait CallTarget {
    /// Address funds are moved to before `invoke`
    fn address(&self) -> Address;

    /// Execute `payload` on behalf of `caller`
    fn invoke(&self, ledger: &mut Ledger, caller: Address, payload: &[u8]) -> ShareVaultResult<()>;
}
