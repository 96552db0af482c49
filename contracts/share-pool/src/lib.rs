//! Share Pool Contract
//!
//! Holds a reserve of the base asset and issues proportional shares.
//! Entering mints `floor(amount * S / R)` shares (1:1 while the pool is
//! empty); leaving burns shares for `floor(shares * R / S)` of the reserve.
//!
//! ## Ratio Skew
//!
//! Anyone can transfer asset straight to the pool address. That raises
//! `R` without minting shares and lowers what the next depositor gets.
//! Callers that are sensitive to this must wrap their conversion in the
//! slippage guard.

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

use sharevault_common::{
    errors::{ShareVaultError, ShareVaultResult},
    events::ShareVaultEvent,
    interfaces::SharePool,
    ledger::{Ledger, TokenConfig},
    math::{assets_for_shares, shares_for_assets},
    token_ops::TokenHandle,
    types::{Address, ZERO_ADDRESS},
};

// ============ Share Pool ============

/// Proportional share pool backed by ledger balances
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub struct ProportionalPool {
    address: Address,
    asset: TokenHandle,
    shares: TokenHandle,
}

impl ProportionalPool {
    /// Deploy a pool at `address` over `asset`, registering `share_token`
    /// with the pool as its only minter.
    pub fn deploy(
        ledger: &mut Ledger,
        address: Address,
        asset: Address,
        share_token: Address,
        share_decimals: u8,
    ) -> ShareVaultResult<Self> {
        if address == ZERO_ADDRESS {
            return Err(ShareVaultError::InvalidAddress {
                reason: "pool cannot be the zero address",
            });
        }
        if !ledger.token_exists(asset) {
            return Err(ShareVaultError::TokenNotFound { token: asset });
        }

        ledger.create_token(
            share_token,
            TokenConfig::new(address).with_decimals(share_decimals),
        )?;

        Ok(Self {
            address,
            asset: TokenHandle::new(asset),
            shares: TokenHandle::new(share_token),
        })
    }

    /// Attach to a pool whose share token is already registered
    pub fn at(address: Address, asset: Address, share_token: Address) -> Self {
        Self {
            address,
            asset: TokenHandle::new(asset),
            shares: TokenHandle::new(share_token),
        }
    }
}

impl SharePool for ProportionalPool {
    fn address(&self) -> Address {
        self.address
    }

    fn share_token(&self) -> TokenHandle {
        self.shares
    }

    fn underlying_asset(&self) -> TokenHandle {
        self.asset
    }

    fn enter(
        &self,
        ledger: &mut Ledger,
        caller: Address,
        asset_amount: u64,
    ) -> ShareVaultResult<u64> {
        ledger.atomic(|ledger| {
            // Ratio is read before anything moves
            let snapshot = self.snapshot(ledger)?;
            let minted = shares_for_assets(asset_amount, snapshot.total_shares, snapshot.reserve)?;

            ledger.mint(self.shares.address(), self.address, caller, minted)?;
            self.asset
                .safe_transfer_from(ledger, self.address, caller, self.address, asset_amount)?;

            ledger.emit(ShareVaultEvent::PoolEntered {
                pool: self.address,
                account: caller,
                asset_in: asset_amount,
                shares_minted: minted,
                block_height: ledger.block_height(),
            });
            Ok(minted)
        })
    }

    fn leave(
        &self,
        ledger: &mut Ledger,
        caller: Address,
        share_amount: u64,
    ) -> ShareVaultResult<u64> {
        ledger.atomic(|ledger| {
            let snapshot = self.snapshot(ledger)?;
            if snapshot.total_shares == 0 {
                return Err(ShareVaultError::EmptyPool { pool: self.address });
            }
            let released =
                assets_for_shares(share_amount, snapshot.total_shares, snapshot.reserve)?;

            ledger.burn(self.shares.address(), self.address, caller, share_amount)?;
            self.asset.safe_transfer(ledger, self.address, caller, released)?;

            ledger.emit(ShareVaultEvent::PoolLeft {
                pool: self.address,
                account: caller,
                shares_burned: share_amount,
                asset_out: released,
                block_height: ledger.block_height(),
            });
            Ok(released)
        })
    }
}

// ============ Tests ============
