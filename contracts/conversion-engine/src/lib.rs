//! Conversion Engine Contract
//!
//! Stateless executor that converts between a base asset and the shares of
//! a proportional pool. Callers (normally the slippage guard) park funds on
//! the engine and then ask it to enter or leave the pool on behalf of a
//! recipient.
//!
//! ## Key Features
//!
//! - **Stateless**: holds only the asset and pool handles plus a static
//!   forwarding policy; nothing is persisted between calls
//! - **Delta accounting**: the output of a pool call is the change in the
//!   engine's own balance across that call, never the pool's reported value
//! - **No dust**: everything received in a call is forwarded out in the
//!   same call, so the next unrelated caller finds nothing to take
//! - **Full-balance sentinel**: `AmountIn::FullBalance` converts whatever
//!   the engine currently holds of the input token
//! - **Quote parity**: quotes use the same floor math as the pool
//!
//! ## Flow
//!
//! ```text
//! enter_share_vault:
//!   asset (on engine) -> pool.enter -> shares (delta) -> recipient
//!
//! leave_share_vault:
//!   shares (on engine) -> pool.leave -> asset (delta) -> recipient
//! ```

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

pub mod dispatch;

use sharevault_common::{
    constants::token::MAX_ALLOWANCE,
    errors::{ShareVaultError, ShareVaultResult},
    events::ShareVaultEvent,
    interfaces::SharePool,
    ledger::Ledger,
    math::{assets_for_shares, balance_delta, shares_for_assets},
    token_ops::TokenHandle,
    types::{Address, AmountIn, ForwardPolicy, ZERO_ADDRESS},
};

// ============ Engine Config ============

/// Static configuration fixed at deployment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub struct EngineConfig {
    /// How much of a measured delta is forwarded to the recipient
    pub policy: ForwardPolicy,
}

impl EngineConfig {
    pub fn with_policy(policy: ForwardPolicy) -> Self {
        Self { policy }
    }
}

// ============ Conversion Engine ============

/// Conversion engine bound to one pool
#[derive(Debug, Clone)]
pub struct ConversionEngine<P: SharePool> {
    address: Address,
    asset: TokenHandle,
    pool: P,
    config: EngineConfig,
}

impl<P: SharePool> ConversionEngine<P> {
    /// Deploy with the default full-delta forwarding policy
    pub fn deploy(ledger: &mut Ledger, address: Address, pool: P) -> ShareVaultResult<Self> {
        Self::deploy_with_config(ledger, address, pool, EngineConfig::default())
    }

    /// Deploy and grant the pool its one-time unlimited allowance
    pub fn deploy_with_config(
        ledger: &mut Ledger,
        address: Address,
        pool: P,
        config: EngineConfig,
    ) -> ShareVaultResult<Self> {
        if address == ZERO_ADDRESS {
            return Err(ShareVaultError::InvalidAddress {
                reason: "engine cannot be the zero address",
            });
        }

        let asset = pool.underlying_asset();
        let pool_address = pool.address();

        ledger.atomic(|ledger| {
            let ok = asset.approve(ledger, address, pool_address, MAX_ALLOWANCE)?;
            asset.require_success(ok, address, pool_address, MAX_ALLOWANCE)?;

            ledger.emit(ShareVaultEvent::EngineDeployed {
                engine: address,
                asset: asset.address(),
                pool: pool_address,
                block_height: ledger.block_height(),
            });
            Ok(())
        })?;

        Ok(Self {
            address,
            asset,
            pool,
            config,
        })
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn asset(&self) -> TokenHandle {
        self.asset
    }

    pub fn share_token(&self) -> TokenHandle {
        self.pool.share_token()
    }

    pub fn pool(&self) -> &P {
        &self.pool
    }

    pub fn config(&self) -> EngineConfig {
        self.config
    }

    // ============ Quotes ============

    /// Shares `enter_share_vault(amount_in)` would mint against live pool state
    pub fn quote_enter_share_vault(
        &self,
        ledger: &Ledger,
        amount_in: u64,
    ) -> ShareVaultResult<u64> {
        let snapshot = self.pool.snapshot(ledger)?;
        shares_for_assets(amount_in, snapshot.total_shares, snapshot.reserve)
    }

    /// Asset `leave_share_vault(shares_in)` would release against live pool state
    pub fn quote_leave_share_vault(
        &self,
        ledger: &Ledger,
        shares_in: u64,
    ) -> ShareVaultResult<u64> {
        let snapshot = self.pool.snapshot(ledger)?;
        assets_for_shares(shares_in, snapshot.total_shares, snapshot.reserve)
    }

    /// Instantaneous `total_shares / reserve` scaled by 1e18, `None` in bootstrap
    pub fn pool_ratio(&self, ledger: &Ledger) -> ShareVaultResult<Option<u128>> {
        Ok(self.pool.snapshot(ledger)?.ratio())
    }

    // ============ Conversions ============

    /// Deposit asset held by the engine and forward the minted shares
    pub fn enter_share_vault(
        &self,
        ledger: &mut Ledger,
        amount_in: AmountIn,
        recipient: Address,
    ) -> ShareVaultResult<()> {
        self.require_external_recipient(recipient)?;
        let shares = self.pool.share_token();

        ledger.atomic(|ledger| {
            let held = self.asset.balance_of(ledger, self.address);
            let amount = amount_in.resolve(self.asset.address(), held)?;

            // Nothing else may touch the engine's share balance between these reads
            let before = shares.balance_of(ledger, self.address);
            self.pool.enter(ledger, self.address, amount)?;
            let after = shares.balance_of(ledger, self.address);

            let minted = balance_delta(before, after)?;
            let forwarded = self.config.policy.forwardable(minted);
            shares.safe_transfer(ledger, self.address, recipient, forwarded)?;

            ledger.emit(ShareVaultEvent::VaultEntered {
                engine: self.address,
                recipient,
                asset_in: amount,
                shares_out: forwarded,
                block_height: ledger.block_height(),
            });
            Ok(())
        })
    }

    /// Redeem shares held by the engine and forward the released asset
    pub fn leave_share_vault(
        &self,
        ledger: &mut Ledger,
        amount_in: AmountIn,
        recipient: Address,
    ) -> ShareVaultResult<()> {
        self.require_external_recipient(recipient)?;
        let shares = self.pool.share_token();

        ledger.atomic(|ledger| {
            let held = shares.balance_of(ledger, self.address);
            let amount = amount_in.resolve(shares.address(), held)?;

            let before = self.asset.balance_of(ledger, self.address);
            self.pool.leave(ledger, self.address, amount)?;
            let after = self.asset.balance_of(ledger, self.address);

            let released = balance_delta(before, after)?;
            let forwarded = self.config.policy.forwardable(released);
            self.asset.safe_transfer(ledger, self.address, recipient, forwarded)?;

            ledger.emit(ShareVaultEvent::VaultLeft {
                engine: self.address,
                recipient,
                shares_in: amount,
                asset_out: forwarded,
                block_height: ledger.block_height(),
            });
            Ok(())
        })
    }

    /// Output forwarded to the engine itself would stay on it
    fn require_external_recipient(&self, recipient: Address) -> ShareVaultResult<()> {
        if recipient == self.address {
            return Err(ShareVaultError::InvalidAddress {
                reason: "recipient cannot be the engine",
            });
        }
        Ok(())
    }
}

// ============ Tests ============
