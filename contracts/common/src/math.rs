//! Mathematical Utilities for the ShareVault Executor
//!
//! Floor-rounded share/asset conversion shared by the pool and the
//! engine's quotes. Both sides call the same functions so a quote and the
//! conversion executed right after it agree bit-for-bit.

use crate::errors::{ShareVaultError, ShareVaultResult};

/// Shares minted for depositing `assets`
///
/// shares = floor(assets * total_shares / reserve), or `assets` 1:1 when
/// either side of the pool is empty.
///
/// # Arguments
/// * `assets` - Asset amount entering the pool
/// * `total_shares` - Outstanding shares before the deposit
/// * `reserve` - Pool asset balance before the deposit
pub fn shares_for_assets(assets: u64, total_shares: u64, reserve: u64) -> ShareVaultResult<u64> {
    if total_shares == 0 || reserve == 0 {
        return Ok(assets);
    }

    mul_div_floor(assets, total_shares, reserve)
}

/// Assets released for redeeming `shares`
///
/// assets = floor(shares * reserve / total_shares), or 0 when no shares exist.
pub fn assets_for_shares(shares: u64, total_shares: u64, reserve: u64) -> ShareVaultResult<u64> {
    if total_shares == 0 {
        return Ok(0);
    }

    mul_div_floor(shares, reserve, total_shares)
}

/// floor(a * b / denominator) with a 128-bit intermediate
pub fn mul_div_floor(a: u64, b: u64, denominator: u64) -> ShareVaultResult<u64> {
    let result = (a as u128)
        .checked_mul(b as u128)
        .ok_or(ShareVaultError::Overflow)?
        .checked_div(denominator as u128)
        .ok_or(ShareVaultError::DivisionByZero)?;

    u64::try_from(result).map_err(|_| ShareVaultError::Overflow)
}

/// Increase between two balance snapshots of the same holder
pub fn balance_delta(before: u64, after: u64) -> ShareVaultResult<u64> {
    after.checked_sub(before).ok_or(ShareVaultError::Underflow)
}
