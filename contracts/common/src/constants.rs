//! Protocol Constants
//!
//! Static configuration for the ShareVault executor. Runtime knobs live in
//! the engine's `EngineConfig`; everything here is fixed at compile time.

/// Token defaults
pub mod token {
    /// Decimals used when a token is registered without an explicit value
    pub const DEFAULT_DECIMALS: u8 = 18;

    /// Allowance value treated as infinite (never decremented)
    pub const MAX_ALLOWANCE: u64 = u64::MAX;
}

/// Exchange ratio reporting
pub mod ratio {
    /// Fixed-point scale for `totalShares / reserve` reports (1e18)
    pub const RATIO_PRECISION: u128 = 1_000_000_000_000_000_000;
}

/// Conversion engine configuration
pub mod engine {
    /// Units kept back by the alternate withhold-one-unit forwarding policy
    pub const WITHHELD_UNIT: u64 = 1;

    /// Payload op code: deposit asset, forward shares
    pub const OP_ENTER_SHARE_VAULT: u8 = 0x01;

    /// Payload op code: redeem shares, forward asset
    pub const OP_LEAVE_SHARE_VAULT: u8 = 0x02;
}

/// Domain labels for deterministic address derivation
pub mod addresses {
    /// Label for asset token deployments
    pub const ASSET_TOKEN_LABEL: &[u8] = b"sharevault/asset-token";

    /// Label for share token deployments
    pub const SHARE_TOKEN_LABEL: &[u8] = b"sharevault/share-token";

    /// Label for share pool deployments
    pub const SHARE_POOL_LABEL: &[u8] = b"sharevault/share-pool";

    /// Label for conversion engine deployments
    pub const ENGINE_LABEL: &[u8] = b"sharevault/conversion-engine";

    /// Label for slippage guard deployments
    pub const GUARD_LABEL: &[u8] = b"sharevault/slippage-guard";
}
