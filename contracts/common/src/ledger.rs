//! Journaled Token Ledger
//!
//! Multi-token balance, allowance and supply accounting with an undo
//! journal. `atomic` brackets a unit of work: if it returns an error,
//! every write made since the checkpoint is undone and the events it
//! emitted are dropped, so callers never observe partial effects.
//!
//! ## Token Semantics
//!
//! - **Zero amounts**: transfers and mints of 0 are legal
//! - **Infinite allowance**: `MAX_ALLOWANCE` is never decremented
//! - **Minter-only supply**: only a token's minter can mint or burn
//! - **Failure modes**: `Revert` tokens abort with a typed error,
//!   `ReturnFalse` tokens report failure through the returned flag

use crate::constants::token::{DEFAULT_DECIMALS, MAX_ALLOWANCE};
use crate::errors::{ShareVaultError, ShareVaultResult};
use crate::events::{EventLog, ShareVaultEvent};
use crate::types::{Address, ZERO_ADDRESS};
use crate::{BTreeMap, Vec};
use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

// ============================================================================
// Types
// ============================================================================

/// How a token reports a failed transfer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub enum FailureMode {
    /// Abort the call with a typed error
    #[default]
    Revert,
    /// Return `false` and leave balances untouched
    ReturnFalse,
}

/// Registration parameters for a token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub struct TokenConfig {
    /// Only address allowed to mint and burn
    pub minter: Address,
    /// Display decimals
    pub decimals: u8,
    /// Failure reporting style
    pub failure_mode: FailureMode,
}

impl TokenConfig {
    /// Reverting token with default decimals
    pub fn new(minter: Address) -> Self {
        Self {
            minter,
            decimals: DEFAULT_DECIMALS,
            failure_mode: FailureMode::Revert,
        }
    }

    pub fn with_decimals(mut self, decimals: u8) -> Self {
        self.decimals = decimals;
        self
    }

    pub fn with_failure_mode(mut self, failure_mode: FailureMode) -> Self {
        self.failure_mode = failure_mode;
        self
    }
}

#[derive(Debug, Clone)]
struct TokenRecord {
    config: TokenConfig,
    total_supply: u64,
    paused: bool,
}

#[derive(Debug, Clone)]
enum JournalEntry {
    TokenCreated { token: Address },
    Balance { token: Address, holder: Address, previous: u64 },
    Allowance { token: Address, owner: Address, spender: Address, previous: u64 },
    Supply { token: Address, previous: u64 },
    Paused { token: Address, previous: bool },
}

// ============================================================================
// Ledger
// ============================================================================

/// Token state for every registered token plus the undo journal
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    tokens: BTreeMap<Address, TokenRecord>,
    balances: BTreeMap<(Address, Address), u64>,
    allowances: BTreeMap<(Address, Address, Address), u64>,
    journal: Vec<JournalEntry>,
    depth: u32,
    events: EventLog,
    block_height: u64,
}

impl Ledger {
    /// Create an empty ledger at block 0
    pub fn new() -> Self {
        Self::default()
    }

    /// Current block height used to stamp events
    pub fn block_height(&self) -> u64 {
        self.block_height
    }

    /// Move the block height forward
    pub fn advance_block(&mut self, blocks: u64) {
        self.block_height = self.block_height.saturating_add(blocks);
    }

    /// Events emitted and committed so far
    pub fn events(&self) -> &EventLog {
        &self.events
    }

    /// Emit an event stamped by the caller
    pub fn emit(&mut self, event: ShareVaultEvent) {
        self.events.emit(event);
    }

    /// True while inside an atomic boundary
    pub fn in_atomic(&self) -> bool {
        self.depth > 0
    }

    // ============ Atomic Execution ============

    /// Run `f` as one all-or-nothing unit.
    ///
    /// Boundaries nest: an inner failure rolls back only the inner work,
    /// and the error then usually propagates and unwinds the outer one too.
    pub fn atomic<T, F>(&mut self, f: F) -> ShareVaultResult<T>
    where
        F: FnOnce(&mut Self) -> ShareVaultResult<T>,
    {
        let checkpoint = self.journal.len();
        let events_checkpoint = self.events.len();

        self.depth += 1;
        let result = f(self);
        self.depth -= 1;

        match result {
            Ok(value) => {
                if self.depth == 0 {
                    self.journal.clear();
                }
                Ok(value)
            }
            Err(err) => {
                self.rollback(checkpoint);
                self.events.truncate(events_checkpoint);
                Err(err)
            }
        }
    }

    fn rollback(&mut self, checkpoint: usize) {
        while self.journal.len() > checkpoint {
            let Some(entry) = self.journal.pop() else {
                break;
            };
            match entry {
                JournalEntry::TokenCreated { token } => {
                    self.tokens.remove(&token);
                }
                JournalEntry::Balance { token, holder, previous } => {
                    Self::put(&mut self.balances, (token, holder), previous);
                }
                JournalEntry::Allowance { token, owner, spender, previous } => {
                    Self::put(&mut self.allowances, (token, owner, spender), previous);
                }
                JournalEntry::Supply { token, previous } => {
                    if let Some(record) = self.tokens.get_mut(&token) {
                        record.total_supply = previous;
                    }
                }
                JournalEntry::Paused { token, previous } => {
                    if let Some(record) = self.tokens.get_mut(&token) {
                        record.paused = previous;
                    }
                }
            }
        }
    }

    fn record(&mut self, entry: JournalEntry) {
        if self.depth > 0 {
            self.journal.push(entry);
        }
    }

    fn put<K: Ord>(map: &mut BTreeMap<K, u64>, key: K, value: u64) {
        if value == 0 {
            map.remove(&key);
        } else {
            map.insert(key, value);
        }
    }

    fn write_balance(&mut self, token: Address, holder: Address, value: u64) {
        let previous = self.balance_of(token, holder);
        self.record(JournalEntry::Balance { token, holder, previous });
        Self::put(&mut self.balances, (token, holder), value);
    }

    fn write_allowance(&mut self, token: Address, owner: Address, spender: Address, value: u64) {
        let previous = self.allowance(token, owner, spender);
        self.record(JournalEntry::Allowance { token, owner, spender, previous });
        Self::put(&mut self.allowances, (token, owner, spender), value);
    }

    fn write_supply(&mut self, token: Address, value: u64) -> ShareVaultResult<()> {
        let record = self
            .tokens
            .get_mut(&token)
            .ok_or(ShareVaultError::TokenNotFound { token })?;
        let previous = record.total_supply;
        record.total_supply = value;
        self.record(JournalEntry::Supply { token, previous });
        Ok(())
    }

    // ============ Token Registry ============

    /// Register a new token with zero supply
    pub fn create_token(&mut self, token: Address, config: TokenConfig) -> ShareVaultResult<()> {
        if token == ZERO_ADDRESS {
            return Err(ShareVaultError::InvalidAddress {
                reason: "token cannot be the zero address",
            });
        }
        if self.tokens.contains_key(&token) {
            return Err(ShareVaultError::TokenAlreadyExists { token });
        }

        self.tokens.insert(
            token,
            TokenRecord {
                config,
                total_supply: 0,
                paused: false,
            },
        );
        self.record(JournalEntry::TokenCreated { token });

        self.events.emit(ShareVaultEvent::TokenCreated {
            token,
            minter: config.minter,
            decimals: config.decimals,
            block_height: self.block_height,
        });
        Ok(())
    }

    fn token(&self, token: Address) -> ShareVaultResult<&TokenRecord> {
        self.tokens
            .get(&token)
            .ok_or(ShareVaultError::TokenNotFound { token })
    }

    /// True if `token` is registered
    pub fn token_exists(&self, token: Address) -> bool {
        self.tokens.contains_key(&token)
    }

    /// Registration parameters of `token`
    pub fn token_config(&self, token: Address) -> ShareVaultResult<TokenConfig> {
        Ok(self.token(token)?.config)
    }

    /// Total supply of `token`
    pub fn total_supply(&self, token: Address) -> ShareVaultResult<u64> {
        Ok(self.token(token)?.total_supply)
    }

    /// Whether transfers of `token` are currently refused
    pub fn is_paused(&self, token: Address) -> ShareVaultResult<bool> {
        Ok(self.token(token)?.paused)
    }

    /// Pause or resume transfers of `token`
    pub fn set_paused(&mut self, token: Address, paused: bool) -> ShareVaultResult<()> {
        let record = self
            .tokens
            .get_mut(&token)
            .ok_or(ShareVaultError::TokenNotFound { token })?;
        let previous = record.paused;
        record.paused = paused;
        self.record(JournalEntry::Paused { token, previous });
        Ok(())
    }

    // ============ Balances & Allowances ============

    /// Balance of `holder` in `token` (0 for unknown tokens or holders)
    pub fn balance_of(&self, token: Address, holder: Address) -> u64 {
        self.balances.get(&(token, holder)).copied().unwrap_or(0)
    }

    /// Remaining allowance of `spender` over `owner`'s `token`
    pub fn allowance(&self, token: Address, owner: Address, spender: Address) -> u64 {
        self.allowances
            .get(&(token, owner, spender))
            .copied()
            .unwrap_or(0)
    }

    /// Every non-zero holder of `token`
    pub fn holders(&self, token: Address) -> Vec<(Address, u64)> {
        self.balances
            .iter()
            .filter(|((t, _), _)| *t == token)
            .map(|((_, holder), amount)| (*holder, *amount))
            .collect()
    }

    // ============ Token Operations ============

    /// Set `spender`'s allowance over `owner`'s `token`
    pub fn approve(
        &mut self,
        token: Address,
        owner: Address,
        spender: Address,
        amount: u64,
    ) -> ShareVaultResult<bool> {
        self.token(token)?;
        if spender == ZERO_ADDRESS {
            return Err(ShareVaultError::InvalidAddress {
                reason: "cannot approve the zero address",
            });
        }

        self.write_allowance(token, owner, spender, amount);
        self.events.emit(ShareVaultEvent::Approval {
            token,
            owner,
            spender,
            amount,
            block_height: self.block_height,
        });
        Ok(true)
    }

    /// Move `amount` of `token` from `from` to `to`
    pub fn transfer(
        &mut self,
        token: Address,
        from: Address,
        to: Address,
        amount: u64,
    ) -> ShareVaultResult<bool> {
        self.move_balance(token, from, to, amount)
    }

    /// Move `amount` of `token` from `from` to `to` on `spender`'s allowance
    pub fn transfer_from(
        &mut self,
        token: Address,
        spender: Address,
        from: Address,
        to: Address,
        amount: u64,
    ) -> ShareVaultResult<bool> {
        let failure_mode = self.token(token)?.config.failure_mode;
        let allowed = self.allowance(token, from, spender);
        if allowed < amount {
            return self.reject(
                failure_mode,
                token,
                from,
                to,
                amount,
                ShareVaultError::InsufficientAllowance {
                    available: allowed,
                    requested: amount,
                },
            );
        }

        if !self.move_balance(token, from, to, amount)? {
            return Ok(false);
        }

        if allowed != MAX_ALLOWANCE {
            self.write_allowance(token, from, spender, allowed - amount);
        }
        Ok(true)
    }

    fn move_balance(
        &mut self,
        token: Address,
        from: Address,
        to: Address,
        amount: u64,
    ) -> ShareVaultResult<bool> {
        let record = self.token(token)?;
        let failure_mode = record.config.failure_mode;

        if to == ZERO_ADDRESS {
            return Err(ShareVaultError::InvalidAddress {
                reason: "cannot transfer to the zero address",
            });
        }

        if record.paused {
            return self.reject(
                failure_mode,
                token,
                from,
                to,
                amount,
                ShareVaultError::TransferFailed { token, from, to, amount },
            );
        }

        let from_balance = self.balance_of(token, from);
        if from_balance < amount {
            return self.reject(
                failure_mode,
                token,
                from,
                to,
                amount,
                ShareVaultError::InsufficientBalance {
                    available: from_balance,
                    requested: amount,
                },
            );
        }

        if from != to {
            let to_balance = self
                .balance_of(token, to)
                .checked_add(amount)
                .ok_or(ShareVaultError::Overflow)?;
            self.write_balance(token, from, from_balance - amount);
            self.write_balance(token, to, to_balance);
        }

        self.events.emit(ShareVaultEvent::Transfer {
            token,
            from,
            to,
            amount,
            block_height: self.block_height,
        });
        Ok(true)
    }

    fn reject(
        &mut self,
        failure_mode: FailureMode,
        token: Address,
        from: Address,
        to: Address,
        amount: u64,
        err: ShareVaultError,
    ) -> ShareVaultResult<bool> {
        match failure_mode {
            FailureMode::Revert => Err(err),
            FailureMode::ReturnFalse => {
                self.events.emit(ShareVaultEvent::TransferRejected {
                    token,
                    from,
                    to,
                    amount,
                    block_height: self.block_height,
                });
                Ok(false)
            }
        }
    }

    /// Create `amount` of `token` for `to` (minter only)
    pub fn mint(
        &mut self,
        token: Address,
        caller: Address,
        to: Address,
        amount: u64,
    ) -> ShareVaultResult<()> {
        let record = self.token(token)?;
        if caller != record.config.minter {
            return Err(ShareVaultError::MintUnauthorized { caller });
        }
        if to == ZERO_ADDRESS {
            return Err(ShareVaultError::InvalidAddress {
                reason: "cannot mint to the zero address",
            });
        }

        let new_supply = record
            .total_supply
            .checked_add(amount)
            .ok_or(ShareVaultError::Overflow)?;
        let new_balance = self
            .balance_of(token, to)
            .checked_add(amount)
            .ok_or(ShareVaultError::Overflow)?;

        self.write_supply(token, new_supply)?;
        self.write_balance(token, to, new_balance);

        self.events.emit(ShareVaultEvent::Mint {
            token,
            to,
            amount,
            new_total_supply: new_supply,
            block_height: self.block_height,
        });
        Ok(())
    }

    /// Destroy `amount` of `from`'s `token` (minter only)
    pub fn burn(
        &mut self,
        token: Address,
        caller: Address,
        from: Address,
        amount: u64,
    ) -> ShareVaultResult<()> {
        let record = self.token(token)?;
        if caller != record.config.minter {
            return Err(ShareVaultError::BurnUnauthorized { caller });
        }

        let balance = self.balance_of(token, from);
        if balance < amount {
            return Err(ShareVaultError::InsufficientBalance {
                available: balance,
                requested: amount,
            });
        }
        let new_supply = record
            .total_supply
            .checked_sub(amount)
            .ok_or(ShareVaultError::Underflow)?;

        self.write_supply(token, new_supply)?;
        self.write_balance(token, from, balance - amount);

        self.events.emit(ShareVaultEvent::Burn {
            token,
            from,
            amount,
            new_total_supply: new_supply,
            block_height: self.block_height,
        });
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventType;

    const TOKEN: Address = [10u8; 32];
    const MINTER: Address = [11u8; 32];
    const ALICE: Address = [1u8; 32];
    const BOB: Address = [2u8; 32];
    const CAROL: Address = [3u8; 32];

    fn ledger_with_token(failure_mode: FailureMode) -> Ledger {
        let mut ledger = Ledger::new();
        ledger
            .create_token(TOKEN, TokenConfig::new(MINTER).with_failure_mode(failure_mode))
            .unwrap();
        ledger.mint(TOKEN, MINTER, ALICE, 1_000).unwrap();
        ledger
    }

    #[test]
    fn test_create_token_twice() {
        let mut ledger = ledger_with_token(FailureMode::Revert);
        let result = ledger.create_token(TOKEN, TokenConfig::new(MINTER));
        assert_eq!(result, Err(ShareVaultError::TokenAlreadyExists { token: TOKEN }));
    }

    #[test]
    fn test_create_token_zero_address() {
        let mut ledger = Ledger::new();
        let result = ledger.create_token(ZERO_ADDRESS, TokenConfig::new(MINTER));
        assert!(matches!(result, Err(ShareVaultError::InvalidAddress { .. })));
    }

    #[test]
    fn test_transfer() {
        let mut ledger = ledger_with_token(FailureMode::Revert);

        assert!(ledger.transfer(TOKEN, ALICE, BOB, 300).unwrap());
        assert_eq!(ledger.balance_of(TOKEN, ALICE), 700);
        assert_eq!(ledger.balance_of(TOKEN, BOB), 300);
        assert_eq!(ledger.total_supply(TOKEN).unwrap(), 1_000);
    }

    #[test]
    fn test_transfer_zero_amount_allowed() {
        let mut ledger = ledger_with_token(FailureMode::Revert);
        assert!(ledger.transfer(TOKEN, BOB, CAROL, 0).unwrap());
        assert_eq!(ledger.balance_of(TOKEN, CAROL), 0);
    }

    #[test]
    fn test_transfer_to_self_keeps_balance() {
        let mut ledger = ledger_with_token(FailureMode::Revert);
        assert!(ledger.transfer(TOKEN, ALICE, ALICE, 400).unwrap());
        assert_eq!(ledger.balance_of(TOKEN, ALICE), 1_000);
    }

    #[test]
    fn test_transfer_insufficient_reverts() {
        let mut ledger = ledger_with_token(FailureMode::Revert);
        let result = ledger.transfer(TOKEN, BOB, ALICE, 1);
        assert_eq!(
            result,
            Err(ShareVaultError::InsufficientBalance { available: 0, requested: 1 })
        );
    }

    #[test]
    fn test_transfer_insufficient_returns_false() {
        let mut ledger = ledger_with_token(FailureMode::ReturnFalse);
        assert!(!ledger.transfer(TOKEN, BOB, ALICE, 1).unwrap());
        assert_eq!(ledger.balance_of(TOKEN, ALICE), 1_000);
        assert_eq!(ledger.events().filter_by_type(EventType::TransferRejected).len(), 1);
    }

    #[test]
    fn test_paused_token() {
        let mut ledger = ledger_with_token(FailureMode::ReturnFalse);
        ledger.set_paused(TOKEN, true).unwrap();
        assert!(!ledger.transfer(TOKEN, ALICE, BOB, 1).unwrap());

        let mut ledger = ledger_with_token(FailureMode::Revert);
        ledger.set_paused(TOKEN, true).unwrap();
        assert!(matches!(
            ledger.transfer(TOKEN, ALICE, BOB, 1),
            Err(ShareVaultError::TransferFailed { .. })
        ));
    }

    #[test]
    fn test_transfer_from_decrements_allowance() {
        let mut ledger = ledger_with_token(FailureMode::Revert);
        ledger.approve(TOKEN, ALICE, BOB, 500).unwrap();

        assert!(ledger.transfer_from(TOKEN, BOB, ALICE, CAROL, 200).unwrap());
        assert_eq!(ledger.allowance(TOKEN, ALICE, BOB), 300);
        assert_eq!(ledger.balance_of(TOKEN, CAROL), 200);

        let result = ledger.transfer_from(TOKEN, BOB, ALICE, CAROL, 301);
        assert_eq!(
            result,
            Err(ShareVaultError::InsufficientAllowance { available: 300, requested: 301 })
        );
    }

    #[test]
    fn test_infinite_allowance_not_decremented() {
        let mut ledger = ledger_with_token(FailureMode::Revert);
        ledger.approve(TOKEN, ALICE, BOB, MAX_ALLOWANCE).unwrap();

        ledger.transfer_from(TOKEN, BOB, ALICE, CAROL, 600).unwrap();
        assert_eq!(ledger.allowance(TOKEN, ALICE, BOB), MAX_ALLOWANCE);
    }

    #[test]
    fn test_failed_transfer_from_keeps_allowance() {
        let mut ledger = ledger_with_token(FailureMode::ReturnFalse);
        ledger.approve(TOKEN, ALICE, BOB, 5_000).unwrap();

        assert!(!ledger.transfer_from(TOKEN, BOB, ALICE, CAROL, 2_000).unwrap());
        assert_eq!(ledger.allowance(TOKEN, ALICE, BOB), 5_000);
    }

    #[test]
    fn test_mint_unauthorized() {
        let mut ledger = ledger_with_token(FailureMode::Revert);
        let result = ledger.mint(TOKEN, ALICE, ALICE, 1);
        assert_eq!(result, Err(ShareVaultError::MintUnauthorized { caller: ALICE }));
    }

    #[test]
    fn test_mint_overflow() {
        let mut ledger = ledger_with_token(FailureMode::Revert);
        let result = ledger.mint(TOKEN, MINTER, BOB, u64::MAX);
        assert_eq!(result, Err(ShareVaultError::Overflow));
    }

    #[test]
    fn test_burn() {
        let mut ledger = ledger_with_token(FailureMode::Revert);
        ledger.burn(TOKEN, MINTER, ALICE, 400).unwrap();
        assert_eq!(ledger.balance_of(TOKEN, ALICE), 600);
        assert_eq!(ledger.total_supply(TOKEN).unwrap(), 600);

        assert!(matches!(
            ledger.burn(TOKEN, ALICE, ALICE, 1),
            Err(ShareVaultError::BurnUnauthorized { .. })
        ));
        assert!(matches!(
            ledger.burn(TOKEN, MINTER, ALICE, 601),
            Err(ShareVaultError::InsufficientBalance { .. })
        ));
    }

    #[test]
    fn test_atomic_commit() {
        let mut ledger = ledger_with_token(FailureMode::Revert);

        ledger
            .atomic(|l| {
                l.transfer(TOKEN, ALICE, BOB, 100)?;
                l.transfer(TOKEN, BOB, CAROL, 40)
            })
            .unwrap();

        assert_eq!(ledger.balance_of(TOKEN, ALICE), 900);
        assert_eq!(ledger.balance_of(TOKEN, BOB), 60);
        assert_eq!(ledger.balance_of(TOKEN, CAROL), 40);
        assert!(!ledger.in_atomic());
    }

    #[test]
    fn test_atomic_rollback_restores_everything() {
        let mut ledger = ledger_with_token(FailureMode::Revert);
        let holders_before = ledger.holders(TOKEN);
        let events_before = ledger.events().len();

        let result: ShareVaultResult<()> = ledger.atomic(|l| {
            l.transfer(TOKEN, ALICE, BOB, 100)?;
            l.approve(TOKEN, BOB, CAROL, 77)?;
            l.mint(TOKEN, MINTER, CAROL, 5)?;
            l.set_paused(TOKEN, true)?;
            l.create_token([12u8; 32], TokenConfig::new(MINTER))?;
            Err(ShareVaultError::ZeroAmount)
        });

        assert_eq!(result, Err(ShareVaultError::ZeroAmount));
        assert_eq!(ledger.holders(TOKEN), holders_before);
        assert_eq!(ledger.allowance(TOKEN, BOB, CAROL), 0);
        assert_eq!(ledger.total_supply(TOKEN).unwrap(), 1_000);
        assert!(!ledger.is_paused(TOKEN).unwrap());
        assert!(!ledger.token_exists([12u8; 32]));
        assert_eq!(ledger.events().len(), events_before);
    }

    #[test]
    fn test_nested_atomic_inner_failure_contained() {
        let mut ledger = ledger_with_token(FailureMode::Revert);

        ledger
            .atomic(|l| {
                l.transfer(TOKEN, ALICE, BOB, 100)?;
                let inner: ShareVaultResult<bool> = l.atomic(|l| {
                    l.transfer(TOKEN, BOB, CAROL, 50)?;
                    l.transfer(TOKEN, CAROL, ALICE, 999)
                });
                assert!(inner.is_err());
                Ok(())
            })
            .unwrap();

        assert_eq!(ledger.balance_of(TOKEN, ALICE), 900);
        assert_eq!(ledger.balance_of(TOKEN, BOB), 100);
        assert_eq!(ledger.balance_of(TOKEN, CAROL), 0);
    }

    #[test]
    fn test_events_stamped_with_block_height() {
        let mut ledger = ledger_with_token(FailureMode::Revert);
        ledger.advance_block(42);
        ledger.transfer(TOKEN, ALICE, BOB, 1).unwrap();

        let last = ledger.events().last().unwrap();
        assert_eq!(last.event_type(), EventType::Transfer);
        assert_eq!(last.block_height(), 42);
    }

    #[test]
    fn test_nested_atomic_outer_failure_undoes_inner_commit() {
        let mut ledger = ledger_with_token(FailureMode::Revert);

        let result: ShareVaultResult<()> = ledger.atomic(|l| {
            l.atomic(|l| l.transfer(TOKEN, ALICE, BOB, 100))?;
            Err(ShareVaultError::Overflow)
        });

        assert!(result.is_err());
        assert_eq!(ledger.balance_of(TOKEN, ALICE), 1_000);
        assert_eq!(ledger.balance_of(TOKEN, BOB), 0);
    }
}
