//! Slippage Guard Contract
//!
//! Wraps a call into a target contract with a minimum-output check. The
//! guard moves the caller's input funds to the target, runs the payload,
//! and measures how much the recipient's output balance grew. If the growth
//! is below the caller's minimum the whole request is undone.
//!
//! ## Request Lifecycle
//!
//! ```text
//! Pending -> FundsMoved -> TargetInvoked -> Verified   (settled)
//!    \___________\______________\________> rolled back
//! ```
//!
//! ## Key Features
//!
//! - **Measured output**: only the recipient's balance change counts; the
//!   target's own accounting is never consulted
//! - **Diagnostics**: a violation reports the output token and the amount
//!   actually achieved, not the shortfall
//! - **Atomic**: funds movement, target effects and events roll back together

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

use sharevault_common::{
    errors::{ShareVaultError, ShareVaultResult},
    events::ShareVaultEvent,
    interfaces::CallTarget,
    ledger::Ledger,
    token_ops::TokenHandle,
    types::{Address, SnwapReceipt, SnwapRequest, SnwapStage, ZERO_ADDRESS},
};


// ============ Slippage Guard ============

/// Minimum-output guard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub struct SlippageGuard {
    address: Address,
}

impl SlippageGuard {
    pub fn new(address: Address) -> Self {
        Self { address }
    }

    /// Guard address. Callers approve it to spend their input token.
    pub fn address(&self) -> Address {
        self.address
    }

    /// Move `amount_in` of `token_in` from `caller` to `target`, run the
    /// payload, and require `recipient` to gain at least `min_amount_out`
    /// of `token_out`.
    ///
    /// # Errors
    /// * `TargetMismatch` - `request.target` is not the contract passed in
    /// * `MinimalOutputBalanceViolation` - measured output below the minimum
    /// * any error raised while moving funds or inside the target
    pub fn snwap(
        &self,
        ledger: &mut Ledger,
        caller: Address,
        request: &SnwapRequest,
        target: &dyn CallTarget,
    ) -> ShareVaultResult<SnwapReceipt> {
        if request.target != target.address() {
            return Err(ShareVaultError::TargetMismatch {
                expected: request.target,
                actual: target.address(),
            });
        }
        if request.recipient == ZERO_ADDRESS {
            return Err(ShareVaultError::InvalidAddress {
                reason: "recipient cannot be the zero address",
            });
        }

        ledger.atomic(|ledger| {
            let mut execution = Execution::start(ledger, request);
            execution.move_funds(ledger, self.address, caller)?;
            execution.invoke_target(ledger, caller, target)?;
            let receipt = execution.verify(ledger)?;

            ledger.emit(ShareVaultEvent::SnwapSettled {
                guard: self.address,
                caller,
                recipient: request.recipient,
                token_out: request.token_out,
                amount_out: receipt.amount_out,
                min_amount_out: request.min_amount_out,
                block_height: ledger.block_height(),
            });
            Ok(receipt)
        })
    }
}

// ============ Execution State ============

/// One request in flight
struct Execution<'a> {
    request: &'a SnwapRequest,
    stage: SnwapStage,
    balance_before: u64,
}

impl<'a> Execution<'a> {
    fn start(ledger: &Ledger, request: &'a SnwapRequest) -> Self {
        Self {
            request,
            stage: SnwapStage::Pending,
            balance_before: ledger.balance_of(request.token_out, request.recipient),
        }
    }

    fn advance(&mut self, from: SnwapStage, to: SnwapStage) {
        debug_assert_eq!(self.stage, from);
        self.stage = to;
    }

    /// A zero `amount_in` leaves whatever already rests on the target untouched
    fn move_funds(
        &mut self,
        ledger: &mut Ledger,
        guard: Address,
        caller: Address,
    ) -> ShareVaultResult<()> {
        let request = self.request;
        if request.amount_in > 0 {
            TokenHandle::new(request.token_in).safe_transfer_from(
                ledger,
                guard,
                caller,
                request.target,
                request.amount_in,
            )?;
        }
        self.advance(SnwapStage::Pending, SnwapStage::FundsMoved);
        Ok(())
    }

    fn invoke_target(
        &mut self,
        ledger: &mut Ledger,
        caller: Address,
        target: &dyn CallTarget,
    ) -> ShareVaultResult<()> {
        target.invoke(ledger, caller, &self.request.payload)?;
        self.advance(SnwapStage::FundsMoved, SnwapStage::TargetInvoked);
        Ok(())
    }

    fn verify(mut self, ledger: &Ledger) -> ShareVaultResult<SnwapReceipt> {
        let request = self.request;
        let balance_after = ledger.balance_of(request.token_out, request.recipient);
        // A shrinking balance is zero output
        let amount_out = balance_after.saturating_sub(self.balance_before);

        if amount_out < request.min_amount_out {
            return Err(ShareVaultError::MinimalOutputBalanceViolation {
                token: request.token_out,
                actual_amount_out: amount_out,
            });
        }

        self.advance(SnwapStage::TargetInvoked, SnwapStage::Verified);
        Ok(SnwapReceipt {
            amount_in: request.amount_in,
            amount_out,
            stage: self.stage,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sharevault_common::ledger::TokenConfig;

    const TOKEN_IN: Address = [1u8; 32];
    const TOKEN_OUT: Address = [2u8; 32];
    const MINTER: Address = [3u8; 32];
    const GUARD: Address = [4u8; 32];
    const TARGET: Address = [5u8; 32];
    const CALLER: Address = [6u8; 32];
    const RECIPIENT: Address = [7u8; 32];

    /// Mints a fixed amount of `TOKEN_OUT` to `RECIPIENT`
    struct FixedPayout {
        payout: u64,
    }

    impl CallTarget for FixedPayout {
        fn address(&self) -> Address {
            TARGET
        }

        fn invoke(
            &self,
            ledger: &mut Ledger,
            _caller: Address,
            _payload: &[u8],
        ) -> ShareVaultResult<()> {
            ledger.mint(TOKEN_OUT, MINTER, RECIPIENT, self.payout)
        }
    }

    /// Takes output away from the recipient
    struct Clawback;

    impl CallTarget for Clawback {
        fn address(&self) -> Address {
            TARGET
        }

        fn invoke(
            &self,
            ledger: &mut Ledger,
            _caller: Address,
            _payload: &[u8],
        ) -> ShareVaultResult<()> {
            ledger.burn(TOKEN_OUT, MINTER, RECIPIENT, 5)
        }
    }

    /// Keeps whatever it is sent
    struct Sink;

    impl CallTarget for Sink {
        fn address(&self) -> Address {
            TARGET
        }

        fn invoke(
            &self,
            _ledger: &mut Ledger,
            _caller: Address,
            _payload: &[u8],
        ) -> ShareVaultResult<()> {
            Ok(())
        }
    }

    fn setup() -> Ledger {
        let mut ledger = Ledger::new();
        ledger.create_token(TOKEN_IN, TokenConfig::new(MINTER)).unwrap();
        ledger.create_token(TOKEN_OUT, TokenConfig::new(MINTER)).unwrap();
        ledger.mint(TOKEN_IN, MINTER, CALLER, 100).unwrap();
        ledger.approve(TOKEN_IN, CALLER, GUARD, 100).unwrap();
        ledger
    }

    fn request(amount_in: u64, min_amount_out: u64) -> SnwapRequest {
        SnwapRequest {
            token_in: TOKEN_IN,
            amount_in,
            recipient: RECIPIENT,
            token_out: TOKEN_OUT,
            min_amount_out,
            target: TARGET,
            payload: Vec::new(),
        }
    }

    #[test]
    fn test_snwap_settles() {
        let mut ledger = setup();
        let guard = SlippageGuard::new(GUARD);

        let receipt = guard
            .snwap(&mut ledger, CALLER, &request(40, 10), &FixedPayout { payout: 12 })
            .unwrap();

        assert_eq!(receipt.amount_in, 40);
        assert_eq!(receipt.amount_out, 12);
        assert_eq!(receipt.stage, SnwapStage::Verified);
        assert_eq!(ledger.balance_of(TOKEN_IN, TARGET), 40);
        assert_eq!(ledger.allowance(TOKEN_IN, CALLER, GUARD), 60);
    }

    #[test]
    fn test_snwap_violation_reports_actual() {
        let mut ledger = setup();
        let guard = SlippageGuard::new(GUARD);

        let result =
            guard.snwap(&mut ledger, CALLER, &request(40, 13), &FixedPayout { payout: 12 });

        assert_eq!(
            result,
            Err(ShareVaultError::MinimalOutputBalanceViolation {
                token: TOKEN_OUT,
                actual_amount_out: 12,
            })
        );
        assert_eq!(ledger.balance_of(TOKEN_IN, CALLER), 100);
        assert_eq!(ledger.balance_of(TOKEN_OUT, RECIPIENT), 0);
        assert_eq!(ledger.allowance(TOKEN_IN, CALLER, GUARD), 100);
    }

    #[test]
    fn test_snwap_target_mismatch() {
        let mut ledger = setup();
        let guard = SlippageGuard::new(GUARD);
        let mut req = request(40, 0);
        req.target = [9u8; 32];

        let result = guard.snwap(&mut ledger, CALLER, &req, &FixedPayout { payout: 1 });

        assert_eq!(
            result,
            Err(ShareVaultError::TargetMismatch {
                expected: [9u8; 32],
                actual: TARGET,
            })
        );
    }

    #[test]
    fn test_snwap_zero_amount_skips_transfer() {
        let mut ledger = setup();
        let guard = SlippageGuard::new(GUARD);
        let events_before = ledger.events().len();

        let receipt = guard
            .snwap(&mut ledger, CALLER, &request(0, 3), &FixedPayout { payout: 3 })
            .unwrap();

        assert_eq!(receipt.amount_in, 0);
        assert_eq!(ledger.balance_of(TOKEN_IN, CALLER), 100);
        // Mint + SnwapSettled, no transfer
        assert_eq!(ledger.events().len(), events_before + 2);
    }

    #[test]
    fn test_snwap_balance_decrease_is_zero_output() {
        let mut ledger = setup();
        ledger.mint(TOKEN_OUT, MINTER, RECIPIENT, 20).unwrap();
        let guard = SlippageGuard::new(GUARD);

        let receipt = guard.snwap(&mut ledger, CALLER, &request(1, 0), &Clawback).unwrap();
        assert_eq!(receipt.amount_out, 0);

        let result = guard.snwap(&mut ledger, CALLER, &request(1, 1), &Clawback);
        assert_eq!(
            result,
            Err(ShareVaultError::MinimalOutputBalanceViolation {
                token: TOKEN_OUT,
                actual_amount_out: 0,
            })
        );
        assert_eq!(ledger.balance_of(TOKEN_OUT, RECIPIENT), 15);
    }

    #[test]
    fn test_snwap_target_as_recipient_counts_moved_funds() {
        let mut ledger = setup();
        let guard = SlippageGuard::new(GUARD);
        let mut req = request(40, 40);
        req.recipient = TARGET;
        req.token_out = TOKEN_IN;

        // Output is measured from before the funds move
        let receipt = guard.snwap(&mut ledger, CALLER, &req, &Sink).unwrap();
        assert_eq!(receipt.amount_out, 40);
        assert_eq!(ledger.balance_of(TOKEN_IN, TARGET), 40);

        req.min_amount_out = 41;
        let result = guard.snwap(&mut ledger, CALLER, &req, &Sink);
        assert_eq!(
            result,
            Err(ShareVaultError::MinimalOutputBalanceViolation {
                token: TOKEN_IN,
                actual_amount_out: 40,
            })
        );
        assert_eq!(ledger.balance_of(TOKEN_IN, TARGET), 40);
        assert_eq!(ledger.balance_of(TOKEN_IN, CALLER), 60);
        assert_eq!(ledger.allowance(TOKEN_IN, CALLER, GUARD), 60);
    }

    #[test]
    fn test_snwap_without_allowance() {
        let mut ledger = setup();
        let guard = SlippageGuard::new(GUARD);

        let result =
            guard.snwap(&mut ledger, CALLER, &request(101, 0), &FixedPayout { payout: 1 });

        assert!(matches!(result, Err(ShareVaultError::InsufficientAllowance { .. })));
        assert_eq!(ledger.balance_of(TOKEN_OUT, RECIPIENT), 0);
    }

    #[test]
    fn test_snwap_zero_recipient() {
        let mut ledger = setup();
        let guard = SlippageGuard::new(GUARD);
        let mut req = request(1, 0);
        req.recipient = ZERO_ADDRESS;

        let result = guard.snwap(&mut ledger, CALLER, &req, &FixedPayout { payout: 1 });
        assert!(matches!(result, Err(ShareVaultError::InvalidAddress { .. })));
    }
}
