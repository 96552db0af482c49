//! Payload Dispatch for the Conversion Engine
//!
//! Lets the slippage guard drive the engine through an opaque payload.
//! The first byte is the operation code (see `constants::engine`), the rest
//! is the borsh-encoded argument record:
//!
//! ```text
//! 0x01 ++ borsh(amount_in, recipient)  -> enter_share_vault
//! 0x02 ++ borsh(amount_in, recipient)  -> leave_share_vault
//! ```
//!
//! The guard's caller identity is not needed: the engine only ever spends
//! what already rests on it.

use sharevault_common::{
    errors::ShareVaultResult,
    interfaces::{CallTarget, SharePool},
    ledger::Ledger,
    types::{Address, EngineCall},
};

use crate::ConversionEngine;

impl<P: SharePool> ConversionEngine<P> {
    /// Execute a decoded engine call
    pub fn execute(&self, ledger: &mut Ledger, call: EngineCall) -> ShareVaultResult<()> {
        match call {
            EngineCall::EnterShareVault { amount_in, recipient } => {
                self.enter_share_vault(ledger, amount_in, recipient)
            }
            EngineCall::LeaveShareVault { amount_in, recipient } => {
                self.leave_share_vault(ledger, amount_in, recipient)
            }
        }
    }
}

impl<P: SharePool> CallTarget for ConversionEngine<P> {
    fn address(&self) -> Address {
        ConversionEngine::address(self)
    }

    fn invoke(
        &self,
        ledger: &mut Ledger,
        _caller: Address,
        payload: &[u8],
    ) -> ShareVaultResult<()> {
        let call = EngineCall::decode(payload)?;
        self.execute(ledger, call)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EngineConfig;
    use sharevault_common::constants::{engine::OP_ENTER_SHARE_VAULT, token::MAX_ALLOWANCE};
    use sharevault_common::errors::ShareVaultError;
    use sharevault_common::ledger::TokenConfig;
    use sharevault_common::types::AmountIn;
    use sharevault_pool::ProportionalPool;

    const ASSET: Address = [1u8; 32];
    const SHARES: Address = [2u8; 32];
    const POOL: Address = [3u8; 32];
    const MINTER: Address = [4u8; 32];
    const ENGINE: Address = [5u8; 32];
    const CALLER: Address = [6u8; 32];
    const RECIPIENT: Address = [7u8; 32];

    fn setup() -> (Ledger, ConversionEngine<ProportionalPool>) {
        let mut ledger = Ledger::new();
        ledger.create_token(ASSET, TokenConfig::new(MINTER)).unwrap();
        let pool = ProportionalPool::deploy(&mut ledger, POOL, ASSET, SHARES, 18).unwrap();
        let engine =
            ConversionEngine::deploy_with_config(&mut ledger, ENGINE, pool, EngineConfig::default())
                .unwrap();
        (ledger, engine)
    }

    #[test]
    fn test_invoke_enter_then_leave() {
        let (mut ledger, engine) = setup();
        ledger.mint(ASSET, MINTER, ENGINE, 30).unwrap();

        let enter = EngineCall::EnterShareVault {
            amount_in: AmountIn::FullBalance,
            recipient: RECIPIENT,
        };
        engine.invoke(&mut ledger, CALLER, &enter.encode()).unwrap();
        assert_eq!(ledger.balance_of(SHARES, RECIPIENT), 30);

        ledger.transfer(SHARES, RECIPIENT, ENGINE, 30).unwrap();
        let leave = EngineCall::LeaveShareVault {
            amount_in: AmountIn::Exact(30),
            recipient: RECIPIENT,
        };
        engine.invoke(&mut ledger, CALLER, &leave.encode()).unwrap();
        assert_eq!(ledger.balance_of(ASSET, RECIPIENT), 30);
        assert_eq!(ledger.balance_of(SHARES, ENGINE), 0);
    }

    #[test]
    fn test_invoke_rejects_garbage() {
        let (mut ledger, engine) = setup();
        assert_eq!(
            engine.invoke(&mut ledger, CALLER, &[]),
            Err(ShareVaultError::InvalidPayload)
        );
        assert_eq!(
            engine.invoke(&mut ledger, CALLER, &[OP_ENTER_SHARE_VAULT, 1, 2]),
            Err(ShareVaultError::InvalidPayload)
        );
        assert_eq!(
            engine.invoke(&mut ledger, CALLER, &[0xFF]),
            Err(ShareVaultError::InvalidPayload)
        );
    }

    #[test]
    fn test_target_address() {
        let (ledger, engine) = setup();
        assert_eq!(CallTarget::address(&engine), ENGINE);
        assert_eq!(ledger.allowance(ASSET, ENGINE, POOL), MAX_ALLOWANCE);
    }
}
