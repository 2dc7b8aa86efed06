use super::super::*;
use scrimshaw_types::{CodeHash, U256, MAX_URI_LENGTH};

fn ensure_uri_length(uri: &str) -> Result<(), LedgerError> {
    if uri.len() > MAX_URI_LENGTH {
        return Err(LedgerError::OutOfRange {
            index: uri.len() as u32,
            len: MAX_URI_LENGTH as u32,
        });
    }
    Ok(())
}

impl<'a, S: State> Layer<'a, S> {
    pub(crate) fn handle_set_base_uri<T: TokenHooks, P: PaymentHook, U: UpgradeHook>(
        &mut self,
        ext: &mut Externals<'_, T, P, U>,
        caller: &Address,
        new_base_uri: &str,
    ) -> Result<Vec<Event>, LedgerError> {
        ext.require_owner(caller)?;
        ensure_uri_length(new_base_uri)?;
        ext.metadata.base_uri = new_base_uri.to_string();
        Ok(Vec::new())
    }

    pub(crate) fn handle_set_contract_uri<T: TokenHooks, P: PaymentHook, U: UpgradeHook>(
        &mut self,
        ext: &mut Externals<'_, T, P, U>,
        caller: &Address,
        new_contract_uri: &str,
    ) -> Result<Vec<Event>, LedgerError> {
        ext.require_owner(caller)?;
        ensure_uri_length(new_contract_uri)?;
        ext.metadata.contract_uri = new_contract_uri.to_string();
        Ok(Vec::new())
    }

    pub(crate) fn handle_set_mint_price<T: TokenHooks, P: PaymentHook, U: UpgradeHook>(
        &mut self,
        ext: &mut Externals<'_, T, P, U>,
        caller: &Address,
        new_mint_price: &U256,
    ) -> Result<Vec<Event>, LedgerError> {
        ext.require_owner(caller)?;
        ext.mint.price = *new_mint_price;
        Ok(Vec::new())
    }

    pub(crate) fn handle_set_mint_token<T: TokenHooks, P: PaymentHook, U: UpgradeHook>(
        &mut self,
        ext: &mut Externals<'_, T, P, U>,
        caller: &Address,
        new_mint_token: &Address,
    ) -> Result<Vec<Event>, LedgerError> {
        ext.require_owner(caller)?;
        if new_mint_token.is_zero() {
            return Err(LedgerError::ZeroAddress);
        }
        ext.mint.payment_token = *new_mint_token;
        Ok(Vec::new())
    }

    pub(crate) fn handle_set_is_minting<T: TokenHooks, P: PaymentHook, U: UpgradeHook>(
        &mut self,
        ext: &mut Externals<'_, T, P, U>,
        caller: &Address,
        enabled: bool,
    ) -> Result<Vec<Event>, LedgerError> {
        ext.require_owner(caller)?;
        ext.mint.minting_enabled = enabled;
        Ok(Vec::new())
    }

    pub(crate) fn handle_transfer_ownership<T: TokenHooks, P: PaymentHook, U: UpgradeHook>(
        &mut self,
        ext: &mut Externals<'_, T, P, U>,
        caller: &Address,
        new_owner: &Address,
    ) -> Result<Vec<Event>, LedgerError> {
        ext.require_owner(caller)?;
        if new_owner.is_zero() {
            return Err(LedgerError::ZeroAddress);
        }
        let previous_owner = *ext.owner;
        *ext.owner = *new_owner;
        Ok(vec![Event::OwnershipTransferred {
            previous_owner,
            new_owner: *new_owner,
        }])
    }

    /// Installs the zero address as owner, permanently disabling every
    /// owner-gated entry point.
    pub(crate) fn handle_renounce_ownership<T: TokenHooks, P: PaymentHook, U: UpgradeHook>(
        &mut self,
        ext: &mut Externals<'_, T, P, U>,
        caller: &Address,
    ) -> Result<Vec<Event>, LedgerError> {
        ext.require_owner(caller)?;
        let previous_owner = *ext.owner;
        *ext.owner = Address::ZERO;
        Ok(vec![Event::OwnershipTransferred {
            previous_owner,
            new_owner: Address::ZERO,
        }])
    }

    pub(crate) fn handle_upgrade_contract<T: TokenHooks, P: PaymentHook, U: UpgradeHook>(
        &mut self,
        ext: &mut Externals<'_, T, P, U>,
        caller: &Address,
        new_code: &CodeHash,
    ) -> Result<Vec<Event>, LedgerError> {
        ext.require_owner(caller)?;
        if new_code.is_zero() {
            return Err(LedgerError::ZeroAddress);
        }
        ext.upgrades.upgrade(new_code)?;
        *ext.version += 1;
        Ok(vec![Event::ContractUpgraded {
            new_code: *new_code,
        }])
    }
}
