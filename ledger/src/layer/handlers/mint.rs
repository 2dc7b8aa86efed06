use super::super::*;
use super::ensure_batch_size;
use scrimshaw_types::U256;

impl<'a, S: State> Layer<'a, S> {
    /// Mints `amounts[i]` sequential tokens to `tos[i]`.
    ///
    /// All preconditions are checked before anything mutates; the payment
    /// pull is the first mutation, so an `InsufficientPayment` refusal
    /// leaves the ledger, the token index, and the counter untouched.
    pub(crate) fn handle_mint<T: TokenHooks, P: PaymentHook, U: UpgradeHook>(
        &mut self,
        ext: &mut Externals<'_, T, P, U>,
        caller: &Address,
        amounts: &[U256],
        tos: &[Address],
    ) -> Result<Vec<Event>, LedgerError> {
        LedgerError::ensure_same_length(amounts.len(), tos.len())?;
        ensure_batch_size(amounts.len())?;
        if !ext.mint.minting_enabled {
            return Err(LedgerError::MintingDisabled);
        }
        for to in tos {
            if to.is_zero() {
                return Err(LedgerError::ZeroAddress);
            }
        }

        // Overflowing the 256-bit counter definitionally exceeds any ceiling.
        let mut requested = U256::ZERO;
        for amount in amounts {
            requested = requested
                .checked_add(amount)
                .ok_or(LedgerError::SupplyExceeded)?;
        }
        let new_total = ext
            .mint
            .total_minted
            .checked_add(&requested)
            .ok_or(LedgerError::SupplyExceeded)?;
        if new_total > ext.mint.max_supply {
            return Err(LedgerError::SupplyExceeded);
        }

        let cost = ext
            .mint
            .price
            .checked_mul(&requested)
            .ok_or(LedgerError::InsufficientPayment)?;
        ext.payments
            .pull_payment(caller, &ext.mint.payment_token, &cost)?;

        // Token ids are assigned sequentially from 1; the artifact id is the
        // identity mapping, which keeps token -> artifact injective for free.
        let mut events = Vec::new();
        let mut token_id = ext.mint.total_minted;
        for (amount, to) in amounts.iter().zip(tos) {
            let mut minted = U256::ZERO;
            while minted < *amount {
                token_id = token_id
                    .checked_add(&U256::ONE)
                    .ok_or(LedgerError::SupplyExceeded)?;
                ext.tokens.record_mint(to, token_id);
                self.insert(Key::TokenArtifact(token_id), Value::ArtifactId(token_id));
                events.push(Event::Transfer {
                    from: Address::ZERO,
                    to: *to,
                    token_id,
                });
                minted = minted
                    .checked_add(&U256::ONE)
                    .ok_or(LedgerError::SupplyExceeded)?;
            }
        }
        ext.mint.total_minted = new_total;

        Ok(events)
    }
}
