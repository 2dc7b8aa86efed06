use super::super::*;
use super::ensure_batch_size;
use scrimshaw_types::TokenId;
use std::collections::BTreeMap;

/// Validates a transfer batch against a simulated owner map so chained
/// transfers of the same token within one batch resolve in caller order.
///
/// Authorization accepts the simulated owner directly (a token received
/// earlier in the batch is spendable later in it), and falls back to the
/// collaborator's approval state only while the simulation still agrees with
/// the committed owner.
fn validate_transfers<'x, T, I>(
    tokens: &T,
    caller: &Address,
    pairs: I,
) -> Result<Vec<(Address, Address, TokenId)>, LedgerError>
where
    T: TokenHooks,
    I: Iterator<Item = (Option<&'x Address>, &'x Address, &'x TokenId)>,
{
    let mut simulated: BTreeMap<TokenId, Address> = BTreeMap::new();
    let mut planned = Vec::new();
    for (from, to, token_id) in pairs {
        let actual = tokens.owner_of(token_id).ok_or(LedgerError::NotFound)?;
        let current = simulated.get(token_id).copied().unwrap_or(actual);
        if let Some(from) = from {
            if *from != current {
                return Err(LedgerError::Unauthorized);
            }
        }
        if to.is_zero() {
            return Err(LedgerError::ZeroAddress);
        }
        let authorized = *caller == current
            || (current == actual && tokens.is_approved_or_owner(caller, token_id));
        if !authorized {
            return Err(LedgerError::Unauthorized);
        }
        simulated.insert(*token_id, *to);
        planned.push((current, *to, *token_id));
    }
    Ok(planned)
}

impl<'a, S: State> Layer<'a, S> {
    /// Transfer-from batch. The artifact binding and engraving history ride
    /// with the token: the artifact store is keyed by token id, so nothing
    /// here touches it and the history is preserved across the handover.
    pub(crate) fn handle_transfer_and_save_artifact<
        T: TokenHooks,
        P: PaymentHook,
        U: UpgradeHook,
    >(
        &mut self,
        ext: &mut Externals<'_, T, P, U>,
        caller: &Address,
        froms: &[Address],
        tos: &[Address],
        token_ids: &[TokenId],
    ) -> Result<Vec<Event>, LedgerError> {
        LedgerError::ensure_same_length(froms.len(), tos.len())?;
        LedgerError::ensure_same_length(froms.len(), token_ids.len())?;
        ensure_batch_size(froms.len())?;

        let pairs = froms
            .iter()
            .zip(tos)
            .zip(token_ids)
            .map(|((from, to), token_id)| (Some(from), to, token_id));
        let planned = validate_transfers(&*ext.tokens, caller, pairs)?;
        self.apply_transfers(ext, planned)
    }

    /// Owner/operator batch send: each token moves from its current owner.
    pub(crate) fn handle_transfer_batch<T: TokenHooks, P: PaymentHook, U: UpgradeHook>(
        &mut self,
        ext: &mut Externals<'_, T, P, U>,
        caller: &Address,
        tos: &[Address],
        token_ids: &[TokenId],
    ) -> Result<Vec<Event>, LedgerError> {
        LedgerError::ensure_same_length(tos.len(), token_ids.len())?;
        ensure_batch_size(tos.len())?;

        let pairs = tos
            .iter()
            .zip(token_ids)
            .map(|(to, token_id)| (None, to, token_id));
        let planned = validate_transfers(&*ext.tokens, caller, pairs)?;
        self.apply_transfers(ext, planned)
    }

    fn apply_transfers<T: TokenHooks, P: PaymentHook, U: UpgradeHook>(
        &mut self,
        ext: &mut Externals<'_, T, P, U>,
        planned: Vec<(Address, Address, TokenId)>,
    ) -> Result<Vec<Event>, LedgerError> {
        let mut events = Vec::with_capacity(planned.len());
        for (from, to, token_id) in planned {
            ext.tokens.record_transfer(&from, &to, &token_id)?;
            events.push(Event::Transfer { from, to, token_id });
        }
        Ok(events)
    }
}
