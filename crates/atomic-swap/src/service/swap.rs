//! One-shot swap lifecycle: create, claim, refund.

use super::{short_id, SwapService};
use crate::algorithms::{calculate_swap_id, verify_claim_secret};
use crate::domain::{
    invariant_height_span, invariant_timestamp_window, AtomicSwap, AtomicSwapParams,
    ClaimAtomicSwapRequest, CreateAtomicSwapRequest, RefundAtomicSwapRequest, SwapError, SwapId,
    SwapResult, SwapStatus,
};
use crate::events::SwapEvent;
use crate::ports::{ChainClock, EscrowLedger, EventSink, SwapStore};
use tracing::{debug, info, warn};

impl<L, C, E> SwapService<L, C, E>
where
    L: EscrowLedger,
    C: ChainClock,
    E: EventSink,
{
    /// Create a one-shot swap and escrow its amount.
    pub fn create_atomic_swap<S: SwapStore>(
        &self,
        store: &mut S,
        request: CreateAtomicSwapRequest,
    ) -> SwapResult<SwapId> {
        let coin = request.validate_basic()?.clone();
        let swap_id = calculate_swap_id(
            &request.random_number_hash,
            &request.sender,
            &request.sender_other_chain,
        );

        if store.atomic_swap(&swap_id).is_some() {
            return Err(SwapError::AtomicSwapAlreadyExists(swap_id));
        }
        if store.incremental_swap(&swap_id).is_some() {
            return Err(SwapError::IncrementalSwapAlreadyExists(swap_id));
        }

        let params = self.params();
        let current_height = self.clock.current_height();
        invariant_height_span(request.height_span, &params)?;
        invariant_timestamp_window(
            request.timestamp,
            self.clock.block_time(),
            self.config.timestamp_past_tolerance_secs,
            self.config.timestamp_future_tolerance_secs,
        )?;
        params.validate_active_asset(&coin)?;
        self.proposed_supply(&params, store, &coin)?;
        let expire_height = current_height
            .checked_add(request.height_span)
            .ok_or(SwapError::Overflow("expire height"))?;

        self.ledger.transfer_to_escrow(&request.sender, &coin)?;

        self.ensure_asset_supply(store, &coin.denom);
        let swap = AtomicSwap::new(AtomicSwapParams {
            amount: coin,
            random_number_hash: request.random_number_hash,
            expire_height,
            timestamp: request.timestamp,
            sender: request.sender,
            recipient: request.recipient,
            sender_other_chain: request.sender_other_chain,
        });
        store.set_atomic_swap(swap.clone());

        info!(
            "[swap] Created atomic swap {}... for {} expiring at height {}",
            short_id(&swap_id),
            swap.amount,
            expire_height
        );
        self.events.emit(SwapEvent::created(
            &swap,
            &request.recipient_other_chain,
            &request.expected_income,
        ));
        Ok(swap_id)
    }

    /// Claim an open swap by revealing its secret.
    pub fn claim_atomic_swap<S: SwapStore>(
        &self,
        store: &mut S,
        request: ClaimAtomicSwapRequest,
    ) -> SwapResult<()> {
        request.validate_basic()?;
        debug!("[swap] Claiming atomic swap {}...", short_id(&request.swap_id));

        let swap = store
            .atomic_swap(&request.swap_id)
            .ok_or(SwapError::AtomicSwapNotFound(request.swap_id))?;
        if swap.status != SwapStatus::Open {
            return Err(SwapError::SwapNotOpen(swap.status));
        }
        let current_height = self.clock.current_height();
        if !swap.can_claim(current_height) {
            return Err(SwapError::AtomicSwapHasExpired {
                expire_height: swap.expire_height,
                current_height,
            });
        }

        if let Err(computed) = verify_claim_secret(
            &request.random_number,
            swap.timestamp,
            &swap.sender,
            &swap.sender_other_chain,
            &swap.swap_id,
        ) {
            warn!(
                "[swap] Rejected claim on {}...: secret does not match",
                short_id(&swap.swap_id)
            );
            return Err(SwapError::InvalidClaimSecret {
                computed: hex::encode(computed),
                expected: hex::encode(swap.swap_id),
            });
        }

        let params = self.params();
        let next_supply = self.proposed_supply(&params, store, &swap.amount)?;
        let mut closed = swap.clone();
        closed.complete(current_height)?;

        self.ledger
            .transfer_from_escrow(&closed.recipient, &closed.amount)?;

        self.set_active_supply(store, &closed.amount.denom, next_supply);
        store.set_atomic_swap(closed.clone());

        info!(
            "[swap] Claimed atomic swap {}... at height {}",
            short_id(&closed.swap_id),
            current_height
        );
        self.events.emit(SwapEvent::claimed(
            &closed,
            &request.from,
            request.random_number.reveal_hex(),
        ));
        Ok(())
    }

    /// Refund an expired swap to its sender.
    pub fn refund_atomic_swap<S: SwapStore>(
        &self,
        store: &mut S,
        request: RefundAtomicSwapRequest,
    ) -> SwapResult<()> {
        request.validate_basic()?;
        debug!("[swap] Refunding atomic swap {}...", short_id(&request.swap_id));

        let swap = store
            .atomic_swap(&request.swap_id)
            .ok_or(SwapError::AtomicSwapNotFound(request.swap_id))?;
        if swap.status != SwapStatus::Open {
            return Err(SwapError::SwapNotOpen(swap.status));
        }
        let current_height = self.clock.current_height();
        let mut closed = swap.clone();
        closed.expire(current_height)?;

        self.ledger.transfer_from_escrow(&closed.sender, &closed.amount)?;
        store.set_atomic_swap(closed.clone());

        info!(
            "[swap] Refunded atomic swap {}... at height {}",
            short_id(&closed.swap_id),
            current_height
        );
        self.events.emit(SwapEvent::refunded(&closed, &request.from));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use crate::algorithms::calculate_random_hash;
    use crate::domain::{
        AccAddress, ClaimAtomicSwapRequest, Coin, ErrorKind, RefundAtomicSwapRequest,
        SecureSecret, SwapError, SwapStatus,
    };
    use crate::events::SwapEvent;
    use crate::ports::{ChainClock, SwapStore};
    use std::sync::Arc;

    fn claim(swap_id: [u8; 32], secret: SecureSecret) -> ClaimAtomicSwapRequest {
        ClaimAtomicSwapRequest {
            from: recipient(),
            swap_id,
            random_number: secret,
        }
    }

    fn refund(swap_id: [u8; 32]) -> RefundAtomicSwapRequest {
        RefundAtomicSwapRequest {
            from: sender(),
            swap_id,
        }
    }

    #[test]
    fn test_create_escrows_and_stores_open_swap() {
        let mut h = harness();
        let id = h
            .service
            .create_atomic_swap(&mut h.store, create_request(50_000))
            .unwrap();

        let swap = h.store.atomic_swap(&id).unwrap();
        assert_eq!(swap.status, SwapStatus::Open);
        assert_eq!(swap.expire_height, START_HEIGHT + 100);
        assert_eq!(swap.closed_block, 0);
        assert_eq!(h.ledger.escrow_balance("bnb"), 50_000);
        assert_eq!(h.ledger.balance(&sender(), "bnb"), 950_000);
        // Supply is recorded lazily at zero; it only grows on claim.
        assert_eq!(h.store.asset_supply("bnb").unwrap().current_active_supply, 0);
        match h.events.events().as_slice() {
            [SwapEvent::CreateAtomicSwap { expire_height, .. }] => {
                assert_eq!(*expire_height, START_HEIGHT + 100)
            }
            other => panic!("unexpected events: {:?}", other),
        }
    }

    #[test]
    fn test_create_duplicate_is_conflict() {
        let mut h = harness();
        h.service
            .create_atomic_swap(&mut h.store, create_request(10))
            .unwrap();
        let err = h
            .service
            .create_atomic_swap(&mut h.store, create_request(10))
            .unwrap_err();
        assert!(matches!(err, SwapError::AtomicSwapAlreadyExists(_)));
        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert_eq!(h.ledger.escrow_balance("bnb"), 10);
    }

    #[test]
    fn test_create_duplicate_differs_only_in_case() {
        let mut h = harness();
        let mut first = create_request(10);
        first.sender_other_chain = "bnb1abc".to_string();
        h.service.create_atomic_swap(&mut h.store, first).unwrap();

        let mut second = create_request(10);
        second.sender_other_chain = "BNB1ABC".to_string();
        assert!(matches!(
            h.service.create_atomic_swap(&mut h.store, second),
            Err(SwapError::AtomicSwapAlreadyExists(_))
        ));
    }

    #[test]
    fn test_create_rejects_height_span_outside_window() {
        let mut h = harness();
        for span in [79, 361] {
            let mut req = create_request(10);
            req.height_span = span;
            assert!(matches!(
                h.service.create_atomic_swap(&mut h.store, req),
                Err(SwapError::InvalidHeightSpan { .. })
            ));
        }
        assert!(h.store.atomic_swaps().is_empty());
        assert_eq!(h.ledger.escrow_balance("bnb"), 0);
    }

    #[test]
    fn test_create_timestamp_window() {
        let mut h = harness();
        let cases = [
            (NOW - 15 * 60, true),
            (NOW + 30 * 60, true),
            (NOW - 15 * 60 - 1, false),
            (NOW + 30 * 60 + 1, false),
        ];
        for (timestamp, ok) in cases {
            let mut req = create_request(10);
            req.timestamp = timestamp;
            req.random_number_hash = calculate_random_hash(&secret(), timestamp);
            let result = h.service.create_atomic_swap(&mut h.store, req);
            assert_eq!(result.is_ok(), ok, "timestamp offset {}", timestamp - NOW);
            if !ok {
                assert!(matches!(result, Err(SwapError::InvalidTimestamp { .. })));
            }
        }
    }

    #[test]
    fn test_create_timestamp_follows_block_time() {
        let mut h = harness();
        // An hour of blocks later the original timestamp is stale.
        h.clock.advance_blocks(360);
        assert_eq!(h.clock.block_time(), NOW + 3_600);
        assert!(matches!(
            h.service.create_atomic_swap(&mut h.store, create_request(10)),
            Err(SwapError::InvalidTimestamp { .. })
        ));
    }

    #[test]
    fn test_create_rejects_bad_assets() {
        let mut h = harness();

        let mut req = create_request(10);
        req.amount = vec![Coin::new("inc", 10)];
        assert!(matches!(
            h.service.create_atomic_swap(&mut h.store, req),
            Err(SwapError::AssetNotActive(_))
        ));

        let mut req = create_request(10);
        req.amount = vec![Coin::new("xrp", 10)];
        assert!(matches!(
            h.service.create_atomic_swap(&mut h.store, req),
            Err(SwapError::AssetNotSupported(_))
        ));

        let mut req = create_request(10);
        req.amount.push(Coin::new("inc", 1));
        assert!(matches!(
            h.service.create_atomic_swap(&mut h.store, req),
            Err(SwapError::InvalidAmount(_))
        ));

        let mut req = create_request(10);
        req.recipient = AccAddress::default();
        assert!(matches!(
            h.service.create_atomic_swap(&mut h.store, req),
            Err(SwapError::EmptyAddress("recipient"))
        ));
        assert!(h.store.asset_supplies().is_empty());
    }

    #[test]
    fn test_create_over_limit() {
        let mut h = harness_with_limit(100);
        let err = h
            .service
            .create_atomic_swap(&mut h.store, create_request(101))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::LimitExceeded);
        assert!(h.store.atomic_swaps().is_empty());
    }

    #[test]
    fn test_create_insufficient_funds_writes_nothing() {
        let mut h = harness();
        let err = h
            .service
            .create_atomic_swap(&mut h.store, create_request(2_000_000))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Transfer);
        assert!(h.store.atomic_swaps().is_empty());
        assert!(h.store.asset_supplies().is_empty());
        assert!(h.events.events().is_empty());
    }

    #[test]
    fn test_claim_completes_and_pays_recipient() {
        let mut h = harness();
        let id = h
            .service
            .create_atomic_swap(&mut h.store, create_request(50_000))
            .unwrap();
        h.clock.advance_blocks(10);

        h.service
            .claim_atomic_swap(&mut h.store, claim(id, secret()))
            .unwrap();

        let swap = h.store.atomic_swap(&id).unwrap();
        assert_eq!(swap.status, SwapStatus::Completed);
        assert_eq!(swap.closed_block, START_HEIGHT + 10);
        assert_eq!(h.ledger.balance(&recipient(), "bnb"), 50_000);
        assert_eq!(h.ledger.escrow_balance("bnb"), 0);
        assert_eq!(
            h.store.asset_supply("bnb").unwrap().current_active_supply,
            50_000
        );
        let events = h.events.take();
        assert!(matches!(
            events.last(),
            Some(SwapEvent::ClaimAtomicSwap { random_number, .. }) if random_number == "0f"
        ));
    }

    #[test]
    fn test_claim_at_expire_height_still_allowed() {
        let mut h = harness();
        let id = h
            .service
            .create_atomic_swap(&mut h.store, create_request(10))
            .unwrap();
        h.clock.advance_blocks(100);
        assert!(h
            .service
            .claim_atomic_swap(&mut h.store, claim(id, secret()))
            .is_ok());
    }

    #[test]
    fn test_claim_with_wrong_secret_leaves_swap_open() {
        let mut h = harness();
        let id = h
            .service
            .create_atomic_swap(&mut h.store, create_request(10))
            .unwrap();
        let wrong = SecureSecret::from_slice(&[16]).unwrap();
        let err = h
            .service
            .claim_atomic_swap(&mut h.store, claim(id, wrong))
            .unwrap_err();
        assert!(matches!(err, SwapError::InvalidClaimSecret { .. }));
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(h.store.atomic_swap(&id).unwrap().status, SwapStatus::Open);
        assert_eq!(h.ledger.escrow_balance("bnb"), 10);
    }

    #[test]
    fn test_claim_after_expiry_fails() {
        let mut h = harness();
        let id = h
            .service
            .create_atomic_swap(&mut h.store, create_request(10))
            .unwrap();
        h.clock.advance_blocks(101);
        assert!(matches!(
            h.service.claim_atomic_swap(&mut h.store, claim(id, secret())),
            Err(SwapError::AtomicSwapHasExpired { .. })
        ));
    }

    #[test]
    fn test_claim_unknown_swap() {
        let mut h = harness();
        let err = h
            .service
            .claim_atomic_swap(&mut h.store, claim([1u8; 32], secret()))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_claim_over_limit_keeps_funds_in_escrow() {
        let mut h = harness_with_limit(100);
        let first = h
            .service
            .create_atomic_swap(&mut h.store, create_request(60))
            .unwrap();
        let mut second_req = create_request(60);
        second_req.sender_other_chain = "bnb1other".to_string();
        let second = h
            .service
            .create_atomic_swap(&mut h.store, second_req)
            .unwrap();

        h.service
            .claim_atomic_swap(&mut h.store, claim(first, secret()))
            .unwrap();
        let err = h
            .service
            .claim_atomic_swap(&mut h.store, claim(second, secret()))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::LimitExceeded);
        assert_eq!(h.store.atomic_swap(&second).unwrap().status, SwapStatus::Open);
        assert_eq!(h.ledger.escrow_balance("bnb"), 60);
        assert_eq!(h.store.asset_supply("bnb").unwrap().current_active_supply, 60);
    }

    #[test]
    fn test_refund_before_expiry_not_refundable() {
        let mut h = harness();
        let id = h
            .service
            .create_atomic_swap(&mut h.store, create_request(10))
            .unwrap();
        h.clock.advance_blocks(100);
        let err = h
            .service
            .refund_atomic_swap(&mut h.store, refund(id))
            .unwrap_err();
        assert!(matches!(err, SwapError::SwapNotRefundable { .. }));
        assert!(err.to_string().contains("not refundable"));
        assert_eq!(h.store.atomic_swap(&id).unwrap().status, SwapStatus::Open);
    }

    #[test]
    fn test_refund_after_expiry_returns_funds() {
        let mut h = harness();
        let id = h
            .service
            .create_atomic_swap(&mut h.store, create_request(10))
            .unwrap();
        h.clock.advance_blocks(101);
        h.service.refund_atomic_swap(&mut h.store, refund(id)).unwrap();

        let swap = h.store.atomic_swap(&id).unwrap();
        assert_eq!(swap.status, SwapStatus::Expired);
        assert_eq!(swap.closed_block, START_HEIGHT + 101);
        assert_eq!(h.ledger.balance(&sender(), "bnb"), 1_000_000);
        assert_eq!(h.store.asset_supply("bnb").unwrap().current_active_supply, 0);
    }

    #[test]
    fn test_terminal_states_never_retransfer() {
        let mut h = harness();
        let id = h
            .service
            .create_atomic_swap(&mut h.store, create_request(10))
            .unwrap();
        h.service
            .claim_atomic_swap(&mut h.store, claim(id, secret()))
            .unwrap();

        assert!(matches!(
            h.service.claim_atomic_swap(&mut h.store, claim(id, secret())),
            Err(SwapError::SwapNotOpen(SwapStatus::Completed))
        ));
        h.clock.advance_blocks(500);
        assert!(matches!(
            h.service.refund_atomic_swap(&mut h.store, refund(id)),
            Err(SwapError::SwapNotOpen(SwapStatus::Completed))
        ));
        assert_eq!(h.ledger.balance(&recipient(), "bnb"), 10);
        assert_eq!(h.ledger.balance(&sender(), "bnb"), 999_990);
    }

    #[test]
    fn test_claim_payout_failure_leaves_swap_open() {
        let mut h = scripted_harness(1_000);
        let id = h
            .service
            .create_atomic_swap(&mut h.store, create_request(10))
            .unwrap();
        h.ledger.fail_payouts();

        let err = h
            .service
            .claim_atomic_swap(&mut h.store, claim(id, secret()))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Transfer);

        let swap = h.store.atomic_swap(&id).unwrap();
        assert_eq!(swap.status, SwapStatus::Open);
        assert_eq!(swap.closed_block, 0);
        assert_eq!(h.store.asset_supply("bnb").unwrap().current_active_supply, 0);
        assert_eq!(h.ledger.inner.escrow_balance("bnb"), 10);
        assert_eq!(h.events.events().len(), 1);
    }

    #[test]
    fn test_refund_payout_failure_leaves_swap_open() {
        let mut h = scripted_harness(1_000);
        let id = h
            .service
            .create_atomic_swap(&mut h.store, create_request(10))
            .unwrap();
        h.clock.advance_blocks(101);
        h.ledger.fail_payouts();

        let err = h
            .service
            .refund_atomic_swap(&mut h.store, refund(id))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Transfer);

        let swap = h.store.atomic_swap(&id).unwrap();
        assert_eq!(swap.status, SwapStatus::Open);
        assert_eq!(swap.closed_block, 0);
        assert_eq!(h.store.asset_supply("bnb").unwrap().current_active_supply, 0);
        assert_eq!(h.ledger.inner.balance(&sender(), "bnb"), 999_990);
        assert_eq!(h.events.events().len(), 1);
    }

    #[test]
    fn test_claim_completes_when_params_change_during_payout() {
        let Harness {
            service,
            mut store,
            ledger,
            events,
            ..
        } = scripted_harness(1_000);
        let service = Arc::new(service);
        let id = service
            .create_atomic_swap(&mut store, create_request(10))
            .unwrap();

        // Tighten the limit below the claimed amount while funds are in flight.
        let weak = Arc::downgrade(&service);
        ledger.on_next_payout(move || {
            if let Some(service) = weak.upgrade() {
                service.update_params(test_params(5)).unwrap();
            }
        });

        service
            .claim_atomic_swap(&mut store, claim(id, secret()))
            .unwrap();
        assert_eq!(service.params().supply_limit("bnb").unwrap(), 5);

        let swap = store.atomic_swap(&id).unwrap();
        assert_eq!(swap.status, SwapStatus::Completed);
        assert_eq!(store.asset_supply("bnb").unwrap().current_active_supply, 10);
        assert_eq!(ledger.inner.balance(&recipient(), "bnb"), 10);
        assert_eq!(ledger.inner.escrow_balance("bnb"), 0);
        assert_eq!(events.events().len(), 2);

        let err = service
            .claim_atomic_swap(&mut store, claim(id, secret()))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert_eq!(ledger.inner.balance(&recipient(), "bnb"), 10);
    }
}
