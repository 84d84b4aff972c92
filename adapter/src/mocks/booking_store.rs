//! テスト用のインメモリ予約ストア。
//!
//! Postgres 実装と同じ予約・解放の規約を単一の Mutex の下で実装する。
//! ロックが直列化の境界になるため、同一時間帯への同時予約が
//! capacity を超えないことをデータベースなしで検証できる。
//! 本番環境では使用しないこと。

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use kernel::model::{
    booking::{event::CreateBooking, Booking, RejectReason, ReserveOutcome},
    id::{BookingId, SlotId},
    ledger::CapacityLedger,
};
use kernel::repository::booking::BookingRepository;
use shared::error::{AppError, AppResult};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

struct SlotRecord {
    time_slot: String,
    date: NaiveDate,
    ledger: CapacityLedger,
}

#[derive(Default)]
struct State {
    slots: HashMap<SlotId, SlotRecord>,
    bookings: HashMap<BookingId, Booking>,
}

#[derive(Clone)]
pub struct MemoryBookingStore {
    state: Arc<Mutex<State>>,
}

impl MemoryBookingStore {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(State::default())),
        }
    }

    pub fn add_slot(&self, time_slot: &str, date: NaiveDate, capacity: i32) -> SlotId {
        let slot_id = SlotId::new();
        let mut state = self.state.lock().unwrap();
        state.slots.insert(
            slot_id,
            SlotRecord {
                time_slot: time_slot.into(),
                date,
                ledger: CapacityLedger::new(capacity),
            },
        );
        slot_id
    }

    pub fn set_closed(&self, slot_id: SlotId, closed: bool) {
        let mut state = self.state.lock().unwrap();
        if let Some(slot) = state.slots.get_mut(&slot_id) {
            slot.ledger.closed = closed;
        }
    }

    /// 検証用のカウンタのスナップショットを返す
    pub fn ledger(&self, slot_id: SlotId) -> Option<CapacityLedger> {
        let state = self.state.lock().unwrap();
        state.slots.get(&slot_id).map(|s| s.ledger)
    }
}

impl Default for MemoryBookingStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BookingRepository for MemoryBookingStore {
    async fn reserve(&self, event: CreateBooking) -> AppResult<ReserveOutcome> {
        let mut state = self.state.lock().unwrap();

        let Some(slot) = state.slots.get_mut(&event.slot_id) else {
            return Err(AppError::EntityNotFound(format!(
                "時間帯（{}）が見つかりませんでした。",
                event.slot_id
            )));
        };

        if slot.ledger.closed {
            return Err(AppError::UnprocessableEntity(format!(
                "時間帯（{}）は現在受付を停止しています。",
                event.slot_id
            )));
        }

        if !slot.ledger.try_increment() {
            return Ok(ReserveOutcome::Rejected(RejectReason::CapacityExceeded));
        }

        let booking = Booking {
            id: BookingId::new(),
            slot_id: event.slot_id,
            booked_by: event.booked_by,
            created_at: event.created_at,
            cancelled_at: None,
        };
        state.bookings.insert(booking.id, booking.clone());

        Ok(ReserveOutcome::Booked(booking))
    }

    async fn release(&self, booking_id: BookingId, released_at: DateTime<Utc>) -> AppResult<()> {
        let mut state = self.state.lock().unwrap();

        let Some(booking) = state.bookings.get(&booking_id).cloned() else {
            return Err(AppError::EntityNotFound(format!(
                "予約（{}）が見つかりませんでした。",
                booking_id
            )));
        };

        // 解放済みの予約はそのまま成功として返す
        if booking.cancelled_at.is_some() {
            return Ok(());
        }

        if let Some(b) = state.bookings.get_mut(&booking_id) {
            b.cancelled_at = Some(released_at);
        }
        if let Some(slot) = state.slots.get_mut(&booking.slot_id) {
            slot.ledger.decrement();
        }

        Ok(())
    }

    async fn find_by_id(&self, booking_id: BookingId) -> AppResult<Option<Booking>> {
        let state = self.state.lock().unwrap();
        Ok(state.bookings.get(&booking_id).cloned())
    }

    async fn find_active_by_slot_id(&self, slot_id: SlotId) -> AppResult<Vec<Booking>> {
        let state = self.state.lock().unwrap();
        let mut bookings: Vec<Booking> = state
            .bookings
            .values()
            .filter(|b| b.slot_id == slot_id && b.cancelled_at.is_none())
            .cloned()
            .collect();
        bookings.sort_by_key(|b| b.created_at);
        Ok(bookings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kernel::model::id::UserId;
    use kernel::model::ledger::ResourceStatus;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 4).unwrap()
    }

    fn reserve_event(slot_id: SlotId) -> CreateBooking {
        CreateBooking::new(slot_id, UserId::new(), Utc::now())
    }

    #[tokio::test]
    async fn reserve_succeeds_while_capacity_remains() {
        let store = MemoryBookingStore::new();
        let slot_id = store.add_slot("08:00-10:00", date(), 10);

        for _ in 0..7 {
            store.reserve(reserve_event(slot_id)).await.unwrap();
        }
        let outcome = store.reserve(reserve_event(slot_id)).await.unwrap();
        assert!(matches!(outcome, ReserveOutcome::Booked(_)));

        let ledger = store.ledger(slot_id).unwrap();
        assert_eq!(ledger.used, 8);
        assert_eq!(ledger.status(), ResourceStatus::Available);
    }

    #[tokio::test]
    async fn reserve_at_capacity_is_rejected_without_mutation() {
        let store = MemoryBookingStore::new();
        let slot_id = store.add_slot("08:00-10:00", date(), 10);

        for _ in 0..10 {
            store.reserve(reserve_event(slot_id)).await.unwrap();
        }
        assert_eq!(
            store.ledger(slot_id).unwrap().status(),
            ResourceStatus::Full
        );

        let outcome = store.reserve(reserve_event(slot_id)).await.unwrap();
        assert!(matches!(
            outcome,
            ReserveOutcome::Rejected(RejectReason::CapacityExceeded)
        ));
        assert_eq!(store.ledger(slot_id).unwrap().used, 10);
    }

    #[tokio::test]
    async fn reserve_unknown_slot_fails() {
        let store = MemoryBookingStore::new();
        let res = store.reserve(reserve_event(SlotId::new())).await;
        assert!(matches!(res, Err(AppError::EntityNotFound(_))));
    }

    #[tokio::test]
    async fn reserve_on_closed_slot_fails() {
        let store = MemoryBookingStore::new();
        let slot_id = store.add_slot("08:00-10:00", date(), 10);
        store.set_closed(slot_id, true);

        let res = store.reserve(reserve_event(slot_id)).await;
        assert!(matches!(res, Err(AppError::UnprocessableEntity(_))));
        assert_eq!(store.ledger(slot_id).unwrap().used, 0);
    }

    #[tokio::test]
    async fn concurrent_reserves_on_last_unit_admit_exactly_one() {
        let store = MemoryBookingStore::new();
        let slot_id = store.add_slot("08:00-10:00", date(), 1);

        let a = tokio::spawn({
            let store = store.clone();
            async move { store.reserve(reserve_event(slot_id)).await }
        });
        let b = tokio::spawn({
            let store = store.clone();
            async move { store.reserve(reserve_event(slot_id)).await }
        });

        let outcomes = [a.await.unwrap().unwrap(), b.await.unwrap().unwrap()];
        let booked = outcomes
            .iter()
            .filter(|o| matches!(o, ReserveOutcome::Booked(_)))
            .count();
        let rejected = outcomes
            .iter()
            .filter(|o| matches!(o, ReserveOutcome::Rejected(_)))
            .count();

        assert_eq!(booked, 1);
        assert_eq!(rejected, 1);
        assert_eq!(store.ledger(slot_id).unwrap().used, 1);
    }

    #[tokio::test]
    async fn concurrent_reserves_never_exceed_capacity() {
        let store = MemoryBookingStore::new();
        let slot_id = store.add_slot("08:00-10:00", date(), 10);

        let handles: Vec<_> = (0..25)
            .map(|_| {
                tokio::spawn({
                    let store = store.clone();
                    async move { store.reserve(reserve_event(slot_id)).await }
                })
            })
            .collect();

        let mut booked = 0;
        for handle in handles {
            if let ReserveOutcome::Booked(_) = handle.await.unwrap().unwrap() {
                booked += 1;
            }
        }

        assert_eq!(booked, 10);
        let ledger = store.ledger(slot_id).unwrap();
        assert_eq!(ledger.used, 10);
        assert_eq!(ledger.status(), ResourceStatus::Full);
    }

    #[tokio::test]
    async fn release_frees_one_unit_and_reopens_the_slot() {
        let store = MemoryBookingStore::new();
        let slot_id = store.add_slot("08:00-10:00", date(), 5);

        let mut last_booking = None;
        for _ in 0..5 {
            if let ReserveOutcome::Booked(b) = store.reserve(reserve_event(slot_id)).await.unwrap()
            {
                last_booking = Some(b);
            }
        }
        assert_eq!(
            store.ledger(slot_id).unwrap().status(),
            ResourceStatus::Full
        );

        let booking = last_booking.unwrap();
        store.release(booking.id, Utc::now()).await.unwrap();

        let ledger = store.ledger(slot_id).unwrap();
        assert_eq!(ledger.used, 4);
        assert_eq!(ledger.status(), ResourceStatus::Available);
    }

    #[tokio::test]
    async fn double_release_is_a_noop() {
        let store = MemoryBookingStore::new();
        let slot_id = store.add_slot("08:00-10:00", date(), 5);

        let ReserveOutcome::Booked(booking) = store.reserve(reserve_event(slot_id)).await.unwrap()
        else {
            panic!("expected a booking");
        };

        store.release(booking.id, Utc::now()).await.unwrap();
        store.release(booking.id, Utc::now()).await.unwrap();

        assert_eq!(store.ledger(slot_id).unwrap().used, 0);
    }

    #[tokio::test]
    async fn release_unknown_booking_fails() {
        let store = MemoryBookingStore::new();
        let res = store.release(BookingId::new(), Utc::now()).await;
        assert!(matches!(res, Err(AppError::EntityNotFound(_))));
    }

    #[tokio::test]
    async fn active_bookings_exclude_cancelled_ones() {
        let store = MemoryBookingStore::new();
        let slot_id = store.add_slot("08:00-10:00", date(), 5);

        let ReserveOutcome::Booked(first) = store.reserve(reserve_event(slot_id)).await.unwrap()
        else {
            panic!("expected a booking");
        };
        store.reserve(reserve_event(slot_id)).await.unwrap();

        store.release(first.id, Utc::now()).await.unwrap();

        let active = store.find_active_by_slot_id(slot_id).await.unwrap();
        assert_eq!(active.len(), 1);
        assert!(active.iter().all(|b| b.id != first.id));
    }
}
