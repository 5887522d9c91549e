mod common;

use std::sync::Arc;

use async_trait::async_trait;
use common::{date, slot};
use courtside_client::{
    api::BookingApi,
    mock::MockBookingApi,
    views::availability::{AvailabilityView, Pending},
};
use courtside_core::{
    availability::SlotAction,
    errors::{BookingError, BookingResult},
    models::{
        auth::{ForgotPasswordRequest, LoginRequest, ResetPasswordRequest},
        time_slot::{NewTimeSlot, TimeSlot},
        transaction::{NewTransaction, Transaction},
        user::{PasswordResetByAdmin, ProfileUpdate, RegisterUserRequest, Role, User},
    },
    validation::NewSlotFields,
};
use mockall::predicate::eq;
use pretty_assertions::assert_eq;
use tokio::sync::{Notify, Semaphore};

fn user_lists(api: &mut MockBookingApi, loads: usize) {
    let today = date(2024, 1, 10);
    api.expect_my_time_slots()
        .times(loads)
        .returning(move || Ok(vec![slot(3, today, 12, Some(7))]));
    api.expect_free_time_slots()
        .with(eq(7))
        .times(loads)
        .returning(move |_| {
            Ok(vec![
                slot(1, today, 9, None),
                slot(2, today.succ_opt().unwrap(), 10, None),
            ])
        });
}

#[tokio::test]
async fn test_user_load_fetches_own_and_free_lists() {
    let mut api = MockBookingApi::new();
    user_lists(&mut api, 1);
    let view = AvailabilityView::new(Arc::new(api), Role::User, date(2024, 1, 10), 7);

    view.load().await.unwrap();

    assert_eq!(view.mine().len(), 1);
    assert_eq!(view.listed().len(), 2);
    assert_eq!(view.last_error(), None);
    assert!(!view.is_loading());
}

#[tokio::test]
async fn test_admin_load_uses_full_listing() {
    let today = date(2024, 1, 10);
    let mut api = MockBookingApi::new();
    api.expect_my_time_slots().times(1).returning(|| Ok(Vec::new()));
    api.expect_all_time_slots()
        .with(eq(14))
        .times(1)
        .returning(move |_| Ok(vec![slot(1, today, 9, Some(4)), slot(2, today, 8, None)]));
    api.expect_free_time_slots().never();
    let view = AvailabilityView::new(Arc::new(api), Role::Admin, today, 14);

    view.load().await.unwrap();
    let rows = view.rows_for(today);

    // Sorted by start time, every slot deletable
    assert_eq!(rows.iter().map(|row| row.slot.id).collect::<Vec<_>>(), vec![2, 1]);
    assert!(rows.iter().all(|row| row.actions == vec![SlotAction::Delete]));
    assert_eq!(view.week().len(), 14);
}

#[tokio::test]
async fn test_rows_for_user_mark_owned_slots() {
    let today = date(2024, 1, 10);
    let mut api = MockBookingApi::new();
    user_lists(&mut api, 1);
    let view = AvailabilityView::new(Arc::new(api), Role::User, today, 7);
    view.load().await.unwrap();

    let rows = view.rows_for(today);

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].slot.id, 1);
    assert_eq!(rows[0].actions, vec![SlotAction::Book]);
    assert!(!rows[0].owned);
    assert_eq!(rows[1].slot.id, 3);
    assert_eq!(rows[1].actions, vec![SlotAction::Unbook]);
    assert!(rows[1].owned);

    // Only the slot on the following day
    let tomorrow = view.rows_for(today.succ_opt().unwrap());
    assert_eq!(tomorrow.len(), 1);
    assert_eq!(tomorrow[0].slot.id, 2);
}

#[tokio::test]
async fn test_overview_counts_each_day() {
    let today = date(2024, 1, 10);
    let mut api = MockBookingApi::new();
    user_lists(&mut api, 1);
    let view = AvailabilityView::new(Arc::new(api), Role::User, today, 7);
    view.load().await.unwrap();

    let overview = view.overview();

    assert_eq!(overview.len(), 7);
    assert_eq!((overview[0].mine, overview[0].listed), (1, 1));
    assert_eq!((overview[1].mine, overview[1].listed), (0, 1));
    assert!(overview[2..].iter().all(|day| day.mine == 0 && day.listed == 0));
}

#[tokio::test]
async fn test_book_reloads_both_lists() {
    let mut api = MockBookingApi::new();
    api.expect_book_time_slot()
        .with(eq(1))
        .times(1)
        .returning(|_| Ok(()));
    user_lists(&mut api, 2);
    let view = AvailabilityView::new(Arc::new(api), Role::User, date(2024, 1, 10), 7);
    view.load().await.unwrap();

    view.book(1).await.unwrap();

    assert_eq!(view.pending(), None);
}

#[tokio::test]
async fn test_unbook_reloads_both_lists() {
    let mut api = MockBookingApi::new();
    api.expect_unbook_time_slot()
        .with(eq(3))
        .times(1)
        .returning(|_| Ok(()));
    user_lists(&mut api, 1);
    let view = AvailabilityView::new(Arc::new(api), Role::User, date(2024, 1, 10), 7);

    view.unbook(3).await.unwrap();
}

#[tokio::test]
async fn test_admin_add_and_delete_reload_both_lists() {
    let today = date(2024, 1, 10);
    let mut api = MockBookingApi::new();
    api.expect_add_time_slot()
        .withf(|slot: &NewTimeSlot| slot.date == date(2024, 1, 12))
        .times(1)
        .returning(|_| Ok(()));
    api.expect_delete_time_slot()
        .with(eq(8))
        .times(1)
        .returning(|_| Ok(()));
    api.expect_my_time_slots().times(2).returning(|| Ok(Vec::new()));
    api.expect_all_time_slots().times(2).returning(|_| Ok(Vec::new()));
    let view = AvailabilityView::new(Arc::new(api), Role::Admin, today, 7);

    view.add_slot(&NewSlotFields {
        date: "2024-01-12".to_string(),
        start_time: "09:00".to_string(),
        end_time: "10:00".to_string(),
    })
    .await
    .unwrap();
    view.delete(8).await.unwrap();
}

#[tokio::test]
async fn test_invalid_new_slot_is_not_sent() {
    let mut api = MockBookingApi::new();
    api.expect_add_time_slot().never();
    let view = AvailabilityView::new(Arc::new(api), Role::Admin, date(2024, 1, 10), 7);

    let err = view
        .add_slot(&NewSlotFields {
            date: "2024-01-09".to_string(),
            start_time: "11:00".to_string(),
            end_time: "10:00".to_string(),
        })
        .await
        .unwrap_err();

    assert!(matches!(err, BookingError::Validation(_)));
    assert_eq!(
        view.last_error().as_deref(),
        Some("Date cannot be in the past\nStart time must be before end time")
    );
}

#[tokio::test]
async fn test_wrong_role_is_refused_without_request() {
    let api = MockBookingApi::new();
    let api = Arc::new(api);
    let user_view = AvailabilityView::new(Arc::clone(&api), Role::User, date(2024, 1, 10), 7);
    let admin_view = AvailabilityView::new(api, Role::Admin, date(2024, 1, 10), 7);

    assert!(matches!(
        user_view.delete(1).await,
        Err(BookingError::Authorization(_))
    ));
    assert!(matches!(
        admin_view.book(1).await,
        Err(BookingError::Authorization(_))
    ));
}

#[tokio::test]
async fn test_failed_action_keeps_lists_and_shows_backend_message() {
    let mut api = MockBookingApi::new();
    user_lists(&mut api, 1);
    api.expect_book_time_slot().times(1).returning(|_| {
        Err(BookingError::Api {
            status: 409,
            message: "Time slot is already booked".to_string(),
        })
    });
    let view = AvailabilityView::new(Arc::new(api), Role::User, date(2024, 1, 10), 7);
    view.load().await.unwrap();

    let err = view.book(1).await.unwrap_err();

    assert!(matches!(err, BookingError::Api { status: 409, .. }));
    assert_eq!(
        view.last_error().as_deref(),
        Some("Time slot is already booked")
    );
    assert_eq!(view.listed().len(), 2);
    assert_eq!(view.pending(), None);
}

#[tokio::test]
async fn test_failed_load_keeps_stale_lists() {
    let today = date(2024, 1, 10);
    let mut api = MockBookingApi::new();
    let mut calls = 0;
    api.expect_my_time_slots().times(2).returning(move || {
        calls += 1;
        if calls == 1 {
            Ok(vec![slot(3, today, 12, Some(7))])
        } else {
            Err(BookingError::Transport("connection refused".to_string()))
        }
    });
    api.expect_free_time_slots()
        .times(0..=2)
        .returning(|_| Ok(Vec::new()));
    let view = AvailabilityView::new(Arc::new(api), Role::User, today, 7);

    view.load().await.unwrap();
    assert!(view.load().await.is_err());

    assert_eq!(view.mine().len(), 1);
    assert_eq!(
        view.last_error().as_deref(),
        Some("Failed to load time slots. Please try again.")
    );
}

/// Holds `book_time_slot` until released so a second action can be attempted mid-flight.
struct GatedApi {
    inner: MockBookingApi,
    started: Notify,
    release: Semaphore,
}

#[async_trait]
impl BookingApi for GatedApi {
    async fn login(&self, credentials: LoginRequest) -> BookingResult<String> {
        self.inner.login(credentials).await
    }
    async fn forgot_password(&self, request: ForgotPasswordRequest) -> BookingResult<String> {
        self.inner.forgot_password(request).await
    }
    async fn reset_password(&self, request: ResetPasswordRequest) -> BookingResult<String> {
        self.inner.reset_password(request).await
    }
    async fn my_time_slots(&self) -> BookingResult<Vec<TimeSlot>> {
        self.inner.my_time_slots().await
    }
    async fn free_time_slots(&self, days: u32) -> BookingResult<Vec<TimeSlot>> {
        self.inner.free_time_slots(days).await
    }
    async fn all_time_slots(&self, days: u32) -> BookingResult<Vec<TimeSlot>> {
        self.inner.all_time_slots(days).await
    }
    async fn add_time_slot(&self, slot: NewTimeSlot) -> BookingResult<()> {
        self.inner.add_time_slot(slot).await
    }
    async fn book_time_slot(&self, slot_id: i64) -> BookingResult<()> {
        self.started.notify_one();
        let _permit = self.release.acquire().await;
        self.inner.book_time_slot(slot_id).await
    }
    async fn unbook_time_slot(&self, slot_id: i64) -> BookingResult<()> {
        self.inner.unbook_time_slot(slot_id).await
    }
    async fn delete_time_slot(&self, slot_id: i64) -> BookingResult<()> {
        self.inner.delete_time_slot(slot_id).await
    }
    async fn profile(&self) -> BookingResult<User> {
        self.inner.profile().await
    }
    async fn update_profile(&self, update: ProfileUpdate) -> BookingResult<()> {
        self.inner.update_profile(update).await
    }
    async fn all_users(&self) -> BookingResult<Vec<User>> {
        self.inner.all_users().await
    }
    async fn register_user(&self, request: RegisterUserRequest) -> BookingResult<()> {
        self.inner.register_user(request).await
    }
    async fn reset_user_password(&self, request: PasswordResetByAdmin) -> BookingResult<()> {
        self.inner.reset_user_password(request).await
    }
    async fn create_transaction(&self, transaction: NewTransaction) -> BookingResult<()> {
        self.inner.create_transaction(transaction).await
    }
    async fn all_transactions(&self) -> BookingResult<Vec<Transaction>> {
        self.inner.all_transactions().await
    }
    async fn user_transactions(&self, user_id: i64) -> BookingResult<Vec<Transaction>> {
        self.inner.user_transactions(user_id).await
    }
}

#[tokio::test]
async fn test_second_action_while_pending_is_rejected() {
    let today = date(2024, 1, 10);
    let mut inner = MockBookingApi::new();
    user_lists(&mut inner, 2);
    inner
        .expect_book_time_slot()
        .with(eq(1))
        .times(1)
        .returning(|_| Ok(()));
    inner.expect_unbook_time_slot().never();
    let api = Arc::new(GatedApi {
        inner,
        started: Notify::new(),
        release: Semaphore::new(0),
    });
    let view = AvailabilityView::new(Arc::clone(&api), Role::User, today, 7);
    view.load().await.unwrap();

    let second = async {
        api.started.notified().await;

        assert_eq!(
            view.pending(),
            Some(Pending::Slot {
                id: 1,
                action: SlotAction::Book
            })
        );
        let row = view
            .rows_for(today)
            .into_iter()
            .find(|row| row.slot.id == 1)
            .unwrap();
        assert_eq!(row.pending, Some("Booking…"));

        let refused = view.unbook(3).await;
        api.release.add_permits(1);
        refused
    };

    let (first, refused) = tokio::join!(view.book(1), second);

    first.unwrap();
    assert!(matches!(refused, Err(BookingError::Busy(_))));
    assert_eq!(view.pending(), None);
}
