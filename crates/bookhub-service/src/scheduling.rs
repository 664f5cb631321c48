//! The booking coordinator.
//!
//! Owns the transaction boundary for every reservation mutation. The
//! booking protocol runs its checks in a fixed order inside one
//! transaction: range and validity before conflicts, so a caller always
//! sees the most fundamental violation first. Any failure before commit
//! rolls the transaction back; notifications only happen after commit and
//! never unwind it.

use std::sync::Arc;

use chrono::{DateTime, FixedOffset};
use sqlx::PgPool;
use tracing::{info, warn};

use bookhub_core::result::AppResult;
use bookhub_core::types::{EventId, ReservationId};
use bookhub_database::repositories::{EventRepository, ReservationRepository};
use bookhub_directory::DirectoryService;
use bookhub_entity::error::ScheduleError;
use bookhub_entity::reservation::{CreateReservation, Reservation};
use bookhub_notify::NotificationDispatcher;
use bookhub_scheduling::{TimeZoneNormalizer, WallTime, geometry, normalize_slot};

use crate::context::RequestContext;
use crate::tx::{begin, commit};

/// Coordinates booking, self-cancellation, and administrative
/// cancellation of reservations.
#[derive(Clone)]
pub struct SchedulingCoordinator {
    /// Pool from which booking transactions are begun.
    pool: PgPool,
    /// Event repository.
    event_repo: Arc<EventRepository>,
    /// Reservation repository.
    reservation_repo: Arc<ReservationRepository>,
    /// Organizational time zone conversion.
    normalizer: TimeZoneNormalizer,
    /// Post-commit notifications.
    dispatcher: NotificationDispatcher,
    /// Directory lookups for users whose claims are not on the request.
    directory: Arc<dyn DirectoryService>,
}

impl SchedulingCoordinator {
    /// Creates a new coordinator.
    pub fn new(
        pool: PgPool,
        event_repo: Arc<EventRepository>,
        reservation_repo: Arc<ReservationRepository>,
        normalizer: TimeZoneNormalizer,
        dispatcher: NotificationDispatcher,
        directory: Arc<dyn DirectoryService>,
    ) -> Self {
        Self {
            pool,
            event_repo,
            reservation_repo,
            normalizer,
            dispatcher,
            directory,
        }
    }

    /// Books a slot for the caller.
    ///
    /// The requested instant is normalized into UTC and snapped to the
    /// nearest slot boundary, then checked against the event window, the
    /// slot grid and break window, and the three conflict rules. The
    /// per-user advisory lock serializes the duplicate and same-day checks
    /// for one caller; the partial unique indexes catch the remaining
    /// race on the slot itself at insert.
    pub async fn book_slot(
        &self,
        ctx: &RequestContext,
        event_id: EventId,
        requested: DateTime<FixedOffset>,
    ) -> AppResult<Reservation> {
        let requested = self.normalizer.to_utc(WallTime::Offset(requested));

        let mut tx = begin(&self.pool).await?;

        let event = self
            .event_repo
            .find_by_id_for_update(&mut tx, event_id)
            .await?
            .ok_or(ScheduleError::EventNotFound)?;

        self.reservation_repo.lock_user(&mut tx, &ctx.user_sid).await?;

        let slot_at = normalize_slot(requested, event.duration_minutes, event.start_time_of_day());

        if slot_at < event.starts_at || slot_at >= event.ends_at {
            return Err(ScheduleError::SlotOutOfRange.into());
        }
        if !geometry::is_valid_slot(&event, slot_at) {
            return Err(ScheduleError::InvalidSlot.into());
        }
        if self
            .reservation_repo
            .slot_taken(&mut tx, event.id, slot_at)
            .await?
        {
            return Err(ScheduleError::SlotConflict.into());
        }
        if self
            .reservation_repo
            .user_has_booking(&mut tx, event.id, &ctx.user_sid)
            .await?
        {
            return Err(ScheduleError::DuplicateBooking.into());
        }
        if self
            .reservation_repo
            .user_has_booking_on_day(&mut tx, &ctx.user_sid, event.start_date())
            .await?
        {
            return Err(ScheduleError::SameDayConflict.into());
        }

        let reservation = self
            .reservation_repo
            .insert(
                &mut tx,
                &CreateReservation {
                    event_id: event.id,
                    user_sid: ctx.user_sid.clone(),
                    slot_at,
                },
            )
            .await?;

        commit(tx).await?;

        info!(
            reservation_id = %reservation.id,
            event_id = %event.id,
            user_sid = %ctx.user_sid,
            slot_at = %slot_at,
            "Slot booked"
        );

        self.dispatcher
            .booking_confirmed(&ctx.email, &ctx.display_name, &event, slot_at)
            .await;

        Ok(reservation)
    }

    /// Lists a user's active reservations, soonest slot first.
    pub async fn list_reservations(&self, user_sid: &str) -> AppResult<Vec<Reservation>> {
        self.reservation_repo.find_by_user(user_sid).await
    }

    /// Cancels the caller's own reservation for an event. Having no
    /// reservation to cancel is an error on this path.
    pub async fn cancel_booking(&self, ctx: &RequestContext, event_id: EventId) -> AppResult<()> {
        let mut tx = begin(&self.pool).await?;

        let reservation = self
            .reservation_repo
            .delete_by_event_and_user(&mut tx, event_id, &ctx.user_sid)
            .await?
            .ok_or(ScheduleError::ScheduleNotFound)?;

        commit(tx).await?;

        info!(
            reservation_id = %reservation.id,
            event_id = %event_id,
            user_sid = %ctx.user_sid,
            "Reservation cancelled"
        );

        if let Some(event) = self.event_repo.find_by_id(event_id).await? {
            self.dispatcher
                .booking_cancelled(&ctx.email, &ctx.display_name, &event, reservation.slot_at)
                .await;
        }

        Ok(())
    }

    /// Cancels a reservation on behalf of its holder.
    ///
    /// Idempotent: an unknown reservation id is a success, so organizers
    /// can safely retry. The holder's contact details come from the
    /// directory; a directory miss or outage skips the notification and
    /// never fails the cancellation.
    pub async fn admin_cancel(&self, id: ReservationId) -> AppResult<()> {
        let Some(reservation) = self.reservation_repo.delete_by_id(id).await? else {
            info!(reservation_id = %id, "Admin cancel for absent reservation, nothing to do");
            return Ok(());
        };

        info!(
            reservation_id = %reservation.id,
            event_id = %reservation.event_id,
            user_sid = %reservation.user_sid,
            "Reservation cancelled by organizer"
        );

        let event = match self.event_repo.find_by_id(reservation.event_id).await {
            Ok(Some(event)) => event,
            Ok(None) => return Ok(()),
            Err(e) => {
                warn!(error = %e, "Could not load event for cancellation notice");
                return Ok(());
            }
        };

        match self.directory.find_by_sid(&reservation.user_sid).await {
            Ok(Some(user)) => {
                self.dispatcher
                    .booking_cancelled_by_admin(
                        &user.email,
                        &user.display_name,
                        &event,
                        reservation.slot_at,
                    )
                    .await;
            }
            Ok(None) => {
                warn!(user_sid = %reservation.user_sid, "User not found in directory, skipping notice");
            }
            Err(e) => {
                warn!(error = %e, "Directory lookup failed, skipping notice");
            }
        }

        Ok(())
    }
}
