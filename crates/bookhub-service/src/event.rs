//! Event CRUD and interest registration service.

use std::sync::Arc;

use chrono::{DateTime, FixedOffset};
use sqlx::PgPool;
use tracing::info;

use bookhub_core::result::AppResult;
use bookhub_core::types::EventId;
use bookhub_database::repositories::{EventRepository, InterestRepository};
use bookhub_entity::error::ScheduleError;
use bookhub_entity::event::{CreateEvent, Event, UpdateEvent};
use bookhub_entity::interest::{InterestEntry, InterestPolicy};
use bookhub_scheduling::geometry;
use bookhub_scheduling::{TimeZoneNormalizer, WallTime};

use crate::context::RequestContext;
use crate::tx::{begin, commit};

/// Request to create a new event.
///
/// Instants arrive with an explicit offset; the service normalizes them
/// into UTC through the organizational time zone. The slot count is
/// derived, never client-supplied.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CreateEventRequest {
    /// Event title.
    pub title: String,
    /// Location string.
    pub location: String,
    /// Session duration in minutes.
    pub duration_minutes: i32,
    /// Window open instant.
    pub starts_at: DateTime<FixedOffset>,
    /// Window close instant.
    pub ends_at: DateTime<FixedOffset>,
}

/// Full-field event update; omitting the break fields clears the break.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct UpdateEventRequest {
    /// Event title.
    pub title: String,
    /// Location string.
    pub location: String,
    /// Session duration in minutes.
    pub duration_minutes: i32,
    /// Window open instant.
    pub starts_at: DateTime<FixedOffset>,
    /// Window close instant.
    pub ends_at: DateTime<FixedOffset>,
    /// Break window start.
    #[serde(default)]
    pub break_start: Option<DateTime<FixedOffset>>,
    /// Break window end.
    #[serde(default)]
    pub break_end: Option<DateTime<FixedOffset>>,
}

/// Manages event creation, listing, update, deletion, and the bounded
/// interest list.
#[derive(Debug, Clone)]
pub struct EventService {
    /// Pool from which admission transactions are begun.
    pool: PgPool,
    /// Event repository.
    event_repo: Arc<EventRepository>,
    /// Interest repository.
    interest_repo: Arc<InterestRepository>,
    /// Interest list capacity policy.
    interest_policy: InterestPolicy,
    /// Organizational time zone conversion.
    normalizer: TimeZoneNormalizer,
}

impl EventService {
    /// Creates a new event service.
    pub fn new(
        pool: PgPool,
        event_repo: Arc<EventRepository>,
        interest_repo: Arc<InterestRepository>,
        interest_policy: InterestPolicy,
        normalizer: TimeZoneNormalizer,
    ) -> Self {
        Self {
            pool,
            event_repo,
            interest_repo,
            interest_policy,
            normalizer,
        }
    }

    /// Creates an event. The slot count is computed from the window and
    /// session duration, and all construction invariants are checked
    /// before any row is written.
    pub async fn create_event(&self, req: CreateEventRequest) -> AppResult<Event> {
        let starts_at = self.normalizer.to_utc(WallTime::Offset(req.starts_at));
        let ends_at = self.normalizer.to_utc(WallTime::Offset(req.ends_at));
        // A failed count means bad duration or ordering; validate() reports
        // those in the fixed field order, so the placeholder never persists.
        let available_slots =
            geometry::slot_count(starts_at, ends_at, req.duration_minutes).unwrap_or(0);

        let data = CreateEvent {
            title: req.title,
            duration_minutes: req.duration_minutes,
            location: req.location,
            starts_at,
            ends_at,
            available_slots,
        };
        data.validate()?;

        let event = self.event_repo.create(&data).await?;
        info!(event_id = %event.id, slots = event.available_slots, "Event created");
        Ok(event)
    }

    /// Lists all events, soonest first. An empty catalog is an empty list.
    pub async fn list_events(&self) -> AppResult<Vec<Event>> {
        self.event_repo.list().await
    }

    /// Fetches a single event.
    pub async fn get_event(&self, id: EventId) -> AppResult<Event> {
        self.event_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ScheduleError::EventNotFound.into())
    }

    /// Replaces all mutable fields of an event, re-running the creation
    /// invariants plus break-window ordering.
    pub async fn update_event(&self, id: EventId, req: UpdateEventRequest) -> AppResult<Event> {
        let starts_at = self.normalizer.to_utc(WallTime::Offset(req.starts_at));
        let ends_at = self.normalizer.to_utc(WallTime::Offset(req.ends_at));
        let available_slots =
            geometry::slot_count(starts_at, ends_at, req.duration_minutes).unwrap_or(0);

        let data = UpdateEvent {
            title: req.title,
            duration_minutes: req.duration_minutes,
            location: req.location,
            starts_at,
            ends_at,
            available_slots,
            break_start: req
                .break_start
                .map(|t| self.normalizer.to_utc(WallTime::Offset(t))),
            break_end: req
                .break_end
                .map(|t| self.normalizer.to_utc(WallTime::Offset(t))),
        };
        data.validate()?;

        let event = self
            .event_repo
            .update(id, &data)
            .await?
            .ok_or(ScheduleError::EventNotFound)?;
        info!(event_id = %event.id, "Event updated");
        Ok(event)
    }

    /// Deletes an event. Reservations and interest entries cascade.
    pub async fn delete_event(&self, id: EventId) -> AppResult<()> {
        if !self.event_repo.delete(id).await? {
            return Err(ScheduleError::EventNotFound.into());
        }
        info!(event_id = %id, "Event deleted");
        Ok(())
    }

    /// Registers the caller's interest in an event, first-come and capped
    /// at the configured ceiling.
    ///
    /// Count and insert run inside one transaction under a per-event
    /// advisory lock, so concurrent registrations cannot slip past the
    /// ceiling between the check and the write.
    pub async fn register_interest(
        &self,
        ctx: &RequestContext,
        event_id: EventId,
    ) -> AppResult<InterestEntry> {
        if self.event_repo.find_by_id(event_id).await?.is_none() {
            return Err(ScheduleError::EventNotFound.into());
        }

        let mut tx = begin(&self.pool).await?;

        self.interest_repo.lock_event(&mut tx, event_id).await?;
        let current = self.interest_repo.find_by_event(&mut tx, event_id).await?;
        self.interest_policy.check_admission(&current, &ctx.user_sid)?;

        let entry = self
            .interest_repo
            .insert(&mut tx, event_id, &ctx.user_sid)
            .await?;

        commit(tx).await?;

        info!(event_id = %event_id, user_sid = %ctx.user_sid, "Interest registered");
        Ok(entry)
    }
}
