use rust_decimal::Decimal;
use storage::{
    MeetStore,
    dto::attempt::CurrentLifter,
    error::Result,
    models::{Attempt, AttemptStatus},
    services::attempt_lifecycle::{self, Resolution},
};
use uuid::Uuid;

use crate::error::{WebError, WebResult};
use crate::middleware::auth::Caller;

/// Seed the nine attempts of an athlete in an event
pub async fn init_lifts(
    store: &dyn MeetStore,
    athlete_id: Uuid,
    event_id: Uuid,
) -> Result<Vec<Attempt>> {
    attempt_lifecycle::initialize(store, athlete_id, event_id).await
}

/// Change the declared weight of an attempt owned by the caller
pub async fn submit_weight(
    store: &dyn MeetStore,
    caller: Caller,
    attempt_id: Uuid,
    next_weight: Decimal,
) -> WebResult<Attempt> {
    let attempt = store.find_attempt(attempt_id).await?;

    if !caller.can_act_for(attempt.athlete_id) {
        tracing::warn!(%attempt_id, ?caller, "Weight change on another athlete's attempt");
        return Err(WebError::Forbidden(
            "You can only update your own attempts".to_string(),
        ));
    }

    Ok(attempt_lifecycle::change_declared_weight(store, &attempt, next_weight).await?)
}

/// Record an official's decision
pub async fn update_status(
    store: &dyn MeetStore,
    attempt_id: Uuid,
    status: AttemptStatus,
) -> Result<Resolution> {
    attempt_lifecycle::resolve_attempt(store, attempt_id, status).await
}

/// Attempts currently on deck in an event
pub async fn current_lifters(store: &dyn MeetStore, event_id: Uuid) -> Result<Vec<CurrentLifter>> {
    attempt_lifecycle::current_lifters(store, event_id).await
}
