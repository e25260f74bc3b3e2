use storage::{
    MeetStore,
    dto::scoreboard::{LiftLeaderboardEntry, ScoreboardRow},
    error::Result,
    models::LiftType,
    services::scoreboard,
};
use uuid::Uuid;

pub async fn live_scoreboard(store: &dyn MeetStore, event_id: Uuid) -> Result<Vec<ScoreboardRow>> {
    let rows = scoreboard::live_scoreboard(store, event_id).await?;
    tracing::debug!(%event_id, rows = rows.len(), "Built live scoreboard");

    Ok(rows)
}

pub async fn lift_leaderboard(
    store: &dyn MeetStore,
    event_id: Uuid,
    lift_type: LiftType,
) -> Result<Vec<LiftLeaderboardEntry>> {
    scoreboard::lift_leaderboard(store, event_id, lift_type).await
}
