//! Live scoreboard and per-lift leaderboards.
//!
//! Rows are rebuilt from the attempt records and registration submissions on
//! every request, so a snapshot may show an attempt mid-transition.

use std::cmp::Ordering;
use std::collections::HashMap;

use chrono::NaiveDateTime;
use rust_decimal::prelude::ToPrimitive;
use uuid::Uuid;

use crate::dto::scoreboard::{AttemptMark, LiftLeaderboardEntry, ScoreboardRow};
use crate::error::Result;
use crate::models::{Attempt, LiftType, Submission, fields};
use crate::services::gl_points::{self, Gender};
use crate::store::MeetStore;

const PRESENTATION_DP: i32 = 6;

/// One athlete's results for one lift type
#[derive(Debug, Clone, PartialEq)]
pub struct LiftSummary {
    pub marks: Vec<AttemptMark>,
    /// Heaviest good attempt, 0 when none
    pub best: f64,
    pub has_good_attempt: bool,
    /// When the best attempt was judged, for tie-breaking
    pub best_completed_at: Option<NaiveDateTime>,
}

pub fn summarize_lift(attempts: &[&Attempt]) -> LiftSummary {
    let mut sorted: Vec<&Attempt> = attempts.to_vec();
    sorted.sort_by_key(|a| a.attempt_number);

    let marks = sorted
        .iter()
        .map(|a| match (a.is_good(), a.actual_weight) {
            (true, Some(weight)) => AttemptMark::Good(weight.to_f64().unwrap_or(0.0)),
            _ => AttemptMark::Miss,
        })
        .collect();

    let best_attempt = sorted
        .iter()
        .filter(|a| a.is_good())
        .filter_map(|a| a.actual_weight.map(|w| (w, a.completed_at)))
        .max_by(|(w1, t1), (w2, t2)| w1.cmp(w2).then_with(|| t2.cmp(t1)));

    match best_attempt {
        Some((weight, completed_at)) => LiftSummary {
            marks,
            best: weight.to_f64().unwrap_or(0.0),
            has_good_attempt: true,
            best_completed_at: completed_at,
        },
        None => LiftSummary {
            marks,
            best: 0.0,
            has_good_attempt: false,
            best_completed_at: None,
        },
    }
}

struct Identity {
    first_name: String,
    last_name: String,
    team: String,
    birth_year: String,
    division: String,
    body_weight: f64,
    weight_class: i32,
}

impl Identity {
    fn from_submission(submission: &Submission) -> Self {
        let body_weight = submission.body_weight();
        Self {
            first_name: submission.field(fields::FIRST_NAME).to_string(),
            last_name: submission.field(fields::LAST_NAME).to_string(),
            team: submission.field(fields::TEAM).to_string(),
            birth_year: submission.field(fields::BIRTH_YEAR).to_string(),
            division: submission.field(fields::DIVISION).to_string(),
            body_weight,
            weight_class: body_weight.ceil() as i32,
        }
    }
}

fn group_by_athlete(attempts: &[Attempt]) -> HashMap<Uuid, Vec<&Attempt>> {
    let mut grouped: HashMap<Uuid, Vec<&Attempt>> = HashMap::new();
    for attempt in attempts {
        grouped.entry(attempt.athlete_id).or_default().push(attempt);
    }
    grouped
}

fn lift_attempts<'a>(athlete_attempts: &[&'a Attempt], lift_type: LiftType) -> Vec<&'a Attempt> {
    athlete_attempts
        .iter()
        .copied()
        .filter(|a| a.lift_type == lift_type)
        .collect()
}

/// One row per submission, in submission order.
pub fn build_scoreboard(submissions: &[Submission], attempts: &[Attempt]) -> Vec<ScoreboardRow> {
    let by_athlete = group_by_athlete(attempts);

    submissions
        .iter()
        .map(|submission| {
            let athlete_attempts = by_athlete
                .get(&submission.athlete_id)
                .map(Vec::as_slice)
                .unwrap_or(&[]);

            let squat = summarize_lift(&lift_attempts(athlete_attempts, LiftType::Squat));
            let bench = summarize_lift(&lift_attempts(athlete_attempts, LiftType::Bench));
            let deadlift = summarize_lift(&lift_attempts(athlete_attempts, LiftType::Deadlift));

            let total = squat.best + bench.best + deadlift.best;
            let has_total =
                squat.has_good_attempt && bench.has_good_attempt && deadlift.has_good_attempt;

            let raw_gender = submission.field(fields::GENDER);
            let gender = Gender::from_form_value(raw_gender);
            if !raw_gender.trim().eq_ignore_ascii_case(gender.as_str()) {
                tracing::debug!(
                    athlete_id = %submission.athlete_id,
                    raw_gender,
                    "Unrecognized gender, scoring with men's constants"
                );
            }

            let identity = Identity::from_submission(submission);
            let points = gl_points::gl_points(identity.body_weight, total, gender);
            let coefficient = gl_points::gl_coefficient(gender, identity.body_weight);

            ScoreboardRow {
                athlete_id: submission.athlete_id,
                last_name: identity.last_name,
                first_name: identity.first_name,
                team: identity.team,
                birth_year: identity.birth_year,
                division: identity.division,
                gender: gender.as_str().to_string(),
                body_weight: identity.body_weight,
                weight_class: identity.weight_class,
                squat: squat.marks,
                best_squat: squat.best,
                bench: bench.marks,
                best_bench: bench.best,
                deadlift: deadlift.marks,
                best_deadlift: deadlift.best,
                total,
                has_total,
                gl_points: gl_points::round_dp(points, PRESENTATION_DP),
                gl_coefficient: gl_points::round_dp(coefficient, PRESENTATION_DP),
            }
        })
        .collect()
}

/// Ranked results for one lift. Athletes without a good attempt are left
/// out. Ties go to the lighter athlete, then to whoever made the weight
/// first, then to registration order.
pub fn build_lift_leaderboard(
    submissions: &[Submission],
    attempts: &[Attempt],
    lift_type: LiftType,
) -> Vec<LiftLeaderboardEntry> {
    let by_athlete = group_by_athlete(attempts);

    let mut ranked: Vec<(Identity, Uuid, LiftSummary)> = submissions
        .iter()
        .filter_map(|submission| {
            let athlete_attempts = by_athlete
                .get(&submission.athlete_id)
                .map(Vec::as_slice)
                .unwrap_or(&[]);
            let summary = summarize_lift(&lift_attempts(athlete_attempts, lift_type));

            (summary.best > 0.0).then(|| {
                (
                    Identity::from_submission(submission),
                    submission.athlete_id,
                    summary,
                )
            })
        })
        .collect();

    // Stable sort keeps registration order as the last tie-breaker.
    ranked.sort_by(|(a_id, _, a), (b_id, _, b)| {
        b.best
            .partial_cmp(&a.best)
            .unwrap_or(Ordering::Equal)
            .then_with(|| {
                a_id.body_weight
                    .partial_cmp(&b_id.body_weight)
                    .unwrap_or(Ordering::Equal)
            })
            .then_with(|| match (a.best_completed_at, b.best_completed_at) {
                (Some(a_at), Some(b_at)) => a_at.cmp(&b_at),
                _ => Ordering::Equal,
            })
    });

    ranked
        .into_iter()
        .enumerate()
        .map(|(index, (identity, athlete_id, summary))| LiftLeaderboardEntry {
            rank: index as i64 + 1,
            athlete_id,
            last_name: identity.last_name,
            first_name: identity.first_name,
            team: identity.team,
            birth_year: identity.birth_year,
            division: identity.division,
            body_weight: identity.body_weight,
            weight_class: identity.weight_class,
            lift_type,
            attempts: summary.marks,
            best: summary.best,
        })
        .collect()
}

pub async fn live_scoreboard(store: &dyn MeetStore, event_id: Uuid) -> Result<Vec<ScoreboardRow>> {
    let attempts = store.list_attempts(event_id, None).await?;
    let submissions = store.list_submissions(event_id).await?;

    Ok(build_scoreboard(&submissions, &attempts))
}

pub async fn lift_leaderboard(
    store: &dyn MeetStore,
    event_id: Uuid,
    lift_type: LiftType,
) -> Result<Vec<LiftLeaderboardEntry>> {
    let attempts = store.list_attempts(event_id, Some(lift_type)).await?;
    let submissions = store.list_submissions(event_id).await?;

    Ok(build_lift_leaderboard(&submissions, &attempts, lift_type))
}
