use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Registration form keys read by the meet core.
pub mod fields {
    pub const OPENING_WEIGHT: &str = "initialWeight";
    pub const BODY_WEIGHT: &str = "bodyWeight";
    pub const FIRST_NAME: &str = "firstName";
    pub const LAST_NAME: &str = "lastName";
    pub const TEAM: &str = "team";
    pub const BIRTH_YEAR: &str = "birthYear";
    pub const DIVISION: &str = "division";
    pub const GENDER: &str = "gender";
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FormField {
    pub key: String,
    pub value: String,
}

impl FormField {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// An athlete's registration form answers for one event.
///
/// Owned by the registration subsystem; the meet core only reads it.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Submission {
    pub submission_id: Uuid,
    pub athlete_id: Uuid,
    pub event_id: Uuid,
    pub form_fields: Vec<FormField>,
    pub created_at: NaiveDateTime,
}

impl Submission {
    /// Value of the first field named `key`, or an empty string.
    pub fn field(&self, key: &str) -> &str {
        self.form_fields
            .iter()
            .find(|f| f.key == key)
            .map(|f| f.value.as_str())
            .unwrap_or("")
    }

    /// Opening weight for attempt 1. Missing or non-numeric values count as 0.
    pub fn opening_weight(&self) -> Decimal {
        self.field(fields::OPENING_WEIGHT)
            .trim()
            .parse::<Decimal>()
            .unwrap_or(Decimal::ZERO)
    }

    /// Declared body weight in kg. Missing or unparsable values count as 0.
    pub fn body_weight(&self) -> f64 {
        self.field(fields::BODY_WEIGHT)
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|bw| bw.is_finite())
            .unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission(form_fields: Vec<FormField>) -> Submission {
        Submission {
            submission_id: Uuid::new_v4(),
            athlete_id: Uuid::new_v4(),
            event_id: Uuid::new_v4(),
            form_fields,
            created_at: chrono::Utc::now().naive_utc(),
        }
    }

    #[test]
    fn test_opening_weight_parses_decimal() {
        let s = submission(vec![FormField::new(fields::OPENING_WEIGHT, " 142.5 ")]);
        assert_eq!(s.opening_weight(), Decimal::new(1425, 1));
    }

    #[test]
    fn test_opening_weight_defaults_to_zero() {
        assert_eq!(submission(vec![]).opening_weight(), Decimal::ZERO);

        let s = submission(vec![FormField::new(fields::OPENING_WEIGHT, "heavy")]);
        assert_eq!(s.opening_weight(), Decimal::ZERO);
    }

    #[test]
    fn test_body_weight_rejects_garbage() {
        let s = submission(vec![FormField::new(fields::BODY_WEIGHT, "NaN")]);
        assert_eq!(s.body_weight(), 0.0);

        let s = submission(vec![FormField::new(fields::BODY_WEIGHT, "82.4")]);
        assert_eq!(s.body_weight(), 82.4);
    }

    #[test]
    fn test_field_returns_first_match() {
        let s = submission(vec![
            FormField::new(fields::TEAM, "Iron Club"),
            FormField::new(fields::TEAM, "Other"),
        ]);
        assert_eq!(s.field(fields::TEAM), "Iron Club");
        assert_eq!(s.field(fields::DIVISION), "");
    }
}
