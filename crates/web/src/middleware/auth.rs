use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use std::collections::HashMap;
use uuid::Uuid;

use crate::error::WebError;

/// Who is behind a validated API key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Caller {
    Official,
    Athlete(Uuid),
}

impl Caller {
    pub fn require_official(&self) -> Result<(), WebError> {
        match self {
            Self::Official => Ok(()),
            Self::Athlete(_) => Err(WebError::Forbidden(
                "Only officials can perform this action".to_string(),
            )),
        }
    }

    /// Officials may act for anyone, athletes only for themselves.
    pub fn can_act_for(&self, athlete_id: Uuid) -> bool {
        match self {
            Self::Official => true,
            Self::Athlete(id) => *id == athlete_id,
        }
    }
}

#[derive(Clone, Default)]
pub struct ApiKeys {
    keys: HashMap<String, Caller>,
}

impl ApiKeys {
    /// Official keys are plain comma separated tokens; athlete keys are
    /// comma separated `token:athlete_uuid` pairs.
    pub fn from_config(official_keys: &str, athlete_keys: &str) -> Result<Self, String> {
        let mut keys: HashMap<String, Caller> = split_keys(official_keys)
            .map(|token| (token.to_string(), Caller::Official))
            .collect();

        for entry in split_keys(athlete_keys) {
            let (token, athlete_id) = entry
                .split_once(':')
                .ok_or_else(|| format!("Athlete key '{entry}' must be token:athlete_id"))?;
            let athlete_id = Uuid::parse_str(athlete_id.trim())
                .map_err(|e| format!("Invalid athlete id in API key: {e}"))?;
            keys.insert(token.trim().to_string(), Caller::Athlete(athlete_id));
        }

        Ok(Self { keys })
    }

    pub fn caller(&self, key: &str) -> Option<Caller> {
        self.keys.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

fn split_keys(keys_str: &str) -> impl Iterator<Item = &str> {
    keys_str.split(',').map(str::trim).filter(|s| !s.is_empty())
}

pub async fn require_auth(
    State(api_keys): State<ApiKeys>,
    mut req: Request,
    next: Next,
) -> Result<Response, WebError> {
    let caller = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .and_then(|token| api_keys.caller(token.trim()));

    let Some(caller) = caller else {
        tracing::warn!("Invalid API key attempt");
        return Err(WebError::Unauthorized);
    };

    req.extensions_mut().insert(caller);
    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ATHLETE: &str = "6f1c1b8e-6a43-4c8e-9d57-2f7f0c3e9a10";

    #[test]
    fn test_parses_both_roles() {
        let keys =
            ApiKeys::from_config(" judge-1 , judge-2,", &format!("lifter-1:{ATHLETE}")).unwrap();

        assert_eq!(keys.len(), 3);
        assert_eq!(keys.caller("judge-2"), Some(Caller::Official));
        assert_eq!(
            keys.caller("lifter-1"),
            Some(Caller::Athlete(Uuid::parse_str(ATHLETE).unwrap()))
        );
        assert_eq!(keys.caller("nobody"), None);
    }

    #[test]
    fn test_rejects_malformed_athlete_keys() {
        assert!(ApiKeys::from_config("", "lifter-1").is_err());
        assert!(ApiKeys::from_config("", "lifter-1:not-a-uuid").is_err());
    }

    #[test]
    fn test_roles() {
        let athlete_id = Uuid::new_v4();
        let athlete = Caller::Athlete(athlete_id);

        assert!(Caller::Official.require_official().is_ok());
        assert!(athlete.require_official().is_err());
        assert!(athlete.can_act_for(athlete_id));
        assert!(!athlete.can_act_for(Uuid::new_v4()));
        assert!(Caller::Official.can_act_for(athlete_id));
    }
}
