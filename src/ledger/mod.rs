pub mod store;

use crate::error::{RadarError, Result};
use crate::types::profile::Profile;
use crate::types::weights::WeightVector;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::{BTreeMap, HashSet};
use tracing::info;

pub const HIGH_RATING_POINTS: u32 = 10;
pub const NEUTRAL_RATING_POINTS: u32 = 5;
pub const DISTINCT_TOOL_BONUS: u32 = 20;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackEntry {
    pub id: u64,
    pub tool_id: String,
    pub user_id: String,
    pub rating: u8,
    pub comment: String,
    pub weights: WeightVector,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromoCode {
    pub code: String,
    pub issued_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserPointsState {
    pub user_id: String,
    pub points: u32,
    #[serde(default)]
    pub promo: Option<PromoCode>,
    #[serde(default)]
    pub distinct_tool_bonus_granted: bool,
}

impl UserPointsState {
    fn new(user_id: &str, points: u32) -> Self {
        Self {
            user_id: user_id.to_string(),
            points,
            promo: None,
            distinct_tool_bonus_granted: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FeedbackSubmission {
    pub tool_id: String,
    pub rating: u8,
    pub comment: String,
    pub weights: WeightVector,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FeedbackOutcome {
    pub entry_id: u64,
    pub points_awarded: u32,
    pub total_points: u32,
    pub promo_issued: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeedbackLedger {
    // most recent first
    #[serde(default)]
    entries: Vec<FeedbackEntry>,
    #[serde(default)]
    users: BTreeMap<String, UserPointsState>,
}

pub fn rating_points(rating: u8) -> u32 {
    match rating {
        rating if rating >= 4 => HIGH_RATING_POINTS,
        3 => NEUTRAL_RATING_POINTS,
        _ => 0,
    }
}

impl FeedbackLedger {
    pub fn entries(&self) -> &[FeedbackEntry] {
        &self.entries
    }

    pub fn user(&self, user_id: &str) -> Option<&UserPointsState> {
        self.users.get(user_id)
    }

    pub fn record_feedback(
        &mut self,
        user: Option<&Profile>,
        submission: FeedbackSubmission,
        promo_threshold: u32,
    ) -> Result<FeedbackOutcome> {
        let user = user.ok_or_else(|| {
            RadarError::Validation("no active user; log in before leaving feedback".to_string())
        })?;
        if !(1..=5).contains(&submission.rating) {
            return Err(RadarError::Validation(format!(
                "rating must be between 1 and 5 (got {})",
                submission.rating
            )));
        }
        let tool_id = submission.tool_id.trim().to_string();
        if tool_id.is_empty() {
            return Err(RadarError::Validation("tool id must not be empty".to_string()));
        }

        let entry_id = self.next_entry_id();
        self.entries.insert(
            0,
            FeedbackEntry {
                id: entry_id,
                tool_id: tool_id.clone(),
                user_id: user.id.clone(),
                rating: submission.rating,
                comment: submission.comment,
                weights: submission.weights,
                timestamp: Utc::now(),
            },
        );

        let rated_other_tool = self
            .entries
            .iter()
            .any(|entry| entry.user_id == user.id && entry.tool_id != tool_id);

        let state = self
            .users
            .entry(user.id.clone())
            .or_insert_with(|| UserPointsState::new(&user.id, user.points));
        let mut awarded = rating_points(submission.rating);
        if rated_other_tool && !state.distinct_tool_bonus_granted {
            state.distinct_tool_bonus_granted = true;
            awarded += DISTINCT_TOOL_BONUS;
        }
        state.points += awarded;
        let total_points = state.points;
        let needs_promo = total_points >= promo_threshold && state.promo.is_none();

        info!(
            user = %user.id,
            tool = %tool_id,
            rating = submission.rating,
            awarded,
            total_points,
            "feedback recorded"
        );

        let promo_issued = if needs_promo {
            Some(self.issue_promo(&user.id))
        } else {
            None
        };

        Ok(FeedbackOutcome {
            entry_id,
            points_awarded: awarded,
            total_points,
            promo_issued,
        })
    }

    fn next_entry_id(&self) -> u64 {
        self.entries
            .iter()
            .map(|entry| entry.id)
            .max()
            .map_or(1, |id| id + 1)
    }

    fn issue_promo(&mut self, user_id: &str) -> String {
        let taken = self
            .users
            .values()
            .filter_map(|state| state.promo.as_ref())
            .map(|promo| promo.code.clone())
            .collect::<HashSet<_>>();
        let issued_at = Utc::now();
        let code = (0u64..)
            .map(|nonce| promo_code(user_id, &issued_at, nonce))
            .find(|code| !taken.contains(code))
            .unwrap_or_default();

        if let Some(state) = self.users.get_mut(user_id) {
            state.promo = Some(PromoCode {
                code: code.clone(),
                issued_at,
            });
        }
        info!(user = %user_id, code = %code, "promo code issued");
        code
    }
}

fn promo_code(user_id: &str, issued_at: &DateTime<Utc>, nonce: u64) -> String {
    let seed = format!(
        "{user_id}:{}:{nonce}",
        issued_at.timestamp_nanos_opt().unwrap_or_default()
    );
    let digest = Sha256::digest(seed.as_bytes());
    let hex = format!("{digest:X}");
    format!("PROMO-{}", &hex[..6])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(id: &str) -> Profile {
        Profile {
            id: id.to_string(),
            name: "Ada".to_string(),
            company: "Analytical".to_string(),
            role: "founder".to_string(),
            points: 0,
            promo_code: None,
        }
    }

    fn submit(tool: &str, rating: u8) -> FeedbackSubmission {
        FeedbackSubmission {
            tool_id: tool.to_string(),
            rating,
            comment: String::new(),
            weights: WeightVector::default(),
        }
    }

    #[test]
    fn feedback_without_active_user_is_rejected() {
        let mut ledger = FeedbackLedger::default();
        let result = ledger.record_feedback(None, submit("chatgpt", 5), 50);
        assert!(matches!(result, Err(RadarError::Validation(_))));
        assert!(ledger.entries().is_empty());
    }

    #[test]
    fn out_of_range_rating_is_rejected() {
        let mut ledger = FeedbackLedger::default();
        let user = profile("u1");
        assert!(ledger.record_feedback(Some(&user), submit("chatgpt", 0), 50).is_err());
        assert!(ledger.record_feedback(Some(&user), submit("chatgpt", 6), 50).is_err());
    }

    #[test]
    fn rating_points_follow_fixed_rules() {
        assert_eq!(rating_points(5), 10);
        assert_eq!(rating_points(4), 10);
        assert_eq!(rating_points(3), 5);
        assert_eq!(rating_points(2), 0);
        assert_eq!(rating_points(1), 0);
    }

    #[test]
    fn first_feedback_ever_earns_no_bonus() {
        let mut ledger = FeedbackLedger::default();
        let user = profile("u1");
        let outcome = ledger
            .record_feedback(Some(&user), submit("chatgpt", 5), 50)
            .expect("feedback should record");
        assert_eq!(outcome.points_awarded, 10);
        assert_eq!(outcome.total_points, 10);
    }

    #[test]
    fn second_tool_grants_distinct_tool_bonus_once() {
        let mut ledger = FeedbackLedger::default();
        let user = profile("u1");
        ledger
            .record_feedback(Some(&user), submit("chatgpt", 2), 500)
            .expect("feedback should record");
        let second = ledger
            .record_feedback(Some(&user), submit("notion", 5), 500)
            .expect("feedback should record");
        assert_eq!(second.points_awarded, 30);
        assert_eq!(second.total_points, 30);

        let third = ledger
            .record_feedback(Some(&user), submit("hubspot", 5), 500)
            .expect("feedback should record");
        assert_eq!(third.points_awarded, 10);
    }

    #[test]
    fn repeat_feedback_on_same_tool_earns_no_bonus() {
        let mut ledger = FeedbackLedger::default();
        let user = profile("u1");
        for _ in 0..3 {
            let outcome = ledger
                .record_feedback(Some(&user), submit("chatgpt", 3), 50)
                .expect("feedback should record");
            assert_eq!(outcome.points_awarded, 5);
        }
    }

    #[test]
    fn other_users_feedback_does_not_count_toward_bonus() {
        let mut ledger = FeedbackLedger::default();
        ledger
            .record_feedback(Some(&profile("u1")), submit("chatgpt", 5), 50)
            .expect("feedback should record");
        let outcome = ledger
            .record_feedback(Some(&profile("u2")), submit("notion", 5), 50)
            .expect("feedback should record");
        assert_eq!(outcome.points_awarded, 10);
    }

    #[test]
    fn log_is_most_recent_first() {
        let mut ledger = FeedbackLedger::default();
        let user = profile("u1");
        ledger
            .record_feedback(Some(&user), submit("chatgpt", 5), 50)
            .expect("feedback should record");
        ledger
            .record_feedback(Some(&user), submit("notion", 4), 50)
            .expect("feedback should record");
        let tools = ledger
            .entries()
            .iter()
            .map(|entry| entry.tool_id.as_str())
            .collect::<Vec<_>>();
        assert_eq!(tools, vec!["notion", "chatgpt"]);
        assert_eq!(ledger.entries()[0].id, 2);
    }

    #[test]
    fn promo_is_issued_exactly_once() {
        let mut ledger = FeedbackLedger::default();
        let user = profile("u1");
        let mut issued = Vec::new();
        for (index, tool) in ["a", "b", "c", "d", "e", "f", "g", "h", "i"].iter().enumerate() {
            let outcome = ledger
                .record_feedback(Some(&user), submit(tool, 5), 50)
                .expect("feedback should record");
            if let Some(code) = outcome.promo_issued {
                issued.push((index, code));
            }
        }
        // 10 + 30 + 10 = 50 on the third submission
        assert_eq!(issued.len(), 1);
        assert_eq!(issued[0].0, 2);
        let code = &issued[0].1;
        assert!(code.starts_with("PROMO-"));
        assert_eq!(code.len(), 12);
        assert_eq!(
            ledger
                .user("u1")
                .and_then(|state| state.promo.as_ref())
                .map(|promo| promo.code.as_str()),
            Some(code.as_str())
        );
    }

    #[test]
    fn points_seed_from_profile() {
        let mut ledger = FeedbackLedger::default();
        let mut user = profile("u1");
        user.points = 45;
        let outcome = ledger
            .record_feedback(Some(&user), submit("chatgpt", 3), 50)
            .expect("feedback should record");
        assert_eq!(outcome.total_points, 50);
        assert!(outcome.promo_issued.is_some());
    }
}
