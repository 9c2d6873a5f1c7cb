use chrono::Utc;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub points: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promo_code: Option<String>,
}

impl Profile {
    pub fn new(name: &str, company: &str, role: &str) -> Self {
        Self {
            id: format!("user-{}", Utc::now().timestamp_millis()),
            name: name.trim().to_string(),
            company: company.trim().to_string(),
            role: role.trim().to_string(),
            points: 0,
            promo_code: None,
        }
    }
}
