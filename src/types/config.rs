use crate::error::RadarError;
use crate::geometry::{Point, RingGeometry};
use crate::types::weights::{WeightVector, AXIS_COUNT};
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RadarConfig {
    pub radial: Option<RadialConfig>,
    pub scoring: Option<ScoringConfig>,
    pub ledger: Option<LedgerConfig>,
    pub catalog: Option<CatalogConfig>,
    pub relay: Option<RelayConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RadialConfig {
    pub center_x: Option<f64>,
    pub center_y: Option<f64>,
    pub min_radius: Option<f64>,
    pub max_radius: Option<f64>,
    pub default_weights: Option<Vec<f64>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScoringConfig {
    pub top_k: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LedgerConfig {
    pub promo_threshold: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogConfig {
    pub path: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RelayConfig {
    pub endpoint: Option<String>,
    pub model: Option<String>,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
    pub api_key_env: Option<String>,
    pub context_tools: Option<usize>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RelaySettings {
    pub endpoint: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub api_key_env: String,
    pub context_tools: usize,
}

impl Default for RelaySettings {
    fn default() -> Self {
        Self {
            endpoint: "https://api.openai.com/v1/chat/completions".to_string(),
            model: "gpt-4o-mini".to_string(),
            max_tokens: 350,
            temperature: 0.2,
            api_key_env: "OPENAI_API_KEY".to_string(),
            context_tools: 6,
        }
    }
}

pub const DEFAULT_TOP_K: usize = 3;
pub const DEFAULT_PROMO_THRESHOLD: u32 = 50;
pub const DEFAULT_CATALOG_PATH: &str = "data/tools.json";

impl RadarConfig {
    pub fn ring(&self) -> RingGeometry {
        let defaults = RingGeometry::default();
        match &self.radial {
            Some(radial) => RingGeometry {
                center: Point::new(
                    radial.center_x.unwrap_or(defaults.center.x),
                    radial.center_y.unwrap_or(defaults.center.y),
                ),
                min_radius: radial.min_radius.unwrap_or(defaults.min_radius),
                max_radius: radial.max_radius.unwrap_or(defaults.max_radius),
            },
            None => defaults,
        }
    }

    pub fn default_weights(&self) -> WeightVector {
        self.radial
            .as_ref()
            .and_then(|radial| radial.default_weights.clone())
            .and_then(|values| WeightVector::try_from(values).ok())
            .unwrap_or_default()
    }

    pub fn top_k(&self) -> usize {
        self.scoring
            .as_ref()
            .and_then(|scoring| scoring.top_k)
            .unwrap_or(DEFAULT_TOP_K)
    }

    pub fn promo_threshold(&self) -> u32 {
        self.ledger
            .as_ref()
            .and_then(|ledger| ledger.promo_threshold)
            .unwrap_or(DEFAULT_PROMO_THRESHOLD)
    }

    pub fn catalog_path(&self) -> &str {
        self.catalog
            .as_ref()
            .and_then(|catalog| catalog.path.as_deref())
            .unwrap_or(DEFAULT_CATALOG_PATH)
    }

    pub fn relay_settings(&self) -> RelaySettings {
        let defaults = RelaySettings::default();
        match &self.relay {
            Some(relay) => RelaySettings {
                endpoint: relay.endpoint.clone().unwrap_or(defaults.endpoint),
                model: relay.model.clone().unwrap_or(defaults.model),
                max_tokens: relay.max_tokens.unwrap_or(defaults.max_tokens),
                temperature: relay.temperature.unwrap_or(defaults.temperature),
                api_key_env: relay.api_key_env.clone().unwrap_or(defaults.api_key_env),
                context_tools: relay.context_tools.unwrap_or(defaults.context_tools),
            },
            None => defaults,
        }
    }

    pub fn validate(&self) -> Result<(), RadarError> {
        let ring = self.ring();
        if !(ring.min_radius >= 0.0 && ring.max_radius > ring.min_radius) {
            return Err(RadarError::Config(format!(
                "radial.max_radius ({}) must be greater than radial.min_radius ({}) and both non-negative",
                ring.max_radius, ring.min_radius
            )));
        }

        if let Some(weights) = self
            .radial
            .as_ref()
            .and_then(|radial| radial.default_weights.as_ref())
        {
            if weights.len() != AXIS_COUNT {
                return Err(RadarError::Config(format!(
                    "radial.default_weights must have {AXIS_COUNT} values (found {})",
                    weights.len()
                )));
            }
            if weights.iter().any(|weight| !(0.0..=1.0).contains(weight)) {
                return Err(RadarError::Config(
                    "radial.default_weights values must be between 0.0 and 1.0".to_string(),
                ));
            }
        }

        if self.top_k() == 0 {
            return Err(RadarError::Config(
                "scoring.top_k must be greater than 0".to_string(),
            ));
        }

        if self.promo_threshold() == 0 {
            return Err(RadarError::Config(
                "ledger.promo_threshold must be greater than 0".to_string(),
            ));
        }

        let relay = self.relay_settings();
        if relay.api_key_env.trim().is_empty() {
            return Err(RadarError::Config(
                "relay.api_key_env must name an environment variable".to_string(),
            ));
        }

        Ok(())
    }
}
