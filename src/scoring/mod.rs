pub mod features;

use crate::checklist::checklist;
use crate::types::catalog::{CatalogRecord, CostCategory, Level};
use crate::types::weights::WeightVector;
use features::{feature_vector, FeatureVector};
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Filters {
    pub complexity: Option<Level>,
    pub cost: Option<CostCategory>,
}

impl Filters {
    pub fn matches(&self, record: &CatalogRecord) -> bool {
        self.complexity
            .map_or(true, |complexity| record.complexity == complexity)
            && self.cost.map_or(true, |cost| record.cost == cost)
    }
}

#[derive(Debug, Clone)]
pub struct RecommendRequest<'a> {
    pub weights: WeightVector,
    pub function: Option<&'a str>,
    pub filters: Filters,
    pub top_k: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScoredCandidate<'a> {
    pub record: &'a CatalogRecord,
    pub score: u8,
    pub rationale: String,
    pub checklist: Vec<String>,
}

/// Similarity in (0,100]; identical vectors score 100.
pub fn similarity(features: &FeatureVector, weights: &WeightVector) -> u8 {
    let distance_sq: f64 = features
        .iter()
        .zip(weights.values().iter())
        .map(|(feature, weight)| (feature - weight).powi(2))
        .sum();
    (100.0 / (1.0 + distance_sq)).round() as u8
}

pub fn rationale(record: &CatalogRecord) -> String {
    format!(
        "Matched: complexity={}, cost={}, impact={}",
        record.complexity, record.cost, record.impact
    )
}

pub fn score_record<'a>(
    record: &'a CatalogRecord,
    weights: &WeightVector,
    function: Option<&str>,
) -> ScoredCandidate<'a> {
    let features = feature_vector(record, function);
    ScoredCandidate {
        record,
        score: similarity(&features, weights),
        rationale: rationale(record),
        checklist: checklist(record, weights.stage()),
    }
}

pub fn recommend<'a>(
    records: &'a [CatalogRecord],
    request: &RecommendRequest<'_>,
) -> Vec<ScoredCandidate<'a>> {
    let mut scored = records
        .iter()
        .filter(|record| request.filters.matches(record))
        .map(|record| score_record(record, &request.weights, request.function))
        .collect::<Vec<_>>();
    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored.truncate(request.top_k);
    scored
}
