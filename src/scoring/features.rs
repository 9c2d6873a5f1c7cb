use crate::types::catalog::{CatalogRecord, CostCategory, Level};
use crate::types::weights::AXIS_COUNT;

/// Business function that means "no preference".
pub const GENERAL_FUNCTION: &str = "General";

pub type FeatureVector = [f64; AXIS_COUNT];

pub fn scalability_value(level: Level) -> f64 {
    match level {
        Level::High => 1.0,
        Level::Medium => 0.6,
        Level::Low | Level::Other => 0.2,
    }
}

pub fn complexity_value(level: Level) -> f64 {
    match level {
        Level::Low => 0.2,
        Level::Medium | Level::Other => 0.5,
        Level::High => 0.85,
    }
}

pub fn cost_value(cost: CostCategory) -> f64 {
    match cost {
        CostCategory::Free => 0.1,
        CostCategory::Freemium => 0.3,
        CostCategory::Subscription => 0.7,
        CostCategory::Other => 0.4,
    }
}

pub fn function_fit(record: &CatalogRecord, function: Option<&str>) -> f64 {
    let Some(function) =
        function.filter(|function| !function.is_empty() && *function != GENERAL_FUNCTION)
    else {
        return 0.6;
    };
    if record.categories.is_empty() {
        return 0.6;
    }
    let needle = function.to_lowercase();
    if record
        .categories
        .iter()
        .any(|category| category.to_lowercase().contains(&needle))
    {
        1.0
    } else {
        0.4
    }
}

pub fn compliance_value(record: &CatalogRecord) -> f64 {
    if record.compliance.is_empty() {
        0.2
    } else {
        1.0
    }
}

pub fn feature_vector(record: &CatalogRecord, function: Option<&str>) -> FeatureVector {
    [
        scalability_value(record.scalability),
        function_fit(record, function),
        complexity_value(record.complexity),
        1.0 - cost_value(record.cost),
        compliance_value(record),
    ]
}
