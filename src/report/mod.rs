pub mod json;
pub mod md;

use crate::error::{RadarError, Result};
use crate::radial::layout::AxisLayout;
use crate::scoring::ScoredCandidate;
use crate::types::catalog::CatalogRecord;
use crate::types::weights::WeightVector;
use serde::Serialize;

#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Json,
    Md,
}

#[derive(Debug, Clone, Serialize)]
pub struct RadialView {
    pub weights: WeightVector,
    pub changes: usize,
    pub axes: Vec<AxisLayout>,
}

pub fn render_recommendations(
    candidates: &[ScoredCandidate<'_>],
    format: OutputFormat,
) -> Result<String> {
    match format {
        OutputFormat::Json => json::to_json(&candidates).map_err(RadarError::Json),
        OutputFormat::Md => Ok(md::recommendations(candidates)),
    }
}

pub fn render_catalog(records: &[CatalogRecord], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => json::to_json(&records).map_err(RadarError::Json),
        OutputFormat::Md => Ok(md::catalog(records)),
    }
}

pub fn render_radial(view: &RadialView, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => json::to_json(view).map_err(RadarError::Json),
        OutputFormat::Md => Ok(md::radial(view)),
    }
}
