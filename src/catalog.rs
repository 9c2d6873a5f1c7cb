use crate::error::{RadarError, Result};
use crate::types::catalog::{CatalogRecord, CostCategory, Level};
use std::path::Path;
use tracing::{debug, warn};

/// Loads the catalog, falling back to the built-in records on any failure.
pub fn load(path: &Path) -> Vec<CatalogRecord> {
    match read_catalog(path) {
        Ok(records) => {
            debug!(path = %path.display(), count = records.len(), "catalog loaded");
            records
        }
        Err(error) => {
            warn!(path = %path.display(), %error, "catalog unavailable, using built-in fallback");
            fallback_catalog()
        }
    }
}

fn read_catalog(path: &Path) -> Result<Vec<CatalogRecord>> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| RadarError::Data(format!("{}: {}", path.display(), e)))?;
    let records: Vec<CatalogRecord> = serde_json::from_str(&content)
        .map_err(|e| RadarError::Data(format!("{}: {}", path.display(), e)))?;
    if records.is_empty() {
        return Err(RadarError::Data(format!("{}: catalog is empty", path.display())));
    }
    Ok(records)
}

pub fn find<'a>(records: &'a [CatalogRecord], id: &str) -> Option<&'a CatalogRecord> {
    records.iter().find(|record| record.id == id)
}

pub fn fallback_catalog() -> Vec<CatalogRecord> {
    vec![
        record(
            "chatgpt",
            "ChatGPT (OpenAI)",
            "https://chat.openai.com/",
            &["General AI Assistant", "Content"],
            (Level::Low, CostCategory::Freemium, Level::High, Level::High),
            &[],
            "General-purpose LLM assistant for research, content, and prototyping.",
            &["llm", "assistant", "content"],
        ),
        record(
            "notion",
            "Notion AI",
            "https://www.notion.so/product/ai",
            &["Operations", "Knowledge Management"],
            (Level::Low, CostCategory::Freemium, Level::Medium, Level::Medium),
            &["GDPR"],
            "Knowledge-base and productivity platform with AI features.",
            &["docs", "kb", "ops"],
        ),
        record(
            "hubspot",
            "HubSpot",
            "https://www.hubspot.com/",
            &["Marketing", "Sales"],
            (Level::Medium, CostCategory::Subscription, Level::High, Level::High),
            &["GDPR"],
            "CRM and marketing automation with predictive features.",
            &["crm", "marketing", "sales"],
        ),
    ]
}

#[allow(clippy::too_many_arguments)]
fn record(
    id: &str,
    name: &str,
    url: &str,
    categories: &[&str],
    (complexity, cost, scalability, impact): (Level, CostCategory, Level, Level),
    compliance: &[&str],
    description: &str,
    tags: &[&str],
) -> CatalogRecord {
    CatalogRecord {
        id: id.to_string(),
        name: name.to_string(),
        url: url.to_string(),
        categories: owned(categories),
        complexity,
        cost,
        scalability,
        impact,
        compliance: owned(compliance),
        description: description.to_string(),
        tags: owned(tags),
    }
}

fn owned(values: &[&str]) -> Vec<String> {
    values.iter().map(ToString::to_string).collect()
}
