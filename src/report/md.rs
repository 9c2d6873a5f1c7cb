use super::RadialView;
use crate::catalog;
use crate::ledger::FeedbackEntry;
use crate::scoring::ScoredCandidate;
use crate::types::catalog::CatalogRecord;

pub fn recommendations(candidates: &[ScoredCandidate<'_>]) -> String {
    let mut output = String::new();
    output.push_str("# Recommendations\n\n");
    if candidates.is_empty() {
        output.push_str("- none: no tools match the current filters\n");
        return output;
    }

    for candidate in candidates {
        let record = candidate.record;
        output.push_str(&format!("## {} ({})\n\n", record.name, candidate.score));
        if !record.description.is_empty() {
            output.push_str(&format!("{}\n\n", record.description));
        }
        output.push_str(&format!("{}\n\n", candidate.rationale));
        if !record.url.is_empty() {
            output.push_str(&format!("Site: {}\n\n", record.url));
        }
        output.push_str("Action checklist:\n\n");
        for (index, step) in candidate.checklist.iter().enumerate() {
            output.push_str(&format!("{}. {}\n", index + 1, step));
        }
        output.push('\n');
    }
    output
}

pub fn catalog(records: &[CatalogRecord]) -> String {
    let mut output = String::new();
    output.push_str("# Tools\n\n");
    for record in records {
        output.push_str(&format!(
            "- {} [{}]: {}\n  Function: {} | Complexity: {} | Cost: {}\n",
            record.name,
            record.id,
            record.description,
            record.categories.join(", "),
            record.complexity,
            record.cost
        ));
    }
    output
}

pub fn radial(view: &RadialView) -> String {
    let mut output = String::new();
    output.push_str("# Radial Weights\n\n");
    for axis in &view.axes {
        output.push_str(&format!(
            "- {}: {} (handle {:.1},{:.1})\n",
            axis.label, axis.value, axis.handle.x, axis.handle.y
        ));
    }
    output.push_str(&format!(
        "\nchanges applied: {}\nweights: {}\n",
        view.changes, view.weights
    ));
    output
}

pub fn feedback_log(entries: &[FeedbackEntry], records: &[CatalogRecord]) -> String {
    let mut output = String::new();
    output.push_str("# Feedback\n\n");
    if entries.is_empty() {
        output.push_str("- none\n");
        return output;
    }
    for entry in entries {
        let name = catalog::find(records, &entry.tool_id)
            .map(|record| record.name.as_str())
            .unwrap_or(entry.tool_id.as_str());
        output.push_str(&format!(
            "- {} - Rating: {} ({})\n",
            name,
            entry.rating,
            entry.timestamp.format("%Y-%m-%d %H:%M UTC")
        ));
        if !entry.comment.is_empty() {
            output.push_str(&format!("  {}\n", entry.comment));
        }
    }
    output
}
