use crate::types::catalog::CatalogRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Track {
    Marketing,
    Finance,
    Product,
    Generic,
}

impl Track {
    fn for_category(category: &str) -> Self {
        let category = category.to_lowercase();
        if category.contains("marketing") {
            Self::Marketing
        } else if category.contains("finance") {
            Self::Finance
        } else if category.contains("product") || category.contains("dev") {
            Self::Product
        } else {
            Self::Generic
        }
    }

    fn steps(self) -> [&'static str; 2] {
        match self {
            Self::Marketing => [
                "Connect your CRM/email list (e.g. HubSpot/Sendgrid)",
                "Run a small test campaign or workflow",
            ],
            Self::Finance => [
                "Import financial records or connect accounting API",
                "Run sample reports",
            ],
            Self::Product => [
                "Connect repo/API keys",
                "Run a prototype task to validate output",
            ],
            Self::Generic => [
                "Read quickstart docs and run first tutorial",
                "Invite 1 team member for collaboration",
            ],
        }
    }
}

pub fn stage_hint(stage: f64) -> &'static str {
    if stage < 0.4 {
        "You are likely at Problem/Solution fit - consider low-cost pilot first"
    } else if stage < 0.8 {
        "Product/Market fit - run short MVP pilots and measure"
    } else {
        "Growth stage - plan for scaling and integration"
    }
}

pub fn checklist(record: &CatalogRecord, stage: f64) -> Vec<String> {
    let [first, second] = Track::for_category(record.primary_category()).steps();
    vec![
        format!("Create account on {}", record.name),
        first.to_string(),
        second.to_string(),
        stage_hint(stage).to_string(),
    ]
}
