mod catalog;
mod checklist;
mod cli;
mod config;
mod error;
mod geometry;
mod ledger;
mod radial;
mod relay;
mod report;
mod scoring;
mod session;
mod types;

use crate::error::RadarError;
use crate::types::config::RadarConfig;
use crate::types::profile::Profile;
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const EMPTY: i32 = 1;
    pub const INPUT_ERROR: i32 = 2;
    pub const RUNTIME_FAILURE: i32 = 3;
}

struct Output {
    quiet: bool,
}

impl Output {
    fn emit(&self, text: &str) {
        if !self.quiet {
            println!("{text}");
        }
    }
}

fn init_tracing(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) | (false, 0) => "error",
        (false, 1) => "info",
        (false, _) => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn catalog_path(root: &Path, cfg: &RadarConfig) -> PathBuf {
    root.join(cfg.catalog_path())
}

fn report_format(format: &cli::ReportFormat) -> report::OutputFormat {
    match format {
        cli::ReportFormat::Json => report::OutputFormat::Json,
        cli::ReportFormat::Md => report::OutputFormat::Md,
    }
}

fn require_profile(root: &Path) -> Result<Profile, RadarError> {
    session::load_profile(root)?.ok_or_else(|| {
        RadarError::Validation("no active user; run `toolradar login` first".to_string())
    })
}

fn run() -> Result<i32, RadarError> {
    let cli = cli::Cli::parse();
    init_tracing(cli.verbose, cli.quiet);
    let out = Output { quiet: cli.quiet };
    let root = cli.root.as_path();
    if !root.is_dir() {
        return Err(RadarError::Validation(format!(
            "root is not a directory: {}",
            root.display()
        )));
    }

    let cfg = config::load_config(root)?;

    match cli.command {
        cli::Commands::Login(cmd) => {
            if cmd.name.trim().is_empty() {
                return Err(RadarError::Validation("enter your name".to_string()));
            }
            let profile = Profile::new(&cmd.name, &cmd.company, &cmd.role);
            session::save_profile(root, &profile)?;
            info!(user = %profile.id, "profile saved");
            out.emit(&format!("Welcome, {}", profile.name));
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Profile => {
            let profile = require_profile(root)?;
            let ledger = ledger::store::load(root)?;
            let (points, promo) = match ledger.user(&profile.id) {
                Some(state) => (
                    state.points,
                    state.promo.as_ref().map(|promo| promo.code.clone()),
                ),
                None => (profile.points, profile.promo_code.clone()),
            };
            let company = if profile.company.is_empty() {
                "-"
            } else {
                profile.company.as_str()
            };
            out.emit(&format!("Welcome, {}", profile.name));
            out.emit(&format!("company: {company}"));
            out.emit(&format!("points: {points}"));
            if let Some(code) = promo {
                out.emit(&format!("promo code: {code}"));
            }
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Catalog(cmd) => {
            let records = catalog::load(&catalog_path(root, &cfg));
            out.emit(&report::render_catalog(&records, report_format(&cmd.format))?);
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Radial(cmd) => {
            let steps = radial::script::parse(&cmd.events)?;
            let weights = cmd.weights.unwrap_or_else(|| cfg.default_weights());
            let mut control = radial::RadialControl::new(cfg.ring(), weights);
            control.subscribe(|change| {
                debug!(
                    axis = change.axis.index(),
                    value = change.value,
                    weights = %change.weights,
                    "weight changed"
                );
            });
            let changes = radial::script::replay(&mut control, &steps);
            debug!(state = ?control.state(), changes = changes.len(), "replay finished");

            let view = report::RadialView {
                weights: control.weights(),
                changes: changes.len(),
                axes: radial::layout::axis_layouts(control.ring(), &control.weights()),
            };
            out.emit(&report::render_radial(&view, report_format(&cmd.format))?);
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Recommend(cmd) => {
            let records = catalog::load(&catalog_path(root, &cfg));
            let top_k = cmd.top.unwrap_or_else(|| cfg.top_k());
            if top_k == 0 {
                return Err(RadarError::Validation(
                    "--top must be greater than 0".to_string(),
                ));
            }
            let request = scoring::RecommendRequest {
                weights: cmd.weights.unwrap_or_else(|| cfg.default_weights()),
                function: cmd.function.as_deref(),
                filters: scoring::Filters {
                    complexity: cmd.complexity,
                    cost: cmd.cost,
                },
                top_k,
            };
            let ranked = scoring::recommend(&records, &request);
            out.emit(&report::render_recommendations(
                &ranked,
                report_format(&cmd.format),
            )?);
            if ranked.is_empty() {
                Ok(exit_code::EMPTY)
            } else {
                Ok(exit_code::SUCCESS)
            }
        }
        cli::Commands::Feedback(cmd) => {
            let mut profile = session::load_profile(root)?;
            let mut ledger = ledger::store::load(root)?;
            let outcome = ledger.record_feedback(
                profile.as_ref(),
                ledger::FeedbackSubmission {
                    tool_id: cmd.tool,
                    rating: cmd.rating,
                    comment: cmd.comment,
                    weights: cmd.weights.unwrap_or_else(|| cfg.default_weights()),
                },
                cfg.promo_threshold(),
            )?;
            ledger::store::save(root, &ledger)?;

            if let Some(profile) = profile.as_mut() {
                profile.points = outcome.total_points;
                if let Some(code) = &outcome.promo_issued {
                    profile.promo_code = Some(code.clone());
                }
                session::save_profile(root, profile)?;
            }

            out.emit("Thank you for your feedback!");
            out.emit(&format!(
                "points: +{} (total {})",
                outcome.points_awarded, outcome.total_points
            ));
            if let Some(code) = outcome.promo_issued {
                out.emit(&format!("Congrats! You earned a promo code: {code}"));
            }
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Feedbacks => {
            let ledger = ledger::store::load(root)?;
            let records = catalog::load(&catalog_path(root, &cfg));
            out.emit(&report::md::feedback_log(ledger.entries(), &records));
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Chat(cmd) => {
            let settings = cfg.relay_settings();
            let records = catalog::load(&catalog_path(root, &cfg));
            let context = relay::RelayContext {
                settings: &settings,
                credential: relay::credential_from_env(&settings),
                catalog: &records,
            };
            let upstream = relay::upstream::HttpUpstream::new(&settings);
            let response = relay::handle(
                &relay::RelayRequest::submit(&cmd.message),
                &context,
                &upstream,
            );
            let reply = response.into_result()?;
            out.emit(&reply);
            Ok(exit_code::SUCCESS)
        }
    }
}

fn main() {
    match run() {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
        }
        Err(e) => {
            eprintln!("error: {}", e);
            let code = if e.is_input() {
                exit_code::INPUT_ERROR
            } else {
                exit_code::RUNTIME_FAILURE
            };
            std::process::exit(code);
        }
    }
}
