//! Decide command - one-shot decision for debugging and scripting

use anyhow::Context;
use chrono::Utc;
use clap::Args;
use rand::Rng;

use crate::config::AppConfig;
use crate::domain::experiment::ExperimentId;
use crate::infrastructure::logging;

#[derive(Args)]
pub struct DecideArgs {
    /// Experiment to decide for
    #[arg(long)]
    pub experiment: String,

    /// Prior assignment cookie value (__utmx)
    #[arg(long, default_value = "")]
    pub assignment_cookie: String,

    /// Prior timestamp cookie value (__utmxx)
    #[arg(long, default_value = "")]
    pub timestamp_cookie: String,

    /// Fixed uniform draw in [0,1); random when omitted
    #[arg(long)]
    pub draw: Option<f64>,
}

/// Decide once against the configured provider and print the result
pub async fn run(args: DecideArgs) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().unwrap_or_default();
    logging::init_logging(&config.logging);

    let state = crate::create_app_state(&config);

    let experiment_id =
        ExperimentId::new(args.experiment).context("invalid experiment id")?;
    let draw = args
        .draw
        .unwrap_or_else(|| rand::thread_rng().gen_range(0.0..1.0));
    let now = Utc::now().timestamp() as u64;

    let decision = state
        .session
        .choose_variation(
            &experiment_id,
            &args.assignment_cookie,
            &args.timestamp_cookie,
            draw,
            now,
        )
        .await?;

    let output = serde_json::json!({
        "experiment_id": experiment_id.to_string(),
        "variation": decision.variation.value(),
        "fresh": decision.is_fresh(),
        "assignment_cookie": decision.cookies.as_ref().map(|c| c.assignment.clone()),
        "timestamp_cookie": decision.cookies.as_ref().map(|c| c.timestamp.clone()),
    });

    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}
