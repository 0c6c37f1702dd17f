//! Score a JSON array of surveys in parallel
//!
//! Writes one CSV row per survey with pillar points and the allocation breakdown

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use rayon::prelude::*;
use serde::Serialize;

use clarity_engine::profile::RawSurvey;
use clarity_engine::scoring::{ProfileMetrics, ScoreEngine};

#[derive(Parser)]
#[command(name = "batch_score")]
#[command(about = "Score many surveys at once and write a CSV summary", long_about = None)]
struct Args {
    /// JSON file holding an array of surveys
    input: PathBuf,

    /// Output CSV path
    #[arg(short, long, default_value = "batch_scores.csv")]
    output: PathBuf,
}

/// One output row
#[derive(Debug, Serialize)]
struct ScoreRow {
    index: usize,
    name: String,
    total: u32,
    spending: u32,
    saving: u32,
    planning: u32,
    spending_status: &'static str,
    saving_status: &'static str,
    planning_status: &'static str,
    needs_percent: u32,
    wants_percent: u32,
    savings_percent: u32,
    emergency_months: String,
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    let start = Instant::now();

    let content = fs::read_to_string(&args.input)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;
    let surveys: Vec<RawSurvey> = serde_json::from_str(&content)
        .with_context(|| format!("Expected a JSON array of surveys in {}", args.input.display()))?;
    println!("Loaded {} surveys in {:?}", surveys.len(), start.elapsed());

    let score_start = Instant::now();

    // Every survey is scored independently
    let rows: Vec<ScoreRow> = surveys
        .par_iter()
        .enumerate()
        .map(|(index, survey)| {
            let profile = survey.normalize();
            let metrics = ProfileMetrics::from_profile(&profile);
            let score = ScoreEngine::compute_with_metrics(&profile, &metrics);

            ScoreRow {
                index,
                name: profile.respondent.name.clone(),
                total: score.total,
                spending: score.spending.points,
                saving: score.saving.points,
                planning: score.planning.points,
                spending_status: score.spending.status.as_str(),
                saving_status: score.saving.status.as_str(),
                planning_status: score.planning.status.as_str(),
                needs_percent: score.breakdown.needs_percent,
                wants_percent: score.breakdown.wants_percent,
                savings_percent: score.breakdown.savings_percent,
                emergency_months: format!("{:.2}", metrics.emergency_months),
            }
        })
        .collect();

    println!("Scored in {:?}", score_start.elapsed());

    let mut writer = csv::Writer::from_path(&args.output)
        .with_context(|| format!("Failed to create {}", args.output.display()))?;
    for row in &rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    println!("Output written to {}", args.output.display());

    if !rows.is_empty() {
        let mean = rows.iter().map(|r| r.total as f64).sum::<f64>() / rows.len() as f64;
        let high = rows.iter().filter(|r| r.total >= 80).count();
        println!("\nBatch Summary:");
        println!("  Surveys:      {}", rows.len());
        println!("  Mean score:   {:.1}", mean);
        println!("  80 and above: {}", high);
    }

    println!("\nTotal time: {:?}", start.elapsed());
    Ok(())
}
