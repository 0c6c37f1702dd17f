//! Clarity Engine CLI
//!
//! Command-line driver for scoring surveys and running projections by hand

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;

use clarity_engine::config::load_scenarios;
use clarity_engine::dashboard::DashboardReport;
use clarity_engine::profile::{FinancialProfile, RawSurvey};
use clarity_engine::projection::GrowthProjector;
use clarity_engine::scoring::{AllocationGuideline, ProfileMetrics, ScoreEngine};
use clarity_engine::{Dashboard, EngineConfig, JsonFileRepository, ProfileRepository, ScenarioRunner};

/// Clarity - financial health score and projections
#[derive(Parser)]
#[command(name = "clarity")]
#[command(about = "Score survey answers and project savings under market scenarios", long_about = None)]
#[command(version)]
struct Cli {
    /// Print results as JSON instead of a text summary
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score a survey
    Score {
        /// Survey answers as JSON
        survey: PathBuf,
    },

    /// Project a survey's savings under each scenario
    Project {
        /// Survey answers as JSON
        survey: PathBuf,

        /// Projection horizon in years
        #[arg(long, default_value = "17")]
        years: u32,

        /// Scenario table (name,annual_rate_percent)
        #[arg(long)]
        scenarios: Option<PathBuf>,
    },

    /// Normalize a survey and store it as the saved profile
    Save {
        /// Survey answers as JSON
        survey: PathBuf,

        /// Directory holding saved state
        #[arg(long, default_value = "state")]
        data_dir: PathBuf,
    },

    /// Full dashboard report for the saved profile
    Report {
        /// Directory holding saved state
        #[arg(long, default_value = "state")]
        data_dir: PathBuf,

        /// Directory holding scenarios.csv
        #[arg(long, default_value = "data")]
        config_dir: PathBuf,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Score { survey } => cmd_score(&survey, cli.json),
        Commands::Project {
            survey,
            years,
            scenarios,
        } => cmd_project(&survey, years, scenarios.as_deref(), cli.json),
        Commands::Save { survey, data_dir } => cmd_save(&survey, &data_dir),
        Commands::Report {
            data_dir,
            config_dir,
        } => cmd_report(&data_dir, &config_dir, cli.json),
    }
}

fn read_profile(path: &Path) -> Result<FinancialProfile> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read survey {}", path.display()))?;
    let raw: RawSurvey = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse survey {}", path.display()))?;
    Ok(raw.normalize())
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn cmd_score(survey: &Path, json: bool) -> Result<()> {
    let profile = read_profile(survey)?;
    let score = ScoreEngine::compute(&profile);

    if json {
        return print_json(&score);
    }

    let metrics = ProfileMetrics::from_profile(&profile);
    let amounts = score.breakdown.monthly_amounts(profile.income);
    let guideline = AllocationGuideline::default();
    let comparison = guideline.compare(&score.breakdown);

    println!("Clarity Score: {}/100", score.total);
    println!("=====================\n");
    for (label, pillar) in [
        ("Spending", &score.spending),
        ("Saving", &score.saving),
        ("Planning", &score.planning),
    ] {
        println!(
            "  {:<9} {:>2}/{:<2}  {}",
            label,
            pillar.points,
            pillar.max_points,
            pillar.status.as_str()
        );
    }
    println!();
    println!("  Expense ratio:    {:.1}%", metrics.expense_ratio * 100.0);
    println!("  Savings ratio:    {:.1}%", metrics.savings_ratio * 100.0);
    println!("  Emergency fund:   {:.1} months", metrics.emergency_months);
    println!();
    println!("Allocation (guideline {}/{}/{}):", guideline.needs_percent, guideline.wants_percent, guideline.savings_percent);
    println!("  Needs:   {:>3}%  ${:.0}  ({:+})", score.breakdown.needs_percent, amounts.needs, comparison.needs_delta);
    println!("  Wants:   {:>3}%  ${:.0}  ({:+})", score.breakdown.wants_percent, amounts.wants, comparison.wants_delta);
    println!("  Savings: {:>3}%  ${:.0}  ({:+})", score.breakdown.savings_percent, amounts.savings, comparison.savings_delta);

    Ok(())
}

fn cmd_project(survey: &Path, years: u32, scenarios: Option<&Path>, json: bool) -> Result<()> {
    let profile = read_profile(survey)?;

    let mut config = EngineConfig::default().with_horizon_years(years);
    if let Some(path) = scenarios {
        config = config.with_scenarios(
            load_scenarios(path)
                .with_context(|| format!("Failed to load scenarios from {}", path.display()))?,
        );
    }

    let principal = profile.net_worth();
    let contribution = profile.monthly_contribution();
    let runner = ScenarioRunner::new(config.scenarios.clone());
    let results = runner.run_with_goals(
        principal,
        contribution,
        config.horizon_months,
        &profile.goals,
    );

    if json {
        return print_json(&results);
    }

    println!("Projection over {} years", years);
    println!("  Starting balance:     ${:.2}", principal);
    println!("  Monthly contribution: ${:.2}\n", contribution);

    for result in &results {
        println!(
            "{:<12} {:>5.1}%  ${:>14.2}  (growth ${:.2})",
            result.scenario, result.annual_rate_percent, result.projected_value, result.growth
        );
        for goal in &result.goals {
            println!(
                "    {:<20} ${:>10.0}  {:>6.1}% of projection{}",
                goal.goal_name,
                goal.target_amount,
                goal.impact_percent,
                if goal.is_shortfall() { "  (shortfall)" } else { "" }
            );
        }
    }

    if let Some(neutral) = config.scenarios.get("neutral") {
        for goal in &profile.goals {
            let reached = GrowthProjector::months_to_reach(
                goal.target_amount,
                principal,
                contribution,
                neutral.annual_rate_percent,
                config.horizon_months,
            );
            match reached {
                Some(months) => println!("\n{} reached in {} months at {}%", goal.name, months, neutral.annual_rate_percent),
                None => println!("\n{} not reached within {} years at {}%", goal.name, years, neutral.annual_rate_percent),
            }
        }
    }

    Ok(())
}

fn cmd_save(survey: &Path, data_dir: &Path) -> Result<()> {
    let profile = read_profile(survey)?;
    let repository = JsonFileRepository::new(data_dir);

    repository
        .save_profile(&profile)
        .with_context(|| format!("Failed to save profile to {}", data_dir.display()))?;

    info!("saved profile to {}", data_dir.display());
    println!("Profile saved to {}", repository.root().display());
    Ok(())
}

fn cmd_report(data_dir: &Path, config_dir: &Path, json: bool) -> Result<()> {
    let config = EngineConfig::from_dir(config_dir)
        .with_context(|| format!("Failed to load config from {}", config_dir.display()))?;
    let repository = JsonFileRepository::new(data_dir);
    let saved_at = repository.profile_saved_at()?;

    let dashboard = Dashboard::new(repository, config);
    let report = dashboard
        .report()
        .with_context(|| format!("Failed to build report from {}", data_dir.display()))?;

    if json {
        return print_json(&report);
    }

    match saved_at {
        Some(at) => println!("Profile saved {}", at.format("%Y-%m-%d %H:%M UTC")),
        None => println!("No saved profile in {}", data_dir.display()),
    }
    print_report(&report);
    Ok(())
}

fn print_report(report: &DashboardReport) {
    println!("\nClarity Score: {}/100", report.score.total);
    println!(
        "  Spending {} | Saving {} | Planning {}",
        report.score.spending.status.as_str(),
        report.score.saving.status.as_str(),
        report.score.planning.status.as_str()
    );
    println!(
        "  Needs {}% ({:+}) | Wants {}% ({:+}) | Savings {}% ({:+})",
        report.score.breakdown.needs_percent,
        report.guideline.needs_delta,
        report.score.breakdown.wants_percent,
        report.guideline.wants_delta,
        report.score.breakdown.savings_percent,
        report.guideline.savings_delta
    );

    println!("\nScenarios (from ${:.0}, +${:.0}/month):", report.principal, report.monthly_contribution);
    for projection in &report.projections {
        println!(
            "  {:<12} ${:>14.2}  {} goal(s) short",
            projection.scenario,
            projection.projected_value,
            projection.shortfalls().count()
        );
    }

    println!("\nPresent vs future:");
    for scenario in &report.milestones {
        let line: Vec<String> = scenario
            .values
            .iter()
            .map(|v| format!("{}y ${:.0}", v.months / 12, v.total()))
            .collect();
        println!("  {:<12} {}", scenario.scenario, line.join("  "));
    }
}
