//! Resplan - project pipeline forecasting and resource planning
//!
//! Results are printed to stdout as JSON; logs go to stderr.

#![allow(clippy::print_stdout)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use resplan_domain::{
    Allocation, CalcMode, Member, MonthKey, ProbabilityBracket, ProbabilityWeights, Project,
    ProjectStatus,
};
use resplan_lib::utils::command_helpers::parse_record;
use resplan_lib::utils::logging::init_tracing;
use resplan_lib::{commands, AppContext};
use serde::de::DeserializeOwned;
use serde::Serialize;

#[derive(Debug, Parser)]
#[command(name = "resplan", version, about = "Project pipeline forecasting and resource planning")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Cumulative sales for a fiscal year
    Summary {
        /// Fiscal year (April start); defaults to the current one
        #[arg(long)]
        fy: Option<i32>,
        /// `revenue` (end month) or `order` (start month)
        #[arg(long)]
        mode: Option<CalcMode>,
    },
    /// Pipeline statistics
    Stats,
    /// Member utilization matrix
    Matrix {
        /// Months to show (YYYY-MM); defaults to the configured window
        #[arg(long = "month")]
        months: Vec<MonthKey>,
    },
    /// Total allocation of one member in one month
    Utilization { member_id: String, month: MonthKey },
    /// List projects
    Projects {
        #[arg(long)]
        status: Option<ProjectStatus>,
    },
    /// Show, add, update, delete or convert a project
    #[command(subcommand)]
    Project(ProjectCommand),
    /// Add, update or delete a member
    #[command(subcommand)]
    Member(RecordCommand),
    /// Add, update or delete an allocation
    #[command(subcommand)]
    Allocation(RecordCommand),
    /// Show, set or reset probability weights
    #[command(subcommand)]
    Weights(WeightsCommand),
    /// Audit history within a day range
    History {
        #[arg(long)]
        from: Option<NaiveDate>,
        #[arg(long)]
        to: Option<NaiveDate>,
    },
    /// Ask the configured language model for advice on a project
    Advise {
        project_id: String,
        /// Keep the reply on the project
        #[arg(long)]
        save: bool,
    },
}

#[derive(Debug, Subcommand)]
enum ProjectCommand {
    Show { id: String },
    /// Add a project from a JSON file; a missing id is generated
    Add { file: PathBuf },
    /// Replace a project from a JSON file
    Update { file: PathBuf },
    Delete { id: String },
    /// Convert a won lead into an active project
    Convert {
        id: String,
        #[arg(long)]
        actual_revenue: Option<u64>,
    },
}

#[derive(Debug, Subcommand)]
enum RecordCommand {
    /// Add a record from a JSON file; a missing id is generated
    Add { file: PathBuf },
    /// Replace a record from a JSON file
    Update { file: PathBuf },
    Delete { id: String },
}

#[derive(Debug, Subcommand)]
enum WeightsCommand {
    Show,
    Set(WeightArgs),
    Reset,
}

/// Omitted brackets forecast as zero.
#[derive(Debug, Args)]
struct WeightArgs {
    #[arg(long)]
    high: Option<u8>,
    #[arg(long)]
    medium: Option<u8>,
    #[arg(long)]
    low: Option<u8>,
    #[arg(long)]
    uncertain: Option<u8>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let dotenv = dotenvy::dotenv();
    init_tracing();
    match dotenv {
        Ok(path) => tracing::debug!(path = %path.display(), "loaded .env"),
        Err(error) => tracing::debug!(%error, "no .env loaded"),
    }

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!(error = %format!("{error:#}"), "command failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let ctx = AppContext::new().context("failed to initialise resplan")?;

    match cli.command {
        Command::Summary { fy, mode } => print_json(&commands::sales_summary(&ctx, fy, mode)?),
        Command::Stats => print_json(&commands::pipeline_stats(&ctx)?),
        Command::Matrix { months } if months.is_empty() => {
            print_json(&commands::resource_matrix(&ctx)?)
        }
        Command::Matrix { months } => print_json(&commands::resource_matrix_for(&ctx, months)?),
        Command::Utilization { member_id, month } => {
            print_json(&commands::member_utilization(&ctx, &member_id, month)?)
        }
        Command::Projects { status } => print_json(&commands::list_projects(&ctx, status)?),
        Command::Project(command) => run_project(&ctx, command),
        Command::Member(RecordCommand::Add { file }) => {
            let member: Member = read_new_record(&file, "member")?;
            let id = member.id.clone();
            commands::add_member(&ctx, member)?;
            print_json(&id)
        }
        Command::Member(RecordCommand::Update { file }) => {
            commands::update_member(&ctx, read_json::<Member>(&file)?)?;
            Ok(())
        }
        Command::Member(RecordCommand::Delete { id }) => {
            print_json(&commands::delete_member(&ctx, &id)?)
        }
        Command::Allocation(RecordCommand::Add { file }) => {
            let allocation: Allocation = read_new_record(&file, "alloc")?;
            let id = allocation.id.clone();
            commands::add_allocation(&ctx, allocation)?;
            print_json(&id)
        }
        Command::Allocation(RecordCommand::Update { file }) => {
            commands::update_allocation(&ctx, read_json::<Allocation>(&file)?)?;
            Ok(())
        }
        Command::Allocation(RecordCommand::Delete { id }) => {
            print_json(&commands::delete_allocation(&ctx, &id)?)
        }
        Command::Weights(WeightsCommand::Show) => print_json(&commands::get_weights(&ctx)?),
        Command::Weights(WeightsCommand::Set(args)) => {
            let weights = ProbabilityWeights::empty()
                .with(ProbabilityBracket::High, args.high)
                .with(ProbabilityBracket::Medium, args.medium)
                .with(ProbabilityBracket::Low, args.low)
                .with(ProbabilityBracket::Uncertain, args.uncertain);
            print_json(&commands::set_weights(&ctx, weights)?)
        }
        Command::Weights(WeightsCommand::Reset) => print_json(&commands::reset_weights(&ctx)?),
        Command::History { from, to } => print_json(&commands::history(&ctx, from, to)?),
        Command::Advise { project_id, save } => {
            let advice = commands::project_advice(&ctx, &project_id, save).await?;
            println!("{advice}");
            Ok(())
        }
    }
}

fn run_project(ctx: &AppContext, command: ProjectCommand) -> anyhow::Result<()> {
    match command {
        ProjectCommand::Show { id } => print_json(&commands::get_project(ctx, &id)?),
        ProjectCommand::Add { file } => {
            let project: Project = read_new_record(&file, "project")?;
            let id = project.id().to_string();
            commands::add_project(ctx, project)?;
            print_json(&id)
        }
        ProjectCommand::Update { file } => {
            commands::update_project(ctx, read_json::<Project>(&file)?)?;
            Ok(())
        }
        ProjectCommand::Delete { id } => print_json(&commands::delete_project(ctx, &id)?),
        ProjectCommand::Convert { id, actual_revenue } => {
            print_json(&commands::convert_lead(ctx, &id, actual_revenue)?)
        }
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let raw =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("invalid record in {}", path.display()))
}

fn read_new_record<T: DeserializeOwned>(path: &Path, prefix: &str) -> anyhow::Result<T> {
    let raw =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    parse_record(&raw, prefix).with_context(|| format!("invalid record in {}", path.display()))
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
