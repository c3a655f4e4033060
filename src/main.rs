use std::path::PathBuf;

use anyhow::Context;
use chrono::Utc;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use gradescope::cohort::CohortGrader;
use gradescope::config::GradingConfig;
use gradescope::models::{Lookup, Subject};
use gradescope::projector::StudentProjector;
use gradescope::{loader, report, stats};

#[derive(Parser)]
#[command(name = "gradescope")]
#[command(about = "Score statistics, rankings and quota grades for a student roster", long_about = None)]
struct Cli {
    /// Student score CSV
    #[arg(long, global = true, default_value = "student_scores.csv")]
    csv: PathBuf,

    /// TOML file listing the cohort years and subjects in scope
    #[arg(long, global = true, env = "GRADESCOPE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Descriptive statistics and top/bottom students
    Summary {
        #[arg(long, default_value_t = 10)]
        top: usize,
        /// Write the summary here instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Top students of one year in one subject, with overall standing
    Leaderboard {
        #[arg(long)]
        year: u8,
        #[arg(long, value_enum)]
        subject: Subject,
        #[arg(long, default_value_t = 10)]
        limit: usize,
        #[arg(long)]
        json: bool,
    },
    /// Look up one student; omit --subject for the full profile
    Lookup {
        #[arg(long)]
        id: String,
        #[arg(long, value_enum)]
        subject: Option<Subject>,
        #[arg(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => GradingConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => GradingConfig::default(),
    };
    let table = loader::load_csv(&cli.csv)
        .with_context(|| format!("failed to load scores from {}", cli.csv.display()))?;
    info!(rows = table.len(), years = ?table.years(), "score table ready");

    let grader = CohortGrader::new(&config);
    let projector = StudentProjector::new(grader);

    match cli.command {
        Commands::Summary { top, out } => {
            let ranked = grader.grade_all(&table);
            let describe = stats::describe_subjects(&table, &config.subjects);
            let by_year = stats::means_by_year(&table, &config.subjects);
            let by_gender = stats::means_by_gender(&table, &config.subjects);
            let attendance = stats::attendance_by_year(&table);
            let top_rows = stats::top_n(&ranked, top);
            let bottom_rows = stats::bottom_n(&ranked, top);

            let summary = report::build_summary(
                Utc::now().date_naive(),
                &report::Summary {
                    subjects: &config.subjects,
                    describe: &describe,
                    by_year: &by_year,
                    by_gender: &by_gender,
                    attendance: &attendance,
                    top: &top_rows,
                    bottom: &bottom_rows,
                },
            );

            match out {
                Some(path) => {
                    std::fs::write(&path, summary)?;
                    println!("Summary written to {}.", path.display());
                }
                None => print!("{summary}"),
            }
        }
        Commands::Leaderboard {
            year,
            subject,
            limit,
            json,
        } => {
            let standings = projector.leaderboard(&table, year, subject, limit)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&standings)?);
            } else {
                print!("{}", report::build_leaderboard(year, subject, &standings));
            }
        }
        Commands::Lookup { id, subject, json } => {
            let Some(record) = table.find(&id) else {
                println!("Student '{id}' not found.");
                return Ok(());
            };
            let year = record.cohort_year;

            match subject {
                Some(subject) => match projector.project(&table, year, subject, &id)? {
                    Lookup::Found(standing) if json => {
                        println!("{}", serde_json::to_string_pretty(&standing)?)
                    }
                    Lookup::Found(standing) => print!("{}", report::build_standing(&standing)),
                    Lookup::EmptyCohort => println!("No data for year {year} {subject}."),
                    Lookup::StudentNotFound => {
                        println!("No {subject} result for student '{id}'.")
                    }
                },
                None => match projector.profile(&table, &id)? {
                    Lookup::Found(profile) if json => {
                        println!("{}", serde_json::to_string_pretty(&profile)?)
                    }
                    Lookup::Found(profile) => print!("{}", report::build_profile(&profile)),
                    Lookup::EmptyCohort => println!("No data for year {year}."),
                    Lookup::StudentNotFound => println!("No profile for student '{id}'."),
                },
            }
        }
    }

    Ok(())
}
