use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use deadline_engine::compliance::federal_holidays::federal_holidays;
use deadline_engine::compliance::{DeadlineEngine, HolidayRegistry, RuleCatalog};
use deadline_engine::config::{self, Settings};
use deadline_engine::telemetry::init_tracing;
use shared_types::{format_deadline_table, AppError, CourtHoliday};

/// deadlines - court deadline calculator
#[derive(Parser, Debug)]
#[command(name = "deadlines")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Rule catalog file (overrides DEADLINE_RULES_PATH)
    #[arg(long, global = true)]
    rules: Option<PathBuf>,

    /// Holiday calendar file (overrides DEADLINE_HOLIDAYS_PATH)
    #[arg(long, global = true)]
    holidays: Option<PathBuf>,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compute every deadline of a case type from a base date
    Compute {
        /// Case type, e.g. motion, probate, trust-litigation
        #[arg(long)]
        case_type: String,

        /// Triggering event date (YYYY-MM-DD)
        #[arg(long)]
        base_date: String,

        /// Jurisdiction whose court holidays apply (overrides DEADLINE_JURISDICTION)
        #[arg(long)]
        jurisdiction: Option<String>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// List case types and their rules
    CaseTypes,

    /// List loaded court holidays
    Holidays {
        #[arg(long)]
        jurisdiction: Option<String>,

        #[arg(long)]
        year: Option<i32>,
    },

    /// Print the generated U.S. federal holidays for a year
    FederalHolidays {
        #[arg(long)]
        year: i32,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

fn settings(cli: &Cli, jurisdiction: Option<&String>) -> Settings {
    let mut settings = Settings::from_env();
    if let Some(rules) = &cli.rules {
        settings.rules_path = Some(rules.clone());
    }
    if let Some(holidays) = &cli.holidays {
        settings.holidays_path = Some(holidays.clone());
    }
    if let Some(jurisdiction) = jurisdiction {
        settings.jurisdiction = jurisdiction.clone();
    }
    settings
}

fn print_holidays(holidays: impl Iterator<Item = CourtHoliday>) {
    for h in holidays {
        println!("{}  {}  {}", h.date, h.date.format("%a"), h.name);
    }
}

fn run(cli: &Cli) -> Result<(), AppError> {
    match &cli.command {
        Commands::Compute {
            case_type,
            base_date,
            jurisdiction,
            format,
        } => {
            let settings = settings(cli, jurisdiction.as_ref());
            let engine: DeadlineEngine = config::build_engine(&settings)?;
            let deadlines = engine.compute_deadlines(case_type, base_date)?;
            match format {
                OutputFormat::Table => print!("{}", format_deadline_table(&deadlines)),
                OutputFormat::Json => {
                    let json = serde_json::to_string_pretty(&deadlines)
                        .map_err(|e| AppError::internal(e.to_string()))?;
                    println!("{json}");
                }
            }
        }
        Commands::CaseTypes => {
            let catalog: RuleCatalog = settings(cli, None).catalog()?;
            for case_type in catalog.case_types() {
                let rules = catalog.rules_for(case_type).unwrap_or_default();
                println!("{} ({} rules)", case_type, rules.len());
                for rule in rules {
                    println!("  {:<40} {}", rule.name, rule.offset_summary());
                }
            }
        }
        Commands::Holidays { jurisdiction, year } => {
            let settings = settings(cli, jurisdiction.as_ref());
            let registry: HolidayRegistry = settings.holidays()?;
            match year {
                Some(year) => {
                    let calendar = registry
                        .calendar(&settings.jurisdiction, *year)
                        .ok_or_else(|| {
                            AppError::not_found(format!(
                                "no holiday calendar for {} {}",
                                settings.jurisdiction, year
                            ))
                        })?;
                    print_holidays(calendar.iter());
                }
                None => print_holidays(registry.calendar_for(&settings.jurisdiction)?.iter()),
            }
        }
        Commands::FederalHolidays { year } => {
            print_holidays(federal_holidays(*year).into_iter())
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let json = serde_json::to_string(&e).unwrap_or_else(|_| e.to_string());
            eprintln!("{json}");
            ExitCode::FAILURE
        }
    }
}
