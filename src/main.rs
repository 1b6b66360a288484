use anyhow::{Context, Result};
use chrono::Datelike;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing::{debug, info};

use college_fit::colleges::{compare, CompareRequest};
use college_fit::config::{load_config, run_init_wizard, validate_config, Config};
use college_fit::interview::{self, PracticeSession};
use college_fit::output;
use college_fit::quiz::{self, QuizRecord};
use college_fit::scholarships::{find_eligible, ScholarshipQuery};
use college_fit::scoring::{ScoringConfig, ScoringEngine, ScoringError};

// Exit codes
const EXIT_SUCCESS: i32 = 0;
const EXIT_INPUT: i32 = 1;
const EXIT_CONFIG: i32 = 4;

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq)]
enum OutputFormat {
    /// Aligned table (colored on a terminal)
    #[default]
    Table,
    /// Tab-separated values for scripting
    Tsv,
    Json,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Rank colleges by fit for your SAT score and budget
    Compare {
        /// Your SAT score
        #[arg(long)]
        sat: f64,

        /// Maximum annual tuition you can pay
        #[arg(long)]
        budget: f64,

        /// Only colleges in this state (e.g., CA), or "any"
        #[arg(long)]
        location: Option<String>,

        /// Number of colleges to show (defaults to scoring.top_k)
        #[arg(long)]
        top: Option<usize>,

        /// Show the per-criterion score breakdown
        #[arg(long)]
        explain: bool,

        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },
    /// Answer a short quiz and get major recommendations
    Quiz {
        /// Answer keys in question order, e.g. a,c,b (skips the prompts)
        #[arg(long, value_delimiter = ',')]
        answers: Option<Vec<String>>,

        /// Number of majors to recommend (defaults to quiz.top_k)
        #[arg(long)]
        top: Option<usize>,

        /// Save the answers and recommendations to the quiz history
        #[arg(long)]
        save: bool,

        /// Show the most recent saved result instead of taking the quiz
        #[arg(long, conflicts_with_all = ["answers", "save"])]
        last: bool,

        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },
    /// List scholarships you are eligible for
    Scholarships {
        /// Your GPA
        #[arg(long)]
        gpa: f64,

        /// Intended major (e.g., STEM, Engineering); omit or "any" for all
        #[arg(long)]
        major: Option<String>,

        /// Hide scholarships whose deadline has passed
        #[arg(long)]
        open_only: bool,

        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },
    /// Estimate need-based and merit aid for one college
    Aid {
        /// Annual family income
        #[arg(long)]
        income: f64,

        /// Your GPA
        #[arg(long)]
        gpa: f64,

        /// Annual tuition of the college
        #[arg(long)]
        tuition: f64,

        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },
    /// Practice answering common college interview questions
    Interview {
        /// Number of questions to ask (defaults to interview.count)
        #[arg(long)]
        count: Option<usize>,

        /// Save the answers to the practice log
        #[arg(long)]
        save: bool,
    },
    /// Create a config file interactively
    Init,
}

#[derive(Parser, Debug)]
#[command(name = "college-fit")]
#[command(about = "Rank colleges, majors and scholarships by fit", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/college-fit/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

fn main() {
    let cli = Cli::parse();
    college_fit::logging::init_tracing(cli.verbose);

    // Init writes the config, so it must not require one to load
    if let Commands::Init = cli.command {
        match run_init_wizard(&mut college_fit::prompt::stdio(), cli.config) {
            Ok(_) => std::process::exit(EXIT_SUCCESS),
            Err(e) => {
                eprintln!("Init failed: {:#}", e);
                std::process::exit(EXIT_INPUT);
            }
        }
    }

    let config = match load_config(cli.config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    // Validate config at startup
    if let Err(errors) = validate_config(&config) {
        eprintln!("Config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    let result = match cli.command {
        Commands::Compare {
            sat,
            budget,
            location,
            top,
            explain,
            format,
        } => run_compare(&config, CompareRequest { sat, budget, location }, top, explain, format),
        Commands::Quiz {
            answers,
            top,
            save,
            last,
            format,
        } => {
            if last {
                show_last_quiz(format)
            } else {
                run_quiz(&config, answers, top, save, format)
            }
        }
        Commands::Scholarships {
            gpa,
            major,
            open_only,
            format,
        } => run_scholarships(&config, gpa, major, open_only, format),
        Commands::Aid {
            income,
            gpa,
            tuition,
            format,
        } => run_aid(&config, income, gpa, tuition, format),
        Commands::Interview { count, save } => run_interview(&config, count, save),
        Commands::Init => Ok(()),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(exit_code(&e));
    }

    std::process::exit(EXIT_SUCCESS);
}

/// Scoring config problems exit as config errors; everything else is an input error.
fn exit_code(error: &anyhow::Error) -> i32 {
    if error.downcast_ref::<ScoringError>().is_some() {
        EXIT_CONFIG
    } else {
        EXIT_INPUT
    }
}

fn build_engine(scoring: &ScoringConfig) -> Result<ScoringEngine> {
    ScoringEngine::new(scoring).context("Invalid scoring configuration")
}

fn run_compare(
    config: &Config,
    request: CompareRequest,
    top: Option<usize>,
    explain: bool,
    format: OutputFormat,
) -> Result<()> {
    let scoring = config.effective_scoring();
    let engine = build_engine(&scoring)?;

    let colleges = config.effective_colleges();
    let k = top.unwrap_or_else(|| scoring.effective_top_k());
    debug!(colleges = colleges.len(), k, "comparing colleges");

    let matches = compare(&colleges, &engine, &request, k);
    info!(shown = matches.len(), "ranked colleges");

    match format {
        OutputFormat::Table => {
            let table = output::format_college_table(
                &matches,
                engine.ceiling(),
                explain,
                output::should_use_colors(),
            );
            println!("{}", table);
        }
        OutputFormat::Tsv => {
            let tsv = output::format_college_tsv(&matches);
            if !tsv.is_empty() {
                println!("{}", tsv);
            }
        }
        OutputFormat::Json => println!("{}", output::format_college_json(&matches)?),
    }
    Ok(())
}

fn print_recommendations(recommendations: &[quiz::Recommendation], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => println!(
            "{}",
            output::format_recommendations(recommendations, output::should_use_colors())
        ),
        OutputFormat::Tsv => {
            let tsv = output::format_recommendations_tsv(recommendations);
            if !tsv.is_empty() {
                println!("{}", tsv);
            }
        }
        OutputFormat::Json => println!("{}", output::format_recommendations_json(recommendations)?),
    }
    Ok(())
}

fn run_quiz(
    config: &Config,
    answers: Option<Vec<String>>,
    top: Option<usize>,
    save: bool,
    format: OutputFormat,
) -> Result<()> {
    let quiz_config = config.effective_quiz();

    let (accumulator, answers) = match answers {
        Some(answers) => (quiz::score_answers(&quiz_config.questions, &answers)?, answers),
        None => quiz::run_interactive(&mut college_fit::prompt::stdio(), &quiz_config.questions)?,
    };

    let k = top.unwrap_or_else(|| quiz_config.effective_top_k());
    let recommendations = quiz_config.recommendations(&accumulator, k);

    if format == OutputFormat::Table {
        println!();
        println!("Your top {} recommended majors:", recommendations.len());
    }
    print_recommendations(&recommendations, format)?;

    if save {
        let path = quiz::get_history_path()?;
        quiz::append_record(
            &path,
            QuizRecord {
                taken_at: chrono::Utc::now(),
                answers,
                recommendations,
            },
        )?;
        eprintln!("Saved results to {}", path.display());
    }
    Ok(())
}

fn show_last_quiz(format: OutputFormat) -> Result<()> {
    let history = quiz::load_history(&quiz::get_history_path()?)?;
    let Some(record) = history.last() else {
        eprintln!("No saved quiz results. Run `college-fit quiz --save` first.");
        return Ok(());
    };

    if format == OutputFormat::Table {
        println!(
            "Quiz taken {} (answers: {})",
            record.taken_at.format("%Y-%m-%d %H:%M UTC"),
            record.answers.join(",")
        );
    }
    print_recommendations(&record.recommendations, format)
}

fn run_scholarships(
    config: &Config,
    gpa: f64,
    major: Option<String>,
    open_only: bool,
    format: OutputFormat,
) -> Result<()> {
    let scholarships = config.effective_scholarships();
    let query = ScholarshipQuery {
        gpa,
        major,
        open_only,
        today: chrono::Local::now().date_naive(),
    };

    let eligible = find_eligible(&scholarships, &query);
    debug!(total = scholarships.len(), eligible = eligible.len(), "filtered scholarships");

    match format {
        OutputFormat::Table => println!(
            "{}",
            output::format_scholarship_table(&eligible, query.today, output::should_use_colors())
        ),
        OutputFormat::Tsv => {
            let tsv = output::format_scholarship_tsv(&eligible, query.today);
            if !tsv.is_empty() {
                println!("{}", tsv);
            }
        }
        OutputFormat::Json => println!("{}", output::format_scholarship_json(&eligible, query.today)?),
    }
    Ok(())
}

fn run_interview(config: &Config, count: Option<usize>, save: bool) -> Result<()> {
    let interview_config = config.effective_interview();
    let count = count.unwrap_or_else(|| interview_config.effective_count());
    if count == 0 {
        anyhow::bail!("--count must be at least 1");
    }

    // Start further into the bank each day so sessions vary
    let offset = chrono::Local::now().ordinal0() as usize;
    let questions = interview_config.select(count, offset);
    debug!(asked = questions.len(), offset, "starting interview practice");

    let responses = interview::run_practice(&mut college_fit::prompt::stdio(), &questions)?;

    if save && !responses.is_empty() {
        let path = interview::get_log_path()?;
        interview::append_session(
            &path,
            PracticeSession {
                practiced_at: chrono::Utc::now(),
                responses,
            },
        )?;
        eprintln!("Saved responses to {}", path.display());
    }
    Ok(())
}

fn run_aid(config: &Config, income: f64, gpa: f64, tuition: f64, format: OutputFormat) -> Result<()> {
    if income < 0.0 || tuition < 0.0 {
        anyhow::bail!("Income and tuition must be non-negative");
    }

    let estimate = college_fit::aid::estimate_aid(&config.effective_aid(), income, gpa, tuition)?;

    match format {
        OutputFormat::Table => println!(
            "{}",
            output::format_aid_estimate(&estimate, output::should_use_colors())
        ),
        OutputFormat::Tsv => println!("{}", output::format_aid_tsv(&estimate)),
        OutputFormat::Json => println!("{}", output::format_aid_json(&estimate)?),
    }
    Ok(())
}
