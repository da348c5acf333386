use clap::{Parser, Subcommand};
use medcalc_core::{
    config::reports_dir_from_env_value, numbered_advice, render_chat_response, report,
    AnalysisService, ConditionId, KnowledgeBase, MatchResult, CONDITION_NOT_FOUND,
    DEFAULT_MAX_BATCH, DEFAULT_MAX_MAGNITUDE, DEFAULT_REPORTS_DIR, DISCLAIMER,
};
use medcalc_files::ReportStore;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "medcalc")]
#[command(about = "Symptom advice lookup and number analysis from the command line")]
struct Cli {
    /// YAML knowledge base to use instead of the built-in one
    #[arg(long, global = true)]
    knowledge: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List all known conditions
    Conditions,
    /// Show symptoms, advice and prevention for one condition
    Condition {
        /// Condition name, e.g. "common cold"
        name: String,
    },
    /// Describe symptoms or name a condition and get advice
    Chat {
        /// Free text, e.g. "I have fever and chills"
        #[arg(required = true)]
        text: Vec<String>,
    },
    /// Analyse integers and print a report
    Analyze {
        /// Numbers to analyse
        #[arg(required = true, allow_negative_numbers = true)]
        numbers: Vec<i64>,
        /// Save the report; optionally give a filename
        #[arg(long, num_args = 0..=1)]
        save: Option<Option<String>>,
        /// Directory reports are saved in
        #[arg(long, default_value = DEFAULT_REPORTS_DIR)]
        reports_dir: String,
        /// Largest absolute value accepted
        #[arg(long, default_value_t = DEFAULT_MAX_MAGNITUDE)]
        max_magnitude: u64,
        /// Most numbers accepted in one run
        #[arg(long, default_value_t = DEFAULT_MAX_BATCH)]
        max_batch: usize,
    },
}

fn load_knowledge(path: Option<PathBuf>) -> Result<KnowledgeBase, Box<dyn std::error::Error>> {
    let knowledge = match path {
        Some(path) => KnowledgeBase::from_path(&path)?,
        None => KnowledgeBase::builtin()?,
    };
    Ok(knowledge)
}

fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Runs one command. Lookup misses and failed saves are errors so the exit code reflects them.
fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Some(Commands::Conditions) => {
            let knowledge = load_knowledge(cli.knowledge)?;
            for id in knowledge.list_ids() {
                println!("{}", id.display_name());
            }
        }
        Some(Commands::Condition { name }) => {
            let knowledge = load_knowledge(cli.knowledge)?;
            match knowledge.lookup(&ConditionId::normalise(&name)) {
                Some(condition) => {
                    println!("{}\n", condition.id.display_name());
                    println!("Symptoms: {}", condition.symptoms().collect::<Vec<_>>().join(", "));
                    println!("\nAdvice:\n{}", numbered_advice(condition));
                    println!("\nPrevention:");
                    for tip in condition.prevention() {
                        println!("• {}", tip);
                    }
                    println!("\n{}", DISCLAIMER);
                }
                None => {
                    let available: Vec<String> = knowledge
                        .list_ids()
                        .into_iter()
                        .map(ConditionId::display_name)
                        .collect();
                    return Err(format!(
                        "{}. Available: {}",
                        CONDITION_NOT_FOUND,
                        available.join(", ")
                    )
                    .into());
                }
            }
        }
        Some(Commands::Chat { text }) => {
            let knowledge = load_knowledge(cli.knowledge)?;
            let result = knowledge.matcher().match_input(&text.join(" "));
            println!("{}", render_chat_response(&result));
            if let MatchResult::Matched(found) = &result {
                if let Some(label) = found.confidence_label() {
                    println!("\n({})", label);
                }
            }
        }
        Some(Commands::Analyze {
            numbers,
            save,
            reports_dir,
            max_magnitude,
            max_batch,
        }) => {
            let analysis = AnalysisService::with_max_magnitude(max_magnitude)
                .with_max_batch(max_batch)
                .analyze(&numbers)?;
            let statistics = analysis.statistics();

            println!("=== ANALYSIS RESULT ===");
            for record in &analysis.results {
                println!("{}", report::render_record_line(record));
            }
            println!();
            print!("{}", report::render_statistics(&statistics));

            if let Some(filename) = save {
                let store = ReportStore::new(&reports_dir_from_env_value(Some(reports_dir)));
                let contents = report::render_report(&analysis.results, Some(&statistics));
                let path = store
                    .save(filename.as_deref(), &contents)
                    .map_err(|e| format!("Error saving report: {}", e))?;
                println!("\nReport saved as '{}'", path.display());
            }
        }
        None => {
            println!("Use 'medcalc --help' for commands");
        }
    }

    Ok(())
}
