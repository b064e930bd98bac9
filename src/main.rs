//! Resume lens: AI-powered resume analysis against a job description

mod cli;
mod config;
mod error;
mod input;
mod llm;
mod output;
mod processing;

use clap::Parser;
use cli::{Cli, Commands, ConfigAction};
use config::Config;
use error::{Result, ResumeLensError};
use indicatif::{ProgressBar, ProgressStyle};
use input::manager::InputManager;
use llm::client::AnalysisClient;
use log::error;
use output::formatter::ReportGenerator;
use output::report::AnalysisReport;
use processing::analyzer::AnalysisEngine;
use std::process;
use std::time::{Duration, Instant};

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    // Load configuration
    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    // Execute command
    if let Err(e) = run_command(cli.command, config).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, config: Config) -> Result<()> {
    match command {
        Commands::Analyze {
            resume,
            job,
            job_text,
            model,
            output,
            save,
        } => {
            // Validate input files
            cli::validate_file_extension(&resume, &["pdf", "txt", "md"])
                .map_err(|e| ResumeLensError::InvalidInput(format!("Resume file: {}", e)))?;

            let output_format = cli::parse_output_format(&output).map_err(ResumeLensError::InvalidInput)?;

            println!("🚀 Resume analysis");
            println!("📄 Resume: {}", resume.display());

            // Resolve the job description from a file or inline text
            let job_description = match (&job, job_text) {
                (Some(path), _) => {
                    cli::validate_file_extension(path, &["txt", "md"])
                        .map_err(|e| ResumeLensError::InvalidInput(format!("Job description file: {}", e)))?;
                    println!("💼 Job Description: {}", path.display());
                    InputManager::new().extract_text(path).await?
                }
                (None, Some(text)) => {
                    println!("💼 Job Description: (inline text)");
                    text
                }
                (None, None) => {
                    return Err(ResumeLensError::MissingInput(
                        "provide a job description with --job or --job-text".to_string(),
                    ));
                }
            };

            // Apply the model override and resolve credentials
            let mut service = config.service.clone();
            if let Some(model) = model {
                service.model = model;
            }
            println!("🤖 Model: {}", service.model);

            let api_key = config.api_key()?;
            let client = AnalysisClient::new(&service, api_key)?;
            let engine = AnalysisEngine::new(client);

            let spinner = ProgressBar::new_spinner();
            spinner.set_style(
                ProgressStyle::with_template("{spinner} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
            spinner.set_message("Analyzing resume against job description...");
            spinner.enable_steady_tick(Duration::from_millis(100));

            let started = Instant::now();
            let outcome = engine.run(&resume, &job_description).await;
            spinner.finish_and_clear();

            let result = match outcome {
                Ok(result) => result,
                Err(ResumeLensError::EmptyDocument) => {
                    println!("❌ No text could be extracted from the document. Try a different file.");
                    return Err(ResumeLensError::EmptyDocument);
                }
                Err(e) => {
                    println!("❌ Analysis failed: {}", e);
                    return Err(e);
                }
            };

            let report = AnalysisReport::new(result, &service.model, started.elapsed().as_millis() as u64);

            // Color only for terminal output; saved reports stay plain
            let generator = ReportGenerator::new(config.output.color_output && save.is_none());
            let rendered = generator.render(&report, &output_format)?;

            match save {
                Some(path) => {
                    std::fs::write(&path, &rendered)?;
                    println!("💾 Report saved to {}", path.display());
                }
                None => println!("{}", rendered),
            }

            println!(
                "\n✅ Analysis complete! Resume score: {:.0}/100",
                report.analysis.resume_score
            );
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                println!("⚙️  Current Configuration\n");
                println!("Service Endpoint: {}", config.service.endpoint);
                println!("Model: {}", config.service.model);
                println!("API Key Variable: {}", config.service.api_key_env);
                println!("Timeout: {}s", config.service.timeout_secs);
                println!("Max Tokens: {}", config.service.max_tokens);
                println!("Temperature: {:.1}", config.service.temperature);
            }

            Some(ConfigAction::Reset) => {
                println!("🔄 Resetting configuration to defaults...");
                let default_config = Config::default();
                default_config.save()?;
                println!("✅ Configuration reset successfully!");
            }
        },
    }

    Ok(())
}
