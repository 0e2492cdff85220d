//! capability-analyzer: score a resume's skills and experience against a job

use anyhow::{anyhow, Context};
use capability_analyzer::catalog;
use capability_analyzer::cli::{self, Cli, Commands, ConfigAction};
use capability_analyzer::config::{Config, OutputFormat};
use capability_analyzer::error::CapabilityError;
use capability_analyzer::input::InputManager;
use capability_analyzer::llm;
use capability_analyzer::output::formatter::{save_report_to_file, suggest_filename, ReportGenerator};
use capability_analyzer::output::AnalysisReport;
use capability_analyzer::processing::experience::{detect_job_level, ExperienceClassifier, ExperienceStrategy};
use capability_analyzer::processing::{AnalysisRequest, CapabilityAnalyzer};
use clap::Parser;
use log::{error, info};
use std::path::Path;
use std::process;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let config = match Config::load_from(&config_path) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration from {}: {}", config_path.display(), e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config, &config_path).await {
        error!("Command failed: {:#}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, config: Config, config_path: &Path) -> anyhow::Result<()> {
    match command {
        Commands::Analyze {
            resume,
            job,
            sample,
            title,
            generative,
            format,
            detailed,
            save,
        } => {
            let output_format = match format {
                Some(format) => cli::parse_output_format(&format).map_err(|e| anyhow!(e))?,
                None => config.output.format,
            };
            let detailed = detailed || config.output.detailed;
            let use_generative_mode = generative || config.analysis.generative_by_default;

            let mut input_manager = InputManager::new();
            let resume_text = read_document(&mut input_manager, &resume, "resume").await?;

            let (job_description, job_source, job_title) = match (&job, &sample) {
                (_, Some(sample)) => {
                    let posting = catalog::find(sample).ok_or_else(|| {
                        anyhow!(
                            "Unknown sample job '{}'. Available: {}",
                            sample,
                            catalog::titles().collect::<Vec<_>>().join(", ")
                        )
                    })?;
                    let title = title.clone().unwrap_or_else(|| posting.title.to_string());
                    (posting.description.to_string(), format!("sample: {}", posting.title), title)
                }
                (Some(job), None) => {
                    let text = read_document(&mut input_manager, job, "job description").await?;
                    let title = title.clone().unwrap_or_default();
                    (text, job.display().to_string(), title)
                }
                (None, None) => return Err(anyhow!("Provide a job description file or --sample <title>")),
            };

            if job_title.trim().is_empty() {
                info!("No job title given; the role is treated as mid level");
            }

            let service = if use_generative_mode {
                llm::connect(&config.llm).context("Failed to set up the LLM service")?
            } else {
                None
            };

            let settings = config.settings().context("Invalid analysis settings")?;
            let analyzer = CapabilityAnalyzer::new(settings, service)?;

            if output_format == OutputFormat::Console {
                println!("🚀 Capability analysis");
                println!("📄 Resume: {}", resume.display());
                println!("💼 Job: {}", job_source);
                if detailed {
                    println!("\n📄 Resume preview:\n{}", cli::truncate_text(&resume_text, 300));
                    println!("\n💼 Job preview:\n{}", cli::truncate_text(&job_description, 300));
                }
            }

            let outcome = analyzer
                .analyze(&AnalysisRequest {
                    resume_text,
                    job_description,
                    job_title: job_title.clone(),
                    use_generative_mode,
                })
                .await;

            let report = AnalysisReport::new(outcome, resume.display().to_string(), job_source, job_title);
            let generator = ReportGenerator::with_options(config.output.color_output, detailed, true, true);
            println!("{}", generator.generate_report(&report, &output_format)?);

            if let Some(path) = save {
                let path = if path.is_dir() {
                    path.join(suggest_filename(&output_format, &resume.to_string_lossy(), true))
                } else {
                    path
                };
                let plain = ReportGenerator::with_options(false, detailed, true, true);
                let content = plain.generate_report(&report, &output_format)?;
                save_report_to_file(&content, &path)
                    .with_context(|| format!("Failed to save report to {}", path.display()))?;
                println!("💾 Report saved to {}", path.display());
            }
        }

        Commands::Inspect { file, title } => {
            if file.is_none() && title.is_none() {
                return Err(anyhow!("Provide --file and/or --title to inspect"));
            }

            if let Some(title) = title {
                println!("💼 Job title: {}", title);
                println!("   Level: {}", detect_job_level(&title));
            }

            if let Some(path) = file {
                let mut input_manager = InputManager::new();
                let text = read_document(&mut input_manager, &path, "document").await?;
                let settings = config.settings()?;
                let analyzer = CapabilityAnalyzer::new(settings, None)?;

                println!("\n📄 {} ({} characters)", path.display(), text.chars().count());
                println!("{}\n", cli::truncate_text(&text, 200));

                let configured = analyzer.classifier().strategy();
                for strategy in [ExperienceStrategy::Indicators, ExperienceStrategy::YearsPattern] {
                    let marker = if strategy == configured { " (configured)" } else { "" };
                    println!(
                        "🎓 Experience by {:?}{}: {}",
                        strategy,
                        marker,
                        ExperienceClassifier::new(strategy).detect_experience_level(&text)
                    );
                }

                let skills = analyzer.extractor().extract_skills(&text);
                if skills.is_empty() {
                    println!("\n🔍 No known skills found");
                } else {
                    println!("\n🔍 Skills by category:");
                    for (category, found) in &skills {
                        println!(
                            "  {:<22} {} (weight {})",
                            category.display_name(),
                            found.skills.join(", "),
                            found.weight
                        );
                    }
                }
            }
        }

        Commands::Samples { full } => {
            println!("📋 Sample jobs\n");
            for job in catalog::SAMPLE_JOBS {
                println!("• {} [{}]", job.title, detect_job_level(job.title));
                if full {
                    for line in job.description.lines() {
                        println!("    {}", line);
                    }
                    println!();
                }
            }
            println!("\n💡 Analyze against a sample with: capability-analyzer analyze -r <resume> --sample \"<title>\"");
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                println!("⚙️  Current Configuration ({})\n", config_path.display());
                let content = toml::to_string_pretty(&config).context("Failed to render configuration")?;
                println!("{}", content);
                let key_present = std::env::var(config.llm.api_key_env()).is_ok();
                println!(
                    "LLM credential ({}): {}",
                    config.llm.api_key_env(),
                    if key_present { "✅ present" } else { "❌ not set" }
                );
            }

            Some(ConfigAction::Reset) => {
                println!("🔄 Resetting configuration to defaults...");
                Config::default().save_to(config_path)?;
                println!("✅ Configuration reset successfully!");
            }

            Some(ConfigAction::Path) => {
                println!("{}", config_path.display());
            }
        },
    }

    Ok(())
}

/// Extract a document's text, explaining what to do when nothing can be read
async fn read_document(manager: &mut InputManager, path: &Path, label: &str) -> anyhow::Result<String> {
    cli::validate_file_extension(path, cli::DOCUMENT_EXTENSIONS)
        .map_err(|e| anyhow!("{} file {}: {}", label, path.display(), e))?;

    match manager.extract_text(path).await {
        Ok(text) => Ok(text),
        Err(CapabilityError::Extraction(failure)) => {
            eprintln!("❌ Could not read text from the {} ({}): {}", label, path.display(), failure);
            eprintln!("💡 {}", failure.hint());
            Err(anyhow!("text extraction failed for {}", path.display()))
        }
        Err(e) => Err(e).with_context(|| format!("Failed to read {} {}", label, path.display())),
    }
}
