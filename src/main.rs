use anyhow::Context;
use clap::Parser;
use curated_completion::config::cli::{Command, LogFormat};
use curated_completion::core::ConfigProvider;
use curated_completion::utils::error::{CandidateError, ErrorSeverity};
use curated_completion::utils::{logger, validation::Validate};
use curated_completion::{CliConfig, CompletionSession, FileStore, Settings};

fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    match cli.log_format {
        LogFormat::Compact => logger::init_cli_logger(cli.verbose),
        LogFormat::Json => logger::init_json_logger(cli.verbose),
    }
    tracing::debug!("CLI config: {:?}", cli);

    let settings = match cli
        .settings()
        .and_then(|s| s.validate().map(|_| s))
        .and_then(|s| cli.check_command(&s).map(|_| s))
    {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("Configuration validation failed: {}", e);
            tracing::error!("Suggestion: {}", e.recovery_suggestion());
            eprintln!("{}", e.user_friendly_message());
            std::process::exit(exit_code(&e));
        }
    };

    if cli.command == Command::Config {
        display_settings(&settings)?;
        return Ok(());
    }

    let backend = FileStore::new(settings.persistence_file_path());
    let mut session = CompletionSession::from_config(backend, &settings)
        .context("failed to build the completion source")?;
    tracing::debug!("Candidate file: {}", session.backend().path().display());

    // A candidate file we could not read is never overwritten.
    let restored = match session.start() {
        Ok(_) => true,
        Err(e) => {
            eprintln!("{}", e.user_friendly_message());
            eprintln!("Suggestion: {}", e.recovery_suggestion());
            if cli.command.writes_store() {
                std::process::exit(exit_code(&e));
            }
            false
        }
    };

    if let Err(e) = run_command(&mut session, &cli.command) {
        tracing::error!(
            "Command failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("{}", e.user_friendly_message());
        std::process::exit(exit_code(&e));
    }

    if !restored {
        return Ok(());
    }

    if let Err(e) = session.shutdown() {
        eprintln!("{}", e.user_friendly_message());
        eprintln!("Suggestion: {}", e.recovery_suggestion());
        std::process::exit(exit_code(&e));
    }

    Ok(())
}

fn run_command(
    session: &mut CompletionSession<FileStore>,
    command: &Command,
) -> Result<(), CandidateError> {
    match command {
        Command::Add { candidate } => {
            if !session.add_candidate(candidate)? {
                tracing::info!("{:?} is already a candidate", candidate);
            }
        }
        Command::Remove { candidate } => {
            if !session.delete_candidate(candidate) {
                tracing::info!("{:?} is not a candidate", candidate);
            }
        }
        Command::Clear => session.clear_all(),
        Command::List => print_lines(session.candidates("")),
        Command::Query { prefix } => print_lines(session.candidates(prefix)),
        Command::Complete { text, cursor } => {
            let cursor = cursor.unwrap_or(text.len());
            print_lines(session.complete(text, cursor));
        }
        Command::Save => session.save_now()?,
        Command::Config => {}
    }
    Ok(())
}

fn print_lines(values: Vec<String>) {
    for value in values {
        println!("{}", value);
    }
}

fn display_settings(settings: &Settings) -> anyhow::Result<()> {
    println!("Effective settings:");
    println!("  restore_on_startup: {}", settings.restore_on_startup());
    println!(
        "  persistence_file_path: {}",
        settings.persistence_file_path().display()
    );
    println!("  symbol_chars: {}", settings.symbol_chars());
    println!();
    print!(
        "{}",
        toml::to_string(settings).context("failed to render settings as TOML")?
    );
    Ok(())
}

fn exit_code(e: &CandidateError) -> i32 {
    match e.severity() {
        ErrorSeverity::Low => 2,
        ErrorSeverity::Medium => 3,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 4,
    }
}
