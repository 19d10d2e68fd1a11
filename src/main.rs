use clap::Parser;
use ezextractor::{
    Cli, DialoguerPrompter, ExtractorError, EzExtractor, OutputFormatter, UserFriendlyError,
};
use std::process;

#[tokio::main]
async fn main() {
    let exit_code = run().await;
    process::exit(exit_code);
}

async fn run() -> i32 {
    // Parse CLI arguments
    let cli = Cli::parse();
    setup_logging(&cli);

    // Handle special commands first
    if cli.generate_config {
        return handle_generate_config(&cli);
    }

    let extractor = match EzExtractor::from_cli(&cli) {
        Ok(extractor) => extractor,
        Err(e) => {
            print_startup_error(&cli, &e);
            return 1;
        }
    };

    let mut prompter = DialoguerPrompter::new();
    match extractor.run(&cli, &mut prompter).await {
        Ok(output) => {
            log::info!(
                "Run finished: {} found, {} not found, {} errors",
                output.progress.found,
                output.progress.not_found,
                output.progress.errors.len()
            );
            0
        }
        Err(e) => {
            extractor.handle_error(&e);
            1
        }
    }
}

fn handle_generate_config(cli: &Cli) -> i32 {
    let config_path = cli
        .config
        .as_ref()
        .map(|p| p.to_string_lossy().to_string())
        .unwrap_or_else(|| ezextractor::config::DEFAULT_CONFIG_FILE.to_string());

    match EzExtractor::generate_sample_config(&config_path) {
        Ok(()) => {
            println!("Generated sample configuration file: {}", config_path);
            println!("\nTo use this configuration:");
            println!("  ezextractor --config {}", config_path);
            println!("\nEdit the file to customize settings for your needs.");
            0
        }
        Err(e) => {
            eprintln!("Failed to generate configuration file: {}", e.user_message());
            if let Some(suggestion) = e.suggestion() {
                eprintln!("Suggestion: {}", suggestion);
            }
            1
        }
    }
}

fn print_startup_error(cli: &Cli, error: &ExtractorError) {
    let formatter = OutputFormatter::new(cli.output_mode(), 0, false);
    formatter.print_user_friendly_error(error);
}

fn log_filter(cli: &Cli) -> &'static str {
    if cli.quiet {
        "ezextractor=error"
    } else {
        match cli.verbose {
            0 => "ezextractor=warn",
            1 => "ezextractor=info",
            _ => "ezextractor=debug",
        }
    }
}

fn setup_logging(cli: &Cli) {
    // RUST_LOG takes precedence over the verbosity flags
    let env = env_logger::Env::default().default_filter_or(log_filter(cli));
    let _ = env_logger::Builder::from_env(env)
        .target(env_logger::Target::Stderr)
        .format_timestamp(None)
        .try_init();
}
