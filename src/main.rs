use ansigen::cli::commands::{CliArgs, Commands};
use ansigen::cli::handlers::{handle_generate, handle_health, handle_steps};
use ansigen::util::logging::{self, LoggingConfig};
use ansigen::VERSION;

use clap::Parser;
use std::env;
use tracing::{debug, Level};

#[tokio::main]
async fn main() {
    let args = CliArgs::parse();
    init_logging_from_args(&args);

    debug!("ansigen v{} starting", VERSION);
    debug!("Arguments: {:?}", args);

    let exit_code = match &args.command {
        Commands::Generate(generate_args) => handle_generate(generate_args, args.quiet).await,
        Commands::Steps(steps_args) => handle_steps(steps_args, args.quiet).await,
        Commands::Health(health_args) => handle_health(health_args).await,
    };

    std::process::exit(exit_code);
}

fn init_logging_from_args(args: &CliArgs) {
    let level = if let Some(level_str) = &args.log_level {
        parse_level_or_warn(level_str)
    } else if args.verbose {
        Level::DEBUG
    } else if args.quiet {
        Level::ERROR
    } else {
        let level_str = env::var("ANSIGEN_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        parse_level_or_warn(&level_str)
    };

    logging::init_logging(&LoggingConfig::with_level(level));
}

fn parse_level_or_warn(level_str: &str) -> Level {
    logging::parse_level(level_str).unwrap_or_else(|| {
        eprintln!(
            "Invalid log level '{}', defaulting to INFO. Valid levels: trace, debug, info, warn, error",
            level_str
        );
        Level::INFO
    })
}
