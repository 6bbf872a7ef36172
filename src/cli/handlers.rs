//! Command handlers
//!
//! Each handler owns one subcommand end to end and returns a process exit
//! code. All user-facing output goes to stdout; diagnostics go to stderr via
//! tracing so piped output stays machine-readable.

use crate::cli::commands::{GenerateArgs, HealthArgs, RequestArgs, StepsArgs};
use crate::cli::output::{self, OutputFormat};
use crate::cli::review::{run_review, ReviewOutcome};
use crate::config::AnsigenConfig;
use crate::generation::service::GenerationService;
use crate::generation::types::GenerationOptions;
use crate::session::{Session, CODE_FAILURE_MESSAGE, STEPS_FAILURE_MESSAGE};
use crate::util::clipboard::copy_to_clipboard;
use anyhow::Context;
use indicatif::{ProgressBar, ProgressStyle};
use std::env;
use std::fs;
use std::time::Duration;
use tracing::{error, info};

const DEFAULT_OLLAMA_HOST: &str = "http://localhost:11434";

/// Generates a playbook, optionally after an interactive step review.
pub async fn handle_generate(args: &GenerateArgs, quiet: bool) -> i32 {
    let requirements = match resolve_requirements(&args.request) {
        Ok(requirements) => requirements,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            return 1;
        }
    };

    let config = build_config(&args.request);
    if let Err(e) = config.validate() {
        eprintln!("{}", e);
        return 1;
    }

    let service = GenerationService::new(config.create_backend());
    let options = request_options(&args.request);
    let mut session = Session::new(requirements, options);

    if args.review {
        // First call: steps only, for validation.
        let result = match run_request(&service, &mut session, STEPS_FAILURE_MESSAGE, quiet).await {
            Some(result) => result,
            None => return 1,
        };
        session.apply_validation(result.steps);

        let stdin = std::io::stdin();
        let mut stdout = std::io::stdout();
        let outcome = match run_review(&mut session, stdin.lock(), &mut stdout) {
            Ok(outcome) => outcome,
            Err(e) => {
                error!("Review aborted: {}", e);
                return 1;
            }
        };
        if outcome == ReviewOutcome::Cancelled {
            info!("Review cancelled; nothing generated");
            return 0;
        }
    }

    // Final call: full generation. The confirmed review re-sends the original
    // requirement text.
    let result = match run_request(&service, &mut session, CODE_FAILURE_MESSAGE, quiet).await {
        Some(result) => result,
        None => return 1,
    };
    session.apply_generation(result);

    let rendered = match output::render_result(
        &crate::generation::types::GenerationResult {
            steps: session.steps().to_vec(),
            code_blocks: session.code_blocks().to_vec(),
        },
        args.format.into(),
    ) {
        Ok(rendered) => rendered,
        Err(e) => {
            error!("Failed to render result: {}", e);
            return 1;
        }
    };
    print!("{}", rendered);

    if let Some(dir) = &args.output {
        match output::write_code_blocks(session.code_blocks(), dir) {
            Ok(written) => {
                if !quiet {
                    eprintln!("Wrote {} file(s) to {}", written.len(), dir.display());
                }
            }
            Err(e) => {
                error!("Failed to write files: {}", e);
                return 1;
            }
        }
    }

    if args.copy {
        let combined = session
            .code_blocks()
            .iter()
            .map(|b| b.code.as_str())
            .collect::<Vec<_>>()
            .join("\n\n");
        // Clipboard failures are logged inside; they never fail the command.
        copy_to_clipboard(&combined);
    }

    0
}

/// Generates and prints only the proposed step list.
pub async fn handle_steps(args: &StepsArgs, quiet: bool) -> i32 {
    let requirements = match resolve_requirements(&args.request) {
        Ok(requirements) => requirements,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            return 1;
        }
    };

    let config = build_config(&args.request);
    if let Err(e) = config.validate() {
        eprintln!("{}", e);
        return 1;
    }

    let service = GenerationService::new(config.create_backend());
    let mut session = Session::new(requirements, request_options(&args.request));

    let result = match run_request(&service, &mut session, STEPS_FAILURE_MESSAGE, quiet).await {
        Some(result) => result,
        None => return 1,
    };
    session.apply_validation(result.steps);

    match output::render_steps(session.steps(), args.format.into()) {
        Ok(rendered) => {
            print!("{}", rendered);
            0
        }
        Err(e) => {
            error!("Failed to render steps: {}", e);
            1
        }
    }
}

/// Checks provider availability: endpoint reachability for Ollama, credential
/// presence for hosted providers.
pub async fn handle_health(args: &HealthArgs) -> i32 {
    let config = AnsigenConfig::default();
    let provider = args.provider.unwrap_or(config.provider);

    match provider.api_key_var() {
        None => {
            let host =
                env::var("OLLAMA_HOST").unwrap_or_else(|_| DEFAULT_OLLAMA_HOST.to_string());
            let url = format!("{}/api/tags", host.trim_end_matches('/'));

            let client = reqwest::Client::new();
            match client
                .get(&url)
                .timeout(Duration::from_secs(5))
                .send()
                .await
            {
                Ok(response) if response.status().is_success() => {
                    println!("{}: available at {}", provider.name(), host);
                    0
                }
                Ok(response) => {
                    println!(
                        "{}: endpoint {} answered with status {}",
                        provider.name(),
                        host,
                        response.status()
                    );
                    1
                }
                Err(e) => {
                    println!("{}: unreachable at {} ({})", provider.name(), host, e);
                    1
                }
            }
        }
        Some(var) => {
            if env::var(var).map(|v| !v.trim().is_empty()).unwrap_or(false) {
                println!("{}: {} is set", provider.name(), var);
                0
            } else {
                println!("{}: {} is not set", provider.name(), var);
                1
            }
        }
    }
}

/// Runs one generation request through the session's busy lifecycle, with a
/// spinner as the busy indicator. Returns None after printing help on failure.
async fn run_request(
    service: &GenerationService,
    session: &mut Session,
    failure_message: &str,
    quiet: bool,
) -> Option<crate::generation::types::GenerationResult> {
    if let Err(e) = session.begin_request() {
        // Unreachable through the CLI flow, which awaits each call.
        error!("{}", e);
        return None;
    }

    let spinner = make_spinner(service.backend_name(), quiet);
    let outcome = service
        .generate(session.requirements(), session.options())
        .await;
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    match outcome {
        Ok(result) => Some(result),
        Err(e) => {
            session.fail_request(failure_message);
            error!("{}", e);
            eprintln!("{}", failure_message);
            eprintln!("\n{}", e.help_message());
            None
        }
    }
}

fn make_spinner(backend_name: &str, quiet: bool) -> Option<ProgressBar> {
    if quiet || !atty::is(atty::Stream::Stderr) {
        return None;
    }

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}").expect("static spinner template"),
    );
    spinner.set_message(format!("Waiting for {}...", backend_name));
    spinner.enable_steady_tick(Duration::from_millis(100));
    Some(spinner)
}

fn resolve_requirements(request: &RequestArgs) -> anyhow::Result<String> {
    if let Some(requirements) = &request.requirements {
        return Ok(requirements.clone());
    }
    if let Some(path) = &request.file {
        return fs::read_to_string(path)
            .map(|s| s.trim().to_string())
            .with_context(|| format!("Failed to read {}", path.display()));
    }
    anyhow::bail!("No requirements given. Provide them as an argument or with --file.")
}

fn build_config(request: &RequestArgs) -> AnsigenConfig {
    let mut config = AnsigenConfig::default();
    if let Some(provider) = request.provider {
        config.provider = provider;
        // A provider override without an explicit model must not keep another
        // provider's default model name.
        if request.model.is_none() && env::var("ANSIGEN_MODEL").is_err() {
            config.model = match provider {
                crate::ai::Provider::Ollama => "qwen2.5-coder:7b".to_string(),
                _ => "default-model".to_string(),
            };
        }
    }
    if let Some(model) = &request.model {
        config.model = model.clone();
    }
    if let Some(timeout) = request.timeout {
        config.request_timeout_secs = timeout;
    }
    config
}

fn request_options(request: &RequestArgs) -> GenerationOptions {
    GenerationOptions {
        code_level: request.level.into(),
        multi_file: request.multi_file,
    }
}
