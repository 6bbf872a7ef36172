use crate::ai::genai_backend::Provider;
use crate::generation::types::CodeLevel;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// AI-powered Ansible playbook generator with step review
#[derive(Parser, Debug)]
#[command(
    name = "ansigen",
    about = "AI-powered Ansible playbook generator with step review",
    version,
    author,
    long_about = "ansigen turns a free-text requirement into an Ansible playbook using an LLM. \
                  It first proposes a short list of implementation steps which can be reviewed \
                  and reordered before the playbook itself is generated. Multiple AI providers \
                  are supported (Ollama, OpenAI, Claude, Gemini, Grok, Groq)."
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(short = 'v', long, global = true, help = "Increase verbosity")]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Quiet mode - suppress non-error output"
    )]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(
        about = "Generate an Ansible playbook from a requirement",
        long_about = "Sends the requirement to the configured LLM and prints the generated \
                      playbook together with its implementation steps.\n\n\
                      Examples:\n  \
                      ansigen generate \"install nginx\"\n  \
                      ansigen generate \"install nginx\" --level advanced --multi-file\n  \
                      ansigen generate --file reqs.txt --review --output ./playbooks\n  \
                      ansigen generate \"install nginx\" --format json"
    )]
    Generate(GenerateArgs),

    #[command(
        about = "Generate only the implementation step list",
        long_about = "Runs one generation call and prints just the proposed steps, \
                      without the playbook body.\n\n\
                      Examples:\n  \
                      ansigen steps \"install nginx\"\n  \
                      ansigen steps --file reqs.txt --format yaml"
    )]
    Steps(StepsArgs),

    #[command(
        about = "Check backend availability",
        long_about = "Checks whether the configured AI provider is reachable or credentialed.\n\n\
                      Examples:\n  \
                      ansigen health\n  \
                      ansigen health --provider ollama"
    )]
    Health(HealthArgs),
}

/// Arguments shared by every command that issues a generation request.
#[derive(Parser, Debug, Clone)]
pub struct RequestArgs {
    #[arg(
        value_name = "REQUIREMENTS",
        help = "Free-text requirement description (or use --file)"
    )]
    pub requirements: Option<String>,

    #[arg(
        long,
        value_name = "FILE",
        conflicts_with = "requirements",
        help = "Read the requirement description from a file"
    )]
    pub file: Option<PathBuf>,

    #[arg(
        short = 'l',
        long,
        value_enum,
        default_value = "basic",
        help = "How elaborate the generated playbook should be"
    )]
    pub level: CodeLevelArg,

    #[arg(long, help = "Ask the model to split output into multiple files")]
    pub multi_file: bool,

    #[arg(
        short = 'p',
        long,
        value_enum,
        help = "AI provider (overrides ANSIGEN_PROVIDER)"
    )]
    pub provider: Option<Provider>,

    #[arg(
        short = 'm',
        long,
        value_name = "MODEL",
        help = "Model name (provider-specific, e.g. 'qwen2.5-coder:7b' for Ollama)"
    )]
    pub model: Option<String>,

    #[arg(long, value_name = "SECONDS", help = "Request timeout in seconds")]
    pub timeout: Option<u64>,
}

#[derive(Parser, Debug, Clone)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub request: RequestArgs,

    #[arg(
        long,
        help = "Review and edit the proposed steps interactively before generating the playbook"
    )]
    pub review: bool,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,

    #[arg(
        short = 'o',
        long,
        value_name = "DIR",
        help = "Write generated files into this directory"
    )]
    pub output: Option<PathBuf>,

    #[arg(long, help = "Copy the generated playbook to the clipboard")]
    pub copy: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct StepsArgs {
    #[command(flatten)]
    pub request: RequestArgs,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,
}

#[derive(Parser, Debug, Clone)]
pub struct HealthArgs {
    #[arg(
        short = 'p',
        long,
        value_enum,
        help = "Specific provider to check (defaults to the configured one)"
    )]
    pub provider: Option<Provider>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeLevelArg {
    Basic,
    Advanced,
}

impl From<CodeLevelArg> for CodeLevel {
    fn from(arg: CodeLevelArg) -> Self {
        match arg {
            CodeLevelArg::Basic => CodeLevel::Basic,
            CodeLevelArg::Advanced => CodeLevel::Advanced,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormatArg {
    Json,
    Yaml,
    Human,
}

impl From<OutputFormatArg> for super::output::OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Json => super::output::OutputFormat::Json,
            OutputFormatArg::Yaml => super::output::OutputFormat::Yaml,
            OutputFormatArg::Human => super::output::OutputFormat::Human,
        }
    }
}
