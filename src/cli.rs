use clap::{Args, Parser, Subcommand, ValueEnum};
use std::io::IsTerminal;
use std::path::PathBuf;

/// Output format for commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    Text,
    /// JSON format
    Json,
    /// YAML format
    Yaml,
}

impl OutputFormat {
    /// Resolve the effective output format.
    /// If user specified a format, use it.
    /// Otherwise: TTY → Text, non-TTY (pipe) → Json
    pub fn resolve(user_choice: Option<OutputFormat>) -> OutputFormat {
        match user_choice {
            Some(fmt) => fmt,
            None => {
                if std::io::stdout().is_terminal() {
                    OutputFormat::Text
                } else {
                    OutputFormat::Json
                }
            }
        }
    }
}

#[derive(Parser)]
#[command(
    name = "tagfilter",
    about = "Remove, replace and append tags in comma-separated prompts",
    version,
    after_help = "Logs are written to: ~/.local/share/tagfilter/logs/tagfilter.log"
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to tagfilter.yaml config file")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true, help = "Enable verbose (debug) logging")]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, help = "Only log errors")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Where the three rule texts come from
#[derive(Args, Debug, Clone, Default)]
pub struct RuleArgs {
    /// File with tags to remove (one per line)
    #[arg(long)]
    pub remove_file: Option<PathBuf>,

    /// File with replacements (one `old > new` per line)
    #[arg(long)]
    pub replace_file: Option<PathBuf>,

    /// File with tags to always append (one per line)
    #[arg(long)]
    pub append_file: Option<PathBuf>,

    /// Ignore the configured rules; only rule files given here apply
    #[arg(long)]
    pub no_defaults: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Filter one or more prompts
    Process {
        /// Prompts to process (reads stdin if none given)
        prompts: Vec<String>,

        /// Parse stdin as JSON: a string or an array of strings
        #[arg(long, conflicts_with = "lines")]
        json: bool,

        /// Treat each non-empty stdin line as a separate prompt
        #[arg(long)]
        lines: bool,

        #[command(flatten)]
        rules: RuleArgs,

        /// Output format (default: text, even when piped)
        ///
        /// Unlike the inspection commands this does not switch to JSON on a
        /// pipe: `process` is a filter, so `a | tagfilter process | b` must
        /// pass plain prompts through.
        #[arg(long, short = 'o', value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Show the compiled rule set
    Rules {
        #[command(flatten)]
        rules: RuleArgs,

        /// Output format (default: text for TTY, json for pipes)
        #[arg(long, short = 'o', value_enum)]
        format: Option<OutputFormat>,
    },

    /// Inspect and invoke the pipeline node
    Node {
        #[command(subcommand)]
        action: NodeAction,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand)]
pub enum NodeAction {
    /// List registered nodes
    List,

    /// Show the node descriptor (inputs, outputs, defaults)
    Describe {
        /// Node identifier (defaults to the tag filter node)
        id: Option<String>,

        /// Output format (default: text for TTY, json for pipes)
        #[arg(long, short = 'o', value_enum)]
        format: Option<OutputFormat>,
    },

    /// Invoke the node with JSON inputs, writing JSON outputs
    Invoke {
        /// Inputs file (reads stdin if not provided)
        #[arg(long)]
        input: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show {
        /// Output format (default: text for TTY, json for pipes)
        #[arg(long, short = 'o', value_enum)]
        format: Option<OutputFormat>,
    },

    /// Get a configuration value
    Get {
        /// Configuration key (dot notation)
        key: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_process_with_rule_files() {
        let cli = Cli::try_parse_from([
            "tagfilter",
            "process",
            "--remove-file",
            "remove.txt",
            "--no-defaults",
            "a, b",
        ])
        .unwrap();

        match cli.command {
            Commands::Process {
                prompts, rules, format, ..
            } => {
                assert_eq!(prompts, vec!["a, b"]);
                assert_eq!(rules.remove_file, Some(PathBuf::from("remove.txt")));
                assert!(rules.no_defaults);
                assert_eq!(format, OutputFormat::Text);
            }
            _ => panic!("expected process command"),
        }
    }

    #[test]
    fn test_json_conflicts_with_lines() {
        let result = Cli::try_parse_from(["tagfilter", "process", "--json", "--lines"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_resolve_explicit_format() {
        assert_eq!(OutputFormat::resolve(Some(OutputFormat::Yaml)), OutputFormat::Yaml);
    }
}
