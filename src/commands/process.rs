use eyre::{Context, Result};
use std::io::{self, Read};

use crate::cli::{OutputFormat, RuleArgs};
use crate::commands::rules::load_rules;
use crate::config::Config;
use crate::filter::{self, Prompt};

/// How stdin is turned into a prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StdinMode {
    /// Whole input is one prompt
    Whole,
    /// One prompt per non-empty line
    Lines,
    /// A JSON string or array of strings
    Json,
}

impl StdinMode {
    pub fn from_flags(json: bool, lines: bool) -> Self {
        if json {
            StdinMode::Json
        } else if lines {
            StdinMode::Lines
        } else {
            StdinMode::Whole
        }
    }
}

pub fn run(prompts: Vec<String>, mode: StdinMode, args: &RuleArgs, format: OutputFormat, config: &Config) -> Result<()> {
    let input = if prompts.is_empty() {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf).context("Failed to read prompts from stdin")?;
        parse_input(&buf, mode)?
    } else {
        prompt_from_args(prompts)
    };

    let rules = load_rules(args, config)?;
    if rules.is_empty() {
        log::info!("No rules configured, prompts are only deduplicated");
    }
    log::info!("Processing {} prompt(s)", input.len());

    let output = filter::rewrite(input, &rules);
    print!("{}", render(&output, format)?);

    Ok(())
}

/// One argument is a single prompt, several are a batch
pub fn prompt_from_args(mut prompts: Vec<String>) -> Prompt {
    if prompts.len() == 1 {
        Prompt::Single(prompts.remove(0))
    } else {
        Prompt::Batch(prompts)
    }
}

/// Parse raw stdin according to `mode`
pub fn parse_input(raw: &str, mode: StdinMode) -> Result<Prompt> {
    let prompt = match mode {
        StdinMode::Whole => Prompt::Single(raw.trim_end_matches(['\n', '\r']).to_string()),
        StdinMode::Lines => Prompt::Batch(
            raw.lines()
                .filter(|line| !line.trim().is_empty())
                .map(str::to_string)
                .collect(),
        ),
        StdinMode::Json => serde_json::from_str(raw).context("Input must be a JSON string or array of strings")?,
    };
    Ok(prompt)
}

/// Render processed prompts; text output puts each prompt on its own line
pub fn render(output: &Prompt, format: OutputFormat) -> Result<String> {
    let rendered: String = match format {
        OutputFormat::Text => output.as_slice().iter().map(|line| format!("{}\n", line)).collect(),
        OutputFormat::Json => format!("{}\n", serde_json::to_string(output)?),
        OutputFormat::Yaml => serde_yaml::to_string(output)?,
    };
    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stdin_mode_from_flags() {
        assert_eq!(StdinMode::from_flags(false, false), StdinMode::Whole);
        assert_eq!(StdinMode::from_flags(false, true), StdinMode::Lines);
        assert_eq!(StdinMode::from_flags(true, false), StdinMode::Json);
    }

    #[test]
    fn test_prompt_from_args_shape() {
        assert_eq!(prompt_from_args(vec!["a".into()]), Prompt::Single("a".into()));
        assert_eq!(
            prompt_from_args(vec!["a".into(), "b".into()]),
            Prompt::Batch(vec!["a".into(), "b".into()])
        );
    }

    #[test]
    fn test_parse_input_whole_strips_trailing_newline() {
        let prompt = parse_input("a, b\n", StdinMode::Whole).unwrap();
        assert_eq!(prompt, Prompt::Single("a, b".into()));
    }

    #[test]
    fn test_parse_input_lines_skips_blank() {
        let prompt = parse_input("a, b\n\n  \nc\n", StdinMode::Lines).unwrap();
        assert_eq!(prompt, Prompt::Batch(vec!["a, b".into(), "c".into()]));
    }

    #[test]
    fn test_parse_input_json() {
        let prompt = parse_input(r#"["x", "y"]"#, StdinMode::Json).unwrap();
        assert_eq!(prompt, Prompt::Batch(vec!["x".into(), "y".into()]));

        let prompt = parse_input(r#""x""#, StdinMode::Json).unwrap();
        assert_eq!(prompt, Prompt::Single("x".into()));
    }

    #[test]
    fn test_parse_input_bad_json() {
        assert!(parse_input("{not json", StdinMode::Json).is_err());
        assert!(parse_input("42", StdinMode::Json).is_err());
    }

    #[test]
    fn test_render_text_and_json() {
        let batch = Prompt::Batch(vec!["a, b".into(), "c".into()]);
        assert_eq!(render(&batch, OutputFormat::Text).unwrap(), "a, b\nc\n");
        assert_eq!(render(&batch, OutputFormat::Json).unwrap(), "[\"a, b\",\"c\"]\n");

        let single = Prompt::Single("a".into());
        assert_eq!(render(&single, OutputFormat::Json).unwrap(), "\"a\"\n");
    }
}
