//! Rule loading and the `rules` command
//!
//! Rule texts come from the config unless a rule file overrides them.

use colored::*;
use eyre::{Context, Result};
use std::fs;
use std::path::Path;

use crate::cli::{OutputFormat, RuleArgs};
use crate::config::{Config, RulesConfig};
use crate::filter::RuleSet;

pub fn run(args: &RuleArgs, format: OutputFormat, config: &Config) -> Result<()> {
    let rules = load_rules(args, config)?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&rules)?);
        }
        OutputFormat::Yaml => {
            println!("{}", serde_yaml::to_string(&rules)?);
        }
        OutputFormat::Text => print_text(&rules),
    }

    Ok(())
}

/// Resolve the three rule texts from rule files, config, or nothing
pub fn rule_texts(args: &RuleArgs, config: &Config) -> Result<RulesConfig> {
    let base = if args.no_defaults {
        RulesConfig {
            remove: String::new(),
            replace: String::new(),
            append: String::new(),
        }
    } else {
        config.rules.clone()
    };

    Ok(RulesConfig {
        remove: read_or(args.remove_file.as_deref(), base.remove)?,
        replace: read_or(args.replace_file.as_deref(), base.replace)?,
        append: read_or(args.append_file.as_deref(), base.append)?,
    })
}

/// Resolve and compile the rule set
pub fn load_rules(args: &RuleArgs, config: &Config) -> Result<RuleSet> {
    let texts = rule_texts(args, config)?;
    Ok(RuleSet::compile(&texts.remove, &texts.replace, &texts.append))
}

fn read_or(path: Option<&Path>, fallback: String) -> Result<String> {
    match path {
        Some(path) => {
            let path = Config::expand_path(path);
            log::debug!("Reading rules from {}", path.display());
            fs::read_to_string(&path).with_context(|| format!("Failed to read rule file {}", path.display()))
        }
        None => Ok(fallback),
    }
}

fn print_text(rules: &RuleSet) {
    println!("{}", "Tag rules".bold());
    println!();

    println!("{} ({}):", "remove".cyan(), rules.remove.len());
    if rules.remove.is_empty() {
        println!("  {}", "(none)".dimmed());
    }
    for tag in &rules.remove {
        println!("  {}", tag);
    }
    println!();

    println!("{} ({}):", "replace".cyan(), rules.replace.len());
    if rules.replace.is_empty() {
        println!("  {}", "(none)".dimmed());
    }
    for (old, new) in &rules.replace {
        let new = if new.is_empty() { "(drop)".dimmed().to_string() } else { new.green().to_string() };
        println!("  {} {} {}", old, "→".blue(), new);
    }
    println!();

    println!("{} ({}):", "append".cyan(), rules.append.len());
    if rules.append.is_empty() {
        println!("  {}", "(none)".dimmed());
    }
    for tag in &rules.append {
        println!("  {}", tag);
    }
}
