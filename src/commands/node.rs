use colored::*;
use eyre::{Context, Result};
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use crate::cli::{NodeAction, OutputFormat};
use crate::config::Config;
use crate::node::{self, NodeDescriptor, NodeInputs, NodeRegistry, TAG_FILTER};

pub fn run(action: NodeAction, registry: &NodeRegistry) -> Result<()> {
    match action {
        NodeAction::List => list(registry),
        NodeAction::Describe { id, format } => {
            let id = id.as_deref().unwrap_or(TAG_FILTER.id);
            let node = registry
                .get(id)
                .ok_or_else(|| eyre::eyre!("Node '{}' is not registered", id))?;
            describe(node, OutputFormat::resolve(format))
        }
        NodeAction::Invoke { input } => invoke(input),
    }
}

fn list(registry: &NodeRegistry) -> Result<()> {
    println!("{}", "Registered nodes:".bold());
    println!();

    if registry.is_empty() {
        println!("  {}", "(none)".dimmed());
    }

    for node in registry.list() {
        println!("  {} {} {}", node.id.cyan(), "→".blue(), node.display_name);
        println!("    {}", node.category.dimmed());
    }

    Ok(())
}

fn describe(node: &NodeDescriptor, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(node)?);
        }
        OutputFormat::Yaml => {
            println!("{}", serde_yaml::to_string(node)?);
        }
        OutputFormat::Text => {
            println!("{} ({})", node.display_name.bold(), node.id.dimmed());
            println!("  {}", node.description);
            println!("  category: {}", node.category);
            println!();

            println!("{}:", "inputs".cyan());
            for input in node.inputs {
                let mut flags = vec![if input.required { "required" } else { "optional" }];
                if input.force_input {
                    flags.push("linked");
                }
                if input.accepts_list {
                    flags.push("list");
                }
                if input.multiline {
                    flags.push("multiline");
                }
                println!("  {} ({})", input.name.green(), flags.join(", ").dimmed());

                if let Some(default) = input.default {
                    for line in default.lines() {
                        println!("    {}", line.dimmed());
                    }
                }
            }
            println!();

            println!("{}:", "outputs".cyan());
            for output in node.outputs {
                println!("  {}", output.name.green());
            }
        }
    }

    Ok(())
}

fn invoke(input: Option<PathBuf>) -> Result<()> {
    let raw = match input {
        Some(path) => {
            let path = Config::expand_path(&path);
            fs::read_to_string(&path).with_context(|| format!("Failed to read inputs from {}", path.display()))?
        }
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf).context("Failed to read inputs from stdin")?;
            buf
        }
    };

    let inputs: NodeInputs = serde_json::from_str(&raw).context("Failed to parse node inputs")?;
    let outputs = node::invoke(inputs);

    println!("{}", serde_json::to_string(&outputs)?);
    Ok(())
}
