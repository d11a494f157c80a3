use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use mkit_collections::{LinkedList, List};
use mkit_concurrent::{ConcurrentLinkedQueue, QueueError, StressRunner};
use mkit_core::{init_tracing, ConfigManager, MkitConfig};
use serde::Serialize;
use std::path::PathBuf;
use tracing::debug;

#[derive(Parser)]
#[command(name = "mkit")]
#[command(about = "mkit CLI - Lock-free queue stress runs and collection demos", long_about = None)]
#[command(version)]
struct Cli {
    /// Output format (json, pretty)
    #[arg(short, long, global = true, default_value = "pretty")]
    output: OutputFormat,

    /// Config file to load instead of the default lookup
    #[arg(short, long, global = true, env = "MKIT_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    Json,
    Pretty,
}

#[derive(Subcommand)]
enum Commands {
    /// Hammer the queue with concurrent producers and consumers
    Stress {
        /// Producer threads
        #[arg(long)]
        producers: Option<usize>,

        /// Consumer threads
        #[arg(long)]
        consumers: Option<usize>,

        /// Values enqueued by each producer
        #[arg(long)]
        per_producer: Option<usize>,

        /// Time budget for the whole run, in milliseconds
        #[arg(long)]
        timeout_ms: Option<u64>,
    },

    /// Walk through a small scenario step by step
    #[command(subcommand)]
    Demo(DemoCommands),

    /// Write a config file populated with the defaults
    InitConfig {
        /// Destination (defaults to ./.mkit.toml)
        path: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum DemoCommands {
    /// Enqueue 1, 2, 3 and dequeue until empty
    Queue,

    /// Append, insert, update and remove on a linked list
    List,
}

#[derive(Serialize)]
struct DemoStep {
    step: String,
    result: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let manager = match &cli.config {
        Some(path) => ConfigManager::load_from(path),
        None => ConfigManager::load(),
    }
    .context("Failed to load configuration")?;

    init_tracing(&manager.config().logging);
    debug!(path = ?manager.config_path(), "configuration loaded");

    match execute_command(&cli, manager.into_config()) {
        Ok(output) => {
            print_output(&cli.output, &output)?;
            Ok(())
        }
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            std::process::exit(1);
        }
    }
}

fn execute_command(cli: &Cli, mut config: MkitConfig) -> Result<serde_json::Value> {
    match &cli.command {
        Commands::Stress {
            producers,
            consumers,
            per_producer,
            timeout_ms,
        } => {
            let stress = &mut config.stress;
            stress.producers = producers.unwrap_or(stress.producers);
            stress.consumers = consumers.unwrap_or(stress.consumers);
            stress.per_producer = per_producer.unwrap_or(stress.per_producer);
            stress.timeout_ms = timeout_ms.unwrap_or(stress.timeout_ms);
            ConfigManager::validate_config(&config).context("Invalid stress settings")?;

            let report = StressRunner::new(config.stress)
                .run()
                .context("Stress run failed")?;
            Ok(serde_json::to_value(report)?)
        }
        Commands::Demo(DemoCommands::Queue) => demo_queue(),
        Commands::Demo(DemoCommands::List) => demo_list(),
        Commands::InitConfig { path } => {
            let path = path.clone().unwrap_or_else(|| PathBuf::from(".mkit.toml"));
            ConfigManager::create_default_config(&path)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            Ok(serde_json::json!({
                "path": path.display().to_string(),
                "status": "created",
            }))
        }
    }
}

fn demo_queue() -> Result<serde_json::Value> {
    let queue = ConcurrentLinkedQueue::new();
    let mut steps = Vec::new();

    for value in [1, 2, 3] {
        queue.enqueue(value)?;
        steps.push(DemoStep {
            step: format!("enqueue({value})"),
            result: "ok".to_string(),
        });
    }

    loop {
        let outcome = queue.dequeue();
        steps.push(DemoStep {
            step: "dequeue()".to_string(),
            result: match &outcome {
                Ok(value) => value.to_string(),
                Err(e) => e.to_string(),
            },
        });
        match outcome {
            Ok(_) => continue,
            Err(QueueError::Empty) => break,
            Err(e) => return Err(e.into()),
        }
    }

    Ok(serde_json::to_value(steps)?)
}

fn demo_list() -> Result<serde_json::Value> {
    let mut list = LinkedList::from_vec(vec!["b", "d"]);
    let mut steps = Vec::new();
    let mut record = |step: &str, list: &LinkedList<&str>| {
        steps.push(DemoStep {
            step: step.to_string(),
            result: format!("{list:?}"),
        });
    };

    record("from_vec([b, d])", &list);
    list.append(["e"]);
    record("append([e])", &list);
    list.add(0, "a")?;
    record("add(0, a)", &list);
    list.add(2, "c")?;
    record("add(2, c)", &list);
    list.set(4, "E")?;
    record("set(4, E)", &list);
    let removed = list.delete(1)?;
    record(&format!("delete(1) -> {removed}"), &list);
    let third = *list.get(2)?;
    record(&format!("get(2) -> {third}"), &list);

    let mut visited = Vec::new();
    list.range(|i, v| -> Result<()> {
        visited.push(format!("{i}={v}"));
        Ok(())
    })?;
    record(&format!("range -> {}", visited.join(" ")), &list);

    Ok(serde_json::to_value(steps)?)
}

fn print_output(format: &OutputFormat, value: &serde_json::Value) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(value)?);
        }
        OutputFormat::Pretty => {
            print_pretty(value)?;
        }
    }
    Ok(())
}

fn print_pretty(value: &serde_json::Value) -> Result<()> {
    match value {
        serde_json::Value::Object(map) => {
            for (key, val) in map {
                let key_colored = key.cyan().bold();
                match val {
                    serde_json::Value::String(s) => {
                        println!("{}: {}", key_colored, s.green());
                    }
                    serde_json::Value::Number(n) => {
                        println!("{}: {}", key_colored, n.to_string().yellow());
                    }
                    _ => {
                        println!("{}: {}", key_colored, val);
                    }
                }
            }
        }
        serde_json::Value::Array(arr) => {
            for (i, item) in arr.iter().enumerate() {
                println!("\n{}{}:", "Step ".cyan(), (i + 1).to_string().yellow());
                print_pretty(item)?;
            }
        }
        _ => {
            println!("{}", serde_json::to_string_pretty(value)?);
        }
    }
    Ok(())
}
