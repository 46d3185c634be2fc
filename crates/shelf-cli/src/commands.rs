use std::io::Read;

use anyhow::Context;
use colored::Colorize;

use shelf_form::{flatten_with, FlattenOptions, FormMap, FormValue};
use shelf_server::{ServerConfig, ShelfServer};
use shelf_store::{BookStore, SEED_TITLES};

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Serve(args) => cmd_serve(args),
        Command::Flatten(args) => cmd_flatten(args, &cli.format),
        Command::Seed(_) => cmd_seed(&cli.format),
    }
}

fn cmd_serve(args: ServeArgs) -> anyhow::Result<()> {
    let mut config = match &args.config {
        Some(path) => ServerConfig::load(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => ServerConfig::default(),
    };
    config.apply_env()?;
    if let Some(bind) = &args.bind {
        config.bind_addr = bind
            .parse()
            .with_context(|| format!("invalid bind address {bind:?}"))?;
    }
    if args.no_seed {
        config.seed = false;
    }

    let server = ShelfServer::new(config)?;
    println!(
        "{} Shelf on {} ({} books)",
        "✓".green().bold(),
        server.config().bind_addr.to_string().bold(),
        server.store().len()
    );
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(server.serve())?;
    Ok(())
}

fn cmd_flatten(args: FlattenArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let text = match args.input.as_deref() {
        Some(input) if input != "-" => input.to_string(),
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("reading stdin")?;
            buf
        }
    };
    let fields = flatten_document(&text, args.expand)?;

    if args.urlencoded {
        println!("{}", fields.to_urlencoded());
        return Ok(());
    }
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&fields_to_json(&fields))?),
        OutputFormat::Text => {
            if fields.is_empty() {
                println!("{}", "(no fields)".dimmed());
            }
            for (key, value) in fields.iter() {
                println!("{} = {}", key.cyan(), value);
            }
        }
    }
    Ok(())
}

fn cmd_seed(format: &OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&SEED_TITLES)?),
        OutputFormat::Text => {
            for (i, title) in SEED_TITLES.iter().enumerate() {
                println!("{:>3}  {}", (i + 1).to_string().yellow(), title);
            }
        }
    }
    Ok(())
}

/// Parse a JSON document and flatten it into form fields.
pub fn flatten_document(text: &str, expand: bool) -> anyhow::Result<FormMap> {
    let json: serde_json::Value = serde_json::from_str(text).context("input is not valid JSON")?;
    let options = if expand {
        FlattenOptions::expanded()
    } else {
        FlattenOptions::default()
    };
    Ok(flatten_with(&FormValue::from_json(&json), options))
}

fn fields_to_json(fields: &FormMap) -> serde_json::Value {
    serde_json::Value::Object(
        fields
            .iter()
            .map(|(k, v)| (k.to_string(), serde_json::Value::String(v.to_string())))
            .collect(),
    )
}
