//! pgtc - decode and encode PostgreSQL wire values from the command line.

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use bytes::BytesMut;
use clap::{Parser, Subcommand};
use colored::*;
use tracing_subscriber::EnvFilter;

use pg_transcode::protocol::{Oid, name_to_oid};
use pg_transcode::{RegistryConfig, TypeRegistry, WireFormat};

#[derive(Parser)]
#[command(name = "pgtc", version, about = "PostgreSQL value transcoder")]
struct Cli {
    /// Type config file (defaults to <config_dir>/pgtc/types.toml if present)
    #[arg(long, global = true, env = "PGTC_CONFIG")]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a raw field value
    Decode {
        /// Type oid or name (e.g. 23, int4)
        #[arg(value_parser = parse_oid)]
        oid: Oid,
        /// Field bytes: text, or hex with --binary
        value: String,
        /// Treat VALUE as binary-format hex
        #[arg(long)]
        binary: bool,
        /// Print the decoded value as JSON
        #[arg(long)]
        json: bool,
    },
    /// Encode a text-form value as a bind parameter
    Encode {
        /// Type oid or name
        #[arg(value_parser = parse_oid)]
        oid: Oid,
        /// Value in PostgreSQL text form
        value: String,
        /// Output format (defaults to the type's preferred format)
        #[arg(long)]
        format: Option<WireFormat>,
    },
    /// List registered types
    Types {
        #[arg(long)]
        json: bool,
    },
}

fn parse_oid(s: &str) -> Result<Oid, String> {
    s.parse::<Oid>()
        .ok()
        .or_else(|| name_to_oid(s))
        .ok_or_else(|| format!("'{}' is neither an oid nor a known type name", s))
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_registry(path: Option<&PathBuf>) -> Result<TypeRegistry> {
    let config = match path {
        Some(path) => RegistryConfig::load(path)?,
        None => RegistryConfig::load_default()?,
    };
    Ok(TypeRegistry::from_config(&config)?)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let registry = load_registry(cli.config.as_ref())?;

    match cli.command {
        Commands::Decode {
            oid,
            value,
            binary,
            json,
        } => decode(&registry, oid, &value, binary, json),
        Commands::Encode { oid, value, format } => encode(&registry, oid, &value, format),
        Commands::Types { json } => list_types(&registry, json),
    }
}

fn decode(registry: &TypeRegistry, oid: Oid, value: &str, binary: bool, json: bool) -> Result<()> {
    let (format, raw) = if binary {
        let hex_str = value.strip_prefix("\\x").unwrap_or(value);
        let raw = hex::decode(hex_str).context("VALUE is not valid hex")?;
        (WireFormat::Binary, raw)
    } else {
        (WireFormat::Text, value.as_bytes().to_vec())
    };

    let decoded = registry.decode(oid, format, &raw)?;
    if json {
        println!("{}", serde_json::to_string(&decoded)?);
    } else {
        println!("{} {}", format!("{}:", decoded.type_name()).dimmed(), decoded.to_string().green());
    }
    Ok(())
}

fn encode(registry: &TypeRegistry, oid: Oid, value: &str, format: Option<WireFormat>) -> Result<()> {
    let transcoder = registry
        .lookup(oid)
        .ok_or_else(|| anyhow!("oid {} is not registered", oid))?;
    let format = format.unwrap_or(transcoder.preferred_format());
    let parsed = registry.decode(oid, WireFormat::Text, value.as_bytes())?;

    let mut buf = BytesMut::new();
    registry.encode_as(oid, &parsed, format, &mut buf)?;

    let shown = match format {
        WireFormat::Binary => format!("\\x{}", hex::encode(&buf)),
        WireFormat::Text => String::from_utf8_lossy(&buf).into_owned(),
    };
    println!(
        "{} {} {}",
        format!("{}", format).dimmed(),
        format!("({} bytes)", buf.len()).dimmed(),
        shown.cyan()
    );
    Ok(())
}

fn list_types(registry: &TypeRegistry, json: bool) -> Result<()> {
    if json {
        let rows: Vec<_> = registry
            .iter()
            .map(|(oid, t)| {
                serde_json::json!({
                    "oid": oid,
                    "name": t.name(),
                    "text": t.supports(WireFormat::Text),
                    "binary": t.supports(WireFormat::Binary),
                    "encode": t.can_encode(),
                    "preferred_format": t.preferred_format(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    println!("{}", "→ Registered types".cyan().bold());
    for (oid, t) in registry.iter() {
        let mark = |yes: bool| if yes { "✓".green() } else { "·".dimmed() };
        println!(
            "  {:>6}  {:<14} text {}  binary {}  encode {}  ({})",
            oid.to_string().yellow(),
            t.name(),
            mark(t.supports(WireFormat::Text)),
            mark(t.supports(WireFormat::Binary)),
            mark(t.can_encode()),
            t.preferred_format()
        );
    }
    println!("  {} types", registry.len());
    Ok(())
}
