use std::io::Write;
use std::path::PathBuf;

use alloy_primitives::hex;
use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use contract_abi::config::{Config, LogFormat, LoggingConfig, OutputConfig, OutputFormat};
use contract_abi::json::args_from_json;
use contract_abi::{TypeDescriptor, WORD_SIZE};

#[derive(Parser)]
#[command(name = "contract-abi")]
#[command(about = "Encode typed argument lists into contract ABI call data")]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(long, global = true, env = "CONTRACT_ABI_CONFIG")]
    config: Option<PathBuf>,

    /// Log filter, overriding RUST_LOG and the config file (e.g. "debug")
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode arguments using the head/tail layout
    Encode {
        /// Argument types, comma separated or repeated (e.g. "uint256,string[]")
        #[arg(short, long = "types", required = true)]
        types: Vec<String>,

        /// JSON array with one value per type
        #[arg(short, long, group = "input")]
        args: Option<String>,

        /// Read the JSON argument array from a file
        #[arg(long, group = "input")]
        args_file: Option<PathBuf>,

        /// Output format (defaults to the config file, then hex)
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,

        /// Do not prefix hex output with 0x
        #[arg(long)]
        no_prefix: bool,

        /// Write output to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show the head size each type occupies
    Size {
        /// Argument types, comma separated or repeated
        #[arg(short, long = "types", required = true)]
        types: Vec<String>,
    },

    /// Parse a type signature and print its descriptor
    CheckType {
        /// Type signature, e.g. "bytes32[2][]"
        signature: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    init_logging(&config.logging, cli.log_level.as_deref())?;

    match cli.command {
        Commands::Encode {
            types,
            args,
            args_file,
            format,
            no_prefix,
            output,
        } => {
            let types = parse_types(&types)?;
            let text = match (args, args_file) {
                (Some(text), _) => text,
                (None, Some(path)) => std::fs::read_to_string(&path)
                    .with_context(|| format!("reading arguments from {}", path.display()))?,
                (None, None) => "[]".to_string(),
            };
            let json: serde_json::Value =
                serde_json::from_str(&text).context("parsing arguments as JSON")?;
            let values = args_from_json(&types, &json)?;

            let encoder = config.encoder();
            let bytes = encoder.encode_descriptors(&types, &values)?;
            tracing::info!(arguments = types.len(), bytes = bytes.len(), "encoded call data");

            let mut output_config = config.output.clone();
            if let Some(format) = format {
                output_config.format = format;
            }
            if no_prefix {
                output_config.prefix = false;
            }
            let rendered = render(&bytes, &output_config);

            match output {
                Some(path) => {
                    std::fs::write(&path, &rendered)?;
                    eprintln!("Encoded {} bytes to {}", bytes.len(), path.display());
                }
                None => std::io::stdout().write_all(&rendered)?,
            }
            Ok(())
        }
        Commands::Size { types } => {
            let types = parse_types(&types)?;
            for (index, ty) in types.iter().enumerate() {
                let kind = if ty.is_dynamic() { "dynamic" } else { "static" };
                println!("{}\t{}\t{}\t{}", index, ty, kind, ty.head_size());
            }
            println!("head size: {}", total_head_size(&types)?);
            Ok(())
        }
        Commands::CheckType { signature } => {
            let ty = TypeDescriptor::parse(&signature)?;
            println!("type:    {}", ty);
            println!("base:    {}", ty.base());
            println!("sub:     {}", ty.sub());
            println!("dims:    {:?}", ty.dims());
            println!("dynamic: {}", ty.is_dynamic());
            match ty.size() {
                Some(size) => println!("size:    {}", size),
                None => println!("size:    dynamic"),
            }
            Ok(())
        }
    }
}

/// Split a type list on top-level commas: "uint8[2],string" -> ["uint8[2]", "string"].
fn split_type_list(list: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in list.char_indices() {
        match c {
            '[' | '(' => depth += 1,
            ']' | ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(list.get(start..i).unwrap_or_default());
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(list.get(start..).unwrap_or_default());
    parts.into_iter().map(str::trim).collect()
}

fn parse_types(lists: &[String]) -> anyhow::Result<Vec<TypeDescriptor>> {
    lists
        .iter()
        .flat_map(|list| split_type_list(list))
        .enumerate()
        .map(|(index, sig)| {
            TypeDescriptor::parse(sig).with_context(|| format!("type {} ('{}')", index, sig))
        })
        .collect()
}

fn total_head_size(types: &[TypeDescriptor]) -> anyhow::Result<usize> {
    types
        .iter()
        .try_fold(0usize, |acc, ty| acc.checked_add(ty.head_size()))
        .context("combined head size overflows")
}

fn render(bytes: &[u8], output: &OutputConfig) -> Vec<u8> {
    let hex_text = |data: &[u8]| {
        if output.prefix {
            hex::encode_prefixed(data)
        } else {
            hex::encode(data)
        }
    };
    match output.format {
        OutputFormat::Hex => format!("{}\n", hex_text(bytes)).into_bytes(),
        OutputFormat::Words => bytes
            .chunks(WORD_SIZE)
            .map(|word| format!("{}\n", hex_text(word)))
            .collect::<String>()
            .into_bytes(),
        OutputFormat::Binary => bytes.to_vec(),
    }
}

fn init_logging(config: &LoggingConfig, level: Option<&str>) -> anyhow::Result<()> {
    let directive = match level {
        Some(level) => level.to_string(),
        None => std::env::var("RUST_LOG").unwrap_or_else(|_| config.level.clone()),
    };
    let filter = EnvFilter::try_new(&directive)
        .with_context(|| format!("invalid log filter '{}'", directive))?;
    let layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    match config.format {
        LogFormat::Text => tracing_subscriber::registry()
            .with(filter)
            .with(layer)
            .try_init(),
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(layer.json())
            .try_init(),
    }
    .context("initializing logging")
}
