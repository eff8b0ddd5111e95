//! strapi-flatten: Collapse content API envelopes into plain JSON
//!
//! Usage:
//!   # Flatten whatever envelopes appear in a file, pretty-printed to stdout
//!   strapi-flatten response.json
//!
//!   # Read a collection response from stdin, one entity per output line
//!   curl -s "$API/articles" | strapi-flatten --mode collection --ndjson
//!
//!   # Newline-delimited responses, compact output
//!   strapi-flatten --mode response --ndjson responses.jsonl

// Use MiMalloc allocator for better performance (recommended by simd-json)
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;
use strapi_flatten::{
    flatten_json, read_document, FlattenConfig, FlattenMode, FlattenedWriter, Flattener,
    OutputFormat,
};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "strapi-flatten")]
#[command(about = "Collapse content API entity/response envelopes into plain JSON", long_about = None)]
struct Args {
    /// Input file (use stdin if omitted)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Shape of each input document
    #[arg(long, value_enum, default_value_t = Mode::Auto, env = "STRAPI_FLATTEN_MODE")]
    mode: Mode,

    /// Process newline-delimited JSON and write one flattened entity per line
    #[arg(long)]
    ndjson: bool,

    /// Compact output (no pretty-printing)
    #[arg(long)]
    compact: bool,

    /// Key holding the envelope tag (default: "__typename")
    #[arg(long, env = "STRAPI_FLATTEN_TYPENAME_FIELD")]
    typename_field: Option<String>,

    /// Tag suffix of single-entity responses (default: "EntityResponse")
    #[arg(long, env = "STRAPI_FLATTEN_RESPONSE_SUFFIX")]
    response_suffix: Option<String>,

    /// Tag suffix of collection responses (default: "ResponseCollection")
    #[arg(long, env = "STRAPI_FLATTEN_COLLECTION_SUFFIX")]
    collection_suffix: Option<String>,

    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Mode {
    Auto,
    Entity,
    Response,
    Collection,
}

impl From<Mode> for FlattenMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Auto => FlattenMode::Auto,
            Mode::Entity => FlattenMode::Entity,
            Mode::Response => FlattenMode::Response,
            Mode::Collection => FlattenMode::Collection,
        }
    }
}

impl Args {
    /// Overlay the tag flags (or their env vars) on the default config
    fn config(&self) -> FlattenConfig {
        let mut config = FlattenConfig::default();
        if let Some(field) = &self.typename_field {
            config.typename_field = field.clone();
        }
        if let Some(suffix) = &self.response_suffix {
            config.response_suffix = suffix.clone();
        }
        if let Some(suffix) = &self.collection_suffix {
            config.collection_suffix = suffix.clone();
        }
        config
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = args.config();
    debug!(?config, mode = ?args.mode, "starting");

    let reader: Box<dyn BufRead> = if let Some(path) = &args.input {
        let file = File::open(path)
            .with_context(|| format!("Failed to open {}", path.display()))?;
        Box::new(BufReader::new(file))
    } else {
        Box::new(BufReader::new(std::io::stdin()))
    };

    let format = if args.ndjson {
        OutputFormat::Lines
    } else if args.compact {
        OutputFormat::Compact
    } else {
        OutputFormat::Pretty
    };
    let mut writer = FlattenedWriter::new(std::io::stdout().lock(), format);

    if args.ndjson {
        let count = flatten_json(reader, &mut writer, args.mode.into(), config)?;
        if count == 0 {
            warn!("no JSON documents found in input");
        }
    } else {
        let document = read_document(reader)?;
        let flattener = Flattener::new(config);
        let flattened = FlattenMode::from(args.mode)
            .apply(&flattener, document)
            .context("Failed to flatten document")?;
        writer.write_value(&flattened)?;
    }

    writer.flush()
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
