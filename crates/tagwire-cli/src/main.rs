use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use tagwire_core::{Codec, CodecBuilder, Direction, Document, TaggedValue, WriteOptions};

#[derive(Parser)]
#[command(name = "tagwire")]
#[command(about = "Encode and decode tagged wire values")]
#[command(version)]
struct Cli {
    /// Log filter, e.g. `debug` or `tagwire_core=trace` (default: $RUST_LOG, then `warn`)
    #[arg(long, global = true, value_name = "FILTER")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the tagged value for an integer
    Encode {
        #[arg(allow_negative_numbers = true)]
        value: i64,
    },

    /// Decode a tagged value given as JSON
    Decode {
        /// e.g. '{"type":"int","value":"ff"}'
        record: String,
    },

    /// List registered type tags
    Handlers,

    /// Write a document built from integer fields
    Save {
        /// Type name stored in the document header
        #[arg(long)]
        type_name: String,

        /// Field to store, repeatable
        #[arg(long = "field", value_name = "NAME=INT", value_parser = parse_field)]
        fields: Vec<(String, i64)>,

        /// Output file (stdout if omitted)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Indent width; 0 writes compact JSON
        #[arg(long, default_value_t = WriteOptions::default().indent)]
        indent: usize,
    },

    /// Read a document and print its fields
    Load {
        /// Type name the document must have been written for
        #[arg(long)]
        type_name: String,

        #[arg(value_name = "FILE")]
        input: PathBuf,
    },
}

fn parse_field(s: &str) -> Result<(String, i64), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=INT, got {s:?}"))?;
    if name.is_empty() {
        return Err(format!("empty field name in {s:?}"));
    }
    let value = value
        .parse::<i64>()
        .map_err(|e| format!("field {name:?}: {e}"))?;
    Ok((name.to_string(), value))
}

fn init_tracing(filter: Option<&str>) {
    let filter = match filter {
        Some(f) => EnvFilter::new(f),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_level.as_deref());

    let codec = CodecBuilder::standard()?.build()?;

    match cli.command {
        Commands::Encode { value } => {
            let tv = codec.encode(&value)?;
            println!("{}", serde_json::to_string(&tv)?);
        }
        Commands::Decode { record } => {
            let record: serde_json::Value =
                serde_json::from_str(&record).context("record is not valid JSON")?;
            let value = codec.decode(&record)?;
            println!("{value:?}");
        }
        Commands::Handlers => {
            for line in handler_lines(&codec) {
                println!("{line}");
            }
        }
        Commands::Save {
            type_name,
            fields,
            output,
            indent,
        } => {
            let doc = build_document(&codec, &type_name, &fields)?;
            let text = doc.to_json(&WriteOptions { indent })?;
            match output {
                Some(path) => {
                    fs::write(&path, text + "\n")
                        .with_context(|| format!("writing {}", path.display()))?;
                    tracing::info!(path = %path.display(), "document written");
                }
                None => println!("{text}"),
            }
        }
        Commands::Load { type_name, input } => {
            for line in load_document(&codec, &type_name, &input)? {
                println!("{line}");
            }
        }
    }
    Ok(())
}

fn handler_lines(codec: &Codec) -> Vec<String> {
    let registry = codec.registry();
    registry
        .tags(Direction::Encode)
        .into_iter()
        .chain(registry.tags(Direction::Decode))
        .collect::<std::collections::BTreeSet<_>>()
        .into_iter()
        .map(|tag| {
            let kind = registry
                .encoder(tag)
                .map(|h| h.kind())
                .or_else(|| registry.decoder(tag).map(|h| h.kind()))
                .unwrap_or("?");
            format!("{tag}\tkind={kind}")
        })
        .collect()
}

fn build_document(
    codec: &Codec,
    type_name: &str,
    fields: &[(String, i64)],
) -> anyhow::Result<Document> {
    let mut doc = Document::new(type_name);
    for (name, value) in fields {
        let tv = codec
            .encode(value)
            .with_context(|| format!("encoding field {name:?}"))?;
        if doc.insert(name.as_str(), tv)?.is_some() {
            bail!("field {name:?} given more than once");
        }
    }
    Ok(doc)
}

fn load_document(codec: &Codec, type_name: &str, input: &Path) -> anyhow::Result<Vec<String>> {
    let text =
        fs::read_to_string(input).with_context(|| format!("reading {}", input.display()))?;
    let doc = Document::from_json(&text)?;
    doc.expect_type(type_name)?;
    tracing::debug!(type_name = doc.type_name(), fields = doc.fields().len(), "document loaded");

    doc.fields()
        .iter()
        .map(|(name, tv)| -> anyhow::Result<String> {
            Ok(format!("{name} = {}", describe(codec, tv)?))
        })
        .collect()
}

fn describe(codec: &Codec, tv: &TaggedValue) -> anyhow::Result<String> {
    let value = codec.decode_record(tv)?;
    Ok(format!("{value:?} ({})", tv.tag()))
}
