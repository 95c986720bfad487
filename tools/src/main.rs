use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use codec::CodecOptions;
use glob::Pattern;
use tagpack_tools::{decode_buffer, encode_json, format_decode_pretty, inspect_buffer, InspectReport};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tagpack", version, about = "tagpack inspection and conversion tools")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Inspect the tag layout of encoded buffers.
    Inspect {
        /// Path to a buffer file, or a directory of them.
        path: PathBuf,
        /// Optional glob filter when inspecting a directory.
        #[arg(long)]
        glob: Option<String>,
        /// Sort inspected buffers.
        #[arg(long, value_enum)]
        sort: Option<InspectSort>,
        /// Limit the number of inspected buffers (after sorting).
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Decode a buffer into JSON or indented text.
    Decode {
        /// Path to the buffer file.
        path: PathBuf,
        /// Output format.
        #[arg(long, value_enum, default_value_t = DecodeFormat::Json)]
        format: DecodeFormat,
        /// Type name to decode as a record. May be repeated.
        #[arg(long = "record-type")]
        record_types: Vec<String>,
        /// Fail on limits instead of degrading.
        #[arg(long)]
        strict: bool,
    },
    /// Encode a JSON document.
    Encode {
        /// Path to the JSON input.
        json: PathBuf,
        /// Where to write the encoded bytes.
        #[arg(long)]
        out: PathBuf,
        /// Fail instead of degrading oversized values.
        #[arg(long)]
        strict: bool,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum InspectSort {
    Size,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum DecodeFormat {
    Json,
    Pretty,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Inspect {
            path,
            glob,
            sort,
            limit,
        } => {
            let options = CodecOptions::default();
            if path.is_dir() {
                let entries = collect_buffer_entries(&path, glob.as_deref())?;
                let mut entries = maybe_sort_entries(entries, sort);
                let limit = limit.or(sort.map(|InspectSort::Size| 10));
                if let Some(limit) = limit {
                    entries.truncate(limit);
                }
                for entry in entries {
                    let bytes = fs::read(&entry.path)
                        .with_context(|| format!("read buffer {}", entry.path.display()))?;
                    let report = inspect_buffer(&bytes, &options)
                        .with_context(|| format!("inspect {}", entry.path.display()))?;
                    println!("== {} ({} bytes) ==", entry.path.display(), entry.size);
                    print_inspect_report(&report);
                }
            } else {
                let bytes =
                    fs::read(&path).with_context(|| format!("read buffer {}", path.display()))?;
                let report = inspect_buffer(&bytes, &options)?;
                print_inspect_report(&report);
            }
        }
        Command::Decode {
            path,
            format,
            record_types,
            strict,
        } => {
            let bytes =
                fs::read(&path).with_context(|| format!("read buffer {}", path.display()))?;
            let options = CodecOptions::default().with_strict(strict);
            let output = decode_buffer(&bytes, &options, &record_types)?;
            match format {
                DecodeFormat::Json => {
                    let json = serde_json::to_string_pretty(&output).context("serialize json")?;
                    println!("{json}");
                }
                DecodeFormat::Pretty => {
                    print!("{}", format_decode_pretty(&output));
                }
            }
        }
        Command::Encode { json, out, strict } => {
            let text = fs::read_to_string(&json)
                .with_context(|| format!("read json {}", json.display()))?;
            let options = CodecOptions::default().with_strict(strict);
            let encoded = encode_json(&text, &options)?;
            fs::write(&out, &encoded.bytes)
                .with_context(|| format!("write buffer {}", out.display()))?;
            println!(
                "wrote {} bytes to {} ({} diagnostics)",
                encoded.bytes.len(),
                out.display(),
                encoded.diagnostics.len()
            );
        }
    }
    Ok(())
}

struct BufferEntry {
    path: PathBuf,
    size: u64,
}

fn collect_buffer_entries(dir: &Path, glob: Option<&str>) -> Result<Vec<BufferEntry>> {
    let mut entries = Vec::new();
    let pattern = match glob {
        Some(value) => Some(Pattern::new(value).context("invalid glob pattern")?),
        None => None,
    };

    for entry in fs::read_dir(dir).with_context(|| format!("read dir {}", dir.display()))? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if let Some(pattern) = &pattern {
            let matches_path = pattern.matches_path(&path);
            let matches_name = path
                .file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| pattern.matches(name));
            if !matches_path && !matches_name {
                continue;
            }
        }
        let size = entry.metadata()?.len();
        entries.push(BufferEntry { path, size });
    }
    Ok(entries)
}

fn maybe_sort_entries(
    mut entries: Vec<BufferEntry>,
    sort: Option<InspectSort>,
) -> Vec<BufferEntry> {
    match sort {
        Some(InspectSort::Size) => {
            entries.sort_by(|a, b| b.size.cmp(&a.size).then_with(|| a.path.cmp(&b.path)));
        }
        None => {}
    }
    entries
}

fn print_inspect_report(report: &InspectReport) {
    println!(
        "length: {} bytes, value: {} bytes, trailing: {} bytes",
        report.total_len, report.consumed, report.trailing
    );
    println!("tags:");
    for entry in &report.entries {
        let indent = "  ".repeat(entry.depth + 1);
        if entry.detail.is_empty() {
            println!("{indent}@{} {} ({} bytes)", entry.offset, entry.family, entry.span);
        } else {
            println!(
                "{indent}@{} {} {} ({} bytes)",
                entry.offset, entry.family, entry.detail, entry.span
            );
        }
    }
}
