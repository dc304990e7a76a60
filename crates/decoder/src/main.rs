// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use anyhow::Context;
use ix_decoder::consts::DECODE_STACK_SIZE;
use ix_decoder::idl::{self, SchemaSummary};
use ix_decoder::input::{self, InputFormat};
use ix_decoder::logging::{self, LoggingConfig};
use ix_decoder::types::ItemKind;
use ix_decoder::{DecodeLimits, InstructionDecoder, SchemaRegistry};
use ix_decoder_config::{Args, Command, DecodeConfig, DecoderAppConfig, FormatArg, KindArg};
use std::path::{Path, PathBuf};

fn main() -> anyhow::Result<()> {
    let args = Args::parse_args();
    let config = DecoderAppConfig::from_env_file(&args.env_file)
        .with_context(|| format!("Failed to load configuration from {}", args.env_file))?;
    // Flushes the log file on drop; lives until main returns.
    let _log_guard = logging::init_with_config(LoggingConfig::from(&config.log))?;

    tracing::debug!(log_level = %config.log.level, strict = config.decode.strict, "Configuration loaded");

    match args.command {
        Command::Decode {
            idls,
            format,
            kind,
            input,
        } => decode(&config.decode, &idls, format, kind, &input),
        Command::Normalize {
            idl,
            address,
            output,
        } => normalize(&idl, address.as_deref(), output.as_deref()),
        Command::Info { idls, json } => info(&idls, json),
    }
}

fn decode(
    config: &DecodeConfig,
    idls: &[PathBuf],
    format: FormatArg,
    kind: KindArg,
    input: &str,
) -> anyhow::Result<()> {
    let mut registry = SchemaRegistry::with_strict(config.strict);
    for path in idls {
        let schema = idl::load_schema(path, None)
            .with_context(|| format!("Failed to load IDL {}", path.display()))?;
        registry.register(schema);
    }

    let bytes = read_input(input, format)?;
    let decoder = InstructionDecoder::new(&registry).with_limits(DecodeLimits {
        max_depth: config.max_depth,
        max_sequence_len: config.max_sequence_len,
    });
    let item = std::thread::scope(|scope| -> anyhow::Result<_> {
        let handle = std::thread::Builder::new()
            .name("decoder".to_string())
            .stack_size(DECODE_STACK_SIZE)
            .spawn_scoped(scope, || decoder.decode_kind(item_kind(kind), &bytes))?;
        let item = handle
            .join()
            .map_err(|_| anyhow::anyhow!("Decoder thread panicked"))??;
        Ok(item)
    })?;

    println!("{}", serde_json::to_string_pretty(&item.to_json())?);
    Ok(())
}

/// Raw bytes of `input` when it names a file, otherwise its decoded text.
fn read_input(input: &str, format: FormatArg) -> anyhow::Result<Vec<u8>> {
    let path = Path::new(input);
    if path.is_file() {
        tracing::debug!(path = %path.display(), "Reading raw input file");
        return std::fs::read(path)
            .with_context(|| format!("Failed to read input file {}", path.display()));
    }
    Ok(input::decode_input(input, input_format(format))?)
}

fn normalize(idl: &Path, address: Option<&str>, output: Option<&Path>) -> anyhow::Result<()> {
    let schema = idl::load_schema(idl, address)
        .with_context(|| format!("Failed to load IDL {}", idl.display()))?;
    let rendered = idl::render_document(&schema)?;

    match output {
        Some(path) => {
            std::fs::write(path, rendered)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!(
                program = %schema.name(),
                output = %path.display(),
                "Wrote normalized IDL"
            );
        }
        None => println!("{}", rendered),
    }
    Ok(())
}

fn info(idls: &[PathBuf], json: bool) -> anyhow::Result<()> {
    let mut summaries = Vec::with_capacity(idls.len());
    for path in idls {
        let schema = idl::load_schema(path, None)
            .with_context(|| format!("Failed to load IDL {}", path.display()))?;
        summaries.push(SchemaSummary::from_schema(&schema));
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&summaries)?);
    } else {
        let blocks: Vec<String> = summaries.iter().map(ToString::to_string).collect();
        println!("{}", blocks.join("\n"));
    }
    Ok(())
}

fn input_format(format: FormatArg) -> InputFormat {
    match format {
        FormatArg::Auto => InputFormat::Auto,
        FormatArg::Hex => InputFormat::Hex,
        FormatArg::Base58 => InputFormat::Base58,
        FormatArg::Base64 => InputFormat::Base64,
    }
}

fn item_kind(kind: KindArg) -> ItemKind {
    match kind {
        KindArg::Instruction => ItemKind::Instruction,
        KindArg::Account => ItemKind::Account,
        KindArg::Event => ItemKind::Event,
    }
}
