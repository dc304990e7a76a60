// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to .env file (e.g., .env.mainnet)
    #[arg(short, long, default_value = ".env", global = true)]
    pub env_file: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Decode raw instruction, account or event data against one or more IDLs
    Decode {
        /// IDL documents to register, in priority order
        #[arg(short = 'i', long = "idl", required = true)]
        idls: Vec<PathBuf>,

        /// Encoding of INPUT; ignored when INPUT names a file
        #[arg(short, long, value_enum, default_value_t = FormatArg::Auto)]
        format: FormatArg,

        /// Discriminator namespace to look the data up in
        #[arg(short, long, value_enum, default_value_t = KindArg::Instruction)]
        kind: KindArg,

        /// Data as hex (0x...), base58 or base64 text, or a path to a raw file
        input: String,
    },

    /// Rewrite an IDL into canonical form
    Normalize {
        /// IDL document to normalize
        idl: PathBuf,

        /// Program address to record when the document has none
        #[arg(short, long)]
        address: Option<String>,

        /// Write the result here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print a summary of one or more IDLs
    Info {
        #[arg(required = true)]
        idls: Vec<PathBuf>,

        /// Emit the summary as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatArg {
    Auto,
    Hex,
    Base58,
    Base64,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum KindArg {
    Instruction,
    Account,
    Event,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
