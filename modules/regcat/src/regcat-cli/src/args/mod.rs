// Copyright (C) 2023 Intel Corporation
// SPDX-License-Identifier: Apache-2.0

use anyhow::{anyhow, Error, Result};
use clap::{Parser, Subcommand};
use regcat::coverage::parse_number;
use std::{path::PathBuf, str::FromStr};
use tracing::Level;

#[derive(Debug, Parser)]
#[command(name = "regcat", about = "Query register banks described in device descriptor files")]
pub struct Args {
    #[arg(short, long, default_value_t = Level::ERROR, global = true)]
    /// Logging level
    pub log_level: Level,
    #[arg(short, long, default_value_t = false, global = true)]
    /// Whether a register name defined twice in a bank is an error. By default the last
    /// definition is the one found by name.
    pub strict_names: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Summarize the banks of a device
    Info {
        /// Device descriptor file (.json, .yml, or .yaml)
        descriptor: PathBuf,
    },
    /// Look up a register by name
    Lookup {
        descriptor: PathBuf,
        bank: String,
        name: String,
    },
    /// List the registers overlapping a range of bank offsets
    Overlap {
        descriptor: PathBuf,
        bank: String,
        /// Offset of the range, decimal or 0x-prefixed hex
        offset: Number,
        #[arg(short = 'n', long, default_value = "1")]
        /// Size of the range in bytes
        size: Number,
    },
    /// Count register accesses from a trace file. Each line of the trace is an access of the
    /// form `r|w OFFSET [SIZE]`. Blank lines and lines starting with `#` are ignored.
    Coverage {
        descriptor: PathBuf,
        bank: String,
        trace: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// An unsigned number given in decimal or as `0x`-prefixed hex
pub struct Number(pub u64);

impl FromStr for Number {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_number(s)
            .map(Number)
            .ok_or_else(|| anyhow!("Invalid number {}", s))
    }
}
