// Copyright (C) 2023 Intel Corporation
// SPDX-License-Identifier: Apache-2.0

use anyhow::Result;
use clap::Parser;
use regcat_cli::{args::Args, run};
use std::io::{stderr, stdout};
use tracing::trace;
use tracing_subscriber::{filter::LevelFilter, fmt, prelude::*, registry, Layer};

pub fn main() -> Result<()> {
    let args = Args::parse();

    registry()
        .with(
            fmt::layer()
                .pretty()
                .with_writer(stderr)
                .with_filter(LevelFilter::from_level(args.log_level)),
        )
        .init();

    trace!("Running with args: {:?}", args);

    run(&args, stdout().lock())
}
