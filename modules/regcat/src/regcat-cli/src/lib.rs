// Copyright (C) 2023 Intel Corporation
// SPDX-License-Identifier: Apache-2.0

//! Command line access to register bank descriptors
//!
//! Every command prints its result as JSON so it can be consumed by other tooling.

#![deny(clippy::unwrap_used)]

pub mod args;

use anyhow::{anyhow, Context, Result};
use args::{Args, Command};
use getters::Getters;
use regcat::{
    coverage::{Access, BankCoverage},
    CatalogOptions, Device, DeviceDescriptor, Register, RegisterCatalog,
};
use serde::Serialize;
use std::{fs::read_to_string, io::Write, path::Path};
use tracing::{debug, info};

#[derive(Getters, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct BankSummary {
    #[getters(deref)]
    name: String,
    #[getters(deref)]
    description: String,
    #[getters(copy)]
    function: u64,
    #[getters(copy)]
    big_endian_bitorder: bool,
    #[getters(copy)]
    registers: usize,
    #[getters(copy)]
    mapped_registers: usize,
}

impl From<&RegisterCatalog> for BankSummary {
    fn from(bank: &RegisterCatalog) -> Self {
        Self {
            name: bank.name().to_string(),
            description: bank.description().to_string(),
            function: bank.function_number(),
            big_endian_bitorder: bank.big_endian_bitorder(),
            registers: bank.register_count(),
            mapped_registers: bank.offset_index_len(),
        }
    }
}

#[derive(Getters, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct DeviceSummary {
    #[getters(deref)]
    name: String,
    #[getters(deref)]
    description: String,
    #[getters(deref)]
    banks: Vec<BankSummary>,
}

impl From<&Device> for DeviceSummary {
    fn from(device: &Device) -> Self {
        Self {
            name: device.name().to_string(),
            description: device.description().to_string(),
            banks: device.banks().iter().map(BankSummary::from).collect(),
        }
    }
}

fn load_device<P>(path: P, options: &CatalogOptions) -> Result<Device>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let descriptor = DeviceDescriptor::from_path(path)
        .with_context(|| format!("Failed to load descriptor {}", path.display()))?;
    let device = Device::from_descriptor(&descriptor, options)?;

    info!(
        "Loaded device {} with {} banks from {}",
        device.name(),
        device.banks().len(),
        path.display()
    );

    Ok(device)
}

fn bank<'a>(device: &'a Device, name: &str) -> Result<&'a RegisterCatalog> {
    device
        .bank(name)
        .ok_or_else(|| anyhow!("No bank {} in device {}", name, device.name()))
}

/// Parse a trace of accesses, one per line
pub fn parse_trace(trace: &str) -> Result<Vec<Access>> {
    trace
        .lines()
        .enumerate()
        .map(|(number, line)| (number + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
        .map(|(number, line)| {
            line.parse::<Access>()
                .with_context(|| format!("Invalid access on line {}", number))
        })
        .collect()
}

/// Run a command, writing its JSON output to `out`
pub fn run<W>(args: &Args, mut out: W) -> Result<()>
where
    W: Write,
{
    let options = CatalogOptions::builder()
        .strict_names(args.strict_names)
        .build();

    debug!("Running {:?} with {:?}", args.command, options);

    match &args.command {
        Command::Info { descriptor } => {
            let device = load_device(descriptor, &options)?;
            serde_json::to_writer_pretty(&mut out, &DeviceSummary::from(&device))?;
        }
        Command::Lookup {
            descriptor,
            bank: bank_name,
            name,
        } => {
            let device = load_device(descriptor, &options)?;
            let register = bank(&device, bank_name)?
                .lookup_by_name(name)
                .ok_or_else(|| anyhow!("No register {} in bank {}", name, bank_name))?;
            serde_json::to_writer_pretty(&mut out, register)?;
        }
        Command::Overlap {
            descriptor,
            bank: bank_name,
            offset,
            size,
        } => {
            let device = load_device(descriptor, &options)?;
            let registers = bank(&device, bank_name)?
                .overlapping(offset.0, size.0)
                .collect::<Vec<&Register>>();
            serde_json::to_writer_pretty(&mut out, &registers)?;
        }
        Command::Coverage {
            descriptor,
            bank: bank_name,
            trace,
        } => {
            let device = load_device(descriptor, &options)?;
            let catalog = bank(&device, bank_name)?;
            let accesses = parse_trace(
                &read_to_string(trace)
                    .with_context(|| format!("Failed to read trace {}", trace.display()))?,
            )?;

            let mut coverage = BankCoverage::new(catalog);
            coverage.record_all(accesses);
            let report = coverage.report();

            info!(
                "{} of {} registers of bank {} accessed",
                report.registers_hit(),
                report.registers_total(),
                bank_name
            );

            serde_json::to_writer_pretty(&mut out, &report)?;
        }
    }

    writeln!(out)?;

    Ok(())
}
