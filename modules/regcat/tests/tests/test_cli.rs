// Copyright (C) 2023 Intel Corporation
// SPDX-License-Identifier: Apache-2.0

//! Commands of the regcat command line tool

use anyhow::Result;
use clap::Parser;
use indoc::indoc;
use regcat_cli::{args::Args, parse_trace, run};
use serde_json::{from_slice, Value};
use tests::{write_fixture, UART_JSON};

fn run_command<I>(argv: I) -> Result<Value>
where
    I: IntoIterator<Item = String>,
{
    let args = Args::try_parse_from(std::iter::once("regcat".to_string()).chain(argv))?;
    let mut out = Vec::new();
    run(&args, &mut out)?;
    Ok(from_slice(&out)?)
}

fn descriptor(test: &str) -> Result<String> {
    let path = write_fixture(env!("CARGO_TARGET_TMPDIR"), test, "uart.json", UART_JSON)?;
    Ok(path.to_string_lossy().to_string())
}

fn argv(args: &[&str]) -> Vec<String> {
    args.iter().map(|a| a.to_string()).collect()
}

#[test]
fn test_info() -> Result<()> {
    let path = descriptor("cli_info")?;
    let info = run_command(argv(&["info", &path]))?;

    assert_eq!(info["name"], "uart0");
    assert_eq!(info["banks"][0]["name"], "regs");
    assert_eq!(info["banks"][0]["registers"], 5);
    assert_eq!(info["banks"][0]["mapped_registers"], 4);
    assert_eq!(info["banks"][1]["function"], 1);
    assert_eq!(info["banks"][1]["big_endian_bitorder"], true);
    Ok(())
}

#[test]
fn test_lookup() -> Result<()> {
    let path = descriptor("cli_lookup")?;
    let lcr = run_command(argv(&["lookup", &path, "regs", "lcr"]))?;

    assert_eq!(lcr["name"], "lcr");
    assert_eq!(lcr["offset"], 3);
    assert_eq!(lcr["fields"][0]["name"], "dlab");
    assert_eq!(lcr["fields"][1]["msb"], 1);

    assert!(run_command(argv(&["lookup", &path, "regs", "missing"])).is_err());
    assert!(run_command(argv(&["lookup", &path, "missing", "lcr"])).is_err());
    Ok(())
}

#[test]
fn test_overlap() -> Result<()> {
    let path = descriptor("cli_overlap")?;

    let hits = run_command(argv(&["overlap", &path, "pci_config", "0x2", "--size", "4"]))?;
    let names = hits
        .as_array()
        .map(|a| a.iter().map(|r| r["name"].clone()).collect::<Vec<_>>())
        .unwrap_or_default();
    assert_eq!(names, vec!["device_id", "command"]);

    let single = run_command(argv(&["overlap", &path, "regs", "7"]))?;
    assert_eq!(single[0]["name"], "scratch");

    let none = run_command(argv(&["overlap", &path, "regs", "4", "-n", "3"]))?;
    assert_eq!(none, Value::Array(vec![]));
    Ok(())
}

#[test]
fn test_coverage() -> Result<()> {
    let path = descriptor("cli_coverage")?;
    let trace = write_fixture(
        env!("CARGO_TARGET_TMPDIR"),
        "cli_coverage",
        "trace.txt",
        indoc! {"
            # Initialize the line control register
            w 0x3
            w 0x0
            w 0x1

            r 0x0 4
            r 0x20
        "},
    )?;

    let report = run_command(argv(&[
        "coverage",
        &path,
        "regs",
        &trace.to_string_lossy(),
    ]))?;

    assert_eq!(report["bank"], "regs");
    assert_eq!(report["accesses"], 5);
    assert_eq!(report["registers_total"], 4);
    assert_eq!(report["registers_hit"], 3);
    assert_eq!(report["unmapped_accesses"], 1);
    assert_eq!(report["registers"][0]["name"], "rbr");
    assert_eq!(report["registers"][0]["reads"], 1);
    assert_eq!(report["registers"][0]["writes"], 1);
    assert_eq!(report["registers"][2]["name"], "lcr");
    assert_eq!(report["registers"][2]["writes"], 1);
    Ok(())
}

#[test]
fn test_parse_trace_reports_line() -> Result<()> {
    let err = parse_trace("r 0\nbogus\n").err().map(|e| e.to_string());
    assert_eq!(err.as_deref(), Some("Invalid access on line 2"));
    Ok(())
}

#[test]
fn test_strict_names() -> Result<()> {
    let path = write_fixture(
        env!("CARGO_TARGET_TMPDIR"),
        "cli_strict",
        "dup.json",
        r#"{ "name": "d", "banks": [ { "name": "b", "registers": [
            { "name": "x", "size": 1, "offset": 0 },
            { "name": "x", "size": 1, "offset": 1 }
        ] } ] }"#,
    )?;
    let path = path.to_string_lossy().to_string();

    let x = run_command(argv(&["lookup", &path, "b", "x"]))?;
    assert_eq!(x["offset"], 1);
    assert!(run_command(argv(&["--strict-names", "lookup", &path, "b", "x"])).is_err());
    Ok(())
}
