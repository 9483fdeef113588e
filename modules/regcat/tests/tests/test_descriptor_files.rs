// Copyright (C) 2023 Intel Corporation
// SPDX-License-Identifier: Apache-2.0

//! Loading devices from descriptor files

use anyhow::{anyhow, Result};
use regcat::{CatalogOptions, Device, DeviceDescriptor, Error};
use tests::{write_fixture, UART_JSON, UART_YAML};

#[test]
fn test_load_json() -> Result<()> {
    let path = write_fixture(env!("CARGO_TARGET_TMPDIR"), "load_json", "uart.json", UART_JSON)?;
    let device = Device::from_descriptor(
        &DeviceDescriptor::from_path(path)?,
        &CatalogOptions::default(),
    )?;

    assert_eq!(device.name(), "uart0");
    assert_eq!(device.banks().len(), 2);

    let regs = device.bank("regs").ok_or_else(|| anyhow!("No regs bank"))?;
    assert_eq!(regs.register_count(), 5);
    assert_eq!(regs.offset_index_len(), 4);
    assert!(!regs.big_endian_bitorder());

    // The placeholder is reachable by name but never by offset
    let stats = regs
        .lookup_by_name("fifo_stats")
        .ok_or_else(|| anyhow!("No fifo_stats"))?;
    assert_eq!(stats.offset(), None);
    assert!(regs
        .overlapping(0, u64::MAX)
        .all(|r| r.name() != "fifo_stats"));

    // Single-bit fields, sorted from the top bit down
    let ier = regs.lookup_by_name("ier").ok_or_else(|| anyhow!("No ier"))?;
    assert_eq!(
        ier.fields()
            .iter()
            .map(|f| (f.name(), f.msb(), f.lsb()))
            .collect::<Vec<_>>(),
        vec![("edssi", 3, 3), ("elsi", 2, 2), ("etbei", 1, 1), ("erbfi", 0, 0)]
    );

    // Registers without fields get one covering the whole register
    let rbr = regs.lookup_by_name("rbr").ok_or_else(|| anyhow!("No rbr"))?;
    assert_eq!(rbr.description(), "Receive buffer");
    assert_eq!(rbr.fields().len(), 1);
    assert_eq!(rbr.fields()[0].name(), "rbr");
    assert_eq!(rbr.fields()[0].msb(), 7);

    let pci = device
        .bank("pci_config")
        .ok_or_else(|| anyhow!("No pci_config bank"))?;
    assert!(pci.big_endian_bitorder());
    assert_eq!(pci.function_number(), 1);
    assert_eq!(
        pci.overlapping(2, 4).map(|r| r.name()).collect::<Vec<_>>(),
        vec!["device_id", "command"]
    );
    assert!(pci.overlapping(8, 8).next().is_none());
    Ok(())
}

#[test]
fn test_load_yaml() -> Result<()> {
    let path = write_fixture(env!("CARGO_TARGET_TMPDIR"), "load_yaml", "uart.yml", UART_YAML)?;
    let device = Device::from_descriptor(
        &DeviceDescriptor::from_path(path)?,
        &CatalogOptions::default(),
    )?;

    let regs = device.bank("regs").ok_or_else(|| anyhow!("No regs bank"))?;
    let lcr = regs.lookup_by_name("lcr").ok_or_else(|| anyhow!("No lcr"))?;
    assert_eq!(lcr.field("dlab").map(|f| f.msb()), Some(7));
    assert_eq!(lcr.field("wls").map(|f| f.width()), Some(2));
    Ok(())
}

#[test]
fn test_json_and_yaml_agree() -> Result<()> {
    let json = DeviceDescriptor::from_json_str(UART_JSON)?;
    let yaml = DeviceDescriptor::from_yaml_str(UART_YAML)?;

    let json_lcr = &json.banks()[0].registers()[2];
    let yaml_lcr = &yaml.banks()[0].registers()[2];
    assert_eq!(json_lcr, yaml_lcr);
    Ok(())
}

#[test]
fn test_unsupported_extension() -> Result<()> {
    let path = write_fixture(env!("CARGO_TARGET_TMPDIR"), "unsupported", "uart.txt", UART_JSON)?;
    assert!(matches!(
        DeviceDescriptor::from_path(path),
        Err(Error::UnsupportedFormat { .. })
    ));
    Ok(())
}

#[test]
fn test_invalid_register_rejected() -> Result<()> {
    let descriptor = DeviceDescriptor::from_json_str(
        r#"{ "name": "bad", "banks": [ { "name": "regs", "registers": [
            { "name": "ok", "size": 4, "offset": 0 },
            { "name": "empty", "size": 0, "offset": 4 }
        ] } ] }"#,
    )?;

    assert!(matches!(
        Device::from_descriptor(&descriptor, &CatalogOptions::default()),
        Err(Error::ZeroSizedRegister { .. })
    ));
    Ok(())
}
