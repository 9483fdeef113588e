// Copyright (C) 2023 Intel Corporation
// SPDX-License-Identifier: Apache-2.0

//! Catalogs enumerated from a live register view

use anyhow::Result;
use regcat::{
    view::LiveBank, CatalogOptions, Error, FieldDescriptor, RegisterCatalog, RegisterDescriptor,
};
use tests::MockRegisterView;

fn registers() -> Vec<RegisterDescriptor> {
    vec![
        RegisterDescriptor::builder()
            .name("irq_status")
            .size(4)
            .offset(0x10)
            .fields(vec![
                FieldDescriptor::builder().name("pending").low(0).high(7).build(),
                FieldDescriptor::builder().name("overflow").low(31).build(),
            ])
            .build(),
        RegisterDescriptor::builder()
            .name("irq_mask")
            .size(4)
            .offset(0x14)
            .build(),
        RegisterDescriptor::builder()
            .name("reserved")
            .description("Unmapped placeholder")
            .size(4)
            .build(),
    ]
}

#[test]
fn test_catalog_from_view() -> Result<()> {
    let view = MockRegisterView::new(false, registers());
    let c = RegisterCatalog::from_view("irq", &view, &CatalogOptions::default())?;

    assert_eq!(c.name(), "irq");
    assert_eq!(c.description(), "Mock register view");
    assert_eq!(c.register_count(), 3);
    assert_eq!(c.offset_index_len(), 2);
    assert_eq!(
        c.lookup_by_name("reserved").and_then(|r| r.view_index()),
        Some(2)
    );
    assert_eq!(
        c.overlapping(0x12, 4)
            .map(|r| r.view_index())
            .collect::<Vec<_>>(),
        vec![Some(0), Some(1)]
    );
    Ok(())
}

#[test]
fn test_live_values() -> Result<()> {
    let mut bank = LiveBank::new(
        "irq",
        MockRegisterView::new(false, registers()),
        &CatalogOptions::default(),
    )?;

    bank.write("irq_status", 0x8000_0042)?;
    assert_eq!(bank.read_field("irq_status", "pending")?, 0x42);
    assert_eq!(bank.read_field("irq_status", "overflow")?, 1);

    bank.write_field("irq_status", "overflow", 0)?;
    assert_eq!(bank.read("irq_status")?, 0x42);

    // Placeholders are still backed by the view
    bank.write("reserved", 7)?;

    let (catalog, view) = bank.into_inner();
    assert_eq!(view.values, vec![0x42, 0, 7]);
    assert!(catalog.lookup_by_name("irq_mask").is_some());
    Ok(())
}

#[test]
fn test_big_endian_view() -> Result<()> {
    let mut bank = LiveBank::new(
        "irq",
        MockRegisterView::new(true, registers()),
        &CatalogOptions::default(),
    )?;

    assert!(bank.catalog().big_endian_bitorder());

    // Bit 31 is the least significant bit of the register in big-endian bit order
    bank.write_field("irq_status", "overflow", 1)?;
    assert_eq!(bank.read("irq_status")?, 0x1);

    // Bits [0:7] are the top byte
    bank.write_field("irq_status", "pending", 0xa5)?;
    assert_eq!(bank.read("irq_status")?, 0xa500_0001);
    Ok(())
}

#[test]
fn test_catalog_without_view_index() -> Result<()> {
    let view = MockRegisterView::new(false, registers());
    let c = RegisterCatalog::from_registers("static", &registers(), &CatalogOptions::default())?;
    assert!(c.registers().iter().all(|r| r.view_index().is_none()));

    let mut bank = LiveBank::with_catalog(c, view);
    assert!(matches!(
        bank.read("irq_status"),
        Err(Error::NoViewIndex { .. })
    ));
    assert!(matches!(
        bank.write("irq_mask", 1),
        Err(Error::NoViewIndex { .. })
    ));
    assert!(matches!(
        bank.read("missing"),
        Err(Error::RegisterNotFound { .. })
    ));

    let (_, view) = bank.into_inner();
    assert_eq!(view.values, vec![0, 0, 0]);
    Ok(())
}

#[test]
fn test_view_enumeration_errors_propagate() -> Result<()> {
    let mut registers = registers();
    registers.push(RegisterDescriptor::builder().name("broken").size(0).build());
    let view = MockRegisterView::new(false, registers);

    assert!(matches!(
        RegisterCatalog::from_view("irq", &view, &CatalogOptions::default()),
        Err(Error::ZeroSizedRegister { .. })
    ));
    Ok(())
}
