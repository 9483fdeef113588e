// Copyright (C) 2023 Intel Corporation
// SPDX-License-Identifier: Apache-2.0

//! Register bank catalogs for SIMICS device models
//!
//! # Overview
//!
//! A [`RegisterCatalog`] holds the registers of one bank of a device model and answers two
//! queries: which register has a given name, and which registers overlap a range of bank
//! offsets. Catalogs are built once from a static [`descriptor`] file or by enumerating a
//! live [`view::RegisterView`], and are immutable afterward, so they can be shared between
//! threads freely.
//!
//! # Capabilities
//!
//! - Name lookup in constant time and overlap queries in `O(log n + k)`
//! - Sharing of identical field layouts between the registers of a bank or device
//! - Grouping of banks into a [`Device`]
//! - Reading and writing live register and field values through a [`view::LiveBank`]
//! - Counting bank accesses per register with [`coverage::BankCoverage`]
//!
//! ```
//! use regcat::{CatalogOptions, RegisterCatalog, RegisterDescriptor};
//!
//! let registers = [(0, 4), (4, 2), (6, 8)]
//!     .iter()
//!     .map(|&(offset, size)| {
//!         RegisterDescriptor::builder()
//!             .name(format!("r{offset}"))
//!             .size(size)
//!             .offset(offset)
//!             .build()
//!     })
//!     .collect::<Vec<_>>();
//!
//! let bank = RegisterCatalog::from_registers("regs", &registers, &CatalogOptions::default())?;
//!
//! let hits = bank.overlapping(3, 4).map(|r| r.name()).collect::<Vec<_>>();
//! assert_eq!(hits, ["r0", "r4", "r6"]);
//! assert!(bank.lookup_by_name("r4").is_some());
//! # Ok::<(), regcat::Error>(())
//! ```

#![deny(clippy::all)]
#![deny(clippy::unwrap_used)]
#![forbid(unsafe_code)]

pub mod catalog;
pub mod configuration;
pub mod coverage;
pub mod descriptor;
pub mod device;
pub mod error;
pub mod field;
pub mod intern;
pub mod register;
pub mod view;

pub use catalog::{Overlapping, RegisterCatalog};
pub use configuration::CatalogOptions;
pub use descriptor::{BankDescriptor, DeviceDescriptor, FieldDescriptor, RegisterDescriptor};
pub use device::Device;
pub use error::{Error, Result};
pub use field::Field;
pub use register::Register;
