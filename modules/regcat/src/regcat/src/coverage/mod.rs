// Copyright (C) 2023 Intel Corporation
// SPDX-License-Identifier: Apache-2.0

//! Access coverage of a bank
//!
//! Each recorded access is resolved to the registers it touches with an overlap query, and
//! a read or write is counted for each of them. Accesses that touch no register are counted
//! as unmapped.

use crate::{
    catalog::RegisterCatalog,
    error::{Error, Result},
};
use getters::Getters;
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fmt::Display, str::FromStr};
use tracing::trace;
use typed_builder::TypedBuilder;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum AccessKind {
    Read,
    Write,
}

impl Display for AccessKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AccessKind::Read => write!(f, "r"),
            AccessKind::Write => write!(f, "w"),
        }
    }
}

#[derive(TypedBuilder, Getters, Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Access {
    #[getters(copy)]
    kind: AccessKind,
    #[getters(copy)]
    offset: u64,
    #[builder(default = 1)]
    #[getters(copy)]
    size: u64,
}

impl Display for Access {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {:#x} {}", self.kind, self.offset, self.size)
    }
}

/// Parse an unsigned number given in decimal or as `0x`-prefixed hex
pub fn parse_number(s: &str) -> Option<u64> {
    match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16).ok(),
        None => s.parse().ok(),
    }
}

impl FromStr for Access {
    type Err = Error;

    /// Parse an access of the form `r|w OFFSET [SIZE]`. Numbers are decimal or `0x` hex,
    /// and the size defaults to one byte.
    fn from_str(s: &str) -> Result<Self> {
        let invalid = |message: &str| Error::InvalidAccess {
            access: s.to_string(),
            message: message.to_string(),
        };

        let parts = s.split_whitespace().collect::<Vec<_>>();

        let kind = match parts.first().map(|k| k.to_ascii_lowercase()).as_deref() {
            Some("r") | Some("read") => AccessKind::Read,
            Some("w") | Some("write") => AccessKind::Write,
            _ => return Err(invalid("expected access kind r or w")),
        };

        let offset = parts
            .get(1)
            .and_then(|o| parse_number(o))
            .ok_or_else(|| invalid("expected offset"))?;

        let size = match parts.get(2) {
            Some(size) => parse_number(size).ok_or_else(|| invalid("invalid size"))?,
            None => 1,
        };

        if parts.len() > 3 {
            return Err(invalid("trailing input"));
        }

        Ok(Self { kind, offset, size })
    }
}

#[derive(Getters, Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct RegisterCoverage {
    #[getters(deref)]
    name: String,
    #[getters(copy)]
    offset: u64,
    #[getters(copy)]
    size: u64,
    #[getters(copy)]
    reads: u64,
    #[getters(copy)]
    writes: u64,
}

#[derive(Getters, Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct CoverageReport {
    #[getters(deref)]
    bank: String,
    #[getters(deref)]
    /// Mapped registers in ascending offset order
    registers: Vec<RegisterCoverage>,
    #[getters(copy)]
    registers_hit: usize,
    #[getters(copy)]
    registers_total: usize,
    #[getters(copy)]
    accesses: u64,
    #[getters(copy)]
    unmapped_accesses: u64,
    /// Offsets of unmapped accesses with the number of accesses at each
    unmapped: BTreeMap<u64, u64>,
}

impl CoverageReport {
    /// Fraction of mapped registers accessed at least once
    pub fn ratio(&self) -> f64 {
        if self.registers_total == 0 {
            0.0
        } else {
            self.registers_hit as f64 / self.registers_total as f64
        }
    }
}

/// Read and write counters for the registers of one bank
pub struct BankCoverage<'a> {
    catalog: &'a RegisterCatalog,
    reads: Vec<u64>,
    writes: Vec<u64>,
    accesses: u64,
    unmapped: BTreeMap<u64, u64>,
}

impl<'a> BankCoverage<'a> {
    pub fn new(catalog: &'a RegisterCatalog) -> Self {
        Self {
            catalog,
            reads: vec![0; catalog.len()],
            writes: vec![0; catalog.len()],
            accesses: 0,
            unmapped: BTreeMap::new(),
        }
    }

    /// Count an access against every register it overlaps. Returns the number of registers
    /// touched. An access of size zero touches nothing and is counted as unmapped at its
    /// offset.
    pub fn record(&mut self, access: Access) -> usize {
        self.accesses += 1;

        let counters = match access.kind() {
            AccessKind::Read => &mut self.reads,
            AccessKind::Write => &mut self.writes,
        };

        let mut touched = 0;

        for index in self
            .catalog
            .overlapping(access.offset(), access.size())
            .indices()
        {
            counters[index] += 1;
            touched += 1;
        }

        trace!("Access {} touched {} registers", access, touched);

        if touched == 0 {
            *self.unmapped.entry(access.offset()).or_default() += 1;
        }

        touched
    }

    pub fn record_all<I>(&mut self, accesses: I)
    where
        I: IntoIterator<Item = Access>,
    {
        for access in accesses {
            self.record(access);
        }
    }

    pub fn reads(&self, name: &str) -> Option<u64> {
        self.catalog.index_of(name).map(|index| self.reads[index])
    }

    pub fn writes(&self, name: &str) -> Option<u64> {
        self.catalog.index_of(name).map(|index| self.writes[index])
    }

    pub fn report(&self) -> CoverageReport {
        let registers = self
            .catalog
            .mapped_registers()
            .filter_map(|(index, register)| {
                register.offset().map(|offset| RegisterCoverage {
                    name: register.name().to_string(),
                    offset,
                    size: register.size(),
                    reads: self.reads[index],
                    writes: self.writes[index],
                })
            })
            .collect::<Vec<_>>();

        CoverageReport {
            bank: self.catalog.name().to_string(),
            registers_hit: registers
                .iter()
                .filter(|r| r.reads > 0 || r.writes > 0)
                .count(),
            registers_total: registers.len(),
            registers,
            accesses: self.accesses,
            unmapped_accesses: self.unmapped.values().sum(),
            unmapped: self.unmapped.clone(),
        }
    }
}
