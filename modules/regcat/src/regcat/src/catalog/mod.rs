// Copyright (C) 2023 Intel Corporation
// SPDX-License-Identifier: Apache-2.0

//! Immutable catalog of the registers of one bank
//!
//! The catalog answers two queries: exact lookup by register name, and which registers
//! overlap a byte range of the bank, in ascending offset order. Both indexes are built
//! once, when the catalog is constructed, and never change afterward.
//!
//! Overlap queries assume the registers of a bank do not overlap each other. Only one
//! register starting before the queried offset is considered, so a bank with nested or
//! overlapping sibling registers may have matches missed.

use crate::{
    configuration::CatalogOptions,
    descriptor::{BankDescriptor, RegisterDescriptor},
    error::{Error, Result},
    intern::FieldInterner,
    register::Register,
};
use getters::Getters;
use std::{
    collections::HashMap,
    iter::{from_fn, FusedIterator},
    slice::Iter,
};
use tracing::{debug, warn};

#[derive(Getters, Clone, Debug)]
pub struct RegisterCatalog {
    #[getters(deref)]
    name: String,
    #[getters(deref)]
    description: String,
    #[getters(copy)]
    function_number: u64,
    #[getters(copy)]
    big_endian_bitorder: bool,
    #[getters(skip)]
    registers: Vec<Register>,
    #[getters(skip)]
    by_name: HashMap<String, usize>,
    #[getters(skip)]
    /// `(offset, index)` of every mapped register, ascending by offset
    by_offset: Vec<(u64, usize)>,
}

impl RegisterCatalog {
    /// Build a catalog from a static bank descriptor. Banks that do not specify a bit order
    /// use the one in `options`.
    pub fn from_descriptor(bank: &BankDescriptor, options: &CatalogOptions) -> Result<Self> {
        let mut interner = FieldInterner::new();
        Self::from_descriptor_with_interner(
            bank,
            options,
            options.big_endian_bitorder(),
            &mut interner,
        )
    }

    /// Build a catalog for a bank named `name` from an ordered list of register descriptors
    pub fn from_registers<S>(
        name: S,
        registers: &[RegisterDescriptor],
        options: &CatalogOptions,
    ) -> Result<Self>
    where
        S: AsRef<str>,
    {
        let mut interner = FieldInterner::new();
        Self::build(
            name.as_ref(),
            "",
            0,
            options.big_endian_bitorder(),
            registers.iter().map(|r| (r, None)),
            options,
            &mut interner,
        )
    }

    pub(crate) fn from_descriptor_with_interner(
        bank: &BankDescriptor,
        options: &CatalogOptions,
        default_big_endian_bitorder: bool,
        interner: &mut FieldInterner,
    ) -> Result<Self> {
        Self::build(
            bank.name(),
            bank.description(),
            bank.function(),
            bank
                .big_endian_bitorder()
                .unwrap_or(default_big_endian_bitorder),
            bank.registers().iter().map(|r| (r, None)),
            options,
            interner,
        )
    }

    /// Build the catalog and both of its indexes. Nothing is returned unless every register
    /// descriptor is valid.
    pub(crate) fn build<'a, I>(
        name: &str,
        description: &str,
        function_number: u64,
        big_endian_bitorder: bool,
        descriptors: I,
        options: &CatalogOptions,
        interner: &mut FieldInterner,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a RegisterDescriptor, Option<usize>)>,
    {
        let mut registers = Vec::new();

        for (descriptor, view_index) in descriptors {
            let interner = options.intern_fields().then_some(&mut *interner);
            registers.push(Register::from_descriptor(
                descriptor,
                big_endian_bitorder,
                view_index,
                interner,
            )?);
        }

        let mut by_name = HashMap::with_capacity(registers.len());

        for (index, register) in registers.iter().enumerate() {
            if let Some(previous) = by_name.insert(register.name().to_string(), index) {
                if options.strict_names() {
                    return Err(Error::DuplicateRegister {
                        bank: name.to_string(),
                        register: register.name().to_string(),
                    });
                }

                warn!(
                    "Register {} at index {} of bank {} replaces the one at index {}",
                    register.name(),
                    index,
                    name,
                    previous
                );
            }
        }

        let mut by_offset = registers
            .iter()
            .enumerate()
            .filter_map(|(index, register)| register.offset().map(|offset| (offset, index)))
            .collect::<Vec<_>>();

        // Stable, so registers sharing an offset keep their enumeration order
        by_offset.sort_by_key(|(offset, _)| *offset);

        debug!(
            "Built catalog for bank {} with {} registers ({} mapped)",
            name,
            registers.len(),
            by_offset.len()
        );

        Ok(Self {
            name: name.to_string(),
            description: description.to_string(),
            function_number,
            big_endian_bitorder,
            registers,
            by_name,
            by_offset,
        })
    }

    /// Number of registers in the bank, mapped or not
    pub fn register_count(&self) -> usize {
        self.registers.len()
    }

    pub fn len(&self) -> usize {
        self.registers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registers.is_empty()
    }

    /// Number of registers with a known offset
    pub fn offset_index_len(&self) -> usize {
        self.by_offset.len()
    }

    /// The register at position `index` of the enumeration the catalog was built from
    pub fn register(&self, index: usize) -> Option<&Register> {
        self.registers.get(index)
    }

    /// All registers, in enumeration order
    pub fn registers(&self) -> &[Register] {
        &self.registers
    }

    /// Registers with a known offset and their enumeration index, in ascending offset order
    pub fn mapped_registers(&self) -> impl Iterator<Item = (usize, &Register)> + '_ {
        self.by_offset
            .iter()
            .map(|&(_, index)| (index, &self.registers[index]))
    }

    pub fn lookup_by_name(&self, name: &str) -> Option<&Register> {
        self.index_of(name).map(|index| &self.registers[index])
    }

    /// Enumeration index of the register named `name`
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.by_name.get(name).copied()
    }

    /// Names of all registers, in no particular order
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.by_name.keys().map(String::as_str)
    }

    /// Registers overlapping the single byte at `offset`
    pub fn overlapping_at(&self, offset: u64) -> Overlapping<'_> {
        self.overlapping(offset, 1)
    }

    /// Registers with a known offset that overlap the byte range `[offset, offset + size)`,
    /// in ascending offset order
    pub fn overlapping(&self, offset: u64, size: u64) -> Overlapping<'_> {
        // First entry starting strictly after `offset`, then back up one position for a
        // register that starts before `offset` but extends into the range
        let hi = self.by_offset.partition_point(|&(start, _)| start <= offset);
        let lo = hi.saturating_sub(1);

        Overlapping {
            registers: &self.registers,
            candidates: self.by_offset[lo..].iter(),
            offset,
            size,
            done: size == 0,
        }
    }
}

/// Lazy, forward-only scan over the registers overlapping a byte range
pub struct Overlapping<'a> {
    registers: &'a [Register],
    candidates: Iter<'a, (u64, usize)>,
    offset: u64,
    size: u64,
    done: bool,
}

impl<'a> Overlapping<'a> {
    fn next_entry(&mut self) -> Option<(usize, &'a Register)> {
        if self.done {
            return None;
        }

        // Last byte of the range. Empty ranges are marked done when the scan is created.
        let last = self.offset.saturating_add(self.size.saturating_sub(1));

        for &(start, index) in self.candidates.by_ref() {
            // Offsets ascend, nothing from here on can start inside the range
            if start > last {
                break;
            }

            let register = &self.registers[index];

            if register.overlaps(self.offset, self.size) {
                return Some((index, register));
            }
        }

        self.done = true;
        None
    }

    /// Yield the enumeration index of each overlapping register instead of the register
    pub fn indices(mut self) -> impl Iterator<Item = usize> + 'a {
        from_fn(move || self.next_entry().map(|(index, _)| index))
    }
}

impl<'a> Iterator for Overlapping<'a> {
    type Item = &'a Register;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_entry().map(|(_, register)| register)
    }
}

impl FusedIterator for Overlapping<'_> {}
