// Copyright (C) 2023 Intel Corporation
// SPDX-License-Identifier: Apache-2.0

//! Registers of a bank

use crate::{
    descriptor::RegisterDescriptor,
    error::{Error, Result},
    field::Field,
    intern::FieldInterner,
};
use getters::Getters;
use serde::Serialize;
use std::{cmp::Reverse, sync::Arc};

#[derive(Getters, Serialize, Clone, Debug, PartialEq, Eq)]
/// A register of a bank. Every register has at least one field, and its fields are ordered
/// from the most significant high bit down.
pub struct Register {
    #[getters(deref)]
    name: String,
    #[getters(deref)]
    description: String,
    #[getters(copy)]
    /// Byte offset in the bank, if the register is mapped
    offset: Option<u64>,
    #[getters(copy)]
    /// Size in bytes
    size: u64,
    #[getters(deref)]
    fields: Arc<[Field]>,
    #[getters(copy)]
    big_endian_bitorder: bool,
    #[getters(copy)]
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Index of the register in the register view it was enumerated from
    view_index: Option<usize>,
}

impl Register {
    /// Validate a descriptor and build a register from it. Field layouts are shared through
    /// `interner` when one is given.
    pub(crate) fn from_descriptor(
        descriptor: &RegisterDescriptor,
        big_endian_bitorder: bool,
        view_index: Option<usize>,
        interner: Option<&mut FieldInterner>,
    ) -> Result<Self> {
        let name = descriptor.name();
        let size = descriptor.size();

        if size == 0 {
            return Err(Error::ZeroSizedRegister {
                register: name.to_string(),
            });
        }

        let width = size.saturating_mul(8);

        let mut fields = descriptor
            .fields()
            .iter()
            .map(|f| {
                let (lsb, msb) = (f.low(), f.msb());

                if lsb > msb {
                    Err(Error::FieldBitsReversed {
                        register: name.to_string(),
                        field: f.name().to_string(),
                        lsb,
                        msb,
                    })
                } else if msb >= width {
                    Err(Error::FieldOutOfRange {
                        register: name.to_string(),
                        field: f.name().to_string(),
                        msb,
                        width,
                    })
                } else {
                    Ok(Field::builder()
                        .name(f.name())
                        .description(f.description())
                        .lsb(lsb)
                        .msb(msb)
                        .build())
                }
            })
            .collect::<Result<Vec<_>>>()?;

        if fields.is_empty() {
            fields.push(Field::full_width(name, size));
        }

        fields.sort_by_key(|f| Reverse(f.msb()));

        let fields = match interner {
            Some(interner) => interner.intern(fields),
            None => Arc::from(fields),
        };

        Ok(Self {
            name: name.to_string(),
            description: descriptor.description().to_string(),
            offset: descriptor.offset(),
            size,
            fields,
            big_endian_bitorder,
            view_index,
        })
    }

    /// Width of the register in bits
    pub fn bits(&self) -> u64 {
        self.size.saturating_mul(8)
    }

    /// Last byte of the register, if it is mapped. Registers reaching past the top of the
    /// address space end at `u64::MAX`.
    pub fn last(&self) -> Option<u64> {
        self.offset
            .map(|o| o.saturating_add(self.size.saturating_sub(1)))
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name() == name)
    }

    /// Whether the register intersects the half-open byte range `[offset, offset + size)`.
    /// An empty range intersects nothing.
    pub fn overlaps(&self, offset: u64, size: u64) -> bool {
        if size == 0 {
            return false;
        }

        // Inclusive last bytes, so a range ending at the top of the address space still
        // reaches a register there
        let query_last = offset.saturating_add(size - 1);

        match (self.offset, self.last()) {
            (Some(start), Some(last)) => start <= query_last && last >= offset,
            _ => false,
        }
    }
}
