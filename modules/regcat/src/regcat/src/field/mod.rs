// Copyright (C) 2023 Intel Corporation
// SPDX-License-Identifier: Apache-2.0

//! Bit-fields of a register

use getters::Getters;
use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

#[derive(TypedBuilder, Getters, Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
/// A named range of bits `[msb:lsb]` within a register. Bit numbers follow the bit order of
/// the bank the register belongs to.
pub struct Field {
    #[builder(setter(into))]
    #[getters(deref)]
    name: String,
    #[builder(default, setter(into))]
    #[getters(deref)]
    description: String,
    #[getters(copy)]
    /// The low bit of the field
    lsb: u64,
    #[getters(copy)]
    /// The high bit of the field
    msb: u64,
}

impl Field {
    /// A field covering every bit of a register `size` bytes wide
    pub fn full_width<S>(name: S, size: u64) -> Self
    where
        S: Into<String>,
    {
        Self {
            name: name.into(),
            description: String::new(),
            lsb: 0,
            msb: size.saturating_mul(8).saturating_sub(1),
        }
    }

    /// Number of bits in the field
    pub fn width(&self) -> u64 {
        self.msb.saturating_sub(self.lsb).saturating_add(1)
    }

    /// The little-endian bit index of the field's least significant bit
    fn shift(&self, register_bits: u64, big_endian_bitorder: bool) -> u64 {
        if big_endian_bitorder {
            register_bits.saturating_sub(1).saturating_sub(self.msb)
        } else {
            self.lsb
        }
    }

    fn mask(&self) -> u64 {
        if self.width() >= u64::BITS as u64 {
            u64::MAX
        } else {
            (1 << self.width()) - 1
        }
    }

    /// Extract the value of this field from the value of a register `register_bits` wide.
    /// With big-endian bit order, bit 0 is the most significant bit of the register.
    pub fn extract(&self, value: u64, register_bits: u64, big_endian_bitorder: bool) -> u64 {
        let shift = self.shift(register_bits, big_endian_bitorder);

        if shift >= u64::BITS as u64 {
            0
        } else {
            (value >> shift) & self.mask()
        }
    }

    /// Replace the bits of this field in `value` with `field_value`, truncated to the field
    /// width. Bits outside the field are preserved.
    pub fn insert(
        &self,
        value: u64,
        field_value: u64,
        register_bits: u64,
        big_endian_bitorder: bool,
    ) -> u64 {
        let shift = self.shift(register_bits, big_endian_bitorder);

        if shift >= u64::BITS as u64 {
            value
        } else {
            let mask = self.mask() << shift;
            (value & !mask) | ((field_value << shift) & mask)
        }
    }
}
