// Copyright (C) 2023 Intel Corporation
// SPDX-License-Identifier: Apache-2.0

//! Devices group the register banks of one device model

use crate::{
    catalog::RegisterCatalog,
    configuration::CatalogOptions,
    descriptor::DeviceDescriptor,
    error::Result,
    intern::FieldInterner,
};
use getters::Getters;
use tracing::debug;

#[derive(Getters, Clone, Debug)]
pub struct Device {
    #[getters(deref)]
    name: String,
    #[getters(deref)]
    description: String,
    #[getters(copy)]
    big_endian_bitorder: bool,
    #[getters(deref)]
    banks: Vec<RegisterCatalog>,
}

impl Device {
    /// Build every bank of the device. Banks without their own bit order use the device's,
    /// and all banks share field layouts.
    pub fn from_descriptor(
        descriptor: &DeviceDescriptor,
        options: &CatalogOptions,
    ) -> Result<Self> {
        let mut interner = FieldInterner::new();

        let banks = descriptor
            .banks()
            .iter()
            .map(|bank| {
                RegisterCatalog::from_descriptor_with_interner(
                    bank,
                    options,
                    descriptor.big_endian_bitorder(),
                    &mut interner,
                )
            })
            .collect::<Result<Vec<_>>>()?;

        debug!(
            "Built device {} with {} banks and {} distinct field layouts",
            descriptor.name(),
            banks.len(),
            interner.len()
        );

        Ok(Self {
            name: descriptor.name().to_string(),
            description: descriptor.description().to_string(),
            big_endian_bitorder: descriptor.big_endian_bitorder(),
            banks,
        })
    }

    /// The first bank named `name`
    pub fn bank(&self, name: &str) -> Option<&RegisterCatalog> {
        self.banks.iter().find(|b| b.name() == name)
    }

    /// Banks with function number `function`, in device order
    pub fn banks_by_function(
        &self,
        function: u64,
    ) -> impl Iterator<Item = &RegisterCatalog> + '_ {
        self.banks
            .iter()
            .filter(move |b| b.function_number() == function)
    }
}
