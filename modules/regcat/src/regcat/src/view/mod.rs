// Copyright (C) 2023 Intel Corporation
// SPDX-License-Identifier: Apache-2.0

//! Live register views
//!
//! A [`RegisterView`] enumerates the registers of a bank on a running device model and
//! reads and writes their current values by index. Catalogs built from a view remember each
//! register's index, and a [`LiveBank`] uses it to access values by register name.

use crate::{
    catalog::RegisterCatalog,
    configuration::CatalogOptions,
    descriptor::RegisterDescriptor,
    error::{Error, Result},
    intern::FieldInterner,
    register::Register,
};
use tracing::trace;

/// Introspection interface of a bank on a device model
pub trait RegisterView {
    fn description(&self) -> String;
    fn big_endian_bitorder(&self) -> bool;
    fn number_of_registers(&self) -> usize;
    /// Describe the register at `index`, `0 <= index < number_of_registers()`
    fn register_info(&self, index: usize) -> Result<RegisterDescriptor>;
    fn register_value(&self, index: usize) -> Result<u64>;
    fn set_register_value(&mut self, index: usize, value: u64) -> Result<()>;
}

impl RegisterCatalog {
    /// Enumerate every register of `view` and build a catalog from them. Each register
    /// records its index in the view.
    pub fn from_view<S, V>(name: S, view: &V, options: &CatalogOptions) -> Result<Self>
    where
        S: AsRef<str>,
        V: RegisterView + ?Sized,
    {
        let descriptors = (0..view.number_of_registers())
            .map(|index| view.register_info(index))
            .collect::<Result<Vec<_>>>()?;

        let mut interner = FieldInterner::new();

        Self::build(
            name.as_ref(),
            &view.description(),
            0,
            view.big_endian_bitorder(),
            descriptors.iter().enumerate().map(|(index, d)| (d, Some(index))),
            options,
            &mut interner,
        )
    }
}

/// A catalog together with the view it was enumerated from
pub struct LiveBank<V> {
    catalog: RegisterCatalog,
    view: V,
}

impl<V> LiveBank<V>
where
    V: RegisterView,
{
    pub fn new<S>(name: S, view: V, options: &CatalogOptions) -> Result<Self>
    where
        S: AsRef<str>,
    {
        let catalog = RegisterCatalog::from_view(name, &view, options)?;
        Ok(Self { catalog, view })
    }

    /// Pair an already built catalog with `view`. Registers of the catalog that were not
    /// enumerated from a view have no view index and cannot be accessed.
    pub fn with_catalog(catalog: RegisterCatalog, view: V) -> Self {
        Self { catalog, view }
    }

    pub fn catalog(&self) -> &RegisterCatalog {
        &self.catalog
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn into_inner(self) -> (RegisterCatalog, V) {
        (self.catalog, self.view)
    }

    fn resolve(&self, name: &str) -> Result<(&Register, usize)> {
        let register =
            self.catalog
                .lookup_by_name(name)
                .ok_or_else(|| Error::RegisterNotFound {
                    bank: self.catalog.name().to_string(),
                    register: name.to_string(),
                })?;

        if register.size() > 8 {
            return Err(Error::ValueTooWide {
                register: name.to_string(),
                size: register.size(),
            });
        }

        let index = register.view_index().ok_or_else(|| Error::NoViewIndex {
            register: name.to_string(),
        })?;

        Ok((register, index))
    }

    /// Current value of the register named `name`
    pub fn read(&self, name: &str) -> Result<u64> {
        let (_, index) = self.resolve(name)?;
        let value = self.view.register_value(index)?;
        trace!("Read {:#x} from {}", value, name);
        Ok(value)
    }

    pub fn write(&mut self, name: &str, value: u64) -> Result<()> {
        let (_, index) = self.resolve(name)?;
        trace!("Writing {:#x} to {}", value, name);
        self.view.set_register_value(index, value)
    }

    /// Current value of field `field` of register `name`
    pub fn read_field(&self, name: &str, field: &str) -> Result<u64> {
        let (register, index) = self.resolve(name)?;
        let field = register.field(field).ok_or_else(|| Error::FieldNotFound {
            register: name.to_string(),
            field: field.to_string(),
        })?;

        let value = self.view.register_value(index)?;

        Ok(field.extract(
            value,
            register.bits(),
            self.catalog.big_endian_bitorder(),
        ))
    }

    /// Update field `field` of register `name`, leaving the other bits unchanged
    pub fn write_field(&mut self, name: &str, field: &str, field_value: u64) -> Result<()> {
        let (register, index) = self.resolve(name)?;
        let field = register.field(field).ok_or_else(|| Error::FieldNotFound {
            register: name.to_string(),
            field: field.to_string(),
        })?;

        let value = field.insert(
            self.view.register_value(index)?,
            field_value,
            register.bits(),
            self.catalog.big_endian_bitorder(),
        );

        trace!("Writing {:#x} to {}", value, name);
        self.view.set_register_value(index, value)
    }
}
