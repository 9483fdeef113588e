// Copyright (C) 2023 Intel Corporation
// SPDX-License-Identifier: Apache-2.0

//! Static descriptors for devices, banks, registers, and fields
//!
//! Descriptors are the offline construction source for catalogs. They are read from JSON or
//! YAML files, or produced by a [`crate::view::RegisterView`] when enumerating a live bank.

use crate::error::{Error, Result};
use getters::Getters;
use serde::{Deserialize, Serialize};
use std::{fs::read_to_string, path::Path};
use tracing::debug;
use typed_builder::TypedBuilder;

#[derive(TypedBuilder, Getters, Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
/// A bit-field description. A field with only a low bit is a single bit wide.
pub struct FieldDescriptor {
    #[builder(setter(into))]
    #[getters(deref)]
    name: String,
    #[builder(default, setter(into))]
    #[serde(default)]
    #[getters(deref)]
    description: String,
    #[getters(copy)]
    low: u64,
    #[builder(default, setter(strip_option))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[getters(copy)]
    high: Option<u64>,
}

impl FieldDescriptor {
    /// The high bit of the field, which is the low bit for single-bit fields
    pub fn msb(&self) -> u64 {
        self.high.unwrap_or(self.low)
    }
}

#[derive(TypedBuilder, Getters, Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct RegisterDescriptor {
    #[builder(setter(into))]
    #[getters(deref)]
    name: String,
    #[builder(default, setter(into))]
    #[serde(default)]
    #[getters(deref)]
    description: String,
    #[getters(copy)]
    /// Size of the register in bytes
    size: u64,
    #[builder(default, setter(strip_option))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[getters(copy)]
    /// Byte offset within the bank. Unimplemented placeholder registers have no offset.
    offset: Option<u64>,
    #[builder(default)]
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    #[getters(deref)]
    fields: Vec<FieldDescriptor>,
}

#[derive(TypedBuilder, Getters, Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct BankDescriptor {
    #[builder(setter(into))]
    #[getters(deref)]
    name: String,
    #[builder(default, setter(into))]
    #[serde(default)]
    #[getters(deref)]
    description: String,
    #[builder(default)]
    #[serde(default)]
    #[getters(copy)]
    /// Function number grouping banks that are mapped together
    function: u64,
    #[builder(default, setter(strip_option))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[getters(copy)]
    /// Bit order of the bank. Banks that leave this unset inherit the device bit order.
    big_endian_bitorder: Option<bool>,
    #[builder(default)]
    #[serde(default)]
    #[getters(deref)]
    registers: Vec<RegisterDescriptor>,
}

#[derive(TypedBuilder, Getters, Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct DeviceDescriptor {
    #[builder(setter(into))]
    #[getters(deref)]
    name: String,
    #[builder(default, setter(into))]
    #[serde(default)]
    #[getters(deref)]
    description: String,
    #[builder(default)]
    #[serde(default)]
    #[getters(copy)]
    big_endian_bitorder: bool,
    #[builder(default)]
    #[serde(default)]
    #[getters(deref)]
    banks: Vec<BankDescriptor>,
}

impl DeviceDescriptor {
    pub fn from_json_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn from_yaml_str(s: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Load a descriptor file. The format is chosen by extension: `.json`, `.yml`, or `.yaml`.
    pub fn from_path<P>(path: P) -> Result<Self>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().to_ascii_lowercase())
            .unwrap_or_default();

        debug!("Loading device descriptor from {}", path.display());

        let contents = read_to_string(path)?;

        match extension.as_str() {
            "json" => Self::from_json_str(&contents),
            "yml" | "yaml" => Self::from_yaml_str(&contents),
            _ => Err(Error::UnsupportedFormat { extension }),
        }
    }
}
