// Copyright (C) 2023 Intel Corporation
// SPDX-License-Identifier: Apache-2.0

//! Options controlling how catalogs are built

use getters::Getters;
use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

impl CatalogOptions {
    pub const DEFAULT_INTERN_FIELDS: bool = true;
    pub const DEFAULT_STRICT_NAMES: bool = false;
    pub const DEFAULT_BIG_ENDIAN_BITORDER: bool = false;
}

#[derive(TypedBuilder, Getters, Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct CatalogOptions {
    #[builder(default = CatalogOptions::DEFAULT_INTERN_FIELDS)]
    #[serde(default = "default_intern_fields")]
    #[getters(copy)]
    /// Whether registers with identical field layouts share one copy of the layout
    intern_fields: bool,
    #[builder(default = CatalogOptions::DEFAULT_STRICT_NAMES)]
    #[serde(default)]
    #[getters(copy)]
    /// Whether a register name appearing twice is an error. Otherwise the last register with
    /// a given name is the one found by name lookup.
    strict_names: bool,
    #[builder(default = CatalogOptions::DEFAULT_BIG_ENDIAN_BITORDER)]
    #[serde(default)]
    #[getters(copy)]
    /// Bit order used when the construction source does not specify one
    big_endian_bitorder: bool,
}

fn default_intern_fields() -> bool {
    CatalogOptions::DEFAULT_INTERN_FIELDS
}

impl Default for CatalogOptions {
    fn default() -> Self {
        Self::builder().build()
    }
}
