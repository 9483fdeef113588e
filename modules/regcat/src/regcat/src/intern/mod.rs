// Copyright (C) 2023 Intel Corporation
// SPDX-License-Identifier: Apache-2.0

//! Deduplication of field layouts
//!
//! Banks with register arrays enumerate many registers whose field layouts are identical.
//! The interner keeps one shared, immutable copy of each distinct layout.

use crate::field::Field;
use std::{collections::HashSet, sync::Arc};

#[derive(Debug, Default, Clone)]
pub struct FieldInterner {
    layouts: HashSet<Arc<[Field]>>,
}

impl FieldInterner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the canonical shared copy of `fields`, storing it on first sight
    pub fn intern(&mut self, fields: Vec<Field>) -> Arc<[Field]> {
        if let Some(layout) = self.layouts.get(fields.as_slice()) {
            return layout.clone();
        }

        let layout: Arc<[Field]> = Arc::from(fields);
        self.layouts.insert(layout.clone());
        layout
    }

    /// Number of distinct layouts seen
    pub fn len(&self) -> usize {
        self.layouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layouts.is_empty()
    }
}
