// Copyright (C) 2023 Intel Corporation
// SPDX-License-Identifier: Apache-2.0

//! Register catalog Result and error types

pub type Result<T> = std::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
/// Errors raised while building catalogs, loading descriptors, or accessing live registers
pub enum Error {
    #[error("Register {register} has size 0, registers must be at least one byte")]
    ZeroSizedRegister { register: String },
    #[error("Field {field} of register {register} has low bit {lsb} above high bit {msb}")]
    FieldBitsReversed {
        register: String,
        field: String,
        lsb: u64,
        msb: u64,
    },
    #[error(
        "Field {field} of register {register} ends at bit {msb}, outside the {width}-bit register"
    )]
    FieldOutOfRange {
        register: String,
        field: String,
        msb: u64,
        width: u64,
    },
    #[error("Register {register} is defined more than once in bank {bank}")]
    DuplicateRegister { bank: String, register: String },
    #[error("Register {register} not found in bank {bank}")]
    RegisterNotFound { bank: String, register: String },
    #[error("Field {field} not found in register {register}")]
    FieldNotFound { register: String, field: String },
    #[error("Register {register} was not enumerated from a register view")]
    NoViewIndex { register: String },
    #[error("Register {register} is {size} bytes wide, values wider than 8 bytes are unsupported")]
    ValueTooWide { register: String, size: u64 },
    #[error("Register view error for index {index}: {message}")]
    View { index: usize, message: String },
    #[error("Invalid access {access}: {message}")]
    InvalidAccess { access: String, message: String },
    #[error("Unsupported descriptor format {extension}")]
    UnsupportedFormat { extension: String },
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}
