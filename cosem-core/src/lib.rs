//! Core types for DLMS/COSEM XML request generation
//!
//! This crate provides the tagged value model, OBIS code handling,
//! attribute descriptors and error handling used throughout the
//! XML request generator.

pub mod error;
pub mod obis_code;
pub mod descriptor;
pub mod datatypes;

pub use error::{CosemError, CosemResult};
pub use obis_code::ObisCode;
pub use descriptor::AttributeDescriptor;
pub use datatypes::{
    BitString, ClockStatus, CosemDate, CosemDateTime, CosemTime, DataType, RawValue, Value,
};
