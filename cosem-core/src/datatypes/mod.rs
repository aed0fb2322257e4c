//! Data types used in the DLMS/COSEM tagged value model

pub mod data_value;
pub mod raw_value;
pub mod bit_string;
pub mod cosem_date;
pub mod cosem_time;
pub mod cosem_date_time;

pub use bit_string::BitString;
pub use cosem_date::CosemDate;
pub use cosem_time::CosemTime;
pub use cosem_date_time::{ClockStatus, CosemDateTime};
pub use data_value::{DataType, Value};
pub use raw_value::RawValue;
