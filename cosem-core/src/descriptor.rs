use crate::error::{CosemError, CosemResult};
use crate::obis_code::ObisCode;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Addresses one attribute slot of a COSEM object instance
///
/// The triple (class id, logical name, attribute index). Constructed from
/// wide integers so that out-of-range inputs can be reported instead of
/// silently wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AttributeDescriptor {
    class_id: u16,
    logical_name: ObisCode,
    attribute_index: u8,
}

impl AttributeDescriptor {
    /// Build and validate a descriptor
    ///
    /// # Errors
    ///
    /// Returns a descriptor error if the class id exceeds 65535, the
    /// attribute index is outside `[1, 255]`, or the OBIS code cannot be
    /// canonicalized.
    pub fn new(class_id: u32, obis_code: &str, attribute_index: u32) -> CosemResult<Self> {
        if class_id > u16::MAX as u32 {
            return Err(CosemError::InvalidDescriptor(format!(
                "classId out of range [0, 65535]: {class_id}"
            )));
        }
        if attribute_index < 1 || attribute_index > u8::MAX as u32 {
            return Err(CosemError::InvalidDescriptor(format!(
                "attributeIndex out of range [1, 255]: {attribute_index}"
            )));
        }
        let logical_name = ObisCode::from_str(obis_code)
            .map_err(|e| CosemError::InvalidDescriptor(format!("logicalName: {e}")))?;
        Ok(Self {
            class_id: class_id as u16,
            logical_name,
            attribute_index: attribute_index as u8,
        })
    }

    pub fn class_id(&self) -> u16 {
        self.class_id
    }

    pub fn logical_name(&self) -> &ObisCode {
        &self.logical_name
    }

    pub fn attribute_index(&self) -> u8 {
        self.attribute_index
    }
}

impl fmt::Display for AttributeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "class {}, instance {}, attribute {}",
            self.class_id, self.logical_name, self.attribute_index
        )
    }
}
