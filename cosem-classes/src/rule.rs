//! Attribute tables shared by every interface class
//!
//! A class is described by plain data: its id, version and a slice of
//! [`AttributeRule`]s. The encoder of each rule is a plain function
//! pointer so that class definitions can live in statics.

use cosem_codec::{build_get_request, build_set_request};
use cosem_core::{AttributeDescriptor, CosemError, CosemResult, RawValue, Value};

/// Access rights of an attribute, Blue Book Ed. 16 Part 2, Section 4.1.2
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessMode {
    NoAccess,
    ReadOnly,
    WriteOnly,
    ReadAndWrite,
}

/// Turns a native value into the tagged value an attribute expects
pub type EncodeFn = fn(&RawValue) -> CosemResult<Value>;

/// One attribute of an interface class
#[derive(Debug)]
pub struct AttributeRule {
    pub index: u8,
    pub name: &'static str,
    /// Declared type from the Blue Book attribute table, for diagnostics
    pub declared_type: &'static str,
    pub access: AccessMode,
    pub mandatory: bool,
    /// Static attributes hold configuration, dynamic ones process values
    pub is_static: bool,
    pub encode: EncodeFn,
}

/// One method of an interface class
#[derive(Debug)]
pub struct MethodInfo {
    pub index: u8,
    pub name: &'static str,
    pub mandatory: bool,
}

/// A complete interface class description
#[derive(Debug)]
pub struct ClassDefinition {
    pub class_id: u16,
    pub version: u8,
    pub name: &'static str,
    pub attributes: &'static [AttributeRule],
    pub methods: &'static [MethodInfo],
}

impl ClassDefinition {
    /// Look an attribute rule up by its index
    pub fn attribute(&self, index: u8) -> CosemResult<&AttributeRule> {
        self.attributes
            .iter()
            .find(|rule| rule.index == index)
            .ok_or_else(|| {
                CosemError::UnsupportedAttribute(format!(
                    "attribute {index} is not defined for class {} ({})",
                    self.class_id, self.name
                ))
            })
    }

    /// Encode a native value for the given attribute
    pub fn encode_attribute(&self, index: u8, raw: &RawValue) -> CosemResult<Value> {
        let rule = self.attribute(index)?;
        (rule.encode)(raw).map_err(|e| {
            CosemError::InvalidData(format!(
                "attribute {index} ({}) of class {} ({}): {e}",
                rule.name, self.class_id, self.name
            ))
        })
    }

    /// Build a SetRequest writing `raw` to an attribute of this class
    pub fn set_request(
        &self,
        obis_code: &str,
        index: u8,
        raw: &RawValue,
        invoke_id: u8,
    ) -> CosemResult<String> {
        let value = self.encode_attribute(index, raw)?;
        let descriptor = AttributeDescriptor::new(self.class_id as u32, obis_code, index as u32)?;
        build_set_request(&descriptor, &value, invoke_id)
    }

    /// Build a GetRequest reading an attribute of this class
    pub fn get_request(&self, obis_code: &str, index: u8, invoke_id: u8) -> CosemResult<String> {
        self.attribute(index)?;
        let descriptor = AttributeDescriptor::new(self.class_id as u32, obis_code, index as u32)?;
        build_get_request(&descriptor, invoke_id)
    }
}
