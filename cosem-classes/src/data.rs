//! Class 1 - Data, Blue Book Ed. 16 Part 2, Section 4.3.1
//!
//! Models generic configuration or status data with no scaling. The value
//! attribute accepts any native value through generic type inference.

use crate::convert::logical_name_value;
use crate::rule::{AccessMode, AttributeRule, ClassDefinition};
use cosem_core::{CosemResult, RawValue, Value};

pub static DATA: ClassDefinition = ClassDefinition {
    class_id: 1,
    version: 0,
    name: "Data",
    attributes: &[
        AttributeRule {
            index: 1,
            name: "logical_name",
            declared_type: "octet-string",
            access: AccessMode::ReadOnly,
            mandatory: true,
            is_static: true,
            encode: logical_name_value,
        },
        AttributeRule {
            index: 2,
            name: "value",
            declared_type: "CHOICE",
            access: AccessMode::ReadAndWrite,
            mandatory: true,
            is_static: false,
            encode: infer_value,
        },
    ],
    methods: &[],
};

fn infer_value(raw: &RawValue) -> CosemResult<Value> {
    Ok(Value::infer(raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn value_attribute_uses_generic_inference() {
        assert_eq!(
            DATA.encode_attribute(2, &RawValue::from("WSM123")).unwrap(),
            Value::VisibleString("WSM123".into())
        );
        assert_eq!(
            DATA.encode_attribute(2, &RawValue::Int(300)).unwrap(),
            Value::LongUnsigned(300)
        );
    }

    #[test]
    fn device_id_set_request_is_complete() {
        let xml = DATA
            .set_request("0-0:96.1.0.255", 2, &RawValue::from("WSM123"), 1)
            .unwrap();
        assert!(xml.contains("<ClassId Value=\"0001\"/>"));
        assert!(xml.contains("<InstanceId Value=\"0000600100FF\"/>"));
        assert!(xml.contains("<AttributeId Value=\"02\"/>"));
        assert!(xml.contains("<VisibleString Value=\"57534D313233\"/>"));
    }
}
