//! SetRequest and GetRequest XML assembly
//!
//! Both requests wrap an attribute descriptor (class id, 12-hex instance
//! id, attribute id) in the normal-service envelope. The SetRequest adds
//! the rendered value; the GetRequest carries the descriptor alone.

use crate::hex::unsigned_hex;
use crate::value_xml::value_to_xml;
use cosem_core::{AttributeDescriptor, CosemResult, Value};

/// Invoke id used when the caller does not supply one
pub const DEFAULT_INVOKE_ID: u8 = 1;

/// Build a SetRequest document writing `value` to the described attribute
pub fn build_set_request(
    descriptor: &AttributeDescriptor,
    value: &Value,
    invoke_id: u8,
) -> CosemResult<String> {
    let class_id = unsigned_hex(descriptor.class_id() as u64, 2)?;
    let instance_id = descriptor.logical_name().to_hex();
    let attribute_id = unsigned_hex(descriptor.attribute_index() as u64, 1)?;
    let invoke = unsigned_hex(invoke_id as u64, 1)?;
    let value_xml = value_to_xml(value)?;

    log::debug!(
        "assembling SetRequest for class {} instance {} attribute {}",
        descriptor.class_id(),
        instance_id,
        descriptor.attribute_index()
    );

    Ok(format!(
        "<SetRequest>\n  \
         <SetRequestNormal>\n    \
         <InvokeIdAndPriority Value=\"{invoke}\"/>\n    \
         <AttributeDescriptor>\n      \
         <ClassId Value=\"{class_id}\"/>\n      \
         <InstanceId Value=\"{instance_id}\"/>\n      \
         <AttributeId Value=\"{attribute_id}\"/>\n    \
         </AttributeDescriptor>\n    \
         <Value>\n      \
         {value_xml}\n    \
         </Value>\n  \
         </SetRequestNormal>\n\
         </SetRequest>"
    ))
}

/// Build a GetRequest document reading the described attribute
pub fn build_get_request(descriptor: &AttributeDescriptor, invoke_id: u8) -> CosemResult<String> {
    let class_id = unsigned_hex(descriptor.class_id() as u64, 2)?;
    let instance_id = descriptor.logical_name().to_hex();
    let attribute_id = unsigned_hex(descriptor.attribute_index() as u64, 1)?;
    let invoke = unsigned_hex(invoke_id as u64, 1)?;

    log::debug!(
        "assembling GetRequest for class {} instance {} attribute {}",
        descriptor.class_id(),
        instance_id,
        descriptor.attribute_index()
    );

    Ok(format!(
        "<GetRequest>\n  \
         <GetRequestNormal>\n    \
         <InvokeIdAndPriority Value=\"{invoke}\"/>\n    \
         <AttributeDescriptor>\n      \
         <ClassId Value=\"{class_id}\"/>\n      \
         <InstanceId Value=\"{instance_id}\"/>\n      \
         <AttributeId Value=\"{attribute_id}\"/>\n    \
         </AttributeDescriptor>\n  \
         </GetRequestNormal>\n\
         </GetRequest>"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use cosem_core::RawValue;
    use pretty_assertions::assert_eq;

    fn device_name_descriptor() -> AttributeDescriptor {
        AttributeDescriptor::new(1, "0-0:96.1.0.255", 2).unwrap()
    }

    #[test]
    fn set_request_wraps_descriptor_and_value() {
        let value = Value::infer(&RawValue::from("WSM123"));
        let xml = build_set_request(&device_name_descriptor(), &value, DEFAULT_INVOKE_ID).unwrap();
        let expected = "<SetRequest>\n\
                        \x20\x20<SetRequestNormal>\n\
                        \x20\x20\x20\x20<InvokeIdAndPriority Value=\"01\"/>\n\
                        \x20\x20\x20\x20<AttributeDescriptor>\n\
                        \x20\x20\x20\x20\x20\x20<ClassId Value=\"0001\"/>\n\
                        \x20\x20\x20\x20\x20\x20<InstanceId Value=\"0000600100FF\"/>\n\
                        \x20\x20\x20\x20\x20\x20<AttributeId Value=\"02\"/>\n\
                        \x20\x20\x20\x20</AttributeDescriptor>\n\
                        \x20\x20\x20\x20<Value>\n\
                        \x20\x20\x20\x20\x20\x20<VisibleString Value=\"57534D313233\"/>\n\
                        \x20\x20\x20\x20</Value>\n\
                        \x20\x20</SetRequestNormal>\n\
                        </SetRequest>";
        assert_eq!(xml, expected);
    }

    #[test]
    fn get_request_has_no_value_block() {
        let xml = build_get_request(&device_name_descriptor(), DEFAULT_INVOKE_ID).unwrap();
        let expected = "<GetRequest>\n\
                        \x20\x20<GetRequestNormal>\n\
                        \x20\x20\x20\x20<InvokeIdAndPriority Value=\"01\"/>\n\
                        \x20\x20\x20\x20<AttributeDescriptor>\n\
                        \x20\x20\x20\x20\x20\x20<ClassId Value=\"0001\"/>\n\
                        \x20\x20\x20\x20\x20\x20<InstanceId Value=\"0000600100FF\"/>\n\
                        \x20\x20\x20\x20\x20\x20<AttributeId Value=\"02\"/>\n\
                        \x20\x20\x20\x20</AttributeDescriptor>\n\
                        \x20\x20</GetRequestNormal>\n\
                        </GetRequest>";
        assert_eq!(xml, expected);
    }

    #[test]
    fn composite_value_nests_under_value_block() {
        let value = Value::infer(&RawValue::List(vec![
            RawValue::Int(1),
            RawValue::from("AB"),
        ]));
        let xml = build_set_request(&device_name_descriptor(), &value, 5).unwrap();
        assert!(xml.contains("<InvokeIdAndPriority Value=\"05\"/>"));
        assert!(xml.contains(
            "    <Value>\n      <Array Qty=\"02\">\n      <Unsigned Value=\"01\"/>\n      \
             <OctetString Value=\"AB\"/>\n    </Array>\n    </Value>"
        ));
    }
}
