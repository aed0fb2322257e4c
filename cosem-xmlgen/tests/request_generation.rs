//! End-to-end request generation through the public facade

use cosem_xmlgen::classes::{MessageType, TransportService};
use cosem_xmlgen::{ClassRegistry, RawValue, DEFAULT_INVOKE_ID};
use pretty_assertions::assert_eq;

#[test]
fn device_id_set_request_is_byte_exact() {
    let registry = ClassRegistry::with_builtin();
    let xml = registry
        .set_request(
            1,
            "0-0:96.1.0.255",
            2,
            &RawValue::from("WSM123"),
            DEFAULT_INVOKE_ID,
        )
        .unwrap();

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
fn register_get_request_is_byte_exact() {
    let registry = ClassRegistry::with_builtin();
    let xml = registry
        .get_request(3, "1-0:1.8.0.255", 2, DEFAULT_INVOKE_ID)
        .unwrap();

    let expected = "<GetRequest>\n\
                    \x20\x20<GetRequestNormal>\n\
                    \x20\x20\x20\x20<InvokeIdAndPriority Value=\"01\"/>\n\
                    \x20\x20\x20\x20<AttributeDescriptor>\n\
                    \x20\x20\x20\x20\x20\x20<ClassId Value=\"0003\"/>\n\
                    \x20\x20\x20\x20\x20\x20<InstanceId Value=\"0100010800FF\"/>\n\
                    \x20\x20\x20\x20\x20\x20<AttributeId Value=\"02\"/>\n\
                    \x20\x20\x20\x20</AttributeDescriptor>\n\
                    \x20\x20</GetRequestNormal>\n\
                    </GetRequest>";
    assert_eq!(xml, expected);
}

#[test]
fn push_setup_provisioning_sequence() {
    let registry = ClassRegistry::with_builtin();
    let obis = "0-0:25.9.0.255";

    let push_objects = RawValue::List(vec![
        RawValue::record([
            ("class_id", RawValue::Int(8)),
            ("logical_name", RawValue::from("0000010000FF")),
            ("attribute_index", RawValue::Int(2)),
            ("data_index", RawValue::Int(0)),
            (
                "restriction",
                RawValue::record([("restriction_type", RawValue::Int(0))]),
            ),
        ]),
        RawValue::record([
            ("class_id", RawValue::Int(3)),
            ("logical_name", RawValue::from("0100010800FF")),
            ("attribute_index", RawValue::Int(2)),
            ("data_index", RawValue::Int(0)),
            (
                "restriction",
                RawValue::record([("restriction_type", RawValue::Int(0))]),
            ),
        ]),
    ]);
    let object_list_xml = registry
        .set_request(40, obis, 2, &push_objects, DEFAULT_INVOKE_ID)
        .unwrap();
    assert!(object_list_xml.contains("<ClassId Value=\"0028\"/>"));
    assert!(object_list_xml.contains("<Array Qty=\"02\">"));
    assert!(object_list_xml.contains("<Structure Qty=\"06\">"));
    assert!(object_list_xml.contains("<OctetString Value=\"0000010000FF\"/>"));

    let destination = RawValue::record([
        (
            "transport_service",
            RawValue::Int(TransportService::Tcp as i64),
        ),
        ("destination", RawValue::from("192.168.1.100:4059")),
        ("message", RawValue::Int(MessageType::AxdrEncodedApdu as i64)),
    ]);
    let destination_xml = registry
        .set_request(40, obis, 3, &destination, DEFAULT_INVOKE_ID)
        .unwrap();
    assert!(destination_xml.contains("<Structure Qty=\"03\">"));
    assert!(destination_xml.contains("<Enum Value=\"00\"/>"));
    // "192.168.1.100:4059" is not hex, so its UTF-8 bytes are used
    assert!(destination_xml.contains("3139322E3136382E312E3130303A34303539"));

    let retries_xml = registry
        .set_request(40, obis, 6, &RawValue::Int(3), DEFAULT_INVOKE_ID)
        .unwrap();
    assert!(retries_xml.contains("<Unsigned Value=\"03\"/>"));
}

#[test]
fn schedule_provisioning_uses_wire_hex_payloads() {
    let registry = ClassRegistry::with_builtin();
    let obis = "0-0:15.0.1.255";

    let script = RawValue::record([
        ("script_logical_name", RawValue::from("0-0:10.0.1.255")),
        ("script_selector", RawValue::Int(1)),
    ]);
    let script_xml = registry
        .set_request(22, obis, 2, &script, DEFAULT_INVOKE_ID)
        .unwrap();
    assert!(script_xml.contains("<ClassId Value=\"0016\"/>"));
    assert!(script_xml.contains("<OctetString Value=\"00000A0001FF\"/>"));
    assert!(script_xml.contains("<LongUnsigned Value=\"0001\"/>"));

    let times = RawValue::List(vec![RawValue::record([
        ("time", RawValue::from("020000FF")),
        ("date", RawValue::from("FFFFFFFFFF")),
    ])]);
    let times_xml = registry
        .set_request(22, obis, 4, &times, DEFAULT_INVOKE_ID)
        .unwrap();
    assert!(times_xml.contains("<Array Qty=\"01\">"));
    assert!(times_xml.contains("<OctetString Value=\"020000FF\"/>"));
    assert!(times_xml.contains("<OctetString Value=\"FFFFFFFFFF\"/>"));
}

#[test]
fn errors_surface_through_the_facade() {
    let registry = ClassRegistry::with_builtin();
    // unsupported class
    assert!(registry
        .get_request(8, "0-0:1.0.0.255", 2, DEFAULT_INVOKE_ID)
        .is_err());
    // malformed OBIS code
    assert!(registry
        .set_request(1, "1-0:300.8.0.255", 2, &RawValue::Int(1), DEFAULT_INVOKE_ID)
        .is_err());
    // value does not fit the attribute
    assert!(registry
        .set_request(40, "0-0:25.9.0.255", 6, &RawValue::Int(1000), DEFAULT_INVOKE_ID)
        .is_err());
}
