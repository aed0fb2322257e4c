//! Class 40 - Push Setup, Blue Book Ed. 16 Part 2, Section 5.4.11
//! (version 2)
//!
//! Holds the list of attribute references to push, the destination and
//! transport, the allowed communication windows and the retry policy.

use crate::convert::{
    expect_date_time, expect_list, expect_record, field, int_in_range, logical_name_value,
    octet_string_value, opt_field, uint_in_range,
};
use crate::rule::{AccessMode, AttributeRule, ClassDefinition, MethodInfo};
use cosem_core::{CosemError, CosemResult, RawValue, Value};

/// Transport services for push, Blue Book Ed. 16 Part 2, Section 5.4.11
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportService {
    Tcp = 0,
    Udp = 1,
    Ftp = 2,
    Smtp = 3,
    Sms = 4,
    Hdlc = 5,
    MBus = 6,
    Zigbee = 7,
    DlmsGateway = 8,
    ReliableCoap = 9,
    UnreliableCoap = 10,
}

impl TransportService {
    pub fn code(self) -> u8 {
        self as u8
    }
}

/// Push message encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageType {
    AxdrEncodedApdu = 0,
    XmlEncodedApdu = 1,
}

impl MessageType {
    pub fn code(self) -> u8 {
        self as u8
    }
}

/// Buffer restriction applied to a pushed object
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestrictionType {
    None = 0,
    ByDate = 1,
    ByEntry = 2,
}

pub static PUSH_SETUP: ClassDefinition = ClassDefinition {
    class_id: 40,
    version: 2,
    name: "Push setup",
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
            name: "push_object_list",
            declared_type: "array push_object_definition",
            access: AccessMode::ReadAndWrite,
            mandatory: true,
            is_static: true,
            encode: push_object_list,
        },
        AttributeRule {
            index: 3,
            name: "send_destination_and_method",
            declared_type: "structure",
            access: AccessMode::ReadAndWrite,
            mandatory: true,
            is_static: true,
            encode: send_destination_and_method,
        },
        AttributeRule {
            index: 4,
            name: "communication_window",
            declared_type: "array window_element",
            access: AccessMode::ReadAndWrite,
            mandatory: true,
            is_static: true,
            encode: communication_window,
        },
        AttributeRule {
            index: 5,
            name: "randomisation_start_interval",
            declared_type: "long-unsigned",
            access: AccessMode::ReadAndWrite,
            mandatory: true,
            is_static: true,
            encode: long_unsigned_seconds,
        },
        AttributeRule {
            index: 6,
            name: "number_of_retries",
            declared_type: "unsigned",
            access: AccessMode::ReadAndWrite,
            mandatory: true,
            is_static: true,
            encode: retry_count,
        },
        AttributeRule {
            index: 7,
            name: "repetition_delay",
            declared_type: "repetition_delay_type",
            access: AccessMode::ReadAndWrite,
            mandatory: true,
            is_static: true,
            encode: repetition_delay,
        },
        AttributeRule {
            index: 8,
            name: "port_reference",
            declared_type: "octet-string",
            access: AccessMode::ReadAndWrite,
            mandatory: true,
            is_static: true,
            encode: port_reference,
        },
        AttributeRule {
            index: 9,
            name: "push_client_SAP",
            declared_type: "integer",
            access: AccessMode::ReadAndWrite,
            mandatory: true,
            is_static: true,
            encode: client_sap,
        },
        AttributeRule {
            index: 10,
            name: "push_protection_parameters",
            declared_type: "array protection_parameters",
            access: AccessMode::ReadAndWrite,
            mandatory: true,
            is_static: true,
            encode: protection_parameters,
        },
        AttributeRule {
            index: 11,
            name: "push_operation_method",
            declared_type: "enum",
            access: AccessMode::ReadAndWrite,
            mandatory: true,
            is_static: true,
            encode: operation_method,
        },
        AttributeRule {
            index: 12,
            name: "confirmation_parameters",
            declared_type: "structure",
            access: AccessMode::ReadAndWrite,
            mandatory: true,
            is_static: true,
            encode: confirmation_parameters,
        },
        AttributeRule {
            index: 13,
            name: "last_confirmation_date_time",
            declared_type: "date-time",
            access: AccessMode::ReadOnly,
            mandatory: false,
            is_static: false,
            encode: last_confirmation,
        },
    ],
    methods: &[
        MethodInfo {
            index: 1,
            name: "push",
            mandatory: true,
        },
        MethodInfo {
            index: 2,
            name: "reset",
            mandatory: false,
        },
    ],
};

/// push_object_definition ::= structure { class_id, logical_name,
/// attribute_index, data_index, restriction, columns }
fn push_object_list(raw: &RawValue) -> CosemResult<Value> {
    let objects = expect_list(raw, "push_object_list")?;
    let elements = objects
        .iter()
        .map(push_object_definition)
        .collect::<CosemResult<Vec<_>>>()?;
    Ok(Value::Array(elements))
}

fn push_object_definition(raw: &RawValue) -> CosemResult<Value> {
    let fields = expect_record(raw, "push_object_definition")?;
    let class_id = uint_in_range(
        field(fields, "class_id", "push_object_definition")?,
        "class_id",
        65535,
    )?;
    let logical_name = octet_string_value(
        field(fields, "logical_name", "push_object_definition")?,
        "logical_name",
    )?;
    let attribute_index = int_in_range(
        field(fields, "attribute_index", "push_object_definition")?,
        "attribute_index",
        i8::MIN as i64,
        i8::MAX as i64,
    )?;
    let data_index = uint_in_range(
        field(fields, "data_index", "push_object_definition")?,
        "data_index",
        65535,
    )?;
    let restriction = restriction_element(
        field(fields, "restriction", "push_object_definition")?,
    )?;
    let columns = match opt_field(fields, "columns") {
        Some(value) => capture_columns(value)?,
        None => Value::Array(Vec::new()),
    };
    Ok(Value::Structure(vec![
        Value::LongUnsigned(class_id as u16),
        logical_name,
        Value::Integer(attribute_index as i8),
        Value::LongUnsigned(data_index as u16),
        restriction,
        columns,
    ]))
}

/// restriction_element ::= structure { restriction_type: enum,
/// restriction_value: CHOICE }
///
/// The value is null-data for no restriction, a from/to date pair or a
/// from/to entry pair.
fn restriction_element(raw: &RawValue) -> CosemResult<Value> {
    let fields = expect_record(raw, "restriction")?;
    let kind = uint_in_range(
        field(fields, "restriction_type", "restriction")?,
        "restriction_type",
        RestrictionType::ByEntry as u64,
    )?;
    let value = opt_field(fields, "restriction_value");
    let payload = match (kind, value) {
        (0, _) | (_, None) | (_, Some(RawValue::Null)) => Value::Null,
        (1, Some(inner)) => {
            let bounds = expect_record(inner, "restriction_value")?;
            Value::Structure(vec![
                octet_string_value(field(bounds, "from_date", "restriction_value")?, "from_date")?,
                octet_string_value(field(bounds, "to_date", "restriction_value")?, "to_date")?,
            ])
        }
        (2, Some(inner)) => {
            let bounds = expect_record(inner, "restriction_value")?;
            Value::Structure(vec![
                Value::DoubleLongUnsigned(uint_in_range(
                    field(bounds, "from_entry", "restriction_value")?,
                    "from_entry",
                    u32::MAX as u64,
                )? as u32),
                Value::DoubleLongUnsigned(uint_in_range(
                    field(bounds, "to_entry", "restriction_value")?,
                    "to_entry",
                    u32::MAX as u64,
                )? as u32),
            ])
        }
        (other, _) => {
            return Err(CosemError::InvalidData(format!(
                "unknown restriction_type: {other}"
            )));
        }
    };
    Ok(Value::Structure(vec![Value::Enum(kind as u8), payload]))
}

/// capture_object_definition ::= structure { class_id, logical_name,
/// attribute_index, data_index }
fn capture_columns(raw: &RawValue) -> CosemResult<Value> {
    let columns = expect_list(raw, "columns")?;
    let elements = columns
        .iter()
        .map(|column| {
            let fields = expect_record(column, "capture_object_definition")?;
            Ok(Value::Structure(vec![
                Value::LongUnsigned(uint_in_range(
                    field(fields, "class_id", "capture_object_definition")?,
                    "class_id",
                    65535,
                )? as u16),
                octet_string_value(
                    field(fields, "logical_name", "capture_object_definition")?,
                    "logical_name",
                )?,
                Value::Integer(int_in_range(
                    field(fields, "attribute_index", "capture_object_definition")?,
                    "attribute_index",
                    i8::MIN as i64,
                    i8::MAX as i64,
                )? as i8),
                Value::LongUnsigned(uint_in_range(
                    field(fields, "data_index", "capture_object_definition")?,
                    "data_index",
                    65535,
                )? as u16),
            ]))
        })
        .collect::<CosemResult<Vec<_>>>()?;
    Ok(Value::Array(elements))
}

/// send_destination_and_method ::= structure { transport_service: enum,
/// destination: octet-string, message: enum }
fn send_destination_and_method(raw: &RawValue) -> CosemResult<Value> {
    let fields = expect_record(raw, "send_destination_and_method")?;
    let transport = uint_in_range(
        field(fields, "transport_service", "send_destination_and_method")?,
        "transport_service",
        TransportService::UnreliableCoap as u64,
    )?;
    let destination = octet_string_value(
        field(fields, "destination", "send_destination_and_method")?,
        "destination",
    )?;
    let message = uint_in_range(
        field(fields, "message", "send_destination_and_method")?,
        "message",
        MessageType::XmlEncodedApdu as u64,
    )?;
    Ok(Value::Structure(vec![
        Value::Enum(transport as u8),
        destination,
        Value::Enum(message as u8),
    ]))
}

/// window_element ::= structure { start_time: date-time,
/// end_time: date-time }
fn communication_window(raw: &RawValue) -> CosemResult<Value> {
    let windows = expect_list(raw, "communication_window")?;
    let elements = windows
        .iter()
        .map(|window| {
            let fields = expect_record(window, "communication_window entry")?;
            Ok(Value::Structure(vec![
                expect_date_time(
                    field(fields, "start_time", "communication_window entry")?,
                    "start_time",
                )?,
                expect_date_time(
                    field(fields, "end_time", "communication_window entry")?,
                    "end_time",
                )?,
            ]))
        })
        .collect::<CosemResult<Vec<_>>>()?;
    Ok(Value::Array(elements))
}

fn long_unsigned_seconds(raw: &RawValue) -> CosemResult<Value> {
    let value = uint_in_range(raw, "randomisation_start_interval", 65535)?;
    Ok(Value::LongUnsigned(value as u16))
}

fn retry_count(raw: &RawValue) -> CosemResult<Value> {
    let value = uint_in_range(raw, "number_of_retries", 255)?;
    Ok(Value::Unsigned(value as u8))
}

/// Version 0/1 accepted a plain long-unsigned delay; version 2 uses a
/// min/exponent/max structure for exponential backoff. Both input shapes
/// are accepted.
fn repetition_delay(raw: &RawValue) -> CosemResult<Value> {
    match raw {
        RawValue::Int(_) | RawValue::UInt(_) => {
            let value = uint_in_range(raw, "repetition_delay", 65535)?;
            Ok(Value::LongUnsigned(value as u16))
        }
        RawValue::Record(fields) => {
            let min = uint_in_range(field(fields, "min", "repetition_delay")?, "min", 65535)?;
            let exponent = uint_in_range(
                field(fields, "exponent", "repetition_delay")?,
                "exponent",
                65535,
            )?;
            let max = uint_in_range(field(fields, "max", "repetition_delay")?, "max", 65535)?;
            Ok(Value::Structure(vec![
                Value::LongUnsigned(min as u16),
                Value::LongUnsigned(exponent as u16),
                Value::LongUnsigned(max as u16),
            ]))
        }
        other => Err(CosemError::InvalidData(format!(
            "repetition_delay must be a number or a min/exponent/max record, got {other:?}"
        ))),
    }
}

fn port_reference(raw: &RawValue) -> CosemResult<Value> {
    octet_string_value(raw, "port_reference")
}

fn client_sap(raw: &RawValue) -> CosemResult<Value> {
    let value = int_in_range(raw, "push_client_SAP", i8::MIN as i64, i8::MAX as i64)?;
    Ok(Value::Integer(value as i8))
}

/// protection_parameters ::= structure { protected_object: octet-string,
/// protection_type: enum, protection_options: array }
fn protection_parameters(raw: &RawValue) -> CosemResult<Value> {
    let params = match raw {
        RawValue::Null => return Ok(Value::Array(Vec::new())),
        other => expect_list(other, "push_protection_parameters")?,
    };
    let elements = params
        .iter()
        .map(|param| {
            let fields = expect_record(param, "protection_parameters")?;
            let protected_object = octet_string_value(
                field(fields, "protected_object", "protection_parameters")?,
                "protected_object",
            )?;
            let protection_type = uint_in_range(
                field(fields, "protection_type", "protection_parameters")?,
                "protection_type",
                255,
            )?;
            let options = match opt_field(fields, "protection_options") {
                Some(RawValue::List(items)) => {
                    Value::Array(items.iter().map(Value::infer).collect())
                }
                _ => Value::Array(Vec::new()),
            };
            Ok(Value::Structure(vec![
                protected_object,
                Value::Enum(protection_type as u8),
                options,
            ]))
        })
        .collect::<CosemResult<Vec<_>>>()?;
    Ok(Value::Array(elements))
}

fn operation_method(raw: &RawValue) -> CosemResult<Value> {
    let value = uint_in_range(raw, "push_operation_method", 255)?;
    Ok(Value::Enum(value as u8))
}

/// confirmation_parameters ::= structure { start_date: date-time,
/// interval: long-unsigned }
fn confirmation_parameters(raw: &RawValue) -> CosemResult<Value> {
    let fields = expect_record(raw, "confirmation_parameters")?;
    let start_date = expect_date_time(
        field(fields, "start_date", "confirmation_parameters")?,
        "start_date",
    )?;
    let interval = uint_in_range(
        field(fields, "interval", "confirmation_parameters")?,
        "interval",
        65535,
    )?;
    Ok(Value::Structure(vec![
        start_date,
        Value::LongUnsigned(interval as u16),
    ]))
}

fn last_confirmation(raw: &RawValue) -> CosemResult<Value> {
    expect_date_time(raw, "last_confirmation_date_time")
}
