//! Class 22 - Single action schedule, Blue Book Ed. 16 Part 2,
//! Section 4.5.7
//!
//! Models periodic execution of a script table entry.

use crate::convert::{
    expect_list, expect_record, expect_text, field, fixed_hex_octets, int_in_range,
    logical_name_value, uint_in_range,
};
use crate::rule::{AccessMode, AttributeRule, ClassDefinition};
use cosem_core::{CosemDate, CosemResult, CosemTime, DataType, ObisCode, RawValue, Value};

pub static SINGLE_ACTION_SCHEDULE: ClassDefinition = ClassDefinition {
    class_id: 22,
    version: 0,
    name: "Single action schedule",
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
            name: "executed_script",
            declared_type: "script",
            access: AccessMode::ReadAndWrite,
            mandatory: true,
            is_static: false,
            encode: executed_script,
        },
        AttributeRule {
            index: 3,
            name: "type",
            declared_type: "enum",
            access: AccessMode::ReadAndWrite,
            mandatory: true,
            is_static: false,
            encode: schedule_type,
        },
        AttributeRule {
            index: 4,
            name: "execution_time",
            declared_type: "array execution_time_date",
            access: AccessMode::ReadAndWrite,
            mandatory: true,
            is_static: false,
            encode: execution_time,
        },
    ],
    methods: &[],
};

/// script ::= structure { script_logical_name: octet-string,
/// script_selector: long-unsigned }
fn executed_script(raw: &RawValue) -> CosemResult<Value> {
    let fields = expect_record(raw, "executed_script")?;
    let name = expect_text(
        field(fields, "script_logical_name", "executed_script")?,
        "script_logical_name",
    )?;
    let obis: ObisCode = name.parse()?;
    let selector = uint_in_range(
        field(fields, "script_selector", "executed_script")?,
        "script_selector",
        65535,
    )?;
    Ok(Value::Structure(vec![
        Value::Opaque {
            data_type: DataType::OctetString,
            hex: obis.to_hex(),
        },
        Value::LongUnsigned(selector as u16),
    ]))
}

/// Execution type 1 to 5: single entry, same times, different times,
/// with or without date wildcards
fn schedule_type(raw: &RawValue) -> CosemResult<Value> {
    let value = int_in_range(raw, "type", 1, 5)?;
    Ok(Value::Enum(value as u8))
}

/// execution_time_date ::= structure { time: octet-string,
/// date: octet-string }
///
/// Time and date are supplied as their 4- and 5-byte wire hex, wildcards
/// included.
fn execution_time(raw: &RawValue) -> CosemResult<Value> {
    let items = expect_list(raw, "execution_time")?;
    let entries = items
        .iter()
        .map(|item| {
            let fields = expect_record(item, "execution_time entry")?;
            let time = fixed_hex_octets(
                field(fields, "time", "execution_time entry")?,
                "time",
                CosemTime::LENGTH,
            )?;
            let date = fixed_hex_octets(
                field(fields, "date", "execution_time entry")?,
                "date",
                CosemDate::LENGTH,
            )?;
            Ok(Value::Structure(vec![time, date]))
        })
        .collect::<CosemResult<Vec<_>>>()?;
    Ok(Value::Array(entries))
}
