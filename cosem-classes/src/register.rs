//! Class 3 - Register, Blue Book Ed. 16 Part 2, Section 4.3.2
//!
//! A process or status value with its scaler and unit. The value
//! attribute uses a measurement-oriented policy that differs from generic
//! inference: non-integral numbers become 32-bit floats and strings of
//! only `0`/`1` become bit strings for status registers.

use crate::convert::{expect_record, field, int_in_range, logical_name_value, uint_in_range};
use crate::rule::{AccessMode, AttributeRule, ClassDefinition, MethodInfo};
use cosem_core::{BitString, CosemError, CosemResult, RawValue, Value};

/// Unit codes from Blue Book Ed. 16 Part 2, Table 5 (subset used by
/// water metering)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    Undefined = 0,
    Year = 1,
    Month = 2,
    Week = 3,
    Day = 4,
    Hour = 5,
    Minute = 6,
    Second = 7,
    DegreeCelsius = 9,
    CubicMetre = 14,
    CubicMetrePerHour = 15,
    Litre = 25,
    LitrePerHour = 26,
    Watt = 27,
    WattHour = 30,
    Ampere = 33,
    Volt = 35,
    Pascal = 37,
    Bar = 40,
    Kelvin = 41,
    Percentage = 44,
    Count = 255,
}

impl Unit {
    pub fn code(self) -> u8 {
        self as u8
    }
}

pub static REGISTER: ClassDefinition = ClassDefinition {
    class_id: 3,
    version: 0,
    name: "Register",
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
            encode: register_value,
        },
        AttributeRule {
            index: 3,
            name: "scaler_unit",
            declared_type: "scal_unit_type",
            access: AccessMode::ReadOnly,
            mandatory: true,
            is_static: true,
            encode: scaler_unit,
        },
    ],
    methods: &[MethodInfo {
        index: 1,
        name: "reset",
        mandatory: false,
    }],
};

/// Register value policy
fn register_value(raw: &RawValue) -> CosemResult<Value> {
    match raw {
        RawValue::Null => Ok(Value::Null),
        RawValue::Int(_) | RawValue::UInt(_) => Ok(Value::infer(raw)),
        RawValue::Float(f) => match Value::infer(raw) {
            Value::Float64(_) => Ok(Value::Float32(*f as f32)),
            integral => Ok(integral),
        },
        RawValue::Text(s) if !s.is_empty() && s.chars().all(|c| c == '0' || c == '1') => {
            Ok(Value::BitString(BitString::from_binary_str(s)?))
        }
        RawValue::Text(_) => Ok(Value::infer(raw)),
        other => Err(CosemError::InvalidData(format!(
            "register values must be numeric or string, got {other:?}"
        ))),
    }
}

/// scal_unit_type ::= structure { scaler: integer, unit: enum }
fn scaler_unit(raw: &RawValue) -> CosemResult<Value> {
    let fields = expect_record(raw, "scaler_unit")?;
    let scaler = int_in_range(field(fields, "scaler", "scaler_unit")?, "scaler", -128, 127)?;
    let unit = uint_in_range(field(fields, "unit", "scaler_unit")?, "unit", 255)?;
    Ok(Value::Structure(vec![
        Value::Integer(scaler as i8),
        Value::Enum(unit as u8),
    ]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn integers_follow_unsigned_first_inference() {
        assert_eq!(
            REGISTER.encode_attribute(2, &RawValue::Int(123456)).unwrap(),
            Value::DoubleLongUnsigned(123456)
        );
        assert_eq!(
            REGISTER.encode_attribute(2, &RawValue::Int(-40)).unwrap(),
            Value::Integer(-40)
        );
    }

    #[test]
    fn measurements_become_float32() {
        assert_eq!(
            REGISTER.encode_attribute(2, &RawValue::Float(21.5)).unwrap(),
            Value::Float32(21.5)
        );
    }

    #[test]
    fn whole_number_floats_take_the_integer_path() {
        assert_eq!(
            REGISTER.encode_attribute(2, &RawValue::Float(21.0)).unwrap(),
            Value::Unsigned(21)
        );
        assert_eq!(
            REGISTER.encode_attribute(2, &RawValue::Float(-3.0)).unwrap(),
            Value::Integer(-3)
        );
    }

    #[test]
    fn binary_strings_become_bit_strings() {
        let value = REGISTER
            .encode_attribute(2, &RawValue::from("10110010"))
            .unwrap();
        assert_eq!(
            value,
            Value::BitString(BitString::from_binary_str("10110010").unwrap())
        );
    }

    #[test]
    fn hex_strings_stay_octet_strings() {
        // "AB12" contains digits other than 0/1, so the generic hex rule applies
        assert_eq!(
            REGISTER.encode_attribute(2, &RawValue::from("AB12")).unwrap(),
            Value::OctetString(vec![0xAB, 0x12])
        );
    }

    #[test]
    fn composite_register_values_are_rejected() {
        assert!(REGISTER
            .encode_attribute(2, &RawValue::List(vec![RawValue::Int(1)]))
            .is_err());
    }

    #[test]
    fn scaler_unit_is_a_two_field_structure() {
        let raw = RawValue::record([
            ("scaler", RawValue::Int(-3)),
            ("unit", RawValue::Int(Unit::CubicMetre.code() as i64)),
        ]);
        assert_eq!(
            REGISTER.encode_attribute(3, &raw).unwrap(),
            Value::Structure(vec![Value::Integer(-3), Value::Enum(14)])
        );
    }

    #[test]
    fn scaler_out_of_range_is_rejected() {
        let raw = RawValue::record([("scaler", RawValue::Int(-200)), ("unit", RawValue::Int(14))]);
        assert!(REGISTER.encode_attribute(3, &raw).is_err());
    }

    #[test]
    fn water_volume_set_request_round_trip() {
        let xml = REGISTER
            .set_request("1-0:1.8.0.255", 2, &RawValue::Int(123456), 1)
            .unwrap();
        assert!(xml.contains("<ClassId Value=\"0003\"/>"));
        assert!(xml.contains("<InstanceId Value=\"0100010800FF\"/>"));
        assert!(xml.contains("<DoubleLongUnsigned Value=\"0001E240\"/>"));
    }
}
