//! Shared conversions from native values to attribute payloads

use cosem_core::{
    CosemDateTime, CosemError, CosemResult, DataType, ObisCode, RawValue, Value,
};

/// Expect a record, naming the attribute in the error
pub fn expect_record<'a>(raw: &'a RawValue, what: &str) -> CosemResult<&'a [(String, RawValue)]> {
    match raw {
        RawValue::Record(fields) => Ok(fields),
        other => Err(CosemError::InvalidData(format!(
            "{what} must be a record, got {other:?}"
        ))),
    }
}

/// Expect a list, naming the attribute in the error
pub fn expect_list<'a>(raw: &'a RawValue, what: &str) -> CosemResult<&'a [RawValue]> {
    match raw {
        RawValue::List(items) => Ok(items),
        other => Err(CosemError::InvalidData(format!(
            "{what} must be a list, got {other:?}"
        ))),
    }
}

/// Expect text, naming the attribute in the error
pub fn expect_text<'a>(raw: &'a RawValue, what: &str) -> CosemResult<&'a str> {
    match raw {
        RawValue::Text(s) => Ok(s),
        other => Err(CosemError::InvalidData(format!(
            "{what} must be text, got {other:?}"
        ))),
    }
}

/// A required record field
pub fn field<'a>(
    fields: &'a [(String, RawValue)],
    name: &str,
    what: &str,
) -> CosemResult<&'a RawValue> {
    opt_field(fields, name).ok_or_else(|| {
        CosemError::InvalidData(format!("{what} is missing the {name:?} field"))
    })
}

/// An optional record field
pub fn opt_field<'a>(fields: &'a [(String, RawValue)], name: &str) -> Option<&'a RawValue> {
    fields.iter().find(|(k, _)| k == name).map(|(_, v)| v)
}

/// A signed integer within `[min, max]`
pub fn int_in_range(raw: &RawValue, name: &str, min: i64, max: i64) -> CosemResult<i64> {
    let value = match raw {
        RawValue::Int(n) => *n,
        RawValue::UInt(u) if *u <= i64::MAX as u64 => *u as i64,
        other => {
            return Err(CosemError::InvalidData(format!(
                "{name} must be an integer, got {other:?}"
            )));
        }
    };
    if value < min || value > max {
        return Err(CosemError::OutOfRange(format!(
            "{name} is out of range [{min}, {max}]: {value}"
        )));
    }
    Ok(value)
}

/// An unsigned integer within `[0, max]`
pub fn uint_in_range(raw: &RawValue, name: &str, max: u64) -> CosemResult<u64> {
    let value = match raw {
        RawValue::Int(n) if *n >= 0 => *n as u64,
        RawValue::UInt(u) => *u,
        other => {
            return Err(CosemError::InvalidData(format!(
                "{name} must be a non-negative integer, got {other:?}"
            )));
        }
    };
    if value > max {
        return Err(CosemError::OutOfRange(format!(
            "{name} is out of range [0, {max}]: {value}"
        )));
    }
    Ok(value)
}

/// A date-time attribute value, accepted either as a calendar value or as
/// a precomputed 12-byte hex payload
pub fn expect_date_time(raw: &RawValue, name: &str) -> CosemResult<Value> {
    match raw {
        RawValue::DateTime(dt) => Ok(Value::DateTime(CosemDateTime::from_naive(*dt))),
        RawValue::Text(s) if is_hex(s) && s.len() == CosemDateTime::LENGTH * 2 => {
            Ok(Value::Opaque {
                data_type: DataType::DateTime,
                hex: s.to_ascii_uppercase(),
            })
        }
        other => Err(CosemError::InvalidData(format!(
            "{name} must be a date-time or 24 hex characters, got {other:?}"
        ))),
    }
}

/// An octet string accepted as hex (passed through verbatim) or as plain
/// text (its UTF-8 bytes)
pub fn octet_string_value(raw: &RawValue, name: &str) -> CosemResult<Value> {
    let text = expect_text(raw, name)?;
    if is_hex(text) {
        Ok(Value::Opaque {
            data_type: DataType::OctetString,
            hex: text.to_ascii_uppercase(),
        })
    } else {
        Ok(Value::OctetString(text.as_bytes().to_vec()))
    }
}

/// The logical_name attribute: an OBIS code rendered as a 6-byte octet
/// string
pub fn logical_name_value(raw: &RawValue) -> CosemResult<Value> {
    let text = expect_text(raw, "logical_name")?;
    let obis: ObisCode = text.parse()?;
    Ok(Value::Opaque {
        data_type: DataType::OctetString,
        hex: obis.to_hex(),
    })
}

/// A fixed-length hex payload emitted as an octet string
pub fn fixed_hex_octets(raw: &RawValue, name: &str, bytes: usize) -> CosemResult<Value> {
    let text = expect_text(raw, name)?;
    if !is_hex(text) || text.len() != bytes * 2 {
        return Err(CosemError::InvalidData(format!(
            "{name} must be {} hex characters, got {text:?}",
            bytes * 2
        )));
    }
    Ok(Value::Opaque {
        data_type: DataType::OctetString,
        hex: text.to_ascii_uppercase(),
    })
}

fn is_hex(s: &str) -> bool {
    !s.is_empty() && s.len() % 2 == 0 && s.chars().all(|c| c.is_ascii_hexdigit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logical_name_accepts_dashed_and_hex_forms() {
        let dashed = logical_name_value(&RawValue::from("0-0:96.1.0.255")).unwrap();
        let hex = logical_name_value(&RawValue::from("0000600100ff")).unwrap();
        assert_eq!(dashed, hex);
        match dashed {
            Value::Opaque { hex, .. } => assert_eq!(hex, "0000600100FF"),
            other => panic!("expected opaque octet string, got {other:?}"),
        }
    }

    #[test]
    fn octet_string_passes_hex_through_and_encodes_text() {
        let hex = octet_string_value(&RawValue::from("c0a80164"), "destination").unwrap();
        assert_eq!(
            hex,
            Value::Opaque {
                data_type: DataType::OctetString,
                hex: "C0A80164".into()
            }
        );
        let text = octet_string_value(&RawValue::from("meter:4059"), "destination").unwrap();
        assert_eq!(text, Value::OctetString(b"meter:4059".to_vec()));
    }

    #[test]
    fn range_checks_name_the_field() {
        let err = uint_in_range(&RawValue::Int(70000), "script_selector", 65535).unwrap_err();
        assert!(err.to_string().contains("script_selector"));
        assert!(int_in_range(&RawValue::Int(-200), "scaler", -128, 127).is_err());
    }

    #[test]
    fn date_time_accepts_precomputed_hex() {
        let value =
            expect_date_time(&RawValue::from("07E8010F010E1E2D00FFFFFF"), "start_date").unwrap();
        match value {
            Value::Opaque { data_type, hex } => {
                assert_eq!(data_type, DataType::DateTime);
                assert_eq!(hex.len(), 24);
            }
            other => panic!("expected opaque date-time, got {other:?}"),
        }
        assert!(expect_date_time(&RawValue::from("07E8"), "start_date").is_err());
    }
}
