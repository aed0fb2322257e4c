//! XML rendering of tagged values
//!
//! Every scalar renders as a single self-closing element whose `Value`
//! attribute carries the payload hex. Arrays and structures render with a
//! one-byte `Qty` count and their children indented for the `<Value>`
//! block of a SetRequest.

use crate::hex::{float32_hex, float64_hex, signed_hex, unsigned_hex};
use cosem_core::{CosemError, CosemResult, DataType, Value};

/// Render a tagged value as an XML fragment
///
/// # Errors
///
/// Returns an error when a visible string contains non-ASCII characters,
/// an opaque payload is not valid hex, or a composite holds more than 255
/// elements.
pub fn value_to_xml(value: &Value) -> CosemResult<String> {
    let fragment = match value {
        // Null data is written as a zero octet string, which meters accept
        // for attributes being cleared
        Value::Null => r#"<OctetString Value="00"/>"#.to_string(),
        Value::Boolean(b) => scalar("Boolean", if *b { "01" } else { "00" }),
        Value::BitString(bits) => scalar("BitString", &hex::encode_upper(bits.as_bytes())),
        Value::Integer(v) | Value::DeltaInteger(v) => signed_scalar(value, *v as i64)?,
        Value::Long(v) | Value::DeltaLong(v) => signed_scalar(value, *v as i64)?,
        Value::DoubleLong(v) | Value::DeltaDoubleLong(v) => signed_scalar(value, *v as i64)?,
        Value::Long64(v) => signed_scalar(value, *v)?,
        Value::Unsigned(v) | Value::DeltaUnsigned(v) => unsigned_scalar(value, *v as u64)?,
        Value::LongUnsigned(v) | Value::DeltaLongUnsigned(v) => unsigned_scalar(value, *v as u64)?,
        Value::DoubleLongUnsigned(v) | Value::DeltaDoubleLongUnsigned(v) => {
            unsigned_scalar(value, *v as u64)?
        }
        Value::Long64Unsigned(v) => unsigned_scalar(value, *v)?,
        Value::Bcd(v) | Value::Enum(v) => unsigned_scalar(value, *v as u64)?,
        Value::Float32(v) => scalar("Float32", &float32_hex(*v)),
        Value::Float64(v) => scalar("Float64", &float64_hex(*v)),
        Value::OctetString(bytes) => scalar("OctetString", &hex::encode_upper(bytes)),
        Value::VisibleString(s) => {
            if !s.is_ascii() {
                return Err(CosemError::InvalidData(format!(
                    "visible string contains non-ASCII characters: {s:?}"
                )));
            }
            scalar("VisibleString", &hex::encode_upper(s.as_bytes()))
        }
        Value::Utf8String(s) => scalar("Utf8String", &hex::encode_upper(s.as_bytes())),
        Value::DateTime(dt) => scalar("DateTime", &hex::encode_upper(dt.to_bytes())),
        Value::Date(d) => scalar("Date", &hex::encode_upper(d.to_bytes())),
        Value::Time(t) => scalar("Time", &hex::encode_upper(t.to_bytes())),
        Value::Array(items) => composite("Array", items)?,
        Value::Structure(fields) => composite("Structure", fields)?,
        Value::Opaque { data_type, hex } => {
            let payload = checked_hex(hex)?;
            scalar(data_type.element_name(), &payload)
        }
    };
    Ok(fragment)
}

fn scalar(name: &str, payload: &str) -> String {
    format!(r#"<{name} Value="{payload}"/>"#)
}

/// Payload width in bytes, from the wire size of the value's data type
fn scalar_width(data_type: DataType) -> CosemResult<usize> {
    data_type.fixed_size().ok_or_else(|| {
        CosemError::InvalidData(format!(
            "{} has no fixed payload width",
            data_type.element_name()
        ))
    })
}

fn signed_scalar(value: &Value, v: i64) -> CosemResult<String> {
    let data_type = value.data_type();
    let payload = signed_hex(v, scalar_width(data_type)?)?;
    Ok(scalar(data_type.element_name(), &payload))
}

fn unsigned_scalar(value: &Value, v: u64) -> CosemResult<String> {
    let data_type = value.data_type();
    let payload = unsigned_hex(v, scalar_width(data_type)?)?;
    Ok(scalar(data_type.element_name(), &payload))
}

fn composite(name: &str, children: &[Value]) -> CosemResult<String> {
    if children.len() > 255 {
        return Err(CosemError::OutOfRange(format!(
            "{name} holds {} elements, the one-byte Qty allows at most 255",
            children.len()
        )));
    }
    let qty = unsigned_hex(children.len() as u64, 1)?;
    let rendered = children
        .iter()
        .map(value_to_xml)
        .collect::<CosemResult<Vec<_>>>()?
        .join("\n      ");
    Ok(format!("<{name} Qty=\"{qty}\">\n      {rendered}\n    </{name}>"))
}

/// Validate an opaque payload: hex digits only, whole bytes
fn checked_hex(hex: &str) -> CosemResult<String> {
    if hex.is_empty() || hex.len() % 2 != 0 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(CosemError::InvalidData(format!(
            "opaque payload is not an even-length hex string: {hex:?}"
        )));
    }
    Ok(hex.to_ascii_uppercase())
}
