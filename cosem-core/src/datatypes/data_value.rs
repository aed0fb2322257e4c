//! The DLMS tagged value model
//!
//! [`DataType`] enumerates the Blue Book type tags; [`Value`] is the tagged
//! value itself, one variant per tag so that an illegal tag/payload
//! combination cannot be constructed.

use crate::datatypes::bit_string::BitString;
use crate::datatypes::cosem_date::CosemDate;
use crate::datatypes::cosem_date_time::CosemDateTime;
use crate::datatypes::cosem_time::CosemTime;
use crate::datatypes::raw_value::RawValue;
use crate::error::{CosemError, CosemResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// DLMS data type tags (Blue Book Ed. 16 Part 2, Table 3)
///
/// The delta variants are used by profile data; on the XML surface they
/// share the element name of their base type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataType {
    NullData = 0,
    Array = 1,
    Structure = 2,
    Boolean = 3,
    BitString = 4,
    DoubleLong = 5,
    DoubleLongUnsigned = 6,
    OctetString = 9,
    VisibleString = 10,
    Utf8String = 12,
    Bcd = 13,
    Integer = 15,
    Long = 16,
    Unsigned = 17,
    LongUnsigned = 18,
    CompactArray = 19,
    Long64 = 20,
    Long64Unsigned = 21,
    Enum = 22,
    Float32 = 23,
    Float64 = 24,
    DateTime = 25,
    Date = 26,
    Time = 27,
    DeltaInteger = 28,
    DeltaLong = 29,
    DeltaDoubleLong = 30,
    DeltaUnsigned = 31,
    DeltaLongUnsigned = 32,
    DeltaDoubleLongUnsigned = 33,
}

impl DataType {
    /// Numeric tag value
    pub fn tag(self) -> u8 {
        self as u8
    }

    /// Look a type up by its numeric tag
    pub fn from_tag(tag: u8) -> CosemResult<Self> {
        use DataType::*;
        match tag {
            0 => Ok(NullData),
            1 => Ok(Array),
            2 => Ok(Structure),
            3 => Ok(Boolean),
            4 => Ok(BitString),
            5 => Ok(DoubleLong),
            6 => Ok(DoubleLongUnsigned),
            9 => Ok(OctetString),
            10 => Ok(VisibleString),
            12 => Ok(Utf8String),
            13 => Ok(Bcd),
            15 => Ok(Integer),
            16 => Ok(Long),
            17 => Ok(Unsigned),
            18 => Ok(LongUnsigned),
            19 => Ok(CompactArray),
            20 => Ok(Long64),
            21 => Ok(Long64Unsigned),
            22 => Ok(Enum),
            23 => Ok(Float32),
            24 => Ok(Float64),
            25 => Ok(DateTime),
            26 => Ok(Date),
            27 => Ok(Time),
            28 => Ok(DeltaInteger),
            29 => Ok(DeltaLong),
            30 => Ok(DeltaDoubleLong),
            31 => Ok(DeltaUnsigned),
            32 => Ok(DeltaLongUnsigned),
            33 => Ok(DeltaDoubleLongUnsigned),
            other => Err(CosemError::InvalidData(format!(
                "unknown DLMS type tag: {other}"
            ))),
        }
    }

    /// XML element name for this type
    pub fn element_name(self) -> &'static str {
        use DataType::*;
        match self {
            NullData => "NullData",
            Array => "Array",
            Structure => "Structure",
            Boolean => "Boolean",
            BitString => "BitString",
            DoubleLong | DeltaDoubleLong => "DoubleLong",
            DoubleLongUnsigned | DeltaDoubleLongUnsigned => "DoubleLongUnsigned",
            OctetString => "OctetString",
            VisibleString => "VisibleString",
            Utf8String => "Utf8String",
            Bcd => "Bcd",
            Integer | DeltaInteger => "Integer",
            Long | DeltaLong => "Long",
            Unsigned | DeltaUnsigned => "Unsigned",
            LongUnsigned | DeltaLongUnsigned => "LongUnsigned",
            CompactArray => "CompactArray",
            Long64 => "Long64",
            Long64Unsigned => "Long64Unsigned",
            Enum => "Enum",
            Float32 => "Float32",
            Float64 => "Float64",
            DateTime => "DateTime",
            Date => "Date",
            Time => "Time",
        }
    }

    /// Fixed encoded width in bytes, or `None` for variable-length types
    pub fn fixed_size(self) -> Option<usize> {
        use DataType::*;
        match self {
            NullData => Some(0),
            Boolean | Bcd | Enum | Unsigned | Integer | DeltaInteger | DeltaUnsigned => Some(1),
            Long | LongUnsigned | DeltaLong | DeltaLongUnsigned => Some(2),
            DoubleLong | DoubleLongUnsigned | Float32 | DeltaDoubleLong
            | DeltaDoubleLongUnsigned => Some(4),
            Long64 | Long64Unsigned | Float64 => Some(8),
            DateTime => Some(12),
            Date => Some(5),
            Time => Some(4),
            Array | Structure | CompactArray | BitString | OctetString | VisibleString
            | Utf8String => None,
        }
    }
}

/// A DLMS tagged value
///
/// Payload shape is fixed by the variant. `Opaque` carries a
/// producer-supplied precomputed hex payload (for example a 6-byte OBIS
/// logical name) together with the type it should be emitted as.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Null,
    Boolean(bool),
    BitString(BitString),
    Integer(i8),
    Long(i16),
    DoubleLong(i32),
    Long64(i64),
    Unsigned(u8),
    LongUnsigned(u16),
    DoubleLongUnsigned(u32),
    Long64Unsigned(u64),
    Bcd(u8),
    Enum(u8),
    Float32(f32),
    Float64(f64),
    OctetString(Vec<u8>),
    VisibleString(String),
    Utf8String(String),
    DateTime(CosemDateTime),
    Date(CosemDate),
    Time(CosemTime),
    Array(Vec<Value>),
    Structure(Vec<Value>),
    DeltaInteger(i8),
    DeltaLong(i16),
    DeltaDoubleLong(i32),
    DeltaUnsigned(u8),
    DeltaLongUnsigned(u16),
    DeltaDoubleLongUnsigned(u32),
    Opaque { data_type: DataType, hex: String },
}

impl Value {
    /// The type tag of this value
    pub fn data_type(&self) -> DataType {
        match self {
            Value::Null => DataType::NullData,
            Value::Boolean(_) => DataType::Boolean,
            Value::BitString(_) => DataType::BitString,
            Value::Integer(_) => DataType::Integer,
            Value::Long(_) => DataType::Long,
            Value::DoubleLong(_) => DataType::DoubleLong,
            Value::Long64(_) => DataType::Long64,
            Value::Unsigned(_) => DataType::Unsigned,
            Value::LongUnsigned(_) => DataType::LongUnsigned,
            Value::DoubleLongUnsigned(_) => DataType::DoubleLongUnsigned,
            Value::Long64Unsigned(_) => DataType::Long64Unsigned,
            Value::Bcd(_) => DataType::Bcd,
            Value::Enum(_) => DataType::Enum,
            Value::Float32(_) => DataType::Float32,
            Value::Float64(_) => DataType::Float64,
            Value::OctetString(_) => DataType::OctetString,
            Value::VisibleString(_) => DataType::VisibleString,
            Value::Utf8String(_) => DataType::Utf8String,
            Value::DateTime(_) => DataType::DateTime,
            Value::Date(_) => DataType::Date,
            Value::Time(_) => DataType::Time,
            Value::Array(_) => DataType::Array,
            Value::Structure(_) => DataType::Structure,
            Value::DeltaInteger(_) => DataType::DeltaInteger,
            Value::DeltaLong(_) => DataType::DeltaLong,
            Value::DeltaDoubleLong(_) => DataType::DeltaDoubleLong,
            Value::DeltaUnsigned(_) => DataType::DeltaUnsigned,
            Value::DeltaLongUnsigned(_) => DataType::DeltaLongUnsigned,
            Value::DeltaDoubleLongUnsigned(_) => DataType::DeltaDoubleLongUnsigned,
            Value::Opaque { data_type, .. } => *data_type,
        }
    }

    /// Infer the narrowest DLMS type for a native value
    ///
    /// Deterministic precedence per the generic codec: unsigned widths are
    /// tried before signed for non-negative integers, and whole-number
    /// floats take the same integer path; non-integral numbers
    /// become 64-bit floats; even-length hex text becomes an octet string
    /// (decoded, so the hex round-trips verbatim); printable ASCII becomes
    /// a visible string; lists and records recurse in caller order.
    /// Inference is advisory: any variant can also be constructed directly
    /// when the protocol context dictates a type.
    pub fn infer(raw: &RawValue) -> Value {
        match raw {
            RawValue::Null => Value::Null,
            RawValue::Bool(b) => Value::Boolean(*b),
            RawValue::Int(n) => Self::infer_integer(*n),
            RawValue::UInt(u) => Self::infer_unsigned(*u),
            RawValue::Float(f) => Self::infer_float(*f),
            RawValue::Text(s) => Self::infer_text(s),
            RawValue::DateTime(dt) => Value::DateTime(CosemDateTime::from_naive(*dt)),
            RawValue::List(items) => Value::Array(items.iter().map(Value::infer).collect()),
            RawValue::Record(fields) => {
                Value::Structure(fields.iter().map(|(_, v)| Value::infer(v)).collect())
            }
        }
    }

    /// A float carrying a whole number is an integer that happened to
    /// arrive with a decimal point; it goes through integer inference.
    /// NaN, infinities and values outside 64-bit integer range stay
    /// 64-bit floats.
    fn infer_float(f: f64) -> Value {
        if f.fract() == 0.0 {
            if (0.0..=u64::MAX as f64).contains(&f) {
                return Self::infer_unsigned(f as u64);
            }
            if (i64::MIN as f64..0.0).contains(&f) {
                return Self::infer_integer(f as i64);
            }
        }
        Value::Float64(f)
    }

    fn infer_integer(n: i64) -> Value {
        if n >= 0 {
            Self::infer_unsigned(n as u64)
        } else if n >= i8::MIN as i64 {
            Value::Integer(n as i8)
        } else if n >= i16::MIN as i64 {
            Value::Long(n as i16)
        } else if n >= i32::MIN as i64 {
            Value::DoubleLong(n as i32)
        } else {
            Value::Long64(n)
        }
    }

    fn infer_unsigned(u: u64) -> Value {
        if u <= u8::MAX as u64 {
            Value::Unsigned(u as u8)
        } else if u <= u16::MAX as u64 {
            Value::LongUnsigned(u as u16)
        } else if u <= u32::MAX as u64 {
            Value::DoubleLongUnsigned(u as u32)
        } else {
            Value::Long64Unsigned(u)
        }
    }

    fn infer_text(s: &str) -> Value {
        if looks_like_hex(s) {
            if let Ok(bytes) = hex::decode(s) {
                return Value::OctetString(bytes);
            }
        }
        if s.chars().all(|c| (' '..='~').contains(&c)) {
            Value::VisibleString(s.to_string())
        } else {
            Value::Utf8String(s.to_string())
        }
    }

}

/// Even-length, hex digits only; the empty string qualifies and becomes
/// an empty octet string
fn looks_like_hex(s: &str) -> bool {
    s.len() % 2 == 0 && s.chars().all(|c| c.is_ascii_hexdigit())
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null-data"),
            Value::Boolean(b) => write!(f, "boolean: {b}"),
            Value::BitString(bs) => write!(f, "bit-string: {bs}"),
            Value::Integer(v) => write!(f, "integer: {v}"),
            Value::Long(v) => write!(f, "long: {v}"),
            Value::DoubleLong(v) => write!(f, "double-long: {v}"),
            Value::Long64(v) => write!(f, "long64: {v}"),
            Value::Unsigned(v) => write!(f, "unsigned: {v}"),
            Value::LongUnsigned(v) => write!(f, "long-unsigned: {v}"),
            Value::DoubleLongUnsigned(v) => write!(f, "double-long-unsigned: {v}"),
            Value::Long64Unsigned(v) => write!(f, "long64-unsigned: {v}"),
            Value::Bcd(v) => write!(f, "bcd: {v}"),
            Value::Enum(v) => write!(f, "enum: {v}"),
            Value::Float32(v) => write!(f, "float32: {v}"),
            Value::Float64(v) => write!(f, "float64: {v}"),
            Value::OctetString(bytes) => write!(f, "octet-string: {}", hex::encode_upper(bytes)),
            Value::VisibleString(s) => write!(f, "visible-string: {s}"),
            Value::Utf8String(s) => write!(f, "utf8-string: {s}"),
            Value::DateTime(dt) => write!(f, "date-time: {dt}"),
            Value::Date(d) => write!(f, "date: {d}"),
            Value::Time(t) => write!(f, "time: {t}"),
            Value::Array(items) => write!(f, "array[{}]", items.len()),
            Value::Structure(fields) => write!(f, "structure[{}]", fields.len()),
            Value::DeltaInteger(v) => write!(f, "delta-integer: {v}"),
            Value::DeltaLong(v) => write!(f, "delta-long: {v}"),
            Value::DeltaDoubleLong(v) => write!(f, "delta-double-long: {v}"),
            Value::DeltaUnsigned(v) => write!(f, "delta-unsigned: {v}"),
            Value::DeltaLongUnsigned(v) => write!(f, "delta-long-unsigned: {v}"),
            Value::DeltaDoubleLongUnsigned(v) => write!(f, "delta-double-long-unsigned: {v}"),
            Value::Opaque { data_type, hex } => {
                write!(f, "{}: {hex}", data_type.element_name())
            }
        }
    }
}
