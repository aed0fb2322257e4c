use crate::error::{CosemError, CosemResult};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

static DASHED_FORMAT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{1,3})-(\d{1,3}):(\d{1,3})\.(\d{1,3})\.(\d{1,3})\.(\d{1,3})$")
        .expect("hard-coded OBIS pattern")
});

static DOTTED_FORMAT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{1,3})\.(\d{1,3})\.(\d{1,3})\.(\d{1,3})\.(\d{1,3})\.(\d{1,3})$")
        .expect("hard-coded OBIS pattern")
});

const COMPONENT_NAMES: [&str; 6] = ["A", "B", "C", "D", "E", "F"];

/// OBIS (Object Identification System) code identifying a COSEM object
///
/// OBIS codes are 6-byte addresses. Three textual forms are accepted:
/// the standard `"A-B:C.D.E.F"` form, the all-dot `"A.B.C.D.E.F"` form,
/// and the canonical 12-hex-character logical name (e.g. `"0100010801FF"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObisCode {
    bytes: [u8; 6],
}

impl ObisCode {
    /// Create a new OBIS code from its six components
    pub fn new(a: u8, b: u8, c: u8, d: u8, e: u8, f: u8) -> Self {
        Self {
            bytes: [a, b, c, d, e, f],
        }
    }

    /// Parse an OBIS code from the canonical 12-hex-character logical name
    pub fn from_hex(s: &str) -> CosemResult<Self> {
        if s.len() != 12 {
            return Err(CosemError::InvalidFormat(format!(
                "logical name must be 12 hexadecimal characters, got {} in {:?}",
                s.len(),
                s
            )));
        }
        let decoded = hex::decode(s).map_err(|_| {
            CosemError::InvalidFormat(format!("logical name contains non-hex characters: {:?}", s))
        })?;
        let mut bytes = [0u8; 6];
        bytes.copy_from_slice(&decoded);
        Ok(Self { bytes })
    }

    /// Render the canonical 12-character uppercase hex logical name
    pub fn to_hex(&self) -> String {
        hex::encode_upper(self.bytes)
    }

    /// Get the OBIS code as a byte array
    pub fn as_bytes(&self) -> &[u8; 6] {
        &self.bytes
    }

    /// Get the OBIS code as a copied byte array
    pub fn to_bytes(&self) -> [u8; 6] {
        self.bytes
    }

    fn from_captures(caps: &regex::Captures<'_>, source: &str) -> CosemResult<Self> {
        let mut bytes = [0u8; 6];
        for (i, byte) in bytes.iter_mut().enumerate() {
            let part = &caps[i + 1];
            let value: u32 = part.parse().map_err(|_| {
                CosemError::InvalidFormat(format!(
                    "OBIS component {} is not a number: {:?}",
                    COMPONENT_NAMES[i], part
                ))
            })?;
            if value > 255 {
                return Err(CosemError::InvalidFormat(format!(
                    "OBIS component {} out of range in {:?}: {} > 255",
                    COMPONENT_NAMES[i], source, value
                )));
            }
            *byte = value as u8;
        }
        Ok(Self { bytes })
    }
}

impl FromStr for ObisCode {
    type Err = CosemError;

    fn from_str(s: &str) -> CosemResult<Self> {
        if let Some(caps) = DASHED_FORMAT.captures(s) {
            return Self::from_captures(&caps, s);
        }
        if let Some(caps) = DOTTED_FORMAT.captures(s) {
            return Self::from_captures(&caps, s);
        }
        if s.len() == 12 && s.chars().all(|c| c.is_ascii_hexdigit()) {
            return Self::from_hex(s);
        }
        Err(CosemError::InvalidFormat(format!(
            "invalid OBIS code {:?}, expected \"A-B:C.D.E.F\", \"A.B.C.D.E.F\" or 12 hex characters",
            s
        )))
    }
}

impl fmt::Display for ObisCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}:{}.{}.{}.{}",
            self.bytes[0], self.bytes[1], self.bytes[2], self.bytes[3], self.bytes[4], self.bytes[5]
        )
    }
}
