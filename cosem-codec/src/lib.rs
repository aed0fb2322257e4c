//! Encoding of DLMS/COSEM values to hex payloads and XML requests
//!
//! The [`hex`] module produces fixed-width big-endian uppercase hex for
//! scalar payloads. The [`value_xml`] module renders a tagged value as an
//! XML element tree, and [`request`] assembles complete SetRequest and
//! GetRequest documents around an attribute descriptor.

pub mod hex;
pub mod request;
pub mod value_xml;

pub use request::{build_get_request, build_set_request, DEFAULT_INVOKE_ID};
pub use value_xml::value_to_xml;
