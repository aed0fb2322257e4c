//! DLMS/COSEM XML request generator
//!
//! Turns native values into SetRequest and GetRequest XML documents for
//! smart meter provisioning.
//!
//! # Architecture
//!
//! This library is organized as a workspace with multiple crates:
//!
//! - `cosem-core`: OBIS codes, attribute descriptors, the tagged value
//!   model and COSEM date/time types
//! - `cosem-codec`: fixed-width hex encoding, value XML rendering and
//!   request envelope assembly
//! - `cosem-classes`: interface class definitions (Data, Register,
//!   Single action schedule, Push setup) and the class registry
//!
//! # Usage
//!
//! ```
//! use cosem_xmlgen::{ClassRegistry, RawValue};
//!
//! let registry = ClassRegistry::with_builtin();
//! let xml = registry
//!     .set_request(1, "0-0:96.1.0.255", 2, &RawValue::from("WSM123"), 1)
//!     .unwrap();
//! assert!(xml.contains("<VisibleString Value=\"57534D313233\"/>"));
//! ```

// Re-export core types
pub use cosem_core::datatypes::*;
pub use cosem_core::{AttributeDescriptor, CosemError, CosemResult, ObisCode};

// Re-export the codec API
pub mod codec {
    pub use cosem_codec::*;
}
pub use cosem_codec::{build_get_request, build_set_request, value_to_xml, DEFAULT_INVOKE_ID};

// Re-export interface classes
pub mod classes {
    pub use cosem_classes::*;
}
pub use cosem_classes::ClassRegistry;
