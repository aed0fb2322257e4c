//! COSEM interface class definitions
//!
//! Each supported interface class is a static [`ClassDefinition`]: a table
//! of attribute rules, each carrying the encoder that turns a native value
//! into the tagged value the attribute expects. The [`ClassRegistry`]
//! dispatches SetRequest and GetRequest generation by class id.

pub mod convert;
pub mod data;
pub mod push_setup;
pub mod register;
pub mod registry;
pub mod rule;
pub mod single_action_schedule;

pub use data::DATA;
pub use push_setup::{MessageType, RestrictionType, TransportService, PUSH_SETUP};
pub use register::{Unit, REGISTER};
pub use registry::ClassRegistry;
pub use rule::{AccessMode, AttributeRule, ClassDefinition, EncodeFn, MethodInfo};
pub use single_action_schedule::SINGLE_ACTION_SCHEDULE;
