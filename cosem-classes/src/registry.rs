//! Dispatch of request generation by class id

use crate::data::DATA;
use crate::push_setup::PUSH_SETUP;
use crate::register::REGISTER;
use crate::rule::ClassDefinition;
use crate::single_action_schedule::SINGLE_ACTION_SCHEDULE;
use cosem_core::{CosemError, CosemResult, RawValue};
use std::collections::BTreeMap;

/// Registry of interface classes available for request generation
///
/// An explicit value rather than a global: callers build one, optionally
/// register their own class definitions and hand it to whatever drives
/// the generation.
pub struct ClassRegistry {
    classes: BTreeMap<u16, &'static ClassDefinition>,
}

impl ClassRegistry {
    /// An empty registry
    pub fn new() -> Self {
        Self {
            classes: BTreeMap::new(),
        }
    }

    /// A registry holding the built-in classes: Data (1), Register (3),
    /// Single action schedule (22) and Push setup (40)
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        registry.register(&DATA);
        registry.register(&REGISTER);
        registry.register(&SINGLE_ACTION_SCHEDULE);
        registry.register(&PUSH_SETUP);
        registry
    }

    /// Add a class definition, replacing any previous one with the same id
    pub fn register(&mut self, definition: &'static ClassDefinition) {
        log::debug!(
            "registering class {} ({}) version {}",
            definition.class_id,
            definition.name,
            definition.version
        );
        self.classes.insert(definition.class_id, definition);
    }

    /// Look a class up by id
    pub fn class(&self, class_id: u16) -> CosemResult<&'static ClassDefinition> {
        self.classes.get(&class_id).copied().ok_or_else(|| {
            CosemError::UnsupportedClass(format!(
                "class {class_id} is not registered, supported classes: {:?}",
                self.supported_class_ids()
            ))
        })
    }

    /// Ids of every registered class, ascending
    pub fn supported_class_ids(&self) -> Vec<u16> {
        self.classes.keys().copied().collect()
    }

    /// Build a SetRequest through the class registered under `class_id`
    pub fn set_request(
        &self,
        class_id: u16,
        obis_code: &str,
        attribute_index: u8,
        raw: &RawValue,
        invoke_id: u8,
    ) -> CosemResult<String> {
        self.class(class_id)?
            .set_request(obis_code, attribute_index, raw, invoke_id)
    }

    /// Build a GetRequest through the class registered under `class_id`
    pub fn get_request(
        &self,
        class_id: u16,
        obis_code: &str,
        attribute_index: u8,
        invoke_id: u8,
    ) -> CosemResult<String> {
        self.class(class_id)?
            .get_request(obis_code, attribute_index, invoke_id)
    }
}

impl Default for ClassRegistry {
    fn default() -> Self {
        Self::with_builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_registry_knows_four_classes() {
        let registry = ClassRegistry::with_builtin();
        assert_eq!(registry.supported_class_ids(), vec![1, 3, 22, 40]);
    }

    #[test]
    fn unknown_class_error_lists_supported_ids() {
        let registry = ClassRegistry::with_builtin();
        let err = registry.class(8).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("class 8"));
        assert!(message.contains("[1, 3, 22, 40]"));
    }

    #[test]
    fn dispatch_reaches_the_class_encoder() {
        let registry = ClassRegistry::with_builtin();
        let xml = registry
            .set_request(3, "1-0:1.8.0.255", 2, &RawValue::Int(123456), 1)
            .unwrap();
        assert!(xml.contains("<ClassId Value=\"0003\"/>"));
        assert!(xml.contains("<DoubleLongUnsigned Value=\"0001E240\"/>"));
    }

    #[test]
    fn get_request_dispatch_checks_the_attribute() {
        let registry = ClassRegistry::with_builtin();
        assert!(registry.get_request(1, "0-0:96.1.0.255", 2, 1).is_ok());
        assert!(registry.get_request(1, "0-0:96.1.0.255", 9, 1).is_err());
    }
}
