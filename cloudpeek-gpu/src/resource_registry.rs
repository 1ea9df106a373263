use crate::resource::{Handle, ResourceType};
use std::any::Any;
use std::collections::HashMap;

/// Registry mapping handles to actual wgpu resources
/// Provides type-safe resource lookup and management
#[derive(Default)]
pub struct ResourceRegistry {
    resources: HashMap<u64, Box<dyn Any>>,
}

impl ResourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of a resource and return its handle.
    pub fn insert<T: ResourceType>(&mut self, resource: T) -> Handle<T> {
        let handle = Handle::next();
        self.resources.insert(handle.id(), Box::new(resource));
        handle
    }

    pub fn get<T: ResourceType>(&self, handle: Handle<T>) -> Option<&T> {
        self.resources
            .get(&handle.id())
            .and_then(|resource| resource.downcast_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct FakeBuffer(u32);
    impl ResourceType for FakeBuffer {}

    #[derive(Debug, PartialEq)]
    struct FakePipeline;
    impl ResourceType for FakePipeline {}

    #[test]
    fn test_insert_and_get() {
        let mut registry = ResourceRegistry::new();
        let a = registry.insert(FakeBuffer(1));
        let b = registry.insert(FakeBuffer(2));
        assert_ne!(a.id(), b.id());
        assert_eq!(registry.get(a), Some(&FakeBuffer(1)));
        assert_eq!(registry.get(b), Some(&FakeBuffer(2)));
    }

    #[test]
    fn test_unknown_handle() {
        let registry = ResourceRegistry::new();
        assert!(registry.get(Handle::<FakeBuffer>::next()).is_none());
    }

    #[test]
    fn test_mixed_resource_types() {
        let mut registry = ResourceRegistry::new();
        let buffer = registry.insert(FakeBuffer(7));
        let pipeline = registry.insert(FakePipeline);
        assert_ne!(buffer.id(), pipeline.id());
        assert_eq!(registry.get(pipeline), Some(&FakePipeline));
        assert_eq!(registry.get(buffer), Some(&FakeBuffer(7)));
    }
}
