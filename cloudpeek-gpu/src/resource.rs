use std::marker::PhantomData;
use std::sync::atomic::{AtomicU64, Ordering};

/// Type-safe resource handle
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct Handle<T> {
    id: u64,
    _phantom: PhantomData<fn() -> T>,
}

// Manual impls so handles stay Copy regardless of `T`.
impl<T> Clone for Handle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Handle<T> {}

impl<T> Handle<T> {
    /// Allocate a handle with a fresh, process-unique id.
    pub fn next() -> Self {
        Self {
            id: HANDLE_ID.fetch_add(1, Ordering::Relaxed),
            _phantom: PhantomData,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }
}

/// Marker for wgpu objects the registry can own.
pub trait ResourceType: 'static {}

impl ResourceType for wgpu::Buffer {}
impl ResourceType for wgpu::BindGroup {}
impl ResourceType for wgpu::RenderPipeline {}

static HANDLE_ID: AtomicU64 = AtomicU64::new(1);
