//! High-level builder APIs for creating GPU resources
//!
//! These builders provide a simpler, more ergonomic API compared to
//! directly using wgpu descriptors.

use crate::resource::Handle;
use crate::resource_registry::ResourceRegistry;

/// Buffer usage flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferUsage {
    /// Uniform buffer, writable from the queue every frame
    Uniform,
    /// Storage buffer read by shaders
    Storage,
}

impl BufferUsage {
    fn to_wgpu(self) -> wgpu::BufferUsages {
        match self {
            BufferUsage::Uniform => wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            BufferUsage::Storage => wgpu::BufferUsages::STORAGE,
        }
    }
}

/// Builder for creating GPU buffers
pub struct BufferBuilder<'a> {
    device: &'a wgpu::Device,
    label: Option<String>,
    size: Option<u64>,
    data: Option<&'a [u8]>,
    usage: BufferUsage,
}

impl<'a> BufferBuilder<'a> {
    pub(crate) fn new(device: &'a wgpu::Device, usage: BufferUsage) -> Self {
        Self {
            device,
            label: None,
            size: None,
            data: None,
            usage,
        }
    }

    /// Set the buffer label
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set buffer size (for empty buffers)
    pub fn size(mut self, size: u64) -> Self {
        self.size = Some(size);
        self
    }

    /// Set buffer data from a slice of Pod types
    pub fn with_pod_data<T: bytemuck::Pod>(mut self, data: &'a [T]) -> Self {
        self.data = Some(bytemuck::cast_slice(data));
        self
    }

    /// Build the buffer and register it in the registry
    pub fn build(
        self,
        registry: &mut ResourceRegistry,
    ) -> Result<Handle<wgpu::Buffer>, BufferBuildError> {
        use wgpu::util::DeviceExt;

        let buffer = match (self.data, self.size) {
            (Some([]), _) => return Err(BufferBuildError::EmptyData),
            (Some(data), _) => self.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: self.label.as_deref(),
                contents: data,
                usage: self.usage.to_wgpu(),
            }),
            (None, Some(size)) => self.device.create_buffer(&wgpu::BufferDescriptor {
                label: self.label.as_deref(),
                size,
                usage: self.usage.to_wgpu(),
                mapped_at_creation: false,
            }),
            (None, None) => return Err(BufferBuildError::MissingSizeOrData),
        };

        Ok(registry.insert(buffer))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BufferBuildError {
    #[error("Buffer must have either size or data")]
    MissingSizeOrData,
    #[error("Buffer data is empty")]
    EmptyData,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_usage_conversion() {
        assert!(BufferUsage::Uniform.to_wgpu().contains(wgpu::BufferUsages::UNIFORM));
        assert!(BufferUsage::Uniform.to_wgpu().contains(wgpu::BufferUsages::COPY_DST));
        assert_eq!(BufferUsage::Storage.to_wgpu(), wgpu::BufferUsages::STORAGE);
    }
}
