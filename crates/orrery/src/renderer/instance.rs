use bytemuck::{Pod, Zeroable};
use glam::Mat4;

/// Per-instance transform uploaded for the batched minor-body drawable.
/// Column-major 4x4 matrix: 16 floats = 64 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct InstanceTransform {
    pub matrix: [[f32; 4]; 4],
}

impl InstanceTransform {
    pub const FLOATS: usize = 16;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    pub fn from_matrix(matrix: Mat4) -> Self {
        Self {
            matrix: matrix.to_cols_array_2d(),
        }
    }

    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_cols_array_2d(&self.matrix)
    }
}

impl Default for InstanceTransform {
    fn default() -> Self {
        Self::from_matrix(Mat4::IDENTITY)
    }
}

/// Fixed-length instance buffer with a dirty flag.
/// Writers mark it dirty; the frame loop uploads once and clears the flag.
pub struct InstanceBuffer {
    instances: Vec<InstanceTransform>,
    dirty: bool,
}

impl InstanceBuffer {
    /// Allocate `count` identity instances. The length never changes afterwards.
    pub fn new(count: usize) -> Self {
        Self {
            instances: vec![InstanceTransform::default(); count],
            dirty: true,
        }
    }

    pub fn set(&mut self, index: usize, instance: InstanceTransform) {
        if let Some(slot) = self.instances.get_mut(index) {
            *slot = instance;
        }
    }

    pub fn get(&self, index: usize) -> Option<&InstanceTransform> {
        self.instances.get(index)
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Return the data for upload if dirty, clearing the flag.
    pub fn take_dirty(&mut self) -> Option<&[InstanceTransform]> {
        if self.dirty {
            self.dirty = false;
            Some(&self.instances)
        } else {
            None
        }
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}
