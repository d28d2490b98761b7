use bytemuck::{Pod, Zeroable};

/// Flat-colored rectangle handed to the host renderer.
/// Must match the host protocol: 8 floats = 32 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct RenderInstance {
    /// Left edge in pixels.
    pub x: f32,
    /// Top edge in pixels.
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    /// Opacity; for light overlays this is the cell intensity.
    pub alpha: f32,
}

impl RenderInstance {
    pub const FLOATS: usize = 8;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    pub fn rect(x: f32, y: f32, width: f32, height: f32, rgb: [f32; 3], alpha: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
            r: rgb[0],
            g: rgb[1],
            b: rgb[2],
            alpha,
        }
    }
}

/// Render buffer containing all rect instances for one frame.
pub struct RenderBuffer {
    /// Opaque instances first, then additive overlays from `additive_start`.
    pub instances: Vec<RenderInstance>,
    /// Instances [0..additive_start) draw source-over,
    /// instances [additive_start..] composite additively.
    pub additive_start: u32,
}

impl RenderBuffer {
    pub fn new() -> Self {
        Self::with_capacity(512)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            instances: Vec::with_capacity(capacity),
            additive_start: 0,
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
        self.additive_start = 0;
    }

    pub fn push(&mut self, instance: RenderInstance) {
        self.instances.push(instance);
    }

    /// Mark everything pushed so far as the opaque pass.
    pub fn begin_additive(&mut self) {
        self.additive_start = self.instances.len() as u32;
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    /// Overlay instances only.
    pub fn additive(&self) -> &[RenderInstance] {
        &self.instances[self.additive_start as usize..]
    }

    /// Raw pointer to instance data for host reads.
    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }

    /// Instance data as a flat float slice.
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.instances)
    }
}

impl Default for RenderBuffer {
    fn default() -> Self {
        Self::new()
    }
}
