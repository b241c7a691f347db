/// Per-frame header read by the renderer.
/// Must stay in sync with the TypeScript reader of `get_frame_header_ptr`.
///
/// Layout (little-endian, 40 bytes):
/// ```text
/// [0..8)   simulation_time    f64  Julian Date
/// [8..16)  speed_factor       f64  simulated seconds per real second
/// [16..24) scrubber_position  f64  0..resolution
/// [24..28) speed_index        u32
/// [28..32) flags              u32  FLAG_* | layer bits << LAYER_SHIFT
/// [32..36) direction          i32  +1 / -1
/// [36..40) protocol_version   u32
/// ```

use bytemuck::{Pod, Zeroable};

/// Protocol version written into every header.
pub const PROTOCOL_VERSION: u32 = 1;

pub const FLAG_PLAYING: u32 = 1 << 0;
pub const FLAG_LIVE: u32 = 1 << 1;
pub const FLAG_CAMERA_TRANSITIONING: u32 = 1 << 2;
pub const FLAG_HAS_SELECTION: u32 = 1 << 3;
pub const FLAG_HAS_FOCUS: u32 = 1 << 4;
/// Visibility layer bits start here.
pub const LAYER_SHIFT: u32 = 8;

#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct FrameHeader {
    pub simulation_time: f64,
    pub speed_factor: f64,
    pub scrubber_position: f64,
    pub speed_index: u32,
    pub flags: u32,
    pub direction: i32,
    pub protocol_version: u32,
}

impl FrameHeader {
    pub const BYTES: usize = std::mem::size_of::<FrameHeader>();

    pub fn has_flag(&self, flag: u32) -> bool {
        self.flags & flag != 0
    }

    /// Visibility bits as packed by `VisibilityToggles::bits`.
    pub fn layer_bits(&self) -> u32 {
        self.flags >> LAYER_SHIFT
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}
