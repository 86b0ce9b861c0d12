//! # vidrio Core
//!
//! Padded planar YUV 4:2:0 frame presentation on a wgpu surface.
//!
//! A decoder hands over one buffer per frame, padded with stride columns and
//! filler rows. The renderer splits it into borrowed plane views, uploads the
//! planes into three persistent single-channel textures, and draws a quad whose
//! fragment shader converts to RGB while sampling only the visible region.

// ============================================================================
// Frame Geometry
// ============================================================================
pub mod plane;
pub mod crop;

// ============================================================================
// GPU Collaborators
// ============================================================================
pub mod texture;
pub mod shader;

// ============================================================================
// Orchestration
// ============================================================================
pub mod render;

// ============================================================================
// Version
// ============================================================================
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
