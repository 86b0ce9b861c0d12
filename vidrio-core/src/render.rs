//! # Frame Renderer
//!
//! Orchestrates one padded YUV 4:2:0 frame onto the window surface: split the
//! buffer into plane views, derive crop bounds, upload the planes into the
//! persistent texture slots, and issue a single draw.
//!
//! Each call is stateless with respect to frame content; only the GPU context,
//! the three texture slots, and the shader persist across calls. The caller
//! serializes frames - one decoded and rendered at a time.

use std::sync::Arc;

use thiserror::Error;

use crate::crop::CropBounds;
use crate::plane::{PlaneError, PlaneSet};
use crate::shader::YuvSurfaceShader;
use crate::texture::{PlaneTexture, UploadError};

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("GPU context unavailable: {0}")]
    ContextUnavailable(String),
    #[error(transparent)]
    Plane(#[from] PlaneError),
    #[error("Texture upload rejected: {0}")]
    Upload(#[from] UploadError),
    #[error("Surface error: {0}")]
    Surface(#[from] wgpu::SurfaceError),
}

/// Presents decoded frames on a window surface.
///
/// Owns the device, queue, surface, shader, and the three plane texture slots
/// for its lifetime; borrows each frame buffer only for the duration of one
/// `on_frame` call.
pub struct FrameRenderer {
    device: wgpu::Device,
    queue: wgpu::Queue,
    surface: wgpu::Surface<'static>,
    surface_config: wgpu::SurfaceConfiguration,

    shader: YuvSurfaceShader,

    y_slot: PlaneTexture,
    u_slot: PlaneTexture,
    v_slot: PlaneTexture,
}

impl FrameRenderer {
    /// Create a renderer for a window.
    ///
    /// Fails with [`RenderError::ContextUnavailable`] when no surface, adapter,
    /// or device can be acquired - fatal, no retry.
    pub async fn new(window: Arc<winit::window::Window>) -> Result<Self, RenderError> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .map_err(|e| RenderError::ContextUnavailable(format!("surface creation failed: {}", e)))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| RenderError::ContextUnavailable("no suitable GPU adapter".into()))?;

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    label: Some("vidrio_device"),
                    memory_hints: Default::default(),
                },
                None,
            )
            .await
            .map_err(|e| RenderError::ContextUnavailable(format!("device request failed: {}", e)))?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);

        let surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &surface_config);

        tracing::info!(
            "Frame renderer ready: {} ({:?})",
            adapter.get_info().name,
            surface_format
        );

        let shader = YuvSurfaceShader::new(&device, surface_format);

        Ok(Self {
            device,
            queue,
            surface,
            surface_config,
            shader,
            y_slot: PlaneTexture::new("y_plane"),
            u_slot: PlaneTexture::new("u_plane"),
            v_slot: PlaneTexture::new("v_plane"),
        })
    }

    /// Render one padded frame.
    ///
    /// The decoder never reports the pre-padding true size downstream, so the
    /// visible region is taken to be the whole padded frame and every crop
    /// bound evaluates to 1.0.
    pub fn on_frame(
        &mut self,
        buffer: &[u8],
        padded_width: u32,
        padded_height: u32,
    ) -> Result<(), RenderError> {
        self.on_frame_cropped(buffer, padded_width, padded_height, padded_width, padded_height)
    }

    /// Render one padded frame, displaying only the visible sub-rectangle.
    ///
    /// A failed frame leaves no partial state behind; the caller decides
    /// whether to skip it or tear the renderer down.
    pub fn on_frame_cropped(
        &mut self,
        buffer: &[u8],
        padded_width: u32,
        padded_height: u32,
        visible_width: u32,
        visible_height: u32,
    ) -> Result<(), RenderError> {
        let planes = PlaneSet::split(buffer, padded_width, padded_height)?;
        let bounds = CropBounds::compute(&planes, visible_width, visible_height);

        tracing::trace!(
            "frame {}x{} visible {}x{} bounds {:?}",
            padded_width,
            padded_height,
            visible_width,
            visible_height,
            bounds
        );

        // The surface tracks the padded dimensions: the true visible size is
        // unknown to the common caller, same limitation as the unity bounds.
        self.resize(padded_width, padded_height);

        self.y_slot
            .upload(&self.device, &self.queue, planes.y.data, planes.y.stride, planes.y.rows)?;
        self.u_slot
            .upload(&self.device, &self.queue, planes.u.data, planes.u.stride, planes.u.rows)?;
        self.v_slot
            .upload(&self.device, &self.queue, planes.v.data, planes.v.stride, planes.v.rows)?;

        if let (Some(y), Some(u), Some(v)) =
            (self.y_slot.view(), self.u_slot.view(), self.v_slot.view())
        {
            self.shader.set_textures(&self.device, y, u, v);
        }
        self.shader
            .update_params(&self.queue, padded_width, padded_height, bounds);

        self.draw()
    }

    /// Reconfigure the surface to new pixel dimensions; no-op when unchanged.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0
            && height > 0
            && (width != self.surface_config.width || height != self.surface_config.height)
        {
            self.surface_config.width = width;
            self.surface_config.height = height;
            self.surface.configure(&self.device, &self.surface_config);
        }
    }

    /// Reapply the current surface configuration after a lost/outdated surface.
    pub fn reconfigure(&self) {
        self.surface.configure(&self.device, &self.surface_config);
    }

    fn draw(&mut self) -> Result<(), RenderError> {
        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame_encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("frame_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            self.shader.draw(&mut render_pass);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}
