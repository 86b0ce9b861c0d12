//! # vidrio Player
//!
//! Demo driver for the frame renderer: generates synthetic padded YUV 4:2:0
//! frames and pushes them through `FrameRenderer`, one per redraw. Stands in
//! for the decode side of a playback pipeline, which is out of scope here.

use std::sync::Arc;

use anyhow::Result;
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use vidrio_core::render::{FrameRenderer, RenderError};

// ============================================================================
// Synthetic Frame Source
// ============================================================================

/// Dimensions mimic decoder output: the visible image sits inside a frame
/// padded to 64-byte strides and 16-row alignment.
const VISIBLE_WIDTH: u32 = 600;
const VISIBLE_HEIGHT: u32 = 340;
const PADDED_WIDTH: u32 = 640;
const PADDED_HEIGHT: u32 = 352;

/// Fill value for padding bytes. Bright luma, so an uncropped render would
/// show white bars where the filler rows and stride columns are.
const PADDING_FILL: u8 = 235;

/// One padded 4:2:0 frame with a scrolling gradient in the visible region.
fn synth_frame(tick: u32) -> Vec<u8> {
    let w = PADDED_WIDTH as usize;
    let luma = w * PADDED_HEIGHT as usize;
    let chroma = luma / 4;
    let mut buffer = vec![PADDING_FILL; luma + 2 * chroma];

    for row in 0..VISIBLE_HEIGHT as usize {
        for col in 0..VISIBLE_WIDTH as usize {
            let shade = ((col + tick as usize) % VISIBLE_WIDTH as usize) * 219
                / VISIBLE_WIDTH as usize;
            buffer[row * w + col] = 16 + shade as u8;
        }
    }

    let cw = w / 2;
    for row in 0..(VISIBLE_HEIGHT / 2) as usize {
        for col in 0..(VISIBLE_WIDTH / 2) as usize {
            let u = 64 + (row * 128 / (VISIBLE_HEIGHT / 2) as usize) as u8;
            let v = 64 + (col * 128 / (VISIBLE_WIDTH / 2) as usize) as u8;
            buffer[luma + row * cw + col] = u;
            buffer[luma + chroma + row * cw + col] = v;
        }
    }

    buffer
}

// ============================================================================
// Application
// ============================================================================

#[derive(Default)]
struct PlayerApp {
    window: Option<Arc<Window>>,
    renderer: Option<FrameRenderer>,
    tick: u32,
    frames_rendered: u64,
    frames_dropped: u64,
}

impl PlayerApp {
    fn render_next_frame(&mut self) {
        let Some(renderer) = self.renderer.as_mut() else {
            return;
        };

        self.tick = self.tick.wrapping_add(1);
        let frame = synth_frame(self.tick);

        match renderer.on_frame_cropped(
            &frame,
            PADDED_WIDTH,
            PADDED_HEIGHT,
            VISIBLE_WIDTH,
            VISIBLE_HEIGHT,
        ) {
            Ok(()) => {
                self.frames_rendered += 1;
            }
            Err(RenderError::Surface(
                wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated,
            )) => {
                renderer.reconfigure();
            }
            Err(e) => {
                // Frame dropped; the renderer holds no partial state.
                self.frames_dropped += 1;
                tracing::warn!("frame dropped: {}", e);
            }
        }
    }
}

impl ApplicationHandler for PlayerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attributes = Window::default_attributes()
            .with_title("vidrio")
            .with_inner_size(winit::dpi::PhysicalSize::new(PADDED_WIDTH, PADDED_HEIGHT));

        let window = match event_loop.create_window(attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                tracing::error!("window creation failed: {}", e);
                event_loop.exit();
                return;
            }
        };

        match pollster::block_on(FrameRenderer::new(window.clone())) {
            Ok(renderer) => {
                self.renderer = Some(renderer);
                self.window = Some(window);
            }
            Err(e) => {
                tracing::error!("renderer init failed: {}", e);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                tracing::info!(
                    "shutting down: {} frames rendered, {} dropped",
                    self.frames_rendered,
                    self.frames_dropped
                );
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                if let Some(renderer) = self.renderer.as_mut() {
                    renderer.resize(size.width, size.height);
                }
            }
            WindowEvent::RedrawRequested => {
                self.render_next_frame();
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }
}

// ============================================================================
// Entry Point
// ============================================================================

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("vidrio=info,vidrio_core=info,wgpu=warn")
        .init();

    tracing::info!("vidrio player v{}", vidrio_core::VERSION);

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = PlayerApp::default();
    event_loop.run_app(&mut app)?;

    Ok(())
}
