//! # Plane Texture Slots
//!
//! One persistent single-channel GPU texture per plane. A slot is created once
//! per renderer and re-uploaded on every frame; the backing texture is only
//! reallocated when the incoming plane dimensions differ from the allocated
//! ones.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UploadError {
    #[error("Plane data too short: need {needed} bytes, got {actual}")]
    DataTooShort { needed: usize, actual: usize },
}

/// A reusable `R8Unorm` texture slot for one luma or chroma plane.
pub struct PlaneTexture {
    label: &'static str,
    texture: Option<wgpu::Texture>,
    view: Option<wgpu::TextureView>,
    width: u32,
    height: u32,
}

impl PlaneTexture {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            texture: None,
            view: None,
            width: 0,
            height: 0,
        }
    }

    /// Upload `rows` rows of `stride` bytes into the slot.
    ///
    /// The plane's own stride is the texture's bytes-per-row, so column
    /// padding is uploaded along with the image and cropped later at sample
    /// time. Dimension changes reallocate the texture; identical dimensions
    /// reuse the existing allocation.
    pub fn upload(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        data: &[u8],
        stride: u32,
        rows: u32,
    ) -> Result<(), UploadError> {
        let needed = stride as usize * rows as usize;
        if data.len() < needed {
            return Err(UploadError::DataTooShort {
                needed,
                actual: data.len(),
            });
        }

        if self.texture.is_none() || self.width != stride || self.height != rows {
            let texture = device.create_texture(&wgpu::TextureDescriptor {
                label: Some(self.label),
                size: wgpu::Extent3d {
                    width: stride,
                    height: rows,
                    depth_or_array_layers: 1,
                },
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: wgpu::TextureFormat::R8Unorm,
                usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
                view_formats: &[],
            });
            self.view = Some(texture.create_view(&wgpu::TextureViewDescriptor::default()));
            self.texture = Some(texture);
            self.width = stride;
            self.height = rows;
        }

        if let Some(texture) = &self.texture {
            queue.write_texture(
                wgpu::ImageCopyTexture {
                    texture,
                    mip_level: 0,
                    origin: wgpu::Origin3d::ZERO,
                    aspect: wgpu::TextureAspect::All,
                },
                &data[..needed],
                wgpu::ImageDataLayout {
                    offset: 0,
                    bytes_per_row: Some(stride),
                    rows_per_image: Some(rows),
                },
                wgpu::Extent3d {
                    width: stride,
                    height: rows,
                    depth_or_array_layers: 1,
                },
            );
        }

        Ok(())
    }

    /// View of the current allocation; `None` until the first upload.
    pub fn view(&self) -> Option<&wgpu::TextureView> {
        self.view.as_ref()
    }
}
