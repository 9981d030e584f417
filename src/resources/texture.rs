use std::path::Path;

use crate::{error::SceneError, resources::load_binary};

/// Layout of group 1 for the textured programs: one 2D texture and its sampler.
pub fn texture_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        entries: &[
            wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    multisampled: false,
                    view_dimension: wgpu::TextureViewDimension::D2,
                    sample_type: wgpu::TextureSampleType::Float { filterable: true },
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 1,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                count: None,
            },
        ],
        label: Some("texture_bind_group_layout"),
    })
}

/// Layout of group 0 shared by every program: the per-model transform uniform.
pub fn transform_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }],
        label: Some("transform_bind_group_layout"),
    })
}

/// Reads and decodes an image file into RGBA8.
pub async fn load_image(path: &Path) -> Result<image::RgbaImage, SceneError> {
    let data = load_binary(path).await?;
    let img = image::load_from_memory(&data).map_err(|e| SceneError::asset(path, e))?;
    let rgba = img.to_rgba8();
    log::info!(
        "Loaded image {:?} ({}x{})",
        path,
        rgba.width(),
        rgba.height()
    );
    Ok(rgba)
}

/// Loads a cosmetic texture, substituting `fallback` if `primary` is missing
/// or undecodable. Only when both fail is the error returned.
pub async fn load_image_or_fallback(
    primary: &Path,
    fallback: &Path,
) -> Result<image::RgbaImage, SceneError> {
    match load_image(primary).await {
        Ok(img) => Ok(img),
        Err(e) => {
            log::warn!("{e}; using fallback texture {:?}", fallback);
            load_image(fallback).await.map_err(|fallback_err| {
                log::error!("Fallback texture failed too: {fallback_err}");
                fallback_err
            })
        }
    }
}
