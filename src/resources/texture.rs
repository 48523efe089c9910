use std::io::{BufReader, Cursor};
use std::path::PathBuf;

use crate::data_structures::{model, texture};

pub fn diffuse_normal_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
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
            wgpu::BindGroupLayoutEntry {
                binding: 2,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    multisampled: false,
                    sample_type: wgpu::TextureSampleType::Float { filterable: true },
                    view_dimension: wgpu::TextureViewDimension::D2,
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 3,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                count: None,
            },
        ],
        label: Some("Model texture_bind_group_layout"),
    })
}

/// Directory all asset paths are resolved against. Defaults to `assets/`
/// next to the working directory, overridable with `RIGID_NGIN_ASSETS` for
/// callers that run from somewhere else.
fn asset_root() -> PathBuf {
    std::env::var_os("RIGID_NGIN_ASSETS")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("assets"))
}

pub async fn load_string(file_name: &str) -> anyhow::Result<String> {
    let path = asset_root().join(file_name);
    let txt = tokio::fs::read_to_string(path).await?;
    Ok(txt)
}

pub async fn load_binary(file_name: &str) -> anyhow::Result<Vec<u8>> {
    let path = asset_root().join(file_name);
    let data = tokio::fs::read(path).await?;
    Ok(data)
}

pub async fn load_texture(
    file_name: &str,
    is_normal_map: bool,
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    format: Option<&str>,
) -> anyhow::Result<texture::Texture> {
    let data = load_binary(file_name).await?;
    texture::Texture::from_bytes(device, queue, &data, file_name, format, is_normal_map)
}

pub async fn load_textures(
    file_name: &str,
    queue: &wgpu::Queue,
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
) -> anyhow::Result<(Vec<model::Material>, Vec<tobj::Model>)> {
    let obj_text: String = load_string(file_name).await?;
    let obj_cursor = Cursor::new(obj_text);
    let mut obj_reader = BufReader::new(obj_cursor);

    let (models, obj_materials) = tobj::load_obj_buf_async(
        &mut obj_reader,
        &tobj::LoadOptions {
            triangulate: true,
            single_index: true,
            ..Default::default()
        },
        |p| async move {
            match load_string(&p).await {
                Ok(mat_text) => tobj::load_mtl_buf(&mut BufReader::new(Cursor::new(mat_text))),
                Err(e) => {
                    log::error!("Material file {p} could not be read: {e}");
                    Err(tobj::LoadError::OpenFileFailed)
                }
            }
        },
    )
    .await?;

    // We rather use a default normal map when none is passed instead of changing the pipeline
    let mut materials = Vec::new();
    for m in obj_materials? {
        let diffuse_texture = match &m.diffuse_texture {
            Some(m_diffuse_texture) => {
                load_texture(m_diffuse_texture, false, device, queue, None).await?
            }
            // Untextured demo materials carry a plain colour instead.
            None => texture::Texture::create_default_diffuse(
                m.diffuse.unwrap_or([0.6, 0.6, 0.6]),
                device,
                queue,
            ),
        };
        let normal_texture = match &m.normal_texture {
            Some(m_normal_texture) => {
                load_texture(m_normal_texture, true, device, queue, None).await?
            }
            None => texture::Texture::create_default_normal_map(1, 1, device, queue),
        };
        materials.push(model::Material::new(
            device,
            &m.name,
            diffuse_texture,
            normal_texture,
            layout,
        ));
    }

    // An OBJ without any MTL still needs one material to index into.
    if materials.is_empty() {
        log::warn!("Model {file_name} has no materials, using a default grey one.");
        let diffuse = texture::Texture::create_default_diffuse([0.6, 0.6, 0.6], device, queue);
        let normal = texture::Texture::create_default_normal_map(1, 1, device, queue);
        materials.push(model::Material::new(
            device,
            "default",
            diffuse,
            normal,
            layout,
        ));
    }

    Ok((materials, models))
}
