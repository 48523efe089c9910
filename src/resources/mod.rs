/**
 * This module contains all logic for loading mesh/textures/etc. from external files.
 */
pub mod mesh;
pub mod texture;

use crate::{
    data_structures::model,
    resources::texture::diffuse_normal_layout,
};

pub use texture::{load_binary, load_string, load_texture};

/// Load an OBJ model (plus its MTL materials) into GPU buffers.
///
/// Materials without a texture map fall back to their plain diffuse colour;
/// meshes that fail tangent generation are skipped with a warning rather than
/// failing the whole model.
pub async fn load_model_obj(
    file_name: &str,
    device: &wgpu::Device,
    queue: &wgpu::Queue,
) -> anyhow::Result<model::Model> {
    let bind_group_layout = diffuse_normal_layout(device);

    let (materials, models) =
        texture::load_textures(file_name, queue, device, &bind_group_layout).await?;
    let meshes = mesh::load_meshes(&models, file_name, device);
    let meshes = meshes
        .into_iter()
        .enumerate()
        .filter_map(|(idx, result)| match result {
            Ok(mesh) => Some(mesh),
            Err(e) => {
                log::warn!(
                    "Mesh at index {} in file {} could not be loaded: {}. Make sure you use the right scale in your .obj export settings.",
                    idx,
                    file_name,
                    e
                );
                None
            }
        })
        .collect();

    let model = model::Model { meshes, materials };
    Ok(model)
}
