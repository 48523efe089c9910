use anyhow::{anyhow, bail};
use wgpu::util::DeviceExt;

use crate::data_structures::model;

/**
 * Obj files don't come with tangents and bitangents so they have to be calculated for
 * normal maps to work correctly.
 */
pub fn load_meshes(
    models: &[tobj::Model],
    file_name: &str,
    device: &wgpu::Device,
) -> Vec<anyhow::Result<model::Mesh>> {
    models
        .iter()
        .map(|m| build_mesh(m, file_name, device))
        .collect()
}

fn build_mesh(
    m: &tobj::Model,
    file_name: &str,
    device: &wgpu::Device,
) -> anyhow::Result<model::Mesh> {
    let mut vertices = (0..m.mesh.positions.len() / 3)
        .map(|i| model::ModelVertex {
            position: [
                m.mesh.positions[i * 3],
                m.mesh.positions[i * 3 + 1],
                m.mesh.positions[i * 3 + 2],
            ],
            tex_coords: [
                m.mesh.texcoords.get(i * 2).map_or(0.0, |f| *f),
                1.0 - m.mesh.texcoords.get(i * 2 + 1).map_or(0.0, |f| *f),
            ],
            normal: [
                m.mesh.normals.get(i * 3).map_or(0.0, |f| *f),
                m.mesh.normals.get(i * 3 + 1).map_or(0.0, |f| *f),
                m.mesh.normals.get(i * 3 + 2).map_or(0.0, |f| *f),
            ],
            // We'll calculate these later
            tangent: [0.0; 3],
            bitangent: [0.0; 3],
        })
        .collect::<Vec<_>>();

    if m.mesh.normals.is_empty() {
        compute_flat_normals(&mut vertices, &m.mesh.indices)?;
    }
    compute_tangents(&mut vertices, &m.mesh.indices)?;

    let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(&format!("{:?} Vertex Buffer", file_name)),
        contents: bytemuck::cast_slice(&vertices),
        usage: wgpu::BufferUsages::VERTEX,
    });

    let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(&format!("{:?} Index Buffer", file_name)),
        // The indices are for positions, texels, and normals because we set `single_index` to true
        contents: bytemuck::cast_slice(&m.mesh.indices),
        usage: wgpu::BufferUsages::INDEX,
    });

    Ok(model::Mesh {
        name: file_name.to_string(),
        vertex_buffer,
        index_buffer,
        num_elements: m.mesh.indices.len() as u32,
        material: m.mesh.material_id.unwrap_or(0),
    })
}

/// OBJ exports occasionally omit normals entirely; derive them from the face
/// geometry so lighting still works.
fn compute_flat_normals(
    vertices: &mut [model::ModelVertex],
    indices: &[u32],
) -> anyhow::Result<()> {
    for c in indices.chunks(3) {
        let [i0, i1, i2] = triangle(c, vertices.len())?;
        let pos0: cgmath::Vector3<f32> = vertices[i0].position.into();
        let pos1: cgmath::Vector3<f32> = vertices[i1].position.into();
        let pos2: cgmath::Vector3<f32> = vertices[i2].position.into();

        let normal = (pos1 - pos0).cross(pos2 - pos0);
        for i in [i0, i1, i2] {
            let n: cgmath::Vector3<f32> = vertices[i].normal.into();
            vertices[i].normal = (n + normal).into();
        }
    }
    for v in vertices.iter_mut() {
        let n: cgmath::Vector3<f32> = v.normal.into();
        let len = (n.x * n.x + n.y * n.y + n.z * n.z).sqrt();
        if len > 0.0 {
            v.normal = (n / len).into();
        }
    }
    Ok(())
}

// See https://learnopengl.com/Advanced-Lighting/Normal-Mapping for the
// derivation: solving
//     delta_pos1 = delta_uv1.x * T + delta_uv1.y * B
//     delta_pos2 = delta_uv2.x * T + delta_uv2.y * B
// for the tangent and bitangent of each triangle, accumulated and averaged
// per vertex.
fn compute_tangents(vertices: &mut [model::ModelVertex], indices: &[u32]) -> anyhow::Result<()> {
    let mut triangles_included = vec![0u32; vertices.len()];

    for c in indices.chunks(3) {
        let [i0, i1, i2] = triangle(c, vertices.len())?;
        let v0 = vertices[i0];
        let v1 = vertices[i1];
        let v2 = vertices[i2];

        let pos0: cgmath::Vector3<f32> = v0.position.into();
        let pos1: cgmath::Vector3<f32> = v1.position.into();
        let pos2: cgmath::Vector3<f32> = v2.position.into();

        let uv0: cgmath::Vector2<f32> = v0.tex_coords.into();
        let uv1: cgmath::Vector2<f32> = v1.tex_coords.into();
        let uv2: cgmath::Vector2<f32> = v2.tex_coords.into();

        let delta_pos1 = pos1 - pos0;
        let delta_pos2 = pos2 - pos0;
        let delta_uv1 = uv1 - uv0;
        let delta_uv2 = uv2 - uv0;

        // Degenerate UVs would divide by zero; fall back to a neutral basis.
        let denom = delta_uv1.x * delta_uv2.y - delta_uv1.y * delta_uv2.x;
        let (tangent, bitangent) = if denom.abs() > f32::EPSILON {
            let r = 1.0 / denom;
            let tangent = (delta_pos1 * delta_uv2.y - delta_pos2 * delta_uv1.y) * r;
            // We flip the bitangent to enable right-handed normal
            // maps with wgpu texture coordinate system
            let bitangent = (delta_pos2 * delta_uv1.x - delta_pos1 * delta_uv2.x) * -r;
            (tangent, bitangent)
        } else {
            (delta_pos1, delta_pos2)
        };

        for i in [i0, i1, i2] {
            vertices[i].tangent =
                (tangent + cgmath::Vector3::from(vertices[i].tangent)).into();
            vertices[i].bitangent =
                (bitangent + cgmath::Vector3::from(vertices[i].bitangent)).into();
            triangles_included[i] += 1;
        }
    }

    // Average the accumulated tangents/bitangents
    for (i, n) in triangles_included.into_iter().enumerate() {
        if n == 0 {
            continue;
        }
        let denom = 1.0 / n as f32;
        let v = &mut vertices[i];
        v.tangent = (cgmath::Vector3::from(v.tangent) * denom).into();
        v.bitangent = (cgmath::Vector3::from(v.bitangent) * denom).into();
    }
    Ok(())
}

fn triangle(chunk: &[u32], vertex_count: usize) -> anyhow::Result<[usize; 3]> {
    if chunk.len() != 3 {
        bail!("index count is not a multiple of three");
    }
    let idx = [chunk[0] as usize, chunk[1] as usize, chunk[2] as usize];
    for i in idx {
        if i >= vertex_count {
            return Err(anyhow!(
                "index {} out of bounds for {} vertices",
                i,
                vertex_count
            ));
        }
    }
    Ok(idx)
}
