use super::helpers::{self, BillboardPipelineDesc};
use tree_core::{color, Decal, ParticleCloud};
use wgpu;
use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct SceneUniforms {
    pub(crate) view_proj: [[f32; 4]; 4],
    pub(crate) model: [[f32; 4]; 4],
    // xyz = camera right, w = group scale applied to decal extents
    pub(crate) cam_right: [f32; 4],
    pub(crate) cam_up: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct BillboardInstance {
    pub(crate) center: [f32; 3],
    pub(crate) size: [f32; 2],
    pub(crate) color: [f32; 4],
}

// Two triangles spanning [-0.5, 0.5]^2
const QUAD_CORNERS: [f32; 12] = [
    -0.5, -0.5, 0.5, -0.5, 0.5, 0.5, -0.5, -0.5, 0.5, 0.5, -0.5, 0.5,
];
pub(crate) const QUAD_VERTEX_COUNT: u32 = 6;

pub(crate) const CORNER_LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
    array_stride: 8,
    step_mode: wgpu::VertexStepMode::Vertex,
    attributes: &[wgpu::VertexAttribute {
        format: wgpu::VertexFormat::Float32x2,
        offset: 0,
        shader_location: 0,
    }],
};

pub(crate) const INSTANCE_LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
    array_stride: std::mem::size_of::<BillboardInstance>() as u64,
    step_mode: wgpu::VertexStepMode::Instance,
    attributes: &[
        wgpu::VertexAttribute {
            format: wgpu::VertexFormat::Float32x3,
            offset: 0,
            shader_location: 1,
        },
        wgpu::VertexAttribute {
            format: wgpu::VertexFormat::Float32x2,
            offset: 12,
            shader_location: 2,
        },
        wgpu::VertexAttribute {
            format: wgpu::VertexFormat::Float32x4,
            offset: 20,
            shader_location: 3,
        },
    ],
};

pub(crate) struct BillboardResources {
    pub(crate) decal_bgl: wgpu::BindGroupLayout,
    pub(crate) uniform_buffer: wgpu::Buffer,
    pub(crate) scene_bind_group: wgpu::BindGroup,
    pub(crate) quad_vb: wgpu::Buffer,
    pub(crate) particle_vb: wgpu::Buffer,
    pub(crate) particle_count: u32,
    pub(crate) decal_vb: wgpu::Buffer,
    pub(crate) particle_pipeline: wgpu::RenderPipeline,
    pub(crate) decal_pipeline: wgpu::RenderPipeline,
}

/// `extent` is the world-space quad side, see
/// [`tree_core::PerspectiveCamera::attenuated_point_extent`].
pub(crate) fn particle_instances(cloud: &ParticleCloud, extent: f32) -> Vec<BillboardInstance> {
    cloud
        .particles()
        .iter()
        .map(|p| {
            let [r, g, b] = color::rgb_to_linear(p.color);
            BillboardInstance {
                center: p.position.to_array(),
                size: [extent, extent],
                color: [r, g, b, 1.0],
            }
        })
        .collect()
}

pub(crate) fn decal_instances<'d>(decals: impl Iterator<Item = &'d Decal>) -> Vec<BillboardInstance> {
    decals
        .map(|d| BillboardInstance {
            center: d.position.to_array(),
            size: d.scale.to_array(),
            color: [1.0, 1.0, 1.0, 1.0],
        })
        .collect()
}

pub(crate) fn create_billboard_resources(
    device: &wgpu::Device,
    swap_format: wgpu::TextureFormat,
    particles: &[BillboardInstance],
    decals: &[BillboardInstance],
) -> BillboardResources {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("tree_shader"),
        source: wgpu::ShaderSource::Wgsl(tree_core::TREE_WGSL.into()),
    });
    let scene_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("scene_bgl"),
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
    });
    let decal_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("decal_bgl"),
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
    });
    let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("scene_uniforms"),
        size: std::mem::size_of::<SceneUniforms>() as u64,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });
    let scene_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("scene_bg"),
        layout: &scene_bgl,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: uniform_buffer.as_entire_binding(),
        }],
    });

    let quad_vb = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("quad_vb"),
        contents: bytemuck::cast_slice(&QUAD_CORNERS),
        usage: wgpu::BufferUsages::VERTEX,
    });
    let particle_vb = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("particle_vb"),
        contents: bytemuck::cast_slice(particles),
        usage: wgpu::BufferUsages::VERTEX,
    });
    let decal_vb = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("decal_vb"),
        contents: bytemuck::cast_slice(decals),
        usage: wgpu::BufferUsages::VERTEX,
    });

    let pl_particles = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("pl_particles"),
        bind_group_layouts: &[&scene_bgl],
        push_constant_ranges: &[],
    });
    let pl_decals = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("pl_decals"),
        bind_group_layouts: &[&scene_bgl, &decal_bgl],
        push_constant_ranges: &[],
    });
    let particle_pipeline = helpers::make_billboard_pipeline(
        device,
        &pl_particles,
        &shader,
        swap_format,
        &BillboardPipelineDesc {
            label: "particle_pipeline",
            vert_entry: "vs_particle",
            frag_entry: "fs_particle",
            blend: None,
            depth_write: true,
        },
    );
    let decal_pipeline = helpers::make_billboard_pipeline(
        device,
        &pl_decals,
        &shader,
        swap_format,
        &BillboardPipelineDesc {
            label: "decal_pipeline",
            vert_entry: "vs_decal",
            frag_entry: "fs_decal",
            blend: Some(wgpu::BlendState::ALPHA_BLENDING),
            depth_write: false,
        },
    );

    BillboardResources {
        decal_bgl,
        uniform_buffer,
        scene_bind_group,
        quad_vb,
        particle_vb,
        particle_count: particles.len() as u32,
        decal_vb,
        particle_pipeline,
        decal_pipeline,
    }
}
