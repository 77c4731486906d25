//! `wgpu` vertex and index formats for planet meshes.
//!
//! | Location | Offset | Format    | Field    |
//! |----------|--------|-----------|----------|
//! | 0        | 0      | Float32x3 | position |
//! | 1        | 12     | Float32x3 | normal   |
//! | 2        | 24     | Uint32    | tile_id  |

use std::mem;

use wgpu::{IndexFormat, VertexAttribute, VertexBufferLayout, VertexFormat, VertexStepMode};

use crate::packed::TileVertex;

/// Vertex attributes of [`TileVertex`]. The trailing padding is not bound.
pub const TILE_VERTEX_ATTRIBUTES: [VertexAttribute; 3] = [
    VertexAttribute {
        format: VertexFormat::Float32x3,
        offset: 0,
        shader_location: 0,
    },
    VertexAttribute {
        format: VertexFormat::Float32x3,
        offset: 12,
        shader_location: 1,
    },
    VertexAttribute {
        format: VertexFormat::Uint32,
        offset: 24,
        shader_location: 2,
    },
];

/// Vertex buffer layout shared by every planet render pipeline.
pub const TILE_VERTEX_LAYOUT: VertexBufferLayout<'static> = VertexBufferLayout {
    array_stride: mem::size_of::<TileVertex>() as u64,
    step_mode: VertexStepMode::Vertex,
    attributes: &TILE_VERTEX_ATTRIBUTES,
};

/// Planet index buffers are always 32-bit.
pub const PLANET_INDEX_FORMAT: IndexFormat = IndexFormat::Uint32;

/// Owned copy of [`TILE_VERTEX_LAYOUT`].
pub fn tile_vertex_buffer_layout() -> VertexBufferLayout<'static> {
    TILE_VERTEX_LAYOUT
}

const _: () = assert!(
    mem::size_of::<TileVertex>() == 32,
    "TileVertex size changed, update TILE_VERTEX_LAYOUT"
);
const _: () = assert!(mem::offset_of!(TileVertex, position) == 0);
const _: () = assert!(mem::offset_of!(TileVertex, normal) == 12);
const _: () = assert!(mem::offset_of!(TileVertex, tile_id) == 24);
const _: () = assert!(
    TILE_VERTEX_ATTRIBUTES[2].offset + 4 <= mem::size_of::<TileVertex>() as u64,
    "Last attribute exceeds vertex stride"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_stride_matches_vertex_struct_size() {
        assert_eq!(
            TILE_VERTEX_LAYOUT.array_stride,
            mem::size_of::<TileVertex>() as u64
        );
    }

    #[test]
    fn test_attribute_offsets_match_fields() {
        assert_eq!(
            TILE_VERTEX_ATTRIBUTES[0].offset,
            mem::offset_of!(TileVertex, position) as u64
        );
        assert_eq!(
            TILE_VERTEX_ATTRIBUTES[1].offset,
            mem::offset_of!(TileVertex, normal) as u64
        );
        assert_eq!(
            TILE_VERTEX_ATTRIBUTES[2].offset,
            mem::offset_of!(TileVertex, tile_id) as u64
        );
    }

    #[test]
    fn test_attribute_formats() {
        assert_eq!(TILE_VERTEX_ATTRIBUTES[0].format, VertexFormat::Float32x3);
        assert_eq!(TILE_VERTEX_ATTRIBUTES[1].format, VertexFormat::Float32x3);
        assert_eq!(TILE_VERTEX_ATTRIBUTES[2].format, VertexFormat::Uint32);
        for (i, attr) in TILE_VERTEX_ATTRIBUTES.iter().enumerate() {
            assert_eq!(attr.shader_location, i as u32);
        }
    }

    #[test]
    fn test_helper_returns_same_layout() {
        let layout = tile_vertex_buffer_layout();
        assert_eq!(layout.array_stride, TILE_VERTEX_LAYOUT.array_stride);
        assert_eq!(layout.attributes.len(), 3);
        assert_eq!(PLANET_INDEX_FORMAT, IndexFormat::Uint32);
    }

    #[test]
    fn test_layout_is_valid_for_wgpu_pipeline() {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            force_fallback_adapter: true,
            ..Default::default()
        }));

        // Headless machines without an adapter skip the pipeline check.
        let Ok(adapter) = adapter else {
            return;
        };

        let (device, _queue) =
            pollster::block_on(adapter.request_device(&wgpu::DeviceDescriptor::default()))
                .expect("failed to create device");

        let shader_source = r#"
            struct VsOut {
                @builtin(position) clip: vec4<f32>,
                @location(0) @interpolate(flat) tile: u32,
            };

            @vertex
            fn vs_main(
                @location(0) position: vec3<f32>,
                @location(1) normal: vec3<f32>,
                @location(2) tile_id: u32,
            ) -> VsOut {
                var out: VsOut;
                out.clip = vec4<f32>(position + normal * 0.0, 1.0);
                out.tile = tile_id;
                return out;
            }

            @fragment
            fn fs_main(in: VsOut) -> @location(0) vec4<f32> {
                return vec4<f32>(f32(in.tile % 7u) / 7.0, 1.0, 1.0, 1.0);
            }
        "#;

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("test_planet_shader"),
            source: wgpu::ShaderSource::Wgsl(shader_source.into()),
        });

        let _pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("test_planet_pipeline"),
            layout: None,
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[TILE_VERTEX_LAYOUT],
                compilation_options: Default::default(),
            },
            primitive: wgpu::PrimitiveState::default(),
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: wgpu::TextureFormat::Bgra8UnormSrgb,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            multiview_mask: None,
            cache: None,
        });
    }
}
