//! Extruded text meshes
//!
//! Each glyph's contours are filled with the non-zero rule (holes wind
//! against their outer contour), the fill is emitted as a back cap at
//! `z = 0` and a front cap at `z = depth`, and every contour edge becomes a
//! side wall quad with a flat outward normal.

use crate::error::{Result, SceneError};
use crate::font::{signed_area, GlyphShape, TypefaceFont};
use crate::geometry::Geometry;
use glam::{Vec2, Vec3};
use lyon_tessellation::math::point;
use lyon_tessellation::path::Path;
use lyon_tessellation::{BuffersBuilder, FillOptions, FillTessellator, FillVertex, VertexBuffers};

/// Text geometry parameters, in text-space units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextGeometryOptions {
    /// Font size (height of one em)
    pub size: f32,
    /// Extrusion depth along +Z
    pub depth: f32,
    /// Segments per outline curve
    pub curve_segments: usize,
}

impl Default for TextGeometryOptions {
    fn default() -> Self {
        Self {
            size: 8.0,
            depth: 0.1,
            curve_segments: 12,
        }
    }
}

/// Builds the extruded geometry of `text`, baseline of the first line at y = 0
pub fn text_geometry(
    font: &TypefaceFont,
    text: &str,
    options: &TextGeometryOptions,
) -> Result<Geometry> {
    let shapes = font.generate_shapes(text, options.size, options.curve_segments)?;

    let mut tessellator = FillTessellator::new();
    let mut geometry = Geometry::default();
    for shape in &shapes {
        let glyph = extrude_glyph(&mut tessellator, shape, options.depth)?;
        geometry.merge(&glyph);
    }
    Ok(geometry)
}

fn extrude_glyph(
    tessellator: &mut FillTessellator,
    shape: &GlyphShape,
    depth: f32,
) -> Result<Geometry> {
    let fill = fill_contours(tessellator, &shape.contours)?;
    let mut geometry = Geometry::default();

    push_cap(&mut geometry, &fill, 0.0, -Vec3::Z);
    push_cap(&mut geometry, &fill, depth, Vec3::Z);

    // Filled region lies left of the edges when the outline winds counter-clockwise
    let area: f32 = shape.contours.iter().map(|c| signed_area(c)).sum();
    let outward_sign = if area >= 0.0 { 1.0 } else { -1.0 };

    for contour in &shape.contours {
        push_walls(&mut geometry, contour, depth, outward_sign);
    }
    Ok(geometry)
}

fn fill_contours(
    tessellator: &mut FillTessellator,
    contours: &[Vec<Vec2>],
) -> Result<VertexBuffers<Vec2, u32>> {
    let mut builder = Path::builder();
    for contour in contours {
        let Some((first, rest)) = contour.split_first() else {
            continue;
        };
        builder.begin(point(first.x, first.y));
        for p in rest {
            builder.line_to(point(p.x, p.y));
        }
        builder.end(true);
    }
    let path = builder.build();

    let mut buffers: VertexBuffers<Vec2, u32> = VertexBuffers::new();
    tessellator
        .tessellate_path(
            &path,
            &FillOptions::non_zero(),
            &mut BuffersBuilder::new(&mut buffers, |vertex: FillVertex| {
                Vec2::new(vertex.position().x, vertex.position().y)
            }),
        )
        .map_err(|e| SceneError::Tessellation(e.to_string()))?;
    Ok(buffers)
}

fn push_cap(geometry: &mut Geometry, fill: &VertexBuffers<Vec2, u32>, z: f32, normal: Vec3) {
    let base = geometry.positions.len() as u32;
    for v in &fill.vertices {
        geometry.positions.push(Vec3::new(v.x, v.y, z));
        geometry.normals.push(normal);
        geometry.uvs.push(*v);
    }

    for tri in fill.indices.chunks_exact(3) {
        let (a, b, c) = (tri[0], tri[1], tri[2]);
        let pa = fill.vertices[a as usize];
        let pb = fill.vertices[b as usize];
        let pc = fill.vertices[c as usize];
        let ccw = (pb - pa).perp_dot(pc - pa) >= 0.0;
        // Counter-clockwise seen from +Z faces +Z
        let (b, c) = if ccw == (normal.z > 0.0) { (b, c) } else { (c, b) };
        geometry.indices.extend_from_slice(&[base + a, base + b, base + c]);
    }
}

fn push_walls(geometry: &mut Geometry, contour: &[Vec2], depth: f32, outward_sign: f32) {
    let n = contour.len();
    let mut travelled = 0.0;

    for i in 0..n {
        let a = contour[i];
        let b = contour[(i + 1) % n];
        let edge = b - a;
        let length = edge.length();
        if length <= f32::EPSILON {
            continue;
        }
        let normal = Vec3::new(edge.y, -edge.x, 0.0) / length * outward_sign;

        let base = geometry.positions.len() as u32;
        let quad = [
            Vec3::new(a.x, a.y, 0.0),
            Vec3::new(b.x, b.y, 0.0),
            Vec3::new(b.x, b.y, depth),
            Vec3::new(a.x, a.y, depth),
        ];
        geometry.positions.extend_from_slice(&quad);
        geometry.normals.extend_from_slice(&[normal; 4]);
        geometry.uvs.extend_from_slice(&[
            Vec2::new(travelled, 0.0),
            Vec2::new(travelled + length, 0.0),
            Vec2::new(travelled + length, depth),
            Vec2::new(travelled, depth),
        ]);
        travelled += length;

        let facing = (quad[1] - quad[0]).cross(quad[2] - quad[0]).dot(normal) >= 0.0;
        if facing {
            geometry
                .indices
                .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        } else {
            geometry
                .indices
                .extend_from_slice(&[base, base + 2, base + 1, base, base + 3, base + 2]);
        }
    }
}
