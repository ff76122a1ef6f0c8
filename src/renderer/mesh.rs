//! Triangle mesh assets
//!
//! Loads the line-oriented triangle-list format: `v x y z` vertex positions,
//! `vt u v` texture coordinates, and `f` faces carrying 1-based indices
//! either plain (`f 1 2 3`) or slash-delimited (`f 1/1/1 2/2/2 3/3/3`).
//! Normal indices are accepted and discarded. Out-of-range indices are a
//! load-time error, not undefined behavior.

use std::fmt;
use std::fs;
use std::path::Path;

use super::framebuffer::Color;
use super::math::{TexCoord, Vec3};

/// A single renderable triangle: three positions, three texture coordinates
/// (origin when the asset has none), and a flat color. Pipeline stages never
/// mutate a triangle in place; each stage emits new ones.
#[derive(Debug, Clone, Copy)]
pub struct Triangle {
    pub vs: [Vec3; 3],
    pub ts: [TexCoord; 3],
    pub color: Color,
}

impl Triangle {
    pub fn new(vs: [Vec3; 3], ts: [TexCoord; 3]) -> Self {
        Self {
            vs,
            ts,
            color: Color::WHITE,
        }
    }

    pub fn from_points(a: Vec3, b: Vec3, c: Vec3) -> Self {
        Self::new([a, b, c], [TexCoord::default(); 3])
    }
}

impl Default for Triangle {
    fn default() -> Self {
        Self::from_points(Vec3::ZERO, Vec3::ZERO, Vec3::ZERO)
    }
}

/// An ordered triangle list plus the texture-coordinate normalization factor
/// derived from the asset (largest coordinate magnitude seen, at least 1.0).
pub struct Mesh {
    pub triangles: Vec<Triangle>,
    pub texture_max: f32,
}

/// Error type for mesh loading.
#[derive(Debug)]
pub enum MeshError {
    /// File missing or unreadable.
    Io(String),
    /// Unexpected token shape or index out of range.
    Malformed(String),
}

impl fmt::Display for MeshError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeshError::Io(msg) => write!(f, "I/O error: {}", msg),
            MeshError::Malformed(msg) => write!(f, "Malformed mesh: {}", msg),
        }
    }
}

impl std::error::Error for MeshError {}

impl Mesh {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Mesh, MeshError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .map_err(|e| MeshError::Io(format!("failed to read {}: {}", path.display(), e)))?;
        Self::parse(&contents)
    }

    pub fn parse(contents: &str) -> Result<Mesh, MeshError> {
        let mut positions: Vec<Vec3> = Vec::new();
        let mut tex_coords: Vec<TexCoord> = Vec::new();
        let mut triangles: Vec<Triangle> = Vec::new();
        let mut texture_max = 1.0f32;

        for (line_num, line) in contents.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let parts: Vec<&str> = line.split_whitespace().collect();
            match parts[0] {
                "v" => {
                    if parts.len() < 4 {
                        return Err(malformed(line_num, "vertex needs 3 coordinates"));
                    }
                    let x = parse_float(parts[1], line_num)?;
                    let y = parse_float(parts[2], line_num)?;
                    let z = parse_float(parts[3], line_num)?;
                    positions.push(Vec3::new(x, y, z));
                }

                "vt" => {
                    if parts.len() < 3 {
                        return Err(malformed(line_num, "texture coordinate needs 2 values"));
                    }
                    let u = parse_float(parts[1], line_num)?;
                    let v = parse_float(parts[2], line_num)?;
                    texture_max = texture_max.max(u.abs()).max(v.abs());
                    tex_coords.push(TexCoord::new(u, v));
                }

                "f" => {
                    // Triangles only: exactly three vertex references.
                    if parts.len() != 4 {
                        return Err(malformed(line_num, "face needs exactly 3 vertices"));
                    }
                    let mut vs = [Vec3::ZERO; 3];
                    let mut ts = [TexCoord::default(); 3];
                    for i in 0..3 {
                        let (pos, tex) = parse_face_vertex(
                            parts[i + 1],
                            line_num,
                            &positions,
                            &tex_coords,
                        )?;
                        vs[i] = pos;
                        ts[i] = tex;
                    }
                    triangles.push(Triangle::new(vs, ts));
                }

                // Normals, object names, smoothing groups etc. are skipped.
                _ => {}
            }
        }

        Ok(Mesh {
            triangles,
            texture_max,
        })
    }
}

/// Parse one face vertex reference: `7`, `7/3`, `7/3/2`, or `7//2`.
/// Normal indices are validated for shape but not stored.
fn parse_face_vertex(
    spec: &str,
    line_num: usize,
    positions: &[Vec3],
    tex_coords: &[TexCoord],
) -> Result<(Vec3, TexCoord), MeshError> {
    let parts: Vec<&str> = spec.split('/').collect();
    if parts.len() > 3 {
        return Err(malformed(line_num, "too many '/' in face vertex"));
    }

    let pos_idx = parse_index(parts[0], positions.len(), line_num)?;
    let pos = positions[pos_idx];

    let tex = if parts.len() > 1 && !parts[1].is_empty() {
        tex_coords[parse_index(parts[1], tex_coords.len(), line_num)?]
    } else {
        TexCoord::default()
    };

    if parts.len() > 2 && !parts[2].is_empty() {
        // Parsed so a bad token still fails loudly, then dropped.
        parse_index(parts[2], usize::MAX, line_num)?;
    }

    Ok((pos, tex))
}

fn parse_float(s: &str, line_num: usize) -> Result<f32, MeshError> {
    s.parse()
        .map_err(|_| malformed(line_num, &format!("invalid float '{}'", s)))
}

/// Parse a 1-based index and convert it to 0-based, rejecting anything
/// outside the declared range.
fn parse_index(s: &str, count: usize, line_num: usize) -> Result<usize, MeshError> {
    let idx: usize = s
        .parse()
        .map_err(|_| malformed(line_num, &format!("invalid index '{}'", s)))?;
    if idx == 0 || idx > count {
        return Err(malformed(
            line_num,
            &format!("index {} out of range (have {})", idx, count),
        ));
    }
    Ok(idx - 1)
}

fn malformed(line_num: usize, msg: &str) -> MeshError {
    MeshError::Malformed(format!("line {}: {}", line_num + 1, msg))
}
