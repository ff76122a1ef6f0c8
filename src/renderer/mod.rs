//! Software 3D rendering pipeline
//!
//! Everything between a loaded mesh and colored pixels, with no graphics
//! API in the loop:
//! - world/view/projection transforms with explicit row-vector matrices
//! - back-face culling and camera-relative Lambertian shading
//! - near-plane clipping in view space, screen-edge clipping in 2D
//! - scanline rasterization (top-left rule), flat or perspective-correct
//!   textured with a reciprocal-depth buffer
//!
//! # Module Organization
//!
//! - `math` - Vec3, TexCoord, Mat4 and the matrix factories
//! - `mesh` - Triangle, Mesh, and the asset loader
//! - `texture` - decoded pixel surfaces
//! - `clip` - triangle-vs-plane clipping
//! - `camera` - camera pose and the keypress contract
//! - `scene` - per-frame pipeline orchestration
//! - `framebuffer` - pixel + depth target
//! - `raster` - scanline triangle fill

#![allow(dead_code)]

pub mod camera;
pub mod clip;
pub mod framebuffer;
pub mod math;
pub mod mesh;
pub mod raster;
pub mod scene;
pub mod texture;

pub use camera::{Camera, Key};
pub use clip::{clip_plane, ClipResult};
pub use framebuffer::{Color, Framebuffer};
pub use math::{Mat4, TexCoord, Vec3};
pub use mesh::{Mesh, MeshError, Triangle};
pub use scene::Scene;
pub use texture::{Texture, TextureError};
