//! Per-frame rendering pipeline
//!
//! Owns the mesh, camera, and projection parameters. Each frame:
//! advance the animation angle, rebuild the world and view matrices,
//! transform and back-face-cull every mesh triangle, shade the survivors,
//! clip against the near plane, project and perspective-divide, map to
//! pixel coordinates, clip against the four screen edges, and rasterize.
//! Nothing persists between frames except the camera pose and the angle.

use std::collections::VecDeque;

use super::camera::{Camera, Key};
use super::clip::{clip_plane, ClipResult};
use super::framebuffer::{Color, Framebuffer};
use super::math::{Mat4, Vec3};
use super::mesh::{Mesh, Triangle};
use super::raster;
use super::texture::Texture;
use crate::config::{DrawMode, RenderConfig};

pub struct Scene {
    mesh: Mesh,
    texture: Option<Texture>,
    pub camera: Camera,
    config: RenderConfig,
    proj: Mat4,
    texture_scale: f32,
    angle: f32,
}

impl Scene {
    pub fn new(mesh: Mesh, texture: Option<Texture>, config: RenderConfig) -> Self {
        let aspect_ratio = config.height as f32 / config.width as f32;
        let proj = Mat4::projection(
            config.fov_degrees,
            aspect_ratio,
            config.near_plane,
            config.far_plane,
        );
        let texture_scale = config.texture_scale.unwrap_or(1.0 / mesh.texture_max);
        Self {
            mesh,
            texture,
            camera: Camera::new(),
            config,
            proj,
            texture_scale,
            angle: 0.0,
        }
    }

    pub fn keypress(&mut self, key: Key, delta_ms: f32) {
        self.camera.keypress(key, delta_ms);
    }

    /// Advance the animation and produce this frame's screen-space
    /// triangles: world transform, back-face cull, headlamp shading, view
    /// transform, near-plane clip, projection, perspective divide, and the
    /// viewport mapping. Screen-edge clipping happens in [`Scene::render`].
    pub fn update(&mut self, delta_ms: f32) -> Vec<Triangle> {
        self.angle += self.config.spin_rate * (delta_ms / 1000.0);

        let mat_rot_z = Mat4::rotation_z(self.angle * 0.5);
        let mat_rot_x = Mat4::rotation_x(self.angle);
        let mat_trans = Mat4::translation(0.0, 0.0, 5.0);
        let mat_world = (mat_rot_z * mat_rot_x) * mat_trans;

        self.camera.update_look();
        let target = self.camera.position + self.camera.look_dir;
        let mat_camera = Mat4::point_at(self.camera.position, target, Vec3::UP);
        let mat_view = mat_camera.quick_inverse();

        let width = self.config.width as f32;
        let height = self.config.height as f32;
        let offset = Vec3::new(1.0, 1.0, 0.0);

        let mut screen_tris = Vec::new();
        for tri in &self.mesh.triangles {
            let mut world_t = *tri;
            for i in 0..3 {
                world_t.vs[i] = tri.vs[i] * mat_world;
            }

            let line1 = world_t.vs[1] - world_t.vs[0];
            let line2 = world_t.vs[2] - world_t.vs[0];
            let normal = line1.cross(line2).normalize();

            // Back-face cull: skip anything facing away from the camera.
            let camera_ray = world_t.vs[0] - self.camera.position;
            if normal.dot(camera_ray) >= 0.0 {
                continue;
            }

            // Headlamp shading: the light shines from the camera toward the
            // face. The 0.1 floor keeps grazing faces from going full black.
            let light = (camera_ray * -1.0).normalize();
            let light_dp = normal.dot(light).max(0.1);
            let greyscale = ((light_dp + 0.1) * 255.0).min(255.0) as u8;

            let mut view_t = world_t;
            for i in 0..3 {
                view_t.vs[i] = world_t.vs[i] * mat_view;
            }

            let near_clip = clip_plane(
                Vec3::new(0.0, 0.0, self.config.near_plane),
                Vec3::new(0.0, 0.0, 1.0),
                &view_t,
            );
            let (c0, c1) = match near_clip {
                ClipResult::Outside => (None, None),
                ClipResult::One(t) => (Some(t), None),
                ClipResult::Two(a, b) => (Some(a), Some(b)),
            };

            for clip_t in [c0, c1].into_iter().flatten() {
                let mut proj_t = clip_t;
                proj_t.color = Color::grey(greyscale);

                for i in 0..3 {
                    let p = clip_t.vs[i] * self.proj;

                    // Set up perspective-correct interpolation: texture
                    // coordinates move into 1/w space alongside the divide.
                    let mut t = clip_t.ts[i];
                    t.u /= p.w;
                    t.v /= p.w;
                    t.w = 1.0 / p.w;
                    proj_t.ts[i] = t;

                    let mut v = p / p.w;

                    // Mirror both axes (screen Y grows downward), then map
                    // the [-1, 1] clip range onto pixel coordinates.
                    v.x *= -1.0;
                    v.y *= -1.0;
                    v = v + offset;
                    v.x *= 0.5 * width;
                    v.y *= 0.5 * height;
                    proj_t.vs[i] = v;
                }

                screen_tris.push(proj_t);
            }
        }

        screen_tris
    }

    /// Run a full frame into `fb`: update, screen-edge clipping, and
    /// rasterization in the configured mode (textured when a texture is
    /// loaded, flat-shaded otherwise, wireframe on request).
    pub fn render(&mut self, fb: &mut Framebuffer, delta_ms: f32) {
        let mut tris = self.update(delta_ms);

        // Flat fill has no depth test, so paint back to front.
        if self.config.draw_mode == DrawMode::Solid && self.texture.is_none() {
            tris.sort_by(|t1, t2| {
                let z1 = (t1.vs[0].z + t1.vs[1].z + t1.vs[2].z) / 3.0;
                let z2 = (t2.vs[0].z + t2.vs[1].z + t2.vs[2].z) / 3.0;
                z2.total_cmp(&z1)
            });
        }

        let width = self.config.width as f32;
        let height = self.config.height as f32;

        for tri in tris {
            // Sutherland-Hodgman against the screen rectangle: each plane
            // consumes the previous plane's entire output before the next.
            let mut queue: VecDeque<Triangle> = VecDeque::new();
            queue.push_back(tri);
            let mut pending = 1;

            for plane in 0..4 {
                for _ in 0..pending {
                    let Some(front) = queue.pop_front() else {
                        break;
                    };
                    let result = match plane {
                        0 => clip_plane(Vec3::ZERO, Vec3::new(0.0, 1.0, 0.0), &front),
                        1 => clip_plane(
                            Vec3::new(0.0, height - 1.0, 0.0),
                            Vec3::new(0.0, -1.0, 0.0),
                            &front,
                        ),
                        2 => clip_plane(Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0), &front),
                        _ => clip_plane(
                            Vec3::new(width - 1.0, 0.0, 0.0),
                            Vec3::new(-1.0, 0.0, 0.0),
                            &front,
                        ),
                    };
                    match result {
                        ClipResult::Outside => {}
                        ClipResult::One(t) => queue.push_back(t),
                        ClipResult::Two(a, b) => {
                            queue.push_back(a);
                            queue.push_back(b);
                        }
                    }
                }
                pending = queue.len();
            }

            for t in queue {
                match (self.config.draw_mode, &self.texture) {
                    (DrawMode::Wireframe, _) => raster::wire_triangle(fb, &t),
                    (DrawMode::Solid, Some(tex)) => {
                        raster::textured_triangle(fb, &t, tex, self.texture_scale)
                    }
                    (DrawMode::Solid, None) => raster::fill_triangle(fb, &t),
                }
            }
        }
    }
}
