//! Scanline triangle rasterization
//!
//! Pixel coverage follows the top-left rule: every scanline y and span x
//! covers the integer range `[ceil(edge - 0.5), ceil(edge - 0.5))` computed
//! at pixel centers, so triangles sharing an edge never double-draw it.
//!
//! Three modes: wireframe edges, flat fill with the triangle's shaded color,
//! and perspective-correct texturing with a reciprocal-depth test.

use super::framebuffer::{Color, Framebuffer};
use super::math::{TexCoord, Vec3};
use super::mesh::Triangle;
use super::texture::Texture;

/// Draw the triangle's three edges.
pub fn wire_triangle(fb: &mut Framebuffer, tri: &Triangle) {
    let [a, b, c] = tri.vs;
    fb.draw_line(a.x as i32, a.y as i32, b.x as i32, b.y as i32, tri.color);
    fb.draw_line(a.x as i32, a.y as i32, c.x as i32, c.y as i32, tri.color);
    fb.draw_line(c.x as i32, c.y as i32, b.x as i32, b.y as i32, tri.color);
}

/// Sort vertices (and their texture coordinates) by ascending screen Y.
fn sort_by_y(vs: &mut [Vec3; 3], ts: &mut [TexCoord; 3]) {
    if vs[1].y < vs[0].y {
        vs.swap(0, 1);
        ts.swap(0, 1);
    }
    if vs[2].y < vs[0].y {
        vs.swap(0, 2);
        ts.swap(0, 2);
    }
    if vs[2].y < vs[1].y {
        vs.swap(1, 2);
        ts.swap(1, 2);
    }
}

/// Scanline fill with the triangle's flat color.
pub fn fill_triangle(fb: &mut Framebuffer, tri: &Triangle) {
    let mut vs = tri.vs;
    let mut ts = tri.ts;
    sort_by_y(&mut vs, &mut ts);

    if vs[1].y == vs[2].y {
        if vs[2].x < vs[1].x {
            vs.swap(1, 2);
        }
        fill_bottom_flat(fb, &vs, tri.color);
    } else if vs[0].y == vs[1].y {
        if vs[1].x < vs[0].x {
            vs.swap(0, 1);
        }
        fill_top_flat(fb, &vs, tri.color);
    } else {
        // Split at the middle vertex's Y by walking the long edge, then
        // hand each half to the matching flat-edge fill. Which side gets
        // the long edge depends on whether the middle vertex sits left or
        // right of the split point.
        let split = (vs[1].y - vs[0].y) / (vs[2].y - vs[0].y);
        let vi = Vec3::new(
            vs[0].x + (vs[2].x - vs[0].x) * split,
            vs[0].y + (vs[2].y - vs[0].y) * split,
            0.0,
        );

        if vs[1].x < vi.x {
            // major right
            fill_bottom_flat(fb, &[vs[0], vs[1], vi], tri.color);
            fill_top_flat(fb, &[vs[1], vi, vs[2]], tri.color);
        } else {
            // major left
            fill_bottom_flat(fb, &[vs[0], vi, vs[1]], tri.color);
            fill_top_flat(fb, &[vi, vs[1], vs[2]], tri.color);
        }
    }
}

/// Fill a triangle whose bottom edge is horizontal: `vs[0]` is the apex,
/// `vs[1]`/`vs[2]` the bottom left/right.
fn fill_bottom_flat(fb: &mut Framebuffer, vs: &[Vec3; 3], color: Color) {
    let slope0 = (vs[1].x - vs[0].x) / (vs[1].y - vs[0].y);
    let slope1 = (vs[2].x - vs[0].x) / (vs[2].y - vs[0].y);

    let y_min = (vs[0].y - 0.5).ceil() as i32;
    let y_max = (vs[2].y - 0.5).ceil() as i32;

    for y in y_min..y_max {
        let yc = y as f32 + 0.5;
        let px0 = slope0 * (yc - vs[0].y) + vs[0].x;
        let px1 = slope1 * (yc - vs[0].y) + vs[0].x;
        fill_span(fb, y, px0, px1, color);
    }
}

/// Fill a triangle whose top edge is horizontal: `vs[0]`/`vs[1]` are the top
/// left/right, `vs[2]` the apex below.
fn fill_top_flat(fb: &mut Framebuffer, vs: &[Vec3; 3], color: Color) {
    let slope0 = (vs[2].x - vs[0].x) / (vs[2].y - vs[0].y);
    let slope1 = (vs[2].x - vs[1].x) / (vs[2].y - vs[1].y);

    let y_min = (vs[0].y - 0.5).ceil() as i32;
    let y_max = (vs[2].y - 0.5).ceil() as i32;

    for y in y_min..y_max {
        let yc = y as f32 + 0.5;
        let px0 = slope0 * (yc - vs[0].y) + vs[0].x;
        let px1 = slope1 * (yc - vs[1].y) + vs[1].x;
        fill_span(fb, y, px0, px1, color);
    }
}

fn fill_span(fb: &mut Framebuffer, y: i32, px0: f32, px1: f32, color: Color) {
    if y < 0 {
        return;
    }
    let x_min = (px0 - 0.5).ceil() as i32;
    let x_max = (px1 - 0.5).ceil() as i32;
    for x in x_min.max(0)..x_max {
        fb.set_pixel(x as usize, y as usize, color);
    }
}

fn lerp_tex(a: TexCoord, b: TexCoord, t: f32) -> TexCoord {
    TexCoord {
        u: a.u + (b.u - a.u) * t,
        v: a.v + (b.v - a.v) * t,
        w: a.w + (b.w - a.w) * t,
    }
}

/// Scanline fill with perspective-correct texturing and depth testing.
///
/// Screen-space texture coordinates arrive pre-divided by the clip-space w
/// (`u/w, v/w`, with `1/w` in the w slot), so they interpolate linearly
/// here; each pixel recovers the true (u, v) by dividing back through the
/// interpolated `1/w`. A pixel lands only when its `1/w` beats the depth
/// buffer. `scale` normalizes oversized texture coordinates to [0, 1].
pub fn textured_triangle(fb: &mut Framebuffer, tri: &Triangle, tex: &Texture, scale: f32) {
    let mut vs = tri.vs;
    let mut ts = tri.ts;
    sort_by_y(&mut vs, &mut ts);

    if vs[1].y == vs[2].y {
        if vs[2].x < vs[1].x {
            vs.swap(1, 2);
            ts.swap(1, 2);
        }
        textured_bottom_flat(fb, &vs, &ts, tex, scale);
    } else if vs[0].y == vs[1].y {
        if vs[1].x < vs[0].x {
            vs.swap(0, 1);
            ts.swap(0, 1);
        }
        textured_top_flat(fb, &vs, &ts, tex, scale);
    } else {
        let split = (vs[1].y - vs[0].y) / (vs[2].y - vs[0].y);
        let vi = Vec3::new(
            vs[0].x + (vs[2].x - vs[0].x) * split,
            vs[0].y + (vs[2].y - vs[0].y) * split,
            0.0,
        );
        let ti = lerp_tex(ts[0], ts[2], split);

        if vs[1].x < vi.x {
            // major right
            textured_bottom_flat(fb, &[vs[0], vs[1], vi], &[ts[0], ts[1], ti], tex, scale);
            textured_top_flat(fb, &[vs[1], vi, vs[2]], &[ts[1], ti, ts[2]], tex, scale);
        } else {
            // major left
            textured_bottom_flat(fb, &[vs[0], vi, vs[1]], &[ts[0], ti, ts[1]], tex, scale);
            textured_top_flat(fb, &[vi, vs[1], vs[2]], &[ti, ts[1], ts[2]], tex, scale);
        }
    }
}

fn textured_bottom_flat(
    fb: &mut Framebuffer,
    vs: &[Vec3; 3],
    ts: &[TexCoord; 3],
    tex: &Texture,
    scale: f32,
) {
    let slope0 = (vs[1].x - vs[0].x) / (vs[1].y - vs[0].y);
    let slope1 = (vs[2].x - vs[0].x) / (vs[2].y - vs[0].y);
    let inv_h0 = 1.0 / (vs[1].y - vs[0].y);
    let inv_h1 = 1.0 / (vs[2].y - vs[0].y);

    let y_min = (vs[0].y - 0.5).ceil() as i32;
    let y_max = (vs[2].y - 0.5).ceil() as i32;

    for y in y_min..y_max {
        let yc = y as f32 + 0.5;
        let px0 = slope0 * (yc - vs[0].y) + vs[0].x;
        let px1 = slope1 * (yc - vs[0].y) + vs[0].x;
        let t0 = lerp_tex(ts[0], ts[1], (yc - vs[0].y) * inv_h0);
        let t1 = lerp_tex(ts[0], ts[2], (yc - vs[0].y) * inv_h1);
        textured_span(fb, y, px0, px1, t0, t1, tex, scale);
    }
}

fn textured_top_flat(
    fb: &mut Framebuffer,
    vs: &[Vec3; 3],
    ts: &[TexCoord; 3],
    tex: &Texture,
    scale: f32,
) {
    let slope0 = (vs[2].x - vs[0].x) / (vs[2].y - vs[0].y);
    let slope1 = (vs[2].x - vs[1].x) / (vs[2].y - vs[1].y);
    let inv_h0 = 1.0 / (vs[2].y - vs[0].y);
    let inv_h1 = 1.0 / (vs[2].y - vs[1].y);

    let y_min = (vs[0].y - 0.5).ceil() as i32;
    let y_max = (vs[2].y - 0.5).ceil() as i32;

    for y in y_min..y_max {
        let yc = y as f32 + 0.5;
        let px0 = slope0 * (yc - vs[0].y) + vs[0].x;
        let px1 = slope1 * (yc - vs[1].y) + vs[1].x;
        let t0 = lerp_tex(ts[0], ts[2], (yc - vs[0].y) * inv_h0);
        let t1 = lerp_tex(ts[1], ts[2], (yc - vs[1].y) * inv_h1);
        textured_span(fb, y, px0, px1, t0, t1, tex, scale);
    }
}

#[allow(clippy::too_many_arguments)]
fn textured_span(
    fb: &mut Framebuffer,
    y: i32,
    px0: f32,
    px1: f32,
    t0: TexCoord,
    t1: TexCoord,
    tex: &Texture,
    scale: f32,
) {
    if y < 0 {
        return;
    }
    let x_min = (px0 - 0.5).ceil() as i32;
    let x_max = (px1 - 0.5).ceil() as i32;
    if x_max <= x_min {
        return;
    }
    let inv_span = 1.0 / (px1 - px0);

    for x in x_min.max(0)..x_max {
        let s = (x as f32 + 0.5 - px0) * inv_span;
        let t = lerp_tex(t0, t1, s);

        // Depth test on reciprocal depth: larger 1/w is closer.
        let (xi, yi) = (x as usize, y as usize);
        if xi >= fb.width || yi >= fb.height {
            continue;
        }
        let idx = yi * fb.width + xi;
        if t.w > fb.depth[idx] {
            fb.depth[idx] = t.w;

            // Recover perspective-correct (u, v), then look the texel up
            // with the ceil/V-flip convention.
            let u = t.u / t.w;
            let v = t.v / t.w;
            let tx = ((u * scale).clamp(0.0, 1.0) * tex.width as f32).ceil() as usize;
            let ty = ((1.0 - v * scale).clamp(0.0, 1.0) * tex.height as f32).ceil() as usize;
            let (r, g, b) = tex.get_pixel(tx, ty);
            fb.set_pixel(xi, yi, Color::new(r, g, b));
        }
    }
}
