//! Triangle clipping against arbitrary planes
//!
//! One Sutherland-Hodgman step: a triangle clipped against a single plane
//! yields zero, one, or two triangles. Texture coordinates are interpolated
//! with the same parametric `t` as the position intersection, so attributes
//! stay consistent across the cut.

use super::math::{TexCoord, Vec3};
use super::mesh::Triangle;

/// Outcome of clipping one triangle against one plane.
#[derive(Debug, Clone, Copy)]
pub enum ClipResult {
    /// Every vertex on the outside: nothing survives.
    Outside,
    /// Unchanged (all inside) or trimmed to a single triangle.
    One(Triangle),
    /// Two inside vertices leave a quad, split into two triangles.
    Two(Triangle, Triangle),
}

/// Intersect the segment `start..end` with the plane. Returns the hit point
/// and the parametric position of the hit along the segment. The caller
/// guarantees the segment straddles the plane, so `t` lands in [0, 1].
fn intersect_plane(plane_point: Vec3, normal: Vec3, start: Vec3, end: Vec3) -> (Vec3, f32) {
    let plane_d = -normal.dot(plane_point);
    let ad = start.dot(normal);
    let bd = end.dot(normal);
    let t = (-plane_d - ad) / (bd - ad);
    (start + (end - start) * t, t)
}

fn lerp_tex(a: TexCoord, b: TexCoord, t: f32) -> TexCoord {
    TexCoord {
        u: t * (b.u - a.u) + a.u,
        v: t * (b.v - a.v) + a.v,
        w: t * (b.w - a.w) + a.w,
    }
}

/// Clip `tri` against the plane through `plane_point` with the given normal
/// (normalized here, callers may pass any length). A point is inside when
/// its signed distance is >= 0, so the boundary counts as inside.
pub fn clip_plane(plane_point: Vec3, plane_normal: Vec3, tri: &Triangle) -> ClipResult {
    let normal = plane_normal.normalize();
    let plane_dot = normal.dot(plane_point);
    let dist = |p: Vec3| normal.dot(p) - plane_dot;

    // Partition vertex indices by side, preserving winding-relative order.
    let mut inside = [0usize; 3];
    let mut inside_n = 0;
    let mut outside = [0usize; 3];
    let mut outside_n = 0;

    for i in 0..3 {
        if dist(tri.vs[i]) >= 0.0 {
            inside[inside_n] = i;
            inside_n += 1;
        } else {
            outside[outside_n] = i;
            outside_n += 1;
        }
    }

    match inside_n {
        0 => ClipResult::Outside,

        3 => ClipResult::One(*tri),

        1 => {
            // Keep the inside vertex; walk each edge out to the plane.
            let iv = inside[0];
            let (p1, t1) =
                intersect_plane(plane_point, normal, tri.vs[iv], tri.vs[outside[0]]);
            let (p2, t2) =
                intersect_plane(plane_point, normal, tri.vs[iv], tri.vs[outside[1]]);

            ClipResult::One(Triangle {
                vs: [tri.vs[iv], p1, p2],
                ts: [
                    tri.ts[iv],
                    lerp_tex(tri.ts[iv], tri.ts[outside[0]], t1),
                    lerp_tex(tri.ts[iv], tri.ts[outside[1]], t2),
                ],
                color: tri.color,
            })
        }

        2 => {
            // The surviving quad is both inside vertices plus the two edge
            // intersections, emitted as two triangles sharing the first cut.
            let (iv0, iv1) = (inside[0], inside[1]);
            let ov = outside[0];

            let (p0, t0) = intersect_plane(plane_point, normal, tri.vs[iv0], tri.vs[ov]);
            let cut0 = lerp_tex(tri.ts[iv0], tri.ts[ov], t0);
            let first = Triangle {
                vs: [tri.vs[iv0], tri.vs[iv1], p0],
                ts: [tri.ts[iv0], tri.ts[iv1], cut0],
                color: tri.color,
            };

            let (p1, t1) = intersect_plane(plane_point, normal, tri.vs[iv1], tri.vs[ov]);
            let second = Triangle {
                vs: [tri.vs[iv1], p0, p1],
                ts: [tri.ts[iv1], cut0, lerp_tex(tri.ts[iv1], tri.ts[ov], t1)],
                color: tri.color,
            };

            ClipResult::Two(first, second)
        }

        // A triangle has exactly three vertices; the partition cannot
        // produce any other count.
        _ => unreachable!("clip partition outside 0..=3"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 0.0001;

    fn tri(a: (f32, f32, f32), b: (f32, f32, f32), c: (f32, f32, f32)) -> Triangle {
        Triangle::from_points(
            Vec3::new(a.0, a.1, a.2),
            Vec3::new(b.0, b.1, b.2),
            Vec3::new(c.0, c.1, c.2),
        )
    }

    /// Twice the signed area, projected on the XY plane.
    fn area2(t: &Triangle) -> f32 {
        let [a, b, c] = t.vs;
        ((b.x - a.x) * (c.y - a.y) - (c.x - a.x) * (b.y - a.y)).abs()
    }

    #[test]
    fn test_all_inside_passes_through() {
        let t = tri((0.0, 1.0, 0.0), (1.0, 2.0, 0.0), (-1.0, 3.0, 0.0));
        match clip_plane(Vec3::ZERO, Vec3::UP, &t) {
            ClipResult::One(out) => {
                assert_eq!(out.vs[0], t.vs[0]);
                assert_eq!(out.vs[1], t.vs[1]);
                assert_eq!(out.vs[2], t.vs[2]);
            }
            other => panic!("expected One, got {:?}", other),
        }
    }

    #[test]
    fn test_all_outside_is_discarded() {
        let t = tri((0.0, -1.0, 0.0), (1.0, -2.0, 0.0), (-1.0, -3.0, 0.0));
        assert!(matches!(
            clip_plane(Vec3::ZERO, Vec3::UP, &t),
            ClipResult::Outside
        ));
    }

    #[test]
    fn test_one_inside_trims_to_single_triangle() {
        let t = tri((0.0, 1.0, 0.0), (-1.0, -1.0, 0.0), (1.0, -1.0, 0.0));
        match clip_plane(Vec3::ZERO, Vec3::UP, &t) {
            ClipResult::One(out) => {
                // Inside vertex kept, both cuts land on the plane.
                assert_eq!(out.vs[0], t.vs[0]);
                assert!(out.vs[1].y.abs() < EPS);
                assert!(out.vs[2].y.abs() < EPS);
            }
            other => panic!("expected One, got {:?}", other),
        }
    }

    #[test]
    fn test_two_inside_splits_into_quad() {
        // y = -1, 0, 1: boundary vertex counts as inside, so two are in.
        let t = tri((0.0, -1.0, 0.0), (1.0, 0.0, 0.0), (0.0, 1.0, 0.0));
        match clip_plane(Vec3::ZERO, Vec3::UP, &t) {
            ClipResult::Two(a, b) => {
                for v in a.vs.iter().chain(b.vs.iter()) {
                    assert!(v.y >= -EPS, "emitted vertex below the plane: {:?}", v);
                }
                // Union of the outputs covers exactly the inside portion,
                // the polygon (0,0), (1,0), (0,1).
                let inside = area2(&tri((0.0, 0.0, 0.0), (1.0, 0.0, 0.0), (0.0, 1.0, 0.0)));
                assert!((area2(&a) + area2(&b) - inside).abs() < EPS);
            }
            other => panic!("expected Two, got {:?}", other),
        }
    }

    #[test]
    fn test_unnormalized_plane_normal_is_accepted() {
        let t = tri((0.0, 1.0, 0.0), (-1.0, -1.0, 0.0), (1.0, -1.0, 0.0));
        let a = clip_plane(Vec3::ZERO, Vec3::UP, &t);
        let b = clip_plane(Vec3::ZERO, Vec3::new(0.0, 25.0, 0.0), &t);
        match (a, b) {
            (ClipResult::One(x), ClipResult::One(y)) => {
                for i in 0..3 {
                    assert!((x.vs[i].x - y.vs[i].x).abs() < EPS);
                    assert!((x.vs[i].y - y.vs[i].y).abs() < EPS);
                }
            }
            other => panic!("expected matching One results, got {:?}", other),
        }
    }

    #[test]
    fn test_texture_coordinates_follow_the_cut() {
        let mut t = tri((0.0, 1.0, 0.0), (0.0, -1.0, 0.0), (2.0, -1.0, 0.0));
        t.ts = [
            TexCoord::new(0.0, 0.0),
            TexCoord::new(0.0, 1.0),
            TexCoord::new(1.0, 1.0),
        ];
        match clip_plane(Vec3::ZERO, Vec3::UP, &t) {
            ClipResult::One(out) => {
                // The first cut bisects the edge (0,1)-(0,-1), so its uv is
                // halfway between the endpoint attributes.
                assert!((out.ts[1].u - 0.0).abs() < EPS);
                assert!((out.ts[1].v - 0.5).abs() < EPS);
            }
            other => panic!("expected One, got {:?}", other),
        }
    }
}
