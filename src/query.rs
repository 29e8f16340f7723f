//! Ray picking against the sail.

use crate::cloth::ClothMesh;
use crate::float::Float;
use crate::vec::Vec3;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Ray<F: Float> {
    pub origin: Vec3<F>,
    pub direction: Vec3<F>,
}

impl<F: Float> Ray<F> {
    /// Ray from `origin` along `direction`, normalized.
    pub fn new(origin: Vec3<F>, direction: Vec3<F>) -> Self {
        Ray { origin, direction: direction.normalize() }
    }

    pub fn at(&self, t: F) -> Vec3<F> {
        self.origin + self.direction.scale(t)
    }

    /// Distance along the ray to triangle `(a, b, c)`, either side facing.
    pub fn intersect_triangle(&self, a: Vec3<F>, b: Vec3<F>, c: Vec3<F>) -> Option<F> {
        let eps = F::from_f32(1e-9);
        let e1 = b - a;
        let e2 = c - a;
        let p = self.direction.cross(e2);
        let det = e1.dot(p);
        if det.abs() < eps {
            return None;
        }
        let inv = F::one() / det;
        let s = self.origin - a;
        let u = s.dot(p) * inv;
        if u < F::zero() || u > F::one() {
            return None;
        }
        let q = s.cross(e1);
        let v = self.direction.dot(q) * inv;
        if v < F::zero() || u + v > F::one() {
            return None;
        }
        let t = e2.dot(q) * inv;
        if t > eps { Some(t) } else { None }
    }
}

/// The sail point a ray hits first.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pick<F: Float> {
    /// Vertex of the hit face closest to the hit point.
    pub particle: usize,
    pub face: usize,
    pub distance: F,
}

/// Find the nearest face of `cloth` hit by `ray`.
pub fn pick<F: Float>(cloth: &ClothMesh<F>, ray: &Ray<F>) -> Option<Pick<F>> {
    let particles = cloth.particles();
    let mut best: Option<Pick<F>> = None;
    for (i, face) in cloth.faces().iter().enumerate() {
        let hit = ray.intersect_triangle(
            particles[face.a].position,
            particles[face.b].position,
            particles[face.c].position,
        );
        if let Some(t) = hit {
            if best.map_or(true, |b| t < b.distance) {
                let point = ray.at(t);
                let particle = [face.b, face.c].into_iter().fold(face.a, |near, k| {
                    if particles[k].position.distance_sq(point) < particles[near].position.distance_sq(point) {
                        k
                    } else {
                        near
                    }
                });
                best = Some(Pick { particle, face: i, distance: t });
            }
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hits_triangle_from_either_side() {
        let (a, b, c) = (
            Vec3::new(0.0f64, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        );
        let front = Ray::new(Vec3::new(0.2, 0.2, 5.0), Vec3::new(0.0, 0.0, -1.0));
        let back = Ray::new(Vec3::new(0.2, 0.2, -5.0), Vec3::new(0.0, 0.0, 1.0));
        assert!((front.intersect_triangle(a, b, c).unwrap_or(0.0) - 5.0).abs() < 1e-12);
        assert!(back.intersect_triangle(a, b, c).is_some());
    }

    #[test]
    fn misses_outside_and_behind() {
        let (a, b, c) = (
            Vec3::new(0.0f64, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        );
        let outside = Ray::new(Vec3::new(0.9, 0.9, 5.0), Vec3::new(0.0, 0.0, -1.0));
        let behind = Ray::new(Vec3::new(0.2, 0.2, 5.0), Vec3::new(0.0, 0.0, 1.0));
        assert!(outside.intersect_triangle(a, b, c).is_none());
        assert!(behind.intersect_triangle(a, b, c).is_none());
    }
}
