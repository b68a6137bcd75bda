//! Analytic primitives and their intersection with rays.
//!
//! Per the redesign called for in spec.md §9 ("Polymorphism over objects"),
//! shapes are a tagged enum dispatched by `match` rather than a trait object
//! hierarchy. `Sphere` is the only variant today; adding a second primitive
//! is a new `Shape` arm plus a new match arm in each of
//! `normal_at`/`is_inside`/`intersects`, not a vtable migration.

use crate::material::Material;
use crate::ray::Ray;
use crate::vec3::Vec3f;

#[derive(Clone, Copy, Debug)]
pub struct Sphere {
    pub center: Vec3f,
    pub radius: f32,
    pub material: Material,
}

impl Sphere {
    pub const fn new(center: Vec3f, radius: f32, material: Material) -> Self {
        Self {
            center,
            radius,
            material,
        }
    }

    pub fn normal_at(&self, p: Vec3f) -> Vec3f {
        (p - self.center).unit()
    }

    pub fn is_inside(&self, p: Vec3f) -> bool {
        (p - self.center).norm_sq() < self.radius * self.radius
    }

    /// Solves `|o + t·d − c|² = r²` and returns the nearest strictly
    /// positive root. A tangent hit (`Δ = 0`) is deliberately *not* a hit
    /// (spec.md §4.2, Open Question 2: kept as strict `Δ > 0`).
    pub fn intersects(&self, ray: &Ray) -> HitRecord {
        let oc = ray.origin - self.center;
        let a = ray.dir.dot(&ray.dir);
        let b = 2.0 * ray.dir.dot(&oc);
        let c = oc.dot(&oc) - self.radius * self.radius;

        let discriminant = b * b - 4.0 * a * c;
        if discriminant <= 0.0 {
            return HitRecord::miss();
        }

        let sqrt_disc = discriminant.sqrt();
        let t1 = (-b - sqrt_disc) / (2.0 * a);
        let t2 = (-b + sqrt_disc) / (2.0 * a);

        let t = if t1 > 0.0 {
            t1
        } else if t2 > 0.0 {
            t2
        } else {
            return HitRecord::miss();
        };

        HitRecord {
            where_: ray.at(t),
            is_hit: true,
            t,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub enum Shape {
    Sphere(Sphere),
}

impl Shape {
    pub fn material(&self) -> &Material {
        match self {
            Shape::Sphere(s) => &s.material,
        }
    }

    pub fn normal_at(&self, p: Vec3f) -> Vec3f {
        match self {
            Shape::Sphere(s) => s.normal_at(p),
        }
    }

    pub fn is_inside(&self, p: Vec3f) -> bool {
        match self {
            Shape::Sphere(s) => s.is_inside(p),
        }
    }

    pub fn intersects(&self, ray: &Ray) -> HitRecord {
        match self {
            Shape::Sphere(s) => s.intersects(ray),
        }
    }
}

impl From<Sphere> for Shape {
    fn from(s: Sphere) -> Self {
        Shape::Sphere(s)
    }
}

#[derive(Clone, Copy, Debug)]
pub struct HitRecord {
    pub where_: Vec3f,
    pub is_hit: bool,
    pub t: f32,
}

impl HitRecord {
    pub fn miss() -> Self {
        Self {
            where_: Vec3f::new(0.0, 0.0, 0.0),
            is_hit: false,
            t: f32::INFINITY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_sphere_at_origin() -> Sphere {
        Sphere::new(Vec3f::new(0.0, 0.0, 0.0), 1.0, Material::default())
    }

    #[test]
    fn ray_through_center_hits_near_surface() {
        let sphere = unit_sphere_at_origin();
        let ray = Ray::new(Vec3f::new(0.0, 0.0, -5.0), Vec3f::new(0.0, 0.0, 0.0));
        let hit = sphere.intersects(&ray);
        assert!(hit.is_hit);
        assert!((hit.t - 4.0).abs() < 1e-4);
    }

    #[test]
    fn tangent_ray_is_not_a_hit() {
        let sphere = unit_sphere_at_origin();
        // Ray travels parallel to the sphere, grazing x=1 exactly.
        let ray = Ray::from_dir(Vec3f::new(1.0, 0.0, -5.0), Vec3f::new(0.0, 0.0, 1.0));
        let hit = sphere.intersects(&ray);
        assert!(!hit.is_hit);
    }

    #[test]
    fn ray_originating_inside_returns_exit_root() {
        let sphere = unit_sphere_at_origin();
        let ray = Ray::from_dir(Vec3f::new(0.0, 0.0, 0.0), Vec3f::new(0.0, 0.0, 1.0));
        let hit = sphere.intersects(&ray);
        assert!(hit.is_hit);
        assert!((hit.t - 1.0).abs() < 1e-4);
    }

    #[test]
    fn ray_missing_sphere_is_no_hit() {
        let sphere = unit_sphere_at_origin();
        let ray = Ray::from_dir(Vec3f::new(5.0, 5.0, 0.0), Vec3f::new(0.0, 0.0, 1.0));
        assert!(!sphere.intersects(&ray).is_hit);
    }

    #[test]
    fn normal_points_outward_and_is_unit() {
        let sphere = unit_sphere_at_origin();
        let n = sphere.normal_at(Vec3f::new(1.0, 0.0, 0.0));
        assert!((n.norm() - 1.0).abs() < 1e-5);
        assert!((n.x - 1.0).abs() < 1e-5);
    }
}
