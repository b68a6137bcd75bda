//! Hard-coded demo scenes, built the way the teacher's own render tests
//! assemble a scene by hand (`src/raytracer/render.rs::tests::example_scene`
//! in the example pack) rather than from a scene-description file — this
//! spec has no file format for scenes (spec.md Non-goals).

use crate::camera::Camera;
use crate::light::{Light, LightSet};
use crate::mat3::Mat3;
use crate::material::Material;
use crate::sphere::Sphere;
use crate::tracer::RayTracer;
use crate::vec3::{Vec3f, Vec3u8};

fn default_camera() -> Camera {
    Camera::new(400.0, 90.0, 70.0, Vec3f::new(0.0, 0.0, -300.0), Mat3::identity())
}

/// A single matte red sphere under ambient-only light — the simplest
/// scene, useful as a smoke test of the whole pipeline.
pub fn single_sphere() -> RayTracer {
    let mut lights = LightSet::new();
    lights.add(Light::ambient(1.0));

    let mut tracer = RayTracer::new(default_camera(), lights);
    tracer.add_object(Sphere::new(
        Vec3f::new(0.0, 0.0, 2000.0),
        500.0,
        Material::new(Vec3u8::new(200, 40, 40), 10.0, 0.0, 0.0, 1.0, 0.0),
    ));
    tracer
}

/// Three spheres of varying finish (matte, mirror, glass) lit by one point
/// light and one directional fill light, reproducing spec.md §8's shadow
/// and reflection/refraction scenarios in a single frame.
pub fn showcase() -> RayTracer {
    let mut lights = LightSet::new();
    lights.add(Light::ambient(0.2));
    lights.add(Light::point(Vec3f::new(-800.0, -1200.0, 500.0), 0.6));
    lights.add(Light::directional(Vec3f::new(0.3, -0.5, 0.8), 0.2));

    let mut tracer = RayTracer::new(default_camera(), lights);

    // Matte sphere, back-left.
    tracer.add_object(Sphere::new(
        Vec3f::new(-700.0, 200.0, 2600.0),
        450.0,
        Material::new(Vec3u8::new(180, 60, 60), 10.0, 0.0, 0.0, 1.0, 0.0),
    ));

    // Mirror sphere, center.
    tracer.add_object(Sphere::new(
        Vec3f::new(0.0, 0.0, 2000.0),
        500.0,
        Material::new(Vec3u8::new(230, 230, 230), 120.0, 0.85, 0.0, 1.0, 0.0),
    ));

    // Glass sphere, front-right, slightly overlapping the mirror sphere's
    // shadow to exercise nested-IOR lookups.
    tracer.add_object(Sphere::new(
        Vec3f::new(750.0, -100.0, 1700.0),
        350.0,
        Material::new(Vec3u8::new(240, 250, 255), 120.0, 0.05, 0.9, 1.5, 0.15),
    ));

    // Large ground-plane-like sphere, far below, catching shadows from the
    // three spheres above.
    tracer.add_object(Sphere::new(
        Vec3f::new(0.0, 100_500.0, 2500.0),
        100_000.0,
        Material::new(Vec3u8::new(90, 110, 90), 5.0, 0.0, 0.0, 1.0, 0.0),
    ));

    tracer
}
