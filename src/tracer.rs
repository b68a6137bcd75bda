//! Top-level recursive ray tracer: per-pixel primary ray generation, nearest
//! hit resolution, and the recursive reflection/refraction/Fresnel/TIR
//! shading kernel (spec.md §4.5).

use crate::camera::Camera;
use crate::image_buf::Image;
use crate::light::LightSet;
use crate::ray::Ray;
use crate::sphere::Shape;
use crate::vec3::{Vec3f, Vec3u8};
use crate::EPS;
use indicatif::{ParallelProgressIterator, ProgressState, ProgressStyle};
use log::debug;
use rayon::prelude::*;
use std::fmt::Write as _;

/// Shading-kernel transient result for one `trace_ray` invocation.
#[derive(Clone, Copy, Debug)]
pub struct TraceRecord {
    pub color: Vec3u8,
    pub hit: bool,
    pub t: f32,
    pub hit_point: Vec3f,
    pub normal: Vec3f,
    pub obj: Option<usize>,
}

impl TraceRecord {
    fn background() -> Self {
        Self {
            color: Vec3u8::new(0, 0, 0),
            hit: false,
            t: f32::INFINITY,
            hit_point: Vec3f::new(0.0, 0.0, 0.0),
            normal: Vec3f::new(0.0, 0.0, 0.0),
            obj: None,
        }
    }
}

pub struct RayTracer {
    pub camera: Camera,
    pub lights: LightSet,
    pub objects: Vec<Shape>,
    image: Image,
}

impl RayTracer {
    pub fn new(camera: Camera, lights: LightSet) -> Self {
        let image = Image::new(camera.plane_width.max(0) as u32, camera.plane_height.max(0) as u32);
        Self {
            camera,
            lights,
            objects: Vec::new(),
            image,
        }
    }

    pub fn add_object(&mut self, shape: impl Into<Shape>) {
        self.objects.push(shape.into());
    }

    pub fn image(&self) -> &Image {
        &self.image
    }

    /// Normalizes the light set, then fills in every image-plane pixel by
    /// casting a primary ray through it and recursively resolving colour up
    /// to `max_depth` bounces. Independent of pixel evaluation order
    /// (spec.md §5/§8 property 10): each pixel is a pure function of the
    /// (read-only) scene, so the outer loop is trivially parallelizable.
    pub fn trace(&mut self, max_depth: usize) {
        self.lights.normalize();

        let width = self.camera.plane_width;
        let height = self.camera.plane_height;
        debug!("tracing {width}x{height} image at depth {max_depth}");

        let camera = self.camera;
        let lights = self.lights.clone();
        let objects = self.objects.clone();

        let total_pixels = (width.max(0) as u64) * (height.max(0) as u64);
        let colors: Vec<((u32, u32), Vec3u8)> = (-width / 2..width / 2)
            .into_par_iter()
            .flat_map_iter(|x| (-height / 2..height / 2).map(move |y| (x, y)))
            .progress_with_style(progress_bar_style())
            .progress_count(total_pixels)
            .map(|(x, y)| {
                let world_point = camera.unproject(x as f32, y as f32);
                let ray = Ray::new(camera.center, world_point);
                let record = trace_ray(&ray, max_depth, 1.0, &objects, &lights, &camera);

                let col = map_range(x, -width / 2, width / 2, 0, width - 1);
                let row = map_range(y, -height / 2, height / 2, 0, height - 1);
                ((col as u32, row as u32), record.color)
            })
            .collect();

        for ((col, row), color) in colors {
            self.image.set(col, row, color);
        }
    }
}

fn map_range(x: i32, in_lo: i32, in_hi: i32, out_lo: i32, out_hi: i32) -> i32 {
    if in_hi == in_lo {
        return out_lo;
    }
    out_lo + (x - in_lo) * (out_hi - out_lo) / (in_hi - in_lo)
}

fn nearest_hit(ray: &Ray, objects: &[Shape]) -> TraceRecord {
    let mut best = TraceRecord::background();

    for (idx, obj) in objects.iter().enumerate() {
        let hit = obj.intersects(ray);
        if !hit.is_hit || hit.t <= 0.0 {
            continue;
        }
        if hit.t < best.t {
            best.t = hit.t;
            best.hit = true;
            best.hit_point = hit.where_;
            best.obj = Some(idx);
            best.normal = obj.normal_at(hit.where_);
        }
    }

    best
}

/// Samples a probe point slightly off `outward_normal` and returns the
/// index of refraction of whichever other sphere contains it — first match
/// wins (SPEC_FULL.md §9, Open Question 3).
fn surrounding_ior(p: Vec3f, self_idx: usize, outward_normal: Vec3f, objects: &[Shape]) -> f32 {
    let probe = p + outward_normal * (4.0 * EPS);
    for (idx, obj) in objects.iter().enumerate() {
        if idx == self_idx {
            continue;
        }
        if obj.is_inside(probe) {
            return obj.material().refractive_index;
        }
    }
    1.0
}

fn trace_ray(
    ray: &Ray,
    depth: usize,
    ior_current: f32,
    objects: &[Shape],
    lights: &LightSet,
    camera: &Camera,
) -> TraceRecord {
    let mut ret = nearest_hit(ray, objects);
    let Some(obj_idx) = ret.obj else {
        return ret;
    };

    let material = *objects[obj_idx].material();
    let trans = material.transparency.clamp(0.0, 1.0);

    // Highly transparent surfaces suppress direct shading so glass doesn't
    // paint itself (spec.md §4.5 step 2).
    let direct = if trans > 0.5 {
        Vec3u8::new(0, 0, 0)
    } else {
        lights.color_at(objects, obj_idx, ret.hit_point, camera)
    };

    let refl = material.reflective.clamp(0.0, 1.0);

    if depth <= 1 || (refl < EPS && trans < EPS) {
        ret.color = direct;
        return ret;
    }

    let n = ret.normal;
    let i = ray.dir;

    let entering = n.dot(&i) < 0.0;
    let n_oriented = if entering { n } else { -n };

    let (n1, n2) = if entering {
        (surrounding_ior(ret.hit_point, obj_idx, n, objects), material.refractive_index)
    } else {
        (ior_current, surrounding_ior(ret.hit_point, obj_idx, -n, objects))
    };

    let cos_i = -n_oriented.dot(&i);

    // Schlick's approximation of Fresnel reflectance.
    let r0 = ((n1 - n2) / (n1 + n2)).powi(2);
    let fresnel = r0 + (1.0 - r0) * (1.0 - cos_i).powi(5);

    let reflect_dir = i.reflect_about(&n_oriented).unit();
    let reflect_hemisphere = if n_oriented.dot(&reflect_dir) > 0.0 {
        n_oriented
    } else {
        -n_oriented
    };
    let reflect_origin = ret.hit_point + reflect_hemisphere * (4.0 * EPS);
    let reflect_ray = Ray::from_dir(reflect_origin, reflect_dir);
    let reflect_record = trace_ray(&reflect_ray, depth - 1, n1, objects, lights, camera);

    let eta = n1 / n2;
    let k = 1.0 - eta * eta * (1.0 - cos_i * cos_i);
    let tir = k < 0.0;

    let mut trans_weight = trans * (1.0 - fresnel);
    let mut refl_weight = refl + fresnel * trans;

    let refract_color = if tir {
        trans_weight = 0.0;
        refl_weight = (refl_weight + trans).min(1.0);
        Vec3u8::new(0, 0, 0)
    } else {
        let cos_t = k.max(0.0).sqrt();
        let refract_dir = (i * eta + n_oriented * (eta * cos_i - cos_t)).unit();
        let refract_origin = ret.hit_point + refract_dir * (4.0 * EPS);
        let refract_ray = Ray::from_dir(refract_origin, refract_dir);
        let refract_record = trace_ray(&refract_ray, depth - 1, n2, objects, lights, camera);

        let tint_w = material.tint * trans;
        let curr = Vec3f::from(material.color);
        let refr = Vec3f::from(refract_record.color);
        let apply_tint = |refr_ch: f32, curr_ch: f32| -> u8 {
            let w = (1.0 - tint_w) + tint_w * (curr_ch / 255.0);
            (refr_ch * w).min(255.0) as u8
        };
        Vec3u8::new(
            apply_tint(refr.x, curr.x),
            apply_tint(refr.y, curr.y),
            apply_tint(refr.z, curr.z),
        )
    };

    let w_direct = 1.0 - (refl_weight + trans_weight).min(1.0);

    let direct_f = Vec3f::from(direct);
    let reflect_f = Vec3f::from(reflect_record.color);
    let refract_f = Vec3f::from(refract_color);

    let out = direct_f * w_direct + reflect_f * refl_weight + refract_f * trans_weight;
    ret.color = Vec3u8::from(out);
    ret
}

fn progress_bar_style() -> ProgressStyle {
    let text = [
        "[{bar:48.cyan/blue}] {percent}% {spinner:.green}",
        "Elapsed Time     : {elapsed_precise}",
        "ETA              : {eta}",
        "Tracing Progress : {pos}/{len} pixels",
        "Tracing Speed    : {per_sec}",
    ]
    .join("\n");

    ProgressStyle::with_template(&text)
        .unwrap()
        .with_key("per_sec", |state: &ProgressState, w: &mut dyn Write| {
            _ = write!(w, "{:.0} pixels/sec", state.per_sec());
        })
        .progress_chars("#>-")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::light::Light;
    use crate::mat3::Mat3;
    use crate::material::Material;
    use crate::sphere::Sphere;
    use crate::vec3::Vec3u8;

    fn test_camera() -> Camera {
        Camera::new(400.0, 100.0, 80.0, Vec3f::new(0.0, 0.0, -200.0), Mat3::identity())
    }

    /// S1 — single red sphere, ambient-only light: the silhouette is
    /// exactly red after normalization; outside it, black.
    #[test]
    fn s1_single_sphere_ambient_only() {
        let mut lights = LightSet::new();
        lights.add(Light::ambient(1.0));
        lights.normalize();

        let material = Material::new(Vec3u8::new(255, 0, 0), 0.0, 0.0, 0.0, 1.0, 0.0);
        let sphere = Sphere::new(Vec3f::new(0.0, 0.0, 2000.0), 500.0, material);
        let objects = vec![Shape::from(sphere)];
        let camera = test_camera();

        let center_ray = Ray::new(camera.center, camera.unproject(0.0, 0.0));
        let hit = trace_ray(&center_ray, 3, 1.0, &objects, &lights, &camera);
        assert!(hit.hit);
        assert_eq!(hit.color, Vec3u8::new(255, 0, 0));

        let far_ray = Ray::new(camera.center, camera.unproject(1000.0, 1000.0));
        let miss = trace_ray(&far_ray, 3, 1.0, &objects, &lights, &camera);
        assert!(!miss.hit);
        assert_eq!(miss.color, Vec3u8::new(0, 0, 0));
    }

    /// S2 — an opaque occluder between a lit sphere and a point light
    /// darkens the shadowed region relative to an unshadowed point.
    #[test]
    fn s2_shadow_from_occluder() {
        let mut lights = LightSet::new();
        lights.add(Light::point(Vec3f::new(0.0, -1000.0, 1500.0), 1.0));
        lights.normalize();

        let lit_material = Material::new(Vec3u8::new(255, 255, 255), 10.0, 0.0, 0.0, 1.0, 0.0);
        let sphere = Sphere::new(Vec3f::new(0.0, 0.0, 2000.0), 500.0, lit_material);
        let occluder = Sphere::new(Vec3f::new(0.0, -400.0, 1500.0), 150.0, lit_material);
        let objects = vec![Shape::from(sphere), Shape::from(occluder)];

        // Point on the sphere nearest the occluder/light path vs. the point
        // directly facing the camera (unshadowed).
        let shadowed_point = Vec3f::new(0.0, -400.0, 1500.5);
        let lit_point = Vec3f::new(0.0, 0.0, 1500.0);

        let shadowed_color = lights.color_at(&objects, 0, shadowed_point, &test_camera());
        let lit_color = lights.color_at(&objects, 0, lit_point, &test_camera());

        assert!(Vec3f::from(shadowed_color).norm() <= Vec3f::from(lit_color).norm());
    }

    /// S5 — at normal incidence (cos_i ~ 1) the Schlick term is tiny, so a
    /// ray through the center of a glass sphere should emerge carrying
    /// mostly the transmitted color of whatever is behind it, not be
    /// swallowed by reflection. A sign error in `cos_i` or a swapped
    /// `n1`/`n2` would instead drive `fresnel` toward 1 and starve the
    /// refracted contribution, which this would catch.
    #[test]
    fn s5_low_fresnel_at_normal_incidence_favors_refraction() {
        let mut lights = LightSet::new();
        lights.add(Light::ambient(1.0));
        lights.normalize();

        let glass = Material::new(Vec3u8::new(245, 245, 250), 0.0, 0.0, 1.0, 1.5, 0.0);
        let glass_sphere = Sphere::new(Vec3f::new(0.0, 0.0, 100.0), 20.0, glass);

        let marker = Material::new(Vec3u8::new(0, 220, 0), 0.0, 0.0, 0.0, 1.0, 0.0);
        let marker_sphere = Sphere::new(Vec3f::new(0.0, 0.0, 400.0), 60.0, marker);

        let objects = vec![Shape::from(glass_sphere), Shape::from(marker_sphere)];
        let camera = test_camera();

        // Straight through the sphere's center: both the entry and exit
        // surfaces are hit head-on.
        let ray = Ray::from_dir(Vec3f::new(0.0, 0.0, -50.0), Vec3f::new(0.0, 0.0, 1.0));
        let record = trace_ray(&ray, 4, 1.0, &objects, &lights, &camera);

        assert!(record.hit);
        assert!(
            record.color.y > record.color.x && record.color.y > record.color.z,
            "expected transmitted green to dominate at normal incidence, got {:?}",
            record.color
        );
        assert!(
            record.color.y > 100,
            "expected most of the energy to transmit through, got {:?}",
            record.color
        );
    }

    /// S4 — exiting a glass sphere at an angle past the critical angle
    /// (~41.8 degrees for n=1.5 -> 1.0) triggers total internal reflection:
    /// all transmission weight must be redirected into the reflected ray.
    /// A marker sphere sits only along the reflection direction, so the
    /// traced color can only come from the reflected path, not a refracted
    /// one, if TIR is actually firing.
    #[test]
    fn s4_tir_routes_energy_to_reflection() {
        let mut lights = LightSet::new();
        lights.add(Light::ambient(1.0));
        lights.normalize();

        let glass = Material::new(Vec3u8::new(240, 250, 255), 0.0, 0.0, 1.0, 1.5, 0.0);
        let glass_sphere = Sphere::new(Vec3f::new(0.0, 0.0, 0.0), 10.0, glass);

        // cos_i = i.x = 0.342 (~70 degrees from the outward normal at the
        // exit point), past the ~41.8 degree critical angle for 1.5 -> 1.0.
        let i = Vec3f::new(0.342, 0.9397, 0.0);
        let hit_point = Vec3f::new(10.0, 0.0, 0.0);
        let origin = hit_point - i * 5.0;

        // Only reachable via the reflection direction, never refraction:
        // reflecting about a normal along +x flips the y/z components.
        let reflect_dir = Vec3f::new(i.x, -i.y, -i.z);
        let marker = Material::new(Vec3u8::new(10, 200, 10), 0.0, 0.0, 0.0, 1.0, 0.0);
        let marker_sphere = Sphere::new(hit_point + reflect_dir * 100.0, 20.0, marker);

        let objects = vec![Shape::from(glass_sphere), Shape::from(marker_sphere)];
        let camera = test_camera();

        let ray = Ray::from_dir(origin, i);
        let record = trace_ray(&ray, 3, 1.5, &objects, &lights, &camera);

        assert!(record.hit);
        assert_eq!(record.color, Vec3u8::new(10, 200, 10));
    }

    #[test]
    fn determinism_same_scene_same_image() {
        let material = Material::new(Vec3u8::new(100, 150, 200), 10.0, 0.1, 0.0, 1.0, 0.0);
        let sphere = Sphere::new(Vec3f::new(0.0, 0.0, 2000.0), 500.0, material);

        let build = || {
            let mut lights = LightSet::new();
            lights.add(Light::ambient(0.3));
            lights.add(Light::directional(Vec3f::new(-0.2, -0.4, 0.6), 0.7));
            let mut tracer = RayTracer::new(test_camera(), lights);
            tracer.add_object(sphere);
            tracer.trace(3);
            tracer
        };

        let a = build();
        let b = build();

        for row in 0..a.image().height() {
            for col in 0..a.image().width() {
                assert_eq!(a.image().get(col, row), b.image().get(col, row));
            }
        }
    }
}
