//! Ambient/point/directional lights and Phong-with-soft-shadows direct
//! illumination.

use crate::camera::Camera;
use crate::sphere::Shape;
use crate::vec3::{Vec3f, Vec3u8};
use crate::{EPS, EPS_CMP};
use log::trace;

#[derive(Clone, Copy, Debug)]
pub enum Light {
    Ambient { intensity: f32 },
    Point { pos: Vec3f, intensity: f32 },
    Directional { dir: Vec3f, intensity: f32 },
}

impl Light {
    pub fn ambient(intensity: f32) -> Self {
        Light::Ambient { intensity }
    }

    pub fn point(pos: Vec3f, intensity: f32) -> Self {
        Light::Point { pos, intensity }
    }

    pub fn directional(dir: Vec3f, intensity: f32) -> Self {
        Light::Directional {
            dir: dir.unit(),
            intensity,
        }
    }

    pub fn intensity(&self) -> f32 {
        match *self {
            Light::Ambient { intensity } => intensity,
            Light::Point { intensity, .. } => intensity,
            Light::Directional { intensity, .. } => intensity,
        }
    }

    fn with_intensity(&self, intensity: f32) -> Self {
        match *self {
            Light::Ambient { .. } => Light::Ambient { intensity },
            Light::Point { pos, .. } => Light::Point { pos, intensity },
            Light::Directional { dir, .. } => Light::Directional { dir, intensity },
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct LightSet {
    lights: Vec<Light>,
}

impl LightSet {
    pub fn new() -> Self {
        Self { lights: Vec::new() }
    }

    pub fn add(&mut self, light: Light) -> &mut Self {
        self.lights.push(light);
        self
    }

    /// Scales every light's intensity so the sum equals 1. Left unchanged
    /// if the total is negligible (spec.md I4).
    pub fn normalize(&mut self) {
        let total: f32 = self.lights.iter().map(Light::intensity).sum();
        if total.abs() < 1e-3 {
            trace!("light total intensity {total} below threshold, skipping normalization");
            return;
        }
        for light in &mut self.lights {
            *light = light.with_intensity(light.intensity() / total);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Light> {
        self.lights.iter()
    }

    /// Lambertian diffuse + Phong specular at a surface point, including the
    /// soft-shadow heuristic of spec.md §4.4.
    pub fn color_at(&self, objects: &[Shape], hit_idx: usize, p: Vec3f, camera: &Camera) -> Vec3u8 {
        let hit_shape = &objects[hit_idx];
        let material = hit_shape.material();
        let n = hit_shape.normal_at(p);
        let v = (camera.center - p).unit();

        let mut diffuse = 0.0f32;
        let mut specular = 0.0f32;

        for light in &self.lights {
            if let Light::Ambient { intensity } = light {
                diffuse += intensity;
                continue;
            }

            let shadow = shadow_factor(light, objects, hit_idx, p, n);
            if shadow < EPS_CMP {
                continue;
            }

            let light_dir = match *light {
                Light::Point { pos, .. } => (pos - p).unit(),
                Light::Directional { dir, .. } => dir,
                Light::Ambient { .. } => unreachable!(),
            };

            let n_dot_l = n.dot(&light_dir);
            if n_dot_l > 0.0 {
                diffuse += light.intensity() * n_dot_l.max(0.0) * shadow;

                if material.specular > 0.0 {
                    let r = light_dir.reflect_about(&n).unit();
                    let spec_term = r.dot(&v).max(0.0).powf(material.specular);
                    specular += light.intensity() * spec_term * shadow;
                }
            }
        }

        diffuse = diffuse.min(1.0);
        specular = specular.min(1.0);

        let color = Vec3f::from(material.color);
        let out = Vec3f::new(
            (color.x * diffuse + 255.0 * specular).min(255.0),
            (color.y * diffuse + 255.0 * specular).min(255.0),
            (color.z * diffuse + 255.0 * specular).min(255.0),
        );
        Vec3u8::from(out)
    }
}

/// Soft-shadow heuristic: point lights dim proportionally to how close the
/// occluder is to the light and how grazing the surface is; directional
/// lights fall back to the pure geometric term when unoccluded.
fn shadow_factor(light: &Light, objects: &[Shape], self_idx: usize, p: Vec3f, n: Vec3f) -> f32 {
    match *light {
        Light::Ambient { .. } => 1.0,
        Light::Point { pos, .. } => {
            let to_light = pos - p;
            let dist_to_light = to_light.norm();
            let light_dir = to_light.unit();

            let hemisphere_n = if n.dot(&light_dir) > 0.0 { n } else { -n };
            let origin = p + hemisphere_n * (4.0 * EPS);

            let mut nearest_t = f32::INFINITY;
            for (idx, obj) in objects.iter().enumerate() {
                if idx == self_idx {
                    continue;
                }
                let ray = crate::ray::Ray::from_dir(origin, light_dir);
                let hit = obj.intersects(&ray);
                if hit.is_hit && hit.t > 0.0 && hit.t < dist_to_light && hit.t < nearest_t {
                    nearest_t = hit.t;
                }
            }

            if nearest_t.is_infinite() {
                1.0
            } else {
                (n.dot(&light_dir) * (nearest_t / dist_to_light)).clamp(0.0, 1.0)
            }
        }
        Light::Directional { dir, .. } => {
            let shadow_dir = -dir;
            let hemisphere_n = if n.dot(&shadow_dir) > 0.0 { n } else { -n };
            let origin = p + hemisphere_n * (4.0 * EPS);

            let mut occluded_and_facing_away = false;
            for (idx, obj) in objects.iter().enumerate() {
                if idx == self_idx {
                    continue;
                }
                let ray = crate::ray::Ray::from_dir(origin, shadow_dir);
                let hit = obj.intersects(&ray);
                if hit.is_hit && hit.t > 0.0 {
                    let other_n = obj.normal_at(hit.where_);
                    let faces_away = other_n.dot(&shadow_dir) >= 0.0 && n.dot(&shadow_dir) >= 0.0;
                    if !faces_away {
                        occluded_and_facing_away = true;
                    }
                }
            }

            if !occluded_and_facing_away {
                1.0
            } else {
                n.dot(&dir).clamp(0.0, 1.0)
            }
        }
    }
}
