//! Surface material: diffuse colour plus the weights the shading kernel
//! blends direct, reflected and refracted light with.

use crate::vec3::Vec3u8;

#[derive(Clone, Copy, Debug)]
pub struct Material {
    pub color: Vec3u8,
    /// Phong specular exponent; 10 ~ matte, 100 ~ shiny.
    pub specular: f32,
    /// `[0, 1]`.
    pub reflective: f32,
    /// `[0, 1]`.
    pub transparency: f32,
    /// `>= 1`.
    pub refractive_index: f32,
    /// `[0, 0.5]`, colour bias applied to refracted light.
    pub tint: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            color: Vec3u8::new(200, 200, 200),
            specular: 10.0,
            reflective: 0.0,
            transparency: 0.0,
            refractive_index: 1.0,
            tint: 0.0,
        }
    }
}

impl Material {
    pub const fn new(
        color: Vec3u8,
        specular: f32,
        reflective: f32,
        transparency: f32,
        refractive_index: f32,
        tint: f32,
    ) -> Self {
        Self {
            color,
            specular,
            reflective,
            transparency,
            refractive_index,
            tint,
        }
    }
}
