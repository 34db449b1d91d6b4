use glam::{Vec2, Vec3};
use sanctum_math::saturate;

/// Surface point handed to a shading program.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Fragment {
    /// Surface coordinates, nominally in `[0, 1]²`.
    pub uv: Vec2,
    pub world_position: Vec3,
    /// Surface normal. Need not be normalised.
    pub normal: Vec3,
    /// Direction from the surface toward the viewer. Need not be normalised.
    pub view_dir: Vec3,
}

impl Fragment {
    pub fn new(uv: Vec2, world_position: Vec3, normal: Vec3, view_dir: Vec3) -> Self {
        Self {
            uv,
            world_position,
            normal,
            view_dir,
        }
    }

    /// Head-on fragment of a unit quad in the XY plane facing +Z.
    pub fn facing(uv: Vec2) -> Self {
        Self {
            uv,
            world_position: uv.extend(0.0),
            normal: Vec3::Z,
            view_dir: Vec3::Z,
        }
    }
}

/// Output of a shading program: linear RGB (may exceed 1 for glow) and opacity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Shade {
    pub color: Vec3,
    pub opacity: f32,
}

impl Shade {
    pub const TRANSPARENT: Shade = Shade {
        color: Vec3::ZERO,
        opacity: 0.0,
    };

    /// Builds a shade with non-finite or negative channels zeroed and opacity
    /// clamped to `[0, 1]`.
    pub fn new(color: Vec3, opacity: f32) -> Self {
        let clean = |c: f32| if c.is_finite() { c.max(0.0) } else { 0.0 };
        Self {
            color: Vec3::new(clean(color.x), clean(color.y), clean(color.z)),
            opacity: saturate(opacity),
        }
    }

    /// Straight-alpha "over" composite onto an opaque background.
    pub fn over(&self, background: Vec3) -> Vec3 {
        self.color * self.opacity + background * (1.0 - self.opacity)
    }

    /// 8-bit RGBA with colour clamped to the displayable range.
    pub fn to_rgba8(&self) -> [u8; 4] {
        let quantize = |c: f32| (saturate(c) * 255.0).round() as u8;
        [
            quantize(self.color.x),
            quantize(self.color.y),
            quantize(self.color.z),
            quantize(self.opacity),
        ]
    }
}
