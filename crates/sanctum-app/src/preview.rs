//! Material swatch previews.
//!
//! Each material is evaluated over a head-on unit quad and composited over a
//! checkerboard so transparency shows up in the PNG.

use std::path::{Path, PathBuf};

use glam::{Vec2, Vec3};
use image::{Rgba, RgbaImage};
use sanctum_scene::{District, MaterialHandle};
use sanctum_shading::{Fragment, Shade, ShadingProgram};
use tracing::info;

use crate::error::AppError;

const CHECKER_CELLS: u32 = 8;
const CHECKER_DARK: Vec3 = Vec3::splat(0.08);
const CHECKER_LIGHT: Vec3 = Vec3::splat(0.16);

fn checker(x: u32, y: u32, size: u32) -> Vec3 {
    let cell = (size / CHECKER_CELLS).max(1);
    if (x / cell + y / cell) % 2 == 0 { CHECKER_DARK } else { CHECKER_LIGHT }
}

/// Render one material at `time` into a `size`×`size` opaque image.
///
/// Row 0 is the top of the image, so `uv.y` runs from 1 down to 0.
pub fn render_swatch(
    district: &District,
    material: MaterialHandle,
    size: u32,
    time: f64,
) -> Result<RgbaImage, AppError> {
    let program = district.program(material)?;
    let size = size.max(1);
    let inv = 1.0 / size as f32;
    let mut image = RgbaImage::new(size, size);
    for (x, y, pixel) in image.enumerate_pixels_mut() {
        let uv = Vec2::new((x as f32 + 0.5) * inv, 1.0 - (y as f32 + 0.5) * inv);
        let shade = program.evaluate(&Fragment::facing(uv), time);
        let composited = Shade::new(shade.over(checker(x, y, size)), 1.0);
        *pixel = Rgba(composited.to_rgba8());
    }
    Ok(image)
}

/// Render every material (or only `only`) to `<output_dir>/<district>_<material>.png`.
pub fn write_swatches(
    district: &District,
    output_dir: &Path,
    size: u32,
    time: f64,
    only: Option<&str>,
) -> Result<Vec<PathBuf>, AppError> {
    let selected: Vec<(MaterialHandle, &str)> = match only {
        Some(name) => {
            let handle = district.material(name).ok_or_else(|| AppError::UnknownMaterial {
                district: district.name().to_string(),
                name: name.to_string(),
            })?;
            vec![(handle, name)]
        }
        None => district.materials().collect(),
    };

    std::fs::create_dir_all(output_dir)?;
    let mut written = Vec::with_capacity(selected.len());
    for (handle, name) in selected {
        let image = render_swatch(district, handle, size, time)?;
        let path = output_dir.join(format!("{}_{}.png", district.name(), name));
        image.save(&path)?;
        info!(material = name, path = %path.display(), "Wrote swatch");
        written.push(path);
    }
    Ok(written)
}
