//! Shader-style scalar functions evaluated on the CPU.

/// Clamp to `[0, 1]`. NaN maps to 0 so masks never poison a composite.
#[inline]
pub fn saturate(x: f32) -> f32 {
    if x.is_nan() { 0.0 } else { x.clamp(0.0, 1.0) }
}

/// Hermite smoothstep (`3t² − 2t³`) of `x` between `edge0` and `edge1`.
///
/// Reversed edges produce the mirrored falloff, as in shading languages.
/// Equal edges degrade to a hard step at `edge0`.
#[inline]
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    if edge0 == edge1 {
        return if x < edge0 { 0.0 } else { 1.0 };
    }
    let t = saturate((x - edge0) / (edge1 - edge0));
    t * t * (3.0 - 2.0 * t)
}

/// Linear interpolation `a + (b − a)·t`.
#[inline]
pub fn mix(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Fractional part `x − floor(x)`, always non-negative.
#[inline]
pub fn fract(x: f32) -> f32 {
    x - x.floor()
}
