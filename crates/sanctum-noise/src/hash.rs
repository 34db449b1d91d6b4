use glam::Vec2;

/// Pseudo-random value in `[0, 1)` for a 2-D point.
///
/// Operates on the exact bit pattern of the coordinates, so the result is stable
/// across runs and platforms. `-0.0` and `0.0` hash identically.
#[inline]
pub fn hash2(p: Vec2) -> f32 {
    // Adding +0.0 folds negative zero into positive zero.
    let x = u64::from((p.x + 0.0).to_bits());
    let y = u64::from((p.y + 0.0).to_bits());
    let h = mix64(x | (y << 32));
    // Top 24 bits fit an f32 mantissa exactly, keeping the result below 1.0.
    (h >> 40) as f32 * (1.0 / 16_777_216.0)
}

/// SplitMix64 finalizer.
#[inline]
fn mix64(mut h: u64) -> u64 {
    h = h.wrapping_add(0x9E37_79B9_7F4A_7C15);
    h = (h ^ (h >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    h = (h ^ (h >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    h ^ (h >> 31)
}
