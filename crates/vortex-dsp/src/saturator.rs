/// Input level at which the rational curve reaches its peak of exactly 1.0.
pub const SOFT_CLIP_KNEE: f32 = 3.0;

/// Rational soft clipper `x * (27 + x^2) / (27 + 9 x^2)`.
///
/// The curve has zero slope at `|x| == 3`, where it reaches `±1`. Inputs are
/// held at the knee beyond that point, so the output is bounded to `[-1, 1]`
/// for any finite input and never exceeds a third of the input magnitude past
/// the knee.
#[inline]
pub fn soft_clip(sample: f32) -> f32 {
    let x = sample.clamp(-SOFT_CLIP_KNEE, SOFT_CLIP_KNEE);
    let x2 = x * x;
    (x * (27.0 + x2)) / (27.0 + 9.0 * x2)
}

/// Pre-gain applied by the drive stage: 1x at zero drive up to 10x at full.
#[inline]
pub fn drive_gain(drive: f32) -> f32 {
    1.0 + drive * 9.0
}
