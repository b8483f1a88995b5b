use ripple_poster::displacement::{
    fade, mask, ripple_offset, shade, total_displacement, RasterTexture, ShaderUniformState,
    CUTOFF_AGE, RADIUS,
};
use ripple_poster::ripple::RippleBuffer;

const RES: [f32; 2] = [2560.0, 1440.0];

fn magnitude(v: [f32; 2]) -> f32 {
    (v[0] * v[0] + v[1] * v[1]).sqrt()
}

fn centered_ripple_at(t: f32) -> RippleBuffer {
    let mut buffer = RippleBuffer::new();
    buffer.push(0.5, 0.5, t);
    buffer
}

#[test]
fn decayed_impulses_contribute_nothing() {
    let buffer = centered_ripple_at(0.0);
    let snapshot = buffer.snapshot();

    for &time in &[8.001_f32, 9.0, 11.5, 30.0] {
        for &uv in &[[0.52, 0.5], [0.5, 0.53], [0.48, 0.47], [0.1, 0.9]] {
            assert_eq!(total_displacement(uv, time, &snapshot, RES), [0.0, 0.0]);
        }
    }
    // still live just before the cutoff
    assert!(magnitude(total_displacement([0.5, 0.52], CUTOFF_AGE - 0.2, &snapshot, RES)) > 0.0);
}

#[test]
fn fade_is_non_increasing_and_hits_zero_at_twelve_seconds() {
    assert_eq!(fade(0.0), 1.0);
    let mut prev = fade(0.0);
    for step in 1..=200 {
        let age = step as f32 * 0.1;
        let f = fade(age);
        assert!(f <= prev, "fade rose at age {age}");
        prev = f;
    }
    assert_eq!(fade(12.0), 0.0);
    assert_eq!(fade(15.0), 0.0);
}

#[test]
fn mask_is_one_at_origin_and_zero_past_radius() {
    assert_eq!(mask(0.0), 1.0);
    assert_eq!(mask(RADIUS * 0.5), 1.0);
    assert_eq!(mask(RADIUS), 0.0);
    assert_eq!(mask(0.3), 0.0);

    let inner = RADIUS * 0.5;
    assert!((mask(inner - 1e-4) - mask(inner + 1e-4)).abs() < 1e-3);

    let mut prev = mask(0.0);
    for step in 1..=100 {
        let m = mask(step as f32 * RADIUS / 100.0);
        assert!(m <= prev);
        prev = m;
    }
}

#[test]
fn impulse_origin_has_zero_offset() {
    for &age in &[0.0_f32, 0.5, 3.0, 7.9] {
        assert_eq!(ripple_offset([0.5, 0.5], [0.5, 0.5], age, RES), [0.0, 0.0]);
    }
    let snapshot = centered_ripple_at(0.0).snapshot();
    assert_eq!(total_displacement([0.5, 0.5], 0.0, &snapshot, RES), [0.0, 0.0]);
}

#[test]
fn offset_points_away_from_impulse() {
    let d = ripple_offset([0.5, 0.52], [0.5, 0.5], 0.0, RES);
    assert_eq!(d[0], 0.0);
    // sin(0.6) > 0, so the wave pushes outward at age 0
    assert!(d[1] > 0.0);
}

#[test]
fn ripple_envelope_shrinks_over_time() {
    let snapshot = centered_ripple_at(0.0).snapshot();
    let uv = [0.5, 0.52];
    let period = std::f32::consts::PI / 3.0;

    let mut peaks = Vec::new();
    let mut window = 0;
    while (window as f32 + 1.0) * period < CUTOFF_AGE {
        let start = window as f32 * period;
        let peak = (0..1000)
            .map(|i| start + period * i as f32 / 1000.0)
            .map(|t| magnitude(total_displacement(uv, t, &snapshot, RES)))
            .fold(0.0_f32, f32::max);
        peaks.push(peak);
        window += 1;
    }

    assert!(peaks[0] > 0.0);
    for pair in peaks.windows(2) {
        assert!(pair[1] < pair[0], "peaks not decreasing: {peaks:?}");
    }
    assert_eq!(magnitude(total_displacement(uv, 8.5, &snapshot, RES)), 0.0);
}

#[test]
fn contributions_add_up() {
    let mut both = RippleBuffer::new();
    both.push(0.5, 0.5, 0.0);
    both.push(0.55, 0.5, 1.0);
    let first = centered_ripple_at(0.0);
    let mut second = RippleBuffer::new();
    second.push(0.55, 0.5, 1.0);

    let uv = [0.53, 0.51];
    let time = 2.0;
    let sum = total_displacement(uv, time, &both.snapshot(), RES);
    let a = total_displacement(uv, time, &first.snapshot(), RES);
    let b = total_displacement(uv, time, &second.snapshot(), RES);
    assert!((sum[0] - (a[0] + b[0])).abs() < 1e-7);
    assert!((sum[1] - (a[1] + b[1])).abs() < 1e-7);
}

fn checker() -> RasterTexture {
    // 4x4, each texel a distinct colour
    let mut pixels = Vec::new();
    for y in 0..4u8 {
        for x in 0..4u8 {
            pixels.extend_from_slice(&[x * 60, y * 60, 0, 255]);
        }
    }
    RasterTexture::from_rgba(4, 4, pixels).expect("4x4 RGBA")
}

#[test]
fn texture_rejects_mismatched_buffers() {
    assert!(RasterTexture::from_rgba(2, 2, vec![0; 15]).is_none());
    assert!(RasterTexture::from_rgba(0, 2, vec![]).is_none());
}

#[test]
fn sampling_hits_texel_centres_and_clamps_at_edges() {
    let tex = checker();
    let centre = tex.sample([2.5 / 4.0, 1.5 / 4.0]);
    assert_eq!(centre, [120.0 / 255.0, 60.0 / 255.0, 0.0, 1.0]);

    assert_eq!(tex.sample([-0.5, 0.125]), tex.sample([0.0, 0.125]));
    assert_eq!(tex.sample([0.0, 0.125]), [0.0, 0.0, 0.0, 1.0]);
    assert_eq!(tex.sample([1.7, 0.875]), [180.0 / 255.0, 180.0 / 255.0, 0.0, 1.0]);

    let between = tex.sample([0.25, 0.125]);
    assert!((between[0] - 30.0 / 255.0).abs() < 1e-6);
}

#[test]
fn shading_without_ripples_is_a_plain_lookup() {
    let tex = checker();
    let uniforms = ShaderUniformState::new(4.0, 4.0);
    for &uv in &[[0.1, 0.1], [0.5, 0.5], [0.9, 0.3]] {
        assert_eq!(shade(uv, &uniforms, &tex), tex.sample(uv));
    }
}

#[test]
fn shading_with_a_ripple_reads_the_displaced_texel() {
    let tex = checker();
    let mut uniforms = ShaderUniformState::new(4.0, 4.0);
    let mut buffer = RippleBuffer::new();
    buffer.push(0.5, 0.5, 0.0);
    uniforms.ripples = buffer.snapshot();
    uniforms.time = 0.0;

    let uv = [0.5, 0.52];
    let d = total_displacement(uv, 0.0, &uniforms.ripples, uniforms.resolution);
    assert_eq!(shade(uv, &uniforms, &tex), tex.sample([uv[0] + d[0], uv[1] + d[1]]));
}
