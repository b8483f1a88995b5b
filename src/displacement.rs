//! Ripple displacement stage.
//!
//! The GPU program below is what runs in the browser. The free functions in
//! this module evaluate the same math on the host so the ripple envelope can
//! be checked without a GL context; keep the two in lockstep.

use crate::ripple::{RippleImpulse, RippleSnapshot};

/// Radius of the displacement mask in aspect-corrected uv units.
pub const RADIUS: f32 = 0.15;
/// Impulses older than this contribute nothing.
pub const CUTOFF_AGE: f32 = 8.0;
/// Linear fade reaches zero at this age.
pub const FADE_WINDOW: f32 = 12.0;
/// Distances below this are treated as the impulse origin, where the
/// direction is undefined and the offset is zero.
pub const CENTER_EPSILON: f32 = 1.0e-6;

pub const VERTEX_SHADER: &str = r#"#version 300 es
in vec2 aPosition;
void main() {
    gl_Position = vec4(aPosition, 0.0, 1.0);
}
"#;

pub const FRAGMENT_SHADER: &str = r#"#version 300 es
precision highp float;

uniform sampler2D uTexture;
uniform vec3 uRipples[20];
uniform int uRippleCount;
uniform float uTime;
uniform vec2 uResolution;

out vec4 fragColor;

const float RADIUS = 0.15;
const float CUTOFF_AGE = 8.0;
const float FADE_WINDOW = 12.0;
const float CENTER_EPSILON = 1.0e-6;

vec2 ripple(vec2 uv, vec2 center, float age) {
    vec2 diff = (uv - center) * vec2(uResolution.x / uResolution.y, 1.0);
    float dist = length(diff);
    if (dist < CENTER_EPSILON) {
        return vec2(0.0);
    }
    float fade = clamp(1.0 - age / FADE_WINDOW, 0.0, 1.0);
    float m = 1.0 - smoothstep(RADIUS * 0.5, RADIUS, dist);
    float wave = 0.1 * sin(30.0 * dist - age * 3.0) / (1.0 + 80.0 * dist);
    return (diff / dist) * wave * (m * m) * fade;
}

void main() {
    vec2 uv = gl_FragCoord.xy / uResolution;
    vec2 totalOffset = vec2(0.0);
    for (int i = 0; i < 20; i++) {
        if (i >= uRippleCount) break;
        vec3 d = uRipples[i];
        float age = uTime - d.z;
        if (age > CUTOFF_AGE) continue;
        totalOffset += ripple(uv, d.xy, age);
    }
    fragColor = texture(uTexture, uv + totalOffset);
}
"#;

/// Everything the fragment program reads each frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShaderUniformState {
    /// Generation of the composite currently bound as `uTexture`, if any.
    pub texture_generation: Option<u64>,
    pub time: f32,
    pub resolution: [f32; 2],
    pub ripples: RippleSnapshot,
}

impl ShaderUniformState {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            texture_generation: None,
            time: 0.0,
            resolution: [width, height],
            ripples: RippleSnapshot::default(),
        }
    }

    pub fn ripple_count(&self) -> i32 {
        self.ripples.count as i32
    }

    pub fn aspect_correction(&self) -> f32 {
        self.resolution[0] / self.resolution[1]
    }
}

pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

pub fn fade(age: f32) -> f32 {
    (1.0 - age / FADE_WINDOW).clamp(0.0, 1.0)
}

pub fn mask(dist: f32) -> f32 {
    let m = 1.0 - smoothstep(RADIUS * 0.5, RADIUS, dist);
    m * m
}

pub fn wave(dist: f32, age: f32) -> f32 {
    0.1 * (30.0 * dist - age * 3.0).sin() / (1.0 + 80.0 * dist)
}

/// Offset contributed by one impulse centred at `center` of the given age.
pub fn ripple_offset(
    uv: [f32; 2],
    center: [f32; 2],
    age: f32,
    resolution: [f32; 2],
) -> [f32; 2] {
    let aspect = resolution[0] / resolution[1];
    let diff = [(uv[0] - center[0]) * aspect, uv[1] - center[1]];
    let dist = (diff[0] * diff[0] + diff[1] * diff[1]).sqrt();
    if dist < CENTER_EPSILON {
        return [0.0, 0.0];
    }
    let scale = wave(dist, age) * mask(dist) * fade(age) / dist;
    [diff[0] * scale, diff[1] * scale]
}

fn impulse_offset(
    uv: [f32; 2],
    impulse: &RippleImpulse,
    time: f32,
    resolution: [f32; 2],
) -> [f32; 2] {
    let age = time - impulse.t;
    if age > CUTOFF_AGE {
        return [0.0, 0.0];
    }
    ripple_offset(uv, [impulse.x, impulse.y], age, resolution)
}

/// Summed offset of every live impulse at `uv`.
pub fn total_displacement(
    uv: [f32; 2],
    time: f32,
    ripples: &RippleSnapshot,
    resolution: [f32; 2],
) -> [f32; 2] {
    ripples
        .active()
        .iter()
        .map(|impulse| impulse_offset(uv, impulse, time, resolution))
        .fold([0.0, 0.0], |acc, d| [acc[0] + d[0], acc[1] + d[1]])
}

/// RGBA8 raster with row 0 at the bottom, as the composite looks after a
/// flip-Y upload.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterTexture {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl RasterTexture {
    /// Returns `None` when the buffer does not hold `width * height` pixels.
    pub fn from_rgba(width: usize, height: usize, pixels: Vec<u8>) -> Option<Self> {
        if width == 0 || height == 0 || pixels.len() != width * height * 4 {
            return None;
        }
        Some(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    fn texel(&self, x: isize, y: isize) -> [f32; 4] {
        let x = x.clamp(0, self.width as isize - 1) as usize;
        let y = y.clamp(0, self.height as isize - 1) as usize;
        let offset = (y * self.width + x) * 4;
        let px = &self.pixels[offset..offset + 4];
        [
            px[0] as f32 / 255.0,
            px[1] as f32 / 255.0,
            px[2] as f32 / 255.0,
            px[3] as f32 / 255.0,
        ]
    }

    /// Bilinear lookup with clamp-to-edge wrapping, matching `GL_LINEAR` +
    /// `GL_CLAMP_TO_EDGE`.
    pub fn sample(&self, uv: [f32; 2]) -> [f32; 4] {
        let x = uv[0] * self.width as f32 - 0.5;
        let y = uv[1] * self.height as f32 - 0.5;
        let x0 = x.floor();
        let y0 = y.floor();
        let fx = x - x0;
        let fy = y - y0;
        let (x0, y0) = (x0 as isize, y0 as isize);

        let a = self.texel(x0, y0);
        let b = self.texel(x0 + 1, y0);
        let c = self.texel(x0, y0 + 1);
        let d = self.texel(x0 + 1, y0 + 1);

        let mut out = [0.0; 4];
        for i in 0..4 {
            let bottom = a[i] + (b[i] - a[i]) * fx;
            let top = c[i] + (d[i] - c[i]) * fx;
            out[i] = bottom + (top - bottom) * fy;
        }
        out
    }
}

/// Colour the fragment program writes at `uv`.
pub fn shade(uv: [f32; 2], uniforms: &ShaderUniformState, texture: &RasterTexture) -> [f32; 4] {
    let offset = total_displacement(uv, uniforms.time, &uniforms.ripples, uniforms.resolution);
    texture.sample([uv[0] + offset[0], uv[1] + offset[1]])
}
