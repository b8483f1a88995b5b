//! Bounded history of pointer impulses fed to the ripple shader.
//!
//! The shader declares a static `vec3 uRipples[20]` array, so the buffer is a
//! fixed ring of that size plus an explicit count. Slots past `count` are
//! filled with an off-screen sentinel whose age is large enough to be culled
//! by the shader's cutoff even if it were ever read.

/// Slots in the shader's uniform array.
pub const MAX_RIPPLES: usize = 20;

/// A single pointer event: normalized position (origin bottom-left) and
/// clock time in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RippleImpulse {
    pub x: f32,
    pub y: f32,
    pub t: f32,
}

impl RippleImpulse {
    pub const SENTINEL: RippleImpulse = RippleImpulse {
        x: -1.0,
        y: -1.0,
        t: -1.0e9,
    };

    pub const fn new(x: f32, y: f32, t: f32) -> Self {
        Self { x, y, t }
    }
}

#[derive(Debug, Clone)]
pub struct RippleBuffer {
    slots: [RippleImpulse; MAX_RIPPLES],
    // index of the oldest live impulse
    head: usize,
    len: usize,
}

impl Default for RippleBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl RippleBuffer {
    pub fn new() -> Self {
        Self {
            slots: [RippleImpulse::SENTINEL; MAX_RIPPLES],
            head: 0,
            len: 0,
        }
    }

    pub const fn capacity(&self) -> usize {
        MAX_RIPPLES
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Append an impulse, overwriting the oldest one once full.
    pub fn push(&mut self, x: f32, y: f32, t: f32) {
        let impulse = RippleImpulse::new(x, y, t);
        if self.len < MAX_RIPPLES {
            self.slots[(self.head + self.len) % MAX_RIPPLES] = impulse;
            self.len += 1;
        } else {
            self.slots[self.head] = impulse;
            self.head = (self.head + 1) % MAX_RIPPLES;
        }
    }

    /// Live impulses, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &RippleImpulse> + '_ {
        (0..self.len).map(move |i| &self.slots[(self.head + i) % MAX_RIPPLES])
    }

    pub fn clear(&mut self) {
        *self = Self::new();
    }

    pub fn snapshot(&self) -> RippleSnapshot {
        let mut impulses = [RippleImpulse::SENTINEL; MAX_RIPPLES];
        for (slot, impulse) in impulses.iter_mut().zip(self.iter()) {
            *slot = *impulse;
        }
        RippleSnapshot {
            impulses,
            count: self.len,
        }
    }
}

/// Chronologically ordered copy of the buffer, shaped like the shader uniform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RippleSnapshot {
    pub impulses: [RippleImpulse; MAX_RIPPLES],
    pub count: usize,
}

impl Default for RippleSnapshot {
    fn default() -> Self {
        RippleBuffer::new().snapshot()
    }
}

impl RippleSnapshot {
    pub fn active(&self) -> &[RippleImpulse] {
        &self.impulses[..self.count]
    }

    /// Flattened `vec3[20]` for `uniform3fv`.
    pub fn as_uniform(&self) -> [f32; MAX_RIPPLES * 3] {
        let mut flat = [0.0; MAX_RIPPLES * 3];
        for (chunk, impulse) in flat.chunks_exact_mut(3).zip(self.impulses.iter()) {
            chunk[0] = impulse.x;
            chunk[1] = impulse.y;
            chunk[2] = impulse.t;
        }
        flat
    }
}
