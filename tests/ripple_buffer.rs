use ripple_poster::ripple::{RippleBuffer, RippleImpulse, MAX_RIPPLES};

#[test]
fn starts_empty_with_fixed_capacity() {
    let buffer = RippleBuffer::new();
    assert!(buffer.is_empty());
    assert_eq!(buffer.capacity(), 20);
    assert_eq!(buffer.snapshot().count, 0);
}

#[test]
fn never_exceeds_capacity() {
    let mut buffer = RippleBuffer::new();
    for n in 1..=60 {
        buffer.push(0.5, 0.5, n as f32);
        assert_eq!(buffer.len(), n.min(MAX_RIPPLES));
    }
}

#[test]
fn keeps_most_recent_twenty_oldest_first() {
    let mut buffer = RippleBuffer::new();
    for i in 0..25 {
        buffer.push(i as f32 / 100.0, 0.25, i as f32);
    }

    let snapshot = buffer.snapshot();
    assert_eq!(snapshot.count, 20);
    let times: Vec<f32> = snapshot.active().iter().map(|r| r.t).collect();
    let expected: Vec<f32> = (5..25).map(|i| i as f32).collect();
    assert_eq!(times, expected);
    assert_eq!(snapshot.impulses[0], RippleImpulse::new(0.05, 0.25, 5.0));

    let iterated: Vec<f32> = buffer.iter().map(|r| r.t).collect();
    assert_eq!(iterated, expected);
}

#[test]
fn unused_slots_hold_offscreen_sentinel() {
    let mut buffer = RippleBuffer::new();
    buffer.push(0.1, 0.2, 1.0);
    buffer.push(0.3, 0.4, 2.0);
    buffer.push(0.5, 0.6, 3.0);

    let snapshot = buffer.snapshot();
    assert_eq!(snapshot.count, 3);
    for slot in &snapshot.impulses[3..] {
        assert_eq!(*slot, RippleImpulse::SENTINEL);
        assert!(slot.x < 0.0 && slot.y < 0.0, "sentinel must sit outside the unit square");
        // far beyond any decay window at any realistic clock value
        assert!(3.0 - slot.t > 1.0e6);
    }
}

#[test]
fn uniform_array_is_flattened_vec3s() {
    let mut buffer = RippleBuffer::new();
    buffer.push(0.1, 0.2, 1.5);
    buffer.push(0.3, 0.4, 2.5);

    let flat = buffer.snapshot().as_uniform();
    assert_eq!(flat.len(), 60);
    assert_eq!(&flat[..6], &[0.1, 0.2, 1.5, 0.3, 0.4, 2.5]);
    assert_eq!(&flat[6..9], &[-1.0, -1.0, -1.0e9]);
    assert_eq!(&flat[57..], &[-1.0, -1.0, -1.0e9]);
}

#[test]
fn clear_resets_to_empty() {
    let mut buffer = RippleBuffer::new();
    for i in 0..30 {
        buffer.push(0.5, 0.5, i as f32);
    }
    buffer.clear();
    assert!(buffer.is_empty());

    buffer.push(0.9, 0.9, 99.0);
    assert_eq!(buffer.snapshot().active(), &[RippleImpulse::new(0.9, 0.9, 99.0)]);
}
