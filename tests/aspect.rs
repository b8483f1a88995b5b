use ripple_poster::displacement::ripple_offset;

fn magnitude(v: [f32; 2]) -> f32 {
    (v[0] * v[0] + v[1] * v[1]).sqrt()
}

#[test]
fn ripples_stay_circular_on_wide_and_tall_viewports() {
    for &res in &[[2560.0_f32, 1440.0], [1280.0, 720.0], [1080.0, 1920.0]] {
        let aspect = res[0] / res[1];
        let center = [0.5, 0.5];
        for &r in &[0.01_f32, 0.04, 0.09] {
            for &age in &[0.0_f32, 1.3, 4.0] {
                let horizontal = ripple_offset([0.5 + r / aspect, 0.5], center, age, res);
                let vertical = ripple_offset([0.5, 0.5 + r], center, age, res);
                assert!(
                    (magnitude(horizontal) - magnitude(vertical)).abs() < 1e-5,
                    "res={res:?} r={r} age={age}: {horizontal:?} vs {vertical:?}"
                );
            }
        }
    }
}

#[test]
fn same_aspect_gives_same_field() {
    let a = ripple_offset([0.53, 0.48], [0.5, 0.5], 2.0, [2560.0, 1440.0]);
    let b = ripple_offset([0.53, 0.48], [0.5, 0.5], 2.0, [1280.0, 720.0]);
    assert!((a[0] - b[0]).abs() < 1e-7 && (a[1] - b[1]).abs() < 1e-7);
}
