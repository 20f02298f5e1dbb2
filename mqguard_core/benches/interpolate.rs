use criterion::{Criterion, black_box, criterion_group, criterion_main};
use mqguard_core::curve::CalibrationCurve;

// Sweep the whole usable ratio range, including both clamp regions, to keep
// the bench representative of a monitor loop that sees arbitrary readings.
fn bench_ppm_from_ratio(c: &mut Criterion) {
    let curve = CalibrationCurve::lpg();

    c.bench_function("ppm_from_ratio/sweep", |b| {
        b.iter(|| {
            let mut acc: u32 = 0;
            for ratio in (0..1100u32).step_by(7) {
                acc = acc.wrapping_add(u32::from(curve.ppm_from_ratio(black_box(ratio))));
            }
            acc
        })
    });

    c.bench_function("ppm_from_ratio/clean_air", |b| {
        b.iter(|| curve.ppm_from_ratio(black_box(983)))
    });
}

criterion_group!(benches, bench_ppm_from_ratio);
criterion_main!(benches);
