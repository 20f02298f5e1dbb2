use mqguard_core::curve::CalibrationCurve;
use mqguard_core::mocks::SeqAdc;
use mqguard_core::{GasSensor, SensorCfg};
use proptest::prelude::*;

fn fast_cfg() -> SensorCfg {
    SensorCfg {
        sample_delay_ms: 0,
        ..SensorCfg::default()
    }
}

proptest! {
    // Divider inversion is monotonically decreasing over (0, adc_max].
    #[test]
    fn resistance_monotone_decreasing(adc in 1u16..4095) {
        let cfg = SensorCfg::default();
        prop_assert!(cfg.resistance_from_raw(adc) >= cfg.resistance_from_raw(adc + 1));
    }

    // Interpolation never leaves the curve's ppm range, for any ratio.
    #[test]
    fn ppm_stays_within_curve_range(ratio in 0u32..5000) {
        let curve = CalibrationCurve::lpg();
        let ppm = curve.ppm_from_ratio(ratio);
        prop_assert!(ppm <= curve.max_ppm());
    }

    // Higher ratio (more resistance relative to baseline) never means more gas.
    #[test]
    fn ppm_non_increasing_in_ratio(a in 0u32..2000, b in 0u32..2000) {
        let curve = CalibrationCurve::lpg();
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(curve.ppm_from_ratio(lo) >= curve.ppm_from_ratio(hi));
    }

    // The averaging window reproduces the integer average of the positive
    // samples exactly, then feeds it through the divider model.
    #[test]
    fn average_matches_integer_average_of_positive_samples(
        samples in proptest::collection::vec(0u16..=4095, 1..=50)
    ) {
        let cfg = fast_cfg();
        let expected = {
            let positive: Vec<u32> = samples.iter().filter(|&&s| s > 0).map(|&s| u32::from(s)).collect();
            if positive.is_empty() {
                0
            } else {
                let avg = (positive.iter().sum::<u32>() / positive.len() as u32) as u16;
                cfg.resistance_from_raw(avg)
            }
        };

        let n = samples.len() as u8;
        let mut sensor = GasSensor::builder()
            .with_adc(SeqAdc::new(samples))
            .with_sensor_cfg(cfg)
            .build()
            .expect("build sensor");
        let got = sensor.read_average_resistance(n).expect("read");
        prop_assert_eq!(got, expected);
    }
}
