use mqguard_core::mocks::ConstAdc;
use mqguard_core::reading::Thresholds;
use mqguard_core::{GasSensor, SensorCfg, Timeouts};

#[test]
fn rejects_inverted_thresholds() {
    let err = GasSensor::builder()
        .with_adc(ConstAdc(2048))
        .with_thresholds(Thresholds {
            safe_ppm: 200,
            warning_ppm: 100,
        })
        .build()
        .expect_err("inverted thresholds must not build");
    assert!(format!("{err}").contains("safe_ppm must be < thresholds.warning_ppm"));
}

#[test]
fn rejects_equal_thresholds() {
    assert!(
        GasSensor::builder()
            .with_adc(ConstAdc(2048))
            .with_thresholds(Thresholds {
                safe_ppm: 150,
                warning_ppm: 150,
            })
            .build()
            .is_err()
    );
}

#[test]
fn rejects_zero_sample_counts() {
    let err = GasSensor::builder()
        .with_adc(ConstAdc(2048))
        .with_sensor_cfg(SensorCfg {
            calibration_samples: 0,
            ..SensorCfg::default()
        })
        .build()
        .expect_err("zero calibration samples must not build");
    assert!(format!("{err}").contains("calibration_samples"));

    assert!(
        GasSensor::builder()
            .with_adc(ConstAdc(2048))
            .with_sensor_cfg(SensorCfg {
                reading_samples: 0,
                ..SensorCfg::default()
            })
            .build()
            .is_err()
    );
}

#[test]
fn rejects_degenerate_divider_constants() {
    for cfg in [
        SensorCfg {
            adc_max: 0,
            ..SensorCfg::default()
        },
        SensorCfg {
            load_resistance: 0,
            ..SensorCfg::default()
        },
        SensorCfg {
            clean_air_factor: 0,
            ..SensorCfg::default()
        },
    ] {
        assert!(
            GasSensor::builder()
                .with_adc(ConstAdc(2048))
                .with_sensor_cfg(cfg)
                .build()
                .is_err()
        );
    }
}

#[test]
fn rejects_zero_sensor_timeout() {
    assert!(
        GasSensor::builder()
            .with_adc(ConstAdc(2048))
            .with_timeouts(Timeouts { sensor_ms: 0 })
            .build()
            .is_err()
    );
}

#[test]
fn defaults_build_cleanly() {
    let sensor = GasSensor::builder()
        .with_adc(ConstAdc(2048))
        .build()
        .expect("defaults must build");
    let t = sensor.thresholds();
    assert_eq!((t.safe_ppm, t.warning_ppm), (100, 200));
    assert!(!sensor.is_calibrated());
}
