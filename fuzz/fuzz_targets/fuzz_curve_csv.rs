#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Curve CSV parsing must reject malformed or misordered tables without
    // panicking; any Ok result upholds the interpolator's invariants.
    let _ = mqguard_config::parse_curve_csv(data);
});
