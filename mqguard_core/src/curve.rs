//! Empirical sensor-response curve: ordered (ratio, ppm) control points and
//! the piecewise-linear ratio→ppm interpolation over them.
//!
//! The ratio axis is a percentage of the clean-air baseline resistance and is
//! inversely ordered: the table starts at the highest ratio (no gas, lowest
//! ppm) and descends toward the lowest ratio (saturated sensor, highest ppm).

/// One control point of the response curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurvePoint {
    /// Resistance as integer percent of the clean-air baseline.
    pub ratio: u16,
    /// Gas concentration at that ratio.
    pub ppm: u16,
}

/// LPG response of the MQ-series transducer, from the vendor datasheet.
const LPG_TABLE: [(u16, u16); 16] = [
    (1000, 0),
    (800, 10),
    (650, 20),
    (520, 30),
    (420, 40),
    (350, 50),
    (280, 75),
    (230, 100),
    (180, 150),
    (150, 200),
    (120, 300),
    (90, 500),
    (60, 1000),
    (40, 2000),
    (25, 5000),
    (15, 10000),
];

/// Validated, immutable response curve.
///
/// Invariants (enforced by [`CalibrationCurve::new`]): at least two points,
/// ratios strictly decreasing, ppm strictly increasing.
#[derive(Debug, Clone)]
pub struct CalibrationCurve {
    points: Vec<CurvePoint>,
}

impl CalibrationCurve {
    /// Build a curve from control points, validating the ordering invariants.
    pub fn new(points: Vec<CurvePoint>) -> eyre::Result<Self> {
        if points.len() < 2 {
            eyre::bail!("curve requires at least two points, got {}", points.len());
        }
        for i in 1..points.len() {
            if points[i].ratio >= points[i - 1].ratio {
                eyre::bail!(
                    "curve ratios must be strictly decreasing (violated at index {i})"
                );
            }
            if points[i].ppm <= points[i - 1].ppm {
                eyre::bail!(
                    "curve ppm values must be strictly increasing (violated at index {i})"
                );
            }
        }
        Ok(Self { points })
    }

    /// The built-in LPG curve.
    pub fn lpg() -> Self {
        // Static table upholds the ordering invariants; no validation needed.
        Self {
            points: LPG_TABLE
                .iter()
                .map(|&(ratio, ppm)| CurvePoint { ratio, ppm })
                .collect(),
        }
    }

    pub fn points(&self) -> &[CurvePoint] {
        &self.points
    }

    /// Lowest concentration on the curve (first point).
    pub fn min_ppm(&self) -> u16 {
        self.points[0].ppm
    }

    /// Highest concentration on the curve (last point).
    pub fn max_ppm(&self) -> u16 {
        self.points[self.points.len() - 1].ppm
    }

    /// Map a baseline-relative resistance ratio to a concentration.
    ///
    /// Ratios above the first point clamp to [`min_ppm`](Self::min_ppm);
    /// ratios below the last point (including 0) clamp to
    /// [`max_ppm`](Self::max_ppm), the fail-safe end of the curve. Inside the
    /// table, adjacent points bracket the ratio and the result is a truncating
    /// integer interpolation, exact at every control point.
    pub fn ppm_from_ratio(&self, ratio: u32) -> u16 {
        if ratio > u32::from(self.points[0].ratio) {
            return self.min_ppm();
        }
        for pair in self.points.windows(2) {
            // Inverse ordering: `hi` carries the larger ratio and smaller ppm.
            let (hi, lo) = (pair[0], pair[1]);
            if ratio >= u32::from(lo.ratio) && ratio <= u32::from(hi.ratio) {
                let ppm_span = u32::from(lo.ppm - hi.ppm);
                let ratio_span = u32::from(hi.ratio - lo.ratio);
                let offset = u32::from(hi.ratio) - ratio;
                // ppm_span * offset <= 10_000 * 65_535, well inside u32.
                let ppm = u32::from(hi.ppm) + (ppm_span * offset) / ratio_span;
                return ppm as u16;
            }
        }
        self.max_ppm()
    }
}

impl Default for CalibrationCurve {
    fn default() -> Self {
        Self::lpg()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn control_points_are_exact() {
        let curve = CalibrationCurve::lpg();
        for p in curve.points() {
            assert_eq!(curve.ppm_from_ratio(u32::from(p.ratio)), p.ppm, "at ratio {}", p.ratio);
        }
    }

    #[test]
    fn clamps_above_and_below_table() {
        let curve = CalibrationCurve::lpg();
        assert_eq!(curve.ppm_from_ratio(1001), 0);
        assert_eq!(curve.ppm_from_ratio(5000), 0);
        assert_eq!(curve.ppm_from_ratio(14), 10_000);
        // A zero ratio means resistance collapsed far below baseline; that is
        // the saturated end of the curve, not clean air.
        assert_eq!(curve.ppm_from_ratio(0), 10_000);
    }

    #[test]
    fn interpolates_inside_bracket() {
        let curve = CalibrationCurve::lpg();
        // Bracket [800, 1000] spans ppm [10, 0]:
        // ppm = 0 + (10 * (1000 - 900)) / 200 = 5
        assert_eq!(curve.ppm_from_ratio(900), 5);
        // Bracket [230, 280] spans ppm [100, 75]:
        // ppm = 75 + (25 * (280 - 255)) / 50 = 87
        assert_eq!(curve.ppm_from_ratio(255), 87);
    }

    #[test]
    fn truncating_division_matches_source_arithmetic() {
        let curve = CalibrationCurve::lpg();
        // Bracket [15, 25] spans ppm [10000, 5000]:
        // ppm = 5000 + (5000 * (25 - 17)) / 10 = 9000
        assert_eq!(curve.ppm_from_ratio(17), 9000);
        // Bracket [800, 1000]: ppm = (10 * (1000 - 983)) / 200 = 0 (truncated)
        assert_eq!(curve.ppm_from_ratio(983), 0);
    }

    #[test]
    fn rejects_short_and_misordered_curves() {
        assert!(CalibrationCurve::new(vec![CurvePoint { ratio: 100, ppm: 0 }]).is_err());
        assert!(
            CalibrationCurve::new(vec![
                CurvePoint { ratio: 100, ppm: 0 },
                CurvePoint { ratio: 100, ppm: 10 },
            ])
            .is_err()
        );
        assert!(
            CalibrationCurve::new(vec![
                CurvePoint { ratio: 100, ppm: 10 },
                CurvePoint { ratio: 50, ppm: 10 },
            ])
            .is_err()
        );
        assert!(
            CalibrationCurve::new(vec![
                CurvePoint { ratio: 100, ppm: 0 },
                CurvePoint { ratio: 50, ppm: 10 },
            ])
            .is_ok()
        );
    }
}
