pub mod clock;

pub use clock::{Clock, MonotonicClock};

/// Source of raw analog samples from the gas transducer.
///
/// Implementations return a raw ADC count in `[0, adc_max]`. A reading of 0
/// is interpreted upstream as a disconnected or faulted sensor and is
/// excluded from averaging.
pub trait AnalogSource {
    fn read_raw(
        &mut self,
        timeout: std::time::Duration,
    ) -> Result<u16, Box<dyn std::error::Error + Send + Sync>>;
}

impl<T: AnalogSource + ?Sized> AnalogSource for Box<T> {
    fn read_raw(
        &mut self,
        timeout: std::time::Duration,
    ) -> Result<u16, Box<dyn std::error::Error + Send + Sync>> {
        (**self).read_raw(timeout)
    }
}
