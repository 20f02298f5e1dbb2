//! Test and helper mocks for mqguard_core

use mqguard_traits::AnalogSource;

/// Scripted ADC: returns a fixed sequence of counts, then repeats the last.
pub struct SeqAdc {
    seq: Vec<u16>,
    idx: usize,
}

impl SeqAdc {
    pub fn new(seq: impl Into<Vec<u16>>) -> Self {
        Self {
            seq: seq.into(),
            idx: 0,
        }
    }
}

impl AnalogSource for SeqAdc {
    fn read_raw(
        &mut self,
        _timeout: std::time::Duration,
    ) -> Result<u16, Box<dyn std::error::Error + Send + Sync>> {
        let v = if self.idx < self.seq.len() {
            let x = self.seq[self.idx];
            self.idx += 1;
            x
        } else {
            self.seq.last().copied().unwrap_or(0)
        };
        Ok(v)
    }
}

/// ADC pegged at a constant count.
pub struct ConstAdc(pub u16);

impl AnalogSource for ConstAdc {
    fn read_raw(
        &mut self,
        _timeout: std::time::Duration,
    ) -> Result<u16, Box<dyn std::error::Error + Send + Sync>> {
        Ok(self.0)
    }
}

/// An ADC that always errors on read; useful for exercising the hardware
/// error mapping without hardware.
pub struct FaultyAdc;

impl AnalogSource for FaultyAdc {
    fn read_raw(
        &mut self,
        _timeout: std::time::Duration,
    ) -> Result<u16, Box<dyn std::error::Error + Send + Sync>> {
        Err(Box::new(std::io::Error::other("adc unavailable")))
    }
}
