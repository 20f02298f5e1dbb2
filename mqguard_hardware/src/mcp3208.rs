//! MCP3208 12-bit SPI ADC driver (single-ended reads).

use tracing::trace;

use crate::error::{HwError, Result};
use rppal::spi::{Bus, Mode, SlaveSelect, Spi};

const SPI_CLOCK_HZ: u32 = 1_000_000;

pub struct Mcp3208 {
    spi: Spi,
}

impl Mcp3208 {
    pub fn new(bus: u8, cs: u8) -> Result<Self> {
        let bus = match bus {
            0 => Bus::Spi0,
            1 => Bus::Spi1,
            2 => Bus::Spi2,
            other => return Err(HwError::BadBus(format!("spi bus {other}"))),
        };
        let cs = match cs {
            0 => SlaveSelect::Ss0,
            1 => SlaveSelect::Ss1,
            2 => SlaveSelect::Ss2,
            other => return Err(HwError::BadBus(format!("chip-select {other}"))),
        };
        let spi = Spi::new(bus, cs, SPI_CLOCK_HZ, Mode::Mode0)
            .map_err(|e| HwError::Spi(e.to_string()))?;
        Ok(Self { spi })
    }

    /// Read one single-ended conversion from `channel` (0..=7).
    pub fn read_channel(&mut self, channel: u8) -> Result<u16> {
        if channel > 7 {
            return Err(HwError::BadBus(format!("adc channel {channel}")));
        }
        // Start bit + single-ended mode + 3-bit channel, MSB-aligned across
        // three bytes per the MCP3208 datasheet timing.
        let tx = [
            0x06 | (channel >> 2),
            (channel & 0x03) << 6,
            0x00,
        ];
        let mut rx = [0u8; 3];
        self.spi
            .transfer(&mut rx, &tx)
            .map_err(|e| HwError::Spi(e.to_string()))?;
        let value = (u16::from(rx[1] & 0x0F) << 8) | u16::from(rx[2]);
        trace!(channel, value, "mcp3208 conversion");
        Ok(value)
    }
}
