//! Solomon Systech SSD2805 parallel-to-MIPI bridge
//!
//! Bring-up runs in two stages. The bridge stage programs the PLL and the
//! link clocks through the bridge's own registers. The panel stage sends
//! the panel table as generic packets. Window and pixel transfers then go
//! out as compact DCS packets.

use embedded_hal::delay::DelayNs;
use panelink_core::bringup::{dcs, ResolvedStep, StepContext};
use panelink_core::signal::RESET_HOLD_MS;
use panelink_core::traits::Window;
use panelink_core::{
    ChipSelectMode, Controller, ControllerConfig, ControllerSettings, LcmError, ResetPulse,
    Signal, SignalBus,
};
use panelink_hal::{BusWidth, Transport};
use panelink_protocol::{registers, BusOp, Packet, PacketEncoder, PacketError};

use super::panel::PANEL_INIT;
use super::{
    BridgeSettings, LockOutcome, LockMonitor, NoLockMonitor, PLL_LOCK_TIMEOUT_MS,
    PLL_POLL_INTERVAL_MS,
};
use crate::direct::address_range;

/// Wait after PLL disable
const PLL_DISABLE_MS: u32 = 20;
/// Wait after clock setup
const CLOCK_SETTLE_MS: u32 = 25;
/// Wait after selecting generic framing
const FRAMING_SETTLE_MS: u32 = 200;

fn packet_error<E>(err: PacketError) -> LcmError<E> {
    match err {
        PacketError::PayloadTooLarge => LcmError::PayloadTooLarge,
    }
}

/// SSD2805 bridge driver
///
/// Chip select is asserted around every write. `P` supplies the PLL lock
/// state; with [`NoLockMonitor`] the driver waits a fixed time instead.
pub struct Ssd2805Controller<T, D, P = NoLockMonitor> {
    bus: SignalBus<T>,
    delay: D,
    settings: ControllerSettings,
    bridge: BridgeSettings,
    encoder: PacketEncoder,
    monitor: P,
    pll_lock: Option<LockOutcome>,
    initialized: bool,
}

impl<T, D> Ssd2805Controller<T, D, NoLockMonitor> {
    /// Create an uninitialised driver with default bridge settings
    pub fn new(config: ControllerConfig<T>, delay: D) -> Self {
        let (settings, transport) = config.into_parts();
        let bridge = BridgeSettings::default();
        Self {
            bus: SignalBus::new(transport, &settings, ChipSelectMode::PerTransfer),
            delay,
            settings,
            bridge,
            encoder: PacketEncoder::new(bridge.max_packet_len),
            monitor: NoLockMonitor,
            pll_lock: None,
            initialized: false,
        }
    }
}

impl<T, D, P> Ssd2805Controller<T, D, P> {
    /// Replace the bridge settings
    pub fn with_bridge_settings(mut self, bridge: BridgeSettings) -> Self {
        self.bridge = bridge;
        self.encoder = PacketEncoder::new(bridge.max_packet_len);
        self
    }

    /// Poll PLL lock through `monitor` instead of waiting a fixed time
    pub fn with_lock_monitor<Q: LockMonitor>(self, monitor: Q) -> Ssd2805Controller<T, D, Q> {
        Ssd2805Controller {
            bus: self.bus,
            delay: self.delay,
            settings: self.settings,
            bridge: self.bridge,
            encoder: self.encoder,
            monitor,
            pll_lock: self.pll_lock,
            initialized: self.initialized,
        }
    }

    pub fn settings(&self) -> &ControllerSettings {
        &self.settings
    }

    pub fn bridge_settings(&self) -> &BridgeSettings {
        &self.bridge
    }

    /// How the PLL lock wait ended during the last bring-up
    ///
    /// `None` until the PLL has been configured.
    pub fn pll_lock(&self) -> Option<LockOutcome> {
        self.pll_lock
    }

    /// Check if bring-up runs twice for this wiring
    pub fn repeats_bringup(&self) -> bool {
        self.bridge.repeat_unreset_bringup
            && self.settings.bus_width == BusWidth::Eight
            && !self.settings.pins.rst.is_wired()
    }

    /// Hand back the transport and delay
    pub fn release(self) -> (T, D) {
        (self.bus.into_inner(), self.delay)
    }
}

impl<T: Transport, D: DelayNs, P: LockMonitor> Ssd2805Controller<T, D, P> {
    /// Write a 16-bit bridge register
    pub fn write_bridge_register(
        &mut self,
        reg: u8,
        value: u16,
    ) -> Result<(), LcmError<T::Error>> {
        self.bus.write_command(reg)?;
        self.bus.write_data(&value.to_le_bytes())
    }

    /// Frame and send one packet
    ///
    /// A transport failure mid-packet marks the driver uninitialised.
    pub fn send_packet(&mut self, packet: Packet<'_>) -> Result<(), LcmError<T::Error>> {
        let ops = self.encoder.encode(&packet).map_err(|err| {
            #[cfg(feature = "defmt")]
            defmt::warn!(
                "SSD2805: packet {=u8:#x} rejected ({} bytes): {}",
                packet.command,
                packet.payload.len(),
                err
            );
            packet_error::<T::Error>(err)
        })?;

        // A packet cut short leaves the bridge expecting the rest of the
        // declared length; only a fresh bring-up resynchronises it.
        if let Err(err) = self.execute(&ops) {
            #[cfg(feature = "defmt")]
            defmt::warn!("SSD2805: packet {=u8:#x} cut short", packet.command);
            self.initialized = false;
            self.encoder.reset();
            return Err(err);
        }
        Ok(())
    }

    fn execute(&mut self, ops: &[BusOp<'_>]) -> Result<(), LcmError<T::Error>> {
        for op in ops {
            match *op {
                BusOp::Register { reg, value } => self.write_bridge_register(reg, value)?,
                BusOp::Command(cmd) => self.bus.write_command(cmd)?,
                BusOp::DataByte(byte) => self.bus.write_register(byte)?,
                BusOp::Data(bytes) => self.bus.write_data(bytes)?,
            }
        }
        Ok(())
    }

    fn wait_for_lock(&mut self) -> LockOutcome {
        let mut waited = 0;
        while waited < PLL_LOCK_TIMEOUT_MS {
            match self.monitor.pll_locked() {
                Some(true) => return LockOutcome::Locked,
                Some(false) => {
                    self.delay.delay_ms(PLL_POLL_INTERVAL_MS);
                    waited += PLL_POLL_INTERVAL_MS;
                }
                None => {
                    self.delay.delay_ms(PLL_LOCK_TIMEOUT_MS - waited);
                    return LockOutcome::Assumed;
                }
            }
        }
        LockOutcome::TimedOut
    }

    fn configure_pll(&mut self) -> Result<(), LcmError<T::Error>> {
        self.write_bridge_register(registers::PLL_CONTROL, registers::PLL_DISABLE)?;
        self.delay.delay_ms(PLL_DISABLE_MS);
        self.write_bridge_register(registers::PLL_CONFIG, self.bridge.pll.register_value())?;
        self.write_bridge_register(registers::PLL_CONTROL, registers::PLL_ENABLE)?;

        let outcome = self.wait_for_lock();
        self.pll_lock = Some(outcome);
        match outcome {
            LockOutcome::Locked => {
                #[cfg(feature = "defmt")]
                defmt::debug!("SSD2805: PLL locked");
            }
            LockOutcome::Assumed => {
                #[cfg(feature = "defmt")]
                defmt::debug!("SSD2805: PLL lock assumed after {} ms", PLL_LOCK_TIMEOUT_MS);
            }
            LockOutcome::TimedOut => {
                #[cfg(feature = "defmt")]
                defmt::warn!("SSD2805: PLL not locked after {} ms", PLL_LOCK_TIMEOUT_MS);
            }
        }

        self.write_bridge_register(registers::TEST, registers::TEST_DEFAULT)?;
        self.write_bridge_register(registers::VC_CONTROL, registers::VC_DEFAULT)?;
        self.write_bridge_register(registers::CLOCK_CONTROL, registers::CLOCK_CONTROL_DEFAULT)?;
        self.delay.delay_ms(CLOCK_SETTLE_MS);
        Ok(())
    }

    fn configure_panel(&mut self) -> Result<(), LcmError<T::Error>> {
        let select = self.encoder.select_generic();
        self.execute(&[select])?;
        self.delay.delay_ms(FRAMING_SETTLE_MS);

        let ctx = StepContext {
            memory_access: 0,
            inversion: self.settings.display_inversion,
        };
        for step in PANEL_INIT {
            match step.resolve(&ctx) {
                ResolvedStep::Command { cmd, params } => {
                    self.send_packet(Packet::generic(cmd, params.as_slice()))?
                }
                ResolvedStep::Delay(ms) => self.delay.delay_ms(ms),
            }
        }
        Ok(())
    }

    fn bring_up(&mut self) -> Result<(), LcmError<T::Error>> {
        self.bus.configure_outputs()?;
        self.bus.set_level(Signal::Dc, true)?;
        self.bus.set_level(Signal::Rd, true)?;
        self.bus.set_level(Signal::Cs, true)?;

        self.bus.reset(&mut self.delay, ResetPulse::HighLowHigh)?;
        self.delay.delay_ms(RESET_HOLD_MS);
        self.bus.set_level(Signal::Cs, false)?;
        self.encoder.reset();

        let passes = if self.repeats_bringup() { 2 } else { 1 };
        for _ in 0..passes {
            self.configure_pll()?;
            self.configure_panel()?;
        }

        self.bus.set_level(Signal::Bk, true)
    }

    fn ensure_initialized(&self) -> Result<(), LcmError<T::Error>> {
        if self.initialized {
            Ok(())
        } else {
            #[cfg(feature = "defmt")]
            defmt::warn!("SSD2805: not initialized");
            Err(LcmError::NotInitialized)
        }
    }
}

impl<T: Transport, D: DelayNs, P: LockMonitor> Controller for Ssd2805Controller<T, D, P> {
    type Error = LcmError<T::Error>;

    fn init(&mut self) -> Result<(), Self::Error> {
        self.initialized = false;
        self.pll_lock = None;

        #[cfg(feature = "defmt")]
        defmt::info!("SSD2805: bring-up, repeat={}", self.repeats_bringup());

        self.bring_up()?;
        self.initialized = true;

        #[cfg(feature = "defmt")]
        defmt::info!("SSD2805: display on");

        Ok(())
    }

    fn deinit(&mut self) -> Result<(), Self::Error> {
        self.ensure_initialized()?;
        self.initialized = false;
        self.encoder.reset();
        Ok(())
    }

    fn set_window(&mut self, x0: u16, y0: u16, x1: u16, y1: u16) -> Result<(), Self::Error> {
        self.ensure_initialized()?;
        let Some(window) = Window::new(x0, y0, x1, y1) else {
            return Err(LcmError::InvalidArgument);
        };

        let columns = address_range(window.x0, window.x1);
        let rows = address_range(window.y0, window.y1);
        self.send_packet(Packet::compact(dcs::COLUMN_ADDRESS, &columns))?;
        self.send_packet(Packet::compact(dcs::ROW_ADDRESS, &rows))
    }

    fn write_pixels(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.ensure_initialized()?;
        if data.is_empty() {
            return Ok(());
        }
        self.send_packet(Packet::compact(dcs::MEMORY_WRITE, data))
    }

    fn is_initialized(&self) -> bool {
        self.initialized
    }
}
