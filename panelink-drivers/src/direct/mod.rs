//! Direct-parallel controllers
//!
//! Controllers that accept MIPI DCS commands straight off the parallel
//! bus. They differ only in their bring-up table, the memory access
//! control byte per orientation and the window offsets, so one driver
//! covers all of them through a constant [`ChipProfile`].

pub mod gc9a01;
pub mod st7789;
pub mod st7796;

use embedded_hal::delay::DelayNs;
use panelink_core::bringup::{dcs, ResolvedStep, StepContext};
use panelink_core::signal::RESET_HOLD_MS;
use panelink_core::traits::Window;
use panelink_core::{
    ChipSelectMode, ColorOrder, Controller, ControllerConfig, ControllerSettings, InitStep,
    LcmError, Orientation, ResetPulse, Signal, SignalBus,
};
use panelink_hal::Transport;

pub use gc9a01::GC9A01;
pub use st7789::ST7789;
pub use st7796::ST7796;

/// Memory access control bit selecting BGR subpixel order
pub const MADCTL_BGR: u8 = 0x08;

/// Fixed shift applied to window coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WindowOffset {
    /// Added to both column addresses
    pub x: u16,
    /// Added to both row addresses
    pub y: u16,
}

impl WindowOffset {
    /// No shift
    pub const NONE: Self = Self { x: 0, y: 0 };

    /// Shift columns only
    pub const fn columns(x: u16) -> Self {
        Self { x, y: 0 }
    }

    /// Shift rows only
    pub const fn rows(y: u16) -> Self {
        Self { x: 0, y }
    }
}

/// Everything chip-specific about a direct-parallel controller
#[derive(Debug)]
pub struct ChipProfile {
    /// Chip name, used in log output
    pub name: &'static str,
    /// Bring-up table run after the hardware reset
    pub init: &'static [InitStep],
    /// Memory access control byte per orientation (RGB order)
    pub memory_access: [u8; 4],
    /// Window offset per orientation
    pub offsets: [WindowOffset; 4],
}

impl ChipProfile {
    /// Memory access control byte for the given orientation and colour order
    pub fn memory_access(&self, orientation: Orientation, order: ColorOrder) -> u8 {
        let base = self.memory_access[orientation.index()];
        match order {
            ColorOrder::Rgb => base,
            ColorOrder::Bgr => base | MADCTL_BGR,
        }
    }

    /// Window offset for the given orientation
    pub fn offset(&self, orientation: Orientation) -> WindowOffset {
        self.offsets[orientation.index()]
    }

    /// Settings-dependent values for the bring-up table
    pub fn step_context(&self, settings: &ControllerSettings) -> StepContext {
        StepContext {
            memory_access: self.memory_access(settings.orientation, settings.color_order),
            inversion: settings.display_inversion,
        }
    }
}

/// Big-endian start/end address pair as sent with CASET/RASET
pub(crate) const fn address_range(start: u16, end: u16) -> [u8; 4] {
    let start = start.to_be_bytes();
    let end = end.to_be_bytes();
    [start[0], start[1], end[0], end[1]]
}

/// Run a bring-up table as plain command/register writes
pub(crate) fn run_table<T: Transport, D: DelayNs>(
    bus: &mut SignalBus<T>,
    delay: &mut D,
    table: &[InitStep],
    ctx: &StepContext,
) -> Result<(), LcmError<T::Error>> {
    for step in table {
        match step.resolve(ctx) {
            ResolvedStep::Command { cmd, params } => {
                bus.write_command_with(cmd, params.as_slice())?
            }
            ResolvedStep::Delay(ms) => delay.delay_ms(ms),
        }
    }
    Ok(())
}

/// Driver for controllers wired directly to the parallel bus
///
/// Chip select is asserted once after reset and held. Each register byte
/// is written on its own with the data/command line high.
pub struct DirectParallelController<T, D> {
    bus: SignalBus<T>,
    delay: D,
    settings: ControllerSettings,
    profile: &'static ChipProfile,
    initialized: bool,
}

impl<T, D> DirectParallelController<T, D> {
    /// Create an uninitialised driver
    ///
    /// No bus traffic until [`Controller::init`].
    pub fn new(config: ControllerConfig<T>, profile: &'static ChipProfile, delay: D) -> Self {
        let (settings, transport) = config.into_parts();
        Self {
            bus: SignalBus::new(transport, &settings, ChipSelectMode::Held),
            delay,
            settings,
            profile,
            initialized: false,
        }
    }

    /// Chip profile in use
    pub fn profile(&self) -> &'static ChipProfile {
        self.profile
    }

    /// Settings the driver was built with
    pub fn settings(&self) -> &ControllerSettings {
        &self.settings
    }

    /// Hand back the transport and delay
    pub fn release(self) -> (T, D) {
        (self.bus.into_inner(), self.delay)
    }
}

impl<T: Transport, D: DelayNs> DirectParallelController<T, D> {
    fn bring_up(&mut self) -> Result<(), LcmError<T::Error>> {
        self.bus.configure_outputs()?;
        self.bus.set_level(Signal::Rd, true)?;
        self.bus.set_level(Signal::Cs, true)?;

        self.bus.reset(&mut self.delay, ResetPulse::LowHigh)?;
        self.delay.delay_ms(RESET_HOLD_MS);
        self.bus.set_level(Signal::Cs, false)?;

        let ctx = self.profile.step_context(&self.settings);
        run_table(&mut self.bus, &mut self.delay, self.profile.init, &ctx)?;

        self.bus.set_level(Signal::Bk, true)
    }

    fn ensure_initialized(&self) -> Result<(), LcmError<T::Error>> {
        if self.initialized {
            Ok(())
        } else {
            #[cfg(feature = "defmt")]
            defmt::warn!("{}: not initialized", self.profile.name);
            Err(LcmError::NotInitialized)
        }
    }
}

impl<T: Transport, D: DelayNs> Controller for DirectParallelController<T, D> {
    type Error = LcmError<T::Error>;

    fn init(&mut self) -> Result<(), Self::Error> {
        self.initialized = false;

        #[cfg(feature = "defmt")]
        defmt::info!("{}: bring-up", self.profile.name);

        self.bring_up()?;
        self.initialized = true;

        #[cfg(feature = "defmt")]
        defmt::info!("{}: display on", self.profile.name);

        Ok(())
    }

    fn deinit(&mut self) -> Result<(), Self::Error> {
        self.ensure_initialized()?;
        self.initialized = false;
        Ok(())
    }

    fn set_window(&mut self, x0: u16, y0: u16, x1: u16, y1: u16) -> Result<(), Self::Error> {
        self.ensure_initialized()?;
        let Some(window) = Window::new(x0, y0, x1, y1) else {
            return Err(LcmError::InvalidArgument);
        };
        let offset = self.profile.offset(self.settings.orientation);

        let shift = |v: u16, by: u16| -> Result<u16, Self::Error> {
            v.checked_add(by).ok_or(LcmError::InvalidArgument)
        };
        let columns = address_range(shift(window.x0, offset.x)?, shift(window.x1, offset.x)?);
        let rows = address_range(shift(window.y0, offset.y)?, shift(window.y1, offset.y)?);

        self.bus.write_command_with(dcs::COLUMN_ADDRESS, &columns)?;
        self.bus.write_command_with(dcs::ROW_ADDRESS, &rows)?;
        self.bus.write_command(dcs::MEMORY_WRITE)
    }

    fn write_pixels(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.ensure_initialized()?;
        self.bus.write_data(data)
    }

    fn is_initialized(&self) -> bool {
        self.initialized
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use panelink_core::mock::{Event, MockDelay, MockError, MockLog, MockTransport, Tx};
    use panelink_core::PinAssignment;
    use panelink_hal::PinId;
    use std::vec;
    use std::vec::Vec;

    pub const DC: PinId = PinId(1);
    pub const RD: PinId = PinId(2);
    pub const CS: PinId = PinId(21);
    pub const RST: PinId = PinId(18);
    pub const BK: PinId = PinId(5);

    pub fn pins() -> PinAssignment {
        PinAssignment {
            dc: DC,
            rd: RD,
            cs: CS,
            rst: RST,
            bk: BK,
        }
    }

    pub fn controller(
        log: &MockLog,
        profile: &'static ChipProfile,
        orientation: Orientation,
        order: ColorOrder,
    ) -> DirectParallelController<MockTransport, MockDelay> {
        let config = ControllerConfig::builder()
            .pins(pins())
            .orientation(orientation)
            .color_order(order)
            .display_inversion(true)
            .transport(log.transport())
            .build()
            .unwrap();
        DirectParallelController::new(config, profile, log.delay())
    }

    /// Golden window sequence: CASET, RASET, RAMWR with shifted addresses
    pub fn window_bytes(x0: u16, y0: u16, x1: u16, y1: u16) -> Vec<Tx> {
        let mut out = vec![Tx::Command(dcs::COLUMN_ADDRESS)];
        out.extend(address_range(x0, x1).iter().map(|b| Tx::Data(vec![*b])));
        out.push(Tx::Command(dcs::ROW_ADDRESS));
        out.extend(address_range(y0, y1).iter().map(|b| Tx::Data(vec![*b])));
        out.push(Tx::Command(dcs::MEMORY_WRITE));
        out
    }

    static PLAIN: ChipProfile = ChipProfile {
        name: "plain",
        init: &[
            InitStep::MemoryAccess,
            InitStep::Inversion,
            panelink_core::bringup::cmd(dcs::SLEEP_OUT, &[]),
            panelink_core::bringup::delay_ms(120),
            panelink_core::bringup::cmd(dcs::DISPLAY_ON, &[]),
        ],
        memory_access: [0x00, 0xC0, 0x70, 0xA0],
        offsets: [
            WindowOffset::NONE,
            WindowOffset::rows(80),
            WindowOffset::NONE,
            WindowOffset::columns(80),
        ],
    };

    #[test]
    fn test_address_range_big_endian() {
        assert_eq!(address_range(0x0012, 0x013F), [0x00, 0x12, 0x01, 0x3F]);
    }

    #[test]
    fn test_memory_access_color_order() {
        assert_eq!(
            PLAIN.memory_access(Orientation::Rotation2, ColorOrder::Rgb),
            0x70
        );
        assert_eq!(
            PLAIN.memory_access(Orientation::Rotation2, ColorOrder::Bgr),
            0x78
        );
    }

    #[test]
    fn test_init_line_preparation_and_reset() {
        let log = MockLog::new();
        let mut lcd = controller(&log, &PLAIN, Orientation::Rotation0, ColorOrder::Rgb);

        lcd.init().unwrap();

        let events = log.events();
        assert_eq!(
            &events[..8],
            &[
                Event::Configure(vec![DC, RD, CS, RST, BK]),
                Event::Line(RD, true),
                Event::Line(CS, true),
                Event::Line(RST, false),
                Event::Delay(100),
                Event::Line(RST, true),
                Event::Delay(100),
                Event::Delay(100),
            ]
        );
        assert_eq!(events[8], Event::Line(CS, false));
        assert_eq!(events.last(), Some(&Event::Line(BK, true)));
        assert!(lcd.is_initialized());
    }

    #[test]
    fn test_table_resolution() {
        let log = MockLog::new();
        let mut lcd = controller(&log, &PLAIN, Orientation::Rotation3, ColorOrder::Bgr);

        lcd.init().unwrap();

        assert_eq!(
            log.transactions(DC),
            vec![
                Tx::Command(dcs::MEMORY_ACCESS),
                Tx::Data(vec![0xA8]),
                Tx::Command(dcs::INVERSION_ON),
                Tx::Command(dcs::SLEEP_OUT),
                Tx::Command(dcs::DISPLAY_ON),
            ]
        );
    }

    #[test]
    fn test_operations_require_init() {
        let log = MockLog::new();
        let mut lcd = controller(&log, &PLAIN, Orientation::Rotation0, ColorOrder::Rgb);

        assert_eq!(lcd.set_window(0, 0, 9, 9), Err(LcmError::NotInitialized));
        assert_eq!(lcd.write_pixels(&[1, 2]), Err(LcmError::NotInitialized));
        assert_eq!(lcd.deinit(), Err(LcmError::NotInitialized));
        assert!(log.events().is_empty());

        lcd.init().unwrap();
        lcd.deinit().unwrap();
        log.clear();

        assert_eq!(lcd.write_pixels(&[1, 2]), Err(LcmError::NotInitialized));
        assert!(log.events().is_empty());
    }

    #[test]
    fn test_inverted_window_rejected() {
        let log = MockLog::new();
        let mut lcd = controller(&log, &PLAIN, Orientation::Rotation0, ColorOrder::Rgb);
        lcd.init().unwrap();
        log.clear();

        assert_eq!(lcd.set_window(10, 0, 9, 9), Err(LcmError::InvalidArgument));
        assert_eq!(lcd.set_window(0, 10, 9, 9), Err(LcmError::InvalidArgument));
        assert!(log.events().is_empty());
    }

    #[test]
    fn test_window_offset_overflow_rejected() {
        let log = MockLog::new();
        let mut lcd = controller(&log, &PLAIN, Orientation::Rotation1, ColorOrder::Rgb);
        lcd.init().unwrap();

        assert_eq!(
            lcd.set_window(0, 0, 10, u16::MAX),
            Err(LcmError::InvalidArgument)
        );
    }

    #[test]
    fn test_window_per_orientation() {
        let cases = [
            (Orientation::Rotation0, window_bytes(0, 0, 239, 319)),
            (Orientation::Rotation1, window_bytes(0, 80, 239, 399)),
            (Orientation::Rotation2, window_bytes(0, 0, 239, 319)),
            (Orientation::Rotation3, window_bytes(80, 0, 319, 319)),
        ];
        for (orientation, expected) in cases {
            let log = MockLog::new();
            let mut lcd = controller(&log, &PLAIN, orientation, ColorOrder::Rgb);
            lcd.init().unwrap();
            log.clear();

            lcd.set_window(0, 0, 239, 319).unwrap();

            assert_eq!(log.transactions(DC), expected, "{:?}", orientation);
        }
    }

    #[test]
    fn test_dc_set_right_before_each_write() {
        let log = MockLog::new();
        let mut lcd = controller(&log, &PLAIN, Orientation::Rotation0, ColorOrder::Rgb);
        lcd.init().unwrap();
        log.clear();

        lcd.set_window(1, 2, 3, 4).unwrap();

        let events = log.events();
        for pair in events.chunks(2) {
            match pair {
                [Event::Line(DC, _), Event::Write(bytes)] => assert_eq!(bytes.len(), 1),
                other => panic!("unexpected events {:?}", other),
            }
        }
    }

    #[test]
    fn test_write_pixels_single_data_write() {
        let log = MockLog::new();
        let mut lcd = controller(&log, &PLAIN, Orientation::Rotation0, ColorOrder::Rgb);
        lcd.init().unwrap();
        log.clear();

        lcd.write_pixels(&[0xF8, 0x00, 0x07, 0xE0]).unwrap();

        assert_eq!(
            log.events(),
            vec![
                Event::Line(DC, true),
                Event::Write(vec![0xF8, 0x00, 0x07, 0xE0]),
            ]
        );
    }

    #[test]
    fn test_empty_write_is_noop() {
        let log = MockLog::new();
        let mut lcd = controller(&log, &PLAIN, Orientation::Rotation0, ColorOrder::Rgb);
        lcd.init().unwrap();
        log.clear();

        lcd.write_pixels(&[]).unwrap();

        assert!(log.events().is_empty());
    }

    #[test]
    fn test_failed_init_leaves_uninitialized() {
        let log = MockLog::new();
        log.fail_writes_after(2);
        let mut lcd = controller(&log, &PLAIN, Orientation::Rotation0, ColorOrder::Rgb);

        assert!(matches!(lcd.init(), Err(LcmError::Transport(_))));
        assert!(!lcd.is_initialized());
        assert_eq!(lcd.write_pixels(&[0]), Err(LcmError::NotInitialized));
    }

    #[test]
    fn test_release_returns_transport() {
        let log = MockLog::new();
        let lcd = controller(&log, &PLAIN, Orientation::Rotation0, ColorOrder::Rgb);

        let (mut transport, _delay) = lcd.release();
        transport.write(&[0xAA]).unwrap();

        assert_eq!(log.written_bytes(), vec![0xAA]);
    }

    #[test]
    fn test_usable_as_trait_object() {
        let log = MockLog::new();
        let mut lcd = controller(&log, &PLAIN, Orientation::Rotation0, ColorOrder::Rgb);
        let dynamic: &mut dyn Controller<Error = LcmError<MockError>> = &mut lcd;

        dynamic.init().unwrap();
        dynamic
            .set_window_rect(Window::new(0, 0, 1, 1).unwrap())
            .unwrap();

        assert!(dynamic.is_initialized());
    }
}
