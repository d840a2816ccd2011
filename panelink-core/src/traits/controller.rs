//! Display controller contract

/// Inclusive pixel rectangle in controller coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Window {
    pub x0: u16,
    pub y0: u16,
    pub x1: u16,
    pub y1: u16,
}

impl Window {
    /// Create a window, rejecting inverted ranges
    pub const fn new(x0: u16, y0: u16, x1: u16, y1: u16) -> Option<Self> {
        if x0 > x1 || y0 > y1 {
            None
        } else {
            Some(Self { x0, y0, x1, y1 })
        }
    }
}

/// Trait for display controller drivers
///
/// One implementation per supported controller. A driver is constructed
/// without bus traffic and becomes usable once [`init`](Self::init)
/// succeeds. Operations are strictly sequential; callers needing dynamic
/// dispatch hold a `&mut dyn Controller<Error = E>`.
pub trait Controller {
    /// Error type for controller operations
    type Error;

    /// Run the hardware reset and the chip bring-up sequence
    ///
    /// Blocks for the reset hold times and the chip's settle delays.
    /// Asserts the backlight once the panel is on. On failure the driver
    /// stays uninitialised.
    fn init(&mut self) -> Result<(), Self::Error>;

    /// Release driver state
    ///
    /// Pins and backlight are left as they are; the panel keeps showing
    /// its last frame until power is removed.
    fn deinit(&mut self) -> Result<(), Self::Error>;

    /// Program the addressable window for the next pixel write
    ///
    /// Coordinates are inclusive. Pixels then stream in raster order.
    fn set_window(&mut self, x0: u16, y0: u16, x1: u16, y1: u16) -> Result<(), Self::Error>;

    /// Stream raw framebuffer bytes into the current window
    ///
    /// An empty slice is a successful no-op.
    fn write_pixels(&mut self, data: &[u8]) -> Result<(), Self::Error>;

    /// Check if [`init`](Self::init) has completed and no
    /// [`deinit`](Self::deinit) followed
    fn is_initialized(&self) -> bool;

    /// Program a window from a [`Window`]
    fn set_window_rect(&mut self, window: Window) -> Result<(), Self::Error> {
        self.set_window(window.x0, window.y0, window.x1, window.y1)
    }
}

impl<C: Controller + ?Sized> Controller for &mut C {
    type Error = C::Error;

    fn init(&mut self) -> Result<(), Self::Error> {
        C::init(self)
    }

    fn deinit(&mut self) -> Result<(), Self::Error> {
        C::deinit(self)
    }

    fn set_window(&mut self, x0: u16, y0: u16, x1: u16, y1: u16) -> Result<(), Self::Error> {
        C::set_window(self, x0, y0, x1, y1)
    }

    fn write_pixels(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        C::write_pixels(self, data)
    }

    fn is_initialized(&self) -> bool {
        C::is_initialized(self)
    }
}
