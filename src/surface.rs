// The pieces of the host the simulation talks to: something to draw on,
// the current viewport size, and (for hosts that own the loop) a frame clock

use crate::color::Color;

pub trait Surface {
    /// Wipes the whole drawing area, called once per frame before any circles are drawn.
    fn clear(&mut self, width: f64, height: f64);

    fn draw_circle(&mut self, x: f64, y: f64, radius: f64, fill: Color, stroke: Color);
}

pub trait Viewport {
    /// Current (width, height), read together so a resize never tears between the two.
    fn viewport_size(&self) -> (f64, f64);
}

pub trait FrameClock: Viewport {
    /// Waits for the next frame boundary. Returns false once the host is shutting down.
    fn next_frame(&mut self) -> bool;
}
