//! Hardware and data-source abstraction traits
//!
//! These traits define the interface between the display core and the
//! things it does not own: the physical serial chain and the font tables.

pub mod bus;
pub mod glyph;

pub use bus::BusTransport;
pub use glyph::GlyphStore;
