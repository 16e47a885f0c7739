//! Domain types for AlphaScreen.

pub mod bar;

pub use bar::Bar;
