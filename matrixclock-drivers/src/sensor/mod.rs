//! Sensors

pub mod light;
