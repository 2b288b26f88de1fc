//! Tool definitions module.
//!
//! This module exports all available tool definitions.
//! Each tool is defined in its own file for better maintainability.

pub mod common;
pub mod math;
pub mod weather;

pub use math::{AddTool, ArithmeticParams, ArithmeticResult, MultiplyTool};
pub use weather::{GetWeatherParams, GetWeatherTool, WeatherReport};
