//! Weather tools module.

pub mod get_weather;

pub use get_weather::{GetWeatherParams, GetWeatherTool, WeatherReport};
