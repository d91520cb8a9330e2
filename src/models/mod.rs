pub mod config;

pub use config::{Mode, PickerConfig, PickerOverrides, CONFIG_ENV};
