pub mod confirm;
pub mod constants;
pub mod log_record;
pub mod logging;
pub mod main_helper;
pub mod playground;
pub mod prompt_shape;
pub mod router;
pub mod specs;
pub mod str_utils;
pub mod theme;
pub mod toasts;
pub mod types;

pub use types::*;

pub use main_helper::{Args, OutputFormat};
