pub mod bom;
pub mod config;
pub mod license;

pub use bom::{handle_bom, BomArgs};
pub use config::handle_config;
pub use license::handle_license;
