pub mod config_loader;

pub use config_loader::load_config_file;
