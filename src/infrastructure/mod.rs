//! Platform helpers: where the shell keeps its files.

pub mod paths;

pub use paths::{expand_tilde, get_data_dir};
