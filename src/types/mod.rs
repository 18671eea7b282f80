pub mod build_args;
pub mod cleanup_guard;
pub mod config;
pub mod frame_delay;
pub mod frame_source;
