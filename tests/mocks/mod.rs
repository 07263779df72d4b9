pub mod log_buffer;
pub mod media_tool;
