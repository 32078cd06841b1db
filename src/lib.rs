pub mod calculator;
pub mod config;
pub mod output;
pub mod replay;
pub mod scoring;
pub mod stderr_buffer;
pub mod tui;
