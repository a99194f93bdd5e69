// Greetcard Library
// Renders a short text, rotated and styled, onto a fixed card background

pub mod compositor;
pub mod config;
pub mod constants;
pub mod error;
pub mod form;
pub mod handler;
pub mod logging;
pub mod page;
pub mod pipeline;
pub mod server;
