// Library target shared by the binary, the integration tests and the criterion
// benchmark. The terminal event source lives in the binary.

pub mod app;
pub mod config;
pub mod error;
pub mod keyboard;
pub mod logging;
pub mod session;
pub mod text;
pub mod ui;
