pub mod app;
pub mod draw;
pub mod generators;
pub mod logging;
pub mod maze;
pub mod window;
