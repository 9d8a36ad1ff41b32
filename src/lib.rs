pub mod config;
pub mod game;
pub mod headless;
pub mod input;
pub mod renderer;
pub mod reward;
pub mod session;
pub mod snake;
pub mod terminal_runtime;
pub mod ui;
