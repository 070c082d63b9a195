pub mod catalog;
pub mod components;
pub mod config;
pub mod game;
pub mod input;
pub mod render;
pub mod session;
pub mod systems;
pub mod ui;

#[cfg(test)]
mod tests;
