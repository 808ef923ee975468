// src/core/mod.rs

pub mod alphabet;
pub mod renderer;
