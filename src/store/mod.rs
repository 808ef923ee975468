// src/store/mod.rs

pub mod db;
pub mod words;
