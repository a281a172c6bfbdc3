// src/core/mod.rs
pub mod dictionary;
pub mod engine;
pub mod grid;
pub mod sentence;
pub mod speller;
pub mod types;
