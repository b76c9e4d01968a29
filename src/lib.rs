// src/lib.rs

//! zee: Quran and Hadith search library

pub mod config;
pub mod error;
pub mod gateway;
pub mod models;
pub mod pagination;
pub mod render;
pub mod services;
pub mod utils;
