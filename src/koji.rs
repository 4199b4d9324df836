//! Main module for koji library functionality

pub mod config;
pub mod document;
pub mod formats;
pub mod input;
pub mod lexing;
pub mod mode;
pub mod range;
pub mod testing;
pub mod token;
