//! Main module for critic library functionality

pub mod grammar;
pub mod lexing;
pub mod pipeline;
pub mod rendering;
pub mod scanning;
pub mod segment;
pub mod testing;
