//! Main module for treemancer library functionality

pub mod ast;
pub mod config;
pub mod creator;
pub mod error;
pub mod formats;
pub mod lexer;
pub mod parser;
pub mod processor;
pub mod source;
pub mod stats;
pub mod testing;
