pub mod cli;
pub mod core;
pub mod engine;
pub mod expression;
pub mod operation;
pub mod reflection;
pub mod services;
pub mod strategies;
