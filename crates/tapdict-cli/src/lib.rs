pub mod commands;
pub mod keys;
