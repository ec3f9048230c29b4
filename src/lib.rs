pub mod cli;
pub mod commands;
pub mod errors;
pub mod planner;
