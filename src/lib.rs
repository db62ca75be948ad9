//! Colorized rendering of `git status --porcelain=v2` reports and tagged
//! serial logs.

pub mod config;
pub mod git;
pub mod input;
pub mod output;
pub mod porcelain;
pub mod render;
mod rules;
pub mod uartlog;
