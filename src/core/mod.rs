pub mod config;
pub mod filler;
pub mod library;
pub mod persist;
pub mod session;
pub mod template;
pub mod terminal;
pub mod validation;
