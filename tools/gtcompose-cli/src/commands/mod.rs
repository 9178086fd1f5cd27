pub mod config;
pub mod example;
pub mod inspect;
