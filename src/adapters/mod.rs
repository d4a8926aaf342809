pub mod controllers;
pub mod dto;
pub mod error;
pub mod state;
pub mod terminal_host;
