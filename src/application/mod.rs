pub mod coordinators;
pub mod dto;
pub mod error;
pub mod listing_cache;
pub mod orchestrator;
pub mod services;
pub mod status;
