//! Client for the CloudBox file service: lists, uploads, downloads and
//! deletes files through presigned storage URLs.

pub mod adapters;
pub mod application;
pub mod domain;
pub mod services;

#[cfg(test)]
mod test_support;

pub use adapters::state::AppState;
pub use application::{
    coordinators::FileActions,
    error::ClientError,
    listing_cache::ListingCache,
    orchestrator::{TransferOrchestrator, UploadOutcome},
};
pub use domain::{
    config::client::{ClientConfig, RevertPolicy},
    models::{
        file::{FileRecord, LocalFile},
        folder::FolderScope,
        transfer::{PresignedDescriptor, TransferStatus, UploadPhase},
    },
};
