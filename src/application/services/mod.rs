mod host_surface;
mod metadata_service;
mod transfer_service;

pub use host_surface::HostSurface;
pub use metadata_service::MetadataService;
pub use transfer_service::TransferService;
