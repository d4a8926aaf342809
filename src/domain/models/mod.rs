pub mod file;
pub mod folder;
pub mod transfer;
