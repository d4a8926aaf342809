pub mod file_controller;
pub mod folder_controller;
pub mod health_controller;
