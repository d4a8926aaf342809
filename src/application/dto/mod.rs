pub mod files_dto;
pub mod folders_dto;
