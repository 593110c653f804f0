// Infrastructure layer - Configuration, storage, wire formats and HTTP helpers
pub mod config;
pub mod http_response;
pub mod memory_repository;
pub mod seed;
pub mod xml_codec;
