pub mod projection_service;
pub mod sanitize_service;
pub mod validation_service;
