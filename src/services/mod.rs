pub mod auth;
pub mod content_service;
pub mod id_codec;
pub mod risk;
pub mod session;
pub mod user_service;
