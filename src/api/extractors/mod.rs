pub mod json;
pub mod public_id;
