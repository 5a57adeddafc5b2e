pub mod download_url;
pub mod errors;
pub mod handler;
pub mod params;
pub mod services;
pub mod token;
