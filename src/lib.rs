pub mod config;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod images;
pub mod models;
pub mod questionnaire;
pub mod routes;
pub mod store;
pub mod synthesis;

pub use handlers::AppState;
