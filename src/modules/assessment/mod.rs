mod handlers;
pub mod routes;
mod scoring;
