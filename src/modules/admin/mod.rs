mod handlers;
pub mod routes;
