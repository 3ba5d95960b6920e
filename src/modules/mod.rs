pub mod admin;
pub mod assessment;
pub mod auth;
pub mod student;
pub mod teacher;
