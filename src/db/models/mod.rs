mod assessment;
mod assignment;
mod class;
mod class_request;
mod content;
mod enrollment;
mod session;
mod user;

pub use assessment::*;
pub use assignment::*;
pub use class::*;
pub use class_request::*;
pub use content::*;
pub use enrollment::*;
pub use session::*;
pub use user::*;
