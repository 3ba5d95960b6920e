mod context;
mod password;
mod policy;

pub use context::{bearer_token, AuthContext};
pub use password::{generate_session_token, hash_password, verify_password};
pub use policy::{can_access, Action, Resource};
