mod ident;
mod password;

pub use ident::generate_id;
pub use password::{hash_password, verify_password, Password, PasswordHashString};
