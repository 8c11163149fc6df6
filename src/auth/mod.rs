mod claims;
pub mod jwt;

pub use jwt::{AdminUser, JwtKeys};
