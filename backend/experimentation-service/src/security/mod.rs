pub mod jwt;

pub use jwt::{decode_token, Claims, TokenError};
