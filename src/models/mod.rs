pub mod env;
pub mod token;
