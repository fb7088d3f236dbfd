//! Entity types mapped to the `users` and `sample` tables

mod sample;
mod user;

pub use sample::Sample;
pub use user::{Name, User, UserResponse};
