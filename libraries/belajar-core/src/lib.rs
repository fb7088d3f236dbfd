//! Belajar Core
//!
//! Entity shapes shared by the database exercises.
//!
//! The types here carry no behavior: they are scan targets and insert
//! payloads. Row mapping (`sqlx::FromRow`) is enabled with the
//! `sqlx-support` feature so the crate stays usable without a driver.
//!
//! # Example
//!
//! ```rust
//! use belajar_core::types::{Name, User};
//!
//! let user = User {
//!     id: "1".to_string(),
//!     name: Name::full("Adib", "Hauzan", "Sofyan"),
//!     password: "adib123".to_string(),
//!     information: "never stored".to_string(),
//! };
//! assert_eq!(user.name.first_name.as_deref(), Some("Adib"));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod types;

pub use types::{Name, Sample, User, UserResponse};
