#![forbid(unsafe_code)]

pub mod content;
pub mod error;
pub mod guard;
pub mod login;
pub mod model;

pub use error::Error;
pub use guard::{Decision, Route, authorize, guard_route};
pub use login::{Cpf, CpfError, Credentials, format_cpf};
