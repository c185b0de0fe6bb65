//! Token claims, subject identifiers, secrets, and caller identification.

pub mod body;
pub mod header;
pub mod id;
pub mod identification;
pub mod secret;

pub use body::*;
pub use header::*;
pub use id::*;
pub use identification::*;
pub use secret::*;
