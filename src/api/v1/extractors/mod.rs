pub mod identity;

pub use identity::{AuthIdentity, Identity};
