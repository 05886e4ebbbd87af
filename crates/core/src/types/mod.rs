//! Newtype wrappers and enums shared across the workspace.

mod email;
mod id;
mod status;

pub use email::{Email, EmailError};
pub use id::*;
pub use status::{OrderStatus, PaymentStatus, Role};
