//! Wire-level entities mirroring the remote API's JSON shapes.
//!
//! Every struct here is a snapshot of server-authoritative data. Field
//! names follow the API's camelCase convention with `_id` primary keys.

mod cart;
mod chat;
mod order;
mod product;
mod slider;
mod user;

pub use cart::{Cart, CartCount, CartItem};
pub use chat::{Conversation, Message};
pub use order::{
    CleanupResult, Order, OrderItem, OrderPage, OrderStats, ProductRef, ShippingAddress, UserRef,
};
pub use product::{Category, Product};
pub use slider::Slider;
pub use user::User;
