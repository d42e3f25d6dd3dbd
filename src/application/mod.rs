//! Application layer managing state and business workflows.
//!
//! This module coordinates between the domain layer and presentation layer,
//! managing the launch countdown, cart actions and the cart drawer view.

pub mod state;
pub mod view;

pub use state::*;
pub use view::*;
