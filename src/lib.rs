//! launchshop - Terminal Storefront Library
//!
//! A launch-countdown storefront with a persistent cart that hands orders
//! off to a WhatsApp deep link.

pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod presentation;

pub use domain::*;
pub use application::*;
