pub mod models;
pub mod cart;
pub mod launch;
pub mod money;
pub mod order;
pub mod errors;

pub use models::*;
pub use cart::*;
pub use launch::*;
pub use money::*;
pub use order::*;
pub use errors::*;
