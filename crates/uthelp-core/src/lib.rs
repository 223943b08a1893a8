pub mod actions;
pub mod bootstrap;
pub mod catalog;
pub mod config;
pub mod controller;
pub mod error;
pub mod keys;
pub mod reducer;
pub mod state;

pub use actions::*;
pub use controller::*;
pub use error::*;
pub use keys::*;
pub use reducer::*;
pub use state::*;
