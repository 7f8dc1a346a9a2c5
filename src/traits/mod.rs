pub mod controller;
pub mod input;
pub mod transport;

pub use controller::*;
pub use input::*;
pub use transport::*;
