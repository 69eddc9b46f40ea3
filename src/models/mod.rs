pub mod price;
pub mod variant;

pub use price::*;
pub use variant::*;
