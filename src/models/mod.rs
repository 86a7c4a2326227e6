pub mod advice;
pub mod location;
pub mod plant;
pub mod weather;

pub use advice::*;
pub use location::*;
pub use plant::*;
pub use weather::*;
