pub mod label;
pub mod report;
pub mod site;
pub mod store;
mod util;

pub use label::*;
pub use report::*;
pub use site::*;
pub use store::*;
pub use util::*;
