mod account;
mod budget;
mod category;
mod money;
mod transaction;

pub use account::*;
pub use budget::*;
pub use category::*;
pub use money::*;
pub use transaction::*;
