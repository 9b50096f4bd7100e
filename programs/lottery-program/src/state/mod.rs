pub use config::*;
pub use credit::*;
pub use ledger::*;
pub use randomness_feed::*;
pub use round::*;
pub use vault::*;

pub mod config;
pub mod credit;
pub mod ledger;
pub mod randomness_feed;
pub mod round;
pub mod vault;
