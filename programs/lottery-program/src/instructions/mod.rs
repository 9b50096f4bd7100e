pub mod convert_fees;
pub mod enter_lottery;
pub mod get_refund;
pub mod initialize;
pub mod open_round;
pub mod publish_randomness;
pub mod queries;
pub mod select_winner;
pub mod withdraw;

pub use convert_fees::*;
pub use enter_lottery::*;
pub use get_refund::*;
pub use initialize::*;
pub use open_round::*;
pub use publish_randomness::*;
pub use queries::*;
pub use select_winner::*;
pub use withdraw::*;
