pub mod conversion;
pub mod random;
pub mod split;

pub use conversion::*;
pub use random::*;
pub use split::*;
