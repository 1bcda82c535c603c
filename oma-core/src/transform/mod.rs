//! Normalization of raw entities into sensor geometry.

mod annotations;
mod assemble;
mod connectivity;
mod dedup;
mod forces;
mod setups;
mod structural;

pub use annotations::*;
pub use assemble::*;
pub use connectivity::*;
pub use dedup::*;
pub use forces::*;
pub use setups::*;
pub use structural::*;
