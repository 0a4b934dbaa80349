pub mod bod;
pub mod boa;
pub mod stages;

pub use bod::bod;
pub use boa::boa;
pub use stages::{bod_limited, bod_stage_1, bod_stage_2, bod_stage_3};
