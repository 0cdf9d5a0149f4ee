pub mod analysis;
pub mod conversion;
pub mod finding;
pub mod inquiry;
pub mod interaction;
pub mod opportunity;
pub mod prospect;
