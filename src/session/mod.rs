pub mod input;
pub mod policy;
pub mod race;
pub mod result;
pub mod wrap;
