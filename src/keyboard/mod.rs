pub mod display;
pub mod history;
pub mod model;
