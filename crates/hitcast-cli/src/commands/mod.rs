pub mod harvest;
pub mod train;

pub use harvest::run_harvest;
pub use train::run_train;
