pub mod analyze;
pub mod fix;
pub mod output;
pub mod pool;
