pub mod analyze;
pub mod health;

pub use analyze::analyze;
pub use health::health_check;
