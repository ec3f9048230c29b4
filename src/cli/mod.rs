pub mod logging;
pub mod preview;

pub use logging::{init_logging, init_test_logging};
