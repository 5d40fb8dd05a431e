#[cfg(feature = "webhook")]
pub mod logging;
