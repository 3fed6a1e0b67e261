pub mod pinger;
pub mod round;
pub mod status;
pub mod types;
