pub mod gait;
pub mod oscillator;
