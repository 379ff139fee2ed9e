pub mod sample;

#[cfg(feature = "mic")]
pub mod capture;

pub use sample::AudioSample;
