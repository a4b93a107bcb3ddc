//! Audio Module
//!
//! WAV decoding and encoding through `hound`, plus frame rate conversion.

pub mod wav;
pub mod converter;

pub use wav::{WavAudio, AudioHeader, AudioProperties};
pub use converter::AudioConverter;
