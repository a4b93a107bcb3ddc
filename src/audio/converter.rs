//! Frame rate conversion

use ndarray::{Array1, Array2, ArrayView1};
use crate::audio::WavAudio;
use crate::error::{WavShrinkError, Result};

pub struct AudioConverter;

impl AudioConverter {
    /// Resample every channel to `target_frame_rate` using linear interpolation.
    /// Bit depth, sample format and channel count are carried over unchanged.
    pub fn convert_frame_rate(audio: &WavAudio, target_frame_rate: u32) -> Result<WavAudio> {
        if target_frame_rate == 0 {
            return Err(WavShrinkError::processing("Target frame rate must be at least 1 Hz"));
        }
        if audio.sample_rate() == target_frame_rate {
            return Ok(audio.clone());
        }

        let ratio = target_frame_rate as f64 / audio.sample_rate() as f64;
        let old_length = audio.total_frames();
        // round up so the output never runs shorter than the input
        let new_length = (old_length as u64 * target_frame_rate as u64)
            .div_ceil(audio.sample_rate() as u64) as usize;

        let mut frames = Array2::zeros((new_length, audio.frames().ncols()));
        if new_length > 0 {
            for (channel, column) in audio.frames().columns().into_iter().enumerate() {
                let resampled = Self::resample_channel(column, new_length, ratio);
                frames.column_mut(channel).assign(&resampled);
            }
        }

        Ok(WavAudio::from_frames(
            target_frame_rate,
            audio.bits_per_sample(),
            audio.sample_format(),
            frames,
        ))
    }

    fn resample_channel(data: ArrayView1<f64>, new_length: usize, ratio: f64) -> Array1<f64> {
        let old_length = data.len();

        Array1::from_shape_fn(new_length, |i| {
            let old_pos = i as f64 / ratio;
            let old_index = old_pos.floor() as usize;
            let fraction = old_pos - old_index as f64;

            if old_index >= old_length - 1 {
                data[old_length - 1]
            } else {
                data[old_index] + (data[old_index + 1] - data[old_index]) * fraction
            }
        })
    }
}
