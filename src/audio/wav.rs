//! WAV audio file decoding and encoding

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use ndarray::Array2;
use crate::error::{WavShrinkError, Result};
use crate::processing::estimator;

/// Audio parameters that drive the size estimate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AudioProperties {
    pub frame_rate: u32,
    pub bit_depth: u16,
    pub channel_count: u16,
    pub duration_seconds: f64,
}

impl AudioProperties {
    pub fn estimated_size_kb(&self) -> f64 {
        estimator::estimate_size_kb(
            self.frame_rate,
            self.bit_depth,
            self.channel_count,
            self.duration_seconds,
        )
    }
}

#[derive(Debug, Clone)]
pub struct AudioHeader {
    pub sample_rate: u32,
    pub channels: u16,
    pub bits_per_sample: u16,
    pub sample_format: SampleFormat,
    pub total_frames: usize,
    pub duration: f64,
}

impl AudioHeader {
    pub fn new(
        sample_rate: u32,
        channels: u16,
        bits_per_sample: u16,
        sample_format: SampleFormat,
        total_frames: usize,
    ) -> Self {
        let duration = if sample_rate == 0 {
            0.0
        } else {
            total_frames as f64 / sample_rate as f64
        };

        Self {
            sample_rate,
            channels,
            bits_per_sample,
            sample_format,
            total_frames,
            duration,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.sample_rate == 0 {
            return Err(WavShrinkError::decode("Sample rate cannot be 0"));
        }

        if self.channels == 0 {
            return Err(WavShrinkError::decode("Channel count cannot be 0"));
        }

        match self.sample_format {
            SampleFormat::Float if self.bits_per_sample != 32 => Err(WavShrinkError::decode(
                format!("Unsupported float bit depth: {}", self.bits_per_sample),
            )),
            SampleFormat::Int if self.bits_per_sample == 0 || self.bits_per_sample > 32 => {
                Err(WavShrinkError::decode(
                    format!("Unsupported integer bit depth: {}", self.bits_per_sample),
                ))
            }
            _ => Ok(()),
        }
    }

    pub fn to_wav_spec(&self) -> WavSpec {
        WavSpec {
            channels: self.channels,
            sample_rate: self.sample_rate,
            bits_per_sample: self.bits_per_sample,
            sample_format: self.sample_format,
        }
    }
}

/// Decoded WAV audio. Samples are kept at their native scale, one row per
/// frame and one column per channel.
#[derive(Debug, Clone)]
pub struct WavAudio {
    pub header: AudioHeader,
    pub frames: Array2<f64>,
}

impl WavAudio {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let reader = WavReader::open(path).map_err(|e| {
            WavShrinkError::decode(format!("Cannot open WAV file {}: {}", path.display(), e))
        })?;

        let spec = reader.spec();
        let channels = spec.channels as usize;
        let total_frames = if channels == 0 { 0 } else { reader.len() as usize / channels };
        let header = AudioHeader::new(
            spec.sample_rate,
            spec.channels,
            spec.bits_per_sample,
            spec.sample_format,
            total_frames,
        );
        header.validate()?;

        let mut samples = read_samples(reader)?;
        samples.truncate(total_frames * channels);

        let frames = Array2::from_shape_vec((total_frames, channels), samples)
            .map_err(|e| WavShrinkError::decode(format!("Malformed sample data: {}", e)))?;

        Ok(WavAudio { header, frames })
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();

        let file = File::create(path).map_err(|e| {
            WavShrinkError::encode(format!("Cannot create output file {}: {}", path.display(), e))
        })?;

        let spec = self.header.to_wav_spec();
        let mut writer = WavWriter::new(BufWriter::new(file), spec)
            .map_err(|e| WavShrinkError::encode(format!("Cannot create WAV writer: {}", e)))?;

        let write_err = |e: hound::Error| WavShrinkError::encode(format!("Failed to write sample: {}", e));

        match spec.sample_format {
            SampleFormat::Float => {
                for &sample in self.frames.iter() {
                    writer.write_sample(sample as f32).map_err(write_err)?;
                }
            }
            SampleFormat::Int => {
                let (min, max) = int_range(spec.bits_per_sample);
                for &sample in self.frames.iter() {
                    let value = sample.round().clamp(min, max) as i32;
                    writer.write_sample(value).map_err(write_err)?;
                }
            }
        }

        writer
            .finalize()
            .map_err(|e| WavShrinkError::encode(format!("Failed to finalize WAV writing: {}", e)))?;

        Ok(())
    }

    pub fn from_frames(
        sample_rate: u32,
        bits_per_sample: u16,
        sample_format: SampleFormat,
        frames: Array2<f64>,
    ) -> Self {
        let header = AudioHeader::new(
            sample_rate,
            frames.ncols() as u16,
            bits_per_sample,
            sample_format,
            frames.nrows(),
        );

        WavAudio { header, frames }
    }

    pub fn properties(&self) -> AudioProperties {
        AudioProperties {
            frame_rate: self.header.sample_rate,
            bit_depth: self.header.bits_per_sample,
            channel_count: self.header.channels,
            duration_seconds: self.header.duration,
        }
    }

    pub fn frames(&self) -> &Array2<f64> {
        &self.frames
    }

    pub fn sample_rate(&self) -> u32 {
        self.header.sample_rate
    }

    pub fn channels(&self) -> u16 {
        self.header.channels
    }

    pub fn bits_per_sample(&self) -> u16 {
        self.header.bits_per_sample
    }

    pub fn sample_format(&self) -> SampleFormat {
        self.header.sample_format
    }

    pub fn total_frames(&self) -> usize {
        self.header.total_frames
    }

    pub fn duration(&self) -> f64 {
        self.header.duration
    }
}

fn read_samples<R: std::io::Read>(mut reader: WavReader<R>) -> Result<Vec<f64>> {
    let read_err = |e: hound::Error| WavShrinkError::decode(format!("Failed to read sample: {}", e));

    match reader.spec().sample_format {
        SampleFormat::Float => reader
            .samples::<f32>()
            .map(|s| s.map(f64::from).map_err(read_err))
            .collect(),
        SampleFormat::Int => reader
            .samples::<i32>()
            .map(|s| s.map(f64::from).map_err(read_err))
            .collect(),
    }
}

fn int_range(bits: u16) -> (f64, f64) {
    let max = (1i64 << (bits - 1)) - 1;
    (-(max as f64) - 1.0, max as f64)
}
