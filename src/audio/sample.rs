use std::io::Cursor;
use std::path::Path;
use std::time::Duration;

pub const WAV_MIME: &str = "audio/wav";

/// A finished utterance. The payload is opaque to the dialogue engine,
/// which only asks whether it is empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioSample {
    bytes: Vec<u8>,
    mime: String,
    duration: Option<Duration>,
}

impl AudioSample {
    /// Wrap an already encoded payload of unknown duration.
    pub fn new(bytes: Vec<u8>, mime: impl Into<String>) -> Self {
        Self {
            bytes,
            mime: mime.into(),
            duration: None,
        }
    }

    /// Wrap a WAV payload. The duration is read from the header when it parses.
    pub fn from_wav_bytes(bytes: Vec<u8>) -> Self {
        let duration = wav_duration(&bytes);
        Self {
            bytes,
            mime: WAV_MIME.to_string(),
            duration,
        }
    }

    pub fn from_wav_file(path: impl AsRef<Path>) -> std::io::Result<Self> {
        Ok(Self::from_wav_bytes(std::fs::read(path)?))
    }

    /// Encode mono f32 PCM (-1.0..=1.0) as 16-bit WAV.
    pub fn from_pcm(samples: &[f32], sample_rate: u32) -> Result<Self, hound::Error> {
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };

        let mut cursor = Cursor::new(Vec::new());
        {
            let mut writer = hound::WavWriter::new(&mut cursor, spec)?;
            for &sample in samples {
                let sample_i16 = (sample.clamp(-1.0, 1.0) * i16::MAX as f32) as i16;
                writer.write_sample(sample_i16)?;
            }
            writer.finalize()?;
        }

        let duration = (sample_rate > 0)
            .then(|| Duration::from_secs_f64(samples.len() as f64 / sample_rate as f64));

        Ok(Self {
            bytes: cursor.into_inner(),
            mime: WAV_MIME.to_string(),
            duration,
        })
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn mime(&self) -> &str {
        &self.mime
    }

    pub fn duration(&self) -> Option<Duration> {
        self.duration
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// No payload, or a payload known to hold zero frames.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty() || self.duration.is_some_and(|d| d.is_zero())
    }
}

fn wav_duration(bytes: &[u8]) -> Option<Duration> {
    let reader = hound::WavReader::new(Cursor::new(bytes)).ok()?;
    let rate = reader.spec().sample_rate;
    if rate == 0 {
        return None;
    }
    // duration() counts frames, independent of channel count
    Some(Duration::from_secs_f64(reader.duration() as f64 / rate as f64))
}
