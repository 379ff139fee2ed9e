use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use ringbuf::traits::{Consumer, Producer, Split};
use ringbuf::{HeapCons, HeapRb};
use tracing::{error, info, warn};

use super::sample::AudioSample;
use crate::config::CaptureConfig;

/// Push-to-talk microphone recorder.
///
/// `start` opens the default input device and buffers mono frames into a
/// ring buffer; `stop` closes the stream and hands back the clip as WAV.
/// Anything past `max_seconds` is dropped.
pub struct Recorder {
    config: CaptureConfig,
    active: Option<ActiveCapture>,
}

struct ActiveCapture {
    _stream: cpal::Stream,
    consumer: HeapCons<f32>,
    sample_rate: u32,
}

impl Recorder {
    pub fn new(config: CaptureConfig) -> Self {
        Self { config, active: None }
    }

    pub fn is_recording(&self) -> bool {
        self.active.is_some()
    }

    pub fn start(&mut self) -> Result<(), anyhow::Error> {
        if self.active.is_some() {
            return Err(anyhow::anyhow!("Recorder already running"));
        }

        let host = cpal::default_host();
        let device = host
            .default_input_device()
            .ok_or_else(|| anyhow::anyhow!("No input device available"))?;

        info!("Audio Input Device: {}", device.name().unwrap_or_default());

        let config = select_config(&device, self.config.sample_rate_hint)?;
        let sample_rate = config.sample_rate().0;
        let channels = config.channels() as usize;

        let capacity = (sample_rate as usize * self.config.max_seconds as usize).max(1);
        let (producer, consumer) = HeapRb::<f32>::new(capacity).split();

        info!("Audio Config Selected: Rate={}Hz, Channels={}", sample_rate, channels);

        let err_fn = |err| error!("an error occurred on stream: {}", err);

        let stream = match config.sample_format() {
            cpal::SampleFormat::F32 => {
                let mut producer = producer;
                device.build_input_stream(
                    &config.into(),
                    move |data: &[f32], _: &_| write_frames(data, channels, &mut producer),
                    err_fn,
                    None,
                )?
            }
            cpal::SampleFormat::I16 => {
                let mut producer = producer;
                device.build_input_stream(
                    &config.into(),
                    move |data: &[i16], _: &_| write_frames_i16(data, channels, &mut producer),
                    err_fn,
                    None,
                )?
            }
            _ => return Err(anyhow::anyhow!("Unsupported sample format")),
        };

        stream.play()?;

        self.active = Some(ActiveCapture {
            _stream: stream,
            consumer,
            sample_rate,
        });
        Ok(())
    }

    /// Stop recording and return the captured clip.
    pub fn stop(&mut self) -> Result<AudioSample, anyhow::Error> {
        let ActiveCapture {
            _stream: stream,
            mut consumer,
            sample_rate,
        } = self
            .active
            .take()
            .ok_or_else(|| anyhow::anyhow!("Recorder is not running"))?;

        // Close the device before draining so no frames land after the snapshot
        drop(stream);

        let frames: Vec<f32> = consumer.pop_iter().collect();
        if frames.len() >= sample_rate as usize * self.config.max_seconds as usize {
            warn!("Recording hit the {}s limit; tail dropped", self.config.max_seconds);
        }
        info!("Recorded {} frames at {}Hz", frames.len(), sample_rate);

        Ok(AudioSample::from_pcm(&frames, sample_rate)?)
    }
}

fn select_config(
    device: &cpal::Device,
    rate_hint: Option<u32>,
) -> Result<cpal::SupportedStreamConfig, anyhow::Error> {
    if let Some(rate) = rate_hint {
        for config_range in device.supported_input_configs()? {
            if config_range.min_sample_rate().0 <= rate && config_range.max_sample_rate().0 >= rate {
                return Ok(config_range.with_sample_rate(cpal::SampleRate(rate)));
            }
        }
        warn!("Input device does not support {}Hz; using its default", rate);
    }
    Ok(device.default_input_config()?)
}

// Downmix interleaved frames to mono. A full buffer drops input (lossy).
fn write_frames<P>(input: &[f32], channels: usize, producer: &mut P)
where
    P: Producer<Item = f32>,
{
    for frame in input.chunks(channels.max(1)) {
        let mono = frame.iter().sum::<f32>() / frame.len() as f32;
        let _ = producer.try_push(mono);
    }
}

fn write_frames_i16<P>(input: &[i16], channels: usize, producer: &mut P)
where
    P: Producer<Item = f32>,
{
    for frame in input.chunks(channels.max(1)) {
        let mono = frame.iter().map(|&s| s as f32 / i16::MAX as f32).sum::<f32>() / frame.len() as f32;
        let _ = producer.try_push(mono);
    }
}
