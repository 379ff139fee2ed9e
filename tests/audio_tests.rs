use std::time::Duration;

use voicebank::audio::AudioSample;

#[test]
fn test_pcm_is_encoded_as_wav() {
    let samples = vec![0.25_f32; 16_000];
    let sample = AudioSample::from_pcm(&samples, 16_000).unwrap();

    assert_eq!(sample.mime(), "audio/wav");
    assert_eq!(&sample.bytes()[..4], b"RIFF");
    assert_eq!(sample.duration(), Some(Duration::from_secs(1)));
    assert!(!sample.is_empty());

    let reader = hound::WavReader::new(std::io::Cursor::new(sample.bytes())).unwrap();
    assert_eq!(reader.spec().channels, 1);
    assert_eq!(reader.spec().bits_per_sample, 16);
    assert_eq!(reader.len(), 16_000);
}

#[test]
fn test_out_of_range_pcm_is_clamped() {
    let sample = AudioSample::from_pcm(&[2.0, -2.0], 8_000).unwrap();
    let mut reader = hound::WavReader::new(std::io::Cursor::new(sample.bytes())).unwrap();
    let values: Vec<i16> = reader.samples::<i16>().map(Result::unwrap).collect();

    assert_eq!(values, vec![i16::MAX, -i16::MAX]);
}

#[test]
fn test_wav_bytes_report_duration() {
    let encoded = AudioSample::from_pcm(&vec![0.0; 4_000], 8_000).unwrap();
    let sample = AudioSample::from_wav_bytes(encoded.bytes().to_vec());

    assert_eq!(sample.duration(), Some(Duration::from_millis(500)));
    assert_eq!(sample, encoded);
}

#[test]
fn test_empty_detection() {
    assert!(AudioSample::new(Vec::new(), "audio/wav").is_empty());
    assert!(AudioSample::from_pcm(&[], 16_000).unwrap().is_empty());

    // Opaque payloads with unknown duration count as speech
    let opaque = AudioSample::new(vec![1, 2, 3], "audio/webm");
    assert!(!opaque.is_empty());
    assert_eq!(opaque.duration(), None);
    assert_eq!(opaque.len(), 3);
}

#[test]
fn test_unreadable_wav_file_is_an_error() {
    assert!(AudioSample::from_wav_file("/nonexistent/utterance.wav").is_err());
}
