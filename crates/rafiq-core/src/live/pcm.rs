//! PCM frame conversion for the live session.
//!
//! Capture produces f32 samples in [-1, 1]; the wire carries little-endian
//! i16 tagged with its rate. Playback reverses the conversion.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

/// Convert float samples to little-endian i16 bytes, clamping out-of-range
/// input rather than wrapping.
pub fn f32_to_i16_bytes(samples: &[f32]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(samples.len() * 2);
    for &s in samples {
        let clamped = s.clamp(-1.0, 1.0);
        let v = (clamped * 32767.0) as i16;
        bytes.extend_from_slice(&v.to_le_bytes());
    }
    bytes
}

/// Decode little-endian i16 bytes back to float samples. A trailing odd
/// byte is dropped.
pub fn i16_bytes_to_f32(bytes: &[u8]) -> Vec<f32> {
    bytes
        .chunks_exact(2)
        .map(|pair| i16::from_le_bytes([pair[0], pair[1]]) as f32 / 32768.0)
        .collect()
}

/// Base64-encode a capture frame for the wire.
pub fn encode_frame(samples: &[f32]) -> String {
    BASE64.encode(f32_to_i16_bytes(samples))
}

/// Decode an inbound base64 payload into float samples.
pub fn decode_frame(payload: &str) -> Option<Vec<f32>> {
    let bytes = BASE64.decode(payload).ok()?;
    Some(i16_bytes_to_f32(&bytes))
}

/// Duration in seconds of a mono sample buffer at the given rate.
pub fn duration_secs(sample_count: usize, sample_rate: u32) -> f64 {
    sample_count as f64 / sample_rate as f64
}

/// Mime tag declaring the encoding and rate of an outbound frame.
pub fn pcm_mime(sample_rate: u32) -> String {
    format!("audio/pcm;rate={sample_rate}")
}

/// Average interleaved multi-channel audio down to mono.
pub fn to_mono(data: &[f32], channels: u16) -> Vec<f32> {
    let ch = channels as usize;
    if ch <= 1 {
        return data.to_vec();
    }
    data.chunks_exact(ch)
        .map(|frame| frame.iter().sum::<f32>() / ch as f32)
        .collect()
}

/// Linear-interpolation resampler. Speech energy sits well below the
/// Nyquist limit of the target rates in use, so no anti-alias filter.
pub fn resample(samples: &[f32], src_rate: u32, dst_rate: u32) -> Vec<f32> {
    if src_rate == dst_rate || samples.is_empty() {
        return samples.to_vec();
    }

    let ratio = src_rate as f64 / dst_rate as f64;
    let out_len = (samples.len() as f64 / ratio) as usize;
    let mut output = Vec::with_capacity(out_len);

    for i in 0..out_len {
        let src_pos = i as f64 * ratio;
        let idx = src_pos as usize;
        let frac = src_pos - idx as f64;
        let sample = if idx + 1 < samples.len() {
            samples[idx] as f64 * (1.0 - frac) + samples[idx + 1] as f64 * frac
        } else {
            samples[idx.min(samples.len() - 1)] as f64
        };
        output.push(sample as f32);
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn i16_round_trip_is_close() {
        let samples = vec![0.0, 0.5, -0.5, 0.999, -1.0];
        let back = i16_bytes_to_f32(&f32_to_i16_bytes(&samples));
        for (a, b) in samples.iter().zip(&back) {
            assert!((a - b).abs() < 1.0 / 32000.0, "{a} vs {b}");
        }
    }

    #[test]
    fn out_of_range_samples_clamp_instead_of_wrapping() {
        let bytes = f32_to_i16_bytes(&[2.0, -2.0]);
        let back = i16_bytes_to_f32(&bytes);
        assert!(back[0] > 0.99);
        assert!(back[1] < -0.99);
    }

    #[test]
    fn base64_frame_round_trips() {
        let samples = vec![0.1, -0.2, 0.3];
        let decoded = decode_frame(&encode_frame(&samples)).unwrap();
        assert_eq!(decoded.len(), 3);
    }

    #[test]
    fn duration_matches_rate() {
        assert_eq!(duration_secs(16_000, 16_000), 1.0);
        assert_eq!(duration_secs(12_000, 24_000), 0.5);
    }

    #[test]
    fn mime_tag_carries_the_rate() {
        assert_eq!(pcm_mime(16_000), "audio/pcm;rate=16000");
    }

    #[test]
    fn mono_mixdown_averages_channels() {
        let stereo = [1.0, 0.0, 0.5, 0.5];
        assert_eq!(to_mono(&stereo, 2), vec![0.5, 0.5]);
    }

    #[test]
    fn resample_halves_sample_count() {
        let samples: Vec<f32> = (0..480).map(|i| (i as f32 / 480.0).sin()).collect();
        let out = resample(&samples, 48_000, 16_000);
        assert_eq!(out.len(), 160);
    }

    #[test]
    fn resample_same_rate_is_identity() {
        let samples = vec![0.1, 0.2, 0.3];
        assert_eq!(resample(&samples, 16_000, 16_000), samples);
    }
}
