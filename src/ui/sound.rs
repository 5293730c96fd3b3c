//! Sound engine: procedural 8-bit style effects for jump, score and crash.
//!
//! All sounds are generated as in-memory WAV buffers at init time.
//! Playback is fire-and-forget (non-blocking) via rodio's Sink.
//!
//! Compile with `--no-default-features` or without "sound" feature
//! to disable audio entirely (the stub SoundEngine does nothing).

#[cfg(feature = "sound")]
mod inner {
    use std::io::Cursor;
    use std::sync::Arc;

    use rodio::{OutputStream, OutputStreamHandle, Sink};

    pub(super) const SAMPLE_RATE: u32 = 22050;

    /// Pre-generated WAV buffers for each sound effect.
    pub struct SoundEngine {
        _stream: OutputStream,
        handle: OutputStreamHandle,
        sfx_jump: Arc<Vec<u8>>,
        sfx_score: Arc<Vec<u8>>,
        sfx_crash: Arc<Vec<u8>>,
    }

    impl SoundEngine {
        pub fn new() -> Option<Self> {
            let (stream, handle) = match OutputStream::try_default() {
                Ok(pair) => pair,
                Err(e) => {
                    log::debug!("no audio output: {e}");
                    return None;
                }
            };

            Some(SoundEngine {
                _stream: stream,
                handle,
                sfx_jump: Arc::new(make_wav(&gen_jump())),
                sfx_score: Arc::new(make_wav(&gen_score())),
                sfx_crash: Arc::new(make_wav(&gen_crash())),
            })
        }

        fn play(&self, buf: &Arc<Vec<u8>>) {
            if let Ok(sink) = Sink::try_new(&self.handle) {
                let cursor = Cursor::new(buf.as_ref().clone());
                if let Ok(src) = rodio::Decoder::new(cursor) {
                    sink.append(src);
                    sink.detach(); // fire-and-forget
                }
            }
        }

        pub fn play_jump(&self) { self.play(&self.sfx_jump); }
        pub fn play_score(&self) { self.play(&self.sfx_score); }
        pub fn play_crash(&self) { self.play(&self.sfx_crash); }
    }

    // ════════════════════════════════════════════════════════════
    //  Waveform generators — all produce Vec<f32> mono samples
    // ════════════════════════════════════════════════════════════

    /// Jump: short rising chirp
    pub(super) fn gen_jump() -> Vec<f32> {
        let duration = 0.09;
        let n = (SAMPLE_RATE as f32 * duration) as usize;
        let mut phase = 0.0_f32;
        (0..n)
            .map(|i| {
                let t = i as f32 / n as f32;
                let freq = 300.0 + t * 600.0; // 300Hz → 900Hz
                phase += freq / SAMPLE_RATE as f32;
                let env = (1.0 - t).powf(0.7);
                (phase * 2.0 * std::f32::consts::PI).sin() * env * 0.25
            })
            .collect()
    }

    /// Score: two-note blip E6→A6
    pub(super) fn gen_score() -> Vec<f32> {
        let notes = [1319.0_f32, 1760.0];
        let note_dur = 0.04;
        let mut samples = Vec::new();
        for &freq in &notes {
            let n = (SAMPLE_RATE as f32 * note_dur) as usize;
            for i in 0..n {
                let t = i as f32 / SAMPLE_RATE as f32;
                let env = 1.0 - (i as f32 / n as f32).powf(0.5);
                // Square-ish wave (sine + 3rd harmonic) for retro feel
                let wave = (t * freq * 2.0 * std::f32::consts::PI).sin() * 0.7
                    + (t * freq * 3.0 * 2.0 * std::f32::consts::PI).sin() * 0.3;
                samples.push(wave * env * 0.2);
            }
        }
        samples
    }

    /// Crash: noise burst over a falling tone
    pub(super) fn gen_crash() -> Vec<f32> {
        let duration = 0.4;
        let n = (SAMPLE_RATE as f32 * duration) as usize;
        let mut rng: u32 = 12345;
        (0..n)
            .map(|i| {
                let t = i as f32 / n as f32;
                let freq = 220.0 - t * 160.0;
                let ti = i as f32 / SAMPLE_RATE as f32;
                let tone = (ti * freq * 2.0 * std::f32::consts::PI).sin();
                // Simple LCG noise
                rng = rng.wrapping_mul(1103515245).wrapping_add(12345);
                let noise = (rng as f32 / u32::MAX as f32) * 2.0 - 1.0;
                let env = (1.0 - t).powf(1.5);
                (tone * 0.5 + noise * 0.5) * env * 0.35
            })
            .collect()
    }

    // ════════════════════════════════════════════════════════════
    //  WAV encoder — wraps f32 samples into a valid WAV buffer
    // ════════════════════════════════════════════════════════════

    pub(super) fn make_wav(samples: &[f32]) -> Vec<u8> {
        let num_channels: u16 = 1;
        let bits_per_sample: u16 = 16;
        let byte_rate = SAMPLE_RATE * (num_channels as u32) * (bits_per_sample as u32) / 8;
        let block_align = num_channels * bits_per_sample / 8;
        let data_size = samples.len() as u32 * 2; // 16-bit = 2 bytes per sample
        let file_size = 36 + data_size;

        let mut buf = Vec::with_capacity(44 + data_size as usize);

        // RIFF header
        buf.extend_from_slice(b"RIFF");
        buf.extend_from_slice(&file_size.to_le_bytes());
        buf.extend_from_slice(b"WAVE");

        // fmt chunk
        buf.extend_from_slice(b"fmt ");
        buf.extend_from_slice(&16u32.to_le_bytes()); // chunk size
        buf.extend_from_slice(&1u16.to_le_bytes());  // PCM format
        buf.extend_from_slice(&num_channels.to_le_bytes());
        buf.extend_from_slice(&SAMPLE_RATE.to_le_bytes());
        buf.extend_from_slice(&byte_rate.to_le_bytes());
        buf.extend_from_slice(&block_align.to_le_bytes());
        buf.extend_from_slice(&bits_per_sample.to_le_bytes());

        // data chunk
        buf.extend_from_slice(b"data");
        buf.extend_from_slice(&data_size.to_le_bytes());

        for &s in samples {
            let clamped = s.max(-1.0).min(1.0);
            let val = (clamped * 32767.0) as i16;
            buf.extend_from_slice(&val.to_le_bytes());
        }

        buf
    }
}

// ════════════════════════════════════════════════════════════
//  Public API — compiles to no-ops when sound feature is off
// ════════════════════════════════════════════════════════════

#[cfg(feature = "sound")]
pub use inner::SoundEngine;

#[cfg(not(feature = "sound"))]
pub struct SoundEngine;

#[cfg(not(feature = "sound"))]
impl SoundEngine {
    pub fn new() -> Option<Self> { Some(SoundEngine) }
    pub fn play_jump(&self) {}
    pub fn play_score(&self) {}
    pub fn play_crash(&self) {}
}

#[cfg(all(test, feature = "sound"))]
mod tests {
    use super::inner::*;

    #[test]
    fn wav_header_matches_sample_count() {
        let samples = gen_jump();
        let wav = make_wav(&samples);
        assert_eq!(&wav[0..4], b"RIFF");
        assert_eq!(&wav[8..12], b"WAVE");
        assert_eq!(wav.len(), 44 + samples.len() * 2);
        let rate = u32::from_le_bytes([wav[24], wav[25], wav[26], wav[27]]);
        assert_eq!(rate, SAMPLE_RATE);
    }

    #[test]
    fn effects_stay_in_range() {
        for samples in [gen_jump(), gen_score(), gen_crash()] {
            assert!(!samples.is_empty());
            assert!(samples.iter().all(|s| s.abs() <= 1.0));
        }
    }
}
