//! Bounce audio feedback
//!
//! Two strategies, decided once at startup: if a clip file sits next to the
//! program it is decoded and pre-sliced into fixed-length segments played
//! cyclically; otherwise each bounce synthesizes a short decaying sine whose
//! pitch rises as the boundary shrinks. Every failure on this path degrades
//! to something quieter and logs, never aborts.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use rodio::buffer::SamplesBuffer;
use rodio::source::Source;
use rodio::{Decoder, OutputStream, OutputStreamHandle};

use crate::consts::*;

/// Clip file searched for next to the executable, then in the working dir
const CLIP_STEM: &str = "bounce";
const CLIP_EXTENSIONS: &[&str] = &["mp3", "ogg", "wav", "flac"];

/// One pre-sliced piece of the external clip
#[derive(Debug, Clone)]
struct ClipSegment {
    channels: u16,
    sample_rate: u32,
    samples: Vec<f32>,
}

/// Playback strategy, fixed for the lifetime of the process
enum Mode {
    /// External clip segments, advanced cyclically per bounce
    Clip {
        segments: Vec<ClipSegment>,
        next: usize,
    },
    /// Pitch-mapped synthesized tone
    Tone,
}

/// Owns the output device and the chosen playback mode
pub struct AudioFeedback {
    // Dropping the stream closes the device, so it rides along unused
    _stream: OutputStream,
    handle: OutputStreamHandle,
    mode: Mode,
}

impl AudioFeedback {
    /// Open the default output device and pick a mode. `None` means no
    /// device; the simulation runs silently in that case.
    pub fn new() -> Option<Self> {
        let (stream, handle) = match OutputStream::try_default() {
            Ok(pair) => pair,
            Err(err) => {
                log::warn!("No audio output device, bounces will be silent: {err}");
                return None;
            }
        };

        let mode = match find_clip().and_then(|path| load_clip(&path)) {
            Some(segments) => {
                log::info!("Playing external clip, {} segments", segments.len());
                Mode::Clip { segments, next: 0 }
            }
            None => {
                log::info!("Using synthesized bounce tone");
                Mode::Tone
            }
        };

        Some(Self {
            _stream: stream,
            handle,
            mode,
        })
    }

    /// Play one audible event for a bounce at the given shrink progress
    pub fn on_bounce(&mut self, shrink_ratio: f32) {
        match &mut self.mode {
            Mode::Clip { segments, next } => {
                let segment = &segments[*next];
                *next = (*next + 1) % segments.len();
                let source = SamplesBuffer::new(
                    segment.channels,
                    segment.sample_rate,
                    segment.samples.clone(),
                );
                let _ = self.handle.play_raw(source.convert_samples());
            }
            Mode::Tone => {
                let frequency = tone_frequency(shrink_ratio);
                let source =
                    SamplesBuffer::new(1, TONE_SAMPLE_RATE, synth_tone(frequency));
                let _ = self.handle.play_raw(source.convert_samples());
            }
        }
    }
}

/// Map shrink progress to tone pitch: a full-size boundary sits near 300 Hz
/// and rises toward 800 Hz as it closes, clamped to a sane band.
pub fn tone_frequency(shrink_ratio: f32) -> f32 {
    (TONE_BASE_HZ - shrink_ratio * TONE_SPAN_HZ).clamp(TONE_MIN_HZ, TONE_MAX_HZ)
}

/// Synthesize the bounce tone: a sine with an exponential amplitude
/// envelope so it starts and ends without clicks.
pub fn synth_tone(frequency: f32) -> Vec<f32> {
    let sample_count = (TONE_SAMPLE_RATE as f32 * TONE_DURATION_SECS) as usize;
    let sample_rate = TONE_SAMPLE_RATE as f32;

    (0..sample_count)
        .map(|i| {
            let t = i as f32 / sample_rate;
            let envelope = (-t * TONE_DECAY_RATE).exp();
            let wave = (2.0 * std::f32::consts::PI * frequency * t).sin();
            wave * envelope * 0.5
        })
        .collect()
}

/// Slice interleaved samples into fixed-duration segments. The final
/// segment keeps whatever remainder is left rather than being dropped.
pub fn slice_clip(samples: &[f32], channels: u16, sample_rate: u32) -> Vec<Vec<f32>> {
    let per_segment =
        ((sample_rate as f32 * CLIP_SEGMENT_SECS) as usize * channels as usize).max(1);
    samples
        .chunks(per_segment)
        .map(|chunk| chunk.to_vec())
        .collect()
}

fn find_clip() -> Option<PathBuf> {
    let mut dirs: Vec<PathBuf> = Vec::new();
    if let Ok(exe) = std::env::current_exe() {
        if let Some(dir) = exe.parent() {
            dirs.push(dir.to_path_buf());
        }
    }
    if let Ok(cwd) = std::env::current_dir() {
        dirs.push(cwd);
    }

    for dir in dirs {
        for ext in CLIP_EXTENSIONS {
            let candidate = dir.join(format!("{CLIP_STEM}.{ext}"));
            if candidate.is_file() {
                return Some(candidate);
            }
        }
    }
    None
}

/// Decode and pre-slice the clip. Any failure logs and returns `None`,
/// which sends the caller down the tone fallback.
fn load_clip(path: &Path) -> Option<Vec<ClipSegment>> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(err) => {
            log::warn!("Cannot open {}, falling back to tone: {err}", path.display());
            return None;
        }
    };

    let decoder = match Decoder::new(BufReader::new(file)) {
        Ok(decoder) => decoder,
        Err(err) => {
            log::warn!(
                "Cannot decode {}, falling back to tone: {err}",
                path.display()
            );
            return None;
        }
    };

    let channels = decoder.channels();
    let sample_rate = decoder.sample_rate();
    let samples: Vec<f32> = decoder.convert_samples().collect();
    if samples.is_empty() {
        log::warn!("{} decoded to zero samples, falling back to tone", path.display());
        return None;
    }

    let segments = slice_clip(&samples, channels, sample_rate)
        .into_iter()
        .map(|samples| ClipSegment {
            channels,
            sample_rate,
            samples,
        })
        .collect();
    Some(segments)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frequency_rises_as_boundary_shrinks() {
        assert_eq!(tone_frequency(1.0), 300.0);
        assert_eq!(tone_frequency(0.5), 550.0);
        assert_eq!(tone_frequency(0.0), 800.0);
        assert!(tone_frequency(0.9) < tone_frequency(0.1));
    }

    #[test]
    fn frequency_is_clamped_to_band() {
        assert_eq!(tone_frequency(2.0), TONE_MIN_HZ);
        assert_eq!(tone_frequency(-2.0), TONE_MAX_HZ);
    }

    #[test]
    fn tone_has_expected_length_and_envelope() {
        let samples = synth_tone(440.0);
        assert_eq!(
            samples.len(),
            (TONE_SAMPLE_RATE as f32 * TONE_DURATION_SECS) as usize
        );

        // Every sample sits inside the decaying envelope
        for (i, s) in samples.iter().enumerate() {
            let t = i as f32 / TONE_SAMPLE_RATE as f32;
            let bound = (-t * TONE_DECAY_RATE).exp() * 0.5 + 1e-6;
            assert!(s.abs() <= bound, "sample {i} escapes the envelope");
        }
    }

    #[test]
    fn clip_slices_into_half_second_segments() {
        // 1.2 seconds of stereo at 10 Hz "audio" for easy math
        let sample_rate = 10;
        let channels = 2;
        let samples = vec![0.0f32; (1.2 * 10.0) as usize * 2];

        let segments = slice_clip(&samples, channels, sample_rate);
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[0].len(), 10); // 0.5 s * 10 Hz * 2 ch
        assert_eq!(segments[1].len(), 10);
        assert_eq!(segments[2].len(), 4); // trailing remainder kept
    }

    #[test]
    fn clip_slicing_handles_short_input() {
        let segments = slice_clip(&[0.1, 0.2], 1, 44_100);
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].len(), 2);
    }
}
