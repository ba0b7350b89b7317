use macroquad::audio::{self, PlaySoundParams, Sound, load_sound_from_bytes};

use crate::settings::MAX_VOLUME_INDEX;

const SAMPLE_RATE: u32 = 22050;
// Background music sits under the effects.
const MUSIC_GAIN: f32 = 0.3;

/// Wraps PCM16 mono samples in a RIFF/WAVE container.
fn wav_from_samples(samples: &[i16]) -> Vec<u8> {
    let block_align: u16 = 2;
    let byte_rate: u32 = SAMPLE_RATE * block_align as u32;
    let data_size: u32 = samples.len() as u32 * 2;
    let chunk_size: u32 = 36 + data_size;

    let mut data: Vec<u8> = Vec::with_capacity(44 + samples.len() * 2);
    data.extend_from_slice(b"RIFF");
    data.extend_from_slice(&chunk_size.to_le_bytes());
    data.extend_from_slice(b"WAVE");
    data.extend_from_slice(b"fmt ");
    data.extend_from_slice(&16u32.to_le_bytes());
    data.extend_from_slice(&1u16.to_le_bytes()); // PCM
    data.extend_from_slice(&1u16.to_le_bytes()); // mono
    data.extend_from_slice(&SAMPLE_RATE.to_le_bytes());
    data.extend_from_slice(&byte_rate.to_le_bytes());
    data.extend_from_slice(&block_align.to_le_bytes());
    data.extend_from_slice(&16u16.to_le_bytes()); // bits per sample
    data.extend_from_slice(b"data");
    data.extend_from_slice(&data_size.to_le_bytes());
    for sample in samples {
        data.extend_from_slice(&sample.to_le_bytes());
    }
    data
}

fn sample_count(duration: f32) -> usize {
    (duration * SAMPLE_RATE as f32) as usize
}

fn square(phase: f32, amplitude: f32) -> f32 {
    if (std::f32::consts::TAU * phase).sin() > 0.0 {
        amplitude
    } else {
        -amplitude
    }
}

/// Upward square-wave sweep, 400 Hz to 1 kHz over 150 ms.
fn eat_wav() -> Vec<u8> {
    let n = sample_count(0.15);
    let samples: Vec<i16> = (0..n)
        .map(|i| {
            let t = i as f32 / SAMPLE_RATE as f32;
            let progress = i as f32 / n as f32;
            let freq = 400.0 + progress * 600.0;
            let value = square(freq * t, 0.4) * (1.0 - progress);
            (value * i16::MAX as f32) as i16
        })
        .collect();
    wav_from_samples(&samples)
}

/// Downward triangle-wave sweep, 300 Hz to 100 Hz over 800 ms.
fn game_over_wav() -> Vec<u8> {
    let n = sample_count(0.8);
    let samples: Vec<i16> = (0..n)
        .map(|i| {
            let t = i as f32 / SAMPLE_RATE as f32;
            let progress = i as f32 / n as f32;
            let freq = 300.0 - progress * 200.0;
            let phase = (freq * t).fract();
            let value = 0.4 * ((phase - 0.5).abs() * 4.0 - 1.0);
            let envelope = 1.0 - progress.powf(0.3);
            (value * envelope * i16::MAX as f32) as i16
        })
        .collect();
    wav_from_samples(&samples)
}

/// Short 800 Hz blip for UI clicks.
fn click_wav() -> Vec<u8> {
    let n = sample_count(0.08);
    let samples: Vec<i16> = (0..n)
        .map(|i| {
            let t = i as f32 / SAMPLE_RATE as f32;
            let progress = i as f32 / n as f32;
            let value = square(800.0 * t, 0.3) * (1.0 - progress.sqrt());
            (value * i16::MAX as f32) as i16
        })
        .collect();
    wav_from_samples(&samples)
}

/// Ten-second chiptune loop: an eight-note melody over a bass octave.
fn music_wav() -> Vec<u8> {
    const MELODY: [f32; 8] = [523.0, 587.0, 659.0, 587.0, 523.0, 440.0, 494.0, 523.0];
    let note_samples = sample_count(10.0 / MELODY.len() as f32);
    let mut samples: Vec<i16> = Vec::with_capacity(note_samples * MELODY.len());
    for freq in MELODY {
        for i in 0..note_samples {
            let t = i as f32 / SAMPLE_RATE as f32;
            let progress = i as f32 / note_samples as f32;
            let value = square(freq * t, 0.2) + square(freq / 2.0 * t, 0.1);
            let envelope = if progress < 0.1 {
                progress / 0.1
            } else if progress > 0.9 {
                (1.0 - progress) / 0.1
            } else {
                1.0
            };
            samples.push((value * envelope * i16::MAX as f32) as i16);
        }
    }
    wav_from_samples(&samples)
}

pub struct AudioManager {
    eat: Sound,
    game_over: Sound,
    click: Sound,
    music: Sound,
    music_playing: bool,
    volume_index: usize,
}

impl AudioManager {
    pub async fn load(volume_index: usize) -> Self {
        let eat = load_sound_from_bytes(&eat_wav()).await.unwrap();
        let game_over = load_sound_from_bytes(&game_over_wav()).await.unwrap();
        let click = load_sound_from_bytes(&click_wav()).await.unwrap();
        let music = load_sound_from_bytes(&music_wav()).await.unwrap();
        Self {
            eat,
            game_over,
            click,
            music,
            music_playing: false,
            volume_index: volume_index.min(MAX_VOLUME_INDEX),
        }
    }

    fn volume(&self) -> f32 {
        self.volume_index as f32 * 0.25
    }

    pub fn set_volume_index(&mut self, index: usize) {
        self.volume_index = index.min(MAX_VOLUME_INDEX);
        if self.music_playing {
            audio::set_sound_volume(&self.music, self.volume() * MUSIC_GAIN);
        }
    }

    fn play(&self, sound: &Sound) {
        if self.volume_index > 0 {
            audio::play_sound(
                sound,
                PlaySoundParams { looped: false, volume: self.volume() },
            );
        }
    }

    pub fn play_eat(&self) {
        self.play(&self.eat);
    }

    pub fn play_game_over(&self) {
        self.play(&self.game_over);
    }

    pub fn play_click(&self) {
        self.play(&self.click);
    }

    /// Keeps the music loop in sync with the volume setting; muting stops
    /// the stream, unmuting restarts it.
    pub fn update_music(&mut self) {
        if self.volume_index > 0 && !self.music_playing {
            audio::play_sound(
                &self.music,
                PlaySoundParams { looped: true, volume: self.volume() * MUSIC_GAIN },
            );
            self.music_playing = true;
        } else if self.volume_index == 0 && self.music_playing {
            audio::stop_sound(&self.music);
            self.music_playing = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check_container(bytes: &[u8], expected_samples: usize) {
        assert_eq!(&bytes[0..4], b"RIFF");
        assert_eq!(&bytes[8..12], b"WAVE");
        assert_eq!(&bytes[36..40], b"data");
        let data_size = u32::from_le_bytes(bytes[40..44].try_into().unwrap());
        assert_eq!(data_size as usize, expected_samples * 2);
        assert_eq!(bytes.len(), 44 + data_size as usize);
    }

    #[test]
    fn effects_are_well_formed_wav_files() {
        check_container(&eat_wav(), sample_count(0.15));
        check_container(&game_over_wav(), sample_count(0.8));
        check_container(&click_wav(), sample_count(0.08));
    }

    #[test]
    fn music_loop_covers_all_eight_notes() {
        let note = sample_count(10.0 / 8.0);
        check_container(&music_wav(), note * 8);
    }

    #[test]
    fn effects_fade_to_silence() {
        let bytes = eat_wav();
        let last = i16::from_le_bytes(bytes[bytes.len() - 2..].try_into().unwrap());
        assert!(last.abs() < 600, "sweep should end near zero, got {last}");
    }
}
