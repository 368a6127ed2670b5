// Adapter: the audio player only speaks `MediaPlayer`; an adapter lets it
// drive the advanced VLC/MP4 players behind a different interface.

use crate::config::Settings;
use crate::error::Result;
use crate::narration::Narrator;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaFormat {
    Mp3,
    Mp4,
    Vlc,
    Other(String),
}

impl FromStr for MediaFormat {
    type Err = Infallible;

    /// Case-insensitive; anything unknown is kept as `Other`.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s.to_ascii_lowercase().as_str() {
            "mp3" => MediaFormat::Mp3,
            "mp4" => MediaFormat::Mp4,
            "vlc" => MediaFormat::Vlc,
            other => MediaFormat::Other(other.to_string()),
        })
    }
}

impl fmt::Display for MediaFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaFormat::Mp3 => f.write_str("mp3"),
            MediaFormat::Mp4 => f.write_str("mp4"),
            MediaFormat::Vlc => f.write_str("vlc"),
            MediaFormat::Other(name) => f.write_str(name),
        }
    }
}

// Target interface the client expects
pub trait MediaPlayer {
    fn play(&self, file: &str, narrator: &Narrator);
}

// Adaptee interface with a different shape
pub trait AdvancedMediaPlayer {
    fn play_vlc(&self, file: &str, narrator: &Narrator);
    fn play_mp4(&self, file: &str, narrator: &Narrator);
}

pub struct VlcPlayer;

impl AdvancedMediaPlayer for VlcPlayer {
    fn play_vlc(&self, file: &str, narrator: &Narrator) {
        narrator.say(format_args!("  Playing VLC file: {}", file));
    }

    fn play_mp4(&self, _file: &str, _narrator: &Narrator) {}
}

pub struct Mp4Player;

impl AdvancedMediaPlayer for Mp4Player {
    fn play_vlc(&self, _file: &str, _narrator: &Narrator) {}

    fn play_mp4(&self, file: &str, narrator: &Narrator) {
        narrator.say(format_args!("  Playing MP4 file: {}", file));
    }
}

pub struct MediaAdapter {
    format: MediaFormat,
    player: Box<dyn AdvancedMediaPlayer>,
}

impl MediaAdapter {
    /// `None` for formats no advanced player understands.
    pub fn new(format: &MediaFormat) -> Option<Self> {
        let player: Box<dyn AdvancedMediaPlayer> = match format {
            MediaFormat::Vlc => Box::new(VlcPlayer),
            MediaFormat::Mp4 => Box::new(Mp4Player),
            MediaFormat::Mp3 | MediaFormat::Other(_) => return None,
        };
        Some(Self {
            format: format.clone(),
            player,
        })
    }
}

impl MediaPlayer for MediaAdapter {
    fn play(&self, file: &str, narrator: &Narrator) {
        match self.format {
            MediaFormat::Vlc => self.player.play_vlc(file, narrator),
            MediaFormat::Mp4 => self.player.play_mp4(file, narrator),
            _ => {}
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackOutcome {
    Native,
    Adapted,
    Unsupported,
}

pub struct AudioPlayer {
    narrator: Narrator,
}

impl AudioPlayer {
    pub fn new(narrator: Narrator) -> Self {
        Self { narrator }
    }

    pub fn play(&self, format: &MediaFormat, file: &str) -> PlaybackOutcome {
        if *format == MediaFormat::Mp3 {
            self.narrator.say(format_args!("  Playing MP3 file: {}", file));
            return PlaybackOutcome::Native;
        }

        match MediaAdapter::new(format) {
            Some(adapter) => {
                self.narrator
                    .say(format_args!("  Using adapter for {} format", format));
                adapter.play(file, &self.narrator);
                PlaybackOutcome::Adapted
            }
            None => {
                warn!(%format, file, "unsupported media format");
                self.narrator.say(format_args!(
                    "  Invalid media: {} format not supported",
                    format
                ));
                PlaybackOutcome::Unsupported
            }
        }
    }
}

impl MediaPlayer for AudioPlayer {
    /// Picks the format from the file extension.
    fn play(&self, file: &str, _narrator: &Narrator) {
        let ext = file.rsplit_once('.').map(|(_, ext)| ext).unwrap_or("");
        let format = ext.parse().unwrap_or(MediaFormat::Other(String::new()));
        AudioPlayer::play(self, &format, file);
    }
}

pub fn demo(narrator: &Narrator, _settings: &Settings) -> Result<()> {
    let player = AudioPlayer::new(narrator.clone());

    let cases = [
        ("Native MP3 support", "mp3", "song.mp3"),
        ("Adapter for MP4", "mp4", "video.mp4"),
        ("Adapter for VLC", "vlc", "movie.vlc"),
        ("Unsupported format", "avi", "clip.avi"),
    ];
    for (title, format, file) in cases {
        narrator.section(title);
        let format: MediaFormat = format.parse().unwrap_or(MediaFormat::Mp3);
        player.play(&format, file);
    }

    narrator.section("Playlist");
    let playlist = [
        "mp3:jazz.mp3",
        "mp4:tutorial.mp4",
        "vlc:documentary.vlc",
        "mp3:rock.mp3",
        "mp4:presentation.mp4",
    ];
    for track in playlist {
        if let Some((format, file)) = track.split_once(':') {
            if let Ok(format) = format.parse::<MediaFormat>() {
                player.play(&format, file);
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn format(s: &str) -> MediaFormat {
        s.parse().unwrap()
    }

    #[test]
    fn test_format_parsing_is_case_insensitive() {
        assert_eq!(format("MP4"), MediaFormat::Mp4);
        assert_eq!(format("Vlc"), MediaFormat::Vlc);
        assert_eq!(format("avi"), MediaFormat::Other("avi".to_string()));
    }

    #[test]
    fn test_outcomes() {
        let narrator = Narrator::captured();
        let player = AudioPlayer::new(narrator.clone());

        assert_eq!(player.play(&format("mp3"), "a.mp3"), PlaybackOutcome::Native);
        assert_eq!(player.play(&format("mp4"), "b.mp4"), PlaybackOutcome::Adapted);
        assert_eq!(player.play(&format("VLC"), "c.vlc"), PlaybackOutcome::Adapted);
        assert_eq!(
            player.play(&format("avi"), "d.avi"),
            PlaybackOutcome::Unsupported
        );

        assert!(narrator.contains("Playing MP4 file: b.mp4"));
        assert!(narrator.contains("Playing VLC file: c.vlc"));
        assert!(narrator.contains("avi format not supported"));
    }

    #[test]
    fn test_no_adapter_for_mp3() {
        assert!(MediaAdapter::new(&MediaFormat::Mp3).is_none());
        assert!(MediaAdapter::new(&MediaFormat::Other("wav".into())).is_none());
    }

    #[test]
    fn test_audio_player_as_media_player_uses_extension() {
        let narrator = Narrator::captured();
        let player = AudioPlayer::new(narrator.clone());
        let as_target: &dyn MediaPlayer = &player;

        as_target.play("clip.MP4", &narrator);
        assert!(narrator.contains("Playing MP4 file: clip.MP4"));
    }
}
