//! Plays the cues the simulation emits. Missing sound files are tolerated.

use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};

use lanoir_app::settings::Levels;
use lanoir_core::{Cue, Game, MusicCue, SoundCue};
use macroquad::audio::{
    PlaySoundParams, Sound, load_sound, play_sound, set_sound_volume, stop_sound,
};

pub fn sound_path(root: &Path, cue: SoundCue) -> PathBuf {
    root.join("se").join(format!("{}.wav", cue.file_stem()))
}

pub fn track_path(root: &Path, stem: &str) -> PathBuf {
    root.join("bgm").join(format!("{stem}.ogg"))
}

/// Which track should be playing. A request for the track already playing keeps it going.
#[derive(Debug, Default)]
pub struct MusicDeck {
    current: Option<String>,
}

impl MusicDeck {
    /// Returns the track being replaced and the one to start, or `None` when nothing changes.
    pub fn request(&mut self, cue: &MusicCue) -> Option<(Option<String>, String)> {
        let stem = cue.file_stem();
        if self.current.as_deref() == Some(stem) {
            return None;
        }
        let previous = self.current.replace(stem.to_string());
        Some((previous, stem.to_string()))
    }

    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }
}

pub struct Audio {
    sounds: HashMap<SoundCue, Sound>,
    tracks: HashMap<String, Sound>,
    deck: MusicDeck,
    levels: Levels,
}

impl Audio {
    pub async fn load(root: &Path, game: &Game, levels: Levels) -> Self {
        let mut sounds = HashMap::new();
        for cue in SoundCue::ALL {
            if let Some(sound) = load(&sound_path(root, cue)).await {
                sounds.insert(cue, sound);
            }
        }

        let mut stems: BTreeSet<String> =
            [MusicCue::Title, MusicCue::Battle, MusicCue::Shop]
                .iter()
                .map(|cue| cue.file_stem().to_string())
                .collect();
        stems.extend(game.world().maps().filter_map(|map| map.bgm.clone()));
        let mut tracks = HashMap::new();
        for stem in stems {
            if let Some(sound) = load(&track_path(root, &stem)).await {
                tracks.insert(stem, sound);
            }
        }

        log::info!("loaded {} sound effects and {} music tracks", sounds.len(), tracks.len());
        Self { sounds, tracks, deck: MusicDeck::default(), levels }
    }

    pub fn play(&mut self, cue: &Cue) {
        match cue {
            Cue::Sound(sound) => {
                if let Some(handle) = self.sounds.get(sound) {
                    play_sound(
                        handle,
                        PlaySoundParams { looped: false, volume: self.levels.effect_volume },
                    );
                }
            }
            Cue::Music(music) => {
                let Some((previous, next)) = self.deck.request(music) else { return };
                if let Some(handle) = previous.and_then(|stem| self.tracks.get(&stem)) {
                    stop_sound(handle);
                }
                match self.tracks.get(&next) {
                    Some(handle) => play_sound(
                        handle,
                        PlaySoundParams { looped: true, volume: self.levels.music_volume },
                    ),
                    None => log::debug!("no track loaded for {next}"),
                }
            }
        }
    }

    pub fn set_levels(&mut self, levels: Levels) {
        self.levels = levels;
        if let Some(handle) = self.deck.current().and_then(|stem| self.tracks.get(stem)) {
            set_sound_volume(handle, levels.music_volume);
        }
    }
}

async fn load(path: &Path) -> Option<Sound> {
    match load_sound(&path.to_string_lossy()).await {
        Ok(sound) => Some(sound),
        Err(err) => {
            log::warn!("sound {} unavailable: {err}", path.display());
            None
        }
    }
}
