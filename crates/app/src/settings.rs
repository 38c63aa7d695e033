//! Window scale and volume levels, with the clamps every source goes through.

pub const DEFAULT_WINDOW_SCALE: f32 = 1.0;
pub const MIN_WINDOW_SCALE: f32 = 1.0;
pub const MAX_WINDOW_SCALE: f32 = 3.0;
pub const WINDOW_SCALE_STEP: f32 = 0.5;

/// Sound effects are mixed very quietly next to the music.
pub const DEFAULT_EFFECT_VOLUME: f32 = 0.01;
pub const DEFAULT_MUSIC_VOLUME: f32 = 0.5;
pub const VOLUME_STEP: f32 = 0.05;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SettingsAction {
    LouderMusic,
    QuieterMusic,
    LouderEffects,
    QuieterEffects,
    LargerWindow,
    SmallerWindow,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Levels {
    pub music_volume: f32,
    pub effect_volume: f32,
    pub window_scale: f32,
}

impl Default for Levels {
    fn default() -> Self {
        Self {
            music_volume: DEFAULT_MUSIC_VOLUME,
            effect_volume: DEFAULT_EFFECT_VOLUME,
            window_scale: DEFAULT_WINDOW_SCALE,
        }
    }
}

impl Levels {
    pub fn clamped(self) -> Self {
        Self {
            music_volume: clamp_volume(self.music_volume, DEFAULT_MUSIC_VOLUME),
            effect_volume: clamp_volume(self.effect_volume, DEFAULT_EFFECT_VOLUME),
            window_scale: clamp_window_scale(self.window_scale),
        }
    }

    pub fn apply(self, action: SettingsAction) -> Self {
        let mut next = self;
        match action {
            SettingsAction::LouderMusic => next.music_volume += VOLUME_STEP,
            SettingsAction::QuieterMusic => next.music_volume -= VOLUME_STEP,
            SettingsAction::LouderEffects => next.effect_volume += VOLUME_STEP,
            SettingsAction::QuieterEffects => next.effect_volume -= VOLUME_STEP,
            SettingsAction::LargerWindow => next.window_scale += WINDOW_SCALE_STEP,
            SettingsAction::SmallerWindow => next.window_scale -= WINDOW_SCALE_STEP,
        }
        next.clamped()
    }
}

pub fn clamp_volume(value: f32, fallback: f32) -> f32 {
    if !value.is_finite() {
        return fallback;
    }
    value.clamp(0.0, 1.0)
}

pub fn clamp_window_scale(value: f32) -> f32 {
    if !value.is_finite() {
        return DEFAULT_WINDOW_SCALE;
    }
    value.clamp(MIN_WINDOW_SCALE, MAX_WINDOW_SCALE)
}

/// `LANOIR_WINDOW_SCALE` beats the persisted value, which beats the default.
pub fn resolve_window_scale(persisted: Option<f32>, env_override: Option<&str>) -> f32 {
    let override_scale =
        env_override.and_then(|raw| raw.parse::<f32>().ok()).map(clamp_window_scale);
    if let Some(scale) = override_scale {
        return scale;
    }
    persisted.map_or(DEFAULT_WINDOW_SCALE, clamp_window_scale)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_scale_respects_bounds() {
        assert_eq!(clamp_window_scale(0.1), MIN_WINDOW_SCALE);
        assert_eq!(clamp_window_scale(9.9), MAX_WINDOW_SCALE);
        assert_eq!(clamp_window_scale(f32::NAN), DEFAULT_WINDOW_SCALE);
    }

    #[test]
    fn volume_clamps_to_unit_range() {
        assert_eq!(clamp_volume(-0.2, 0.5), 0.0);
        assert_eq!(clamp_volume(1.7, 0.5), 1.0);
        assert_eq!(clamp_volume(f32::INFINITY, 0.5), 0.5);
    }

    #[test]
    fn env_override_wins_over_persisted_scale() {
        assert_eq!(resolve_window_scale(Some(2.0), Some("1.5")), 1.5);
        assert_eq!(resolve_window_scale(Some(2.0), Some("big")), 2.0);
        assert_eq!(resolve_window_scale(None, None), DEFAULT_WINDOW_SCALE);
    }

    #[test]
    fn actions_step_and_stop_at_the_bounds() {
        let levels = Levels::default().apply(SettingsAction::LargerWindow);
        assert!((levels.window_scale - 1.5).abs() < 0.0001);
        let quiet = (0..40).fold(levels, |l, _| l.apply(SettingsAction::QuieterMusic));
        assert_eq!(quiet.music_volume, 0.0);
        let small = (0..10).fold(levels, |l, _| l.apply(SettingsAction::SmallerWindow));
        assert_eq!(small.window_scale, MIN_WINDOW_SCALE);
    }

    #[test]
    fn effect_volume_moves_on_its_own() {
        let louder = Levels::default().apply(SettingsAction::LouderEffects);
        assert!((louder.effect_volume - 0.06).abs() < 0.0001);
        assert_eq!(louder.music_volume, DEFAULT_MUSIC_VOLUME);
        let muted = Levels::default().apply(SettingsAction::QuieterEffects);
        assert_eq!(muted.effect_volume, 0.0);
        let full = (0..40).fold(muted, |l, _| l.apply(SettingsAction::LouderEffects));
        assert_eq!(full.effect_volume, 1.0);
    }
}
