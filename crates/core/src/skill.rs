//! Skills and the timed visual effect played when one is invoked.

/// Frames an invoked skill effect stays on screen.
pub const MAX_LIFE: u32 = 10;
/// Edge length in pixels of one frame in a skill-effect sheet.
pub const SKILL_EFFECT_SIZE: u32 = 192;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Skill {
    pub name: String,
    /// Stem of the effect sheet in the `skilleffect` asset directory.
    pub effect: String,
    pub description: String,
    /// Added to the owner's attack power.
    pub bonus_power: i32,
    /// Multiplies the owner's attack power.
    pub bonus_rate: i32,
    pub level: u32,
}

/// Countdown for one playing skill effect.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct EffectPlayback {
    pub effect: String,
    life: u32,
}

/// Which sheet frames to draw this frame and how far to fade into the next.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EffectFrame {
    pub index: usize,
    pub next: Option<usize>,
    /// Weight of `next`, in `[0, 1]`.
    pub blend: f32,
}

impl EffectPlayback {
    pub fn start(effect: impl Into<String>) -> Self {
        Self { effect: effect.into(), life: MAX_LIFE }
    }

    pub fn life(&self) -> u32 {
        self.life
    }

    pub fn is_active(&self) -> bool {
        self.life > 0
    }

    pub fn tick(&mut self) {
        self.life = self.life.saturating_sub(1);
    }

    /// Splits the lifetime into `frame_count` equal segments; the frame index
    /// advances as life runs down and the blend weight rises across each segment.
    pub fn frame(&self, frame_count: usize) -> Option<EffectFrame> {
        if !self.is_active() || frame_count == 0 {
            return None;
        }
        let n = frame_count as u64;
        let scaled_life = u64::from(self.life) * n;
        let max = u64::from(MAX_LIFE);
        let segment = scaled_life / max;
        if segment >= n {
            return Some(EffectFrame { index: 0, next: (frame_count > 1).then_some(1), blend: 0.0 });
        }
        let index = (n - 1 - segment) as usize;
        let next = (index + 1 < frame_count).then_some(index + 1);
        let remainder = scaled_life - segment * max;
        let blend = match next {
            Some(_) => (1.0 - remainder as f32 / max as f32).clamp(0.0, 1.0),
            None => 0.0,
        };
        Some(EffectFrame { index, next, blend })
    }
}

/// Per-channel linear interpolation of two same-sized RGBA buffers.
pub fn blend_rgba(from: &[u8], to: &[u8], factor: f32) -> Vec<u8> {
    let factor = factor.clamp(0.0, 1.0);
    from.iter()
        .zip(to)
        .map(|(&a, &b)| {
            let mixed = f32::from(a) * (1.0 - factor) + f32::from(b) * factor;
            mixed.round().min(255.0) as u8
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain_frames(frame_count: usize) -> Vec<EffectFrame> {
        let mut playback = EffectPlayback::start("Attack1");
        let mut frames = Vec::new();
        while let Some(frame) = playback.frame(frame_count) {
            frames.push(frame);
            playback.tick();
        }
        frames
    }

    #[test]
    fn effect_runs_for_max_life_frames_then_stops() {
        let frames = drain_frames(5);
        assert_eq!(frames.len(), MAX_LIFE as usize);
        assert_eq!(frames[0].index, 0);
        assert_eq!(frames.last().map(|f| f.index), Some(4));
    }

    #[test]
    fn frame_index_never_moves_backwards() {
        for count in 1..=12 {
            let frames = drain_frames(count);
            for pair in frames.windows(2) {
                assert!(pair[0].index <= pair[1].index, "count={count}: {pair:?}");
            }
            for frame in &frames {
                assert!(frame.index < count);
                assert!((0.0..=1.0).contains(&frame.blend));
                if frame.next.is_none() {
                    assert_eq!(frame.blend, 0.0);
                }
            }
        }
    }

    #[test]
    fn blend_is_halfway_mid_segment() {
        let mut playback = EffectPlayback::start("Attack1");
        playback.tick();
        let frame = playback.frame(5).expect("active");
        assert_eq!(frame.index, 0);
        assert_eq!(frame.next, Some(1));
        assert!((frame.blend - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn blend_interpolates_each_channel() {
        let from = [0, 100, 200, 255];
        let to = [255, 100, 0, 255];
        assert_eq!(blend_rgba(&from, &to, 0.0), from.to_vec());
        assert_eq!(blend_rgba(&from, &to, 1.0), to.to_vec());
        assert_eq!(blend_rgba(&from, &to, 0.5), vec![128, 100, 100, 255]);
    }
}
