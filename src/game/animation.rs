// Sprite animation playback

use super::definitions::EntityDefinition;
use super::direction::Direction;
use super::error::CoreError;

/// A looping sequence of tile ids
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationClip {
    /// Tile id for each frame
    pub frames: Vec<usize>,
    /// Duration of each frame in seconds
    pub frame_duration: f32,
}

impl AnimationClip {
    pub fn new(frames: &[usize], frame_duration: f32) -> Self {
        Self {
            frames: frames.to_vec(),
            frame_duration,
        }
    }

    /// Get the total duration of one animation cycle
    pub fn total_duration(&self) -> f32 {
        self.frames.len() as f32 * self.frame_duration
    }
}

/// Clip family selected by body states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pose {
    Idle,
    Walk,
}

/// Which clip to play for each pose and facing direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoseLayout {
    /// Indexed by `Direction::index()`
    pub idle: [usize; 4],
    /// Indexed by `Direction::index()`
    pub walk: [usize; 4],
}

impl PoseLayout {
    /// Every pose uses the same clip
    pub const fn single(clip: usize) -> Self {
        Self {
            idle: [clip; 4],
            walk: [clip; 4],
        }
    }

    pub fn clip(&self, pose: Pose, direction: Direction) -> usize {
        match pose {
            Pose::Idle => self.idle[direction.index()],
            Pose::Walk => self.walk[direction.index()],
        }
    }
}

/// Plays one clip at a time out of a fixed clip list
#[derive(Debug, Clone)]
pub struct AnimationPlayer {
    /// Immutable after construction
    clips: Vec<AnimationClip>,
    layout: PoseLayout,
    current: usize,
    current_frame: usize,
    frame_timer: f32,
}

impl AnimationPlayer {
    /// Build the clip list from a definition.
    ///
    /// Fails if any clip is empty or the pose layout points past the clip list.
    pub fn from_definition(def: &EntityDefinition) -> Result<Self, CoreError> {
        let clips: Vec<AnimationClip> = def
            .clips
            .iter()
            .map(|frames| AnimationClip::new(frames, def.frame_interval))
            .collect();

        Self::new(clips, def.poses)
    }

    pub fn new(clips: Vec<AnimationClip>, layout: PoseLayout) -> Result<Self, CoreError> {
        if let Some(index) = clips.iter().position(|clip| clip.frames.is_empty()) {
            return Err(CoreError::EmptyClip { index });
        }

        for index in layout.idle.iter().chain(layout.walk.iter()) {
            if *index >= clips.len() {
                return Err(CoreError::AnimationOutOfRange {
                    index: *index,
                    len: clips.len(),
                });
            }
        }

        Ok(Self {
            clips,
            layout,
            current: layout.idle[Direction::default().index()],
            current_frame: 0,
            frame_timer: 0.0,
        })
    }

    /// Switch to the clip at `index`. Switching to the clip already playing
    /// keeps its position.
    pub fn play(&mut self, index: usize) -> Result<(), CoreError> {
        if index >= self.clips.len() {
            return Err(CoreError::AnimationOutOfRange {
                index,
                len: self.clips.len(),
            });
        }

        if self.current != index {
            self.current = index;
            self.current_frame = 0;
            self.frame_timer = 0.0;
        }

        Ok(())
    }

    /// Play the clip the layout assigns to `pose` facing `direction`
    pub fn play_pose(&mut self, pose: Pose, direction: Direction) -> Result<(), CoreError> {
        self.play(self.layout.clip(pose, direction))
    }

    /// Advance playback (called every frame)
    pub fn update(&mut self, dt: f32) {
        let clip = &self.clips[self.current];
        if clip.frame_duration <= 0.0 {
            return;
        }

        self.frame_timer += dt;

        while self.frame_timer >= clip.frame_duration {
            self.frame_timer -= clip.frame_duration;
            self.current_frame = (self.current_frame + 1) % clip.frames.len();
        }
    }

    /// Index of the clip being played
    pub fn current_clip(&self) -> usize {
        self.current
    }

    /// Frame index within the current clip
    pub fn current_frame(&self) -> usize {
        self.current_frame
    }

    /// Tile id to draw this frame
    pub fn current_tile(&self) -> usize {
        self.clips[self.current].frames[self.current_frame]
    }

    #[allow(dead_code)]
    pub fn clip_count(&self) -> usize {
        self.clips.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn four_way_player() -> AnimationPlayer {
        let clips = vec![
            AnimationClip::new(&[0, 1], 0.1),
            AnimationClip::new(&[2, 3], 0.1),
            AnimationClip::new(&[4, 5, 6], 0.1),
            AnimationClip::new(&[7], 0.1),
        ];
        let layout = PoseLayout {
            idle: [3, 3, 3, 3],
            walk: [0, 1, 2, 1],
        };
        AnimationPlayer::new(clips, layout).unwrap()
    }

    #[test]
    fn test_clip_duration() {
        let clip = AnimationClip::new(&[1, 2, 3, 4, 5, 6], 0.1);
        assert!((clip.total_duration() - 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_starts_on_idle_facing_bottom() {
        let player = four_way_player();
        assert_eq!(player.current_clip(), 3);
        assert_eq!(player.current_tile(), 7);
    }

    #[test]
    fn test_update_loops() {
        let mut player = four_way_player();
        player.play(2).unwrap();

        player.update(0.15);
        assert_eq!(player.current_frame(), 1);
        assert_eq!(player.current_tile(), 5);

        player.update(0.2); // 3.5 frames in total
        assert_eq!(player.current_frame(), 0);
    }

    #[test]
    fn test_replaying_same_clip_keeps_position() {
        let mut player = four_way_player();
        player.play(2).unwrap();
        player.update(0.15);
        player.play(2).unwrap();
        assert_eq!(player.current_frame(), 1);

        player.play(0).unwrap();
        assert_eq!(player.current_frame(), 0);
    }

    #[test]
    fn test_play_out_of_range_fails() {
        let mut player = four_way_player();
        assert_eq!(
            player.play(4),
            Err(CoreError::AnimationOutOfRange { index: 4, len: 4 })
        );
        // Still on the previous clip
        assert_eq!(player.current_clip(), 3);
    }

    #[test]
    fn test_play_pose() {
        let mut player = four_way_player();
        player.play_pose(Pose::Walk, Direction::Bottom).unwrap();
        assert_eq!(player.current_clip(), 2);
        player.play_pose(Pose::Walk, Direction::Left).unwrap();
        assert_eq!(player.current_clip(), 1);
    }

    #[test]
    fn test_bad_layout_rejected() {
        let clips = vec![AnimationClip::new(&[0], 0.1)];
        let result = AnimationPlayer::new(clips, PoseLayout::single(1));
        assert_eq!(
            result.unwrap_err(),
            CoreError::AnimationOutOfRange { index: 1, len: 1 }
        );
    }

    #[test]
    fn test_empty_clip_rejected() {
        let clips = vec![AnimationClip::new(&[0], 0.1), AnimationClip::new(&[], 0.1)];
        let result = AnimationPlayer::new(clips, PoseLayout::single(0));
        assert_eq!(result.unwrap_err(), CoreError::EmptyClip { index: 1 });
    }
}
