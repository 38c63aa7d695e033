use slotmap::new_key_type;

new_key_type! {
    pub struct NpcId;
}

/// Edge length of one map cell in pixels.
pub const TILE_SIZE: i32 = 32;
/// Pixels travelled per frame while transiting. Divides `TILE_SIZE`.
pub const WALK_SPEED: i32 = 4;
/// Frames each walk-cycle pose of a character sprite is held.
pub const ANIMATION_CYCLE: u32 = 24;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pos {
    pub y: i32,
    pub x: i32,
}

impl Pos {
    pub fn step(self, direction: Direction) -> Pos {
        let (dx, dy) = direction.delta();
        Pos { y: self.y + dy, x: self.x + dx }
    }

    pub fn to_pixels(self) -> PixelPos {
        PixelPos { x: self.x * TILE_SIZE, y: self.y * TILE_SIZE }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct PixelPos {
    pub x: i32,
    pub y: i32,
}

impl PixelPos {
    pub fn is_tile_aligned(self) -> bool {
        self.x.rem_euclid(TILE_SIZE) == 0 && self.y.rem_euclid(TILE_SIZE) == 0
    }

    pub fn to_tile(self) -> Pos {
        Pos { y: self.y.div_euclid(TILE_SIZE), x: self.x.div_euclid(TILE_SIZE) }
    }
}

/// Facing direction. Discriminants match the sprite-sheet row order and the
/// numeric codes used by event scripts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Direction {
    #[default]
    Down = 0,
    Left = 1,
    Right = 2,
    Up = 3,
}

impl Direction {
    pub const ALL: [Direction; 4] =
        [Direction::Down, Direction::Left, Direction::Right, Direction::Up];

    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(Direction::Down),
            1 => Some(Direction::Left),
            2 => Some(Direction::Right),
            3 => Some(Direction::Up),
            _ => None,
        }
    }

    /// `(dx, dy)` in grid cells.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::Up => (0, -1),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::Up => Direction::Down,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MovePolicy {
    Stationary,
    Autonomous,
    Manual,
    Follow,
}

impl MovePolicy {
    /// Decodes the move-type field of a `CHARACTER`/`CLERK` directive.
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(MovePolicy::Stationary),
            1 => Some(MovePolicy::Autonomous),
            2 => Some(MovePolicy::Manual),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Confirm,
    Cancel,
    PrevPage,
    NextPage,
    Quit,
}

impl Key {
    pub fn direction(self) -> Option<Direction> {
        match self {
            Key::Up => Some(Direction::Up),
            Key::Down => Some(Direction::Down),
            Key::Left => Some(Direction::Left),
            Key::Right => Some(Direction::Right),
            _ => None,
        }
    }
}

/// Keys for one frame: edge-triggered presses plus the held movement direction.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FrameInput {
    pub pressed: Vec<Key>,
    pub held: Option<Direction>,
}

impl FrameInput {
    pub fn press(key: Key) -> Self {
        Self { pressed: vec![key], held: None }
    }

    pub fn hold(direction: Direction) -> Self {
        Self { pressed: Vec::new(), held: Some(direction) }
    }

    pub fn is_idle(&self) -> bool {
        self.pressed.is_empty() && self.held.is_none()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum GameMode {
    #[default]
    Title,
    Field,
    Talk,
    CommandMenu,
    BattleInit,
    BattleCommand,
    BattleProcess,
    Status,
    Shop,
    ItemManagement,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SoundCue {
    Cursor,
    Cancel,
    PickUp,
    ChaChing,
    Step,
    Treasure,
    Door,
    SwordSlice,
}

impl SoundCue {
    pub const ALL: [SoundCue; 8] = [
        SoundCue::Cursor,
        SoundCue::Cancel,
        SoundCue::PickUp,
        SoundCue::ChaChing,
        SoundCue::Step,
        SoundCue::Treasure,
        SoundCue::Door,
        SoundCue::SwordSlice,
    ];

    /// Stem of the sound file in the `se` asset directory.
    pub fn file_stem(self) -> &'static str {
        match self {
            SoundCue::Cursor => "pi",
            SoundCue::Cancel => "cancel",
            SoundCue::PickUp => "pick2",
            SoundCue::ChaChing => "cha-ching",
            SoundCue::Step => "step",
            SoundCue::Treasure => "treasure",
            SoundCue::Door => "door",
            SoundCue::SwordSlice => "sword_slice",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum MusicCue {
    Title,
    Battle,
    Shop,
    Map(String),
}

impl MusicCue {
    /// Stem of the track in the `bgm` asset directory.
    pub fn file_stem(&self) -> &str {
        match self {
            MusicCue::Title => "title",
            MusicCue::Battle => "battle",
            MusicCue::Shop => "shop",
            MusicCue::Map(name) => name,
        }
    }
}

/// Audio requests emitted by the simulation and drained by the frontend.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Cue {
    Sound(SoundCue),
    Music(MusicCue),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LogEvent {
    MapEntered { map: String, pos: Pos },
    EncounterStarted { enemy: String },
    BattleEscaped,
    SkillInvoked { member: usize, skill: String },
    TreasureOpened { pos: Pos, item: String },
    DoorOpened { pos: Pos },
    ItemBought { item: String, price: u32 },
    ItemSold { item: String, price: u32 },
    ItemDiscarded { item: String },
    StatsCommitted { member: usize, points: u32 },
}
