//! Game state and core simulation types

use serde::{Deserialize, Serialize};

use crate::consts::LANES;

/// One of the three fixed lanes shared by items and the basket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Lane {
    Left,
    #[default]
    Center,
    Right,
}

impl Lane {
    pub const ALL: [Lane; LANES as usize] = [Lane::Left, Lane::Center, Lane::Right];

    /// Lane index (0: Left, 1: Center, 2: Right)
    pub fn index(self) -> u8 {
        match self {
            Lane::Left => 0,
            Lane::Center => 1,
            Lane::Right => 2,
        }
    }

    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }
}

/// Falling item types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    Apple,
    Orange,
    Banana,
    Bomb,
}

impl ItemKind {
    pub const ALL: [ItemKind; 4] = [
        ItemKind::Apple,
        ItemKind::Orange,
        ItemKind::Banana,
        ItemKind::Bomb,
    ];

    /// Score applied when the basket catches this item
    pub fn score_delta(self) -> i64 {
        match self {
            ItemKind::Apple => 10,
            ItemKind::Orange => 20,
            ItemKind::Banana => 30,
            ItemKind::Bomb => -50,
        }
    }

    /// Display glyph
    pub fn glyph(self) -> &'static str {
        match self {
            ItemKind::Apple => "🍎",
            ItemKind::Orange => "🍊",
            ItemKind::Banana => "🍌",
            ItemKind::Bomb => "💣",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ItemKind::Apple => "apple",
            ItemKind::Orange => "orange",
            ItemKind::Banana => "banana",
            ItemKind::Bomb => "bomb",
        }
    }
}

/// A falling item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: u32,
    pub lane: Lane,
    /// Vertical position; only ever increases
    pub y: f32,
    pub kind: ItemKind,
}

/// Coarse lifecycle view derived from the state flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Never started, or stopped without the summary screen
    Idle,
    /// Round in progress
    Active,
    /// Round over, leaderboard overlay shown
    Summary,
}

/// Session state owned by the engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Running score (bombs can push it negative)
    pub score: i64,
    /// Reported alongside the score; the game has a single level
    pub level: u32,
    /// Seconds left on the clock
    pub remaining_secs: u32,
    /// Basket lane
    pub basket: Lane,
    /// True between start() and stop()
    pub active: bool,
    /// Frames simulated this session
    pub frame_count: u64,
    /// Falling items (sorted by id for determinism)
    pub items: Vec<Item>,
    /// Leaderboard overlay requested by the caller after stop()
    pub show_summary: bool,
    /// Next item ID
    next_id: u32,
}

impl GameState {
    /// Fresh, inactive state with a full clock
    pub fn new(time_limit: u32) -> Self {
        Self {
            score: 0,
            level: 1,
            remaining_secs: time_limit,
            basket: Lane::Center,
            active: false,
            frame_count: 0,
            items: Vec::new(),
            show_summary: false,
            next_id: 1,
        }
    }

    /// Allocate a new item ID
    pub fn next_item_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Add an item at the given lane and height
    pub fn push_item(&mut self, lane: Lane, y: f32, kind: ItemKind) -> u32 {
        let id = self.next_item_id();
        self.items.push(Item { id, lane, y, kind });
        id
    }

    pub fn phase(&self) -> GamePhase {
        if self.active {
            GamePhase::Active
        } else if self.show_summary {
            GamePhase::Summary
        } else {
            GamePhase::Idle
        }
    }
}
