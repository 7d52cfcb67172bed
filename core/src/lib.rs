#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the dungeon crawler simulation.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Systems read immutable views and
//! respond with [`Command`] batches, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values describing what
//! changed. Nothing in this crate draws randomness or performs I/O.

mod dungeon;
mod grid;

use std::{
    fmt,
    ops::{Add, Sub},
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use dungeon::{Dungeon, Room, RoomId};
pub use grid::Grid;

/// Integer grid position or movement delta.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Coordinate {
    x: i32,
    y: i32,
}

impl Coordinate {
    /// Creates a new coordinate.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Column component.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Row component.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Computes the Manhattan distance between two coordinates.
    #[must_use]
    pub fn manhattan_distance(self, other: Coordinate) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// The four orthogonal neighbours in north, east, south, west order.
    #[must_use]
    pub fn neighbors(self) -> [Coordinate; 4] {
        Direction::ALL.map(|direction| self + direction.delta())
    }
}

impl Add for Coordinate {
    type Output = Coordinate;

    fn add(self, rhs: Coordinate) -> Coordinate {
        Coordinate::new(self.x.saturating_add(rhs.x), self.y.saturating_add(rhs.y))
    }
}

impl Sub for Coordinate {
    type Output = Coordinate;

    fn sub(self, rhs: Coordinate) -> Coordinate {
        Coordinate::new(self.x.saturating_sub(rhs.x), self.y.saturating_sub(rhs.y))
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Cardinal directions on the 4-connected grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    North,
    /// Movement toward increasing column indices.
    East,
    /// Movement toward increasing row indices.
    South,
    /// Movement toward decreasing column indices.
    West,
}

impl Direction {
    /// Every direction in north, east, south, west order.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Unit delta travelled by a single step in this direction.
    #[must_use]
    pub const fn delta(self) -> Coordinate {
        match self {
            Self::North => Coordinate::new(0, -1),
            Self::East => Coordinate::new(1, 0),
            Self::South => Coordinate::new(0, 1),
            Self::West => Coordinate::new(-1, 0),
        }
    }
}

/// Axis-aligned rectangle anchored at its upper-left cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    origin: Coordinate,
    width: u32,
    height: u32,
}

impl Rect {
    /// Creates a rectangle from an origin and size.
    #[must_use]
    pub const fn new(origin: Coordinate, width: u32, height: u32) -> Self {
        Self {
            origin,
            width,
            height,
        }
    }

    /// Upper-left cell of the rectangle.
    #[must_use]
    pub const fn origin(&self) -> Coordinate {
        self.origin
    }

    /// Width in cells.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height in cells.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Center cell using integer division of the size.
    #[must_use]
    pub const fn center(&self) -> Coordinate {
        Coordinate::new(
            self.origin.x + (self.width / 2) as i32,
            self.origin.y + (self.height / 2) as i32,
        )
    }

    /// Reports whether the cell lies within the rectangle.
    #[must_use]
    pub fn contains(&self, cell: Coordinate) -> bool {
        let (left, top, right, bottom) = self.edges();
        let x = i64::from(cell.x());
        let y = i64::from(cell.y());
        x >= left && x < right && y >= top && y < bottom
    }

    /// Reports whether `other` lies entirely within this rectangle.
    #[must_use]
    pub fn contains_rect(&self, other: &Rect) -> bool {
        let (left, top, right, bottom) = self.edges();
        let (other_left, other_top, other_right, other_bottom) = other.edges();
        other_left >= left && other_top >= top && other_right <= right && other_bottom <= bottom
    }

    /// Bounding-box overlap test.
    ///
    /// Edges are inclusive: rectangles that merely touch are reported as
    /// intersecting.
    #[must_use]
    pub fn intersects(&self, other: &Rect) -> bool {
        let (left, top, right, bottom) = self.edges();
        let (other_left, other_top, other_right, other_bottom) = other.edges();
        left <= other_right && right >= other_left && top <= other_bottom && bottom >= other_top
    }

    /// Iterates every cell covered by the rectangle in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Coordinate> {
        let origin = self.origin;
        let width = i32::try_from(self.width).unwrap_or(i32::MAX);
        let height = i32::try_from(self.height).unwrap_or(i32::MAX);
        (0..height).flat_map(move |dy| {
            (0..width).map(move |dx| {
                Coordinate::new(origin.x.saturating_add(dx), origin.y.saturating_add(dy))
            })
        })
    }

    fn edges(&self) -> (i64, i64, i64, i64) {
        let left = i64::from(self.origin.x);
        let top = i64::from(self.origin.y);
        (
            left,
            top,
            left + i64::from(self.width),
            top + i64::from(self.height),
        )
    }
}

/// Player movement request for a single tick: one orthogonal step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MovementIntent {
    delta: Coordinate,
}

impl MovementIntent {
    /// Creates an intent stepping once in the provided direction.
    #[must_use]
    pub const fn step(direction: Direction) -> Self {
        Self {
            delta: direction.delta(),
        }
    }

    /// Validates an arbitrary delta, accepting only single orthogonal steps.
    #[must_use]
    pub fn from_delta(delta: Coordinate) -> Option<Self> {
        (delta.manhattan_distance(Coordinate::default()) == 1).then_some(Self { delta })
    }

    /// Offset applied to the player's position.
    #[must_use]
    pub const fn delta(&self) -> Coordinate {
        self.delta
    }
}

/// Unique identifier assigned to an enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EnemyId(u32);

impl EnemyId {
    /// Creates a new enemy identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to an item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId(u32);

impl ItemId {
    /// Creates a new item identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Kind of an item together with its single magnitude.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    /// Equippable weapon adding to the wearer's attack.
    Weapon {
        /// Attack bonus granted while equipped.
        damage: u32,
    },
    /// Equippable armor adding to the wearer's defense.
    Armor {
        /// Defense bonus granted while equipped.
        defense: u32,
    },
    /// Consumable restoring hit points.
    Potion {
        /// Hit points restored on use.
        heal: u32,
    },
    /// Collectible with no combat effect.
    QuestItem {
        /// Score value of the item.
        value: u32,
    },
}

impl ItemKind {
    /// Magnitude carried by the kind (damage, defense, heal, or value).
    #[must_use]
    pub const fn magnitude(&self) -> u32 {
        match *self {
            Self::Weapon { damage } => damage,
            Self::Armor { defense } => defense,
            Self::Potion { heal } => heal,
            Self::QuestItem { value } => value,
        }
    }

    /// Equipment slot the kind occupies, if it can be equipped.
    #[must_use]
    pub const fn slot(&self) -> Option<EquipSlot> {
        match self {
            Self::Weapon { .. } => Some(EquipSlot::Weapon),
            Self::Armor { .. } => Some(EquipSlot::Armor),
            Self::Potion { .. } | Self::QuestItem { .. } => None,
        }
    }
}

/// Equipment slots available to the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EquipSlot {
    /// Slot holding a weapon.
    Weapon,
    /// Slot holding armor.
    Armor,
}

/// Item lying in a room or carried in the player's inventory.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Item {
    id: ItemId,
    position: Coordinate,
    name: String,
    kind: ItemKind,
    equipped: bool,
}

impl Item {
    /// Creates an unequipped item.
    #[must_use]
    pub fn new(id: ItemId, position: Coordinate, name: String, kind: ItemKind) -> Self {
        Self {
            id,
            position,
            name,
            kind,
            equipped: false,
        }
    }

    /// Identifier of the item.
    #[must_use]
    pub const fn id(&self) -> ItemId {
        self.id
    }

    /// Cell the item was placed on.
    #[must_use]
    pub const fn position(&self) -> Coordinate {
        self.position
    }

    /// Display name of the item.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Kind and magnitude of the item.
    #[must_use]
    pub const fn kind(&self) -> ItemKind {
        self.kind
    }

    /// Reports whether the item occupies an equipment slot.
    #[must_use]
    pub const fn is_equipped(&self) -> bool {
        self.equipped
    }

    /// Updates the equipped flag. Only meaningful for weapons and armor.
    pub fn set_equipped(&mut self, equipped: bool) {
        self.equipped = equipped && self.kind.slot().is_some();
    }
}

/// Hit points and combat modifiers of an entity.
///
/// `hp` never exceeds `max_hp`; every constructor and mutator clamps.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CombatStats {
    hp: u32,
    max_hp: u32,
    attack: u32,
    defense: u32,
}

impl CombatStats {
    /// Creates stats at full health.
    #[must_use]
    pub const fn new(max_hp: u32, attack: u32, defense: u32) -> Self {
        Self {
            hp: max_hp,
            max_hp,
            attack,
            defense,
        }
    }

    /// Returns a copy with `hp` replaced, clamped to `max_hp`.
    #[must_use]
    pub fn with_hp(mut self, hp: u32) -> Self {
        self.set_hp(hp);
        self
    }

    /// Current hit points.
    #[must_use]
    pub const fn hp(&self) -> u32 {
        self.hp
    }

    /// Maximum hit points.
    #[must_use]
    pub const fn max_hp(&self) -> u32 {
        self.max_hp
    }

    /// Base attack.
    #[must_use]
    pub const fn attack(&self) -> u32 {
        self.attack
    }

    /// Base defense.
    #[must_use]
    pub const fn defense(&self) -> u32 {
        self.defense
    }

    /// Reports whether hit points reached zero.
    #[must_use]
    pub const fn is_defeated(&self) -> bool {
        self.hp == 0
    }

    /// Replaces the current hit points, clamped to `max_hp`.
    pub fn set_hp(&mut self, hp: u32) {
        self.hp = hp.min(self.max_hp);
    }

    /// Raises maximum hit points and heals by the same amount.
    pub fn raise_max_hp(&mut self, amount: u32) {
        self.max_hp = self.max_hp.saturating_add(amount);
        self.hp = self.hp.saturating_add(amount).min(self.max_hp);
    }

    /// Raises base attack.
    pub fn raise_attack(&mut self, amount: u32) {
        self.attack = self.attack.saturating_add(amount);
    }
}

/// Enemy archetypes with their baseline stat templates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EnemyType {
    /// Weak, common enemy.
    Goblin,
    /// Sturdy mid-tier enemy.
    Orc,
    /// Heavy enemy with the strongest template.
    Troll,
}

impl EnemyType {
    /// Every archetype in declaration order.
    pub const ALL: [EnemyType; 3] = [EnemyType::Goblin, EnemyType::Orc, EnemyType::Troll];

    /// Human-readable archetype name.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Goblin => "Goblin",
            Self::Orc => "Orc",
            Self::Troll => "Troll",
        }
    }

    /// Stats assigned to a freshly spawned enemy of this archetype.
    #[must_use]
    pub const fn base_stats(self) -> CombatStats {
        match self {
            Self::Goblin => CombatStats::new(30, 5, 2),
            Self::Orc => CombatStats::new(50, 8, 4),
            Self::Troll => CombatStats::new(80, 12, 6),
        }
    }

    /// Experience awarded to the player for defeating this archetype.
    #[must_use]
    pub const fn experience_reward(self) -> u32 {
        match self {
            Self::Goblin => 10,
            Self::Orc => 20,
            Self::Troll => 40,
        }
    }
}

/// AI state of an enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyState {
    /// Player out of sight; the enemy holds position or follows a stale path.
    Patrolling,
    /// Player within vision range; the enemy paths toward them.
    Chasing,
    /// Enemy shares the player's cell.
    Combat,
    /// Enemy has been defeated.
    Dead,
}

/// Enemy placement produced by the populator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EnemySpawn {
    /// Identifier allocated to the enemy.
    pub id: EnemyId,
    /// Archetype of the enemy.
    pub kind: EnemyType,
    /// Cell the enemy starts on.
    pub position: Coordinate,
    /// Room the enemy was spawned in.
    pub room: RoomId,
}

/// Global lifecycle of a simulation session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SimulationState {
    /// Initial state before the session starts.
    #[default]
    MainMenu,
    /// Ticks are being processed.
    Playing,
    /// Ticking suspended until resumed.
    Paused,
    /// The player died.
    GameOver,
    /// The player reached the exit.
    Victory,
}

impl SimulationState {
    /// Reports whether moving from `self` to `next` is a legal transition.
    #[must_use]
    pub const fn can_transition_to(self, next: SimulationState) -> bool {
        matches!(
            (self, next),
            (Self::MainMenu, Self::Playing)
                | (Self::Playing, Self::Paused)
                | (Self::Paused, Self::Playing)
                | (Self::Playing, Self::Victory)
                | (Self::Playing, Self::GameOver)
        )
    }

    /// Reports whether the state ends the session.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::GameOver | Self::Victory)
    }
}

/// Participant in a combat exchange.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Combatant {
    /// The player character.
    Player,
    /// An enemy from the active roster.
    Enemy(EnemyId),
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Advances the tick counter by one.
    Tick,
    /// Requests a transition of the global simulation state.
    SetSimulationState {
        /// State the world should enter.
        state: SimulationState,
    },
    /// Requests that the player step by the provided intent.
    MovePlayer {
        /// Validated single-step movement.
        intent: MovementIntent,
    },
    /// Updates an enemy's AI state.
    SetEnemyState {
        /// Enemy whose state changes.
        enemy: EnemyId,
        /// New state for the enemy.
        state: EnemyState,
    },
    /// Replaces an enemy's cached path.
    SetEnemyPath {
        /// Enemy receiving the path.
        enemy: EnemyId,
        /// Waypoints from the enemy's position (exclusive) to its goal (inclusive).
        path: Vec<Coordinate>,
    },
    /// Moves an enemy to the first waypoint of its cached path.
    AdvanceEnemy {
        /// Enemy that should advance.
        enemy: EnemyId,
    },
    /// Resolves a single attack from one combatant against another.
    Strike {
        /// Combatant dealing the damage.
        attacker: Combatant,
        /// Combatant receiving the damage.
        defender: Combatant,
    },
    /// Equips a weapon or armor from the player's inventory.
    EquipItem {
        /// Item to equip.
        item: ItemId,
    },
    /// Consumes a potion from the player's inventory.
    UseItem {
        /// Item to consume.
        item: ItemId,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Event {
    /// Indicates that the simulation advanced one tick.
    TimeAdvanced {
        /// Index of the tick that just started.
        tick: u64,
    },
    /// Announces a change of the global simulation state.
    StateChanged {
        /// State before the transition.
        from: SimulationState,
        /// State after the transition.
        to: SimulationState,
    },
    /// Reports that a state transition request was refused.
    StateTransitionRejected {
        /// State that remained active.
        current: SimulationState,
        /// State that was requested.
        requested: SimulationState,
    },
    /// Confirms that the player moved.
    PlayerMoved {
        /// Cell occupied before the move.
        from: Coordinate,
        /// Cell occupied after the move.
        to: Coordinate,
    },
    /// Announces that the player entered a room for the first time.
    RoomExplored {
        /// Room that was explored.
        room: RoomId,
    },
    /// Confirms that an item moved from a room into the inventory.
    ItemPickedUp {
        /// Item that was picked up.
        item: ItemId,
        /// Display name of the item.
        name: String,
    },
    /// Reports that an item was left behind because the inventory is full.
    InventoryFull {
        /// Item that could not be picked up.
        item: ItemId,
    },
    /// Confirms that an item now occupies an equipment slot.
    ItemEquipped {
        /// Item that was equipped.
        item: ItemId,
        /// Slot the item occupies.
        slot: EquipSlot,
    },
    /// Reports that the player regained hit points.
    PlayerHealed {
        /// Hit points actually restored.
        amount: u32,
        /// Hit points after healing.
        hp: u32,
    },
    /// Reports that an enemy hit the player.
    PlayerDamaged {
        /// Enemy that dealt the damage.
        source: EnemyId,
        /// Damage dealt.
        amount: u32,
        /// Hit points remaining.
        hp: u32,
    },
    /// Reports that the player hit an enemy.
    EnemyDamaged {
        /// Enemy that took the damage.
        enemy: EnemyId,
        /// Damage dealt.
        amount: u32,
        /// Hit points remaining.
        hp: u32,
    },
    /// Announces that an enemy died and left the active roster.
    EnemyDefeated {
        /// Enemy that was defeated.
        enemy: EnemyId,
        /// Archetype of the defeated enemy.
        kind: EnemyType,
    },
    /// Announces that the player gained a level.
    PlayerLeveledUp {
        /// Level reached.
        level: u32,
    },
    /// Announces a change in an enemy's AI state.
    EnemyStateChanged {
        /// Enemy whose state changed.
        enemy: EnemyId,
        /// Previous state.
        from: EnemyState,
        /// New state.
        to: EnemyState,
    },
    /// Confirms that an enemy moved between two cells.
    EnemyMoved {
        /// Enemy that moved.
        enemy: EnemyId,
        /// Cell occupied before the move.
        from: Coordinate,
        /// Cell occupied after the move.
        to: Coordinate,
    },
}

/// Immutable representation of a single enemy used for queries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnemySnapshot {
    /// Unique identifier assigned to the enemy.
    pub id: EnemyId,
    /// Archetype of the enemy.
    pub kind: EnemyType,
    /// Cell currently occupied by the enemy.
    pub position: Coordinate,
    /// Current combat stats.
    pub stats: CombatStats,
    /// Current AI state.
    pub state: EnemyState,
    /// Head of the cached path, if any.
    pub next_waypoint: Option<Coordinate>,
    /// Number of waypoints remaining in the cached path.
    pub path_len: usize,
}

/// Read-only snapshot describing every enemy in the active roster.
#[derive(Clone, Debug, Default)]
pub struct EnemyView {
    snapshots: Vec<EnemySnapshot>,
}

impl EnemyView {
    /// Creates a new enemy view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<EnemySnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured enemy snapshots in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = &EnemySnapshot> {
        self.snapshots.iter()
    }

    /// Number of enemies captured by the view.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether the view holds no enemies.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<EnemySnapshot> {
        self.snapshots
    }
}

/// Immutable representation of the player used for queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlayerSnapshot {
    /// Cell occupied by the player.
    pub position: Coordinate,
    /// Base combat stats.
    pub stats: CombatStats,
    /// Attack including the equipped weapon.
    pub attack: u32,
    /// Defense including the equipped armor.
    pub defense: u32,
    /// Current level, starting at 1.
    pub level: u32,
    /// Accumulated experience.
    pub experience: u32,
}

/// Summary handed to the persistence collaborator for encoding and signing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameSnapshot {
    /// Cell occupied by the player.
    pub player_position: Coordinate,
    /// Player hit points.
    pub player_hp: u32,
    /// Player level.
    pub player_level: u32,
    /// Width of the dungeon grid.
    pub dungeon_width: u32,
    /// Height of the dungeon grid.
    pub dungeon_height: u32,
    /// Tick at which the snapshot was captured.
    pub tick: u64,
}

/// Failure to produce a usable dungeon.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum DungeonGenerationError {
    /// Subdivision finished without committing a single room.
    #[error("dungeon generation produced no rooms")]
    NoRooms,
    /// The generation parameters cannot produce rooms.
    #[error("invalid generation config: {reason}")]
    InvalidConfig {
        /// Description of the offending parameter.
        reason: &'static str,
    },
}

/// Restored state that violates world invariants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum InvalidGameStateError {
    /// Hit points exceed the player's maximum.
    #[error("player hp {hp} exceeds maximum {max_hp}")]
    HpOutOfRange {
        /// Hit points carried by the snapshot.
        hp: u32,
        /// Maximum hit points of the player.
        max_hp: u32,
    },
    /// Position lies outside the dungeon grid.
    #[error("player position {position} lies outside the {width}x{height} grid")]
    PositionOutOfBounds {
        /// Position carried by the snapshot.
        position: Coordinate,
        /// Grid width.
        width: u32,
        /// Grid height.
        height: u32,
    },
    /// Level below the minimum of 1.
    #[error("player level {level} is below 1")]
    InvalidLevel {
        /// Level carried by the snapshot.
        level: u32,
    },
    /// The snapshot was captured from a dungeon of different size.
    #[error("snapshot dungeon is {found_width}x{found_height}, expected {width}x{height}")]
    DimensionMismatch {
        /// Width of the active dungeon.
        width: u32,
        /// Height of the active dungeon.
        height: u32,
        /// Width recorded in the snapshot.
        found_width: u32,
        /// Height recorded in the snapshot.
        found_height: u32,
    },
}
