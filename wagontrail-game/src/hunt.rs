//! Real-time hunting on a small grid.
//!
//! The encounter owns its own clock: countdown, player stepping, animal
//! wandering, spawning, shooting, bullet flight and hits all run in that
//! order inside a single `update`. Nothing touches the ledger until the
//! player confirms the results screen.

use log::info;
use rand::Rng;
use serde::Serialize;

use crate::constants::{
    HUNT_MAX_ROUNDS, HUNT_ROUNDS_PER_BOX, LOG_TARGET_ENCOUNTER, MEAT_BUFFALO, MEAT_DEER,
    MEAT_RABBIT, MEAT_SQUIRREL,
};
use crate::controller::{InputSnapshot, Key, ScreenCtx, Transition};
use crate::journey::{HuntConfig, LogKind};
use crate::ledger::SupplyKind;
use crate::numbers::ceil_f64_to_u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Species {
    Rabbit,
    Squirrel,
    Deer,
    Buffalo,
}

impl Species {
    pub const ALL: [Self; 4] = [Self::Rabbit, Self::Squirrel, Self::Deer, Self::Buffalo];

    #[must_use]
    pub const fn meat(self) -> u32 {
        match self {
            Self::Rabbit => MEAT_RABBIT,
            Self::Squirrel => MEAT_SQUIRREL,
            Self::Deer => MEAT_DEER,
            Self::Buffalo => MEAT_BUFFALO,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Rabbit => "rabbit",
            Self::Squirrel => "squirrel",
            Self::Deer => "deer",
            Self::Buffalo => "buffalo",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Facing {
    #[default]
    Up,
    Right,
    Down,
    Left,
}

impl Facing {
    const ALL: [Self; 4] = [Self::Up, Self::Right, Self::Down, Self::Left];

    const fn delta(self) -> (i16, i16) {
        match self {
            Self::Up => (0, -1),
            Self::Right => (1, 0),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
        }
    }

    /// First held direction, arrows and WASD alike, checked up/down/left/right.
    fn from_held(input: &InputSnapshot) -> Option<Self> {
        if input.is_held(Key::Up) || input.is_held(Key::W) {
            Some(Self::Up)
        } else if input.is_held(Key::Down) || input.is_held(Key::S) {
            Some(Self::Down)
        } else if input.is_held(Key::Left) || input.is_held(Key::A) {
            Some(Self::Left)
        } else if input.is_held(Key::Right) || input.is_held(Key::D) {
            Some(Self::Right)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ObstacleKind {
    Rock,
    Stump,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Cell {
    pub x: i16,
    pub y: i16,
}

impl Cell {
    #[must_use]
    pub const fn new(x: i16, y: i16) -> Self {
        Self { x, y }
    }

    const fn step(self, facing: Facing) -> Self {
        let (dx, dy) = facing.delta();
        Self::new(self.x + dx, self.y + dy)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Obstacle {
    pub cell: Cell,
    pub kind: ObstacleKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Animal {
    pub species: Species,
    pub cell: Cell,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Bullet {
    pub cell: Cell,
    pub facing: Facing,
    pub range_left: u8,
}

/// What the party takes home once the player confirms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HuntSummary {
    pub shots: u32,
    pub boxes_used: u32,
    pub meat_shot: u32,
    pub meat_kept: u32,
    pub meat_wasted: u32,
}

/// Ammunition boxes spent for `shots` rounds, never more than owned.
#[must_use]
pub fn boxes_used(shots: u32, boxes_owned: u32) -> u32 {
    ceil_f64_to_u32(f64::from(shots) / f64::from(HUNT_ROUNDS_PER_BOX)).min(boxes_owned)
}

#[must_use]
pub fn summarize_hunt(shots: u32, meat: u32, boxes_owned: u32, carry_capacity: u32) -> HuntSummary {
    let kept = meat.min(carry_capacity);
    HuntSummary {
        shots,
        boxes_used: boxes_used(shots, boxes_owned),
        meat_shot: meat,
        meat_kept: kept,
        meat_wasted: meat - kept,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HuntView {
    pub width: u8,
    pub height: u8,
    pub time_left: f32,
    pub player: Cell,
    pub facing: Facing,
    pub rounds: u32,
    pub shots: u32,
    pub meat: u32,
    pub obstacles: Vec<Obstacle>,
    pub animals: Vec<Animal>,
    pub bullets: Vec<Bullet>,
    pub complete: bool,
    pub summary: Option<HuntSummary>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HuntingEncounter {
    cfg: HuntConfig,
    time_left: f32,
    player: Cell,
    facing: Facing,
    obstacles: Vec<Obstacle>,
    animals: Vec<Animal>,
    bullets: Vec<Bullet>,
    rounds: u32,
    shots: u32,
    meat: u32,
    boxes_owned: u32,
    player_clock: f32,
    animal_clock: f32,
    spawn_clock: f32,
    complete: bool,
}

impl HuntingEncounter {
    #[must_use]
    pub fn new(cfg: &HuntConfig) -> Self {
        let player = Cell::new(i16::from(cfg.grid_width / 2), i16::from(cfg.grid_height / 2));
        Self {
            cfg: cfg.clone(),
            time_left: cfg.time_limit_secs,
            player,
            facing: Facing::Up,
            obstacles: Vec::new(),
            animals: Vec::new(),
            bullets: Vec::new(),
            rounds: 0,
            shots: 0,
            meat: 0,
            boxes_owned: 0,
            player_clock: 0.0,
            animal_clock: 0.0,
            spawn_clock: 0.0,
            complete: false,
        }
    }

    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.complete
    }

    #[must_use]
    pub const fn rounds(&self) -> u32 {
        self.rounds
    }

    #[must_use]
    pub const fn shots(&self) -> u32 {
        self.shots
    }

    #[must_use]
    pub const fn meat(&self) -> u32 {
        self.meat
    }

    #[must_use]
    pub const fn player(&self) -> Cell {
        self.player
    }

    #[must_use]
    pub const fn facing(&self) -> Facing {
        self.facing
    }

    #[must_use]
    pub fn animals(&self) -> &[Animal] {
        &self.animals
    }

    #[must_use]
    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    #[must_use]
    pub fn summary(&self) -> HuntSummary {
        summarize_hunt(self.shots, self.meat, self.boxes_owned, self.cfg.carry_capacity)
    }

    pub fn enter(&mut self, ctx: &mut ScreenCtx<'_>) {
        let mut rng = ctx.rngs.hunt();
        self.boxes_owned = ctx.session.ledger.supplies.ammunition;
        self.rounds = self
            .boxes_owned
            .saturating_mul(HUNT_ROUNDS_PER_BOX)
            .min(HUNT_MAX_ROUNDS);
        self.scatter_obstacles(&mut *rng);
        self.spawn_animal(&mut *rng);
        info!(
            target: LOG_TARGET_ENCOUNTER,
            "hunt started with {} rounds and {} obstacles",
            self.rounds,
            self.obstacles.len()
        );
    }

    fn in_bounds(&self, cell: Cell) -> bool {
        cell.x >= 0
            && cell.y >= 0
            && cell.x < i16::from(self.cfg.grid_width)
            && cell.y < i16::from(self.cfg.grid_height)
    }

    fn is_blocked(&self, cell: Cell) -> bool {
        !self.in_bounds(cell) || self.obstacles.iter().any(|o| o.cell == cell)
    }

    fn random_cell<R: Rng + ?Sized>(&self, rng: &mut R) -> Cell {
        Cell::new(
            rng.gen_range(0..i16::from(self.cfg.grid_width)),
            rng.gen_range(0..i16::from(self.cfg.grid_height)),
        )
    }

    fn scatter_obstacles<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.obstacles.clear();
        while self.obstacles.len() < self.cfg.obstacle_count {
            let cell = self.random_cell(rng);
            if cell == self.player || self.obstacles.iter().any(|o| o.cell == cell) {
                continue;
            }
            let kind = if rng.r#gen::<bool>() {
                ObstacleKind::Rock
            } else {
                ObstacleKind::Stump
            };
            self.obstacles.push(Obstacle { cell, kind });
        }
    }

    fn spawn_animal<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let species = Species::ALL[rng.gen_range(0..Species::ALL.len())];
        let max_x = i16::from(self.cfg.grid_width) - 1;
        let max_y = i16::from(self.cfg.grid_height) - 1;
        let cell = match rng.gen_range(0..4) {
            0 => Cell::new(rng.gen_range(0..=max_x), 0),
            1 => Cell::new(max_x, rng.gen_range(0..=max_y)),
            2 => Cell::new(rng.gen_range(0..=max_x), max_y),
            _ => Cell::new(0, rng.gen_range(0..=max_y)),
        };
        self.animals.push(Animal { species, cell });
    }

    pub fn update(&mut self, dt: f32, input: &InputSnapshot, ctx: &mut ScreenCtx<'_>) -> Transition {
        if self.complete {
            if input.confirm() {
                self.settle(ctx);
                return Transition::Pop;
            }
            return Transition::None;
        }
        let dt = dt.max(0.0);
        let mut rng = ctx.rngs.hunt();

        self.time_left -= dt;
        if self.time_left <= 0.0 {
            self.time_left = 0.0;
            self.complete = true;
        }

        self.player_clock += dt;
        if self.player_clock >= self.cfg.player_step_secs {
            self.player_clock = 0.0;
            if let Some(facing) = Facing::from_held(input) {
                self.facing = facing;
                let next = self.player.step(facing);
                if !self.is_blocked(next) {
                    self.player = next;
                }
            }
        }

        self.animal_clock += dt;
        if self.animal_clock >= self.cfg.animal_step_secs {
            self.animal_clock = 0.0;
            for i in 0..self.animals.len() {
                let facing = Facing::ALL[rng.gen_range(0..Facing::ALL.len())];
                let next = self.animals[i].cell.step(facing);
                if !self.is_blocked(next) {
                    self.animals[i].cell = next;
                }
            }
        }

        self.spawn_clock += dt;
        if self.spawn_clock >= self.cfg.spawn_interval_secs
            && self.animals.len() < self.cfg.max_animals
        {
            self.spawn_animal(&mut *rng);
            self.spawn_clock = 0.0;
        }

        if input.was_pressed(Key::Space) && self.rounds > 0 {
            self.rounds -= 1;
            self.shots += 1;
            self.bullets.push(Bullet {
                cell: self.player,
                facing: self.facing,
                range_left: self.cfg.bullet_range,
            });
        }

        self.advance_bullets();
        self.resolve_hits();

        if self.complete {
            info!(
                target: LOG_TARGET_ENCOUNTER,
                "hunt over after {} shots with {} lbs of meat",
                self.shots,
                self.meat
            );
        }
        Transition::None
    }

    fn advance_bullets(&mut self) {
        let mut bullets = std::mem::take(&mut self.bullets);
        bullets.retain_mut(|bullet| {
            if bullet.range_left == 0 {
                return false;
            }
            bullet.range_left -= 1;
            bullet.cell = bullet.cell.step(bullet.facing);
            self.in_bounds(bullet.cell)
        });
        self.bullets = bullets;
    }

    fn resolve_hits(&mut self) {
        for bullet in &self.bullets {
            let mut gained = 0;
            self.animals.retain(|animal| {
                if animal.cell == bullet.cell {
                    gained += animal.species.meat();
                    false
                } else {
                    true
                }
            });
            self.meat = self.meat.saturating_add(gained);
        }
    }

    fn settle(&self, ctx: &mut ScreenCtx<'_>) {
        let summary = self.summary();
        let supplies = &mut ctx.session.ledger.supplies;
        supplies.remove(SupplyKind::Ammunition, summary.boxes_used);
        supplies.add(SupplyKind::Food, summary.meat_kept);
        let text = if summary.meat_wasted > 0 {
            format!(
                "Hunt over: fired {} shots and brought back {} lbs of meat. {} lbs had to be left behind.",
                summary.shots, summary.meat_kept, summary.meat_wasted
            )
        } else {
            format!(
                "Hunt over: fired {} shots and brought back {} lbs of meat.",
                summary.shots, summary.meat_kept
            )
        };
        ctx.session.note(LogKind::Hunt, text);
    }

    #[must_use]
    pub fn render(&self) -> HuntView {
        HuntView {
            width: self.cfg.grid_width,
            height: self.cfg.grid_height,
            time_left: self.time_left,
            player: self.player,
            facing: self.facing,
            rounds: self.rounds,
            shots: self.shots,
            meat: self.meat,
            obstacles: self.obstacles.clone(),
            animals: self.animals.clone(),
            bullets: self.bullets.clone(),
            complete: self.complete,
            summary: self.complete.then(|| self.summary()),
        }
    }

    #[cfg(test)]
    fn place_animal(&mut self, species: Species, cell: Cell) {
        self.animals.push(Animal { species, cell });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::TrailDate;
    use crate::journey::{JourneyConfig, RngBundle, Session};
    use crate::ledger::Ledger;
    use crate::party::Party;
    use crate::setup::Profession;

    fn session(ammo_boxes: u32) -> Session {
        let party = Party::from_names("Ezra", &["Ada", "Bo", "Cy", "Di"]);
        let mut ledger = Ledger::new(0);
        ledger.supplies.ammunition = ammo_boxes;
        ledger.supplies.food = 50;
        Session::new(party, ledger, Profession::Farmer, TrailDate::default(), 2040)
    }

    fn quiet_config() -> JourneyConfig {
        let mut cfg = JourneyConfig::default();
        cfg.hunt.obstacle_count = 0;
        cfg.hunt.spawn_interval_secs = 60.0;
        cfg.hunt.animal_step_secs = 10.0;
        cfg
    }

    #[test]
    fn boxes_round_up_and_cap() {
        assert_eq!(boxes_used(0, 5), 0);
        assert_eq!(boxes_used(1, 5), 1);
        assert_eq!(boxes_used(20, 5), 1);
        assert_eq!(boxes_used(21, 5), 2);
        assert_eq!(boxes_used(100, 3), 3);
    }

    #[test]
    fn summary_caps_meat_at_carry_capacity() {
        let summary = summarize_hunt(3, 250, 2, 100);
        assert_eq!(summary.meat_kept, 100);
        assert_eq!(summary.meat_wasted, 150);
    }

    #[test]
    fn entry_state_follows_ammunition_and_grid() {
        let mut s = session(7);
        let rngs = RngBundle::from_user_seed(9);
        let cfg = JourneyConfig::default();
        let mut ctx = ScreenCtx::new(&mut s, &rngs, &cfg);
        let mut hunt = HuntingEncounter::new(&cfg.hunt);
        hunt.enter(&mut ctx);
        assert_eq!(hunt.rounds(), 100);
        assert_eq!(hunt.player(), Cell::new(10, 7));
        assert_eq!(hunt.facing(), Facing::Up);
        assert_eq!(hunt.obstacles().len(), 15);
        assert!(hunt.obstacles().iter().all(|o| o.cell != Cell::new(10, 7)));
        assert_eq!(hunt.animals().len(), 1);
    }

    #[test]
    fn held_key_moves_and_turns() {
        let mut s = session(1);
        let rngs = RngBundle::from_user_seed(1);
        let cfg = quiet_config();
        let mut ctx = ScreenCtx::new(&mut s, &rngs, &cfg);
        let mut hunt = HuntingEncounter::new(&cfg.hunt);
        hunt.enter(&mut ctx);
        let right = InputSnapshot::idle().hold(Key::D);
        hunt.update(0.1, &right, &mut ctx);
        assert_eq!(hunt.player(), Cell::new(11, 7));
        assert_eq!(hunt.facing(), Facing::Right);
        hunt.update(0.05, &right, &mut ctx);
        assert_eq!(hunt.player(), Cell::new(11, 7));
    }

    #[test]
    fn walls_block_but_still_turn() {
        let mut s = session(1);
        let rngs = RngBundle::from_user_seed(2);
        let cfg = quiet_config();
        let mut ctx = ScreenCtx::new(&mut s, &rngs, &cfg);
        let mut hunt = HuntingEncounter::new(&cfg.hunt);
        hunt.enter(&mut ctx);
        hunt.obstacles.push(Obstacle {
            cell: Cell::new(9, 7),
            kind: ObstacleKind::Rock,
        });
        hunt.update(0.1, &InputSnapshot::idle().hold(Key::Left), &mut ctx);
        assert_eq!(hunt.player(), Cell::new(10, 7));
        assert_eq!(hunt.facing(), Facing::Left);
    }

    #[test]
    fn shot_travels_and_bags_the_animal() {
        let mut s = session(1);
        let rngs = RngBundle::from_user_seed(3);
        let cfg = quiet_config();
        let mut ctx = ScreenCtx::new(&mut s, &rngs, &cfg);
        let mut hunt = HuntingEncounter::new(&cfg.hunt);
        hunt.enter(&mut ctx);
        hunt.animals.clear();
        hunt.place_animal(Species::Deer, Cell::new(10, 4));
        hunt.update(0.01, &InputSnapshot::pressed(Key::Space), &mut ctx);
        assert_eq!(hunt.shots(), 1);
        assert_eq!(hunt.rounds(), 19);
        for _ in 0..3 {
            hunt.update(0.01, &InputSnapshot::idle(), &mut ctx);
        }
        assert_eq!(hunt.meat(), 50);
        assert!(hunt.animals().is_empty());
    }

    #[test]
    fn empty_gun_does_not_fire() {
        let mut s = session(0);
        let rngs = RngBundle::from_user_seed(4);
        let cfg = quiet_config();
        let mut ctx = ScreenCtx::new(&mut s, &rngs, &cfg);
        let mut hunt = HuntingEncounter::new(&cfg.hunt);
        hunt.enter(&mut ctx);
        hunt.update(0.01, &InputSnapshot::pressed(Key::Space), &mut ctx);
        assert_eq!(hunt.shots(), 0);
    }

    #[test]
    fn spawns_respect_the_cap() {
        let mut s = session(1);
        let rngs = RngBundle::from_user_seed(5);
        let mut cfg = JourneyConfig::default();
        cfg.hunt.time_limit_secs = 600.0;
        let mut ctx = ScreenCtx::new(&mut s, &rngs, &cfg);
        let mut hunt = HuntingEncounter::new(&cfg.hunt);
        hunt.enter(&mut ctx);
        for _ in 0..200 {
            hunt.update(0.5, &InputSnapshot::idle(), &mut ctx);
            assert!(hunt.animals().len() <= 5);
        }
        assert_eq!(hunt.animals().len(), 5);
    }

    #[test]
    fn expiry_then_confirm_settles_the_ledger() {
        let mut s = session(2);
        let rngs = RngBundle::from_user_seed(6);
        let cfg = quiet_config();
        let mut ctx = ScreenCtx::new(&mut s, &rngs, &cfg);
        let mut hunt = HuntingEncounter::new(&cfg.hunt);
        hunt.enter(&mut ctx);
        hunt.update(0.01, &InputSnapshot::pressed(Key::Space), &mut ctx);
        hunt.meat = 180;
        assert_eq!(
            hunt.update(50.0, &InputSnapshot::idle(), &mut ctx),
            Transition::None
        );
        assert!(hunt.is_complete());
        assert_eq!(ctx.session.ledger.supplies.food, 50);
        assert_eq!(
            hunt.update(0.0, &InputSnapshot::pressed(Key::Enter), &mut ctx),
            Transition::Pop
        );
        assert_eq!(ctx.session.ledger.supplies.ammunition, 1);
        assert_eq!(ctx.session.ledger.supplies.food, 150);
    }
}
