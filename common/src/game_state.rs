use std::collections::HashSet;
use anyhow::{Context, Result, bail, ensure};
use serde::{Deserialize, Serialize};
use crate::{Direction, GameConfig, Position, Snake};
use crate::util::{PseudoRandom, RandomGenerator};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub enum GameCommand {
    Tick,
    Turn { direction: Direction },
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum CollisionKind {
    Wall,
    Snake,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub enum GameEvent {
    SnakeTurned { direction: Direction },
    SnakeMoved { head: Position, grew: bool },
    FoodEaten { position: Position },
    FoodSpawned { position: Position },
    GameOver { cause: CollisionKind },
}

impl GameEvent {
    /// Whether the event changes what ends up on the canvas.
    pub fn affects_canvas(&self) -> bool {
        matches!(self, GameEvent::SnakeMoved { .. } | GameEvent::FoodSpawned { .. })
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Arena {
    pub width: u16,
    pub height: u16,
    pub snake: Snake,
    pub food: Position,
}

impl Arena {
    pub fn contains(&self, position: &Position) -> bool {
        position.x >= 0
            && position.x < self.width as i16
            && position.y >= 0
            && position.y < self.height as i16
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Running,
    GameOver,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct GameState {
    pub tick: u32,
    pub arena: Arena,
    pub direction: Direction,
    pub status: GameStatus,
    pub food_eaten: u32,
    rng: PseudoRandom,
}

impl GameState {
    /// Fresh game: one segment on `config.start`, food somewhere else.
    pub fn new(config: &GameConfig, seed: u64) -> Result<Self> {
        config.validate().context("Invalid game config")?;

        let mut state = GameState {
            tick: 0,
            arena: Arena {
                width: config.grid_width(),
                height: config.grid_height(),
                snake: Snake::new(config.start),
                food: config.start,
            },
            direction: config.initial_direction,
            status: GameStatus::Running,
            food_eaten: 0,
            rng: PseudoRandom::new(seed),
        };
        state.arena.food = Self::pick_food(&state.arena, &mut state.rng, None)
            .context("Failed to place initial food")?;
        Ok(state)
    }

    /// Running game with an explicit layout. Rejects layouts that break the
    /// board invariants (out of bounds, overlapping segments, food on the snake).
    pub fn from_parts(arena: Arena, direction: Direction, seed: u64) -> Result<Self> {
        ensure!(arena.width > 0 && arena.height > 0, "arena must have at least one cell");

        let mut seen = HashSet::new();
        for segment in arena.snake.segments() {
            ensure!(arena.contains(segment), "segment {:?} is outside the arena", segment);
            ensure!(seen.insert(*segment), "segment {:?} appears twice", segment);
        }
        ensure!(arena.contains(&arena.food), "food {:?} is outside the arena", arena.food);
        ensure!(!seen.contains(&arena.food), "food {:?} lies on the snake", arena.food);

        Ok(GameState {
            tick: 0,
            arena,
            direction,
            status: GameStatus::Running,
            food_eaten: 0,
            rng: PseudoRandom::new(seed),
        })
    }

    pub fn current_tick(&self) -> u32 { self.tick }

    pub fn is_game_over(&self) -> bool {
        self.status == GameStatus::GameOver
    }

    pub fn snake(&self) -> &Snake {
        &self.arena.snake
    }

    pub fn food(&self) -> Position {
        self.arena.food
    }

    /// Moving one step in `direction` would put the head onto the neck.
    pub fn is_reversal(&self, direction: Direction) -> bool {
        let snake = &self.arena.snake;
        snake.neck().is_some_and(|neck| snake.head().step(direction) == neck)
    }

    pub fn exec_command(&mut self, command: &GameCommand) -> Result<Vec<GameEvent>> {
        let mut out: Vec<GameEvent> = Vec::new();

        // Terminal state, nothing moves anymore
        if self.is_game_over() {
            return Ok(out);
        }

        match command {
            GameCommand::Tick => {
                let new_head = self.arena.snake.head().step(self.direction);

                if !self.arena.contains(&new_head) {
                    let event = GameEvent::GameOver { cause: CollisionKind::Wall };
                    self.apply_event(event, Some(&mut out));
                } else if self.arena.snake.contains_point(&new_head) {
                    let event = GameEvent::GameOver { cause: CollisionKind::Snake };
                    self.apply_event(event, Some(&mut out));
                } else {
                    let grew = new_head == self.arena.food;

                    // Food for the grown snake is picked before anything is committed,
                    // a full grid leaves the state untouched
                    let respawn = if grew {
                        let mut rng = self.rng.clone();
                        let position = Self::pick_food(&self.arena, &mut rng, Some(new_head))
                            .context("Failed to respawn food")?;
                        self.rng = rng;
                        Some(position)
                    } else {
                        None
                    };

                    let event = GameEvent::SnakeMoved { head: new_head, grew };
                    self.apply_event(event, Some(&mut out));

                    if let Some(position) = respawn {
                        let event = GameEvent::FoodEaten { position: new_head };
                        self.apply_event(event, Some(&mut out));
                        self.apply_event(GameEvent::FoodSpawned { position }, Some(&mut out));
                    }
                }

                self.tick += 1;
            }

            GameCommand::Turn { direction } => {
                let direction = *direction;
                if self.is_reversal(direction) {
                    log::trace!("Ignoring reversal to {:?} at tick {}", direction, self.tick);
                } else if direction != self.direction {
                    self.apply_event(GameEvent::SnakeTurned { direction }, Some(&mut out));
                }
            }
        }

        Ok(out)
    }

    pub fn apply_event(&mut self, event: GameEvent, out: Option<&mut Vec<GameEvent>>) {
        if let Some(out) = out {
            out.push(event.clone());
        }

        match event {
            GameEvent::SnakeTurned { direction } => {
                self.direction = direction;
            }

            GameEvent::SnakeMoved { head, grew } => {
                self.arena.snake.push_head(head);
                if !grew {
                    self.arena.snake.drop_tail();
                }
            }

            GameEvent::FoodEaten { position } => {
                self.food_eaten += 1;
                log::debug!(
                    "Food eaten at {:?}, snake length {}",
                    position,
                    self.arena.snake.len()
                );
            }

            GameEvent::FoodSpawned { position } => {
                self.arena.food = position;
            }

            GameEvent::GameOver { cause } => {
                self.status = GameStatus::GameOver;
                log::info!(
                    "Game over at tick {} ({:?} collision), snake length {}",
                    self.tick, cause, self.arena.snake.len()
                );
            }
        }
    }

    /// Picks a uniformly random cell not covered by the snake nor by `grown_head`.
    fn pick_food(
        arena: &Arena,
        rng: &mut impl RandomGenerator,
        grown_head: Option<Position>,
    ) -> Result<Position> {
        let width = arena.width as u32;
        let height = arena.height as u32;
        let occupied = |position: &Position| {
            grown_head == Some(*position) || arena.snake.contains_point(position)
        };

        // Rejection sampling, bounded so a crowded board cannot spin forever
        for _ in 0..width * height {
            let position = Position::new(
                rng.next_below(width) as i16,
                rng.next_below(height) as i16,
            );
            if !occupied(&position) {
                log::trace!("Food spawned at {:?}", position);
                return Ok(position);
            }
        }

        let free: Vec<Position> = (0..height as i16)
            .flat_map(|y| (0..width as i16).map(move |x| Position::new(x, y)))
            .filter(|position| !occupied(position))
            .collect();

        if free.is_empty() {
            bail!("No free cell left for food on the {}x{} grid", width, height);
        }

        let position = free[rng.next_below(free.len() as u32) as usize];
        log::debug!("Food spawned at {:?} from {} free cells", position, free.len());
        Ok(position)
    }
}
