use std::{fmt, time::Duration};

use crate::{
    config::Config,
    generators::{Algorithm, RandomJumpCarver, get_rng},
    maze::{Coord, Grid, MazeError},
    solvers::Solver,
};

/// What the session is currently animating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Ready,
    /// Carving one step per tick
    Generating,
    /// Revealing the solution one coordinate per tick
    Solving,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Ready => write!(f, "Ready"),
            Phase::Generating => write!(f, "Generating..."),
            Phase::Solving => write!(f, "Solving..."),
        }
    }
}

/// User actions a front end can forward to a [`Session`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Start a new maze, animated if enabled. Finishes a running generation instantly.
    Generate,
    /// Toggle the solution, revealing it step by step if animation is enabled.
    Solve,
    /// Generate and solve at once, and turn animation off.
    RegenerateInstantly,
    /// Flip the animation flag. Finishes a running generation instantly.
    ToggleAnimation,
    /// Start revealing the solution, or stop a running reveal.
    AnimateSolution,
    /// Show or hide the solution without animating it.
    ToggleSolutionVisibility,
    SelectAlgorithm(Algorithm),
}

/// Owns a maze together with its carver and solver, and drives both from an
/// external clock.
pub struct Session {
    config: Config,
    grid: Grid,
    carver: RandomJumpCarver,
    solver: Solver,
    phase: Phase,
    show_solution: bool,
    /// Number of solution coordinates revealed while in `Phase::Solving`
    revealed: usize,
    /// Clock value of the last unit of animation work
    last_update: Duration,
}

impl Session {
    /// Creates the session and generates a first maze instantly.
    pub fn new(config: Config) -> Result<Self, MazeError> {
        let grid = Grid::new(config.width, config.height)?;
        let carver = RandomJumpCarver::new(get_rng(config.seed));
        let mut session = Session {
            config,
            grid,
            carver,
            solver: Solver::new(),
            phase: Phase::Ready,
            show_solution: false,
            revealed: 0,
            last_update: Duration::ZERO,
        };
        session.generate_instantly();
        Ok(session)
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn carver(&self) -> &RandomJumpCarver {
        &self.carver
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn algorithm(&self) -> Algorithm {
        self.config.algorithm
    }

    pub fn is_animating(&self) -> bool {
        self.phase != Phase::Ready
    }

    pub fn is_solution_shown(&self) -> bool {
        self.show_solution
    }

    /// The full path of the current maze, empty while it is being generated.
    pub fn solution(&self) -> &[Coord] {
        self.solver.solution()
    }

    /// The part of the solution that should be drawn right now.
    pub fn visible_solution(&self) -> &[Coord] {
        match (self.show_solution, self.phase) {
            (false, _) => &[],
            (true, Phase::Solving) => &self.solver.solution()[..self.revealed],
            (true, _) => self.solver.solution(),
        }
    }

    pub fn status(&self) -> String {
        self.phase.to_string()
    }

    /// Multi-line summary of the maze and what the session is doing.
    pub fn info(&self) -> String {
        format!(
            "Maze Size: {}x{}\nGeneration Algorithm: {}\n{}",
            self.grid.width(),
            self.grid.height(),
            self.config.algorithm,
            self.phase
        )
    }

    pub fn handle(&mut self, command: Command) {
        tracing::info!("[session] {:?} while {:?}", command, self.phase);
        match command {
            Command::Generate => {
                if self.phase == Phase::Generating {
                    self.generate_instantly();
                } else if self.config.animate {
                    self.grid.fill_walls();
                    self.solver.clear();
                    self.carver.reset(&mut self.grid);
                    self.show_solution = false;
                    self.phase = Phase::Generating;
                } else {
                    self.generate_instantly();
                }
            }
            Command::Solve => {
                if self.phase == Phase::Generating {
                    return;
                }
                self.show_solution = !self.show_solution;
                if self.show_solution {
                    self.solver.solve(&self.grid);
                    if self.config.animate {
                        self.start_reveal();
                    } else {
                        self.phase = Phase::Ready;
                    }
                } else {
                    self.phase = Phase::Ready;
                }
            }
            Command::RegenerateInstantly => {
                self.generate_instantly();
                self.config.animate = false;
            }
            Command::ToggleAnimation => {
                self.config.animate = !self.config.animate;
                if self.phase == Phase::Generating {
                    self.generate_instantly();
                }
            }
            Command::AnimateSolution => match self.phase {
                Phase::Generating => {}
                Phase::Solving => self.phase = Phase::Ready,
                Phase::Ready => {
                    self.solver.solve(&self.grid);
                    self.show_solution = true;
                    self.start_reveal();
                }
            },
            Command::ToggleSolutionVisibility => {
                self.show_solution = !self.show_solution;
                if self.phase == Phase::Solving {
                    self.phase = Phase::Ready;
                }
            }
            Command::SelectAlgorithm(algorithm) => {
                if !algorithm.is_implemented() {
                    tracing::warn!(
                        "[session] {} is selectable but carves like {}",
                        algorithm,
                        Algorithm::RecursiveBacktracker
                    );
                }
                self.config.algorithm = algorithm;
            }
        }
    }

    /// Replaces the maze with a freshly generated one of the new size.
    /// On error the current maze is kept.
    pub fn resize(&mut self, width: u16, height: u16) -> Result<(), MazeError> {
        self.grid.resize(width, height)?;
        self.config.width = width;
        self.config.height = height;
        self.solver.clear();
        self.generate_instantly();
        Ok(())
    }

    /// Advances the running animation by one unit of work if more than the
    /// phase's delay has passed since the last one. `now` is any monotonic clock
    /// reading. Returns whether anything changed.
    pub fn tick(&mut self, now: Duration) -> bool {
        let delay = match self.phase {
            Phase::Ready => return false,
            Phase::Generating => self.config.generation_delay,
            Phase::Solving => self.config.solution_delay,
        };
        if now.saturating_sub(self.last_update) <= delay {
            return false;
        }
        self.last_update = now;

        match self.phase {
            Phase::Generating => {
                self.carver.step(&mut self.grid);
                if !self.carver.is_active() {
                    self.solver.solve(&self.grid);
                    self.phase = Phase::Ready;
                }
            }
            Phase::Solving => {
                self.revealed += 1;
                if self.revealed >= self.solver.solution().len() {
                    self.phase = Phase::Ready;
                }
            }
            Phase::Ready => {}
        }
        true
    }

    fn generate_instantly(&mut self) {
        self.carver.generate(&mut self.grid);
        self.solver.solve(&self.grid);
        self.phase = Phase::Ready;
    }

    fn start_reveal(&mut self) {
        self.revealed = 0;
        self.phase = if self.solver.solution().is_empty() {
            Phase::Ready
        } else {
            Phase::Solving
        };
    }
}
