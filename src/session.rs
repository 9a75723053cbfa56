use log::{debug, info};
use rand::Rng;

use crate::generator::generate;
use crate::grid::{Dir, Grid, Pos};

/// Result of a single move request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The player stepped to `to`; `won` is true only on the move that
    /// reached the exit.
    Moved { to: Pos, won: bool },
    /// A wall is in the way.
    Blocked,
    /// The session is already won.
    Ignored,
}

impl MoveOutcome {
    pub fn accepted(self) -> bool {
        matches!(self, MoveOutcome::Moved { .. })
    }
}

/// One maze plus the player's progress through it.
#[derive(Clone, Debug)]
pub struct Session {
    grid: Grid,
    player: Pos,
    won: bool,
    moves: u32,
}

impl Session {
    /// Starts a fresh session on a newly carved maze of `size`×`size` cells.
    pub fn generate<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Self {
        Self::from_grid(generate(size, rng))
    }

    /// Wraps a freshly carved grid, player on the entrance.
    fn from_grid(grid: Grid) -> Self {
        let player = grid.entrance();
        let won = player == grid.exit();
        info!("new {0}x{0} maze", grid.size());
        Session {
            grid,
            player,
            won,
            moves: 0,
        }
    }

    /// Replaces the whole session with a new maze of the same size.
    pub fn regenerate<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        *self = Self::generate(self.grid.size(), rng);
    }

    pub fn move_player(&mut self, dir: Dir) -> MoveOutcome {
        if self.won {
            return MoveOutcome::Ignored;
        }
        if self.grid.has_wall(self.player, dir) {
            debug!("move {:?} from {:?} blocked", dir, self.player);
            return MoveOutcome::Blocked;
        }
        // Border walls are never carved, so an open wall always has a neighbor.
        let Some(next) = self.grid.neighbor(self.player, dir) else {
            return MoveOutcome::Blocked;
        };
        self.player = next;
        self.moves = self.moves.saturating_add(1);
        if next == self.grid.exit() {
            self.won = true;
            info!("maze solved in {} moves", self.moves);
        }
        debug!("moved {:?} to {:?}", dir, next);
        MoveOutcome::Moved {
            to: next,
            won: self.won,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn position(&self) -> Pos {
        self.player
    }

    pub fn is_won(&self) -> bool {
        self.won
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn first_choice(size: usize) -> Session {
        Session::generate(size, &mut StepRng::new(0, 0))
    }

    #[test]
    fn starts_at_entrance_playing() {
        let session = Session::generate(10, &mut StdRng::seed_from_u64(3));
        assert_eq!(session.position(), Pos::new(0, 0));
        assert!(!session.is_won());
        assert_eq!(session.moves(), 0);
    }

    #[test]
    fn single_cell_is_won_immediately() {
        let mut session = Session::generate(1, &mut StdRng::seed_from_u64(3));
        assert_eq!(session.position(), Pos::new(0, 0));
        assert!(session.is_won());
        assert_eq!(session.move_player(Dir::Right), MoveOutcome::Ignored);
    }

    #[test]
    fn up_from_entrance_is_blocked() {
        let mut session = Session::generate(10, &mut StdRng::seed_from_u64(11));
        assert_eq!(session.move_player(Dir::Up), MoveOutcome::Blocked);
        assert_eq!(session.move_player(Dir::Left), MoveOutcome::Blocked);
        assert_eq!(session.position(), Pos::new(0, 0));
        assert_eq!(session.moves(), 0);
    }

    #[test]
    fn right_never_passes_last_column() {
        let mut session = first_choice(10);
        for _ in 0..20 {
            session.move_player(Dir::Right);
            assert!(session.position().x <= 9);
        }
        assert_eq!(session.position(), Pos::new(9, 0));
        assert_eq!(session.moves(), 9);
    }

    #[test]
    fn right_then_down_wins_once() {
        let mut session = first_choice(10);
        for _ in 0..9 {
            assert!(session.move_player(Dir::Right).accepted());
        }
        for y in 1..9 {
            assert_eq!(
                session.move_player(Dir::Down),
                MoveOutcome::Moved {
                    to: Pos::new(9, y),
                    won: false
                }
            );
        }
        assert_eq!(
            session.move_player(Dir::Down),
            MoveOutcome::Moved {
                to: Pos::new(9, 9),
                won: true
            }
        );
        assert!(session.is_won());
    }

    #[test]
    fn won_session_ignores_moves() {
        let mut session = first_choice(3);
        for dir in [Dir::Right, Dir::Right, Dir::Down, Dir::Down] {
            session.move_player(dir);
        }
        assert!(session.is_won());
        let moves = session.moves();
        for dir in Dir::ALL {
            assert_eq!(session.move_player(dir), MoveOutcome::Ignored);
        }
        assert_eq!(session.position(), Pos::new(2, 2));
        assert_eq!(session.moves(), moves);
        assert!(session.is_won());
    }

    #[test]
    fn regenerate_resets_progress() {
        let mut session = first_choice(3);
        for dir in [Dir::Right, Dir::Right, Dir::Down, Dir::Down] {
            session.move_player(dir);
        }
        assert!(session.is_won());
        session.regenerate(&mut StdRng::seed_from_u64(5));
        assert_eq!(session.grid().size(), 3);
        assert_eq!(session.position(), Pos::new(0, 0));
        assert!(!session.is_won());
        assert_eq!(session.moves(), 0);
    }

    #[test]
    fn move_counter_saturates() {
        let mut session = first_choice(4);
        session.moves = u32::MAX - 1;
        session.move_player(Dir::Right);
        session.move_player(Dir::Left);
        session.move_player(Dir::Right);
        assert_eq!(session.moves(), u32::MAX);
        assert_eq!(session.position(), Pos::new(1, 0));
    }

    #[test]
    fn backtracking_moves_count() {
        let mut session = first_choice(4);
        session.move_player(Dir::Right);
        session.move_player(Dir::Left);
        assert_eq!(session.position(), Pos::new(0, 0));
        assert_eq!(session.moves(), 2);
    }
}
