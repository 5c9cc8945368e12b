use crate::error::InvalidMove;
use crate::pile::Pile;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Player,
    Robot,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RobotReply {
    pub taken: u32,
    pub left: u32,
}

/// What happened during one call to [`Session::play_turn`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    /// Matches left once the player has moved.
    pub after_player: u32,
    /// `None` when the player emptied the pile and the robot never played.
    pub robot: Option<RobotReply>,
    pub winner: Option<Side>,
}

impl Turn {
    /// Matches left at the end of the turn.
    pub fn left(&self) -> u32 {
        self.robot.map_or(self.after_player, |reply| reply.left)
    }
}

impl Display for Turn {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let Some(reply) = self.robot else {
            return write!(f, "User wins!");
        };
        writeln!(f, "{} left after user turn", self.after_player)?;
        writeln!(f, "Robot takes {}", reply.taken)?;
        writeln!(f, "{} left", reply.left)?;
        match self.winner {
            Some(Side::Robot) => write!(f, "Robot wins!"),
            _ => write!(f, "User turn"),
        }
    }
}

/// A single game between the player and the robot. The player always moves
/// first and every player move is answered by the robot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pile: Pile,
    winner: Option<Side>,
}

impl Session {
    pub fn new(count: u32) -> Session {
        log::info!("new game with {} matches", count);
        Session {
            pile: Pile::new(count),
            winner: None,
        }
    }

    /// Applies the player's move, then lets the robot answer unless the
    /// player emptied the pile.
    pub fn play_turn(&mut self, taken: u32) -> Result<Turn, InvalidMove> {
        if self.winner.is_some() {
            return Err(InvalidMove::PileEmpty);
        }
        self.pile.apply_player_move(taken)?;
        let after_player = self.pile.remaining();
        if self.pile.is_over() {
            return Ok(self.finish(after_player, None, Side::Player));
        }

        let reply = RobotReply {
            taken: self.pile.apply_robot_move()?,
            left: self.pile.remaining(),
        };
        if self.pile.is_over() {
            return Ok(self.finish(after_player, Some(reply), Side::Robot));
        }
        Ok(Turn {
            after_player,
            robot: Some(reply),
            winner: None,
        })
    }

    pub fn pile(&self) -> &Pile {
        &self.pile
    }

    pub fn winner(&self) -> Option<Side> {
        self.winner
    }

    pub fn is_over(&self) -> bool {
        self.pile.is_over()
    }

    fn finish(&mut self, after_player: u32, robot: Option<RobotReply>, winner: Side) -> Turn {
        log::info!("{:?} takes the last match", winner);
        self.winner = Some(winner);
        Turn {
            after_player,
            robot,
            winner: Some(winner),
        }
    }
}
