use crate::board::Position;
use crate::game::{GamePhase, Player};

/// Errors returned by board lookups and game operations.
///
/// All of these are local validation failures: the operation is rejected
/// and the board is left exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("position {0} is outside the board (1-24)")]
    OutOfRange(Position),

    #[error("invalid position {0}")]
    InvalidPosition(Position),

    #[error("position {0} is already occupied")]
    OccupiedPosition(Position),

    #[error("position {position} does not hold a checker of {player}")]
    NotOwner { player: Player, position: Position },

    #[error("position {to} is not adjacent to {from}")]
    NotAdjacent { from: Position, to: Position },

    #[error("position {position} does not hold an opposing checker for {player}")]
    WrongOwner { player: Player, position: Position },

    #[error("operation not allowed during the {0} phase")]
    WrongPhase(GamePhase),

    #[error("it is not {0}'s turn")]
    WrongTurn(Player),

    #[error("game is over, {winner} has won")]
    GameOver { winner: Player },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_range_display() {
        assert_eq!(
            Error::OutOfRange(25).to_string(),
            "position 25 is outside the board (1-24)"
        );
    }

    #[test]
    fn test_not_adjacent_display() {
        let err = Error::NotAdjacent { from: 1, to: 3 };
        assert_eq!(err.to_string(), "position 3 is not adjacent to 1");
    }

    #[test]
    fn test_wrong_owner_display() {
        let err = Error::WrongOwner {
            player: Player::One,
            position: 7,
        };
        assert_eq!(
            err.to_string(),
            "position 7 does not hold an opposing checker for Player 1"
        );
    }

    #[test]
    fn test_wrong_phase_display() {
        assert_eq!(
            Error::WrongPhase(GamePhase::Removal).to_string(),
            "operation not allowed during the removal phase"
        );
    }
}
