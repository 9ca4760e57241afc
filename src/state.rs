use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::board::{Board, tiles_around};
use crate::types::{PlayerId, TileId, VertexId};

#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("player {player} has a settlement on unknown vertex {vertex}")]
    UnknownVertex { player: PlayerId, vertex: VertexId },
    #[error("vertex {vertex} is claimed by players {first} and {second}")]
    ContestedVertex {
        vertex: VertexId,
        first: PlayerId,
        second: PlayerId,
    },
    #[error("invalid state json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("cannot read state file: {0}")]
    Io(#[from] std::io::Error),
}

/// Settlement placements per player. Rendering only reads it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct State {
    #[serde(default)]
    pub houses: BTreeMap<PlayerId, Vec<VertexId>>,
}

impl State {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> Result<Self, StateError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, StateError> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    pub fn place_settlement(&mut self, player: PlayerId, vertex: VertexId) {
        let vertices = self.houses.entry(player).or_default();
        if !vertices.contains(&vertex) {
            vertices.push(vertex);
        }
    }

    pub fn players(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.houses.keys().copied()
    }

    pub fn settlements(&self, player: PlayerId) -> &[VertexId] {
        self.houses
            .get(&player)
            .map(|vertices| vertices.as_slice())
            .unwrap_or(&[])
    }

    /// Lowest-numbered player holding `vertex`.
    pub fn settlement_owner(&self, vertex: VertexId) -> Option<PlayerId> {
        self.houses
            .iter()
            .find(|(_, vertices)| vertices.contains(&vertex))
            .map(|(player, _)| *player)
    }

    /// Every settlement with its owner, ordered by vertex.
    pub fn settlements_by_vertex(&self) -> BTreeMap<VertexId, PlayerId> {
        let mut owners = BTreeMap::new();
        for (player, vertices) in &self.houses {
            for vertex in vertices {
                owners.entry(*vertex).or_insert(*player);
            }
        }
        owners
    }

    pub fn tiles_touched_by(&self, player: PlayerId, board: &Board) -> Vec<TileId> {
        tiles_around(board, self.settlements(player))
    }

    /// Checks every placement against `board`. Rendering does not require it.
    pub fn validate(&self, board: &Board) -> Result<(), StateError> {
        let mut owners: BTreeMap<VertexId, PlayerId> = BTreeMap::new();
        for (player, vertices) in &self.houses {
            for vertex in vertices {
                if !board.contains_vertex(*vertex) {
                    return Err(StateError::UnknownVertex {
                        player: *player,
                        vertex: *vertex,
                    });
                }
                if let Some(first) = owners.insert(*vertex, *player) {
                    if first != *player {
                        return Err(StateError::ContestedVertex {
                            vertex: *vertex,
                            first,
                            second: *player,
                        });
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> State {
        State::from_json(r#"{"houses": {"2": [30, 41], "1": [0, 12]}}"#).unwrap()
    }

    #[test]
    fn parses_player_keyed_houses() {
        let state = sample();
        let players: Vec<PlayerId> = state.players().collect();
        assert_eq!(players, vec![PlayerId(1), PlayerId(2)]);
        assert_eq!(state.settlements(PlayerId(2)), &[30, 41]);
        assert!(state.settlements(PlayerId(3)).is_empty());

        let encoded = serde_json::to_string(&state).unwrap();
        assert_eq!(State::from_json(&encoded).unwrap(), state);
    }

    #[test]
    fn owner_lookup_prefers_lowest_player() {
        let mut state = sample();
        state.place_settlement(PlayerId(3), 12);
        assert_eq!(state.settlement_owner(12), Some(PlayerId(1)));
        assert_eq!(state.settlement_owner(41), Some(PlayerId(2)));
        assert_eq!(state.settlement_owner(5), None);
        assert_eq!(state.settlements_by_vertex().get(&12), Some(&PlayerId(1)));
    }

    #[test]
    fn place_settlement_ignores_repeats() {
        let mut state = State::new();
        state.place_settlement(PlayerId(1), 4);
        state.place_settlement(PlayerId(1), 4);
        assert_eq!(state.settlements(PlayerId(1)), &[4]);
    }

    #[test]
    fn validate_against_board() {
        let board = Board::reference();
        assert!(sample().validate(&board).is_ok());

        let mut unknown = sample();
        unknown.place_settlement(PlayerId(1), 54);
        assert!(matches!(
            unknown.validate(&board),
            Err(StateError::UnknownVertex { vertex: 54, .. })
        ));

        let mut contested = sample();
        contested.place_settlement(PlayerId(2), 0);
        assert!(matches!(
            contested.validate(&board),
            Err(StateError::ContestedVertex { vertex: 0, .. })
        ));
    }

    #[test]
    fn touched_tiles_cover_both_settlements() {
        let board = Board::reference();
        let state = State::from_json(r#"{"houses": {"1": [0, 2]}}"#).unwrap();
        assert_eq!(state.tiles_touched_by(PlayerId(1), &board), vec![0, 1, 3, 4]);
    }

    #[test]
    fn missing_houses_field_is_empty_state() {
        assert_eq!(State::from_json("{}").unwrap(), State::new());
        assert!(State::from_json("[1, 2]").is_err());
    }
}
