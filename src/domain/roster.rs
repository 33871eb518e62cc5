//! Team roster for bulk orders
//!
//! Each player overrides the shared design's back name and number. Players are
//! kept in insertion order; names and numbers may repeat, ids never do.

use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use super::jersey::{normalize_player_name, normalize_player_number};
use super::palette::GarmentSize;

/// One roster entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamPlayer {
    pub id: Uuid,
    pub name: String,
    pub number: String,
    pub size: GarmentSize,
}

/// Ordered list of players for one design session
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Roster {
    players: Vec<TeamPlayer>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `add_player` would accept this input (drives the submit button)
    pub fn can_add(name: &str, number: &str) -> bool {
        !name.trim().is_empty() && !normalize_player_number(number.trim()).is_empty()
    }

    /// Append a player. Returns the new id, or `None` when name or number is
    /// empty (the roster is left unchanged).
    pub fn add_player(&mut self, name: &str, number: &str, size: GarmentSize) -> Option<Uuid> {
        if !Self::can_add(name, number) {
            debug!("Rejected roster entry with empty name or number");
            return None;
        }

        let player = TeamPlayer {
            id: Uuid::new_v4(),
            name: normalize_player_name(name.trim()),
            number: normalize_player_number(number),
            size,
        };
        let id = player.id;
        self.players.push(player);
        Some(id)
    }

    /// Remove by id; absent ids are ignored
    pub fn remove_player(&mut self, id: Uuid) {
        self.players.retain(|p| p.id != id);
    }

    pub fn players(&self) -> &[TeamPlayer] {
        &self.players
    }

    pub fn get(&self, index: usize) -> Option<&TeamPlayer> {
        self.players.get(index)
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_is_rejected() {
        let mut roster = Roster::new();
        assert!(roster.add_player("", "23", GarmentSize::L).is_none());
        assert!(roster.add_player("Jordan", "", GarmentSize::L).is_none());
        assert!(roster.add_player("   ", " ", GarmentSize::L).is_none());
        assert!(roster.add_player("Jordan", "no", GarmentSize::L).is_none());
        assert!(roster.is_empty());
    }

    #[test]
    fn test_duplicate_names_get_distinct_ids() {
        let mut roster = Roster::new();
        let first = roster.add_player("Jordan", "23", GarmentSize::L).unwrap();
        let second = roster.add_player("Jordan", "45", GarmentSize::M).unwrap();

        assert_ne!(first, second);
        assert_eq!(roster.len(), 2);
        assert_eq!(roster.players()[0].number, "23");
        assert_eq!(roster.players()[1].size, GarmentSize::M);
    }

    #[test]
    fn test_entries_are_normalised() {
        let mut roster = Roster::new();
        roster.add_player("  van der berg-hollander ", "#077", GarmentSize::Xl);
        let player = &roster.players()[0];
        assert_eq!(player.name, "VAN DER BERG-HO");
        assert_eq!(player.number, "07");
    }

    #[test]
    fn test_remove_player() {
        let mut roster = Roster::new();
        let a = roster.add_player("Ana", "1", GarmentSize::S).unwrap();
        let b = roster.add_player("Bo", "2", GarmentSize::S).unwrap();

        roster.remove_player(Uuid::new_v4());
        assert_eq!(roster.len(), 2);

        roster.remove_player(a);
        assert_eq!(roster.len(), 1);
        assert_eq!(roster.players()[0].id, b);
    }
}
