use std::collections::{BTreeMap, BTreeSet};

use crate::error::ConfigurationError;
use crate::types::{RoomId, RoomSpec};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Room {
    /// Index into [`DormLayout::dorms`].
    pub dorm: usize,
    pub capacity: u32,
}

/// Which dorm owns each room, and how many beds it has.
///
/// Built once from the problem and validated up front, so every lookup for a
/// room that was part of the problem succeeds.
#[derive(Debug, Clone)]
pub struct DormLayout {
    dorms: Vec<String>,
    rooms: BTreeMap<RoomId, Room>,
}

impl DormLayout {
    pub fn new(
        dorms: &[String],
        rooms: &BTreeMap<RoomId, RoomSpec>,
    ) -> Result<Self, ConfigurationError> {
        let mut seen = BTreeSet::new();
        if let Some(dorm) = dorms.iter().find(|dorm| !seen.insert(dorm.as_str())) {
            return Err(ConfigurationError::DuplicateDorm { dorm: dorm.clone() });
        }

        let dorm_index: BTreeMap<&str, usize> = dorms
            .iter()
            .enumerate()
            .map(|(index, dorm)| (dorm.as_str(), index))
            .collect();

        let rooms = rooms
            .iter()
            .map(|(&id, spec)| {
                let dorm = *dorm_index.get(spec.dorm.as_str()).ok_or_else(|| {
                    ConfigurationError::UnknownDorm {
                        room: id,
                        dorm: spec.dorm.clone(),
                    }
                })?;
                if spec.capacity == 0 {
                    return Err(ConfigurationError::ZeroCapacity { room: id });
                }
                Ok((
                    id,
                    Room {
                        dorm,
                        capacity: spec.capacity,
                    },
                ))
            })
            .collect::<Result<_, _>>()?;

        Ok(DormLayout {
            dorms: dorms.to_vec(),
            rooms,
        })
    }

    pub fn dorms(&self) -> &[String] {
        &self.dorms
    }

    pub fn num_dorms(&self) -> usize {
        self.dorms.len()
    }

    /// Rooms in ascending id order.
    pub fn rooms(&self) -> impl Iterator<Item = (RoomId, Room)> + '_ {
        self.rooms.iter().map(|(&id, &room)| (id, room))
    }

    pub fn room(&self, room: RoomId) -> Result<Room, ConfigurationError> {
        self.rooms
            .get(&room)
            .copied()
            .ok_or(ConfigurationError::UnknownRoom { room })
    }

    pub fn dorm_index_of(&self, room: RoomId) -> Result<usize, ConfigurationError> {
        Ok(self.room(room)?.dorm)
    }

    pub fn dorm_of(&self, room: RoomId) -> Result<&str, ConfigurationError> {
        let index = self.dorm_index_of(room)?;
        Ok(&self.dorms[index])
    }

    pub fn capacity_of(&self, room: RoomId) -> Result<u32, ConfigurationError> {
        Ok(self.room(room)?.capacity)
    }

    pub fn total_capacity(&self) -> u64 {
        self.rooms.values().map(|room| u64::from(room.capacity)).sum()
    }
}
