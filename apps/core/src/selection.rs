use std::fmt;

use crate::domain::{Direction, Speed};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    #[error("unknown speed: {0:?}")]
    UnknownSpeed(String),
    #[error("unknown direction: {0:?}")]
    UnknownDirection(String),
}

/// Name of one static dataset, `{speed}_{directionCode}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DatasetKey(String);

impl DatasetKey {
    pub fn new(speed: Speed, direction: Direction) -> Self {
        Self(format!("{}_{}", speed.as_str(), direction.code()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn file_name(&self) -> String {
        format!("{}.json", self.0)
    }

    /// Request path relative to the site origin.
    pub fn asset_path(&self) -> String {
        format!("/data/{}", self.file_name())
    }
}

impl fmt::Display for DatasetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The two selector values. Every actual change bumps the generation so the
/// loader can tell which fetch belongs to the latest choice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    speed: Speed,
    direction: Direction,
    generation: u64,
}

impl Default for Selection {
    fn default() -> Self {
        Self::new(Speed::default(), Direction::default())
    }
}

impl Selection {
    pub const fn new(speed: Speed, direction: Direction) -> Self {
        Self {
            speed,
            direction,
            generation: 0,
        }
    }

    pub const fn speed(&self) -> Speed {
        self.speed
    }

    pub const fn direction(&self) -> Direction {
        self.direction
    }

    pub const fn generation(&self) -> u64 {
        self.generation
    }

    pub fn key(&self) -> DatasetKey {
        DatasetKey::new(self.speed, self.direction)
    }

    /// Parses and applies a speed; `Ok(None)` when it is already selected.
    pub fn set_speed(&mut self, value: &str) -> Result<Option<DatasetKey>, SelectionError> {
        let speed =
            Speed::parse(value).ok_or_else(|| SelectionError::UnknownSpeed(value.to_string()))?;
        Ok(self.replace_speed(speed))
    }

    pub fn set_direction(&mut self, value: &str) -> Result<Option<DatasetKey>, SelectionError> {
        let direction = Direction::parse(value)
            .ok_or_else(|| SelectionError::UnknownDirection(value.to_string()))?;
        Ok(self.replace_direction(direction))
    }

    pub fn replace_speed(&mut self, speed: Speed) -> Option<DatasetKey> {
        if self.speed == speed {
            return None;
        }
        self.speed = speed;
        Some(self.changed())
    }

    pub fn replace_direction(&mut self, direction: Direction) -> Option<DatasetKey> {
        if self.direction == direction {
            return None;
        }
        self.direction = direction;
        Some(self.changed())
    }

    pub fn next_speed(&mut self) -> DatasetKey {
        self.speed = Speed::ALL[wrap_increment(self.speed.index(), Speed::ALL.len())];
        self.changed()
    }

    pub fn prev_speed(&mut self) -> DatasetKey {
        self.speed = Speed::ALL[wrap_decrement(self.speed.index(), Speed::ALL.len())];
        self.changed()
    }

    pub fn next_direction(&mut self) -> DatasetKey {
        self.direction =
            Direction::ALL[wrap_increment(self.direction.index(), Direction::ALL.len())];
        self.changed()
    }

    pub fn prev_direction(&mut self) -> DatasetKey {
        self.direction =
            Direction::ALL[wrap_decrement(self.direction.index(), Direction::ALL.len())];
        self.changed()
    }

    /// Re-issues the current key, e.g. for a manual reload.
    pub fn touch(&mut self) -> DatasetKey {
        self.changed()
    }

    fn changed(&mut self) -> DatasetKey {
        self.generation = self.generation.wrapping_add(1);
        self.key()
    }
}

pub const fn wrap_decrement(index: usize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }

    if index == 0 {
        len - 1
    } else {
        index - 1
    }
}

pub const fn wrap_increment(index: usize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }

    (index + 1) % len
}

#[cfg(test)]
mod tests {
    use super::{DatasetKey, Selection, SelectionError};
    use crate::domain::{Direction, Speed};

    #[test]
    fn key_covers_every_pair() {
        for speed in Speed::ALL {
            for direction in Direction::ALL {
                let key = DatasetKey::new(speed, direction);
                assert_eq!(
                    key.as_str(),
                    format!("{}_{}", speed.as_str(), direction.code())
                );
            }
        }

        let key = DatasetKey::new(Speed::FiveMs, Direction::SouthEast);
        assert_eq!(key.to_string(), "5ms_+x-y");
        assert_eq!(key.asset_path(), "/data/5ms_+x-y.json");
    }

    #[test]
    fn defaults_match_initial_selectors() {
        let selection = Selection::default();
        assert_eq!(selection.speed(), Speed::OneMs);
        assert_eq!(selection.direction(), Direction::East);
        assert_eq!(selection.key().as_str(), "1ms_x");
        assert_eq!(selection.generation(), 0);
    }

    #[test]
    fn rejected_values_leave_selection_untouched() {
        let mut selection = Selection::default();

        assert_eq!(
            selection.set_speed("10ms"),
            Err(SelectionError::UnknownSpeed("10ms".to_string()))
        );
        assert_eq!(
            selection.set_direction("Up"),
            Err(SelectionError::UnknownDirection("Up".to_string()))
        );
        assert_eq!(selection, Selection::default());
    }

    #[test]
    fn accepted_values_bump_generation() {
        let mut selection = Selection::default();

        let key = selection.set_speed("5ms").unwrap();
        assert_eq!(key.unwrap().as_str(), "5ms_x");
        assert_eq!(selection.generation(), 1);

        let key = selection.set_direction("North (+y)").unwrap();
        assert_eq!(key.unwrap().as_str(), "5ms_y");
        assert_eq!(selection.generation(), 2);
    }

    #[test]
    fn reselecting_the_current_value_is_not_a_change() {
        let mut selection = Selection::default();

        assert_eq!(selection.set_speed("1ms"), Ok(None));
        assert_eq!(selection.set_direction("x"), Ok(None));
        assert_eq!(selection.replace_direction(Direction::East), None);
        assert_eq!(selection.generation(), 0);

        // A reload re-issues the same key under a new generation.
        assert_eq!(selection.touch().as_str(), "1ms_x");
        assert_eq!(selection.generation(), 1);
    }

    #[test]
    fn cycling_wraps_around_both_tables() {
        let mut selection = Selection::default();

        assert_eq!(selection.prev_direction().as_str(), "1ms_-x+y");
        assert_eq!(selection.next_direction().as_str(), "1ms_x");
        assert_eq!(selection.next_speed().as_str(), "5ms_x");
        assert_eq!(selection.next_speed().as_str(), "1ms_x");
        assert_eq!(selection.prev_speed().as_str(), "5ms_x");
    }
}
