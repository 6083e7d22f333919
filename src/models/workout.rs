use std::fmt;

use crate::entities::workouts::{self, DifficultyLevel};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewWorkout {
    pub name: String,
    pub description: String,
    pub difficulty_level: DifficultyLevel,
}

impl fmt::Display for workouts::Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
