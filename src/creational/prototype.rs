// Prototype: new characters start as clones of a configured one.

use crate::config::Settings;
use crate::error::Result;
use crate::narration::Narrator;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameCharacter {
    pub name: String,
    pub health: u32,
    pub attack_power: u32,
}

impl GameCharacter {
    pub fn new(name: impl Into<String>, health: u32, attack_power: u32) -> Self {
        Self {
            name: name.into(),
            health,
            attack_power,
        }
    }

    /// Clone of `self` under a new name.
    pub fn with_name(&self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..self.clone()
        }
    }

    pub fn display(&self, narrator: &Narrator) {
        narrator.say(self);
    }
}

impl fmt::Display for GameCharacter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Character: {} | Health: {} | Attack: {}",
            self.name, self.health, self.attack_power
        )
    }
}

pub fn demo(narrator: &Narrator, _settings: &Settings) -> Result<()> {
    let warrior = GameCharacter::new("Warrior", 100, 20);

    let mut elite = warrior.clone();
    elite.name = "Elite Warrior".to_string();
    elite.attack_power += 15;

    let scout = warrior.with_name("Scout");

    warrior.display(narrator);
    elite.display(narrator);
    scout.display(narrator);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clone_is_independent() {
        let warrior = GameCharacter::new("Warrior", 100, 20);
        let mut copy = warrior.clone();
        copy.name = "Elite Warrior".to_string();
        copy.health = 1;

        assert_eq!(warrior.name, "Warrior");
        assert_eq!(warrior.health, 100);
    }

    #[test]
    fn test_display() {
        let c = GameCharacter::new("Warrior", 100, 20).with_name("Elite Warrior");
        assert_eq!(
            c.to_string(),
            "Character: Elite Warrior | Health: 100 | Attack: 20"
        );
    }
}
