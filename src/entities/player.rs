use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A position on the floor. Affinity scoring (see `systems::position`) decides
/// which one a generated player is assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    PG,
    SG,
    SF,
    PF,
    C,
}

impl Position {
    /// All five positions in the fixed tie-break preference order
    /// (PG < SG < SF < PF < C) used when affinity scores are equal.
    pub const ALL: [Position; 5] = [
        Position::PG,
        Position::SG,
        Position::SF,
        Position::PF,
        Position::C,
    ];
}

/// The ten bounded skill attributes that drive every possession outcome.
/// Every field is clamped to `[0, 100]` under every mutation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Attributes {
    pub shooting: u8,
    pub post_shooting: u8,
    pub three_point: u8,
    pub ball_handling: u8,
    pub passing: u8,
    pub rebounding: u8,
    pub defense: u8,
    pub speed: u8,
    pub blocks: u8,
    pub steals: u8,
}

impl Attributes {
    /// Overall rating: the mean of all ten attributes.
    pub fn overall(&self) -> f32 {
        let sum = self.shooting as f32
            + self.post_shooting as f32
            + self.three_point as f32
            + self.ball_handling as f32
            + self.passing as f32
            + self.rebounding as f32
            + self.defense as f32
            + self.speed as f32
            + self.blocks as f32
            + self.steals as f32;
        sum / 10.0
    }

    /// Clamps every attribute to `[0, 100]`. Called after any mutation so the
    /// invariant holds regardless of how the attributes were derived.
    pub fn clamp(&mut self) {
        self.shooting = self.shooting.min(100);
        self.post_shooting = self.post_shooting.min(100);
        self.three_point = self.three_point.min(100);
        self.ball_handling = self.ball_handling.min(100);
        self.passing = self.passing.min(100);
        self.rebounding = self.rebounding.min(100);
        self.defense = self.defense.min(100);
        self.speed = self.speed.min(100);
        self.blocks = self.blocks.min(100);
        self.steals = self.steals.min(100);
    }

    /// Adds a signed delta to a single attribute, clamping the result into
    /// `[0, 100]`. Used for height modifiers and attribute-upgrade mutators.
    pub fn adjust(&mut self, field: AttributeField, delta: i16) {
        let current = self.get(field) as i16;
        let updated = (current + delta).clamp(0, 100) as u8;
        self.set(field, updated);
    }

    pub fn get(&self, field: AttributeField) -> u8 {
        match field {
            AttributeField::Shooting => self.shooting,
            AttributeField::PostShooting => self.post_shooting,
            AttributeField::ThreePoint => self.three_point,
            AttributeField::BallHandling => self.ball_handling,
            AttributeField::Passing => self.passing,
            AttributeField::Rebounding => self.rebounding,
            AttributeField::Defense => self.defense,
            AttributeField::Speed => self.speed,
            AttributeField::Blocks => self.blocks,
            AttributeField::Steals => self.steals,
        }
    }

    fn set(&mut self, field: AttributeField, value: u8) {
        match field {
            AttributeField::Shooting => self.shooting = value,
            AttributeField::PostShooting => self.post_shooting = value,
            AttributeField::ThreePoint => self.three_point = value,
            AttributeField::BallHandling => self.ball_handling = value,
            AttributeField::Passing => self.passing = value,
            AttributeField::Rebounding => self.rebounding = value,
            AttributeField::Defense => self.defense = value,
            AttributeField::Speed => self.speed = value,
            AttributeField::Blocks => self.blocks = value,
            AttributeField::Steals => self.steals = value,
        }
    }
}

/// Identifies a single attribute for upgrade/adjustment operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttributeField {
    Shooting,
    PostShooting,
    ThreePoint,
    BallHandling,
    Passing,
    Rebounding,
    Defense,
    Speed,
    Blocks,
    Steals,
}

/// An immutable-by-default player record. All fields are `pub` for read
/// access, but mutation should go through the copy-with helpers below so
/// that callers don't need to remember to re-clamp attributes by hand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: Uuid,
    pub name: String,
    #[serde(default = "default_age")]
    pub age: u8,
    pub height: u16,
    pub position: Position,
    #[serde(default)]
    pub role: Option<String>,
    pub attributes: Attributes,
}

fn default_age() -> u8 {
    25
}

impl Player {
    pub fn overall(&self) -> f32 {
        self.attributes.overall()
    }

    /// Returns a copy of this player with a new position assigned.
    pub fn with_position(&self, position: Position) -> Player {
        Player {
            position,
            ..self.clone()
        }
    }

    /// Returns a copy of this player with a new role archetype identifier.
    pub fn with_role(&self, role: Option<String>) -> Player {
        Player {
            role,
            ..self.clone()
        }
    }

    /// Returns a copy of this player with one attribute nudged by `delta`,
    /// clamped to `[0, 100]`.
    pub fn with_attribute_upgrade(&self, field: AttributeField, delta: i16) -> Player {
        let mut attributes = self.attributes;
        attributes.adjust(field, delta);
        Player {
            attributes,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_attributes() -> Attributes {
        Attributes {
            shooting: 50,
            post_shooting: 50,
            three_point: 50,
            ball_handling: 50,
            passing: 50,
            rebounding: 50,
            defense: 50,
            speed: 50,
            blocks: 50,
            steals: 50,
        }
    }

    #[test]
    fn overall_is_mean_of_ten_attributes() {
        let attrs = base_attributes();
        assert_eq!(attrs.overall(), 50.0);
    }

    #[test]
    fn adjust_clamps_to_valid_range() {
        let mut attrs = base_attributes();
        attrs.adjust(AttributeField::Blocks, 1000);
        assert_eq!(attrs.blocks, 100);
        attrs.adjust(AttributeField::Steals, -1000);
        assert_eq!(attrs.steals, 0);
    }

    #[test]
    fn with_attribute_upgrade_does_not_mutate_original() {
        let player = Player {
            id: Uuid::new_v4(),
            name: "Test Player".to_string(),
            age: 25,
            height: 78,
            position: Position::SF,
            role: None,
            attributes: base_attributes(),
        };
        let upgraded = player.with_attribute_upgrade(AttributeField::Shooting, 10);
        assert_eq!(player.attributes.shooting, 50);
        assert_eq!(upgraded.attributes.shooting, 60);
    }
}
