use std::collections::HashMap;

use crate::entities::player::{Attributes, Position};

/// One position's affinity formula: per-attribute weights (summing to 1.0)
/// plus a height-bonus rule evaluated additively in [-15, +15].
struct AffinityProfile {
    shooting: f32,
    three_point: f32,
    post_shooting: f32,
    passing: f32,
    ball_handling: f32,
    rebounding: f32,
    defense: f32,
    speed: f32,
    blocks: f32,
    steals: f32,
    height_bonus: fn(u16) -> f32,
}

fn profile_for(position: Position) -> AffinityProfile {
    match position {
        Position::PG => AffinityProfile {
            shooting: 0.05,
            three_point: 0.10,
            post_shooting: 0.00,
            passing: 0.40,
            ball_handling: 0.30,
            rebounding: 0.00,
            defense: 0.05,
            speed: 0.20,
            blocks: 0.00,
            steals: 0.05,
            height_bonus: |h| if h <= 74 { 10.0 } else if h >= 79 { -15.0 } else { 0.0 },
        },
        Position::SG => AffinityProfile {
            shooting: 0.35,
            three_point: 0.35,
            post_shooting: 0.00,
            passing: 0.05,
            ball_handling: 0.10,
            rebounding: 0.00,
            defense: 0.05,
            speed: 0.20,
            blocks: 0.00,
            steals: 0.05,
            height_bonus: |h| if (73..=78).contains(&h) { 10.0 } else { 0.0 },
        },
        Position::SF => AffinityProfile {
            shooting: 0.25,
            three_point: 0.15,
            post_shooting: 0.10,
            passing: 0.05,
            ball_handling: 0.05,
            rebounding: 0.10,
            defense: 0.25,
            speed: 0.15,
            blocks: 0.05,
            steals: 0.05,
            height_bonus: |h| if (76..=80).contains(&h) { 10.0 } else { 0.0 },
        },
        Position::PF => AffinityProfile {
            shooting: 0.20,
            three_point: 0.05,
            post_shooting: 0.15,
            passing: 0.00,
            ball_handling: 0.00,
            rebounding: 0.35,
            defense: 0.25,
            speed: 0.05,
            blocks: 0.10,
            steals: 0.00,
            height_bonus: |h| if h >= 79 { 10.0 } else { 0.0 },
        },
        Position::C => AffinityProfile {
            shooting: 0.05,
            three_point: 0.00,
            post_shooting: 0.20,
            passing: 0.00,
            ball_handling: 0.00,
            rebounding: 0.35,
            defense: 0.25,
            speed: 0.00,
            blocks: 0.30,
            steals: 0.00,
            height_bonus: |h| if h >= 81 { 15.0 } else { 0.0 },
        },
    }
}

/// Weighted-sum affinity score in [0,100] for one position, given a player's
/// attributes and height. The weighted sum alone lands in [0,100] (weights
/// sum to 1.0 over [0,100] attributes); the height term can push it outside
/// that range, so the result is clamped.
pub fn position_affinity(position: Position, attrs: &Attributes, height: u16) -> f32 {
    let p = profile_for(position);
    let weighted = attrs.shooting as f32 * p.shooting
        + attrs.three_point as f32 * p.three_point
        + attrs.post_shooting as f32 * p.post_shooting
        + attrs.passing as f32 * p.passing
        + attrs.ball_handling as f32 * p.ball_handling
        + attrs.rebounding as f32 * p.rebounding
        + attrs.defense as f32 * p.defense
        + attrs.speed as f32 * p.speed
        + attrs.blocks as f32 * p.blocks
        + attrs.steals as f32 * p.steals;
    (weighted + (p.height_bonus)(height)).clamp(0.0, 100.0)
}

/// Scores all five positions and returns the arg-max, ties broken by the
/// fixed PG < SG < SF < PF < C preference order.
pub fn best_position(attrs: &Attributes, height: u16) -> Position {
    Position::ALL
        .into_iter()
        .map(|p| (p, position_affinity(p, attrs, height)))
        .fold(None, |best: Option<(Position, f32)>, candidate| match best {
            Some((_, best_score)) if best_score >= candidate.1 => best,
            _ => Some(candidate),
        })
        .map(|(p, _)| p)
        .expect("Position::ALL is non-empty")
}

/// A single gameplay event whose probability a role archetype can modify.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventModifier {
    Assist,
    ShotAttempt,
    Turnover,
    ThreePointAttempt,
    PostAttempt,
    Rebound,
    Block,
    Steal,
}

/// A named template of attribute weights (for fit scoring, same shape as
/// position affinity) plus gameplay probability multipliers applied during
/// possession simulation.
pub struct RoleArchetype {
    pub id: &'static str,
    pub position: Position,
    pub weights: [(AttributeWeight, f32); 4],
    pub modifiers: &'static [(EventModifier, f32)],
}

#[derive(Debug, Clone, Copy)]
pub enum AttributeWeight {
    Shooting,
    ThreePoint,
    PostShooting,
    Passing,
    BallHandling,
    Rebounding,
    Defense,
    Speed,
    Blocks,
    Steals,
}

fn attribute_value(attrs: &Attributes, weight: AttributeWeight) -> u8 {
    match weight {
        AttributeWeight::Shooting => attrs.shooting,
        AttributeWeight::ThreePoint => attrs.three_point,
        AttributeWeight::PostShooting => attrs.post_shooting,
        AttributeWeight::Passing => attrs.passing,
        AttributeWeight::BallHandling => attrs.ball_handling,
        AttributeWeight::Rebounding => attrs.rebounding,
        AttributeWeight::Defense => attrs.defense,
        AttributeWeight::Speed => attrs.speed,
        AttributeWeight::Blocks => attrs.blocks,
        AttributeWeight::Steals => attrs.steals,
    }
}

impl RoleArchetype {
    /// Fit score in [0,100]: the weighted sum of this archetype's four
    /// named attributes, identical in shape to position affinity.
    pub fn fit_score(&self, attrs: &Attributes) -> f32 {
        let sum: f32 = self
            .weights
            .iter()
            .map(|(w, weight)| attribute_value(attrs, *w) as f32 * weight)
            .sum();
        sum.clamp(0.0, 100.0)
    }

    pub fn modifier_for(&self, event: EventModifier) -> f32 {
        self.modifiers
            .iter()
            .find(|(e, _)| *e == event)
            .map(|(_, m)| *m)
            .unwrap_or(1.0)
    }
}

macro_rules! archetype {
    ($id:expr, $position:expr, [$(($w:expr, $wv:expr)),+ $(,)?], [$(($m:expr, $mv:expr)),* $(,)?]) => {
        RoleArchetype {
            id: $id,
            position: $position,
            weights: [$(($w, $wv)),+],
            modifiers: &[$(($m, $mv)),*],
        }
    };
}

/// The fixed registry of 16 role archetypes (4 PG, 3 SG, 3 SF, 3 PF, 3 C).
pub fn registry() -> Vec<RoleArchetype> {
    use AttributeWeight::*;
    use EventModifier::*;
    use Position::*;

    vec![
        archetype!(
            "floor_general",
            PG,
            [(Passing, 0.40), (BallHandling, 0.30), (Speed, 0.20), (Defense, 0.10)],
            [(Assist, 1.25), (ShotAttempt, 0.90), (Turnover, 0.90)]
        ),
        archetype!(
            "combo_guard",
            PG,
            [(Shooting, 0.30), (BallHandling, 0.30), (Speed, 0.25), (Passing, 0.15)],
            [(ShotAttempt, 1.10), (ThreePointAttempt, 1.10)]
        ),
        archetype!(
            "pace_pusher",
            PG,
            [(Speed, 0.40), (BallHandling, 0.30), (Passing, 0.20), (Steals, 0.10)],
            [(Turnover, 1.05), (Steal, 1.15)]
        ),
        archetype!(
            "defensive_general",
            PG,
            [(Defense, 0.35), (Steals, 0.30), (Passing, 0.20), (Speed, 0.15)],
            [(Steal, 1.30), (ShotAttempt, 0.85)]
        ),
        archetype!(
            "sharpshooter",
            SG,
            [(ThreePoint, 0.45), (Shooting, 0.35), (Speed, 0.10), (Defense, 0.10)],
            [(ThreePointAttempt, 1.35), (ShotAttempt, 1.10)]
        ),
        archetype!(
            "slasher",
            SG,
            [(Shooting, 0.35), (BallHandling, 0.30), (Speed, 0.25), (Passing, 0.10)],
            [(ShotAttempt, 1.15), (Turnover, 1.05)]
        ),
        archetype!(
            "three_and_d",
            SG,
            [(ThreePoint, 0.35), (Defense, 0.35), (Steals, 0.15), (Speed, 0.15)],
            [(ThreePointAttempt, 1.20), (Steal, 1.15)]
        ),
        archetype!(
            "small_forward_wing",
            SF,
            [(Shooting, 0.30), (Defense, 0.30), (Speed, 0.25), (Rebounding, 0.15)],
            [(ShotAttempt, 1.05), (Steal, 1.05)]
        ),
        archetype!(
            "point_forward",
            SF,
            [(Passing, 0.35), (BallHandling, 0.25), (Shooting, 0.25), (Defense, 0.15)],
            [(Assist, 1.20), (Turnover, 0.95)]
        ),
        archetype!(
            "three_point_forward",
            SF,
            [(ThreePoint, 0.45), (Defense, 0.25), (Rebounding, 0.15), (Speed, 0.15)],
            [(ThreePointAttempt, 1.30)]
        ),
        archetype!(
            "stretch_four",
            PF,
            [(ThreePoint, 0.40), (Rebounding, 0.30), (Defense, 0.20), (Shooting, 0.10)],
            [(ThreePointAttempt, 1.40), (PostAttempt, 0.70)]
        ),
        archetype!(
            "post_power_forward",
            PF,
            [(PostShooting, 0.35), (Rebounding, 0.35), (Defense, 0.20), (Blocks, 0.10)],
            [(PostAttempt, 1.30), (Rebound, 1.10)]
        ),
        archetype!(
            "defensive_forward",
            PF,
            [(Defense, 0.40), (Rebounding, 0.35), (Blocks, 0.15), (PostShooting, 0.10)],
            [(Block, 1.25), (Rebound, 1.15)]
        ),
        archetype!(
            "standard_center",
            C,
            [(PostShooting, 0.30), (Rebounding, 0.35), (Defense, 0.20), (Blocks, 0.15)],
            [(PostAttempt, 1.15), (Block, 1.10)]
        ),
        archetype!(
            "stretch_five",
            C,
            [(ThreePoint, 0.40), (Rebounding, 0.30), (Defense, 0.20), (PostShooting, 0.10)],
            [(ThreePointAttempt, 1.50), (PostAttempt, 0.60)]
        ),
        archetype!(
            "rim_protector",
            C,
            [(Blocks, 0.40), (Rebounding, 0.35), (Defense, 0.20), (PostShooting, 0.05)],
            [(Block, 1.40), (Rebound, 1.10), (ShotAttempt, 0.85)]
        ),
    ]
}

pub fn find_archetype(id: &str) -> Option<RoleArchetype> {
    registry().into_iter().find(|a| a.id == id)
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ModifierSet {
    pub assist: f32,
    pub shot_attempt: f32,
    pub turnover: f32,
    pub three_point_attempt: f32,
    pub post_attempt: f32,
    pub rebound: f32,
    pub block: f32,
    pub steal: f32,
}

impl ModifierSet {
    pub fn identity() -> ModifierSet {
        ModifierSet {
            assist: 1.0,
            shot_attempt: 1.0,
            turnover: 1.0,
            three_point_attempt: 1.0,
            post_attempt: 1.0,
            rebound: 1.0,
            block: 1.0,
            steal: 1.0,
        }
    }
}

/// Resolves a player's role-id (if any) into its multiplier set; `identity`
/// multipliers for players with no role assigned.
pub fn modifiers_for_role(role: Option<&str>) -> ModifierSet {
    let Some(role) = role else {
        return ModifierSet::identity();
    };
    let Some(archetype) = find_archetype(role) else {
        return ModifierSet::identity();
    };
    let mut set = ModifierSet::identity();
    set.assist = archetype.modifier_for(EventModifier::Assist);
    set.shot_attempt = archetype.modifier_for(EventModifier::ShotAttempt);
    set.turnover = archetype.modifier_for(EventModifier::Turnover);
    set.three_point_attempt = archetype.modifier_for(EventModifier::ThreePointAttempt);
    set.post_attempt = archetype.modifier_for(EventModifier::PostAttempt);
    set.rebound = archetype.modifier_for(EventModifier::Rebound);
    set.block = archetype.modifier_for(EventModifier::Block);
    set.steal = archetype.modifier_for(EventModifier::Steal);
    set
}

/// Clamps `base_p * pos_mult * role_mult` to [0,1], the single helper every
/// possession-event probability routes through.
pub fn clamp_probability(base_p: f32, pos_mult: f32, role_mult: f32) -> f32 {
    (base_p * pos_mult * role_mult).clamp(0.0, 1.0)
}
