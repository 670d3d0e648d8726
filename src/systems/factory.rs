use std::collections::HashSet;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use uuid::Uuid;

use crate::core::errors::LeagueError;
use crate::entities::player::{Attributes, Player, Position};
use crate::entities::team::{Team, ROSTER_SIZE, STARTER_COUNT};
use crate::systems::position::best_position;
use crate::utils::conferences::TEAMS;
use crate::utils::names;

/// Builds a `ChaCha8Rng` from an optional seed, drawing fallback entropy from
/// `ThreadRng` when none is given, so every caller downstream threads a
/// single deterministic-shaped RNG type.
pub fn make_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => {
            let entropy: u64 = rand::thread_rng().gen();
            ChaCha8Rng::seed_from_u64(entropy)
        }
    }
}

/// Draws a baseline attribute uniformly in [40,85].
fn baseline_attribute(rng: &mut ChaCha8Rng) -> u8 {
    rng.gen_range(40..=85)
}

/// Height drawn from a distribution weighted toward the 72-82" band, within
/// the overall [68,88] range.
fn draw_height(rng: &mut ChaCha8Rng) -> u16 {
    let roll: f32 = rng.gen();
    if roll < 0.70 {
        rng.gen_range(72..=82)
    } else if roll < 0.85 {
        rng.gen_range(68..=71)
    } else {
        rng.gen_range(83..=88)
    }
}

fn apply_height_modifiers(attrs: &mut Attributes, height: u16) {
    if height >= 80 {
        attrs.rebounding = attrs.rebounding.saturating_add(15).min(100);
        attrs.blocks = attrs.blocks.saturating_add(20).min(100);
        attrs.steals = attrs.steals.saturating_sub(8);
        attrs.shooting = attrs.shooting.saturating_sub(5);
        attrs.speed = attrs.speed.saturating_sub(10);
    } else if height <= 72 {
        attrs.steals = attrs.steals.saturating_add(20).min(100);
        attrs.shooting = attrs.shooting.saturating_add(15).min(100);
        attrs.speed = attrs.speed.saturating_add(10).min(100);
        attrs.rebounding = attrs.rebounding.saturating_sub(10);
        attrs.blocks = attrs.blocks.saturating_sub(15);
    }
    attrs.clamp();
}

pub fn generate_player(rng: &mut ChaCha8Rng, name_index: usize) -> Player {
    let height = draw_height(rng);
    let mut attributes = Attributes {
        shooting: baseline_attribute(rng),
        post_shooting: baseline_attribute(rng),
        three_point: baseline_attribute(rng),
        ball_handling: baseline_attribute(rng),
        passing: baseline_attribute(rng),
        rebounding: baseline_attribute(rng),
        defense: baseline_attribute(rng),
        speed: baseline_attribute(rng),
        blocks: baseline_attribute(rng),
        steals: baseline_attribute(rng),
    };
    apply_height_modifiers(&mut attributes, height);

    let position = best_position(&attributes, height);
    let first = names::first_name(name_index % names::POOL_SIZE);
    let last = names::last_name((name_index * 7 + 3) % names::POOL_SIZE);

    Player {
        id: Uuid::new_v4(),
        name: format!("{first} {last}"),
        age: rng.gen_range(19..=38),
        height,
        position,
        role: None,
        attributes,
    }
}

/// Generates a full 15-player roster and picks the initial starting five: the
/// highest-rated player at each distinct position when five distinct
/// positions are covered, otherwise the top five by overall rating.
pub fn generate_team(
    rng: &mut ChaCha8Rng,
    city: String,
    name: String,
    name_index_base: usize,
) -> Result<Team, LeagueError> {
    let players: Vec<Player> = (0..ROSTER_SIZE)
        .map(|i| generate_player(rng, name_index_base + i))
        .collect();

    let starters = pick_initial_starters(&players);

    Team::new(Uuid::new_v4(), city, name, players, starters)
}

fn pick_initial_starters(players: &[Player]) -> HashSet<Uuid> {
    let mut best_by_position: Vec<(Position, &Player)> = Vec::new();
    for position in Position::ALL {
        if let Some(best) = players
            .iter()
            .filter(|p| p.position == position)
            .max_by(|a, b| a.overall().partial_cmp(&b.overall()).unwrap())
        {
            best_by_position.push((position, best));
        }
    }

    if best_by_position.len() == STARTER_COUNT {
        best_by_position.into_iter().map(|(_, p)| p.id).collect()
    } else {
        let mut ranked: Vec<&Player> = players.iter().collect();
        ranked.sort_by(|a, b| b.overall().partial_cmp(&a.overall()).unwrap());
        ranked
            .into_iter()
            .take(STARTER_COUNT)
            .map(|p| p.id)
            .collect()
    }
}

/// Generates all 30 league teams from the fixed city/conference table.
pub fn generate_league_teams(rng: &mut ChaCha8Rng) -> Result<Vec<Team>, LeagueError> {
    let mut teams = Vec::with_capacity(TEAMS.len());
    for (index, (city, name, _conference)) in TEAMS.iter().enumerate() {
        let team = generate_team(
            rng,
            city.to_string(),
            name.to_string(),
            index * ROSTER_SIZE,
        )?;
        teams.push(team);
    }
    Ok(teams)
}
