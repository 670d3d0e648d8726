use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Conference {
    East,
    West,
    /// Used for the NBA Finals series, which pairs the two conference
    /// champions and is not itself played within a conference.
    Final,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Round {
    PlayIn,
    First,
    Semis,
    ConfFinal,
    Finals,
    Complete,
}

impl Round {
    /// The games required to win a series in this round. Play-in series are
    /// single-game; every playoff round proper is best-of-seven.
    pub fn series_length(&self) -> u8 {
        match self {
            Round::PlayIn => 1,
            _ => 4,
        }
    }
}

/// A single playoff or play-in matchup. `home_wins`/`away_wins` count wins
/// by `higher_seed_team_id`/`lower_seed_team_id` respectively — the higher
/// seed holds home-court advantage for the whole series, not just game one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayoffSeries {
    pub id: Uuid,
    pub higher_seed_team_id: Uuid,
    pub lower_seed_team_id: Uuid,
    pub conference: Conference,
    pub round: Round,
    pub home_wins: u8,
    pub away_wins: u8,
    pub game_ids: Vec<Uuid>,
    pub is_complete: bool,
}

impl PlayoffSeries {
    pub fn new(
        id: Uuid,
        higher_seed_team_id: Uuid,
        lower_seed_team_id: Uuid,
        conference: Conference,
        round: Round,
    ) -> PlayoffSeries {
        PlayoffSeries {
            id,
            higher_seed_team_id,
            lower_seed_team_id,
            conference,
            round,
            home_wins: 0,
            away_wins: 0,
            game_ids: Vec::new(),
            is_complete: false,
        }
    }

    /// Records a completed game's winner and updates `is_complete`.
    pub fn record_win(&mut self, winner_team_id: Uuid) {
        if winner_team_id == self.higher_seed_team_id {
            self.home_wins += 1;
        } else if winner_team_id == self.lower_seed_team_id {
            self.away_wins += 1;
        }
        let needed = self.round.series_length();
        self.is_complete = self.home_wins >= needed || self.away_wins >= needed;
    }

    pub fn winner(&self) -> Option<Uuid> {
        if !self.is_complete {
            return None;
        }
        if self.home_wins > self.away_wins {
            Some(self.higher_seed_team_id)
        } else {
            Some(self.lower_seed_team_id)
        }
    }

    pub fn loser(&self) -> Option<Uuid> {
        let winner = self.winner()?;
        Some(if winner == self.higher_seed_team_id {
            self.lower_seed_team_id
        } else {
            self.higher_seed_team_id
        })
    }

    pub fn games_played(&self) -> u8 {
        self.home_wins + self.away_wins
    }
}

/// Owns every `PlayoffSeries` of a season's postseason, keyed by id, plus
/// the ordered sequences that name which series belong to which round.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayoffBracket {
    pub season_id: Uuid,
    pub team_seedings: HashMap<Uuid, u8>,
    pub team_conferences: HashMap<Uuid, Conference>,
    pub series: HashMap<Uuid, PlayoffSeries>,
    pub play_in_games: Vec<Uuid>,
    pub first_round: Vec<Uuid>,
    pub conference_semis: Vec<Uuid>,
    pub conference_finals: Vec<Uuid>,
    pub nba_finals: Vec<Uuid>,
    pub current_round: Round,
}

impl PlayoffBracket {
    pub fn new(
        season_id: Uuid,
        team_seedings: HashMap<Uuid, u8>,
        team_conferences: HashMap<Uuid, Conference>,
    ) -> PlayoffBracket {
        PlayoffBracket {
            season_id,
            team_seedings,
            team_conferences,
            series: HashMap::new(),
            play_in_games: Vec::new(),
            first_round: Vec::new(),
            conference_semis: Vec::new(),
            conference_finals: Vec::new(),
            nba_finals: Vec::new(),
            current_round: Round::PlayIn,
        }
    }

    pub fn insert_series(&mut self, series: PlayoffSeries) -> Uuid {
        let id = series.id;
        match series.round {
            Round::PlayIn => self.play_in_games.push(id),
            Round::First => self.first_round.push(id),
            Round::Semis => self.conference_semis.push(id),
            Round::ConfFinal => self.conference_finals.push(id),
            Round::Finals => self.nba_finals.push(id),
            Round::Complete => {}
        }
        self.series.insert(id, series);
        id
    }

    pub fn series_in_round(&self, round: Round) -> Vec<&PlayoffSeries> {
        let ids: &[Uuid] = match round {
            Round::PlayIn => &self.play_in_games,
            Round::First => &self.first_round,
            Round::Semis => &self.conference_semis,
            Round::ConfFinal => &self.conference_finals,
            Round::Finals => &self.nba_finals,
            Round::Complete => &[],
        };
        ids.iter().filter_map(|id| self.series.get(id)).collect()
    }

    /// True iff a team lost a completed series. A team that merely has not
    /// had its next-round series generated yet is *not* eliminated.
    pub fn is_eliminated(&self, team_id: Uuid) -> bool {
        self.series
            .values()
            .any(|s| s.is_complete && s.loser() == Some(team_id))
    }

    pub fn champion(&self) -> Option<Uuid> {
        self.nba_finals
            .first()
            .and_then(|id| self.series.get(id))
            .and_then(|s| s.winner())
    }
}
