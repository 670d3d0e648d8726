pub mod constants {
    pub const TEAM_COUNT: usize = 30;
    pub const GAMES_PER_TEAM: usize = 82;
    pub const POSSESSIONS_PER_TEAM_BASE: i32 = 100;
    pub const POSSESSIONS_PER_TEAM_VARIANCE: i32 = 8;
    pub const OVERTIME_POSSESSIONS_PER_TEAM: i32 = 20;
    pub const STINT_COUNT: u8 = 8;
    pub const LEGACY_ATTRIBUTE_DEFAULT: u8 = 50;
}

pub mod helpers {
    use uuid::Uuid;

    pub fn generate_unique_id() -> Uuid {
        Uuid::new_v4()
    }
}

pub mod names {
    const FIRST_SYLLABLES: [&str; 20] = [
        "Ja", "Mar", "De", "Ty", "Ke", "An", "Mi", "Da", "Jo", "Ro", "Ca", "Lu", "El", "Ni", "Za",
        "Ra", "Tre", "Sha", "Bren", "Kev",
    ];
    const FIRST_ENDINGS: [&str; 20] = [
        "son", "len", "quan", "rell", "vin", "drew", "mal", "cen", "ron", "lan", "mar", "vis",
        "dell", "rik", "shawn", "tavius", "mont", "rius", "wan", "ford",
    ];
    const LAST_SYLLABLES: [&str; 20] = [
        "Will", "John", "Ander", "Rob", "Cart", "Thom", "Harr", "Mor", "Jack", "Brad", "Free",
        "Gold", "Wash", "Chen", "Park", "Hen", "Mur", "Bell", "Cole", "Reed",
    ];
    const LAST_ENDINGS: [&str; 20] = [
        "son", "ford", "man", "field", "wright", "ley", "ton", "wood", "ham", "er", "ris", "ins",
        "stone", "well", "berg", "ley", "more", "rick", "den", "croft",
    ];

    /// Deterministic combinatorial name pool: 20x20 = 400 distinct first names
    /// and 400 distinct last names, comfortably over the 200-entry floor
    /// without hand-listing hundreds of literals.
    pub fn first_name(index: usize) -> String {
        let syllable = FIRST_SYLLABLES[index % FIRST_SYLLABLES.len()];
        let ending = FIRST_ENDINGS[(index / FIRST_SYLLABLES.len()) % FIRST_ENDINGS.len()];
        format!("{syllable}{ending}")
    }

    pub fn last_name(index: usize) -> String {
        let syllable = LAST_SYLLABLES[index % LAST_SYLLABLES.len()];
        let ending = LAST_ENDINGS[(index / LAST_SYLLABLES.len()) % LAST_ENDINGS.len()];
        format!("{syllable}{ending}")
    }

    pub const POOL_SIZE: usize = FIRST_SYLLABLES.len() * FIRST_ENDINGS.len();

}

pub mod conferences {
    use crate::entities::playoff::Conference;

    /// Fixed city -> (team name, conference) table: 15 teams per conference.
    pub const TEAMS: [(&str, &str, Conference); 30] = [
        ("Boston", "Lighthouses", Conference::East),
        ("New York", "Comets", Conference::East),
        ("Philadelphia", "Founders", Conference::East),
        ("Toronto", "Maples", Conference::East),
        ("Brooklyn", "Netters", Conference::East),
        ("Miami", "Herons", Conference::East),
        ("Orlando", "Suns", Conference::East),
        ("Atlanta", "Peachtree", Conference::East),
        ("Charlotte", "Hornbills", Conference::East),
        ("Washington", "Sentinels", Conference::East),
        ("Chicago", "Bulls", Conference::East),
        ("Cleveland", "Foundry", Conference::East),
        ("Detroit", "Gearheads", Conference::East),
        ("Indiana", "Racers", Conference::East),
        ("Milwaukee", "Brewers", Conference::East),
        ("Denver", "Peaks", Conference::West),
        ("Minnesota", "Timberwolves", Conference::West),
        ("Oklahoma City", "Thunderbirds", Conference::West),
        ("Portland", "Rosewood", Conference::West),
        ("Utah", "Canyons", Conference::West),
        ("Golden State", "Warriors", Conference::West),
        ("Los Angeles", "Stars", Conference::West),
        ("Los Angeles", "Clippers-II", Conference::West),
        ("Phoenix", "Desert Hawks", Conference::West),
        ("Sacramento", "Rivers", Conference::West),
        ("Dallas", "Mustangs", Conference::West),
        ("Houston", "Rockets-II", Conference::West),
        ("Memphis", "Riverboats", Conference::West),
        ("New Orleans", "Pelicans-II", Conference::West),
        ("San Antonio", "Missions", Conference::West),
    ];

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn has_thirty_teams_split_evenly() {
            assert_eq!(TEAMS.len(), 30);
            let east = TEAMS.iter().filter(|(_, _, c)| *c == Conference::East).count();
            let west = TEAMS.iter().filter(|(_, _, c)| *c == Conference::West).count();
            assert_eq!(east, 15);
            assert_eq!(west, 15);
        }
    }
}
