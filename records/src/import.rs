//! Fields derived once when the raw catalog is imported

use serde::Serialize;

use crate::pokemon::PokemonDocument;

/// Highest national-dex id of each generation, in order
const GENERATION_BOUNDS: [u32; 8] = [151, 251, 386, 493, 649, 721, 809, 905];

#[rustfmt::skip]
const LEGENDARY_IDS: [u32; 49] = [
    144, 145, 146, 150,
    243, 244, 245, 249, 250,
    377, 378, 379, 380, 381, 382, 383, 384,
    483, 484, 487,
    638, 639, 640, 641, 642, 643, 644, 645, 646,
    716, 717, 718,
    785, 786, 787, 788, 791, 792, 793, 794, 795, 796, 797, 798,
    888, 889, 890,
    898, 905,
];

const LEGENDARY_NAMES: [&str; 42] = [
    "Articuno", "Zapdos", "Moltres", "Mewtwo", "Lugia", "Ho-Oh",
    "Entei", "Raikou", "Suicune",
    "Regirock", "Regice", "Registeel", "Latias", "Latios", "Kyogre", "Groudon", "Rayquaza",
    "Dialga", "Palkia", "Giratina",
    "Cobalion", "Terrakion", "Virizion", "Tornadus", "Thundurus", "Reshiram", "Zekrom",
    "Landorus", "Kyurem",
    "Xerneas", "Yveltal", "Zygarde",
    "Tapu Koko", "Tapu Lele", "Tapu Bulu", "Tapu Fini", "Solgaleo", "Lunala", "Necrozma",
    "Zacian", "Zamazenta", "Eternatus",
];

#[rustfmt::skip]
const MYTHICAL_IDS: [u32; 22] = [
    151, 251, 385, 386, 489, 490, 491, 492, 493,
    494, 647, 648, 649, 719, 720, 721, 801, 802,
    807, 808, 809, 893,
];

const MYTHICAL_NAMES: [&str; 22] = [
    "Mew", "Celebi", "Jirachi", "Deoxys", "Phione", "Manaphy", "Darkrai", "Shaymin", "Arceus",
    "Victini", "Keldeo", "Meloetta", "Genesect", "Diancie", "Hoopa", "Volcanion", "Magearna",
    "Marshadow", "Zeraora", "Meltan", "Melmetal", "Zarude",
];

/// Generation (1-9) a national-dex id belongs to
pub fn generation_for(id: u32) -> u8 {
    GENERATION_BOUNDS
        .iter()
        .position(|&bound| id <= bound)
        .map(|idx| idx as u8 + 1)
        .unwrap_or(9)
}

pub fn is_legendary(id: u32, name: &str) -> bool {
    LEGENDARY_IDS.contains(&id) || LEGENDARY_NAMES.contains(&name)
}

pub fn is_mythical(id: u32, name: &str) -> bool {
    MYTHICAL_IDS.contains(&id) || MYTHICAL_NAMES.contains(&name)
}

impl PokemonDocument {
    /// Fill in generation and the legendary/mythical flags
    pub fn with_derived_fields(mut self) -> Self {
        self.generation = Some(generation_for(self.id));
        self.is_legendary = is_legendary(self.id, &self.name.english);
        self.is_mythical = is_mythical(self.id, &self.name.english);
        self
    }
}

/// Static description of a generation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Generation {
    pub id: u8,
    pub name: &'static str,
    pub region: &'static str,
    pub games: &'static [&'static str],
}

/// All nine generations in order
pub fn generations() -> &'static [Generation] {
    static GENERATIONS: [Generation; 9] = [
        Generation { id: 1, name: "Generation I", region: "Kanto", games: &["Red", "Blue", "Yellow"] },
        Generation { id: 2, name: "Generation II", region: "Johto", games: &["Gold", "Silver", "Crystal"] },
        Generation {
            id: 3,
            name: "Generation III",
            region: "Hoenn",
            games: &["Ruby", "Sapphire", "Emerald", "FireRed", "LeafGreen"],
        },
        Generation {
            id: 4,
            name: "Generation IV",
            region: "Sinnoh",
            games: &["Diamond", "Pearl", "Platinum", "HeartGold", "SoulSilver"],
        },
        Generation {
            id: 5,
            name: "Generation V",
            region: "Unova",
            games: &["Black", "White", "Black 2", "White 2"],
        },
        Generation {
            id: 6,
            name: "Generation VI",
            region: "Kalos",
            games: &["X", "Y", "Omega Ruby", "Alpha Sapphire"],
        },
        Generation {
            id: 7,
            name: "Generation VII",
            region: "Alola",
            games: &["Sun", "Moon", "Ultra Sun", "Ultra Moon", "Let's Go, Pikachu!", "Let's Go, Eevee!"],
        },
        Generation {
            id: 8,
            name: "Generation VIII",
            region: "Galar",
            games: &["Sword", "Shield", "Brilliant Diamond", "Shining Pearl", "Legends: Arceus"],
        },
        Generation { id: 9, name: "Generation IX", region: "Paldea", games: &["Scarlet", "Violet"] },
    ];

    &GENERATIONS
}
