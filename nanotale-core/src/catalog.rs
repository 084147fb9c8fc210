//! Static reference data: inspiration words, themes and story lengths.
//!
//! The catalog is built once per process and never mutated afterwards.

use once_cell::sync::Lazy;
use rand::seq::SliceRandom;
use rand::Rng;

/// Inspiration words offered as suggestions.
pub const DICTIONARY: &[&str] = &[
    "abyss", "alchemy", "algorithm", "alien", "anchor", "angel", "anomaly", "antique", "apex",
    "arcane", "artifact", "ashes", "asteroid", "asylum", "atlas", "automaton", "avalanche",
    "axiom", "azure", "banshee", "beacon", "behemoth", "bionic", "blackout", "blizzard",
    "blueprint", "bonfire", "bounty", "bridge", "bunker", "cascade", "catalyst", "cathedral",
    "cavern", "celestial", "chimera", "chronicle", "cipher", "citadel", "cliff", "clone",
    "comet", "conspiracy", "core", "corruption", "cosmic", "coven", "crater", "crescendo",
    "crimson", "crown", "cryogenic", "crypt", "crystal", "curse", "cyberspace", "cyclone",
    "deep", "delta", "demon", "desert", "destiny", "device", "diamond", "dimension", "dragon",
    "dream", "drift", "dungeon", "dwarf", "dynasty", "echo", "eclipse", "eden", "elder",
    "elemental", "elixir", "ember", "emperor", "enigma", "epoch", "essence", "eternal",
    "ethereal", "exile", "exodus", "expedition", "extinction", "fabric", "faction", "fallacy",
    "phantom", "phoenix", "portal", "prophecy", "quantum", "quest", "radiant", "realm", "relic",
    "revolution", "rift", "ritual", "river", "robot", "rogue", "royal", "ruin", "rune",
    "sabotage", "sanctuary", "satellite", "savant", "scar", "scepter", "secret", "sentinel",
    "serpent", "shadow", "shard", "shield", "shipwreck", "shrine", "simulation", "siren",
    "skull", "sky", "soul", "source", "spell", "sphere", "spirit", "spire", "spy", "star",
    "station", "statue", "stealth", "storm", "summit", "sun", "supernova", "sword", "symbol",
    "syndicate", "system", "talisman", "tempest", "temple", "terminal", "terror", "throne",
    "thunder", "tide", "titan", "tomb", "tower", "toxic", "traitor", "treasure", "tribe",
    "trinity", "tundra", "tunnel", "twilight", "typhoon", "underground", "unicorn", "universe",
    "uprising", "utopia", "vampire", "vector", "veil", "venom", "vessel", "village", "virus",
    "vision", "void", "volcano", "vortex", "voyage", "wand", "wanderer", "war", "warden",
    "warlord", "weapon", "whisper", "wild", "winter", "witch", "wizard", "wolf", "world",
    "wound", "wraith", "wreckage", "zenith", "zephyr", "zombie", "zone",
];

/// Story themes, in display order.
pub const THEMES: &[&str] = &[
    "sci-fi",
    "romance",
    "horror",
    "comedy",
    "fantasy",
    "mystery",
    "thriller",
    "adventure",
];

/// Target story lengths in words, in display order.
pub const WORD_COUNTS: &[u32] = &[50, 100, 200, 300, 500, 800, 1000, 1200, 1500, 2000];

pub const DEFAULT_THEME: &str = "sci-fi";
pub const DEFAULT_LENGTH: u32 = 200;

/// Words pre-selected when a new form opens, and by "random".
pub const STARTING_WORD_COUNT: usize = 3;

/// Suggestions shown at a time.
pub const SUGGESTION_COUNT: usize = 8;

/// Maximum words a single request may carry.
pub const MAX_WORDS: usize = 5;

static GLOBAL: Lazy<Catalog> = Lazy::new(|| Catalog {
    words: DICTIONARY,
    themes: THEMES,
    lengths: WORD_COUNTS,
});

/// Read-only view over the word, theme and length lists.
#[derive(Debug, Clone, Copy)]
pub struct Catalog {
    words: &'static [&'static str],
    themes: &'static [&'static str],
    lengths: &'static [u32],
}

impl Catalog {
    /// The process-wide catalog.
    pub fn global() -> &'static Catalog {
        &GLOBAL
    }

    pub fn words(&self) -> &'static [&'static str] {
        self.words
    }

    pub fn themes(&self) -> &'static [&'static str] {
        self.themes
    }

    pub fn lengths(&self) -> &'static [u32] {
        self.lengths
    }

    /// Whether `theme` is one of the listed themes (exact match).
    pub fn has_theme(&self, theme: &str) -> bool {
        self.themes.contains(&theme)
    }

    /// Whether `length` is one of the offered word counts.
    pub fn is_listed_length(&self, length: u32) -> bool {
        self.lengths.contains(&length)
    }

    /// Position of a theme in display order.
    pub fn theme_index(&self, theme: &str) -> Option<usize> {
        self.themes.iter().position(|t| *t == theme)
    }

    /// Position of a length in display order.
    pub fn length_index(&self, length: u32) -> Option<usize> {
        self.lengths.iter().position(|l| *l == length)
    }

    /// Pick `count` distinct words in random order.
    ///
    /// Asking for more words than the dictionary holds returns all of them.
    pub fn sample_words<R: Rng + ?Sized>(&self, rng: &mut R, count: usize) -> Vec<&'static str> {
        self.words.choose_multiple(rng, count).copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_sizes() {
        let catalog = Catalog::global();
        assert_eq!(catalog.words().len(), 203);
        assert_eq!(catalog.themes().len(), 8);
        assert_eq!(catalog.lengths().len(), 10);
    }

    #[test]
    fn test_dictionary_is_lowercase_and_unique() {
        let unique: HashSet<_> = DICTIONARY.iter().collect();
        assert_eq!(unique.len(), DICTIONARY.len());
        assert!(DICTIONARY
            .iter()
            .all(|w| w.chars().all(|c| c.is_ascii_lowercase())));
    }

    #[test]
    fn test_defaults_are_listed() {
        let catalog = Catalog::global();
        assert!(catalog.has_theme(DEFAULT_THEME));
        assert!(catalog.is_listed_length(DEFAULT_LENGTH));
        assert_eq!(catalog.theme_index("horror"), Some(2));
        assert_eq!(catalog.length_index(2000), Some(9));
        assert!(!catalog.has_theme("western"));
        assert!(!catalog.is_listed_length(150));
    }

    #[test]
    fn test_sample_words_distinct() {
        let mut rng = StdRng::seed_from_u64(7);
        let words = Catalog::global().sample_words(&mut rng, SUGGESTION_COUNT);
        assert_eq!(words.len(), SUGGESTION_COUNT);

        let unique: HashSet<_> = words.iter().collect();
        assert_eq!(unique.len(), SUGGESTION_COUNT);
        assert!(words.iter().all(|w| DICTIONARY.contains(w)));
    }

    #[test]
    fn test_sample_more_than_available() {
        let mut rng = StdRng::seed_from_u64(1);
        let words = Catalog::global().sample_words(&mut rng, 10_000);
        assert_eq!(words.len(), DICTIONARY.len());
    }
}
