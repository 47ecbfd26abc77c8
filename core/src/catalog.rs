//! Home screen catalog: fetched challenges grouped by top category.
//!
//! # Design
//! `ChallengeCatalog` owns the last successful fetch and the selected tab.
//! `refresh` returns its outcome instead of firing callbacks; a failed
//! refresh leaves the previous contents in place.

use std::fmt;
use std::str::FromStr;

use crate::error::Result;
use crate::service::ApiService;
use crate::transport::Transport;
use crate::types::ChallengeEntity;

/// Number of challenges shown under the "hot" tab.
pub const HOT_LIMIT: usize = 13;

/// Tabs on the home screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TopCategory {
    #[default]
    Hot,
    Ranking,
    Guess,
    Coloring,
}

impl TopCategory {
    pub const ALL: [TopCategory; 4] = [
        TopCategory::Hot,
        TopCategory::Ranking,
        TopCategory::Guess,
        TopCategory::Coloring,
    ];

    /// The `category` value challenges under this tab carry. `Hot` has none.
    pub fn wire_category(self) -> Option<&'static str> {
        match self {
            TopCategory::Hot => None,
            TopCategory::Ranking => Some("Ranking"),
            TopCategory::Guess => Some("Guess"),
            TopCategory::Coloring => Some("Coloring"),
        }
    }
}

impl fmt::Display for TopCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TopCategory::Hot => "hot",
            TopCategory::Ranking => "ranking",
            TopCategory::Guess => "guess",
            TopCategory::Coloring => "coloring",
        })
    }
}

impl FromStr for TopCategory {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        TopCategory::ALL
            .into_iter()
            .find(|c| c.to_string().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown category {s:?} (expected hot, ranking, guess, or coloring)"))
    }
}

/// Screen layout a challenge renders with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DesignType {
    Ranking1,
    Ranking2,
    Ranking3,
    Guess,
    Coloring1,
    Coloring2,
    Coloring3,
    Coloring4,
    Coloring5,
}

/// Cell style of a ranking layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RankingCellStyle {
    Case1,
    Case2,
    Case3,
}

impl DesignType {
    /// Layout for a challenge, keyed on its category and name.
    pub fn for_challenge(category: &str, name: &str) -> Option<Self> {
        match category.to_lowercase().as_str() {
            "ranking" => match name {
                "1" => Some(DesignType::Ranking1),
                // Ranking "4" reuses the second layout.
                "2" | "4" => Some(DesignType::Ranking2),
                "3" => Some(DesignType::Ranking3),
                _ => None,
            },
            "guess" => Some(DesignType::Guess),
            "coloring" => match name {
                "1" => Some(DesignType::Coloring1),
                "2" => Some(DesignType::Coloring2),
                "3" => Some(DesignType::Coloring3),
                "4" => Some(DesignType::Coloring4),
                "5" => Some(DesignType::Coloring5),
                _ => None,
            },
            _ => None,
        }
    }

    pub fn ranking_style(self) -> Option<RankingCellStyle> {
        match self {
            DesignType::Ranking1 => Some(RankingCellStyle::Case1),
            DesignType::Ranking2 => Some(RankingCellStyle::Case2),
            DesignType::Ranking3 => Some(RankingCellStyle::Case3),
            _ => None,
        }
    }
}

/// Challenges from the last successful fetch plus the selected tab.
#[derive(Debug, Clone, Default)]
pub struct ChallengeCatalog {
    all: Vec<ChallengeEntity>,
    selected: TopCategory,
}

impl ChallengeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replace(&mut self, challenges: Vec<ChallengeEntity>) {
        self.all = challenges;
    }

    pub fn select(&mut self, category: TopCategory) {
        self.selected = category;
    }

    pub fn selected(&self) -> TopCategory {
        self.selected
    }

    pub fn all(&self) -> &[ChallengeEntity] {
        &self.all
    }

    /// Challenges under the selected tab.
    pub fn filtered(&self) -> Vec<&ChallengeEntity> {
        match self.selected.wire_category() {
            None => self.all.iter().take(HOT_LIMIT).collect(),
            Some(category) => self.all.iter().filter(|c| c.category == category).collect(),
        }
    }

    pub fn audio_items(&self) -> Vec<&ChallengeEntity> {
        self.all
            .iter()
            .filter(|c| c.category.to_lowercase() == "audio")
            .collect()
    }

    pub fn challenge(&self, index: usize) -> Option<&ChallengeEntity> {
        self.all.get(index)
    }

    pub fn filtered_challenge(&self, index: usize) -> Option<&ChallengeEntity> {
        self.filtered().get(index).copied()
    }

    /// Fetch through `service` and replace the contents on success.
    ///
    /// Returns the number of challenges now held. On error the previous
    /// contents are kept.
    pub fn refresh<T: Transport>(&mut self, service: &ApiService<T>) -> Result<usize> {
        let challenges = service.fetch_challenges()?;
        self.replace(challenges);
        Ok(self.all.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn challenge(name: &str, category: &str) -> ChallengeEntity {
        ChallengeEntity {
            category: category.to_string(),
            ..ChallengeEntity::named(name)
        }
    }

    fn catalog() -> ChallengeCatalog {
        let mut catalog = ChallengeCatalog::new();
        let mut items: Vec<_> = (0..15).map(|i| challenge(&i.to_string(), "Ranking")).collect();
        items.push(challenge("g", "Guess"));
        items.push(challenge("c", "Coloring"));
        items.push(challenge("lower", "ranking"));
        items.push(challenge("a", "AUDIO"));
        catalog.replace(items);
        catalog
    }

    #[test]
    fn hot_shows_first_thirteen() {
        let catalog = catalog();
        assert_eq!(catalog.selected(), TopCategory::Hot);
        let hot = catalog.filtered();
        assert_eq!(hot.len(), HOT_LIMIT);
        assert_eq!(hot[0].name, "0");
        assert_eq!(hot[12].name, "12");
    }

    #[test]
    fn hot_with_fewer_items_shows_all() {
        let mut catalog = ChallengeCatalog::new();
        catalog.replace(vec![challenge("x", "Guess")]);
        assert_eq!(catalog.filtered().len(), 1);
    }

    #[test]
    fn category_tabs_match_exactly() {
        let mut catalog = catalog();
        catalog.select(TopCategory::Ranking);
        assert_eq!(catalog.filtered().len(), 15);
        catalog.select(TopCategory::Guess);
        assert_eq!(catalog.filtered_challenge(0).map(|c| c.name.as_str()), Some("g"));
        assert!(catalog.filtered_challenge(1).is_none());
        catalog.select(TopCategory::Coloring);
        assert_eq!(catalog.filtered().len(), 1);
    }

    #[test]
    fn audio_is_case_insensitive() {
        let catalog = catalog();
        let audio = catalog.audio_items();
        assert_eq!(audio.len(), 1);
        assert_eq!(audio[0].name, "a");
    }

    #[test]
    fn design_types() {
        assert_eq!(DesignType::for_challenge("Ranking", "1"), Some(DesignType::Ranking1));
        assert_eq!(DesignType::for_challenge("RANKING", "4"), Some(DesignType::Ranking2));
        assert_eq!(DesignType::for_challenge("ranking", "5"), None);
        assert_eq!(DesignType::for_challenge("Guess", "anything"), Some(DesignType::Guess));
        assert_eq!(DesignType::for_challenge("coloring", "5"), Some(DesignType::Coloring5));
        assert_eq!(DesignType::for_challenge("coloring", "6"), None);
        assert_eq!(DesignType::for_challenge("audio", "1"), None);
    }

    #[test]
    fn ranking_styles() {
        assert_eq!(DesignType::Ranking3.ranking_style(), Some(RankingCellStyle::Case3));
        assert_eq!(DesignType::Guess.ranking_style(), None);
    }

    #[test]
    fn category_parses_case_insensitively() {
        assert_eq!("Coloring".parse::<TopCategory>(), Ok(TopCategory::Coloring));
        assert_eq!("hot".parse::<TopCategory>(), Ok(TopCategory::Hot));
        assert!("audio".parse::<TopCategory>().is_err());
    }
}
