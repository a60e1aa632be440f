//! Comfort and forecast categories

use serde::{Deserialize, Serialize};

/// Mutually exclusive day classification used for historical impact analysis.
///
/// Variant order is the classification priority order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum ComfortCategory {
    /// Heavy rain
    Rainy,
    /// Hot and humid, heat index above the muggy threshold
    Muggy,
    Hot,
    Cold,
    /// High humidity with some drizzle
    Humid,
    /// Everything else; the preferred impact baseline
    Mild,
}

impl ComfortCategory {
    pub const ALL: [ComfortCategory; 6] = [
        ComfortCategory::Rainy,
        ComfortCategory::Muggy,
        ComfortCategory::Hot,
        ComfortCategory::Cold,
        ComfortCategory::Humid,
        ComfortCategory::Mild,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            ComfortCategory::Rainy => "rainy",
            ComfortCategory::Muggy => "muggy",
            ComfortCategory::Hot => "hot",
            ComfortCategory::Cold => "cold",
            ComfortCategory::Humid => "humid",
            ComfortCategory::Mild => "mild",
        }
    }
}

impl std::fmt::Display for ComfortCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ComfortCategory::Rainy => write!(f, "Rainy"),
            ComfortCategory::Muggy => write!(f, "Muggy"),
            ComfortCategory::Hot => write!(f, "Hot"),
            ComfortCategory::Cold => write!(f, "Cold"),
            ComfortCategory::Humid => write!(f, "Humid"),
            ComfortCategory::Mild => write!(f, "Mild"),
        }
    }
}

/// Coarse classification for forecast days
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ForecastCategory {
    Rainy,
    Cold,
    Normal,
}

impl std::fmt::Display for ForecastCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ForecastCategory::Rainy => write!(f, "Rainy"),
            ForecastCategory::Cold => write!(f, "Cold"),
            ForecastCategory::Normal => write!(f, "Normal"),
        }
    }
}

/// One value per [`ComfortCategory`], serialized as an object keyed by category
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryMap<T> {
    pub rainy: T,
    pub muggy: T,
    pub hot: T,
    pub cold: T,
    pub humid: T,
    pub mild: T,
}

impl<T> CategoryMap<T> {
    pub fn from_fn(mut f: impl FnMut(ComfortCategory) -> T) -> Self {
        Self {
            rainy: f(ComfortCategory::Rainy),
            muggy: f(ComfortCategory::Muggy),
            hot: f(ComfortCategory::Hot),
            cold: f(ComfortCategory::Cold),
            humid: f(ComfortCategory::Humid),
            mild: f(ComfortCategory::Mild),
        }
    }

    pub fn get(&self, category: ComfortCategory) -> &T {
        match category {
            ComfortCategory::Rainy => &self.rainy,
            ComfortCategory::Muggy => &self.muggy,
            ComfortCategory::Hot => &self.hot,
            ComfortCategory::Cold => &self.cold,
            ComfortCategory::Humid => &self.humid,
            ComfortCategory::Mild => &self.mild,
        }
    }

    pub fn get_mut(&mut self, category: ComfortCategory) -> &mut T {
        match category {
            ComfortCategory::Rainy => &mut self.rainy,
            ComfortCategory::Muggy => &mut self.muggy,
            ComfortCategory::Hot => &mut self.hot,
            ComfortCategory::Cold => &mut self.cold,
            ComfortCategory::Humid => &mut self.humid,
            ComfortCategory::Mild => &mut self.mild,
        }
    }

    /// Iterate in priority order
    pub fn iter(&self) -> impl Iterator<Item = (ComfortCategory, &T)> {
        ComfortCategory::ALL.into_iter().map(move |c| (c, self.get(c)))
    }

    pub fn map<U>(self, mut f: impl FnMut(ComfortCategory, T) -> U) -> CategoryMap<U> {
        CategoryMap {
            rainy: f(ComfortCategory::Rainy, self.rainy),
            muggy: f(ComfortCategory::Muggy, self.muggy),
            hot: f(ComfortCategory::Hot, self.hot),
            cold: f(ComfortCategory::Cold, self.cold),
            humid: f(ComfortCategory::Humid, self.humid),
            mild: f(ComfortCategory::Mild, self.mild),
        }
    }
}

impl<T> std::ops::Index<ComfortCategory> for CategoryMap<T> {
    type Output = T;

    fn index(&self, category: ComfortCategory) -> &T {
        self.get(category)
    }
}

impl<T> std::ops::IndexMut<ComfortCategory> for CategoryMap<T> {
    fn index_mut(&mut self, category: ComfortCategory) -> &mut T {
        self.get_mut(category)
    }
}
