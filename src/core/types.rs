use serde::{Deserialize, Serialize};

/// Which catalog an entry belongs to
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    Ingredient,
    Product,
    Recipe,
}

impl EntryKind {
    pub const ALL: [EntryKind; 3] = [Self::Ingredient, Self::Product, Self::Recipe];
}

impl std::fmt::Display for EntryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ingredient => write!(f, "ingredient"),
            Self::Product => write!(f, "product"),
            Self::Recipe => write!(f, "recipe"),
        }
    }
}

impl std::str::FromStr for EntryKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ingredient" | "ingredients" => Ok(Self::Ingredient),
            "product" | "products" => Ok(Self::Product),
            "recipe" | "recipes" => Ok(Self::Recipe),
            other => Err(format!("Unknown entry kind '{other}'")),
        }
    }
}

/// How strongly a result suggests the candidate is a duplicate
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStrength {
    Fuzzy,
    Strong,
    Identical,
    /// Codes collide, regardless of name similarity
    Exact,
}

impl MatchStrength {
    #[must_use]
    pub fn from_result(exact_match: bool, similarity: f64) -> Self {
        if exact_match {
            Self::Exact
        } else if similarity >= 1.0 {
            Self::Identical
        } else if similarity >= 0.9 {
            Self::Strong
        } else {
            Self::Fuzzy
        }
    }
}

impl std::fmt::Display for MatchStrength {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fuzzy => write!(f, "fuzzy"),
            Self::Strong => write!(f, "strong"),
            Self::Identical => write!(f, "identical"),
            Self::Exact => write!(f, "exact code"),
        }
    }
}
