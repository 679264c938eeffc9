//! Parsed shapes from the game database's XML API.

/// One `<boardgame>`/`<name>` pair from a search response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub object_id: String,
    pub name: String,
    /// True when the name carried `primary="true"`.
    pub primary: bool,
}

/// A name entry on a game's detail page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameName {
    pub text: String,
    pub primary: bool,
}

/// Details for a single game, as returned by the by-id endpoint.
#[derive(Debug, Clone, Default)]
pub struct GameDetails {
    pub object_id: String,
    pub names: Vec<GameName>,
    /// Entity-encoded HTML-ish description text.
    pub description: Option<String>,
    pub year_published: Option<i64>,
}

/// English-language data extracted from a game's details.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnrichedData {
    pub name_en: String,
    pub description_en: String,
    pub year_published: Option<i64>,
}
