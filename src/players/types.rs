//! Player list snapshot types.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use time::OffsetDateTime;

/// Read-only snapshot of the connected players at one instant.
///
/// Names are trimmed, sorted and deduplicated. The textual form lists the
/// names between brackets separated by single spaces:
///
/// ```text
/// [alice bob]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct PlayerList(Vec<String>);

impl PlayerList {
    /// Build a snapshot from any collection of names.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let set: BTreeSet<String> = names
            .into_iter()
            .map(|n| n.as_ref().trim().to_string())
            .filter(|n| !n.is_empty())
            .collect();
        Self(set.into_iter().collect())
    }

    /// Number of players in the snapshot.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether nobody is connected.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether the named player is in the snapshot.
    pub fn contains(&self, name: &str) -> bool {
        self.0.binary_search_by(|n| n.as_str().cmp(name)).is_ok()
    }

    /// Player names in sorted order.
    pub fn names(&self) -> &[String] {
        &self.0
    }

    /// Iterate over player names.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl fmt::Display for PlayerList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, name) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            f.write_str(name)?;
        }
        f.write_str("]")
    }
}

impl From<Vec<String>> for PlayerList {
    fn from(names: Vec<String>) -> Self {
        Self::new(names)
    }
}

impl From<PlayerList> for Vec<String> {
    fn from(list: PlayerList) -> Self {
        list.0
    }
}

impl<S: AsRef<str>> FromIterator<S> for PlayerList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}

/// JSON view of a player list, stamped with the time it was taken.
#[derive(Debug, Clone, Serialize)]
pub struct PlayerSnapshot {
    /// Number of players online.
    pub count: usize,
    /// Player names.
    pub players: PlayerList,
    /// When the snapshot was taken.
    #[serde(with = "time::serde::rfc3339")]
    pub taken_at: OffsetDateTime,
}

impl PlayerSnapshot {
    /// Stamp a player list with the current time.
    pub fn capture(players: PlayerList) -> Self {
        Self {
            count: players.len(),
            players,
            taken_at: OffsetDateTime::now_utc(),
        }
    }
}

/// Rendering chosen for a status response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
pub enum OutputFormat {
    /// Bracketed plaintext list.
    #[strum(to_string = "text", serialize = "TEXT")]
    #[default]
    Text,
    /// [`PlayerSnapshot`] as JSON.
    #[strum(to_string = "json", serialize = "JSON")]
    Json,
}

impl OutputFormat {
    /// Pick a format from an `Accept` header value.
    pub fn from_accept(accept: Option<&str>) -> Self {
        match accept {
            Some(value) if value.contains("application/json") => OutputFormat::Json,
            _ => OutputFormat::Text,
        }
    }
}
