//! Known participants (name and stable id pairs).
//!
//! A [`Roster`] is a snapshot. The engine never caches one across
//! messages; the hook asks its [`RosterSource`] for a fresh snapshot each
//! time, since participants come and go between messages.

use chatcolors_style::StableId;

/// One known participant.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RosterEntry {
    pub name: String,
    pub id: StableId,
}

impl RosterEntry {
    #[must_use]
    pub fn new(name: impl Into<String>, id: StableId) -> Self {
        Self {
            name: name.into(),
            id,
        }
    }
}

/// Snapshot of currently known participants.
///
/// All lookups are case-sensitive exact matches. When several entries
/// match, the first one wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    entries: Vec<RosterEntry>,
}

impl Roster {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: RosterEntry) {
        self.entries.push(entry);
    }

    #[must_use]
    pub fn contains_name(&self, name: &str) -> bool {
        self.entries.iter().any(|entry| entry.name == name)
    }

    #[must_use]
    pub fn id_for_name(&self, name: &str) -> Option<StableId> {
        self.entries
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| entry.id)
    }

    #[must_use]
    pub fn name_for_id(&self, id: StableId) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.id == id)
            .map(|entry| entry.name.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RosterEntry> {
        self.entries.iter()
    }
}

impl FromIterator<RosterEntry> for Roster {
    fn from_iter<I: IntoIterator<Item = RosterEntry>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<S: Into<String>> FromIterator<(S, StableId)> for Roster {
    fn from_iter<I: IntoIterator<Item = (S, StableId)>>(iter: I) -> Self {
        iter.into_iter()
            .map(|(name, id)| RosterEntry::new(name, id))
            .collect()
    }
}

/// Supplies a fresh roster snapshot on demand.
pub trait RosterSource {
    fn snapshot(&self) -> Roster;
}

impl RosterSource for Roster {
    fn snapshot(&self) -> Roster {
        self.clone()
    }
}

impl<F> RosterSource for F
where
    F: Fn() -> Roster,
{
    fn snapshot(&self) -> Roster {
        self()
    }
}
