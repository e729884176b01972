use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Body text used when a bill page has no main text container.
pub const FULL_TEXT_UNAVAILABLE: &str = "Full text not available";

// =============================================================================
// Bill data
// =============================================================================

/// Title and body extracted from a bill page. Lives for one request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillRecord {
    pub title: String,
    /// Never empty; holds [`FULL_TEXT_UNAVAILABLE`] when the page has no body.
    pub full_text: String,
}

impl BillRecord {
    /// Build a record, substituting the sentinel for a missing or blank body.
    pub fn new(title: impl Into<String>, full_text: Option<String>) -> Self {
        let full_text = full_text
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| FULL_TEXT_UNAVAILABLE.to_string());
        Self {
            title: title.into(),
            full_text,
        }
    }

    /// Whether the body fell back to the sentinel text.
    pub fn has_full_text(&self) -> bool {
        self.full_text != FULL_TEXT_UNAVAILABLE
    }
}

/// Recorded position in a roll-call vote.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum VoteCategory {
    #[serde(rename = "Yes")]
    Yes,
    #[serde(rename = "No")]
    No,
    #[serde(rename = "Not-voting")]
    NotVoting,
}

impl VoteCategory {
    pub const ALL: [VoteCategory; 3] = [VoteCategory::Yes, VoteCategory::No, VoteCategory::NotVoting];

    /// Suffix used by the page's `vote-<slug>` class names.
    pub fn slug(self) -> &'static str {
        match self {
            VoteCategory::Yes => "yes",
            VoteCategory::No => "no",
            VoteCategory::NotVoting => "not-voting",
        }
    }

    /// Display label, as used for chart legends and JSON keys.
    pub fn label(self) -> &'static str {
        match self {
            VoteCategory::Yes => "Yes",
            VoteCategory::No => "No",
            VoteCategory::NotVoting => "Not-voting",
        }
    }
}

impl fmt::Display for VoteCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Vote counts keyed by category. Categories missing from the page are absent.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VoteTally(BTreeMap<VoteCategory, u64>);

impl VoteTally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, category: VoteCategory, count: u64) {
        self.0.insert(category, count);
    }

    pub fn get(&self, category: VoteCategory) -> Option<u64> {
        self.0.get(&category).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Sum of all recorded votes.
    pub fn total(&self) -> u64 {
        self.0.values().sum()
    }

    /// Entries in Yes, No, Not-voting order.
    pub fn iter(&self) -> impl Iterator<Item = (VoteCategory, u64)> + '_ {
        self.0.iter().map(|(c, n)| (*c, *n))
    }
}

impl FromIterator<(VoteCategory, u64)> for VoteTally {
    fn from_iter<I: IntoIterator<Item = (VoteCategory, u64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// A point-in-time milestone on a bill's status timeline.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEvent {
    pub event: String,
    pub date: NaiveDate,
}

impl TimelineEvent {
    pub fn new(event: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            event: event.into(),
            date,
        }
    }

    /// Bar start; milestones are zero-width so this equals [`Self::end`].
    pub fn start(&self) -> NaiveDate {
        self.date
    }

    pub fn end(&self) -> NaiveDate {
        self.date
    }
}

// =============================================================================
// Conversation
// =============================================================================

/// Opaque identifier of a conversation session, carried in a cookie.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(Uuid);

impl SessionId {
    /// Generate a fresh random identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for SessionId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(Self)
    }
}

/// One utterance in a conversation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "speaker", content = "text", rename_all = "snake_case")]
pub enum ConversationTurn {
    Human(String),
    Assistant(String),
}

impl ConversationTurn {
    pub fn human(text: impl Into<String>) -> Self {
        ConversationTurn::Human(text.into())
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        ConversationTurn::Assistant(text.into())
    }

    pub fn text(&self) -> &str {
        match self {
            ConversationTurn::Human(t) | ConversationTurn::Assistant(t) => t,
        }
    }

    pub fn is_human(&self) -> bool {
        matches!(self, ConversationTurn::Human(_))
    }
}

/// Renders the prompt form: `Human: ...` or `AI: ...`.
impl fmt::Display for ConversationTurn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let speaker = if self.is_human() { "Human" } else { "AI" };
        write!(f, "{}: {}", speaker, self.text())
    }
}
