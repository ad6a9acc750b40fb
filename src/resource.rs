//! Resource types - the records the tracker manages
//!
//! A resource is a single tracked learning item:
//! - `ResourceKind`: article, video, course, book, other
//! - `Status`: planned, in-progress, completed
//! - Free-form tags and key concepts (no canonical registry)

use crate::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Unique identifier of a resource within a collection.
///
/// Assigned by the store as `max(existing) + 1`, so ids are never
/// reused after a delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceId(pub u64);

impl std::fmt::Display for ResourceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ResourceId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        s.parse::<u64>()
            .map(ResourceId)
            .map_err(|_| Error::Validation(format!("Invalid resource id: {}", s)))
    }
}

/// The kind of learning material a resource points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Article,
    Video,
    Course,
    Book,
    /// Anything that doesn't fit the other kinds (podcast, paper, repo)
    Other,
}

impl ResourceKind {
    /// Get the string representation of the kind
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Article => "article",
            ResourceKind::Video => "video",
            ResourceKind::Course => "course",
            ResourceKind::Book => "book",
            ResourceKind::Other => "other",
        }
    }

    /// Get all resource kinds
    pub fn all() -> &'static [ResourceKind] {
        &[
            ResourceKind::Article,
            ResourceKind::Video,
            ResourceKind::Course,
            ResourceKind::Book,
            ResourceKind::Other,
        ]
    }
}

impl FromStr for ResourceKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "article" | "blog" | "post" => Ok(ResourceKind::Article),
            "video" | "talk" | "lecture" => Ok(ResourceKind::Video),
            "course" | "mooc" | "tutorial" => Ok(ResourceKind::Course),
            "book" | "ebook" => Ok(ResourceKind::Book),
            "other" | "misc" => Ok(ResourceKind::Other),
            _ => Err(Error::Validation(format!("Unknown resource kind: {}", s))),
        }
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Progress status of a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    /// Queued up but not started
    Planned,
    /// Currently being worked through
    InProgress,
    /// Finished
    Completed,
}

impl Status {
    /// Get the string representation of the status
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Planned => "planned",
            Status::InProgress => "in-progress",
            Status::Completed => "completed",
        }
    }

    /// Get all statuses
    pub fn all() -> &'static [Status] {
        &[Status::Planned, Status::InProgress, Status::Completed]
    }
}

impl FromStr for Status {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "planned" | "todo" | "queued" => Ok(Status::Planned),
            "in-progress" | "in_progress" | "started" | "reading" | "watching" => {
                Ok(Status::InProgress)
            }
            "completed" | "done" | "finished" => Ok(Status::Completed),
            _ => Err(Error::Validation(format!("Unknown status: {}", s))),
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A tracked learning resource.
///
/// Tags and concepts are free-form strings; duplicates within one resource
/// are dropped at construction, original order is preserved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    /// Unique identifier, assigned by the store at creation
    pub id: ResourceId,
    /// Title of the material (required, non-empty)
    pub title: String,
    /// What kind of material this is
    pub kind: ResourceKind,
    /// Where to find it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Free-form labels for filtering
    #[serde(default)]
    pub tags: Vec<String>,
    /// Key concepts learned from this resource
    #[serde(default)]
    pub concepts: Vec<String>,
    /// Free-text notes
    #[serde(default)]
    pub notes: String,
    /// Progress status
    pub status: Status,
    /// When the resource was added (UTC)
    pub created_at: DateTime<Utc>,
    /// When the resource was last modified (UTC)
    pub updated_at: DateTime<Utc>,
}

impl Resource {
    /// Check whether `query` matches this resource case-insensitively in
    /// title, notes, tags, or concepts.
    pub fn matches(&self, query: &str) -> bool {
        let q = query.to_lowercase();
        self.title.to_lowercase().contains(&q)
            || self.notes.to_lowercase().contains(&q)
            || self.tags.iter().any(|t| t.to_lowercase().contains(&q))
            || self.concepts.iter().any(|c| c.to_lowercase().contains(&q))
    }

    /// Check whether this resource carries the given tag (case-insensitive)
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }
}

/// Fields supplied when creating a new resource.
///
/// The store assigns the id and timestamps; everything else comes from here.
#[derive(Debug, Clone, Default)]
pub struct ResourceDraft {
    pub title: String,
    pub kind: Option<ResourceKind>,
    pub url: Option<String>,
    pub tags: Vec<String>,
    pub concepts: Vec<String>,
    pub notes: String,
    pub status: Option<Status>,
}

impl ResourceDraft {
    /// Create a draft with the required fields
    pub fn new(title: impl Into<String>, kind: ResourceKind) -> Self {
        Self {
            title: title.into(),
            kind: Some(kind),
            ..Default::default()
        }
    }

    /// Set the URL
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Set the tags
    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    /// Set the key concepts
    pub fn with_concepts(mut self, concepts: Vec<String>) -> Self {
        self.concepts = concepts;
        self
    }

    /// Set the notes
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    /// Set the initial status (defaults to planned)
    pub fn with_status(mut self, status: Status) -> Self {
        self.status = Some(status);
        self
    }

    /// Validate required fields and build the stored record.
    pub(crate) fn into_resource(self, id: ResourceId, now: DateTime<Utc>) -> Result<Resource> {
        if self.title.trim().is_empty() {
            return Err(Error::Validation("title must not be empty".to_string()));
        }
        let kind = self
            .kind
            .ok_or_else(|| Error::Validation("kind is required".to_string()))?;

        Ok(Resource {
            id,
            title: self.title.trim().to_string(),
            kind,
            url: self.url.filter(|u| !u.trim().is_empty()),
            tags: dedup_preserving_order(self.tags),
            concepts: dedup_preserving_order(self.concepts),
            notes: self.notes,
            status: self.status.unwrap_or(Status::Planned),
            created_at: now,
            updated_at: now,
        })
    }
}

/// A partial update: only the supplied fields are merged into the record.
#[derive(Debug, Clone, Default)]
pub struct ResourcePatch {
    pub title: Option<String>,
    pub kind: Option<ResourceKind>,
    pub url: Option<String>,
    pub tags: Option<Vec<String>>,
    pub concepts: Option<Vec<String>>,
    pub notes: Option<String>,
    pub status: Option<Status>,
}

impl ResourcePatch {
    /// Check whether the patch carries no changes at all
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.kind.is_none()
            && self.url.is_none()
            && self.tags.is_none()
            && self.concepts.is_none()
            && self.notes.is_none()
            && self.status.is_none()
    }

    /// Merge the supplied fields into `resource`.
    ///
    /// An explicitly supplied empty title is rejected; absent fields are
    /// left untouched.
    pub(crate) fn apply(self, resource: &mut Resource) -> Result<()> {
        if let Some(title) = self.title {
            if title.trim().is_empty() {
                return Err(Error::Validation("title must not be empty".to_string()));
            }
            resource.title = title.trim().to_string();
        }
        if let Some(kind) = self.kind {
            resource.kind = kind;
        }
        if let Some(url) = self.url {
            resource.url = if url.trim().is_empty() { None } else { Some(url) };
        }
        if let Some(tags) = self.tags {
            resource.tags = dedup_preserving_order(tags);
        }
        if let Some(concepts) = self.concepts {
            resource.concepts = dedup_preserving_order(concepts);
        }
        if let Some(notes) = self.notes {
            resource.notes = notes;
        }
        if let Some(status) = self.status {
            resource.status = status;
        }
        Ok(())
    }
}

/// Drop duplicate entries (case-sensitive) keeping first occurrence order,
/// and discard blank strings.
fn dedup_preserving_order(items: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    items
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .filter(|s| seen.insert(s.clone()))
        .collect()
}
