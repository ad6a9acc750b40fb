//! Resource store - JSON-file backed collection of learning resources
//!
//! The store owns the collection: an ordered list of resources kept in
//! insertion order, serialized in full to a single JSON file on every
//! mutation and loaded back on startup. A missing file is an empty
//! collection, not an error. All queries return results in insertion order.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::graph::ConceptGraph;
use crate::resource::{Resource, ResourceDraft, ResourceId, ResourceKind, ResourcePatch, Status};
use crate::{Error, Result};

/// Optional filters applied on top of listing or searching.
///
/// All supplied filters intersect; tag matching is case-insensitive.
#[derive(Debug, Clone, Default)]
pub struct SearchFilter {
    pub kind: Option<ResourceKind>,
    pub tag: Option<String>,
    pub status: Option<Status>,
}

impl SearchFilter {
    /// Check whether a resource passes every supplied filter
    pub fn matches(&self, resource: &Resource) -> bool {
        if let Some(kind) = self.kind {
            if resource.kind != kind {
                return false;
            }
        }
        if let Some(ref tag) = self.tag {
            if !resource.has_tag(tag) {
                return false;
            }
        }
        if let Some(status) = self.status {
            if resource.status != status {
                return false;
            }
        }
        true
    }
}

/// JSON-file backed storage for the resource collection
pub struct ResourceStore {
    path: Option<PathBuf>,
    resources: Vec<Resource>,
}

impl ResourceStore {
    /// Open a data file (a missing file yields an empty collection)
    pub fn open(path: &Path) -> Result<Self> {
        let resources = if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            serde_json::from_str(&contents)?
        } else {
            Vec::new()
        };

        tracing::debug!("Loaded {} resources from {:?}", resources.len(), path);

        Ok(Self {
            path: Some(path.to_path_buf()),
            resources,
        })
    }

    /// Open an in-memory store with no backing file (for testing)
    pub fn open_in_memory() -> Self {
        Self {
            path: None,
            resources: Vec::new(),
        }
    }

    /// Serialize the whole collection to the backing file.
    ///
    /// Written to a temporary sibling first, then renamed over the target,
    /// so an interrupted write never leaves a half-written data file.
    fn persist(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let contents = serde_json::to_string_pretty(&self.resources)?;
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, contents)?;
        std::fs::rename(&tmp, path)?;
        Ok(())
    }

    /// The next free identifier. Ids are never reused after a delete.
    fn next_id(&self) -> ResourceId {
        ResourceId(self.resources.iter().map(|r| r.id.0).max().unwrap_or(0) + 1)
    }

    fn position(&self, id: ResourceId) -> Result<usize> {
        self.resources
            .iter()
            .position(|r| r.id == id)
            .ok_or(Error::NotFound(id))
    }

    // ========== Mutations ==========

    /// Validate a draft, assign an id and timestamps, append, persist.
    pub fn add(&mut self, draft: ResourceDraft) -> Result<Resource> {
        let resource = draft.into_resource(self.next_id(), chrono::Utc::now())?;
        self.resources.push(resource.clone());
        self.persist()?;
        tracing::info!("Added resource {} ({})", resource.id, resource.title);
        Ok(resource)
    }

    /// Merge the supplied fields into an existing resource, refresh its
    /// `updated_at`, persist.
    pub fn update(&mut self, id: ResourceId, patch: ResourcePatch) -> Result<Resource> {
        let pos = self.position(id)?;

        // Apply on a copy so a rejected patch leaves the record untouched
        let mut updated = self.resources[pos].clone();
        patch.apply(&mut updated)?;
        updated.updated_at = chrono::Utc::now();

        self.resources[pos] = updated.clone();
        self.persist()?;
        tracing::info!("Updated resource {}", id);
        Ok(updated)
    }

    /// Remove a resource, persist. Returns the removed record.
    pub fn delete(&mut self, id: ResourceId) -> Result<Resource> {
        let pos = self.position(id)?;
        let removed = self.resources.remove(pos);
        self.persist()?;
        tracing::info!("Deleted resource {} ({})", id, removed.title);
        Ok(removed)
    }

    // ========== Queries ==========

    /// Get a resource by id
    pub fn get(&self, id: ResourceId) -> Result<&Resource> {
        self.resources
            .iter()
            .find(|r| r.id == id)
            .ok_or(Error::NotFound(id))
    }

    /// All resources in insertion order
    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// Resources passing the given filters, insertion order
    pub fn list(&self, filter: &SearchFilter) -> Vec<&Resource> {
        self.resources.iter().filter(|r| filter.matches(r)).collect()
    }

    /// Resources whose title, notes, tags, or concepts contain `query`
    /// case-insensitively, intersected with the filters. Insertion order.
    pub fn search(&self, query: &str, filter: &SearchFilter) -> Vec<&Resource> {
        self.resources
            .iter()
            .filter(|r| r.matches(query) && filter.matches(r))
            .collect()
    }

    /// Build the concept co-occurrence graph from the current collection.
    ///
    /// Recomputed in full on every call; the graph holds no state of its own.
    pub fn concept_graph(&self) -> ConceptGraph {
        ConceptGraph::build(&self.resources)
    }

    /// Get collection statistics
    pub fn stats(&self, top_tags: usize) -> StoreStats {
        let mut by_kind: Vec<(ResourceKind, usize)> = ResourceKind::all()
            .iter()
            .map(|k| (*k, self.resources.iter().filter(|r| r.kind == *k).count()))
            .collect();
        by_kind.retain(|(_, count)| *count > 0);

        let mut by_status: Vec<(Status, usize)> = Status::all()
            .iter()
            .map(|s| (*s, self.resources.iter().filter(|r| r.status == *s).count()))
            .collect();
        by_status.retain(|(_, count)| *count > 0);

        let mut tag_counts: HashMap<&str, usize> = HashMap::new();
        for resource in &self.resources {
            for tag in &resource.tags {
                *tag_counts.entry(tag.as_str()).or_insert(0) += 1;
            }
        }
        let unique_tags = tag_counts.len();

        let unique_concepts = self
            .resources
            .iter()
            .flat_map(|r| r.concepts.iter())
            .collect::<std::collections::HashSet<_>>()
            .len();

        // Top-N by frequency, ties broken alphabetically for stable output
        let mut tags: Vec<(String, usize)> = tag_counts
            .into_iter()
            .map(|(tag, count)| (tag.to_string(), count))
            .collect();
        tags.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        tags.truncate(top_tags);

        StoreStats {
            total: self.resources.len(),
            by_kind,
            by_status,
            unique_tags,
            unique_concepts,
            top_tags: tags,
        }
    }
}

/// Collection statistics
#[derive(Debug, Clone)]
pub struct StoreStats {
    pub total: usize,
    pub by_kind: Vec<(ResourceKind, usize)>,
    pub by_status: Vec<(Status, usize)>,
    pub unique_tags: usize,
    pub unique_concepts: usize,
    pub top_tags: Vec<(String, usize)>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_draft(title: &str) -> ResourceDraft {
        ResourceDraft::new(title, ResourceKind::Article)
    }

    #[test]
    fn test_add_then_get_roundtrip() {
        let mut store = ResourceStore::open_in_memory();

        let draft = sample_draft("Rust in Action")
            .with_url("https://example.com/rust")
            .with_tags(vec!["rust".into(), "systems".into()])
            .with_concepts(vec!["ownership".into(), "lifetimes".into()])
            .with_notes("chapter 4 is the good one");
        let added = store.add(draft).unwrap();

        let fetched = store.get(added.id).unwrap();
        assert_eq!(fetched.title, "Rust in Action");
        assert_eq!(fetched.url.as_deref(), Some("https://example.com/rust"));
        assert_eq!(fetched.tags, vec!["rust", "systems"]);
        assert_eq!(fetched.concepts, vec!["ownership", "lifetimes"]);
        assert_eq!(fetched.notes, "chapter 4 is the good one");
        assert_eq!(fetched.status, Status::Planned);
    }

    #[test]
    fn test_add_rejects_empty_title() {
        let mut store = ResourceStore::open_in_memory();
        let err = store.add(sample_draft("")).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert!(store.is_empty());
    }

    #[test]
    fn test_delete_then_get_and_update_fail_with_not_found() {
        let mut store = ResourceStore::open_in_memory();
        let added = store.add(sample_draft("ephemeral")).unwrap();

        store.delete(added.id).unwrap();

        assert!(matches!(store.get(added.id), Err(Error::NotFound(_))));
        let err = store
            .update(added.id, ResourcePatch::default())
            .unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
        assert!(matches!(store.delete(added.id), Err(Error::NotFound(_))));
    }

    #[test]
    fn test_ids_are_not_reused_after_delete() {
        let mut store = ResourceStore::open_in_memory();
        let first = store.add(sample_draft("first")).unwrap();
        let second = store.add(sample_draft("second")).unwrap();

        store.delete(first.id).unwrap();
        let third = store.add(sample_draft("third")).unwrap();

        assert!(third.id > second.id);
    }

    #[test]
    fn test_update_refreshes_timestamp_and_persists_fields() {
        let mut store = ResourceStore::open_in_memory();
        let added = store.add(sample_draft("draft title")).unwrap();

        let patch = ResourcePatch {
            title: Some("final title".to_string()),
            status: Some(Status::InProgress),
            ..Default::default()
        };
        let updated = store.update(added.id, patch).unwrap();

        assert_eq!(updated.title, "final title");
        assert_eq!(updated.status, Status::InProgress);
        assert!(updated.updated_at >= added.updated_at);
        assert_eq!(updated.created_at, added.created_at);
    }

    #[test]
    fn test_search_matches_all_text_fields() {
        let mut store = ResourceStore::open_in_memory();
        store
            .add(sample_draft("Learning Python the Hard Way"))
            .unwrap();
        store
            .add(sample_draft("Data talk").with_tags(vec!["python".into()]))
            .unwrap();
        store
            .add(sample_draft("Compilers").with_concepts(vec!["python bytecode".into()]))
            .unwrap();
        store
            .add(sample_draft("Notes demo").with_notes("really a Python tutorial"))
            .unwrap();
        store.add(sample_draft("Haskell from first principles")).unwrap();

        let results = store.search("python", &SearchFilter::default());
        assert_eq!(results.len(), 4);
        assert!(results.iter().all(|r| r.matches("python")));
    }

    #[test]
    fn test_search_intersects_with_filters() {
        let mut store = ResourceStore::open_in_memory();
        store
            .add(
                ResourceDraft::new("Rust video", ResourceKind::Video)
                    .with_tags(vec!["rust".into()]),
            )
            .unwrap();
        store
            .add(
                ResourceDraft::new("Rust book", ResourceKind::Book)
                    .with_tags(vec!["rust".into()]),
            )
            .unwrap();

        let filter = SearchFilter {
            kind: Some(ResourceKind::Book),
            ..Default::default()
        };
        let results = store.search("rust", &filter);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "Rust book");
    }

    #[test]
    fn test_list_filters_by_tag_case_insensitively() {
        let mut store = ResourceStore::open_in_memory();
        store
            .add(sample_draft("tagged").with_tags(vec!["Rust".into()]))
            .unwrap();
        store.add(sample_draft("untagged")).unwrap();

        let filter = SearchFilter {
            tag: Some("rust".to_string()),
            ..Default::default()
        };
        let results = store.list(&filter);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "tagged");
    }

    #[test]
    fn test_list_preserves_insertion_order() {
        let mut store = ResourceStore::open_in_memory();
        for title in ["one", "two", "three"] {
            store.add(sample_draft(title)).unwrap();
        }

        let titles: Vec<&str> = store
            .list(&SearchFilter::default())
            .iter()
            .map(|r| r.title.as_str())
            .collect();
        assert_eq!(titles, vec!["one", "two", "three"]);
    }

    #[test]
    fn test_stats_counts_and_top_tags() {
        let mut store = ResourceStore::open_in_memory();
        store
            .add(
                ResourceDraft::new("a", ResourceKind::Article)
                    .with_tags(vec!["rust".into(), "wasm".into()]),
            )
            .unwrap();
        store
            .add(
                ResourceDraft::new("b", ResourceKind::Video)
                    .with_tags(vec!["rust".into()])
                    .with_status(Status::Completed),
            )
            .unwrap();

        let stats = store.stats(5);
        assert_eq!(stats.total, 2);
        assert!(stats.by_kind.contains(&(ResourceKind::Article, 1)));
        assert!(stats.by_kind.contains(&(ResourceKind::Video, 1)));
        assert!(stats.by_status.contains(&(Status::Planned, 1)));
        assert!(stats.by_status.contains(&(Status::Completed, 1)));
        assert_eq!(stats.unique_tags, 2);
        assert_eq!(stats.top_tags[0], ("rust".to_string(), 2));
    }

    #[test]
    fn test_missing_file_is_an_empty_collection() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("learning_db.json");

        let store = ResourceStore::open(&path).unwrap();
        assert!(store.is_empty());
        // Open alone must not create the file
        assert!(!path.exists());
    }

    #[test]
    fn test_persist_then_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("learning_db.json");

        let mut store = ResourceStore::open(&path).unwrap();
        let added = store
            .add(
                sample_draft("persisted")
                    .with_tags(vec!["json".into()])
                    .with_concepts(vec!["serde".into()]),
            )
            .unwrap();
        drop(store);

        let reloaded = ResourceStore::open(&path).unwrap();
        assert_eq!(reloaded.len(), 1);
        let fetched = reloaded.get(added.id).unwrap();
        assert_eq!(fetched.title, "persisted");
        assert_eq!(fetched.tags, vec!["json"]);
        assert_eq!(fetched.concepts, vec!["serde"]);
    }

    #[test]
    fn test_persist_then_reload_empty_collection() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("learning_db.json");

        let mut store = ResourceStore::open(&path).unwrap();
        let added = store.add(sample_draft("temporary")).unwrap();
        store.delete(added.id).unwrap();
        drop(store);

        let reloaded = ResourceStore::open(&path).unwrap();
        assert!(reloaded.is_empty());
    }

    #[test]
    fn test_corrupt_file_surfaces_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("learning_db.json");
        std::fs::write(&path, "not json at all").unwrap();

        assert!(matches!(ResourceStore::open(&path), Err(Error::Json(_))));
    }

    #[test]
    fn test_concept_graph_reflects_current_collection() {
        let mut store = ResourceStore::open_in_memory();
        let added = store
            .add(sample_draft("a").with_concepts(vec!["x".into(), "y".into()]))
            .unwrap();

        assert_eq!(store.concept_graph().weight("x", "y"), 1);

        store.delete(added.id).unwrap();
        assert!(store.concept_graph().is_empty());
    }
}
