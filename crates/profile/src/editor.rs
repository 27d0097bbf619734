//! Profile editing over the stored resume document.
//!
//! Edits are staged against an in-memory copy of the JSON document and only
//! hit the store on save. Saving appends a new revision row rather than
//! mutating history; the stamped revision id ties a row back to the editing
//! session that produced it.

use serde_json::Value;
use skillpath_core::{
    push_path, remove_at, set_path, FieldPath, PathError, Profile, RevisionId, SessionId, UserId,
};
use skillpath_store::{ResumeRow, ResumeStore, StoreError};
use tracing::debug;

/// Error type for editor operations.
#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    /// A field path could not be parsed
    #[error(transparent)]
    Path(#[from] PathError),

    /// The underlying store failed
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The user has no stored resume to edit
    #[error("no stored resume for user {0}")]
    NoResume(UserId),
}

/// Result alias for editor operations.
pub type Result<T> = std::result::Result<T, EditorError>;

/// Stages edits to one user's resume document.
#[derive(Debug)]
pub struct ProfileEditor<S: ResumeStore> {
    store: S,
    user_id: UserId,
    session: SessionId,
    document: Value,
    dirty: bool,
}

impl<S: ResumeStore> ProfileEditor<S> {
    /// Load the user's newest resume revision into an editor.
    pub async fn load(store: S, user_id: UserId) -> Result<Self> {
        let row = store
            .latest(&user_id)
            .await?
            .ok_or_else(|| EditorError::NoResume(user_id.clone()))?;
        let session = SessionId::new();
        debug!("Editing session {} opened for {}", session, user_id);
        Ok(Self {
            store,
            user_id,
            session,
            document: row.data,
            dirty: false,
        })
    }

    /// Start an editor over a freshly parsed document that is not stored yet.
    pub fn with_document(store: S, user_id: UserId, document: Value) -> Self {
        let session = SessionId::new();
        debug!("Editing session {} opened for {} (unstored)", session, user_id);
        Self {
            store,
            user_id,
            session,
            document,
            dirty: true,
        }
    }

    /// Identifier of this editing session, for correlating log lines.
    pub fn session_id(&self) -> SessionId {
        self.session
    }

    /// The staged document.
    pub fn document(&self) -> &Value {
        &self.document
    }

    /// Whether the staged document differs from what was loaded.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// The staged document decoded as a typed profile.
    pub fn profile(&self) -> Profile {
        Profile::from_document(&self.document)
    }

    /// Set a field by dotted path, creating intermediate objects as needed.
    pub fn set(&mut self, path: &str, value: Value) -> Result<()> {
        let path = FieldPath::parse(path)?;
        self.document = set_path(&self.document, &path, value);
        self.dirty = true;
        Ok(())
    }

    /// Append an item to the array at a dotted path.
    pub fn push(&mut self, path: &str, item: Value) -> Result<()> {
        let path = FieldPath::parse(path)?;
        self.document = push_path(&self.document, &path, item);
        self.dirty = true;
        Ok(())
    }

    /// Remove the item at `index` from the array at a dotted path.
    ///
    /// Out-of-range indices and non-array targets leave the document as is.
    pub fn remove(&mut self, path: &str, index: usize) -> Result<()> {
        let path = FieldPath::parse(path)?;
        self.document = remove_at(&self.document, &path, index);
        self.dirty = true;
        Ok(())
    }

    /// Append the staged document to the store as a new revision.
    pub async fn save(&mut self) -> Result<ResumeRow> {
        let revision = RevisionId::new();
        let mut document = self.document.clone();
        if let Some(map) = document.as_object_mut() {
            map.insert(
                "revision_id".to_string(),
                Value::String(revision.to_string()),
            );
        }

        debug!(
            "Session {} saving profile revision {} for {}",
            self.session, revision, self.user_id,
        );
        let row = self.store.insert(&self.user_id, document).await?;
        self.document = row.data.clone();
        self.dirty = false;
        Ok(row)
    }
}

/// Record a skill as learned on the user's newest resume revision.
///
/// The skill is appended to `skills.technical` on the latest row in place,
/// without creating a new revision. The append is skipped when an exact
/// (case-sensitive) entry already exists; resume spellings are preserved as
/// the user wrote them.
pub async fn add_completed_skill<S: ResumeStore>(
    store: &mut S,
    user_id: &UserId,
    skill: &str,
) -> Result<bool> {
    let row = store
        .latest(user_id)
        .await?
        .ok_or_else(|| EditorError::NoResume(user_id.clone()))?;

    let existing = row
        .data
        .get("skills")
        .and_then(|skills| skills.get("technical"))
        .and_then(|list| list.as_array());
    if let Some(list) = existing {
        if list.iter().any(|entry| entry.as_str() == Some(skill)) {
            return Ok(false);
        }
    }

    let path = FieldPath::parse("skills.technical")?;
    let updated = push_path(&row.data, &path, Value::String(skill.to_string()));
    store.replace_latest(user_id, updated).await?;
    debug!("Recorded completed skill {:?} for {}", skill, user_id);
    Ok(true)
}
