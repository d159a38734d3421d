use serde::{de::DeserializeOwned, Serialize};

/// A record stored one-per-file, keyed by a string id that doubles as the
/// file name stem.
pub trait Entity: Serialize + DeserializeOwned + Clone + PartialEq + Send + Sync + 'static {
    /// Human readable kind, used in logs and error messages.
    const KIND: &'static str;

    fn id(&self) -> Option<&str>;

    fn set_id(&mut self, id: String);

    /// An empty id is treated the same as a missing one.
    fn has_id(&self) -> bool {
        self.id().is_some_and(|id| !id.is_empty())
    }
}

/// Shared check for the `Name` field of categories and tags.
pub(crate) fn validate_name(kind: &str, name: &str) -> Result<(), crate::errors::ModelError> {
    if name.trim().is_empty() {
        return Err(crate::errors::ModelError::Validation(format!("{kind} name required")));
    }
    Ok(())
}
