use serde::{Deserialize, Serialize};

use crate::entity::{validate_name, Entity};
use crate::errors::ModelError;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Tag {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
}

impl Tag {
    pub fn new(name: impl Into<String>) -> Self {
        Self { id: None, name: name.into() }
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        validate_name(Self::KIND, &self.name)
    }
}

impl Entity for Tag {
    const KIND: &'static str = "tag";

    fn id(&self) -> Option<&str> { self.id.as_deref() }

    fn set_id(&mut self, id: String) { self.id = Some(id); }
}
