//! The validated rename request and the identity triple it swaps.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{AppId, AppName, IconRole, Version};

/// The three strings that make up a project's identity in source text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub app_id: AppId,
    pub app_name: AppName,
    /// Usually `app_name.snake_case()`; kept explicit because the template
    /// baseline pins its own value.
    pub snake_name: String,
}

impl Identity {
    /// Identity whose snake name is derived from the display name.
    pub fn new(app_id: AppId, app_name: AppName) -> Self {
        let snake_name = app_name.snake_case();
        Self {
            app_id,
            app_name,
            snake_name,
        }
    }

    pub fn with_snake_name(mut self, snake_name: impl Into<String>) -> Self {
        self.snake_name = snake_name.into();
        self
    }
}

/// Icon images keyed by role, in role order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IconSet(BTreeMap<IconRole, PathBuf>);

impl IconSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, role: IconRole, path: impl Into<PathBuf>) {
        self.0.insert(role, path.into());
    }

    pub fn get(&self, role: IconRole) -> Option<&Path> {
        self.0.get(&role).map(PathBuf::as_path)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (IconRole, &Path)> {
        self.0.iter().map(|(role, path)| (*role, path.as_path()))
    }

    /// Any launcher icon layer (everything except the notification icon).
    pub fn has_launcher_icon(&self) -> bool {
        self.0.keys().any(|role| *role != IconRole::Notification)
    }
}

/// A validated, immutable rename request.
///
/// Only [`crate::domain::InputValidator`] constructs these, so holding one
/// means every field passed validation and every icon was readable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenameSpec {
    pub(crate) old: Identity,
    pub(crate) new: Identity,
    pub(crate) description: Option<String>,
    pub(crate) version: Version,
    pub(crate) icons: IconSet,
}

impl RenameSpec {
    pub fn old(&self) -> &Identity {
        &self.old
    }

    pub fn new_identity(&self) -> &Identity {
        &self.new
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn version(&self) -> &Version {
        &self.version
    }

    pub fn icons(&self) -> &IconSet {
        &self.icons
    }
}
