use std::path::{Path, PathBuf};

use crate::domain::{
    entities::{IconSet, Identity, RenameSpec},
    error::DomainError,
    value_objects::{AppId, AppName, IconRole, Version},
};

/// Unvalidated, user-supplied rename input.
///
/// Field names follow the CLI flags. `old_*` fields are only set for a
/// re-rename; otherwise the configured baseline identity is the "old" side.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRenameInput {
    pub name: Option<String>,
    pub app_id: Option<String>,
    pub description: Option<String>,
    pub version: Option<String>,
    pub icons: Vec<(IconRole, PathBuf)>,
    pub old_app_id: Option<String>,
    pub old_name: Option<String>,
}

impl RawRenameInput {
    pub fn new(name: impl Into<String>, app_id: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            app_id: Some(app_id.into()),
            ..Self::default()
        }
    }

    pub fn with_icon(mut self, role: IconRole, path: impl Into<PathBuf>) -> Self {
        self.icons.push((role, path.into()));
        self
    }
}

/// Turns [`RawRenameInput`] into a [`RenameSpec`].
///
/// Pure apart from the readability predicate, which the caller supplies so
/// the domain never touches the filesystem itself.
pub struct InputValidator;

impl InputValidator {
    pub fn validate(
        input: &RawRenameInput,
        baseline: &Identity,
        is_readable: impl Fn(&Path) -> bool,
    ) -> Result<RenameSpec, DomainError> {
        let name = input
            .name
            .as_deref()
            .ok_or(DomainError::MissingRequiredField { field: "name" })?;
        let app_name = AppName::parse(name)?;

        let app_id = input
            .app_id
            .as_deref()
            .ok_or(DomainError::MissingRequiredField { field: "app-id" })?;
        let app_id = AppId::parse(app_id)?;

        let version = match input.version.as_deref().map(str::trim) {
            Some(v) if !v.is_empty() => Version::parse(v)?,
            _ => Version::default(),
        };

        let old = Self::old_identity(input, baseline)?;

        // Report every unreadable icon, not just the first.
        let missing: Vec<PathBuf> = input
            .icons
            .iter()
            .filter(|(_, path)| !is_readable(path))
            .map(|(_, path)| path.clone())
            .collect();
        if !missing.is_empty() {
            return Err(DomainError::MissingIconFiles { paths: missing });
        }

        let mut icons = IconSet::new();
        for (role, path) in &input.icons {
            icons.insert(*role, path.clone());
        }

        let description = input
            .description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(str::to_string);

        Ok(RenameSpec {
            old,
            new: Identity::new(app_id, app_name),
            description,
            version,
            icons,
        })
    }

    fn old_identity(input: &RawRenameInput, baseline: &Identity) -> Result<Identity, DomainError> {
        let app_id = match input.old_app_id.as_deref() {
            Some(id) => AppId::parse(id)?,
            None => baseline.app_id.clone(),
        };

        match input.old_name.as_deref() {
            Some(name) => Ok(Identity::new(app_id, AppName::parse(name)?)),
            None => Ok(Identity {
                app_id,
                ..baseline.clone()
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn baseline() -> Identity {
        Identity::new(
            AppId::parse("com.example.purplestack").unwrap(),
            AppName::parse("Purplestack").unwrap(),
        )
    }

    fn validate(input: &RawRenameInput) -> Result<RenameSpec, DomainError> {
        InputValidator::validate(input, &baseline(), |_| true)
    }

    #[test]
    fn valid_input_builds_spec() {
        let spec = validate(&RawRenameInput::new("Task Flow", "com.acme.taskflow")).unwrap();
        assert_eq!(spec.new_identity().snake_name, "task_flow");
        assert_eq!(spec.old().snake_name, "purplestack");
        assert_eq!(spec.version().to_string(), "0.1.0");
        assert!(spec.description().is_none());
        assert!(spec.icons().is_empty());
    }

    #[test]
    fn missing_name_is_first_failure() {
        let input = RawRenameInput {
            app_id: Some("1.bad".into()),
            ..RawRenameInput::default()
        };
        assert_eq!(
            validate(&input),
            Err(DomainError::MissingRequiredField { field: "name" })
        );
    }

    #[test]
    fn digit_leading_segment_rejected() {
        let err = validate(&RawRenameInput::new("App", "com.1company.app")).unwrap_err();
        assert_eq!(err.field(), Some("app-id"));
    }

    #[test]
    fn short_version_rejected_build_suffix_accepted() {
        let mut input = RawRenameInput::new("App", "com.acme.app");
        input.version = Some("1.2".into());
        assert!(matches!(
            validate(&input),
            Err(DomainError::InvalidVersion { .. })
        ));

        input.version = Some("1.2.3+4".into());
        assert_eq!(validate(&input).unwrap().version().to_string(), "1.2.3+4");
    }

    #[test]
    fn every_missing_icon_is_reported() {
        let input = RawRenameInput::new("App", "com.acme.app")
            .with_icon(IconRole::Main, "present.png")
            .with_icon(IconRole::AdaptiveForeground, "gone-1.png")
            .with_icon(IconRole::Notification, "gone-2.png");

        let err = InputValidator::validate(&input, &baseline(), |p| p == Path::new("present.png"))
            .unwrap_err();

        assert_eq!(
            err,
            DomainError::MissingIconFiles {
                paths: vec![PathBuf::from("gone-1.png"), PathBuf::from("gone-2.png")],
            }
        );
    }

    #[test]
    fn blank_description_is_dropped() {
        let mut input = RawRenameInput::new("App", "com.acme.app");
        input.description = Some("   ".into());
        assert!(validate(&input).unwrap().description().is_none());
    }

    #[test]
    fn re_rename_uses_previous_identity() {
        let mut input = RawRenameInput::new("Second", "com.acme.second");
        input.old_app_id = Some("com.acme.taskflow".into());
        input.old_name = Some("Task Flow".into());

        let spec = validate(&input).unwrap();
        assert_eq!(spec.old().app_id.as_str(), "com.acme.taskflow");
        assert_eq!(spec.old().snake_name, "task_flow");
    }

    #[test]
    fn invalid_old_app_id_rejected() {
        let mut input = RawRenameInput::new("App", "com.acme.app");
        input.old_app_id = Some("Com.acme".into());
        assert!(validate(&input).is_err());
    }
}
