//! Backend target discovery boundary

use std::collections::HashSet;

use url::Url;

use crate::error::RegistryError;
use crate::models::BackendTarget;

/// Resolves the ordered backend target set.
///
/// Supplied externally (static configuration, environment, service
/// discovery); the coordinator only consumes its output and never embeds
/// environment detection itself.
pub trait TargetResolver: Send + Sync {
    /// Resolve the ordered target set, exactly one of which is primary
    fn resolve_targets(&self) -> Result<Vec<BackendTarget>, RegistryError>;
}

/// Fixed target set resolved once from configuration
#[derive(Debug, Clone)]
pub struct StaticTargets {
    targets: Vec<BackendTarget>,
}

impl StaticTargets {
    /// Validate and wrap a configured target list.
    ///
    /// Requires at least one target, unique names, parseable base URLs,
    /// and exactly one primary.
    pub fn new(targets: Vec<BackendTarget>) -> Result<Self, RegistryError> {
        if targets.is_empty() {
            return Err(RegistryError::Empty);
        }

        let mut seen = HashSet::new();
        let mut primary: Option<&str> = None;

        for target in &targets {
            Url::parse(&target.base_url).map_err(|err| RegistryError::InvalidBaseUrl {
                name: target.name.clone(),
                reason: err.to_string(),
            })?;

            if !seen.insert(target.name.as_str()) {
                return Err(RegistryError::DuplicateName(target.name.clone()));
            }

            if target.is_primary {
                match primary {
                    Some(first) => {
                        return Err(RegistryError::MultiplePrimaries(
                            first.to_string(),
                            target.name.clone(),
                        ))
                    }
                    None => primary = Some(&target.name),
                }
            }
        }

        if primary.is_none() {
            return Err(RegistryError::NoPrimary);
        }

        Ok(Self { targets })
    }

    /// The validated targets, in configured order
    pub fn targets(&self) -> &[BackendTarget] {
        &self.targets
    }
}

impl TargetResolver for StaticTargets {
    fn resolve_targets(&self) -> Result<Vec<BackendTarget>, RegistryError> {
        Ok(self.targets.clone())
    }
}
