//! Theme selection and generated-module lookup

use super::schema::{BernovaConfig, ModuleRef, ThemeRecord};
use crate::store::Workspace;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// The generated modules a theme can point at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModuleKind {
    /// Component styles (`theme`)
    Theme,
    /// CSS variables (`foundations`)
    Foundations,
    GlobalStyles,
    /// Breakpoints (`mediaQueries`)
    MediaQueries,
}

impl ModuleKind {
    /// Key of the module in a theme record
    pub fn key(self) -> &'static str {
        match self {
            Self::Theme => "theme",
            Self::Foundations => "foundations",
            Self::GlobalStyles => "globalStyles",
            Self::MediaQueries => "mediaQueries",
        }
    }
}

impl fmt::Display for ModuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Theme resolution error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ResolveError {
    #[error("Theme \"{name}\" not found. Available themes: {}", .available.join(", "))]
    ThemeNotFound { name: String, available: Vec<String> },
    #[error("No themes configured in bernova.config.json")]
    NoThemesConfigured,
    #[error("Theme \"{theme}\" has no {kind} module configured")]
    SubmoduleNotConfigured { theme: String, kind: ModuleKind },
}

impl ThemeRecord {
    /// Module pointer of the given kind, if configured
    pub fn module(&self, kind: ModuleKind) -> Option<&ModuleRef> {
        match kind {
            ModuleKind::Theme => self.theme.as_ref(),
            ModuleKind::Foundations => self.foundations.as_ref(),
            ModuleKind::GlobalStyles => self.global_styles.as_ref(),
            ModuleKind::MediaQueries => self.media_queries.as_ref(),
        }
    }
}

/// Select a theme: exact name match when given, else the first theme.
///
/// A name that matches nothing is an error; it never falls back to another
/// theme.
pub fn resolve_theme<'a>(
    config: &'a BernovaConfig,
    name: Option<&str>,
) -> Result<&'a ThemeRecord, ResolveError> {
    let Some(name) = name else {
        return config.themes.first().ok_or(ResolveError::NoThemesConfigured);
    };

    let mut matches = config.themes.iter().filter(|t| t.name == name);
    let theme = matches.next().ok_or_else(|| ResolveError::ThemeNotFound {
        name: name.to_string(),
        available: config.theme_names(),
    })?;
    if matches.next().is_some() {
        log::warn!("theme \"{}\" is defined more than once, using the first", name);
    }
    Ok(theme)
}

/// A generated module located on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedModule {
    pub kind: ModuleKind,
    /// Name of the owning theme
    pub theme: String,
    /// Aggregate export name
    pub aggregate: String,
    /// Absolute path
    pub path: PathBuf,
}

/// Resolve the module of `kind` for a theme to an absolute path.
pub fn resolve_module(
    workspace: &Workspace,
    config: &BernovaConfig,
    theme_name: Option<&str>,
    kind: ModuleKind,
) -> Result<ResolvedModule, ResolveError> {
    let theme = resolve_theme(config, theme_name)?;
    let module = theme.module(kind).ok_or_else(|| ResolveError::SubmoduleNotConfigured {
        theme: theme.name.clone(),
        kind,
    })?;

    let resolved = ResolvedModule {
        kind,
        theme: theme.name.clone(),
        aggregate: module.name.clone(),
        path: workspace.resolve(&module.path),
    };
    log::debug!(
        "resolved {} module of theme \"{}\" to {}",
        kind,
        resolved.theme,
        resolved.path.display()
    );
    Ok(resolved)
}
