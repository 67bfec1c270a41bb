use crate::types::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct ThemeFile {
    theme: Theme,
}

/// Light/dark preference backed by a small JSON file.
///
/// Read once at startup; every change is written straight back. There is
/// nothing to tear down.
#[derive(Debug, Clone)]
pub struct ThemeStore {
    path: PathBuf,
    theme: Theme,
}

impl ThemeStore {
    /// Missing or unreadable preference files fall back to the light theme.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let theme = match read_theme(&path) {
            Ok(Some(theme)) => theme,
            Ok(None) => Theme::default(),
            Err(e) => {
                tracing::warn!(
                    target: "theme",
                    path = %path.display(),
                    error = %e.inner,
                    "ignoring unreadable theme preference"
                );
                Theme::default()
            }
        };
        tracing::debug!(target: "theme", ?theme, "theme loaded");
        Self { path, theme }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn is_dark(&self) -> bool {
        self.theme == Theme::Dark
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn set(&mut self, theme: Theme) -> Result<()> {
        let body = serde_json::to_string(&ThemeFile { theme })?;
        fs::write(&self.path, body)?;
        self.theme = theme;
        Ok(())
    }

    pub fn toggle(&mut self) -> Result<Theme> {
        let next = self.theme.toggled();
        self.set(next)?;
        Ok(next)
    }
}

fn read_theme(path: &Path) -> Result<Option<Theme>> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    let file: ThemeFile = serde_json::from_str(&raw)?;
    Ok(Some(file.theme))
}
