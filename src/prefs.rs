//! Persisted panel position
//!
//! The overlay persists exactly one value: the panel's anchor. It is read on
//! the first build and written after every move or clamp that changed it.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::OverlayError;

/// Host preference storage for the panel position
pub trait PositionStore {
    fn load(&self) -> Option<(f32, f32)>;
    fn store(&mut self, position: (f32, f32)) -> Result<(), OverlayError>;
}

/// In-memory store, for hosts without persistence and for tests
#[derive(Debug, Clone, Default)]
pub struct MemoryPositionStore {
    pub position: Option<(f32, f32)>,
    /// Number of writes seen
    pub writes: usize,
}

impl MemoryPositionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_position(x: f32, y: f32) -> Self {
        Self { position: Some((x, y)), writes: 0 }
    }
}

impl PositionStore for MemoryPositionStore {
    fn load(&self) -> Option<(f32, f32)> {
        self.position
    }

    fn store(&mut self, position: (f32, f32)) -> Result<(), OverlayError> {
        self.position = Some(position);
        self.writes += 1;
        Ok(())
    }
}

/// On-disk preference file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct Prefs {
    panel_position: (f32, f32),
}

/// RON file store
#[derive(Debug, Clone)]
pub struct RonPositionStore {
    path: PathBuf,
}

impl RonPositionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store under the user's config directory
    #[cfg(not(target_arch = "wasm32"))]
    pub fn in_config_dir() -> Self {
        let path = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("dotpanel")
            .join("prefs.ron");
        Self::new(path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<Prefs, OverlayError> {
        let text = std::fs::read_to_string(&self.path)?;
        Ok(ron::from_str(&text)?)
    }
}

impl PositionStore for RonPositionStore {
    fn load(&self) -> Option<(f32, f32)> {
        match self.read() {
            Ok(prefs) => Some(prefs.panel_position),
            Err(OverlayError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), "ignoring unreadable prefs: {}", e);
                None
            }
        }
    }

    fn store(&mut self, position: (f32, f32)) -> Result<(), OverlayError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let prefs = Prefs { panel_position: position };
        let text = ron::ser::to_string_pretty(&prefs, ron::ser::PrettyConfig::new())?;
        std::fs::write(&self.path, text)?;
        Ok(())
    }
}
