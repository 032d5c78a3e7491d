//! Platform detection and native directory helpers.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Web,
    Desktop,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(target_arch = "wasm32") {
            Self::Web
        } else {
            Self::Desktop
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Platform::Web => "web",
            Platform::Desktop => "desktop",
        }
    }
}

/// Application data directory on native targets.
#[cfg(not(target_arch = "wasm32"))]
pub fn data_dir() -> Result<std::path::PathBuf, String> {
    let dirs = directories::ProjectDirs::from("org", "LL97", "LL97 Emissions")
        .ok_or("Unable to determine data directory")?;
    Ok(dirs.data_dir().to_path_buf())
}

/// Where generated reports are written on native targets.
#[cfg(not(target_arch = "wasm32"))]
pub fn reports_dir() -> Result<std::path::PathBuf, String> {
    Ok(data_dir()?.join("reports"))
}
