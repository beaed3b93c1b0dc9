//! Where the game keeps its journal and status files.

use std::env;
use std::path::{Path, PathBuf};

/// Journal directory below the Windows user profile.
const SAVED_GAMES_SUBDIR: &str = "Saved Games/Frontier Developments/Elite Dangerous/";

/// Host operating system, as far as journal discovery cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostOs {
    /// The game runs here; journals live under the user profile.
    Windows,
    /// Anything else; journals are expected in the working directory.
    Other,
}

impl HostOs {
    /// The OS this binary was built for.
    #[must_use]
    pub const fn current() -> Self {
        if cfg!(windows) { Self::Windows } else { Self::Other }
    }
}

/// Journal directory for `os`, given the value of `USERPROFILE`.
#[must_use]
pub fn journal_dir(os: HostOs, user_profile: Option<&str>) -> PathBuf {
    match (os, user_profile) {
        (HostOs::Windows, Some(profile)) => Path::new(profile).join(SAVED_GAMES_SUBDIR),
        _ => PathBuf::from("./"),
    }
}

/// Journal directory for the running host.
#[must_use]
pub fn default_journal_dir() -> PathBuf {
    journal_dir(HostOs::current(), env::var("USERPROFILE").ok().as_deref())
}

/// The files the journal watcher reads and writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JournalFiles {
    /// Directory holding all of them.
    pub dir: PathBuf,
    /// Name of the current star system.
    pub current_system: PathBuf,
    /// Name of the plotted target system (empty when none).
    pub plotted_system: PathBuf,
    /// The game's live status file.
    pub status: PathBuf,
}

impl JournalFiles {
    /// File layout inside `dir`.
    #[must_use]
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        Self {
            current_system: dir.join("system_name.txt"),
            plotted_system: dir.join("plotted_system.txt"),
            status: dir.join("Status.json"),
            dir,
        }
    }

    /// The text files the watcher maintains.
    #[must_use]
    pub fn text_files(&self) -> [&Path; 2] {
        [self.current_system.as_path(), self.plotted_system.as_path()]
    }
}

impl Default for JournalFiles {
    fn default() -> Self {
        Self::in_dir(default_journal_dir())
    }
}
