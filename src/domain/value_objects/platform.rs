//! Platform capabilities
//!
//! Queried once for the running OS so platform differences stay in one place.

/// Capabilities of the running platform that change filesystem behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Platform {
    /// A permission-denied unlink may be fixed by clearing the read-only bit
    /// (Windows semantics). Without it, permission errors fall back to
    /// directory removal.
    pub resets_permissions: bool,
}

impl Platform {
    pub const POSIX: Platform = Platform {
        resets_permissions: false,
    };

    pub const WINDOWS: Platform = Platform {
        resets_permissions: true,
    };

    /// Capabilities of the platform this binary runs on
    pub fn current() -> Self {
        if cfg!(windows) {
            Self::WINDOWS
        } else {
            Self::POSIX
        }
    }
}

impl Default for Platform {
    fn default() -> Self {
        Self::current()
    }
}
