//! Platform hidden-attribute detection
//!
//! Naming conventions (a leading `.`) are handled by the rule set itself.
//! This module only answers whether the platform flags a path as hidden
//! through file attributes. Failure to query always means "not hidden".

use std::path::Path;
use std::sync::Arc;

/// Capability to query a platform hidden attribute
pub trait HiddenAttribute: Send + Sync + std::fmt::Debug {
    /// Whether the platform reports `path` as hidden
    fn is_hidden(&self, path: &Path) -> bool;
}

/// Fallback for platforms without a hidden attribute
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysVisible;

impl HiddenAttribute for AlwaysVisible {
    fn is_hidden(&self, _path: &Path) -> bool {
        false
    }
}

/// `FILE_ATTRIBUTE_HIDDEN` on Windows
#[cfg(windows)]
#[derive(Debug, Clone, Copy, Default)]
pub struct WindowsAttributes;

#[cfg(windows)]
impl HiddenAttribute for WindowsAttributes {
    fn is_hidden(&self, path: &Path) -> bool {
        use std::os::windows::fs::MetadataExt;

        const FILE_ATTRIBUTE_HIDDEN: u32 = 0x2;

        std::fs::symlink_metadata(path)
            .map(|m| m.file_attributes() & FILE_ATTRIBUTE_HIDDEN != 0)
            .unwrap_or(false)
    }
}

/// `UF_HIDDEN` file flag on macOS (set by `chflags hidden`)
#[cfg(target_os = "macos")]
#[derive(Debug, Clone, Copy, Default)]
pub struct MacFileFlags;

#[cfg(target_os = "macos")]
impl HiddenAttribute for MacFileFlags {
    fn is_hidden(&self, path: &Path) -> bool {
        use std::os::macos::fs::MetadataExt;

        const UF_HIDDEN: u32 = 0x8000;

        std::fs::symlink_metadata(path)
            .map(|m| m.st_flags() & UF_HIDDEN != 0)
            .unwrap_or(false)
    }
}

/// The hidden-attribute check for the current platform
#[cfg(windows)]
pub fn platform_default() -> Arc<dyn HiddenAttribute> {
    Arc::new(WindowsAttributes)
}

/// The hidden-attribute check for the current platform
#[cfg(target_os = "macos")]
pub fn platform_default() -> Arc<dyn HiddenAttribute> {
    Arc::new(MacFileFlags)
}

/// The hidden-attribute check for the current platform
#[cfg(not(any(windows, target_os = "macos")))]
pub fn platform_default() -> Arc<dyn HiddenAttribute> {
    Arc::new(AlwaysVisible)
}
