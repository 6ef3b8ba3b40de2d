//! Recursive tree removal
//!
//! A single `unlink`/`rmdir` is not a correct cross-platform "delete
//! recursively": prior deletions may be half done, Windows delays unlinks while
//! handles are open, and other removers race with us. Each branch below maps
//! to one of those failure modes.
//!
//! Absence is the success state at every stage.

use std::fs;
use std::io::{self, ErrorKind};
use std::path::Path;

use tracing::debug;

use crate::domain::value_objects::Platform;

/// Remove `path` and everything below it using the running platform's rules.
///
/// Succeeds silently when `path` does not exist or vanishes concurrently.
pub fn remove_tree(path: &Path) -> io::Result<()> {
    TreeRemover::new(Platform::current()).remove(path)
}

/// How a removal step failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Failure {
    Absent,
    PermissionDenied,
    IsDirectory,
    NotDirectory,
    NotEmpty,
    Other,
}

fn classify(err: &io::Error) -> Failure {
    match err.kind() {
        ErrorKind::NotFound => Failure::Absent,
        ErrorKind::PermissionDenied => Failure::PermissionDenied,
        ErrorKind::IsADirectory => Failure::IsDirectory,
        ErrorKind::NotADirectory => Failure::NotDirectory,
        ErrorKind::DirectoryNotEmpty | ErrorKind::AlreadyExists => Failure::NotEmpty,
        _ => Failure::Other,
    }
}

fn absent_is_ok(result: io::Result<()>) -> io::Result<()> {
    match result {
        Err(e) if classify(&e) == Failure::Absent => Ok(()),
        other => other,
    }
}

/// Tree remover bound to a set of platform capabilities
#[derive(Debug, Clone, Copy)]
pub struct TreeRemover {
    platform: Platform,
}

impl TreeRemover {
    pub fn new(platform: Platform) -> Self {
        Self { platform }
    }

    /// Remove `path` recursively
    pub fn remove(&self, path: &Path) -> io::Result<()> {
        let is_dir = match fs::symlink_metadata(path) {
            Ok(metadata) => metadata.is_dir(),
            Err(e) if classify(&e) == Failure::Absent => return Ok(()),
            // The unlink below reports the real problem.
            Err(_) => false,
        };

        if is_dir {
            return self.remove_dir(path, None);
        }

        let err = match fs::remove_file(path) {
            Ok(()) => return Ok(()),
            Err(e) => e,
        };

        match classify(&err) {
            Failure::Absent => Ok(()),
            Failure::PermissionDenied if self.platform.resets_permissions => {
                self.reset_permissions_and_retry(path, err)
            }
            Failure::PermissionDenied | Failure::IsDirectory => {
                debug!(path = %path.display(), error = %err, "unlink failed, removing as directory");
                self.remove_dir(path, Some(err))
            }
            _ => Err(err),
        }
    }

    /// Remove a directory, emptying it first when needed.
    ///
    /// `cause` is the error that sent us here from the file path; it is the one
    /// reported if `path` turns out not to be a directory after all.
    fn remove_dir(&self, path: &Path, cause: Option<io::Error>) -> io::Result<()> {
        let err = match fs::remove_dir(path) {
            Ok(()) => return Ok(()),
            Err(e) => e,
        };

        match classify(&err) {
            Failure::Absent => Ok(()),
            Failure::NotDirectory => Err(cause.unwrap_or(err)),
            Failure::NotEmpty | Failure::PermissionDenied => self.remove_children(path),
            _ => Err(err),
        }
    }

    fn remove_children(&self, path: &Path) -> io::Result<()> {
        let entries = match fs::read_dir(path) {
            Ok(entries) => entries,
            Err(e) if classify(&e) == Failure::Absent => return Ok(()),
            Err(e) => return Err(e),
        };

        for entry in entries {
            match entry {
                Ok(entry) => self.remove(&entry.path())?,
                Err(e) if classify(&e) == Failure::Absent => continue,
                Err(e) => return Err(e),
            }
        }

        absent_is_ok(fs::remove_dir(path))
    }

    /// Clear the read-only bit and retry (Windows semantics).
    ///
    /// If the reset or the re-stat fails with anything but absence, `cause`
    /// (the original unlink error) is returned.
    fn reset_permissions_and_retry(&self, path: &Path, cause: io::Error) -> io::Result<()> {
        debug!(path = %path.display(), "permission denied, resetting permissions");

        match make_writable(path) {
            Ok(()) => {}
            Err(e) if classify(&e) == Failure::Absent => return Ok(()),
            Err(_) => return Err(cause),
        }

        let metadata = match fs::metadata(path) {
            Ok(metadata) => metadata,
            Err(e) if classify(&e) == Failure::Absent => return Ok(()),
            Err(_) => return Err(cause),
        };

        if metadata.is_dir() {
            self.remove_dir(path, Some(cause))
        } else {
            absent_is_ok(fs::remove_file(path))
        }
    }
}

impl Default for TreeRemover {
    fn default() -> Self {
        Self::new(Platform::current())
    }
}

#[allow(clippy::permissions_set_readonly_false)]
fn make_writable(path: &Path) -> io::Result<()> {
    let mut permissions = fs::symlink_metadata(path)?.permissions();
    permissions.set_readonly(false);
    fs::set_permissions(path, permissions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn build_tree(root: &Path) {
        fs::create_dir_all(root.join("a/b/c")).unwrap();
        fs::create_dir_all(root.join("empty")).unwrap();
        fs::write(root.join("top.txt"), "top").unwrap();
        fs::write(root.join("a/one.txt"), "1").unwrap();
        fs::write(root.join("a/b/c/deep.txt"), "deep").unwrap();
    }

    #[test]
    fn classify_maps_error_kinds() {
        assert_eq!(classify(&ErrorKind::NotFound.into()), Failure::Absent);
        assert_eq!(
            classify(&ErrorKind::PermissionDenied.into()),
            Failure::PermissionDenied
        );
        assert_eq!(classify(&ErrorKind::IsADirectory.into()), Failure::IsDirectory);
        assert_eq!(
            classify(&ErrorKind::NotADirectory.into()),
            Failure::NotDirectory
        );
        assert_eq!(
            classify(&ErrorKind::DirectoryNotEmpty.into()),
            Failure::NotEmpty
        );
        assert_eq!(classify(&ErrorKind::AlreadyExists.into()), Failure::NotEmpty);
        assert_eq!(classify(&ErrorKind::Interrupted.into()), Failure::Other);
    }

    #[test]
    fn removes_missing_path_silently() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("does/not/exist");

        remove_tree(&missing).unwrap();

        assert!(dir.path().exists());
    }

    #[test]
    fn removes_single_file() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("file.txt");
        fs::write(&file, "x").unwrap();

        remove_tree(&file).unwrap();

        assert!(!file.exists());
    }

    #[test]
    fn removes_nested_tree() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("tree");
        build_tree(&root);

        remove_tree(&root).unwrap();

        assert!(!root.exists());
        assert!(dir.path().exists());
    }

    #[test]
    fn removes_empty_directory() {
        let dir = tempdir().unwrap();
        let empty = dir.path().join("empty");
        fs::create_dir(&empty).unwrap();

        remove_tree(&empty).unwrap();

        assert!(!empty.exists());
    }

    #[test]
    fn removes_read_only_file() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("ro.txt");
        fs::write(&file, "x").unwrap();
        let mut perms = fs::metadata(&file).unwrap().permissions();
        perms.set_readonly(true);
        fs::set_permissions(&file, perms).unwrap();

        TreeRemover::new(Platform::current()).remove(&file).unwrap();

        assert!(!file.exists());
    }

    #[test]
    fn removal_is_idempotent() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("tree");
        build_tree(&root);

        remove_tree(&root).unwrap();
        remove_tree(&root).unwrap();

        assert!(!root.exists());
    }

    #[test]
    fn both_platform_capabilities_remove_trees() {
        for platform in [Platform::POSIX, Platform::WINDOWS] {
            let dir = tempdir().unwrap();
            let root = dir.path().join("tree");
            build_tree(&root);

            TreeRemover::new(platform).remove(&root).unwrap();

            assert!(!root.exists(), "tree left behind with {platform:?}");
        }
    }

    #[test]
    fn directory_fallback_on_a_file_reports_the_original_error() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("file.txt");
        fs::write(&file, "x").unwrap();
        let cause = io::Error::new(ErrorKind::PermissionDenied, "unlink denied");

        let err = TreeRemover::new(Platform::POSIX)
            .remove_dir(&file, Some(cause))
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::PermissionDenied);
        assert_eq!(err.to_string(), "unlink denied");
        assert!(file.exists());
    }

    #[test]
    fn directory_fallback_on_missing_path_succeeds() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("gone");

        TreeRemover::new(Platform::POSIX)
            .remove_dir(&missing, Some(ErrorKind::PermissionDenied.into()))
            .unwrap();
    }

    #[test]
    fn reset_permissions_on_missing_path_succeeds() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("gone");

        TreeRemover::new(Platform::WINDOWS)
            .reset_permissions_and_retry(&missing, ErrorKind::PermissionDenied.into())
            .unwrap();
    }

    #[test]
    fn reset_permissions_removes_file_and_directory() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("file.txt");
        let sub = dir.path().join("sub");
        fs::write(&file, "x").unwrap();
        build_tree(&sub);
        let remover = TreeRemover::new(Platform::WINDOWS);

        remover
            .reset_permissions_and_retry(&file, ErrorKind::PermissionDenied.into())
            .unwrap();
        remover
            .reset_permissions_and_retry(&sub, ErrorKind::PermissionDenied.into())
            .unwrap();

        assert!(!file.exists());
        assert!(!sub.exists());
    }

    #[cfg(unix)]
    #[test]
    fn removes_symlink_without_touching_its_target() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("target");
        build_tree(&target);
        let link = dir.path().join("link");
        std::os::unix::fs::symlink(&target, &link).unwrap();

        remove_tree(&link).unwrap();

        assert!(fs::symlink_metadata(&link).is_err());
        assert!(target.join("a/b/c/deep.txt").exists());
    }

    #[cfg(unix)]
    #[test]
    fn removes_tree_containing_symlinks_and_dangling_links() {
        let dir = tempdir().unwrap();
        let outside = dir.path().join("outside");
        fs::create_dir(&outside).unwrap();
        fs::write(outside.join("keep.txt"), "keep").unwrap();

        let root = dir.path().join("tree");
        build_tree(&root);
        std::os::unix::fs::symlink(&outside, root.join("to-outside")).unwrap();
        std::os::unix::fs::symlink(dir.path().join("nowhere"), root.join("dangling")).unwrap();

        remove_tree(&root).unwrap();

        assert!(!root.exists());
        assert!(outside.join("keep.txt").exists());
    }

    #[test]
    fn directory_fallback_empties_a_non_empty_directory() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("tree");
        build_tree(&root);

        TreeRemover::new(Platform::POSIX)
            .remove_dir(&root, Some(ErrorKind::PermissionDenied.into()))
            .unwrap();

        assert!(!root.exists());
    }

    #[cfg(unix)]
    #[test]
    fn read_only_directory_is_removed_with_privileges() {
        use std::os::unix::fs::PermissionsExt;

        if !nix::unistd::geteuid().is_root() {
            return;
        }
        let dir = tempdir().unwrap();
        let root = dir.path().join("tree");
        build_tree(&root);
        fs::set_permissions(root.join("a/b"), fs::Permissions::from_mode(0o555)).unwrap();

        remove_tree(&root).unwrap();

        assert!(!root.exists());
    }

    #[cfg(unix)]
    #[test]
    fn read_only_directory_stops_removal_without_privileges() {
        use std::os::unix::fs::PermissionsExt;

        if nix::unistd::geteuid().is_root() {
            return;
        }
        let dir = tempdir().unwrap();
        let root = dir.path().join("tree");
        build_tree(&root);
        fs::set_permissions(root.join("a/b"), fs::Permissions::from_mode(0o555)).unwrap();

        let err = remove_tree(&root).unwrap_err();
        fs::set_permissions(root.join("a/b"), fs::Permissions::from_mode(0o755)).unwrap();

        assert_eq!(err.kind(), ErrorKind::PermissionDenied);
        // The writable child was emptied; only unlinking it from `a/b` failed.
        assert!(!root.join("a/b/c/deep.txt").exists());
        assert!(root.join("a/b/c").is_dir());
    }
}
