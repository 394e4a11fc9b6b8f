// src/mirror/path.rs
// =============================================================================
// Splits a resource path into the folder it lives in and its file name.
//
// "catalogue/category/books/index.html"
//     -> directory: "catalogue/category/books"
//     -> file_name: "index.html"
//
// The same split drives both where the file is written locally and which
// directories need to be created first. locate_under() turns it into real
// paths below the destination root and refuses anything that would land
// outside of it.
// =============================================================================

use std::path::{Component, Path, PathBuf};

use crate::error::{MirrorError, Result};

/// A resource path split at its last `/`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitPath {
    /// Everything before the last `/` (empty when there is no `/`)
    pub directory: String,
    /// Everything after the last `/`
    pub file_name: String,
}

// Splits `resource_path` on its last '/'
//
// Errors: InvalidArgument when the path is empty or only whitespace
pub fn split_path(resource_path: &str) -> Result<SplitPath> {
    if resource_path.trim().is_empty() {
        return Err(MirrorError::InvalidArgument(resource_path.to_string()));
    }

    let (directory, file_name) = match resource_path.rsplit_once('/') {
        Some((directory, file_name)) => (directory, file_name),
        None => ("", resource_path),
    };

    Ok(SplitPath {
        directory: directory.to_string(),
        file_name: file_name.to_string(),
    })
}

impl SplitPath {
    // Where this resource lands under `root`: (folder to create, file to write)
    //
    // A leading '/' and "." segments are dropped. A ".." segment or a drive
    // prefix anywhere in the folder is rejected, and so is a file name that
    // isn't a single plain segment (empty, ".", "..").
    pub fn locate_under(&self, root: &Path) -> Result<(PathBuf, PathBuf)> {
        let mut directory = root.to_path_buf();
        for component in Path::new(&self.directory).components() {
            match component {
                Component::Normal(segment) => directory.push(segment),
                Component::RootDir | Component::CurDir => {}
                Component::ParentDir | Component::Prefix(_) => return Err(self.invalid()),
            }
        }

        let mut file_components = Path::new(&self.file_name).components();
        match (file_components.next(), file_components.next()) {
            (Some(Component::Normal(_)), None) => {}
            _ => return Err(self.invalid()),
        }

        let file = directory.join(&self.file_name);
        Ok((directory, file))
    }

    fn invalid(&self) -> MirrorError {
        MirrorError::InvalidArgument(format!("{}/{}", self.directory, self.file_name))
    }
}
