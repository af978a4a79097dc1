//! Structured README location.

/// Where a README was found inside a repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadmeDescriptor {
    /// Full repository name in "owner/name" format.
    pub repo_full_name: String,

    /// Branch the README was read from.
    pub branch: String,

    /// Folder containing the README; `None` is the repository root.
    pub folder: Option<String>,

    /// File name without extension (e.g., "README").
    pub base_name: String,

    /// File extension without the dot (e.g., "md").
    pub extension: String,
}

impl ReadmeDescriptor {
    /// Path of the README relative to the repository root.
    ///
    /// `README.md` at the root, `docs/README.md` inside a folder.
    #[must_use]
    pub fn relative_location(&self) -> String {
        match &self.folder {
            Some(folder) => format!("{folder}/{}.{}", self.base_name, self.extension),
            None => format!("{}.{}", self.base_name, self.extension),
        }
    }

    /// Name of the saved file: the owner and repository joined with the
    /// extension by dots, e.g. `owner.repo.md`.
    #[must_use]
    pub fn saved_filename(&self) -> String {
        self.repo_full_name
            .split('/')
            .chain(std::iter::once(self.extension.as_str()))
            .collect::<Vec<_>>()
            .join(".")
    }
}
