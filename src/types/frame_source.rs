use std::path::{Path, PathBuf};

/// Where the frames of an animation come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameSource {
    /// A single animated image, split into stills by the decomposer.
    Animation(PathBuf),
    /// A directory that already holds one still image per frame.
    Directory(PathBuf),
}

impl FrameSource {
    /// Classifies an existing path. Returns `None` if nothing is there.
    pub fn detect(path: &Path) -> Option<Self> {
        if path.is_dir() {
            Some(Self::Directory(path.to_path_buf()))
        } else if path.exists() {
            Some(Self::Animation(path.to_path_buf()))
        } else {
            None
        }
    }
}
