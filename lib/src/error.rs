use std::fmt::Display;
use std::path::PathBuf;

/// Error reported when the scene context cannot be set up.
///
/// Construction fails early instead of producing a blank output, so these errors are meant to be
/// shown to the user.
#[derive(Debug)]
pub enum InitError {
    /// The rendering surface could not be acquired.
    Surface(String),
    /// The viewport has a zero dimension.
    Viewport { width: u32, height: u32 },
    /// The camera path needs at least two waypoints.
    Path(usize),
}

impl Display for InitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InitError::Surface(reason) => write!(f, "Cannot acquire the render surface: {reason}"),
            InitError::Viewport { width, height } => {
                write!(f, "Invalid viewport size {width}x{height}")
            }
            InitError::Path(n) => write!(
                f,
                "The camera path requires at least two waypoints, but {n} were given"
            ),
        }
    }
}

impl std::error::Error for InitError {}

/// Error reported for a single texture that failed to load.
///
/// Texture errors never abort the program: the affected material keeps rendering untextured.
#[derive(Debug)]
pub enum TextureError {
    /// The file could not be read.
    Io(PathBuf, std::io::Error),
    /// The file was read but is not a supported image.
    Decode(PathBuf, image::ImageError),
    /// The worker decoding the texture terminated without an answer.
    Cancelled(PathBuf),
}

impl TextureError {
    pub fn path(&self) -> &PathBuf {
        match self {
            TextureError::Io(p, _) => p,
            TextureError::Decode(p, _) => p,
            TextureError::Cancelled(p) => p,
        }
    }
}

impl Display for TextureError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TextureError::Io(p, e) => write!(f, "Failed to read texture {}: {e}", p.display()),
            TextureError::Decode(p, e) => {
                write!(f, "Failed to decode texture {}: {e}", p.display())
            }
            TextureError::Cancelled(p) => {
                write!(f, "Loading of texture {} was cancelled", p.display())
            }
        }
    }
}

impl std::error::Error for TextureError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TextureError::Io(_, e) => Some(e),
            TextureError::Decode(_, e) => Some(e),
            TextureError::Cancelled(_) => None,
        }
    }
}
