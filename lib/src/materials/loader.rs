use super::Texture;
use crate::TextureError;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver, TryRecvError};

/// Loads textures from files contained in a root directory.
#[derive(Debug, Clone)]
pub struct TextureLoader {
    root: PathBuf,
}

/// Outcome of polling a [TextureRequest].
#[derive(Debug)]
pub enum TextureState {
    /// The texture is still being decoded.
    Pending,
    Ready(Texture),
    Failed(TextureError),
}

/// A texture being decoded in background.
///
/// Once [TextureRequest::poll] returns something other than [TextureState::Pending] the request
/// is resolved and should be discarded: polling it again reports it as cancelled.
#[derive(Debug)]
pub struct TextureRequest {
    name: String,
    path: PathBuf,
    receiver: Receiver<Result<Texture, TextureError>>,
}

impl TextureLoader {
    /// Creates a loader resolving texture names relative to `root`.
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        TextureLoader {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the path of the texture with the given name.
    pub fn path(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    /// Loads and decodes a texture, blocking the current thread.
    pub fn load(&self, name: &str) -> Result<Texture, TextureError> {
        decode(name, &self.path(name))
    }

    /// Starts decoding a texture on the rayon thread pool.
    pub fn request(&self, name: &str) -> TextureRequest {
        let (sender, receiver) = channel();
        let path = self.path(name);
        let task_name = name.to_string();
        let task_path = path.clone();
        rayon::spawn(move || {
            let result = decode(&task_name, &task_path);
            // the receiver may be gone if the scene was dropped meanwhile
            let _ = sender.send(result);
        });
        log::debug!("Requested texture {}", path.display());
        TextureRequest {
            name: name.to_string(),
            path,
            receiver,
        }
    }
}

impl TextureRequest {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Checks, without blocking, whether the texture finished loading.
    pub fn poll(&self) -> TextureState {
        match self.receiver.try_recv() {
            Ok(Ok(texture)) => TextureState::Ready(texture),
            Ok(Err(e)) => TextureState::Failed(e),
            Err(TryRecvError::Empty) => TextureState::Pending,
            Err(TryRecvError::Disconnected) => {
                TextureState::Failed(TextureError::Cancelled(self.path.clone()))
            }
        }
    }

    /// Blocks until the texture finished loading.
    pub fn wait(self) -> Result<Texture, TextureError> {
        match self.receiver.recv() {
            Ok(result) => result,
            Err(_) => Err(TextureError::Cancelled(self.path)),
        }
    }
}

fn decode(name: &str, path: &Path) -> Result<Texture, TextureError> {
    let bytes = std::fs::read(path).map_err(|e| TextureError::Io(path.to_path_buf(), e))?;
    let image = image::load_from_memory(&bytes)
        .map_err(|e| TextureError::Decode(path.to_path_buf(), e))?;
    Ok(Texture::from_image(name.to_string(), image))
}
