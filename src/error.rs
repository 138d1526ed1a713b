// One error type for the whole tool.
// Every variant states *where* things went wrong.
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    // The uploaded file could not be read or decoded
    #[error("Decode error ({}): {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    // Writing the framed PNG failed
    #[error("Encode error ({}): {source}", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    // A color string that is not #RGB / #RRGGBB
    #[error("Invalid color '{0}': expected #RRGGBB")]
    InvalidColor(String),

    // Creating the preview window failed
    #[error("Window init error: {0}")]
    WindowInit(String),

    // Updating the preview window buffer failed
    #[error("Window update error: {0}")]
    WindowUpdate(String),
}
