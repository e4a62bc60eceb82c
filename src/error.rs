// Every variant states *where* things went wrong.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Window init error: {0}")]
    WindowInit(String), // Creating the window failed
    #[error("Window update error: {0}")]
    WindowUpdate(String), // Updating the window buffer failed
    #[error("Camera init error: {0}")]
    CameraInit(String), // Opening/starting the camera failed
    #[error("Camera frame error: {0}")]
    CameraFrame(String), // Grabbing/decoding a frame failed
    #[error("Media error ({location}): {reason}")]
    Media { location: String, reason: String }, // Decoding a clip or still failed
    #[error("Player has no media set")]
    NoMedia,
    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
