//! Startup errors
//!
//! The simulation itself never fails; only bringing up the page and the GPU
//! can. These errors are logged and written into the loading element.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum InitError {
    #[error("No browser window")]
    NoWindow,
    #[error("No document")]
    NoDocument,
    #[error("Missing element #{0}")]
    MissingElement(&'static str),
    #[error("Element #{0} is not a canvas")]
    NotACanvas(&'static str),
    #[error("Failed to create surface: {0}")]
    SurfaceCreation(String),
    #[error("Failed to get adapter: {0}")]
    AdapterNotFound(String),
    #[error("Failed to create device: {0}")]
    DeviceCreation(String),
    #[error("Surface has no supported formats")]
    NoSurfaceFormat,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_problem() {
        assert_eq!(
            InitError::MissingElement("canvas").to_string(),
            "Missing element #canvas"
        );
        assert_eq!(
            InitError::DeviceCreation("lost".into()).to_string(),
            "Failed to create device: lost"
        );
    }
}
