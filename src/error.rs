/*
 * Error Module
 *
 * Configuration problems are the only failures the engine reports. Running out
 * of memory for the grid or the shadow buffer aborts the process, and
 * coincident boids are handled locally by the force model.
 */

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    /// A parameter combination the engine cannot run with.
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),

    #[error("world must have positive finite extent, got {width}x{height}")]
    InvalidWorld { width: f32, height: f32 },

    #[error("failed to read config file {}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
