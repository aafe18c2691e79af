/// Errors from a generation round-trip.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    /// The HTTP request itself failed (connection refused, DNS, TLS, body stream).
    #[error("Failed to generate image: {0}")]
    Transport(#[from] reqwest::Error),

    /// The generation service returned a non-2xx status code.
    #[error("Failed to generate image: service returned {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The service answered but the body did not carry a usable image.
    #[error("Error during image generation: {0}")]
    MalformedResponse(String),

    /// The decoded image could not be written to the output directory.
    #[error("Error during image generation: could not write image: {0}")]
    Io(#[from] std::io::Error),
}

impl GenerationError {
    /// Whether the failure happened before a response body was accepted.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Status { .. })
    }
}
