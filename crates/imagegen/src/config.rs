use std::path::PathBuf;

/// Where the generation service lives and where generated images go.
#[derive(Debug, Clone)]
pub struct GenerationConfig {
    /// Base HTTP URL of the generation service, without a trailing slash.
    pub base_url: String,
    /// Path of the text-to-image endpoint, starting with `/`.
    pub endpoint_path: String,
    /// Directory generated images are written to.
    pub output_dir: PathBuf,
}

impl GenerationConfig {
    /// Build a config, normalising slashes so `endpoint_url` never doubles
    /// or drops a separator.
    pub fn new(
        base_url: impl Into<String>,
        endpoint_path: impl Into<String>,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let endpoint_path = endpoint_path.into();
        let endpoint_path = if endpoint_path.starts_with('/') {
            endpoint_path
        } else {
            format!("/{endpoint_path}")
        };
        Self {
            base_url,
            endpoint_path,
            output_dir: output_dir.into(),
        }
    }

    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                    | Default                 |
    /// |----------------------------|-------------------------|
    /// | `GENERATION_BASE_URL`      | `http://127.0.0.1:7860` |
    /// | `GENERATION_ENDPOINT_PATH` | `/generate`             |
    /// | `IMAGE_OUTPUT_DIR`         | `static/images`         |
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("GENERATION_BASE_URL").unwrap_or_else(|_| "http://127.0.0.1:7860".into());
        let endpoint_path =
            std::env::var("GENERATION_ENDPOINT_PATH").unwrap_or_else(|_| "/generate".into());
        let output_dir =
            std::env::var("IMAGE_OUTPUT_DIR").unwrap_or_else(|_| "static/images".into());

        Self::new(base_url, endpoint_path, output_dir)
    }

    /// Full URL of the text-to-image endpoint.
    pub fn endpoint_url(&self) -> String {
        format!("{}{}", self.base_url, self.endpoint_path)
    }
}
