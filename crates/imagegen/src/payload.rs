//! Wire types for the text-to-image endpoint.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use fashionsd_core::generation::{
    compose_prompt, CFG_SCALE, DEFAULT_NEGATIVE_PROMPT, SAMPLER, SCHEDULER,
};
use serde::{Deserialize, Serialize};

use crate::client::GenerationRequest;
use crate::error::GenerationError;

/// JSON body sent to the generation endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Txt2ImgPayload {
    pub prompt: String,
    pub negative_prompt: String,
    pub steps: u32,
    pub width: u32,
    pub height: u32,
    pub sampler: &'static str,
    pub cfg_scale: u32,
    pub scheduler: &'static str,
}

impl Txt2ImgPayload {
    /// Compose the styled prompt and attach the fixed negative prompt and
    /// sampler settings. The caller's negative prompt is not forwarded.
    pub fn from_request(request: &GenerationRequest) -> Self {
        Self {
            prompt: compose_prompt(&request.prompt),
            negative_prompt: DEFAULT_NEGATIVE_PROMPT.to_string(),
            steps: request.steps,
            width: request.width,
            height: request.height,
            sampler: SAMPLER,
            cfg_scale: CFG_SCALE,
            scheduler: SCHEDULER,
        }
    }
}

/// JSON body returned by the generation endpoint.
///
/// Other keys (`parameters`, `info`, ...) are ignored.
#[derive(Debug, Deserialize)]
pub struct Txt2ImgResponse {
    #[serde(default)]
    pub images: Vec<String>,
}

impl Txt2ImgResponse {
    /// Parse a raw response body.
    pub fn parse(body: &[u8]) -> Result<Self, GenerationError> {
        serde_json::from_slice(body).map_err(|e| {
            GenerationError::MalformedResponse(format!("response body is not valid JSON: {e}"))
        })
    }

    /// Decode the first image into raw bytes.
    ///
    /// A `data:image/...;base64,` prefix is tolerated.
    pub fn first_image(&self) -> Result<Vec<u8>, GenerationError> {
        let encoded = self.images.first().ok_or_else(|| {
            GenerationError::MalformedResponse("response contained no images".to_string())
        })?;

        let encoded = match encoded.split_once(";base64,") {
            Some((prefix, data)) if prefix.starts_with("data:") => data,
            _ => encoded.as_str(),
        };

        STANDARD.decode(encoded.trim()).map_err(|e| {
            GenerationError::MalformedResponse(format!("image is not valid base64: {e}"))
        })
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn payload_carries_fixed_sampler_settings() {
        let request = GenerationRequest::new("linen trousers");
        let payload = Txt2ImgPayload::from_request(&request);

        assert!(payload.prompt.starts_with("(linen trousers: 1.4)"));
        assert_eq!(payload.negative_prompt, DEFAULT_NEGATIVE_PROMPT);
        assert_eq!(payload.sampler, "DPM++ SDE");
        assert_eq!(payload.scheduler, "Automatic");
        assert_eq!(payload.cfg_scale, 7);
        assert_eq!((payload.width, payload.height, payload.steps), (512, 1024, 20));
    }

    #[test]
    fn payload_ignores_caller_negative_prompt() {
        let mut request = GenerationRequest::new("linen trousers");
        request.negative_prompt = "blurry".to_string();

        let payload = Txt2ImgPayload::from_request(&request);
        assert_eq!(payload.negative_prompt, DEFAULT_NEGATIVE_PROMPT);
    }

    #[test]
    fn payload_serializes_expected_keys() {
        let payload = Txt2ImgPayload::from_request(&GenerationRequest::new("hat"));
        let json = serde_json::to_value(&payload).unwrap();
        let mut keys: Vec<_> = json.as_object().unwrap().keys().cloned().collect();
        keys.sort();
        assert_eq!(
            keys,
            [
                "cfg_scale",
                "height",
                "negative_prompt",
                "prompt",
                "sampler",
                "scheduler",
                "steps",
                "width"
            ]
        );
    }

    #[test]
    fn first_image_decodes_plain_and_data_url_forms() {
        let encoded = STANDARD.encode(b"png-bytes");
        let plain = Txt2ImgResponse {
            images: vec![encoded.clone()],
        };
        assert_eq!(plain.first_image().unwrap(), b"png-bytes");

        let data_url = Txt2ImgResponse {
            images: vec![format!("data:image/png;base64,{encoded}")],
        };
        assert_eq!(data_url.first_image().unwrap(), b"png-bytes");
    }

    #[test]
    fn missing_images_is_malformed() {
        let response = Txt2ImgResponse::parse(br#"{"invalid": "response"}"#).unwrap();
        assert_matches!(
            response.first_image(),
            Err(GenerationError::MalformedResponse(_))
        );
    }

    #[test]
    fn invalid_base64_is_malformed() {
        let response = Txt2ImgResponse {
            images: vec!["***not base64***".to_string()],
        };
        assert_matches!(
            response.first_image(),
            Err(GenerationError::MalformedResponse(_))
        );
    }

    #[test]
    fn non_json_body_is_malformed() {
        assert_matches!(
            Txt2ImgResponse::parse(b"<html>oops</html>"),
            Err(GenerationError::MalformedResponse(_))
        );
    }
}
