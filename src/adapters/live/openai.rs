//! Live adapter for the `OpenAI` Images API.

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

use crate::error::GenError;
use crate::ports::image_generator::{GenerationRequest, ImageGenerator, ImageLocator};

const OPENAI_API_URL: &str = "https://api.openai.com/v1/images/generations";

/// DALL-E 3 parameters, fixed for every request.
const MODEL: &str = "dall-e-3";
const SIZE: &str = "1024x1024";
const QUALITY: &str = "standard";

/// Live generator that calls the `OpenAI` Images API.
pub struct OpenAiGenerator {
    client: Client,
}

impl OpenAiGenerator {
    /// Create a new generator with a fresh HTTP client.
    #[must_use]
    pub fn new() -> Self {
        Self { client: Client::new() }
    }
}

impl Default for OpenAiGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageGenerator for OpenAiGenerator {
    fn generate(&self, request: &GenerationRequest) -> Result<ImageLocator, GenError> {
        let body = GenerationsBody {
            model: MODEL,
            prompt: &request.prompt,
            n: 1,
            size: SIZE,
            quality: QUALITY,
            response_format: "url",
        };

        let response = self
            .client
            .post(OPENAI_API_URL)
            .header("Authorization", format!("Bearer {}", request.api_key))
            .json(&body)
            .send()?;

        let status = response.status();
        let response_text = response.text()?;

        if !status.is_success() {
            return Err(GenError::Api {
                status: status.as_u16(),
                message: extract_api_message(&response_text),
            });
        }

        let parsed: GenerationsResponse = serde_json::from_str(&response_text)
            .map_err(|e| GenError::UnexpectedResponse(format!("Failed to parse response: {e}")))?;

        let url = parsed
            .data
            .into_iter()
            .next()
            .and_then(|item| item.url)
            .ok_or_else(|| GenError::UnexpectedResponse("No image URL in response".into()))?;

        Ok(ImageLocator { url })
    }

    fn fetch(&self, locator: &ImageLocator) -> Result<Vec<u8>, GenError> {
        let response = self.client.get(&locator.url).send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(GenError::Api {
                status: status.as_u16(),
                message: "Failed to download image from URL".into(),
            });
        }

        Ok(response.bytes()?.to_vec())
    }
}

/// Pull the human-readable message out of the `OpenAI` error envelope,
/// falling back to the raw body.
fn extract_api_message(body: &str) -> String {
    #[derive(Deserialize)]
    struct Envelope {
        error: ErrorBody,
    }

    #[derive(Deserialize)]
    struct ErrorBody {
        message: String,
    }

    match serde_json::from_str::<Envelope>(body) {
        Ok(envelope) => envelope.error.message,
        Err(_) => body.to_string(),
    }
}

// --- OpenAI API wire types ---

#[derive(Serialize)]
struct GenerationsBody<'a> {
    model: &'a str,
    prompt: &'a str,
    n: u32,
    size: &'a str,
    quality: &'a str,
    response_format: &'a str,
}

#[derive(Deserialize)]
struct GenerationsResponse {
    data: Vec<GenerationsImageData>,
}

#[derive(Deserialize)]
struct GenerationsImageData {
    #[serde(default)]
    url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_body_shape() {
        let body = GenerationsBody {
            model: MODEL,
            prompt: "a red cube on a white background",
            n: 1,
            size: SIZE,
            quality: QUALITY,
            response_format: "url",
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["model"], "dall-e-3");
        assert_eq!(json["prompt"], "a red cube on a white background");
        assert_eq!(json["n"], 1);
        assert_eq!(json["size"], "1024x1024");
        assert_eq!(json["quality"], "standard");
        assert_eq!(json["response_format"], "url");
    }

    #[test]
    fn response_with_url() {
        let json =
            r#"{"data": [{"url": "https://example.com/img.png", "revised_prompt": "a cube"}]}"#;
        let parsed: GenerationsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.data.len(), 1);
        assert_eq!(parsed.data[0].url.as_deref(), Some("https://example.com/img.png"));
    }

    #[test]
    fn response_without_url_field() {
        let json = r#"{"data": [{"b64_json": "AQID"}]}"#;
        let parsed: GenerationsResponse = serde_json::from_str(json).unwrap();
        assert!(parsed.data[0].url.is_none());
    }

    #[test]
    fn error_envelope_message() {
        let body = r#"{"error": {"message": "Incorrect API key provided: invalid_api_key", "type": "invalid_request_error", "code": "invalid_api_key"}}"#;
        assert_eq!(extract_api_message(body), "Incorrect API key provided: invalid_api_key");
    }

    #[test]
    fn error_fallback_to_raw_body() {
        assert_eq!(extract_api_message("bad gateway"), "bad gateway");
    }
}
