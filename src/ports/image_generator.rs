//! Image generator port for AI image generation APIs.

use crate::error::GenError;

/// A request to generate one image.
///
/// Both fields are taken verbatim from the input fields; nothing is
/// validated locally. A bad key or prompt comes back as a rejection from
/// the remote service.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    /// API key used to authenticate against the service.
    pub api_key: String,
    /// The text prompt describing the desired image.
    pub prompt: String,
}

/// Reference to a generated image, resolved by a second fetch step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageLocator {
    /// URL the image bytes can be downloaded from.
    pub url: String,
}

/// Generates images from text prompts via an external API.
///
/// Both operations block; callers run them off the UI thread.
pub trait ImageGenerator: Send + Sync {
    /// Submit the prompt and obtain a locator for the generated image.
    ///
    /// # Errors
    ///
    /// Returns an error if the service rejects the request or the
    /// transport fails.
    fn generate(&self, request: &GenerationRequest) -> Result<ImageLocator, GenError>;

    /// Download the raw image bytes behind a locator.
    ///
    /// # Errors
    ///
    /// Returns an error on a non-success response or transport failure.
    fn fetch(&self, locator: &ImageLocator) -> Result<Vec<u8>, GenError>;
}
