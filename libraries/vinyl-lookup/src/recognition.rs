//! Record identification from photos via a vision model.

use crate::discogs::{error_for_status, normalize_base_url};
use crate::error::{LookupError, Result};
use crate::types::RecognitionConfig;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use vinyl_core::types::RecognitionGuess;

/// Instructions sent alongside every photo
pub const RECOGNITION_PROMPT: &str = r#"Identify the vinyl record in this photo. Reply with exactly one JSON object and nothing else: no prose, no markdown, no backticks.

{
  "artist": "Artist name",
  "album": "Album title",
  "year": "Release year, only if visible",
  "pressing": "Original/Reissue/Special Edition, if it can be told",
  "condition": "Mint/Near Mint/Very Good/Good/Fair/Poor",
  "conditionNotes": "Short notes on visible wear, scratches or damage",
  "coverCondition": "Condition of the sleeve",
  "confidence": "High/Medium/Low"
}

Pick exactly one of the listed values for condition and put details in conditionNotes. Look for scratches, scuffs, warping, ring wear, seam splits and similar. If the record cannot be identified, say so in the artist field. If the year is not visible, leave it as an empty string instead of guessing."#;

/// Client for the vision messages API.
pub struct RecognitionClient {
    http: Client,
    config: RecognitionConfig,
}

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<Message<'a>>,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'static str,
    content: Vec<ContentPart<'a>>,
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum ContentPart<'a> {
    Image { source: ImageSource<'a> },
    Text { text: &'a str },
}

#[derive(Serialize)]
struct ImageSource<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    media_type: &'a str,
    data: String,
}

#[derive(Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

impl RecognitionClient {
    /// Create a new client with the given configuration.
    pub fn new(config: RecognitionConfig) -> Result<Self> {
        let base_url = normalize_base_url(&config.base_url)?;

        let http = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()?;

        Ok(Self {
            http,
            config: RecognitionConfig {
                base_url,
                ..config
            },
        })
    }

    /// Identify the record shown in `image`.
    ///
    /// Fails without calling the service when the image is empty, the media
    /// type is not an image, or no API key is configured.
    pub async fn recognize(&self, image: &[u8], media_type: &str) -> Result<RecognitionGuess> {
        if image.is_empty() {
            return Err(LookupError::InvalidInput("No image provided".into()));
        }
        if !media_type.starts_with("image/") {
            return Err(LookupError::InvalidInput(format!(
                "Unsupported media type: {}",
                media_type
            )));
        }
        let api_key = self
            .config
            .api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or(LookupError::MissingCredentials("Recognition API key"))?;

        let request = MessagesRequest {
            model: &self.config.model,
            max_tokens: self.config.max_tokens,
            messages: vec![Message {
                role: "user",
                content: vec![
                    ContentPart::Image {
                        source: ImageSource {
                            kind: "base64",
                            media_type,
                            data: STANDARD.encode(image),
                        },
                    },
                    ContentPart::Text {
                        text: RECOGNITION_PROMPT,
                    },
                ],
            }],
        };

        let url = format!("{}/v1/messages", self.config.base_url);
        debug!(url = %url, bytes = image.len(), media_type, "Sending image for recognition");

        let response = self
            .http
            .post(&url)
            .header("x-api-key", api_key)
            .header("anthropic-version", &self.config.api_version)
            .json(&request)
            .send()
            .await?;

        let response = error_for_status(response).await?;
        let body: MessagesResponse = response.json().await.map_err(|e| {
            LookupError::ParseError(format!("Failed to parse recognition response: {}", e))
        })?;

        let guess = parse_guess(&body)?;
        info!(
            artist = %guess.artist,
            album = %guess.album,
            confidence = %guess.confidence,
            "Record recognized"
        );
        Ok(guess)
    }
}

fn parse_guess(body: &MessagesResponse) -> Result<RecognitionGuess> {
    let text = body
        .content
        .iter()
        .filter(|block| block.kind == "text")
        .find_map(|block| block.text.as_deref())
        .ok_or_else(|| LookupError::ParseError("Recognition response has no text".into()))?;

    serde_json::from_str(strip_code_fence(text)).map_err(|e| {
        LookupError::ParseError(format!("Recognition reply is not a valid guess: {}", e))
    })
}

/// Models occasionally wrap JSON in a markdown fence despite instructions
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let inner = inner.strip_prefix("json").unwrap_or(inner);
    inner.strip_suffix("```").unwrap_or(inner).trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response_with_text(text: &str) -> MessagesResponse {
        MessagesResponse {
            content: vec![ContentBlock {
                kind: "text".into(),
                text: Some(text.into()),
            }],
        }
    }

    const GUESS_JSON: &str = r#"{
        "artist": "Pink Floyd",
        "album": "Animals",
        "year": "",
        "pressing": "Original",
        "condition": "Very Good",
        "conditionNotes": "Light scuffs",
        "coverCondition": "Ring wear",
        "confidence": "High"
    }"#;

    #[test]
    fn test_parse_plain_json() {
        let guess = parse_guess(&response_with_text(GUESS_JSON)).unwrap();
        assert_eq!(guess.artist, "Pink Floyd");
        assert_eq!(guess.album, "Animals");
        assert_eq!(guess.year, "");
        assert_eq!(guess.condition_notes, "Light scuffs");
        assert_eq!(guess.cover_condition, "Ring wear");
    }

    #[test]
    fn test_parse_fenced_json() {
        let fenced = format!("```json\n{}\n```", GUESS_JSON);
        let guess = parse_guess(&response_with_text(&fenced)).unwrap();
        assert_eq!(guess.album, "Animals");
    }

    #[test]
    fn test_prose_is_rejected() {
        let result = parse_guess(&response_with_text("I think this is Animals by Pink Floyd."));
        assert!(matches!(result, Err(LookupError::ParseError(_))));
    }

    #[test]
    fn test_missing_required_key_is_rejected() {
        let result = parse_guess(&response_with_text(r#"{"artist": "Pink Floyd"}"#));
        assert!(matches!(result, Err(LookupError::ParseError(_))));
    }

    #[test]
    fn test_no_text_block_is_rejected() {
        let body = MessagesResponse { content: vec![] };
        assert!(matches!(parse_guess(&body), Err(LookupError::ParseError(_))));
    }

    #[test]
    fn test_request_shape() {
        let request = MessagesRequest {
            model: "vision-model",
            max_tokens: 1000,
            messages: vec![Message {
                role: "user",
                content: vec![
                    ContentPart::Image {
                        source: ImageSource {
                            kind: "base64",
                            media_type: "image/jpeg",
                            data: "AAAA".into(),
                        },
                    },
                    ContentPart::Text { text: "prompt" },
                ],
            }],
        };

        let json = serde_json::to_value(&request).unwrap();
        let content = &json["messages"][0]["content"];
        assert_eq!(content[0]["type"], "image");
        assert_eq!(content[0]["source"]["type"], "base64");
        assert_eq!(content[0]["source"]["media_type"], "image/jpeg");
        assert_eq!(content[1]["type"], "text");
        assert_eq!(content[1]["text"], "prompt");
    }
}
