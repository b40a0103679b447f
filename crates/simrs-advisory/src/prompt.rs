//! Prompt construction and the Gemini `generateContent` wire types.

use serde::{Deserialize, Serialize};

use simrs_contracts::{advisory::AdvisoryRequest, error::ServiceUnavailable};

pub const NOTE_SYSTEM_INSTRUCTION: &str = "You are a helpful AI assistant for medical professionals. \
Always prioritize patient safety and data privacy.";

/// Low temperature keeps clinical summaries close to the source note.
pub const NOTE_TEMPERATURE: f32 = 0.2;

// ── Wire types ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
}

impl GenerateContentResponse {
    /// Concatenate the text parts of the first candidate.
    ///
    /// Returns an empty string when there is no candidate or no text.
    pub fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}

fn user_text(text: String) -> Content {
    Content {
        role: Some("user".to_string()),
        parts: vec![Part { text: Some(text) }],
    }
}

// ── Prompts ───────────────────────────────────────────────────────────────────

pub fn note_summary_prompt(note_text: &str) -> String {
    format!(
        "You are an expert medical documentation assistant for a hospital.\n\
         Your task is to summarize the following clinical note into a structured \"After Visit Summary\" format.\n\
         \n\
         Rules:\n\
         1. Use professional medical terminology.\n\
         2. Format the output as Markdown.\n\
         3. Highlight the Diagnosis, Medications, and Follow-up Plan.\n\
         4. Ensure the tone is objective and clinical.\n\
         \n\
         Clinical Note:\n\
         \"{}\"",
        note_text
    )
}

pub fn financial_analysis_prompt(snapshot_json: &str) -> String {
    format!(
        "Analyze the following BLU Hospital financial snapshot.\n\
         Provide a brief executive summary (max 1 paragraph) focusing on liquidity and asset health based on the provided numbers.\n\
         \n\
         Data: {}",
        snapshot_json
    )
}

/// Build the request body for `request`.
///
/// The payload is embedded verbatim: note text as written, the financial
/// snapshot as compact JSON.
pub fn build_request(request: &AdvisoryRequest) -> Result<GenerateContentRequest, ServiceUnavailable> {
    match request {
        AdvisoryRequest::NoteSummary { note_text } => Ok(GenerateContentRequest {
            contents: vec![user_text(note_summary_prompt(note_text))],
            system_instruction: Some(Content {
                role: None,
                parts: vec![Part {
                    text: Some(NOTE_SYSTEM_INSTRUCTION.to_string()),
                }],
            }),
            generation_config: Some(GenerationConfig {
                temperature: NOTE_TEMPERATURE,
            }),
        }),
        AdvisoryRequest::FinancialAnalysis { snapshot } => {
            let json = serde_json::to_string(snapshot).map_err(|e| ServiceUnavailable::Request {
                reason: format!("could not encode financial snapshot: {}", e),
            })?;
            Ok(GenerateContentRequest {
                contents: vec![user_text(financial_analysis_prompt(&json))],
                system_instruction: None,
                generation_config: None,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use simrs_contracts::finance::FinancialSnapshot;

    #[test]
    fn note_request_carries_instruction_and_temperature() {
        let body = build_request(&AdvisoryRequest::NoteSummary {
            note_text: "SpO2 94% room air".to_string(),
        })
        .unwrap();
        let json = serde_json::to_value(&body).unwrap();

        let prompt = json["contents"][0]["parts"][0]["text"].as_str().unwrap();
        assert!(prompt.contains("After Visit Summary"));
        assert!(prompt.contains("\"SpO2 94% room air\""));
        assert_eq!(json["contents"][0]["role"], "user");
        assert!(json["systemInstruction"]["parts"][0]["text"]
            .as_str()
            .unwrap()
            .contains("patient safety"));
        assert!((json["generationConfig"]["temperature"].as_f64().unwrap() - 0.2).abs() < 1e-6);
    }

    #[test]
    fn financial_request_embeds_snapshot_json() {
        let snapshot = FinancialSnapshot {
            receivables: Decimal::from(850_000_000),
            allowance: Decimal::from(137_500_000),
            equity: Decimal::from(10_712_500_000i64),
        };
        let body = build_request(&AdvisoryRequest::FinancialAnalysis { snapshot }).unwrap();
        let json = serde_json::to_value(&body).unwrap();

        let prompt = json["contents"][0]["parts"][0]["text"].as_str().unwrap();
        assert!(prompt.contains("BLU Hospital financial snapshot"));
        assert!(prompt.contains("\"receivables\":850000000"));
        assert!(json.get("systemInstruction").is_none());
        assert!(json.get("generationConfig").is_none());
    }

    #[test]
    fn response_text_joins_first_candidate_parts() {
        let response: GenerateContentResponse = serde_json::from_str(
            r###"{
                "candidates": [
                    {"content": {"role": "model", "parts": [{"text": "## Diagnosis\n"}, {"text": "Pneumonia"}]}},
                    {"content": {"parts": [{"text": "ignored"}]}}
                ]
            }"###,
        )
        .unwrap();
        assert_eq!(response.text(), "## Diagnosis\nPneumonia");
    }

    #[test]
    fn response_without_candidates_is_empty() {
        let response: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(response.text(), "");

        let response: GenerateContentResponse =
            serde_json::from_str(r#"{"candidates": [{"finishReason": "SAFETY"}]}"#).unwrap();
        assert_eq!(response.text(), "");
    }
}
