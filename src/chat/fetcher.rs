//! Gemini `generateContent` worker.

use crate::chat::types::{
    ChatChannels, ChatCommand, ChatConfig, ChatResult, EMPTY_REPLY, TRANSMISSION_ERROR,
};
use anyhow::{Context, Result};
use bevy::log::{error, warn};
use serde::{Deserialize, Serialize};
use std::sync::{
    Arc, Mutex,
    mpsc::{self},
};
use std::thread;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    system_instruction: Content<'a>,
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

pub fn start_chat_worker(config: ChatConfig) -> ChatChannels {
    let (cmd_tx, cmd_rx) = mpsc::channel::<ChatCommand>();
    let (res_tx, res_rx) = mpsc::channel::<ChatResult>();

    thread::spawn(move || {
        let rt = match tokio::runtime::Runtime::new() {
            Ok(rt) => rt,
            Err(err) => {
                error!("[CHAT] failed to start tokio runtime: {}", err);
                return;
            }
        };
        rt.block_on(async move {
            let client = reqwest::Client::new();

            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    ChatCommand::Ask { request_id, prompt } => {
                        let outcome = ask(&client, &config, &prompt).await;
                        if let Err(err) = &outcome {
                            warn!("[CHAT] request {} failed: {:#}", request_id, err);
                        }
                        let _ = res_tx.send(ChatResult {
                            request_id,
                            text: reply_text(outcome),
                        });
                    }
                }
            }
        });
    });

    ChatChannels {
        cmd_tx,
        res_rx: Arc::new(Mutex::new(res_rx)),
    }
}

/// Maps a request outcome to what the chat window shows.
pub fn reply_text(outcome: Result<String>) -> String {
    match outcome {
        Ok(text) if !text.trim().is_empty() => text,
        Ok(_) => EMPTY_REPLY.to_string(),
        Err(_) => TRANSMISSION_ERROR.to_string(),
    }
}

pub fn build_generate_url(config: &ChatConfig) -> Result<String> {
    let key = config
        .api_key
        .as_deref()
        .context("no chat API key configured")?;
    let mut url = reqwest::Url::parse(&format!(
        "{}/models/{}:generateContent",
        config.base_url.trim_end_matches('/'),
        config.model
    ))
    .with_context(|| format!("invalid chat base url {}", config.base_url))?;
    url.query_pairs_mut().append_pair("key", key);
    Ok(url.to_string())
}

/// Request body: the fixed system instruction plus a single user turn.
/// Earlier turns are not sent.
pub fn build_request_body(config: &ChatConfig, prompt: &str) -> Result<String> {
    let request = GenerateRequest {
        system_instruction: Content {
            role: None,
            parts: vec![Part {
                text: &config.system_instruction,
            }],
        },
        contents: vec![Content {
            role: Some("user"),
            parts: vec![Part { text: prompt }],
        }],
    };
    Ok(serde_json::to_string(&request)?)
}

async fn ask(client: &reqwest::Client, config: &ChatConfig, prompt: &str) -> Result<String> {
    let url = build_generate_url(config)?;
    let body = build_request_body(config, prompt)?;
    let resp = client
        .post(url)
        .header(reqwest::header::CONTENT_TYPE, "application/json")
        .body(body)
        .send()
        .await?;
    let status = resp.status();
    let text = resp.text().await?;
    if !status.is_success() {
        anyhow::bail!("HTTP {} from chat model", status);
    }
    parse_reply(&text)
}

/// Concatenated text of the first candidate; empty if there is none.
pub fn parse_reply(body: &str) -> Result<String> {
    let response: GenerateResponse =
        serde_json::from_str(body).context("malformed chat response")?;
    let text = response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect::<String>()
        })
        .unwrap_or_default();
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_key() -> ChatConfig {
        ChatConfig {
            api_key: Some("k3y".to_string()),
            ..ChatConfig::default()
        }
    }

    #[test]
    fn parses_candidate_text() {
        let body = r#"{"candidates":[{"content":{"role":"model","parts":[{"text":"Apophis is "},{"text":"an asteroid."}]}}]}"#;
        assert_eq!(parse_reply(body).unwrap(), "Apophis is an asteroid.");
    }

    #[test]
    fn no_candidates_is_empty_text() {
        assert_eq!(parse_reply(r#"{"candidates":[]}"#).unwrap(), "");
        assert_eq!(parse_reply("{}").unwrap(), "");
        assert_eq!(
            parse_reply(r#"{"candidates":[{"finishReason":"SAFETY"}]}"#).unwrap(),
            ""
        );
    }

    #[test]
    fn fallbacks() {
        assert_eq!(reply_text(Ok("Hello".into())), "Hello");
        assert_eq!(reply_text(Ok("  ".into())), EMPTY_REPLY);
        assert_eq!(
            reply_text(Err(anyhow::anyhow!("timeout"))),
            TRANSMISSION_ERROR
        );
        assert!(parse_reply("not json").is_err());
    }

    #[test]
    fn url_carries_model_and_key() {
        let url = build_generate_url(&config_with_key()).unwrap();
        assert_eq!(
            url,
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-3-flash-preview:generateContent?key=k3y"
        );
        assert!(build_generate_url(&ChatConfig::default()).is_err());
    }

    #[test]
    fn request_body_shape() {
        let body = build_request_body(&config_with_key(), "What is a NEO?").unwrap();
        let value: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(value["contents"][0]["role"], "user");
        assert_eq!(value["contents"][0]["parts"][0]["text"], "What is a NEO?");
        assert!(
            value["systemInstruction"]["parts"][0]["text"]
                .as_str()
                .unwrap()
                .starts_with("You are an expert astronomer")
        );
        assert!(value["systemInstruction"].get("role").is_none());
    }
}
