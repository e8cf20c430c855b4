//! Utilities for extracting structured data from LLM responses.
//!
//! Providers frequently wrap their JSON in markdown code fences or prepend
//! explanatory text. This module tries the common shapes in order instead
//! of trusting the raw body.

use fresco_error::{BackendError, FrescoResult};

/// Extract JSON from a response that may contain markdown or extra text.
///
/// Strategies, in order:
/// 1. Markdown code blocks: ```json ... ```
/// 2. Balanced braces: { ... }
/// 3. Balanced brackets: [ ... ]
///
/// # Errors
///
/// Returns an error if no JSON-shaped content is found.
///
/// # Examples
///
/// ```
/// use fresco_pipeline::extract_json;
///
/// let response = "Here you go:\n```json\n{\"posts\": []}\n```\n";
/// let json = extract_json(response).unwrap();
/// assert!(json.contains("posts"));
/// ```
pub fn extract_json(response: &str) -> FrescoResult<String> {
    if let Some(json) = extract_from_code_block(response, "json") {
        return Ok(json);
    }

    // Prefer whichever delimiter opens first so an object embedded in an
    // array (or vice versa) comes back whole.
    let bracket_pos = response.find('[');
    let brace_pos = response.find('{');

    let order: [(char, char); 2] = match (bracket_pos, brace_pos) {
        (Some(b), Some(c)) if b < c => [('[', ']'), ('{', '}')],
        _ => [('{', '}'), ('[', ']')],
    };

    for (open, close) in order {
        if let Some(json) = extract_balanced(response, open, close) {
            return Ok(json);
        }
    }

    tracing::error!(
        response_length = response.len(),
        "No JSON found in LLM response"
    );

    Err(BackendError::new(format!(
        "No JSON found in response (length: {})",
        response.len()
    ))
    .into())
}

/// Extract content from markdown code blocks.
fn extract_from_code_block(response: &str, language: &str) -> Option<String> {
    let pattern = format!("```{}", language);

    if let Some(start) = response.find(&pattern) {
        let content_start = start + pattern.len();
        if let Some(end) = response[content_start..].find("```") {
            let content = &response[content_start..content_start + end];
            return Some(content.trim().to_string());
        }
        // No closing fence: likely a truncated response, take the rest
        return Some(response[content_start..].trim().to_string());
    }

    // Fence without a language specifier
    if let Some(start) = response.find("```") {
        let content_start = start + 3;
        let skip_to = response[content_start..]
            .find('\n')
            .map(|n| content_start + n + 1)
            .unwrap_or(content_start);

        if let Some(end) = response[skip_to..].find("```") {
            let content = &response[skip_to..skip_to + end];
            return Some(content.trim().to_string());
        }
        return Some(response[skip_to..].trim().to_string());
    }

    None
}

/// Extract content between balanced delimiters, respecting string escapes.
fn extract_balanced(response: &str, open: char, close: char) -> Option<String> {
    let start = response.find(open)?;
    let mut depth = 0;
    let mut in_string = false;
    let mut escape_next = false;

    for (i, ch) in response[start..].char_indices() {
        if escape_next {
            escape_next = false;
            continue;
        }

        match ch {
            '\\' => escape_next = true,
            '"' => in_string = !in_string,
            c if c == open && !in_string => depth += 1,
            c if c == close && !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Some(response[start..start + i + 1].to_string());
                }
            }
            _ => {}
        }
    }

    None
}

/// Parse validated JSON into a specific type, logging a preview on failure.
///
/// # Errors
///
/// Returns an error if the JSON string cannot be parsed into type `T`.
pub fn parse_json<T>(json_str: &str) -> FrescoResult<T>
where
    T: serde::de::DeserializeOwned,
{
    serde_json::from_str(json_str).map_err(|e| {
        let preview = json_str.chars().take(100).collect::<String>();

        tracing::error!(
            error = %e,
            json_preview = %preview,
            "JSON parsing failed"
        );

        BackendError::new(format!("Failed to parse JSON: {} ({}...)", e, preview)).into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_from_code_block() {
        let response = "Here's the batch you asked for:\n\n```json\n{\n  \"posts\": [{\"title\": \"A\"}]\n}\n```\n\nEnjoy!";
        let json = extract_json(response).unwrap();
        assert!(json.starts_with('{'));
        assert!(json.contains("\"posts\""));
    }

    #[test]
    fn extracts_balanced_braces_from_prose() {
        let response = r#"Sure! {"posts": [], "nested": {"k": "v"}} hope that helps"#;
        let json = extract_json(response).unwrap();
        assert!(json.starts_with('{'));
        assert!(json.ends_with('}'));
        assert!(json.contains("nested"));
    }

    #[test]
    fn extracts_array_when_it_opens_first() {
        let response = "[\n {\"id\": 1},\n {\"id\": 2}\n]";
        let json = extract_json(response).unwrap();
        assert!(json.starts_with('['));
        assert!(json.ends_with(']'));
    }

    #[test]
    fn braces_inside_strings_do_not_close_early() {
        let response = r#"{"text": "curly } inside", "done": true}"#;
        let json = extract_json(response).unwrap();
        assert!(json.ends_with("true}"));
    }

    #[test]
    fn plain_prose_is_an_error() {
        assert!(extract_json("no structured content here").is_err());
    }

    #[test]
    fn unterminated_fence_takes_the_rest() {
        let response = "```json\n{\"posts\": []}";
        let json = extract_json(response).unwrap();
        assert_eq!(json, "{\"posts\": []}");
    }

    #[test]
    fn parse_json_into_struct() {
        use serde::Deserialize;

        #[derive(Deserialize)]
        struct Probe {
            id: i32,
        }

        let probe: Probe = parse_json(r#"{"id": 42}"#).unwrap();
        assert_eq!(probe.id, 42);
        assert!(parse_json::<Probe>("{\"id\": \"nope\"}").is_err());
    }
}
