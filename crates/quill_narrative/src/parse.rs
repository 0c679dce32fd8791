//! Turning raw model text into stage outputs.

use quill_core::{Beat, FailureCause, StageFailure};
use regex::Regex;
use std::sync::LazyLock;

/// Upper bound on beats kept from one response.
pub const MAX_BEATS: usize = 12;

static BEAT_LINE: LazyLock<Result<Regex, regex::Error>> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(?:[-*•]\s*|\d+[.)]\s*)?(?:\*\*)?(?:beat|batida)\s*\d*\s*(?:\*\*)?\s*:\s*(?:\*\*)?\s*(?P<body>.*)$")
});

const PROSE_LABELS: [&str; 6] = ["VERSÃO FINAL", "VERSAO FINAL", "FINAL", "CENA", "SCENE", "TEXTO"];

/// Parse `BEAT: description | tone` lines.
///
/// Lines that do not match are ignored. A missing tone falls back to
/// `default_tone`. Zero beats is a parse failure.
pub fn parse_beats(raw: &str, default_tone: &str) -> Result<Vec<Beat>, StageFailure> {
    let pattern = BEAT_LINE
        .as_ref()
        .map_err(|e| StageFailure::new(FailureCause::ParseError, e.to_string()))?;

    let beats: Vec<Beat> = raw
        .lines()
        .filter_map(|line| pattern.captures(line))
        .filter_map(|captures| {
            let body = captures.name("body")?.as_str();
            let (description, tone) = match body.rsplit_once('|') {
                Some((description, tone)) => (description, strip_tone_label(tone)),
                None => (body, ""),
            };
            let description = description.replace("**", "");
            let description = description.trim();
            if description.is_empty() {
                return None;
            }
            let tone = if tone.trim().is_empty() {
                default_tone
            } else {
                tone.trim()
            };
            Some(Beat::new(description, tone))
        })
        .take(MAX_BEATS)
        .collect();

    if beats.is_empty() {
        Err(StageFailure::new(
            FailureCause::ParseError,
            "response contained no BEAT lines",
        ))
    } else {
        Ok(beats)
    }
}

fn strip_tone_label(tone: &str) -> &str {
    let trimmed = tone.trim().trim_matches('*').trim();
    for label in ["tom:", "tone:"] {
        if let Some(head) = trimmed.get(..label.len()) {
            if head.eq_ignore_ascii_case(label) {
                return trimmed[label.len()..].trim();
            }
        }
    }
    trimmed
}

/// Clean prose: drop code fences and a leading label, require `min_chars`.
pub fn parse_prose(raw: &str, min_chars: usize) -> Result<String, StageFailure> {
    let text = strip_label(strip_fences(raw.trim())).trim().to_string();
    let length = text.chars().count();
    if length < min_chars {
        return Err(StageFailure::new(
            FailureCause::ParseError,
            format!("response too short: {length} characters, need {min_chars}"),
        ));
    }
    Ok(text)
}

fn strip_fences(text: &str) -> &str {
    if !text.starts_with("```") {
        return text;
    }
    let body = text.split_once('\n').map(|(_, rest)| rest).unwrap_or("");
    body.trim_end().strip_suffix("```").unwrap_or(body)
}

fn strip_label(text: &str) -> &str {
    let trimmed = text.trim_start();
    let (first_line, rest) = trimmed.split_once('\n').unwrap_or((trimmed, ""));
    let bare = first_line.trim_start_matches(['*', '#']).trim_start();
    let upper = bare.to_uppercase();

    for label in PROSE_LABELS {
        if !upper.starts_with(label) {
            continue;
        }
        let Some(after) = bare.get(label.len()..) else {
            continue;
        };
        let after = after.trim_start_matches(['*', ' ']);
        if after.trim().is_empty() || after.trim_end().trim_end_matches(['*', ' ']) == ":" {
            return rest;
        }
        if let Some(inline) = after.strip_prefix(':') {
            let inline = inline.trim_start_matches(['*', ' ']);
            return &trimmed[first_line.len() - inline.len()..];
        }
    }
    trimmed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_beats() {
        let beats = parse_beats(
            "BEAT: Ivana chega ao MASP | tenso\nBEAT: Manoel aparece | frio",
            "neutro",
        )
        .unwrap();
        assert_eq!(beats.len(), 2);
        assert_eq!(beats[0].description(), "Ivana chega ao MASP");
        assert_eq!(beats[1].tone(), "frio");
    }

    #[test]
    fn tolerates_markdown_and_numbering() {
        let raw = "Aqui está o plano:\n1. **BEAT 1:** Chuva forte | Tom: sombrio\n- batida: Encontro\n* Beat: | vazio";
        let beats = parse_beats(raw, "tenso").unwrap();
        assert_eq!(beats.len(), 2);
        assert_eq!(beats[0].description(), "Chuva forte");
        assert_eq!(beats[0].tone(), "sombrio");
        assert_eq!(beats[1].tone(), "tenso");
    }

    #[test]
    fn no_beats_is_parse_error() {
        let failure = parse_beats("Era uma vez uma cena.", "neutro").unwrap_err();
        assert_eq!(*failure.cause(), FailureCause::ParseError);
    }

    #[test]
    fn keeps_at_most_twelve_beats() {
        let raw = (0..20)
            .map(|i| format!("BEAT: passo {i} | calmo"))
            .collect::<Vec<_>>()
            .join("\n");
        assert_eq!(parse_beats(&raw, "neutro").unwrap().len(), MAX_BEATS);
    }

    #[test]
    fn prose_drops_fence_and_label() {
        let raw = "```\nCENA:\nA chuva caía sobre a Paulista enquanto Ivana esperava em silêncio.\n```";
        assert_eq!(
            parse_prose(raw, 20).unwrap(),
            "A chuva caía sobre a Paulista enquanto Ivana esperava em silêncio."
        );
    }

    #[test]
    fn prose_label_on_same_line() {
        let raw = "VERSÃO FINAL: A chuva caía sobre a Paulista.";
        assert_eq!(parse_prose(raw, 10).unwrap(), "A chuva caía sobre a Paulista.");
    }

    #[test]
    fn prose_label_on_same_line_keeps_following_lines() {
        let raw = "**CENA:** A chuva caía.  \nIvana esperou.\n\nManoel chegou tarde.";
        assert_eq!(
            parse_prose(raw, 10).unwrap(),
            "A chuva caía.  \nIvana esperou.\n\nManoel chegou tarde."
        );
    }

    #[test]
    fn short_prose_is_parse_error() {
        let failure = parse_prose("Ok.", 50).unwrap_err();
        assert_eq!(*failure.cause(), FailureCause::ParseError);
    }
}
