//! Rule-based scene generation used when the model path fails.
//!
//! Output depends only on the input: the same brief always yields the same
//! plan, draft and edit. Variation between briefs comes from a random
//! generator seeded with a hash of the input text.

mod elements;
mod templates;

pub use elements::{Interaction, Mood, SceneElements, Setting, TimeOfDay, Weather};

use quill_core::{Beat, Brief, Draft, Plan, Provenance};
use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};
use sha2::{Digest, Sha256};
use templates::{CLOSINGS, EXCHANGES, MOVEMENTS, PLACEHOLDER_BEAT, PLACEHOLDER_PROSE};

/// Deterministic, rule-based implementation of every stage.
///
/// Implementations must never fail and must always return non-empty,
/// well-formed output.
pub trait SceneFallback: Send + Sync {
    /// Build a plan from the brief alone.
    fn plan(&self, brief: &Brief) -> Plan;

    /// Write a draft that follows the plan.
    fn write(&self, brief: &Brief, plan: &Plan) -> Draft;

    /// Clean up a draft into final text.
    fn edit(&self, draft: &Draft) -> String;
}

/// Keyword-driven fallback writing Portuguese prose.
///
/// # Examples
///
/// ```
/// use quill_core::Brief;
/// use quill_narrative::{FallbackGenerator, SceneFallback};
///
/// let generator = FallbackGenerator;
/// let brief = Brief::new("Um encontro tenso no MASP entre Ivana e Dr. Manoel");
/// let plan = generator.plan(&brief);
/// assert!(plan.is_well_formed());
/// assert_eq!(plan, generator.plan(&brief));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackGenerator;

impl SceneFallback for FallbackGenerator {
    fn plan(&self, brief: &Brief) -> Plan {
        let elements = SceneElements::from_brief(brief);
        let beats = templates::beats_for(elements.mood)
            .iter()
            .map(|(description, tone)| Beat::new(fill(description, &elements), *tone))
            .collect();
        Plan::new(beats, Provenance::Fallback)
    }

    fn write(&self, brief: &Brief, plan: &Plan) -> Draft {
        let elements = SceneElements::from_brief(brief);
        let mut rng = seeded_rng(&[brief.text(), &plan.render()]);
        let mut paragraphs = Vec::new();

        let opening = [
            pick(&templates::setting_openings(&elements.setting), &mut rng),
            pick(&templates::weather_lines(elements.weather), &mut rng),
        ]
        .map(|template| fill(template, &elements))
        .join(" ");
        paragraphs.push(opening);

        let beats = plan.beats();
        let exchange_at = beats.len() / 2;
        for (index, beat) in beats.iter().enumerate() {
            let movement = index * MOVEMENTS.len() / beats.len();
            let topic = as_sentence(beat.description());
            let follow = fill(pick(&MOVEMENTS[movement], &mut rng), &elements);
            paragraphs.push(format!("{topic} {follow}"));
            if index == exchange_at && elements.characters.len() >= 2 {
                paragraphs.push(fill(pick(&EXCHANGES, &mut rng), &elements));
            }
        }

        if beats.is_empty() {
            paragraphs.push(PLACEHOLDER_PROSE.to_string());
        }
        paragraphs.push(fill(pick(&CLOSINGS, &mut rng), &elements));

        Draft::new(paragraphs.join("\n\n"), Provenance::Fallback)
    }

    fn edit(&self, draft: &Draft) -> String {
        let cleaned = tidy(draft.content());
        if cleaned.is_empty() {
            PLACEHOLDER_PROSE.to_string()
        } else {
            cleaned
        }
    }
}

/// Minimal plan substituted when a stage produced a malformed plan.
pub fn placeholder_plan() -> Plan {
    let (description, tone) = PLACEHOLDER_BEAT;
    Plan::new(vec![Beat::new(description, tone)], Provenance::Fallback)
}

/// Minimal prose substituted when a stage produced empty text.
pub fn placeholder_prose() -> &'static str {
    PLACEHOLDER_PROSE
}

fn seeded_rng(parts: &[&str]) -> StdRng {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part.as_bytes());
        hasher.update([0u8]);
    }
    let digest = hasher.finalize();
    let mut seed = [0u8; 8];
    seed.copy_from_slice(&digest[..8]);
    StdRng::seed_from_u64(u64::from_le_bytes(seed))
}

fn pick<'a>(pool: &[&'a str], rng: &mut StdRng) -> &'a str {
    pool.choose(rng).copied().unwrap_or_default()
}

fn fill(template: &str, elements: &SceneElements) -> String {
    let (first, second) = elements.pair();
    let local = elements.setting.phrase();
    let clima = elements.weather.phrase();
    let filled = template
        .replace("{local_cap}", &capitalize(&local))
        .replace("{local}", &local)
        .replace("{clima_cap}", &capitalize(clima))
        .replace("{clima}", clima)
        .replace("{periodo}", elements.time.phrase())
        .replace("{a}", &first)
        .replace("{b}", &second);
    capitalize(&filled)
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn as_sentence(text: &str) -> String {
    let trimmed = text.trim().trim_end_matches([',', ';', ':']);
    let sentence = capitalize(trimmed);
    if ends_with_terminal(&sentence) {
        sentence
    } else {
        format!("{sentence}.")
    }
}

fn ends_with_terminal(text: &str) -> bool {
    text.ends_with(['.', '!', '?', '…', '"', '”', '»'])
}

/// Whitespace, punctuation spacing, duplicate paragraphs and terminal punctuation.
fn tidy(text: &str) -> String {
    let mut paragraphs: Vec<String> = Vec::new();
    let mut seen: Vec<String> = Vec::new();

    for block in text.split("\n\n") {
        let collapsed = block
            .lines()
            .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join("\n");
        let spaced = collapsed
            .replace(" ,", ",")
            .replace(" .", ".")
            .replace(" !", "!")
            .replace(" ?", "?")
            .replace(" ;", ";")
            .replace(" :", ":");
        let key = spaced.to_lowercase();
        if spaced.is_empty() || seen.contains(&key) {
            continue;
        }
        seen.push(key);
        let paragraph = capitalize(&spaced);
        let paragraph = if ends_with_terminal(&paragraph) {
            paragraph
        } else {
            format!("{paragraph}.")
        };
        paragraphs.push(paragraph);
    }

    paragraphs.join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn masp_brief() -> Brief {
        Brief::new("Escreva um encontro tenso no MASP entre Ivana e Dr. Manoel, noite chuvosa.")
    }

    #[test]
    fn plan_has_six_contextual_beats() {
        let plan = FallbackGenerator.plan(&masp_brief());
        assert_eq!(plan.beats().len(), 6);
        assert_eq!(*plan.provenance(), Provenance::Fallback);
        assert!(plan.is_well_formed());
        assert!(plan.beats()[0].description().contains("MASP"));
        assert!(plan.render().contains("Ivana"));
        assert_eq!(plan.beats()[1].tone(), "tenso");
    }

    #[test]
    fn draft_is_deterministic_and_uses_names() {
        let brief = masp_brief();
        let plan = FallbackGenerator.plan(&brief);
        let first = FallbackGenerator.write(&brief, &plan);
        let second = FallbackGenerator.write(&brief, &plan);
        assert_eq!(first, second);
        assert!(first.content().contains("Ivana"));
        assert!(first.content().contains("Dr. Manoel"));
        assert!(first.content().to_lowercase().contains("chuva"));
        // opening, six beats, one exchange, closing
        assert_eq!(first.content().split("\n\n").count(), 9);
    }

    #[test]
    fn single_character_gets_no_exchange() {
        let brief = Brief::new("Uma cena no café com Lúcia sozinha");
        let plan = FallbackGenerator.plan(&brief);
        let draft = FallbackGenerator.write(&brief, &plan);
        assert_eq!(draft.content().split("\n\n").count(), 8);
    }

    #[test]
    fn empty_plan_still_yields_prose() {
        let brief = Brief::new("cena qualquer");
        let plan = Plan::new(Vec::new(), Provenance::Ai);
        let draft = FallbackGenerator.write(&brief, &plan);
        assert!(draft.is_well_formed());
        assert!(draft.content().contains(PLACEHOLDER_PROSE));
    }

    #[test]
    fn edit_tidies_text() {
        let draft = Draft::new(
            "  a chuva   caía , fria\n\na chuva caía, fria\n\nFim!  ",
            Provenance::Ai,
        );
        assert_eq!(FallbackGenerator.edit(&draft), "A chuva caía, fria.\n\nFim!");
    }

    #[test]
    fn edit_keeps_line_breaks_inside_paragraph() {
        let draft = Draft::new(
            "Ivana olhou a chuva.  \n\"Precisamos   conversar\" , disse ela.\n  Manoel assentiu.",
            Provenance::Ai,
        );
        let edited = FallbackGenerator.edit(&draft);
        assert_eq!(edited.lines().count(), 3);
        assert_eq!(
            edited,
            "Ivana olhou a chuva.\n\"Precisamos conversar\", disse ela.\nManoel assentiu."
        );
    }

    #[test]
    fn edit_never_returns_empty() {
        let draft = Draft::new("   \n\n  ", Provenance::Fallback);
        assert_eq!(FallbackGenerator.edit(&draft), PLACEHOLDER_PROSE);
    }

    #[test]
    fn different_briefs_seed_differently() {
        use rand::Rng;

        let mut a = seeded_rng(&["um"]);
        let mut b = seeded_rng(&["dois"]);
        let left: Vec<u32> = (0..4).map(|_| a.r#gen()).collect();
        let right: Vec<u32> = (0..4).map(|_| b.r#gen()).collect();
        assert_ne!(left, right);
    }
}
