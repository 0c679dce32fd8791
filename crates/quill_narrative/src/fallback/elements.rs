//! Brief analysis for the rule-based fallback.
//!
//! Keywords are matched on whole words of the accent-folded, lowercased
//! brief, so "diálogo" never counts as "dia".

use quill_core::Brief;

/// Where the scene happens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Setting {
    /// Museu de Arte de São Paulo
    Masp,
    /// Old library
    Library,
    /// Busy café
    Cafe,
    /// Subway station
    Subway,
    /// Beach
    Beach,
    /// Hospital
    Hospital,
    /// City park
    Park,
    /// Somebody's apartment or house
    Home,
    /// Location given verbatim by a hint
    Named(String),
    /// Nothing detected
    Unspecified,
}

impl Setting {
    /// Noun phrase with article, ready to drop into a sentence.
    pub fn phrase(&self) -> String {
        match self {
            Self::Masp => "o MASP".to_string(),
            Self::Library => "a biblioteca antiga".to_string(),
            Self::Cafe => "o café".to_string(),
            Self::Subway => "a estação de metrô".to_string(),
            Self::Beach => "a praia".to_string(),
            Self::Hospital => "o corredor do hospital".to_string(),
            Self::Park => "o parque".to_string(),
            Self::Home => "o apartamento".to_string(),
            Self::Named(name) => name.clone(),
            Self::Unspecified => "o lugar combinado".to_string(),
        }
    }

    /// Label used in plan summaries.
    pub fn label(&self) -> String {
        match self {
            Self::Masp => "MASP - Museu de Arte de São Paulo".to_string(),
            Self::Unspecified => "local a definir".to_string(),
            other => other.phrase(),
        }
    }
}

/// Emotional register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mood {
    /// Tense
    Tense,
    /// Suspense or mystery
    Suspense,
    /// Emotional, intimate
    Emotional,
    /// Action
    Action,
    /// Romantic
    Romantic,
    /// Nothing detected
    Neutral,
}

impl Mood {
    /// Portuguese tone label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Tense => "tenso",
            Self::Suspense => "suspense",
            Self::Emotional => "emotivo",
            Self::Action => "ação",
            Self::Romantic => "romântico",
            Self::Neutral => "neutro",
        }
    }

    fn from_label(label: &str) -> Self {
        let folded = fold(label);
        let tokens = words(&folded);
        detect_mood(&tokens).unwrap_or(Self::Neutral)
    }
}

/// Time of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeOfDay {
    /// Night
    Night,
    /// Morning
    Morning,
    /// Afternoon
    Afternoon,
    /// Daytime
    Day,
    /// Nothing detected
    Unspecified,
}

impl TimeOfDay {
    /// Adverbial phrase ("naquela noite").
    pub fn phrase(self) -> &'static str {
        match self {
            Self::Night => "naquela noite",
            Self::Morning => "naquela manhã",
            Self::Afternoon => "naquela tarde",
            Self::Day => "em pleno dia",
            Self::Unspecified => "naquele momento",
        }
    }
}

/// Weather.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Weather {
    /// Rain
    Rain,
    /// Sunshine
    Sun,
    /// Fog
    Fog,
    /// Nothing detected
    Unspecified,
}

impl Weather {
    /// Noun phrase with article.
    pub fn phrase(self) -> &'static str {
        match self {
            Self::Rain => "a chuva",
            Self::Sun => "o sol forte",
            Self::Fog => "a neblina",
            Self::Unspecified => "o silêncio",
        }
    }
}

/// What the characters do together.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interaction {
    /// A meeting
    Meeting,
    /// An argument
    Argument,
    /// A conversation
    Dialogue,
    /// Nothing detected
    Unspecified,
}

/// Narrative elements extracted from a brief.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneElements {
    /// Where
    pub setting: Setting,
    /// Register
    pub mood: Mood,
    /// When
    pub time: TimeOfDay,
    /// Weather
    pub weather: Weather,
    /// What kind of exchange
    pub interaction: Interaction,
    /// Named characters, in order of appearance
    pub characters: Vec<String>,
}

const MAX_CHARACTERS: usize = 4;
const TITLES: [&str; 6] = ["dr.", "dra.", "sr.", "sra.", "prof.", "profa."];
const NOT_NAMES: [&str; 8] = [
    "São", "Rio", "Avenida", "Rua", "Paulista", "Museu", "Estação", "Praça",
];

impl SceneElements {
    /// Analyse a brief. Hints override detected values.
    pub fn from_brief(brief: &Brief) -> Self {
        let folded = fold(brief.text());
        let tokens = words(&folded);
        let hints = brief.hints();

        let setting = match hints.location() {
            Some(location) if !location.trim().is_empty() => {
                detect_setting(&words(&fold(location)))
                    .unwrap_or_else(|| Setting::Named(location.trim().to_string()))
            }
            _ => detect_setting(&tokens).unwrap_or(Setting::Unspecified),
        };

        let mood = match hints.mood() {
            Some(mood) if !mood.trim().is_empty() => Mood::from_label(mood),
            _ => detect_mood(&tokens).unwrap_or(Mood::Neutral),
        };

        let characters = if hints.characters().is_empty() {
            extract_names(brief.text())
        } else {
            hints
                .characters()
                .iter()
                .map(|name| name.trim().to_string())
                .filter(|name| !name.is_empty())
                .take(MAX_CHARACTERS)
                .collect()
        };

        Self {
            setting,
            mood,
            time: detect_time(&tokens),
            weather: detect_weather(&tokens),
            interaction: detect_interaction(&tokens),
            characters,
        }
    }

    /// First and second character, or neutral stand-ins.
    pub fn pair(&self) -> (String, String) {
        let first = self
            .characters
            .first()
            .cloned()
            .unwrap_or_else(|| "alguém".to_string());
        let second = self
            .characters
            .get(1)
            .cloned()
            .unwrap_or_else(|| "outra pessoa".to_string());
        (first, second)
    }
}

/// Lowercase and strip Portuguese diacritics.
pub(crate) fn fold(text: &str) -> String {
    text.chars()
        .flat_map(char::to_lowercase)
        .map(|c| match c {
            'á' | 'à' | 'â' | 'ã' | 'ä' => 'a',
            'é' | 'è' | 'ê' | 'ë' => 'e',
            'í' | 'ì' | 'î' | 'ï' => 'i',
            'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
            'ú' | 'ù' | 'û' | 'ü' => 'u',
            'ç' => 'c',
            other => other,
        })
        .collect()
}

fn words(folded: &str) -> Vec<&str> {
    folded
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect()
}

fn has_any(words: &[&str], exact: &[&str], prefixes: &[&str]) -> bool {
    words
        .iter()
        .any(|w| exact.contains(w) || prefixes.iter().any(|p| w.starts_with(p)))
}

fn detect_setting(words: &[&str]) -> Option<Setting> {
    if has_any(words, &["masp"], &[]) {
        Some(Setting::Masp)
    } else if has_any(words, &[], &["bibliotec"]) {
        Some(Setting::Library)
    } else if has_any(words, &["cafe", "cafeteria", "padaria"], &[]) {
        Some(Setting::Cafe)
    } else if has_any(words, &["metro"], &["estacao"]) {
        Some(Setting::Subway)
    } else if has_any(words, &["praia"], &[]) {
        Some(Setting::Beach)
    } else if has_any(words, &[], &["hospita"]) {
        Some(Setting::Hospital)
    } else if has_any(words, &["parque", "praca"], &[]) {
        Some(Setting::Park)
    } else if has_any(words, &["casa", "apartamento", "sala", "cozinha"], &[]) {
        Some(Setting::Home)
    } else {
        None
    }
}

fn detect_mood(words: &[&str]) -> Option<Mood> {
    if has_any(words, &["tenso", "tensa", "tensao"], &[]) {
        Some(Mood::Tense)
    } else if has_any(words, &["suspense"], &["misteri"]) {
        Some(Mood::Suspense)
    } else if has_any(words, &["triste"], &["emoti", "emocion"]) {
        Some(Mood::Emotional)
    } else if has_any(words, &["acao", "luta", "fuga"], &["persegui"]) {
        Some(Mood::Action)
    } else if has_any(words, &["romance"], &["romantic"]) {
        Some(Mood::Romantic)
    } else {
        None
    }
}

fn detect_time(words: &[&str]) -> TimeOfDay {
    if has_any(words, &["noite", "madrugada"], &["notur"]) {
        TimeOfDay::Night
    } else if has_any(words, &["manha", "amanhecer"], &[]) {
        TimeOfDay::Morning
    } else if has_any(words, &["tarde", "entardecer"], &[]) {
        TimeOfDay::Afternoon
    } else if has_any(words, &["dia"], &[]) {
        TimeOfDay::Day
    } else {
        TimeOfDay::Unspecified
    }
}

fn detect_weather(words: &[&str]) -> Weather {
    if has_any(words, &["garoa", "tempestade"], &["chuv"]) {
        Weather::Rain
    } else if has_any(words, &["sol"], &["ensolarad"]) {
        Weather::Sun
    } else if has_any(words, &["neblina", "nevoa", "nevoeiro"], &[]) {
        Weather::Fog
    } else {
        Weather::Unspecified
    }
}

fn detect_interaction(words: &[&str]) -> Interaction {
    if has_any(words, &["encontro", "reencontro"], &[]) {
        Interaction::Meeting
    } else if has_any(words, &["briga"], &["discuss", "discut"]) {
        Interaction::Argument
    } else if has_any(words, &["dialogo", "conversa"], &[]) {
        Interaction::Dialogue
    } else {
        Interaction::Unspecified
    }
}

fn trim_token(token: &str) -> &str {
    token.trim_matches(|c: char| !c.is_alphanumeric() && c != '.')
}

fn is_title(token: &str) -> bool {
    TITLES.contains(&trim_token(token).to_lowercase().as_str())
}

fn is_name(token: &str) -> bool {
    let word = token.trim_matches(|c: char| !c.is_alphanumeric());
    let mut chars = word.chars();
    let starts_upper = chars.next().is_some_and(char::is_uppercase);
    starts_upper && chars.any(char::is_lowercase) && !NOT_NAMES.contains(&word)
}

fn ends_sentence(token: &str) -> bool {
    token.ends_with(['.', '!', '?'])
}

/// Capitalized names not at a sentence start, titles joined to the next name.
pub(crate) fn extract_names(text: &str) -> Vec<String> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    let mut names: Vec<String> = Vec::new();
    let mut sentence_start = true;
    let mut index = 0;

    while index < tokens.len() && names.len() < MAX_CHARACTERS {
        let token = tokens[index];

        if is_title(token) {
            if let Some(next) = tokens.get(index + 1).filter(|next| is_name(next)) {
                let name = format!(
                    "{} {}",
                    trim_token(token),
                    next.trim_matches(|c: char| !c.is_alphanumeric())
                );
                if !names.contains(&name) {
                    names.push(name);
                }
                sentence_start = ends_sentence(next);
                index += 2;
                continue;
            }
        } else if !sentence_start && is_name(token) {
            let name = token
                .trim_matches(|c: char| !c.is_alphanumeric())
                .to_string();
            if !names.contains(&name) {
                names.push(name);
            }
        }

        sentence_start = ends_sentence(token);
        index += 1;
    }

    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use quill_core::BriefHints;

    #[test]
    fn masp_brief_is_fully_detected() {
        let brief = Brief::new(
            "Escreva um encontro tenso no MASP entre Ivana e Dr. Manoel, noite chuvosa.",
        );
        let elements = SceneElements::from_brief(&brief);
        assert_eq!(elements.setting, Setting::Masp);
        assert_eq!(elements.mood, Mood::Tense);
        assert_eq!(elements.time, TimeOfDay::Night);
        assert_eq!(elements.weather, Weather::Rain);
        assert_eq!(elements.interaction, Interaction::Meeting);
        assert_eq!(elements.characters, vec!["Ivana", "Dr. Manoel"]);
    }

    #[test]
    fn dialogo_does_not_count_as_daytime() {
        let brief = Brief::new("Um diálogo emotivo na biblioteca");
        let elements = SceneElements::from_brief(&brief);
        assert_eq!(elements.time, TimeOfDay::Unspecified);
        assert_eq!(elements.interaction, Interaction::Dialogue);
        assert_eq!(elements.setting, Setting::Library);
        assert_eq!(elements.mood, Mood::Emotional);
    }

    #[test]
    fn hints_override_detection() {
        let brief = Brief::new("Uma cena no café").with_hints(
            BriefHints::default()
                .with_location("Terraço Itália")
                .with_character("Lúcia")
                .with_mood("ação"),
        );
        let elements = SceneElements::from_brief(&brief);
        assert_eq!(elements.setting, Setting::Named("Terraço Itália".to_string()));
        assert_eq!(elements.mood, Mood::Action);
        assert_eq!(elements.characters, vec!["Lúcia"]);
    }

    #[test]
    fn location_hint_is_matched_against_known_settings() {
        let brief = Brief::new("Uma conversa no café, à noite")
            .with_hints(BriefHints::default().with_location("Biblioteca Mário de Andrade"));
        let elements = SceneElements::from_brief(&brief);
        assert_eq!(elements.setting, Setting::Library);
        assert_eq!(elements.time, TimeOfDay::Night);
        assert_eq!(elements.interaction, Interaction::Dialogue);
    }

    #[test]
    fn sentence_initial_words_are_not_names() {
        assert_eq!(
            extract_names("Chove. Marta espera Jorge na Avenida Paulista."),
            vec!["Jorge"]
        );
        assert!(extract_names("").is_empty());
    }

    #[test]
    fn title_at_sentence_start_still_joins() {
        assert_eq!(
            extract_names("Dra. Helena recebe Caio no hospital."),
            vec!["Dra. Helena", "Caio"]
        );
    }
}
