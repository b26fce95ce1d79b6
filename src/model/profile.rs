use super::{LanguageModel, preprocess};
use crate::{Error, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

/// Word list for one language. Profile order decides ties.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguageProfile {
    pub language: String,
    pub words: Vec<String>,
}

struct Profile {
    language: String,
    words: HashSet<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Script {
    Latin,
    Greek,
    Cyrillic,
    Arabic,
    Devanagari,
    Tamil,
    Kannada,
    Malayalam,
}

impl Script {
    const NON_LATIN: [Script; 7] = [
        Script::Greek,
        Script::Cyrillic,
        Script::Arabic,
        Script::Devanagari,
        Script::Tamil,
        Script::Kannada,
        Script::Malayalam,
    ];

    fn of(c: char) -> Option<Self> {
        match c {
            '\u{0370}'..='\u{03FF}' | '\u{1F00}'..='\u{1FFF}' => Some(Script::Greek),
            '\u{0400}'..='\u{04FF}' => Some(Script::Cyrillic),
            '\u{0600}'..='\u{06FF}' | '\u{0750}'..='\u{077F}' => Some(Script::Arabic),
            '\u{0900}'..='\u{097F}' => Some(Script::Devanagari),
            '\u{0B80}'..='\u{0BFF}' => Some(Script::Tamil),
            '\u{0C80}'..='\u{0CFF}' => Some(Script::Kannada),
            '\u{0D00}'..='\u{0D7F}' => Some(Script::Malayalam),
            'a'..='z' | 'A'..='Z' | '\u{00C0}'..='\u{024F}' => Some(Script::Latin),
            _ => None,
        }
    }

    fn language(self) -> Option<&'static str> {
        match self {
            Script::Latin => None,
            Script::Greek => Some("Greek"),
            Script::Cyrillic => Some("Russian"),
            Script::Arabic => Some("Arabic"),
            Script::Devanagari => Some("Hindi"),
            Script::Tamil => Some("Tamil"),
            Script::Kannada => Some("Kannada"),
            Script::Malayalam => Some("Malayalam"),
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Lightweight detector: the writing system settles non-Latin text, and
/// Latin text is scored against per-language word profiles.
pub struct ProfileModel {
    version: String,
    fallback: String,
    profiles: Vec<Profile>,
}

impl ProfileModel {
    pub fn new(
        version: impl Into<String>,
        fallback: impl Into<String>,
        profiles: Vec<LanguageProfile>,
    ) -> Result<Self> {
        if profiles.is_empty() {
            return Err(Error::model("at least one language profile is required"));
        }

        let profiles = profiles
            .into_iter()
            .map(|p| Profile {
                language: p.language,
                words: p.words.iter().map(|w| w.to_lowercase()).collect(),
            })
            .collect();

        Ok(Self {
            version: version.into(),
            fallback: fallback.into(),
            profiles,
        })
    }

    pub fn builtin(version: impl Into<String>, fallback: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            fallback: fallback.into(),
            profiles: BUILTIN_PROFILES
                .iter()
                .map(|(language, words)| Profile {
                    language: language.to_string(),
                    words: words.iter().map(|w| w.to_string()).collect(),
                })
                .collect(),
        }
    }

    pub async fn from_file(
        path: &str,
        version: impl Into<String>,
        fallback: impl Into<String>,
    ) -> Result<Self> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| Error::model(format!("cannot read profiles {}: {}", path, e)))?;
        let profiles: Vec<LanguageProfile> = serde_yaml::from_str(&content)?;

        Self::new(version, fallback, profiles)
    }

    pub fn profile_count(&self) -> usize {
        self.profiles.len()
    }

    pub fn classify(&self, text: &str) -> &str {
        let cleaned = preprocess(text);

        if let Some(language) = dominant_script(&cleaned).and_then(Script::language) {
            return language;
        }

        let tokens: Vec<&str> = cleaned
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
            .collect();

        let mut best: Option<(&str, usize)> = None;
        for profile in &self.profiles {
            let score = tokens.iter().filter(|t| profile.words.contains(**t)).count();
            if score > 0 && best.is_none_or(|(_, top)| score > top) {
                best = Some((profile.language.as_str(), score));
            }
        }

        match best {
            Some((language, score)) => {
                debug!("Matched {} with {} profile words", language, score);
                language
            }
            None => &self.fallback,
        }
    }
}

/// Picks the most frequent non-Latin script, provided it outnumbers Latin letters.
fn dominant_script(text: &str) -> Option<Script> {
    let mut counts = [0usize; 8];
    for script in text.chars().filter_map(Script::of) {
        counts[script.index()] += 1;
    }

    let latin = counts[Script::Latin.index()];
    let (script, votes) = Script::NON_LATIN
        .iter()
        .map(|s| (*s, counts[s.index()]))
        .fold((Script::Latin, 0), |best, cur| if cur.1 > best.1 { cur } else { best });

    (votes > latin).then_some(script)
}

#[async_trait]
impl LanguageModel for ProfileModel {
    async fn predict(&self, text: &str) -> Result<String> {
        Ok(self.classify(text).to_string())
    }

    fn version(&self) -> &str {
        &self.version
    }
}

// Order is the tie-break order.
const BUILTIN_PROFILES: &[(&str, &[&str])] = &[
    (
        "English",
        &[
            "the", "and", "is", "are", "was", "were", "of", "to", "in", "that", "it", "you",
            "this", "with", "for", "have", "not", "on", "be", "what", "hello", "world", "my",
            "your", "how", "there", "they", "he", "she", "we", "from", "but", "which", "would",
            "could", "will", "can", "does", "has", "had", "been", "an", "at", "by", "if", "or",
            "all", "about", "just", "like", "good", "morning", "thank", "thanks", "please",
            "yes",
        ],
    ),
    (
        "French",
        &[
            "le", "la", "les", "des", "est", "et", "une", "du", "que", "qui", "dans", "pour",
            "pas", "je", "vous", "nous", "il", "elle", "ce", "cette", "avec", "sur", "mais",
            "ou", "sont", "bonjour", "merci", "au", "aux", "être", "avoir", "très", "monde",
            "oui",
        ],
    ),
    (
        "German",
        &[
            "der", "die", "das", "und", "ist", "nicht", "ein", "eine", "ich", "du", "wir", "sie",
            "es", "mit", "auf", "für", "von", "zu", "den", "dem", "sich", "auch", "aber", "wie",
            "hallo", "welt", "danke", "bitte", "ja", "nein", "guten", "morgen", "sind", "wird",
        ],
    ),
    (
        "Spanish",
        &[
            "el", "los", "las", "y", "en", "del", "por", "con", "para", "hola", "mundo",
            "gracias", "está", "son", "muy", "pero", "como", "yo", "tú", "usted", "este", "esta",
            "sí", "buenos", "días", "porque", "también",
        ],
    ),
    (
        "Italian",
        &[
            "il", "lo", "gli", "di", "che", "è", "sono", "non", "per", "della", "ciao", "grazie",
            "buongiorno", "molto", "anche", "questo", "questa", "io", "lui", "lei", "noi", "voi",
            "ma", "come",
        ],
    ),
    (
        "Portugeese",
        &[
            "o", "os", "não", "são", "uma", "com", "olá", "obrigado", "obrigada", "você",
            "muito", "isso", "eu", "ele", "ela", "nós", "do", "da", "dos", "das", "em", "no",
            "na",
        ],
    ),
    (
        "Dutch",
        &[
            "de", "het", "een", "van", "ik", "je", "niet", "dat", "zijn", "met", "voor", "op",
            "ook", "maar", "wereld", "dank", "bedankt", "goedemorgen", "hoe", "wat", "wij",
            "jullie", "naar", "heb", "heeft",
        ],
    ),
    (
        "Danish",
        &[
            "og", "jeg", "ikke", "af", "meget", "også", "hvad", "hvordan", "tak", "verden",
            "godmorgen", "mig", "dig", "være", "til", "på", "har",
        ],
    ),
    (
        "Sweedish",
        &[
            "och", "jag", "är", "inte", "mycket", "också", "vad", "hur", "tack", "världen",
            "hej", "god", "morgon", "vara", "att",
        ],
    ),
    (
        "Turkish",
        &[
            "ve", "bir", "bu", "için", "ile", "ben", "sen", "biz", "değil", "var", "yok",
            "merhaba", "dünya", "teşekkürler", "teşekkür", "ederim", "günaydın", "nasıl", "ne",
            "çok", "evet", "hayır",
        ],
    ),
];

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn model() -> ProfileModel {
        ProfileModel::builtin("0.1.0", "English")
    }

    #[rstest]
    #[case("Hello World", "English")]
    #[case("What is the weather like in London?", "English")]
    #[case("Bonjour le monde, comment allez-vous?", "French")]
    #[case("Der Hund ist nicht hier", "German")]
    #[case("Hola mundo, ¿cómo está usted?", "Spanish")]
    #[case("Ciao, questo è molto bello", "Italian")]
    #[case("Olá, você está muito bem", "Portugeese")]
    #[case("Ik heb het niet gedaan", "Dutch")]
    #[case("Jeg har ikke tid i dag", "Danish")]
    #[case("Jag är inte hemma och vad gör du", "Sweedish")]
    #[case("Merhaba dünya, nasıl gidiyor", "Turkish")]
    fn detects_latin_languages(#[case] text: &str, #[case] expected: &str) {
        assert_eq!(model().classify(text), expected);
    }

    #[rstest]
    #[case("Καλημέρα κόσμε", "Greek")]
    #[case("Привет, как дела?", "Russian")]
    #[case("مرحبا بالعالم", "Arabic")]
    #[case("नमस्ते दुनिया", "Hindi")]
    #[case("வணக்கம் உலகம்", "Tamil")]
    #[case("ನಮಸ್ಕಾರ ಪ್ರಪಂಚ", "Kannada")]
    #[case("ഹലോ വേൾഡ്", "Malayalam")]
    fn detects_languages_by_script(#[case] text: &str, #[case] expected: &str) {
        assert_eq!(model().classify(text), expected);
    }

    #[test]
    fn mostly_latin_text_with_a_foreign_word_uses_profiles() {
        assert_eq!(model().classify("the word мир means world"), "English");
    }

    #[test]
    fn text_without_evidence_falls_back() {
        let model = ProfileModel::builtin("0.1.0", "Unknown");

        assert_eq!(model.classify(""), "Unknown");
        assert_eq!(model.classify("12345 !!!"), "Unknown");
        assert_eq!(model.classify("xyzzy plugh"), "Unknown");
    }

    #[test]
    fn ties_go_to_the_earlier_profile() {
        let model = ProfileModel::new(
            "test",
            "None",
            vec![
                LanguageProfile {
                    language: "First".to_string(),
                    words: vec!["shared".to_string()],
                },
                LanguageProfile {
                    language: "Second".to_string(),
                    words: vec!["Shared".to_string()],
                },
            ],
        )
        .unwrap();

        assert_eq!(model.classify("shared"), "First");
    }

    #[test]
    fn empty_profile_list_is_rejected() {
        let result = ProfileModel::new("test", "English", vec![]);

        assert!(matches!(result, Err(Error::Model(_))));
    }

    #[tokio::test]
    async fn predict_reports_language_and_version() {
        let model = ProfileModel::builtin("9.9.9", "English");

        assert_eq!(model.predict("Hello World").await.unwrap(), "English");
        assert_eq!(model.version(), "9.9.9");
    }

    #[tokio::test]
    async fn loads_profiles_from_yaml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profiles.yaml");
        tokio::fs::write(
            &path,
            "- language: Klingon\n  words: [qapla, nuqneh]\n- language: English\n  words: [hello]\n",
        )
        .await
        .unwrap();

        let model = ProfileModel::from_file(&path.to_string_lossy(), "1.0.0", "English")
            .await
            .unwrap();

        assert_eq!(model.profile_count(), 2);
        assert_eq!(model.classify("Qapla nuqneh"), "Klingon");
        assert_eq!(model.classify("hello"), "English");
    }

    #[tokio::test]
    async fn missing_profile_file_is_a_model_error() {
        let result =
            ProfileModel::from_file("/nonexistent/profiles.yaml", "1.0.0", "English").await;

        assert!(matches!(result, Err(Error::Model(_))));
    }
}
