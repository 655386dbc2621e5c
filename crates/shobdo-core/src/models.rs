use serde::{Deserialize, Serialize};

/// One dictionary result for a searched word
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationEntry {
    pub english_word: String,
    pub bengali_word: String,
    pub part_of_speech: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pronunciation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example_sentence_english: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example_sentence_bengali: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub synonyms: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub antonyms: Vec<String>,
}

impl TranslationEntry {
    pub fn new(
        english_word: impl Into<String>,
        bengali_word: impl Into<String>,
        part_of_speech: impl Into<String>,
    ) -> Self {
        Self {
            english_word: english_word.into(),
            bengali_word: bengali_word.into(),
            part_of_speech: part_of_speech.into(),
            pronunciation: None,
            example_sentence_english: None,
            example_sentence_bengali: None,
            synonyms: Vec::new(),
            antonyms: Vec::new(),
        }
    }

    /// Example pair, only when at least one side is present
    pub fn example(&self) -> Option<(Option<&str>, Option<&str>)> {
        let english = self.example_sentence_english.as_deref();
        let bengali = self.example_sentence_bengali.as_deref();
        if english.is_none() && bengali.is_none() {
            None
        } else {
            Some((english, bengali))
        }
    }
}

impl From<shobdo_api::GeminiEntry> for TranslationEntry {
    fn from(entry: shobdo_api::GeminiEntry) -> Self {
        // Blank strings from the model mean "not provided"
        fn non_blank(value: Option<String>) -> Option<String> {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        }

        fn clean_list(values: Vec<String>) -> Vec<String> {
            values
                .into_iter()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .collect()
        }

        Self {
            english_word: entry.english_word.trim().to_string(),
            bengali_word: entry.bengali_word.trim().to_string(),
            part_of_speech: entry.part_of_speech.trim().to_string(),
            pronunciation: non_blank(entry.pronunciation),
            example_sentence_english: non_blank(entry.example_sentence_english),
            example_sentence_bengali: non_blank(entry.example_sentence_bengali),
            synonyms: clean_list(entry.synonyms),
            antonyms: clean_list(entry.antonyms),
        }
    }
}
