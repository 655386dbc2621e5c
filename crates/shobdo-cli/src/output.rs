// Plain-text and JSON rendering of lookup results for the one-shot CLI
use shobdo_core::TranslationEntry;

pub fn entries_to_text(entries: &[TranslationEntry]) -> String {
    entries
        .iter()
        .map(entry_to_text)
        .collect::<Vec<_>>()
        .join("\n")
}

fn entry_to_text(entry: &TranslationEntry) -> String {
    let mut out = format!(
        "{} - {} ({})\n",
        entry.english_word, entry.bengali_word, entry.part_of_speech
    );

    if let Some(pronunciation) = &entry.pronunciation {
        out.push_str(&format!("  Pronunciation: /{}/\n", pronunciation));
    }

    if let Some((english, bengali)) = entry.example() {
        out.push_str("  Example:\n");
        for sentence in [english, bengali].into_iter().flatten() {
            out.push_str(&format!("    {}\n", sentence));
        }
    }

    if !entry.synonyms.is_empty() {
        out.push_str(&format!("  Synonyms: {}\n", entry.synonyms.join(", ")));
    }

    if !entry.antonyms.is_empty() {
        out.push_str(&format!("  Antonyms: {}\n", entry.antonyms.join(", ")));
    }

    out
}

pub fn entries_to_json(entries: &[TranslationEntry]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(entries)
}

pub fn history_to_text(history: &[String]) -> String {
    history
        .iter()
        .enumerate()
        .map(|(i, term)| format!("{:>2}. {}\n", i + 1, term))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_output() {
        let mut entry = TranslationEntry::new("light", "আলো", "noun");
        entry.example_sentence_bengali = Some("আলো জ্বালাও।".to_string());
        entry.antonyms = vec!["dark".to_string()];

        let text = entries_to_text(&[entry]);
        assert_eq!(
            text,
            "light - আলো (noun)\n  Example:\n    আলো জ্বালাও।\n  Antonyms: dark\n"
        );
    }

    #[test]
    fn test_entries_are_separated_by_blank_line() {
        let entries = vec![
            TranslationEntry::new("bank", "ব্যাংক", "noun"),
            TranslationEntry::new("bank", "তীর", "noun"),
        ];
        assert_eq!(
            entries_to_text(&entries),
            "bank - ব্যাংক (noun)\n\nbank - তীর (noun)\n"
        );
    }

    #[test]
    fn test_json_output_is_an_array() {
        let json = entries_to_json(&[TranslationEntry::new("tea", "চা", "noun")]).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed[0]["bengaliWord"], "চা");
    }

    #[test]
    fn test_history_numbering() {
        let history = vec!["HELLO".to_string(), "World".to_string()];
        assert_eq!(history_to_text(&history), " 1. HELLO\n 2. World\n");
    }
}
