// ============================================================
// Layer 6 — Tokenizer Store
// ============================================================
// Builds, saves and loads the word-level tokenizer used to turn
// questions into token ids.
//
// The vocabulary is built from the training questions with the
// exact normalizer and pre-tokenizer the saved tokenizer uses
// (BertNormalizer + Whitespace), so every training word gets
// an id and ids line up between training and answering.
//
// Ids are contiguous:
//   0       [PAD]
//   1       [UNK]
//   2..     words, most frequent first, ties alphabetical

use std::{collections::HashMap, fs, path::PathBuf};

use tokenizers::{
    normalizers::bert::BertNormalizer,
    pre_tokenizers::whitespace::Whitespace,
    NormalizedString, Normalizer, OffsetReferential, OffsetType, PreTokenizedString,
    PreTokenizer, Tokenizer,
};

use crate::domain::error::{BotError, Result};

pub const TOKENIZER_FILE: &str = "tokenizer.json";

/// Owns `tokenizer.json` inside a model directory.
pub struct TokenizerStore {
    dir: PathBuf,
}

impl TokenizerStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(TOKENIZER_FILE)
    }

    /// Load a previously saved tokenizer.
    pub fn load(&self) -> Result<Tokenizer> {
        let path = self.path();
        Tokenizer::from_file(&path).map_err(|e| {
            BotError::ModelLoad(format!("cannot load tokenizer '{}': {e}", path.display()))
        })
    }

    /// Build a vocabulary from `texts`, write tokenizer.json and load it back.
    /// At most `max_words` words are kept.
    pub fn build_and_save(&self, texts: &[String], max_words: usize) -> Result<Tokenizer> {
        fs::create_dir_all(&self.dir)?;

        // ── Step 1: count words exactly as the tokenizer will split them ─────
        let mut freq: HashMap<String, usize> = HashMap::new();
        for text in texts {
            for word in split_words(text)? {
                *freq.entry(word).or_insert(0) += 1;
            }
        }

        let mut words: Vec<(String, usize)> = freq.into_iter().collect();
        words.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        words.truncate(max_words);

        // ── Step 2: contiguous ids after the two special tokens ──────────────
        let mut vocab = serde_json::Map::new();
        vocab.insert("[PAD]".into(), serde_json::json!(0));
        vocab.insert("[UNK]".into(), serde_json::json!(1));
        for (word, _) in &words {
            if !vocab.contains_key(word) {
                let id = vocab.len();
                vocab.insert(word.clone(), serde_json::json!(id));
            }
        }
        let vocab_size = vocab.len();

        // ── Step 3: write HuggingFace tokenizer JSON ─────────────────────────
        let tokenizer_json = serde_json::json!({
            "version": "1.0",
            "truncation": null,
            "padding": null,
            "added_tokens": [
                {"id": 0, "content": "[PAD]", "single_word": false, "lstrip": false, "rstrip": false, "normalized": false, "special": true},
                {"id": 1, "content": "[UNK]", "single_word": false, "lstrip": false, "rstrip": false, "normalized": false, "special": true}
            ],
            "normalizer": {
                "type": "BertNormalizer",
                "clean_text": true,
                "handle_chinese_chars": true,
                "strip_accents": false,
                "lowercase": true
            },
            "pre_tokenizer": {
                "type": "Whitespace"
            },
            "post_processor": null,
            "decoder": null,
            "model": {
                "type": "WordLevel",
                "vocab": vocab,
                "unk_token": "[UNK]"
            }
        });

        let path = self.path();
        fs::write(&path, serde_json::to_string_pretty(&tokenizer_json)?)?;

        tracing::info!(
            "Tokenizer built with {} ids, saved to '{}'",
            vocab_size,
            path.display()
        );

        self.load()
    }
}

/// Normalise and pre-tokenize `text` with the same settings as the saved
/// tokenizer and return the resulting words.
pub fn split_words(text: &str) -> Result<Vec<String>> {
    let mut normalized = NormalizedString::from(text);
    BertNormalizer::new(true, true, Some(false), true)
        .normalize(&mut normalized)
        .map_err(|e| BotError::Training(format!("cannot normalise text: {e}")))?;

    let mut pre = PreTokenizedString::from(normalized);
    Whitespace {}
        .pre_tokenize(&mut pre)
        .map_err(|e| BotError::Training(format!("cannot pre-tokenize text: {e}")))?;

    Ok(pre
        .get_splits(OffsetReferential::Original, OffsetType::Byte)
        .into_iter()
        .map(|(word, _, _)| word.to_string())
        .collect())
}

/// Token ids for one question.
pub fn encode_ids(tokenizer: &Tokenizer, text: &str) -> Result<Vec<u32>> {
    let encoding = tokenizer
        .encode(text, false)
        .map_err(|e| BotError::Classification(format!("tokenisation error: {e}")))?;
    Ok(encoding.get_ids().to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus() -> Vec<String> {
        vec![
            "What does third-party insurance cover?".to_string(),
            "Is third-party insurance mandatory?".to_string(),
            "Does body insurance cover theft?".to_string(),
        ]
    }

    #[test]
    fn test_split_words_lowercases_and_splits_punctuation() {
        let words = split_words("Third-Party COVER?").unwrap();
        assert_eq!(words, vec!["third", "-", "party", "cover", "?"]);
    }

    #[test]
    fn test_split_words_handles_non_latin_scripts() {
        let words = split_words("Что покрывает страховка").unwrap();
        assert_eq!(words, vec!["что", "покрывает", "страховка"]);
    }

    #[test]
    fn test_build_and_reload_roundtrip() {
        let dir   = tempfile::tempdir().unwrap();
        let store = TokenizerStore::new(dir.path());
        let built = store.build_and_save(&corpus(), 1000).unwrap();
        let again = store.load().unwrap();

        let a = encode_ids(&built, "third-party insurance").unwrap();
        let b = encode_ids(&again, "third-party insurance").unwrap();
        assert_eq!(a, b);
        // every word was in the training questions, so nothing is [UNK]
        assert!(a.iter().all(|&id| id >= 2));
    }

    #[test]
    fn test_unknown_words_map_to_unk() {
        let dir = tempfile::tempdir().unwrap();
        let tok = TokenizerStore::new(dir.path()).build_and_save(&corpus(), 1000).unwrap();
        assert_eq!(encode_ids(&tok, "zebra").unwrap(), vec![1]);
    }

    #[test]
    fn test_vocabulary_is_capped() {
        let dir = tempfile::tempdir().unwrap();
        let tok = TokenizerStore::new(dir.path()).build_and_save(&corpus(), 3).unwrap();
        assert_eq!(tok.get_vocab_size(true), 5);
    }

    #[test]
    fn test_missing_tokenizer_is_model_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = TokenizerStore::new(dir.path()).load().unwrap_err();
        assert_eq!(err.kind(), crate::domain::error::ErrorKind::ModelLoad);
    }
}
