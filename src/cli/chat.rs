// ============================================================
// Layer 1 — Console Chat Loop
// ============================================================
// Reads one question per line and writes one answer per line.
// Blank lines are ignored; `exit`, `quit` or EOF end the loop.
// A failed question is reported on the error stream and the
// loop moves on; no answer text is written for it.

use std::io::{BufRead, Write};

use anyhow::Result;

use crate::application::ask_use_case::FaqBot;
use crate::domain::faq_record::Reply;
use crate::domain::traits::{AnswerRepository, Classifier};

/// Returns how many questions were answered.
pub fn run_chat<C, R>(
    bot:    &FaqBot<C, R>,
    input:  impl BufRead,
    mut out: impl Write,
    mut err: impl Write,
    json:   bool,
) -> Result<usize>
where
    C: Classifier,
    R: AnswerRepository,
{
    let mut answered = 0usize;

    for line in input.lines() {
        let line     = line?;
        let question = line.trim();
        if question.is_empty() {
            continue;
        }
        if question.eq_ignore_ascii_case("exit") || question.eq_ignore_ascii_case("quit") {
            break;
        }

        match bot.reply(question) {
            Ok(reply) => {
                write_reply(&mut out, &reply, json)?;
                answered += 1;
            }
            Err(e) => writeln!(err, "error: {e}")?,
        }
        out.flush()?;
    }

    Ok(answered)
}

pub fn write_reply(out: &mut impl Write, reply: &Reply, json: bool) -> Result<()> {
    if json {
        writeln!(out, "{}", serde_json::to_string(reply)?)?;
    } else {
        writeln!(out, "{}", reply.answer)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::{BotError, Result as BotResult};
    use crate::domain::faq_record::{NewFaqRecord, Prediction, DEFAULT_FALLBACK_ANSWER};
    use crate::infra::memory_repository::InMemoryFaqRepository;

    /// Picks the label whose name appears in the question, else "Other".
    struct KeywordClassifier {
        labels: Vec<String>,
    }

    impl Classifier for KeywordClassifier {
        fn classify(&self, text: &str) -> BotResult<Prediction> {
            let lower = text.to_lowercase();
            let label = self
                .labels
                .iter()
                .find(|l| lower.contains(&l.to_lowercase()))
                .cloned()
                .unwrap_or_else(|| "Other".to_string());
            Ok(Prediction::new(label, 1.0))
        }

        fn labels(&self) -> &[String] {
            &self.labels
        }
    }

    fn bot() -> FaqBot<KeywordClassifier, InMemoryFaqRepository> {
        let classifier = KeywordClassifier { labels: vec!["Body".into(), "Other".into(), "Third".into()] };
        let repo = InMemoryFaqRepository::from_records([
            NewFaqRecord::new("Third", "", "third answer"),
            NewFaqRecord::new("Body", "", "body answer"),
        ]);
        FaqBot::new(classifier, repo, DEFAULT_FALLBACK_ANSWER)
    }

    #[test]
    fn test_answers_each_line_until_exit() {
        let input = "third party?\n\n  body damage \nunrelated\nexit\nthird again\n";
        let mut out = Vec::new();
        let mut err = Vec::new();

        let n = run_chat(&bot(), input.as_bytes(), &mut out, &mut err, false).unwrap();

        assert_eq!(n, 3);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "third answer\nbody answer\nNo suitable answer found.\n"
        );
        assert!(err.is_empty());
    }

    /// Storage that is down for one category and fine for the rest.
    struct BrokenFor {
        category: &'static str,
        inner:    InMemoryFaqRepository,
    }

    impl AnswerRepository for BrokenFor {
        fn find_answer(&self, category: &str) -> BotResult<Option<String>> {
            if category == self.category {
                return Err(BotError::Storage(rusqlite::Error::InvalidQuery));
            }
            self.inner.find_answer(category)
        }
    }

    #[test]
    fn test_storage_failure_prints_no_answer_and_continues() {
        let classifier = KeywordClassifier { labels: vec!["Body".into(), "Third".into()] };
        let repo = BrokenFor {
            category: "Body",
            inner:    InMemoryFaqRepository::from_records([
                NewFaqRecord::new("Third", "", "third answer"),
                NewFaqRecord::new("Body", "", "body answer"),
            ]),
        };
        let bot = FaqBot::new(classifier, repo, DEFAULT_FALLBACK_ANSWER);

        let mut out = Vec::new();
        let mut err = Vec::new();
        let input = "body damage\nthird party\n";
        let n = run_chat(&bot, input.as_bytes(), &mut out, &mut err, false).unwrap();

        assert_eq!(n, 1);
        let out = String::from_utf8(out).unwrap();
        assert_eq!(out, "third answer\n");
        assert!(!out.contains("body answer"));
        assert!(!out.contains(DEFAULT_FALLBACK_ANSWER));

        let err = String::from_utf8(err).unwrap();
        assert!(err.starts_with("error:"), "{err}");
        assert_eq!(err.lines().count(), 1);
    }

    #[test]
    fn test_json_lines() {
        let mut out = Vec::new();
        run_chat(&bot(), "body\n".as_bytes(), &mut out, Vec::new(), true).unwrap();
        let reply: Reply = serde_json::from_slice(&out).unwrap();
        assert_eq!(reply.category, "Body");
        assert!(reply.matched);
    }
}
