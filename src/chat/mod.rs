//! Query orchestration: detect language, translate into English, look up the
//! knowledge base, translate the answer back.
//!
//! The knowledge base only understands English. Arabic input goes through
//! the translation service in both directions; translation failures fall
//! back to the untranslated text, so a query always produces a reply.

pub mod history;

use std::sync::Arc;

use tracing::{debug, info};

use crate::knowledge::KnowledgeBase;
use crate::lang::{self, Lang};
use crate::translate::TranslationService;

pub use history::{ChatHistory, Role, Turn};

/// Everything produced while answering one query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryOutcome {
    /// Detected input language.
    pub lang: Lang,
    /// Text handed to the knowledge base.
    pub english_query: String,
    /// Knowledge base answer, in English.
    pub english_response: String,
    /// Answer in the user's language.
    pub reply: String,
}

/// Shared, immutable per-process service. Clone freely.
#[derive(Debug, Clone)]
pub struct ChatService {
    knowledge: Arc<KnowledgeBase>,
    translation: TranslationService,
}

impl ChatService {
    pub fn new(knowledge: Arc<KnowledgeBase>, translation: TranslationService) -> Self {
        Self { knowledge, translation }
    }

    pub fn translation(&self) -> &TranslationService {
        &self.translation
    }

    pub async fn handle_query(&self, input: &str) -> QueryOutcome {
        let lang = lang::detect(input);

        let english_query = match lang {
            Lang::Arabic => self.translation.translate(input, Lang::Arabic, Lang::English).await,
            Lang::English => input.to_string(),
        };

        let english_response = self.knowledge.get_answer(&english_query).to_string();

        let reply = match lang {
            Lang::Arabic => {
                self.translation.translate(&english_response, Lang::English, Lang::Arabic).await
            }
            Lang::English => english_response.clone(),
        };

        debug!(%lang, english_query = %english_query, "query handled");
        info!(%lang, query_len = input.len(), reply_len = reply.len(), "answered query");

        QueryOutcome { lang, english_query, english_response, reply }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knowledge::BUILTIN_DEFAULT_ANSWER;
    use crate::translate::providers::dummy::DummyTranslator;
    use crate::translate::{RetryPolicy, Translator};
    use std::time::Duration;

    const KB: &str = r#"{
        "questions": [
            {"keywords": ["opening hours", "hours"], "answer": "We are open 9-5."},
            {"keywords": ["wifi"], "answer": "The password is on your key card."}
        ],
        "default_response": "I don't know"
    }"#;

    fn service(dummy: DummyTranslator) -> ChatService {
        ChatService::new(
            Arc::new(KnowledgeBase::from_json(KB)),
            TranslationService::new(Translator::Dummy(dummy), RetryPolicy::new(3, Duration::ZERO)),
        )
    }

    #[tokio::test]
    async fn english_query_skips_translation() {
        let dummy = DummyTranslator::new();
        let svc = service(dummy.clone());
        let out = svc.handle_query("What are your opening hours?").await;
        assert_eq!(out.lang, Lang::English);
        assert_eq!(out.english_query, "What are your opening hours?");
        assert_eq!(out.english_response, "We are open 9-5.");
        assert_eq!(out.reply, "We are open 9-5.");
        assert_eq!(dummy.calls(), 0);
    }

    #[tokio::test]
    async fn arabic_query_translates_both_ways() {
        let dummy = DummyTranslator::new();
        let svc = service(dummy.clone());
        let out = svc.handle_query("هل يوجد wifi في الغرفة").await;
        assert_eq!(out.lang, Lang::Arabic);
        assert_eq!(out.english_query, "[en] هل يوجد wifi في الغرفة");
        assert_eq!(out.english_response, "The password is on your key card.");
        assert_eq!(out.reply, "[ar] The password is on your key card.");
        assert_eq!(dummy.calls(), 2);
    }

    #[tokio::test]
    async fn arabic_query_survives_translation_outage() {
        let svc = service(DummyTranslator::failing(u32::MAX));
        let out = svc.handle_query("ما هي ساعات العمل").await;
        assert_eq!(out.english_query, "ما هي ساعات العمل");
        assert_eq!(out.english_response, "I don't know");
        assert_eq!(out.reply, "I don't know");
    }

    #[tokio::test]
    async fn empty_knowledge_base_uses_builtin_default() {
        let svc = ChatService::new(
            Arc::new(KnowledgeBase::empty()),
            TranslationService::new(Translator::Dummy(DummyTranslator::new()), RetryPolicy::default()),
        );
        let out = svc.handle_query("anything").await;
        assert_eq!(out.reply, BUILTIN_DEFAULT_ANSWER);
    }
}
