//! Knowledge base behaviour through the public API, from definition files.

use std::io::Write;
use std::path::Path;

use qabot::knowledge::{BUILTIN_DEFAULT_ANSWER, EXACT_MATCH_SCORE, KnowledgeBase};
use tempfile::NamedTempFile;

fn kb_from(json: &str) -> KnowledgeBase {
    let mut f = NamedTempFile::new().unwrap();
    f.write_all(json.as_bytes()).unwrap();
    KnowledgeBase::load(f.path())
}

fn hours_kb() -> KnowledgeBase {
    kb_from(
        r#"{
            "questions": [{"keywords": ["opening hours", "hours"], "answer": "We are open 9-5."}],
            "default_response": "I don't know"
        }"#,
    )
}

#[test]
fn exact_substring_hit() {
    let kb = hours_kb();
    let m = kb.best_match("What are your opening hours?").unwrap();
    assert_eq!(m.score, EXACT_MATCH_SCORE);
    assert_eq!(kb.get_answer("What are your opening hours?"), "We are open 9-5.");
}

#[test]
fn partial_word_overlap() {
    let kb = hours_kb();
    assert_eq!(kb.best_match("When do you open").unwrap().score, 1);
    assert_eq!(kb.get_answer("When do you open"), "We are open 9-5.");
}

#[test]
fn no_overlap_gives_default() {
    assert_eq!(hours_kb().get_answer("xyz abc"), "I don't know");
}

#[test]
fn empty_query_gives_default() {
    assert_eq!(hours_kb().get_answer(""), "I don't know");
}

#[test]
fn missing_definition_gives_builtin_default() {
    let kb = KnowledgeBase::load(Path::new("/definitely/not/here/kb.json"));
    assert_eq!(kb.get_answer("anything"), BUILTIN_DEFAULT_ANSWER);
    assert_eq!(BUILTIN_DEFAULT_ANSWER, "I'm sorry, I don't have information about that.");
}

#[test]
fn malformed_definition_gives_builtin_default() {
    let kb = kb_from(r#"{"questions": [{"keywords": "hours", "answer": 3}]}"#);
    assert!(kb.entries().is_empty());
    assert_eq!(kb.get_answer("hours"), BUILTIN_DEFAULT_ANSWER);
}

#[test]
fn exact_hit_outranks_overlaps_elsewhere() {
    let kb = kb_from(
        r#"{"questions": [
            {"keywords": ["account settings", "account email", "account name"], "answer": "account"},
            {"keywords": ["reset password"], "answer": "reset"}
        ]}"#,
    );
    // "account" overlaps three phrases of the first entry twice (score 6), the
    // second entry's phrase appears verbatim (score 10).
    assert_eq!(kb.get_answer("account account please reset password"), "reset");
}

#[test]
fn equal_overlap_scores_prefer_earlier_entry() {
    let kb = kb_from(
        r#"{"questions": [
            {"keywords": ["shipping cost"], "answer": "first"},
            {"keywords": ["shipping time"], "answer": "second"}
        ]}"#,
    );
    let ranked = kb.rank("ship it");
    assert_eq!(ranked.len(), 2);
    assert_eq!(ranked[0].score, ranked[1].score);
    assert_eq!(kb.get_answer("ship it"), "first");
}

#[test]
fn short_tokens_do_not_score() {
    let kb = kb_from(
        r#"{"questions": [{"keywords": ["it desk", "ok sign"], "answer": "unrelated"}],
            "default_response": "default"}"#,
    );
    assert_eq!(kb.get_answer("is it ok"), "default");
}

#[test]
fn repeated_calls_are_identical() {
    let kb = hours_kb();
    let queries = ["open?", "hours", "", "nothing here", "OPENING"];
    let first: Vec<String> = queries.iter().map(|q| kb.get_answer(q).to_string()).collect();
    for _ in 0..5 {
        let again: Vec<String> = queries.iter().map(|q| kb.get_answer(q).to_string()).collect();
        assert_eq!(again, first);
    }
}
