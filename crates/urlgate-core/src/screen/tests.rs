use super::*;
use crate::error::ResultCode;
use crate::fetch::fake::{FailingFetcher, StaticFetcher};

fn screener(text: &str) -> ContentScreener<StaticFetcher> {
    ContentScreener::new(StaticFetcher::new(text))
}

fn words(list: &[&str]) -> Vec<String> {
    list.iter().map(|w| w.to_string()).collect()
}

#[tokio::test]
async fn clean_page_is_not_matched() {
    let s = screener("Welcome to our site");
    let v = s.screen("http://x.com", &["spam"]).await.unwrap();
    assert!(!v.matched);
    assert_eq!(v.matched_word, "");
}

#[tokio::test]
async fn first_match_follows_input_order_not_text_position() {
    let s = screener("a cat and a zebra");
    let v = s.screen("http://x.com", &["zebra", "cat"]).await.unwrap();
    assert!(v.matched);
    assert_eq!(v.matched_word, "zebra");

    let v = s.screen("http://x.com", &["dog", "cat", "zebra"]).await.unwrap();
    assert_eq!(v.matched_word, "cat");
}

#[tokio::test]
async fn matching_is_case_insensitive_both_ways() {
    let s = screener("this is a test page");
    let v = s.screen("http://x.com", &["TEST"]).await.unwrap();
    assert!(v.matched);
    assert_eq!(v.matched_word, "test");

    let s = screener("BREAKING NEWS");
    let v = s.screen("http://x.com", &["  News "]).await.unwrap();
    assert_eq!(v.matched_word, "news");
}

#[tokio::test]
async fn non_ascii_text_and_word_are_lowercased() {
    let s = screener("ÜBER ALLES");
    let v = s.screen("http://x.com", &["über"]).await.unwrap();
    assert!(v.matched);
    assert_eq!(v.matched_word, "über");

    let v = s.screen("http://x.com", &["Über"]).await.unwrap();
    assert_eq!(v.matched_word, "über");

    let s = screener("НОВОСТИ ДНЯ");
    let v = s.screen("http://x.com", &["новости"]).await.unwrap();
    assert_eq!(v.matched_word, "новости");
}

#[tokio::test]
async fn substring_match_inside_longer_word() {
    let s = screener("antispam filters");
    let v = s.screen("http://x.com", &["spam"]).await.unwrap();
    assert!(v.matched);
}

#[tokio::test]
async fn invalid_word_rejected_regardless_of_content() {
    let s = screener("test@123 appears verbatim");
    let err = s.screen("http://x.com", &["test@123"]).await.unwrap_err();
    assert_eq!(err.code(), ResultCode::InvalidInput);
    assert_eq!(s.fetcher().calls(), 0, "validation must precede the fetch");
}

#[tokio::test]
async fn invalid_word_after_matching_word_still_rejected() {
    let s = screener("a cat");
    let err = s.screen("http://x.com", &["cat", "bad word"]).await.unwrap_err();
    assert_eq!(err.code(), ResultCode::InvalidInput);
    assert!(err.to_string().contains("bad word"));
}

#[tokio::test]
async fn empty_word_list_is_invalid_input() {
    let s = screener("anything");
    let empty: Vec<String> = Vec::new();
    let err = s.screen("http://x.com", &empty).await.unwrap_err();
    assert_eq!(err.code(), ResultCode::InvalidInput);
    assert_eq!(s.fetcher().calls(), 0);
}

#[tokio::test]
async fn blank_word_is_invalid_input() {
    let s = screener("anything");
    let err = s.screen("http://x.com", &["ok", "   "]).await.unwrap_err();
    assert_eq!(err.code(), ResultCode::InvalidInput);
}

#[tokio::test]
async fn empty_or_malformed_url_is_invalid_input() {
    let s = screener("anything");
    for url in ["", "   ", "not a url", "ftp://x.com/file", "/relative/path"] {
        let err = s.screen(url, &["spam"]).await.unwrap_err();
        assert_eq!(err.code(), ResultCode::InvalidInput, "url {url:?}");
    }
    assert_eq!(s.fetcher().calls(), 0);
}

#[tokio::test]
async fn url_is_trimmed_before_fetch() {
    let s = screener("hello");
    let v = s.screen("  https://x.com/page  ", &["hello"]).await.unwrap();
    assert!(v.matched);
    assert_eq!(s.fetcher().calls(), 1);
}

#[tokio::test]
async fn fetch_failure_is_fetch_error() {
    let s = ContentScreener::new(FailingFetcher(503));
    let err = s.screen("http://x.com", &["spam"]).await.unwrap_err();
    assert_eq!(err.code(), ResultCode::FetchError);
    match err {
        GateError::Fetch { url, source } => {
            assert_eq!(url, "http://x.com");
            assert!(matches!(source, crate::fetch::FetchError::Http(503)));
        }
        other => panic!("expected Fetch, got {other:?}"),
    }
}

#[tokio::test]
async fn screen_request_uses_request_fields() {
    let s = screener("free money inside");
    let req = SearchRequest::new("http://x.com", words(&["Money"]));
    let v = s.screen_request(&req).await.unwrap();
    assert_eq!(v.matched_word, "money");
}

#[test]
fn search_request_from_json() {
    let req = SearchRequest::from_json(r#"{"url": "http://x.com", "words": ["a", "b"]}"#).unwrap();
    assert_eq!(req.url, "http://x.com");
    assert_eq!(req.words, words(&["a", "b"]));

    let err = SearchRequest::from_json(r#"{"url": "http://x.com", "words": "a"}"#).unwrap_err();
    assert_eq!(err.code(), ResultCode::InvalidInput);
    let err = SearchRequest::from_json(r#"{"words": ["a"]}"#).unwrap_err();
    assert_eq!(err.code(), ResultCode::InvalidInput);
}

#[test]
fn normalize_words_keeps_order() {
    let out = normalize_words(&[" Zebra", "CAT "]).unwrap();
    assert_eq!(out, words(&["zebra", "cat"]));
}

#[test]
fn first_match_none_when_absent() {
    assert_eq!(first_match("welcome to our site", &words(&["spam"])), None);
    assert_eq!(first_match("welcome", &words(&["wel", "come"])), Some("wel"));
}
