//! Table-driven lexer scenarios
//!
//! Each case lists the token types the source must produce and the indices of the tokens that
//! must carry an error after finalization.

use koji::koji::lexing::{tokenize, Lexer};
use koji::koji::testing::{assert_tokens, sample, TokenType, SAMPLES};
use koji::koji::token::ErrorKind;
use rstest::rstest;
use TokenType::*;

#[rstest(
    source,
    expected,
    errors,
    case::inline_tag(
        "あああああ《人物：ほげ》あああ",
        &[TextSegment, InlineStart, InlineName, Colon, TextSegment, InlineEnd, TextSegment],
        &[]
    ),
    case::block_tags(
        "［表紙］あああ［／表紙］",
        &[BlockStart, BlockName, BlockEnd, TextSegment, BlockClosingStart, BlockName, BlockEnd],
        &[]
    ),
    case::unterminated_furigana("橋本（はしもと", &[TextSegment, FuriganaStart, Furigana], &[1]),
    case::stray_block_closer("表紙］", &[TextSegment, BlockEnd], &[1]),
    case::newline_in_text("橋本\n雄太", &[TextSegment, Lb, TextSegment], &[]),
    case::illegal_character("橋本／雄太", &[TextSegment, Unknown, TextSegment], &[1]),
    case::newline_in_tag_name(
        "《人\n名：橋本》",
        &[InlineStart, InlineName, Lb, InlineName, Colon, TextSegment, InlineEnd],
        &[2]
    ),
    case::newline_in_block_tag("［表\n紙］", &[BlockStart, BlockName, Lb, BlockName, BlockEnd], &[2]),
    case::stray_furigana_closer("橋本はしもと）", &[TextSegment, FuriganaEnd], &[1]),
    case::crossed_brackets(
        "橋本（はし【もと）】",
        &[TextSegment, FuriganaStart, Furigana, AnnoStart, Furigana, FuriganaEnd, AnnoEnd],
        &[1, 3, 5, 6]
    ),
    case::inline_fields(
        "《ふりがな：橋本｜ゆうた》",
        &[InlineStart, InlineName, Colon, TextSegment, InlineSep, TextSegment, InlineEnd],
        &[]
    ),
    case::furigana_separator(
        "十月二日｜人定（にんてい）",
        &[TextSegment, FuriganaSep, TextSegment, FuriganaStart, Furigana, FuriganaEnd],
        &[]
    ),
    case::unclosed_inline("《人名：橋本", &[InlineStart, InlineName, Colon, TextSegment], &[0]),
    case::unclosed_block_closing_tag("［／表紙", &[BlockClosingStart, BlockName], &[0]),
    case::carriage_return("あ\r\nい", &[TextSegment, Unknown, Lb, TextSegment], &[1]),
    case::empty("", &[], &[])
)]
fn test_lexer_scenario(source: &str, expected: &[TokenType], errors: &[usize]) {
    assert_tokens(source).kinds(expected).errors_at(errors);
}

#[test]
fn test_inline_pair_links() {
    assert_tokens(sample("inline")).paired(1, 5);
}

#[test]
fn test_block_pair_links() {
    assert_tokens("［表紙］あああ［／表紙］")
        .paired(0, 2)
        .paired(4, 6)
        .token(4, |t| {
            t.value("［／").range(7..9);
        });
}

#[test]
fn test_block_with_trailing_newline() {
    assert_tokens("［表紙］\n")
        .kinds(&[BlockStart, BlockName, BlockEnd, Lb])
        .paired(0, 2)
        .no_errors();
}

#[test]
fn test_error_messages() {
    assert_tokens("橋本（はしもと").token(1, |t| {
        t.error(ErrorKind::UnmatchedBracket);
    });
    assert_tokens("表紙］").token(1, |t| {
        t.error(ErrorKind::UnmatchedBracket).unpaired();
    });
    assert_tokens("橋本／雄太").token(1, |t| {
        t.error(ErrorKind::IllegalCharacter('／')).value("／");
    });

    let tokens = tokenize("有｛\n｝");
    assert_eq!(tokens[2].error_message(), Some("ここに改行を含めることはできません。"));
    assert_eq!(tokens[3].pair_index, Some(1));
}

#[test]
fn test_kanbun_reading_marks() {
    assert_tokens(sample("kanbun"))
        .count(16)
        .no_errors()
        .paired(1, 3)
        .paired(5, 7)
        .paired(9, 11)
        .paired(13, 15)
        .token(6, |t| {
            t.kind(Okurigana).value("ラバ");
        })
        .token(14, |t| {
            t.kind(Kaeriten).value("一");
        });
}

#[test]
fn test_errors_do_not_stop_lexing() {
    // One error per construct; everything after each error still lexes normally.
    assert_tokens("／（あ）\n《人\n名：い》")
        .kinds(&[
            Unknown,
            FuriganaStart,
            Furigana,
            FuriganaEnd,
            Lb,
            InlineStart,
            InlineName,
            Lb,
            InlineName,
            Colon,
            TextSegment,
            InlineEnd,
        ])
        .errors_at(&[0, 7])
        .paired(1, 3)
        .paired(5, 11);
}

#[test]
fn test_samples_reconstruct_source() {
    for (name, source) in SAMPLES {
        let joined: String = tokenize(source).iter().map(|t| t.value.as_str()).collect();
        assert_eq!(joined, *source, "sample '{}'", name);
    }
}

#[test]
fn test_pull_and_batch_agree_on_samples() {
    for (name, source) in SAMPLES {
        let mut lexer = Lexer::new(source);
        while lexer.next_token().is_some() {}
        let arena = lexer.tokens().to_vec();
        assert_eq!(arena, tokenize(source), "sample '{}'", name);
    }
}
