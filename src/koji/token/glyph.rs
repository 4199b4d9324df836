//! Glyph classification
//!
//!     Before dispatch every character is put in exactly one class. Markup glyphs are all
//!     fullwidth forms or CJK punctuation, chosen so that none of them falls in the letter
//!     ranges; ordinary ASCII (including `/` and `:`) is plain text.
//!
//!     Glyphs:
//!         《 》   inline tag opener / closer
//!         ［ ］   block tag opener / closer (［／ opens a closing block tag)
//!         ｜      separator (inline field or furigana/ruby start)
//!         ：      colon (inline tag name/body separator)
//!         （ ）   furigana
//!         ｛ ｝   kaeriten
//!         〔 〕   okurigana
//!         【 】   annotation

use super::kind::TokenType;

pub const INLINE_OPEN: char = '《';
pub const INLINE_CLOSE: char = '》';
pub const BLOCK_OPEN: char = '［';
pub const BLOCK_CLOSE: char = '］';
/// Follows [`BLOCK_OPEN`] to form the closing-variant block opener.
pub const CLOSING_MARKER: char = '／';
pub const SEPARATOR: char = '｜';
pub const COLON: char = '：';
pub const NEWLINE: char = '\n';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharClass {
    Letter,
    Bracket,
    Colon,
    Separator,
    InlineOpen,
    InlineClose,
    BlockOpen,
    BlockClose,
    Newline,
    Unrecognized,
}

pub fn classify(ch: char) -> CharClass {
    match ch {
        INLINE_OPEN => CharClass::InlineOpen,
        INLINE_CLOSE => CharClass::InlineClose,
        BLOCK_OPEN => CharClass::BlockOpen,
        BLOCK_CLOSE => CharClass::BlockClose,
        SEPARATOR => CharClass::Separator,
        COLON => CharClass::Colon,
        NEWLINE => CharClass::Newline,
        _ if bracket_type(ch).is_some() => CharClass::Bracket,
        _ if is_letter(ch) => CharClass::Letter,
        _ => CharClass::Unrecognized,
    }
}

/// Token type of one of the eight paired bracket glyphs.
pub fn bracket_type(ch: char) -> Option<TokenType> {
    match ch {
        '（' => Some(TokenType::FuriganaStart),
        '）' => Some(TokenType::FuriganaEnd),
        '｛' => Some(TokenType::KaeriStart),
        '｝' => Some(TokenType::KaeriEnd),
        '〔' => Some(TokenType::OkuriganaStart),
        '〕' => Some(TokenType::OkuriganaEnd),
        '【' => Some(TokenType::AnnoStart),
        '】' => Some(TokenType::AnnoEnd),
        _ => None,
    }
}

/// Ordinary text content: printable ASCII, general punctuation, CJK ideographs, kana and
/// their extensions, kanbun marks, CJK symbols and the usable fullwidth forms.
pub fn is_letter(ch: char) -> bool {
    matches!(
        ch,
        '\u{0020}'..='\u{007E}'
            | '\u{2000}'..='\u{206F}'
            | '\u{3400}'..='\u{4DFF}'
            | '\u{4E00}'..='\u{9FEA}'
            | '\u{3040}'..='\u{309F}'
            | '\u{30A0}'..='\u{30FF}'
            | '\u{31F0}'..='\u{31FF}'
            | '\u{1B000}'..='\u{1B0FF}'
            | '\u{1B100}'..='\u{1B12F}'
            | '\u{3190}'..='\u{319F}'
            | '\u{3000}'..='\u{3007}'
            | '\u{300C}'..='\u{300F}'
            | '\u{3012}'..='\u{3013}'
            | '\u{3016}'..='\u{303F}'
            | '\u{FF00}'..='\u{FF02}'
            | '\u{FF04}'..='\u{FF07}'
            | '\u{FF0B}'..='\u{FF0E}'
            | '\u{FF10}'..='\u{FF19}'
            | '\u{FF1B}'..='\u{FF3A}'
            | '\u{FF3E}'..='\u{FF5A}'
            | '\u{FF5E}'..='\u{FFEF}'
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markup_glyphs_are_not_letters() {
        for ch in "《》［］／｜：（）｛｝〔〕【】\n".chars() {
            assert!(!is_letter(ch), "{:?} should not be a letter", ch);
        }
    }

    #[test]
    fn test_letters() {
        for ch in "abcXYZ019 /:!~あアヽ一龥㐀ㇰ　「」。、ＡＺａｚ０９ｰ㆐".chars() {
            assert!(is_letter(ch), "{:?} should be a letter", ch);
        }
    }

    #[test]
    fn test_classify() {
        assert_eq!(classify('《'), CharClass::InlineOpen);
        assert_eq!(classify('》'), CharClass::InlineClose);
        assert_eq!(classify('［'), CharClass::BlockOpen);
        assert_eq!(classify('］'), CharClass::BlockClose);
        assert_eq!(classify('｜'), CharClass::Separator);
        assert_eq!(classify('：'), CharClass::Colon);
        assert_eq!(classify('\n'), CharClass::Newline);
        assert_eq!(classify('【'), CharClass::Bracket);
        assert_eq!(classify('橋'), CharClass::Letter);
        assert_eq!(classify('／'), CharClass::Unrecognized);
        assert_eq!(classify('\t'), CharClass::Unrecognized);
        assert_eq!(classify('\r'), CharClass::Unrecognized);
        assert_eq!(classify('é'), CharClass::Unrecognized);
    }

    #[test]
    fn test_bracket_types() {
        assert_eq!(bracket_type('（'), Some(TokenType::FuriganaStart));
        assert_eq!(bracket_type('】'), Some(TokenType::AnnoEnd));
        assert_eq!(bracket_type('《'), None);
        assert_eq!(bracket_type('［'), None);
    }
}
