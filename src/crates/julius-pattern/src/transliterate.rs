//! Literal text to phonetic units
//!
//! The code generator only needs a [`Transliterator`]. Plain closures work for
//! tests or callers that bring their own reading pipeline; [`KanaTransliterator`]
//! covers the common case where literals are already written in kana.

use crate::error::TransliterationError;

pub trait Transliterator {
    /// Space-separated phonetic units for `text`
    fn transliterate(&self, text: &str) -> Result<String, TransliterationError>;
}

impl<F> Transliterator for F
where
    F: Fn(&str) -> String,
{
    fn transliterate(&self, text: &str) -> Result<String, TransliterationError> {
        Ok(self(text))
    }
}

/// Hiragana/katakana to the Julius phone set (`k a`, `sh i`, `N`, `q`, `a:`)
#[derive(Debug, Clone, Copy, Default)]
pub struct KanaTransliterator;

impl KanaTransliterator {
    pub fn new() -> Self {
        KanaTransliterator
    }
}

impl Transliterator for KanaTransliterator {
    fn transliterate(&self, text: &str) -> Result<String, TransliterationError> {
        let kana: Vec<char> = text
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(to_katakana)
            .collect();
        let unsupported = |ch: char| TransliterationError::UnsupportedCharacter {
            ch,
            text: text.to_string(),
        };

        let mut units: Vec<String> = Vec::new();
        let mut i = 0;
        while i < kana.len() {
            let ch = kana[i];

            if ch == 'ー' {
                match units.last_mut() {
                    Some(last) if last.ends_with(['a', 'i', 'u', 'e', 'o']) => last.push(':'),
                    _ => return Err(unsupported(ch)),
                }
                i += 1;
                continue;
            }

            if let Some(phones) = kana.get(i + 1).and_then(|&next| contracted(ch, next)) {
                units.push(phones.to_string());
                i += 2;
                continue;
            }

            let phones = single(ch).ok_or_else(|| unsupported(ch))?;
            units.push(phones.to_string());
            i += 1;
        }

        if units.is_empty() {
            return Err(TransliterationError::Empty(text.to_string()));
        }
        Ok(units.join(" "))
    }
}

fn to_katakana(c: char) -> char {
    match c {
        'ぁ'..='ゖ' => char::from_u32(c as u32 + 0x60).unwrap_or(c),
        _ => c,
    }
}

fn single(c: char) -> Option<&'static str> {
    let phones = match c {
        'ア' | 'ァ' => "a",
        'イ' | 'ィ' | 'ヰ' => "i",
        'ウ' | 'ゥ' => "u",
        'エ' | 'ェ' | 'ヱ' => "e",
        'オ' | 'ォ' | 'ヲ' => "o",
        'カ' | 'ヵ' => "k a",
        'キ' => "k i",
        'ク' => "k u",
        'ケ' | 'ヶ' => "k e",
        'コ' => "k o",
        'サ' => "s a",
        'シ' => "sh i",
        'ス' => "s u",
        'セ' => "s e",
        'ソ' => "s o",
        'タ' => "t a",
        'チ' => "ch i",
        'ツ' => "ts u",
        'テ' => "t e",
        'ト' => "t o",
        'ナ' => "n a",
        'ニ' => "n i",
        'ヌ' => "n u",
        'ネ' => "n e",
        'ノ' => "n o",
        'ハ' => "h a",
        'ヒ' => "h i",
        'フ' => "f u",
        'ヘ' => "h e",
        'ホ' => "h o",
        'マ' => "m a",
        'ミ' => "m i",
        'ム' => "m u",
        'メ' => "m e",
        'モ' => "m o",
        'ヤ' | 'ャ' => "y a",
        'ユ' | 'ュ' => "y u",
        'ヨ' | 'ョ' => "y o",
        'ラ' => "r a",
        'リ' => "r i",
        'ル' => "r u",
        'レ' => "r e",
        'ロ' => "r o",
        'ワ' | 'ヮ' => "w a",
        'ン' => "N",
        'ッ' => "q",
        'ガ' => "g a",
        'ギ' => "g i",
        'グ' => "g u",
        'ゲ' => "g e",
        'ゴ' => "g o",
        'ザ' => "z a",
        'ジ' | 'ヂ' => "j i",
        'ズ' | 'ヅ' => "z u",
        'ゼ' => "z e",
        'ゾ' => "z o",
        'ダ' => "d a",
        'デ' => "d e",
        'ド' => "d o",
        'バ' => "b a",
        'ビ' => "b i",
        'ブ' | 'ヴ' => "b u",
        'ベ' => "b e",
        'ボ' => "b o",
        'パ' => "p a",
        'ピ' => "p i",
        'プ' => "p u",
        'ペ' => "p e",
        'ポ' => "p o",
        _ => return None,
    };
    Some(phones)
}

/// Two-character readings: a kana followed by a small vowel or small y-kana
fn contracted(first: char, second: char) -> Option<&'static str> {
    let phones = match (first, second) {
        ('キ', 'ャ') => "ky a",
        ('キ', 'ュ') => "ky u",
        ('キ', 'ェ') => "ky e",
        ('キ', 'ョ') => "ky o",
        ('シ', 'ャ') => "sh a",
        ('シ', 'ュ') => "sh u",
        ('シ', 'ェ') => "sh e",
        ('シ', 'ョ') => "sh o",
        ('チ', 'ャ') => "ch a",
        ('チ', 'ュ') => "ch u",
        ('チ', 'ェ') => "ch e",
        ('チ', 'ョ') => "ch o",
        ('ニ', 'ャ') => "ny a",
        ('ニ', 'ュ') => "ny u",
        ('ニ', 'ェ') => "ny e",
        ('ニ', 'ョ') => "ny o",
        ('ヒ', 'ャ') => "hy a",
        ('ヒ', 'ュ') => "hy u",
        ('ヒ', 'ェ') => "hy e",
        ('ヒ', 'ョ') => "hy o",
        ('ミ', 'ャ') => "my a",
        ('ミ', 'ュ') => "my u",
        ('ミ', 'ョ') => "my o",
        ('リ', 'ャ') => "ry a",
        ('リ', 'ュ') => "ry u",
        ('リ', 'ョ') => "ry o",
        ('ギ', 'ャ') => "gy a",
        ('ギ', 'ュ') => "gy u",
        ('ギ', 'ョ') => "gy o",
        ('ジ' | 'ヂ', 'ャ') => "j a",
        ('ジ' | 'ヂ', 'ュ') => "j u",
        ('ジ', 'ェ') => "j e",
        ('ジ' | 'ヂ', 'ョ') => "j o",
        ('ビ', 'ャ') => "by a",
        ('ビ', 'ュ') => "by u",
        ('ビ', 'ョ') => "by o",
        ('ピ', 'ャ') => "py a",
        ('ピ', 'ュ') => "py u",
        ('ピ', 'ョ') => "py o",
        ('フ', 'ァ') => "f a",
        ('フ', 'ィ') => "f i",
        ('フ', 'ェ') => "f e",
        ('フ', 'ォ') => "f o",
        ('ウ', 'ィ') => "w i",
        ('ウ', 'ェ') => "w e",
        ('ウ', 'ォ') => "w o",
        ('テ', 'ィ') => "t i",
        ('デ', 'ィ') => "d i",
        ('ト', 'ゥ') => "t u",
        ('ド', 'ゥ') => "d u",
        ('ツ', 'ァ') => "ts a",
        ('ツ', 'ィ') => "ts i",
        ('ツ', 'ェ') => "ts e",
        ('ツ', 'ォ') => "ts o",
        ('ヴ', 'ァ') => "b a",
        ('ヴ', 'ィ') => "b i",
        ('ヴ', 'ェ') => "b e",
        ('ヴ', 'ォ') => "b o",
        ('イ', 'ェ') => "i e",
        ('ス', 'ィ') => "s i",
        ('ズ', 'ィ') => "z i",
        _ => return None,
    };
    Some(phones)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kana(text: &str) -> String {
        KanaTransliterator::new().transliterate(text).unwrap()
    }

    #[test]
    fn test_hiragana_and_katakana_agree() {
        assert_eq!(kana("おはよう"), "o h a y o u");
        assert_eq!(kana("オハヨウ"), "o h a y o u");
    }

    #[test]
    fn test_contracted_sounds() {
        assert_eq!(kana("きょう"), "ky o u");
        assert_eq!(kana("しゃしん"), "sh a sh i N");
        assert_eq!(kana("ティー"), "t i:");
    }

    #[test]
    fn test_geminate_and_moraic_nasal() {
        assert_eq!(kana("きって"), "k i q t e");
        assert_eq!(kana("コンピューター"), "k o N py u: t a:");
    }

    #[test]
    fn test_whitespace_is_ignored() {
        assert_eq!(kana("いち に"), "i ch i n i");
    }

    #[test]
    fn test_rejects_non_kana() {
        assert_eq!(
            KanaTransliterator::new().transliterate("abc"),
            Err(TransliterationError::UnsupportedCharacter {
                ch: 'a',
                text: "abc".to_string()
            })
        );
    }

    #[test]
    fn test_rejects_leading_long_mark_and_blank() {
        let translit = KanaTransliterator::new();
        assert!(matches!(
            translit.transliterate("ーあ"),
            Err(TransliterationError::UnsupportedCharacter { ch: 'ー', .. })
        ));
        assert_eq!(
            translit.transliterate("  "),
            Err(TransliterationError::Empty("  ".to_string()))
        );
    }

    #[test]
    fn test_closure_transliterator() {
        let upper = |text: &str| text.to_uppercase();
        assert_eq!(upper.transliterate("abc").unwrap(), "ABC");
    }
}
