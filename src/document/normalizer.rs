use chardetng::EncodingDetector;
use encoding_rs::Encoding;

/// Decoded text plus whether decoding had to substitute characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedText {
    pub text: String,
    pub lossy: bool,
}

/// Raw bytes to UTF-8 text. Implementations must never fail: undecodable
/// input degrades to replacement characters.
pub trait TextNormalizer {
    fn normalize(&self, raw: &[u8]) -> NormalizedText;
}

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// v0: UTF-8 with U+FFFD substitution, leading BOM stripped.
#[derive(Debug, Default, Clone, Copy)]
pub struct LossyUtf8Normalizer;

impl TextNormalizer for LossyUtf8Normalizer {
    fn normalize(&self, raw: &[u8]) -> NormalizedText {
        let body = raw.strip_prefix(UTF8_BOM).unwrap_or(raw);
        match std::str::from_utf8(body) {
            Ok(text) => NormalizedText {
                text: text.to_string(),
                lossy: false,
            },
            Err(_) => NormalizedText {
                text: String::from_utf8_lossy(body).into_owned(),
                lossy: true,
            },
        }
    }
}

/// v1: byte-order mark first, then strict UTF-8, then a statistical guess
/// among legacy encodings (GBK/GB18030, Big5, Shift_JIS, windows-1252, ...).
///
/// `lossy` is set only when the chosen decoder still had to substitute.
#[derive(Debug, Default, Clone, Copy)]
pub struct DetectingNormalizer;

impl TextNormalizer for DetectingNormalizer {
    fn normalize(&self, raw: &[u8]) -> NormalizedText {
        if let Some((encoding, _)) = Encoding::for_bom(raw) {
            let (text, had_errors) = encoding.decode_with_bom_removal(raw);
            return NormalizedText {
                text: text.into_owned(),
                lossy: had_errors,
            };
        }

        if let Ok(text) = std::str::from_utf8(raw) {
            return NormalizedText {
                text: text.to_string(),
                lossy: false,
            };
        }

        let mut detector = EncodingDetector::new();
        detector.feed(raw, true);
        let encoding = detector.guess(None, false);
        tracing::debug!(encoding = encoding.name(), "decoding with detected encoding");

        let (text, had_errors) = encoding.decode_without_bom_handling(raw);
        NormalizedText {
            text: text.into_owned(),
            lossy: had_errors,
        }
    }
}
