use lazy_static::lazy_static;
use regex::Regex;
use rust_stemmers::{Algorithm, Stemmer};
use std::collections::HashSet;
use unicode_normalization::UnicodeNormalization;

lazy_static! {
    static ref WORD: Regex = Regex::new(r"[a-zA-Z]+").expect("valid regex");
    static ref STEMMER: Stemmer = Stemmer::create(Algorithm::English);
    static ref STOPWORDS: HashSet<&'static str> = {
        // Only purely alphabetic entries: the tokenizer splits "don't" into "don" and "t".
        let words: &[&str] = &[
            "a","about","above","after","again","against","ain","all","am","an","and","any","are","aren","as","at",
            "be","because","been","before","being","below","between","both","but","by",
            "can","couldn",
            "d","did","didn","do","does","doesn","doing","don","down","during",
            "each","few","for","from","further",
            "had","hadn","has","hasn","have","haven","having","he","her","here","hers","herself","him","himself","his","how",
            "i","if","in","into","is","isn","it","its","itself",
            "just","ll","m","ma","me","mightn","more","most","mustn","my","myself",
            "needn","no","nor","not","now","o","of","off","on","once","only","or","other","our","ours","ourselves","out","over","own",
            "re","s","same","shan","she","should","shouldn","so","some","such",
            "t","than","that","the","their","theirs","them","themselves","then","there","these","they","this","those","through","to","too",
            "under","until","up","ve","very",
            "was","wasn","we","were","weren","what","when","where","which","while","who","whom","why","will","with","won","wouldn",
            "y","you","your","yours","yourself","yourselves"
        ];
        words.iter().copied().collect()
    };
}

/// Text-processing capability shared by ingestion and querying.
///
/// Implementations must be deterministic: the same input always yields the same
/// tokens, otherwise query terms will not line up with indexed terms.
pub trait Analyzer: Send + Sync {
    /// Lowercased alphabetic tokens with stop-words removed, in text order. Not stemmed.
    fn normalize(&self, text: &str) -> Vec<String>;

    /// Root form of a single normalized token.
    fn stem(&self, token: &str) -> String;

    /// `normalize` followed by `stem` on every token. This is what documents are indexed with.
    fn analyze(&self, text: &str) -> Vec<String> {
        self.normalize(text)
            .iter()
            .map(|token| self.stem(token))
            .collect()
    }
}

/// English analyzer: NFKC, lowercase, `[a-zA-Z]+` words, English stop-words, Snowball stemmer.
#[derive(Debug, Default, Clone, Copy)]
pub struct EnglishAnalyzer;

impl EnglishAnalyzer {
    pub fn new() -> Self { Self }
}

impl Analyzer for EnglishAnalyzer {
    fn normalize(&self, text: &str) -> Vec<String> {
        let normalized = text.nfkc().collect::<String>().to_lowercase();
        WORD.find_iter(&normalized)
            .map(|m| m.as_str())
            .filter(|token| !is_stopword(token))
            .map(str::to_string)
            .collect()
    }

    fn stem(&self, token: &str) -> String {
        STEMMER.stem(token).into_owned()
    }
}

pub fn is_stopword(token: &str) -> bool { STOPWORDS.contains(token) }
