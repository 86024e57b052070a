use std::collections::HashMap;

/// Scores the tone of a short text on a [-1.0, 1.0] scale.
pub trait SentimentScorer: Send + Sync {
    fn polarity(&self, text: &str) -> f64;
}

const NEGATION_WORDS: &[&str] = &[
    "not", "no", "never", "don't", "doesn't", "didn't", "isn't", "aren't",
    "wasn't", "weren't", "won't", "wouldn't", "couldn't", "shouldn't", "hardly",
    "barely", "neither", "nor", "without", "cannot", "can't",
];

const NEGATION_WINDOW: usize = 3;

/// A negated word keeps half its strength with the sign flipped.
const NEGATION_FACTOR: f64 = -0.5;

const INTENSIFIERS: &[(&str, f64)] = &[
    ("very", 1.3),
    ("really", 1.2),
    ("extremely", 1.5),
    ("highly", 1.3),
    ("sharply", 1.4),
    ("significantly", 1.3),
    ("most", 1.2),
    ("slightly", 0.6),
    ("somewhat", 0.7),
    ("marginally", 0.5),
];

/// Word polarities. General-purpose tone words plus the vocabulary that
/// dominates market headlines.
const LEXICON: &[(&str, f64)] = &[
    // general positive
    ("good", 0.7), ("great", 0.8), ("best", 1.0), ("better", 0.5),
    ("excellent", 1.0), ("amazing", 0.6), ("positive", 0.23), ("strong", 0.43),
    ("stronger", 0.45), ("success", 0.3), ("successful", 0.75), ("happy", 0.8),
    ("optimistic", 0.5), ("confident", 0.5), ("healthy", 0.5), ("solid", 0.3),
    ("robust", 0.4), ("impressive", 1.0), ("win", 0.8), ("wins", 0.8),
    ("top", 0.5), ("favorable", 0.5), ("upbeat", 0.5),
    // general negative
    ("bad", -0.7), ("worse", -0.4), ("worst", -1.0), ("poor", -0.4),
    ("weak", -0.38), ("weaker", -0.4), ("negative", -0.3), ("fail", -0.5),
    ("fails", -0.5), ("failure", -0.32), ("concern", -0.2), ("concerns", -0.2),
    ("worried", -0.5), ("fear", -0.6), ("fears", -0.6), ("risk", -0.2),
    ("risky", -0.4), ("terrible", -1.0), ("disappointing", -0.6),
    ("uncertain", -0.2), ("uncertainty", -0.25), ("trouble", -0.4), ("crisis", -0.6),
    // market positive
    ("bullish", 0.6), ("rally", 0.5), ("rallies", 0.5), ("surge", 0.5),
    ("surges", 0.5), ("soar", 0.6), ("soars", 0.6), ("jump", 0.4),
    ("jumps", 0.4), ("gain", 0.4), ("gains", 0.4), ("rise", 0.3), ("rises", 0.3),
    ("climb", 0.3), ("climbs", 0.3), ("profit", 0.4), ("profits", 0.4),
    ("growth", 0.4), ("beat", 0.4), ("beats", 0.4), ("upgrade", 0.5),
    ("upgraded", 0.5), ("outperform", 0.5), ("record", 0.3), ("high", 0.16),
    ("higher", 0.25), ("boost", 0.4), ("boosts", 0.4), ("rebound", 0.35),
    ("recovery", 0.3), ("dividend", 0.2), ("buyback", 0.3), ("expansion", 0.3),
    ("upside", 0.4), ("buy", 0.2),
    // market negative
    ("bearish", -0.6), ("decline", -0.4), ("declines", -0.4), ("fall", -0.35),
    ("falls", -0.35), ("drop", -0.35), ("drops", -0.35), ("plunge", -0.6),
    ("plunges", -0.6), ("crash", -0.8), ("slump", -0.5), ("slumps", -0.5),
    ("tumble", -0.5), ("tumbles", -0.5), ("slide", -0.3), ("slides", -0.3),
    ("loss", -0.4), ("losses", -0.4), ("miss", -0.4), ("misses", -0.4),
    ("downgrade", -0.5), ("downgraded", -0.5), ("underperform", -0.5),
    ("low", -0.15), ("lower", -0.2), ("sell", -0.2), ("selloff", -0.5),
    ("lawsuit", -0.4), ("probe", -0.3), ("penalty", -0.4), ("fraud", -0.8),
    ("default", -0.5), ("bankruptcy", -0.8), ("layoffs", -0.4), ("cut", -0.2),
    ("cuts", -0.2), ("downside", -0.4), ("volatile", -0.2), ("warning", -0.4),
];

/// Lexicon polarity scorer in the pattern-based style: each polar word is an
/// assessment, modified by a preceding intensifier or negation, and the text's
/// polarity is the mean of its assessments.
pub struct LexiconScorer {
    lexicon: HashMap<&'static str, f64>,
    intensifiers: HashMap<&'static str, f64>,
}

impl LexiconScorer {
    pub fn new() -> Self {
        Self {
            lexicon: LEXICON.iter().copied().collect(),
            intensifiers: INTENSIFIERS.iter().copied().collect(),
        }
    }
}

impl Default for LexiconScorer {
    fn default() -> Self {
        Self::new()
    }
}

fn tokenize(text: &str) -> Vec<String> {
    let normalized = text.to_lowercase().replace('\u{2019}', "'");
    normalized
        .split(|c: char| !(c.is_alphanumeric() || c == '\'' || c == '-'))
        .map(|w| w.trim_matches(|c: char| c == '\'' || c == '-'))
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect()
}

impl SentimentScorer for LexiconScorer {
    fn polarity(&self, text: &str) -> f64 {
        let words = tokenize(text);
        let mut assessments: Vec<f64> = Vec::new();
        let mut last_negation: Option<usize> = None;
        let mut pending_intensity: Option<f64> = None;

        for (i, word) in words.iter().enumerate() {
            let word = word.as_str();

            if NEGATION_WORDS.contains(&word) {
                last_negation = Some(i);
                continue;
            }

            if let Some(&factor) = self.intensifiers.get(word) {
                pending_intensity = Some(factor);
                continue;
            }

            let Some(&base) = self.lexicon.get(word) else {
                pending_intensity = None;
                continue;
            };

            let mut score = (base * pending_intensity.take().unwrap_or(1.0)).clamp(-1.0, 1.0);

            let negated = last_negation.is_some_and(|pos| i - pos <= NEGATION_WINDOW);
            if negated {
                score *= NEGATION_FACTOR;
                last_negation = None;
            }

            assessments.push(score);
        }

        if assessments.is_empty() {
            return 0.0;
        }

        let mean = assessments.iter().sum::<f64>() / assessments.len() as f64;
        mean.clamp(-1.0, 1.0)
    }
}
