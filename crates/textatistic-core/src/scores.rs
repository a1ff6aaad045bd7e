//! Readability formulas.
//!
//! Each formula is a pure function of a [`CountBundle`]. A zero sentence or
//! word count is reported as [`ScoreError::DivisionByZero`] instead of
//! producing NaN or infinity.
//!
//! | Score              | Formula |
//! |--------------------|---------|
//! | Flesch Reading Ease | `206.835 - 1.015 * (words/sentences) - 84.6 * (syllables/words)` |
//! | Flesch-Kincaid Grade | `0.39 * (words/sentences) + 11.8 * (syllables/words) - 15.59` |
//! | Gunning Fog        | `0.4 * ((words/sentences) + 100 * (polysyllabic/words))` |
//! | SMOG               | `1.0430 * sqrt(polysyllabic * (30/sentences)) + 3.1291` |
//! | Dale-Chall         | `base + 15.79 * (difficult/words) + 0.0496 * (words/sentences)` |
//!
//! The Dale-Chall `base` is 3.6365 when more than 5% of words are difficult,
//! otherwise 0.

use serde::{Deserialize, Serialize};

use crate::counts::CountBundle;
use crate::error::{ScoreError, ScoreResult};
use crate::statistics::Resources;

/// Share of difficult words above which Dale-Chall adds its constant.
pub const DALE_CHALL_THRESHOLD: f64 = 0.05;

/// Constant added to Dale-Chall above [`DALE_CHALL_THRESHOLD`].
pub const DALE_CHALL_ADJUSTMENT: f64 = 3.6365;

/// The five readability scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum Score {
    /// Flesch Reading Ease (higher is easier).
    Flesch,
    /// Flesch-Kincaid Grade Level.
    FleschKincaid,
    /// Gunning Fog index.
    GunningFog,
    /// SMOG grade.
    Smog,
    /// Dale-Chall readability score.
    DaleChall,
}

impl Score {
    /// Every score, in report order.
    pub const ALL: [Self; 5] = [
        Self::Flesch,
        Self::FleschKincaid,
        Self::GunningFog,
        Self::Smog,
        Self::DaleChall,
    ];

    /// Human-readable name.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Flesch => "Flesch Reading Ease",
            Self::FleschKincaid => "Flesch-Kincaid Grade",
            Self::GunningFog => "Gunning Fog",
            Self::Smog => "SMOG",
            Self::DaleChall => "Dale-Chall",
        }
    }

    /// Machine-readable key, as used in JSON output.
    pub const fn key(&self) -> &'static str {
        match self {
            Self::Flesch => "flesch",
            Self::FleschKincaid => "flesch_kincaid",
            Self::GunningFog => "gunning_fog",
            Self::Smog => "smog",
            Self::DaleChall => "dale_chall",
        }
    }

    /// Compute this score from counts.
    pub fn compute(&self, counts: &CountBundle) -> ScoreResult<f64> {
        match self {
            Self::Flesch => flesch(counts),
            Self::FleschKincaid => flesch_kincaid(counts),
            Self::GunningFog => gunning_fog(counts),
            Self::Smog => smog(counts),
            Self::DaleChall => dale_chall(counts),
        }
    }

    /// Count `text` from scratch and compute this score.
    pub fn compute_for_text(&self, text: &str, resources: &Resources) -> ScoreResult<f64> {
        self.compute(&CountBundle::from_text(text, resources))
    }
}

impl std::fmt::Display for Score {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Per-passage averages shared by the formulas.
struct Rates {
    words_per_sentence: f64,
    counts: CountBundle,
}

impl Rates {
    /// Check both denominators, sentences first.
    fn new(score: Score, counts: &CountBundle) -> ScoreResult<Self> {
        let zero = |count| ScoreError::DivisionByZero {
            score: score.name(),
            count,
        };
        if counts.sentences == 0 {
            return Err(zero("sentence"));
        }
        if counts.words == 0 {
            return Err(zero("word"));
        }
        Ok(Self {
            words_per_sentence: counts.words as f64 / counts.sentences as f64,
            counts: *counts,
        })
    }

    /// `n / words`.
    fn per_word(&self, n: usize) -> f64 {
        n as f64 / self.counts.words as f64
    }
}

/// Flesch Reading Ease.
pub fn flesch(counts: &CountBundle) -> ScoreResult<f64> {
    let rates = Rates::new(Score::Flesch, counts)?;
    let syllables_per_word = rates.per_word(counts.syllables);
    Ok((-1.015f64).mul_add(
        rates.words_per_sentence,
        (-84.6f64).mul_add(syllables_per_word, 206.835),
    ))
}

/// Flesch-Kincaid Grade Level.
pub fn flesch_kincaid(counts: &CountBundle) -> ScoreResult<f64> {
    let rates = Rates::new(Score::FleschKincaid, counts)?;
    let syllables_per_word = rates.per_word(counts.syllables);
    Ok(0.39f64.mul_add(
        rates.words_per_sentence,
        11.8f64.mul_add(syllables_per_word, -15.59),
    ))
}

/// Gunning Fog index.
pub fn gunning_fog(counts: &CountBundle) -> ScoreResult<f64> {
    let rates = Rates::new(Score::GunningFog, counts)?;
    let polysyllabic_share = rates.per_word(counts.polysyllabic_words);
    Ok(0.4 * 100f64.mul_add(polysyllabic_share, rates.words_per_sentence))
}

/// SMOG grade.
pub fn smog(counts: &CountBundle) -> ScoreResult<f64> {
    Rates::new(Score::Smog, counts)?;
    let per_thirty = counts.polysyllabic_words as f64 * (30.0 / counts.sentences as f64);
    Ok(1.0430f64.mul_add(per_thirty.sqrt(), 3.1291))
}

/// Dale-Chall readability score.
pub fn dale_chall(counts: &CountBundle) -> ScoreResult<f64> {
    let rates = Rates::new(Score::DaleChall, counts)?;
    let difficult_share = rates.per_word(counts.difficult_words);
    let base = if difficult_share > DALE_CHALL_THRESHOLD {
        DALE_CHALL_ADJUSTMENT
    } else {
        0.0
    };
    Ok(15.79f64.mul_add(
        difficult_share,
        0.0496f64.mul_add(rates.words_per_sentence, base),
    ))
}

/// All five scores for one passage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBundle {
    /// Flesch Reading Ease.
    pub flesch: f64,
    /// Flesch-Kincaid Grade Level.
    pub flesch_kincaid: f64,
    /// Gunning Fog index.
    pub gunning_fog: f64,
    /// SMOG grade.
    pub smog: f64,
    /// Dale-Chall readability score.
    pub dale_chall: f64,
}

impl ScoreBundle {
    /// Compute every score from one set of counts.
    pub fn from_counts(counts: &CountBundle) -> ScoreResult<Self> {
        Ok(Self {
            flesch: flesch(counts)?,
            flesch_kincaid: flesch_kincaid(counts)?,
            gunning_fog: gunning_fog(counts)?,
            smog: smog(counts)?,
            dale_chall: dale_chall(counts)?,
        })
    }

    /// Look up one score.
    pub const fn get(&self, score: Score) -> f64 {
        match score {
            Score::Flesch => self.flesch,
            Score::FleschKincaid => self.flesch_kincaid,
            Score::GunningFog => self.gunning_fog,
            Score::Smog => self.smog,
            Score::DaleChall => self.dale_chall,
        }
    }
}
