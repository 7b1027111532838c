//! # Greek → Latin Transliteration
//!
//! Deterministic rewrite engine that turns a Greek string into Latin script using
//! one of two ordered rule sets:
//!
//! - **ELOT**: the ELOT-743 national standard ("Ευαγγελίστριας" → "Evangelistrias").
//! - **VoiceEquivalent**: a looser phonetic form that follows pronunciation
//!   ("Μπουμπουλίνας" → "Bouboulinas", doubled sigma between vowels).
//!
//! ## Algorithm
//!
//! 1. Empty input returns an empty string.
//! 2. Lower-case, then apply the *lower* rules (accents, diaeresis, diphthong
//!    disambiguation such as "αϊ" vs "αι").
//! 3. Upper-case, then apply the *upper* rules (consonant clusters such as
//!    "ΜΠ" → "B", "ΑΥ" + voiceless consonant → "AF", then the single letters).
//! 4. Lower-case and title-case the result.
//!
//! Every rule is a literal substring replacement applied to *all* occurrences,
//! in table order, and never re-applied once later rules have run. The order is
//! load-bearing: "ΑΥΘ" must become "AFΘ" before the bare "Α" and "Υ" rules see it.
//!
//! ```rust
//! use geoparse_core::transliterate::{transliterate, Ruleset};
//!
//! assert_eq!(transliterate("Αθήνα", Ruleset::Elot), "Athina");
//! assert_eq!(transliterate("Πατησίων", Ruleset::VoiceEquivalent), "Patission");
//! ```

use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

use crate::error::{GeoparseError, Result};

/// A literal `(match, replacement)` pair.
pub type ReplacementRule = (&'static str, &'static str);

/// Rule sets available for transliteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ruleset {
    /// ELOT-743 official transliteration.
    Elot,
    /// Phonetic ("voice equivalent") transliteration.
    VoiceEquivalent,
}

impl Ruleset {
    /// Selects a ruleset from the two request flags.
    ///
    /// ELOT takes precedence when both are set. Requesting neither is a
    /// configuration error, never a silent default.
    pub fn from_flags(elot: bool, voice_equivalent: bool) -> Result<Self> {
        match (elot, voice_equivalent) {
            (true, _) => Ok(Ruleset::Elot),
            (false, true) => Ok(Ruleset::VoiceEquivalent),
            (false, false) => Err(GeoparseError::Config(
                "select either the ELOT or the voice-equivalent transliteration".to_string(),
            )),
        }
    }

    /// Output column name used for this ruleset
    pub fn column_name(&self) -> &'static str {
        match self {
            Ruleset::Elot => "ELOT",
            Ruleset::VoiceEquivalent => "Voice_equivalent",
        }
    }

    /// Rules applied to the lower-cased string.
    pub fn lower_rules(&self) -> &'static [ReplacementRule] {
        // Both schemes share the same accent/diaeresis folding.
        ACCENT_LOWER
    }

    /// Rules applied to the upper-cased string.
    pub fn upper_rules(&self) -> &'static [ReplacementRule] {
        match self {
            Ruleset::Elot => ELOT_UPPER,
            Ruleset::VoiceEquivalent => VOICE_UPPER,
        }
    }
}

/// Transliterator bound to one ruleset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transliterator {
    ruleset: Ruleset,
}

impl Transliterator {
    pub fn new(ruleset: Ruleset) -> Self {
        Self { ruleset }
    }

    /// Builds a transliterator from request flags, see [`Ruleset::from_flags`].
    pub fn from_flags(elot: bool, voice_equivalent: bool) -> Result<Self> {
        Ruleset::from_flags(elot, voice_equivalent).map(Self::new)
    }

    pub fn ruleset(&self) -> Ruleset {
        self.ruleset
    }

    pub fn transliterate(&self, text: &str) -> String {
        transliterate(text, self.ruleset)
    }
}

/// Transliterates `text` with the given ruleset.
pub fn transliterate(text: &str, ruleset: Ruleset) -> String {
    if text.is_empty() {
        return String::new();
    }

    let lowered = apply_rules(text.to_lowercase(), ruleset.lower_rules());
    let uppered = apply_rules(lowered.to_uppercase(), ruleset.upper_rules());

    title_case(&uppered.to_lowercase())
}

/// Applies `rules` in order, each one replacing every occurrence in the
/// current string.
pub fn apply_rules(mut text: String, rules: &[(&str, &str)]) -> String {
    for &(from, to) in rules {
        if text.contains(from) {
            text = text.replace(from, to);
        }
    }
    text
}

/// Capitalizes the first cased grapheme of every word and lower-cases the rest.
///
/// A word starts at any cased grapheme that follows an uncased one (space,
/// digit, apostrophe, hyphen...), so "12α" becomes "12Α" and "o'neil" becomes
/// "O'Neil".
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut previous_cased = false;

    for grapheme in text.graphemes(true) {
        let cased = grapheme
            .chars()
            .next()
            .map(|c| c.is_lowercase() || c.is_uppercase())
            .unwrap_or(false);

        if cased && !previous_cased {
            out.push_str(&grapheme.to_uppercase());
        } else {
            out.push_str(&grapheme.to_lowercase());
        }
        previous_cased = cased;
    }

    out
}

/// Accent and diaeresis folding. `$$` is a placeholder that protects an iota
/// following an accented vowel from the diphthong rules.
const ACCENT_LOWER: &[ReplacementRule] = &[
    ("άι", "α$$"), ("όι", "ο$$"), ("έι", "ε$$"), ("ά", "α"), ("έ", "ε"), ("ΐ", "ϊ"),
    ("αϊ", "ai"), ("αΐ", "ai"), ("εϊ", "ei"), ("εΐ", "ei"), ("οϊ", "oi"), ("οΐ", "oi"),
    ("οϋ", "oi"), ("οΰ", "oi"), ("ϊ", "υ"), ("ΰ", "υ"), ("ί", "ι"), ("ή", "η"),
    ("ό", "ο"), ("ώ", "ω"), ("ύ", "υ"), ("ϋ", "υ"), ("ΰ", "υ"), ("$$", "ι"),
];

const ELOT_UPPER: &[ReplacementRule] = &[
    ("ΑΥΑ", "AVΑ"), ("ΑΥΒ", "AV"), ("ΑΥΓ", "AVΓ"), ("ΑΥΔ", "AVΔ"), ("ΑΥΕ", "AVΕ"), ("ΑΥΖ", "AVΖ"),
    ("ΑΥΗ", "AVΗ"), ("ΑΥΙ", "AVΙ"), ("ΑΥΛ", "AVΛ"), ("ΑΥΜ", "AVΜ"), ("ΑΥΝ", "AVΝ"), ("ΑΥΡ", "AVΡ"),
    ("ΑΥΟ", "AVΟ"), ("ΑΥΥ", "AVΥ"), ("ΑΥΩ", "AVΩ"), ("ΑΥΘ", "AFΘ"), ("ΑΥΚ", "AFΚ"), ("ΑΥΞ", "AFΞ"),
    ("ΑΥΠ", "AFΠ"), ("ΑΥΣ", "AFΣ"), ("ΑΥΤ", "AFΤ"), ("ΑΥΦ", "AFΦ"), ("ΑΥΧ", "AFΧ"), ("ΑΥΨ", "AFΨ"),
    ("ΑΥ ", "AF "), ("ΕΥΑ", "EVΑ"), ("ΕΥΒ", "EV"), ("ΕΥΓ", "EVΓ"), ("ΕΥΔ", "EVΔ"), ("ΕΥΕ", "EVΕ"),
    ("ΕΥΖ", "EVΖ"), ("ΕΥΗ", "EVΗ"), ("ΕΥΙ", "EVΙ"), ("ΕΥΛ", "EVΛ"), ("ΕΥΜ", "EVΜ"), ("ΕΥΝ", "EVΝ"),
    ("ΕΥΡ", "EVΡ"), ("ΕΥΟ", "EVΟ"), ("ΕΥΥ", "EVΥ"), ("ΕΥΩ", "EVΩ"), ("ΕΥΘ", "EFΘ"), ("ΕΥΚ", "EFΚ"),
    ("ΕΥΞ", "EFΞ"), ("ΕΥΠ", "EFΠ"), ("ΕΥΣ", "EFΣ"), ("ΕΥΤ", "EFΤ"), ("ΕΥΦ", "EFΦ"), ("ΕΥΧ", "EFΧ"),
    ("ΕΥΨ", "EFΨ"), ("ΕΥ ", "EF "), ("ΗΥΑ", "IVΑ"), ("ΗΥΒ", "IV"), ("ΗΥΓ", "IVΓ"), ("ΗΥΔ", "IVΔ"),
    ("ΗΥΕ", "IVΕ"), ("ΗΥΖ", "IVΖ"), ("ΗΥΗ", "IVΗ"), ("ΗΥΙ", "IVΙ"), ("ΗΥΛ", "IVΛ"), ("ΗΥΜ", "IVΜ"),
    ("ΗΥΝ", "IVΝ"), ("ΗΥΡ", "IVΡ"), ("ΗΥΟ", "IVΟ"), ("ΗΥΥ", "IVΥ"), ("ΗΥΩ", "IVΩ"), ("ΗΥΘ", "IFΘ"),
    ("ΗΥΚ", "IFΚ"), ("ΗΥΞ", "IFΞ"), ("ΗΥΠ", "IFΠ"), ("ΗΥΣ", "IFΣ"), ("ΗΥΤ", "IFΤ"), ("ΗΥΦ", "IFΦ"),
    ("ΗΥΧ", "IFΧ"), ("ΗΥΨ", "IFΨ"), ("ΗΥ ", "IF "), (" ΜΠ", " B"), ("ΓΓ", "NG"), ("ΓΞ", "NX"),
    ("ΓΧ", "NCH"), ("ΟΥ", "OU"), ("Χ", "CH"), ("Ψ", "PS"), ("Θ", "TH"), ("Ά", "A"),
    ("Α", "A"), ("Β", "V"), ("Γ", "G"), ("Δ", "D"), ("Ε", "E"), ("Έ", "E"),
    ("Ζ", "Z"), ("Η", "I"), ("Ή", "I"), ("Ι", "I"), ("Ί", "I"), ("Κ", "K"),
    ("Λ", "L"), ("Μ", "M"), ("Ν", "N"), ("Ξ", "X"), ("Ο", "O"), ("Π", "P"),
    ("Ρ", "R"), ("Σ", "S"), ("Τ", "T"), ("Ύ", "Y"), ("Υ", "Y"), ("Φ", "F"),
    ("Ω", "O"), ("Ώ", "O"),
];

const VOICE_UPPER: &[ReplacementRule] = &[
    ("ΑΥΣΑ", "ΑΥSΑ"), ("ΑΥΣΕ", "ΑΥSΕ"), ("ΑΥΣΙ", "ΑΥSΙ"), ("ΑΥΣΗ", "ΑΥSΗ"), ("ΑΥΣΟ", "ΑΥSΟ"), ("ΑΥΣΥ", "ΑΥSΥ"),
    ("ΑΥΣΩ", "ΑΥSΩ"), ("ΕΥΣΑ", "ΕΥSΑ"), ("ΕΥΣΕ", "ΕΥSΕ"), ("ΕΥΣΙ", "ΕΥSΙ"), ("ΕΥΣΗ", "ΕΥSΗ"), ("ΕΥΣΟ", "ΕΥSΟ"),
    ("ΕΥΣΥ", "ΕΥSΥ"), ("ΕΥΣΩ", "ΕΥSΩ"), ("ΕΙΣΑ", "ΕΙΣΣΑ"), ("ΕΙΣΕ", "ΕΙΣΣΕ"), ("ΕΙΣΙ", "ΕΙΣΣΙ"), ("ΕΙΣΗ", "ΕΙΣΣΗ"),
    ("ΕΙΣΟ", "ΕΙΣΣΟ"), ("ΕΙΣΥ", "ΕΙΣΣΥ"), ("ΕΙΣΩ", "ΕΙΣΣΩ"), ("ΥΙΣΑ", "ΥΙΣΣΑ"), ("ΥΙΣΕ", "ΥΙΣΣΕ"), ("ΥΙΣΙ", "ΥΙΣΣΙ"),
    ("ΥΙΣΗ", "ΥΙΣΣΗ"), ("ΥΙΣΟ", "ΥΙΣΣΟ"), ("ΥΙΣΥ", "ΥΙΣΣΥ"), ("ΥΙΣΩ", "ΥΙΣΣΩ"), ("ΑΙΣΑ", "ΑΙΣΣΑ"), ("ΑΙΣΕ", "ΑΙΣΣΕ"),
    ("ΑΙΣΙ", "ΑΙΣΣΙ"), ("ΑΙΣΗ", "ΑΙΣΣΗ"), ("ΑΙΣΟ", "ΑΙΣΣΟ"), ("ΑΙΣΥ", "ΑΙΣΣΥ"), ("ΑΙΣΩ", "ΑΙΣΣΩ"), ("ΟΙΣΑ", "ΟΙΣΣΑ"),
    ("ΟΙΣΕ", "ΟΙΣΣΕ"), ("ΟΙΣΙ", "ΟΙΣΣΙ"), ("ΟΙΣΗ", "ΟΙΣΣΗ"), ("ΟΙΣΟ", "ΟΙΣΣΟ"), ("ΟΙΣΥ", "ΟΙΣΣΥ"), ("ΟΙΣΩ", "ΟΙΣΣΩ"),
    ("ΟΥΣΑ", "ΟΥΣΣΑ"), ("ΟΥΣΕ", "ΟΥΣΣΕ"), ("ΟΥΣΙ", "ΟΥΣΣΙ"), ("ΟΥΣΗ", "ΟΥΣΣΗ"), ("ΟΥΣΟ", "ΟΥΣΣΟ"), ("ΟΥΣΥ", "ΟΥΣΣΥ"),
    ("ΟΥΣΩ", "ΟΥΣΣΩ"), ("ΑΣΥΙ", "ΑΣΣΥΙ"), ("ΕΣΥΙ", "ΕΣΣΥΙ"), ("ΙΣΥΙ", "ΙΣΣΥΙ"), ("ΗΣΥΙ", "ΗΣΣΥΙ"), ("ΟΣΥΙ", "ΟΣΣΥΙ"),
    ("ΥΣΥΙ", "ΥΣΣΥΙ"), ("ΩΣΥΙ", "ΩΣΣΥΙ"), ("ΑΣΑΙ", "ΑΣΣΑΙ"), ("ΕΣΑΙ", "ΕΣΣΑΙ"), ("ΙΣΑΙ", "ΙΣΣΑΙ"), ("ΗΣΑΙ", "ΗΣΣΑΙ"),
    ("ΟΣΑΙ", "ΟΣΣΑΙ"), ("ΥΣΑΙ", "ΥΣΣΑΙ"), ("ΩΣΑΙ", "ΩΣΣΑΙ"), ("ΑΣΟΙ", "ΑΣΣΟΙ"), ("ΕΣΟΙ", "ΕΣΣΟΙ"), ("ΙΣΟΙ", "ΙΣΣΟΙ"),
    ("ΗΣΟΙ", "ΗΣΣΟΙ"), ("ΟΣΟΙ", "ΟΣΣΟΙ"), ("ΥΣΟΙ", "ΥΣΣΟΙ"), ("ΩΣΟΙ", "ΩΣΣΟΙ"), ("ΑΣΟΥ", "ΑΣΣΟΥ"), ("ΕΣΟΥ", "ΕΣΣΟΥ"),
    ("ΙΣΟΥ", "ΙΣΣΟΥ"), ("ΗΣΟΥ", "ΗΣΣΟΥ"), ("ΟΣΟΥ", "ΟΣΣΟΥ"), ("ΥΣΟΥ", "ΥΣΣΟΥ"), ("ΩΣΟΥ", "ΩΣΣΟΥ"), ("ΑΣΕΥ", "ΑΣΣΕΥ"),
    ("ΕΣΕΥ", "ΕΣΣΕΥ"), ("ΙΣΕΥ", "ΙΣΣΕΥ"), ("ΗΣΕΥ", "ΗΣΣΕΥ"), ("ΟΣΕΥ", "ΟΣΣΕΥ"), ("ΥΣΕΥ", "ΥΣΣΕΥ"), ("ΩΣΕΥ", "ΩΣΣΕΥ"),
    ("ΑΣΑΥ", "ΑΣΣΑΥ"), ("ΕΣΑΥ", "ΕΣΣΑΥ"), ("ΙΣΑΥ", "ΙΣΣΑΥ"), ("ΗΣΑΥ", "ΗΣΣΑΥ"), ("ΟΣΑΥ", "ΟΣΣΑΥ"), ("ΥΣΑΥ", "ΥΣΣΑΥ"),
    ("ΩΣΑΥ", "ΩΣΣΑΥ"), ("ΑΣΕΙ", "ΑΣΣΕΙ"), ("ΕΣΕΙ", "ΕΣΣΕΙ"), ("ΙΣΕΙ", "ΙΣΣΕΙ"), ("ΗΣΕΙ", "ΗΣΣΕΙ"), ("ΟΣΕΙ", "ΟΣΣΕΙ"),
    ("ΥΣΕΙ", "ΥΣΣΕΙ"), ("ΩΣΕΙ", "ΩΣΣΕΙ"), ("ΑΣΑ", "ΑΣΣΑ"), ("ΑΣΕ", "ΑΣΣΕ"), ("ΑΣΗ", "ΑΣΣΗ"), ("ΑΣΙ", "ΑΣΣΙ"),
    ("ΑΣΟ", "ΑΣΣΟ"), ("ΑΣΥ", "ΑΣΣΥ"), ("ΑΣΩ", "ΑΣΣΩ"), ("ΕΣΑ", "ΕΣΣΑ"), ("ΕΣΕ", "ΕΣΣΕ"), ("ΕΣΗ", "ΕΣΣΗ"),
    ("ΕΣΙ", "ΕΣΣΙ"), ("ΕΣΟ", "ΕΣΣΟ"), ("ΕΣΥ", "ΕΣΣΥ"), ("ΕΣΩ", "ΕΣΣΩ"), ("ΗΣΑ", "ΕΣΣΑ"), ("ΗΣΕ", "ΕΣΣΕ"),
    ("ΗΣΗ", "ΕΣΣΗ"), ("ΗΣΙ", "ΗΣΣΙ"), ("ΗΣΙ", "ΕΣΣΙ"), ("ΗΣΟ", "ΗΣΣΟ"), ("ΗΣΟ", "ΕΣΣΟ"), ("ΗΣΥ", "ΕΣΣΥ"),
    ("ΗΣΩ", "ΕΣΣΩ"), ("ΙΣΑ", "IΣΣΑ"), ("ΙΣΕ", "IΣΣΕ"), ("ΙΣΗ", "IΣΣΗ"), ("ΙΣΙ", "IΣΣΙ"), ("ΙΣΟ", "IΣΣΟ"),
    ("ΙΣΥ", "IΣΣΥ"), ("ΙΣΩ", "IΣΣΩ"), ("ΟΣΑ", "ΟΣΣΑ"), ("ΟΣΕ", "ΟΣΣΕ"), ("ΟΣΗ", "ΟΣΣΗ"), ("ΟΣΙ", "ΟΣΣΙ"),
    ("ΟΣΟ", "ΟΣΣΟ"), ("ΟΣΥ", "ΟΣΣΥ"), ("ΟΣΩ", "ΟΣΣΩ"), ("ΥΣΑ", "ΥΣΣΑ"), ("ΥΣΕ", "ΥΣΣΕ"), ("ΥΣΗ", "ΥΣΣΗ"),
    ("ΥΣΙ", "ΥΣΣΙ"), ("ΥΣΟ", "ΥΣΣΟ"), ("ΥΣΥ", "ΥΣΣΥ"), ("ΥΣΩ", "ΥΣΣΩ"), ("ΩΣΑ", "ΩΣΣΑ"), ("ΩΣΕ", "ΩΣΣΕ"),
    ("ΩΣΗ", "ΩΣΣΗ"), ("ΩΣΙ", "ΩΣΣΙ"), ("ΩΣΟ", "ΩΣΣΟ"), ("ΩΣΥ", "ΩΣΣΥ"), ("ΩΣΩ", "ΩΣΣΩ"), ("ΕΥΒ", "EV"),
    ("ΕΥΔ", "EVD"), ("ΕΥΜ", "EVM"), ("ΕΥΓ", "EVG"), ("ΕΥΗ", "EVI"), ("ΕΥΑ", "EVA"), ("ΕΥΜ", "EVM"),
    ("ΕΥΛ", "EVL"), ("ΕΥΝ", "EVN"), ("ΕΥΟ", "EVO"), ("ΕΥΡ", "EVR"), ("ΕΥΕ", "EVE"), ("ΑΥΔ", "AYD"),
    ("ΑΥΜ", "AVM"), ("ΑΥΓ", "AVG"), ("ΑΥΗ", "AVI"), ("ΑΥΑ", "AVA"), ("ΑΥΜ", "AVM"), ("ΑΥΛ", "AVL"),
    ("ΑΥΝ", "AVN"), ("ΑΥΟ", "AVO"), ("ΑΥΡ", "AVR"), ("ΑΥΕ", "AVE"), ("ΓΓ", "G"), ("ΓΚ", "G"),
    ("ΜΠ", "B"), ("ΝΤ", "D"), ("ΟΥ", "OU"), ("ΟΙ", "I"), ("ΥΙ", "I"), ("ΕΙ", "I"),
    ("ΑΙ", "E"), ("ΑΥ", "AF"), ("ΕΥΗ", "EVI"), ("ΕΥ", "EF"), ("Χ", "CH"), ("Ψ", "PS"),
    ("Θ", "TH"), ("Ά", "A"), ("Α", "A"), ("Β", "V"), ("Γ", "G"), ("Δ", "D"),
    ("Ε", "E"), ("Έ", "E"), ("Ζ", "Z"), ("Η", "I"), ("Ή", "I"), ("Ι", "I"),
    ("Ί", "I"), ("Κ", "K"), ("Λ", "L"), ("Μ", "M"), ("Ν", "N"), ("Ξ", "X"),
    ("Ο", "O"), ("Π", "P"), ("Ρ", "R"), ("Σ", "S"), ("Τ", "T"), ("Ύ", "I"),
    ("Υ", "I"), ("Φ", "F"), ("Ω", "O"), ("Ώ", "O"),
];
