use std::collections::HashMap;

use phasewatch_types::{FallbackLabels, LabelEntry, LabelTableConfig};

/// Indexed discriminant → label table.
///
/// Resolution is a pure function of the discriminant and the two override
/// flags; the table holds no per-sample state.
#[derive(Debug, Clone, Default)]
pub struct LabelTable {
    entries: Vec<LabelEntry>,
    /// Discriminant -> index into `entries`
    code_index: HashMap<u32, usize>,
    fallback: FallbackLabels,
}

impl LabelTable {
    pub fn new(config: &LabelTableConfig) -> Self {
        let mut code_index = HashMap::new();
        for (idx, entry) in config.entries.iter().enumerate() {
            for &code in &entry.codes {
                if let Some(&existing) = code_index.get(&code) {
                    // Keep the first definition
                    let first: &LabelEntry = &config.entries[existing];
                    tracing::warn!(
                        code,
                        kept = %first.label,
                        ignored = %entry.label,
                        "Duplicate discriminant in label table"
                    );
                    continue;
                }
                code_index.insert(code, idx);
            }
        }

        Self {
            entries: config.entries.clone(),
            code_index,
            fallback: config.fallback.clone(),
        }
    }

    pub fn get(&self, discriminant: u32) -> Option<&LabelEntry> {
        self.code_index.get(&discriminant).map(|&idx| &self.entries[idx])
    }

    /// Pick the label for the current signals.
    ///
    /// A known discriminant selects its entry (the empowered variant while
    /// the standard override is active). An unknown discriminant falls back
    /// to the dominant or generic in-flight label. Without a discriminant
    /// only an active override produces a label.
    pub fn resolve(
        &self,
        discriminant: Option<u32>,
        standard_override: bool,
        dominant_override: bool,
    ) -> Option<&str> {
        if let Some(code) = discriminant {
            if let Some(entry) = self.get(code) {
                if standard_override && let Some(empowered) = &entry.empowered_label {
                    return Some(empowered.as_str());
                }
                return Some(entry.label.as_str());
            }
            return Some(if dominant_override {
                self.fallback.dominant.as_str()
            } else {
                self.fallback.in_flight.as_str()
            });
        }

        if dominant_override {
            Some(self.fallback.dominant.as_str())
        } else if standard_override {
            Some(self.fallback.standard.as_str())
        } else {
            None
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(codes: &[u32], label: &str, empowered: Option<&str>) -> LabelEntry {
        LabelEntry {
            codes: codes.to_vec(),
            label: label.to_string(),
            empowered_label: empowered.map(str::to_string),
        }
    }

    fn table() -> LabelTable {
        LabelTable::new(&LabelTableConfig {
            entries: vec![
                entry(&[1, 2, 3], "FUMA SHURIKEN", None),
                entry(&[6, 7], "KATON", Some("GOKA MEKKYAKU")),
                entry(&[9, 11], "RAITON", None),
            ],
            fallback: FallbackLabels {
                in_flight: "NINJUTSU".to_string(),
                standard: "KASSATSU".to_string(),
                dominant: "TEN CHI JIN".to_string(),
            },
        })
    }

    #[test]
    fn test_known_codes() {
        let t = table();
        assert_eq!(t.resolve(Some(2), false, false), Some("FUMA SHURIKEN"));
        assert_eq!(t.resolve(Some(11), false, false), Some("RAITON"));
        assert_eq!(t.resolve(Some(7), false, true), Some("KATON"));
    }

    #[test]
    fn test_empowered_variant_under_standard_override() {
        let t = table();
        assert_eq!(t.resolve(Some(6), true, false), Some("GOKA MEKKYAKU"));
        // Entries without a variant are unaffected
        assert_eq!(t.resolve(Some(9), true, false), Some("RAITON"));
    }

    #[test]
    fn test_unknown_code_fallbacks() {
        let t = table();
        assert_eq!(t.resolve(Some(99), false, false), Some("NINJUTSU"));
        assert_eq!(t.resolve(Some(99), true, false), Some("NINJUTSU"));
        assert_eq!(t.resolve(Some(99), true, true), Some("TEN CHI JIN"));
    }

    #[test]
    fn test_no_discriminant() {
        let t = table();
        assert_eq!(t.resolve(None, false, false), None);
        assert_eq!(t.resolve(None, true, false), Some("KASSATSU"));
        assert_eq!(t.resolve(None, true, true), Some("TEN CHI JIN"));
    }

    #[test]
    fn test_duplicate_code_keeps_first() {
        let t = LabelTable::new(&LabelTableConfig {
            entries: vec![entry(&[5], "FIRST", None), entry(&[5, 8], "SECOND", None)],
            fallback: FallbackLabels::default(),
        });
        assert_eq!(t.get(5).map(|e| e.label.as_str()), Some("FIRST"));
        assert_eq!(t.get(8).map(|e| e.label.as_str()), Some("SECOND"));
        assert_eq!(t.len(), 2);
        assert!(!t.is_empty());
    }

    #[test]
    fn test_empty_table_still_has_fallbacks() {
        let t = LabelTable::new(&LabelTableConfig::default());
        assert!(t.is_empty());
        assert_eq!(t.resolve(Some(6), false, false), Some("IN PROGRESS"));
        assert_eq!(t.resolve(None, true, false), Some("OVERRIDE"));
    }
}
