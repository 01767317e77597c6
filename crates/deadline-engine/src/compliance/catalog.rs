//! Rule catalog — ordered deadline rules per case type
//!
//! Built from `rules.toml` (or programmatically) and validated once at
//! construction: rule names are unique within a case type, names and
//! descriptions pass field validation, and offsets stay within
//! `MAX_OFFSET_DAYS`. A catalog is read-only afterwards.

use std::collections::{BTreeMap, HashSet};

use shared_types::{
    field_error_messages, CaseType, ConfigError, DeadlineRule, RuleCatalogFile,
    CONFIG_FORMAT_VERSION,
};
use validator::Validate;

/// The rule catalog shipped in `config/rules.toml`.
const BUILTIN_RULES: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config/rules.toml"));

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleCatalog {
    rule_sets: BTreeMap<CaseType, Vec<DeadlineRule>>,
}

impl RuleCatalog {
    /// Build a catalog from `(case type, rule)` pairs. Pair order is catalog
    /// order within each case type.
    pub fn from_rules(
        rules: impl IntoIterator<Item = (CaseType, DeadlineRule)>,
    ) -> Result<Self, ConfigError> {
        let mut rule_sets: BTreeMap<CaseType, Vec<DeadlineRule>> = BTreeMap::new();
        let mut seen: HashSet<(CaseType, String)> = HashSet::new();

        for (case_type, rule) in rules {
            validate_rule(case_type, &rule)?;
            if !seen.insert((case_type, rule.name.clone())) {
                return Err(ConfigError::DuplicateRule {
                    case_type,
                    name: rule.name,
                });
            }
            rule_sets.entry(case_type).or_default().push(rule);
        }

        Ok(Self { rule_sets })
    }

    /// Parse a catalog from the contents of a `rules.toml` file. `source` names
    /// the file in error messages.
    pub fn from_toml_str(contents: &str, source: &str) -> Result<Self, ConfigError> {
        let file: RuleCatalogFile = toml::from_str(contents).map_err(|e| ConfigError::Parse {
            path: source.to_string(),
            message: e.to_string(),
        })?;
        if file.version != CONFIG_FORMAT_VERSION {
            return Err(ConfigError::UnsupportedVersion {
                path: source.to_string(),
                version: file.version,
            });
        }
        Self::from_rules(file.rules.into_iter().map(|entry| entry.into_rule()))
    }

    /// The catalog compiled into the binary from `config/rules.toml`.
    pub fn builtin() -> Result<Self, ConfigError> {
        Self::from_toml_str(BUILTIN_RULES, "config/rules.toml (builtin)")
    }

    /// Rules for a case type in catalog order, or `None` when the catalog has
    /// no entry for it.
    pub fn rules_for(&self, case_type: CaseType) -> Option<&[DeadlineRule]> {
        self.rule_sets.get(&case_type).map(Vec::as_slice)
    }

    pub fn contains(&self, case_type: CaseType) -> bool {
        self.rule_sets.contains_key(&case_type)
    }

    /// Case types present in the catalog.
    pub fn case_types(&self) -> impl Iterator<Item = CaseType> + '_ {
        self.rule_sets.keys().copied()
    }

    /// Total number of rules across all case types.
    pub fn len(&self) -> usize {
        self.rule_sets.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.rule_sets.is_empty()
    }

    /// Largest `|offset_days|` across the catalog; bounds the work of one
    /// computation.
    pub fn max_offset(&self) -> u32 {
        self.rule_sets
            .values()
            .flatten()
            .map(|r| r.offset_days.unsigned_abs())
            .max()
            .unwrap_or(0)
    }
}

fn validate_rule(case_type: CaseType, rule: &DeadlineRule) -> Result<(), ConfigError> {
    if let Err(errors) = rule.validate() {
        return Err(ConfigError::InvalidRule {
            case_type,
            name: rule.name.clone(),
            field_errors: field_error_messages(&errors),
        });
    }
    if rule.name.trim().is_empty() {
        let mut field_errors = std::collections::HashMap::new();
        field_errors.insert("name".to_string(), "rule name must not be blank".to_string());
        return Err(ConfigError::InvalidRule {
            case_type,
            name: rule.name.clone(),
            field_errors,
        });
    }
    if !rule.offset_in_bounds() {
        return Err(ConfigError::OffsetOutOfRange {
            case_type,
            name: rule.name.clone(),
            offset_days: rule.offset_days,
        });
    }
    Ok(())
}
