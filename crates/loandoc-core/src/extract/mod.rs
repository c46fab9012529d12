//! Loan-document field extraction module.

mod collateral;
mod customer;
mod financial;
mod loan;
mod parser;
pub mod rules;
pub mod vocabulary;

pub use collateral::extract_collateral_info;
pub use customer::extract_customer_info;
pub use financial::extract_financial_info;
pub use loan::extract_loan_info;
pub use parser::{extract, ExtractionResult, LoanDocumentParser};

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::ExtractionError;
use crate::models::config::ZeroPolicy;
use crate::models::document::SourceDocument;
use crate::models::loan::ParsedDocument;

use rules::{KeywordLocator, LabelMatch};
use vocabulary::{Field, FieldDefault, Vocabulary};

lazy_static! {
    static ref BUILTIN_FIELDS: FieldLocator = FieldLocator::compile(&Vocabulary::vietnamese(), ZeroPolicy::Legacy)
        .expect("built-in vocabulary compiles");
}

/// Trait for loan-document extractors.
pub trait DocumentExtractor {
    /// Extract all field groups from a source document.
    fn extract(&self, document: &SourceDocument) -> ParsedDocument;

    /// Extract all field groups from plain paragraph text.
    fn extract_from_text(&self, text: &str) -> ParsedDocument {
        self.extract(&SourceDocument::new(text, Vec::new()))
    }
}

struct CompiledField {
    locator: KeywordLocator,
    default: FieldDefault,
}

/// A vocabulary compiled into one locator per field.
///
/// Immutable once built; lookups only read the text they are given.
#[derive(Clone)]
pub struct FieldLocator {
    fields: std::sync::Arc<Vec<CompiledField>>,
    zero_policy: ZeroPolicy,
}

impl FieldLocator {
    /// Compile every rule of `vocabulary`.
    pub fn compile(vocabulary: &Vocabulary, zero_policy: ZeroPolicy) -> Result<Self, ExtractionError> {
        let fields = vocabulary
            .rules()
            .iter()
            .map(|rule| {
                if rule.keywords.is_empty() {
                    return Err(ExtractionError::EmptyKeywords(rule.field));
                }

                let invalid = |e: regex::Error| ExtractionError::InvalidPattern {
                    field: rule.field,
                    reason: e.to_string(),
                };

                let mut locator = KeywordLocator::new(rule.keywords.labels()).map_err(invalid)?;
                if let Some(pattern) = &rule.value_pattern {
                    locator = locator.with_value_pattern(Regex::new(pattern).map_err(invalid)?);
                }

                Ok(CompiledField {
                    locator,
                    default: rule.default.clone(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            fields: std::sync::Arc::new(fields),
            zero_policy,
        })
    }

    /// Locator for the built-in Vietnamese vocabulary.
    pub fn builtin() -> Self {
        BUILTIN_FIELDS.clone()
    }

    pub fn with_zero_policy(mut self, zero_policy: ZeroPolicy) -> Self {
        self.zero_policy = zero_policy;
        self
    }

    pub fn zero_policy(&self) -> ZeroPolicy {
        self.zero_policy
    }

    fn compiled(&self, field: Field) -> &CompiledField {
        &self.fields[field as usize]
    }

    /// Raw label hit for `field`, possibly with an empty value.
    pub fn find(&self, field: Field, text: &str) -> Option<LabelMatch<String>> {
        self.compiled(field).locator.find(text)
    }

    /// Non-empty text value of `field`.
    pub fn text(&self, field: Field, text: &str) -> Option<String> {
        self.find(field, text)
            .map(|m| m.value)
            .filter(|v| !v.is_empty())
    }

    /// Text value of `field`, or its default.
    pub fn text_or_default(&self, field: Field, text: &str) -> String {
        self.text(field, text).unwrap_or_else(|| match self.compiled(field).default {
            FieldDefault::Text(default) => default.to_string(),
            FieldDefault::Number(_) => String::new(),
        })
    }

    /// Number located for `field`, before the zero policy is applied.
    pub fn number(&self, field: Field, text: &str) -> Option<f64> {
        self.compiled(field).locator.find_number(text).map(|m| m.value)
    }

    /// Number located for `field` after the zero policy; `None` means the
    /// field's default (or derivation) should apply.
    pub fn resolved_number(&self, field: Field, text: &str) -> Option<f64> {
        self.zero_policy.resolve(self.number(field, text))
    }

    /// Number for `field`, or its default.
    pub fn number_or_default(&self, field: Field, text: &str) -> f64 {
        self.resolved_number(field, text).unwrap_or(match self.compiled(field).default {
            FieldDefault::Number(default) => default,
            FieldDefault::Text(_) => 0.0,
        })
    }

    /// Whether `field` has a usable value in `text`.
    pub fn is_located(&self, field: Field, text: &str) -> bool {
        match self.compiled(field).default {
            FieldDefault::Text(_) => self.text(field, text).is_some(),
            FieldDefault::Number(_) => self.number(field, text).is_some(),
        }
    }
}

impl std::fmt::Debug for FieldLocator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldLocator")
            .field("fields", &self.fields.len())
            .field("zero_policy", &self.zero_policy)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_compiles_every_field() {
        let fields = FieldLocator::builtin();
        for field in Field::ALL {
            assert!(!fields.is_located(field, ""), "{field} located in empty text");
        }
    }

    #[test]
    fn test_text_default() {
        let fields = FieldLocator::builtin();
        assert_eq!(fields.text_or_default(Field::LoanPurpose, ""), "Kinh doanh");
        assert_eq!(fields.text_or_default(Field::CustomerName, ""), "");
        assert_eq!(fields.text_or_default(Field::LoanPurpose, "Mục đích vay: "), "Kinh doanh");
    }

    #[test]
    fn test_number_default_and_zero_policy() {
        let text = "Lãi suất: 0%";
        let legacy = FieldLocator::builtin();
        assert_eq!(legacy.number(Field::InterestRate, text), Some(0.0));
        assert_eq!(legacy.number_or_default(Field::InterestRate, text), 8.5);

        let explicit = FieldLocator::builtin().with_zero_policy(ZeroPolicy::ExplicitZero);
        assert_eq!(explicit.number_or_default(Field::InterestRate, text), 0.0);
        assert_eq!(explicit.number_or_default(Field::InterestRate, ""), 8.5);
    }

    #[test]
    fn test_compile_rejects_bad_config() {
        let vocab = Vocabulary::vietnamese().with_keywords(Field::Equity, Vec::<String>::new());
        assert!(matches!(
            FieldLocator::compile(&vocab, ZeroPolicy::Legacy),
            Err(ExtractionError::EmptyKeywords(Field::Equity))
        ));

        let vocab = Vocabulary::vietnamese().with_value_pattern(Field::CustomerPhone, "(unclosed");
        assert!(matches!(
            FieldLocator::compile(&vocab, ZeroPolicy::Legacy),
            Err(ExtractionError::InvalidPattern { field: Field::CustomerPhone, .. })
        ));
    }
}
