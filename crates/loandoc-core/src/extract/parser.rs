//! Loan-document parser assembling all field groups.

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::ExtractionError;
use crate::models::config::{ExtractionConfig, ZeroPolicy};
use crate::models::document::SourceDocument;
use crate::models::loan::ParsedDocument;

use super::vocabulary::{Field, Vocabulary};
use super::{
    extract_collateral_info, extract_customer_info, extract_financial_info, extract_loan_info,
    DocumentExtractor, FieldLocator,
};

lazy_static! {
    static ref DEFAULT_PARSER: LoanDocumentParser = LoanDocumentParser::new();
}

/// Extract a [`ParsedDocument`] with the built-in vocabulary.
pub fn extract(document: &SourceDocument) -> ParsedDocument {
    DEFAULT_PARSER.extract(document)
}

/// Wall-clock timer for the extraction report. `std::time::Instant` is
/// unavailable on `wasm32-unknown-unknown`, where it always reads zero.
struct Stopwatch {
    #[cfg(not(target_arch = "wasm32"))]
    start: std::time::Instant,
}

impl Stopwatch {
    fn start() -> Self {
        Self {
            #[cfg(not(target_arch = "wasm32"))]
            start: std::time::Instant::now(),
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn elapsed_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }

    #[cfg(target_arch = "wasm32")]
    fn elapsed_ms(&self) -> u64 {
        0
    }
}

/// Result of parsing one document, with diagnostics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// Extracted record.
    pub document: ParsedDocument,
    /// Fields whose labels were not located (defaults applied).
    pub missing_fields: Vec<Field>,
    /// Extraction warnings.
    pub warnings: Vec<String>,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// Keyword-driven loan-document parser.
///
/// Holds only the compiled vocabulary, so one parser can serve many
/// documents concurrently.
#[derive(Debug, Clone)]
pub struct LoanDocumentParser {
    fields: FieldLocator,
}

impl LoanDocumentParser {
    /// Create a parser with the built-in vocabulary and legacy zero policy.
    pub fn new() -> Self {
        Self {
            fields: FieldLocator::builtin(),
        }
    }

    /// Create a parser from a custom vocabulary.
    pub fn with_vocabulary(vocabulary: &Vocabulary, zero_policy: ZeroPolicy) -> Result<Self, ExtractionError> {
        Ok(Self {
            fields: FieldLocator::compile(vocabulary, zero_policy)?,
        })
    }

    /// Create a parser from extraction configuration.
    pub fn from_config(config: &ExtractionConfig) -> Result<Self, ExtractionError> {
        if config.keywords.is_empty() && config.value_patterns.is_empty() {
            return Ok(Self::new().with_zero_policy(config.zero_policy));
        }
        Self::with_vocabulary(&config.vocabulary(), config.zero_policy)
    }

    /// Set the zero policy.
    pub fn with_zero_policy(mut self, zero_policy: ZeroPolicy) -> Self {
        self.fields = self.fields.with_zero_policy(zero_policy);
        self
    }

    pub fn zero_policy(&self) -> ZeroPolicy {
        self.fields.zero_policy()
    }

    /// Parse a document and report which fields fell back to defaults.
    pub fn parse(&self, document: &SourceDocument) -> ExtractionResult {
        let stopwatch = Stopwatch::start();
        let text = document.full_text();

        info!(
            "Parsing loan document from {} characters of text, {} tables",
            text.len(),
            document.tables().len()
        );

        let parsed = self.extract(document);

        let missing_fields: Vec<Field> = Field::ALL
            .into_iter()
            .filter(|field| !self.fields.is_located(*field, text))
            .collect();

        let mut warnings: Vec<String> = missing_fields
            .iter()
            .map(|field| format!("Could not locate {}", field))
            .collect();

        let loan = &parsed.loan_info;
        if self.fields.resolved_number(Field::LoanAmount, text).is_none() && loan.total_need > 0.0 {
            warnings.push(format!(
                "Derived {} as total_need - equity",
                Field::LoanAmount
            ));
        }

        debug!(
            "Extracted loan document with {} of {} fields located",
            Field::ALL.len() - missing_fields.len(),
            Field::ALL.len()
        );

        ExtractionResult {
            document: parsed,
            missing_fields,
            warnings,
            processing_time_ms: stopwatch.elapsed_ms(),
        }
    }
}

impl Default for LoanDocumentParser {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentExtractor for LoanDocumentParser {
    fn extract(&self, document: &SourceDocument) -> ParsedDocument {
        let text = document.full_text();

        if !document.tables().is_empty() {
            let rows: usize = document.tables().iter().map(|t| t.rows().len()).sum();
            debug!(
                "Ignoring {} tables ({} rows); fields are read from paragraph text",
                document.tables().len(),
                rows
            );
        }

        ParsedDocument {
            customer_info: extract_customer_info(&self.fields, text),
            loan_info: extract_loan_info(&self.fields, text),
            collateral_info: extract_collateral_info(&self.fields, text),
            financial_info: extract_financial_info(&self.fields, text),
            raw_text: text.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::document::Table;
    use crate::models::loan::{CollateralInfo, CustomerInfo, FinancialInfo, LoanInfo};
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = "PHƯƠNG ÁN SỬ DỤNG VỐN
Họ và tên: Phạm Minh Đức
CCCD: 079090001234
Địa chỉ: 25 Nguyễn Huệ, Quận 1, TP. Hồ Chí Minh
Số điện thoại: 0903 111 222
Mục đích vay: Mua căn hộ để ở
Tổng nhu cầu vốn: 1.000.000.000 đồng
Vốn đối ứng: 200.000.000 đồng
Lãi suất: 10,5%/năm
Thời hạn vay: 240 tháng
TSBĐ: Căn hộ chung cư
Giá trị thị trường: 1.500.000.000 đồng
Tọa lạc tại: Căn 12.05, Block A, Quận 7
Tỷ lệ cho vay: 60%
Giấy tờ pháp lý: Hợp đồng mua bán căn hộ
Thu nhập hàng tháng: 40.000.000 đồng
Chi phí hàng tháng: 12.000.000 đồng";

    fn sample_document() -> SourceDocument {
        SourceDocument::from_paragraphs(SAMPLE.lines(), Vec::new())
    }

    #[test]
    fn test_parse_full_document() {
        let parsed = LoanDocumentParser::new().extract(&sample_document());

        let expected = ParsedDocument {
            customer_info: CustomerInfo {
                name: "Phạm Minh Đức".to_string(),
                national_id: "079090001234".to_string(),
                address: "25 Nguyễn Huệ, Quận 1, TP. Hồ Chí Minh".to_string(),
                phone: "0903 111 222".to_string(),
            },
            loan_info: LoanInfo {
                purpose: "Mua căn hộ để ở".to_string(),
                total_need: 1_000_000_000.0,
                equity: 200_000_000.0,
                loan_amount: 800_000_000.0,
                equity_ratio: 20.0,
                interest_rate: 10.5,
                loan_term: 240,
                payment_frequency: "Tháng".to_string(),
            },
            collateral_info: CollateralInfo {
                asset_type: "Căn hộ chung cư".to_string(),
                market_value: 1_500_000_000.0,
                asset_address: "Căn 12.05, Block A, Quận 7".to_string(),
                ltv: 60.0,
                legal_docs: "Hợp đồng mua bán căn hộ".to_string(),
            },
            financial_info: FinancialInfo {
                monthly_income: 40_000_000.0,
                monthly_expense: 12_000_000.0,
                other_debt: 0.0,
            },
            raw_text: SAMPLE.to_string(),
        };

        assert_eq!(parsed, expected);
    }

    #[test]
    fn test_parse_reports_missing_fields() {
        let result = LoanDocumentParser::new().parse(&sample_document());

        assert_eq!(result.missing_fields, vec![Field::LoanAmount, Field::OtherDebt]);
        assert!(result.warnings.iter().any(|w| w == "Could not locate financial_info.other_debt"));
        assert!(result.warnings.iter().any(|w| w.starts_with("Derived loan_info.loan_amount")));
    }

    #[test]
    fn test_empty_document() {
        let parsed = extract(&SourceDocument::default());

        assert_eq!(parsed, ParsedDocument::default());
        assert_eq!(parsed.raw_text, "");
        assert_eq!(parsed.customer_info.name, "");
        assert_eq!(parsed.loan_info.interest_rate, 8.5);
        assert_eq!(parsed.loan_info.loan_term, 120);
        assert_eq!(parsed.collateral_info.ltv, 70.0);

        let result = LoanDocumentParser::new().parse(&SourceDocument::default());
        assert_eq!(result.missing_fields, Field::ALL.to_vec());
    }

    #[test]
    fn test_extract_is_deterministic() {
        let doc = sample_document();
        let parser = LoanDocumentParser::new();

        let first = serde_json::to_string(&parser.extract(&doc)).unwrap();
        let second = serde_json::to_string(&parser.extract(&doc)).unwrap();
        assert_eq!(first, second);
        assert_eq!(first, serde_json::to_string(&extract(&doc)).unwrap());
    }

    #[test]
    fn test_tables_are_accepted_and_ignored() {
        let table = Table::from_rows(vec![vec!["Lãi suất", "12%"], vec!["Thời hạn vay", "36 tháng"]]);
        let doc = SourceDocument::new("Họ và tên: Võ Thị Hoa", vec![table]);

        let parsed = extract(&doc);
        assert_eq!(parsed.customer_info.name, "Võ Thị Hoa");
        assert_eq!(parsed.loan_info.interest_rate, 8.5);
        assert_eq!(parsed.loan_info.loan_term, 120);
    }

    #[test]
    fn test_from_config_overrides() {
        let mut config = ExtractionConfig::default();
        config.keywords.insert(Field::CustomerName, vec!["Borrower".to_string()]);
        config.value_patterns.insert(Field::CustomerPhone, r"(\d{4} \d{3} \d{3})".to_string());
        config.zero_policy = ZeroPolicy::ExplicitZero;

        let parser = LoanDocumentParser::from_config(&config).unwrap();
        assert_eq!(parser.zero_policy(), ZeroPolicy::ExplicitZero);

        let text = "Borrower: Jane Tran\nSố điện thoại: di động 0903 111 222 (Zalo)\nLãi suất: 0%";
        let parsed = parser.extract_from_text(text);
        assert_eq!(parsed.customer_info.name, "Jane Tran");
        assert_eq!(parsed.customer_info.phone, "0903 111 222");
        assert_eq!(parsed.loan_info.interest_rate, 0.0);
    }

    #[test]
    fn test_from_config_rejects_invalid_pattern() {
        let mut config = ExtractionConfig::default();
        config.value_patterns.insert(Field::Ltv, "([".to_string());
        assert!(LoanDocumentParser::from_config(&config).is_err());
    }

    #[test]
    fn test_parser_is_shareable_across_threads() {
        let parser = std::sync::Arc::new(LoanDocumentParser::new());
        let doc = std::sync::Arc::new(sample_document());

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let parser = parser.clone();
                let doc = doc.clone();
                std::thread::spawn(move || parser.extract(&doc))
            })
            .collect();

        let expected = parser.extract(&doc);
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    }
}
