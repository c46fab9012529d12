//! Keyword vocabulary for loan-application documents.
//!
//! Each looked-up field maps to an ordered list of Vietnamese labels and a
//! default. The extractors read this table instead of carrying their own
//! label lists, so a field's vocabulary can be swapped from configuration.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Purpose used when no purpose label is found ("business").
pub const DEFAULT_PURPOSE: &str = "Kinh doanh";

/// Annual interest rate (percent) used when none is stated.
pub const DEFAULT_INTEREST_RATE: f64 = 8.5;

/// Loan term in months used when none is stated.
pub const DEFAULT_LOAN_TERM_MONTHS: u32 = 120;

/// Repayment frequency; always monthly.
pub const PAYMENT_FREQUENCY: &str = "Tháng";

/// Collateral type used when none is stated ("real estate").
pub const DEFAULT_ASSET_TYPE: &str = "Bất động sản";

/// Loan-to-value ratio (percent) used when none is stated.
pub const DEFAULT_LTV: f64 = 70.0;

/// Legal documents used when none are stated (land-use right certificate).
pub const DEFAULT_LEGAL_DOCS: &str = "Sổ đỏ/Giấy chứng nhận quyền sử dụng đất";

/// A field located by keyword lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    CustomerName,
    CustomerNationalId,
    CustomerAddress,
    CustomerPhone,
    LoanPurpose,
    TotalNeed,
    Equity,
    LoanAmount,
    InterestRate,
    LoanTerm,
    AssetType,
    MarketValue,
    AssetAddress,
    Ltv,
    LegalDocs,
    MonthlyIncome,
    MonthlyExpense,
    OtherDebt,
}

impl Field {
    /// Every field, in extraction order.
    pub const ALL: [Field; 18] = [
        Field::CustomerName,
        Field::CustomerNationalId,
        Field::CustomerAddress,
        Field::CustomerPhone,
        Field::LoanPurpose,
        Field::TotalNeed,
        Field::Equity,
        Field::LoanAmount,
        Field::InterestRate,
        Field::LoanTerm,
        Field::AssetType,
        Field::MarketValue,
        Field::AssetAddress,
        Field::Ltv,
        Field::LegalDocs,
        Field::MonthlyIncome,
        Field::MonthlyExpense,
        Field::OtherDebt,
    ];

    /// Dotted path of the field inside a serialized `ParsedDocument`.
    pub fn path(self) -> &'static str {
        match self {
            Field::CustomerName => "customer_info.name",
            Field::CustomerNationalId => "customer_info.cccd",
            Field::CustomerAddress => "customer_info.address",
            Field::CustomerPhone => "customer_info.phone",
            Field::LoanPurpose => "loan_info.purpose",
            Field::TotalNeed => "loan_info.total_need",
            Field::Equity => "loan_info.equity",
            Field::LoanAmount => "loan_info.loan_amount",
            Field::InterestRate => "loan_info.interest_rate",
            Field::LoanTerm => "loan_info.loan_term",
            Field::AssetType => "collateral_info.asset_type",
            Field::MarketValue => "collateral_info.market_value",
            Field::AssetAddress => "collateral_info.asset_address",
            Field::Ltv => "collateral_info.ltv",
            Field::LegalDocs => "collateral_info.legal_docs",
            Field::MonthlyIncome => "financial_info.monthly_income",
            Field::MonthlyExpense => "financial_info.monthly_expense",
            Field::OtherDebt => "financial_info.other_debt",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Ordered candidate labels for one field. The first label that matches
/// anywhere in the text wins; later labels are fallbacks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordSpec {
    labels: Vec<String>,
}

impl KeywordSpec {
    pub fn new<I>(labels: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self {
            labels: labels.into_iter().map(Into::into).collect(),
        }
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Value a field takes when its lookup comes back empty.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldDefault {
    Text(&'static str),
    Number(f64),
}

/// Vocabulary entry for one field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldRule {
    pub field: Field,
    pub keywords: KeywordSpec,
    pub default: FieldDefault,
    /// Optional regex applied to the located value; its first capture group
    /// becomes the value when it matches.
    pub value_pattern: Option<String>,
}

impl FieldRule {
    fn text(field: Field, labels: &[&str], default: &'static str) -> Self {
        Self {
            field,
            keywords: KeywordSpec::new(labels.iter().copied()),
            default: FieldDefault::Text(default),
            value_pattern: None,
        }
    }

    fn number(field: Field, labels: &[&str], default: f64) -> Self {
        Self {
            field,
            keywords: KeywordSpec::new(labels.iter().copied()),
            default: FieldDefault::Number(default),
            value_pattern: None,
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self.default, FieldDefault::Number(_))
    }
}

/// Complete field table, one rule per [`Field`].
#[derive(Debug, Clone, PartialEq)]
pub struct Vocabulary {
    rules: Vec<FieldRule>,
}

impl Vocabulary {
    /// Built-in Vietnamese vocabulary.
    pub fn vietnamese() -> Self {
        use Field::*;

        let rules = vec![
            FieldRule::text(CustomerName, &["Họ và tên", "Tên khách hàng", "Khách hàng", "Họ tên"], ""),
            FieldRule::text(
                CustomerNationalId,
                &["CCCD", "CMND", "Số CCCD", "Số CMND", "Chứng minh nhân dân"],
                "",
            ),
            FieldRule::text(
                CustomerAddress,
                &["Địa chỉ", "Địa chỉ thường trú", "Nơi cư trú", "Chỗ ở"],
                "",
            ),
            FieldRule::text(CustomerPhone, &["Số điện thoại", "Điện thoại", "SĐT", "Phone"], ""),
            FieldRule::text(
                LoanPurpose,
                &["Mục đích vay", "Mục đích sử dụng vốn", "Mục đích", "Vay để", "Sử dụng vốn để"],
                DEFAULT_PURPOSE,
            ),
            FieldRule::number(
                TotalNeed,
                &["Tổng nhu cầu vốn", "Nhu cầu vốn", "Tổng vốn cần", "Tổng mức đầu tư", "Vốn đầu tư"],
                0.0,
            ),
            FieldRule::number(
                Equity,
                &["Vốn đối ứng", "Vốn tự có", "Nguồn vốn tự có", "Vốn chủ sở hữu"],
                0.0,
            ),
            FieldRule::number(LoanAmount, &["Số tiền vay", "Vốn vay", "Hạn mức vay", "Dư nợ vay"], 0.0),
            FieldRule::number(
                InterestRate,
                &["Lãi suất", "Lãi suất vay", "Lãi suất cho vay", "LS"],
                DEFAULT_INTEREST_RATE,
            ),
            FieldRule::number(
                LoanTerm,
                &["Thời gian vay", "Thời hạn vay", "Kỳ hạn", "Thời hạn"],
                DEFAULT_LOAN_TERM_MONTHS as f64,
            ),
            FieldRule::text(AssetType, &["Loại tài sản", "Tài sản", "TSBĐ", "Loại TSBĐ"], DEFAULT_ASSET_TYPE),
            FieldRule::number(
                MarketValue,
                &["Giá trị thị trường", "Giá thị trường", "Giá trị", "Trị giá tài sản"],
                0.0,
            ),
            FieldRule::text(
                AssetAddress,
                &["Địa chỉ tài sản", "Vị trí", "Địa điểm", "Tọa lạc tại"],
                "",
            ),
            FieldRule::number(Ltv, &["LTV", "Tỷ lệ cho vay", "Tỷ lệ LTV"], DEFAULT_LTV),
            FieldRule::text(
                LegalDocs,
                &["Giấy tờ pháp lý", "Pháp lý", "Giấy tờ", "Sổ đỏ"],
                DEFAULT_LEGAL_DOCS,
            ),
            FieldRule::number(
                MonthlyIncome,
                &["Thu nhập tháng", "Thu nhập hàng tháng", "Doanh thu tháng"],
                0.0,
            ),
            FieldRule::number(MonthlyExpense, &["Chi phí tháng", "Chi phí hàng tháng", "Chi phí"], 0.0),
            FieldRule::number(OtherDebt, &["Nợ khác", "Công nợ khác", "Nghĩa vụ nợ khác"], 0.0),
        ];

        debug_assert!(rules.iter().enumerate().all(|(i, r)| r.field.index() == i));
        Self { rules }
    }

    /// Rule for `field`.
    pub fn rule(&self, field: Field) -> &FieldRule {
        &self.rules[field.index()]
    }

    /// All rules, in [`Field::ALL`] order.
    pub fn rules(&self) -> &[FieldRule] {
        &self.rules
    }

    /// Replace the label list of `field`.
    pub fn with_keywords<I>(mut self, field: Field, labels: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.rules[field.index()].keywords = KeywordSpec::new(labels);
        self
    }

    /// Attach a value pattern to `field`.
    pub fn with_value_pattern(mut self, field: Field, pattern: impl Into<String>) -> Self {
        self.rules[field.index()].value_pattern = Some(pattern.into());
        self
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::vietnamese()
    }
}
