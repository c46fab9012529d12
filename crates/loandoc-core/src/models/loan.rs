//! Loan-application records produced by the extraction engine.
//!
//! Every field is always populated: values not found in the document
//! resolve to an empty string, zero, or the documented domain default.

use serde::{Deserialize, Serialize};

/// A fully extracted loan-application document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedDocument {
    /// Borrower identity.
    pub customer_info: CustomerInfo,

    /// Loan terms.
    pub loan_info: LoanInfo,

    /// Collateral (secured asset) details.
    pub collateral_info: CollateralInfo,

    /// Auxiliary monthly financials.
    pub financial_info: FinancialInfo,

    /// Verbatim paragraph text the record was extracted from.
    pub raw_text: String,
}

/// Borrower identity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerInfo {
    /// Full name.
    pub name: String,

    /// National identity card number (CCCD/CMND).
    #[serde(rename = "cccd")]
    pub national_id: String,

    /// Residential address.
    pub address: String,

    /// Phone number.
    pub phone: String,
}

/// Loan terms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanInfo {
    /// Purpose of the loan.
    pub purpose: String,

    /// Total capital need.
    pub total_need: f64,

    /// Borrower's own contribution.
    pub equity: f64,

    /// Requested loan amount.
    pub loan_amount: f64,

    /// Equity as a percentage of total need.
    pub equity_ratio: f64,

    /// Annual interest rate, percent.
    pub interest_rate: f64,

    /// Loan term in months.
    pub loan_term: u32,

    /// Repayment frequency.
    pub payment_frequency: String,
}

impl Default for LoanInfo {
    fn default() -> Self {
        use crate::extract::vocabulary::{
            DEFAULT_INTEREST_RATE, DEFAULT_LOAN_TERM_MONTHS, DEFAULT_PURPOSE, PAYMENT_FREQUENCY,
        };

        Self {
            purpose: DEFAULT_PURPOSE.to_string(),
            total_need: 0.0,
            equity: 0.0,
            loan_amount: 0.0,
            equity_ratio: 0.0,
            interest_rate: DEFAULT_INTEREST_RATE,
            loan_term: DEFAULT_LOAN_TERM_MONTHS,
            payment_frequency: PAYMENT_FREQUENCY.to_string(),
        }
    }
}

/// Collateral (secured asset) details.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollateralInfo {
    pub asset_type: String,

    pub market_value: f64,

    pub asset_address: String,

    /// Loan-to-value ratio, percent.
    pub ltv: f64,

    /// Legal title documents.
    pub legal_docs: String,
}

impl Default for CollateralInfo {
    fn default() -> Self {
        use crate::extract::vocabulary::{DEFAULT_ASSET_TYPE, DEFAULT_LEGAL_DOCS, DEFAULT_LTV};

        Self {
            asset_type: DEFAULT_ASSET_TYPE.to_string(),
            market_value: 0.0,
            asset_address: String::new(),
            ltv: DEFAULT_LTV,
            legal_docs: DEFAULT_LEGAL_DOCS.to_string(),
        }
    }
}

/// Auxiliary monthly financials.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FinancialInfo {
    pub monthly_income: f64,
    pub monthly_expense: f64,
    pub other_debt: f64,
}

impl ParsedDocument {
    /// Monthly surplus after expenses and other debt service.
    pub fn monthly_surplus(&self) -> f64 {
        let f = &self.financial_info;
        f.monthly_income - f.monthly_expense - f.other_debt
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults_match_documented_values() {
        let doc = ParsedDocument::default();
        assert_eq!(doc.loan_info.purpose, "Kinh doanh");
        assert_eq!(doc.loan_info.interest_rate, 8.5);
        assert_eq!(doc.loan_info.loan_term, 120);
        assert_eq!(doc.loan_info.payment_frequency, "Tháng");
        assert_eq!(doc.collateral_info.asset_type, "Bất động sản");
        assert_eq!(doc.collateral_info.ltv, 70.0);
        assert_eq!(doc.customer_info, CustomerInfo::default());
    }

    #[test]
    fn test_serialized_keys() {
        let json = serde_json::to_value(ParsedDocument::default()).unwrap();
        assert!(json["customer_info"].get("cccd").is_some());
        assert!(json["loan_info"].get("equity_ratio").is_some());
        assert!(json["collateral_info"].get("legal_docs").is_some());
        assert!(json["financial_info"].get("other_debt").is_some());
        assert_eq!(json["raw_text"], "");
    }

    #[test]
    fn test_monthly_surplus() {
        let mut doc = ParsedDocument::default();
        doc.financial_info = FinancialInfo {
            monthly_income: 50_000_000.0,
            monthly_expense: 20_000_000.0,
            other_debt: 5_000_000.0,
        };
        assert_eq!(doc.monthly_surplus(), 25_000_000.0);
    }
}
