//! Loan terms extraction.
//!
//! Fields resolve in a fixed order because later ones depend on earlier
//! ones: the loan amount falls back to `total_need - equity`, and the
//! equity ratio is always derived from the two.

use tracing::debug;

use crate::models::loan::LoanInfo;

use super::vocabulary::{Field, PAYMENT_FREQUENCY};
use super::FieldLocator;

/// Extract loan terms, applying defaults and derivations.
pub fn extract_loan_info(fields: &FieldLocator, text: &str) -> LoanInfo {
    let purpose = fields.text_or_default(Field::LoanPurpose, text);
    let total_need = fields.number_or_default(Field::TotalNeed, text);
    let equity = fields.number_or_default(Field::Equity, text);

    // Under the legacy zero policy a stated "0" also takes this branch.
    let loan_amount = match fields.resolved_number(Field::LoanAmount, text) {
        Some(amount) => amount,
        None if total_need > 0.0 => {
            debug!(total_need, equity, "deriving loan amount from total need minus equity");
            total_need - equity
        }
        None => 0.0,
    };

    let equity_ratio = equity_ratio(equity, total_need);
    let interest_rate = fields.number_or_default(Field::InterestRate, text);
    let loan_term = fields.number_or_default(Field::LoanTerm, text) as u32;

    LoanInfo {
        purpose,
        total_need,
        equity,
        loan_amount,
        equity_ratio,
        interest_rate,
        loan_term,
        payment_frequency: PAYMENT_FREQUENCY.to_string(),
    }
}

/// Equity as a percentage of total need; `0` when total need is not positive.
pub fn equity_ratio(equity: f64, total_need: f64) -> f64 {
    if total_need > 0.0 {
        equity / total_need * 100.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::config::ZeroPolicy;
    use pretty_assertions::assert_eq;

    fn legacy() -> FieldLocator {
        FieldLocator::builtin()
    }

    #[test]
    fn test_extract_full_loan_info() {
        let text = "Mục đích vay: Bổ sung vốn lưu động\n\
                    Tổng nhu cầu vốn: 2.500.000.000 đồng\n\
                    Vốn đối ứng: 500.000.000 đồng\n\
                    Số tiền vay: 1.800.000.000 đồng\n\
                    Lãi suất: 9,2%/năm\n\
                    Thời hạn vay: 60 tháng";

        let info = extract_loan_info(&legacy(), text);

        assert_eq!(
            info,
            LoanInfo {
                purpose: "Bổ sung vốn lưu động".to_string(),
                total_need: 2_500_000_000.0,
                equity: 500_000_000.0,
                loan_amount: 1_800_000_000.0,
                equity_ratio: 20.0,
                interest_rate: 9.2,
                loan_term: 60,
                payment_frequency: "Tháng".to_string(),
            }
        );
    }

    #[test]
    fn test_loan_amount_derived_from_need_and_equity() {
        let text = "Tổng nhu cầu vốn: 1.000.000.000\nVốn tự có: 200.000.000";
        let info = extract_loan_info(&legacy(), text);

        assert_eq!(info.loan_amount, 800_000_000.0);
        assert!((info.equity_ratio - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_stated_zero_loan_amount_is_rederived_under_legacy_policy() {
        let text = "Tổng nhu cầu vốn: 1.000.000.000\nVốn tự có: 200.000.000\nSố tiền vay: 0";

        let info = extract_loan_info(&legacy(), text);
        assert_eq!(info.loan_amount, 800_000_000.0);

        let explicit = legacy().with_zero_policy(ZeroPolicy::ExplicitZero);
        let info = extract_loan_info(&explicit, text);
        assert_eq!(info.loan_amount, 0.0);
    }

    #[test]
    fn test_defaults_when_nothing_found() {
        let info = extract_loan_info(&legacy(), "Biên bản họp");
        assert_eq!(info, LoanInfo::default());
        assert_eq!(info.interest_rate, 8.5);
        assert_eq!(info.loan_term, 120);
        assert_eq!(info.purpose, "Kinh doanh");
        assert_eq!(info.equity_ratio, 0.0);
    }

    #[test]
    fn test_zero_rate_and_term_fall_back() {
        let text = "Lãi suất: 0%\nThời hạn vay: 0 tháng";
        let info = extract_loan_info(&legacy(), text);
        assert_eq!(info.interest_rate, 8.5);
        assert_eq!(info.loan_term, 120);
    }

    #[test]
    fn test_loan_term_truncates_to_months() {
        let info = extract_loan_info(&legacy(), "Kỳ hạn: 36,5 tháng");
        assert_eq!(info.loan_term, 36);
    }

    #[test]
    fn test_no_derivation_without_total_need() {
        let info = extract_loan_info(&legacy(), "Vốn đối ứng: 300.000.000");
        assert_eq!(info.loan_amount, 0.0);
        assert_eq!(info.equity_ratio, 0.0);
    }

    #[test]
    fn test_oversized_amounts_stay_finite() {
        let huge = "9".repeat(400);
        let text = format!("Tổng nhu cầu vốn: {huge}\nVốn đối ứng: {huge}");
        let info = extract_loan_info(&legacy(), &text);

        assert_eq!(info.total_need, 0.0);
        assert_eq!(info.equity, 0.0);
        assert_eq!(info.loan_amount, 0.0);
        assert_eq!(info.equity_ratio, 0.0);

        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["loan_amount"], 0.0);
        assert_eq!(json["equity_ratio"], 0.0);
    }

    #[test]
    fn test_equity_ratio() {
        assert_eq!(equity_ratio(250.0, 1000.0), 25.0);
        assert_eq!(equity_ratio(100.0, 0.0), 0.0);
    }
}
