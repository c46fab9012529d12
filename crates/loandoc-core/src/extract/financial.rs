//! Auxiliary financial extraction.

use crate::models::loan::FinancialInfo;

use super::vocabulary::Field;
use super::FieldLocator;

/// Extract monthly income, expense and other debt; each defaults to `0`.
pub fn extract_financial_info(fields: &FieldLocator, text: &str) -> FinancialInfo {
    FinancialInfo {
        monthly_income: fields.number_or_default(Field::MonthlyIncome, text),
        monthly_expense: fields.number_or_default(Field::MonthlyExpense, text),
        other_debt: fields.number_or_default(Field::OtherDebt, text),
    }
}
