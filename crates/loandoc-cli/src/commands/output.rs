//! Rendering extracted documents.

use loandoc_core::extract::rules::format_vnd;
use loandoc_core::models::config::OutputConfig;
use loandoc_core::{ExtractionResult, ParsedDocument};

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

/// CSV column names, in the order of [`csv_row`].
pub const CSV_HEADER: [&str; 20] = [
    "name",
    "cccd",
    "address",
    "phone",
    "purpose",
    "total_need",
    "equity",
    "loan_amount",
    "equity_ratio",
    "interest_rate",
    "loan_term",
    "payment_frequency",
    "asset_type",
    "market_value",
    "asset_address",
    "ltv",
    "legal_docs",
    "monthly_income",
    "monthly_expense",
    "other_debt",
];

/// Flatten a document into one CSV row.
pub fn csv_row(doc: &ParsedDocument) -> Vec<String> {
    let c = &doc.customer_info;
    let l = &doc.loan_info;
    let k = &doc.collateral_info;
    let f = &doc.financial_info;

    vec![
        c.name.clone(),
        c.national_id.clone(),
        c.address.clone(),
        c.phone.clone(),
        l.purpose.clone(),
        l.total_need.to_string(),
        l.equity.to_string(),
        l.loan_amount.to_string(),
        format!("{:.2}", l.equity_ratio),
        l.interest_rate.to_string(),
        l.loan_term.to_string(),
        l.payment_frequency.clone(),
        k.asset_type.clone(),
        k.market_value.to_string(),
        k.asset_address.clone(),
        k.ltv.to_string(),
        k.legal_docs.clone(),
        f.monthly_income.to_string(),
        f.monthly_expense.to_string(),
        f.other_debt.to_string(),
    ]
}

/// Render an extraction result. With `report`, JSON output carries the
/// diagnostics and text output lists the warnings.
pub fn render(
    result: &ExtractionResult,
    format: OutputFormat,
    report: bool,
    output: &OutputConfig,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json if report => Ok(serde_json::to_string_pretty(result)?),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&result.document)?),
        OutputFormat::Csv => format_csv(&result.document),
        OutputFormat::Text => {
            let mut text = format_text(&result.document, output);
            if report && !result.warnings.is_empty() {
                text.push_str("\nWarnings:\n");
                for warning in &result.warnings {
                    text.push_str(&format!("  - {}\n", warning));
                }
            }
            Ok(text)
        }
    }
}

fn format_csv(doc: &ParsedDocument) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(CSV_HEADER)?;
    wtr.write_record(csv_row(doc))?;

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(doc: &ParsedDocument, output: &OutputConfig) -> String {
    let money = |v: f64| format!("{} {}", format_vnd(v), output.currency_suffix);
    let mut out = String::new();

    let c = &doc.customer_info;
    out.push_str("Customer:\n");
    out.push_str(&format!("  Name:    {}\n", c.name));
    out.push_str(&format!("  ID:      {}\n", c.national_id));
    out.push_str(&format!("  Address: {}\n", c.address));
    out.push_str(&format!("  Phone:   {}\n", c.phone));
    out.push('\n');

    let l = &doc.loan_info;
    out.push_str("Loan:\n");
    out.push_str(&format!("  Purpose:       {}\n", l.purpose));
    out.push_str(&format!("  Total need:    {}\n", money(l.total_need)));
    out.push_str(&format!("  Equity:        {} ({}%)\n", money(l.equity), format_vnd(l.equity_ratio)));
    out.push_str(&format!("  Loan amount:   {}\n", money(l.loan_amount)));
    out.push_str(&format!("  Interest rate: {}%/year\n", format_vnd(l.interest_rate)));
    out.push_str(&format!("  Term:          {} months ({})\n", l.loan_term, l.payment_frequency));
    out.push('\n');

    let k = &doc.collateral_info;
    out.push_str("Collateral:\n");
    out.push_str(&format!("  Type:         {}\n", k.asset_type));
    out.push_str(&format!("  Market value: {}\n", money(k.market_value)));
    out.push_str(&format!("  Address:      {}\n", k.asset_address));
    out.push_str(&format!("  LTV:          {}%\n", format_vnd(k.ltv)));
    out.push_str(&format!("  Legal docs:   {}\n", k.legal_docs));
    out.push('\n');

    let f = &doc.financial_info;
    out.push_str("Financials (monthly):\n");
    out.push_str(&format!("  Income:     {}\n", money(f.monthly_income)));
    out.push_str(&format!("  Expense:    {}\n", money(f.monthly_expense)));
    out.push_str(&format!("  Other debt: {}\n", money(f.other_debt)));
    out.push_str(&format!("  Surplus:    {}\n", money(doc.monthly_surplus())));

    out
}
