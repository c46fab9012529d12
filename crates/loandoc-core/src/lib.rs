//! Core library for loan-application document field extraction.
//!
//! This crate provides:
//! - Source document model (paragraph text and table grids)
//! - Keyword-driven field location over free-form paragraph text
//! - Locale-ambiguous number parsing (`1.234,56` / `1,234.56`)
//! - Customer, loan, collateral and financial field extraction with
//!   domain defaults and derived values

pub mod error;
pub mod models;
pub mod extract;

pub use error::{LoanDocError, Result};
pub use models::document::{SourceDocument, Table};
pub use models::loan::{CollateralInfo, CustomerInfo, FinancialInfo, LoanInfo, ParsedDocument};
pub use models::config::{ExtractionConfig, LoanDocConfig, ZeroPolicy};
pub use extract::{extract, DocumentExtractor, ExtractionResult, LoanDocumentParser};
pub use extract::vocabulary::{Field, Vocabulary};
