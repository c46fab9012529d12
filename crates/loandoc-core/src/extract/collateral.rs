//! Collateral extraction.

use crate::models::loan::CollateralInfo;

use super::vocabulary::Field;
use super::FieldLocator;

/// Extract collateral details. Fields are independent of each other.
pub fn extract_collateral_info(fields: &FieldLocator, text: &str) -> CollateralInfo {
    CollateralInfo {
        asset_type: fields.text_or_default(Field::AssetType, text),
        market_value: fields.number_or_default(Field::MarketValue, text),
        asset_address: fields.text_or_default(Field::AssetAddress, text),
        ltv: fields.number_or_default(Field::Ltv, text),
        legal_docs: fields.text_or_default(Field::LegalDocs, text),
    }
}
