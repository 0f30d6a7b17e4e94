//! Fixed text printed on every sanction order.

use serde::Deserialize;

/// Letterhead, closing text, signatory and output naming for rendered orders
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DocumentConfig {
    /// Centered lines at the top of the first page
    pub letterhead: Vec<String>,
    /// Centered title under the letterhead
    pub title: String,
    /// Currency marker printed before amounts
    pub currency: String,
    /// Paragraphs printed after the table
    pub closing: Vec<String>,
    /// Name printed in both signature blocks
    pub signatory_name: String,
    /// Lines printed under the signatory name
    pub signatory_designation: Vec<String>,
    /// Start of the reference-number line, followed by blanks and the issue date
    pub reference_prefix: String,
    /// Recipients listed after the reference line
    pub copy_to: Vec<String>,
    /// Download file name; `{month}` and `{year}` are substituted
    pub download_name: String,
    /// Distance from the page top (mm) past which the closing block starts a new page
    pub closing_break_threshold_mm: f32,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            letterhead: vec![
                "GOVERNMENT OF NCT OF DELHI".to_string(),
                "DIRECTORATE OF EDUCATION".to_string(),
                "OFFICE OF THE HEAD OF SCHOOL".to_string(),
                "GOVT. SENIOR SECONDARY SCHOOL".to_string(),
            ],
            title: "SANCTION ORDER".to_string(),
            currency: "Rs.".to_string(),
            closing: vec![
                "The expenditure is debitable to the head of account for remuneration of guest teachers for the current financial year.".to_string(),
                "Certified that the guest teachers named above have actually worked on the days shown against their names and that the payment has not been claimed earlier.".to_string(),
                "This sanction is issued with the approval of the competent authority.".to_string(),
            ],
            signatory_name: "HEAD OF SCHOOL".to_string(),
            signatory_designation: vec!["Head of School".to_string()],
            reference_prefix: "No.".to_string(),
            copy_to: vec![
                "The Pay and Accounts Officer concerned.".to_string(),
                "The Drawing and Disbursing Officer.".to_string(),
                "Office copy.".to_string(),
            ],
            download_name: "hos_{month}_{year}.pdf".to_string(),
            closing_break_threshold_mm: 250.0,
        }
    }
}

impl DocumentConfig {
    /// Human-readable download name for an order covering `month` of `year`.
    #[must_use]
    pub fn download_name_for(&self, month: &str, year: i32) -> String {
        self.download_name
            .replace("{month}", month)
            .replace("{year}", &year.to_string())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_download_name_substitution() {
        let config = DocumentConfig::default();
        assert_eq!(config.download_name_for("March", 2025), "hos_March_2025.pdf");
    }

    #[test]
    fn test_partial_section_keeps_defaults() {
        let config: DocumentConfig = toml::from_str(r#"signatory_name = "A. PRINCIPAL""#).unwrap();
        assert_eq!(config.signatory_name, "A. PRINCIPAL");
        assert_eq!(config.title, "SANCTION ORDER");
        assert_eq!(config.letterhead.len(), 4);
    }
}
