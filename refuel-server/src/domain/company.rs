//! Company membership for brand filtering.

/// Decides whether a station's brand text belongs to a named company.
///
/// Brand normalisation lives outside the planner; any function with the
/// signature `fn(brand, company) -> bool` can be plugged in.
pub trait CompanyMatcher: Send + Sync {
    fn belongs_to_company(&self, brand: &str, company: &str) -> bool;
}

impl<F> CompanyMatcher for F
where
    F: Fn(&str, &str) -> bool + Send + Sync,
{
    fn belongs_to_company(&self, brand: &str, company: &str) -> bool {
        self(brand, company)
    }
}

/// Case-insensitive substring match of the company name in the brand text.
///
/// # Examples
///
/// ```
/// use refuel_server::domain::{BrandMatcher, CompanyMatcher};
///
/// assert!(BrandMatcher.belongs_to_company("REPSOL BUTANO", "Repsol"));
/// assert!(!BrandMatcher.belongs_to_company("CEPSA", "Repsol"));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct BrandMatcher;

impl CompanyMatcher for BrandMatcher {
    fn belongs_to_company(&self, brand: &str, company: &str) -> bool {
        let company = company.trim().to_lowercase();
        !company.is_empty() && brand.to_lowercase().contains(&company)
    }
}
