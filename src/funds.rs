//! Fund catalog: real retirement-fund profiles plus rate benchmarks
//!
//! Profiles carry the per-fund fees and historical mean return the
//! comparison helper feeds into the deterministic engine. A built-in
//! catalog covers the common market offerings; custom catalogs load from
//! CSV.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;
use crate::projection::ProductType;

/// Commercial profile of one retirement fund
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FundProfile {
    pub id: String,
    pub name: String,
    pub institution: String,
    pub product_type: ProductType,

    /// Annual administration fee, percent
    pub admin_fee_pct: f64,

    /// Loading fee per contribution, percent
    pub loading_fee_pct: f64,

    /// Historical mean annual return, percent
    pub mean_return_pct: f64,

    pub description: String,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Raw CSV row for catalog loading
#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(rename = "Id")]
    id: String,
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Institution")]
    institution: String,
    #[serde(rename = "ProductType")]
    product_type: String,
    #[serde(rename = "AdminFeePct")]
    admin_fee_pct: f64,
    #[serde(rename = "LoadingFeePct")]
    loading_fee_pct: f64,
    #[serde(rename = "MeanReturnPct")]
    mean_return_pct: f64,
    #[serde(rename = "Description")]
    description: String,
    #[serde(rename = "Notes")]
    notes: Option<String>,
}

/// Load a fund catalog from a CSV file.
pub fn load_catalog(path: &Path) -> Result<Vec<FundProfile>, CatalogError> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut funds = Vec::new();

    for row in reader.deserialize() {
        let row: CsvRow = row?;
        let product_type = match row.product_type.as_str() {
            "PGBL" => ProductType::Pgbl,
            "VGBL" => ProductType::Vgbl,
            other => return Err(CatalogError::UnknownProductType(other.to_string())),
        };
        funds.push(FundProfile {
            id: row.id,
            name: row.name,
            institution: row.institution,
            product_type,
            admin_fee_pct: row.admin_fee_pct,
            loading_fee_pct: row.loading_fee_pct,
            mean_return_pct: row.mean_return_pct,
            description: row.description,
            notes: row.notes,
        });
    }

    Ok(funds)
}

/// Built-in catalog of common market offerings.
pub fn default_catalog() -> Vec<FundProfile> {
    vec![
        FundProfile {
            id: "bb-top-vgbl".into(),
            name: "BB Previdência Top VGBL".into(),
            institution: "Banco do Brasil".into(),
            product_type: ProductType::Vgbl,
            admin_fee_pct: 1.8,
            loading_fee_pct: 0.0,
            mean_return_pct: 6.5,
            description: "Conservative fixed-income fund".into(),
            notes: Some("Suited to conservative profiles".into()),
        },
        FundProfile {
            id: "caixa-vida-pgbl".into(),
            name: "CAIXA Vida e Previdência PGBL".into(),
            institution: "Caixa Econômica Federal".into(),
            product_type: ProductType::Pgbl,
            admin_fee_pct: 2.5,
            loading_fee_pct: 3.0,
            mean_return_pct: 5.8,
            description: "Traditional plan with the PGBL tax deduction".into(),
            notes: Some("Loading fee applies to every contribution".into()),
        },
        FundProfile {
            id: "itau-flexprev".into(),
            name: "Itaú Flexprev Plus II".into(),
            institution: "Itaú Unibanco".into(),
            product_type: ProductType::Vgbl,
            admin_fee_pct: 1.5,
            loading_fee_pct: 0.0,
            mean_return_pct: 6.2,
            description: "Multi-strategy fund".into(),
            notes: Some("Among the lowest fees of the large banks".into()),
        },
        FundProfile {
            id: "bradesco-master".into(),
            name: "BPREV Master VGBL".into(),
            institution: "Bradesco".into(),
            product_type: ProductType::Vgbl,
            admin_fee_pct: 2.0,
            loading_fee_pct: 0.0,
            mean_return_pct: 6.0,
            description: "Balanced fund".into(),
            notes: Some("Moderate profile".into()),
        },
        FundProfile {
            id: "santander-total".into(),
            name: "Santander Total PGBL".into(),
            institution: "Santander".into(),
            product_type: ProductType::Pgbl,
            admin_fee_pct: 1.7,
            loading_fee_pct: 2.0,
            mean_return_pct: 6.3,
            description: "Full-service plan with the PGBL tax deduction".into(),
            notes: None,
        },
        FundProfile {
            id: "btg-top".into(),
            name: "BTG Pactual Previdência".into(),
            institution: "BTG Pactual".into(),
            product_type: ProductType::Vgbl,
            admin_fee_pct: 1.0,
            loading_fee_pct: 0.0,
            mean_return_pct: 7.5,
            description: "Premium fund for high-income investors".into(),
            notes: Some("Minimum contribution applies".into()),
        },
        FundProfile {
            id: "nubank-prev".into(),
            name: "Nubank Vida (Icatu)".into(),
            institution: "Nubank".into(),
            product_type: ProductType::Vgbl,
            admin_fee_pct: 0.5,
            loading_fee_pct: 0.0,
            mean_return_pct: 6.8,
            description: "Digital plan without legacy fees".into(),
            notes: Some("Lowest administration fee in the catalog".into()),
        },
    ]
}

/// Fee-free benchmark profiles composed from the current Selic and IPCA
/// rates (percent a.a.), for comparison against managed funds.
pub fn benchmarks(selic_pct: f64, ipca_pct: f64) -> Vec<FundProfile> {
    vec![
        FundProfile {
            id: "benchmark-tesouro-selic".into(),
            name: "Tesouro Selic (benchmark)".into(),
            institution: "Tesouro Nacional".into(),
            // Product type only sets the tax base for comparison purposes
            product_type: ProductType::Vgbl,
            admin_fee_pct: 0.0,
            loading_fee_pct: 0.0,
            mean_return_pct: selic_pct,
            description: "Government floating-rate bond, fee-free".into(),
            notes: Some("Daily liquidity".into()),
        },
        FundProfile {
            id: "benchmark-tesouro-ipca".into(),
            name: "Tesouro IPCA+ 6% (benchmark)".into(),
            institution: "Tesouro Nacional".into(),
            product_type: ProductType::Vgbl,
            admin_fee_pct: 0.0,
            loading_fee_pct: 0.0,
            mean_return_pct: ipca_pct + 6.0,
            description: "Inflation-linked bond with a 6% real premium".into(),
            notes: Some("Long-horizon benchmark".into()),
        },
        FundProfile {
            id: "benchmark-cdi".into(),
            name: "CDI 99% (benchmark)".into(),
            institution: "Renda Fixa".into(),
            product_type: ProductType::Vgbl,
            admin_fee_pct: 0.0,
            loading_fee_pct: 0.0,
            mean_return_pct: selic_pct * 0.99,
            description: "Bank deposit yielding 99% of CDI".into(),
            notes: None,
        },
    ]
}

/// Look up a fund by id across a catalog slice.
pub fn find_by_id<'a>(catalog: &'a [FundProfile], id: &str) -> Option<&'a FundProfile> {
    catalog.iter().find(|f| f.id == id)
}

/// All funds offered by one institution.
pub fn by_institution<'a>(catalog: &'a [FundProfile], institution: &str) -> Vec<&'a FundProfile> {
    catalog
        .iter()
        .filter(|f| f.institution == institution)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_catalog_nonempty_and_unique_ids() {
        let catalog = default_catalog();
        assert!(!catalog.is_empty());

        let mut ids: Vec<&str> = catalog.iter().map(|f| f.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), catalog.len());
    }

    #[test]
    fn test_benchmark_composition() {
        let benches = benchmarks(10.5, 4.0);

        let selic = find_by_id(&benches, "benchmark-tesouro-selic").unwrap();
        assert_relative_eq!(selic.mean_return_pct, 10.5);

        let ipca = find_by_id(&benches, "benchmark-tesouro-ipca").unwrap();
        assert_relative_eq!(ipca.mean_return_pct, 10.0);

        let cdi = find_by_id(&benches, "benchmark-cdi").unwrap();
        assert_relative_eq!(cdi.mean_return_pct, 10.5 * 0.99);

        // Benchmarks never charge fees
        for bench in &benches {
            assert_eq!(bench.admin_fee_pct, 0.0);
            assert_eq!(bench.loading_fee_pct, 0.0);
        }
    }

    #[test]
    fn test_lookup_helpers() {
        let catalog = default_catalog();
        assert!(find_by_id(&catalog, "nubank-prev").is_some());
        assert!(find_by_id(&catalog, "missing").is_none());
        assert_eq!(by_institution(&catalog, "Tesouro Nacional").len(), 0);
        assert!(!by_institution(&catalog, "Banco do Brasil").is_empty());
    }
}
