//! Brand catalog loading.
//!
//! The catalog is a static JSON document of the form `{ "brands": [ ... ] }`.
//! A document without a `brands` list is a parse error. Individual entries
//! are not validated: a missing or mistyped image reference simply renders
//! as a placeholder later on.

use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};

use super::brand::Brand;

/// File name looked up when the app is started without an explicit catalog.
pub const DEFAULT_CATALOG_FILE: &str = "brands.json";

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path:?}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse catalog {path:?}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to start catalog runtime")]
    Runtime(#[source] io::Error),
}

#[derive(Debug, Deserialize)]
struct CatalogDocument {
    brands: Vec<Brand>,
}

/// The loaded brand list plus the directory its relative references resolve against.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub brands: Vec<Brand>,
    pub base_dir: PathBuf,
}

impl Catalog {
    pub fn new(brands: Vec<Brand>, base_dir: PathBuf) -> Self {
        Self { brands, base_dir }
    }

    /// Parses a catalog document already held in memory.
    pub fn from_slice(bytes: &[u8], path: &Path) -> Result<Self, CatalogError> {
        let document: CatalogDocument =
            serde_json::from_slice(bytes).map_err(|source| CatalogError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        let base_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        Ok(Self::new(document.brands, base_dir))
    }

    /// Reads and parses the catalog at `path`.
    pub async fn load(path: &Path) -> Result<Self, CatalogError> {
        debug!(?path, "Reading brand catalog");
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|source| CatalogError::Read {
                path: path.to_path_buf(),
                source,
            })?;
        let catalog = Self::from_slice(&bytes, path)?;
        info!(?path, brands = catalog.brands.len(), "Loaded brand catalog");
        Ok(catalog)
    }

    /// Blocking wrapper used from a worker thread.
    pub fn load_blocking(path: &Path) -> Result<Self, CatalogError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(CatalogError::Runtime)?;
        runtime.block_on(Self::load(path))
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.brands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.brands.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AssetSource;
    use std::io::Write;

    const SAMPLE: &str = r#"{
        "brands": [
            { "name": "Acme", "logo": "logos/acme.png", "background": "bg/acme.jpg", "cashback": "5%" },
            { "name": "Globex", "logo": "logos/globex.png", "background": "bg/globex.jpg" },
            { "name": "Initech", "logo": "logos/initech.png", "background": "bg/initech.jpg", "cashback": null, "extra": 1 }
        ]
    }"#;

    #[test]
    fn test_from_slice_parses_brands() {
        let catalog =
            Catalog::from_slice(SAMPLE.as_bytes(), Path::new("/page/brands.json")).unwrap();
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.brands[0].badge(), Some("5%"));
        assert_eq!(catalog.brands[1].cashback, None);
        assert_eq!(catalog.brands[2].cashback, None);
        assert_eq!(catalog.base_dir, PathBuf::from("/page"));
    }

    #[test]
    fn test_missing_brands_key_is_parse_error() {
        let err = Catalog::from_slice(b"{}", Path::new("brands.json")).unwrap_err();
        assert!(matches!(err, CatalogError::Parse { .. }));
    }

    #[test]
    fn test_empty_brands_list_is_empty_catalog() {
        let json = br#"{ "brands": [] }"#;
        let catalog = Catalog::from_slice(json, Path::new("brands.json")).unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_null_logo_keeps_sibling_brands() {
        let json = r#"{ "brands": [
            { "name": "Acme", "logo": "acme.png", "background": "acme.jpg" },
            { "name": "Broken", "logo": null, "background": 7 }
        ] }"#;
        let path = Path::new("/page/brands.json");
        let catalog = Catalog::from_slice(json.as_bytes(), path).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.brands[0].logo, "acme.png");
        assert_eq!(catalog.brands[1].name, "Broken");
        assert_eq!(catalog.brands[1].logo, "");
        let broken = &catalog.brands[1];
        assert_eq!(AssetSource::resolve(&catalog.base_dir, &broken.logo), AssetSource::Missing);
        assert_eq!(
            AssetSource::resolve(&catalog.base_dir, &broken.background),
            AssetSource::Missing
        );
    }

    #[test]
    fn test_truthy_cashback_values_become_badges() {
        let json = r#"{ "brands": [
            { "name": "a", "cashback": 5 },
            { "name": "b", "cashback": 2.5 },
            { "name": "b2", "cashback": 3.0 },
            { "name": "c", "cashback": true },
            { "name": "d", "cashback": "10%" }
        ] }"#;
        let catalog = Catalog::from_slice(json.as_bytes(), Path::new("brands.json")).unwrap();
        let badges: Vec<Option<&str>> = catalog.brands.iter().map(Brand::badge).collect();
        assert_eq!(badges, vec![Some("5"), Some("2.5"), Some("3"), Some("true"), Some("10%")]);
    }

    #[test]
    fn test_falsy_cashback_values_have_no_badge() {
        let json = r#"{ "brands": [
            { "name": "a", "cashback": false },
            { "name": "b", "cashback": 0 },
            { "name": "c", "cashback": "" },
            { "name": "d", "cashback": null },
            { "name": "e" }
        ] }"#;
        let catalog = Catalog::from_slice(json.as_bytes(), Path::new("brands.json")).unwrap();
        assert_eq!(catalog.len(), 5);
        assert!(catalog.brands.iter().all(|brand| brand.badge().is_none()));
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = Catalog::from_slice(b"{ brands: ", Path::new("brands.json")).unwrap_err();
        assert!(matches!(err, CatalogError::Parse { .. }));
    }

    #[test]
    fn test_load_blocking_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_CATALOG_FILE);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let catalog = Catalog::load_blocking(&path).unwrap();
        assert_eq!(catalog.len(), 3);
        assert_eq!(
            AssetSource::resolve(&catalog.base_dir, &catalog.brands[0].logo),
            AssetSource::Local(dir.path().join("logos/acme.png"))
        );
    }

    #[test]
    fn test_load_missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Catalog::load_blocking(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, CatalogError::Read { .. }));
    }
}
