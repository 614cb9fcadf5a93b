//! File-backed stand-in for the remote product lookup backend. The real
//! catalog is owned by the grocery backend; this crate only gives the serve
//! layer and tests something concrete to resolve against.

use futures::future::BoxFuture;
use serde::Deserialize;
use sg_core::error::LookupError;
use sg_core::lookup::{LookupOutcome, LookupService};
use sg_core::types::scan::{Product, ProductDraft};
use sg_core::validation::ScanPayload;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog read failed: {message}")]
    Read { message: String },
    #[error("catalog parse failed: {message}")]
    Parse { message: String },
}

#[derive(Debug, Default, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    products: Vec<Product>,
    #[serde(default)]
    drafts: Vec<ProductDraft>,
}

/// In-memory payload index over a JSON catalog file.
#[derive(Debug)]
pub struct FileCatalog {
    products: HashMap<String, Product>,
    drafts: HashMap<String, ProductDraft>,
}

impl FileCatalog {
    pub fn empty() -> Self {
        Self {
            products: HashMap::new(),
            drafts: HashMap::new(),
        }
    }

    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let content = fs::read_to_string(path).map_err(|err| CatalogError::Read {
            message: err.to_string(),
        })?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_json::from_str(content).map_err(|err| CatalogError::Parse {
            message: err.to_string(),
        })?;
        let mut catalog = Self::empty();
        for product in file.products {
            catalog.products.insert(product.payload.clone(), product);
        }
        for draft in file.drafts {
            catalog.drafts.insert(draft.payload.clone(), draft);
        }
        Ok(catalog)
    }

    pub fn insert_product(&mut self, product: Product) {
        self.products.insert(product.payload.clone(), product);
    }

    pub fn insert_draft(&mut self, draft: ProductDraft) {
        self.drafts.insert(draft.payload.clone(), draft);
    }

    pub fn len(&self) -> usize {
        self.products.len() + self.drafts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn resolve(&self, payload: &ScanPayload) -> LookupOutcome {
        if let Some(product) = self.products.get(payload.as_str()) {
            return LookupOutcome::Found(product.clone());
        }
        if let Some(draft) = self.drafts.get(payload.as_str()) {
            return LookupOutcome::Prefill(draft.clone());
        }
        LookupOutcome::Unknown
    }
}

impl LookupService for FileCatalog {
    fn lookup<'a>(
        &'a self,
        payload: &'a ScanPayload,
    ) -> BoxFuture<'a, Result<LookupOutcome, LookupError>> {
        Box::pin(futures::future::ready(Ok(self.resolve(payload))))
    }
}
