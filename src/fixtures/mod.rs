//! Fixtures
//!
//! Catalogues, baskets and offers loaded from YAML files. A fixture set is three files
//! sharing a name:
//!
//! ```text
//! fixtures/catalogues/<name>.yml
//! fixtures/baskets/<name>.yml
//! fixtures/offers/<name>.yml
//! ```

use std::{fs, path::PathBuf};

use serde::Deserialize;
use serde_norway::{Mapping, Value};
use thiserror::Error;

use crate::{
    basket::{Basket, BasketError},
    catalogue::{Catalogue, CatalogueError},
    offers::{BoxedOffer, OfferError},
    pricer::Pricer,
};

pub mod offers;

use offers::OffersFixture;

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid percentage format
    #[error("Invalid percentage format: {0}")]
    InvalidPercentage(String),

    /// Basket contents were invalid
    #[error(transparent)]
    Basket(#[from] BasketError),

    /// Catalogue products were invalid, or a basket product has no price
    #[error(transparent)]
    Catalogue(#[from] CatalogueError),

    /// Offer configuration was invalid
    #[error(transparent)]
    Offer(#[from] OfferError),
}

/// Wrapper for catalogue products in YAML
#[derive(Debug, Deserialize)]
pub struct CatalogueFixture {
    /// Map of product name -> price
    #[serde(default)]
    pub products: Mapping,
}

/// Wrapper for basket contents in YAML
#[derive(Debug, Deserialize)]
pub struct BasketFixture {
    /// Map of product name -> quantity
    #[serde(default)]
    pub items: Mapping,
}

/// Fixture
#[derive(Debug)]
pub struct Fixture {
    /// Base path for fixture files
    base_path: PathBuf,

    catalogue: Catalogue,
    basket: Basket,
    offers: Vec<BoxedOffer>,
}

impl Fixture {
    /// Create a new empty fixture with default base path
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a new empty fixture with custom base path
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            catalogue: Catalogue::new(),
            basket: Basket::new(),
            offers: Vec::new(),
        }
    }

    /// Load a catalogue from a YAML fixture file, replacing any loaded catalogue
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if the products are not
    /// a mapping of names to positive float prices.
    pub fn load_catalogue(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let contents = self.read("catalogues", name)?;
        let fixture: CatalogueFixture = serde_norway::from_str(&contents)?;

        self.catalogue = catalogue_from_mapping(&fixture.products)?;

        Ok(self)
    }

    /// Load a basket from a YAML fixture file, replacing any loaded basket
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if the items are not a
    /// mapping of names to positive integer quantities.
    pub fn load_basket(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let contents = self.read("baskets", name)?;
        let fixture: BasketFixture = serde_norway::from_str(&contents)?;

        self.basket = basket_from_mapping(&fixture.items)?;

        Ok(self)
    }

    /// Load offers from a YAML fixture file, replacing any loaded offers
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if an offer is invalid.
    pub fn load_offers(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let contents = self.read("offers", name)?;
        let fixture: OffersFixture = serde_norway::from_str(&contents)?;

        self.offers = fixture
            .offers
            .into_iter()
            .map(offers::OfferFixture::try_into_offer)
            .collect::<Result<_, _>>()?;

        Ok(self)
    }

    /// Load a complete fixture set (catalogue, basket and offers with the same name)
    ///
    /// # Errors
    ///
    /// Returns an error if any of the fixture files cannot be loaded.
    pub fn from_set(name: &str) -> Result<Self, FixtureError> {
        Self::from_set_in(name, "./fixtures")
    }

    /// Load a complete fixture set from a custom base path
    ///
    /// # Errors
    ///
    /// Returns an error if any of the fixture files cannot be loaded.
    pub fn from_set_in(name: &str, base_path: impl Into<PathBuf>) -> Result<Self, FixtureError> {
        let mut fixture = Self::with_base_path(base_path);

        fixture
            .load_catalogue(name)?
            .load_basket(name)?
            .load_offers(name)?;

        Ok(fixture)
    }

    /// Loaded catalogue
    pub fn catalogue(&self) -> &Catalogue {
        &self.catalogue
    }

    /// Loaded basket
    pub fn basket(&self) -> &Basket {
        &self.basket
    }

    /// Loaded offers, in file order
    pub fn offers(&self) -> &[BoxedOffer] {
        &self.offers
    }

    /// Create a pricer over the loaded catalogue, basket and offers
    ///
    /// # Errors
    ///
    /// Returns an error if a basket product is missing from the catalogue.
    pub fn pricer(&self) -> Result<Pricer<'_>, FixtureError> {
        Ok(Pricer::with_offers(
            &self.basket,
            &self.catalogue,
            &self.offers,
        )?)
    }

    fn read(&self, category: &str, name: &str) -> Result<String, FixtureError> {
        let file_path = self.base_path.join(category).join(format!("{name}.yml"));

        tracing::trace!(path = %file_path.display(), "loading fixture");

        Ok(fs::read_to_string(&file_path)?)
    }
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Build a catalogue from an untyped YAML mapping, keeping the file order.
///
/// # Errors
///
/// Returns [`CatalogueError::Type`] unless every key is a string and every value a float,
/// and [`CatalogueError::Price`] for prices that aren't positive.
pub fn catalogue_from_mapping(products: &Mapping) -> Result<Catalogue, CatalogueError> {
    let pairs = products
        .iter()
        .map(|(name, price)| match (name, price) {
            (Value::String(name), Value::Number(price)) if price.is_f64() => {
                Ok((name.as_str(), price.as_f64().unwrap_or(f64::NAN)))
            }
            _ => Err(CatalogueError::Type(format!("{name:?}: {price:?}"))),
        })
        .collect::<Result<Vec<_>, _>>()?;

    Catalogue::with_products(pairs)
}

/// Build a basket from an untyped YAML mapping, keeping the file order.
///
/// # Errors
///
/// Returns [`BasketError::Type`] unless every key is a string and every value an integer,
/// and [`BasketError::Quantity`] for quantities that aren't positive.
pub fn basket_from_mapping(items: &Mapping) -> Result<Basket, BasketError> {
    let pairs = items
        .iter()
        .map(|(name, quantity)| match (name, quantity.as_i64()) {
            (Value::String(name), Some(quantity)) => Ok((name.as_str(), quantity)),
            _ => Err(BasketError::Type(format!("{name:?}: {quantity:?}"))),
        })
        .collect::<Result<Vec<_>, _>>()?;

    Basket::with_contents(pairs)
}

#[cfg(test)]
#[expect(
    clippy::float_cmp,
    reason = "fixture prices are parsed, not computed"
)]
mod tests {
    use std::{fs, path::Path};

    use tempfile::TempDir;
    use testresult::TestResult;

    use super::*;

    fn write_fixture(base: &Path, category: &str, name: &str, contents: &str) -> TestResult {
        let dir = base.join(category);

        fs::create_dir_all(&dir)?;
        fs::write(dir.join(format!("{name}.yml")), contents)?;

        Ok(())
    }

    fn fruit_set(base: &Path) -> TestResult {
        write_fixture(
            base,
            "catalogues",
            "fruit",
            "products:\n  apple: 1.0\n  orange: 2.0\n",
        )?;
        write_fixture(base, "baskets", "fruit", "items:\n  apple: 2\n  orange: 2\n")?;
        write_fixture(
            base,
            "offers",
            "fruit",
            "offers:\n  - type: buy_one_get_one_free\n    product: apple\n  - type: percentage_off\n    product: orange\n    percentage: 50%\n",
        )?;

        Ok(())
    }

    #[test]
    fn from_set_loads_everything() -> TestResult {
        let dir = TempDir::new()?;
        fruit_set(dir.path())?;

        let fixture = Fixture::from_set_in("fruit", dir.path())?;

        assert_eq!(fixture.catalogue().product_names(), ["apple", "orange"]);
        assert_eq!(fixture.basket().count(), 4);
        assert_eq!(fixture.offers().len(), 2);

        Ok(())
    }

    #[test]
    fn pricer_prices_loaded_set() -> TestResult {
        let dir = TempDir::new()?;
        fruit_set(dir.path())?;

        let fixture = Fixture::from_set_in("fruit", dir.path())?;
        let pricer = fixture.pricer()?;

        assert_eq!(pricer.sub_total(), 6.0);
        assert_eq!(pricer.total(), 3.0);
        assert_eq!(pricer.discount(), 3.0);

        Ok(())
    }

    #[test]
    fn pricer_rejects_basket_products_missing_from_catalogue() -> TestResult {
        let dir = TempDir::new()?;
        write_fixture(dir.path(), "catalogues", "odd", "products:\n  apple: 1.0\n")?;
        write_fixture(dir.path(), "baskets", "odd", "items:\n  pear: 1\n")?;

        let mut fixture = Fixture::with_base_path(dir.path());
        fixture.load_catalogue("odd")?.load_basket("odd")?;

        assert!(matches!(
            fixture.pricer(),
            Err(FixtureError::Catalogue(CatalogueError::UnknownPrice { .. }))
        ));

        Ok(())
    }

    #[test]
    fn missing_file_is_io_error() -> TestResult {
        let dir = TempDir::new()?;

        let result = Fixture::from_set_in("nope", dir.path());

        assert!(matches!(result, Err(FixtureError::Io(_))));

        Ok(())
    }

    #[test]
    fn malformed_yaml_is_yaml_error() -> TestResult {
        let dir = TempDir::new()?;
        write_fixture(dir.path(), "catalogues", "bad", "products: [unclosed\n")?;

        let mut fixture = Fixture::with_base_path(dir.path());

        assert!(matches!(
            fixture.load_catalogue("bad"),
            Err(FixtureError::Yaml(_))
        ));

        Ok(())
    }

    #[test]
    fn empty_files_load_empty_values() -> TestResult {
        let dir = TempDir::new()?;
        write_fixture(dir.path(), "catalogues", "empty", "products: {}\n")?;
        write_fixture(dir.path(), "baskets", "empty", "items: {}\n")?;
        write_fixture(dir.path(), "offers", "empty", "offers: []\n")?;

        let fixture = Fixture::from_set_in("empty", dir.path())?;
        let pricer = fixture.pricer()?;

        assert_eq!(pricer.sub_total(), 0.0);
        assert_eq!(pricer.total(), 0.0);

        Ok(())
    }

    #[test]
    fn catalogue_from_mapping_keeps_file_order() -> TestResult {
        let mapping: Mapping = serde_norway::from_str("pear: 0.5\napple: 1.25\n")?;

        let catalogue = catalogue_from_mapping(&mapping)?;

        assert_eq!(catalogue.product_names(), ["pear", "apple"]);
        assert_eq!(catalogue.price("apple")?, 1.25);

        Ok(())
    }

    #[test]
    fn catalogue_from_mapping_rejects_integer_prices() -> TestResult {
        let mapping: Mapping = serde_norway::from_str("apple: 1\n")?;

        assert!(matches!(
            catalogue_from_mapping(&mapping),
            Err(CatalogueError::Type(_))
        ));

        Ok(())
    }

    #[test]
    fn catalogue_from_mapping_rejects_non_string_names() -> TestResult {
        let mapping: Mapping = serde_norway::from_str("1: 1.0\n")?;

        assert!(matches!(
            catalogue_from_mapping(&mapping),
            Err(CatalogueError::Type(_))
        ));

        Ok(())
    }

    #[test]
    fn catalogue_from_mapping_rejects_non_positive_prices() -> TestResult {
        let mapping: Mapping = serde_norway::from_str("apple: -1.0\n")?;

        assert!(matches!(
            catalogue_from_mapping(&mapping),
            Err(CatalogueError::Price { .. })
        ));

        Ok(())
    }

    #[test]
    fn basket_from_mapping_keeps_file_order() -> TestResult {
        let mapping: Mapping = serde_norway::from_str("pear: 3\napple: 1\n")?;

        let basket = basket_from_mapping(&mapping)?;

        assert_eq!(basket.iter().collect::<Vec<_>>(), vec!["pear", "apple"]);
        assert_eq!(basket.count(), 4);

        Ok(())
    }

    #[test]
    fn basket_from_mapping_rejects_non_integer_quantities() -> TestResult {
        for yaml in ["apple: 1.5\n", "apple: two\n", "1: 1\n"] {
            let mapping: Mapping = serde_norway::from_str(yaml)?;

            assert!(
                matches!(basket_from_mapping(&mapping), Err(BasketError::Type(_))),
                "expected type error for {yaml:?}"
            );
        }

        Ok(())
    }

    #[test]
    fn basket_from_mapping_rejects_zero_quantities() -> TestResult {
        let mapping: Mapping = serde_norway::from_str("apple: 0\n")?;

        assert!(matches!(
            basket_from_mapping(&mapping),
            Err(BasketError::Quantity { .. })
        ));

        Ok(())
    }

    #[test]
    fn default_matches_new() {
        let fixture = Fixture::default();

        assert_eq!(fixture.base_path, PathBuf::from("./fixtures"));
        assert!(fixture.basket().is_empty());
        assert!(fixture.catalogue().is_empty());
        assert!(fixture.offers().is_empty());
    }
}
