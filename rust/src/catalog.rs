//! Per-sector option catalog.
//!
//! Profiles are keyed by lowercase sector id. Unknown sectors resolve to the
//! designated default profile so callers always get some valid creative
//! direction; a missing default or an empty category is a configuration error.

use rustc_hash::{FxHashMap, FxHashSet};
use thiserror::Error;

use crate::models::{Category, CreativeOption};

/// Catalog configuration errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Sector '{sector}' has no options in category '{category}'")]
    EmptyCategory { sector: String, category: Category },
    #[error("Default sector '{0}' is not registered in the catalog")]
    MissingDefaultSector(String),
    #[error("Duplicate option id '{id}' in sector '{sector}' category '{category}'")]
    DuplicateOption {
        sector: String,
        category: Category,
        id: String,
    },
}

/// Option collections for one business sector, one per category.
#[derive(Clone, Debug)]
pub struct SectorProfile {
    pub sector_id: String,
    categories: [Vec<CreativeOption>; 5],
}

impl SectorProfile {
    pub fn new(sector_id: impl Into<String>) -> Self {
        Self {
            sector_id: sector_id.into(),
            categories: Default::default(),
        }
    }

    /// Append an option, rejecting ids already present in the category.
    pub fn push(
        &mut self,
        category: Category,
        option: CreativeOption,
    ) -> Result<(), CatalogError> {
        let options = &mut self.categories[category.index()];
        if options.iter().any(|o| o.id == option.id) {
            return Err(CatalogError::DuplicateOption {
                sector: self.sector_id.clone(),
                category,
                id: option.id,
            });
        }
        options.push(option);
        Ok(())
    }

    /// Options for a category in catalog order (may be empty).
    #[inline]
    pub fn options(&self, category: Category) -> &[CreativeOption] {
        &self.categories[category.index()]
    }

    /// Fails on the first empty category.
    pub fn validate(&self) -> Result<(), CatalogError> {
        for category in Category::ALL {
            if self.options(category).is_empty() {
                return Err(CatalogError::EmptyCategory {
                    sector: self.sector_id.clone(),
                    category,
                });
            }
        }
        Ok(())
    }
}

/// Read-only catalog of sector profiles.
#[derive(Clone, Debug)]
pub struct OptionCatalog {
    profiles: FxHashMap<String, SectorProfile>,
    default_sector: String,
}

impl OptionCatalog {
    /// Create an empty catalog whose fallback profile is `default_sector`.
    pub fn new(default_sector: impl Into<String>) -> Self {
        Self {
            profiles: FxHashMap::default(),
            default_sector: normalize(&default_sector.into()),
        }
    }

    /// Register (or replace) a profile.
    pub fn insert_profile(&mut self, mut profile: SectorProfile) {
        profile.sector_id = normalize(&profile.sector_id);
        self.profiles.insert(profile.sector_id.clone(), profile);
    }

    pub fn default_sector(&self) -> &str {
        &self.default_sector
    }

    pub fn sectors(&self) -> impl Iterator<Item = &str> {
        self.profiles.keys().map(String::as_str)
    }

    /// Resolve a sector, falling back to the default profile for unknown ids.
    pub fn get_profile(&self, sector_id: &str) -> Result<&SectorProfile, CatalogError> {
        self.profiles
            .get(&normalize(sector_id))
            .or_else(|| self.profiles.get(&self.default_sector))
            .ok_or_else(|| CatalogError::MissingDefaultSector(self.default_sector.clone()))
    }

    /// Options of one category; an empty collection is a configuration error.
    pub fn get_category<'a>(
        &self,
        profile: &'a SectorProfile,
        category: Category,
    ) -> Result<&'a [CreativeOption], CatalogError> {
        let options = profile.options(category);
        if options.is_empty() {
            return Err(CatalogError::EmptyCategory {
                sector: profile.sector_id.clone(),
                category,
            });
        }
        Ok(options)
    }

    /// Check the default sector exists and no profile has an empty category.
    pub fn validate(&self) -> Result<(), CatalogError> {
        if !self.profiles.contains_key(&self.default_sector) {
            return Err(CatalogError::MissingDefaultSector(self.default_sector.clone()));
        }
        // Sorted for a deterministic first error
        let mut sectors: Vec<&String> = self.profiles.keys().collect();
        sectors.sort();
        for sector in sectors {
            self.profiles[sector].validate()?;
        }
        Ok(())
    }
}

fn normalize(sector_id: &str) -> String {
    sector_id.trim().to_lowercase()
}

/// Incremental catalog construction with shared options.
///
/// Shared options are appended to every sector profile after its own
/// options, mirroring styles that apply to all sectors.
#[derive(Debug)]
pub struct CatalogBuilder {
    default_sector: String,
    profiles: FxHashMap<String, SectorProfile>,
    order: Vec<String>,
    shared: Vec<(Category, CreativeOption)>,
}

impl CatalogBuilder {
    pub fn new(default_sector: impl Into<String>) -> Self {
        let default_sector = normalize(&default_sector.into());
        let mut builder = Self {
            default_sector: default_sector.clone(),
            profiles: FxHashMap::default(),
            order: Vec::new(),
            shared: Vec::new(),
        };
        builder.profile_mut(&default_sector);
        builder
    }

    fn profile_mut(&mut self, sector: &str) -> &mut SectorProfile {
        let key = normalize(sector);
        if !self.profiles.contains_key(&key) {
            self.order.push(key.clone());
        }
        self.profiles
            .entry(key.clone())
            .or_insert_with(|| SectorProfile::new(key))
    }

    /// Add an option to a single sector.
    pub fn option(
        &mut self,
        sector: &str,
        category: Category,
        option: CreativeOption,
    ) -> Result<&mut Self, CatalogError> {
        self.profile_mut(sector).push(category, option)?;
        Ok(self)
    }

    /// Add several options to a single sector.
    pub fn options<I>(
        &mut self,
        sector: &str,
        category: Category,
        options: I,
    ) -> Result<&mut Self, CatalogError>
    where
        I: IntoIterator<Item = CreativeOption>,
    {
        for option in options {
            self.option(sector, category, option)?;
        }
        Ok(self)
    }

    /// Add an option to every sector (including ones registered later).
    pub fn shared_option(&mut self, category: Category, option: CreativeOption) -> &mut Self {
        self.shared.push((category, option));
        self
    }

    /// Finish the catalog and validate it.
    pub fn build(&mut self) -> Result<OptionCatalog, CatalogError> {
        let mut catalog = OptionCatalog::new(self.default_sector.clone());
        for sector in &self.order {
            let Some(mut profile) = self.profiles.remove(sector) else {
                continue;
            };
            let mut seen: FxHashSet<(Category, String)> = FxHashSet::default();
            for category in Category::ALL {
                for option in profile.options(category) {
                    seen.insert((category, option.id.clone()));
                }
            }
            for (category, option) in &self.shared {
                // A sector-specific option with the same id takes precedence
                if seen.insert((*category, option.id.clone())) {
                    profile.push(*category, option.clone())?;
                }
            }
            catalog.insert_profile(profile);
        }
        self.order.clear();
        catalog.validate()?;
        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_profile(builder: &mut CatalogBuilder, sector: &str) {
        for category in Category::ALL {
            builder
                .option(sector, category, CreativeOption::new(format!("{}-{}", sector, category)))
                .unwrap();
        }
    }

    #[test]
    fn test_unknown_sector_falls_back_to_default() {
        let mut builder = CatalogBuilder::new("default");
        full_profile(&mut builder, "default");
        full_profile(&mut builder, "food");
        let catalog = builder.build().unwrap();

        assert_eq!(catalog.get_profile("Food").unwrap().sector_id, "food");
        assert_eq!(catalog.get_profile("aerospace").unwrap().sector_id, "default");
    }

    #[test]
    fn test_missing_default_is_configuration_error() {
        let mut catalog = OptionCatalog::new("default");
        let mut profile = SectorProfile::new("food");
        for category in Category::ALL {
            profile.push(category, CreativeOption::new("x")).unwrap();
        }
        catalog.insert_profile(profile);

        assert!(catalog.get_profile("food").is_ok());
        assert_eq!(
            catalog.get_profile("tech").unwrap_err(),
            CatalogError::MissingDefaultSector("default".to_string())
        );
        assert!(catalog.validate().is_err());
    }

    #[test]
    fn test_empty_category_fails_fast() {
        let mut catalog = OptionCatalog::new("default");
        let mut profile = SectorProfile::new("default");
        profile.push(Category::Style, CreativeOption::new("studio")).unwrap();
        catalog.insert_profile(profile);

        let profile = catalog.get_profile("default").unwrap();
        assert_eq!(catalog.get_category(profile, Category::Style).unwrap().len(), 1);
        assert!(matches!(
            catalog.get_category(profile, Category::Palette),
            Err(CatalogError::EmptyCategory {
                category: Category::Palette,
                ..
            })
        ));
    }

    #[test]
    fn test_builder_rejects_incomplete_sector() {
        let mut builder = CatalogBuilder::new("default");
        full_profile(&mut builder, "default");
        builder
            .option("tech", Category::Style, CreativeOption::new("neon"))
            .unwrap();
        assert!(matches!(
            builder.build(),
            Err(CatalogError::EmptyCategory { .. })
        ));
    }

    #[test]
    fn test_shared_options_reach_every_sector() {
        let mut builder = CatalogBuilder::new("default");
        full_profile(&mut builder, "default");
        full_profile(&mut builder, "beverage");
        builder.shared_option(Category::Style, CreativeOption::new("studio-packshot"));
        let catalog = builder.build().unwrap();

        for sector in ["default", "beverage"] {
            let profile = catalog.get_profile(sector).unwrap();
            let ids: Vec<&str> = profile
                .options(Category::Style)
                .iter()
                .map(|o| o.id.as_str())
                .collect();
            assert!(ids.contains(&"studio-packshot"), "{} missing shared style", sector);
        }
    }

    #[test]
    fn test_duplicate_option_rejected() {
        let mut profile = SectorProfile::new("default");
        profile.push(Category::Lighting, CreativeOption::new("blue-hour")).unwrap();
        let err = profile
            .push(Category::Lighting, CreativeOption::new("blue-hour"))
            .unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateOption { .. }));
    }
}
