//! Built-in seed catalog of creative presets.
//!
//! Tags carry campaign objectives (`awareness`, `engagement`, `conversion`),
//! seasons and moods so objective filtering has something to match on.
//! Options without a quality index sample at the selector's default weight.

use crate::catalog::{CatalogBuilder, CatalogError, OptionCatalog};
use crate::models::{Category, CreativeOption};

/// Sectors with dedicated profiles; anything else resolves to `default`.
pub const SECTORS: [&str; 6] = ["default", "food", "beverage", "cosmetic", "lifestyle", "tech"];

const ALL: &str = "all";

/// (id, applicable sectors, tags, quality index)
type StyleSeed = (
    &'static str,
    &'static [&'static str],
    &'static [&'static str],
    Option<u8>,
);

/// (id, tags, quality index)
type Seed = (&'static str, &'static [&'static str], Option<u8>);

const STYLES: &[StyleSeed] = &[
    ("studio-clean-minimal", &[ALL], &["premium", "awareness"], Some(70)),
    ("studio-editorial-fashion", &["cosmetic", "lifestyle"], &["premium", "awareness"], Some(75)),
    ("studio-product-packshot", &[ALL], &["conversion"], Some(60)),
    ("lifestyle-casual-authentic", &["food", "beverage", "lifestyle"], &["engagement"], None),
    ("food-styling-hero", &["food", "beverage"], &["conversion", "appetite"], Some(80)),
    ("food-action-movement", &["food", "beverage"], &["engagement", "energy"], Some(65)),
    ("minimal-geometric", &["cosmetic", "tech", "lifestyle"], &["premium"], None),
    ("action-energy", &["beverage", "lifestyle"], &["engagement", "energy", "summer"], None),
    ("cinematic-film", &[ALL], &["awareness", "storytelling"], Some(75)),
    ("nature-integration", &["food", "lifestyle"], &["eco", "spring", "summer"], None),
    ("flat-lay", &[ALL], &["engagement"], Some(45)),
    ("editorial-magazine", &[ALL], &["awareness", "premium"], Some(65)),
    ("street-urban", &["lifestyle", "beverage"], &["engagement", "youth"], None),
    ("luxury-premium", &["cosmetic"], &["premium", "conversion"], Some(85)),
    ("vintage-retro", &[ALL], &["storytelling", "autumn"], Some(40)),
    ("tech-modern-minimal", &["tech", "lifestyle"], &["premium", "awareness"], Some(70)),
];

const PALETTES: &[Seed] = &[
    ("brand-dominant", &["awareness"], Some(70)),
    ("complementary-harmony", &["engagement"], None),
    ("monochrome-brand", &["premium"], Some(65)),
    ("pastel-soft", &["spring", "engagement"], None),
    ("vibrant-pop", &["youth", "engagement"], None),
    ("earth-natural", &["eco", "autumn"], None),
    ("noir-blanc-accent", &["premium", "awareness"], Some(60)),
    ("neon-dark", &["youth", "night"], Some(40)),
    ("golden-hour-warmth", &["storytelling", "summer"], None),
    ("cool-clinical", &["conversion"], Some(40)),
    ("tropical-vibrant", &["summer"], None),
    ("autumn-harvest", &["autumn"], None),
];

const FRAMEWORKS: &[Seed] = &[
    ("aida", &["conversion", "awareness"], Some(70)),
    ("pas", &["conversion"], Some(60)),
    ("storytelling", &["awareness", "storytelling"], Some(70)),
    ("question-answer", &["engagement"], None),
    ("social-proof", &["conversion", "engagement"], None),
    ("quest", &["engagement"], Some(40)),
    ("before-after", &["conversion"], None),
    ("step-by-step", &["engagement", "education"], None),
];

const LIGHTING: &[Seed] = &[
    ("golden-hour-morning", &["spring", "storytelling"], None),
    ("bright-midday", &["summer", "energy"], None),
    ("afternoon-soft", &["engagement"], None),
    ("golden-hour-evening", &["storytelling", "summer", "autumn"], Some(70)),
    ("blue-hour", &["night", "premium"], Some(55)),
    ("night-ambiance", &["night", "winter"], None),
    ("overcast-soft", &["conversion"], Some(40)),
];

/// Per-sector contexts, keyed by sector.
const CONTEXTS: &[(&str, &[Seed])] = &[
    (
        "default",
        &[
            ("studio-professional", &["conversion"], None),
            ("everyday-lifestyle", &["engagement"], None),
            ("urban-setting", &["youth"], None),
            ("nature-setting", &["eco", "summer"], None),
        ],
    ),
    (
        "food",
        &[
            ("bright-modern-kitchen", &["engagement"], None),
            ("family-table", &["storytelling", "winter"], Some(60)),
            ("outdoor-picnic", &["summer"], None),
            ("urban-cafe", &["youth"], None),
            ("fine-dining", &["premium"], Some(65)),
            ("street-food", &["youth", "engagement"], None),
            ("weekend-brunch", &["engagement"], None),
            ("professional-kitchen", &["conversion"], Some(40)),
        ],
    ),
    (
        "beverage",
        &[
            ("solo-unwind", &["engagement"], None),
            ("party-with-friends", &["youth", "summer"], Some(60)),
            ("post-workout", &["energy"], None),
            ("office-desk", &["conversion"], Some(40)),
            ("pool-beach", &["summer"], None),
            ("road-trip", &["storytelling", "summer"], None),
            ("cosy-evening", &["winter", "night"], None),
        ],
    ),
    (
        "cosmetic",
        &[
            ("modern-bathroom", &["conversion"], None),
            ("vanity-table", &["premium"], Some(60)),
            ("spa-wellness", &["premium", "engagement"], None),
            ("travel-bag", &["summer"], None),
            ("bedroom-ritual", &["night"], None),
            ("backstage-atelier", &["awareness"], Some(60)),
        ],
    ),
    (
        "lifestyle",
        &[
            ("cocooning-bedroom", &["winter"], None),
            ("modern-living-room", &["engagement"], None),
            ("garden-terrace", &["spring", "summer"], None),
            ("creative-studio", &["storytelling"], None),
            ("travel-adventure", &["awareness", "summer"], Some(60)),
        ],
    ),
    (
        "tech",
        &[
            ("modern-workspace", &["conversion"], None),
            ("commute", &["engagement"], None),
            ("home-office", &["conversion"], None),
            ("outdoor-tech", &["awareness", "summer"], Some(60)),
        ],
    ),
];

fn option(id: &str, tags: &[&str], quality: Option<u8>) -> CreativeOption {
    let option = CreativeOption::new(id).with_tags(tags.iter().copied());
    match quality {
        Some(q) => option.with_quality(q),
        None => option,
    }
}

/// The default catalog shipped with the engine.
pub fn builtin_catalog() -> Result<OptionCatalog, CatalogError> {
    let mut builder = CatalogBuilder::new("default");

    for (sector, contexts) in CONTEXTS {
        for (id, tags, quality) in *contexts {
            builder.option(sector, Category::Context, option(id, tags, *quality))?;
        }
    }

    for (id, sectors, tags, quality) in STYLES {
        if sectors.contains(&ALL) {
            builder.shared_option(Category::Style, option(id, tags, *quality));
            continue;
        }
        for sector in sectors.iter().filter(|s| SECTORS.contains(*s)) {
            builder.option(sector, Category::Style, option(id, tags, *quality))?;
        }
    }

    for (category, seeds) in [
        (Category::Palette, PALETTES),
        (Category::Framework, FRAMEWORKS),
        (Category::Lighting, LIGHTING),
    ] {
        for (id, tags, quality) in seeds {
            builder.shared_option(category, option(id, tags, *quality));
        }
    }

    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_is_complete() {
        let catalog = builtin_catalog().unwrap();
        for sector in SECTORS {
            let profile = catalog.get_profile(sector).unwrap();
            assert_eq!(profile.sector_id, sector);
            for category in Category::ALL {
                assert!(!profile.options(category).is_empty(), "{} {}", sector, category);
            }
        }
    }

    #[test]
    fn test_sector_specific_styles() {
        let catalog = builtin_catalog().unwrap();
        let style_ids = |sector: &str| -> Vec<String> {
            catalog
                .get_profile(sector)
                .unwrap()
                .options(Category::Style)
                .iter()
                .map(|o| o.id.clone())
                .collect()
        };

        let food = style_ids("food");
        assert!(food.contains(&"food-styling-hero".to_string()));
        assert!(food.contains(&"cinematic-film".to_string()));
        assert!(!food.contains(&"luxury-premium".to_string()));

        let unknown = style_ids("automotive");
        assert_eq!(unknown, style_ids("default"));
        assert!(!unknown.contains(&"food-styling-hero".to_string()));
    }

    #[test]
    fn test_seed_contexts_cover_every_sector() {
        for sector in SECTORS {
            assert!(CONTEXTS.iter().any(|(s, _)| *s == sector), "{}", sector);
        }
    }
}
