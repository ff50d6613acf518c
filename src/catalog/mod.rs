//! Bike catalog types and home-screen filtering.

use serde::{Deserialize, Serialize};

/// Rental availability of a catalog bike.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BikeStatus {
    /// Ready to be booked
    #[default]
    Available,
    /// Currently rented out or under maintenance
    Unavailable,
}

impl std::fmt::Display for BikeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BikeStatus::Available => write!(f, "Available"),
            BikeStatus::Unavailable => write!(f, "Unavailable"),
        }
    }
}

/// Drivetrain category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BikeType {
    /// Automatic transmission scooter
    #[default]
    Matic,
    /// Manual transmission motorcycle
    Manual,
}

impl std::fmt::Display for BikeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BikeType::Matic => write!(f, "Matic"),
            BikeType::Manual => write!(f, "Manual"),
        }
    }
}

/// A catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bike {
    /// Catalog identifier
    pub id: i64,
    /// Display name
    pub name: String,
    /// Short spec line, e.g. "160cc · Auto"
    pub specs: String,
    /// Daily price label, e.g. "85k"
    pub price: String,
    /// Customer rating out of 5
    pub rating: f64,
    /// Asset key for the bike's photo
    pub image_res: String,
    /// Rental availability
    pub status: BikeStatus,
    /// Drivetrain category
    pub bike_type: BikeType,
}

/// Category chips shown above the catalog list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Category {
    #[default]
    All,
    Matic,
    Manual,
}

/// Active catalog filter state.
///
/// Before the user runs a date search the full catalog is shown; after a
/// search only available bikes are listed, further narrowed by category.
#[derive(Debug, Clone, Copy, Default)]
pub struct CatalogFilter {
    pub category: Category,
    pub available_only: bool,
}

impl CatalogFilter {
    /// Apply the filter to a catalog slice.
    pub fn apply<'a>(&self, bikes: &'a [Bike]) -> Vec<&'a Bike> {
        bikes
            .iter()
            .filter(|b| !self.available_only || b.status == BikeStatus::Available)
            .filter(|b| match self.category {
                Category::All => true,
                Category::Matic => b.bike_type == BikeType::Matic,
                Category::Manual => b.bike_type == BikeType::Manual,
            })
            .collect()
    }
}

/// The catalog rows seeded on first run.
pub fn default_catalog() -> Vec<Bike> {
    fn bike(
        id: i64,
        name: &str,
        specs: &str,
        price: &str,
        rating: f64,
        image_res: &str,
        status: BikeStatus,
        bike_type: BikeType,
    ) -> Bike {
        Bike {
            id,
            name: name.to_string(),
            specs: specs.to_string(),
            price: price.to_string(),
            rating,
            image_res: image_res.to_string(),
            status,
            bike_type,
        }
    }

    use BikeStatus::{Available, Unavailable};
    use BikeType::{Manual, Matic};

    vec![
        bike(1, "Honda Vario 160", "160cc · Auto", "85k", 4.9, "honda_vario", Unavailable, Matic),
        bike(2, "Yamaha NMAX", "155cc · Auto", "120k", 4.8, "yamaha_nmax", Available, Matic),
        bike(3, "Honda Scoopy", "110cc · Auto", "75k", 4.9, "honda_scoopy", Available, Matic),
        bike(4, "Honda PCX", "150cc · Auto", "150k", 4.7, "honda_pcx", Unavailable, Matic),
        bike(5, "Harley Sportster 48", "1200cc · Manual", "2000k", 4.6, "harley_48", Available, Manual),
        bike(6, "BMW R 1200 GS", "1200cc · Manual", "5000k", 4.5, "bmw_r1200gs", Available, Manual),
        bike(7, "Harley Road Glide", "1800cc · Manual", "5500k", 4.5, "harley_rg", Available, Manual),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_has_seven_bikes() {
        let catalog = default_catalog();
        assert_eq!(catalog.len(), 7);

        // Ids are unique and sequential
        for (i, bike) in catalog.iter().enumerate() {
            assert_eq!(bike.id, i as i64 + 1);
        }
    }

    #[test]
    fn test_filter_default_shows_everything() {
        let catalog = default_catalog();
        let filter = CatalogFilter::default();
        assert_eq!(filter.apply(&catalog).len(), 7);
    }

    #[test]
    fn test_filter_available_only() {
        let catalog = default_catalog();
        let filter = CatalogFilter {
            available_only: true,
            ..Default::default()
        };
        let shown = filter.apply(&catalog);
        assert_eq!(shown.len(), 5);
        assert!(shown.iter().all(|b| b.status == BikeStatus::Available));
    }

    #[test]
    fn test_filter_by_category() {
        let catalog = default_catalog();

        let matic = CatalogFilter {
            category: Category::Matic,
            available_only: false,
        };
        assert_eq!(matic.apply(&catalog).len(), 4);

        let manual = CatalogFilter {
            category: Category::Manual,
            available_only: false,
        };
        assert_eq!(manual.apply(&catalog).len(), 3);
    }

    #[test]
    fn test_filter_combines_availability_and_category() {
        let catalog = default_catalog();
        let filter = CatalogFilter {
            category: Category::Matic,
            available_only: true,
        };
        // Vario and PCX are unavailable, leaving NMAX and Scoopy
        let shown = filter.apply(&catalog);
        assert_eq!(shown.len(), 2);
        assert!(shown.iter().all(|b| b.bike_type == BikeType::Matic));
    }
}
