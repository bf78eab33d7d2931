use crate::model::{Asset, Category, Location};

// snapshots are replaced wholesale; a failed refresh never clears them
#[derive(Clone, Debug, Default)]
pub struct RecordStore {
    assets: Vec<Asset>,
    categories: Vec<Category>,
    locations: Vec<Location>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn assets(&self) -> &[Asset] {
        &self.assets
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    pub fn replace_assets(&mut self, assets: Vec<Asset>) {
        self.assets = assets;
    }

    pub fn replace_categories(&mut self, categories: Vec<Category>) {
        self.categories = categories;
    }

    pub fn replace_locations(&mut self, locations: Vec<Location>) {
        self.locations = locations;
    }

    pub fn category_names(&self) -> Vec<String> {
        self.categories.iter().map(|c| c.name.clone()).collect()
    }

    pub fn location_names(&self) -> Vec<String> {
        self.locations.iter().map(|l| l.name.clone()).collect()
    }
}
