use assetdash::model::Asset;
use assetdash::render::{Renderer, TableRenderer};
use assetdash::view::{AssetBrowser, FilterCriteria};

fn main() {
    let assets = vec![
        Asset {
            id: "A-1".to_string(),
            name: "Standing Desk".to_string(),
            category: "Furniture".to_string(),
            location: "HQ".to_string(),
            status: "Active".to_string(),
            purchase_date: Some("2024-01-05".to_string()),
            value: 349.99,
            ..Asset::default()
        },
        Asset {
            id: "A-2".to_string(),
            name: "Office Chair".to_string(),
            category: "Furniture".to_string(),
            location: "HQ".to_string(),
            status: "Active".to_string(),
            value: 129.0,
            ..Asset::default()
        },
        Asset {
            id: "A-3".to_string(),
            name: "Laptop".to_string(),
            category: "IT".to_string(),
            location: "Remote".to_string(),
            status: "Maintenance".to_string(),
            value: 1299.0,
            ..Asset::default()
        },
        Asset {
            id: "A-4".to_string(),
            name: "DESKTOP-12".to_string(),
            category: "IT".to_string(),
            location: "HQ".to_string(),
            status: "Retired".to_string(),
            ..Asset::default()
        },
    ];

    let mut browser = AssetBrowser::new(3);
    browser.set_criteria(FilterCriteria {
        search_term: "desk".to_string(),
        ..FilterCriteria::default()
    });

    TableRenderer.assets(&browser.page(&assets));
}
