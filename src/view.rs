use itertools::Itertools;

use crate::model::Asset;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub search_term: String,
    pub category: String,
    pub location: String,
    pub status: String,
}

impl FilterCriteria {
    pub fn is_empty(&self) -> bool {
        self.search_term.is_empty()
            && self.category.is_empty()
            && self.location.is_empty()
            && self.status.is_empty()
    }

    // search is case-insensitive on name or id; the rest are exact,
    // an empty criterion matches everything
    pub fn matches(&self, asset: &Asset) -> bool {
        let term = self.search_term.to_lowercase();
        if !asset.name.to_lowercase().contains(&term)
            && !asset.id.to_lowercase().contains(&term)
        {
            return false;
        }
        if !self.category.is_empty() && asset.category != self.category {
            return false;
        }
        if !self.location.is_empty() && asset.location != self.location {
            return false;
        }
        if !self.status.is_empty() && asset.status != self.status {
            return false;
        }
        true
    }
}

pub fn filter_assets<'a>(assets: &'a [Asset], criteria: &FilterCriteria) -> Vec<&'a Asset> {
    assets.iter().filter(|a| criteria.matches(a)).collect()
}

pub fn distinct_statuses(assets: &[Asset]) -> Vec<String> {
    assets
        .iter()
        .map(|a| a.status.clone())
        .filter(|s| !s.is_empty())
        .sorted()
        .dedup()
        .collect()
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub current_page: usize,
    pub total_pages: usize,
}

pub fn total_pages(len: usize, page_size: usize) -> usize {
    let page_size = page_size.max(1);
    ((len + page_size - 1) / page_size).max(1)
}

pub fn paginate<T: Clone>(items: &[T], page: usize, page_size: usize) -> Page<T> {
    let page_size = page_size.max(1);
    let total_pages = total_pages(items.len(), page_size);
    let current_page = page.clamp(1, total_pages);
    let start = (current_page - 1) * page_size;
    let end = (start + page_size).min(items.len());
    let items = if start >= items.len() {
        Vec::new()
    } else {
        items[start..end].to_vec()
    };
    Page {
        items,
        current_page,
        total_pages,
    }
}

#[derive(Clone, Debug, Default)]
pub struct AssetBrowser {
    criteria: FilterCriteria,
    page: usize,
    page_size: usize,
}

impl AssetBrowser {
    pub fn new(page_size: usize) -> Self {
        Self {
            criteria: FilterCriteria::default(),
            page: 1,
            page_size: page_size.max(1),
        }
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn requested_page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    // any filter edit sends the view back to the first page
    pub fn set_criteria(&mut self, criteria: FilterCriteria) {
        self.criteria = criteria;
        self.page = 1;
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page;
    }

    pub fn next_page(&mut self, filtered_len: usize) {
        let total = total_pages(filtered_len, self.page_size);
        self.page = (self.page + 1).clamp(1, total);
    }

    pub fn prev_page(&mut self, filtered_len: usize) {
        let total = total_pages(filtered_len, self.page_size);
        self.page = self.page.saturating_sub(1).clamp(1, total);
    }

    pub fn page<'a>(&self, assets: &'a [Asset]) -> Page<&'a Asset> {
        let filtered = filter_assets(assets, &self.criteria);
        paginate(&filtered, self.page, self.page_size)
    }
}
