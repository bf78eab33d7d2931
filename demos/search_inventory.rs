use std::env;
use std::error::Error;

use assetdash::client::RpcClient;
use assetdash::notify::{BusyIndicator, TermNotifier};
use assetdash::render::{Renderer, TableRenderer};
use assetdash::session::Session;
use assetdash::view::{AssetBrowser, FilterCriteria};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let endpoint = env::args()
        .nth(1)
        .ok_or("usage: search_inventory <endpoint> [term]")?;
    let term = env::args().nth(2).unwrap_or_default();

    let client = RpcClient::new(&endpoint, 10, None)?;
    let mut session = Session::new(client, Box::new(TermNotifier), BusyIndicator::stderr());

    if !session.load_assets().await {
        return Ok(());
    }

    let mut browser = AssetBrowser::new(10);
    browser.set_criteria(FilterCriteria {
        search_term: term,
        ..FilterCriteria::default()
    });

    TableRenderer.assets(&browser.page(session.store().assets()));
    Ok(())
}
