use std::env;
use std::error::Error;

use assetdash::client::RpcClient;
use assetdash::notify::{BusyIndicator, TermNotifier};
use assetdash::render::{Renderer, TableRenderer};
use assetdash::session::Session;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let endpoint = env::args()
        .nth(1)
        .ok_or("usage: remote_dashboard <endpoint>")?;

    let client = RpcClient::new(&endpoint, 10, None)?;
    let mut session = Session::new(client, Box::new(TermNotifier), BusyIndicator::stderr());

    session.load_initial().await;
    println!("Categories: {}", session.store().categories().len());
    println!("Locations:  {}", session.store().locations().len());
    println!();

    if let Some(data) = session.load_dashboard().await {
        TableRenderer.dashboard(&data);
    }
    Ok(())
}
