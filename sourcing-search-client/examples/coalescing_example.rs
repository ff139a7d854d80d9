use sourcing_search_client::{SearchClient, SearchClientConfig, SearchOptions, SearchOutcome};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    env_logger::init();

    let config = match std::env::args().nth(1) {
        Some(path) => SearchClientConfig::load(path)?,
        None => SearchClientConfig::new("http://localhost:8080", "demo-org", "demo-user"),
    };
    let client = SearchClient::from_config(&config)?;
    let options = SearchOptions::default().with_top_k(5);

    // Two searches in quick succession: only the second one is delivered
    let first = {
        let client = client.clone();
        let options = options.clone();
        tokio::spawn(async move { client.search("denim jacket", &options).await })
    };
    tokio::task::yield_now().await;
    let second = client.search("denim jacket Vietnam", &options).await;

    match first.await? {
        Ok(SearchOutcome::Superseded) => println!("'denim jacket' was superseded"),
        Ok(SearchOutcome::Delivered(response)) => {
            println!("'denim jacket' settled first: {} results", response.results.len())
        }
        Err(err) => println!("'denim jacket' failed: {}", err),
    }

    match second {
        Ok(SearchOutcome::Delivered(response)) => println!(
            "'denim jacket Vietnam': {} results from {} in {} ms",
            response.results.len(),
            response.meta.source,
            response.meta.took_ms
        ),
        Ok(SearchOutcome::Superseded) => {}
        Err(err) => println!("'denim jacket Vietnam' failed: {}", err),
    }

    // Repeating the query within the TTL is served from cache
    if let Ok(SearchOutcome::Delivered(response)) =
        client.search("denim jacket Vietnam", &options).await
    {
        println!("repeat search came from {}", response.meta.source);
    }

    println!("Cache stats: {:?}", client.cache_stats());
    println!("Tracker stats: {:?}", client.tracker_stats());

    Ok(())
}
