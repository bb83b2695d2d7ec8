// Fetch click totals for several bitlinks concurrently.
//
//   BITLY_TOKEN=... cargo run -p bitly-config --example batch_clicks -- \
//       https://bit.ly/3S6yh0D 47DgjIY
//
// Expired or unknown links are reported per link; the rest still print.

use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use bitly_api::ClicksQuery;
use bitly_config::load_config;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .init();

    let links: Vec<String> = std::env::args().skip(1).collect();
    if links.is_empty() {
        eprintln!("usage: batch_clicks <link> [<link>...]");
        return ExitCode::FAILURE;
    }

    let client = match load_config().and_then(|config| config.build_client()) {
        Ok(client) => client,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };

    let queries: Vec<ClicksQuery> = links.iter().map(|link| ClicksQuery::new(link)).collect();
    let results = client.get_clicks_many(&queries).await;

    for (link, result) in links.iter().zip(results) {
        match result {
            Ok(clicks) => println!("{link}: {}", clicks.total_clicks()),
            Err(err) => println!("{link}: {err}"),
        }
    }

    client.close();
    ExitCode::SUCCESS
}
