use std::env;

use station_eng::csv::{read_requests, write_report};
use station_eng::{Station, StationConfig};
use tokio_stream::wrappers::ReceiverStream;
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("warn".parse().unwrap()))
        .with_writer(std::io::stderr)
        .init();

    let mut args = env::args().skip(1);
    let (config_path, requests_path) = match (args.next(), args.next()) {
        (Some(config), Some(requests)) => (config, requests),
        _ => panic!("usage: station-eng <station.json> <requests.csv>"),
    };

    let station = Station::with_config(&StationConfig::load(&config_path));
    let (req_sender, req_receiver) = tokio::sync::mpsc::channel(16);

    tokio::spawn(async move {
        for result in read_requests(&requests_path) {
            match result {
                Ok(request) => {
                    req_sender.send(request).await.unwrap();
                }
                Err(e) => {
                    warn!("{e}");
                }
            }
        }
    });

    station.serve(ReceiverStream::new(req_receiver)).await;

    write_report(&station);
}
