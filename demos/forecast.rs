use chrono::Utc;
use chrono_tz::America::Chicago;
use tracing_subscriber::EnvFilter;

use moon_phase::{get_phase_data, ProviderConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let use_live = std::env::args().any(|arg| arg == "--live");
    let config = ProviderConfig {
        use_live_observation: use_live,
        ..ProviderConfig::default()
    };

    let today = Utc::now().with_timezone(&Chicago).date_naive();
    let data = get_phase_data(today, config.use_live_observation, &config).await?;

    println!("=== Moon Phase Forecast ===");
    println!("Location: Springfield, IL (America/Chicago)");
    println!("Live observation: {}", if use_live { "requested" } else { "off" });
    println!();
    println!("--- Today ---");
    println!("Date: {}", data.today.date);
    println!("Phase: {}", data.today.phase);
    println!("Illumination: {}%", data.today.illumination);
    println!("Image: {}", data.today.image);
    println!();
    println!("--- Next {} days ---", data.forecast.len());
    for day in &data.forecast {
        println!(
            "{}  {:<16} {:>3}%  {}",
            day.date, day.phase, day.illumination, day.image
        );
    }
    println!();
    println!("{}", serde_json::to_string_pretty(&data)?);

    Ok(())
}
