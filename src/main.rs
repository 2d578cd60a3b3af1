use std::io::{self, BufRead, Write};

use anyhow::Result;

use skycast_core::{Config, SearchSession, SessionState};
use skycast_weather::icon_url;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize core
    skycast_core::init()?;

    let config = Config::from_env();
    let validation = config.validate();
    if !validation.is_valid() {
        anyhow::bail!("Configuration invalid: {}", validation.error_summary());
    }
    for warning in &validation.warnings {
        tracing::warn!("Config warning: {}", warning);
    }

    let mut session = SearchSession::with_dark_mode(config.weather_client(), config.ui.dark_mode);

    tracing::info!("skycast started");

    println!("skycast - Weather Dashboard");
    println!("Enter a city name, or :refresh, :recall N, :history, :theme, :quit");

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let input = line.trim();

        match input {
            ":quit" | ":q" => break,
            ":theme" => {
                session.toggle_dark_mode();
                let mode = if session.state().dark_mode { "dark" } else { "light" };
                println!("Display mode: {}", mode);
            }
            ":history" => {
                if session.state().history.is_empty() {
                    println!("No recent searches.");
                }
                for (i, city) in session.state().history.entries().iter().enumerate() {
                    println!("{}. {}", i + 1, city);
                }
            }
            ":refresh" => {
                session.refresh().await;
                render(session.state());
            }
            other => {
                if let Some(arg) = other.strip_prefix(":recall") {
                    let index = arg.trim().parse::<usize>().unwrap_or(0);
                    session.recall(index.saturating_sub(1)).await;
                } else {
                    session.set_query(other);
                    let query = session.take_query();
                    session.search(&query).await;
                }
                render(session.state());
            }
        }
    }

    Ok(())
}

fn render(state: &SessionState) {
    if let Some(error) = &state.error {
        println!("{}", error);
        return;
    }

    let Some(snapshot) = &state.snapshot else {
        return;
    };

    println!("{}", snapshot.city);
    println!("  {}  ({})", snapshot.description, icon_url(&snapshot.icon));
    println!(
        "  {:.1}°C  humidity {}%  wind {} km/h",
        snapshot.temperature, snapshot.humidity, snapshot.wind_speed
    );

    if !state.forecast.is_empty() {
        println!("Forecast:");
        for day in &state.forecast {
            println!(
                "  {}  {:>5.1}°C  {}",
                day.date, day.temperature, day.description
            );
        }
    }
}
