//! Loads the events through the calendar view and prints the agenda of the
//! requested view: `agenda [month|week|day|agenda] [YYYY-MM-DD]`.

use anyhow::Context;
use chrono::NaiveDate;
use tracing::info;

use event_calendar::client::ApiClient;
use event_calendar::config::Config;
use event_calendar::init_tracing;
use event_calendar::view::{CalendarView, Rendered, ViewKind};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;
    init_tracing(&config.app);

    let mut args = std::env::args().skip(1);
    let view: ViewKind = match args.next() {
        Some(arg) => arg.parse().map_err(anyhow::Error::msg)?,
        None => ViewKind::default(),
    };

    let client = ApiClient::new(&config.client.api_url)?;
    info!("Reading events from {}", client.base_url());

    let mut calendar = CalendarView::new(client);
    if let Some(arg) = args.next() {
        let date = NaiveDate::parse_from_str(&arg, "%Y-%m-%d")
            .with_context(|| format!("invalid date {arg:?}, expected YYYY-MM-DD"))?;
        calendar.navigate_to(date);
    }
    calendar.set_view(view);
    calendar.sync().await?;

    println!("{} - {}", calendar.view(), calendar.date().format("%d/%m/%Y"));
    match calendar.render() {
        Rendered::View(lines) => lines.iter().for_each(|line| println!("{line}")),
        Rendered::Fallback(message) => println!("{message}"),
    }
    Ok(())
}
