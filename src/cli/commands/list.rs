//! One-shot listing command

use anyhow::Result;
use serde::Serialize;

use crate::cli::commands::{drain_events, open_store};
use crate::cli::output::{print_formatted, print_status, OutputFormat};
use crate::config::Config;
use crate::country::Country;
use crate::store::FetchState;
use crate::view::ListView;

#[derive(Serialize)]
struct ListResult<'a> {
    state: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a str>,
    total: usize,
    countries: &'a [Country],
}

pub async fn run(
    config: &Config,
    search: Option<&str>,
    describe: bool,
    format: OutputFormat,
    quiet: bool,
) -> Result<()> {
    let mut store = open_store(config)?;
    let mut events = store.subscribe();
    let mut view = ListView::new(config.display.show_region);

    store.load();
    drain_events(&mut events, &mut view);
    if format == OutputFormat::Text {
        print_status(&view.render(), quiet);
    }

    store.settle().await;
    if search.is_some() {
        store.update_search(search);
    }
    drain_events(&mut events, &mut view);

    let error = match store.state() {
        FetchState::Error(message) => Some(message.as_str()),
        _ => None,
    };
    let result = ListResult {
        state: store.state().name(),
        error,
        total: store.all_countries().len(),
        countries: store.visible_countries(),
    };

    if let Some(message) = result.error {
        if format == OutputFormat::Json {
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        anyhow::bail!("Could not load countries: {}", message);
    }

    print_formatted(&result, format, |r| {
        if describe {
            r.countries
                .iter()
                .map(Country::accessibility_label)
                .collect::<Vec<_>>()
                .join("\n")
        } else {
            view.render()
        }
    });

    if format == OutputFormat::Text && search.is_some() {
        print_status(
            &format!("{} of {} countries match", result.countries.len(), result.total),
            quiet,
        );
    }

    Ok(())
}
