//! Running the dashboard: a single mount-and-print pass, or an interactive
//! session driven by commands on stdin.
//!
//! # Interactive commands
//!
//! | Command | Alias | Effect |
//! |---------|-------|--------|
//! | `query <text>` | `q` | Set the search text |
//! | `category <name>` | `c` | Set the category (`all` for unfiltered) |
//! | `country <code>` | `n` | Set the country (`us`, `in`, `gb`) |
//! | `search` | `s` | Fetch with the current filters |
//! | `show` | | Print the current results again |
//! | `help` | `?` | List commands |
//! | `quit` | `exit` | Leave the session |
//!
//! Editing commands only change state. Each fetch runs as its own task; a
//! new search aborts the previous in-flight one, and the dashboard's ticket
//! check drops any outcome that still arrives for a superseded search.

use crate::api::{FetchClient, FetchError, HttpGet};
use crate::dashboard::{Dashboard, SearchTicket};
use crate::models::{Article, Category, Country, SearchParameters};
use crate::outputs::{self, OutputFormat, cards};
use std::error::Error;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc::{self, UnboundedSender};
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument};

const HELP: &str = "\
Commands:
  query <text>      (q)  set the search text
  category <name>   (c)  all, technology, sports, health, business
  country <code>    (n)  us, in, gb
  search            (s)  fetch with the current filters
  show                   print the current results
  help              (?)  this list
  quit           (exit)  leave";

type Outcome = (SearchTicket, Result<Vec<Article>, FetchError>);

/// A parsed session command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Query(String),
    Category(Category),
    Country(Country),
    Search,
    Show,
    Help,
    Quit,
}

impl Command {
    /// Parse one input line. Blank lines yield `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<Command>, String> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word.to_ascii_lowercase().as_str() {
            "query" | "q" => Command::Query(rest.to_string()),
            "category" | "c" => Command::Category(rest.parse().map_err(|e| format!("{e}"))?),
            "country" | "n" => {
                if rest.is_empty() {
                    return Err("country needs a value: us, in or gb".to_string());
                }
                Command::Country(rest.parse().map_err(|e| format!("{e}"))?)
            }
            "search" | "s" => Command::Search,
            "show" => Command::Show,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => return Err(format!("unknown command '{other}' (try 'help')")),
        };
        Ok(Some(command))
    }
}

/// Mount once, wait for the result, and return the rendered output.
#[instrument(level = "info", skip_all)]
pub async fn run_once<T: HttpGet>(
    client: &FetchClient<T>,
    initial: SearchParameters,
    format: OutputFormat,
) -> Result<String, Box<dyn Error>> {
    let mut dashboard = Dashboard::new(initial);
    let ticket = dashboard.mount();
    let outcome = client.fetch_articles(&ticket.params).await;
    dashboard.apply(&ticket, outcome);
    Ok(outputs::render(format, dashboard.articles())?)
}

/// Run an interactive session reading commands from `input` and writing
/// results to `output`.
///
/// On end of input the session waits for the in-flight search, prints its
/// results, and returns. `quit` returns immediately.
#[instrument(level = "info", skip_all)]
pub async fn run_interactive<T, R, W>(
    client: Arc<FetchClient<T>>,
    initial: SearchParameters,
    format: OutputFormat,
    input: R,
    mut output: W,
) -> Result<(), Box<dyn Error>>
where
    T: HttpGet + Send + Sync + 'static,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let (tx, mut rx) = mpsc::unbounded_channel::<Outcome>();
    let mut dashboard = Dashboard::new(initial);
    let mut lines = input.lines();

    let ticket = dashboard.mount();
    let mut in_flight = Some(spawn_fetch(&client, ticket, &tx));

    loop {
        tokio::select! {
            Some((ticket, outcome)) = rx.recv() => {
                if dashboard.apply(&ticket, outcome) {
                    in_flight = None;
                    show(&mut output, &dashboard, format).await?;
                }
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    debug!("End of input");
                    break;
                };
                match Command::parse(&line) {
                    Ok(None) => {}
                    Ok(Some(Command::Query(query))) => dashboard.set_query(query),
                    Ok(Some(Command::Category(category))) => dashboard.set_category(category),
                    Ok(Some(Command::Country(country))) => dashboard.set_country(country),
                    Ok(Some(Command::Search)) => {
                        if let Some(handle) = in_flight.take() {
                            handle.abort();
                        }
                        let ticket = dashboard.search();
                        in_flight = Some(spawn_fetch(&client, ticket, &tx));
                    }
                    Ok(Some(Command::Show)) => show(&mut output, &dashboard, format).await?,
                    Ok(Some(Command::Help)) => emit(&mut output, HELP).await?,
                    Ok(Some(Command::Quit)) => {
                        if let Some(handle) = in_flight.take() {
                            handle.abort();
                        }
                        info!("Session closed");
                        return Ok(());
                    }
                    Err(message) => emit(&mut output, &format!("error: {message}")).await?,
                }
            }
        }
    }

    // Input is exhausted; let the latest search land before leaving.
    if let Some(handle) = in_flight.take() {
        let _ = handle.await;
    }
    while let Ok((ticket, outcome)) = rx.try_recv() {
        if dashboard.apply(&ticket, outcome) {
            show(&mut output, &dashboard, format).await?;
        }
    }
    info!("Session closed");
    Ok(())
}

fn spawn_fetch<T>(
    client: &Arc<FetchClient<T>>,
    ticket: SearchTicket,
    tx: &UnboundedSender<Outcome>,
) -> JoinHandle<()>
where
    T: HttpGet + Send + Sync + 'static,
{
    let client = Arc::clone(client);
    let tx = tx.clone();
    tokio::spawn(async move {
        let outcome = client.fetch_articles(&ticket.params).await;
        // The receiver only goes away when the session has ended.
        let _ = tx.send((ticket, outcome));
    })
}

async fn show<W>(
    output: &mut W,
    dashboard: &Dashboard,
    format: OutputFormat,
) -> Result<(), Box<dyn Error>>
where
    W: AsyncWrite + Unpin,
{
    if format == OutputFormat::Cards {
        emit(output, &cards::render_header(&dashboard.params())).await?;
    }
    let rendered = outputs::render(format, dashboard.articles())?;
    emit(output, &rendered).await?;
    Ok(())
}

async fn emit<W>(output: &mut W, text: &str) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    output.write_all(text.as_bytes()).await?;
    output.write_all(b"\n").await?;
    output.flush().await
}
