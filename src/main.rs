mod app;
mod help;
mod panel;
mod theme;
use crate::app::App;
use anyhow::Context;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
};
use lexopt::{Arg, Parser, ValueExt};
use rangepick::{
    config::parse_range_arg, parse_date, Config, DateRangeResult, PickerOptions, PredefinedRange,
};
use ratatui::DefaultTerminal;
use std::io;
use std::path::PathBuf;
use time::{Date, OffsetDateTime};

#[derive(Clone, Debug, Eq, PartialEq)]
enum Command {
    Run(RunOptions),
    Help,
    Version,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
struct RunOptions {
    date: Option<Date>,
    config: Option<PathBuf>,
    year_from: Option<i32>,
    year_to: Option<i32>,
    ranges: Vec<PredefinedRange>,
}

impl Command {
    fn from_parser(mut parser: Parser) -> Result<Command, lexopt::Error> {
        let mut opts = RunOptions::default();
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                Arg::Short('c') | Arg::Long("config") => {
                    opts.config = Some(PathBuf::from(parser.value()?));
                }
                Arg::Long("year-from") => opts.year_from = Some(parser.value()?.parse()?),
                Arg::Long("year-to") => opts.year_to = Some(parser.value()?.parse()?),
                Arg::Short('r') | Arg::Long("range") => {
                    opts.ranges.push(parser.value()?.parse_with(parse_range_arg)?);
                }
                Arg::Value(value) if opts.date.is_none() => {
                    opts.date = Some(value.parse_with(parse_date)?);
                }
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Command::Run(opts))
    }

    fn run(self) -> anyhow::Result<()> {
        match self {
            Command::Run(opts) => {
                let today = OffsetDateTime::now_local()
                    .context("failed to determine local date")?
                    .date();
                let result = opts.pick(today)?;
                println!(
                    "{}",
                    serde_json::to_string(&result).context("failed to serialize selection")?
                );
                Ok(())
            }
            Command::Help => {
                println!("Usage: rangepick [OPTIONS] [YYYY-MM-DD]");
                println!();
                println!("Pick a date range in the terminal and print it as JSON");
                println!();
                println!("Options:");
                println!("  -c, --config FILE       Read picker configuration from FILE");
                println!("  --year-from YEAR        First year offered by the year select");
                println!("  --year-to YEAR          Last year offered by the year select");
                println!("  -r, --range LABEL=START~END");
                println!("                          Offer a predefined range (repeatable)");
                println!("  -h, --help              Display this help message and exit");
                println!("  -V, --version           Show the program version and exit");
                Ok(())
            }
            Command::Version => {
                println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }
}

impl RunOptions {
    fn pick(self, today: Date) -> anyhow::Result<DateRangeResult> {
        let mut config = self
            .config
            .as_deref()
            .map(Config::load)
            .transpose()?
            .unwrap_or_default();
        if self.year_from.is_some() {
            config.year_select_from = self.year_from;
        }
        if self.year_to.is_some() {
            config.year_select_to = self.year_to;
        }
        let options = self
            .ranges
            .into_iter()
            .fold(config.into_options()?, PickerOptions::predefined_range);
        let date = self.date.unwrap_or(today);
        log::debug!("Opening picker on {date}");
        let app = App::new(date, today, options)
            .with_context(|| format!("cannot display the month containing {date}"))?;
        with_terminal(|terminal| app.run(terminal).context("terminal I/O failed"))
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    Command::from_parser(Parser::from_env())?.run()
}

fn with_terminal<F, T>(func: F) -> anyhow::Result<T>
where
    F: FnOnce(DefaultTerminal) -> anyhow::Result<T>,
{
    let terminal = ratatui::init();
    let r = execute!(io::stdout(), EnableMouseCapture)
        .context("failed to enable mouse capture")
        .and_then(|()| func(terminal));
    if let Err(e) = execute!(io::stdout(), DisableMouseCapture) {
        log::warn!("Failed to disable mouse capture: {e}");
    }
    ratatui::restore();
    r
}
