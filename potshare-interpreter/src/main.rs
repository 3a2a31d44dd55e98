#![warn(clippy::uninlined_format_args)]

mod bootstrap;

use bootstrap::{AppConfig, init_logging};
use chrono::Utc;
use potshare_application::ProcessedSnapshot;
use potshare_infrastructure::{FeedError, JsonLinesFeed, ShareLink};
use potshare_presentation::SummaryPresenter;
use std::{
    borrow::Cow,
    env,
    fs::File,
    io::{BufReader, Read},
    process,
};

type CliResult<T> = Result<T, Cow<'static, str>>;

const USAGE: &str = "Usage: potshare-interpreter <feed.jsonl> [/share/<id>/<token>]";

fn main() {
    init_logging();

    if let Err(err) = run() {
        tracing::error!(error = %err, "Interpreter failed");
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn run() -> CliResult<()> {
    let mut args = env::args().skip(1);
    let Some(path) = args.next() else {
        return Err(USAGE.into());
    };
    let link = args
        .next()
        .map(|link| ShareLink::parse(&link))
        .transpose()
        .map_err(|err| err.to_string())?;

    let config = AppConfig::from_env().map_err(|err| err.to_string())?;
    let file = File::open(&path).map_err(|err| format!("Failed to read '{path}': {err}"))?;

    let options = ReplayOptions {
        link: link.as_ref(),
        now_ms: Some(Utc::now().timestamp_millis()),
    };
    let rendered = replay_feed(BufReader::new(file), &config, options, |output| {
        println!("{output}");
    })?;

    if rendered == 0 {
        match &link {
            Some(link) => println!("No snapshots for '{}' in '{path}'", link.ledger_id),
            None => println!("No snapshots found in '{path}'"),
        }
    }

    Ok(())
}

#[derive(Clone, Copy, Default)]
struct ReplayOptions<'a> {
    /// Only render the snapshots this link points at.
    link: Option<&'a ShareLink>,
    /// Reference time for pot durations; none are shown without it.
    now_ms: Option<i64>,
}

/// Renders every snapshot of the feed in order, handing each block to `emit`.
///
/// Blocks after the first are prefixed with a blank line. Stops at the first
/// unreadable or undecodable line.
fn replay_feed<R: Read>(
    reader: BufReader<R>,
    config: &AppConfig,
    options: ReplayOptions<'_>,
    mut emit: impl FnMut(&str),
) -> CliResult<usize> {
    let mut failure: Option<FeedError> = None;
    let snapshots = JsonLinesFeed::new(reader)
        .map_while(|item| item.map_err(|err| failure = Some(err)).ok())
        .filter(|snapshot| {
            options
                .link
                .is_none_or(|link| snapshot.id() == link.ledger_id)
        });

    let mut rendered = 0;
    for processed in config.processor().replay(snapshots) {
        let mut output = render_snapshot(&processed, config, options.now_ms);
        if rendered > 0 {
            output.insert(0, '\n');
        }
        // println! adds the final newline back.
        emit(output.trim_end_matches('\n'));
        rendered += 1;
    }

    match failure {
        Some(err) => Err(err.to_string().into()),
        None => Ok(rendered),
    }
}

fn render_snapshot(
    processed: &ProcessedSnapshot,
    config: &AppConfig,
    now_ms: Option<i64>,
) -> String {
    let ProcessedSnapshot { snapshot, summary } = processed;
    let issues = config.audit().inspect(snapshot, summary);
    let mut context = config.render_context().with_snapshot(snapshot);
    if let Some(now_ms) = now_ms {
        context = context.with_clock(now_ms);
    }

    let mut output = SummaryPresenter::render_text(summary, &context);
    if let Some(report) = SummaryPresenter::render_issues(&issues) {
        output.push('\n');
        output.push_str(&report);
    }
    output
}
