use std::env;

use docsbot_core::config::Config;
use docsbot_core::types::Reply;
use docsbot_fetch::HttpIndexSource;
use docsbot_reply::{DocsSearch, Invocation};
use docsbot_text::TantivyRanker;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "Usage: docsbot [--json] [--query <query> | <word>...]";

struct Args {
    json: bool,
    invocation: Invocation,
}

fn parse_args(raw: Vec<String>) -> anyhow::Result<Args> {
    let mut json = false;
    let mut query = None;
    let mut words = Vec::new();
    let mut iter = raw.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--json" => json = true,
            "--query" | "-q" => {
                let value = iter.next().ok_or_else(|| anyhow::anyhow!("--query needs a value\n{USAGE}"))?;
                query = Some(value);
            }
            "--help" | "-h" => {
                println!("{USAGE}");
                std::process::exit(0);
            }
            _ => words.push(arg),
        }
    }
    let invocation = match query {
        Some(q) => Invocation::Interaction { query: Some(q) },
        None => Invocation::Text { args: words },
    };
    Ok(Args { json, invocation })
}

fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

fn render(reply: &Reply) -> String {
    let embed = match reply {
        Reply::Text(text) => return text.clone(),
        Reply::Embed(embed) => embed,
    };
    let mut out = format!("{}\n{}\n\n{}\n", embed.title, embed.url, embed.description);
    if !embed.fields.is_empty() {
        out.push('\n');
        for field in &embed.fields {
            out.push_str(&format!("  {}: {}\n", field.name, field.value));
        }
    }
    if let Some(footer) = &embed.footer {
        out.push_str(&format!("\n{}\n", footer.text));
    }
    out
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().map_err(|e| { eprintln!("Error loading config: {}", e); e })?;
    let settings = config.settings()?;
    init_tracing(&settings.log.filter);

    let args = parse_args(env::args().skip(1).collect())?;
    let source = HttpIndexSource::from_settings(&settings.docs)?;
    let docs = DocsSearch::new(source, TantivyRanker::new(), settings.docs);

    tracing::debug!(invocation = ?args.invocation, "handling docs command");
    let reply = docs.handle(&args.invocation).await?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&reply)?);
    } else {
        println!("{}", render(&reply));
    }
    Ok(())
}
