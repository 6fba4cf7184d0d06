use anyhow::{bail, Context};
use tracing_subscriber::EnvFilter;
use wikicount::{analyze, stub_demo, AnalysisRequest, MediaWikiFetcher, PipelineConfig};

const USAGE: &str = "usage: wikicount <article> [depth] [percentile]\n       wikicount --demo [depth] [percentile]";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_target(false)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(article) = args.first() else {
        bail!(USAGE);
    };
    let depth: u32 = match args.get(1) {
        Some(raw) => raw.parse().with_context(|| format!("invalid depth '{raw}'"))?,
        None => 0,
    };
    let percentile: f64 = match args.get(2) {
        Some(raw) => raw
            .parse()
            .with_context(|| format!("invalid percentile '{raw}'"))?,
        None => 0.0,
    };

    let analysis = if article == "--demo" {
        stub_demo(depth, percentile).await
    } else {
        let config = match std::env::var("WIKICOUNT_CONFIG") {
            Ok(path) => PipelineConfig::from_file(&path)
                .with_context(|| format!("failed to load pipeline config from {path}"))?,
            Err(_) => PipelineConfig::default(),
        };
        let request = AnalysisRequest::new(article.as_str())
            .with_depth(depth)
            .with_ignore(config.ranking.ignore_words.iter().collect())
            .with_percentile(percentile);
        request.validate(config.walker.max_depth_limit)?;

        let fetcher = MediaWikiFetcher::new(&config.mediawiki_config())?;
        analyze(&fetcher, &request, &config.walk_config()).await
    };

    println!(
        "{} (depth {}): {} pages, {} words, {:.2}s",
        analysis.start_article,
        analysis.max_depth,
        analysis.pages_visited,
        analysis.table.len(),
        analysis.elapsed.as_secs_f64()
    );
    for (word, freq) in analysis.table.iter() {
        println!("{word:>24}  {freq}");
    }

    Ok(())
}
