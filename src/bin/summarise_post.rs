use std::{
    fs,
    io::{self, Read},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use clap::Parser;
use serde_json::{Value, json};
use summarist::processing::SummarisationData;
use summarist::similarity::{rescale_unit_interval, similarity_scores};

const MAX_PREVIEW_CHARS: usize = 72;

#[derive(Parser)]
#[command(
    name = "summarise-post",
    about = "Post a document to a running summarist server and render the aligned summary"
)]
struct Cli {
    #[arg(long, default_value = "http://127.0.0.1:3001")]
    server: String,
    #[arg(long)]
    input: Option<PathBuf>,
    #[arg(long)]
    sentence: Option<usize>,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    let document = read_document(cli.input.as_deref())?;
    let data = fetch_summarisation(&cli.server, &document).await?;

    let candidates: Vec<Vec<f32>> = data
        .document
        .iter()
        .map(|unit| unit.embedding.clone())
        .collect();

    match cli.sentence {
        Some(selected) => render_relevance(&data, &candidates, selected),
        None => {
            render_overview(&data, &candidates);
            Ok(())
        }
    }
}

fn read_document(input: Option<&Path>) -> Result<String> {
    match input {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read document from {}", path.display())),
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read document from stdin")?;
            Ok(buffer)
        }
    }
}

async fn fetch_summarisation(server: &str, document: &str) -> Result<SummarisationData> {
    let endpoint = format!("{}/get-summarisation-data", server.trim_end_matches('/'));
    let response = reqwest::Client::new()
        .post(&endpoint)
        .json(&json!({ "document": document }))
        .send()
        .await
        .with_context(|| format!("failed to reach summarist server at {server}"))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        let detail = serde_json::from_str::<Value>(&body)
            .ok()
            .and_then(|value| {
                value
                    .get("detail")
                    .and_then(Value::as_str)
                    .map(ToString::to_string)
            })
            .unwrap_or(body);
        bail!("server returned {status}: {detail}");
    }

    response
        .json::<SummarisationData>()
        .await
        .context("failed to decode server response")
}

fn render_overview(data: &SummarisationData, candidates: &[Vec<f32>]) {
    println!("Summary:");
    for (index, unit) in data.summary.iter().enumerate() {
        println!("{:>3}. {}", index + 1, unit.text);
        let scores = similarity_scores(&unit.embedding, candidates);
        if let Some((best, score)) = best_match(&scores) {
            println!(
                "     closest paragraph [{}] (similarity {score:.3}): {}",
                best + 1,
                preview(&data.document[best].text)
            );
        }
    }
}

fn render_relevance(
    data: &SummarisationData,
    candidates: &[Vec<f32>],
    selected: usize,
) -> Result<()> {
    if selected == 0 || selected > data.summary.len() {
        bail!(
            "sentence {selected} is out of range (summary has {} sentences)",
            data.summary.len()
        );
    }
    let unit = &data.summary[selected - 1];
    let relevance = rescale_unit_interval(&similarity_scores(&unit.embedding, candidates));
    println!("Paragraph relevance for sentence {selected}: {}", unit.text);
    for (paragraph, score) in data.document.iter().zip(relevance) {
        println!("  [{score:.2}] {}", paragraph.text);
    }
    Ok(())
}

fn best_match(scores: &[f32]) -> Option<(usize, f32)> {
    scores
        .iter()
        .copied()
        .enumerate()
        .max_by(|a, b| a.1.total_cmp(&b.1))
}

fn preview(text: &str) -> String {
    if text.chars().count() <= MAX_PREVIEW_CHARS {
        return text.to_string();
    }
    let truncated: String = text.chars().take(MAX_PREVIEW_CHARS).collect();
    format!("{truncated}...")
}
