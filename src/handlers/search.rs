//! One-shot handler: wires the real clients and prints a single result.

use anyhow::{bail, Result};
use owo_colors::OwoColorize;

use crate::config::Config;
use crate::external::pexels::PexelsClient;
use crate::llm::LlmClient;
use crate::printer::{html_to_markdown, MarkdownPrinter, TextPrinter};
use crate::prompt::QueryMode;
use crate::search::SearchController;

pub struct SearchHandler;

impl SearchHandler {
    pub async fn run(
        query: &str,
        mode: QueryMode,
        model: &str,
        temperature: f32,
        markdown: bool,
    ) -> Result<()> {
        let cfg = Config::load();
        let controller = SearchController {
            completion: LlmClient::from_config(&cfg, model, temperature)?,
            images: PexelsClient::from_config(&cfg)?,
        };

        let Some(outcome) = controller.search(mode, query).await else {
            bail!("Provide a plant or disease name, e.g. `herbal Tulsi`");
        };

        if markdown {
            MarkdownPrinter::default().print(&html_to_markdown(&outcome.output));
        } else {
            let color = match cfg.get("DEFAULT_COLOR").as_deref() {
                Some("green") => Some("green"),
                Some("cyan") => Some("cyan"),
                Some("magenta") => Some("magenta"),
                Some("yellow") => Some("yellow"),
                _ => None,
            };
            TextPrinter { color }.print(&outcome.output);
        }

        if !outcome.image_url.is_empty() {
            println!("{}", format!("Image: {}", outcome.image_url).cyan());
        }

        Ok(())
    }
}
