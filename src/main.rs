use anyhow::{Context, Result};
use hubmark::components::{layout, readme};
use hubmark::{Config, MarkdownRenderer};
use std::fs;

fn init_logging() {
    let mut env = env_logger::Builder::new();
    env.format_timestamp(None);
    env.format_module_path(false);
    env.filter_module("hubmark", log::LevelFilter::Info);
    if let Ok(filters) = std::env::var("RUST_LOG") {
        env.parse_filters(&filters);
    }
    env.init();
}

fn main() -> Result<()> {
    init_logging();

    let config = Config::parse();
    config.validate().context("Invalid configuration")?;

    let renderer = match config.descriptor()? {
        Some(descriptor) => MarkdownRenderer::for_repository(&descriptor),
        None => {
            log::info!("No repository found, relative links are kept as is");
            MarkdownRenderer::new()
        }
    };

    if let Some(repo) = renderer.repository() {
        log::info!("Rewriting relative links for {}/{}", repo.owner(), repo.repo());
    }

    let content_html = renderer
        .render_file(&config.input)
        .with_context(|| format!("Failed to render {}", config.input.display()))?;

    if config.fragment {
        print!("{}", content_html);
        return Ok(());
    }

    fs::create_dir_all(&config.output).context("Failed to create output directory")?;
    hubmark::write_css_assets(&config.output.join("assets"))?;

    let page = layout::page_wrapper(
        &config.title(),
        &[hubmark::STYLESHEET],
        readme::readme_card(&config.input_name(), renderer.repository(), &content_html),
    );

    let index_path = config.output.join("index.html");
    fs::write(&index_path, page.into_string())
        .with_context(|| format!("Failed to write {}", index_path.display()))?;

    log::info!("Generated {}", index_path.display());

    if !config.no_open
        && let Err(e) = open::that(&index_path)
    {
        log::warn!("Failed to open {}: {}", index_path.display(), e);
    }

    Ok(())
}
