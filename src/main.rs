// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Yonkoma and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Yonkoma CLI entrypoint.
//!
//! Loads a comics document (a local path or an `http(s)` URL) and opens it in the terminal reader.

use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;
use yonkoma::config::PageConfig;
use yonkoma::fetch::{DefaultFetcher, Fetcher, PageBase};
use yonkoma::page::{
    event_channel, load_page, Document, FetchImageSource, Fragment, ImageSource, PageContext,
    PageStatus,
};

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} [<data-src>] [--config <path>] [--label <text>] [--base <dir|url>] [--open <id>]\n\n<data-src> overrides `data_src` from the configuration (default `data/comics.json`).\nRelative locations resolve against --base, else the configuration's `base`, else the\ndirectory of the configuration file (the working directory when there is none).\n\n--config selects a TOML configuration; `yonkoma.toml` in the working directory is used\nwhen present.\n--label sets the section title shown in every card header.\n--open scrolls to an entry once the page has settled (`cache`, `#cache` or `index.html#cache`).\n\nYONKOMA_LOG_DIR enables file logging; YONKOMA_LOG sets the filter (default `yonkoma=debug`)."
    );
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CliOptions {
    data_src: Option<String>,
    config: Option<PathBuf>,
    label: Option<String>,
    base: Option<String>,
    open: Option<String>,
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    fn value(
        slot: &mut Option<String>,
        args: &mut impl Iterator<Item = String>,
    ) -> Result<(), ()> {
        if slot.is_some() {
            return Err(());
        }
        let raw = args.next().ok_or(())?;
        if raw.is_empty() {
            return Err(());
        }
        *slot = Some(raw);
        Ok(())
    }

    let mut options = CliOptions::default();
    let mut config = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => value(&mut config, &mut args)?,
            "--label" => value(&mut options.label, &mut args)?,
            "--base" => value(&mut options.base, &mut args)?,
            "--open" => value(&mut options.open, &mut args)?,
            _ if arg.starts_with('-') => return Err(()),
            _ => {
                if options.data_src.is_some() {
                    return Err(());
                }
                options.data_src = Some(arg);
            }
        }
    }

    options.config = config.map(PathBuf::from);
    Ok(options)
}

fn setup_tracing() {
    use std::fs::OpenOptions;
    use std::sync::Mutex;

    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    // The terminal belongs to the reader, so logs only ever go to a file.
    let Some(log_dir) = std::env::var_os("YONKOMA_LOG_DIR").map(PathBuf::from) else {
        return;
    };
    if std::fs::create_dir_all(&log_dir).is_err() {
        return;
    }
    let log_path = log_dir.join(format!("yonkoma.{}.log", std::process::id()));
    let Ok(file) = OpenOptions::new().create(true).append(true).open(&log_path) else {
        return;
    };

    let filter =
        EnvFilter::try_from_env("YONKOMA_LOG").unwrap_or_else(|_| EnvFilter::new("yonkoma=debug"));
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .init();

    info!(path = ?log_path, "tracing initialized");
}

fn main() {
    let result = (|| -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "yonkoma".to_owned());

        let options = match parse_options(args) {
            Ok(options) => options,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };

        setup_tracing();

        let cwd = std::env::current_dir()?;
        let (mut config, config_dir) = PageConfig::discover(options.config.as_deref(), &cwd)?;
        if let Some(data_src) = options.data_src {
            config.data_src = data_src;
        }
        if let Some(label) = options.label {
            config.card_label = label;
        }
        let base = match options.base.as_deref() {
            Some(raw) => PageBase::parse(raw, &cwd)?,
            None => config.page_base(&config_dir)?,
        };
        let fragment = options.open.as_deref().and_then(Fragment::parse);

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()?;

        runtime.block_on(async move {
            let client = reqwest::Client::new();
            let fetcher: Arc<dyn Fetcher> = Arc::new(DefaultFetcher::with_client(client.clone()));
            let images: Arc<dyn ImageSource> = Arc::new(FetchImageSource::new(
                base.clone(),
                DefaultFetcher::with_client(client),
            ));
            let (events, receiver) = event_channel();
            let ctx = PageContext::from_config(&config, base, fetcher, images, events)
                .with_fragment(fragment);

            let page = load_page(Document::new(), &ctx).await?;
            if page.status() == PageStatus::Ready {
                info!(entries = page.anchors().len(), "page ready");
            }

            let tui_result =
                tokio::task::spawn_blocking(move || {
                    yonkoma::tui::run(page, receiver).map_err(|err| err.to_string())
                })
                .await?;
            tui_result.map_err(|err| -> Box<dyn Error> { err.into() })?;
            Ok::<(), Box<dyn Error>>(())
        })?;

        Ok(())
    })();

    if let Err(err) = result {
        eprintln!("yonkoma: {err}");
        std::process::exit(1);
    }
}
