use std::collections::HashMap;
use std::io::Write;

use clap::{error::ErrorKind, CommandFactory, Parser};

use crate::cli::args::{
    AssetCommand, AssetsArgs, CliArgs, Command, LoginArgs, RefCommand, ReportArgs,
};
use crate::cli::validation;
use crate::client::RpcClient;
use crate::config::{self, ConfigFile};
use crate::identity::{CurrentUser, FileIdentity, IdentityProvider};
use crate::model::{self, NewAsset};
use crate::notify::{BusyIndicator, TermNotifier};
use crate::render::{self, OutputFormat, Renderer};
use crate::session::Session;
use crate::view::{self, AssetBrowser, FilterCriteria};

fn print_banner() {
    const BANNER: &str = r#"
                           __      __           __
   ____ _______________  _/ /_____/ /___ ______/ /_
  / __ `/ ___/ ___/ _ \/ __/ __  / __ `/ ___/ __ \
 / /_/ (__  |__  )  __/ /_/ /_/ / /_/ (__  ) / / /
 \__,_/____/____/\___/\__/\__,_/\__,_/____/_/ /_/
        v0.4.1 - asset inventory dashboard client
    "#;
    print!("{}", BANNER);
    println!();
}

fn format_kv_line(label: &str, value: &str) {
    println!(":: {:<10}: {}", label, value);
}

fn render_custom_help() -> String {
    let cmd = CliArgs::command();
    let mut out = String::new();

    if let Some(version) = cmd.get_version() {
        out.push_str(cmd.get_name());
        out.push(' ');
        out.push_str(version);
        out.push('\n');
    } else {
        out.push_str(cmd.get_name());
        out.push('\n');
    }

    if let Some(about) = cmd.get_about() {
        out.push_str(&about.to_string());
        out.push('\n');
    }

    if let Some(long_about) = cmd.get_long_about() {
        out.push('\n');
        out.push_str(&long_about.to_string());
        out.push('\n');
    }

    out.push('\n');
    out.push_str("Usage: ");
    out.push_str(cmd.get_name());
    out.push_str(" [OPTIONS] <COMMAND>\n\n");

    out.push_str("Commands:\n");
    for sub in cmd.get_subcommands() {
        out.push_str("  ");
        out.push_str(sub.get_name());
        out.push('\n');
        if let Some(about) = sub.get_about() {
            let about = about.to_string();
            if !about.trim().is_empty() {
                out.push_str("          ");
                out.push_str(about.trim());
                out.push('\n');
            }
        }
        out.push('\n');
    }

    let mut sections: Vec<(String, Vec<&clap::Arg>)> = Vec::new();
    let mut section_idx: HashMap<String, usize> = HashMap::new();

    for arg in cmd.get_arguments() {
        if arg.is_hide_set() {
            continue;
        }

        let heading = arg.get_help_heading().unwrap_or("Options").to_string();

        let idx = match section_idx.get(&heading).copied() {
            Some(i) => i,
            None => {
                sections.push((heading.clone(), Vec::new()));
                let i = sections.len() - 1;
                section_idx.insert(heading, i);
                i
            }
        };

        sections[idx].1.push(arg);
    }

    for (heading, args) in sections {
        out.push_str(&heading);
        out.push_str(":\n");

        for arg in args {
            let mut parts: Vec<String> = Vec::new();

            if let Some(short) = arg.get_short() {
                parts.push(format!("-{short}"));
            }

            if let Some(long) = arg.get_long() {
                parts.push(format!("--{long}"));
            }

            if let Some(aliases) = arg.get_visible_aliases() {
                for alias in aliases {
                    let rendered = format!("--{alias}");
                    if !parts.iter().any(|p| p == &rendered) {
                        parts.push(rendered);
                    }
                }
            }

            let mut flags = parts.join(", ");

            if arg.get_action().takes_values() {
                let value_name = arg
                    .get_value_names()
                    .and_then(|names| names.first())
                    .map(|name| name.as_str())
                    .unwrap_or("VALUE");
                flags.push(' ');
                flags.push('<');
                flags.push_str(value_name);
                flags.push('>');
            }

            out.push_str("  ");
            out.push_str(&flags);
            out.push('\n');

            if let Some(help) = arg.get_help() {
                let help = help.to_string();
                if !help.trim().is_empty() {
                    out.push_str("          ");
                    out.push_str(help.trim());
                    out.push('\n');
                }
            }

            out.push('\n');
        }
    }

    out
}

fn format_bool(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

fn output_label(format: OutputFormat) -> &'static str {
    match format {
        OutputFormat::Table => "table",
        OutputFormat::Json => "json",
    }
}

#[derive(Clone, Debug)]
struct RunConfig {
    command: Command,
    endpoint: Option<String>,
    timeout: usize,
    proxy: Option<String>,
    page_size: usize,
    output: OutputFormat,
    no_color: bool,
}

fn build_run_config(args: CliArgs, cfg: ConfigFile) -> Result<RunConfig, String> {
    validation::validate(&args)?;

    let no_color = if args.color {
        false
    } else {
        args.no_color || cfg.no_color.unwrap_or(false)
    };

    let timeout = args.timeout.or(cfg.timeout).unwrap_or(10);

    let page_size = args.page_size.or(cfg.page_size).unwrap_or(10);
    if page_size == 0 {
        return Err("invalid page-size, expected positive integer".to_string());
    }

    let proxy = args
        .proxy
        .or(cfg.proxy)
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty());

    let endpoint = args
        .endpoint
        .or(cfg.endpoint)
        .map(|e| e.trim().to_string())
        .filter(|e| !e.is_empty());

    let output_raw = args
        .output
        .or(cfg.output)
        .unwrap_or_else(|| "table".to_string());
    let output = OutputFormat::parse(&output_raw)
        .ok_or_else(|| format!("invalid output format '{output_raw}': expected table or json"))?;

    Ok(RunConfig {
        command: args.command,
        endpoint,
        timeout,
        proxy,
        page_size,
        output,
        no_color,
    })
}

fn identity_provider() -> Option<FileIdentity> {
    config::default_identity_path().map(FileIdentity::new)
}

fn confirm(prompt: &str) -> Result<bool, String> {
    print!("{prompt} [y/N] ");
    std::io::stdout()
        .flush()
        .map_err(|e| format!("failed to flush stdout: {e}"))?;
    let mut line = String::new();
    std::io::stdin()
        .read_line(&mut line)
        .map_err(|e| format!("failed to read input: {e}"))?;
    let answer = line.trim().to_lowercase();
    Ok(answer == "y" || answer == "yes")
}

fn run_login(args: &LoginArgs) -> Result<(), String> {
    let identity =
        identity_provider().ok_or_else(|| "could not determine home directory".to_string())?;
    let user = CurrentUser {
        email: args.email.trim().to_string(),
        name: args
            .name
            .clone()
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty()),
    };
    identity.login(&user)?;
    println!("signed in as {}", user.display_name());
    Ok(())
}

fn run_logout() -> Result<(), String> {
    let identity =
        identity_provider().ok_or_else(|| "could not determine home directory".to_string())?;
    identity.logout()?;
    println!("signed out");
    Ok(())
}

fn run_whoami() -> Result<(), String> {
    let identity =
        identity_provider().ok_or_else(|| "could not determine home directory".to_string())?;
    match identity.current() {
        Some(user) => match user.name.as_deref() {
            Some(name) => println!("{} <{}>", name, user.email),
            None => println!("{}", user.email),
        },
        None => println!("not signed in"),
    }
    Ok(())
}

async fn run_dashboard(session: &mut Session, renderer: &dyn Renderer) -> Result<(), String> {
    session.load_initial().await;
    match session.load_dashboard().await {
        Some(data) => {
            renderer.dashboard(&data);
            Ok(())
        }
        None => Err("dashboard data unavailable".to_string()),
    }
}

async fn run_assets(
    session: &mut Session,
    renderer: &dyn Renderer,
    run: &RunConfig,
    args: AssetsArgs,
) -> Result<(), String> {
    if !session.load_assets().await {
        return Err("assets unavailable".to_string());
    }

    let mut browser = AssetBrowser::new(run.page_size);
    browser.set_criteria(FilterCriteria {
        search_term: args.search.clone().unwrap_or_default(),
        category: args.category.clone().unwrap_or_default(),
        location: args.location.clone().unwrap_or_default(),
        status: args.status.clone().unwrap_or_default(),
    });
    if let Some(page) = args.page {
        browser.set_page(page);
    }

    if args.interactive {
        run_assets_interactive(session, renderer, browser).await
    } else {
        renderer.assets(&browser.page(session.store().assets()));
        Ok(())
    }
}

async fn run_assets_interactive(
    session: &mut Session,
    renderer: &dyn Renderer,
    mut browser: AssetBrowser,
) -> Result<(), String> {
    session.load_categories().await;
    session.load_locations().await;

    let categories = session.store().category_names();
    if !categories.is_empty() {
        format_kv_line("Categories", &categories.join(", "));
    }
    let locations = session.store().location_names();
    if !locations.is_empty() {
        format_kv_line("Locations", &locations.join(", "));
    }
    let statuses = view::distinct_statuses(session.store().assets());
    if !statuses.is_empty() {
        format_kv_line("Statuses", &statuses.join(", "));
    }

    let stdin = std::io::stdin();
    loop {
        println!();
        renderer.assets(&browser.page(session.store().assets()));
        println!("commands: n p page <N> s <term> c <name> l <name> st <name> clear r q");
        print!("> ");
        std::io::stdout()
            .flush()
            .map_err(|e| format!("failed to flush stdout: {e}"))?;

        let mut line = String::new();
        let read = stdin
            .read_line(&mut line)
            .map_err(|e| format!("failed to read input: {e}"))?;
        if read == 0 {
            return Ok(());
        }

        let line = line.trim();
        let (command, rest) = match line.split_once(' ') {
            Some((command, rest)) => (command, rest.trim()),
            None => (line, ""),
        };

        match command {
            "" => {}
            "q" | "quit" => return Ok(()),
            "n" | "next" => {
                let len = view::filter_assets(session.store().assets(), browser.criteria()).len();
                browser.next_page(len);
            }
            "p" | "prev" => {
                let len = view::filter_assets(session.store().assets(), browser.criteria()).len();
                browser.prev_page(len);
            }
            "page" => match rest.parse::<usize>() {
                Ok(page) => browser.set_page(page),
                Err(_) => println!("expected a page number"),
            },
            "s" | "search" => {
                let mut criteria = browser.criteria().clone();
                criteria.search_term = rest.to_string();
                browser.set_criteria(criteria);
            }
            "c" | "category" => {
                let mut criteria = browser.criteria().clone();
                criteria.category = rest.to_string();
                browser.set_criteria(criteria);
            }
            "l" | "location" => {
                let mut criteria = browser.criteria().clone();
                criteria.location = rest.to_string();
                browser.set_criteria(criteria);
            }
            "st" | "status" => {
                let mut criteria = browser.criteria().clone();
                criteria.status = rest.to_string();
                browser.set_criteria(criteria);
            }
            "clear" => browser.set_criteria(FilterCriteria::default()),
            "r" | "reload" => {
                session.load_assets().await;
            }
            _ => println!("unknown command '{command}'"),
        }
    }
}

async fn run_asset_command(session: &mut Session, command: AssetCommand) -> Result<(), String> {
    match command {
        AssetCommand::Add(args) => {
            let asset = NewAsset {
                name: args.name,
                category: args.category,
                location: args.location,
                status: args.status,
                purchase_date: args.purchase_date.unwrap_or_default(),
                value: args
                    .value
                    .as_deref()
                    .map(|v| v.trim().parse().unwrap_or(0.0))
                    .unwrap_or(0.0),
                description: args.description.unwrap_or_default(),
            };
            if session.create_asset(&asset).await {
                Ok(())
            } else {
                Err("asset was not created".to_string())
            }
        }
        AssetCommand::Edit(args) => {
            session.edit_asset(&args.id);
            Ok(())
        }
        AssetCommand::Rm(args) => {
            if !args.yes && !confirm("Are you sure you want to delete this asset?")? {
                println!("aborted");
                return Ok(());
            }
            if session.delete_asset(&args.id).await {
                Ok(())
            } else {
                Err("asset was not deleted".to_string())
            }
        }
    }
}

async fn run_categories(session: &mut Session, renderer: &dyn Renderer) -> Result<(), String> {
    if !session.load_categories().await {
        return Err("categories unavailable".to_string());
    }
    renderer.categories(session.store().categories());
    Ok(())
}

async fn run_locations(session: &mut Session, renderer: &dyn Renderer) -> Result<(), String> {
    if !session.load_locations().await {
        return Err("locations unavailable".to_string());
    }
    renderer.locations(session.store().locations());
    Ok(())
}

fn run_category_command(session: &Session, command: RefCommand) -> Result<(), String> {
    match command {
        RefCommand::Add => {
            session.add_category();
            Ok(())
        }
        RefCommand::Edit(args) => {
            session.edit_category(&args.id);
            Ok(())
        }
        RefCommand::Rm(args) => {
            if !args.yes && !confirm("Are you sure you want to delete this category?")? {
                println!("aborted");
                return Ok(());
            }
            session.delete_category(&args.id);
            Ok(())
        }
    }
}

fn run_location_command(session: &Session, command: RefCommand) -> Result<(), String> {
    match command {
        RefCommand::Add => {
            session.add_location();
            Ok(())
        }
        RefCommand::Edit(args) => {
            session.edit_location(&args.id);
            Ok(())
        }
        RefCommand::Rm(args) => {
            if !args.yes && !confirm("Are you sure you want to delete this location?")? {
                println!("aborted");
                return Ok(());
            }
            session.delete_location(&args.id);
            Ok(())
        }
    }
}

async fn run_report(
    session: &Session,
    renderer: &dyn Renderer,
    args: ReportArgs,
) -> Result<(), String> {
    let report = session
        .generate_report(
            &args.kind,
            args.start_date.as_deref().unwrap_or(""),
            args.end_date.as_deref().unwrap_or(""),
        )
        .await;
    match report {
        Some(report) => {
            renderer.report(&report, &model::format_today());
            Ok(())
        }
        None => Err("report unavailable".to_string()),
    }
}

async fn run_remote(run: &RunConfig, command: Command) -> Result<(), String> {
    let endpoint = run.endpoint.clone().ok_or_else(|| {
        "endpoint is required (pass --endpoint or set it in ~/.assetdash/config.yml)".to_string()
    })?;

    let client =
        RpcClient::new(&endpoint, run.timeout, run.proxy.as_deref()).map_err(|e| e.to_string())?;

    let json_mode = run.output == OutputFormat::Json;
    let busy = if json_mode {
        BusyIndicator::hidden()
    } else {
        BusyIndicator::stderr()
    };
    let mut session = Session::new(client, Box::new(TermNotifier), busy);
    let renderer = render::renderer_for(run.output);

    if !json_mode {
        print_banner();
        format_kv_line("Endpoint", &endpoint);
        let user = identity_provider()
            .and_then(|identity| identity.current())
            .map(|user| user.display_name().to_string())
            .unwrap_or_else(|| "not signed in".to_string());
        format_kv_line("User", &user);
        format_kv_line(
            "HTTP",
            &format!(
                "timeout={}s proxy={} output={} page-size={} color={}",
                run.timeout,
                if run.proxy.is_some() { "on" } else { "off" },
                output_label(run.output),
                run.page_size,
                format_bool(!run.no_color),
            ),
        );
        println!();
    }

    match command {
        Command::Dashboard => run_dashboard(&mut session, renderer.as_ref()).await,
        Command::Assets(args) => run_assets(&mut session, renderer.as_ref(), run, args).await,
        Command::Asset(sub) => run_asset_command(&mut session, sub).await,
        Command::Categories => run_categories(&mut session, renderer.as_ref()).await,
        Command::Category(sub) => run_category_command(&session, sub),
        Command::Locations => run_locations(&mut session, renderer.as_ref()).await,
        Command::Location(sub) => run_location_command(&session, sub),
        Command::Report(args) => run_report(&session, renderer.as_ref(), args).await,
        // identity commands never reach here, run_async routes them first
        Command::Login(_) | Command::Logout | Command::Whoami => Ok(()),
    }
}

async fn run_async(run: RunConfig) -> Result<(), String> {
    if run.no_color {
        colored::control::set_override(false);
    }

    match run.command.clone() {
        Command::Login(args) => run_login(&args),
        Command::Logout => run_logout(),
        Command::Whoami => run_whoami(),
        command => run_remote(&run, command).await,
    }
}

pub fn run_cli() -> Result<(), String> {
    let args = match CliArgs::try_parse() {
        Ok(args) => args,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp => {
                print!("{e}");
                return Ok(());
            }
            ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                print!("{}", render_custom_help());
                return Ok(());
            }
            ErrorKind::DisplayVersion => {
                let cmd = CliArgs::command();
                print!("{}", cmd.render_version());
                return Ok(());
            }
            _ => return Err(e.to_string()),
        },
    };

    let user_config_path = args.config.clone().map(|p| config::expand_tilde(&p));
    let cfg = match user_config_path.as_ref() {
        Some(path) => config::load_config(path, false)?,
        None => match config::default_config_path() {
            Some(path) => {
                config::ensure_default_config_file(&path)?;
                config::load_config(&path, true)?
            }
            None => ConfigFile::default(),
        },
    };

    let run = build_run_config(args, cfg)?;

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("failed to build runtime: {e}"))?;

    rt.block_on(run_async(run))?;
    Ok(())
}
